use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use seedable::modules::torznab::{render_capabilities, HealthStatus, StatusPage};
use seedable::shared::config::AppConfig;
use seedable::shared::utils::init_logger;

/// Command-line entry point for the `seedable` binary.
#[derive(Parser, Debug)]
#[command(
    name = "seedable",
    version,
    about = "Cross-seed filter for NZBHydra2 torrent search results"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a Torznab search and print the RSS feed
    Search(SearchArgs),
    /// Print the Torznab capabilities document
    Caps,
    /// Print the health check JSON
    Health,
    /// Print the HTML status page
    StatusPage {
        #[arg(
            long,
            value_name = "URL",
            env = "SEEDABLE_BASE_URL",
            default_value = "http://localhost:5000/",
            help = "Root URL the instance is reached at"
        )]
        base_url: String,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        default_value = "search",
        help = "Torznab request type: search, movie or tvsearch"
    )]
    request_type: String,
    #[arg(short, long, value_name = "QUERY", help = "Free-text query")]
    query: Option<String>,
    #[arg(long, value_name = "IDS", help = "Comma-separated Torznab category ids")]
    cat: Option<String>,
    #[arg(long, value_name = "ID", help = "IMDb id, with or without the tt prefix")]
    imdbid: Option<String>,
    #[arg(long, value_name = "ID", help = "TVDb id")]
    tvdbid: Option<String>,
    #[arg(long, value_name = "N")]
    season: Option<String>,
    #[arg(long, value_name = "N")]
    ep: Option<String>,
    #[arg(long, value_name = "N")]
    offset: Option<String>,
    #[arg(long, value_name = "N")]
    limit: Option<String>,
}

impl SearchArgs {
    /// The same parameters a Torznab client would send, keyed by the configured API key
    fn into_params(self, api_key: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("t".to_string(), self.request_type);
        params.insert("apikey".to_string(), api_key.to_string());

        let optional = [
            ("q", self.query),
            ("cat", self.cat),
            ("imdbid", self.imdbid),
            ("tvdbid", self.tvdbid),
            ("season", self.season),
            ("ep", self.ep),
            ("offset", self.offset),
            ("limit", self.limit),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.to_string(), value);
            }
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::Search(args) => run_search(&config, args).await,
        Command::Caps => {
            println!("{}", render_capabilities()?);
            Ok(())
        }
        Command::Health => {
            println!("{}", HealthStatus::healthy(&config.policy).to_response()?.body);
            Ok(())
        }
        Command::StatusPage { base_url } => {
            let page = StatusPage {
                policy: &config.policy,
                nzbhydra_url: &config.nzbhydra_url,
                base_url: &base_url,
                api_key: &config.api_key,
            };
            println!("{}", page.render());
            Ok(())
        }
    }
}

async fn run_search(config: &AppConfig, args: SearchArgs) -> Result<()> {
    let service = seedable::build_service(config).context("failed to build search service")?;
    let params = args.into_params(&config.api_key);

    let response = service.handle(&params).await;
    if !response.is_success() {
        bail!("request failed with status {}: {}", response.status, response.body);
    }

    println!("{}", response.body);
    Ok(())
}
