pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::indexer::{ArrLookupClient, NzbHydraClient};
use modules::torznab::TorznabService;
use shared::config::AppConfig;
use shared::errors::AppResult;

/// Wire the production collaborators behind a `TorznabService`
pub fn build_service(config: &AppConfig) -> AppResult<TorznabService> {
    let searcher = NzbHydraClient::new(
        &config.nzbhydra_url,
        config.nzbhydra_api_key.clone(),
        config.http_timeout,
    )?;
    let lookup = ArrLookupClient::new(
        config.radarr.clone(),
        config.sonarr.clone(),
        config.lookup_timeout,
    )?;

    log::info!("NZBHydra2 URL: {}", searcher.base_url());
    log::info!("Minimum duplicates: {}", config.policy.min_duplicates());
    log::info!(
        "Size tolerance: {}%",
        config.policy.size_tolerance_percent()
    );
    if config.policy.private_filtering_enabled() {
        log::info!(
            "Private trackers: {} configured, groups need at least one",
            config.policy.private_tracker_names().len()
        );
    }

    Ok(TorznabService::new(
        config.api_key.clone(),
        Arc::new(config.policy.clone()),
        Arc::new(searcher),
        Arc::new(lookup),
        config.cache_ttl,
    )
    .with_label_mode(config.label_mode))
}
