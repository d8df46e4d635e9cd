use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use super::dto::{RadarrMovie, SonarrSeries};
use crate::modules::indexer::domain::normalize_imdb_id;
use crate::modules::indexer::infrastructure::external::{CommonHttpHandler, RetryConfig};
use crate::modules::indexer::traits::TitleLookup;
use crate::shared::domain::value_objects::UpstreamService;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

/// Base URL and key for one *arr instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrEndpoint {
    pub url: String,
    pub api_key: String,
}

impl ArrEndpoint {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// A lookup needs both a URL and a key
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }
}

/// Title lookups through Radarr (IMDb) and Sonarr (TVDb)
pub struct ArrLookupClient {
    client: Client,
    radarr: Option<ArrEndpoint>,
    sonarr: Option<ArrEndpoint>,
    retry_config: RetryConfig,
}

impl ArrLookupClient {
    pub fn new(
        radarr: Option<ArrEndpoint>,
        sonarr: Option<ArrEndpoint>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = CommonHttpHandler::create_http_client(timeout, "Seedable/1.0")?;

        Ok(Self {
            client,
            radarr: radarr.filter(ArrEndpoint::is_configured),
            sonarr: sonarr.filter(ArrEndpoint::is_configured),
            retry_config: RetryConfig::none(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &ArrEndpoint,
        path: &str,
        query: &[(&str, &str)],
        service: UpstreamService,
    ) -> AppResult<T> {
        let url = format!("{}{}", endpoint.url, path);
        LogContext::api_call(&service.to_string(), path, "GET", None);
        let start = Instant::now();
        let response = CommonHttpHandler::execute_with_retry(
            || {
                self.client
                    .get(&url)
                    .query(query)
                    .header("X-Api-Key", &endpoint.api_key)
                    .send()
            },
            &self.retry_config,
            service,
            "lookup",
        )
        .await?;
        LogContext::api_call(
            &service.to_string(),
            path,
            response.status().as_str(),
            Some(start.elapsed().as_millis() as u64),
        );

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse {} response: {}", service, e)))
    }
}

#[async_trait]
impl TitleLookup for ArrLookupClient {
    async fn movie_title(&self, imdb_id: &str) -> Option<String> {
        let endpoint = self.radarr.as_ref()?;
        let imdb_id = normalize_imdb_id(imdb_id);

        let movie: AppResult<RadarrMovie> = self
            .get_json(
                endpoint,
                "/api/v3/movie/lookup/imdb",
                &[("imdbId", imdb_id.as_str())],
                UpstreamService::Radarr,
            )
            .await;

        match movie {
            Ok(RadarrMovie {
                title: Some(title), ..
            }) if !title.is_empty() => {
                info!("Looked up IMDb {} via Radarr -> title: '{}'", imdb_id, title);
                Some(title)
            }
            Ok(_) => {
                warn!("No title found for IMDb ID {} in Radarr", imdb_id);
                None
            }
            Err(e) => {
                error!("Error looking up IMDb ID {} from Radarr: {}", imdb_id, e);
                None
            }
        }
    }

    async fn series_title(&self, tvdb_id: &str) -> Option<String> {
        let endpoint = self.sonarr.as_ref()?;
        let term = format!("tvdb:{}", tvdb_id.trim());

        let series: AppResult<Vec<SonarrSeries>> = self
            .get_json(
                endpoint,
                "/api/v3/series/lookup",
                &[("term", term.as_str())],
                UpstreamService::Sonarr,
            )
            .await;

        match series {
            Ok(series) => match series.into_iter().next().and_then(|s| s.title) {
                Some(title) if !title.is_empty() => {
                    info!("Looked up TVDb {} via Sonarr -> title: '{}'", tvdb_id, title);
                    Some(title)
                }
                _ => {
                    warn!("No title found for TVDb ID {} in Sonarr", tvdb_id);
                    None
                }
            },
            Err(e) => {
                error!("Error looking up TVDb ID {} from Sonarr: {}", tvdb_id, e);
                None
            }
        }
    }
}
