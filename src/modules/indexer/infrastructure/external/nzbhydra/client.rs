use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use super::{dto::HydraSearchResponse, mapper::HydraMapper};
use crate::modules::indexer::domain::{HydraQuery, Release};
use crate::modules::indexer::infrastructure::external::{CommonHttpHandler, RetryConfig};
use crate::modules::indexer::traits::ReleaseSearcher;
use crate::shared::domain::value_objects::UpstreamService;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::TimedOperation;

pub struct NzbHydraClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry_config: RetryConfig,
}

impl NzbHydraClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let client = CommonHttpHandler::create_http_client(timeout, "Seedable/1.0")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            retry_config: RetryConfig::conservative(),
        })
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReleaseSearcher for NzbHydraClient {
    async fn search(&self, query: &HydraQuery) -> AppResult<Vec<Release>> {
        let body = HydraMapper::to_request(query);
        info!("Querying NZBHydra2: {:?}", body);

        let url = format!("{}/internalapi/search", self.base_url);
        let api_key: Vec<(&str, &str)> = self
            .api_key
            .as_deref()
            .map(|key| vec![("apikey", key)])
            .unwrap_or_default();

        let timer = TimedOperation::new("NZBHydra2 search");
        let response = CommonHttpHandler::execute_with_retry(
            || self.client.post(&url).query(&api_key).json(&body).send(),
            &self.retry_config,
            UpstreamService::NzbHydra,
            "search",
        )
        .await?;

        let hydra_response = response.json::<HydraSearchResponse>().await.map_err(|e| {
            AppError::ApiError(format!("Failed to parse NZBHydra2 response: {}", e))
        })?;

        let total = hydra_response.search_results.len();
        timer.finish_with_info(&format!("{} raw results", total));
        let releases: Vec<Release> = hydra_response
            .search_results
            .into_iter()
            .filter_map(HydraMapper::to_domain)
            .collect();

        info!(
            "NZBHydra2 returned {} results ({} usable, {} available upstream)",
            total,
            releases.len(),
            hydra_response.number_of_available_results.unwrap_or(total as i64)
        );

        Ok(releases)
    }
}
