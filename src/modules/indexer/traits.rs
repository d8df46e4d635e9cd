use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::modules::indexer::domain::{HydraQuery, Release};
use crate::shared::errors::AppResult;

/// Source of raw search results
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseSearcher: Send + Sync {
    /// Run one search against the aggregator
    async fn search(&self, query: &HydraQuery) -> AppResult<Vec<Release>>;
}

/// Resolves external ids to human titles so id-only searches still have a query
///
/// Lookups are best effort: failures are logged and reported as `None`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn movie_title(&self, imdb_id: &str) -> Option<String>;

    async fn series_title(&self, tvdb_id: &str) -> Option<String>;
}
