/// Test helper functions and service builders
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use seedable::modules::cross_seed::SeedPolicy;
use seedable::modules::indexer::{HydraQuery, Release, ReleaseSearcher, TitleLookup};
use seedable::modules::torznab::TorznabService;
use seedable::shared::errors::AppResult;

pub const TEST_API_KEY: &str = "test-key";

mock! {
    pub Searcher {}

    #[async_trait]
    impl ReleaseSearcher for Searcher {
        async fn search(&self, query: &HydraQuery) -> AppResult<Vec<Release>>;
    }
}

mock! {
    pub Lookup {}

    #[async_trait]
    impl TitleLookup for Lookup {
        async fn movie_title(&self, imdb_id: &str) -> Option<String>;
        async fn series_title(&self, tvdb_id: &str) -> Option<String>;
    }
}

/// Lookup that is never expected to be called
pub fn silent_lookup() -> MockLookup {
    let mut lookup = MockLookup::new();
    lookup.expect_movie_title().never();
    lookup.expect_series_title().never();
    lookup
}

/// Searcher that answers every query with `releases`
pub fn searcher_returning(releases: Vec<Release>) -> MockSearcher {
    let mut searcher = MockSearcher::new();
    searcher
        .expect_search()
        .returning(move |_| Ok(releases.clone()));
    searcher
}

pub fn build_service(
    policy: SeedPolicy,
    searcher: MockSearcher,
    lookup: MockLookup,
) -> TorznabService {
    TorznabService::new(
        TEST_API_KEY,
        Arc::new(policy),
        Arc::new(searcher),
        Arc::new(lookup),
        Duration::from_secs(60),
    )
}

/// Torznab query parameters with the test API key already set
pub fn torznab_params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    let mut params: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    params
        .entry("apikey".to_string())
        .or_insert_with(|| TEST_API_KEY.to_string());
    params
}

/// Text of every `<title>` inside an `<item>`
pub fn item_titles(xml: &str) -> Vec<String> {
    xml.split("<item>")
        .skip(1)
        .filter_map(|item| {
            let start = item.find("<title>")? + "<title>".len();
            let end = item.find("</title>")?;
            Some(item[start..end].to_string())
        })
        .collect()
}
