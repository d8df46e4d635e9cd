use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /internalapi/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HydraSearchRequest {
    pub query: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdbid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdbid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydraSearchResponse {
    #[serde(default)]
    pub search_results: Vec<HydraSearchResult>,
    #[serde(default)]
    pub number_of_available_results: Option<i64>,
}

/// One entry of `searchResults`
///
/// Numeric-looking fields arrive as numbers or strings depending on the
/// indexer, so they are kept as raw JSON and converted by the mapper.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydraSearchResult {
    pub title: Option<String>,
    #[serde(default)]
    pub size: Value,
    pub indexer: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub search_result_id: Value,
    #[serde(rename = "details_link", alias = "detailsLink")]
    pub details_link: Option<String>,
    pub pub_date: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub seeders: Value,
    #[serde(default)]
    pub peers: Value,
    #[serde(default)]
    pub grabs: Value,
    #[serde(default)]
    pub download_volume_factor: Value,
    #[serde(default)]
    pub torrent_download_factor: Value,
    #[serde(default)]
    pub imdb_id: Value,
    #[serde(default)]
    pub tvdb_id: Value,
}
