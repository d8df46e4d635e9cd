use serde_json::Value;

use super::dto::{HydraSearchRequest, HydraSearchResult};
use crate::modules::indexer::domain::{normalize_imdb_id, HydraQuery, Release};

/// Torznab category id → aggregator category name
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("2000", "Movies"),
    ("2010", "Movies SD"),
    ("2040", "Movies HD"),
    ("2045", "Movies UHD"),
    ("5000", "TV"),
    ("5030", "TV SD"),
    ("5040", "TV HD"),
    ("5045", "TV UHD"),
];

pub struct HydraMapper;

impl HydraMapper {
    /// Aggregator category for a raw Torznab `cat` value.
    ///
    /// The whole string is looked up, so a comma list searches everything.
    pub fn category_for(torznab_category: &str) -> &'static str {
        CATEGORY_MAP
            .iter()
            .find(|(id, _)| *id == torznab_category.trim())
            .map(|(_, name)| *name)
            .unwrap_or("All")
    }

    pub fn to_request(query: &HydraQuery) -> HydraSearchRequest {
        HydraSearchRequest {
            query: query.query.clone(),
            category: Self::category_for(&query.torznab_category).to_string(),
            season: non_empty(query.season.as_deref()),
            episode: non_empty(query.episode.as_deref()),
            imdbid: non_empty(query.imdb_id.as_deref()).map(|id| normalize_imdb_id(&id)),
            tvdbid: non_empty(query.tvdb_id.as_deref()),
        }
    }

    /// Map one result, or `None` when it cannot take part in grouping
    pub fn to_domain(result: HydraSearchResult) -> Option<Release> {
        let title = match result.title.filter(|t| !t.trim().is_empty()) {
            Some(title) => title,
            None => {
                log::warn!("Dropping NZBHydra2 result without a title");
                return None;
            }
        };

        let size = match &result.size {
            Value::Null => 0,
            other => match value_as_i64(other).filter(|size| *size >= 0) {
                Some(size) => size,
                None => {
                    log::warn!("Dropping '{}': unusable size {}", title, other);
                    return None;
                }
            },
        };

        let download_volume_factor = value_as_string(&result.download_volume_factor)
            .or_else(|| value_as_string(&result.torrent_download_factor));

        Some(Release {
            title,
            size,
            indexer: result.indexer.unwrap_or_default(),
            link: result.link.unwrap_or_default(),
            search_result_id: value_as_string(&result.search_result_id),
            details_link: result.details_link.unwrap_or_default(),
            pub_date: result.pub_date.or(result.date).unwrap_or_default(),
            category: result.category.unwrap_or_else(|| "Movies".to_string()),
            seeders: value_as_i64(&result.seeders).unwrap_or(0),
            peers: value_as_i64(&result.peers).unwrap_or(0),
            grabs: value_as_i64(&result.grabs).unwrap_or(0),
            download_volume_factor,
            imdb_id: value_as_string(&result.imdb_id),
            tvdb_id: value_as_string(&result.tvdb_id),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
