use serde::{Deserialize, Serialize};

/// Search sent to the aggregator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydraQuery {
    pub query: String,
    /// Raw Torznab `cat` parameter
    pub torznab_category: String,
    pub season: Option<String>,
    pub episode: Option<String>,
    /// Always `tt`-prefixed when present
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
}

/// Prefix a bare IMDb id with `tt`
pub fn normalize_imdb_id(imdb_id: &str) -> String {
    let trimmed = imdb_id.trim();
    if trimmed.starts_with("tt") {
        trimmed.to_string()
    } else {
        format!("tt{}", trimmed)
    }
}
