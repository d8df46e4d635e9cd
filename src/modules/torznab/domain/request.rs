use std::collections::HashMap;

use crate::modules::indexer::{normalize_imdb_id, HydraQuery};
use crate::shared::application::{PaginationParams, DEFAULT_LIMIT};
use crate::shared::errors::{AppError, AppResult};

/// Value of the Torznab `t` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestType {
    Caps,
    Search,
    Movie,
    TvSearch,
    Unknown(String),
}

impl RequestType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "caps" => RequestType::Caps,
            "search" => RequestType::Search,
            "movie" => RequestType::Movie,
            "tvsearch" => RequestType::TvSearch,
            other => RequestType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestType::Caps => "caps",
            RequestType::Search => "search",
            RequestType::Movie => "movie",
            RequestType::TvSearch => "tvsearch",
            RequestType::Unknown(raw) => raw,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(
            self,
            RequestType::Search | RequestType::Movie | RequestType::TvSearch
        )
    }
}

/// One parsed `/api` call
///
/// Empty parameters are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorznabRequest {
    pub request_type: RequestType,
    pub apikey: Option<String>,
    pub query: String,
    /// Raw `cat` value, comma separated
    pub categories: String,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
    pub season: Option<String>,
    pub episode: Option<String>,
    pub pagination: PaginationParams,
}

impl TorznabRequest {
    pub fn from_params(params: &HashMap<String, String>) -> AppResult<Self> {
        let get = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let offset = parse_count(get("offset"), "offset")?.unwrap_or(0);
        let limit = parse_count(get("limit"), "limit")?.unwrap_or(DEFAULT_LIMIT);

        Ok(Self {
            request_type: RequestType::parse(get("t").as_deref().unwrap_or_default()),
            apikey: params.get("apikey").cloned(),
            query: get("q").unwrap_or_default(),
            categories: get("cat").unwrap_or_default(),
            imdb_id: get("imdbid"),
            tvdb_id: get("tvdbid"),
            season: get("season"),
            episode: get("ep"),
            pagination: PaginationParams { offset, limit },
        })
    }

    /// Requested Torznab category ids; empty means no category filter
    pub fn requested_categories(&self) -> Vec<String> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// `tt`-prefixed IMDb id, when one was requested
    pub fn normalized_imdb_id(&self) -> Option<String> {
        self.imdb_id.as_deref().map(normalize_imdb_id)
    }

    /// Key for the filtered-result cache
    ///
    /// Built from the parameters that change the result set, in sorted key
    /// order. `apikey`, `offset` and `limit` are not part of the key.
    pub fn cache_key(&self) -> String {
        let fields = [
            ("cat", self.categories.as_str()),
            ("ep", self.episode.as_deref().unwrap_or_default()),
            ("imdbid", self.imdb_id.as_deref().unwrap_or_default()),
            ("q", self.query.as_str()),
            ("season", self.season.as_deref().unwrap_or_default()),
            ("t", self.request_type.as_str()),
            ("tvdbid", self.tvdb_id.as_deref().unwrap_or_default()),
        ];

        fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Aggregator query for this request, searching for `query`
    pub fn to_hydra_query(&self, query: String) -> HydraQuery {
        HydraQuery {
            query,
            torznab_category: self.categories.clone(),
            season: self.season.clone(),
            episode: self.episode.clone(),
            imdb_id: self.normalized_imdb_id(),
            tvdb_id: self.tvdb_id.clone(),
        }
    }
}

fn parse_count(raw: Option<String>, name: &str) -> AppResult<Option<usize>> {
    raw.map(|value| {
        value.parse::<usize>().map_err(|_| {
            AppError::InvalidInput(format!("{} must be a non-negative integer, got '{}'", name, value))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let request = TorznabRequest::from_params(&params(&[("t", "search")])).unwrap();

        assert_eq!(request.request_type, RequestType::Search);
        assert_eq!(request.apikey, None);
        assert_eq!(request.query, "");
        assert_eq!(request.pagination.offset, 0);
        assert_eq!(request.pagination.limit, 100);
        assert!(request.requested_categories().is_empty());
    }

    #[test]
    fn test_parses_all_fields() {
        let request = TorznabRequest::from_params(&params(&[
            ("t", "tvsearch"),
            ("apikey", "k"),
            ("q", "Show"),
            ("cat", "5000, 5040"),
            ("tvdbid", "81189"),
            ("season", "1"),
            ("ep", "2"),
            ("offset", "10"),
            ("limit", "5"),
        ]))
        .unwrap();

        assert_eq!(request.request_type, RequestType::TvSearch);
        assert_eq!(request.apikey.as_deref(), Some("k"));
        assert_eq!(request.requested_categories(), vec!["5000", "5040"]);
        assert_eq!(request.episode.as_deref(), Some("2"));
        assert_eq!(request.pagination.offset, 10);
        assert_eq!(request.pagination.limit, 5);
    }

    #[test]
    fn test_non_numeric_paging_is_invalid_input() {
        let result = TorznabRequest::from_params(&params(&[("t", "search"), ("limit", "ten")]));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let result = TorznabRequest::from_params(&params(&[("t", "search"), ("offset", "-1")]));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let request = TorznabRequest::from_params(&params(&[("t", "music")])).unwrap();
        assert_eq!(request.request_type, RequestType::Unknown("music".to_string()));
        assert!(!request.request_type.is_search());
    }

    #[test]
    fn test_cache_key_ignores_paging_and_key() {
        let a = TorznabRequest::from_params(&params(&[
            ("t", "movie"),
            ("q", "Movie"),
            ("apikey", "one"),
            ("offset", "0"),
        ]))
        .unwrap();
        let b = TorznabRequest::from_params(&params(&[
            ("t", "movie"),
            ("q", "Movie"),
            ("apikey", "two"),
            ("offset", "50"),
        ]))
        .unwrap();
        let c = TorznabRequest::from_params(&params(&[("t", "search"), ("q", "Movie")])).unwrap();

        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn test_hydra_query_normalizes_imdb() {
        let request = TorznabRequest::from_params(&params(&[
            ("t", "movie"),
            ("imdbid", "0133093"),
            ("cat", "2000"),
        ]))
        .unwrap();

        let query = request.to_hydra_query("The Matrix".to_string());
        assert_eq!(query.query, "The Matrix");
        assert_eq!(query.imdb_id.as_deref(), Some("tt0133093"));
        assert_eq!(query.torznab_category, "2000");
    }
}
