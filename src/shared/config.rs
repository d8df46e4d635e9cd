use std::str::FromStr;
use std::time::Duration;

use crate::modules::cross_seed::{
    parse_tracker_list, SeedPolicy, SeedPolicyBuilder, DEFAULT_MIN_DUPLICATES,
    DEFAULT_SIZE_TOLERANCE_PERCENT,
};
use crate::modules::indexer::ArrEndpoint;
use crate::modules::torznab::LabelMode;
use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_NZBHYDRA_URL: &str = "http://localhost:5076";
pub const DEFAULT_API_KEY: &str = "seedable-default-key";
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 60;
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub nzbhydra_url: String,
    pub nzbhydra_api_key: Option<String>,
    /// Key Torznab callers must present
    pub api_key: String,
    pub policy: SeedPolicy,
    pub label_mode: LabelMode,
    pub radarr: Option<ArrEndpoint>,
    pub sonarr: Option<ArrEndpoint>,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
    pub lookup_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nzbhydra_url: DEFAULT_NZBHYDRA_URL.to_string(),
            nzbhydra_api_key: None,
            api_key: DEFAULT_API_KEY.to_string(),
            policy: SeedPolicy::default(),
            label_mode: LabelMode::default(),
            radarr: None,
            sonarr: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
            lookup_timeout: LOOKUP_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, after `.env` if one exists
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let min_duplicates: usize =
            parse_var(&get, "MIN_DUPLICATES")?.unwrap_or(DEFAULT_MIN_DUPLICATES);
        let size_tolerance_percent: f64 =
            parse_var(&get, "SIZE_TOLERANCE_PERCENT")?.unwrap_or(DEFAULT_SIZE_TOLERANCE_PERCENT);
        let private_trackers = get("PRIVATE_TRACKERS")
            .map(|raw| parse_tracker_list(&raw))
            .unwrap_or_default();

        let policy = SeedPolicyBuilder::new()
            .min_duplicates(min_duplicates)
            .size_tolerance_percent(size_tolerance_percent)
            .private_trackers(private_trackers)
            .build()
            .map_err(AppError::ConfigError)?;

        let label_mode = match get("LABEL_MODE") {
            Some(raw) => LabelMode::from_str(&raw)
                .map_err(|e| AppError::ConfigError(format!("LABEL_MODE: {}", e)))?,
            None => LabelMode::default(),
        };

        let cache_ttl = parse_var(&get, "CACHE_TTL_SECONDS")?.unwrap_or(DEFAULT_CACHE_TTL_SECONDS);
        let http_timeout =
            parse_var(&get, "HTTP_TIMEOUT_SECONDS")?.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);
        if http_timeout == 0 {
            return Err(AppError::ConfigError(
                "HTTP_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }

        let config = Self {
            nzbhydra_url: get("NZBHYDRA_URL").unwrap_or_else(|| DEFAULT_NZBHYDRA_URL.to_string()),
            nzbhydra_api_key: get("NZBHYDRA_API_KEY"),
            api_key: get("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            policy,
            label_mode,
            radarr: endpoint(&get, "RADARR_URL", "RADARR_API_KEY"),
            sonarr: endpoint(&get, "SONARR_URL", "SONARR_API_KEY"),
            cache_ttl: Duration::from_secs(cache_ttl),
            http_timeout: Duration::from_secs(http_timeout),
            lookup_timeout: LOOKUP_TIMEOUT,
        };

        log::debug!(
            "Config loaded: min_duplicates={}, tolerance={}%, {} private trackers, label mode {}",
            config.policy.min_duplicates(),
            config.policy.size_tolerance_percent(),
            config.policy.private_tracker_names().len(),
            config.label_mode
        );

        Ok(config)
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                AppError::ConfigError(format!("{} has invalid value '{}': {}", key, raw, e))
            })
        })
        .transpose()
}

fn endpoint<G>(get: &G, url_key: &str, api_key_key: &str) -> Option<ArrEndpoint>
where
    G: Fn(&str) -> Option<String>,
{
    match (get(url_key), get(api_key_key)) {
        (Some(url), Some(api_key)) => Some(ArrEndpoint::new(url, api_key)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.nzbhydra_url, DEFAULT_NZBHYDRA_URL);
        assert_eq!(config.api_key, DEFAULT_API_KEY);
        assert_eq!(config.nzbhydra_api_key, None);
        assert_eq!(config.policy.min_duplicates(), 2);
        assert_eq!(config.policy.size_tolerance_percent(), 2.0);
        assert!(!config.policy.private_filtering_enabled());
        assert_eq!(config.label_mode, LabelMode::PrivateConfigured);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.http_timeout, Duration::from_secs(60));
        assert!(config.radarr.is_none());
    }

    #[test]
    fn test_reads_policy_and_trackers() {
        let config = config_from(&[
            ("MIN_DUPLICATES", "3"),
            ("SIZE_TOLERANCE_PERCENT", "5.5"),
            ("PRIVATE_TRACKERS", " Priv1, ,Priv2 ,"),
            ("LABEL_MODE", "always"),
        ])
        .unwrap();

        assert_eq!(config.policy.min_duplicates(), 3);
        assert_eq!(config.policy.size_tolerance_percent(), 5.5);
        assert!(config.policy.private_filtering_enabled());
        assert_eq!(config.policy.private_tracker_names().len(), 2);
        assert!(config.policy.private_tracker_names().contains("Priv2"));
        assert_eq!(config.label_mode, LabelMode::Always);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("API_KEY", "  "), ("MIN_DUPLICATES", "")]).unwrap();
        assert_eq!(config.api_key, DEFAULT_API_KEY);
        assert_eq!(config.policy.min_duplicates(), 2);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config_from(&[("MIN_DUPLICATES", "two")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("MIN_DUPLICATES", "0")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("SIZE_TOLERANCE_PERCENT", "-1")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("LABEL_MODE", "never")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("HTTP_TIMEOUT_SECONDS", "0")]),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_arr_endpoints_need_url_and_key() {
        let config = config_from(&[
            ("RADARR_URL", "http://radarr:7878"),
            ("RADARR_API_KEY", "abc"),
            ("SONARR_URL", "http://sonarr:8989"),
        ])
        .unwrap();

        assert_eq!(
            config.radarr,
            Some(ArrEndpoint::new("http://radarr:7878", "abc"))
        );
        assert!(config.sonarr.is_none());
    }
}
