use serde::{Deserialize, Serialize};
use std::fmt;

/// External services the filter talks to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    /// NZBHydra2 search aggregator - source of all releases
    #[serde(rename = "nzbhydra")]
    NzbHydra,
    /// Radarr, used to turn an IMDb id into a movie title
    #[serde(rename = "radarr")]
    Radarr,
    /// Sonarr, used to turn a TVDb id into a series title
    #[serde(rename = "sonarr")]
    Sonarr,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamService::NzbHydra => write!(f, "NZBHydra2"),
            UpstreamService::Radarr => write!(f, "Radarr"),
            UpstreamService::Sonarr => write!(f, "Sonarr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(UpstreamService::NzbHydra.to_string(), "NZBHydra2");
        assert_eq!(UpstreamService::Radarr.to_string(), "Radarr");
        assert_eq!(UpstreamService::Sonarr.to_string(), "Sonarr");
    }
}
