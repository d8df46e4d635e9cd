use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When feed titles carry the `[PRI:p PUB:q]` prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMode {
    /// Every emitted title is labelled
    Always,
    /// Only label when a private tracker set is configured
    #[default]
    PrivateConfigured,
}

impl LabelMode {
    pub fn applies(&self, private_filtering_enabled: bool) -> bool {
        match self {
            LabelMode::Always => true,
            LabelMode::PrivateConfigured => private_filtering_enabled,
        }
    }
}

impl FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(LabelMode::Always),
            "private-configured" | "private_configured" => Ok(LabelMode::PrivateConfigured),
            other => Err(format!(
                "unknown label mode '{}' (expected 'always' or 'private-configured')",
                other
            )),
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMode::Always => write!(f, "always"),
            LabelMode::PrivateConfigured => write!(f, "private-configured"),
        }
    }
}
