use serde::Serialize;

use crate::modules::cross_seed::SeedPolicy;
use crate::modules::torznab::domain::{TorznabResponse, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON};
use crate::shared::errors::AppResult;

/// `/health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub min_duplicates: usize,
}

impl HealthStatus {
    pub fn healthy(policy: &SeedPolicy) -> Self {
        Self {
            status: "healthy",
            min_duplicates: policy.min_duplicates(),
        }
    }

    pub fn to_response(&self) -> AppResult<TorznabResponse> {
        Ok(TorznabResponse {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body: serde_json::to_string(self)?,
        })
    }
}

/// What the index page shows about the running instance
#[derive(Debug, Clone)]
pub struct StatusPage<'a> {
    pub policy: &'a SeedPolicy,
    pub nzbhydra_url: &'a str,
    /// Root URL the instance is reached at, e.g. `http://host:5000/`
    pub base_url: &'a str,
    pub api_key: &'a str,
}

impl StatusPage<'_> {
    pub fn render(&self) -> String {
        format!(
            r#"<html>
<head><title>Seedable</title></head>
<body>
    <h1>Seedable - Cross-Seed Torznab Filter</h1>
    <p>Status: <strong>Running</strong></p>
    <p>Minimum trackers required: <strong>{min}</strong></p>
    <p>Size tolerance: <strong>{tolerance}%</strong></p>
    <p>Private trackers: <strong>{private}</strong></p>
    <p>NZBHydra2 URL: <strong>{hydra}</strong></p>
    <hr>
    <h3>Add to Sonarr/Radarr:</h3>
    <ul>
        <li>URL: <code>{base}api</code></li>
        <li>API Key: <code>{key}</code></li>
    </ul>
</body>
</html>
"#,
            min = self.policy.min_duplicates(),
            tolerance = self.policy.size_tolerance_percent(),
            private = self.policy.private_tracker_names().len(),
            hydra = escape_html(self.nzbhydra_url),
            base = escape_html(self.base_url),
            key = escape_html(self.api_key),
        )
    }

    pub fn to_response(&self) -> TorznabResponse {
        TorznabResponse {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: self.render(),
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
