use serde::{Deserialize, Serialize};

/// One search result as reported by the aggregator
///
/// Everything the Torznab feed needs to render an item. The cross-seed engine
/// only looks at `title`, `size` and `indexer`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub title: String,
    pub size: i64,
    /// Tracker the aggregator got this result from
    pub indexer: String,
    pub link: String,
    pub search_result_id: Option<String>,
    pub details_link: String,
    /// Raw date string as sent upstream
    pub pub_date: String,
    /// Aggregator category name, e.g. "Movies HD"
    pub category: String,
    pub seeders: i64,
    pub peers: i64,
    pub grabs: i64,
    pub download_volume_factor: Option<String>,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
}

impl Release {
    pub fn new(title: impl Into<String>, size: i64, indexer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size,
            indexer: indexer.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    pub fn with_tvdb_id(mut self, tvdb_id: impl Into<String>) -> Self {
        self.tvdb_id = Some(tvdb_id.into());
        self
    }

    /// Whether the tracker marks this result as freeleech
    pub fn is_freeleech(&self) -> bool {
        self.download_volume_factor
            .as_deref()
            .map(|factor| {
                let factor = factor.trim().to_ascii_lowercase();
                factor == "freeleech" || factor == "freelech"
            })
            .unwrap_or(false)
    }
}
