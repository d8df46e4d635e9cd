/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use seedable::modules::cross_seed::{RawHit, SeedPolicy, SeedPolicyBuilder};
use seedable::modules::indexer::Release;

/// Builds a `Release` as NZBHydra2 would report it
pub struct ReleaseFactory {
    title: String,
    size: i64,
    indexer: String,
    link: Option<String>,
    category: String,
    imdb_id: Option<String>,
    tvdb_id: Option<String>,
    freeleech: bool,
}

impl Default for ReleaseFactory {
    fn default() -> Self {
        Self {
            title: "Test.Release.2020.1080p".to_string(),
            size: 1_500_000_000,
            indexer: "Tracker1".to_string(),
            link: None,
            category: "Movies HD".to_string(),
            imdb_id: None,
            tvdb_id: None,
            freeleech: false,
        }
    }
}

impl ReleaseFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn indexer(mut self, indexer: &str) -> Self {
        self.indexer = indexer.to_string();
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn imdb_id(mut self, imdb_id: &str) -> Self {
        self.imdb_id = Some(imdb_id.to_string());
        self
    }

    pub fn tvdb_id(mut self, tvdb_id: &str) -> Self {
        self.tvdb_id = Some(tvdb_id.to_string());
        self
    }

    pub fn freeleech(mut self) -> Self {
        self.freeleech = true;
        self
    }

    pub fn build(self) -> Release {
        // Unique per title/tracker unless set explicitly
        let link = self.link.unwrap_or_else(|| {
            format!(
                "http://hydra/getnzb/{}/{}",
                self.indexer,
                self.title.replace(' ', "_")
            )
        });

        let mut release = Release::new(self.title, self.size, self.indexer)
            .with_link(link)
            .with_category(self.category);
        release.imdb_id = self.imdb_id;
        release.tvdb_id = self.tvdb_id;
        if self.freeleech {
            release.download_volume_factor = Some("Freeleech".to_string());
        }
        release
    }
}

/// Shorthand for a payload-free hit
pub fn hit(title: &str, size: i64, tracker: &str) -> RawHit {
    RawHit::new(title, size, tracker)
}

pub fn default_policy() -> SeedPolicy {
    SeedPolicy::default()
}

pub fn policy_with_private(trackers: &[&str]) -> SeedPolicy {
    SeedPolicyBuilder::new()
        .private_trackers(trackers.iter().copied())
        .build()
        .expect("valid policy")
}

/// The two Matrix hits shared by several scenarios
pub fn matrix_pair() -> Vec<RawHit> {
    vec![
        hit("The.Matrix.1999.1080p", 1_500_000_000, "Priv1"),
        hit("the matrix 1999 1080p", 1_503_000_000, "Priv2"),
    ]
}
