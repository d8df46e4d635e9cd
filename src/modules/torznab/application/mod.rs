pub mod service;
pub mod status;

pub use service::{FeedItems, TorznabService};
pub use status::{HealthStatus, StatusPage};
