//! Torznab protocol layer: request parsing, search flow, RSS and caps documents.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{HealthStatus, StatusPage, TorznabService};
pub use domain::{FeedItem, LabelMode, RequestType, TorznabRequest, TorznabResponse};
pub use infrastructure::{format_rfc822_date, render_capabilities, FeedWriter};
