//! Grouping, classification and filtering of search hits into cross-seedable releases.

pub mod domain;

// Re-exports for easy external access
pub use domain::services::seed_processor::{
    label_prefix, normalize, parse_tracker_list, PipelineMetrics, SeedPolicy, SeedPolicyBuilder,
    DEFAULT_MIN_DUPLICATES, DEFAULT_SIZE_TOLERANCE_PERCENT,
};
pub use domain::services::CrossSeedProcessor;
pub use domain::{
    FilterDecision, Group, GroupKey, GroupMetadata, Hit, LabeledGroup, RawHit, TrackerClass,
};
