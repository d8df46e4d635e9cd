/// Building blocks of the cross-seed pipeline.
///
/// Each stage is a pure function of one batch and the read-only `SeedPolicy`:
/// - `title_normalizer`: raw title to grouping key
/// - `size_bucketer`: sizes to tolerance buckets
/// - `tracker_classifier`: tracker name to private/public
/// - `group_aggregator`: hits to `(title, bucket)` groups
/// - `policy_filter`: minimum-duplicate and private-presence rules
/// - `labeler`: `[PRI:p PUB:q]` labels for survivors
pub mod group_aggregator;
pub mod labeler;
pub mod metrics;
pub mod policy;
pub mod policy_filter;
pub mod size_bucketer;
pub mod title_normalizer;
pub mod tracker_classifier;

// Re-export main types
pub use group_aggregator::GroupAggregator;
pub use labeler::{label, label_prefix};
pub use metrics::{MetricsBuilder, PipelineMetrics, StageTimer};
pub use policy::{
    parse_tracker_list, SeedPolicy, SeedPolicyBuilder, DEFAULT_MIN_DUPLICATES,
    DEFAULT_SIZE_TOLERANCE_PERCENT,
};
pub use policy_filter::PolicyFilter;
pub use size_bucketer::{SizeBucketer, SizeBuckets};
pub use title_normalizer::{
    normalize, LowercaseTransform, NormalizeWhitespaceTransform, ReplaceSeparatorsTransform,
    TitleNormalizer, TitleTransformation,
};
pub use tracker_classifier::TrackerClassifier;
