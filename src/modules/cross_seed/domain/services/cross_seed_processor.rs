use std::sync::Arc;

use crate::modules::cross_seed::domain::{
    entities::{Group, Hit, LabeledGroup, RawHit},
    services::seed_processor::*,
};
use crate::shared::errors::{AppError, AppResult};

/// Runs one batch of search hits through the cross-seed pipeline
///
/// Stages, all synchronous and scoped to the batch:
/// 1. Validate and annotate hits (normalized title, size bucket)
/// 2. Aggregate into `(title, bucket)` groups with tracker counts
/// 3. Drop groups that fail the policy
/// 4. Label survivors
///
/// Holds nothing but the shared policy, so one processor can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct CrossSeedProcessor {
    policy: Arc<SeedPolicy>,
}

impl CrossSeedProcessor {
    pub fn new(policy: Arc<SeedPolicy>) -> Self {
        Self { policy }
    }

    /// Process a batch, logging the metrics report at debug level
    pub fn process<P>(&self, batch: Vec<RawHit<P>>) -> AppResult<Vec<LabeledGroup<P>>> {
        let (labeled, metrics) = self.process_with_metrics(batch)?;
        log::debug!("\n{}", metrics.report());
        Ok(labeled)
    }

    /// Process a batch and return the collected metrics alongside the result
    pub fn process_with_metrics<P>(
        &self,
        batch: Vec<RawHit<P>>,
    ) -> AppResult<(Vec<LabeledGroup<P>>, PipelineMetrics)> {
        let mut metrics_builder = MetricsBuilder::new();
        metrics_builder.start_pipeline();
        metrics_builder.input_count(batch.len());

        // Stage 1: Validate and annotate
        let timer = StageTimer::start("Annotation");
        let (hits, bucket_count) = self.annotate_counting(batch)?;
        timer.stop_builder(&mut metrics_builder);
        metrics_builder.bucket_count(bucket_count);

        // Stage 2: Aggregate
        let timer = StageTimer::start("Aggregation");
        let groups = self.aggregate(hits);
        timer.stop_builder(&mut metrics_builder);

        let group_count = groups.len();
        metrics_builder.group_count(group_count);
        log::debug!("PROCESSOR: Grouped into {} unique releases", group_count);

        // Stage 3: Policy
        let timer = StageTimer::start("Filtering");
        let survivors = self.filter(groups);
        timer.stop_builder(&mut metrics_builder);

        metrics_builder.filtered_group_count(group_count - survivors.len());
        log::debug!(
            "PROCESSOR: {} cross-seedable groups (min {} duplicates{})",
            survivors.len(),
            self.policy.min_duplicates(),
            if self.policy.private_filtering_enabled() {
                ", private tracker required"
            } else {
                ""
            }
        );

        // Stage 4: Label
        let timer = StageTimer::start("Labeling");
        let labeled = label(survivors);
        timer.stop_builder(&mut metrics_builder);

        let hit_count = labeled.iter().map(|g| g.members.len()).sum();
        metrics_builder.output(labeled.len(), hit_count);
        metrics_builder.stop_pipeline();

        Ok((labeled, metrics_builder.build()))
    }

    /// Validate the whole batch, then derive normalized titles and size buckets.
    ///
    /// Fails on the first negative size rather than skipping it, since a
    /// missing hit would shift every later bucket reference.
    pub fn annotate<P>(&self, batch: Vec<RawHit<P>>) -> AppResult<Vec<Hit<P>>> {
        self.annotate_counting(batch).map(|(hits, _)| hits)
    }

    fn annotate_counting<P>(&self, batch: Vec<RawHit<P>>) -> AppResult<(Vec<Hit<P>>, usize)> {
        let sizes = batch
            .iter()
            .enumerate()
            .map(|(index, raw)| validate_size(index, raw))
            .collect::<AppResult<Vec<u64>>>()?;

        let buckets = SizeBucketer::new(self.policy.size_tolerance_percent()).assign(&sizes);

        let hits = batch
            .into_iter()
            .zip(buckets.assignments().iter().copied())
            .zip(sizes)
            .enumerate()
            .map(|(arrival_index, ((raw, size_bucket_id), size_bytes))| Hit {
                normalized_title: normalize(&raw.title),
                raw_title: raw.title,
                size_bytes,
                tracker_name: raw.tracker_name,
                size_bucket_id,
                arrival_index,
                payload: raw.payload,
            })
            .collect();

        Ok((hits, buckets.bucket_count()))
    }

    /// Group annotated hits, counting trackers against the policy's private set
    pub fn aggregate<P>(&self, hits: Vec<Hit<P>>) -> Vec<Group<P>> {
        let classifier = TrackerClassifier::new(self.policy.private_tracker_names());
        GroupAggregator::new(classifier).aggregate(hits)
    }

    /// Apply the policy filter
    pub fn filter<P>(&self, groups: Vec<Group<P>>) -> Vec<Group<P>> {
        PolicyFilter::new(&self.policy).apply(groups)
    }

    /// Get the current policy (for status reporting)
    pub fn policy(&self) -> &SeedPolicy {
        &self.policy
    }
}

fn validate_size<P>(index: usize, raw: &RawHit<P>) -> AppResult<u64> {
    u64::try_from(raw.size_bytes).map_err(|_| {
        AppError::InvalidHit(format!(
            "hit #{} '{}' from '{}' has negative size {}",
            index, raw.title, raw.tracker_name, raw.size_bytes
        ))
    })
}
