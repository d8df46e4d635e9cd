use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Metrics for one run of the cross-seed pipeline
///
/// Tracks per-stage timing and how the batch shrank at each step.
#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    /// Total duration of the entire pipeline
    pub total_duration: Duration,

    /// Duration of each stage by name
    pub stage_durations: HashMap<String, Duration>,

    /// Number of hits in the batch
    pub input_count: usize,

    /// Number of size buckets opened
    pub bucket_count: usize,

    /// Number of (title, bucket) groups formed
    pub group_count: usize,

    /// Number of groups dropped by the policy filter
    pub filtered_group_count: usize,

    /// Number of groups that survived
    pub output_group_count: usize,

    /// Number of hits across surviving groups
    pub output_hit_count: usize,
}

impl PipelineMetrics {
    /// Create empty metrics
    pub fn new() -> Self {
        Self {
            total_duration: Duration::ZERO,
            stage_durations: HashMap::new(),
            input_count: 0,
            bucket_count: 0,
            group_count: 0,
            filtered_group_count: 0,
            output_group_count: 0,
            output_hit_count: 0,
        }
    }

    /// Percentage of hits that were folded into an earlier group
    pub fn grouping_rate(&self) -> f32 {
        if self.input_count == 0 {
            return 0.0;
        }

        let folded = self.input_count.saturating_sub(self.group_count);
        (folded as f32 / self.input_count as f32) * 100.0
    }

    /// Percentage of groups removed by the policy
    pub fn filter_rate(&self) -> f32 {
        if self.group_count == 0 {
            return 0.0;
        }

        (self.filtered_group_count as f32 / self.group_count as f32) * 100.0
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut lines = vec![
            "=== Cross-Seed Pipeline Metrics ===".to_string(),
            format!("Total Duration: {}us", self.total_duration.as_micros()),
            format!("Input Hits: {}", self.input_count),
            format!("Size Buckets: {}", self.bucket_count),
            format!(
                "Groups: {} ({:.1}% of hits folded)",
                self.group_count,
                self.grouping_rate()
            ),
            format!(
                "Filtered Groups: {} ({:.1}%)",
                self.filtered_group_count,
                self.filter_rate()
            ),
            format!(
                "Output: {} groups / {} hits",
                self.output_group_count, self.output_hit_count
            ),
            "".to_string(),
            "Stage Durations:".to_string(),
        ];

        // Sort stages by duration (slowest first)
        let mut stages: Vec<_> = self.stage_durations.iter().collect();
        stages.sort_by(|a, b| b.1.cmp(a.1));

        for (stage, duration) in stages {
            lines.push(format!("  {}: {}us", stage, duration.as_micros()));
        }

        lines.join("\n")
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing pipeline stages
pub struct StageTimer {
    stage_name: String,
    start: Instant,
}

impl StageTimer {
    /// Start timing a stage
    pub fn start(stage_name: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            start: Instant::now(),
        }
    }

    /// Stop timing and record duration in metrics builder
    pub fn stop_builder(self, builder: &mut MetricsBuilder) -> Duration {
        let duration = self.start.elapsed();
        builder.add_stage(self.stage_name, duration);
        duration
    }
}

/// Builder for constructing metrics incrementally
pub struct MetricsBuilder {
    metrics: PipelineMetrics,
    pipeline_start: Option<Instant>,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self {
            metrics: PipelineMetrics::new(),
            pipeline_start: None,
        }
    }

    /// Start timing the entire pipeline
    pub fn start_pipeline(&mut self) {
        self.pipeline_start = Some(Instant::now());
    }

    /// Stop timing the entire pipeline
    pub fn stop_pipeline(&mut self) {
        if let Some(start) = self.pipeline_start {
            self.metrics.total_duration = start.elapsed();
        }
    }

    pub fn input_count(&mut self, count: usize) {
        self.metrics.input_count = count;
    }

    pub fn bucket_count(&mut self, count: usize) {
        self.metrics.bucket_count = count;
    }

    pub fn group_count(&mut self, count: usize) {
        self.metrics.group_count = count;
    }

    pub fn filtered_group_count(&mut self, count: usize) {
        self.metrics.filtered_group_count = count;
    }

    pub fn output(&mut self, groups: usize, hits: usize) {
        self.metrics.output_group_count = groups;
        self.metrics.output_hit_count = hits;
    }

    /// Add stage duration
    pub fn add_stage(&mut self, name: impl Into<String>, duration: Duration) {
        self.metrics.stage_durations.insert(name.into(), duration);
    }

    /// Build the final metrics
    pub fn build(self) -> PipelineMetrics {
        self.metrics
    }
}

impl Default for MetricsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_metrics() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.input_count, 0);
        assert_eq!(metrics.grouping_rate(), 0.0);
        assert_eq!(metrics.filter_rate(), 0.0);
    }

    #[test]
    fn test_grouping_rate() {
        let mut metrics = PipelineMetrics::new();
        metrics.input_count = 10;
        metrics.group_count = 4;

        assert!((metrics.grouping_rate() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_filter_rate() {
        let mut metrics = PipelineMetrics::new();
        metrics.group_count = 4;
        metrics.filtered_group_count = 1;

        assert_eq!(metrics.filter_rate(), 25.0);
    }

    #[test]
    fn test_metrics_builder() {
        let mut builder = MetricsBuilder::new();
        builder.start_pipeline();
        builder.input_count(10);
        builder.bucket_count(3);
        builder.group_count(4);
        builder.filtered_group_count(2);
        builder.output(2, 6);

        let timer = StageTimer::start("Aggregation");
        thread::sleep(Duration::from_millis(2));
        timer.stop_builder(&mut builder);
        builder.stop_pipeline();

        let metrics = builder.build();
        assert_eq!(metrics.bucket_count, 3);
        assert_eq!(metrics.output_group_count, 2);
        assert_eq!(metrics.output_hit_count, 6);
        assert!(metrics.stage_durations["Aggregation"] >= Duration::from_millis(2));
        assert!(metrics.total_duration >= Duration::from_millis(2));
    }

    #[test]
    fn test_metrics_builder_without_start() {
        let mut builder = MetricsBuilder::new();
        builder.stop_pipeline();
        assert_eq!(builder.build().total_duration, Duration::ZERO);
    }

    #[test]
    fn test_report_stage_sorting() {
        let mut metrics = PipelineMetrics::new();
        metrics
            .stage_durations
            .insert("Fast".to_string(), Duration::from_micros(100));
        metrics
            .stage_durations
            .insert("Slow".to_string(), Duration::from_micros(900));

        let report = metrics.report();

        assert!(report.contains("Cross-Seed Pipeline Metrics"));
        let slow_pos = report.find("Slow").unwrap();
        let fast_pos = report.find("Fast").unwrap();
        assert!(slow_pos < fast_pos);
    }
}
