use std::collections::HashSet;

pub const DEFAULT_MIN_DUPLICATES: usize = 2;
pub const DEFAULT_SIZE_TOLERANCE_PERCENT: f64 = 2.0;

/// Cross-seedability policy
///
/// Built once at startup and shared read-only by every request. Fields are
/// private so `private_filtering_enabled` can never drift from the tracker set.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPolicy {
    min_duplicates: usize,
    private_tracker_names: HashSet<String>,
    size_tolerance_percent: f64,
    private_filtering_enabled: bool,
}

impl SeedPolicy {
    /// Creates a policy with production defaults: 2 duplicates, 2% tolerance, no private trackers
    pub fn new() -> Self {
        Self {
            min_duplicates: DEFAULT_MIN_DUPLICATES,
            private_tracker_names: HashSet::new(),
            size_tolerance_percent: DEFAULT_SIZE_TOLERANCE_PERCENT,
            private_filtering_enabled: false,
        }
    }

    pub fn min_duplicates(&self) -> usize {
        self.min_duplicates
    }

    pub fn private_tracker_names(&self) -> &HashSet<String> {
        &self.private_tracker_names
    }

    pub fn size_tolerance_percent(&self) -> f64 {
        self.size_tolerance_percent
    }

    /// True when at least one private tracker is configured
    pub fn private_filtering_enabled(&self) -> bool {
        self.private_filtering_enabled
    }

    /// Validates the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.min_duplicates < 1 {
            return Err(format!(
                "min_duplicates must be >= 1, got {}",
                self.min_duplicates
            ));
        }

        if !self.size_tolerance_percent.is_finite() || self.size_tolerance_percent < 0.0 {
            return Err(format!(
                "size_tolerance_percent must be a finite value >= 0, got {}",
                self.size_tolerance_percent
            ));
        }

        Ok(())
    }
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a comma-separated tracker list, trimming entries and dropping blanks
pub fn parse_tracker_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for SeedPolicy
#[derive(Default)]
pub struct SeedPolicyBuilder {
    policy: SeedPolicy,
}

impl SeedPolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: SeedPolicy::new(),
        }
    }

    pub fn min_duplicates(mut self, min: usize) -> Self {
        self.policy.min_duplicates = min;
        self
    }

    pub fn size_tolerance_percent(mut self, percent: f64) -> Self {
        self.policy.size_tolerance_percent = percent;
        self
    }

    pub fn private_trackers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.private_tracker_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(mut self) -> Result<SeedPolicy, String> {
        self.policy.private_filtering_enabled = !self.policy.private_tracker_names.is_empty();
        self.policy.validate()?;
        Ok(self.policy)
    }
}
