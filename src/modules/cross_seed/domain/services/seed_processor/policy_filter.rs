use super::policy::SeedPolicy;
use crate::modules::cross_seed::domain::{entities::Group, value_objects::FilterDecision};

/// Applies the minimum-duplicate and private-presence rules to whole groups
pub struct PolicyFilter<'a> {
    policy: &'a SeedPolicy,
}

impl<'a> PolicyFilter<'a> {
    pub fn new(policy: &'a SeedPolicy) -> Self {
        Self { policy }
    }

    /// Decide a single group. Member count is in hits, not distinct trackers.
    pub fn decide<P>(&self, group: &Group<P>) -> FilterDecision {
        let member_count = group.member_count();
        if member_count < self.policy.min_duplicates() {
            return FilterDecision::BelowMinimum {
                member_count,
                required: self.policy.min_duplicates(),
            };
        }

        if self.policy.private_filtering_enabled() && group.private_count() == 0 {
            return FilterDecision::NoPrivateTracker {
                public_count: group.public_count(),
            };
        }

        FilterDecision::Kept
    }

    /// Keep surviving groups in input order; failing groups are dropped entirely
    pub fn apply<P>(&self, groups: Vec<Group<P>>) -> Vec<Group<P>> {
        groups
            .into_iter()
            .filter(|group| {
                let decision = self.decide(group);
                let title = preview(&group.key().normalized_title);
                match decision {
                    FilterDecision::Kept => log::debug!(
                        "Group '{}' - KEPT ({} hits, {} private, {} public)",
                        title,
                        group.member_count(),
                        group.private_count(),
                        group.public_count()
                    ),
                    FilterDecision::BelowMinimum {
                        member_count,
                        required,
                    } => log::debug!(
                        "Group '{}' has {} matches - FILTERED (below min {})",
                        title,
                        member_count,
                        required
                    ),
                    FilterDecision::NoPrivateTracker { public_count } => log::debug!(
                        "Group '{}' has only public trackers ({} public) - FILTERED",
                        title,
                        public_count
                    ),
                }
                decision.is_kept()
            })
            .collect()
    }
}

fn preview(title: &str) -> String {
    title.chars().take(50).collect()
}
