use std::collections::HashSet;

use crate::modules::cross_seed::domain::value_objects::TrackerClass;

/// Exact, case-sensitive lookup against the configured private tracker names
#[derive(Debug, Clone, Copy)]
pub struct TrackerClassifier<'a> {
    private_tracker_names: &'a HashSet<String>,
}

impl<'a> TrackerClassifier<'a> {
    pub fn new(private_tracker_names: &'a HashSet<String>) -> Self {
        Self {
            private_tracker_names,
        }
    }

    pub fn classify(&self, tracker_name: &str) -> TrackerClass {
        if self.private_tracker_names.contains(tracker_name) {
            TrackerClass::Private
        } else {
            TrackerClass::Public
        }
    }
}
