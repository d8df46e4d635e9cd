use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a tracker is on the configured private allow-list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrackerClass {
    Private,
    Public,
}

impl TrackerClass {
    pub fn is_private(&self) -> bool {
        matches!(self, TrackerClass::Private)
    }
}

impl fmt::Display for TrackerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerClass::Private => write!(f, "private"),
            TrackerClass::Public => write!(f, "public"),
        }
    }
}

/// Outcome of running one group through the policy filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Kept,
    BelowMinimum { member_count: usize, required: usize },
    NoPrivateTracker { public_count: usize },
}

impl FilterDecision {
    pub fn is_kept(&self) -> bool {
        matches!(self, FilterDecision::Kept)
    }
}
