pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{Group, GroupKey, GroupMetadata, Hit, LabeledGroup, RawHit};
pub use value_objects::{FilterDecision, TrackerClass};
