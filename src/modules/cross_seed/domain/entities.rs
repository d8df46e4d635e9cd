use serde::Serialize;

/// One tracker's advertisement of a release, as handed over by the caller.
///
/// `payload` is carried through the pipeline untouched so the protocol layer
/// can render whatever extra fields the upstream sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit<P = ()> {
    pub title: String,
    pub size_bytes: i64,
    pub tracker_name: String,
    pub payload: P,
}

impl RawHit<()> {
    pub fn new(title: impl Into<String>, size_bytes: i64, tracker_name: impl Into<String>) -> Self {
        Self::with_payload(title, size_bytes, tracker_name, ())
    }
}

impl<P> RawHit<P> {
    pub fn with_payload(
        title: impl Into<String>,
        size_bytes: i64,
        tracker_name: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            title: title.into(),
            size_bytes,
            tracker_name: tracker_name.into(),
            payload,
        }
    }
}

/// A validated hit with its batch-scoped derivations
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<P = ()> {
    pub raw_title: String,
    pub size_bytes: u64,
    pub tracker_name: String,
    pub normalized_title: String,
    pub size_bucket_id: usize,
    /// Position in the incoming batch
    pub arrival_index: usize,
    pub payload: P,
}

impl<P> Hit<P> {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            normalized_title: self.normalized_title.clone(),
            size_bucket_id: self.size_bucket_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub normalized_title: String,
    pub size_bucket_id: usize,
}

/// Per-group tracker counts surfaced to the protocol layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupMetadata {
    pub private_count: usize,
    pub public_count: usize,
}

/// Hits believed to be the same release. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<P = ()> {
    key: GroupKey,
    members: Vec<Hit<P>>,
    metadata: GroupMetadata,
}

impl<P> Group<P> {
    pub(crate) fn new(key: GroupKey, members: Vec<Hit<P>>, metadata: GroupMetadata) -> Self {
        debug_assert!(!members.is_empty(), "groups are created from a hit");
        Self {
            key,
            members,
            metadata,
        }
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    pub fn members(&self) -> &[Hit<P>] {
        &self.members
    }

    /// Number of hits, not distinct trackers
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Earliest arrival in the batch
    pub fn first_member(&self) -> &Hit<P> {
        &self.members[0]
    }

    pub fn private_count(&self) -> usize {
        self.metadata.private_count
    }

    pub fn public_count(&self) -> usize {
        self.metadata.public_count
    }

    pub fn metadata(&self) -> GroupMetadata {
        self.metadata
    }

    pub fn into_members(self) -> Vec<Hit<P>> {
        self.members
    }
}

/// A surviving group ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledGroup<P = ()> {
    /// `"[PRI:p PUB:q] "` prefix, trailing space included
    pub label: String,
    /// Label followed by the first member's raw title. For protocol layers
    /// that emit one entry per group; the Torznab feed titles each member.
    pub display_title: String,
    pub members: Vec<Hit<P>>,
    pub metadata: GroupMetadata,
}

impl<P> LabeledGroup<P> {
    /// Apply this group's label to an arbitrary member title
    pub fn labeled(&self, title: &str) -> String {
        format!("{}{}", self.label, title)
    }
}
