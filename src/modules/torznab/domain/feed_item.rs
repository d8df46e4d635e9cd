use serde::Serialize;

use crate::modules::cross_seed::{GroupMetadata, LabeledGroup};
use crate::modules::indexer::Release;

/// One release that survived filtering, with its group's tracker counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub release: Release,
    /// `[PRI:p PUB:q] ` of the group the release belongs to
    pub label: String,
    pub tracker_counts: GroupMetadata,
}

impl FeedItem {
    /// Flatten groups into items, group order first, then member arrival order
    pub fn flatten(groups: Vec<LabeledGroup<Release>>) -> Vec<FeedItem> {
        groups
            .into_iter()
            .flat_map(|group| {
                let label = group.label;
                let tracker_counts = group.metadata;
                group.members.into_iter().map(move |hit| FeedItem {
                    release: hit.payload,
                    label: label.clone(),
                    tracker_counts,
                })
            })
            .collect()
    }

    /// Title as shown in the feed
    pub fn display_title(&self, apply_label: bool) -> String {
        if apply_label {
            format!("{}{}", self.label, self.release.title)
        } else {
            self.release.title.clone()
        }
    }
}
