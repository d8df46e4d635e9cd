use std::collections::{HashMap, HashSet};

use super::tracker_classifier::TrackerClassifier;
use crate::modules::cross_seed::domain::entities::{Group, GroupKey, GroupMetadata, Hit};

/// Append-only member list for one key, scoped to a single aggregation
struct GroupBuilder<P> {
    key: GroupKey,
    members: Vec<Hit<P>>,
}

/// Groups annotated hits by `(normalized_title, size_bucket_id)`
pub struct GroupAggregator<'a> {
    classifier: TrackerClassifier<'a>,
}

impl<'a> GroupAggregator<'a> {
    pub fn new(classifier: TrackerClassifier<'a>) -> Self {
        Self { classifier }
    }

    /// Groups come back in order of first key appearance; members keep arrival order.
    pub fn aggregate<P>(&self, hits: Vec<Hit<P>>) -> Vec<Group<P>> {
        let mut index_by_key: HashMap<GroupKey, usize> = HashMap::new();
        let mut builders: Vec<GroupBuilder<P>> = Vec::new();

        for hit in hits {
            let key = hit.group_key();
            match index_by_key.get(&key) {
                Some(&index) => builders[index].members.push(hit),
                None => {
                    index_by_key.insert(key.clone(), builders.len());
                    builders.push(GroupBuilder {
                        key,
                        members: vec![hit],
                    });
                }
            }
        }

        builders
            .into_iter()
            .map(|builder| {
                let metadata = self.count_trackers(&builder.members);
                log::trace!(
                    "Group '{}' bucket {}: {} hits, {} private, {} public",
                    builder.key.normalized_title,
                    builder.key.size_bucket_id,
                    builder.members.len(),
                    metadata.private_count,
                    metadata.public_count
                );
                Group::new(builder.key, builder.members, metadata)
            })
            .collect()
    }

    /// Distinct tracker names per classification; repeat hits from one tracker count once
    fn count_trackers<P>(&self, members: &[Hit<P>]) -> GroupMetadata {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut metadata = GroupMetadata::default();

        for hit in members {
            if !seen.insert(hit.tracker_name.as_str()) {
                continue;
            }
            if self.classifier.classify(&hit.tracker_name).is_private() {
                metadata.private_count += 1;
            } else {
                metadata.public_count += 1;
            }
        }

        metadata
    }
}
