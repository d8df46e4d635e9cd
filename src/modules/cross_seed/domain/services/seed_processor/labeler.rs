use crate::modules::cross_seed::domain::entities::{Group, LabeledGroup};

/// `"[PRI:p PUB:q] "` with the trailing space
pub fn label_prefix(private_count: usize, public_count: usize) -> String {
    format!("[PRI:{} PUB:{}] ", private_count, public_count)
}

/// Attach a label to each group, titled after its earliest member.
///
/// Every member is kept; how many entries to emit per group is up to the
/// protocol layer.
pub fn label<P>(groups: Vec<Group<P>>) -> Vec<LabeledGroup<P>> {
    groups
        .into_iter()
        .map(|group| {
            let metadata = group.metadata();
            let label = label_prefix(metadata.private_count, metadata.public_count);
            let display_title = format!("{}{}", label, group.first_member().raw_title);
            LabeledGroup {
                label,
                display_title,
                members: group.into_members(),
                metadata,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cross_seed::domain::entities::{GroupKey, GroupMetadata, Hit};

    fn hit(index: usize, title: &str) -> Hit {
        Hit {
            raw_title: title.to_string(),
            size_bytes: 1,
            tracker_name: format!("T{}", index),
            normalized_title: "x".to_string(),
            size_bucket_id: 0,
            arrival_index: index,
            payload: (),
        }
    }

    #[test]
    fn test_label_prefix_format() {
        assert_eq!(label_prefix(0, 2), "[PRI:0 PUB:2] ");
        assert_eq!(label_prefix(12, 0), "[PRI:12 PUB:0] ");
    }

    #[test]
    fn test_display_title_uses_first_member() {
        let group = Group::new(
            GroupKey {
                normalized_title: "x".to_string(),
                size_bucket_id: 0,
            },
            vec![hit(3, "First.Title"), hit(7, "second title")],
            GroupMetadata {
                private_count: 1,
                public_count: 1,
            },
        );

        let labeled = label(vec![group]);

        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].display_title, "[PRI:1 PUB:1] First.Title");
        assert_eq!(labeled[0].members.len(), 2);
        assert_eq!(labeled[0].labeled("second title"), "[PRI:1 PUB:1] second title");
    }

    #[test]
    fn test_empty_input() {
        assert!(label(Vec::<Group>::new()).is_empty());
    }
}
