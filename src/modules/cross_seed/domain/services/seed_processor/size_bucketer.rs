/// Batch-scoped size clustering
///
/// Single forward sweep over sizes in ascending order (ties keep arrival
/// order). A bucket's reference is the size of the first hit it received and
/// never moves. Each hit joins the earliest-created bucket whose reference is
/// within tolerance, otherwise it opens a new bucket.
///
/// This is not transitive clustering: a chain of hits that are each close to
/// their neighbour can still land in different buckets, and the outcome depends
/// on which size became the reference.
#[derive(Debug, Clone, Copy)]
pub struct SizeBucketer {
    size_tolerance_percent: f64,
}

/// Bucket assignment for one batch, indexed by arrival position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeBuckets {
    assignments: Vec<usize>,
    references: Vec<u64>,
}

impl SizeBuckets {
    /// Bucket id of the hit at `arrival_index`
    pub fn bucket_of(&self, arrival_index: usize) -> Option<usize> {
        self.assignments.get(arrival_index).copied()
    }

    /// Reference size of a bucket
    pub fn reference_size(&self, bucket_id: usize) -> Option<u64> {
        self.references.get(bucket_id).copied()
    }

    pub fn bucket_count(&self) -> usize {
        self.references.len()
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }
}

impl SizeBucketer {
    pub fn new(size_tolerance_percent: f64) -> Self {
        Self {
            size_tolerance_percent,
        }
    }

    /// Whether `size` may join a bucket referenced at `reference`
    pub fn within_tolerance(&self, reference: u64, size: u64) -> bool {
        if reference == 0 {
            // Zero references are exempt from the ratio test
            return size == 0;
        }
        // Cross-multiplied so sizes exactly on the boundary are admitted
        let diff = size.abs_diff(reference) as f64;
        diff * 100.0 <= self.size_tolerance_percent * reference as f64
    }

    /// Assign a bucket id to every size, in arrival order
    pub fn assign(&self, sizes: &[u64]) -> SizeBuckets {
        let mut order: Vec<usize> = (0..sizes.len()).collect();
        // Stable sort keeps arrival order for equal sizes
        order.sort_by_key(|&i| sizes[i]);

        let mut assignments = vec![0; sizes.len()];
        let mut references: Vec<u64> = Vec::new();

        for index in order {
            let size = sizes[index];
            let bucket_id = match references
                .iter()
                .position(|&reference| self.within_tolerance(reference, size))
            {
                Some(existing) => existing,
                None => {
                    references.push(size);
                    references.len() - 1
                }
            };

            log::trace!("Bucket: size {} -> bucket {}", size, bucket_id);
            assignments[index] = bucket_id;
        }

        SizeBuckets {
            assignments,
            references,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        let buckets = SizeBucketer::new(2.0).assign(&[]);
        assert_eq!(buckets.bucket_count(), 0);
        assert!(buckets.assignments().is_empty());
    }

    #[test]
    fn test_sizes_within_tolerance_share_bucket() {
        let buckets = SizeBucketer::new(2.0).assign(&[1_500_000_000, 1_503_000_000]);

        assert_eq!(buckets.bucket_count(), 1);
        assert_eq!(buckets.bucket_of(0), buckets.bucket_of(1));
        assert_eq!(buckets.reference_size(0), Some(1_500_000_000));
    }

    #[test]
    fn test_sizes_outside_tolerance_split() {
        let buckets =
            SizeBucketer::new(2.0).assign(&[1_500_000_000, 1_503_000_000, 1_900_000_000]);

        assert_eq!(buckets.bucket_count(), 2);
        assert_ne!(buckets.bucket_of(0), buckets.bucket_of(2));
    }

    #[test]
    fn test_reference_is_smallest_size_regardless_of_arrival() {
        // Larger hit arrives first; the sweep still starts from the smaller one
        let buckets = SizeBucketer::new(2.0).assign(&[1_503_000_000, 1_500_000_000]);

        let bucket = buckets.bucket_of(0).unwrap();
        assert_eq!(buckets.reference_size(bucket), Some(1_500_000_000));
        assert_eq!(buckets.bucket_of(1), Some(bucket));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let buckets = SizeBucketer::new(2.0).assign(&[100, 102, 103]);

        assert_eq!(buckets.bucket_of(0), buckets.bucket_of(1));
        assert_ne!(buckets.bucket_of(0), buckets.bucket_of(2));
    }

    #[test]
    fn test_fractional_percent_boundary_is_inclusive() {
        let cases: [(f64, u64, u64); 3] = [
            (0.7, 1_000, 1_007),
            (0.7, 1_000_000_000, 1_007_000_000),
            (5.8, 1_000, 1_058),
        ];

        for (percent, reference, size) in cases {
            let bucketer = SizeBucketer::new(percent);
            assert!(
                bucketer.within_tolerance(reference, size),
                "{} vs {} at {}%",
                reference,
                size,
                percent
            );
            assert_eq!(bucketer.assign(&[reference, size]).assignments(), &[0, 0]);
            assert!(!bucketer.within_tolerance(reference, size + 1));
        }
    }

    #[test]
    fn test_chain_is_not_transitive() {
        // 100 -> 102 within 2%, 104 is 2% of 102 but 4% of the reference 100
        let buckets = SizeBucketer::new(2.0).assign(&[100, 102, 104]);

        assert_eq!(buckets.bucket_of(0), buckets.bucket_of(1));
        assert_ne!(buckets.bucket_of(1), buckets.bucket_of(2));
        assert_eq!(buckets.reference_size(buckets.bucket_of(2).unwrap()), Some(104));
    }

    #[test]
    fn test_zero_size_only_matches_zero() {
        let buckets = SizeBucketer::new(100.0).assign(&[0, 1, 0, 2]);

        assert_eq!(buckets.bucket_of(0), buckets.bucket_of(2));
        assert_ne!(buckets.bucket_of(0), buckets.bucket_of(1));
        assert_eq!(buckets.bucket_of(1), buckets.bucket_of(3));
    }

    #[test]
    fn test_zero_tolerance_requires_exact_size() {
        let buckets = SizeBucketer::new(0.0).assign(&[500, 500, 501]);

        assert_eq!(buckets.bucket_of(0), buckets.bucket_of(1));
        assert_ne!(buckets.bucket_of(0), buckets.bucket_of(2));
    }

    #[test]
    fn test_ties_keep_arrival_order_for_bucket_creation() {
        let buckets = SizeBucketer::new(0.0).assign(&[700, 300, 300]);

        // 300 sorts first, so it creates bucket 0
        assert_eq!(buckets.bucket_of(1), Some(0));
        assert_eq!(buckets.bucket_of(2), Some(0));
        assert_eq!(buckets.bucket_of(0), Some(1));
    }

    #[test]
    fn test_every_member_within_tolerance_of_reference() {
        let sizes: Vec<u64> = (0..200).map(|i| 1_000 + (i * 37) % 400).collect();
        let bucketer = SizeBucketer::new(5.0);
        let buckets = bucketer.assign(&sizes);

        for (index, &size) in sizes.iter().enumerate() {
            let bucket = buckets.bucket_of(index).unwrap();
            let reference = buckets.reference_size(bucket).unwrap();
            assert!(
                bucketer.within_tolerance(reference, size),
                "size {} outside tolerance of reference {}",
                size,
                reference
            );
        }
    }
}
