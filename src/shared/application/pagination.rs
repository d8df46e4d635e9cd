/// Pagination support for feeds
///
/// Torznab clients page with a raw `offset`/`limit` pair rather than page numbers.
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 100;

/// Offset pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Slice `items` to the requested window; out-of-range offsets yield an empty page
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T: Clone> PaginatedResult<T> {
    pub fn new(all_items: &[T], params: &PaginationParams) -> Self {
        Self {
            items: params.apply(all_items).to_vec(),
            total_count: all_items.len(),
            offset: params.offset,
            limit: params.limit,
        }
    }
}
