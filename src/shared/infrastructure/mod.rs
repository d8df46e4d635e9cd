/// Shared infrastructure concerns
///
/// Infrastructure used by more than one module.
pub mod ttl_cache;

pub use ttl_cache::{CacheStats, TtlCache};
