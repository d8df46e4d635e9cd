// Indexer module - upstream search aggregator and title lookups
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use domain::{normalize_imdb_id, HydraQuery, Release};
pub use infrastructure::{ArrEndpoint, ArrLookupClient, NzbHydraClient};
pub use traits::{ReleaseSearcher, TitleLookup};

#[cfg(test)]
pub use traits::{MockReleaseSearcher, MockTitleLookup};
