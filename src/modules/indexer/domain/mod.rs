pub mod release;
pub mod search_query;

pub use release::Release;
pub use search_query::{normalize_imdb_id, HydraQuery};
