// Modular architecture - each module is a bounded context
pub mod cross_seed;
pub mod indexer;
pub mod torznab;
