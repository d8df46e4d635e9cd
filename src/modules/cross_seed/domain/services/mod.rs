pub mod cross_seed_processor;
pub mod seed_processor;

pub use cross_seed_processor::CrossSeedProcessor;
