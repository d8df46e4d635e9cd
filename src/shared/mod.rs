// Shared kernel used by every module

pub mod application; // Pagination
pub mod config; // Environment configuration
pub mod domain; // Shared value objects
pub mod errors; // Shared error types
pub mod infrastructure; // TTL cache
pub mod utils; // Logging helpers

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
