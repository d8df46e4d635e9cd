pub mod arr;
pub mod nzbhydra;
pub mod retry_util;

pub use arr::{ArrEndpoint, ArrLookupClient};
pub use nzbhydra::NzbHydraClient;
pub use retry_util::{CommonHttpHandler, RetryConfig, RetryUtil};
