pub mod external;

pub use external::{ArrEndpoint, ArrLookupClient, NzbHydraClient};
