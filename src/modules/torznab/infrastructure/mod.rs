pub mod caps;
pub mod feed_writer;

pub use caps::render_capabilities;
pub use feed_writer::{format_rfc822_date, FeedWriter};
