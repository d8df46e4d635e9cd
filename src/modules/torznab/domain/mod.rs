pub mod category;
pub mod feed_item;
pub mod label_mode;
pub mod request;
pub mod response;

pub use category::{category_id_for, matches_requested, parent_category, DEFAULT_CATEGORY_ID};
pub use feed_item::FeedItem;
pub use label_mode::LabelMode;
pub use request::{RequestType, TorznabRequest};
pub use response::{
    TorznabResponse, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT, CONTENT_TYPE_XML,
};
