//! API endpoint modules.

mod feed;

pub use feed::FeedApi;
