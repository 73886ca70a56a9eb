//! Forum adapter
//!
//! RSS listing and plain HTTP thread page retrieval.

pub mod rss_feed;
pub mod thread_fetcher;

pub use rss_feed::RssFeedSource;
pub use thread_fetcher::HttpThreadFetcher;

/// User agent sent with every forum request
pub(crate) const USER_AGENT: &str = concat!("threadwatch/", env!("CARGO_PKG_VERSION"));
