//! Forum port traits
//!
//! The syndication listing and the thread pages it links to.

use async_trait::async_trait;

use crate::domain::entities::FeedEntry;
use crate::error::FetchError;

/// Port trait for the forum's thread listing
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current listing. Order is not guaranteed and it may be empty.
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FetchError>;
}

/// Port trait for retrieving raw thread markup
#[async_trait]
pub trait ThreadFetcher: Send + Sync {
    /// Fetch the page behind `link` and return its markup
    async fn fetch_thread(&self, link: &str) -> Result<String, FetchError>;
}
