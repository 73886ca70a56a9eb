//! Feed entry domain entity
//!
//! One discussion thread as listed by the forum's syndication endpoint.
//! Entries are rebuilt from the listing every cycle and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A thread listed in the forum feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Stable thread identifier: the link without its `#fragment`.
    /// Feed guids and fragments point at the latest post and move with
    /// every reply, so neither identifies the thread.
    pub thread_id: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
}

impl FeedEntry {
    pub fn new(link: String, published_at: Option<DateTime<Utc>>, title: Option<String>) -> Self {
        Self {
            thread_id: thread_id_from_link(&link),
            link,
            published_at,
            title: title.unwrap_or_else(|| "No title".to_string()),
        }
    }
}

fn thread_id_from_link(link: &str) -> String {
    let without_fragment = link.split_once('#').map_or(link, |(base, _)| base);
    without_fragment.trim().to_string()
}
