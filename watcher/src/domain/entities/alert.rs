//! Moderation verdicts and alerts
//!
//! A verdict is the outcome of escalating one post; an alert is what gets
//! handed to the notification channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FeedEntry, Post};

/// Result of escalating a post to the assessment service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
    pub assessment: String,
}

/// Alert record delivered to the alert sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// When the post was published, or when it was detected if the feed gave no date
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub flagged: bool,
    pub assessment: String,
    pub source_link: String,
    pub thread_title: String,
}

impl Alert {
    pub fn compose(
        entry: &FeedEntry,
        post: &Post,
        verdict: ModerationVerdict,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: entry.published_at.unwrap_or(detected_at),
            author: post.author.clone(),
            flagged: verdict.flagged,
            assessment: verdict.assessment,
            source_link: entry.link.clone(),
            thread_title: entry.title.clone(),
        }
    }
}
