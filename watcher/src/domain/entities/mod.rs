//! Domain entities
//!
//! Pure domain models for the change-detection pipeline.

pub mod alert;
pub mod change_key;
pub mod feed_entry;
pub mod post;

pub use alert::{Alert, ModerationVerdict};
pub use change_key::{ChangeKey, ChangeKeyStrategy, DEFAULT_SNIPPET_CHARS};
pub use feed_entry::FeedEntry;
pub use post::{Post, UNKNOWN_AUTHOR};
