//! Change keys
//!
//! A change key decides whether a unit of forum content has already been
//! processed. The strategy is fixed at startup and used for bootstrapping and
//! every polling cycle alike, so keys recorded at boot match keys derived
//! later.

use serde::{Deserialize, Serialize};

use super::{FeedEntry, Post};

/// Default number of content characters that identify a post
pub const DEFAULT_SNIPPET_CHARS: usize = 100;

/// Opaque novelty identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChangeKey {
    /// Whole thread: seen once, never revisited
    Thread { thread_id: String },
    /// Single post, identified by thread, author and a content prefix
    Post {
        thread_id: String,
        author: String,
        snippet: String,
    },
}

impl std::fmt::Display for ChangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKey::Thread { thread_id } => write!(f, "thread:{}", thread_id),
            ChangeKey::Post {
                thread_id, author, ..
            } => write!(f, "post:{}:{}", thread_id, author),
        }
    }
}

/// How change keys are derived
///
/// `Thread` is cheap (a seen thread is not even re-fetched) but silently
/// misses replies added to a thread after it was first observed. `Post`
/// re-reads every listed thread each cycle and tracks each post on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKeyStrategy {
    Thread,
    Post { snippet_chars: usize },
}

impl Default for ChangeKeyStrategy {
    fn default() -> Self {
        ChangeKeyStrategy::Post {
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl ChangeKeyStrategy {
    /// Key covering a whole thread
    pub fn thread_key(entry: &FeedEntry) -> ChangeKey {
        ChangeKey::Thread {
            thread_id: entry.thread_id.clone(),
        }
    }

    /// Key for a single post. Only meaningful for the post-level strategy.
    pub fn post_key(entry: &FeedEntry, post: &Post, snippet_chars: usize) -> ChangeKey {
        ChangeKey::Post {
            thread_id: entry.thread_id.clone(),
            author: post.author.clone(),
            snippet: post.snippet(snippet_chars).to_string(),
        }
    }

    /// The keys this strategy records for a fetched thread.
    ///
    /// Thread-level yields exactly one key regardless of post count;
    /// post-level yields one key per post, in document order.
    pub fn keys_for(&self, entry: &FeedEntry, posts: &[Post]) -> Vec<ChangeKey> {
        match self {
            ChangeKeyStrategy::Thread => vec![Self::thread_key(entry)],
            ChangeKeyStrategy::Post { snippet_chars } => posts
                .iter()
                .map(|post| Self::post_key(entry, post, *snippet_chars))
                .collect(),
        }
    }

    pub fn is_thread_level(&self) -> bool {
        matches!(self, ChangeKeyStrategy::Thread)
    }
}

impl std::fmt::Display for ChangeKeyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKeyStrategy::Thread => write!(f, "thread"),
            ChangeKeyStrategy::Post { snippet_chars } => {
                write!(f, "post (first {} chars)", snippet_chars)
            }
        }
    }
}
