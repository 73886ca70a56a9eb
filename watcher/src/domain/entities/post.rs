//! Post domain entity
//!
//! A single message recovered from a thread page. The forum does not give
//! posts an address of their own, so identity is derived through `ChangeKey`.

use serde::{Deserialize, Serialize};

/// Author name used when the markup does not reveal one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One message inside a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub author: String,
    pub content: String,
}

impl Post {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }

    /// A post whose author could not be recovered
    pub fn anonymous(content: impl Into<String>) -> Self {
        Self::new(UNKNOWN_AUTHOR, content)
    }

    /// First `chars` characters of the content, split on char boundaries
    pub fn snippet(&self, chars: usize) -> &str {
        match self.content.char_indices().nth(chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}
