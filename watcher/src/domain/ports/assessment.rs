//! Assessment service port trait
//!
//! An external text classifier that answers with a short human-readable
//! judgement of a post.

use async_trait::async_trait;

use crate::error::AssessmentError;

/// Port trait for the external classifier
#[async_trait]
pub trait AssessmentService: Send + Sync {
    /// Assess `content` written by `author`, returning a one-sentence verdict
    async fn assess(&self, content: &str, author: &str) -> Result<String, AssessmentError>;
}
