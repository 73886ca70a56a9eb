//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Feed entries, posts, change keys and alerts
//! - `ports`: Trait definitions for the forum, the classifier and the alert channel

pub mod entities;
pub mod ports;
