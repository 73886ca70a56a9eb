//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod discord;
pub mod forum;
pub mod groq;

pub use discord::DiscordWebhookSink;
pub use forum::{HttpThreadFetcher, RssFeedSource};
pub use groq::GroqAssessmentClient;
