//! Discord adapter
//!
//! Alert sink posting moderation reports to a webhook.

pub mod webhook;

pub use webhook::DiscordWebhookSink;
