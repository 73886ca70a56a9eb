//! Discord webhook alert sink

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::domain::entities::Alert;
use crate::domain::ports::AlertSink;
use crate::error::{ConfigError, DispatchError};

// Per-field caps. Together with the fixed template text they keep a report
// under Discord's 2000-char message limit.
const MAX_AUTHOR_CHARS: usize = 100;
const MAX_TITLE_CHARS: usize = 200;
const MAX_ASSESSMENT_CHARS: usize = 1200;
const MAX_LINK_CHARS: usize = 300;

pub struct DiscordWebhookSink {
    http: Client,
    webhook_url: String,
}

impl DiscordWebhookSink {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, webhook_url })
    }
}

/// Plain-text moderation report for one alert
pub fn render_report(alert: &Alert) -> String {
    format!(
        "🚨 **MODERATION FLAG**\n\
         ```\n\
         message [{}] by [{}] in \"{}\"\n\
         profanity: {}\n\
         bullying: {}\n\
         ```\n\
         🔗 {}",
        alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        clip(&alert.author, MAX_AUTHOR_CHARS),
        clip(&alert.thread_title, MAX_TITLE_CHARS),
        alert.flagged,
        clip(&alert.assessment, MAX_ASSESSMENT_CHARS),
        clip(&alert.source_link, MAX_LINK_CHARS)
    )
}

/// At most `max` chars of `text`, marking a cut with a trailing ellipsis
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[async_trait]
impl AlertSink for DiscordWebhookSink {
    async fn dispatch(&self, alert: &Alert) -> Result<(), DispatchError> {
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "content": render_report(alert) }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}
