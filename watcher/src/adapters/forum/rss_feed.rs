//! RSS feed source

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;

use super::USER_AGENT;
use crate::domain::entities::FeedEntry;
use crate::domain::ports::FeedSource;
use crate::error::{ConfigError, FetchError};

/// Feed source reading the forum's public RSS listing
pub struct RssFeedSource {
    http: Client,
    feed_url: String,
}

impl RssFeedSource {
    pub fn new(feed_url: String, timeout: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, feed_url })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FetchError> {
        let response = self.http.get(&self.feed_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.feed_url.clone(),
            });
        }

        let body = response.bytes().await?;
        parse_channel(&body)
    }
}

/// Parse an RSS document into feed entries. Items without a link cannot be
/// fetched and are dropped. Guids are ignored: the forum anchors them to the
/// newest post, so they change whenever a thread gets a reply.
pub fn parse_channel(body: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    let channel = rss::Channel::read_from(body).map_err(|e| FetchError::Feed(e.to_string()))?;

    let entries = channel
        .items()
        .iter()
        .filter_map(|item| {
            let Some(link) = item.link().map(str::trim).filter(|l| !l.is_empty()) else {
                tracing::debug!("Skipping feed item without a link: {:?}", item.title());
                return None;
            };
            Some(FeedEntry::new(
                link.to_string(),
                item.pub_date().and_then(parse_pub_date),
                item.title().map(str::to_string),
            ))
        })
        .collect();

    Ok(entries)
}

fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
