//! HTTP thread page fetcher

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::USER_AGENT;
use crate::domain::ports::ThreadFetcher;
use crate::error::{ConfigError, FetchError};

pub struct HttpThreadFetcher {
    http: Client,
}

impl HttpThreadFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ThreadFetcher for HttpThreadFetcher {
    async fn fetch_thread(&self, link: &str) -> Result<String, FetchError> {
        let response = self.http.get(link).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: link.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
