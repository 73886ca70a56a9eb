//! Mock implementations of port traits
//!
//! In-memory implementations that tests configure up front and inspect
//! afterwards. Each records the calls it received.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Alert, FeedEntry};
use crate::domain::ports::{AlertSink, AssessmentService, FeedSource, ThreadFetcher};
use crate::error::{AssessmentError, DispatchError, FetchError};

/// Consume one unit of an injected failure budget
fn take_failure(budget: &RwLock<usize>) -> bool {
    let mut remaining = budget.write().unwrap();
    if *remaining > 0 {
        *remaining -= 1;
        true
    } else {
        false
    }
}

// ============================================================================
// In-Memory Feed Source
// ============================================================================

#[derive(Default)]
pub struct InMemoryFeedSource {
    entries: Arc<RwLock<Vec<FeedEntry>>>,
    failures_left: Arc<RwLock<usize>>,
    fetches: Arc<RwLock<usize>>,
}

impl InMemoryFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: FeedEntry) {
        self.entries.write().unwrap().push(entry);
    }

    /// Drop every listed entry
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Make the next `n` listing fetches fail
    pub fn fail_next(&self, n: usize) {
        *self.failures_left.write().unwrap() = n;
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.read().unwrap()
    }
}

#[async_trait]
impl FeedSource for InMemoryFeedSource {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FetchError> {
        *self.fetches.write().unwrap() += 1;
        if take_failure(&self.failures_left) {
            return Err(FetchError::Status {
                status: 503,
                url: "https://forum.example/rss".to_string(),
            });
        }
        Ok(self.entries.read().unwrap().clone())
    }
}

// ============================================================================
// In-Memory Thread Fetcher
// ============================================================================

/// Serves pages by link; links without a page fail with a 404
#[derive(Default)]
pub struct InMemoryThreadFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    fetches: Arc<RwLock<HashMap<String, usize>>>,
}

impl InMemoryThreadFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the page served for `link`
    pub fn set_page(&self, link: &str, html: impl Into<String>) {
        self.pages
            .write()
            .unwrap()
            .insert(link.to_string(), html.into());
    }

    pub fn fetches(&self, link: &str) -> usize {
        self.fetches
            .read()
            .unwrap()
            .get(link)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ThreadFetcher for InMemoryThreadFetcher {
    async fn fetch_thread(&self, link: &str) -> Result<String, FetchError> {
        *self
            .fetches
            .write()
            .unwrap()
            .entry(link.to_string())
            .or_insert(0) += 1;

        self.pages
            .read()
            .unwrap()
            .get(link)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: link.to_string(),
            })
    }
}

// ============================================================================
// Mock Assessment Service
// ============================================================================

pub struct MockAssessmentService {
    reply: Option<String>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockAssessmentService {
    /// Always answers with `reply`
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Arc::default(),
        }
    }

    /// Always fails as if the service were down
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::default(),
        }
    }

    /// (content, author) pairs received, in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AssessmentService for MockAssessmentService {
    async fn assess(&self, content: &str, author: &str) -> Result<String, AssessmentError> {
        self.calls
            .write()
            .unwrap()
            .push((content.to_string(), author.to_string()));

        self.reply.clone().ok_or_else(|| AssessmentError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

// ============================================================================
// Recording Alert Sink
// ============================================================================

/// Keeps every delivered alert; can be told to reject deliveries
#[derive(Default)]
pub struct RecordingAlertSink {
    alerts: Arc<RwLock<Vec<Alert>>>,
    attempts: Arc<RwLock<usize>>,
    failures_left: Arc<RwLock<usize>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every delivery
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.fail_next(usize::MAX);
        sink
    }

    /// Make the next `n` deliveries fail
    pub fn fail_next(&self, n: usize) {
        *self.failures_left.write().unwrap() = n;
    }

    /// Successfully delivered alerts
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.read().unwrap().clone()
    }

    /// Delivery attempts, successful or not
    pub fn attempts(&self) -> usize {
        *self.attempts.read().unwrap()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn dispatch(&self, alert: &Alert) -> Result<(), DispatchError> {
        *self.attempts.write().unwrap() += 1;
        if take_failure(&self.failures_left) {
            return Err(DispatchError::Rejected {
                status: 500,
                message: "webhook down".to_string(),
            });
        }
        self.alerts.write().unwrap().push(alert.clone());
        Ok(())
    }
}
