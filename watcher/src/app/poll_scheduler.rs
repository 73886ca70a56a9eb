//! Poll scheduler
//!
//! Drives the pipeline: fetch listing -> fetch threads -> extract -> track ->
//! filter -> escalate, on a fixed delay.
//!
//! Two states:
//! - Bootstrapping: record every currently visible key without escalating,
//!   so historical content is never flagged. Retried on the poll interval
//!   until the listing can be fetched.
//! - Polling: one cycle, sleep, repeat, until the shutdown future resolves.
//!
//! Cycles run strictly one after another. Thread pages within a cycle are
//! fetched concurrently (bounded), but everything touching the tracker runs
//! sequentially on `&mut self`.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::app::change_tracker::ChangeTracker;
use crate::app::escalation_service::EscalationService;
use crate::app::extractor::PostExtractor;
use crate::app::lexical_filter::LexicalFilter;
use crate::domain::entities::{ChangeKeyStrategy, FeedEntry, Post};
use crate::domain::ports::{AlertSink, AssessmentService, FeedSource, ThreadFetcher};
use crate::error::FetchError;

/// Scheduler tuning
#[derive(Debug, Clone, Copy)]
pub struct SchedulerSettings {
    pub poll_interval: Duration,
    pub fetch_concurrency: usize,
    pub strategy: ChangeKeyStrategy,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            fetch_concurrency: 4,
            strategy: ChangeKeyStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Bootstrapping,
    Polling,
}

/// Summary of the bootstrap pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub threads: usize,
    pub keys_recorded: usize,
    pub fetch_failures: usize,
}

/// Summary of one polling cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub threads_listed: usize,
    /// Threads not fetched because the thread-level key was already seen
    pub threads_skipped: usize,
    pub fetch_failures: usize,
    /// Threads whose markup no extraction strategy recognised
    pub unrecognised_threads: usize,
    pub posts_examined: usize,
    pub new_posts: usize,
    pub flagged_posts: usize,
    pub alerts_dispatched: usize,
    pub dispatch_failures: usize,
    pub assessment_failures: usize,
}

impl CycleReport {
    pub fn escalations(&self) -> usize {
        self.alerts_dispatched + self.dispatch_failures
    }
}

/// Polling loop with sole ownership of the change tracker
pub struct PollScheduler<FS, TF, AS, SK>
where
    FS: FeedSource,
    TF: ThreadFetcher,
    AS: AssessmentService,
    SK: AlertSink,
{
    feed: Arc<FS>,
    fetcher: Arc<TF>,
    escalation: EscalationService<AS, SK>,
    extractor: PostExtractor,
    filter: LexicalFilter,
    tracker: ChangeTracker,
    settings: SchedulerSettings,
    state: SchedulerState,
}

impl<FS, TF, AS, SK> PollScheduler<FS, TF, AS, SK>
where
    FS: FeedSource,
    TF: ThreadFetcher,
    AS: AssessmentService,
    SK: AlertSink,
{
    pub fn new(
        feed: Arc<FS>,
        fetcher: Arc<TF>,
        escalation: EscalationService<AS, SK>,
        extractor: PostExtractor,
        filter: LexicalFilter,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            feed,
            fetcher,
            escalation,
            extractor,
            filter,
            tracker: ChangeTracker::new(),
            settings,
            state: SchedulerState::Bootstrapping,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Bootstrap, then poll until `shutdown` resolves. A cycle in progress
    /// always completes before the loop exits.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let interval = self.settings.poll_interval;

        while self.state() == SchedulerState::Bootstrapping {
            match self.bootstrap().await {
                Ok(report) => {
                    tracing::info!(
                        "Loaded {} existing keys across {} threads ({} unreachable, {} tracked). Now monitoring.",
                        report.keys_recorded,
                        report.threads,
                        report.fetch_failures,
                        self.tracker().len()
                    );
                    if self.tracker().is_empty() && report.threads > 0 {
                        tracing::warn!(
                            "Initial scan recorded no posts; existing posts will be treated as new"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Initial scan failed: {}. Retrying in {}s",
                        e,
                        interval.as_secs()
                    );
                    tokio::select! {
                        biased;
                        _ = &mut shutdown => return,
                        _ = tokio::time::sleep(interval) => {}
                    }
                }
            }
        }

        loop {
            match self.run_cycle().await {
                Ok(report) => tracing::info!(
                    "Cycle done: {} threads, {} new posts, {} flagged, {}/{} alerts sent",
                    report.threads_listed,
                    report.new_posts,
                    report.flagged_posts,
                    report.alerts_dispatched,
                    report.escalations()
                ),
                Err(e) => tracing::warn!("Could not fetch feed, skipping cycle: {}", e),
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping");
                    return;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// Record every currently visible key without escalating anything.
    ///
    /// Fails only when the listing itself cannot be fetched; unreachable
    /// threads are counted and left for the polling cycles.
    pub async fn bootstrap(&mut self) -> Result<BootstrapReport, FetchError> {
        tracing::info!("Initial scan (recording existing posts so they are not flagged)...");
        let entries = dedup_entries(self.feed.fetch_entries().await?);

        let mut report = BootstrapReport {
            threads: entries.len(),
            ..BootstrapReport::default()
        };

        for (entry, page) in self.fetch_threads(entries).await {
            let html = match page {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Could not fetch thread {}: {}", entry.link, e);
                    report.fetch_failures += 1;
                    continue;
                }
            };

            let posts = self.extractor.extract(&html);
            if posts.is_empty() {
                tracing::debug!("No posts recognised in {}", entry.link);
                continue;
            }
            let keys = self.settings.strategy.keys_for(&entry, &posts);
            report.keys_recorded += self.tracker.observe(keys);
        }

        self.state = SchedulerState::Polling;
        Ok(report)
    }

    /// Run one polling cycle.
    ///
    /// Fails only when the listing cannot be fetched; every other failure is
    /// scoped to its thread or post and counted in the report.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, FetchError> {
        tracing::debug!("Checking feed...");
        let entries = dedup_entries(self.feed.fetch_entries().await?);

        let mut report = CycleReport {
            threads_listed: entries.len(),
            ..CycleReport::default()
        };

        let entries: Vec<FeedEntry> = if self.settings.strategy.is_thread_level() {
            entries
                .into_iter()
                .filter(|entry| {
                    let seen = self
                        .tracker
                        .contains(&ChangeKeyStrategy::thread_key(entry));
                    if seen {
                        report.threads_skipped += 1;
                    }
                    !seen
                })
                .collect()
        } else {
            entries
        };

        for (entry, page) in self.fetch_threads(entries).await {
            let html = match page {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Could not fetch thread {}: {}", entry.link, e);
                    report.fetch_failures += 1;
                    continue;
                }
            };

            match self.extractor.extract_with_strategy(&html) {
                Some((strategy, posts)) => {
                    tracing::debug!(
                        "{} posts in '{}' ({} markup)",
                        posts.len(),
                        entry.title,
                        strategy
                    );
                    self.process_thread(&entry, &posts, &mut report).await;
                }
                None => {
                    tracing::warn!("No posts recognised in {}, retrying next cycle", entry.link);
                    report.unrecognised_threads += 1;
                }
            }
        }

        Ok(report)
    }

    async fn process_thread(&mut self, entry: &FeedEntry, posts: &[Post], report: &mut CycleReport) {
        report.posts_examined += posts.len();

        match self.settings.strategy {
            ChangeKeyStrategy::Thread => {
                if !self.tracker.is_new(ChangeKeyStrategy::thread_key(entry)) {
                    return;
                }
                for post in posts {
                    report.new_posts += 1;
                    self.screen(entry, post, report).await;
                }
            }
            ChangeKeyStrategy::Post { snippet_chars } => {
                for post in posts {
                    let key = ChangeKeyStrategy::post_key(entry, post, snippet_chars);
                    if !self.tracker.is_new(key) {
                        continue;
                    }
                    report.new_posts += 1;
                    self.screen(entry, post, report).await;
                }
            }
        }
    }

    /// Local filter, then escalation for posts that trip it
    async fn screen(&self, entry: &FeedEntry, post: &Post, report: &mut CycleReport) {
        if !self.filter.contains_flagged(&post.content) {
            return;
        }

        report.flagged_posts += 1;
        tracing::info!(
            "Flagged words {:?} in post by {} in '{}', escalating",
            self.filter.matches(&post.content),
            post.author,
            entry.title
        );

        let outcome = self.escalation.escalate(entry, post).await;
        if outcome.assessment_failed {
            report.assessment_failures += 1;
        }
        if outcome.delivered {
            tracing::debug!(
                "Assessment for {}: {}",
                outcome.alert.author,
                outcome.alert.assessment
            );
            report.alerts_dispatched += 1;
        } else {
            report.dispatch_failures += 1;
        }
    }

    /// Fetch thread pages with bounded concurrency, preserving listing order
    async fn fetch_threads(
        &self,
        entries: Vec<FeedEntry>,
    ) -> Vec<(FeedEntry, Result<String, FetchError>)> {
        let fetcher = &self.fetcher;
        stream::iter(entries)
            .map(|entry| async move {
                let page = fetcher.fetch_thread(&entry.link).await;
                (entry, page)
            })
            .buffered(self.settings.fetch_concurrency.max(1))
            .collect()
            .await
    }
}

/// Drop repeated listings of the same thread, keeping the first
fn dedup_entries(entries: Vec<FeedEntry>) -> Vec<FeedEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.thread_id.clone()))
        .collect()
}
