//! threadwatch
//!
//! Watches a forum's RSS listing for new posts, screens them against a local
//! wordlist and escalates flagged posts to an external classifier, reporting
//! the verdict to a Discord webhook.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;

#[cfg(test)]
mod test_utils;


use adapters::{DiscordWebhookSink, GroqAssessmentClient, HttpThreadFetcher, RssFeedSource};
use app::{EscalationService, LexicalFilter, PollScheduler, PostExtractor};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,threadwatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials halt here, before anything is fetched
    let config = Config::from_env().context("Invalid configuration")?;

    tracing::info!("Starting threadwatch...");
    tracing::info!("Watching: {}", config.feed_url);
    tracing::info!(
        "Checking every {}s, change keys: {}",
        config.poll_interval.as_secs(),
        config.strategy
    );

    // Create adapters
    let feed = Arc::new(RssFeedSource::new(
        config.feed_url.clone(),
        config.fetch_timeout,
    )?);
    let fetcher = Arc::new(HttpThreadFetcher::new(config.fetch_timeout)?);
    let assessor = Arc::new(GroqAssessmentClient::new(
        config.assessment_url.clone(),
        config.assessment_api_key.clone(),
        config.assessment_model.clone(),
        config.assessment_max_tokens,
        config.assessment_timeout,
    )?);
    let sink = Arc::new(DiscordWebhookSink::new(
        config.webhook_url.clone(),
        config.dispatch_timeout,
    )?);

    // Create pipeline
    let extractor = PostExtractor::new(&config.selectors)?;
    let filter = LexicalFilter::new(&config.flagged_words);
    tracing::info!("Screening posts against {} words", filter.words().len());
    let escalation = EscalationService::new(assessor, sink);

    let mut scheduler = PollScheduler::new(
        feed,
        fetcher,
        escalation,
        extractor,
        filter,
        config.scheduler_settings(),
    );

    scheduler
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    tracing::info!("threadwatch stopped");
    Ok(())
}
