use std::env;
use std::time::Duration;

use crate::app::{ExtractorSelectors, SchedulerSettings, DEFAULT_FLAGGED_WORDS};
use crate::domain::entities::{ChangeKeyStrategy, DEFAULT_SNIPPET_CHARS};
use crate::error::ConfigError;

const DEFAULT_FEED_URL: &str = "https://coastal-anarchy.boards.net/rss/public";
const DEFAULT_ASSESSMENT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_ASSESSMENT_MODEL: &str = "llama3-8b-8192";

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub poll_interval: Duration,
    pub flagged_words: Vec<String>,
    pub strategy: ChangeKeyStrategy,
    pub fetch_concurrency: usize,
    pub selectors: ExtractorSelectors,
    /// Discord webhook receiving alerts
    pub webhook_url: String,
    /// Groq (OpenAI-compatible) chat completions endpoint
    pub assessment_url: String,
    pub assessment_api_key: String,
    pub assessment_model: String,
    pub assessment_max_tokens: u32,
    pub fetch_timeout: Duration,
    pub assessment_timeout: Duration,
    pub dispatch_timeout: Duration,
}

impl Config {
    /// Load from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let webhook_url = required("DISCORD_WEBHOOK_URL")?;
        let assessment_api_key = required("GROQ_API_KEY")?;

        let flagged_words = match get("FLAGGED_WORDS") {
            Some(list) => list
                .split(',')
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
            None => DEFAULT_FLAGGED_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        let snippet_chars = parse_or(get("SNIPPET_CHARS"), "SNIPPET_CHARS", DEFAULT_SNIPPET_CHARS)?;
        let strategy = match get("CHANGE_KEY_STRATEGY").as_deref().map(str::trim) {
            None | Some("post") => ChangeKeyStrategy::Post { snippet_chars },
            Some("thread") => ChangeKeyStrategy::Thread,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CHANGE_KEY_STRATEGY",
                    message: format!("expected 'post' or 'thread', got '{}'", other),
                })
            }
        };

        let defaults = ExtractorSelectors::default();
        let selectors = ExtractorSelectors {
            container: get("POST_CONTAINER_SELECTOR").unwrap_or(defaults.container),
            body: get("POST_BODY_SELECTOR").unwrap_or(defaults.body),
            author: get("POST_AUTHOR_SELECTOR").unwrap_or(defaults.author),
        };

        let fetch_concurrency: usize = parse_or(get("FETCH_CONCURRENCY"), "FETCH_CONCURRENCY", 4)?;
        if fetch_concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "FETCH_CONCURRENCY",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            feed_url: get("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            poll_interval: secs(get("POLL_INTERVAL_SECS"), "POLL_INTERVAL_SECS", 60)?,
            flagged_words,
            strategy,
            fetch_concurrency,
            selectors,
            webhook_url,
            assessment_url: get("ASSESSMENT_URL")
                .unwrap_or_else(|| DEFAULT_ASSESSMENT_URL.to_string()),
            assessment_api_key,
            assessment_model: get("ASSESSMENT_MODEL")
                .unwrap_or_else(|| DEFAULT_ASSESSMENT_MODEL.to_string()),
            assessment_max_tokens: parse_or(
                get("ASSESSMENT_MAX_TOKENS"),
                "ASSESSMENT_MAX_TOKENS",
                150,
            )?,
            fetch_timeout: secs(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", 15)?,
            assessment_timeout: secs(get("ASSESSMENT_TIMEOUT_SECS"), "ASSESSMENT_TIMEOUT_SECS", 30)?,
            dispatch_timeout: secs(get("DISPATCH_TIMEOUT_SECS"), "DISPATCH_TIMEOUT_SECS", 10)?,
        })
    }

    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            poll_interval: self.poll_interval,
            fetch_concurrency: self.fetch_concurrency,
            strategy: self.strategy,
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: format!("'{}': {}", raw, e),
        }),
        None => Ok(default),
    }
}

fn secs(value: Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    parse_or(value, key, default).map(Duration::from_secs)
}
