//! Unified error types for threadwatch
//!
//! One error type per collaborator, matching how far each failure reaches:
//! - `FetchError`: listing or thread page could not be retrieved
//! - `AssessmentError`: the external classifier failed or answered garbage
//! - `DispatchError`: an alert could not be delivered
//! - `ConfigError`: startup configuration is missing or malformed (fatal)

use thiserror::Error;

/// Feed listing and thread page errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Feed(String),
}

/// Assessment service errors
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Response contained no assessment")]
    EmptyResponse,
}

/// Alert sink errors
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook rejected alert: {status} - {message}")]
    Rejected { status: u16, message: String },
}

/// Configuration errors. These halt the process before bootstrapping.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
