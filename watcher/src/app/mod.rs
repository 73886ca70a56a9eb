//! Application layer
//!
//! The change-detection and escalation pipeline.
//! Pure stages (extraction, filtering, tracking) are plain types; services
//! coordinate them with the ports.

pub mod change_tracker;
pub mod escalation_service;
pub mod extractor;
pub mod lexical_filter;
pub mod poll_scheduler;

pub use escalation_service::EscalationService;
pub use extractor::{ExtractorSelectors, PostExtractor};
pub use lexical_filter::{LexicalFilter, DEFAULT_FLAGGED_WORDS};
pub use poll_scheduler::{PollScheduler, SchedulerSettings};
