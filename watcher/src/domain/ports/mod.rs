//! Domain ports (traits)
//!
//! Port traits define the collaborators the pipeline depends on.
//! Adapters provide concrete implementations of these traits.

pub mod alerts;
pub mod assessment;
pub mod forum;

pub use alerts::AlertSink;
pub use assessment::AssessmentService;
pub use forum::{FeedSource, ThreadFetcher};
