//! Escalation service
//!
//! Sends a flagged post to the external classifier and forwards the composed
//! alert. Neither failure aborts anything: a failed assessment is replaced by
//! a placeholder and the alert still goes out; a failed delivery is logged
//! and forgotten. Delivery is at-most-once.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Alert, FeedEntry, ModerationVerdict, Post};
use crate::domain::ports::{AlertSink, AssessmentService};
use crate::error::AssessmentError;

/// Prefix of the assessment text used when the classifier could not be reached
pub const ASSESSMENT_PLACEHOLDER_PREFIX: &str = "[assessment unavailable";

/// Placeholder assessment for a failed classifier call
pub fn assessment_placeholder(err: &AssessmentError) -> String {
    format!("{}: {}]", ASSESSMENT_PLACEHOLDER_PREFIX, err)
}

/// What happened to one escalated post
#[derive(Debug, Clone)]
pub struct EscalationOutcome {
    pub alert: Alert,
    pub assessment_failed: bool,
    pub delivered: bool,
}

/// Service for escalating flagged posts
pub struct EscalationService<AS, SK>
where
    AS: AssessmentService,
    SK: AlertSink,
{
    assessor: Arc<AS>,
    sink: Arc<SK>,
}

impl<AS, SK> EscalationService<AS, SK>
where
    AS: AssessmentService,
    SK: AlertSink,
{
    pub fn new(assessor: Arc<AS>, sink: Arc<SK>) -> Self {
        Self { assessor, sink }
    }

    /// Assess a flagged post and dispatch one alert for it
    pub async fn escalate(&self, entry: &FeedEntry, post: &Post) -> EscalationOutcome {
        let (assessment, assessment_failed) =
            match self.assessor.assess(&post.content, &post.author).await {
                Ok(text) => (text, false),
                Err(e) => {
                    tracing::warn!(
                        "Assessment failed for post by {} in '{}': {}",
                        post.author,
                        entry.title,
                        e
                    );
                    (assessment_placeholder(&e), true)
                }
            };

        let verdict = ModerationVerdict {
            flagged: true,
            assessment,
        };
        let alert = Alert::compose(entry, post, verdict, Utc::now());

        let delivered = match self.sink.dispatch(&alert).await {
            Ok(()) => {
                tracing::info!("Alert sent for post by {} ({})", alert.author, alert.source_link);
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to deliver alert for post by {} ({}): {}",
                    alert.author,
                    alert.source_link,
                    e
                );
                false
            }
        };

        EscalationOutcome {
            alert,
            assessment_failed,
            delivered,
        }
    }
}
