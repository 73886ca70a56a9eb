//! Alert sink port trait

use async_trait::async_trait;

use crate::domain::entities::Alert;
use crate::error::DispatchError;

/// Port trait for the notification channel
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert. Delivery is attempted once; callers never retry.
    async fn dispatch(&self, alert: &Alert) -> Result<(), DispatchError>;
}
