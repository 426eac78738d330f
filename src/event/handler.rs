use async_trait::async_trait;
use thiserror::Error;

use super::events::LeagueEvent;

/// Errors that can occur when handling events
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Retryable error: {0}")]
    Retryable(String),

    #[error("Non-retryable error: {0}")]
    NonRetryable(String),
}

impl EventError {
    /// Whether this error indicates the delivery could be retried out-of-band
    pub fn is_retryable(&self) -> bool {
        matches!(self, EventError::Retryable(_))
    }

    pub fn non_retryable(msg: impl Into<String>) -> Self {
        EventError::NonRetryable(msg.into())
    }
}

/// Trait for components that react to league events
///
/// Handlers run on a subscription task, never on the request path, so a
/// failing handler cannot fail the operation that emitted the event.
#[async_trait]
pub trait LeagueEventHandler: Send + Sync {
    async fn handle_league_event(
        &self,
        league_id: &str,
        event: &LeagueEvent,
    ) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
