use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::{
    events::LeagueEvent,
    handler::{EventError, LeagueEventHandler},
};

/// A user-facing notification handed to the delivery collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub league_id: String,
    pub kind: &'static str,
    pub message: String,
}

impl Notification {
    /// Builds the notification for a notifiable event, `None` otherwise
    pub fn from_event(league_id: &str, event: &LeagueEvent) -> Option<Self> {
        let message = match event {
            LeagueEvent::OfficialAssigned {
                match_id,
                user_id,
                role,
            } => format!("{} assigned as {} for match {}", user_id, role, match_id),
            LeagueEvent::StatsSubmitted {
                match_id,
                team_id,
                player_id,
                ..
            } => format!(
                "Stats for player {} ({}) in match {} are awaiting approval",
                player_id, team_id, match_id
            ),
            LeagueEvent::StatsReviewed {
                match_id,
                team_id,
                approved: true,
                ..
            } => format!("Stats for {} in match {} were approved", team_id, match_id),
            LeagueEvent::StatsReviewed {
                match_id,
                team_id,
                approved: false,
                reason,
            } => format!(
                "Stats for {} in match {} were rejected: {}",
                team_id,
                match_id,
                reason.as_deref().unwrap_or("no reason given")
            ),
            LeagueEvent::TeamJoinedLeague { team_id, .. } => {
                format!("Team {} was accepted into league {}", team_id, league_id)
            }
            _ => return None,
        };

        Some(Self {
            league_id: league_id.to_string(),
            kind: event.event_type(),
            message,
        })
    }
}

/// Outbound notification delivery (email, push, ...) owned by the surrounding system
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: Notification) -> Result<(), EventError>;
}

/// Sink that only writes notifications to the log
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn deliver(&self, notification: Notification) -> Result<(), EventError> {
        info!(
            league_id = %notification.league_id,
            kind = notification.kind,
            message = %notification.message,
            "Notification"
        );
        Ok(())
    }
}

/// Forwards notifiable league events to a `NotificationSink`
pub struct NotificationSubscriber {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationSubscriber {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl LeagueEventHandler for NotificationSubscriber {
    async fn handle_league_event(
        &self,
        league_id: &str,
        event: &LeagueEvent,
    ) -> Result<(), EventError> {
        if !event.is_notifiable() {
            return Ok(());
        }

        match Notification::from_event(league_id, event) {
            Some(notification) => self.sink.deliver(notification).await,
            None => Ok(()),
        }
    }

    fn handler_name(&self) -> &'static str {
        "NotificationSubscriber"
    }
}
