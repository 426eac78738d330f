use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::LeagueEvent;

/// An event together with the league it belongs to
#[derive(Debug, Clone)]
pub struct LeagueEnvelope {
    pub league_id: String,
    pub event: LeagueEvent,
}

/// Event bus for distributing league events throughout the application
#[derive(Debug, Clone)]
pub struct EventBus {
    /// League-specific event channels: league_id -> sender
    league_channels: Arc<RwLock<HashMap<String, broadcast::Sender<LeagueEvent>>>>,
    /// Every event from every league, for cross-league consumers
    all_leagues: broadcast::Sender<LeagueEnvelope>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new event bus; `capacity` bounds each broadcast channel
    /// and is raised to 1 when zero
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (all_leagues, _) = broadcast::channel(capacity);
        Self {
            league_channels: Arc::new(RwLock::new(HashMap::new())),
            all_leagues,
            capacity,
        }
    }

    /// Emits an event to all subscribers of a league. Never fails; an
    /// event with no receivers is dropped.
    pub async fn emit_to_league(&self, league_id: &str, event: LeagueEvent) {
        let event_type = event.event_type();

        if self
            .all_leagues
            .send(LeagueEnvelope {
                league_id: league_id.to_string(),
                event: event.clone(),
            })
            .is_err()
        {
            debug!(league_id = %league_id, event_type, "No cross-league receivers");
        }

        let league_channels = self.league_channels.read().await;
        match league_channels.get(league_id) {
            Some(sender) => match sender.send(event) {
                Ok(receiver_count) => {
                    debug!(
                        league_id = %league_id,
                        event_type,
                        receivers = receiver_count,
                        "League event emitted"
                    );
                }
                Err(_) => {
                    debug!(league_id = %league_id, event_type, "League event emitted with no receivers");
                }
            },
            None => {
                debug!(league_id = %league_id, event_type, "No league channel - event not buffered");
            }
        }
    }

    /// Subscribe to events for a specific league
    pub async fn subscribe_to_league(&self, league_id: &str) -> broadcast::Receiver<LeagueEvent> {
        {
            let league_channels = self.league_channels.read().await;
            if let Some(sender) = league_channels.get(league_id) {
                return sender.subscribe();
            }
        }

        debug!(league_id = %league_id, "Creating new league channel for subscription");
        let mut league_channels = self.league_channels.write().await;
        league_channels
            .entry(league_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Subscribe to events from every league
    pub fn subscribe_all(&self) -> broadcast::Receiver<LeagueEnvelope> {
        self.all_leagues.subscribe()
    }
}
