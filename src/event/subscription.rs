use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{bus::EventBus, handler::LeagueEventHandler};

/// Routes league events from the bus to a handler on a background task
pub struct LeagueSubscription {
    /// `None` subscribes to every league
    league_id: Option<String>,
    handler: Arc<dyn LeagueEventHandler>,
    event_bus: EventBus,
}

impl LeagueSubscription {
    pub fn for_league(
        league_id: String,
        handler: Arc<dyn LeagueEventHandler>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            league_id: Some(league_id),
            handler,
            event_bus,
        }
    }

    pub fn for_all_leagues(handler: Arc<dyn LeagueEventHandler>, event_bus: EventBus) -> Self {
        Self {
            league_id: None,
            handler,
            event_bus,
        }
    }

    /// Start the subscription - spawns a background task that listens to
    /// league events and routes them to the handler
    pub async fn start(self) -> JoinHandle<()> {
        let handler_name = self.handler.handler_name();
        let handler = self.handler;

        match self.league_id {
            Some(league_id) => {
                info!(league_id = %league_id, handler = handler_name, "Starting league subscription");
                let mut receiver = self.event_bus.subscribe_to_league(&league_id).await;

                tokio::spawn(async move {
                    loop {
                        match receiver.recv().await {
                            Ok(event) => {
                                debug!(league_id = %league_id, handler = handler_name, event_type = event.event_type(), "Received league event");
                                if let Err(e) = handler.handle_league_event(&league_id, &event).await {
                                    error!(league_id = %league_id, handler = handler_name, error = %e, retryable = e.is_retryable(), "League event handler failed");
                                }
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                warn!(league_id = %league_id, handler = handler_name, skipped, "League subscription lagged");
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                    warn!(league_id = %league_id, handler = handler_name, "League subscription ended - no more events");
                })
            }
            None => {
                info!(handler = handler_name, "Starting subscription to all leagues");
                let mut receiver = self.event_bus.subscribe_all();

                tokio::spawn(async move {
                    loop {
                        match receiver.recv().await {
                            Ok(envelope) => {
                                if let Err(e) = handler
                                    .handle_league_event(&envelope.league_id, &envelope.event)
                                    .await
                                {
                                    error!(league_id = %envelope.league_id, handler = handler_name, error = %e, retryable = e.is_retryable(), "League event handler failed");
                                }
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                warn!(handler = handler_name, skipped, "Subscription lagged");
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                    warn!(handler = handler_name, "Subscription ended - no more events");
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventError, LeagueEvent};
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct ForwardingHandler {
        sender: mpsc::UnboundedSender<(String, LeagueEvent)>,
    }

    #[async_trait]
    impl LeagueEventHandler for ForwardingHandler {
        async fn handle_league_event(
            &self,
            league_id: &str,
            event: &LeagueEvent,
        ) -> Result<(), EventError> {
            self.sender
                .send((league_id.to_string(), event.clone()))
                .map_err(|e| EventError::non_retryable(e.to_string()))
        }

        fn handler_name(&self) -> &'static str {
            "ForwardingHandler"
        }
    }

    #[tokio::test]
    async fn routes_league_events_to_handler() {
        let bus = EventBus::new(10);
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _handle = LeagueSubscription::for_league(
            "league".into(),
            Arc::new(ForwardingHandler { sender }),
            bus.clone(),
        )
        .start()
        .await;

        bus.emit_to_league(
            "league",
            LeagueEvent::StandingsUpdated {
                league_id: "league".into(),
            },
        )
        .await;

        let (league_id, event) = receiver.recv().await.unwrap();
        assert_eq!(league_id, "league");
        assert_eq!(event.event_type(), "standings_updated");
    }

    #[tokio::test]
    async fn all_league_subscription_sees_every_league() {
        let bus = EventBus::new(10);
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _handle =
            LeagueSubscription::for_all_leagues(Arc::new(ForwardingHandler { sender }), bus.clone())
                .start()
                .await;

        for league in ["north", "south"] {
            bus.emit_to_league(
                league,
                LeagueEvent::StandingsUpdated {
                    league_id: league.into(),
                },
            )
            .await;
        }

        assert_eq!(receiver.recv().await.unwrap().0, "north");
        assert_eq!(receiver.recv().await.unwrap().0, "south");
    }
}
