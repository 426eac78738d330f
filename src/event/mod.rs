// Event-driven architecture components
//
// This module provides the infrastructure for fire-and-forget communication
// between the scoring engine and the collaborators around it.

// Public API - what other modules can use
pub use bus::{EventBus, LeagueEnvelope};
pub use events::LeagueEvent;
pub use handler::{EventError, LeagueEventHandler};
pub use notifications::{
    LoggingNotificationSink, Notification, NotificationSink, NotificationSubscriber,
};
pub use subscription::LeagueSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod notifications;
mod subscription;
