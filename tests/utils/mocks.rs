use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use flagleague::event::{EventError, Notification, NotificationSink};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Notification sink that keeps everything it is handed
#[derive(Clone, Default)]
pub struct RecordingNotificationSink {
    delivered: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.read().await.clone()
    }

    /// Waits for the subscription task to deliver at least `count` notifications
    pub async fn wait_for(&self, count: usize) -> Vec<Notification> {
        for _ in 0..50 {
            let delivered = self.delivered().await;
            if delivered.len() >= count {
                return delivered;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.delivered().await
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn deliver(&self, notification: Notification) -> Result<(), EventError> {
        self.delivered.write().await.push(notification);
        Ok(())
    }
}
