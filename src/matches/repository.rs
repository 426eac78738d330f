use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::Match;
use crate::shared::AppError;

/// Trait for match document storage
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create_match(&self, m: &Match) -> Result<(), AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<Match>, AppError>;
    async fn list_league_matches(&self, league_id: &str) -> Result<Vec<Match>, AppError>;

    /// Compare-and-swap write of a whole match document.
    ///
    /// Succeeds only if the stored version equals `m.version`; the stored
    /// copy gets the next version and is returned. A stale write fails with
    /// `AppError::Conflict` and changes nothing.
    async fn update_match(&self, m: Match) -> Result<Match, AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    matches: Arc<RwLock<HashMap<String, Match>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, m), fields(match_id = %m.id))]
    async fn create_match(&self, m: &Match) -> Result<(), AppError> {
        let mut matches = self.matches.write().await;
        if matches.contains_key(&m.id) {
            warn!("Match already exists in memory");
            return Err(AppError::Conflict(format!("Match {} already exists", m.id)));
        }
        matches.insert(m.id.clone(), m.clone());
        debug!("Match created in memory");
        Ok(())
    }

    async fn get_match(&self, match_id: &str) -> Result<Option<Match>, AppError> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).cloned())
    }

    async fn list_league_matches(&self, league_id: &str) -> Result<Vec<Match>, AppError> {
        let matches = self.matches.read().await;
        let mut league_matches: Vec<Match> = matches
            .values()
            .filter(|m| m.league_id == league_id)
            .cloned()
            .collect();
        league_matches.sort_by(|a, b| {
            (a.scheduled_date, a.scheduled_time, &a.id).cmp(&(
                b.scheduled_date,
                b.scheduled_time,
                &b.id,
            ))
        });
        Ok(league_matches)
    }

    #[instrument(skip(self, m), fields(match_id = %m.id, version = m.version))]
    async fn update_match(&self, mut m: Match) -> Result<Match, AppError> {
        let mut matches = self.matches.write().await;
        let stored = matches
            .get(&m.id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", m.id)))?;

        if stored.version != m.version {
            warn!(stored_version = stored.version, "Stale match write rejected");
            return Err(AppError::Conflict(format!(
                "Match {} was modified concurrently (expected version {}, found {})",
                m.id, m.version, stored.version
            )));
        }

        m.version += 1;
        matches.insert(m.id.clone(), m.clone());
        debug!(new_version = m.version, "Match updated in memory");
        Ok(m)
    }
}
