use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::StandingEntry;
use crate::shared::AppError;

/// Storage for standings rows keyed by (league_id, team_id)
#[async_trait]
pub trait StandingsRepository: Send + Sync {
    /// Inserts `entry` unless a row for its key exists. Returns the stored
    /// row and whether it was created by this call.
    async fn insert_entry_if_absent(
        &self,
        entry: StandingEntry,
    ) -> Result<(StandingEntry, bool), AppError>;

    /// Replaces an existing row
    async fn save_entry(&self, entry: &StandingEntry) -> Result<(), AppError>;

    /// All rows of a league in creation order
    async fn list_entries(&self, league_id: &str) -> Result<Vec<StandingEntry>, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStandingsRepository {
    leagues: Arc<RwLock<HashMap<String, Vec<StandingEntry>>>>,
}

impl InMemoryStandingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StandingsRepository for InMemoryStandingsRepository {
    async fn insert_entry_if_absent(
        &self,
        entry: StandingEntry,
    ) -> Result<(StandingEntry, bool), AppError> {
        let mut leagues = self.leagues.write().await;
        let rows = leagues.entry(entry.league_id.clone()).or_default();

        if let Some(existing) = rows.iter().find(|row| row.team_id == entry.team_id) {
            return Ok((existing.clone(), false));
        }

        rows.push(entry.clone());
        Ok((entry, true))
    }

    async fn save_entry(&self, entry: &StandingEntry) -> Result<(), AppError> {
        let mut leagues = self.leagues.write().await;
        let row = leagues
            .get_mut(&entry.league_id)
            .and_then(|rows| rows.iter_mut().find(|row| row.team_id == entry.team_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No standings row for team {} in league {}",
                    entry.team_id, entry.league_id
                ))
            })?;

        *row = entry.clone();
        Ok(())
    }

    async fn list_entries(&self, league_id: &str) -> Result<Vec<StandingEntry>, AppError> {
        let leagues = self.leagues.read().await;
        Ok(leagues.get(league_id).cloned().unwrap_or_default())
    }
}
