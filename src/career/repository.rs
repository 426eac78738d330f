use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{CareerStats, CareerSubject};
use crate::shared::AppError;

#[async_trait]
pub trait CareerRepository: Send + Sync {
    async fn get_career(
        &self,
        subject: CareerSubject,
        id: &str,
    ) -> Result<Option<CareerStats>, AppError>;

    async fn save_career(&self, career: &CareerStats) -> Result<(), AppError>;

    /// One-shot champion assignment. Returns false if the league already
    /// has a winner; the stored winner is left untouched.
    async fn record_league_winner(&self, league_id: &str, team_id: &str)
        -> Result<bool, AppError>;

    async fn get_league_winner(&self, league_id: &str) -> Result<Option<String>, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryCareerRepository {
    careers: Arc<RwLock<HashMap<(CareerSubject, String), CareerStats>>>,
    league_winners: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCareerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CareerRepository for InMemoryCareerRepository {
    async fn get_career(
        &self,
        subject: CareerSubject,
        id: &str,
    ) -> Result<Option<CareerStats>, AppError> {
        let careers = self.careers.read().await;
        Ok(careers.get(&(subject, id.to_string())).cloned())
    }

    async fn save_career(&self, career: &CareerStats) -> Result<(), AppError> {
        let mut careers = self.careers.write().await;
        careers.insert((career.subject, career.id.clone()), career.clone());
        Ok(())
    }

    async fn record_league_winner(
        &self,
        league_id: &str,
        team_id: &str,
    ) -> Result<bool, AppError> {
        let mut winners = self.league_winners.write().await;
        if winners.contains_key(league_id) {
            return Ok(false);
        }
        winners.insert(league_id.to_string(), team_id.to_string());
        Ok(true)
    }

    async fn get_league_winner(&self, league_id: &str) -> Result<Option<String>, AppError> {
        let winners = self.league_winners.read().await;
        Ok(winners.get(league_id).cloned())
    }
}
