use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{LeagueInfo, RegistrySeed, TeamInfo};
use crate::shared::AppError;

/// Read access to leagues, teams and rosters owned by the surrounding system
#[async_trait]
pub trait LeagueRegistry: Send + Sync {
    async fn get_league(&self, league_id: &str) -> Result<Option<LeagueInfo>, AppError>;
    async fn get_team(&self, team_id: &str) -> Result<Option<TeamInfo>, AppError>;
}

/// In-memory registry for development and testing
#[derive(Debug, Default)]
pub struct InMemoryLeagueRegistry {
    leagues: Arc<RwLock<HashMap<String, LeagueInfo>>>,
    teams: Arc<RwLock<HashMap<String, TeamInfo>>>,
}

impl InMemoryLeagueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_league(&self, league: LeagueInfo) {
        debug!(league_id = %league.id, teams = league.team_ids.len(), "Registering league");
        let mut leagues = self.leagues.write().await;
        leagues.insert(league.id.clone(), league);
    }

    pub async fn insert_team(&self, team: TeamInfo) {
        debug!(team_id = %team.id, roster = team.player_ids.len(), "Registering team");
        let mut teams = self.teams.write().await;
        teams.insert(team.id.clone(), team);
    }

    pub async fn load_seed(&self, seed: RegistrySeed) {
        for league in seed.leagues {
            self.insert_league(league).await;
        }
        for team in seed.teams {
            self.insert_team(team).await;
        }
    }
}

#[async_trait]
impl LeagueRegistry for InMemoryLeagueRegistry {
    async fn get_league(&self, league_id: &str) -> Result<Option<LeagueInfo>, AppError> {
        let leagues = self.leagues.read().await;
        Ok(leagues.get(league_id).cloned())
    }

    async fn get_team(&self, team_id: &str) -> Result<Option<TeamInfo>, AppError> {
        let teams = self.teams.read().await;
        Ok(teams.get(team_id).cloned())
    }
}
