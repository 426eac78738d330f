use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{CareerDelta, CareerStats, CareerSubject},
    repository::CareerRepository,
};
use crate::{
    event::{EventBus, LeagueEvent},
    registry::{LeagueRegistry, MatchFormat},
    shared::{AppError, KeyedLocks},
};

/// Applies per-match deltas and season events to lifetime totals
pub struct CareerService {
    repository: Arc<dyn CareerRepository>,
    registry: Arc<dyn LeagueRegistry>,
    event_bus: EventBus,
    career_locks: KeyedLocks,
}

impl CareerService {
    pub fn new(
        repository: Arc<dyn CareerRepository>,
        registry: Arc<dyn LeagueRegistry>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            registry,
            event_bus,
            career_locks: KeyedLocks::new(),
        }
    }

    #[instrument(skip(self, delta), fields(points = delta.points, first = delta.first_line_in_match))]
    pub async fn apply_player_delta(
        &self,
        player_id: &str,
        delta: &CareerDelta,
    ) -> Result<CareerStats, AppError> {
        self.update(CareerSubject::Player, player_id, |career| {
            career.apply_delta(delta).map_err(AppError::from)
        })
        .await
    }

    #[instrument(skip(self, delta), fields(points = delta.points, first = delta.first_line_in_match))]
    pub async fn apply_team_delta(
        &self,
        team_id: &str,
        delta: &CareerDelta,
    ) -> Result<CareerStats, AppError> {
        self.update(CareerSubject::Team, team_id, |career| {
            career.apply_delta(delta).map_err(AppError::from)
        })
        .await
    }

    /// Credits a decided match to the winning team and every rostered player
    #[instrument(skip(self, roster), fields(roster_size = roster.len()))]
    pub async fn record_game_win(
        &self,
        team_id: &str,
        roster: &[String],
        format: MatchFormat,
    ) -> Result<(), AppError> {
        self.update(CareerSubject::Team, team_id, |career| {
            career.games_won.increment(format);
            Ok(())
        })
        .await?;

        for player_id in roster {
            self.update(CareerSubject::Player, player_id, |career| {
                career.games_won.increment(format);
                Ok(())
            })
            .await?;
        }

        info!(team_id, %format, "Game win credited to team and roster");
        Ok(())
    }

    /// Season-level champion designation; can happen once per league
    #[instrument(skip(self))]
    pub async fn set_league_winner(
        &self,
        league_id: &str,
        team_id: &str,
    ) -> Result<CareerStats, AppError> {
        let league = self
            .registry
            .get_league(league_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("League {} not found", league_id)))?;

        let team = self
            .registry
            .get_team(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        if !league.has_team(team_id) {
            return Err(AppError::Validation(format!(
                "Team {} is not part of league {}",
                team_id, league_id
            )));
        }

        if !self
            .repository
            .record_league_winner(league_id, team_id)
            .await?
        {
            let existing = self.repository.get_league_winner(league_id).await?;
            return Err(AppError::AlreadyFinalized(format!(
                "League {} already has a winner ({})",
                league_id,
                existing.unwrap_or_default()
            )));
        }

        let team_career = self
            .update(CareerSubject::Team, team_id, |career| {
                career.leagues_won.increment(league.format);
                Ok(())
            })
            .await?;

        for player_id in &team.player_ids {
            self.update(CareerSubject::Player, player_id, |career| {
                career.leagues_won.increment(league.format);
                Ok(())
            })
            .await?;
        }

        info!(league_id, team_id, players = team.player_ids.len(), "League winner set");

        self.event_bus
            .emit_to_league(
                league_id,
                LeagueEvent::LeagueWinnerSet {
                    league_id: league_id.to_string(),
                    team_id: team_id.to_string(),
                },
            )
            .await;

        Ok(team_career)
    }

    /// Lifetime totals; a player with no recorded history gets a zeroed record
    pub async fn get_player_career(&self, player_id: &str) -> Result<CareerStats, AppError> {
        self.get_or_default(CareerSubject::Player, player_id).await
    }

    pub async fn get_team_career(&self, team_id: &str) -> Result<CareerStats, AppError> {
        self.get_or_default(CareerSubject::Team, team_id).await
    }

    async fn get_or_default(
        &self,
        subject: CareerSubject,
        id: &str,
    ) -> Result<CareerStats, AppError> {
        Ok(self
            .repository
            .get_career(subject, id)
            .await?
            .unwrap_or_else(|| CareerStats::new(subject, id)))
    }

    async fn update<F>(&self, subject: CareerSubject, id: &str, apply: F) -> Result<CareerStats, AppError>
    where
        F: FnOnce(&mut CareerStats) -> Result<(), AppError>,
    {
        let lock = self.career_locks.lock_for(&format!("{}:{}", subject, id)).await;
        let _guard = lock.lock().await;

        let mut career = self.get_or_default(subject, id).await?;
        apply(&mut career)?;
        career.last_updated = Some(Utc::now());
        self.repository.save_career(&career).await?;

        debug!(%subject, id, matches_played = career.matches_played, "Career totals updated");
        Ok(career)
    }
}
