use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{StandingEntry, StandingsResponse},
    ranking::rank_standings,
    repository::StandingsRepository,
};
use crate::{
    config::PointsConfig,
    event::{EventBus, LeagueEvent},
    registry::LeagueRegistry,
    shared::{AppError, KeyedLocks},
};

/// Turns completed match results into league standings
pub struct LeaderboardService {
    repository: Arc<dyn StandingsRepository>,
    registry: Arc<dyn LeagueRegistry>,
    event_bus: EventBus,
    points: PointsConfig,
    league_locks: KeyedLocks,
}

impl LeaderboardService {
    pub fn new(
        repository: Arc<dyn StandingsRepository>,
        registry: Arc<dyn LeagueRegistry>,
        event_bus: EventBus,
        points: PointsConfig,
    ) -> Self {
        Self {
            repository,
            registry,
            event_bus,
            points,
            league_locks: KeyedLocks::new(),
        }
    }

    /// Creates the standings row for a team accepted into a league
    #[instrument(skip(self))]
    pub async fn register_team(
        &self,
        league_id: &str,
        team_id: &str,
    ) -> Result<StandingEntry, AppError> {
        let league = self
            .registry
            .get_league(league_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("League {} not found", league_id)))?;

        self.registry
            .get_team(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        if !league.has_team(team_id) {
            return Err(AppError::Validation(format!(
                "Team {} has not been accepted into league {}",
                team_id, league_id
            )));
        }

        let lock = self.league_locks.lock_for(league_id).await;
        let _guard = lock.lock().await;

        let (entry, created) = self
            .repository
            .insert_entry_if_absent(StandingEntry::new(league_id, team_id, Utc::now()))
            .await?;

        if created {
            info!(league_id, team_id, "Standings row created for new league team");
            self.event_bus
                .emit_to_league(
                    league_id,
                    LeagueEvent::TeamJoinedLeague {
                        league_id: league_id.to_string(),
                        team_id: team_id.to_string(),
                    },
                )
                .await;
        }

        Ok(entry)
    }

    /// Folds one completed match into both teams' records
    #[instrument(skip(self))]
    pub async fn apply_match_result(
        &self,
        league_id: &str,
        team_a_id: &str,
        team_b_id: &str,
        score_a: u32,
        score_b: u32,
    ) -> Result<(StandingEntry, StandingEntry), AppError> {
        if team_a_id == team_b_id {
            return Err(AppError::Validation(format!(
                "Team {} cannot play itself",
                team_a_id
            )));
        }

        let lock = self.league_locks.lock_for(league_id).await;
        let _guard = lock.lock().await;

        let now = Utc::now();
        let mut entry_a = self.ensure_entry(league_id, team_a_id).await?;
        let mut entry_b = self.ensure_entry(league_id, team_b_id).await?;

        let result_a = entry_a.record(score_a, score_b, &self.points, now);
        let result_b = entry_b.record(score_b, score_a, &self.points, now);

        self.repository.save_entry(&entry_a).await?;
        self.repository.save_entry(&entry_b).await?;

        info!(
            league_id,
            team_a_id,
            team_b_id,
            score_a,
            score_b,
            ?result_a,
            ?result_b,
            "Match result applied to standings"
        );

        self.event_bus
            .emit_to_league(
                league_id,
                LeagueEvent::StandingsUpdated {
                    league_id: league_id.to_string(),
                },
            )
            .await;

        Ok((entry_a, entry_b))
    }

    /// Ranked standings table for a league
    #[instrument(skip(self))]
    pub async fn compute_standings(&self, league_id: &str) -> Result<StandingsResponse, AppError> {
        self.registry
            .get_league(league_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("League {} not found", league_id)))?;

        let entries = self.repository.list_entries(league_id).await?;

        Ok(StandingsResponse {
            league_id: league_id.to_string(),
            standings: rank_standings(entries),
        })
    }

    async fn ensure_entry(&self, league_id: &str, team_id: &str) -> Result<StandingEntry, AppError> {
        let (entry, created) = self
            .repository
            .insert_entry_if_absent(StandingEntry::new(league_id, team_id, Utc::now()))
            .await?;

        if created {
            warn!(league_id, team_id, "Standings row was missing and has been created lazily");
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{
        seeded_registry, test_services, test_services_with_points, LEAGUE_ID, TEAM_A, TEAM_B,
    };
    use crate::leaderboard::InMemoryStandingsRepository;

    #[tokio::test]
    async fn register_team_creates_zeroed_row_once() {
        let services = test_services().await;
        let leaderboard = &services.state.leaderboard_service;
        let mut events = services.event_bus.subscribe_to_league(LEAGUE_ID).await;

        let entry = leaderboard.register_team(LEAGUE_ID, TEAM_A).await.unwrap();
        assert_eq!(entry.league_points, 0);
        leaderboard.register_team(LEAGUE_ID, TEAM_A).await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            LeagueEvent::TeamJoinedLeague {
                league_id: LEAGUE_ID.into(),
                team_id: TEAM_A.into()
            }
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn register_team_rejects_unknowns() {
        let services = test_services().await;
        let leaderboard = &services.state.leaderboard_service;

        assert!(matches!(
            leaderboard.register_team("nope", TEAM_A).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            leaderboard.register_team(LEAGUE_ID, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn tie_gives_both_teams_a_draw_and_no_points() {
        let services = test_services().await;
        let (a, b) = services
            .state
            .leaderboard_service
            .apply_match_result(LEAGUE_ID, TEAM_A, TEAM_B, 14, 14)
            .await
            .unwrap();

        for entry in [a, b] {
            assert_eq!(entry.draws, 1);
            assert_eq!(entry.league_points, 0);
            assert_eq!(entry.point_difference, 0);
        }
    }

    #[tokio::test]
    async fn configured_draw_points_are_awarded() {
        let services = test_services_with_points(PointsConfig {
            draw: 1,
            ..PointsConfig::default()
        })
        .await;
        let (a, _) = services
            .state
            .leaderboard_service
            .apply_match_result(LEAGUE_ID, TEAM_A, TEAM_B, 7, 7)
            .await
            .unwrap();
        assert_eq!(a.league_points, 1);
    }

    #[tokio::test]
    async fn results_accumulate_into_sorted_table() {
        let services = test_services().await;
        let leaderboard = &services.state.leaderboard_service;

        leaderboard
            .apply_match_result(LEAGUE_ID, TEAM_A, TEAM_B, 12, 19)
            .await
            .unwrap();
        leaderboard
            .apply_match_result(LEAGUE_ID, TEAM_A, TEAM_B, 6, 0)
            .await
            .unwrap();

        let table = leaderboard.compute_standings(LEAGUE_ID).await.unwrap();
        assert_eq!(table.standings.len(), 2);

        // Both on 3 points; B leads on difference (+1 vs -1)
        let top = &table.standings[0].entry;
        assert_eq!(top.team_id, TEAM_B);
        assert_eq!(top.point_difference, 1);
        assert_eq!(top.points_scored, 19);
        assert_eq!(top.points_against, 18);
        assert_eq!(table.standings[1].entry.point_difference, -1);
    }

    #[tokio::test]
    async fn standings_for_unknown_league_is_not_found() {
        let registry = seeded_registry().await;
        let service = LeaderboardService::new(
            Arc::new(InMemoryStandingsRepository::new()),
            registry,
            EventBus::new(10),
            PointsConfig::default(),
        );
        assert!(matches!(
            service.compute_standings("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
