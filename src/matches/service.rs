use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::{
    actions::ActionType,
    models::{ActionRecord, Match, MatchStatus, OfficialRole, StatReview, TimesSwitched},
    repository::MatchRepository,
    state::{self, MatchOutcome},
    types::{
        AssignOfficialsRequest, CoinTossRequest, CreateMatchRequest, RecordActionRequest,
        ReviewStatsRequest, StatSubmissionResult, SubmitStatsRequest,
    },
};
use crate::{
    career::{CareerDelta, CareerService},
    event::{EventBus, LeagueEvent},
    leaderboard::LeaderboardService,
    registry::{LeagueRegistry, TeamInfo},
    shared::{AppError, KeyedLocks},
    stats::{merge_player_stats, team_stat_line, MergeOutcome, PlayerStatLine},
};

/// Owns every read-modify-write of a match document.
///
/// Each mutation runs under the match's lock and is persisted with a
/// version-checked write. Events and leaderboard/career propagation happen
/// after the write has landed.
pub struct MatchService {
    repository: Arc<dyn MatchRepository>,
    registry: Arc<dyn LeagueRegistry>,
    leaderboard: Arc<LeaderboardService>,
    career: Arc<CareerService>,
    event_bus: EventBus,
    match_locks: KeyedLocks,
}

impl MatchService {
    pub fn new(
        repository: Arc<dyn MatchRepository>,
        registry: Arc<dyn LeagueRegistry>,
        leaderboard: Arc<LeaderboardService>,
        career: Arc<CareerService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            registry,
            leaderboard,
            career,
            event_bus,
            match_locks: KeyedLocks::new(),
        }
    }

    /// Schedules an upcoming match between two teams of the same league
    #[instrument(skip(self, request), fields(league_id = %request.league_id))]
    pub async fn create_match(&self, request: CreateMatchRequest) -> Result<Match, AppError> {
        if request.team_a_id == request.team_b_id {
            return Err(AppError::Validation(format!(
                "Team {} cannot play itself",
                request.team_a_id
            )));
        }

        let league = self
            .registry
            .get_league(&request.league_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("League {} not found", request.league_id)))?;

        if league.format != request.format {
            return Err(AppError::Validation(format!(
                "League {} plays {}, not {}",
                league.id, league.format, request.format
            )));
        }

        if !league.covers(request.scheduled_date) {
            return Err(AppError::Validation(format!(
                "Date {} is outside league window {} to {}",
                request.scheduled_date, league.starts_on, league.ends_on
            )));
        }

        for team_id in [&request.team_a_id, &request.team_b_id] {
            self.require_team(team_id).await?;
            if !league.has_team(team_id) {
                return Err(AppError::Validation(format!(
                    "Team {} is not part of league {}",
                    team_id, league.id
                )));
            }
        }

        let m = Match::new(Uuid::new_v4().to_string(), &request, Utc::now());
        self.repository.create_match(&m).await?;

        info!(
            match_id = %m.id,
            team_a = %m.side_a.team_id,
            team_b = %m.side_b.team_id,
            date = %m.scheduled_date,
            "Match scheduled"
        );

        Ok(m)
    }

    pub async fn get_match(&self, match_id: &str) -> Result<Match, AppError> {
        self.repository
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))
    }

    /// Every match of a league in schedule order
    pub async fn list_league_matches(&self, league_id: &str) -> Result<Vec<Match>, AppError> {
        if self.registry.get_league(league_id).await?.is_none() {
            return Err(AppError::NotFound(format!("League {} not found", league_id)));
        }
        self.repository.list_league_matches(league_id).await
    }

    /// Kickoff without a scoring play
    #[instrument(skip(self))]
    pub async fn start_match(&self, match_id: &str) -> Result<Match, AppError> {
        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        state::start(&mut m, Utc::now())?;
        let m = self.repository.update_match(m).await?;

        info!("Match kicked off");
        self.emit(&m, LeagueEvent::MatchStarted { match_id: m.id.clone() })
            .await;

        Ok(m)
    }

    #[instrument(skip(self, request))]
    pub async fn coin_toss(
        &self,
        match_id: &str,
        request: CoinTossRequest,
    ) -> Result<Match, AppError> {
        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        let offense_team_id = match request.offense_team_id {
            Some(team_id) => team_id,
            None if rand::random::<bool>() => m.side_a.team_id.clone(),
            None => m.side_b.team_id.clone(),
        };

        state::coin_toss(&mut m, &offense_team_id)?;
        let m = self.repository.update_match(m).await?;

        info!(offense_team_id = %offense_team_id, "Coin toss decided initial sides");
        Ok(m)
    }

    /// Appends a scoring play to one side's ledger. The first play of an
    /// upcoming match puts it live.
    #[instrument(skip(self, request), fields(team_id = %request.team_id, player_id = %request.player_id))]
    pub async fn record_action(
        &self,
        match_id: &str,
        request: RecordActionRequest,
    ) -> Result<(Match, ActionRecord), AppError> {
        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        let action = ActionType::parse(&request.action_type)?;
        state::ensure_not_completed(&m, "record an action")?;
        let was_upcoming = m.status() == MatchStatus::Upcoming;

        let side = m.require_side_mut(&request.team_id)?;
        self.require_rostered(&request.team_id, &request.player_id)
            .await?;
        let record = side.append_action(&request.player_id, action, request.period, Utc::now());
        let score = side.score;

        let m = self.repository.update_match(m).await?;

        info!(
            %action,
            points = record.points,
            score,
            sequence = record.sequence,
            "Scoring play recorded"
        );

        if was_upcoming {
            self.emit(&m, LeagueEvent::MatchStarted { match_id: m.id.clone() })
                .await;
        }
        self.emit(
            &m,
            LeagueEvent::ActionRecorded {
                match_id: m.id.clone(),
                team_id: request.team_id,
                player_id: request.player_id,
                action,
                points: record.points,
                score,
            },
        )
        .await;

        Ok((m, record))
    }

    #[instrument(skip(self))]
    pub async fn switch_sides(
        &self,
        match_id: &str,
        marker: TimesSwitched,
    ) -> Result<Match, AppError> {
        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        state::switch_sides(&mut m, marker)?;
        let m = self.repository.update_match(m).await?;

        info!(%marker, "Sides switched");
        self.emit(
            &m,
            LeagueEvent::SidesSwitched {
                match_id: m.id.clone(),
                marker,
            },
        )
        .await;

        Ok(m)
    }

    #[instrument(skip(self, request))]
    pub async fn assign_officials(
        &self,
        match_id: &str,
        request: AssignOfficialsRequest,
    ) -> Result<Match, AppError> {
        if request.referee_id.is_none() && request.stat_keeper_id.is_none() {
            return Err(AppError::Validation(
                "At least one of referee_id or stat_keeper_id is required".to_string(),
            ));
        }

        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        state::ensure_not_completed(&m, "assign officials")?;

        if let Some(referee_id) = &request.referee_id {
            m.referee_id = Some(referee_id.clone());
        }
        if let Some(stat_keeper_id) = &request.stat_keeper_id {
            m.stat_keeper_id = Some(stat_keeper_id.clone());
        }
        let m = self.repository.update_match(m).await?;

        let assignments = [
            (request.referee_id, OfficialRole::Referee),
            (request.stat_keeper_id, OfficialRole::StatKeeper),
        ];
        for (user_id, role) in assignments {
            if let Some(user_id) = user_id {
                info!(%user_id, %role, "Official assigned");
                self.emit(
                    &m,
                    LeagueEvent::OfficialAssigned {
                        match_id: m.id.clone(),
                        user_id,
                        role,
                    },
                )
                .await;
            }
        }

        Ok(m)
    }

    /// Stat aggregator entry point: merges a stat-keeper delta into the
    /// player's box-score line and rebuilds the side's team line.
    #[instrument(
        skip(self, request),
        fields(team_id = %request.team_id, player_id = %request.player_id, submission_id = ?request.submission_id)
    )]
    pub async fn submit_player_stats(
        &self,
        match_id: &str,
        request: SubmitStatsRequest,
    ) -> Result<StatSubmissionResult, AppError> {
        let (m, merged) = {
            let lock = self.match_locks.lock_for(match_id).await;
            let _guard = lock.lock().await;

            let mut m = self.get_match(match_id).await?;
            if m.status() == MatchStatus::Upcoming {
                return Err(AppError::InvalidState(format!(
                    "Stats cannot be submitted before match {} has started",
                    m.id
                )));
            }

            m.require_side_mut(&request.team_id)?;
            self.require_rostered(&request.team_id, &request.player_id)
                .await?;

            if let Some(submission_id) = &request.submission_id {
                if m.applied_submissions.contains(submission_id) {
                    debug!("Submission already applied; returning current lines");
                    return Ok(current_lines(&m, &request));
                }
            }

            let side = m.require_side_mut(&request.team_id)?;
            let merged = merge_player_stats(
                &mut side.player_stats,
                &request.team_id,
                &request.player_id,
                request.stats,
                Utc::now(),
            )?;
            side.team_stats = team_stat_line(&request.team_id, &side.player_stats)?;
            side.stat_review = Some(StatReview::Pending);

            if let Some(submission_id) = &request.submission_id {
                m.applied_submissions.insert(submission_id.clone());
            }

            let m = self.repository.update_match(m).await?;
            (m, merged)
        };

        info!(
            points_delta = merged.points_delta,
            total_points = merged.line.total_points,
            submissions = merged.line.submissions,
            "Player stats merged"
        );

        self.forward_career_deltas(&m, &request, &merged).await;

        self.emit(
            &m,
            LeagueEvent::StatsSubmitted {
                match_id: m.id.clone(),
                team_id: request.team_id.clone(),
                player_id: request.player_id.clone(),
                stat_keeper_id: request.stat_keeper_id.clone(),
            },
        )
        .await;

        let team_line = m
            .side(&request.team_id)
            .map(|side| side.team_stats.clone())
            .unwrap_or_default();

        Ok(StatSubmissionResult {
            player_line: merged.line,
            team_line,
            applied: true,
        })
    }

    #[instrument(skip(self, request), fields(team_id = %request.team_id, approved = request.approved))]
    pub async fn review_stats(
        &self,
        match_id: &str,
        request: ReviewStatsRequest,
    ) -> Result<Match, AppError> {
        let lock = self.match_locks.lock_for(match_id).await;
        let _guard = lock.lock().await;

        let mut m = self.get_match(match_id).await?;
        let side = m.require_side_mut(&request.team_id)?;
        if side.stat_review.is_none() {
            return Err(AppError::InvalidState(format!(
                "No stats have been submitted for team {}",
                request.team_id
            )));
        }

        side.stat_review = Some(if request.approved {
            StatReview::Approved
        } else {
            StatReview::Rejected {
                reason: request.reason.clone(),
            }
        });
        let m = self.repository.update_match(m).await?;

        info!("Box score reviewed");
        self.emit(
            &m,
            LeagueEvent::StatsReviewed {
                match_id: m.id.clone(),
                team_id: request.team_id,
                approved: request.approved,
                reason: request.reason,
            },
        )
        .await;

        Ok(m)
    }

    /// Completes a live match. Standings and career win counters are
    /// updated only by the call whose write moved the match to completed.
    #[instrument(skip(self))]
    pub async fn finalize(&self, match_id: &str) -> Result<Match, AppError> {
        let (m, outcome) = {
            let lock = self.match_locks.lock_for(match_id).await;
            let _guard = lock.lock().await;

            let mut m = self.get_match(match_id).await?;
            let outcome = state::finalize(&mut m, Utc::now())?;
            let m = self.repository.update_match(m).await?;
            (m, outcome)
        };

        info!(
            score_a = outcome.score_a,
            score_b = outcome.score_b,
            winning_team = ?outcome.winning_team,
            "Match finalized"
        );

        self.emit(
            &m,
            LeagueEvent::MatchFinalized {
                match_id: m.id.clone(),
                winning_team: outcome.winning_team.clone(),
                score_a: outcome.score_a,
                score_b: outcome.score_b,
            },
        )
        .await;

        self.propagate_outcome(&outcome).await;

        Ok(m)
    }

    async fn propagate_outcome(&self, outcome: &MatchOutcome) {
        if let Err(e) = self
            .leaderboard
            .apply_match_result(
                &outcome.league_id,
                &outcome.team_a,
                &outcome.team_b,
                outcome.score_a,
                outcome.score_b,
            )
            .await
        {
            error!(
                match_id = %outcome.match_id,
                league_id = %outcome.league_id,
                error = %e,
                "Standings update failed after finalize; needs reconciliation"
            );
        }

        let Some(winner) = &outcome.winning_team else {
            return;
        };

        let roster = match self.registry.get_team(winner).await {
            Ok(Some(team)) => team.player_ids,
            Ok(None) => {
                warn!(team_id = %winner, "Winning team missing from registry; crediting team only");
                Vec::new()
            }
            Err(e) => {
                error!(team_id = %winner, error = %e, "Roster lookup failed; crediting team only");
                Vec::new()
            }
        };

        if let Err(e) = self
            .career
            .record_game_win(winner, &roster, outcome.format)
            .await
        {
            error!(
                match_id = %outcome.match_id,
                team_id = %winner,
                error = %e,
                "Career game-win update failed after finalize; needs reconciliation"
            );
        }
    }

    async fn forward_career_deltas(
        &self,
        m: &Match,
        request: &SubmitStatsRequest,
        merged: &MergeOutcome,
    ) {
        let player_delta = CareerDelta {
            league_id: m.league_id.clone(),
            stats: merged.stats_delta,
            points: merged.points_delta,
            first_line_in_match: merged.first_line_for_player,
        };
        if let Err(e) = self
            .career
            .apply_player_delta(&request.player_id, &player_delta)
            .await
        {
            error!(player_id = %request.player_id, error = %e, "Player career update failed");
        }

        let team_delta = CareerDelta {
            first_line_in_match: merged.first_line_for_team,
            ..player_delta
        };
        if let Err(e) = self
            .career
            .apply_team_delta(&request.team_id, &team_delta)
            .await
        {
            error!(team_id = %request.team_id, error = %e, "Team career update failed");
        }
    }

    async fn require_team(&self, team_id: &str) -> Result<TeamInfo, AppError> {
        self.registry
            .get_team(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))
    }

    async fn require_rostered(&self, team_id: &str, player_id: &str) -> Result<(), AppError> {
        let team = self.require_team(team_id).await?;
        if !team.has_player(player_id) {
            return Err(AppError::NotFound(format!(
                "Player {} is not on the roster of team {}",
                player_id, team_id
            )));
        }
        Ok(())
    }

    async fn emit(&self, m: &Match, event: LeagueEvent) {
        self.event_bus.emit_to_league(&m.league_id, event).await;
    }
}

fn current_lines(m: &Match, request: &SubmitStatsRequest) -> StatSubmissionResult {
    let side = m.side(&request.team_id);
    let player_line = side
        .and_then(|side| side.player_line(&request.player_id))
        .cloned()
        .unwrap_or_else(|| PlayerStatLine::new(&request.team_id, &request.player_id, Utc::now()));
    let team_line = side
        .map(|side| side.team_stats.clone())
        .unwrap_or_default();

    StatSubmissionResult {
        player_line,
        team_line,
        applied: false,
    }
}
