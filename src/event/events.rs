use serde::{Deserialize, Serialize};

use crate::matches::{ActionType, OfficialRole, TimesSwitched};

/// Events that can occur in a league
///
/// Events represent facts about things that have already happened.
/// They are emitted after the owning document has been written and are
/// consumed fire-and-forget by notification and broadcast subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeagueEvent {
    /// A match went live (kickoff or first scoring action)
    MatchStarted { match_id: String },

    /// A scoring action was appended to a side's ledger
    ActionRecorded {
        match_id: String,
        team_id: String,
        player_id: String,
        action: ActionType,
        points: u32,
        score: u32,
    },

    /// Half-time, full-time or overtime marker applied
    SidesSwitched {
        match_id: String,
        marker: TimesSwitched,
    },

    /// A referee or stat-keeper was assigned to a match
    OfficialAssigned {
        match_id: String,
        user_id: String,
        role: OfficialRole,
    },

    /// A stat-keeper submission is waiting for approval
    StatsSubmitted {
        match_id: String,
        team_id: String,
        player_id: String,
        stat_keeper_id: Option<String>,
    },

    /// A side's box score was approved or rejected
    StatsReviewed {
        match_id: String,
        team_id: String,
        approved: bool,
        reason: Option<String>,
    },

    /// The match moved to Completed
    MatchFinalized {
        match_id: String,
        winning_team: Option<String>,
        score_a: u32,
        score_b: u32,
    },

    /// Standings changed after a result was applied
    StandingsUpdated { league_id: String },

    /// A team was accepted into the league and has a standings row
    TeamJoinedLeague { league_id: String, team_id: String },

    /// A champion was designated for the season
    LeagueWinnerSet { league_id: String, team_id: String },
}

impl LeagueEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            LeagueEvent::MatchStarted { .. } => "match_started",
            LeagueEvent::ActionRecorded { .. } => "action_recorded",
            LeagueEvent::SidesSwitched { .. } => "sides_switched",
            LeagueEvent::OfficialAssigned { .. } => "official_assigned",
            LeagueEvent::StatsSubmitted { .. } => "stats_submitted",
            LeagueEvent::StatsReviewed { .. } => "stats_reviewed",
            LeagueEvent::MatchFinalized { .. } => "match_finalized",
            LeagueEvent::StandingsUpdated { .. } => "standings_updated",
            LeagueEvent::TeamJoinedLeague { .. } => "team_joined_league",
            LeagueEvent::LeagueWinnerSet { .. } => "league_winner_set",
        }
    }

    /// Whether the surrounding system wants a user-facing notification for this event
    pub fn is_notifiable(&self) -> bool {
        matches!(
            self,
            LeagueEvent::OfficialAssigned { .. }
                | LeagueEvent::StatsSubmitted { .. }
                | LeagueEvent::StatsReviewed { .. }
                | LeagueEvent::TeamJoinedLeague { .. }
        )
    }
}
