use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::models::{ActionRecord, Match, MatchStatus, TimesSwitched};
use crate::registry::MatchFormat;
use crate::stats::{PlayerStatLine, StatLine, TeamStatLine};

/// Request payload for scheduling a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub league_id: String,
    pub format: MatchFormat,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub venue: String,
    pub team_a_id: String,
    pub team_b_id: String,
}

/// Request payload for recording a scoring play.
/// `action_type` is parsed into `ActionType` at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordActionRequest {
    pub team_id: String,
    pub player_id: String,
    pub action_type: String,
    pub period: Option<u8>,
}

/// Stat-keeper submission for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitStatsRequest {
    pub team_id: String,
    pub player_id: String,
    #[serde(default)]
    pub stats: StatLine,
    /// Idempotency token; a repeated id is not merged again
    pub submission_id: Option<String>,
    pub stat_keeper_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchSidesRequest {
    pub marker: TimesSwitched,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinTossRequest {
    /// Team that starts on offense; random when omitted
    pub offense_team_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignOfficialsRequest {
    pub referee_id: Option<String>,
    pub stat_keeper_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewStatsRequest {
    pub team_id: String,
    pub approved: bool,
    pub reason: Option<String>,
}

/// Match document plus its derived status. Applied submission ids stay
/// on the stored document and are not echoed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub status: MatchStatus,
    #[serde(flatten)]
    pub details: Match,
}

impl From<Match> for MatchResponse {
    fn from(mut details: Match) -> Self {
        details.applied_submissions.clear();
        Self {
            status: details.status(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: ActionRecord,
    pub score: u32,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSubmissionResult {
    pub player_line: PlayerStatLine,
    pub team_line: TeamStatLine,
    /// False when the submission id had already been applied
    pub applied: bool,
}
