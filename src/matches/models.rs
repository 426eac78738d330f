use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::Display;

use super::{actions::ActionType, types::CreateMatchRequest};
use crate::registry::MatchFormat;
use crate::shared::AppError;
use crate::stats::{PlayerStatLine, TeamStatLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Offense,
    Defense,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Offense => Side::Defense,
            Side::Defense => Side::Offense,
        }
    }
}

/// Last side-switch marker applied to a match. Markers only move forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TimesSwitched {
    #[default]
    None,
    HalfTime,
    FullTime,
    Overtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OfficialRole {
    Referee,
    StatKeeper,
}

/// Approval state of a side's box score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatReview {
    Pending,
    Approved,
    Rejected { reason: Option<String> },
}

/// One immutable scoring event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub sequence: u32, // 1-based position in the side's ledger
    pub player_id: String,
    pub action: ActionType,
    pub points: u32,
    pub recorded_at: DateTime<Utc>,
    pub period: Option<u8>,
}

/// One of the two teams playing a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSide {
    pub team_id: String,
    pub side: Side,
    pub actions: Vec<ActionRecord>,
    pub player_stats: Vec<PlayerStatLine>,
    pub team_stats: TeamStatLine,
    pub score: u32,
    pub win: Option<bool>,
    pub stat_review: Option<StatReview>,
}

impl TeamSide {
    pub fn new(team_id: &str, side: Side) -> Self {
        Self {
            team_id: team_id.to_string(),
            side,
            actions: Vec::new(),
            player_stats: Vec::new(),
            team_stats: TeamStatLine {
                team_id: team_id.to_string(),
                ..TeamStatLine::default()
            },
            score: 0,
            win: None,
            stat_review: None,
        }
    }

    /// Sum of the point values in the ledger
    pub fn ledger_points(&self) -> u32 {
        self.actions.iter().map(|record| record.points).sum()
    }

    /// Appends a scoring play and moves the score with it
    pub fn append_action(
        &mut self,
        player_id: &str,
        action: ActionType,
        period: Option<u8>,
        now: DateTime<Utc>,
    ) -> ActionRecord {
        let record = ActionRecord {
            sequence: self.actions.len() as u32 + 1,
            player_id: player_id.to_string(),
            action,
            points: action.points(),
            recorded_at: now,
            period,
        };

        self.actions.push(record.clone());
        self.score += record.points;
        debug_assert_eq!(self.score, self.ledger_points());

        record
    }

    pub fn player_line(&self, player_id: &str) -> Option<&PlayerStatLine> {
        self.player_stats
            .iter()
            .find(|line| line.player_id == player_id)
    }
}

/// A scheduled or played fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub league_id: String,
    pub format: MatchFormat,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub venue: String,
    pub side_a: TeamSide,
    pub side_b: TeamSide,
    pub times_switched: TimesSwitched,
    pub kicked_off_at: Option<DateTime<Utc>>,
    pub winning_team: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub referee_id: Option<String>,
    pub stat_keeper_id: Option<String>,
    /// Submission ids already merged into this match's box scores
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub applied_submissions: HashSet<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Creates an upcoming match; side A starts on offense until a coin toss says otherwise
    pub fn new(id: String, request: &CreateMatchRequest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            league_id: request.league_id.clone(),
            format: request.format,
            scheduled_date: request.scheduled_date,
            scheduled_time: request.scheduled_time,
            venue: request.venue.clone(),
            side_a: TeamSide::new(&request.team_a_id, Side::Offense),
            side_b: TeamSide::new(&request.team_b_id, Side::Defense),
            times_switched: TimesSwitched::None,
            kicked_off_at: None,
            winning_team: None,
            completed_at: None,
            referee_id: None,
            stat_keeper_id: None,
            applied_submissions: HashSet::new(),
            version: 0,
            created_at: now,
        }
    }

    /// Lifecycle status, derived from the document rather than stored
    pub fn status(&self) -> MatchStatus {
        if self.completed_at.is_some() {
            MatchStatus::Completed
        } else if self.kicked_off_at.is_some() || self.has_actions() {
            MatchStatus::Live
        } else {
            MatchStatus::Upcoming
        }
    }

    pub fn has_actions(&self) -> bool {
        !self.side_a.actions.is_empty() || !self.side_b.actions.is_empty()
    }

    pub fn side(&self, team_id: &str) -> Option<&TeamSide> {
        [&self.side_a, &self.side_b]
            .into_iter()
            .find(|side| side.team_id == team_id)
    }

    pub fn side_mut(&mut self, team_id: &str) -> Option<&mut TeamSide> {
        if self.side_a.team_id == team_id {
            Some(&mut self.side_a)
        } else if self.side_b.team_id == team_id {
            Some(&mut self.side_b)
        } else {
            None
        }
    }

    /// Like `side_mut`, but a team outside the match is a validation error
    pub fn require_side_mut(&mut self, team_id: &str) -> Result<&mut TeamSide, AppError> {
        let match_id = self.id.clone();
        self.side_mut(team_id).ok_or_else(|| {
            AppError::Validation(format!(
                "Team {} is not playing in match {}",
                team_id, match_id
            ))
        })
    }
}

/// Upcoming 7v7 match between teams "a" and "b"
#[cfg(test)]
pub(crate) fn sample_match() -> Match {
    Match::new(
        "match-1".to_string(),
        &CreateMatchRequest {
            league_id: "league".into(),
            format: MatchFormat::SevenVSeven,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            venue: "Field 2".into(),
            team_a_id: "a".into(),
            team_b_id: "b".into(),
        },
        Utc::now(),
    )
}
