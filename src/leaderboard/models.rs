use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PointsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    pub fn from_scores(scored: u32, against: u32) -> Self {
        match scored.cmp(&against) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}

/// One team's season record within a league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub league_id: String,
    pub team_id: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_scored: i64,
    pub points_against: i64,
    pub point_difference: i64,
    pub league_points: i32,
    pub updated_at: DateTime<Utc>,
}

impl StandingEntry {
    pub fn new(league_id: &str, team_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            league_id: league_id.to_string(),
            team_id: team_id.to_string(),
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points_scored: 0,
            points_against: 0,
            point_difference: 0,
            league_points: 0,
            updated_at: now,
        }
    }

    /// Folds one completed match into the record
    pub fn record(
        &mut self,
        scored: u32,
        against: u32,
        points: &PointsConfig,
        now: DateTime<Utc>,
    ) -> MatchResult {
        let result = MatchResult::from_scores(scored, against);

        self.games_played += 1;
        self.points_scored += i64::from(scored);
        self.points_against += i64::from(against);

        match result {
            MatchResult::Win => {
                self.wins += 1;
                self.league_points += points.win;
            }
            MatchResult::Loss => {
                self.losses += 1;
                self.league_points += points.loss;
            }
            MatchResult::Draw => {
                self.draws += 1;
                self.league_points += points.draw;
            }
        }

        // Invariant: difference == scored - against
        self.point_difference = self.points_scored - self.points_against;
        self.updated_at = now;

        result
    }
}

/// A standings row with its 1-based table position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStanding {
    pub position: usize,
    #[serde(flatten)]
    pub entry: StandingEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub league_id: String,
    pub standings: Vec<RankedStanding>,
}
