use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::Display;

use crate::registry::MatchFormat;
use crate::stats::{StatLine, StatsError};

/// Per-format win counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCounters {
    #[serde(rename = "5v5")]
    pub five_v_five: u32,
    #[serde(rename = "7v7")]
    pub seven_v_seven: u32,
}

impl FormatCounters {
    pub fn increment(&mut self, format: MatchFormat) {
        match format {
            MatchFormat::FiveVFive => self.five_v_five += 1,
            MatchFormat::SevenVSeven => self.seven_v_seven += 1,
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CareerSubject {
    Player,
    Team,
}

/// Lifetime totals for a player or a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    pub subject: CareerSubject,
    pub id: String,
    pub stats: StatLine,
    pub total_points: i32,
    pub matches_played: u32,
    pub leagues_played: u32,
    /// Leagues this subject has a stat line in
    pub leagues: BTreeSet<String>,
    pub games_won: FormatCounters,
    pub leagues_won: FormatCounters,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CareerStats {
    pub fn new(subject: CareerSubject, id: &str) -> Self {
        Self {
            subject,
            id: id.to_string(),
            stats: StatLine::default(),
            total_points: 0,
            matches_played: 0,
            leagues_played: 0,
            leagues: BTreeSet::new(),
            games_won: FormatCounters::default(),
            leagues_won: FormatCounters::default(),
            last_updated: None,
        }
    }

    /// Absorbs one stat submission's delta. Totals are untouched when a
    /// counter would leave the `i32` range.
    pub fn apply_delta(&mut self, delta: &CareerDelta) -> Result<(), StatsError> {
        let stats = self
            .stats
            .checked_add(delta.stats)
            .map_err(|field| StatsError::CounterOverflow { field })?;
        let total_points = self
            .total_points
            .checked_add(delta.points)
            .ok_or(StatsError::CounterOverflow {
                field: "total_points",
            })?;
        self.stats = stats;
        self.total_points = total_points;

        if delta.first_line_in_match {
            self.matches_played += 1;
            if self.leagues.insert(delta.league_id.clone()) {
                self.leagues_played += 1;
            }
        }
        Ok(())
    }
}

/// Signed change forwarded from a stat submission
#[derive(Debug, Clone, PartialEq)]
pub struct CareerDelta {
    pub league_id: String,
    pub stats: StatLine,
    pub points: i32,
    /// First line for this player (or first player line for this team) in the match
    pub first_line_in_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(league_id: &str, first: bool) -> CareerDelta {
        CareerDelta {
            league_id: league_id.to_string(),
            stats: StatLine {
                touchdowns: 1,
                ..StatLine::default()
            },
            points: 6,
            first_line_in_match: first,
        }
    }

    #[test]
    fn matches_and_leagues_count_only_on_first_line() {
        let mut career = CareerStats::new(CareerSubject::Player, "p1");

        career.apply_delta(&delta("spring", true)).unwrap();
        career.apply_delta(&delta("spring", false)).unwrap();
        career.apply_delta(&delta("spring", true)).unwrap();
        career.apply_delta(&delta("autumn", true)).unwrap();

        assert_eq!(career.stats.touchdowns, 4);
        assert_eq!(career.total_points, 24);
        assert_eq!(career.matches_played, 3);
        assert_eq!(career.leagues_played, 2);
    }

    #[test]
    fn format_counters_serialize_by_format_name() {
        let mut counters = FormatCounters::default();
        counters.increment(MatchFormat::FiveVFive);
        let value = serde_json::to_value(counters).unwrap();
        assert_eq!(value["5v5"], 1);
        assert_eq!(value["7v7"], 0);
    }

    #[test]
    fn overflowing_delta_leaves_totals_untouched() {
        let mut career = CareerStats::new(CareerSubject::Team, "t1");
        career.apply_delta(&delta("spring", true)).unwrap();

        let huge = CareerDelta {
            stats: StatLine {
                catches: i32::MAX,
                ..StatLine::default()
            },
            points: 0,
            ..delta("spring", false)
        };
        career.apply_delta(&huge).unwrap();

        let err = career.apply_delta(&huge).unwrap_err();
        assert_eq!(err, StatsError::CounterOverflow { field: "catches" });
        assert_eq!(career.stats.catches, i32::MAX);
        assert_eq!(career.stats.touchdowns, 1);
        assert_eq!(career.matches_played, 1);
    }
}
