use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::point_values;

/// Box-score counters shared by player lines, team lines, submissions and career totals.
///
/// Counters are signed so that a submission can carry a correction; merged
/// totals are never allowed to go below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    pub catches: i32,
    pub receiving_yards: i32,
    pub rushes: i32,
    pub rushing_yards: i32,
    pub pass_attempts: i32,
    pub completions: i32,
    pub passing_yards: i32,
    pub touchdowns: i32,
    pub defensive_touchdowns: i32,
    pub conversions: i32,
    pub safeties: i32,
    pub interceptions: i32,
    pub sacks: i32,
    pub flag_pulls: i32,
    pub turnovers: i32,
}

impl StatLine {
    /// Points contributed by the scoring counters, or `None` on overflow.
    /// Yardage and attempt counters are box-score only and score nothing.
    pub fn checked_total_points(&self) -> Option<i32> {
        [
            (self.touchdowns, point_values::TOUCHDOWN),
            (self.defensive_touchdowns, point_values::DEFENSIVE_TOUCHDOWN),
            (self.conversions, point_values::CONVERSION),
            (self.safeties, point_values::SAFETY),
        ]
        .into_iter()
        .try_fold(0i32, |total, (count, value)| {
            total.checked_add(count.checked_mul(value)?)
        })
    }

    /// Named view of every counter, in declaration order
    pub fn counters(&self) -> [(&'static str, i32); 15] {
        [
            ("catches", self.catches),
            ("receiving_yards", self.receiving_yards),
            ("rushes", self.rushes),
            ("rushing_yards", self.rushing_yards),
            ("pass_attempts", self.pass_attempts),
            ("completions", self.completions),
            ("passing_yards", self.passing_yards),
            ("touchdowns", self.touchdowns),
            ("defensive_touchdowns", self.defensive_touchdowns),
            ("conversions", self.conversions),
            ("safeties", self.safeties),
            ("interceptions", self.interceptions),
            ("sacks", self.sacks),
            ("flag_pulls", self.flag_pulls),
            ("turnovers", self.turnovers),
        ]
    }

    pub fn is_zero(&self) -> bool {
        *self == StatLine::default()
    }

    /// First counter below zero, if any
    pub fn first_negative(&self) -> Option<(&'static str, i32)> {
        self.counters().into_iter().find(|(_, value)| *value < 0)
    }

    /// Field-wise sum. Fails with the name of the first counter that
    /// leaves the `i32` range.
    pub fn checked_add(self, other: StatLine) -> Result<StatLine, &'static str> {
        let add = |field: &'static str, a: i32, b: i32| a.checked_add(b).ok_or(field);

        Ok(StatLine {
            catches: add("catches", self.catches, other.catches)?,
            receiving_yards: add("receiving_yards", self.receiving_yards, other.receiving_yards)?,
            rushes: add("rushes", self.rushes, other.rushes)?,
            rushing_yards: add("rushing_yards", self.rushing_yards, other.rushing_yards)?,
            pass_attempts: add("pass_attempts", self.pass_attempts, other.pass_attempts)?,
            completions: add("completions", self.completions, other.completions)?,
            passing_yards: add("passing_yards", self.passing_yards, other.passing_yards)?,
            touchdowns: add("touchdowns", self.touchdowns, other.touchdowns)?,
            defensive_touchdowns: add(
                "defensive_touchdowns",
                self.defensive_touchdowns,
                other.defensive_touchdowns,
            )?,
            conversions: add("conversions", self.conversions, other.conversions)?,
            safeties: add("safeties", self.safeties, other.safeties)?,
            interceptions: add("interceptions", self.interceptions, other.interceptions)?,
            sacks: add("sacks", self.sacks, other.sacks)?,
            flag_pulls: add("flag_pulls", self.flag_pulls, other.flag_pulls)?,
            turnovers: add("turnovers", self.turnovers, other.turnovers)?,
        })
    }
}

/// Per-player, per-match box score. At most one per player per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: String,
    pub team_id: String,
    pub stats: StatLine,
    pub total_points: i32,
    pub submissions: u32,
    pub last_submitted_at: DateTime<Utc>,
}

impl PlayerStatLine {
    pub fn new(team_id: &str, player_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            player_id: player_id.to_string(),
            team_id: team_id.to_string(),
            stats: StatLine::default(),
            total_points: 0,
            submissions: 0,
            last_submitted_at: now,
        }
    }
}

/// Field-wise sum of a side's player lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStatLine {
    pub team_id: String,
    pub stats: StatLine,
    pub total_points: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatLine { touchdowns: 1, ..StatLine::default() }, 6)]
    #[case(StatLine { touchdowns: 2, ..StatLine::default() }, 12)]
    #[case(StatLine { defensive_touchdowns: 1, safeties: 1, ..StatLine::default() }, 8)]
    #[case(StatLine { conversions: 3, ..StatLine::default() }, 3)]
    #[case(StatLine { receiving_yards: 140, catches: 9, rushes: 4, ..StatLine::default() }, 0)]
    fn total_points_counts_only_scoring_fields(#[case] line: StatLine, #[case] expected: i32) {
        assert_eq!(line.checked_total_points(), Some(expected));
    }

    #[test]
    fn total_points_overflow_is_none() {
        let line = StatLine {
            touchdowns: 400_000_000,
            ..StatLine::default()
        };
        assert_eq!(line.checked_total_points(), None);
    }

    #[test]
    fn add_is_fieldwise() {
        let a = StatLine {
            catches: 3,
            receiving_yards: 40,
            touchdowns: 1,
            ..StatLine::default()
        };
        let b = StatLine {
            catches: 2,
            receiving_yards: -5,
            ..StatLine::default()
        };

        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum.catches, 5);
        assert_eq!(sum.receiving_yards, 35);
        assert_eq!(sum.touchdowns, 1);

        let huge = StatLine {
            passing_yards: i32::MAX,
            ..StatLine::default()
        };
        assert_eq!(huge.checked_add(huge), Err("passing_yards"));
    }

    #[test]
    fn finds_negative_counters() {
        let line = StatLine {
            sacks: -1,
            ..StatLine::default()
        };
        assert_eq!(line.first_negative(), Some(("sacks", -1)));
        assert_eq!(StatLine::default().first_negative(), None);
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let line: StatLine = serde_json::from_str(r#"{"touchdowns": 1}"#).unwrap();
        assert_eq!(line.touchdowns, 1);
        assert_eq!(line.catches, 0);
    }
}
