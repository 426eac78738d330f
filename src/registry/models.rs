use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Number of players per side on the field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum MatchFormat {
    #[serde(rename = "5v5")]
    #[strum(serialize = "5v5")]
    FiveVFive,
    #[serde(rename = "7v7")]
    #[strum(serialize = "7v7")]
    SevenVSeven,
}

/// Read-only snapshot of a league
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub id: String,
    pub name: String,
    pub format: MatchFormat,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub team_ids: Vec<String>, // Teams accepted into the league
}

impl LeagueInfo {
    /// Check if a date falls inside the league window (inclusive)
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && date <= self.ends_on
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.team_ids.iter().any(|id| id == team_id)
    }
}

/// Read-only snapshot of a team and its roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub player_ids: Vec<String>,
}

impl TeamInfo {
    pub fn has_player(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }
}

/// Startup snapshot of the registry, as read from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySeed {
    #[serde(default)]
    pub leagues: Vec<LeagueInfo>,
    #[serde(default)]
    pub teams: Vec<TeamInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn format_parses_from_wire_names() {
        assert_eq!(MatchFormat::from_str("5v5").unwrap(), MatchFormat::FiveVFive);
        assert_eq!(MatchFormat::from_str("7v7").unwrap(), MatchFormat::SevenVSeven);
        assert!(MatchFormat::from_str("11v11").is_err());
        assert_eq!(MatchFormat::SevenVSeven.to_string(), "7v7");
    }

    #[test]
    fn league_window_is_inclusive() {
        let league = LeagueInfo {
            id: "l".into(),
            name: "League".into(),
            format: MatchFormat::FiveVFive,
            starts_on: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ends_on: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            team_ids: vec![],
        };

        assert!(league.covers(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(league.covers(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()));
        assert!(!league.covers(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
    }
}
