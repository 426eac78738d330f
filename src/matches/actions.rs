use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::shared::AppError;

/// Referee-recorded scoring plays
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    Touchdown,
    DefensiveTouchdown,
    Safety,
    /// Conversion attempted from the 5-yard line
    ExtraPointFiveYard,
    /// Conversion attempted from the 10-yard line
    ExtraPointTenYard,
    /// Conversion attempted from the 20-yard line
    ExtraPointTwentyYard,
    /// Conversion attempt returned by the defense
    DefensiveConversion,
}

impl ActionType {
    /// Fixed point value of the play
    pub fn points(self) -> u32 {
        match self {
            ActionType::Touchdown => 6,
            ActionType::DefensiveTouchdown => 6,
            ActionType::Safety => 2,
            ActionType::ExtraPointFiveYard => 1,
            ActionType::ExtraPointTenYard => 2,
            ActionType::ExtraPointTwentyYard => 3,
            ActionType::DefensiveConversion => 2,
        }
    }

    /// Yard line of an extra-point attempt
    pub fn conversion_distance(self) -> Option<u8> {
        match self {
            ActionType::ExtraPointFiveYard => Some(5),
            ActionType::ExtraPointTenYard => Some(10),
            ActionType::ExtraPointTwentyYard => Some(20),
            _ => None,
        }
    }

    /// Parses a wire name, rejecting anything outside the closed set
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        ActionType::from_str(raw.trim())
            .map_err(|_| AppError::Validation(format!("Unknown action type: {}", raw)))
    }
}
