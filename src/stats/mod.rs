pub mod aggregator;

mod errors;
pub mod models;

pub use aggregator::{merge_player_stats, team_stat_line, MergeOutcome};
pub use errors::StatsError;
pub use models::*;

/// Points per scoring counter in a box score.
/// Must stay in line with `ActionType::points` on the ledger side.
pub mod point_values {
    pub const TOUCHDOWN: i32 = 6;
    pub const DEFENSIVE_TOUCHDOWN: i32 = 6;
    pub const CONVERSION: i32 = 1;
    pub const SAFETY: i32 = 2;
}
