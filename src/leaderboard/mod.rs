// Public API - what other modules can use
pub use handlers::{get_standings, register_team};
pub use models::{MatchResult, RankedStanding, StandingEntry, StandingsResponse};
pub use ranking::rank_standings;
pub use repository::{InMemoryStandingsRepository, StandingsRepository};
pub use service::LeaderboardService;

// Internal modules
mod handlers;
pub mod models;
mod ranking;
pub mod repository;
mod service;
pub mod types;
