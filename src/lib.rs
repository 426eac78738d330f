// Library crate for the flag-football league engine
// This file exposes the public API for the binary and integration tests

pub mod career;
pub mod config;
pub mod event;
pub mod leaderboard;
pub mod matches;
pub mod registry;
pub mod routes;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{EngineConfig, PointsConfig};
pub use event::{EventBus, LeagueEvent, LeagueSubscription};
pub use matches::{Match, MatchService, MatchStatus};
pub use registry::{InMemoryLeagueRegistry, LeagueInfo, LeagueRegistry, MatchFormat, TeamInfo};
pub use routes::build_router;
pub use shared::{AppError, AppState};
