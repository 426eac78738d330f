// Public API - what other modules can use
pub use handlers::{get_player_career, get_team_career, set_league_winner};
pub use models::{CareerDelta, CareerStats, CareerSubject, FormatCounters};
pub use repository::{CareerRepository, InMemoryCareerRepository};
pub use service::CareerService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
