// Public API - what other modules can use
pub use actions::ActionType;
pub use handlers::{
    assign_officials, coin_toss, create_match, finalize_match, get_match, list_league_matches,
    record_action, review_stats, start_match, submit_stats, switch_sides,
};
pub use models::{
    ActionRecord, Match, MatchStatus, OfficialRole, Side, StatReview, TeamSide, TimesSwitched,
};
pub use repository::{InMemoryMatchRepository, MatchRepository};
pub use service::MatchService;
pub use state::MatchOutcome;

// Internal modules
mod actions;
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod state;
pub mod types;
