// League/team registry collaborator
//
// Leagues, teams and rosters are owned by the surrounding system. The engine
// only reads snapshots of them through `LeagueRegistry`.

// Public API - what other modules can use
pub use models::{LeagueInfo, MatchFormat, RegistrySeed, TeamInfo};
pub use repository::{InMemoryLeagueRegistry, LeagueRegistry};

// Internal modules
mod models;
mod repository;
