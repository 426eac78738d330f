use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::{StandingEntry, StandingsResponse},
    types::RegisterTeamRequest,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for the ranked standings table
///
/// GET /leagues/:league_id/standings
#[instrument(name = "get_standings", skip(state))]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<StandingsResponse>, AppError> {
    let table = state.leaderboard_service.compute_standings(&league_id).await?;

    info!(league_id = %league_id, teams = table.standings.len(), "Standings computed");

    Ok(Json(table))
}

/// POST /leagues/:league_id/teams
#[instrument(name = "register_team", skip(state))]
pub async fn register_team(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Json(request): Json<RegisterTeamRequest>,
) -> Result<Json<StandingEntry>, AppError> {
    let entry = state
        .leaderboard_service
        .register_team(&league_id, &request.team_id)
        .await?;
    Ok(Json(entry))
}
