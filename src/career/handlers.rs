use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{models::CareerStats, types::SetLeagueWinnerRequest};
use crate::shared::{AppError, AppState};

/// GET /players/:player_id/career
#[instrument(name = "get_player_career", skip(state))]
pub async fn get_player_career(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<CareerStats>, AppError> {
    let career = state.career_service.get_player_career(&player_id).await?;
    Ok(Json(career))
}

/// GET /teams/:team_id/career
#[instrument(name = "get_team_career", skip(state))]
pub async fn get_team_career(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<CareerStats>, AppError> {
    let career = state.career_service.get_team_career(&team_id).await?;
    Ok(Json(career))
}

/// HTTP handler for designating a season champion
///
/// POST /leagues/:league_id/winner
/// Returns the winning team's updated career record
#[instrument(name = "set_league_winner", skip(state))]
pub async fn set_league_winner(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Json(request): Json<SetLeagueWinnerRequest>,
) -> Result<Json<CareerStats>, AppError> {
    let career = state
        .career_service
        .set_league_winner(&league_id, &request.team_id)
        .await?;

    info!(league_id = %league_id, team_id = %request.team_id, "League winner recorded");

    Ok(Json(career))
}
