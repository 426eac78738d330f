use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{
    ActionResponse, AssignOfficialsRequest, CoinTossRequest, CreateMatchRequest, MatchResponse,
    RecordActionRequest, ReviewStatsRequest, StatSubmissionResult, SubmitStatsRequest,
    SwitchSidesRequest,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for scheduling a match
///
/// POST /matches
/// Returns the new match with a generated ID
#[instrument(name = "create_match", skip(state, request))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    info!(league_id = %request.league_id, venue = %request.venue, "Creating new match");

    let m = state.match_service.create_match(request).await?;

    Ok(Json(m.into()))
}

/// GET /matches/:match_id
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state.match_service.get_match(&match_id).await?;
    Ok(Json(m.into()))
}

/// GET /leagues/:league_id/matches
#[instrument(name = "list_league_matches", skip(state))]
pub async fn list_league_matches(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<Vec<MatchResponse>>, AppError> {
    let matches = state.match_service.list_league_matches(&league_id).await?;
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

/// POST /matches/:match_id/start
#[instrument(name = "start_match", skip(state))]
pub async fn start_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state.match_service.start_match(&match_id).await?;
    Ok(Json(m.into()))
}

/// POST /matches/:match_id/coin-toss
///
/// The body is optional; without one the offense is picked at random.
#[instrument(name = "coin_toss", skip(state, request))]
pub async fn coin_toss(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    request: Option<Json<CoinTossRequest>>,
) -> Result<Json<MatchResponse>, AppError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let m = state.match_service.coin_toss(&match_id, request).await?;
    Ok(Json(m.into()))
}

/// HTTP handler for the referee's scoring plays
///
/// POST /matches/:match_id/actions
#[instrument(name = "record_action", skip(state, request))]
pub async fn record_action(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<RecordActionRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let team_id = request.team_id.clone();
    let (m, action) = state.match_service.record_action(&match_id, request).await?;

    let score = m.side(&team_id).map(|side| side.score).unwrap_or_default();

    Ok(Json(ActionResponse {
        action,
        score,
        status: m.status(),
    }))
}

/// POST /matches/:match_id/switch
#[instrument(name = "switch_sides", skip(state, request))]
pub async fn switch_sides(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SwitchSidesRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state
        .match_service
        .switch_sides(&match_id, request.marker)
        .await?;
    Ok(Json(m.into()))
}

/// POST /matches/:match_id/officials
#[instrument(name = "assign_officials", skip(state, request))]
pub async fn assign_officials(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<AssignOfficialsRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state
        .match_service
        .assign_officials(&match_id, request)
        .await?;
    Ok(Json(m.into()))
}

/// HTTP handler for stat-keeper submissions
///
/// POST /matches/:match_id/stats
/// Merges the delta into the player's line and returns both box-score lines
#[instrument(name = "submit_stats", skip(state, request))]
pub async fn submit_stats(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SubmitStatsRequest>,
) -> Result<Json<StatSubmissionResult>, AppError> {
    let result = state
        .match_service
        .submit_player_stats(&match_id, request)
        .await?;
    Ok(Json(result))
}

/// POST /matches/:match_id/stats/review
#[instrument(name = "review_stats", skip(state, request))]
pub async fn review_stats(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<ReviewStatsRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state.match_service.review_stats(&match_id, request).await?;
    Ok(Json(m.into()))
}

/// HTTP handler for completing a match
///
/// POST /matches/:match_id/finalize
/// A second call answers 409 with kind `already_finalized`
#[instrument(name = "finalize_match", skip(state))]
pub async fn finalize_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let m = state.match_service.finalize(&match_id).await?;

    info!(
        match_id = %m.id,
        winning_team = ?m.winning_team,
        "Match completed"
    );

    Ok(Json(m.into()))
}
