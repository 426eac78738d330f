use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{career, leaderboard, matches, shared::AppState};

/// All HTTP routes of the league engine
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/matches", post(matches::create_match))
        .route("/matches/:match_id", get(matches::get_match))
        .route("/matches/:match_id/start", post(matches::start_match))
        .route("/matches/:match_id/coin-toss", post(matches::coin_toss))
        .route("/matches/:match_id/actions", post(matches::record_action))
        .route("/matches/:match_id/switch", post(matches::switch_sides))
        .route("/matches/:match_id/officials", post(matches::assign_officials))
        .route("/matches/:match_id/stats", post(matches::submit_stats))
        .route("/matches/:match_id/stats/review", post(matches::review_stats))
        .route("/matches/:match_id/finalize", post(matches::finalize_match))
        .route(
            "/leagues/:league_id/matches",
            get(matches::list_league_matches),
        )
        .route(
            "/leagues/:league_id/standings",
            get(leaderboard::get_standings),
        )
        .route("/leagues/:league_id/teams", post(leaderboard::register_team))
        .route("/leagues/:league_id/winner", post(career::set_league_winner))
        .route("/players/:player_id/career", get(career::get_player_career))
        .route("/teams/:team_id/career", get(career::get_team_career))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
