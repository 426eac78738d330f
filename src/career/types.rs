use serde::Deserialize;

/// Request payload for designating a season champion
#[derive(Debug, Clone, Deserialize)]
pub struct SetLeagueWinnerRequest {
    pub team_id: String,
}
