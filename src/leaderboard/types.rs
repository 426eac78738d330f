use serde::Deserialize;

/// Request payload sent when a team is accepted into a league
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterTeamRequest {
    pub team_id: String,
}
