use chrono::{NaiveDate, NaiveTime};

use flagleague::{
    matches::types::{CreateMatchRequest, RecordActionRequest},
    Match, MatchFormat,
};

use super::setup::{TestSetup, HOME, SEASON, VISITORS};

/// Schedules a match and replays scoring plays through the match service
pub struct MatchBuilder {
    team_a: String,
    team_b: String,
    format: MatchFormat,
    scheduled_date: NaiveDate,
    started: bool,
    actions: Vec<(String, String, String)>,
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self {
            team_a: HOME.to_string(),
            team_b: VISITORS.to_string(),
            format: MatchFormat::SevenVSeven,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 4, 19).unwrap(),
            started: false,
            actions: vec![],
        }
    }

    pub fn between(mut self, team_a: &str, team_b: &str) -> Self {
        self.team_a = team_a.to_string();
        self.team_b = team_b.to_string();
        self
    }

    pub fn in_format(mut self, format: MatchFormat) -> Self {
        self.format = format;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = date;
        self
    }

    /// Kick off explicitly, so the match is live even without plays
    pub fn started(mut self) -> Self {
        self.started = true;
        self
    }

    pub fn with_action(mut self, team_id: &str, player_id: &str, action_type: &str) -> Self {
        self.actions.push((
            team_id.to_string(),
            player_id.to_string(),
            action_type.to_string(),
        ));
        self
    }

    pub fn request(&self) -> CreateMatchRequest {
        CreateMatchRequest {
            league_id: SEASON.to_string(),
            format: self.format,
            scheduled_date: self.scheduled_date,
            scheduled_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            venue: "Memorial Park".to_string(),
            team_a_id: self.team_a.clone(),
            team_b_id: self.team_b.clone(),
        }
    }

    pub async fn build_with_setup(self, setup: &TestSetup) -> Match {
        let service = &setup.state.match_service;
        let mut m = service
            .create_match(self.request())
            .await
            .expect("match should be scheduled");

        if self.started {
            m = service.start_match(&m.id).await.expect("kickoff should succeed");
        }

        for (team_id, player_id, action_type) in self.actions {
            let (updated, _) = service
                .record_action(
                    &m.id,
                    RecordActionRequest {
                        team_id,
                        player_id,
                        action_type,
                        period: Some(1),
                    },
                )
                .await
                .expect("scoring play should be recorded");
            m = updated;
        }

        m
    }
}
