use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

use flagleague::{
    build_router,
    event::NotificationSubscriber,
    AppState, EventBus, InMemoryLeagueRegistry, LeagueInfo, LeagueSubscription, MatchFormat,
    PointsConfig, TeamInfo,
};

use super::mocks::RecordingNotificationSink;

pub const SEASON: &str = "spring-2026";
pub const HOME: &str = "hawks";
pub const VISITORS: &str = "wolves";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub state: AppState,
    pub router: Router,
    pub event_bus: EventBus,
    pub registry: Arc<InMemoryLeagueRegistry>,
    pub notifications: RecordingNotificationSink,
    pub _subscription_handle: JoinHandle<()>,
}

pub struct TestSetupBuilder {
    format: MatchFormat,
    teams: Vec<(String, Vec<String>)>,
    points: PointsConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            format: MatchFormat::SevenVSeven,
            teams: vec![],
            points: PointsConfig::default(),
        }
    }

    pub fn with_format(mut self, format: MatchFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_team(mut self, team_id: &str, players: Vec<&str>) -> Self {
        self.teams.push((
            team_id.to_string(),
            players.into_iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    /// Hawks (h1..h3) and wolves (w1..w3)
    pub fn with_two_teams(self) -> Self {
        self.with_team(HOME, vec!["h1", "h2", "h3"])
            .with_team(VISITORS, vec!["w1", "w2", "w3"])
    }

    pub fn with_draw_points(mut self, draw: i32) -> Self {
        self.points.draw = draw;
        self
    }

    pub async fn build(self) -> TestSetup {
        let registry = Arc::new(InMemoryLeagueRegistry::new());
        registry
            .insert_league(LeagueInfo {
                id: SEASON.to_string(),
                name: "Spring Flag".to_string(),
                format: self.format,
                starts_on: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                ends_on: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
                team_ids: self.teams.iter().map(|(id, _)| id.clone()).collect(),
            })
            .await;

        for (team_id, players) in &self.teams {
            registry
                .insert_team(TeamInfo {
                    id: team_id.clone(),
                    name: team_id.to_uppercase(),
                    player_ids: players.clone(),
                })
                .await;
        }

        let event_bus = EventBus::new(100);
        let notifications = RecordingNotificationSink::new();
        let subscriber = Arc::new(NotificationSubscriber::new(Arc::new(notifications.clone())));
        let _subscription_handle = LeagueSubscription::for_all_leagues(subscriber, event_bus.clone())
            .start()
            .await;

        let state = AppState::in_memory(registry.clone(), self.points, event_bus.clone());
        let router = build_router(state.clone());

        TestSetup {
            state,
            router,
            event_bus,
            registry,
            notifications,
            _subscription_handle,
        }
    }
}
