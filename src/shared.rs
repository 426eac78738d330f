use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use crate::career::{CareerService, InMemoryCareerRepository};
use crate::config::PointsConfig;
use crate::event::EventBus;
use crate::leaderboard::{InMemoryStandingsRepository, LeaderboardService};
use crate::matches::{InMemoryMatchRepository, MatchService};
use crate::registry::LeagueRegistry;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub match_service: Arc<MatchService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub career_service: Arc<CareerService>,
}

impl AppState {
    pub fn new(
        match_service: Arc<MatchService>,
        leaderboard_service: Arc<LeaderboardService>,
        career_service: Arc<CareerService>,
    ) -> Self {
        Self {
            match_service,
            leaderboard_service,
            career_service,
        }
    }

    /// Wires every service over in-memory repositories sharing one event bus
    pub fn in_memory(
        registry: Arc<dyn LeagueRegistry>,
        points: PointsConfig,
        event_bus: EventBus,
    ) -> Self {
        let leaderboard_service = Arc::new(LeaderboardService::new(
            Arc::new(InMemoryStandingsRepository::new()),
            registry.clone(),
            event_bus.clone(),
            points,
        ));
        let career_service = Arc::new(CareerService::new(
            Arc::new(InMemoryCareerRepository::new()),
            registry.clone(),
            event_bus.clone(),
        ));
        let match_service = Arc::new(MatchService::new(
            Arc::new(InMemoryMatchRepository::new()),
            registry,
            leaderboard_service.clone(),
            career_service.clone(),
            event_bus,
        ));

        Self::new(match_service, leaderboard_service, career_service)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Already finalized: {0}")]
    AlreadyFinalized(String),

    /// Optimistic version check failed; the caller read a stale document
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Stable machine-readable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InvalidState(_) => "invalid_state",
            AppError::Validation(_) => "validation_error",
            AppError::AlreadyFinalized(_) => "already_finalized",
            AppError::Conflict(_) => "conflict",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AlreadyFinalized(msg) => (StatusCode::CONFLICT, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Lazily created async mutexes keyed by document id.
///
/// Serializes read-modify-write sequences on a single match or league
/// without blocking unrelated keys.
#[derive(Debug, Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_for(&self, key: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.locks.read().await;
            if let Some(lock) = guard.get(key) {
                return lock.clone();
            }
        }

        let mut guard = self.locks.write().await;
        guard
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
