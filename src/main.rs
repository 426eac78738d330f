use std::sync::Arc;

use flagleague::{
    build_router,
    event::{LoggingNotificationSink, NotificationSubscriber},
    registry::RegistrySeed,
    AppState, EngineConfig, EventBus, InMemoryLeagueRegistry, LeagueSubscription,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagleague=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env();
    info!(
        bind_addr = %config.bind_addr,
        win_points = config.points.win,
        draw_points = config.points.draw,
        loss_points = config.points.loss,
        "Starting flag league engine"
    );

    let registry = Arc::new(InMemoryLeagueRegistry::new());
    if let Some(path) = &config.registry_file {
        match load_registry_seed(path).await {
            Ok(seed) => {
                info!(
                    path = %path,
                    leagues = seed.leagues.len(),
                    teams = seed.teams.len(),
                    "Loaded registry seed"
                );
                registry.load_seed(seed).await;
            }
            Err(e) => {
                error!(path = %path, error = %e, "Failed to load registry seed");
                return;
            }
        }
    }

    let event_bus = EventBus::new(config.event_capacity);

    let notifications = Arc::new(NotificationSubscriber::new(Arc::new(LoggingNotificationSink)));
    let _notification_handle = LeagueSubscription::for_all_leagues(notifications, event_bus.clone())
        .start()
        .await;

    let app_state = AppState::in_memory(registry, config.points, event_bus);
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %config.bind_addr, error = %e, "Failed to bind listener");
            return;
        }
    };

    info!("Server running on http://{}", config.bind_addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server terminated with error");
    }
}

async fn load_registry_seed(path: &str) -> Result<RegistrySeed, Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
