use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_tracker_backend::domain::{BehaviorService, DashboardService, LogService};
use habit_tracker_backend::rest::{self, AppState};
use habit_tracker_backend::storage::sqlite::{
    DbConnection, SqliteBehaviorLogRepository, SqliteBehaviorRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    let behavior_repo = Arc::new(SqliteBehaviorRepository::new(db.clone()));
    let log_repo = Arc::new(SqliteBehaviorLogRepository::new(db));

    // Single-user deployment; the owner id is configurable for shared dbs.
    let user_id = std::env::var("HABIT_TRACKER_USER").unwrap_or_else(|_| "local".to_string());

    let state = AppState {
        behavior_service: BehaviorService::new(behavior_repo.clone()),
        log_service: LogService::new(behavior_repo.clone(), log_repo.clone()),
        dashboard_service: DashboardService::new(behavior_repo, log_repo),
        user_id,
    };

    // CORS setup to allow the frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", rest::router())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
