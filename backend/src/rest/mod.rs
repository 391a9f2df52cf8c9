//! JSON realization of the engine's outward interfaces.
//!
//! Thin handlers: map the `shared` DTOs to domain commands, call the
//! service, and map the typed domain errors to status codes. The domain
//! itself knows nothing about HTTP.

pub mod behavior_apis;
pub mod dashboard_apis;
pub mod log_apis;
pub mod mappers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::domain::{BehaviorService, DashboardService, DomainError, LogService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub behavior_service: BehaviorService,
    pub log_service: LogService,
    pub dashboard_service: DashboardService,
    /// Owner of all data served by this instance (single-user deployment)
    pub user_id: String,
}

/// Create the API router mounted under /api
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/behaviors", behavior_apis::router())
        .nest("/logs", log_apis::router())
        .merge(dashboard_apis::router())
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::InvalidRange { .. }
        | DomainError::RangeTooLarge { .. }
        | DomainError::InvalidPeriod(_)
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::InactiveBehavior(_) | DomainError::DuplicateName(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a typed domain error to an HTTP response
pub fn error_response(error: DomainError) -> Response {
    let status = status_for(&error);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("storage failure: {:#}", error);
        (status, "Internal error".to_string()).into_response()
    } else {
        (status, error.to_string()).into_response()
    }
}
