//! # REST API for Behavior Logs
//!
//! Checklist toggles write through the upsert endpoint; the delete
//! endpoint is the explicit way to return a day to "unmarked".

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::{error_response, mappers, AppState};
use crate::domain::commands::logs::{DeleteLogCommand, LogRangeQuery, UpsertLogCommand};
use shared::{DeleteLogRequest, DeleteLogResponse, UpsertLogRequest};

/// Create a router for log related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(query_logs).put(upsert_log).delete(delete_log))
}

/// Write the single log row for (behavior, date)
async fn upsert_log(
    State(state): State<AppState>,
    Json(request): Json<UpsertLogRequest>,
) -> impl IntoResponse {
    info!("PUT /api/logs - request: {:?}", request);

    let command = UpsertLogCommand {
        behavior_id: request.behavior_id,
        date: request.date,
        completed: request.completed,
        note: request.note,
    };
    match state.log_service.upsert_log(&state.user_id, command).await {
        Ok(log) => Json(mappers::to_log_dto(log)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Remove the log row for (behavior, date)
async fn delete_log(
    State(state): State<AppState>,
    Json(request): Json<DeleteLogRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/logs - request: {:?}", request);

    let command = DeleteLogCommand {
        behavior_id: request.behavior_id,
        date: request.date,
    };
    match state.log_service.delete_log(&state.user_id, command).await {
        Ok(deleted) => Json(DeleteLogResponse { deleted }).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct LogQueryParams {
    start: NaiveDate,
    end: NaiveDate,
    /// Comma-separated behavior ids; all behaviors when omitted
    behavior_ids: Option<String>,
    #[serde(default)]
    include_archived: bool,
}

/// Query logs by date range
async fn query_logs(
    State(state): State<AppState>,
    Query(params): Query<LogQueryParams>,
) -> impl IntoResponse {
    info!("GET /api/logs - params: {:?}", params);

    let behavior_ids = params.behavior_ids.map(|raw| {
        raw.split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>()
    });

    let query = LogRangeQuery {
        behavior_ids,
        start: params.start,
        end: params.end,
        include_archived: params.include_archived,
    };
    match state.log_service.query_logs(&state.user_id, query).await {
        Ok(logs) => {
            Json(logs.into_iter().map(mappers::to_log_dto).collect::<Vec<_>>()).into_response()
        }
        Err(e) => error_response(e),
    }
}
