//! # REST API for Dashboard Views
//!
//! Read-only endpoints consumed by the dashboard UI and the coaching
//! read functions: checklist, stats, trend, and compliance.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use super::{error_response, mappers, AppState};
use shared::{ChecklistResponse, ComplianceResponse, StatsResponse};

const DEFAULT_STATS_WINDOW: i64 = 7;
const DEFAULT_TREND_WINDOW: i64 = 30;

/// Create a router for dashboard related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checklist", get(get_checklist))
        .route("/stats", get(get_stats))
        .route("/trend", get(get_trend))
        .route("/compliance", get(get_compliance))
        .route("/compliance/:behavior_id", get(get_behavior_compliance))
}

#[derive(Debug, Deserialize)]
struct ChecklistParams {
    /// Defaults to the server's local date
    date: Option<NaiveDate>,
}

/// Today's checklist: one row per active behavior
async fn get_checklist(
    State(state): State<AppState>,
    Query(params): Query<ChecklistParams>,
) -> impl IntoResponse {
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());
    info!("GET /api/checklist - date: {}", date);

    match state
        .dashboard_service
        .today_checklist(&state.user_id, date)
        .await
    {
        Ok(items) => Json(ChecklistResponse {
            date,
            rows: items.into_iter().map(mappers::to_checklist_row_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct WindowParams {
    window_days: Option<i64>,
}

/// Rolled-up completion rate and streaks across active behaviors
async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> impl IntoResponse {
    let window_days = params.window_days.unwrap_or(DEFAULT_STATS_WINDOW);
    let today = Local::now().date_naive();
    info!("GET /api/stats - window_days: {}", window_days);

    match state
        .dashboard_service
        .stats(&state.user_id, window_days, today)
        .await
    {
        Ok(stats) => Json(StatsResponse {
            week_completion_rate: stats.completion_rate,
            best_streak: stats.best_streak,
            current_streak: stats.current_streak,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Per-behavior 0/100 series for charting
async fn get_trend(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> impl IntoResponse {
    let window_days = params.window_days.unwrap_or(DEFAULT_TREND_WINDOW);
    let today = Local::now().date_naive();
    info!("GET /api/trend - window_days: {}", window_days);

    match state
        .dashboard_service
        .trend(&state.user_id, window_days, today)
        .await
    {
        Ok(trend) => Json(mappers::to_trend_response_dto(trend)).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct ComplianceParams {
    /// "week" or "month"; anything else is a 400, never a default
    period: String,
}

/// Compliance classification for every active behavior
async fn get_compliance(
    State(state): State<AppState>,
    Query(params): Query<ComplianceParams>,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    info!("GET /api/compliance - period: {}", params.period);

    match state
        .dashboard_service
        .compliance(&state.user_id, &params.period, today)
        .await
    {
        Ok(rows) => Json(ComplianceResponse {
            period: params.period,
            entries: rows.into_iter().map(mappers::to_compliance_entry_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Compliance classification for a single active behavior
async fn get_behavior_compliance(
    State(state): State<AppState>,
    Path(behavior_id): Path<String>,
    Query(params): Query<ComplianceParams>,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    info!(
        "GET /api/compliance/{} - period: {}",
        behavior_id, params.period
    );

    match state
        .dashboard_service
        .behavior_compliance(&state.user_id, &behavior_id, &params.period, today)
        .await
    {
        Ok(row) => Json(mappers::to_compliance_entry_dto(row)).into_response(),
        Err(e) => error_response(e),
    }
}
