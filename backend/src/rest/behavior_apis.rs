//! # REST API for Behavior Management
//!
//! Endpoints for creating, listing, updating, reordering, and archiving
//! behavior definitions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::{error_response, mappers, AppState};
use crate::domain::commands::behavior::{
    CreateBehaviorCommand, ListBehaviorsQuery, ReorderBehaviorsCommand, UpdateBehaviorCommand,
};
use shared::{
    BehaviorListResponse, CreateBehaviorRequest, ReorderBehaviorsRequest, UpdateBehaviorRequest,
};

/// Create a router for behavior related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_behaviors).post(create_behavior))
        .route("/reorder", put(reorder_behaviors))
        .route("/:id", put(update_behavior).delete(archive_behavior))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    include_archived: bool,
}

/// List behaviors, active only unless include_archived is set
async fn list_behaviors(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    info!("GET /api/behaviors");

    let query = ListBehaviorsQuery {
        include_archived: params.include_archived,
    };
    match state
        .behavior_service
        .list_behaviors(&state.user_id, query)
        .await
    {
        Ok(behaviors) => Json(BehaviorListResponse {
            behaviors: behaviors.into_iter().map(mappers::to_behavior_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a new behavior definition
async fn create_behavior(
    State(state): State<AppState>,
    Json(request): Json<CreateBehaviorRequest>,
) -> impl IntoResponse {
    info!("POST /api/behaviors - request: {:?}", request);

    let command = CreateBehaviorCommand {
        name: request.name,
        description: request.description,
        category: mappers::from_category_dto(request.category),
        icon: request.icon,
        color: request.color,
        target_frequency: request.target_frequency,
        display_order: request.display_order,
    };

    match state
        .behavior_service
        .create_behavior(&state.user_id, command)
        .await
    {
        Ok(behavior) => {
            (StatusCode::CREATED, Json(mappers::to_behavior_dto(behavior))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Update an existing behavior
async fn update_behavior(
    State(state): State<AppState>,
    Path(behavior_id): Path<String>,
    Json(request): Json<UpdateBehaviorRequest>,
) -> impl IntoResponse {
    info!("PUT /api/behaviors/{} - request: {:?}", behavior_id, request);

    let command = UpdateBehaviorCommand {
        behavior_id,
        name: request.name,
        description: request.description,
        category: request.category.map(mappers::from_category_dto),
        icon: request.icon,
        color: request.color,
        target_frequency: request.target_frequency,
        display_order: request.display_order,
    };

    match state
        .behavior_service
        .update_behavior(&state.user_id, command)
        .await
    {
        Ok(behavior) => Json(mappers::to_behavior_dto(behavior)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Apply a full manual ordering to the active behaviors
async fn reorder_behaviors(
    State(state): State<AppState>,
    Json(request): Json<ReorderBehaviorsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/behaviors/reorder - {} ids", request.behavior_ids.len());

    let command = ReorderBehaviorsCommand {
        behavior_ids: request.behavior_ids,
    };
    match state
        .behavior_service
        .reorder_behaviors(&state.user_id, command)
        .await
    {
        Ok(behaviors) => Json(BehaviorListResponse {
            behaviors: behaviors.into_iter().map(mappers::to_behavior_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Soft-delete a behavior; its logs remain queryable
async fn archive_behavior(
    State(state): State<AppState>,
    Path(behavior_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/behaviors/{}", behavior_id);

    match state
        .behavior_service
        .archive_behavior(&state.user_id, &behavior_id)
        .await
    {
        Ok(behavior) => Json(mappers::to_behavior_dto(behavior)).into_response(),
        Err(e) => error_response(e),
    }
}
