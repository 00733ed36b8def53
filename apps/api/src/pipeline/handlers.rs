//! Axum route handlers for the pipeline board.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::{group_by_stage, Application, ApplicationStage, BoardView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub company_name: String,
    pub position_title: Option<String>,
    #[serde(default)]
    pub stage: Option<ApplicationStage>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveStageRequest {
    pub stage: ApplicationStage,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(state.applications.list()))
}

/// GET /api/v1/applications/board
pub async fn handle_board(State(state): State<AppState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(group_by_stage(state.applications.list())))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<Application>, AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }

    let now = Utc::now();
    let application = Application {
        id: Uuid::new_v4(),
        company_name: request.company_name,
        position_title: request.position_title,
        stage: request.stage.unwrap_or(ApplicationStage::Interested),
        notes: request.notes,
        tags: request.tags,
        created_at: now,
        updated_at: now,
    };
    state.applications.insert(application.clone());

    Ok(Json(application))
}

/// PATCH /api/v1/applications/:id/stage
pub async fn handle_move_stage(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(request): Json<MoveStageRequest>,
) -> Result<Json<Application>, AppError> {
    state
        .applications
        .move_stage(application_id, request.stage)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.applications.delete(application_id) {
        return Err(AppError::NotFound(format!(
            "Application {application_id} not found"
        )));
    }

    Ok(Json(json!({ "message": "Application deleted successfully" })))
}
