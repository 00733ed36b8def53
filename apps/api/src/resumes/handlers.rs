//! Axum route handlers for résumé records.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::assessment::report::AssessmentReport;
use crate::errors::AppError;
use crate::resumes::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub filename: String,
    pub target_role: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub filename: String,
    pub target_role: String,
    pub score: Option<u8>,
    pub has_analysis: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ResumeRecord> for ResumeResponse {
    fn from(record: ResumeRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            target_role: record.target_role,
            score: record.score,
            has_analysis: record.analysis.is_some(),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub id: Uuid,
    pub filename: String,
    pub target_role: String,
    pub score: Option<u8>,
    pub has_analysis: bool,
    pub created_at: DateTime<Utc>,
    pub analysis: Option<AssessmentReport>,
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeResponse>>, AppError> {
    let records = state.resumes.list().await;
    Ok(Json(records.into_iter().map(ResumeResponse::from).collect()))
}

/// POST /api/v1/resumes
///
/// Registers résumé metadata. The file itself lives with an external upload
/// service; only filename and target role feed the assessment engine.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    if request.filename.trim().is_empty() {
        return Err(AppError::Validation("filename cannot be empty".to_string()));
    }

    let record = ResumeRecord::new(request.filename, request.target_role);
    let response = ResumeResponse::from(record.clone());
    state.resumes.insert(record).await;

    Ok(Json(response))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let record = state
        .resumes
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(ResumeDetailResponse {
        id: record.id,
        filename: record.filename,
        target_role: record.target_role,
        score: record.score,
        has_analysis: record.analysis.is_some(),
        created_at: record.created_at,
        analysis: record.analysis,
    }))
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the record together with any committed report.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.resumes.delete(resume_id).await {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    Ok(Json(json!({ "message": "Resume deleted successfully" })))
}
