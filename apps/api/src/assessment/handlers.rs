//! Axum route handlers for the assessment API.

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use uuid::Uuid;

use crate::assessment::report::AssessmentReport;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/resumes/:id/analyze
///
/// Runs a full assessment and returns the report. Fails with 404 for an
/// unknown résumé and 409 while a run for the same résumé is in flight.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<AssessmentReport>, AppError> {
    let run = state.orchestrator.start(resume_id).await?;
    let report = run.finish().await?;
    Ok(Json(report))
}

/// GET /api/v1/resumes/:id/analyze/progress
///
/// Server-sent events for the résumé's active run. 404 when no run is
/// in flight; the stream ends when the run does.
pub async fn handle_analyze_progress(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let receiver = state
        .orchestrator
        .subscribe(resume_id)
        .ok_or_else(|| AppError::NotFound(format!("No analysis in progress for resume {resume_id}")))?;

    let stream = BroadcastStream::new(receiver)
        .filter_map(|event| event.ok())
        .map(|event| Event::default().json_data(&event));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// GET /api/v1/resumes/:id/report
///
/// Returns the most recent committed report.
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<AssessmentReport>, AppError> {
    let record = state
        .resumes
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let report = record.analysis.ok_or_else(|| {
        AppError::NotFound("Analysis not found. Run analyze first.".to_string())
    })?;

    Ok(Json(report))
}
