pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::pipeline::handlers as pipeline;
use crate::resumes::handlers as resumes;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé records
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        // Assessment engine
        .route("/api/v1/resumes/:id/analyze", post(assessment::handle_analyze))
        .route(
            "/api/v1/resumes/:id/analyze/progress",
            get(assessment::handle_analyze_progress),
        )
        .route("/api/v1/resumes/:id/report", get(assessment::handle_get_report))
        // Pipeline board
        .route(
            "/api/v1/applications",
            get(pipeline::handle_list_applications).post(pipeline::handle_create_application),
        )
        .route("/api/v1/applications/board", get(pipeline::handle_board))
        .route(
            "/api/v1/applications/:id",
            delete(pipeline::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/stage",
            patch(pipeline::handle_move_stage),
        )
        // Job search
        .route(
            "/api/v1/jobs",
            get(search::handle_search_jobs).post(search::handle_create_job),
        )
        .with_state(state)
}
