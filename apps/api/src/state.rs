use std::sync::Arc;

use crate::assessment::orchestrator::AssessmentOrchestrator;
use crate::pipeline::ApplicationStore;
use crate::resumes::ResumeRepository;
use crate::search::PostingStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Repository seam the engine writes through. In-memory by default; a
    /// persistent backend slots in behind the same trait.
    pub resumes: Arc<dyn ResumeRepository>,
    pub orchestrator: Arc<AssessmentOrchestrator>,
    pub applications: Arc<ApplicationStore>,
    pub postings: Arc<PostingStore>,
}
