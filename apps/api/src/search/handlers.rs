//! Axum route handlers for job posting search.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::search::{
    apply_filters, ExperienceLevel, JobPosting, PostingFilters, SourcePlatform,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    /// Comma-separated platform names, e.g. `wanted,linkedin`.
    pub sources: Option<String>,
    #[serde(default)]
    pub exclude_expired: bool,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobPosting>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub level: ExperienceLevel,
    pub source: SourcePlatform,
    pub deadline: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

/// GET /api/v1/jobs
///
/// All filters are optional and combine independently.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let filters = build_filters(params)?;
    let items = apply_filters(state.postings.list(), &filters, Utc::now());

    Ok(Json(JobListResponse {
        total: items.len(),
        items,
    }))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobPosting>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let posting = JobPosting {
        id: Uuid::new_v4(),
        title: request.title,
        company: request.company,
        location: request.location,
        skills: request.skills,
        level: request.level,
        source: request.source,
        deadline: request.deadline,
        url: request.url,
        created_at: Utc::now(),
    };
    state.postings.insert(posting.clone());

    Ok(Json(posting))
}

fn build_filters(params: JobSearchParams) -> Result<PostingFilters, AppError> {
    let level = params
        .level
        .map(|value| value.parse::<ExperienceLevel>())
        .transpose()
        .map_err(AppError::Validation)?;

    let sources = params
        .sources
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::parse::<SourcePlatform>)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(AppError::Validation)?;

    Ok(PostingFilters {
        keyword: params.search,
        location: params.location,
        level,
        sources,
        exclude_expired: params.exclude_expired,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filters_parses_sources_list() {
        let params = JobSearchParams {
            search: Some("react".to_string()),
            location: None,
            level: Some("senior".to_string()),
            sources: Some("wanted, linkedin".to_string()),
            exclude_expired: true,
        };

        let filters = build_filters(params).unwrap();
        assert_eq!(filters.level, Some(ExperienceLevel::Senior));
        assert_eq!(
            filters.sources,
            Some(vec![SourcePlatform::Wanted, SourcePlatform::LinkedIn])
        );
        assert!(filters.exclude_expired);
    }

    #[test]
    fn test_build_filters_rejects_unknown_level() {
        let params = JobSearchParams {
            search: None,
            location: None,
            level: Some("principal".to_string()),
            sources: None,
            exclude_expired: false,
        };

        assert!(build_filters(params).is_err());
    }
}
