//! Job posting search.
//!
//! A stateless multi-predicate filter over an in-memory collection: every
//! predicate is optional and they combine independently with AND semantics.

pub mod handlers;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    MidLevel,
    Senior,
    Lead,
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "junior" => Ok(ExperienceLevel::Junior),
            "mid_level" => Ok(ExperienceLevel::MidLevel),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            other => Err(format!("unknown experience level '{other}'")),
        }
    }
}

/// Source platforms the crawler layer ingests from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Wanted,
    JobKorea,
    JobPlanet,
    LinkedIn,
}

impl FromStr for SourcePlatform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wanted" => Ok(SourcePlatform::Wanted),
            "jobkorea" => Ok(SourcePlatform::JobKorea),
            "jobplanet" => Ok(SourcePlatform::JobPlanet),
            "linkedin" => Ok(SourcePlatform::LinkedIn),
            other => Err(format!("unknown source platform '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub level: ExperienceLevel,
    pub source: SourcePlatform,
    pub deadline: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Independently combinable search predicates. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PostingFilters {
    /// Case-insensitive substring over title, company, and skills.
    pub keyword: Option<String>,
    /// Case-insensitive substring over location.
    pub location: Option<String>,
    pub level: Option<ExperienceLevel>,
    /// Set membership over source platforms.
    pub sources: Option<Vec<SourcePlatform>>,
    /// When set, postings whose deadline has passed are excluded.
    pub exclude_expired: bool,
}

/// Whether one posting passes every set predicate.
pub fn matches(posting: &JobPosting, filters: &PostingFilters, now: DateTime<Utc>) -> bool {
    if let Some(keyword) = &filters.keyword {
        let needle = keyword.to_lowercase();
        let in_title = posting.title.to_lowercase().contains(&needle);
        let in_company = posting.company.to_lowercase().contains(&needle);
        let in_skills = posting
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&needle));
        if !in_title && !in_company && !in_skills {
            return false;
        }
    }

    if let Some(location) = &filters.location {
        let matched = posting
            .location
            .as_deref()
            .map(|loc| loc.to_lowercase().contains(&location.to_lowercase()))
            .unwrap_or(false);
        if !matched {
            return false;
        }
    }

    if let Some(level) = filters.level {
        if posting.level != level {
            return false;
        }
    }

    if let Some(sources) = &filters.sources {
        if !sources.contains(&posting.source) {
            return false;
        }
    }

    if filters.exclude_expired {
        if let Some(deadline) = posting.deadline {
            if deadline < now {
                return false;
            }
        }
    }

    true
}

/// Applies the filters to a posting list, newest first.
pub fn apply_filters(
    postings: Vec<JobPosting>,
    filters: &PostingFilters,
    now: DateTime<Utc>,
) -> Vec<JobPosting> {
    let mut results: Vec<JobPosting> = postings
        .into_iter()
        .filter(|posting| matches(posting, filters, now))
        .collect();
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    results
}

/// In-memory posting store.
#[derive(Default)]
pub struct PostingStore {
    postings: RwLock<HashMap<Uuid, JobPosting>>,
}

impl PostingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, posting: JobPosting) {
        self.postings.write().insert(posting.id, posting);
    }

    pub fn list(&self) -> Vec<JobPosting> {
        self.postings.read().values().cloned().collect()
    }
}
