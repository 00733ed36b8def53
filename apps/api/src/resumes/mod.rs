//! Résumé metadata records and the repository seam the engine writes through.
//!
//! Upload and file storage are external: a record carries metadata only.
//! The committed score and the report live in the same record field pair and
//! are only ever written together, so a reader can never observe a score
//! without its report or vice versa.

pub mod handlers;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::assessment::report::AssessmentReport;

#[derive(Debug, Clone)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub filename: String,
    pub target_role: String,
    pub score: Option<u8>,
    pub analysis: Option<AssessmentReport>,
    pub created_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn new(filename: String, target_role: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            target_role,
            score: None,
            analysis: None,
            created_at: Utc::now(),
        }
    }

    /// True once an assessment has been committed for this record.
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }
}

/// Storage capability consumed by the assessment engine and the handlers.
/// Every call is atomic with respect to concurrent readers.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn insert(&self, record: ResumeRecord);
    async fn get(&self, id: Uuid) -> Option<ResumeRecord>;
    async fn list(&self) -> Vec<ResumeRecord>;
    /// Publishes a completed assessment: score and report in one write.
    /// Returns false if the record no longer exists.
    async fn commit_assessment(&self, id: Uuid, report: AssessmentReport) -> bool;
    /// Removes the record and any associated report.
    async fn delete(&self, id: Uuid) -> bool;
}

/// In-memory repository. Nothing survives a restart; persistence is an
/// external responsibility.
#[derive(Default)]
pub struct InMemoryResumeStore {
    records: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeStore {
    async fn insert(&self, record: ResumeRecord) {
        self.records.write().insert(record.id, record);
    }

    async fn get(&self, id: Uuid) -> Option<ResumeRecord> {
        self.records.read().get(&id).cloned()
    }

    async fn list(&self) -> Vec<ResumeRecord> {
        let mut records: Vec<ResumeRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    async fn commit_assessment(&self, id: Uuid, report: AssessmentReport) -> bool {
        let mut records = self.records.write();
        match records.get_mut(&id) {
            Some(record) => {
                record.score = Some(report.overall_score);
                record.analysis = Some(report);
                true
            }
            None => false,
        }
    }

    async fn delete(&self, id: Uuid) -> bool {
        self.records.write().remove(&id).is_some()
    }
}
