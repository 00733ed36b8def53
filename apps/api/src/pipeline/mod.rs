//! Application pipeline board.
//!
//! Every application belongs to exactly one of six fixed stages, and the
//! board view is a pure grouping by stage key. No transition rules are
//! enforced; any stage can move to any other.

pub mod handlers;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six pipeline stages, in board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStage {
    Interested,
    Applied,
    Screening,
    #[serde(rename = "interview_1")]
    Interview1,
    #[serde(rename = "interview_2")]
    Interview2,
    Offer,
}

impl ApplicationStage {
    pub const ORDER: [ApplicationStage; 6] = [
        ApplicationStage::Interested,
        ApplicationStage::Applied,
        ApplicationStage::Screening,
        ApplicationStage::Interview1,
        ApplicationStage::Interview2,
        ApplicationStage::Offer,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ApplicationStage::Interested => "interested",
            ApplicationStage::Applied => "applied",
            ApplicationStage::Screening => "screening",
            ApplicationStage::Interview1 => "interview_1",
            ApplicationStage::Interview2 => "interview_2",
            ApplicationStage::Offer => "offer",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: Uuid,
    pub company_name: String,
    pub position_title: Option<String>,
    pub stage: ApplicationStage,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BoardColumn {
    pub stage: ApplicationStage,
    pub items: Vec<Application>,
}

#[derive(Debug, Default, Serialize)]
pub struct PipelineStats {
    pub interested: usize,
    pub applied: usize,
    pub screening: usize,
    pub interview_1: usize,
    pub interview_2: usize,
    pub offer: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BoardView {
    pub columns: Vec<BoardColumn>,
    pub stats: PipelineStats,
}

/// Groups a flat application list into the six fixed board columns.
/// Every column is present even when empty; every item lands in exactly one.
pub fn group_by_stage(items: Vec<Application>) -> BoardView {
    let mut by_stage: HashMap<ApplicationStage, Vec<Application>> = HashMap::new();
    let mut stats = PipelineStats {
        total: items.len(),
        ..PipelineStats::default()
    };

    for item in items {
        match item.stage {
            ApplicationStage::Interested => stats.interested += 1,
            ApplicationStage::Applied => stats.applied += 1,
            ApplicationStage::Screening => stats.screening += 1,
            ApplicationStage::Interview1 => stats.interview_1 += 1,
            ApplicationStage::Interview2 => stats.interview_2 += 1,
            ApplicationStage::Offer => stats.offer += 1,
        }
        by_stage.entry(item.stage).or_default().push(item);
    }

    let columns = ApplicationStage::ORDER
        .into_iter()
        .map(|stage| BoardColumn {
            stage,
            items: by_stage.remove(&stage).unwrap_or_default(),
        })
        .collect();

    BoardView { columns, stats }
}

/// In-memory application store.
#[derive(Default)]
pub struct ApplicationStore {
    items: RwLock<HashMap<Uuid, Application>>,
}

impl ApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, application: Application) {
        self.items.write().insert(application.id, application);
    }

    pub fn list(&self) -> Vec<Application> {
        let mut items: Vec<Application> = self.items.read().values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn move_stage(&self, id: Uuid, stage: ApplicationStage) -> Option<Application> {
        let mut items = self.items.write();
        let application = items.get_mut(&id)?;
        application.stage = stage;
        application.updated_at = Utc::now();
        Some(application.clone())
    }

    pub fn delete(&self, id: Uuid) -> bool {
        self.items.write().remove(&id).is_some()
    }
}
