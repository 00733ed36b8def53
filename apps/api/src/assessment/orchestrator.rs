//! Assessment run orchestration.
//!
//! One résumé gets at most one running assessment at a time: the run registry
//! doubles as the per-résumé lock and as the subscription point for progress
//! observers. A second start while a run is active fails fast, never queued.
//!
//! Progress is a monotonic stream of percent + phase-label events fanned out
//! over a broadcast channel; the phase label is derived from the percent
//! bracket. The final repository write publishes score and report atomically,
//! and any failure or cancellation before that write leaves the record
//! untouched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::assessment::classifier::{classify, RoleCategory};
use crate::assessment::feedback::{compose, tips_for};
use crate::assessment::report::{
    AssessmentReport, Dimension, ReportSections, SectionResult,
};
use crate::assessment::scoring::{RandomSource, ScoreGenerator, ScoreSheet};
use crate::resumes::{ResumeRecord, ResumeRepository};

const PROGRESS_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("resume {0} not found")]
    ResumeNotFound(Uuid),

    #[error("analysis already in progress for resume {0}")]
    AlreadyInProgress(Uuid),

    #[error("analysis run was cancelled")]
    Cancelled,

    #[error("internal generation error: {0}")]
    Internal(String),
}

/// The five named run phases, selected by percent bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPhase {
    Parsing,
    AtsCheck,
    ImpactAnalysis,
    KeywordAnalysis,
    TipGeneration,
}

impl AnalysisPhase {
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            0..=19 => AnalysisPhase::Parsing,
            20..=39 => AnalysisPhase::AtsCheck,
            40..=59 => AnalysisPhase::ImpactAnalysis,
            60..=79 => AnalysisPhase::KeywordAnalysis,
            _ => AnalysisPhase::TipGeneration,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisPhase::Parsing => "parsing",
            AnalysisPhase::AtsCheck => "ats_check",
            AnalysisPhase::ImpactAnalysis => "impact_analysis",
            AnalysisPhase::KeywordAnalysis => "keyword_analysis",
            AnalysisPhase::TipGeneration => "tip_generation",
        }
    }
}

/// One progress tick. Percent is monotonic within a run; the label is always
/// the bracket the percent falls in.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub percent: u8,
    pub phase_label: &'static str,
}

struct RunSlot {
    progress: broadcast::Sender<ProgressEvent>,
}

/// Releases the résumé's run slot when the task ends, however it ends.
struct RunGuard {
    active: Arc<Mutex<HashMap<Uuid, RunSlot>>>,
    resume_id: Uuid,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active.lock().remove(&self.resume_id);
    }
}

/// Handle for a single in-flight assessment run.
pub struct AssessmentRun {
    pub resume_id: Uuid,
    progress: broadcast::Sender<ProgressEvent>,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Result<AssessmentReport, AssessmentError>>,
}

impl AssessmentRun {
    /// Subscribe to progress events. Any number of observers may subscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.progress.subscribe()
    }

    /// Request cooperative cancellation. Honored between phases; a cancelled
    /// run commits nothing.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Await completion and return the final report.
    pub async fn finish(self) -> Result<AssessmentReport, AssessmentError> {
        self.handle
            .await
            .map_err(|err| AssessmentError::Internal(err.to_string()))?
    }
}

/// Sequences classifier → score generator → feedback composer and owns the
/// one-run-per-résumé rule.
pub struct AssessmentOrchestrator {
    repo: Arc<dyn ResumeRepository>,
    scores: ScoreGenerator,
    active: Arc<Mutex<HashMap<Uuid, RunSlot>>>,
    step_delay: Duration,
}

impl AssessmentOrchestrator {
    pub fn new(
        repo: Arc<dyn ResumeRepository>,
        rng: Arc<dyn RandomSource>,
        step_delay: Duration,
    ) -> Self {
        Self {
            repo,
            scores: ScoreGenerator::new(rng),
            active: Arc::new(Mutex::new(HashMap::new())),
            step_delay,
        }
    }

    /// Starts an assessment run for the given résumé.
    ///
    /// Fails with `ResumeNotFound` before anything runs if the id does not
    /// resolve, and with `AlreadyInProgress` if a run is active; in both
    /// cases no state is touched.
    pub async fn start(&self, resume_id: Uuid) -> Result<AssessmentRun, AssessmentError> {
        let record = self
            .repo
            .get(resume_id)
            .await
            .ok_or(AssessmentError::ResumeNotFound(resume_id))?;

        let (progress, _) = broadcast::channel(PROGRESS_BUFFER);
        {
            let mut active = self.active.lock();
            if active.contains_key(&resume_id) {
                return Err(AssessmentError::AlreadyInProgress(resume_id));
            }
            active.insert(
                resume_id,
                RunSlot {
                    progress: progress.clone(),
                },
            );
        }
        let guard = RunGuard {
            active: Arc::clone(&self.active),
            resume_id,
        };

        let cancel = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(run_assessment(
            Arc::clone(&self.repo),
            self.scores.clone(),
            record,
            progress.clone(),
            Arc::clone(&cancel),
            self.step_delay,
            guard,
        ));

        tracing::info!("assessment run started (resume_id={resume_id})");
        Ok(AssessmentRun {
            resume_id,
            progress,
            cancel,
            handle,
        })
    }

    /// Progress receiver for the résumé's active run, if one is running.
    pub fn subscribe(&self, resume_id: Uuid) -> Option<broadcast::Receiver<ProgressEvent>> {
        self.active
            .lock()
            .get(&resume_id)
            .map(|slot| slot.progress.subscribe())
    }
}

async fn run_assessment(
    repo: Arc<dyn ResumeRepository>,
    scores: ScoreGenerator,
    record: ResumeRecord,
    progress: broadcast::Sender<ProgressEvent>,
    cancel: Arc<AtomicBool>,
    step_delay: Duration,
    _guard: RunGuard,
) -> Result<AssessmentReport, AssessmentError> {
    let resume_id = record.id;

    // parsing [0, 20)
    emit(&progress, 0);
    bail_if_cancelled(&cancel)?;
    let category = classify(&record.filename, &record.target_role);
    tracing::info!("resume classified (resume_id={resume_id}, category={category:?})");
    pace(step_delay).await;

    // ats check [20, 40)
    emit(&progress, 20);
    bail_if_cancelled(&cancel)?;
    let sheet = scores.generate(category);
    pace(step_delay).await;

    // impact analysis [40, 60)
    emit(&progress, 40);
    bail_if_cancelled(&cancel)?;
    pace(step_delay).await;

    // keyword analysis [60, 80)
    emit(&progress, 60);
    bail_if_cancelled(&cancel)?;
    let sections = build_sections(category, &sheet);
    pace(step_delay).await;

    // tip generation [80, 100]
    emit(&progress, 80);
    bail_if_cancelled(&cancel)?;
    let writing_tips = tips_for(category);
    pace(step_delay).await;

    let report = AssessmentReport {
        overall_score: sheet.overall_score,
        sections,
        writing_tips,
    };

    // Last cancellation point before the commit; after this the write is
    // atomic and fully replaces any previous report.
    bail_if_cancelled(&cancel)?;
    if !repo.commit_assessment(resume_id, report.clone()).await {
        return Err(AssessmentError::ResumeNotFound(resume_id));
    }

    emit(&progress, 100);
    tracing::info!(
        "assessment completed (resume_id={resume_id}, overall_score={})",
        report.overall_score
    );
    Ok(report)
}

fn build_sections(category: RoleCategory, sheet: &ScoreSheet) -> ReportSections {
    let section = |dimension: Dimension| {
        let drawn = sheet.get(dimension);
        SectionResult {
            score: drawn.score,
            status: drawn.status,
            feedback: compose(category, dimension, drawn.status),
        }
    };

    ReportSections {
        ats_friendly: section(Dimension::AtsFriendly),
        impact_metrics: section(Dimension::ImpactMetrics),
        keyword_match: section(Dimension::KeywordMatch),
        readability: section(Dimension::Readability),
        format: section(Dimension::Format),
    }
}

fn emit(progress: &broadcast::Sender<ProgressEvent>, percent: u8) {
    let phase = AnalysisPhase::for_percent(percent);
    // No subscribers is fine; progress is observational.
    let _ = progress.send(ProgressEvent {
        percent,
        phase_label: phase.label(),
    });
}

fn bail_if_cancelled(cancel: &AtomicBool) -> Result<(), AssessmentError> {
    if cancel.load(Ordering::Relaxed) {
        Err(AssessmentError::Cancelled)
    } else {
        Ok(())
    }
}

async fn pace(step_delay: Duration) {
    if !step_delay.is_zero() {
        tokio::time::sleep(step_delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::scoring::testing::{ConstRandom, ScriptedRandom};
    use crate::assessment::scoring::ThreadRandom;
    use crate::resumes::InMemoryResumeStore;

    fn orchestrator_with(
        rng: Arc<dyn RandomSource>,
        step_delay: Duration,
    ) -> (AssessmentOrchestrator, Arc<InMemoryResumeStore>) {
        let store = Arc::new(InMemoryResumeStore::new());
        let repo: Arc<dyn ResumeRepository> = store.clone();
        (
            AssessmentOrchestrator::new(repo, rng, step_delay),
            store,
        )
    }

    async fn seed_resume(store: &InMemoryResumeStore, filename: &str, role: &str) -> Uuid {
        let record = ResumeRecord::new(filename.to_string(), role.to_string());
        let id = record.id;
        store.insert(record).await;
        id
    }

    #[tokio::test]
    async fn test_unknown_resume_fails_before_running() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ThreadRandom), Duration::ZERO);
        let missing = Uuid::new_v4();

        let err = orchestrator.start(missing).await.err().unwrap();
        assert!(matches!(err, AssessmentError::ResumeNotFound(id) if id == missing));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_commits_score_and_report_atomically() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ConstRandom(0)), Duration::ZERO);
        let id = seed_resume(&store, "이력서_프론트엔드_2024.pdf", "Frontend Engineer").await;

        let report = orchestrator.start(id).await.unwrap().finish().await.unwrap();

        assert_eq!(report.overall_score, 62);
        assert_eq!(report.writing_tips.len(), 3);
        assert!(report.writing_tips[0].category.contains("기술 스택 작성법"));
        assert!(report.sections.keyword_match.feedback.contains("React"));

        let record = store.get(id).await.unwrap();
        assert!(record.has_analysis());
        assert_eq!(record.score, Some(report.overall_score));
        assert_eq!(record.analysis.unwrap(), report);
    }

    #[tokio::test]
    async fn test_second_concurrent_run_fails_fast() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ThreadRandom), Duration::from_millis(50));
        let id = seed_resume(&store, "cv.pdf", "백엔드 개발자").await;

        let first = orchestrator.start(id).await.unwrap();
        let err = orchestrator.start(id).await.err().unwrap();
        assert!(matches!(err, AssessmentError::AlreadyInProgress(conflicted) if conflicted == id));

        // The rejected attempt must not have perturbed the running one.
        let report = first.finish().await.unwrap();
        assert_eq!(store.get(id).await.unwrap().score, Some(report.overall_score));
    }

    #[tokio::test]
    async fn test_rerun_replaces_report_but_keeps_tips_and_category() {
        // Six draws per run (base + five sections): first run bottoms out,
        // second run maxes the base.
        let script = ScriptedRandom::new(&[0, 0, 0, 0, 0, 0, 19, 0, 0, 0, 0, 0]);
        let (orchestrator, store) = orchestrator_with(Arc::new(script), Duration::ZERO);
        let id = seed_resume(&store, "이력서.pdf", "데이터 분석가").await;

        let first = orchestrator.start(id).await.unwrap().finish().await.unwrap();
        let second = orchestrator.start(id).await.unwrap().finish().await.unwrap();

        assert_eq!(first.overall_score, 62);
        assert_eq!(second.overall_score, 81);
        // Tips depend on the category alone, never on the draw.
        assert_eq!(first.writing_tips, second.writing_tips);
        assert_eq!(
            store.get(id).await.unwrap().score,
            Some(second.overall_score)
        );
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_ends_at_100() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ThreadRandom), Duration::from_millis(1));
        let id = seed_resume(&store, "cv.pdf", "DevOps Engineer").await;

        let run = orchestrator.start(id).await.unwrap();
        let mut receiver = run.subscribe();
        let collector = tokio::spawn(async move {
            let mut events = Vec::new();
            while let Ok(event) = receiver.recv().await {
                events.push(event);
            }
            events
        });

        run.finish().await.unwrap();
        let events = collector.await.unwrap();

        assert_eq!(events.first().unwrap().percent, 0);
        assert_eq!(events.last().unwrap().percent, 100);
        for window in events.windows(2) {
            assert!(window[0].percent < window[1].percent, "progress regressed");
        }
        for event in &events {
            assert_eq!(
                event.phase_label,
                AnalysisPhase::for_percent(event.percent).label()
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_run_leaves_record_unchanged() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ThreadRandom), Duration::from_millis(50));
        let id = seed_resume(&store, "cv.pdf", "풀스택 개발자").await;

        let run = orchestrator.start(id).await.unwrap();
        run.cancel();
        let err = run.finish().await.err().unwrap();
        assert!(matches!(err, AssessmentError::Cancelled));

        let record = store.get(id).await.unwrap();
        assert!(!record.has_analysis());
        assert_eq!(record.score, None);

        // The slot is released: a new run may start immediately.
        assert!(orchestrator.start(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_resume_deleted_mid_run_commits_nothing() {
        let (orchestrator, store) =
            orchestrator_with(Arc::new(ThreadRandom), Duration::from_millis(20));
        let id = seed_resume(&store, "cv.pdf", "개발자").await;

        let run = orchestrator.start(id).await.unwrap();
        store.delete(id).await;

        let err = run.finish().await.err().unwrap();
        assert!(matches!(err, AssessmentError::ResumeNotFound(_)));
        assert!(store.get(id).await.is_none());
    }

    #[test]
    fn test_phase_brackets() {
        assert_eq!(AnalysisPhase::for_percent(0), AnalysisPhase::Parsing);
        assert_eq!(AnalysisPhase::for_percent(19), AnalysisPhase::Parsing);
        assert_eq!(AnalysisPhase::for_percent(20), AnalysisPhase::AtsCheck);
        assert_eq!(AnalysisPhase::for_percent(40), AnalysisPhase::ImpactAnalysis);
        assert_eq!(AnalysisPhase::for_percent(60), AnalysisPhase::KeywordAnalysis);
        assert_eq!(AnalysisPhase::for_percent(80), AnalysisPhase::TipGeneration);
        assert_eq!(AnalysisPhase::for_percent(100), AnalysisPhase::TipGeneration);
    }
}
