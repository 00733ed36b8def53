// Résumé Assessment Engine.
// Implements: role classification, bounded score generation, feedback
// composition, and run orchestration with progress streaming.
// Operates on role metadata only; no résumé text parsing happens here.

pub mod classifier;
pub mod feedback;
pub mod handlers;
pub mod orchestrator;
pub mod report;
pub mod scoring;
