//! Assessment report value objects returned to clients.
//!
//! The section keys and the report shape are a stable wire contract; clients
//! key off the five dimension identifiers, so the sections live in a struct
//! with fixed field names rather than a map that could drop a key.

use serde::{Deserialize, Serialize};

/// The five fixed assessment axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    AtsFriendly,
    ImpactMetrics,
    KeywordMatch,
    Readability,
    Format,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::AtsFriendly,
        Dimension::ImpactMetrics,
        Dimension::KeywordMatch,
        Dimension::Readability,
        Dimension::Format,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Dimension::AtsFriendly => "ats_friendly",
            Dimension::ImpactMetrics => "impact_metrics",
            Dimension::KeywordMatch => "keyword_match",
            Dimension::Readability => "readability",
            Dimension::Format => "format",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Good,
    NeedsImprovement,
}

/// One dimension's score, derived status, and composed feedback line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub score: u8,
    pub status: SectionStatus,
    pub feedback: String,
}

/// All five sections, always present. Field names are the wire keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSections {
    pub ats_friendly: SectionResult,
    pub impact_metrics: SectionResult,
    pub keyword_match: SectionResult,
    pub readability: SectionResult,
    pub format: SectionResult,
}

impl ReportSections {
    pub fn get(&self, dimension: Dimension) -> &SectionResult {
        match dimension {
            Dimension::AtsFriendly => &self.ats_friendly,
            Dimension::ImpactMetrics => &self.impact_metrics,
            Dimension::KeywordMatch => &self.keyword_match,
            Dimension::Readability => &self.readability,
            Dimension::Format => &self.format,
        }
    }
}

/// Role-specific, category-fixed writing advice with a before/after example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingTip {
    pub category: String,
    pub tip: String,
    pub example: String,
    pub reason: String,
}

/// Immutable result of one assessment run. A rerun produces a fresh report
/// that fully replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub overall_score: u8,
    pub sections: ReportSections,
    /// Always exactly three, determined by the role category alone.
    pub writing_tips: Vec<WritingTip>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(score: u8) -> SectionResult {
        SectionResult {
            score,
            status: SectionStatus::Good,
            feedback: "ok".to_string(),
        }
    }

    #[test]
    fn test_section_keys_are_stable_on_the_wire() {
        let report = AssessmentReport {
            overall_score: 70,
            sections: ReportSections {
                ats_friendly: section(78),
                impact_metrics: section(65),
                keyword_match: section(75),
                readability: section(70),
                format: section(80),
            },
            writing_tips: vec![],
        };

        let value = serde_json::to_value(&report).unwrap();
        let sections = value.get("sections").unwrap().as_object().unwrap();
        for key in [
            "ats_friendly",
            "impact_metrics",
            "keyword_match",
            "readability",
            "format",
        ] {
            assert!(sections.contains_key(key), "missing section key {key}");
        }
        assert_eq!(sections.len(), 5);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SectionStatus::NeedsImprovement).unwrap(),
            serde_json::json!("needs_improvement")
        );
        assert_eq!(
            serde_json::to_value(SectionStatus::Good).unwrap(),
            serde_json::json!("good")
        );
    }

    #[test]
    fn test_dimension_keys_match_serde_names() {
        for dimension in Dimension::ALL {
            let serialized = serde_json::to_value(dimension).unwrap();
            assert_eq!(serialized, serde_json::json!(dimension.key()));
        }
    }
}
