//! Role classification over résumé metadata.
//!
//! The engine does not parse résumé content; the filename and the declared
//! target role stand in for it. Classification is an ordered rule table so
//! the tie-break policy is visible and testable: the FIRST category whose
//! keyword set matches wins. Metadata that mentions both "프론트" and "백엔드"
//! therefore resolves to Frontend, never Fullstack. That is a known
//! limitation of the heuristic, not a bug.

use serde::{Deserialize, Serialize};

/// Closed set of role categories. Derived on every run, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Frontend,
    Backend,
    Fullstack,
    Data,
    #[serde(rename = "devops")]
    DevOps,
    General,
}

impl RoleCategory {
    /// Korean display label used in composed feedback.
    pub fn label(&self) -> &'static str {
        match self {
            RoleCategory::Frontend => "프론트엔드",
            RoleCategory::Backend => "백엔드",
            RoleCategory::Fullstack => "풀스택",
            RoleCategory::Data => "데이터",
            RoleCategory::DevOps => "데브옵스",
            RoleCategory::General => "일반",
        }
    }
}

/// Priority-ordered rule table. Each entry is a logical OR over its keyword
/// set; keywords are lowercase substrings matched against the combined
/// filename + target role.
const CLASSIFICATION_RULES: &[(RoleCategory, &[&str])] = &[
    (
        RoleCategory::Frontend,
        &["프론트", "front", "react", "리액트", "퍼블리셔", "vue", "웹 개발"],
    ),
    (
        RoleCategory::Backend,
        &[
            "백엔드", "back", "서버", "server", "spring", "스프링", "node", "django",
        ],
    ),
    (RoleCategory::Fullstack, &["풀스택", "full"]),
    (
        RoleCategory::Data,
        &["데이터", "data", "머신러닝", "machine learning", "분석", "analyst"],
    ),
    (
        RoleCategory::DevOps,
        &[
            "데브옵스", "devops", "인프라", "infra", "sre", "클라우드", "cloud", "쿠버네티스",
        ],
    ),
];

/// Maps résumé metadata to a role category. Pure, case-insensitive, and
/// total: anything that matches no rule falls back to `General`.
pub fn classify(filename: &str, target_role: &str) -> RoleCategory {
    let haystack = format!("{filename} {target_role}").to_lowercase();

    for (category, keywords) in CLASSIFICATION_RULES {
        if keywords.iter().any(|keyword| haystack.contains(keyword)) {
            return *category;
        }
    }

    RoleCategory::General
}
