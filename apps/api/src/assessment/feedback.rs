//! Feedback composition: template tables keyed by role category, dimension,
//! and status.
//!
//! Pure and total: every `(dimension, status)` pair has a template and every
//! category has exactly three writing tips, so composition can never fail.
//! Tips depend on the role category alone; two runs over the same category
//! produce byte-identical tips regardless of the score draw.

use crate::assessment::classifier::RoleCategory;
use crate::assessment::report::{Dimension, SectionStatus, WritingTip};

/// Fixed keyword list per role category. The first three are cited as
/// present in the résumé, the next two as recommended additions.
pub fn keywords_for(category: RoleCategory) -> &'static [&'static str] {
    match category {
        RoleCategory::Frontend => &["React", "TypeScript", "Next.js", "Redux", "Webpack"],
        RoleCategory::Backend => &["Spring Boot", "Node.js", "PostgreSQL", "Redis", "Kafka"],
        RoleCategory::Fullstack => &["React", "Node.js", "TypeScript", "Docker", "GraphQL"],
        RoleCategory::Data => &["Python", "SQL", "Pandas", "Spark", "Airflow"],
        RoleCategory::DevOps => &["Kubernetes", "Docker", "Terraform", "AWS", "Prometheus"],
        RoleCategory::General => &["커뮤니케이션", "문제 해결", "협업", "기획", "데이터 활용"],
    }
}

/// Composes the feedback line for one section.
pub fn compose(category: RoleCategory, dimension: Dimension, status: SectionStatus) -> String {
    use Dimension::*;
    use SectionStatus::*;

    match (dimension, status) {
        (KeywordMatch, status) => keyword_feedback(category, status),
        (AtsFriendly, Good) => {
            "글머리 기호와 명확한 섹션 구분이 있어 ATS 파싱에 적합합니다.".to_string()
        }
        (AtsFriendly, NeedsImprovement) => {
            "글머리 기호(•)를 사용하여 내용을 구분하면 ATS 친화도가 높아집니다.".to_string()
        }
        (ImpactMetrics, Good) => "성과가 수치와 함께 구체적으로 표현되어 있습니다.".to_string(),
        (ImpactMetrics, NeedsImprovement) => {
            "성과를 '매출 20% 증가', '처리 시간 50% 단축'처럼 수치로 표현하세요.".to_string()
        }
        (Readability, Good) => "문장이 명확하고 적절한 길이로 작성되어 있습니다.".to_string(),
        (Readability, NeedsImprovement) => {
            "문장을 더 짧고 간결하게 다듬으면 가독성이 높아집니다.".to_string()
        }
        (Format, Good) => "레이아웃과 구조가 전문적으로 구성되어 있습니다.".to_string(),
        (Format, NeedsImprovement) => {
            "글머리 기호와 들여쓰기를 활용하여 형식을 개선하세요.".to_string()
        }
    }
}

/// Role-specific keyword feedback: cites the category's first three keywords
/// as present and the next two as recommended additions.
fn keyword_feedback(category: RoleCategory, status: SectionStatus) -> String {
    let keywords = keywords_for(category);
    let present = keywords[..3].join(", ");
    let recommended = keywords[3..5].join(", ");
    let label = category.label();

    match status {
        SectionStatus::Good => format!(
            "{present} 등 {label} 직무 핵심 키워드가 포함되어 있습니다. {recommended}를 추가하면 매칭률이 더 높아집니다."
        ),
        SectionStatus::NeedsImprovement => format!(
            "{label} 직무 키워드가 부족합니다. {present}를 보강하고 {recommended}도 함께 검토하세요."
        ),
    }
}

struct TipTemplate {
    category: &'static str,
    tip: &'static str,
    example: &'static str,
    reason: &'static str,
}

const FRONTEND_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "기술 스택 작성법",
        tip: "프레임워크 경험을 성능 개선 수치와 함께 쓰세요",
        example: "React로 화면 개발 → React 코드 스플리팅으로 초기 로딩 2.8초에서 1.2초로 단축",
        reason: "프론트엔드 직무는 기술 스택과 성능 개선 경험을 가장 먼저 봅니다",
    },
    TipTemplate {
        category: "사용자 지표 수치화",
        tip: "UI 개선 성과를 사용자 지표로 표현하세요",
        example: "결제 화면 개선 → 결제 퍼널 UI 개선으로 전환율 12% 상승",
        reason: "수치가 붙은 성과는 면접에서 구체적인 질문으로 이어집니다",
    },
    TipTemplate {
        category: "포트폴리오 연결",
        tip: "배포된 결과물의 링크와 규모를 명시하세요",
        example: "개인 프로젝트 수행 → 월 1만 MAU 서비스 운영 (저장소 링크 첨부)",
        reason: "프론트엔드는 눈으로 확인할 수 있는 결과물이 가장 강력한 근거입니다",
    },
];

const BACKEND_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "시스템 설계 경험",
        tip: "트래픽 규모와 아키텍처 결정을 함께 쓰세요",
        example: "API 서버 개발 → 일 500만 요청 API를 도메인 단위로 분리하여 배포 주기 단축",
        reason: "백엔드 직무는 규모와 설계 판단의 근거를 봅니다",
    },
    TipTemplate {
        category: "성능 개선 수치화",
        tip: "지연 시간과 처리량 개선을 수치로 표현하세요",
        example: "쿼리 최적화 수행 → 인덱스 재설계로 조회 응답 1.2초에서 180ms로 단축",
        reason: "개선 전후 수치는 문제 해결 과정을 한 줄로 증명합니다",
    },
    TipTemplate {
        category: "장애 대응 경험",
        tip: "장애의 원인 분석과 재발 방지 조치까지 쓰세요",
        example: "서버 장애 대응 → 커넥션 풀 고갈 원인을 분석하고 알림 체계 도입으로 재발 0건",
        reason: "운영 경험은 시니어 백엔드 평가에서 비중이 큽니다",
    },
];

const FULLSTACK_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "엔드투엔드 경험",
        tip: "기획부터 배포까지 담당한 범위를 명확히 쓰세요",
        example: "서비스 개발 참여 → 요구사항 정의부터 배포 자동화까지 전 과정 단독 수행",
        reason: "풀스택 직무는 전체 흐름을 혼자 끌고 간 경험을 높게 평가합니다",
    },
    TipTemplate {
        category: "기술 선택 근거",
        tip: "프론트와 백엔드 기술을 고른 이유를 덧붙이세요",
        example: "React와 Node.js 사용 → 단일 언어 스택으로 팀 온보딩 기간 50% 단축",
        reason: "기술 선택의 근거는 의사결정 능력을 보여줍니다",
    },
    TipTemplate {
        category: "협업 범위 명시",
        tip: "직접 구현한 부분과 협업한 부분을 구분하세요",
        example: "전체 기능 개발 → 결제 모듈 단독 구현, 인증은 2인 협업",
        reason: "범위가 불분명한 풀스택 경력은 과장으로 읽히기 쉽습니다",
    },
];

const DATA_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "분석 임팩트 작성법",
        tip: "분석 결과가 어떤 의사결정으로 이어졌는지 쓰세요",
        example: "이탈 분석 수행 → 이탈 요인 분석으로 리텐션 캠페인 전환율 18% 개선",
        reason: "데이터 직무는 분석 자체보다 비즈니스 기여를 봅니다",
    },
    TipTemplate {
        category: "모델 성능 지표",
        tip: "모델과 지표, 베이스라인 대비 개선 폭을 명시하세요",
        example: "예측 모델 개발 → 수요 예측 MAE를 베이스라인 대비 23% 개선",
        reason: "지표 없는 모델 경험은 재현 가능성을 판단할 수 없습니다",
    },
    TipTemplate {
        category: "데이터 규모 명시",
        tip: "다룬 데이터의 규모와 파이프라인을 수치로 쓰세요",
        example: "데이터 처리 담당 → 일 2억 건 로그를 Spark 파이프라인으로 집계",
        reason: "데이터 규모는 경험의 난이도를 가늠하는 기준입니다",
    },
];

const DEVOPS_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "인프라 규모 작성법",
        tip: "운영한 클러스터와 서비스 규모를 수치로 쓰세요",
        example: "인프라 운영 → 노드 40대 Kubernetes 클러스터에서 서비스 30여 개 운영",
        reason: "데브옵스 직무는 운영 규모가 곧 경험의 깊이입니다",
    },
    TipTemplate {
        category: "자동화 성과 수치화",
        tip: "자동화로 줄인 시간과 빈도를 표현하세요",
        example: "배포 자동화 구축 → 배포 소요 시간 40분에서 5분으로 단축, 주 15회 배포",
        reason: "자동화의 가치는 절감된 수치로만 전달됩니다",
    },
    TipTemplate {
        category: "비용 절감 경험",
        tip: "인프라 비용 최적화 경험을 금액이나 비율로 쓰세요",
        example: "클라우드 비용 관리 → 리소스 적정화로 월 클라우드 비용 35% 절감",
        reason: "비용 감각은 시니어 데브옵스의 핵심 평가 항목입니다",
    },
];

const GENERAL_TIPS: [TipTemplate; 3] = [
    TipTemplate {
        category: "성과 중심 작성법",
        tip: "담당 업무가 아니라 만들어낸 변화를 쓰세요",
        example: "업무 프로세스 관리 → 승인 절차 간소화로 처리 기간 3일에서 1일로 단축",
        reason: "역할 나열보다 변화의 크기가 설득력을 만듭니다",
    },
    TipTemplate {
        category: "직무 키워드 보강",
        tip: "지원 직무 공고의 핵심 키워드를 이력서에 반영하세요",
        example: "다양한 업무 수행 → 데이터 기반 기획, 유관 부서 협업 등 공고 키워드로 재구성",
        reason: "ATS와 채용 담당자 모두 키워드로 1차 판단합니다",
    },
    TipTemplate {
        category: "간결한 문장 구성",
        tip: "한 문장에 하나의 성과만 담으세요",
        example: "여러 업무를 동시에 수행하며… → 핵심 성과 3개를 각각 한 줄로 분리",
        reason: "긴 문장은 성과를 묻어버리고 가독성을 떨어뜨립니다",
    },
];

fn tip_templates(category: RoleCategory) -> &'static [TipTemplate; 3] {
    match category {
        RoleCategory::Frontend => &FRONTEND_TIPS,
        RoleCategory::Backend => &BACKEND_TIPS,
        RoleCategory::Fullstack => &FULLSTACK_TIPS,
        RoleCategory::Data => &DATA_TIPS,
        RoleCategory::DevOps => &DEVOPS_TIPS,
        RoleCategory::General => &GENERAL_TIPS,
    }
}

/// Exactly three ordered tips, fully determined by the category.
pub fn tips_for(category: RoleCategory) -> Vec<WritingTip> {
    tip_templates(category)
        .iter()
        .map(|template| WritingTip {
            category: template.category.to_string(),
            tip: template.tip.to_string(),
            example: template.example.to_string(),
            reason: template.reason.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: [RoleCategory; 6] = [
        RoleCategory::Frontend,
        RoleCategory::Backend,
        RoleCategory::Fullstack,
        RoleCategory::Data,
        RoleCategory::DevOps,
        RoleCategory::General,
    ];

    #[test]
    fn test_every_category_has_exactly_three_tips() {
        for category in ALL_CATEGORIES {
            assert_eq!(tips_for(category).len(), 3, "category {category:?}");
        }
    }

    #[test]
    fn test_tips_are_deterministic_per_category() {
        for category in ALL_CATEGORIES {
            assert_eq!(tips_for(category), tips_for(category));
        }
    }

    #[test]
    fn test_frontend_first_tip_is_tech_stack_guidance() {
        let tips = tips_for(RoleCategory::Frontend);
        assert!(tips[0].category.contains("기술 스택 작성법"));
    }

    #[test]
    fn test_every_category_has_five_keywords() {
        for category in ALL_CATEGORIES {
            assert!(
                keywords_for(category).len() >= 5,
                "category {category:?} needs at least 5 keywords"
            );
        }
    }

    #[test]
    fn test_frontend_keyword_feedback_cites_react_family() {
        let feedback = compose(
            RoleCategory::Frontend,
            Dimension::KeywordMatch,
            SectionStatus::Good,
        );
        assert!(feedback.contains("React"));
        assert!(feedback.contains("TypeScript"));
        assert!(feedback.contains("프론트엔드"));
    }

    #[test]
    fn test_keyword_feedback_cites_three_present_and_two_recommended() {
        let feedback = compose(
            RoleCategory::Backend,
            Dimension::KeywordMatch,
            SectionStatus::Good,
        );
        for present in ["Spring Boot", "Node.js", "PostgreSQL"] {
            assert!(feedback.contains(present), "missing present keyword {present}");
        }
        for recommended in ["Redis", "Kafka"] {
            assert!(
                feedback.contains(recommended),
                "missing recommended keyword {recommended}"
            );
        }
    }

    #[test]
    fn test_compose_is_total_over_all_combinations() {
        for category in ALL_CATEGORIES {
            for dimension in Dimension::ALL {
                for status in [SectionStatus::Good, SectionStatus::NeedsImprovement] {
                    let feedback = compose(category, dimension, status);
                    assert!(!feedback.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_non_keyword_feedback_is_category_independent() {
        let frontend = compose(
            RoleCategory::Frontend,
            Dimension::AtsFriendly,
            SectionStatus::Good,
        );
        let data = compose(RoleCategory::Data, Dimension::AtsFriendly, SectionStatus::Good);
        assert_eq!(frontend, data);
    }
}
