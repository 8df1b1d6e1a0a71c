//! Roadmap Client — the paid seven-year plan, built from a profile and its assessment.
//!
//! Only the request itself lives here. The staged "AI, then expert" reveal is
//! presentation timing owned by `session::presentation`.

use tracing::info;

use crate::advisory::prompts::ROADMAP_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_OBJECT_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, CompletionBackend, LlmError};
use crate::models::assessment::AssessmentResult;
use crate::models::profile::UserProfile;
use crate::models::roadmap::StrategyRoadmap;

pub fn build_roadmap_prompt(profile: &UserProfile, assessment: &AssessmentResult) -> String {
    let vars = [
        ("recommended_path", assessment.recommended_path.clone()),
        ("score", assessment.score.label().to_string()),
        ("study", assessment.suitability.study.to_string()),
        ("ttps", assessment.suitability.ttps.to_string()),
        ("qmas", assessment.suitability.qmas.to_string()),
        ("next_steps", assessment.next_steps.join("；")),
        ("last_year_income_hkd", profile.last_year_income_hkd.to_string()),
        ("industry", profile.industry.clone()),
    ];

    format!(
        "{}\n\n{}",
        render(ROADMAP_PROMPT_TEMPLATE, &vars),
        JSON_OBJECT_INSTRUCTION
    )
}

/// Sends one completion request and returns the validated roadmap.
pub async fn generate_strategy_roadmap(
    profile: &UserProfile,
    assessment: &AssessmentResult,
    llm: &dyn CompletionBackend,
) -> Result<StrategyRoadmap, AppError> {
    let prompt = build_roadmap_prompt(profile, assessment);
    let roadmap: StrategyRoadmap = call_json(llm, JSON_ONLY_SYSTEM, &prompt).await?;
    roadmap.validate().map_err(LlmError::Schema)?;

    info!(
        "Roadmap produced: {} milestones, {} risks, {} tips",
        roadmap.milestones.len(),
        roadmap.risks.len(),
        roadmap.tips.len()
    );
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::models::assessment::sample_assessment;
    use crate::models::roadmap::{sample_roadmap, MilestoneStatus};
    use serde_json::json;

    #[test]
    fn test_prompt_carries_assessment_and_profile_context() {
        let profile = UserProfile {
            industry: "生物醫藥".to_string(),
            last_year_income_hkd: 1_200_000,
            ..UserProfile::default()
        };
        let prompt = build_roadmap_prompt(&profile, &sample_assessment());
        assert!(prompt.contains("推薦路徑: 香港碩士留學"));
        assert!(prompt.contains("背景良好"));
        assert!(prompt.contains("留學 80 / 高才通 60 / 優才 45"));
        assert!(prompt.contains("準備雅思；整理稅單"));
        assert!(prompt.contains("1200000 HKD"));
        assert!(prompt.contains("生物醫藥"));
    }

    #[tokio::test]
    async fn test_generates_roadmap_with_one_call() {
        let reply = serde_json::to_value(sample_roadmap()).unwrap();
        let backend = ScriptedBackend::new().reply(reply);

        let roadmap =
            generate_strategy_roadmap(&UserProfile::default(), &sample_assessment(), &backend)
                .await
                .unwrap();

        assert_eq!(roadmap, sample_roadmap());
        assert_eq!(roadmap.milestones[0].status, MilestoneStatus::Active);
        assert_eq!(backend.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_milestones_rejected() {
        let backend = ScriptedBackend::new().reply(json!({
            "summary": "概述",
            "milestones": [],
            "risks": [],
            "tips": []
        }));
        let err = generate_strategy_roadmap(&UserProfile::default(), &sample_assessment(), &backend)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Schema(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let backend = ScriptedBackend::new().fail(LlmError::MissingApiKey);
        let err = generate_strategy_roadmap(&UserProfile::default(), &sample_assessment(), &backend)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::MissingApiKey)));
    }
}
