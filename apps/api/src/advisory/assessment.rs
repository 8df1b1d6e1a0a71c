//! Assessment Client — turns a submitted profile into a free `AssessmentResult`.

use tracing::info;

use crate::advisory::prompts::ASSESSMENT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, yes_no, JSON_OBJECT_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, CompletionBackend, LlmError};
use crate::models::assessment::AssessmentResult;
use crate::models::profile::UserProfile;

/// Builds the assessment instruction. Deterministic: the same profile always
/// yields the same prompt, and every profile field appears in it.
pub fn build_assessment_prompt(profile: &UserProfile) -> String {
    let vars = [
        ("name", profile.name.clone()),
        ("gender", profile.gender.clone()),
        ("age", profile.age.to_string()),
        ("location", profile.location.clone()),
        ("education", profile.education.label().to_string()),
        ("university", profile.university.clone()),
        ("major", profile.major.clone()),
        ("is_qualified_uni", yes_no(profile.is_qualified_uni).to_string()),
        ("is_stem", yes_no(profile.is_stem).to_string()),
        ("industry", profile.industry.clone()),
        ("work_exp", profile.work_exp.label().to_string()),
        (
            "degree_level_work_years",
            profile.degree_level_work_years.to_string(),
        ),
        ("mnc_work_years", profile.mnc_work_years.to_string()),
        (
            "specific_sector_work_years",
            profile.specific_sector_work_years.to_string(),
        ),
        ("intl_work_years", profile.intl_work_years.to_string()),
        ("has_fortune500_exp", yes_no(profile.has_fortune500_exp).to_string()),
        ("last_year_income_hkd", profile.last_year_income_hkd.to_string()),
        ("owns_business", yes_no(profile.owns_business).to_string()),
        ("business_profit_hkd", profile.business_profit_hkd.to_string()),
        ("owns_listed_co", yes_no(profile.owns_listed_co).to_string()),
        ("budget", profile.budget.clone()),
        ("languages", profile.languages.clone()),
        ("is_bilingual", yes_no(profile.is_bilingual).to_string()),
        ("english_level", profile.english_level.clone()),
        ("is_english_fluent", yes_no(profile.is_english_fluent).to_string()),
        ("has_dependents", yes_no(profile.has_dependents).to_string()),
        ("additional_info", profile.additional_info.clone()),
    ];

    format!(
        "{}\n\n{}",
        render(ASSESSMENT_PROMPT_TEMPLATE, &vars),
        JSON_OBJECT_INSTRUCTION
    )
}

/// Sends one completion request and returns the validated assessment.
///
/// No retry: on failure the caller presents the error and no partial result exists.
pub async fn get_free_assessment(
    profile: &UserProfile,
    llm: &dyn CompletionBackend,
) -> Result<AssessmentResult, AppError> {
    let prompt = build_assessment_prompt(profile);
    let result: AssessmentResult = call_json(llm, JSON_ONLY_SYSTEM, &prompt).await?;
    result.validate().map_err(LlmError::Schema)?;

    info!(
        "Assessment produced: score={}, study={}, ttps={}, qmas={}",
        result.score.label(),
        result.suitability.study,
        result.suitability.ttps,
        result.suitability.qmas
    );
    Ok(result)
}
