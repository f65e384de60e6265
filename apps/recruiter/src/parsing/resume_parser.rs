//! Resume Parser: turns raw resume text into a `CandidateProfile`.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::NULL_WHEN_ABSENT;
use crate::llm_client::LlmClient;
use crate::models::CandidateProfile;
use crate::parsing::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};

pub async fn parse_resume(resume_text: &str, llm: &LlmClient) -> Result<CandidateProfile, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume text is empty".to_string()));
    }
    let prompt = build_prompt(resume_text);
    let profile = llm
        .call_json::<CandidateProfile>(&prompt, RESUME_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    info!(
        "Parsed resume for {} ({} experience entries)",
        profile.display_name(),
        profile.experience.len()
    );
    if profile.skills.is_empty() {
        warn!("Resume for {} yielded no skills", profile.display_name());
    }
    Ok(profile)
}

fn build_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE
        .replace("{null_when_absent}", NULL_WHEN_ABSENT)
        .replace("{resume_text}", resume_text.trim())
}
