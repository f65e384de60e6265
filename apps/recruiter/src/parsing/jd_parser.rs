//! JD Parser: turns raw job-description text into a `JobProfile`.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::NULL_WHEN_ABSENT;
use crate::llm_client::LlmClient;
use crate::models::JobProfile;
use crate::parsing::prompts::{JD_PARSE_PROMPT_TEMPLATE, JD_PARSE_SYSTEM};

/// Parses a job description using the LLM.
/// Blank text is rejected before any request is made.
pub async fn parse_job_description(jd_text: &str, llm: &LlmClient) -> Result<JobProfile, AppError> {
    let prompt = build_prompt(jd_text)?;
    let job = llm
        .call_json::<JobProfile>(&prompt, JD_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD parsing failed: {e}")))?;

    info!(
        "Parsed job description '{}' ({} skills, {} responsibilities)",
        job.title_or_default(),
        job.required_skills.len(),
        job.responsibilities.len()
    );
    Ok(job)
}

fn build_prompt(jd_text: &str) -> Result<String, AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "job description text is empty".to_string(),
        ));
    }
    Ok(JD_PARSE_PROMPT_TEMPLATE
        .replace("{null_when_absent}", NULL_WHEN_ABSENT)
        .replace("{jd_text}", jd_text.trim()))
}
