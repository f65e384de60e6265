use tracing::info;

use super::ActionLog;
use crate::errors::AppError;

/// Placeholder written when the candidate has no email on file.
pub const MISSING_EMAIL: &str = "email_not_found";

/// Simulates sending an interview invitation. Returns the logged line.
pub async fn schedule_interview(
    log: &ActionLog,
    candidate_name: &str,
    email: Option<&str>,
    job_title: &str,
) -> Result<String, AppError> {
    info!(
        "Simulating interview schedule for {} for job '{}'",
        candidate_name, job_title
    );
    log.append(&invitation_message(candidate_name, email, job_title))
        .await
}

fn invitation_message(candidate_name: &str, email: Option<&str>, job_title: &str) -> String {
    let email = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(MISSING_EMAIL);
    format!(
        "Simulated interview invitation sent to {candidate_name} ({email}) \
         for the position of '{job_title}'."
    )
}
