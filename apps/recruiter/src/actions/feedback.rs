use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::ActionLog;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Positive => write!(f, "positive"),
            FeedbackKind::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for FeedbackKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(FeedbackKind::Positive),
            "negative" => Ok(FeedbackKind::Negative),
            other => Err(AppError::Validation(format!(
                "feedback must be 'positive' or 'negative', got '{other}'"
            ))),
        }
    }
}

/// Records reviewer feedback on a candidate. Returns the logged line.
pub async fn log_feedback(
    log: &ActionLog,
    candidate_name: &str,
    job_title: &str,
    kind: FeedbackKind,
) -> Result<String, AppError> {
    info!(
        "Logging '{}' feedback for {} for job '{}'",
        kind, candidate_name, job_title
    );
    log.append(&format!(
        "Candidate '{candidate_name}' received {kind} feedback for the position of '{job_title}'."
    ))
    .await
}
