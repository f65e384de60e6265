//! Downstream actions on shortlisted candidates. Both are simulated: they
//! append a timestamped line to a log under `{data_dir}/logs/`.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ShortlistEntry;
use crate::store::JobStore;

pub mod feedback;
pub mod scheduling;

pub use feedback::{log_feedback, FeedbackKind};
pub use scheduling::schedule_interview;

const LOGS_DIR: &str = "logs";
pub const INTERVIEWS_LOG: &str = "interviews.log";
pub const FEEDBACK_LOG: &str = "feedback.log";

/// Append-only, line-oriented action log.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    /// `{data_dir}/logs/{file_name}`. Nothing is created until the first append.
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        Self {
            path: data_dir.join(LOGS_DIR).join(file_name),
        }
    }

    /// Writes `[YYYY-MM-DD HH:MM:SS] - {message}` and returns the line without
    /// its newline.
    pub async fn append(&self, message: &str) -> Result<String, AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let line = format!("[{}] - {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{line}\n").as_bytes()).await?;
        file.flush().await?;

        info!("Logged to {}", self.path.display());
        Ok(line)
    }
}

/// A stored shortlist entry by zero-based position, with the job's title.
pub async fn shortlisted_candidate(
    store: &JobStore,
    job_id: Uuid,
    index: usize,
) -> Result<(String, ShortlistEntry), AppError> {
    let record = store.get_job(job_id).await?;
    let size = record.shortlist.len();
    let title = record.job_profile.title_or_default().to_string();

    let entry = record.shortlist.into_iter().nth(index).ok_or_else(|| {
        AppError::NotFound(format!(
            "shortlist position {index} for job {job_id} (shortlist has {size} entries)"
        ))
    })?;
    Ok((title, entry))
}
