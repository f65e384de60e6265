//! Job store: one pretty-printed JSON document per job under `{data_dir}/jobs/`.
//!
//! Writes go to a temp file in the same directory and are renamed into place,
//! so a crash never leaves a half-written record. Read-modify-write cycles
//! are serialised per store through an async mutex.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{CandidateProfile, JobProfile, ShortlistEntry};

const JOBS_DIR: &str = "jobs";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    JobNotFound(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt job record {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("atomic write failed: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Everything stored for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub job_profile: JobProfile,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
    /// Last shortlist produced for this job, in rank order.
    #[serde(default)]
    pub shortlist: Vec<ShortlistEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
    pub candidates: usize,
}

impl From<&JobRecord> for JobSummary {
    fn from(record: &JobRecord) -> Self {
        Self {
            id: record.id,
            job_title: record.job_profile.title_or_default().to_string(),
            created_at: record.created_at,
            candidates: record.candidates.len(),
        }
    }
}

#[derive(Clone)]
pub struct JobStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JobStore {
    /// Opens the store, creating `{data_dir}/jobs` if needed.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let dir = data_dir.join(JOBS_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        info!("Job store opened at {}", dir.display());
        Ok(Self {
            dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub async fn create_job(&self, job_profile: JobProfile) -> Result<JobRecord, StoreError> {
        let record = JobRecord {
            id: Uuid::new_v4(),
            job_profile,
            created_at: Utc::now(),
            candidates: Vec::new(),
            shortlist: Vec::new(),
        };
        let _guard = self.write_lock.lock().await;
        self.write(&record).await?;
        info!(
            "Created job {} ('{}')",
            record.id,
            record.job_profile.title_or_default()
        );
        Ok(record)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<JobRecord, StoreError> {
        let path = self.path_for(id);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::JobNotFound(id))
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// All jobs, newest first. Unreadable records are logged and skipped.
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>, StoreError> {
        let mut summaries = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let Some(id) = record_id(&entry.path()) else {
                continue;
            };
            match self.get_job(id).await {
                Ok(record) => summaries.push(JobSummary::from(&record)),
                Err(e) => warn!("Skipping job record {}: {}", entry.path().display(), e),
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Appends a candidate and returns the job's new candidate count.
    pub async fn add_candidate(
        &self,
        id: Uuid,
        candidate: CandidateProfile,
    ) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.get_job(id).await?;
        debug!("Adding candidate {} to job {}", candidate.display_name(), id);
        record.candidates.push(candidate);
        self.write(&record).await?;
        Ok(record.candidates.len())
    }

    pub async fn candidates_for_job(&self, id: Uuid) -> Result<Vec<CandidateProfile>, StoreError> {
        Ok(self.get_job(id).await?.candidates)
    }

    /// Replaces the job's shortlist. Positions are kept exactly as given.
    pub async fn save_shortlist(
        &self,
        id: Uuid,
        shortlist: Vec<ShortlistEntry>,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.get_job(id).await?;
        record.shortlist = shortlist;
        self.write(&record).await?;
        info!("Saved shortlist of {} for job {}", record.shortlist.len(), id);
        Ok(())
    }

    pub async fn get_shortlist(&self, id: Uuid) -> Result<Vec<ShortlistEntry>, StoreError> {
        Ok(self.get_job(id).await?.shortlist)
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn write(&self, record: &JobRecord) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(record)?;
        let dir = self.dir.clone();
        let path = self.path_for(record.id);
        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &json))
            .await
            .map_err(std::io::Error::other)?
    }
}

fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// The job id encoded in a `{uuid}.json` file name.
fn record_id(path: &Path) -> Option<Uuid> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
