//! Command handlers. Each returns plain data; `dispatch` prints it.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::actions::{
    log_feedback, schedule_interview, shortlisted_candidate, ActionLog, FeedbackKind,
    FEEDBACK_LOG, INTERVIEWS_LOG,
};
use crate::cli::{Command, CriteriaArgs};
use crate::errors::AppError;
use crate::matching::ranker::rank;
use crate::models::{CandidateProfile, JobProfile, ScoredCandidate, ShortlistEntry};
use crate::parsing::{parse_job_description, parse_resume, read_document};
use crate::shortlist::{shortlist, ShortlistCriteria};
use crate::state::AppState;
use crate::store::{JobRecord, JobSummary};

pub async fn dispatch(state: &AppState, command: Command) -> Result<(), AppError> {
    match command {
        Command::AddJob { file } => {
            let record = add_job(state, &file).await?;
            println!("{}\t{}", record.id, record.job_profile.title_or_default());
        }
        Command::AddResumes { job_id, files } => {
            let report = add_resumes(state, job_id, &files).await?;
            println!(
                "Added {} resume(s) to job {} ({} failed, {} total)",
                report.added,
                job_id,
                report.failed.len(),
                report.total
            );
            for path in &report.failed {
                println!("  failed: {}", path.display());
            }
        }
        Command::Jobs => {
            for job in list_jobs(state).await? {
                println!(
                    "{}\t{}\t{}\t{} candidate(s)",
                    job.id,
                    job.created_at.format("%Y-%m-%d %H:%M"),
                    job.job_title,
                    job.candidates
                );
            }
        }
        Command::Show { job_id } => {
            let view = show_job(state, job_id).await?;
            println!("{}", serde_json::to_string_pretty(&view.job_profile)?);
            println!("Candidates: {}", view.summary.candidates);
            if view.shortlist.is_empty() {
                println!("No shortlist yet; run `recruiter run {job_id}`");
            }
            for (index, entry) in view.shortlist.iter().enumerate() {
                println!(
                    "[{index}] {}\t{:.2}\t{}",
                    entry.candidate.candidate_name,
                    entry.candidate.final_match_score,
                    entry.explanation
                );
            }
        }
        Command::Run(args) => {
            let criteria = criteria_from(&args.criteria, &state.config.shortlist)?;
            let entries = run_job(state, args.job_id, &criteria).await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Rank(args) => {
            let ranked = rank_files(state, &args.job, &args.candidates).await?;
            write_json(&args.output, &ranked).await?;
            println!("Ranked {} candidate(s) into {}", ranked.len(), args.output.display());
        }
        Command::Shortlist(args) => {
            let criteria = criteria_from(&args.criteria, &state.config.shortlist)?;
            let entries = shortlist_file(&args.input, &criteria).await?;
            write_json(&args.output, &entries).await?;
            println!(
                "Shortlisted {} candidate(s) into {}",
                entries.len(),
                args.output.display()
            );
        }
        Command::Schedule { job_id, index } => {
            println!("{}", schedule(state, job_id, index).await?);
        }
        Command::Feedback {
            job_id,
            index,
            kind,
        } => {
            println!("{}", feedback(state, job_id, index, kind).await?);
        }
    }
    Ok(())
}

fn criteria_from(
    args: &CriteriaArgs,
    defaults: &ShortlistCriteria,
) -> Result<ShortlistCriteria, AppError> {
    let threshold = args.threshold.unwrap_or(defaults.threshold);
    if !threshold.is_finite() {
        return Err(AppError::Validation(format!(
            "--threshold must be a finite number, got {threshold}"
        )));
    }
    Ok(ShortlistCriteria {
        threshold,
        top_n: args.top_n.unwrap_or(defaults.top_n),
    })
}

// ────────────────────────────────────────────────────────────
// Stored jobs
// ────────────────────────────────────────────────────────────

pub async fn add_job(state: &AppState, file: &Path) -> Result<JobRecord, AppError> {
    let llm = state.llm()?;
    let text = read_document(file).await?;
    let profile = parse_job_description(&text, llm).await?;
    Ok(state.store.create_job(profile).await?)
}

#[derive(Debug, Default)]
pub struct AddResumesReport {
    pub added: usize,
    pub failed: Vec<PathBuf>,
    /// Candidates on the job after the batch.
    pub total: usize,
}

/// Parses and attaches each resume in turn. A failing file is logged and
/// recorded in the report; the rest of the batch still runs.
pub async fn add_resumes(
    state: &AppState,
    job_id: Uuid,
    files: &[PathBuf],
) -> Result<AddResumesReport, AppError> {
    let llm = state.llm()?;
    // fail fast on an unknown job before spending LLM calls
    state.store.get_job(job_id).await?;

    let mut report = AddResumesReport::default();
    for file in files {
        let parsed = async {
            let text = read_document(file).await?;
            let mut profile = parse_resume(&text, llm).await?;
            profile.original_filename = file_name(file);
            state.store.add_candidate(job_id, profile).await?;
            Ok::<_, AppError>(())
        }
        .await;

        match parsed {
            Ok(()) => report.added += 1,
            Err(e) => {
                error!(code = e.code(), "Failed to add resume {}: {}", file.display(), e);
                report.failed.push(file.clone());
            }
        }
    }
    report.total = state.store.candidates_for_job(job_id).await?.len();
    Ok(report)
}

pub async fn list_jobs(state: &AppState) -> Result<Vec<JobSummary>, AppError> {
    Ok(state.store.list_jobs().await?)
}

#[derive(Debug)]
pub struct JobView {
    pub summary: JobSummary,
    pub job_profile: JobProfile,
    /// Stored shortlist; positions are the indices `schedule` and `feedback` take.
    pub shortlist: Vec<ShortlistEntry>,
}

/// Reads a job and its last shortlist without re-scoring anything.
pub async fn show_job(state: &AppState, job_id: Uuid) -> Result<JobView, AppError> {
    let record = state.store.get_job(job_id).await?;
    let shortlist = state.store.get_shortlist(job_id).await?;
    Ok(JobView {
        summary: JobSummary::from(&record),
        job_profile: record.job_profile,
        shortlist,
    })
}

/// Scores every stored candidate, shortlists, and persists the shortlist.
pub async fn run_job(
    state: &AppState,
    job_id: Uuid,
    criteria: &ShortlistCriteria,
) -> Result<Vec<ShortlistEntry>, AppError> {
    let record = state.store.get_job(job_id).await?;
    if record.candidates.is_empty() {
        warn!("Job {} has no candidates yet", job_id);
    }

    let ranked = state
        .pipeline
        .run(&record.job_profile, &record.candidates)
        .await?;
    let entries = shortlist(&ranked, criteria);
    info!(
        "Shortlisted {} of {} ranked candidates (threshold {}, top {})",
        entries.len(),
        ranked.len(),
        criteria.threshold,
        criteria.top_n
    );

    state.store.save_shortlist(job_id, entries.clone()).await?;
    Ok(entries)
}

pub async fn schedule(state: &AppState, job_id: Uuid, index: usize) -> Result<String, AppError> {
    let (title, entry) = shortlisted_candidate(&state.store, job_id, index).await?;
    let log = ActionLog::new(&state.config.data_dir, INTERVIEWS_LOG);
    schedule_interview(
        &log,
        &entry.candidate.candidate_name,
        entry.candidate.contact_info.email.as_deref(),
        &title,
    )
    .await
}

pub async fn feedback(
    state: &AppState,
    job_id: Uuid,
    index: usize,
    kind: FeedbackKind,
) -> Result<String, AppError> {
    let (title, entry) = shortlisted_candidate(&state.store, job_id, index).await?;
    let log = ActionLog::new(&state.config.data_dir, FEEDBACK_LOG);
    log_feedback(&log, &entry.candidate.candidate_name, &title, kind).await
}

// ────────────────────────────────────────────────────────────
// File-based matching
// ────────────────────────────────────────────────────────────

/// Ranks every `*.json` profile in `candidates_dir` against the job file.
/// Files are read in name order; unreadable profiles are logged and skipped.
pub async fn rank_files(
    state: &AppState,
    job_file: &Path,
    candidates_dir: &Path,
) -> Result<Vec<ScoredCandidate>, AppError> {
    let job: JobProfile = read_json(job_file).await?;

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(candidates_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut candidates = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_json::<CandidateProfile>(path).await {
            Ok(mut profile) => {
                profile.original_filename = file_name(path);
                candidates.push(profile);
            }
            Err(e) => warn!("Skipping candidate file {}: {}", path.display(), e),
        }
    }

    state.pipeline.run(&job, &candidates).await
}

pub async fn shortlist_file(
    input: &Path,
    criteria: &ShortlistCriteria,
) -> Result<Vec<ShortlistEntry>, AppError> {
    let ranked: Vec<ScoredCandidate> = read_json(input).await?;
    Ok(shortlist(&rank(ranked), criteria))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::NotFound(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&json).map_err(|e| {
        AppError::Validation(format!("{} is not valid JSON: {e}", path.display()))
    })
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_vec_pretty(value)?).await?;
    Ok(())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::ContactInfo;
    use crate::models::{CandidateSkills, ExperienceEntry};
    use crate::state::testing::offline_state;
    use serde_json::json;

    fn job(title: &str, skills: &[&str]) -> JobProfile {
        JobProfile {
            job_title: Some(title.to_string()),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            responsibilities: vec!["Build data pipelines in Python".to_string()],
            ..Default::default()
        }
    }

    fn candidate(name: &str, email: Option<&str>, skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            candidate_name: Some(name.to_string()),
            contact_info: ContactInfo {
                email: email.map(str::to_string),
                ..Default::default()
            },
            skills: CandidateSkills::Flat(skills.iter().map(|s| s.to_string()).collect()),
            experience: vec![ExperienceEntry::Text(
                "Built data pipelines in Python and SQL".to_string(),
            )],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_job_persists_shortlist_and_actions_use_it() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;

        let record = state
            .store
            .create_job(job("Data Engineer", &["python", "sql"]))
            .await
            .unwrap();
        for c in [
            candidate("Ada", Some("ada@example.com"), &["Python", "SQL"]),
            candidate("Bo", None, &["Python"]),
            candidate("Cy", None, &["Photoshop"]),
        ] {
            state.store.add_candidate(record.id, c).await.unwrap();
        }

        let criteria = ShortlistCriteria {
            threshold: 0.0,
            top_n: 2,
        };
        let entries = run_job(&state, record.id, &criteria).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].candidate.candidate_name, "Ada");
        let stored = state.store.get_shortlist(record.id).await.unwrap();
        let stored_names: Vec<&str> = stored
            .iter()
            .map(|e| e.candidate.candidate_name.as_str())
            .collect();
        assert_eq!(stored_names, vec!["Ada", "Bo"]);
        assert_eq!(stored[0].explanation, entries[0].explanation);

        let line = schedule(&state, record.id, 0).await.unwrap();
        assert!(line.ends_with(
            "Simulated interview invitation sent to Ada (ada@example.com) \
             for the position of 'Data Engineer'."
        ));

        let second = &entries[1].candidate.candidate_name;
        let line = feedback(&state, record.id, 1, FeedbackKind::Positive)
            .await
            .unwrap();
        assert!(line.ends_with(&format!(
            "Candidate '{second}' received positive feedback for the position of 'Data Engineer'."
        )));

        let err = schedule(&state, record.id, 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_show_job_lists_the_indices_actions_use() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let record = state
            .store
            .create_job(job("Data Engineer", &["python", "sql"]))
            .await
            .unwrap();

        let view = show_job(&state, record.id).await.unwrap();
        assert_eq!(view.summary.candidates, 0);
        assert!(view.shortlist.is_empty());

        for c in [
            candidate("Bo", None, &["Python"]),
            candidate("Ada", Some("ada@example.com"), &["Python", "SQL"]),
        ] {
            state.store.add_candidate(record.id, c).await.unwrap();
        }
        let entries = run_job(
            &state,
            record.id,
            &ShortlistCriteria {
                threshold: 0.0,
                top_n: 5,
            },
        )
        .await
        .unwrap();

        let view = show_job(&state, record.id).await.unwrap();
        assert_eq!(view.summary.candidates, 2);
        assert_eq!(view.job_profile.title_or_default(), "Data Engineer");
        let shown: Vec<(&str, &str)> = view
            .shortlist
            .iter()
            .map(|e| (e.candidate.candidate_name.as_str(), e.explanation.as_str()))
            .collect();
        let produced: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.candidate.candidate_name.as_str(), e.explanation.as_str()))
            .collect();
        assert_eq!(shown, produced);
        assert_eq!(shown[0].0, "Ada");

        for (index, entry) in view.shortlist.iter().enumerate() {
            let line = feedback(&state, record.id, index, FeedbackKind::Negative)
                .await
                .unwrap();
            assert!(line.contains(&format!(
                "Candidate '{}' received negative feedback",
                entry.candidate.candidate_name
            )));
        }

        // showing again leaves the stored shortlist untouched
        let again = show_job(&state, record.id).await.unwrap();
        assert_eq!(again.shortlist, view.shortlist);
    }

    #[tokio::test]
    async fn test_show_unknown_job() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let err = show_job(&state, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_email_is_logged_as_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let record = state
            .store
            .create_job(job("Data Engineer", &["python"]))
            .await
            .unwrap();
        state
            .store
            .add_candidate(record.id, candidate("Bo", None, &["Python"]))
            .await
            .unwrap();
        run_job(&state, record.id, &ShortlistCriteria::default())
            .await
            .unwrap();

        let line = schedule(&state, record.id, 0).await.unwrap();
        assert!(line.contains("Bo (email_not_found)"));
    }

    #[tokio::test]
    async fn test_run_unknown_job() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let err = run_job(&state, Uuid::new_v4(), &ShortlistCriteria::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_parse_commands_need_an_llm_key() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let err = add_job(&state, &dir.path().join("jd.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        let err = add_resumes(&state, Uuid::new_v4(), &[dir.path().join("cv.pdf")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_rank_files_then_shortlist_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;

        let job_path = dir.path().join("job.json");
        tokio::fs::write(
            &job_path,
            json!({
                "job_title": "Data Engineer",
                "required_skills": ["python", "sql"],
                "responsibilities": []
            })
            .to_string(),
        )
        .await
        .unwrap();

        let candidates_dir = dir.path().join("candidates");
        tokio::fs::create_dir_all(&candidates_dir).await.unwrap();
        tokio::fs::write(
            candidates_dir.join("ada_structured.json"),
            json!({"candidate_name": "Ada", "skills": {"languages": ["Python"], "databases": ["SQL"]}})
                .to_string(),
        )
        .await
        .unwrap();
        tokio::fs::write(
            candidates_dir.join("bo_structured.json"),
            json!({"candidate_name": "Bo", "skills": ["Python", "Java"]}).to_string(),
        )
        .await
        .unwrap();
        tokio::fs::write(candidates_dir.join("broken.json"), "{").await.unwrap();
        tokio::fs::write(candidates_dir.join("notes.txt"), "ignored").await.unwrap();

        let ranked = rank_files(&state, &job_path, &candidates_dir).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate_name, "Ada");
        assert_eq!(
            ranked[0].original_filename.as_deref(),
            Some("ada_structured.json")
        );
        // Bo: Jaccard 1/3, no responsibilities → 0.4 * 1/3
        assert!((ranked[1].final_match_score - 0.4 / 3.0).abs() < 1e-9);

        let ranked_path = dir.path().join("out").join("ranked_candidates.json");
        write_json(&ranked_path, &ranked).await.unwrap();

        let entries = shortlist_file(
            &ranked_path,
            &ShortlistCriteria {
                threshold: 0.1,
                top_n: 5,
            },
        )
        .await
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1]
            .explanation
            .contains("potential fit despite lower overall score"));
    }

    #[tokio::test]
    async fn test_shortlist_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = shortlist_file(&dir.path().join("nope.json"), &ShortlistCriteria::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_criteria_overrides() {
        let defaults = ShortlistCriteria::default();
        let merged = criteria_from(
            &CriteriaArgs {
                threshold: None,
                top_n: Some(3),
            },
            &defaults,
        )
        .unwrap();
        assert_eq!(merged.top_n, 3);
        assert!((merged.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_threshold_override_is_rejected() {
        let defaults = ShortlistCriteria::default();
        for threshold in [f64::NAN, f64::INFINITY] {
            let err = criteria_from(
                &CriteriaArgs {
                    threshold: Some(threshold),
                    top_n: None,
                },
                &defaults,
            )
            .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }
}
