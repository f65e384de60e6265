use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::actions::FeedbackKind;

#[derive(Parser, Debug)]
#[command(
    name = "recruiter",
    about = "Parse job descriptions and resumes, rank candidates and manage shortlists",
    version
)]
pub struct Cli {
    /// Override DATA_DIR for this invocation
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a job description (PDF or text) and store it as a new job
    AddJob {
        file: PathBuf,
    },
    /// Parse resumes (PDF or text) and attach them to a job
    AddResumes {
        job_id: Uuid,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List stored jobs, newest first
    Jobs,
    /// Show a stored job, its candidate count and its indexed shortlist
    Show {
        job_id: Uuid,
    },
    /// Match, rank and shortlist a stored job's candidates
    Run(RunArgs),
    /// Rank candidate profile JSON files against a job profile JSON file
    Rank(RankArgs),
    /// Shortlist a ranked candidates JSON file
    Shortlist(ShortlistArgs),
    /// Simulate an interview invitation for a shortlisted candidate
    Schedule {
        job_id: Uuid,
        /// Zero-based position in the stored shortlist
        index: usize,
    },
    /// Log reviewer feedback for a shortlisted candidate
    Feedback {
        job_id: Uuid,
        /// Zero-based position in the stored shortlist
        index: usize,
        /// positive or negative
        kind: FeedbackKind,
    },
}

#[derive(Args, Debug)]
pub struct CriteriaArgs {
    /// Minimum final match score (defaults to SHORTLIST_THRESHOLD)
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Maximum shortlist size (defaults to SHORTLIST_TOP_N)
    #[arg(long)]
    pub top_n: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    pub job_id: Uuid,
    #[command(flatten)]
    pub criteria: CriteriaArgs,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Job profile JSON
    #[arg(long)]
    pub job: PathBuf,
    /// Directory of candidate profile JSON files
    #[arg(long)]
    pub candidates: PathBuf,
    /// Where to write the ranked candidates
    #[arg(long, default_value = "ranked_candidates.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShortlistArgs {
    /// Ranked candidates JSON
    #[arg(long, default_value = "ranked_candidates.json")]
    pub input: PathBuf,
    /// Where to write the shortlist
    #[arg(long, default_value = "final_shortlist.json")]
    pub output: PathBuf,
    #[command(flatten)]
    pub criteria: CriteriaArgs,
}
