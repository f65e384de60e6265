use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::models::{CandidateProfile, JobProfile, ScoredCandidate};

use super::keyword::keyword_match_score;
use super::ranker::rank;
use super::semantic::semantic_match_score;
use super::weights::WeightTable;

/// What to do with a candidate whose semantic score cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingFailurePolicy {
    /// Fail the whole run with the embedding error.
    #[default]
    Abort,
    /// Log a warning and leave the candidate out of the ranking.
    Skip,
}

impl FromStr for EmbeddingFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(EmbeddingFailurePolicy::Abort),
            "skip" => Ok(EmbeddingFailurePolicy::Skip),
            other => Err(anyhow!(
                "unknown embedding failure policy '{other}' (expected abort|skip)"
            )),
        }
    }
}

impl fmt::Display for EmbeddingFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingFailurePolicy::Abort => write!(f, "abort"),
            EmbeddingFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

// ────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────

/// Scores one job against a batch of candidates and ranks the results.
#[derive(Clone)]
pub struct MatchingPipeline {
    embedder: Arc<dyn Embedder>,
    weights: WeightTable,
    policy: EmbeddingFailurePolicy,
}

impl MatchingPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        weights: WeightTable,
        policy: EmbeddingFailurePolicy,
    ) -> Self {
        Self {
            embedder,
            weights,
            policy,
        }
    }

    /// Keyword, semantic and weighted final score for a single candidate.
    pub async fn score_candidate(
        &self,
        job: &JobProfile,
        candidate: &CandidateProfile,
    ) -> Result<ScoredCandidate, AppError> {
        let keyword = finite_or_zero(keyword_match_score(
            &job.required_skills,
            &candidate.skills,
        ));
        let semantic = finite_or_zero(
            semantic_match_score(
                self.embedder.as_ref(),
                &job.responsibilities,
                &candidate.experience,
            )
            .await?,
        );

        let weights = self.weights.for_title(job.job_title.as_deref());
        let final_score = finite_or_zero(weights.combine(keyword, semantic));

        debug!(
            candidate = candidate.display_name(),
            keyword, semantic, final_score, "candidate scored"
        );

        Ok(ScoredCandidate::new(candidate, keyword, semantic, final_score))
    }

    /// Scores every candidate sequentially, then ranks.
    ///
    /// Under `Skip` a candidate whose embedding fails is dropped from the
    /// result; under `Abort` the first failure is returned.
    pub async fn run(
        &self,
        job: &JobProfile,
        candidates: &[CandidateProfile],
    ) -> Result<Vec<ScoredCandidate>, AppError> {
        info!(
            "Matching {} candidates against '{}' (embedder: {}, on embedding error: {})",
            candidates.len(),
            job.title_or_default(),
            self.embedder.name(),
            self.policy
        );

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.score_candidate(job, candidate).await {
                Ok(result) => scored.push(result),
                Err(AppError::Embedding(e)) if self.policy == EmbeddingFailurePolicy::Skip => {
                    warn!(
                        candidate = candidate.display_name(),
                        error = %e,
                        "embedding failed, candidate skipped"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let ranked = rank(scored);
        info!(
            "Ranked {} of {} candidates",
            ranked.len(),
            candidates.len()
        );
        Ok(ranked)
    }
}

fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}
