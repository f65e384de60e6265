use serde::{Deserialize, Serialize};

use crate::models::candidate::{CandidateProfile, ContactInfo, UNKNOWN_CANDIDATE};

/// Match result for one (job, candidate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoredCandidate {
    pub candidate_name: String,
    pub original_filename: Option<String>,
    /// Jaccard overlap of skills, [0, 1]
    pub keyword_match_score: f64,
    /// Mean cosine similarity of experience vs responsibilities, clamped to [0, 1]
    pub semantic_match_score: f64,
    pub final_match_score: f64,
    pub contact_info: ContactInfo,
}

impl Default for ScoredCandidate {
    fn default() -> Self {
        Self {
            candidate_name: UNKNOWN_CANDIDATE.to_string(),
            original_filename: None,
            keyword_match_score: 0.0,
            semantic_match_score: 0.0,
            final_match_score: 0.0,
            contact_info: ContactInfo::default(),
        }
    }
}

impl ScoredCandidate {
    pub fn new(candidate: &CandidateProfile, keyword: f64, semantic: f64, final_score: f64) -> Self {
        Self {
            candidate_name: candidate.display_name().to_string(),
            original_filename: candidate.original_filename.clone(),
            keyword_match_score: keyword,
            semantic_match_score: semantic,
            final_match_score: final_score,
            contact_info: candidate.contact_info.clone(),
        }
    }
}

/// A shortlisted candidate with the reason they made the cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    #[serde(flatten)]
    pub candidate: ScoredCandidate,
    pub explanation: String,
}
