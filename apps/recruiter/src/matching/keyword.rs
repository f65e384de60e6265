//! Keyword scorer: Jaccard overlap between required and possessed skills.

use std::collections::HashSet;

use crate::models::CandidateSkills;

/// Jaccard similarity |J ∩ C| / |J ∪ C| over trimmed, lowercased skills.
///
/// Returns 0.0 when either side has no skills. Symmetric in its two sets.
pub fn keyword_match_score(job_skills: &[String], candidate_skills: &CandidateSkills) -> f64 {
    let job = normalize(job_skills.iter().map(String::as_str));
    let candidate = normalize(candidate_skills.iter());
    jaccard(&job, &candidate)
}

fn normalize<'a>(skills: impl Iterator<Item = &'a str>) -> HashSet<String> {
    skills
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
