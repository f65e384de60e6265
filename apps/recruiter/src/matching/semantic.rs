//! Semantic scorer: embedding similarity of experience narratives against
//! job responsibilities.
//!
//! Aggregation is the mean of per-document cosine similarities, so broad
//! alignment across a candidate's history outweighs one strongly matching
//! role. The aggregate is clamped to [0, 1].

use tracing::debug;

use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::models::ExperienceEntry;

/// Scores candidate experience against job responsibilities.
///
/// Returns `Ok(0.0)` without touching the embedder when either side has no text.
/// Embedding failures propagate; the caller decides whether to skip or abort.
pub async fn semantic_match_score(
    embedder: &dyn Embedder,
    job_responsibilities: &[String],
    experience: &[ExperienceEntry],
) -> Result<f64, EmbeddingError> {
    let Some(job_document) = job_document(job_responsibilities) else {
        return Ok(0.0);
    };
    let candidate_documents = experience_documents(experience);
    if candidate_documents.is_empty() {
        return Ok(0.0);
    }

    let job_vector = embedder.embed(&job_document).await?;
    let candidate_vectors = embedder.embed_batch(&candidate_documents).await?;
    if candidate_vectors.len() != candidate_documents.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: candidate_documents.len(),
            got: candidate_vectors.len(),
        });
    }

    let mut total = 0.0;
    for vector in &candidate_vectors {
        total += cosine_similarity(&job_vector, vector)?;
    }
    let mean = total / candidate_vectors.len() as f64;

    debug!(
        documents = candidate_documents.len(),
        mean, "semantic similarity computed"
    );

    Ok(clamp_unit(mean))
}

/// Joins the non-blank responsibilities into one document.
fn job_document(responsibilities: &[String]) -> Option<String> {
    let lines: Vec<&str> = responsibilities
        .iter()
        .map(String::as_str)
        .filter(|line| !line.trim().is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join(" "))
}

/// One document per experience entry that carries any narrative.
pub fn experience_documents(experience: &[ExperienceEntry]) -> Vec<String> {
    experience.iter().filter_map(ExperienceEntry::document).collect()
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{FailingEmbedder, FixedEmbedder};
    use crate::embedding::HashEmbedder;
    use crate::models::candidate::ExperienceRecord;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record(lines: &[&str]) -> ExperienceEntry {
        ExperienceEntry::Record(ExperienceRecord {
            responsibilities: strings(lines),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_empty_responsibilities_skip_the_embedder() {
        let embedder = FixedEmbedder::new();
        let experience = vec![ExperienceEntry::Text("Built APIs".to_string())];
        let score = semantic_match_score(&embedder, &[], &experience)
            .await
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_experience_skips_the_embedder() {
        let embedder = FixedEmbedder::new();
        let experience = vec![
            ExperienceEntry::Text("   ".to_string()),
            record(&[]),
            ExperienceEntry::Other(serde_json::json!(3)),
        ];
        let score = semantic_match_score(&embedder, &strings(&["Build APIs"]), &experience)
            .await
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_mean_of_document_similarities() {
        // job · doc1 = 1.0, job · doc2 = 0.0 → mean 0.5
        let embedder = FixedEmbedder::new()
            .with("Design APIs Review code", vec![1.0, 0.0])
            .with("Designed APIs", vec![1.0, 0.0])
            .with("Ran a bakery", vec![0.0, 1.0]);
        let experience = vec![
            record(&["Designed APIs"]),
            ExperienceEntry::Text("Ran a bakery".to_string()),
        ];
        let score = semantic_match_score(
            &embedder,
            &strings(&["Design APIs", "Review code"]),
            &experience,
        )
        .await
        .unwrap();
        assert!((score - 0.5).abs() < 1e-9, "score was {score}");
        // one job call + two candidate calls through the default batch
        assert_eq!(embedder.calls(), 3);
    }

    #[tokio::test]
    async fn test_record_responsibilities_are_joined() {
        let embedder = FixedEmbedder::new()
            .with("Lead the team", vec![1.0, 1.0])
            .with("Hired engineers Ran standups", vec![1.0, 1.0]);
        let score = semantic_match_score(
            &embedder,
            &strings(&["Lead the team"]),
            &[record(&["Hired engineers", "", "Ran standups"])],
        )
        .await
        .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_negative_similarity_is_clamped_to_zero() {
        let embedder = FixedEmbedder::new()
            .with("Write Rust", vec![1.0, 0.0])
            .with("Avoided Rust", vec![-1.0, 0.0]);
        let score = semantic_match_score(
            &embedder,
            &strings(&["Write Rust"]),
            &[ExperienceEntry::Text("Avoided Rust".to_string())],
        )
        .await
        .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let result = semantic_match_score(
            &FailingEmbedder,
            &strings(&["Write Rust"]),
            &[ExperienceEntry::Text("Wrote Rust".to_string())],
        )
        .await;
        assert!(matches!(result, Err(EmbeddingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_propagates() {
        let embedder = FixedEmbedder::new()
            .with("Write Rust", vec![1.0, 0.0])
            .with("Wrote Rust", vec![1.0, 0.0, 0.0]);
        let result = semantic_match_score(
            &embedder,
            &strings(&["Write Rust"]),
            &[ExperienceEntry::Text("Wrote Rust".to_string())],
        )
        .await;
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[tokio::test]
    async fn test_hash_embedder_prefers_related_experience() {
        let embedder = HashEmbedder::new(384);
        let job = strings(&[
            "Build and maintain data pipelines in Python",
            "Model warehouse tables in SQL",
        ]);
        let related = semantic_match_score(
            &embedder,
            &job,
            &[record(&[
                "Built data pipelines in Python and Airflow",
                "Modelled warehouse tables in SQL",
            ])],
        )
        .await
        .unwrap();
        let unrelated = semantic_match_score(
            &embedder,
            &job,
            &[ExperienceEntry::Text(
                "Coordinated hospital ward nursing rotas".to_string(),
            )],
        )
        .await
        .unwrap();
        assert!(related > unrelated, "{related} vs {unrelated}");
        assert!((0.0..=1.0).contains(&related));
    }

    #[test]
    fn test_clamp_handles_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
    }
}
