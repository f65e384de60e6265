//! Embedding capability: turns text into fixed-length vectors for semantic matching.
//!
//! Backends:
//! - `HashEmbedder`: signed feature hashing, offline and deterministic (default).
//! - `HttpEmbedder`: any OpenAI-compatible `/embeddings` endpoint serving a
//!   sentence-transformer model.
//!
//! `AppState` holds an `Arc<dyn Embedder>` built once by `build_embedder`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, EmbeddingBackend};

pub mod hash;
pub mod http;
#[cfg(test)]
pub mod testing;

pub use hash::HashEmbedder;
pub use http::HttpEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("embedding API returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("embedding API returned index {got} at position {position}")]
    IndexMismatch { position: usize, got: usize },

    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding backend unavailable: {0}")]
    Unavailable(String),
}

/// The embedding trait. Implement this to swap backends without touching
/// the scorers or the pipeline.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend label ("hash", "http") for logs.
    fn name(&self) -> &'static str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds several texts, preserving order. Backends with a batch API
    /// should override this.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Builds the configured embedding backend.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let embedder: Arc<dyn Embedder> = match config.embedding.backend {
        EmbeddingBackend::Hash => Arc::new(HashEmbedder::new(config.embedding.dimension)),
        EmbeddingBackend::Http => Arc::new(HttpEmbedder::new(
            config.embedding.base_url.clone(),
            config.embedding.model.clone(),
            config.embedding.api_key.clone(),
        )?),
    };
    Ok(embedder)
}

/// Cosine similarity in [-1, 1]. Zero vectors give 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::FixedEmbedder;

    #[test]
    fn test_identical_vectors_score_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors_score_minus_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let err = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch { left: 3, right: 2 }
        ));
    }

    #[tokio::test]
    async fn test_default_batch_preserves_order() {
        let embedder = FixedEmbedder::new()
            .with("a", vec![1.0, 0.0])
            .with("b", vec![0.0, 1.0]);
        let vectors = embedder
            .embed_batch(&["b".to_string(), "a".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_build_embedder_defaults_to_hash() {
        let config = Config::from_lookup(|_| None).unwrap();
        let embedder = build_embedder(&config).unwrap();
        assert_eq!(embedder.name(), "hash");
    }
}
