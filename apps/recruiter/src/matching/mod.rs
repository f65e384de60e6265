//! Candidate matching: keyword and semantic scorers, the weighted combiner,
//! the ranker, and the pipeline that drives them for one job.

pub mod keyword;
pub mod pipeline;
pub mod ranker;
pub mod semantic;
pub mod weights;

pub use pipeline::{EmbeddingFailurePolicy, MatchingPipeline};
pub use weights::WeightTable;
