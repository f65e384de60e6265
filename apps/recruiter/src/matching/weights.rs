//! Score combiner: role-dependent linear blend of keyword and semantic scores.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;

/// Key every weight table must define.
pub const DEFAULT_ROLE: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub keyword: f64,
    pub semantic: f64,
}

impl Weights {
    pub const fn new(keyword: f64, semantic: f64) -> Self {
        Self { keyword, semantic }
    }

    /// `keyword * k + semantic * s`.
    ///
    /// Stays within [0, 1] only when the weights sum to 1.0 and are
    /// non-negative; that is the caller's contract, not checked here.
    pub fn combine(&self, keyword_score: f64, semantic_score: f64) -> f64 {
        self.keyword * keyword_score + self.semantic * semantic_score
    }

    pub fn sum(&self) -> f64 {
        self.keyword + self.semantic
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::new(0.4, 0.6)
    }
}

/// Exact-title weight overrides with a required fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    default: Weights,
    by_title: HashMap<String, Weights>,
}

impl Default for WeightTable {
    /// Keyword-heavy for clerical roles, semantic-heavy for senior engineering.
    fn default() -> Self {
        WeightTable::new(Weights::default())
            .with_title("Data Entry Clerk", Weights::new(0.7, 0.3))
            .with_title("Senior Software Engineer", Weights::new(0.3, 0.7))
    }
}

impl WeightTable {
    pub fn new(default: Weights) -> Self {
        Self {
            default,
            by_title: HashMap::new(),
        }
    }

    pub fn with_title(mut self, title: &str, weights: Weights) -> Self {
        self.by_title.insert(title.to_string(), weights);
        self
    }

    /// Exact, case-sensitive title match; anything else gets the default.
    pub fn for_title(&self, job_title: Option<&str>) -> Weights {
        job_title
            .and_then(|title| self.by_title.get(title))
            .copied()
            .unwrap_or(self.default)
    }

    pub fn default_weights(&self) -> Weights {
        self.default
    }

    /// Parses `{"default": {...}, "<job title>": {...}}`.
    ///
    /// A missing `default` entry or a negative weight is a configuration
    /// error. Weights that do not sum to 1.0 are accepted with a warning.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let mut entries: HashMap<String, Weights> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("invalid weight table: {e}")))?;

        let default = entries.remove(DEFAULT_ROLE).ok_or_else(|| {
            AppError::Config(format!("weight table has no '{DEFAULT_ROLE}' entry"))
        })?;

        let table = WeightTable {
            default,
            by_title: entries,
        };
        table.validate()?;
        Ok(table)
    }

    /// Loads the table at `path`, or the built-in table when no path is given.
    pub async fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(WeightTable::default());
        };
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!("cannot read weight table {}: {e}", path.display()))
        })?;
        let table = Self::from_json(&json)?;
        info!(
            "Loaded weight table from {} ({} role overrides, default {:?})",
            path.display(),
            table.by_title.len(),
            table.default_weights()
        );
        Ok(table)
    }

    fn validate(&self) -> Result<(), AppError> {
        let entries = std::iter::once((DEFAULT_ROLE, &self.default))
            .chain(self.by_title.iter().map(|(k, v)| (k.as_str(), v)));

        for (role, weights) in entries {
            if weights.keyword < 0.0 || weights.semantic < 0.0 {
                return Err(AppError::Config(format!(
                    "weights for '{role}' must be non-negative"
                )));
            }
            if (weights.sum() - 1.0).abs() > 1e-6 {
                warn!(
                    role,
                    sum = weights.sum(),
                    "weights do not sum to 1.0; final scores may leave [0, 1]"
                );
            }
        }
        Ok(())
    }
}
