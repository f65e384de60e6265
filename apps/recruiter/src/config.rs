use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, ensure, Context, Result};

use crate::matching::EmbeddingFailurePolicy;
use crate::shortlist::ShortlistCriteria;

const DEFAULT_LLM_BASE_URL: &str = "https://router.huggingface.co/v1";
const DEFAULT_LLM_MODEL: &str = "openai/gpt-oss-20b:fireworks-ai";
const DEFAULT_EMBEDDING_BASE_URL: &str = "http://localhost:8080/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
/// all-MiniLM-L6-v2 output size; the hash embedder mirrors it.
const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

/// Application configuration loaded from environment variables.
/// Only the LLM key is optional at startup; commands that need it check on use.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    /// JSON weight table; the built-in table is used when unset.
    pub weights_path: Option<PathBuf>,
    pub shortlist: ShortlistCriteria,
    pub on_embedding_error: EmbeddingFailurePolicy,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub dimension: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hash,
    Http,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(EmbeddingBackend::Hash),
            "http" => Ok(EmbeddingBackend::Http),
            other => Err(anyhow!("unknown embedding backend '{other}' (expected hash|http)")),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = ShortlistCriteria::default();
        let threshold = parse_or(
            "SHORTLIST_THRESHOLD",
            get("SHORTLIST_THRESHOLD"),
            defaults.threshold,
        )?;
        ensure!(
            threshold.is_finite(),
            "SHORTLIST_THRESHOLD must be a finite number, got {threshold}"
        );

        Ok(Config {
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            llm: LlmConfig {
                api_key: get("LLM_API_KEY").or_else(|| get("HF_TOKEN")),
                base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            },
            embedding: EmbeddingConfig {
                backend: parse_or(
                    "EMBEDDING_BACKEND",
                    get("EMBEDDING_BACKEND"),
                    EmbeddingBackend::Hash,
                )?,
                base_url: get("EMBEDDING_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_BASE_URL.to_string()),
                model: get("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                api_key: get("EMBEDDING_API_KEY"),
                dimension: parse_or(
                    "EMBEDDING_DIMENSION",
                    get("EMBEDDING_DIMENSION"),
                    DEFAULT_EMBEDDING_DIMENSION,
                )?,
            },
            weights_path: get("WEIGHTS_PATH").map(PathBuf::from),
            shortlist: ShortlistCriteria {
                threshold,
                top_n: parse_or("SHORTLIST_TOP_N", get("SHORTLIST_TOP_N"), defaults.top_n)?,
            },
            on_embedding_error: parse_or(
                "ON_EMBEDDING_ERROR",
                get("ON_EMBEDDING_ERROR"),
                EmbeddingFailurePolicy::Abort,
            )?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The LLM key, or an error naming the variables to set.
    pub fn require_llm_key(&self) -> Result<&str> {
        self.llm
            .api_key
            .as_deref()
            .context("Required environment variable 'LLM_API_KEY' (or 'HF_TOKEN') is not set")
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has invalid value '{value}': {e}")),
    }
}
