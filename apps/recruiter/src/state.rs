use tracing::info;

use crate::config::Config;
use crate::embedding::build_embedder;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::{MatchingPipeline, WeightTable};
use crate::store::JobStore;

/// Shared application state handed to every command.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: JobStore,
    /// Embedder, weight table and failure policy, built once at startup.
    pub pipeline: MatchingPipeline,
    /// Only present when an LLM key is configured; parse commands need it.
    llm: Option<LlmClient>,
}

impl AppState {
    pub async fn init(config: Config) -> Result<Self, AppError> {
        let store = JobStore::open(&config.data_dir).await?;

        let embedder = build_embedder(&config)?;
        info!("Embedder initialized (backend: {})", embedder.name());

        let weights = WeightTable::load(config.weights_path.as_deref()).await?;
        let pipeline = MatchingPipeline::new(embedder, weights, config.on_embedding_error);

        let llm = match config.llm.api_key.clone() {
            Some(key) => {
                let client = LlmClient::new(key, &config.llm.base_url, config.llm.model.clone())?;
                info!("LLM client initialized (model: {})", client.model());
                Some(client)
            }
            None => None,
        };

        Ok(Self {
            config,
            store,
            pipeline,
            llm,
        })
    }

    pub fn llm(&self) -> Result<&LlmClient, AppError> {
        match &self.llm {
            Some(llm) => Ok(llm),
            None => {
                let key_error = self.config.require_llm_key().err();
                Err(AppError::Config(key_error.map_or_else(
                    || "LLM client is not configured".to_string(),
                    |e| e.to_string(),
                )))
            }
        }
    }
}
