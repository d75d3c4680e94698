//! Gemini implementation of the generation backend.
//!
//! A thin adapter over the `gemini-client` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use suggestions::{GeminiModel, SuggestionPipeline, SuggestionHub, MemoryStore};
//!
//! let model = GeminiModel::from_env()?;
//! let pipeline = SuggestionPipeline::new(MemoryStore::new(), model, SuggestionHub::new());
//! ```

use async_trait::async_trait;
use gemini_client::GeminiClient;

use crate::error::{Result, SuggestionError};
use crate::traits::GenerativeModel;

/// Gemini-backed text generation.
#[derive(Clone)]
pub struct GeminiModel {
    client: GeminiClient,
}

impl GeminiModel {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let client = GeminiClient::from_env().map_err(|e| SuggestionError::Model(Box::new(e)))?;
        Ok(Self::new(client))
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.client
            .generate_text(prompt)
            .await
            .map_err(|e| SuggestionError::Model(Box::new(e)))
    }
}
