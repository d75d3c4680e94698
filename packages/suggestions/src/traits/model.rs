//! Model trait for LLM text generation.

use async_trait::async_trait;

use crate::error::Result;

/// A text-generation backend.
///
/// Implementations wrap specific LLM providers and handle transport concerns.
/// Prompt construction and response parsing live in
/// [`ModelClient`](crate::model::ModelClient), so a backend only has to turn
/// a prompt into text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
