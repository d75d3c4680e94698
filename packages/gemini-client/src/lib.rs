//! Pure Google Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Callers own prompting and response interpretation;
//! this crate owns transport, authentication, and wire types.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Single-turn text generation
//! let text = client.generate_text("Summarize this outage in one line").await?;
//!
//! // Full request / response with usage accounting
//! let response = client
//!     .generate_content(GenerateContentRequest::from_prompt("Hello!"))
//!     .await?;
//! println!("{} ({:?} tokens)", response.text, response.usage);
//! ```

pub mod credentials;
pub mod error;
pub mod types;

pub use credentials::SecretString;
pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for text generation.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default per-request timeout. Replay pacing assumes one slow model call
/// cannot stall an incident for long.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: SecretString::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Use a different model (default: `gemini-2.0-flash`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content from a full request.
    ///
    /// Returns the first candidate's text. An empty candidate list (safety
    /// block, empty prompt) is a `Parse` error, never a panic.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose()
        );

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the key in its query string; strip it
                // before the error reaches logs.
                let e = e.without_url();
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.without_url().to_string()))?;

        let usage = raw.usage_metadata;
        let text = raw
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GeminiError::Parse("No candidates in Gemini response".into()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini content generation"
        );

        Ok(GenerateResponse { text, usage })
    }

    /// Single-turn text generation from one prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate_content(GenerateContentRequest::from_prompt(prompt))
            .await?;
        Ok(response.text)
    }
}
