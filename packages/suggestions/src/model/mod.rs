//! Model-facing half of the pipeline: prompt assembly and response parsing.
//!
//! [`ModelClient`] wraps any [`GenerativeModel`] backend and turns transcript
//! context into suggestion candidates. Parsing is deliberately tolerant:
//! models wrap JSON in code fences, drop fields, and sometimes answer in
//! prose, and none of that should abort a replay.

pub mod gemini;

pub use gemini::GeminiModel;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::prompts::format_extract_prompt;
use crate::traits::GenerativeModel;
use crate::types::Candidate;

/// Removes a Markdown code fence wrapper (```json ... ``` or ``` ... ```)
/// from a model response. Text without a fence passes through unchanged.
pub fn strip_code_fences(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    referenced_message: Option<String>,
}

/// One array entry as the model actually returns it: ideally an object, but
/// models that were told not to return strings still return strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCandidate {
    Structured(RawSuggestion),
    Text(String),
}

/// Parses a model response into suggestion candidates.
///
/// Code fences are stripped before parsing. A response that is not a JSON
/// array at all becomes a single fallback candidate carrying the original
/// text, so the pipeline can still surface whatever the model said. An empty
/// array is a valid response meaning "nothing new here".
pub fn parse_candidates(response: &str) -> Vec<Candidate> {
    let cleaned = strip_code_fences(response);
    match serde_json::from_str::<Vec<RawCandidate>>(cleaned) {
        Ok(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                RawCandidate::Structured(raw) => Candidate::Structured {
                    kind: raw.kind,
                    title: raw.title,
                    description: raw.description,
                    referenced_message: raw.referenced_message,
                },
                RawCandidate::Text(text) => Candidate::Fallback { text },
            })
            .collect(),
        Err(e) => {
            debug!(error = %e, "Model response was not a JSON array; keeping raw text");
            vec![Candidate::Fallback {
                text: response.to_string(),
            }]
        }
    }
}

/// Suggestion extraction over any generation backend.
pub struct ModelClient<G: GenerativeModel> {
    backend: G,
}

impl<G: GenerativeModel> ModelClient<G> {
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Ask the model for suggestion candidates given a transcript excerpt and
    /// the recent descriptions it must not repeat.
    pub async fn extract(
        &self,
        context: &[&str],
        previous_descriptions: &[&str],
    ) -> Result<Vec<Candidate>> {
        let prompt = format_extract_prompt(context, previous_descriptions);
        debug!(
            context_statements = context.len(),
            previous_descriptions = previous_descriptions.len(),
            prompt_chars = prompt.chars().count(),
            "Requesting suggestion extraction"
        );
        let response = self.backend.generate(&prompt).await?;
        Ok(parse_candidates(&response))
    }
}
