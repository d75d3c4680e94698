//! Request and response types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};

/// A content block: ordered parts plus an optional role.
///
/// The same shape appears in requests (user turns) and responses (model turns).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A single content part. Only text parts are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Build a single-turn request from one user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
                role: None,
            }],
        }
    }
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}

/// Simplified response: the first candidate's text plus usage accounting.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Text of the first candidate.
    pub text: String,

    /// Token usage, when the API reports it.
    pub usage: Option<UsageMetadata>,
}

/// Raw wire response from `generateContent`.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<CandidateRaw>,

    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One candidate in the raw response.
///
/// `content` is absent when generation was blocked (e.g. safety filters).
#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRaw {
    pub content: Option<Content>,
}
