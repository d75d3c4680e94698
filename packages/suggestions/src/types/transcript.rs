use serde_json::Value;

use crate::error::{Result, SuggestionError};

/// One entry of an uploaded transcript, before it becomes a persisted
/// [`Statement`](crate::types::Statement).
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatement {
    pub text: String,
    pub speaker: Option<String>,
    /// Per-entry delay hint carried by some transcript exports. Parsed and
    /// kept, but pacing is derived from the replay window, not from this.
    pub delay: Option<f64>,
}

impl RawStatement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: None,
            delay: None,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}

/// Parses an uploaded transcript document into its ordered statements.
///
/// Two document shapes are accepted: an object with a `meeting_transcript`
/// array, or a bare array. Entries may be plain strings or objects carrying
/// `content` (or `text`), an optional `speaker`, and an optional `delay`.
/// Entries whose text is empty after trimming are skipped; entries of any
/// other type fail the whole document.
pub fn parse_transcript(raw: &str) -> Result<Vec<RawStatement>> {
    let document: Value = serde_json::from_str(raw).map_err(|e| {
        SuggestionError::InvalidTranscript {
            reason: format!("not valid JSON: {e}"),
        }
    })?;

    let entries = match &document {
        Value::Object(map) => map
            .get("meeting_transcript")
            .and_then(Value::as_array)
            .ok_or_else(|| SuggestionError::InvalidTranscript {
                reason: "expected a `meeting_transcript` array".to_string(),
            })?,
        Value::Array(entries) => entries,
        _ => {
            return Err(SuggestionError::InvalidTranscript {
                reason: "expected an object or array at the top level".to_string(),
            })
        }
    };

    let mut statements = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            Value::String(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                statements.push(RawStatement::new(text.clone()));
            }
            Value::Object(map) => {
                // `content` wins when both keys are present.
                let text = map
                    .get("content")
                    .and_then(Value::as_str)
                    .or_else(|| map.get("text").and_then(Value::as_str))
                    .unwrap_or_default();
                if text.trim().is_empty() {
                    continue;
                }
                let mut statement = RawStatement::new(text);
                statement.speaker = map
                    .get("speaker")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                statement.delay = map.get("delay").and_then(Value::as_f64);
                statements.push(statement);
            }
            _ => {
                return Err(SuggestionError::InvalidTranscript {
                    reason: format!("entry {idx} is not an object or string"),
                })
            }
        }
    }

    Ok(statements)
}
