use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of leading characters used when matching a quoted passage back to
/// the statement it came from.
pub const REFERENCE_PREFIX_CHARS: usize = 30;

/// A single utterance within an incident, persisted with its position in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub incident_id: Uuid,
    /// Verbatim text of the utterance
    pub content: String,
    /// Who said it, when the transcript records a speaker
    pub speaker: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Statement {
    /// The leading characters of this statement's content, used to locate the
    /// statement a model-quoted passage refers to. Counted in characters, not
    /// bytes, so multibyte text never splits a code point.
    pub fn reference_prefix(&self) -> String {
        self.content.chars().take(REFERENCE_PREFIX_CHARS).collect()
    }
}

/// Input for creating a new statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStatement {
    pub incident_id: Uuid,
    pub content: String,
    pub speaker: Option<String>,
}

impl NewStatement {
    pub fn new(incident_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            incident_id,
            content: content.into(),
            speaker: None,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}
