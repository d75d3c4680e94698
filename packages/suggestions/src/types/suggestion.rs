use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of an extracted suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    ActionItem,
    TriggerEvent,
    RootCause,
    Metadata,
}

impl SuggestionKind {
    /// Maps a model-reported type label to a kind. Labels the model was never
    /// asked for fall back to [`SuggestionKind::Metadata`] rather than failing
    /// the whole candidate.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Action Item" | "action_item" => Self::ActionItem,
            "Trigger Event" | "trigger_event" => Self::TriggerEvent,
            "Root Cause" | "root_cause" => Self::RootCause,
            "Missing Metadata" | "metadata" => Self::Metadata,
            _ => Self::Metadata,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionItem => "action_item",
            Self::TriggerEvent => "trigger_event",
            Self::RootCause => "root_cause",
            Self::Metadata => "metadata",
        }
    }
}

/// A persisted suggestion, tied to the statement it was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub incident_id: Uuid,
    /// The statement this suggestion references (resolved from the model's
    /// quoted passage, or the triggering statement when nothing matched)
    pub statement_id: Uuid,
    pub kind: SuggestionKind,
    /// Short summary, when the model produced one
    pub title: Option<String>,
    /// User-facing description of the suggestion
    pub description: String,
    /// Content of the referenced statement at extraction time
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub incident_id: Uuid,
    pub statement_id: Uuid,
    pub kind: SuggestionKind,
    pub title: Option<String>,
    pub description: String,
    pub content: String,
}

/// One suggestion candidate produced by the model for a single statement.
///
/// A well-formed response yields `Structured` entries. When the model ignores
/// the output contract and returns prose or a bare string, the raw text is
/// carried through as a `Fallback` candidate so nothing the model said is
/// silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Structured {
        /// Model-reported type label, mapped via [`SuggestionKind::from_label`]
        kind: Option<String>,
        title: Option<String>,
        description: String,
        /// Passage the model quoted in support of the suggestion
        referenced_message: Option<String>,
    },
    Fallback {
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_snake_case_labels() {
        assert_eq!(
            SuggestionKind::from_label("action_item"),
            SuggestionKind::ActionItem
        );
        assert_eq!(
            SuggestionKind::from_label("trigger_event"),
            SuggestionKind::TriggerEvent
        );
        assert_eq!(
            SuggestionKind::from_label("root_cause"),
            SuggestionKind::RootCause
        );
        assert_eq!(
            SuggestionKind::from_label("metadata"),
            SuggestionKind::Metadata
        );
    }

    #[test]
    fn test_maps_display_labels() {
        assert_eq!(
            SuggestionKind::from_label("Action Item"),
            SuggestionKind::ActionItem
        );
        assert_eq!(
            SuggestionKind::from_label("Trigger Event"),
            SuggestionKind::TriggerEvent
        );
        assert_eq!(
            SuggestionKind::from_label("Root Cause"),
            SuggestionKind::RootCause
        );
        assert_eq!(
            SuggestionKind::from_label("Missing Metadata"),
            SuggestionKind::Metadata
        );
    }

    #[test]
    fn test_unknown_labels_default_to_metadata() {
        assert_eq!(
            SuggestionKind::from_label("observation"),
            SuggestionKind::Metadata
        );
        assert_eq!(SuggestionKind::from_label(""), SuggestionKind::Metadata);
        // Case-sensitive: an unexpected casing is an unknown label.
        assert_eq!(
            SuggestionKind::from_label("ACTION_ITEM"),
            SuggestionKind::Metadata
        );
    }

    #[test]
    fn test_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&SuggestionKind::ActionItem).unwrap();
        assert_eq!(json, "\"action_item\"");
    }
}
