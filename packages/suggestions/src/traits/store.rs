//! Storage traits for statements and suggestions.
//!
//! The storage layer is split into focused traits:
//! - `StatementStore`: Persisted transcript statements
//! - `SuggestionStore`: Extracted suggestions
//! - `IncidentStore`: Composite trait combining both

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{NewStatement, NewSuggestion, Statement, Suggestion};

/// Persistence for incident statements.
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Persist a statement and return the stored record.
    async fn create_statement(&self, statement: NewStatement) -> Result<Statement>;

    /// All statements for an incident, oldest first.
    async fn statements_for_incident(&self, incident_id: Uuid) -> Result<Vec<Statement>>;

    /// The trailing `limit` statements for an incident, oldest first.
    async fn recent_statements(&self, incident_id: Uuid, limit: usize) -> Result<Vec<Statement>> {
        let mut statements = self.statements_for_incident(incident_id).await?;
        let skip = statements.len().saturating_sub(limit);
        Ok(statements.split_off(skip))
    }
}

/// Persistence for extracted suggestions.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Persist a suggestion and return the stored record.
    async fn create_suggestion(&self, suggestion: NewSuggestion) -> Result<Suggestion>;

    /// All suggestions for an incident, oldest first.
    async fn suggestions_for_incident(&self, incident_id: Uuid) -> Result<Vec<Suggestion>>;

    /// The `limit` most recent suggestion descriptions, newest first.
    async fn recent_descriptions(&self, incident_id: Uuid, limit: usize) -> Result<Vec<String>> {
        Ok(self
            .suggestions_for_incident(incident_id)
            .await?
            .into_iter()
            .rev()
            .take(limit)
            .map(|s| s.description)
            .collect())
    }

    /// Every suggestion description for an incident, oldest first.
    ///
    /// Deduplication compares against the incident's whole history, not a
    /// window, so this is the comparison set for novelty checks.
    async fn all_descriptions(&self, incident_id: Uuid) -> Result<Vec<String>> {
        Ok(self
            .suggestions_for_incident(incident_id)
            .await?
            .into_iter()
            .map(|s| s.description)
            .collect())
    }
}

/// Composite storage trait combining statements and suggestions.
///
/// This is the main trait used by the pipeline.
pub trait IncidentStore: StatementStore + SuggestionStore {}

// Blanket implementation: anything implementing both traits is an IncidentStore
impl<T: StatementStore + SuggestionStore> IncidentStore for T {}
