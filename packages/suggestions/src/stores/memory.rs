//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::{StatementStore, SuggestionStore};
use crate::types::{NewStatement, NewSuggestion, Statement, Suggestion};

/// In-memory storage for statements and suggestions.
///
/// Records are kept per incident in insertion order. Useful for testing and
/// development; data is lost on restart.
pub struct MemoryStore {
    statements: RwLock<HashMap<Uuid, Vec<Statement>>>,
    suggestions: RwLock<HashMap<Uuid, Vec<Suggestion>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            statements: RwLock::new(HashMap::new()),
            suggestions: RwLock::new(HashMap::new()),
        }
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.statements.write().unwrap().clear();
        self.suggestions.write().unwrap().clear();
    }

    /// Get the number of stored statements across all incidents.
    pub fn statement_count(&self) -> usize {
        self.statements.read().unwrap().values().map(Vec::len).sum()
    }

    /// Get the number of stored suggestions across all incidents.
    pub fn suggestion_count(&self) -> usize {
        self.suggestions
            .read()
            .unwrap()
            .values()
            .map(Vec::len)
            .sum()
    }
}

#[async_trait]
impl StatementStore for MemoryStore {
    async fn create_statement(&self, statement: NewStatement) -> Result<Statement> {
        let stored = Statement {
            id: Uuid::new_v4(),
            incident_id: statement.incident_id,
            content: statement.content,
            speaker: statement.speaker,
            created_at: chrono::Utc::now(),
        };
        self.statements
            .write()
            .unwrap()
            .entry(stored.incident_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn statements_for_incident(&self, incident_id: Uuid) -> Result<Vec<Statement>> {
        Ok(self
            .statements
            .read()
            .unwrap()
            .get(&incident_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SuggestionStore for MemoryStore {
    async fn create_suggestion(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
        let stored = Suggestion {
            id: Uuid::new_v4(),
            incident_id: suggestion.incident_id,
            statement_id: suggestion.statement_id,
            kind: suggestion.kind,
            title: suggestion.title,
            description: suggestion.description,
            content: suggestion.content,
            created_at: chrono::Utc::now(),
        };
        self.suggestions
            .write()
            .unwrap()
            .entry(stored.incident_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn suggestions_for_incident(&self, incident_id: Uuid) -> Result<Vec<Suggestion>> {
        Ok(self
            .suggestions
            .read()
            .unwrap()
            .get(&incident_id)
            .cloned()
            .unwrap_or_default())
    }
}
