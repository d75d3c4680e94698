//! Rolling per-incident context fed to the extraction prompt.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::error::Result;
use crate::traits::IncidentStore;
use crate::types::{PipelineConfig, Statement};

/// The sliding window of recent material for one incident: the trailing
/// statements that become the prompt's transcript excerpt, and the most
/// recent suggestion descriptions shown to the model as already-covered
/// ground.
///
/// A window is owned mutably by whoever is processing its incident. Passing
/// `&mut ContextWindow` through the pipeline is what serializes statement
/// handling within an incident; separate incidents hold separate windows and
/// proceed independently.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    incident_id: Uuid,
    max_statements: usize,
    max_descriptions: usize,
    /// Oldest first, so iteration reads like the transcript
    statements: VecDeque<Statement>,
    /// Newest first, so iteration starts with the latest suggestion
    descriptions: VecDeque<String>,
}

impl ContextWindow {
    pub fn new(incident_id: Uuid, config: &PipelineConfig) -> Self {
        Self {
            incident_id,
            max_statements: config.context_statements,
            max_descriptions: config.recent_descriptions,
            statements: VecDeque::with_capacity(config.context_statements),
            descriptions: VecDeque::with_capacity(config.recent_descriptions),
        }
    }

    /// Rebuilds a window from storage, picking up where a previous replay or
    /// ingest left off.
    pub async fn rebuild<S: IncidentStore>(
        store: &S,
        incident_id: Uuid,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let mut window = Self::new(incident_id, config);
        for statement in store
            .recent_statements(incident_id, config.context_statements)
            .await?
        {
            window.push_statement(statement);
        }
        // Store hands descriptions newest first; reinsert oldest first so the
        // deque ends up in its canonical order.
        for description in store
            .recent_descriptions(incident_id, config.recent_descriptions)
            .await?
            .into_iter()
            .rev()
        {
            window.push_description(description);
        }
        Ok(window)
    }

    pub fn push_statement(&mut self, statement: Statement) {
        self.statements.push_back(statement);
        while self.statements.len() > self.max_statements {
            self.statements.pop_front();
        }
    }

    pub fn push_description(&mut self, description: String) {
        self.descriptions.push_front(description);
        while self.descriptions.len() > self.max_descriptions {
            self.descriptions.pop_back();
        }
    }

    /// Statements currently in the window, oldest first.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Statement contents in transcript order, ready for prompt assembly.
    pub fn statement_texts(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.content.as_str()).collect()
    }

    /// Recent suggestion descriptions, newest first.
    pub fn recent_descriptions(&self) -> Vec<&str> {
        self.descriptions.iter().map(String::as_str).collect()
    }

    pub fn incident_id(&self) -> Uuid {
        self.incident_id
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
