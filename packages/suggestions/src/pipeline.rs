//! The extraction pipeline - main entry point for the suggestion library.
//!
//! The pipeline turns one new statement at a time into zero or more persisted
//! suggestions: it updates the incident's context window, asks the model for
//! candidates, gates each candidate through the novelty filter, resolves the
//! statement each one references, then persists and broadcasts the survivors.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::ContextWindow;
use crate::error::Result;
use crate::hub::SuggestionHub;
use crate::model::ModelClient;
use crate::novelty::NoveltyFilter;
use crate::traits::{GenerativeModel, IncidentStore};
use crate::types::{
    Candidate, NewStatement, NewSuggestion, PipelineConfig, Statement, Suggestion, SuggestionKind,
};

/// Suggestion extraction over a storage backend and a generation backend.
///
/// The pipeline itself is stateless across statements; all per-incident state
/// lives in the [`ContextWindow`] the caller holds. A statement is processed
/// under `&mut ContextWindow`, which is what keeps one incident's statements
/// strictly sequential: the novelty reads below depend on suggestions created
/// by the previous statement, so two statements of the same incident must
/// never run concurrently. Separate incidents hold separate windows and can
/// run in parallel against a shared pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use suggestions::{MemoryStore, SuggestionHub, SuggestionPipeline};
/// use suggestions::testing::ScriptedModel;
///
/// let pipeline = SuggestionPipeline::new(
///     MemoryStore::new(),
///     ScriptedModel::new(),
///     SuggestionHub::new(),
/// );
/// let mut window = pipeline.window(incident_id);
/// let (statement, suggestions) = pipeline
///     .ingest_statement(&mut window, NewStatement::new(incident_id, "Pages are firing"))
///     .await?;
/// ```
pub struct SuggestionPipeline<S: IncidentStore, G: GenerativeModel> {
    store: S,
    model: ModelClient<G>,
    filter: NoveltyFilter,
    hub: SuggestionHub,
    config: PipelineConfig,
}

impl<S: IncidentStore, G: GenerativeModel> SuggestionPipeline<S, G> {
    /// Create a new pipeline with default configuration.
    pub fn new(store: S, backend: G, hub: SuggestionHub) -> Self {
        Self::with_config(store, backend, hub, PipelineConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(store: S, backend: G, hub: SuggestionHub, config: PipelineConfig) -> Self {
        Self {
            store,
            model: ModelClient::new(backend),
            filter: NoveltyFilter::default(),
            hub,
            config,
        }
    }

    /// Replace the novelty filter.
    pub fn with_novelty_filter(mut self, filter: NoveltyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the model client.
    pub fn model(&self) -> &ModelClient<G> {
        &self.model
    }

    /// Get a reference to the hub.
    pub fn hub(&self) -> &SuggestionHub {
        &self.hub
    }

    /// A fresh, empty context window for an incident.
    pub fn window(&self, incident_id: Uuid) -> ContextWindow {
        ContextWindow::new(incident_id, &self.config)
    }

    /// A context window rebuilt from whatever the store already holds for the
    /// incident, for resuming after a restart or a previous replay.
    pub async fn rebuild_window(&self, incident_id: Uuid) -> Result<ContextWindow> {
        ContextWindow::rebuild(&self.store, incident_id, &self.config).await
    }

    /// Persist a statement, then extract suggestions for it.
    pub async fn ingest_statement(
        &self,
        window: &mut ContextWindow,
        statement: NewStatement,
    ) -> Result<(Statement, Vec<Suggestion>)> {
        let stored = self.store.create_statement(statement).await?;
        let suggestions = self.on_statement(window, &stored).await?;
        Ok((stored, suggestions))
    }

    /// Extract suggestions for an already-persisted statement.
    ///
    /// The window is updated before the model call, so a model failure leaves
    /// the window current and the next statement unaffected. Returns the
    /// suggestions that survived the novelty gate and were persisted.
    pub async fn on_statement(
        &self,
        window: &mut ContextWindow,
        statement: &Statement,
    ) -> Result<Vec<Suggestion>> {
        window.push_statement(statement.clone());

        let context = window.statement_texts();
        let previous = window.recent_descriptions();
        let candidates = self.model.extract(&context, &previous).await?;
        debug!(
            incident_id = %statement.incident_id,
            candidates = candidates.len(),
            "Model returned suggestion candidates"
        );

        // One history snapshot per statement: every candidate from this
        // response is gated against it, so near-duplicates within a single
        // response can both land. The gate guarantees dedup across statements.
        let existing = self.store.all_descriptions(statement.incident_id).await?;

        let mut created = Vec::new();
        for candidate in candidates {
            let (kind, title, description, referenced) = match candidate {
                Candidate::Structured {
                    kind,
                    title,
                    description,
                    referenced_message,
                } => (
                    kind.as_deref()
                        .map_or(SuggestionKind::Metadata, SuggestionKind::from_label),
                    title,
                    description,
                    resolve_reference(window, referenced_message.as_deref(), statement),
                ),
                Candidate::Fallback { text } => {
                    (SuggestionKind::Metadata, None, text, statement.clone())
                }
            };

            if !self.filter.is_novel(&description, &existing) {
                debug!(
                    incident_id = %statement.incident_id,
                    description = %description,
                    "Candidate rejected by novelty filter"
                );
                continue;
            }

            let new_suggestion = NewSuggestion {
                incident_id: statement.incident_id,
                statement_id: referenced.id,
                kind,
                title,
                description,
                content: referenced.content.clone(),
            };
            match self.store.create_suggestion(new_suggestion).await {
                Ok(stored) => {
                    // Persist first, then broadcast; subscribers only ever
                    // see durable records.
                    self.hub.publish(&stored);
                    info!(
                        incident_id = %stored.incident_id,
                        suggestion_id = %stored.id,
                        kind = stored.kind.as_str(),
                        "Stored new suggestion"
                    );
                    window.push_description(stored.description.clone());
                    created.push(stored);
                }
                Err(e) => {
                    warn!(
                        incident_id = %statement.incident_id,
                        error = %e,
                        "Failed to persist suggestion; skipping it"
                    );
                }
            }
        }

        Ok(created)
    }
}

/// Find the window statement a model-quoted passage refers to: the first
/// statement (oldest first) whose leading 30 characters appear in the quote.
/// Falls back to the triggering statement when nothing matches or the model
/// quoted nothing.
fn resolve_reference(
    window: &ContextWindow,
    quote: Option<&str>,
    trigger: &Statement,
) -> Statement {
    let Some(quote) = quote else {
        return trigger.clone();
    };
    window
        .statements()
        .find(|s| !s.content.is_empty() && quote.contains(&s.reference_prefix()))
        .cloned()
        .unwrap_or_else(|| trigger.clone())
}
