//! Paced replay of stored transcripts into the pipeline.
//!
//! Replay simulates live ingestion: statements are emitted one at a time, in
//! order, spread across a fixed wall-clock window. Extraction for each
//! statement completes before the pacing delay for the next begins, so
//! pipeline latency stretches the replay rather than overlapping it.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::SuggestionPipeline;
use crate::traits::{GenerativeModel, IncidentStore};
use crate::types::{parse_transcript, NewStatement, RawStatement, ReplayConfig};

/// What a replay accomplished.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Statements persisted and handed to the pipeline
    pub statements_emitted: usize,
    /// Suggestions that survived the novelty gate and were stored
    pub suggestions_created: usize,
    /// Statements that failed to persist or whose extraction failed
    pub failed_statements: usize,
    /// True when the replay was stopped by its cancellation token
    pub cancelled: bool,
}

impl ReplayReport {
    /// True when every statement was emitted and extracted without failures.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failed_statements == 0
    }
}

/// Emits a transcript into a pipeline at a fixed cadence.
///
/// With N statements and a replay window of D, the first statement is emitted
/// immediately and each subsequent one `D / N` after the previous emission
/// finished. Cancellation is cooperative: it takes effect between statements,
/// never mid-statement, so no half-created records are left behind.
#[derive(Debug, Clone, Default)]
pub struct ReplayScheduler {
    config: ReplayConfig,
}

impl ReplayScheduler {
    /// Create a scheduler with the default replay window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom pacing.
    pub fn with_config(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the pacing configuration.
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Parse a raw transcript document and replay it. A document that cannot
    /// be parsed fails the whole replay before anything is created.
    pub async fn replay_transcript<S, G>(
        &self,
        pipeline: &SuggestionPipeline<S, G>,
        incident_id: Uuid,
        raw: &str,
        cancel: CancellationToken,
    ) -> Result<ReplayReport>
    where
        S: IncidentStore,
        G: GenerativeModel,
    {
        let statements = parse_transcript(raw)?;
        self.replay(pipeline, incident_id, statements, cancel).await
    }

    /// Replay parsed statements into the pipeline. An empty transcript is a
    /// no-op. Replaying the same incident again appends; it never rewrites
    /// what an earlier replay created.
    pub async fn replay<S, G>(
        &self,
        pipeline: &SuggestionPipeline<S, G>,
        incident_id: Uuid,
        statements: Vec<RawStatement>,
        cancel: CancellationToken,
    ) -> Result<ReplayReport>
    where
        S: IncidentStore,
        G: GenerativeModel,
    {
        if statements.is_empty() {
            return Ok(ReplayReport::default());
        }

        let interval = self.config.interval(statements.len());
        info!(
            incident_id = %incident_id,
            statements = statements.len(),
            interval_ms = interval.as_millis() as u64,
            "Starting transcript replay"
        );

        let mut report = ReplayReport::default();
        let mut window = pipeline.rebuild_window(incident_id).await?;

        for (idx, raw) in statements.into_iter().enumerate() {
            if idx == 0 {
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    break;
                }
            } else {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        report.cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            }

            let mut statement = NewStatement::new(incident_id, raw.text);
            if let Some(speaker) = raw.speaker {
                statement = statement.with_speaker(speaker);
            }

            let stored = match pipeline.store().create_statement(statement).await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(
                        incident_id = %incident_id,
                        error = %e,
                        "Failed to persist statement; skipping it"
                    );
                    report.failed_statements += 1;
                    continue;
                }
            };
            report.statements_emitted += 1;

            match pipeline.on_statement(&mut window, &stored).await {
                Ok(suggestions) => report.suggestions_created += suggestions.len(),
                Err(e) => {
                    warn!(
                        incident_id = %incident_id,
                        statement_id = %stored.id,
                        error = %e,
                        "Extraction failed for statement; continuing replay"
                    );
                    report.failed_statements += 1;
                }
            }
        }

        info!(
            incident_id = %incident_id,
            statements_emitted = report.statements_emitted,
            suggestions_created = report.suggestions_created,
            failed_statements = report.failed_statements,
            cancelled = report.cancelled,
            "Transcript replay finished"
        );
        Ok(report)
    }
}
