//! Incident Transcript Replay & Suggestion Extraction Library
//!
//! Replays incident transcripts as if they were happening live and extracts
//! deduplicated, human-review suggestions (action items, root causes, trigger
//! events) from each statement using a generative-language backend.
//!
//! # Design Philosophy
//!
//! - One statement at a time: extraction is incremental, not batch
//! - The model proposes, the novelty filter disposes - dedup is enforced
//!   locally, never trusted to the model
//! - Per-incident work is strictly sequential; incidents are independent
//! - Degrade, don't abort: malformed model output becomes a fallback
//!   suggestion, a failed statement never stops the replay
//!
//! # Usage
//!
//! ```rust,ignore
//! use suggestions::{
//!     GeminiModel, MemoryStore, ReplayScheduler, SuggestionHub, SuggestionPipeline,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! let hub = SuggestionHub::new();
//! let pipeline = SuggestionPipeline::new(MemoryStore::new(), GeminiModel::from_env()?, hub);
//!
//! // Watch suggestions arrive as the replay runs
//! let mut rx = pipeline.hub().subscribe();
//!
//! // Replay an uploaded transcript over the default 60-second window
//! let report = ReplayScheduler::new()
//!     .replay_transcript(&pipeline, incident_id, &raw_json, CancellationToken::new())
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (IncidentStore, GenerativeModel)
//! - [`types`] - Domain types (Statement, Suggestion, Candidate, configs)
//! - [`pipeline`] - Per-statement extraction orchestration
//! - [`replay`] - Paced transcript replay with cancellation
//! - [`model`] - Prompt assembly, response parsing, Gemini backend
//! - [`novelty`] - Similarity-based deduplication gate
//! - [`context`] - Per-incident sliding context window
//! - [`hub`] - Deployment-wide broadcast of new suggestions
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`testing`] - Scripted model backend for tests

pub mod context;
pub mod error;
pub mod hub;
pub mod model;
pub mod novelty;
pub mod pipeline;
pub mod prompts;
pub mod replay;
pub mod similarity;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, SuggestionError};
pub use traits::{GenerativeModel, IncidentStore, StatementStore, SuggestionStore};
pub use types::{
    parse_transcript, Candidate, NewStatement, NewSuggestion, PipelineConfig, RawStatement,
    ReplayConfig, Statement, Suggestion, SuggestionKind,
};

// Re-export the pipeline and its collaborators
pub use context::ContextWindow;
pub use hub::SuggestionHub;
pub use model::{parse_candidates, strip_code_fences, GeminiModel, ModelClient};
pub use novelty::NoveltyFilter;
pub use pipeline::SuggestionPipeline;
pub use replay::{ReplayReport, ReplayScheduler};

// Re-export stores
pub use stores::MemoryStore;
