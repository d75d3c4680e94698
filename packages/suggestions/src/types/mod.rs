//! Domain types shared across the suggestion pipeline.

pub mod config;
pub mod statement;
pub mod suggestion;
pub mod transcript;

pub use config::{PipelineConfig, ReplayConfig};
pub use statement::{NewStatement, Statement, REFERENCE_PREFIX_CHARS};
pub use suggestion::{Candidate, NewSuggestion, Suggestion, SuggestionKind};
pub use transcript::{parse_transcript, RawStatement};
