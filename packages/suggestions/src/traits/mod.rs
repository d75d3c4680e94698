//! Core trait abstractions for the suggestion library.
//!
//! These traits define the interfaces that applications implement to provide
//! storage and model backends.

pub mod model;
pub mod store;

pub use model::GenerativeModel;
pub use store::{IncidentStore, StatementStore, SuggestionStore};
