//! In-process pub/sub hub for real-time suggestion delivery.
//!
//! One deployment-wide stream: every persisted suggestion is published to the
//! same channel, and each event carries the full record including its
//! incident id, so consumers (SSE endpoints, UI streams, log followers)
//! filter on whatever incidents they care about.
//!
//! # Usage
//!
//! Producers (the pipeline):
//!   hub.publish(&suggestion);
//!
//! Consumers:
//!   let rx = hub.subscribe();

use tokio::sync::broadcast;

use crate::types::Suggestion;

/// Deployment-wide suggestion stream.
///
/// Thread-safe, cloneable; clones publish into the same stream. The pipeline
/// publishes only after a suggestion is persisted, so subscribers never see a
/// record that storage does not hold. Slow subscribers that fall more than
/// the channel's capacity behind miss the oldest events, per
/// `tokio::sync::broadcast` semantics.
#[derive(Clone)]
pub struct SuggestionHub {
    tx: broadcast::Sender<Suggestion>,
}

impl SuggestionHub {
    /// Create a new hub with default capacity (256 suggestions).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a new hub with the given channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    /// Publish a suggestion to the stream. No-op if nobody is subscribed.
    pub fn publish(&self, suggestion: &Suggestion) {
        // Ignore send errors (no active receivers)
        let _ = self.tx.send(suggestion.clone());
    }

    /// Subscribe to the stream. Only suggestions published after this call
    /// are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Suggestion> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SuggestionHub {
    fn default() -> Self {
        Self::new()
    }
}
