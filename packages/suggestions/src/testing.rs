//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the suggestion library
//! without making real model calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{Result, SuggestionError};
use crate::traits::GenerativeModel;

/// One scripted reply: either response text or a transport failure.
#[derive(Debug, Clone)]
enum ScriptedReply {
    Text(String),
    Error(String),
}

/// Record of a call made to the scripted model.
#[derive(Debug, Clone)]
pub struct ScriptedCall {
    /// The full prompt the model was given
    pub prompt: String,
    /// When the call began
    pub started_at: Instant,
    /// When the call returned
    pub finished_at: Instant,
}

/// A scripted generation backend for testing.
///
/// Replies are consumed in order; an exhausted script answers with an empty
/// JSON array ("nothing actionable found"). Every call is recorded with its
/// prompt and timing, and overlapping calls are tracked, so tests can assert
/// on pacing and concurrency as well as content. Clones share the script and
/// the call history.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<ScriptedCall>>>,
    delay: Option<Duration>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
}

impl ScriptedModel {
    /// Create a model with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(response.into()));
        self
    }

    /// Queue several responses at once.
    pub fn with_responses<I, T>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        {
            let mut replies = self.replies.lock().unwrap();
            for response in responses {
                replies.push_back(ScriptedReply::Text(response.into()));
            }
        }
        self
    }

    /// Queue a failure.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Error(message.into()));
        self
    }

    /// Make every call take this long, so tests can observe latency effects.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most calls that were ever in flight at the same time.
    pub fn max_concurrent_calls(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let started_at = Instant::now();
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ScriptedReply::Text("[]".to_string()));

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(ScriptedCall {
            prompt: prompt.to_string(),
            started_at,
            finished_at: Instant::now(),
        });

        match reply {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Error(message) => Err(SuggestionError::Model(message.into())),
        }
    }
}
