//! Seam for agent-framework callbacks.
//!
//! Framework integrations translate their own callback events into two calls:
//! one when a model request starts and one when it completes. The adapter
//! pairs them into an [`InteractionRecord`] and hands it to [`NotaryCore`].

use crate::notary::NotaryCore;
use crate::payload::format_timestamp;
use crate::result::CommitResult;
use notary_client::NotaryClient;
use notary_store::StorageSink;
use serde_json::{json, Map, Value};
use std::sync::Mutex;

/// Request/response callbacks a framework integration drives.
pub trait RequestCallbacks {
    /// A model request with `prompts` is about to be sent; the start time is
    /// recorded with the request.
    fn on_request_start(&self, prompts: Vec<String>, invocation_params: Value);

    /// The pending request completed with `response_text`.
    ///
    /// Returns `None` when no request was pending.
    fn on_request_end(&self, response_text: &str) -> Option<CommitResult>;
}

/// Pairs start/end callbacks into logged interactions.
pub struct InteractionAdapter<S, C> {
    core: NotaryCore<S, C>,
    pending: Mutex<Option<Value>>,
}

impl<S: StorageSink, C: NotaryClient> InteractionAdapter<S, C> {
    /// Wraps a pipeline.
    pub fn new(core: NotaryCore<S, C>) -> Self {
        Self {
            core,
            pending: Mutex::new(None),
        }
    }

    /// Wrapped pipeline.
    pub fn core(&self) -> &NotaryCore<S, C> {
        &self.core
    }
}

impl<S: StorageSink, C: NotaryClient> RequestCallbacks for InteractionAdapter<S, C> {
    fn on_request_start(&self, prompts: Vec<String>, invocation_params: Value) {
        let started = format_timestamp(self.core.coordinator().clock().now());
        let request = json!({
            "prompts": prompts,
            "model_config": invocation_params,
            "timestamp": started.as_str(),
        });
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *pending = Some(request);
    }

    fn on_request_end(&self, response_text: &str) -> Option<CommitResult> {
        let request = match self.pending.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }?;
        Some(
            self.core
                .log_interaction(request, json!({ "text": response_text }), Map::new()),
        )
    }
}
