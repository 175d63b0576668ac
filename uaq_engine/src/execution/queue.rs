//! Work queue of pending submissions
//!
//! A FIFO that grows while being drained: consuming a sampled response
//! pushes its refined sub-requests back onto the tail. Single-owner queue
//! semantics; nothing here is shared across threads.

use crate::error::EngineError;
use serde_json::Value;
use std::collections::VecDeque;
use uaq_compiler::RequestKey;

/// Lifecycle of one queued request. The drain loop resolves every popped
/// request to one of these; a retryable failure loops back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Submitted,
    Accepted,
    Sampled,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Pending => "PENDING",
            RequestState::Submitted => "SUBMITTED",
            RequestState::Accepted => "ACCEPTED",
            RequestState::Sampled => "SAMPLED",
            RequestState::Failed => "FAILED",
        }
    }
}

/// One pending submission: the identity key, the wire payload, and how many
/// times it has already been submitted
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRequest {
    pub key: RequestKey,
    pub body: Value,
    pub attempts: u32,
}

impl QueuedRequest {
    pub fn new(key: RequestKey, body: Value) -> Self {
        Self {
            key,
            body,
            attempts: 0,
        }
    }

    /// The same request, recorded as submitted once more
    pub fn reattempt(mut self) -> Self {
        self.attempts += 1;
        self
    }
}

/// Bounded FIFO of pending requests
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: VecDeque<QueuedRequest>,
    max_length: usize,
}

impl WorkQueue {
    pub fn new(max_length: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_length,
        }
    }

    pub fn push(&mut self, item: QueuedRequest) -> Result<(), EngineError> {
        if self.max_length > 0 && self.items.len() >= self.max_length {
            return Err(EngineError::QueueOverflow {
                limit: self.max_length,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<QueuedRequest> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
