//! Queue-draining execution engine
//!
//! Pops pending requests, submits them through the caller's collaborator,
//! and reacts to the classified outcome: clean responses go to the sink,
//! sampled responses are refined into narrower requests pushed back onto the
//! queue, retryable failures are requeued up to the attempt bound, and fatal
//! failures stop the drain cleanly with the queue intact.

use crate::api::{ReportDelivery, ReportSink, SubmitOutcome, Submitter};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::execution::queue::{QueuedRequest, RequestState, WorkQueue};
use crate::execution::sampling;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uaq_compiler::logging::codes;
use uaq_compiler::{log_debug, log_error, log_success, KeyRequestPair};

/// Counters from one drain run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// Submissions performed
    pub submitted: usize,
    /// Clean reports delivered to the sink
    pub accepted: usize,
    /// Sampled responses refined into narrower requests
    pub refined: usize,
    /// Narrowed requests queued by refinement
    pub queued_by_refinement: usize,
    /// Retryable failures put back on the queue
    pub requeued: usize,
    /// Requests left on the queue (non-zero only after cancellation)
    pub remaining: usize,
}

/// Sampling-aware request executor
pub struct ExecutionEngine<S: Submitter, K: ReportSink> {
    submitter: S,
    sink: K,
    config: EngineConfig,
    queue: WorkQueue,
    cancel: Arc<AtomicBool>,
}

impl<S: Submitter, K: ReportSink> ExecutionEngine<S, K> {
    pub fn new(submitter: S, sink: K, config: EngineConfig) -> Self {
        let queue = WorkQueue::new(config.max_queue_length);
        Self {
            submitter,
            sink,
            config,
            queue,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the drain before its next submission. Refinement and
    /// requeueing stop; the request in flight still completes.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Number of requests waiting on the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue serialized batch payloads for submission
    pub fn enqueue_pairs(&mut self, pairs: Vec<KeyRequestPair>) -> Result<(), EngineError> {
        for pair in pairs {
            self.queue.push(QueuedRequest::new(pair.key, pair.request))?;
        }
        Ok(())
    }

    /// Release the collaborators once draining is finished
    pub fn into_parts(self) -> (S, K) {
        (self.submitter, self.sink)
    }

    /// Drain the queue until it is empty, cancelled, or a fatal error stops
    /// it. Every popped request resolves to exactly one [`RequestState`]:
    /// Accepted (delivered), Sampled (replaced by narrower requests), Pending
    /// (looped back after a retryable failure), or Failed via the error
    /// returned.
    pub fn drain(&mut self) -> Result<DrainStats, EngineError> {
        let mut stats = DrainStats::default();

        while !self.cancel.load(Ordering::SeqCst) {
            let Some(item) = self.queue.pop() else {
                break;
            };

            stats.submitted += 1;
            let state = match self.submitter.submit(&item.body) {
                SubmitOutcome::Response(response) => {
                    self.handle_response(item, response, &mut stats)?
                }
                SubmitOutcome::Retryable { reason } => self.handle_retryable(item, reason)?,
                SubmitOutcome::Fatal { reason } => {
                    log_error!(codes::engine::SUBMISSION_FAILED, "Fatal submission failure",
                        "state" => RequestState::Failed.as_str(),
                        "reason" => &reason
                    );
                    return Err(EngineError::SubmissionFailed { reason });
                }
            };

            match state {
                RequestState::Accepted => stats.accepted += 1,
                RequestState::Sampled => stats.refined += 1,
                RequestState::Pending => stats.requeued += 1,
                RequestState::Submitted | RequestState::Failed => {}
            }
            log_debug!("Request resolved", "state" => state.as_str());
        }

        stats.remaining = self.queue.len();
        log_success!(codes::success::DRAIN_COMPLETE, "Queue drained",
            "submitted" => stats.submitted,
            "accepted" => stats.accepted,
            "refined" => stats.refined,
            "remaining" => stats.remaining
        );
        Ok(stats)
    }

    fn handle_response(
        &mut self,
        item: QueuedRequest,
        response: Value,
        stats: &mut DrainStats,
    ) -> Result<RequestState, EngineError> {
        if !sampling::is_sampled(&response) {
            log_success!(codes::success::REPORT_ACCEPTED, "Report accepted");
            self.sink
                .accept(ReportDelivery::new(response, item.body));
            return Ok(RequestState::Accepted);
        }

        let markers = sampling::markers(&response)?;
        if self.config.debug_sampling {
            // Surface the sampled response itself for inspection before it
            // is replaced by its refinements
            self.sink
                .accept(ReportDelivery::new(response, item.body.clone()));
        }

        let narrowed = sampling::refine(&item, &markers, &self.config)?;
        log_success!(codes::success::REFINEMENT_QUEUED, "Sampled request refined",
            "space" => markers.space_size,
            "samples" => markers.samples_read,
            "intervals" => narrowed.len()
        );

        stats.queued_by_refinement += narrowed.len();
        for request in narrowed {
            self.queue.push(request)?;
        }
        Ok(RequestState::Sampled)
    }

    fn handle_retryable(
        &mut self,
        item: QueuedRequest,
        reason: String,
    ) -> Result<RequestState, EngineError> {
        let attempts = item.attempts + 1;
        if attempts >= self.config.max_submit_attempts {
            log_error!(codes::engine::RETRIES_EXHAUSTED, "Retries exhausted",
                "state" => RequestState::Failed.as_str(),
                "attempts" => attempts,
                "reason" => &reason
            );
            return Err(EngineError::RetriesExhausted { attempts, reason });
        }

        log_debug!("Requeueing after retryable failure",
            "attempts" => attempts,
            "reason" => &reason
        );
        self.queue.push(item.reattempt())?;
        Ok(RequestState::Pending)
    }
}
