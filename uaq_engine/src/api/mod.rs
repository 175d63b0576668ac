//! Collaborator interfaces
//!
//! The engine never performs network I/O or final output itself. The caller
//! supplies a [`Submitter`] that sends a wire payload and classifies the
//! result, and a [`ReportSink`] that receives finished reports. Retry backoff
//! belongs to the submitter; the engine only reacts to the classified
//! outcome.

use serde_json::{json, Value};

/// Outcome of submitting one wire payload, classified by the collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The API returned a response body
    Response(Value),
    /// Transient failure (rate limit, backend hiccup); the engine may
    /// resubmit the identical payload
    Retryable { reason: String },
    /// Permanent failure (permissions, malformed request); stops the drain
    Fatal { reason: String },
}

/// Sends a fully-built wire payload to the reporting API
pub trait Submitter {
    fn submit(&mut self, body: &Value) -> SubmitOutcome;
}

/// A finished report paired with the request that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDelivery {
    pub response: Value,
    pub request: Value,
}

impl ReportDelivery {
    pub fn new(response: Value, request: Value) -> Self {
        Self { response, request }
    }

    /// Fold the originating request into the response under a `request` key
    pub fn into_value(self) -> Value {
        match self.response {
            Value::Object(mut fields) => {
                fields.insert("request".to_string(), self.request);
                Value::Object(fields)
            }
            other => json!({"response": other, "request": self.request}),
        }
    }
}

/// Receives finalized report deliveries
pub trait ReportSink {
    fn accept(&mut self, delivery: ReportDelivery);
}

/// Sink that collects deliveries in memory, for tests and buffering callers
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Vec<ReportDelivery>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> &[ReportDelivery] {
        &self.deliveries
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

impl ReportSink for MemorySink {
    fn accept(&mut self, delivery: ReportDelivery) {
        self.deliveries.push(delivery);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_folds_request_into_response() {
        let delivery = ReportDelivery::new(
            json!({"reports": [{"data": {}}]}),
            json!({"reportRequests": []}),
        );
        let value = delivery.into_value();
        assert_eq!(value["request"], json!({"reportRequests": []}));
        assert!(value.get("reports").is_some());
    }

    #[test]
    fn test_non_object_response_is_wrapped() {
        let delivery = ReportDelivery::new(json!([1, 2]), json!({"reportRequests": []}));
        let value = delivery.into_value();
        assert_eq!(value["response"], json!([1, 2]));
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.accept(ReportDelivery::new(json!({}), json!({})));
        assert_eq!(sink.len(), 1);
    }
}
