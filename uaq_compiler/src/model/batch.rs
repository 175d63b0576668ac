//! Batch grouping and chunking
//!
//! Requests sharing a `RequestKey` are grouped together, then chunked into
//! API-call-sized `reportRequests` payloads. Groups keep first-appearance
//! order so serialization is deterministic across runs.

use crate::config::constants::compile_time::batch::DEFAULT_MAX_BATCH_SIZE;
use crate::document::DocumentError;
use crate::model::request::{Request, RequestKey};
use crate::utils::chunk;
use serde_json::{json, Value};

/// One serialized batch together with the key it was built from, so retry
/// and refinement can trace a wire payload back to its identity
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRequestPair {
    pub key: RequestKey,
    pub request: Value,
}

/// Requests grouped by identity key
#[derive(Debug, Clone, Default)]
pub struct RequestBatch {
    groups: Vec<(RequestKey, Vec<Request>)>,
    max_batch_size: usize,
}

impl RequestBatch {
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            groups: Vec::new(),
            max_batch_size,
        }
    }

    /// Parse a sequence of documents and group the results by key
    pub fn from_docs(docs: &[Value], max_batch_size: usize) -> Result<Self, DocumentError> {
        let mut batch = Self::new(max_batch_size);
        for doc in docs {
            batch.insert(Request::from_doc(doc)?);
        }
        Ok(batch)
    }

    /// Add a request to the group holding its key
    pub fn insert(&mut self, request: Request) {
        match self
            .groups
            .iter_mut()
            .find(|(key, _)| *key == request.key)
        {
            Some((_, requests)) => requests.push(request),
            None => self.groups.push((request.key.clone(), vec![request])),
        }
    }

    /// Number of distinct keys
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of requests across all groups
    pub fn request_count(&self) -> usize {
        self.groups.iter().map(|(_, requests)| requests.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RequestKey, Vec<Request>)> {
        self.groups.iter()
    }

    /// Serialize every group into key-tagged `reportRequests` payloads, no
    /// payload holding more than `max_batch_size` requests
    pub fn to_request(&self) -> Vec<KeyRequestPair> {
        let size = if self.max_batch_size == 0 {
            DEFAULT_MAX_BATCH_SIZE
        } else {
            self.max_batch_size
        };

        let mut pairs = Vec::new();
        for (key, requests) in &self.groups {
            for group in chunk(requests, size) {
                let bodies: Vec<Value> = group.iter().map(Request::to_request).collect();
                pairs.push(KeyRequestPair {
                    key: key.clone(),
                    request: json!({"reportRequests": bodies}),
                });
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(view_id: u64, dimension: &str) -> Value {
        json!({
            "scope": {"viewId": view_id},
            "dateRanges": [{"startDate": "2022-02-01", "endDate": "2022-02-28"}],
            "columns": {"dimensions": [dimension], "metrics": ["sessions"]},
        })
    }

    #[test]
    fn test_grouping_by_key() {
        let docs = vec![doc(1, "date"), doc(1, "medium"), doc(2, "date")];
        let batch = RequestBatch::from_docs(&docs, DEFAULT_MAX_BATCH_SIZE).unwrap();
        assert_eq!(batch.group_count(), 2);
        assert_eq!(batch.request_count(), 3);
    }

    #[test]
    fn test_shared_key_requests_batch_together() {
        let docs = vec![doc(1, "date"), doc(1, "medium")];
        let batch = RequestBatch::from_docs(&docs, DEFAULT_MAX_BATCH_SIZE).unwrap();
        let pairs = batch.to_request();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].request["reportRequests"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_max_batch_size_one_splits_shared_key() {
        let docs = vec![doc(1, "date"), doc(1, "medium")];
        let batch = RequestBatch::from_docs(&docs, 1).unwrap();
        let pairs = batch.to_request();
        assert_eq!(pairs.len(), 2);
        for pair in &pairs {
            assert_eq!(pair.request["reportRequests"].as_array().unwrap().len(), 1);
            assert_eq!(pair.key, pairs[0].key);
        }
    }

    #[test]
    fn test_chunking_respects_maximum() {
        let docs: Vec<Value> = (0..7).map(|_| doc(1, "date")).collect();
        let batch = RequestBatch::from_docs(&docs, 5).unwrap();
        let pairs = batch.to_request();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].request["reportRequests"].as_array().unwrap().len(), 5);
        assert_eq!(pairs[1].request["reportRequests"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let docs = vec![doc(3, "date"), doc(1, "date"), doc(3, "medium")];
        let batch = RequestBatch::from_docs(&docs, DEFAULT_MAX_BATCH_SIZE).unwrap();
        let pairs = batch.to_request();
        assert_eq!(pairs[0].key.view_id(), 3);
        assert_eq!(pairs[1].key.view_id(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let batch = RequestBatch::from_docs(&[], DEFAULT_MAX_BATCH_SIZE).unwrap();
        assert!(batch.is_empty());
        assert!(batch.to_request().is_empty());
    }
}
