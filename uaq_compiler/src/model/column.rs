//! Report columns (dimensions and metrics)

use crate::config::constants::compile_time::model::WIRE_NAME_PREFIX;
use crate::document::DocumentError;
use serde_json::{json, Value};
use std::hash::{Hash, Hasher};

/// Column kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Dimension,
    Metric,
}

impl ColumnKind {
    /// Parse a document kind tag; uppercased, with one trailing plural S
    /// stripped, so "dimensions" and "DIMENSION" both resolve
    pub fn from_tag(tag: &str) -> Result<Self, DocumentError> {
        match normalize_kind_tag(tag).as_str() {
            "DIMENSION" => Ok(ColumnKind::Dimension),
            "METRIC" => Ok(ColumnKind::Metric),
            _ => Err(DocumentError::UnknownKind {
                kind: tag.to_string(),
            }),
        }
    }
}

/// Uppercase and strip one trailing plural S
pub(crate) fn normalize_kind_tag(tag: &str) -> String {
    let mut normalized = tag.to_ascii_uppercase();
    if normalized.ends_with('S') {
        normalized.pop();
    }
    normalized
}

/// A report column. Identity is `(kind, expression)`; the alias never
/// participates in equality or hashing.
#[derive(Debug, Clone, Eq)]
pub struct Column {
    pub kind: ColumnKind,
    pub expression: String,
    pub alias: Option<String>,
}

impl Column {
    pub fn new(kind: ColumnKind, expression: impl Into<String>) -> Self {
        Self {
            kind,
            expression: expression.into(),
            alias: None,
        }
    }

    /// Build a column from a document kind tag and expression string
    pub fn from_doc(kind_tag: &str, expression: &str) -> Result<Self, DocumentError> {
        Ok(Self::new(ColumnKind::from_tag(kind_tag)?, expression))
    }

    /// Serialize to the wire shape; dimensions and metrics use different
    /// field names for the same prefixed expression
    pub fn to_request(&self) -> Value {
        let prefixed = format!("{}{}", WIRE_NAME_PREFIX, self.expression);
        match self.kind {
            ColumnKind::Dimension => json!({"name": prefixed}),
            ColumnKind::Metric => json!({"expression": prefixed}),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.expression == other.expression
    }
}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.expression.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_kind_tag_normalization() {
        assert_eq!(ColumnKind::from_tag("dimensions").unwrap(), ColumnKind::Dimension);
        assert_eq!(ColumnKind::from_tag("metric").unwrap(), ColumnKind::Metric);
        assert_eq!(ColumnKind::from_tag("METRICS").unwrap(), ColumnKind::Metric);
        assert_matches!(
            ColumnKind::from_tag("segments"),
            Err(DocumentError::UnknownKind { .. })
        );
    }

    #[test]
    fn test_to_request_shapes() {
        assert_eq!(
            Column::new(ColumnKind::Dimension, "medium").to_request(),
            serde_json::json!({"name": "ga:medium"})
        );
        assert_eq!(
            Column::new(ColumnKind::Metric, "sessions").to_request(),
            serde_json::json!({"expression": "ga:sessions"})
        );
    }

    #[test]
    fn test_identity_ignores_alias() {
        let plain = Column::new(ColumnKind::Dimension, "source");
        let aliased = Column {
            alias: Some("traffic_source".to_string()),
            ..plain.clone()
        };
        assert_eq!(plain, aliased);
    }
}
