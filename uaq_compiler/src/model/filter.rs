//! Report filters built from expression strings

use crate::config::constants::compile_time::model::WIRE_NAME_PREFIX;
use crate::document::DocumentError;
use crate::model::column::normalize_kind_tag;
use crate::model::operator::{AliasedEnum, FilterOperator, Representation};
use crate::syntax::{parse_expression, ExpressionError, Operand, Rhs};
use serde_json::{json, Value};

/// Filter kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Dimension,
    Metric,
    Segment,
}

impl FilterKind {
    pub fn from_tag(tag: &str) -> Result<Self, DocumentError> {
        match normalize_kind_tag(tag).as_str() {
            "DIMENSION" => Ok(FilterKind::Dimension),
            "METRIC" => Ok(FilterKind::Metric),
            "SEGMENT" => Ok(FilterKind::Segment),
            _ => Err(DocumentError::UnknownKind {
                kind: tag.to_string(),
            }),
        }
    }

    /// Wire clause key for this kind ("dimensionFilterClauses", ...)
    pub fn clause_key(&self) -> &'static str {
        match self {
            FilterKind::Dimension => "dimensionFilterClauses",
            FilterKind::Metric => "metricFilterClauses",
            FilterKind::Segment => "segmentFilterClauses",
        }
    }
}

/// A filter's comparison value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Scalar value as wire text (for comparisonValue)
    fn comparison_text(&self) -> String {
        match self {
            FilterValue::Int(value) => value.to_string(),
            FilterValue::Float(value) => value.to_string(),
            FilterValue::Str(text) => text.clone(),
            FilterValue::List(items) => format!("{:?}", items),
        }
    }

    /// Value as the wire `expressions` array: membership lists stay lists,
    /// scalars are wrapped in a singleton keeping their JSON type
    fn expressions_json(&self) -> Value {
        match self {
            FilterValue::Int(value) => json!([value]),
            FilterValue::Float(value) => json!([value]),
            FilterValue::Str(text) => json!([text]),
            FilterValue::List(items) => json!(items),
        }
    }
}

/// A single report filter. Operator/kind compatibility is not checked at
/// construction; the wire layer accepts either pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub kind: FilterKind,
    pub operator: FilterOperator,
    pub column: String,
    pub value: FilterValue,
}

impl Filter {
    /// Parse one filter expression under a document kind tag.
    ///
    /// The column is the leading component of the left-hand reference, so a
    /// qualified `table.column` filters on `table`.
    pub fn from_expr(kind_tag: &str, expr: &str) -> Result<Self, DocumentError> {
        let kind = FilterKind::from_tag(kind_tag)?;
        let parsed = parse_expression(expr)?;

        let column = parsed
            .lhs
            .leading_name()
            .ok_or_else(|| ExpressionError::Parse {
                fragment: expr.to_string(),
                reason: "left-hand side must be a column reference".to_string(),
                span: parsed.op_span,
            })?
            .to_string();

        let operator = FilterOperator::resolve(Representation::Expr(&parsed.op_token)).ok_or(
            ExpressionError::UnknownOperator {
                token: parsed.op_token.clone(),
                span: parsed.op_span,
            },
        )?;

        let value = match parsed.rhs {
            Rhs::List(items) => FilterValue::List(
                items.into_iter().map(|item| operand_text(&item)).collect(),
            ),
            Rhs::Scalar(operand) => match operand {
                Operand::Int(value) => FilterValue::Int(value),
                Operand::Float(value) => FilterValue::Float(value),
                other => FilterValue::Str(operand_text(&other)),
            },
        };

        Ok(Filter {
            kind,
            operator,
            column,
            value,
        })
    }

    /// Serialize to the wire filter shape. Segment filters have no wire
    /// form, matching the upstream API surface.
    pub fn to_request(&self) -> Option<Value> {
        let wire = self.operator.wire();
        let name = format!("{}{}", WIRE_NAME_PREFIX, self.column);

        match self.kind {
            FilterKind::Dimension => Some(json!({
                "dimensionName": name,
                "not": wire.negated,
                "operator": wire.op,
                "expressions": self.value.expressions_json(),
                "caseSensitive": true,
            })),
            FilterKind::Metric => Some(json!({
                "metricName": name,
                "not": wire.negated,
                "operator": wire.op,
                "comparisonValue": self.value.comparison_text(),
            })),
            FilterKind::Segment => None,
        }
    }
}

/// Canonical text of an operand used in value position. Keyword atoms keep
/// their canonical keyword text; references join their components.
fn operand_text(operand: &Operand) -> String {
    match operand {
        Operand::Int(value) => value.to_string(),
        Operand::Float(value) => value.to_string(),
        Operand::Str(text) => text.clone(),
        Operand::Bool(true) => "TRUE".to_string(),
        Operand::Bool(false) => "FALSE".to_string(),
        Operand::Null => "NULL".to_string(),
        Operand::ColumnRef(parts) => parts.join("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_equality_filter_parse() {
        let filter = Filter::from_expr("dimensions", "source == 'google'").unwrap();
        assert_eq!(filter.kind, FilterKind::Dimension);
        assert_eq!(filter.operator, FilterOperator::Eq);
        assert_eq!(filter.column, "source");
        assert_eq!(filter.value, FilterValue::Str("google".to_string()));
    }

    #[test]
    fn test_membership_filter_parse() {
        let filter = Filter::from_expr("dimensions", "medium IN ('cpc', 'ppc')").unwrap();
        assert_eq!(filter.operator, FilterOperator::In);
        assert_eq!(filter.column, "medium");
        assert_eq!(
            filter.value,
            FilterValue::List(vec!["cpc".to_string(), "ppc".to_string()])
        );
    }

    #[test]
    fn test_metric_filter_parse() {
        let filter = Filter::from_expr("metrics", "sessions >= 100").unwrap();
        assert_eq!(filter.kind, FilterKind::Metric);
        assert_eq!(filter.operator, FilterOperator::Gte);
        assert_eq!(filter.value, FilterValue::Int(100));
    }

    #[test]
    fn test_qualified_column_uses_leading_component() {
        let filter = Filter::from_expr("metrics", "totals.sessions > 10").unwrap();
        assert_eq!(filter.column, "totals");
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = Filter::from_expr("dimensions", "source = 'google'").unwrap_err();
        assert_matches!(
            err,
            DocumentError::Expression(ExpressionError::UnknownOperator { .. })
        );
        assert_eq!(err.error_code().as_str(), "E026");

        assert_matches!(
            Filter::from_expr("metrics", "sessions < 100"),
            Err(DocumentError::Expression(
                ExpressionError::UnknownOperator { .. }
            ))
        );
    }

    #[test]
    fn test_unknown_kind_tag_rejected() {
        assert_matches!(
            Filter::from_expr("cohorts", "a == 1"),
            Err(DocumentError::UnknownKind { .. })
        );
    }

    #[test]
    fn test_dimension_wire_shape() {
        let filter = Filter::from_expr("dimensions", "source == 'google'").unwrap();
        assert_eq!(
            filter.to_request().unwrap(),
            json!({
                "dimensionName": "ga:source",
                "not": false,
                "operator": "EXACT",
                "expressions": ["google"],
                "caseSensitive": true,
            })
        );
    }

    #[test]
    fn test_membership_wire_shape_keeps_list() {
        let filter = Filter::from_expr("dimensions", "medium IN ('cpc', 'ppc')").unwrap();
        assert_eq!(
            filter.to_request().unwrap(),
            json!({
                "dimensionName": "ga:medium",
                "not": false,
                "operator": "IN_LIST",
                "expressions": ["cpc", "ppc"],
                "caseSensitive": true,
            })
        );
    }

    #[test]
    fn test_metric_wire_shape_stringifies_value() {
        let filter = Filter::from_expr("metrics", "sessions >= 100").unwrap();
        assert_eq!(
            filter.to_request().unwrap(),
            json!({
                "metricName": "ga:sessions",
                "not": true,
                "operator": "LESS_THAN",
                "comparisonValue": "100",
            })
        );
    }

    #[test]
    fn test_negated_equality() {
        let filter = Filter::from_expr("dimensions", "source != 'direct'").unwrap();
        let wire = filter.to_request().unwrap();
        assert_eq!(wire["not"], json!(true));
        assert_eq!(wire["operator"], json!("EXACT"));
    }

    #[test]
    fn test_segment_filters_have_no_wire_form() {
        let filter = Filter {
            kind: FilterKind::Segment,
            operator: FilterOperator::Eq,
            column: "segment".to_string(),
            value: FilterValue::Str("x".to_string()),
        };
        assert!(filter.to_request().is_none());
    }

    #[test]
    fn test_keyword_atoms_become_canonical_text() {
        let filter = Filter::from_expr("dimensions", "flag == true").unwrap();
        assert_eq!(filter.value, FilterValue::Str("TRUE".to_string()));
    }
}
