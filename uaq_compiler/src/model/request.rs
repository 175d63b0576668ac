//! Request identity keys and full requests

use crate::config::constants::compile_time::model::*;
use crate::document::{value, DocumentError};
use crate::model::column::{Column, ColumnKind};
use crate::model::date_range::DateRange;
use crate::model::filter::{Filter, FilterKind};
use crate::model::options::QueryOptions;
use crate::model::sampling::SamplingLevel;
use crate::validation::{len_between, ValidationError};
use serde_json::{json, Map, Value};

/// Audience segment reference.
// TODO: flesh out once segment documents carry more than a bare id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment;

/// Cohort group reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CohortGroup;

/// The identity under which requests are groupable into one batch: same
/// scope, date ranges, sampling level, segments, and cohort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    view_id: u64,
    date_ranges: Vec<DateRange>,
    sampling: SamplingLevel,
    segments: Option<Vec<Segment>>,
    cohort: Option<CohortGroup>,
}

impl RequestKey {
    /// Build a key, enforcing the date range and segment count bounds
    pub fn try_new(
        view_id: u64,
        date_ranges: Vec<DateRange>,
        sampling: SamplingLevel,
        segments: Option<Vec<Segment>>,
        cohort: Option<CohortGroup>,
    ) -> Result<Self, ValidationError> {
        len_between("date_ranges", &date_ranges, MIN_DATE_RANGES, MAX_DATE_RANGES)?;
        if let Some(segments) = &segments {
            len_between("segments", segments, MIN_SEGMENTS, MAX_SEGMENTS)?;
        }
        Ok(Self {
            view_id,
            date_ranges,
            sampling,
            segments,
            cohort,
        })
    }

    /// Shorthand for a plain key with no segments or cohort
    pub fn plain(
        view_id: u64,
        date_ranges: Vec<DateRange>,
        sampling: SamplingLevel,
    ) -> Result<Self, ValidationError> {
        Self::try_new(view_id, date_ranges, sampling, None, None)
    }

    pub fn view_id(&self) -> u64 {
        self.view_id
    }

    pub fn date_ranges(&self) -> &[DateRange] {
        &self.date_ranges
    }

    pub fn sampling(&self) -> SamplingLevel {
        self.sampling
    }

    /// A new key identical to this one except for its date ranges; used by
    /// refinement, which never mutates an existing key
    pub fn with_date_ranges(&self, date_ranges: Vec<DateRange>) -> Result<Self, ValidationError> {
        Self::try_new(
            self.view_id,
            date_ranges,
            self.sampling,
            self.segments.clone(),
            self.cohort.clone(),
        )
    }

    /// Read the key fields from a document: `scope.viewId`, `dateRanges`,
    /// and `queryOptions.sampling` (defaulting to LARGE when absent)
    pub fn from_doc(doc: &Value) -> Result<Self, DocumentError> {
        let scope = value::require(doc, "scope")?;
        let view_id = value::as_id_string(value::require(scope, "viewId")?, "viewId")?
            .parse::<u64>()
            .map_err(|_| DocumentError::WrongType {
                field: "viewId".to_string(),
                expected: "unsigned integer",
            })?;

        let ranges = value::as_array(value::require(doc, "dateRanges")?, "dateRanges")?;
        let date_ranges = ranges
            .iter()
            .map(DateRange::from_doc)
            .collect::<Result<Vec<_>, _>>()?;

        let sampling = match value::optional(doc, "queryOptions")
            .and_then(|options| value::optional(options, "sampling"))
        {
            Some(raw) => SamplingLevel::from_name(value::as_str(raw, "sampling")?)?,
            None => SamplingLevel::Large,
        };

        Ok(Self::plain(view_id, date_ranges, sampling)?)
    }

    /// Serialize the key's wire fields
    pub fn to_request(&self) -> Value {
        json!({
            "viewId": self.view_id.to_string(),
            "dateRanges": self.date_ranges.iter().map(DateRange::to_request).collect::<Vec<_>>(),
            "samplingLevel": self.sampling.name(),
        })
    }
}

/// A complete report request: identity key, columns, optional filters, and
/// query options. `dimensions` and `metrics` are derived from `columns` once
/// at construction and bound-checked there.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub key: RequestKey,
    pub columns: Vec<Column>,
    pub filters: Option<Vec<Filter>>,
    pub query_options: QueryOptions,
    dimensions: Vec<Column>,
    metrics: Vec<Column>,
}

impl Request {
    pub fn try_new(
        key: RequestKey,
        columns: Vec<Column>,
        filters: Option<Vec<Filter>>,
        query_options: QueryOptions,
    ) -> Result<Self, ValidationError> {
        let dimensions: Vec<Column> = columns
            .iter()
            .filter(|column| column.kind == ColumnKind::Dimension)
            .cloned()
            .collect();
        let metrics: Vec<Column> = columns
            .iter()
            .filter(|column| column.kind == ColumnKind::Metric)
            .cloned()
            .collect();

        len_between("dimensions", &dimensions, MIN_DIMENSIONS, MAX_DIMENSIONS)?;
        len_between("metrics", &metrics, MIN_METRICS, MAX_METRICS)?;

        Ok(Self {
            key,
            columns,
            filters,
            query_options,
            dimensions,
            metrics,
        })
    }

    pub fn dimensions(&self) -> &[Column] {
        &self.dimensions
    }

    pub fn metrics(&self) -> &[Column] {
        &self.metrics
    }

    /// A new request identical to this one except for its key's date ranges
    pub fn with_date_ranges(&self, date_ranges: Vec<DateRange>) -> Result<Self, ValidationError> {
        Self::try_new(
            self.key.with_date_ranges(date_ranges)?,
            self.columns.clone(),
            self.filters.clone(),
            self.query_options.clone(),
        )
    }

    /// Parse one document into a request.
    ///
    /// Column and filter blocks hold per-kind arrays keyed by tag; an absent
    /// `filters` block yields `None` rather than an empty list, so the
    /// serializer can tell "no filters configured" from "no filters matched".
    pub fn from_doc(doc: &Value) -> Result<Self, DocumentError> {
        let key = RequestKey::from_doc(doc)?;

        let column_block = value::as_object(value::require(doc, "columns")?, "columns")?;
        let mut columns = Vec::new();
        for (tag, entries) in column_block {
            for entry in value::as_array(entries, tag)? {
                columns.push(Column::from_doc(tag, value::as_str(entry, tag)?)?);
            }
        }

        let filters = match value::optional(doc, "filters") {
            None => None,
            Some(block) => {
                let block = value::as_object(block, "filters")?;
                let mut filters = Vec::new();
                for (tag, entries) in block {
                    for entry in value::as_array(entries, tag)? {
                        filters.push(Filter::from_expr(tag, value::as_str(entry, tag)?)?);
                    }
                }
                Some(filters)
            }
        };

        let query_options = QueryOptions::from_doc(doc)?;
        Ok(Self::try_new(key, columns, filters, query_options)?)
    }

    /// Serialize to one wire report request, merging key, columns, filter
    /// clauses, and options into a single object
    pub fn to_request(&self) -> Value {
        let mut wire = Map::new();
        merge(&mut wire, self.key.to_request());

        wire.insert(
            "dimensions".to_string(),
            Value::Array(self.dimensions.iter().map(Column::to_request).collect()),
        );
        wire.insert(
            "metrics".to_string(),
            Value::Array(self.metrics.iter().map(Column::to_request).collect()),
        );

        for kind in [FilterKind::Dimension, FilterKind::Metric, FilterKind::Segment] {
            if let Some(clause) = self.filter_clause(kind) {
                wire.insert(kind.clause_key().to_string(), clause);
            }
        }

        merge(&mut wire, self.query_options.to_request());
        Value::Object(wire)
    }

    /// ANDed filter clause for one kind, or None when no filter of that kind
    /// exists. An empty clause array is never emitted.
    fn filter_clause(&self, kind: FilterKind) -> Option<Value> {
        let filters: Vec<Value> = self
            .filters
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(|filter| filter.kind == kind)
            .filter_map(Filter::to_request)
            .collect();

        if filters.is_empty() {
            return None;
        }
        Some(json!([{"operator": "AND", "filters": filters}]))
    }
}

fn merge(target: &mut Map<String, Value>, source: Value) {
    if let Value::Object(fields) = source {
        target.extend(fields);
    }
}
