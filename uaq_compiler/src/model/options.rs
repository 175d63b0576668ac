//! Paging and summary directives
//!
//! The parsed fields are the human-facing `include_*` flags; the wire format
//! wants `hide*` flags, so serialization negates them. That inversion is part
//! of the external protocol and must not be "simplified" away.

use crate::config::constants::compile_time::model::DEFAULT_PAGE_SIZE;
use crate::document::{camel_to_snake_case, value, DocumentError};
use serde_json::{json, Value};

/// Document keys read into query options, in wire (camelCase) form
pub const KEY_LIST: [&str; 5] = [
    "pageSize",
    "pageToken",
    "includeEmptyRows",
    "includeTotals",
    "includeValueRanges",
];

/// Paging and summary options for one request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    pub page_size: u64,
    pub page_token: Option<String>,
    pub include_empty_rows: bool,
    pub include_totals: bool,
    pub include_value_ranges: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_token: None,
            include_empty_rows: false,
            include_totals: false,
            include_value_ranges: false,
        }
    }
}

impl QueryOptions {
    /// Read options from a document's `queryOptions` block. An absent block
    /// (or absent keys) leaves the constructor defaults in place.
    pub fn from_doc(doc: &Value) -> Result<Self, DocumentError> {
        let mut options = Self::default();
        let Some(block) = value::optional(doc, "queryOptions") else {
            return Ok(options);
        };

        for key in KEY_LIST {
            let Some(raw) = value::optional(block, key) else {
                continue;
            };
            match camel_to_snake_case(key).as_str() {
                "page_size" => options.page_size = value::as_u64(raw, key)?,
                "page_token" => options.page_token = Some(value::as_str(raw, key)?.to_string()),
                "include_empty_rows" => options.include_empty_rows = value::as_bool(raw, key)?,
                "include_totals" => options.include_totals = value::as_bool(raw, key)?,
                "include_value_ranges" => {
                    options.include_value_ranges = value::as_bool(raw, key)?
                }
                _ => {}
            }
        }

        Ok(options)
    }

    /// Serialize to the wire shape, negating the include flags into hide
    /// flags and emitting pageToken only when set
    pub fn to_request(&self) -> Value {
        let mut wire = json!({
            "pageSize": self.page_size,
            "includeEmptyRows": self.include_empty_rows,
            "hideTotals": !self.include_totals,
            "hideValueRanges": !self.include_value_ranges,
        });
        if let Some(token) = &self.page_token {
            wire["pageToken"] = json!(token);
        }
        wire
    }
}
