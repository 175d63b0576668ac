//! Inclusive date ranges
//!
//! A range covers every day from start through end. Refinement builds new
//! ranges from old ones; nothing here mutates in place.

use crate::document::{value, DocumentError};
use crate::validation::ValidationError;
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting start after end
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::RangeOrder {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, inclusive of both endpoints
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Day at an index into the day sequence: index 0 is the start date and
    /// negative indices count back from the end
    pub fn day_at(&self, index: i64) -> Result<NaiveDate, ValidationError> {
        let len = self.len_days();
        let resolved = if index < 0 { len + index } else { index };
        if resolved < 0 || resolved >= len {
            return Err(ValidationError::DayIndexOutOfRange { index, len });
        }
        self.start
            .checked_add_days(Days::new(resolved as u64))
            .ok_or(ValidationError::DayIndexOutOfRange { index, len })
    }

    /// Sub-range from day index `from` through day index `to`, inclusive.
    /// Indices follow the same rules as [`day_at`](Self::day_at).
    pub fn slice(&self, from: i64, to: i64) -> Result<DateRange, ValidationError> {
        DateRange::try_new(self.day_at(from)?, self.day_at(to)?)
    }

    /// Partition the range into `intervals` contiguous sub-ranges covering
    /// the full span with no gap or overlap. The first `intervals - 1` ranges
    /// span `ceil(len / intervals)` days; the final range absorbs the
    /// remainder, so it may be shorter but never longer.
    ///
    /// Callers must pick `intervals` so that the leading ranges do not
    /// already exhaust the span (see the sampling resolver's clamp).
    pub fn split_into(&self, intervals: u64) -> Vec<DateRange> {
        let total = self.len_days();
        if intervals <= 1 || total <= 1 {
            return vec![*self];
        }

        let per_interval = (total as u64).div_ceil(intervals) as i64;
        let mut ranges = Vec::with_capacity(intervals as usize);
        let mut cursor = self.start;

        for _ in 0..intervals - 1 {
            let next = cursor + Days::new(per_interval as u64);
            if next > self.end {
                break;
            }
            ranges.push(Self {
                start: cursor,
                end: next - Days::new(1),
            });
            cursor = next;
        }

        ranges.push(Self {
            start: cursor,
            end: self.end,
        });
        ranges
    }

    /// Parse `{startDate, endDate}` with ISO-8601 dates
    pub fn from_doc(doc: &Value) -> Result<Self, DocumentError> {
        let start = parse_date(doc, "startDate")?;
        let end = parse_date(doc, "endDate")?;
        Ok(Self::try_new(start, end)?)
    }

    /// Serialize to the wire shape `{startDate, endDate}`
    pub fn to_request(&self) -> Value {
        json!({
            "startDate": self.start.to_string(),
            "endDate": self.end.to_string(),
        })
    }
}

fn parse_date(doc: &Value, field: &str) -> Result<NaiveDate, DocumentError> {
    let text = value::as_str(value::require(doc, field)?, field)?;
    text.parse::<NaiveDate>()
        .map_err(|_| DocumentError::InvalidDate {
            field: field.to_string(),
            value: text.to_string(),
        })
}
