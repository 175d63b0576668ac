//! Source location tracking for filter expressions
//!
//! Filter expressions are single-line strings, so a span is a byte-offset
//! range into the expression text. Spans let lexer and parser errors point at
//! the offending fragment.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A byte-offset span into a filter expression string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Create a single-byte span
    pub fn single(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset + 1,
        }
    }

    /// Create an empty span at an offset (used for end-of-input errors)
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the spanned fragment from the source expression.
    ///
    /// Out-of-range spans yield an empty string rather than panicking; error
    /// paths must never introduce their own panics.
    pub fn fragment<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A value paired with the span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(2, 5);
        let b = Span::new(4, 9);
        assert_eq!(a.merge(b), Span::new(2, 9));
    }

    #[test]
    fn test_span_fragment() {
        let src = "source == 'google'";
        assert_eq!(Span::new(0, 6).fragment(src), "source");
        assert_eq!(Span::new(7, 9).fragment(src), "==");
    }

    #[test]
    fn test_span_fragment_out_of_range() {
        assert_eq!(Span::new(10, 20).fragment("short"), "");
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 7).to_string(), "3..7");
    }
}
