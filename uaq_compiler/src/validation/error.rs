//! Validation errors for value-object construction
//!
//! Value objects are immutable once built, so every invariant is enforced at
//! construction time and never re-checked afterwards.

use crate::logging::{codes, Code};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Date range start {start} is after end {end}")]
    RangeOrder { start: String, end: String },

    #[error("Field '{field}' has {len} items; expected between {min} and {max}")]
    LengthOutOfBounds {
        field: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("Day index {index} is outside a range of {len} days")]
    DayIndexOutOfRange { index: i64, len: i64 },
}

impl ValidationError {
    pub fn error_code(&self) -> Code {
        match self {
            ValidationError::RangeOrder { .. } => codes::validation::RANGE_ORDER,
            ValidationError::LengthOutOfBounds { .. } => codes::validation::LENGTH_OUT_OF_BOUNDS,
            ValidationError::DayIndexOutOfRange { .. } => {
                codes::validation::DAY_INDEX_OUT_OF_RANGE
            }
        }
    }
}

/// Check a collection length against inclusive bounds
pub fn len_between<T>(
    field: &'static str,
    items: &[T],
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if items.len() < min || items.len() > max {
        return Err(ValidationError::LengthOutOfBounds {
            field,
            len: items.len(),
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_len_between_accepts_bounds() {
        assert!(len_between("dimensions", &[1, 2], 1, 7).is_ok());
        assert!(len_between("dimensions", &[1], 1, 1).is_ok());
    }

    #[test]
    fn test_len_between_rejects_outside() {
        assert_matches!(
            len_between::<i32>("metrics", &[], 1, 10),
            Err(ValidationError::LengthOutOfBounds {
                field: "metrics",
                len: 0,
                ..
            })
        );
        assert_matches!(
            len_between("date_ranges", &[1, 2, 3], 1, 2),
            Err(ValidationError::LengthOutOfBounds { len: 3, .. })
        );
    }

    #[test]
    fn test_error_codes() {
        let err = ValidationError::DayIndexOutOfRange { index: 40, len: 30 };
        assert_eq!(err.error_code().as_str(), "E042");
    }
}
