//! Token system for the filter-expression grammar
//!
//! The grammar is a single comparison or membership test per expression, so
//! the token inventory is small: literals, identifiers, comparison symbols,
//! and the handful of keywords the atom syntax allows.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords recognized case-insensitively inside filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    True,
    False,
    Null,
    In,
}

impl Keyword {
    /// Case-insensitive keyword lookup
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "TRUE" => Some(Keyword::True),
            "FALSE" => Some(Keyword::False),
            "NULL" => Some(Keyword::Null),
            "IN" => Some(Keyword::In),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Null => "NULL",
            Keyword::In => "IN",
        }
    }
}

/// Filter-expression tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// TRUE / FALSE / NULL / IN (case-insensitive in source)
    Keyword(Keyword),

    // Comparison operator symbols
    Equals,             // =
    DoubleEquals,       // ==
    NotEquals,          // !=
    AngleNotEquals,     // <>
    GreaterThan,        // >
    LessThan,           // <
    GreaterThanOrEqual, // >=
    LessThanOrEqual,    // <=

    // Literals
    /// Single-quoted string, quote escaped by doubling ('it''s')
    StringLiteral(String),
    /// Integer literal (64-bit signed)
    Integer(i64),
    /// Float literal (IEEE 754 double precision)
    Float(f64),

    /// Bare identifier (column or table name)
    Identifier(String),
    /// Double-quoted identifier; the quotes are kept as written
    QuotedIdentifier(String),

    // Punctuation
    Dot,
    Comma,
    LeftParen,
    RightParen,

    /// End of expression marker
    Eof,
}

impl Token {
    /// Check if this token is a comparison operator
    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::DoubleEquals
                | Self::NotEquals
                | Self::AngleNotEquals
                | Self::GreaterThan
                | Self::LessThan
                | Self::GreaterThanOrEqual
                | Self::LessThanOrEqual
        )
    }

    /// The expression-syntax text of an operator token, as used for alias
    /// lookup against `FilterOperator`. `IN` counts as an operator here.
    pub fn operator_text(&self) -> Option<&'static str> {
        match self {
            Self::Equals => Some("="),
            Self::DoubleEquals => Some("=="),
            Self::NotEquals => Some("!="),
            Self::AngleNotEquals => Some("<>"),
            Self::GreaterThan => Some(">"),
            Self::LessThan => Some("<"),
            Self::GreaterThanOrEqual => Some(">="),
            Self::LessThanOrEqual => Some("<="),
            Self::Keyword(Keyword::In) => Some("IN"),
            _ => None,
        }
    }

    /// Short description used in parse error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Keyword(kw) => format!("keyword {}", kw.as_str()),
            Self::StringLiteral(_) => "string literal".to_string(),
            Self::Integer(n) => format!("integer {}", n),
            Self::Float(x) => format!("number {}", x),
            Self::Identifier(name) => format!("identifier '{}'", name),
            Self::QuotedIdentifier(name) => format!("identifier {}", name),
            Self::Dot => "'.'".to_string(),
            Self::Comma => "','".to_string(),
            Self::LeftParen => "'('".to_string(),
            Self::RightParen => "')'".to_string(),
            Self::Eof => "end of expression".to_string(),
            other => other
                .operator_text()
                .map(|text| format!("operator '{}'", text))
                .unwrap_or_else(|| "token".to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_insensitive() {
        assert_eq!(Keyword::from_word("in"), Some(Keyword::In));
        assert_eq!(Keyword::from_word("TRUE"), Some(Keyword::True));
        assert_eq!(Keyword::from_word("Null"), Some(Keyword::Null));
        assert_eq!(Keyword::from_word("sessions"), None);
    }

    #[test]
    fn test_comparison_operator_classification() {
        assert!(Token::GreaterThanOrEqual.is_comparison_operator());
        assert!(Token::AngleNotEquals.is_comparison_operator());
        assert!(!Token::Comma.is_comparison_operator());
        assert!(!Token::Keyword(Keyword::In).is_comparison_operator());
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(Token::DoubleEquals.operator_text(), Some("=="));
        assert_eq!(Token::Keyword(Keyword::In).operator_text(), Some("IN"));
        assert_eq!(Token::Identifier("x".into()).operator_text(), None);
    }
}
