//! Filter-expression lexer
//!
//! Walks a single expression line and produces spanned tokens. Length limits
//! come from compile-time constants; every error carries the offset of the
//! offending fragment so parse errors can quote it.

use crate::config::constants::compile_time::expression::*;
use crate::log_debug;
use crate::tokens::{Keyword, Token};
use crate::utils::{span::Spanned, Span};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical analysis errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}' at offset {offset}")]
    InvalidCharacter { character: char, offset: usize },

    #[error("Unterminated string literal starting at offset {start}")]
    UnterminatedString { start: usize },

    #[error("Unterminated quoted identifier starting at offset {start}")]
    UnterminatedQuotedIdentifier { start: usize },

    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String, span: Span },

    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH})")]
    IdentifierTooLong { length: usize },

    #[error("Expression too long: {length} bytes (max {MAX_EXPRESSION_LENGTH})")]
    ExpressionTooLong { length: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes;
        match self {
            LexerError::InvalidCharacter { .. } => codes::expression::INVALID_CHARACTER,
            LexerError::UnterminatedString { .. } => codes::expression::UNTERMINATED_STRING,
            LexerError::UnterminatedQuotedIdentifier { .. } => {
                codes::expression::UNTERMINATED_STRING
            }
            LexerError::InvalidNumber { .. } => codes::expression::INVALID_NUMBER,
            LexerError::IdentifierTooLong { .. } => codes::expression::IDENTIFIER_TOO_LONG,
            LexerError::ExpressionTooLong { .. } => codes::expression::EXPRESSION_TOO_LONG,
        }
    }

    /// The span this error points at, when it has one
    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidCharacter { offset, .. } => Span::single(*offset),
            LexerError::UnterminatedString { start } => Span::single(*start),
            LexerError::UnterminatedQuotedIdentifier { start } => Span::single(*start),
            LexerError::InvalidNumber { span, .. } => *span,
            LexerError::IdentifierTooLong { .. } => Span::default(),
            LexerError::ExpressionTooLong { .. } => Span::default(),
        }
    }
}

/// Tokenize a filter expression into spanned tokens, terminated by Eof
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Token>>, LexerError> {
    ExpressionLexer::new(source)?.run()
}

struct ExpressionLexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Spanned<Token>>,
}

impl<'a> ExpressionLexer<'a> {
    fn new(source: &'a str) -> Result<Self, LexerError> {
        if source.len() > MAX_EXPRESSION_LENGTH {
            return Err(LexerError::ExpressionTooLong {
                length: source.len(),
            });
        }
        Ok(Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
        })
    }

    fn run(mut self) -> Result<Vec<Spanned<Token>>, LexerError> {
        while let Some(&(offset, ch)) = self.chars.peek() {
            match ch {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '\'' => self.lex_string(offset)?,
                '"' => self.lex_quoted_identifier(offset)?,
                c if c.is_ascii_digit() => self.lex_number(offset)?,
                '-' | '+' => {
                    // Signs only open number literals; the grammar has no
                    // arithmetic operators
                    self.lex_number(offset)?;
                }
                c if c.is_alphabetic() || c == '_' => self.lex_word(offset)?,
                _ => self.lex_symbol(offset, ch)?,
            }
        }

        let end = self.source.len();
        self.tokens.push(Spanned::new(Token::Eof, Span::at(end)));

        log_debug!("Expression tokenized",
            "tokens" => self.tokens.len(),
            "length" => self.source.len()
        );

        Ok(self.tokens)
    }

    /// Single-quoted string; a doubled quote escapes a literal quote
    fn lex_string(&mut self, start: usize) -> Result<(), LexerError> {
        self.chars.next(); // opening quote
        let mut content = String::new();

        loop {
            match self.chars.next() {
                Some((_, '\'')) => {
                    // A quote immediately followed by another quote is an
                    // escaped quote, not a terminator
                    if let Some(&(_, '\'')) = self.chars.peek() {
                        self.chars.next();
                        content.push('\'');
                    } else {
                        let end = self.current_offset();
                        self.tokens.push(Spanned::new(
                            Token::StringLiteral(content),
                            Span::new(start, end),
                        ));
                        return Ok(());
                    }
                }
                Some((_, c)) => content.push(c),
                None => return Err(LexerError::UnterminatedString { start }),
            }
        }
    }

    /// Double-quoted identifier; the quotes are kept as written
    fn lex_quoted_identifier(&mut self, start: usize) -> Result<(), LexerError> {
        self.chars.next(); // opening quote
        let mut content = String::from("\"");

        loop {
            match self.chars.next() {
                Some((_, '"')) => {
                    content.push('"');
                    let end = self.current_offset();
                    if content.len() > MAX_IDENTIFIER_LENGTH {
                        return Err(LexerError::IdentifierTooLong {
                            length: content.len(),
                        });
                    }
                    self.tokens.push(Spanned::new(
                        Token::QuotedIdentifier(content),
                        Span::new(start, end),
                    ));
                    return Ok(());
                }
                Some((_, c)) => content.push(c),
                None => return Err(LexerError::UnterminatedQuotedIdentifier { start }),
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Result<(), LexerError> {
        let mut text = String::new();

        if let Some(&(_, sign)) = self.chars.peek() {
            if sign == '-' || sign == '+' {
                text.push(sign);
                self.chars.next();
            }
        }

        let mut saw_digit = false;
        let mut saw_dot = false;
        let mut saw_exponent = false;

        while let Some(&(_, c)) = self.chars.peek() {
            match c {
                d if d.is_ascii_digit() => {
                    saw_digit = true;
                    text.push(d);
                    self.chars.next();
                }
                '.' if !saw_dot && !saw_exponent => {
                    saw_dot = true;
                    text.push('.');
                    self.chars.next();
                }
                'e' | 'E' if saw_digit && !saw_exponent => {
                    saw_exponent = true;
                    text.push(c);
                    self.chars.next();
                    if let Some(&(_, sign)) = self.chars.peek() {
                        if sign == '-' || sign == '+' {
                            text.push(sign);
                            self.chars.next();
                        }
                    }
                }
                _ => break,
            }
        }

        let end = self.current_offset();
        let span = Span::new(start, end);

        if !saw_digit {
            return Err(LexerError::InvalidNumber { text, span });
        }

        let token = if saw_dot || saw_exponent {
            match text.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => return Err(LexerError::InvalidNumber { text, span }),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::Integer(value),
                // Integers past i64 fall back to float, as a lenient reader
                Err(_) => match text.parse::<f64>() {
                    Ok(value) => Token::Float(value),
                    Err(_) => return Err(LexerError::InvalidNumber { text, span }),
                },
            }
        };

        self.tokens.push(Spanned::new(token, span));
        Ok(())
    }

    /// Bare identifier or keyword
    fn lex_word(&mut self, start: usize) -> Result<(), LexerError> {
        let mut word = String::new();

        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.chars.next();
            } else {
                break;
            }
        }

        if word.len() > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong { length: word.len() });
        }

        let end = self.current_offset();
        let token = match Keyword::from_word(&word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(word),
        };

        self.tokens.push(Spanned::new(token, Span::new(start, end)));
        Ok(())
    }

    fn lex_symbol(&mut self, start: usize, ch: char) -> Result<(), LexerError> {
        self.chars.next();
        let token = match ch {
            '<' => match self.chars.peek() {
                Some(&(_, '=')) => {
                    self.chars.next();
                    Token::LessThanOrEqual
                }
                Some(&(_, '>')) => {
                    self.chars.next();
                    Token::AngleNotEquals
                }
                _ => Token::LessThan,
            },
            '>' => match self.chars.peek() {
                Some(&(_, '=')) => {
                    self.chars.next();
                    Token::GreaterThanOrEqual
                }
                _ => Token::GreaterThan,
            },
            '=' => match self.chars.peek() {
                Some(&(_, '=')) => {
                    self.chars.next();
                    Token::DoubleEquals
                }
                _ => Token::Equals,
            },
            '!' => match self.chars.peek() {
                Some(&(_, '=')) => {
                    self.chars.next();
                    Token::NotEquals
                }
                _ => {
                    return Err(LexerError::InvalidCharacter {
                        character: '!',
                        offset: start,
                    })
                }
            },
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            '.' => Token::Dot,
            other => {
                return Err(LexerError::InvalidCharacter {
                    character: other,
                    offset: start,
                })
            }
        };

        let end = self.current_offset();
        self.tokens.push(Spanned::new(token, Span::new(start, end)));
        Ok(())
    }

    /// Byte offset of the next unread character (or end of input)
    fn current_offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn token_values(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.value)
            .collect()
    }

    #[test]
    fn test_simple_comparison() {
        assert_eq!(
            token_values("source == 'google'"),
            vec![
                Token::Identifier("source".into()),
                Token::DoubleEquals,
                Token::StringLiteral("google".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_membership_expression() {
        assert_eq!(
            token_values("medium IN ('cpc', 'ppc')"),
            vec![
                Token::Identifier("medium".into()),
                Token::Keyword(Keyword::In),
                Token::LeftParen,
                Token::StringLiteral("cpc".into()),
                Token::Comma,
                Token::StringLiteral("ppc".into()),
                Token::RightParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(
            token_values("sessions >= 100"),
            vec![
                Token::Identifier("sessions".into()),
                Token::GreaterThanOrEqual,
                Token::Integer(100),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_float_and_negative_numbers() {
        assert_eq!(
            token_values("x > -1.5"),
            vec![
                Token::Identifier("x".into()),
                Token::GreaterThan,
                Token::Float(-1.5),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert_eq!(
            token_values("brand == 'bob''s'"),
            vec![
                Token::Identifier("brand".into()),
                Token::DoubleEquals,
                Token::StringLiteral("bob's".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_qualified_reference() {
        assert_eq!(
            token_values("t.col = 1"),
            vec![
                Token::Identifier("t".into()),
                Token::Dot,
                Token::Identifier("col".into()),
                Token::Equals,
                Token::Integer(1),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_keeps_quotes() {
        assert_eq!(
            token_values("\"odd name\" != 'x'"),
            vec![
                Token::QuotedIdentifier("\"odd name\"".into()),
                Token::NotEquals,
                Token::StringLiteral("x".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_values("flag == true"),
            vec![
                Token::Identifier("flag".into()),
                Token::DoubleEquals,
                Token::Keyword(Keyword::True),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_error() {
        assert_matches!(
            tokenize("source == 'goog"),
            Err(LexerError::UnterminatedString { start: 10 })
        );
    }

    #[test]
    fn test_invalid_character_error() {
        let err = tokenize("sessions # 3").unwrap_err();
        assert_matches!(err, LexerError::InvalidCharacter { character: '#', .. });
        assert_eq!(err.error_code().as_str(), "E020");
    }

    #[test]
    fn test_angle_not_equals() {
        assert_eq!(
            token_values("a <> b"),
            vec![
                Token::Identifier("a".into()),
                Token::AngleNotEquals,
                Token::Identifier("b".into()),
                Token::Eof,
            ]
        );
    }
}
