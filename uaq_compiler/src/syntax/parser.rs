//! Recursive-descent parser for filter expressions
//!
//! The grammar is deliberately small: one comparison (`term op term`) or one
//! membership test (`term IN (term, ...)`) per expression. Anything after
//! that is a parse error.

use crate::config::constants::compile_time::expression::MAX_MEMBERSHIP_LIST_ITEMS;
use crate::lexical::tokenize;
use crate::log_debug;
use crate::syntax::error::ExpressionError;
use crate::tokens::{Keyword, Token};
use crate::utils::{span::Spanned, Span};

/// A single operand: a literal or a (possibly qualified) column reference
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Dotted reference, one component per segment. Quoted components keep
    /// their double quotes as written.
    ColumnRef(Vec<String>),
}

impl Operand {
    /// Leading name of a reference: the first dotted component, or the
    /// string value itself for string operands. Literals have no name.
    pub fn leading_name(&self) -> Option<&str> {
        match self {
            Operand::ColumnRef(parts) => parts.first().map(String::as_str),
            Operand::Str(text) => Some(text),
            _ => None,
        }
    }
}

/// Right-hand side of an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Rhs {
    Scalar(Operand),
    List(Vec<Operand>),
}

/// A parsed filter expression, prior to operator alias resolution
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    pub lhs: Operand,
    /// Operator exactly as written in expression syntax ("==", ">=", "IN", ...)
    pub op_token: String,
    pub op_span: Span,
    pub rhs: Rhs,
}

/// Parse a filter expression string
pub fn parse_expression(source: &str) -> Result<FilterExpression, ExpressionError> {
    let tokens = tokenize(source).map_err(|err| ExpressionError::from_lexer(err, source))?;
    ExpressionParser::new(source, tokens).run()
}

struct ExpressionParser<'a> {
    source: &'a str,
    tokens: Vec<Spanned<Token>>,
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(source: &'a str, tokens: Vec<Spanned<Token>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn run(mut self) -> Result<FilterExpression, ExpressionError> {
        let lhs = self.parse_term()?;
        let (op_token, op_span) = self.parse_operator()?;

        let rhs = if op_token == "IN" {
            Rhs::List(self.parse_membership_list()?)
        } else {
            Rhs::Scalar(self.parse_term()?)
        };

        self.expect_end()?;

        log_debug!("Filter expression parsed",
            "operator" => &op_token,
            "length" => self.source.len()
        );

        Ok(FilterExpression {
            lhs,
            op_token,
            op_span,
            rhs,
        })
    }

    fn parse_term(&mut self) -> Result<Operand, ExpressionError> {
        let spanned = self.advance();
        match spanned.value {
            Token::Integer(value) => Ok(Operand::Int(value)),
            Token::Float(value) => Ok(Operand::Float(value)),
            Token::StringLiteral(text) => Ok(Operand::Str(text)),
            Token::Keyword(Keyword::True) => Ok(Operand::Bool(true)),
            Token::Keyword(Keyword::False) => Ok(Operand::Bool(false)),
            Token::Keyword(Keyword::Null) => Ok(Operand::Null),
            Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                self.parse_reference_tail(name)
            }
            other => Err(self.parse_error(
                spanned.span,
                format!("expected a value or column reference, found {}", other),
            )),
        }
    }

    /// Consume `.component` segments after a leading reference component
    fn parse_reference_tail(&mut self, first: String) -> Result<Operand, ExpressionError> {
        let mut parts = vec![first];

        while self.peek().value == Token::Dot {
            self.advance();
            let spanned = self.advance();
            match spanned.value {
                Token::Identifier(name) | Token::QuotedIdentifier(name) => parts.push(name),
                other => {
                    return Err(self.parse_error(
                        spanned.span,
                        format!("expected identifier after '.', found {}", other),
                    ))
                }
            }
        }

        Ok(Operand::ColumnRef(parts))
    }

    fn parse_operator(&mut self) -> Result<(String, Span), ExpressionError> {
        let spanned = self.advance();
        match spanned.value.operator_text() {
            Some(text) => Ok((text.to_string(), spanned.span)),
            None => Err(self.parse_error(
                spanned.span,
                format!("expected comparison operator, found {}", spanned.value),
            )),
        }
    }

    fn parse_membership_list(&mut self) -> Result<Vec<Operand>, ExpressionError> {
        let open = self.advance();
        if open.value != Token::LeftParen {
            return Err(self.parse_error(
                open.span,
                format!("expected '(' after IN, found {}", open.value),
            ));
        }

        let mut items = vec![self.parse_term()?];

        loop {
            let spanned = self.advance();
            match spanned.value {
                Token::Comma => items.push(self.parse_term()?),
                Token::RightParen => break,
                other => {
                    return Err(self.parse_error(
                        spanned.span,
                        format!("expected ',' or ')' in membership list, found {}", other),
                    ))
                }
            }

            if items.len() > MAX_MEMBERSHIP_LIST_ITEMS {
                let span = spanned.span;
                return Err(self.parse_error(
                    span,
                    format!(
                        "membership list exceeds {} items",
                        MAX_MEMBERSHIP_LIST_ITEMS
                    ),
                ));
            }
        }

        Ok(items)
    }

    fn expect_end(&mut self) -> Result<(), ExpressionError> {
        let spanned = self.advance();
        if spanned.value == Token::Eof {
            Ok(())
        } else {
            Err(self.parse_error(
                spanned.span,
                format!("unexpected {} after expression", spanned.value),
            ))
        }
    }

    fn peek(&self) -> &Spanned<Token> {
        // The token stream always ends with Eof, so the last slot is a safe
        // saturation point
        let index = self.pos.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) -> Spanned<Token> {
        let spanned = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        spanned
    }

    fn parse_error(&self, span: Span, reason: String) -> ExpressionError {
        let fragment = if span.is_empty() {
            self.source.to_string()
        } else {
            span.fragment(self.source).to_string()
        };
        ExpressionError::Parse {
            fragment,
            reason,
            span,
        }
    }
}
