//! Aliased operator enumeration
//!
//! Filter operators carry two parallel representations: the short infix
//! token used in expression syntax and the wire-level literal the reporting
//! API expects. Lookup resolves from either side; when several members share
//! a value on one side, the first declared member wins. Declaration order is
//! an explicit slice, never incidental map ordering.

/// Wire-level filter literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireLiteral {
    pub op: &'static str,
    pub negated: bool,
}

impl WireLiteral {
    pub const fn new(op: &'static str, negated: bool) -> Self {
        Self { op, negated }
    }
}

/// One member's parallel representations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasedValue {
    /// Infix expression-syntax token
    pub expr: &'static str,
    /// Wire-level literal
    pub wire: WireLiteral,
}

/// A representation key for alias lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation<'a> {
    Expr(&'a str),
    Wire(WireLiteral),
}

/// An enumeration whose members are resolvable from any of their parallel
/// representations, with a first-declared-wins tie-break
pub trait AliasedEnum: Sized + Copy + 'static {
    /// Members in declaration order
    fn members() -> &'static [Self];

    /// This member's representations
    fn value(&self) -> AliasedValue;

    /// Find the first declared member matching the given representation
    fn resolve(rep: Representation<'_>) -> Option<Self> {
        Self::members().iter().copied().find(|member| match rep {
            Representation::Expr(text) => member.value().expr == text,
            Representation::Wire(literal) => member.value().wire == literal,
        })
    }
}

/// Filter comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Neq,
    In,
    Gt,
    /// Aliased to a negated LESS_THAN on the wire, exactly as the API
    /// consumes it. Do not normalize this to GREATER_THAN's complement.
    Gte,
}

impl AliasedEnum for FilterOperator {
    fn members() -> &'static [Self] {
        &[Self::Eq, Self::Neq, Self::In, Self::Gt, Self::Gte]
    }

    fn value(&self) -> AliasedValue {
        match self {
            Self::Eq => AliasedValue {
                expr: "==",
                wire: WireLiteral::new("EXACT", false),
            },
            Self::Neq => AliasedValue {
                expr: "!=",
                wire: WireLiteral::new("EXACT", true),
            },
            Self::In => AliasedValue {
                expr: "IN",
                wire: WireLiteral::new("IN_LIST", false),
            },
            Self::Gt => AliasedValue {
                expr: ">",
                wire: WireLiteral::new("GREATER_THAN", false),
            },
            Self::Gte => AliasedValue {
                expr: ">=",
                wire: WireLiteral::new("LESS_THAN", true),
            },
        }
    }
}

impl FilterOperator {
    /// Wire-level literal for this operator
    pub fn wire(&self) -> WireLiteral {
        self.value().wire
    }

    /// Expression-syntax token for this operator
    pub fn expr_token(&self) -> &'static str {
        self.value().expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_expression_token() {
        assert_eq!(
            FilterOperator::resolve(Representation::Expr("==")),
            Some(FilterOperator::Eq)
        );
        assert_eq!(
            FilterOperator::resolve(Representation::Expr("IN")),
            Some(FilterOperator::In)
        );
        assert_eq!(
            FilterOperator::resolve(Representation::Expr(">=")),
            Some(FilterOperator::Gte)
        );
    }

    #[test]
    fn test_resolve_from_wire_literal() {
        assert_eq!(
            FilterOperator::resolve(Representation::Wire(WireLiteral::new("EXACT", true))),
            Some(FilterOperator::Neq)
        );
    }

    #[test]
    fn test_unresolvable_tokens() {
        assert_eq!(FilterOperator::resolve(Representation::Expr("=")), None);
        assert_eq!(FilterOperator::resolve(Representation::Expr("<")), None);
        assert_eq!(FilterOperator::resolve(Representation::Expr("<=")), None);
        assert_eq!(FilterOperator::resolve(Representation::Expr("<>")), None);
    }

    #[test]
    fn test_gte_keeps_negated_less_than() {
        let wire = FilterOperator::Gte.wire();
        assert_eq!(wire.op, "LESS_THAN");
        assert!(wire.negated);
    }

    #[test]
    fn test_tie_break_returns_first_declared() {
        // Eq and Neq share the EXACT wire op but differ on negation; a
        // duplicated representation must resolve to the earlier member
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Doubled {
            First,
            Second,
        }

        impl AliasedEnum for Doubled {
            fn members() -> &'static [Self] {
                &[Self::First, Self::Second]
            }

            fn value(&self) -> AliasedValue {
                AliasedValue {
                    expr: "*=",
                    wire: WireLiteral::new("PARTIAL", false),
                }
            }
        }

        assert_eq!(
            Doubled::resolve(Representation::Expr("*=")),
            Some(Doubled::First)
        );
    }
}
