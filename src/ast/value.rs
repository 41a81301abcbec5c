//! Value AST nodes

use crate::Span;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// A value with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// The value kind
    pub kind: ValueKind,
    /// Source location
    pub span: Span,
}

impl Value {
    /// Create a new value
    #[must_use]
    pub fn new(kind: ValueKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The shapes a value can take
///
/// One tagged union so consumers match exhaustively; a new value kind cannot
/// be silently skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// A single literal
    Simple(Literal),

    /// A parenthesized list of literals: `(a, b, c)` (never empty)
    List(Vec<SimpleValue>),

    /// A bracketed list: `[a, [b], {k: v}]` (heterogeneous, possibly empty)
    Wrapped(Vec<Value>),

    /// A map: `{key: value; ...}` with ordered unique keys
    ///
    /// A duplicate key overwrites the earlier value and keeps its position.
    Map(IndexMap<SmolStr, Value>),
}

/// A literal with source location
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleValue {
    /// The literal
    pub literal: Literal,
    /// Source location
    pub span: Span,
}

impl SimpleValue {
    /// Create a new simple value
    #[must_use]
    pub fn new(literal: Literal, span: Span) -> Self {
        Self { literal, span }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An identifier used as a value: `name`
    Ident(SmolStr),
    /// A dotted key path: `object.field`
    KeyPath(SmolStr),
    /// A string: `"First Name"`
    String(SmolStr),
    /// An integer: `42`
    Integer(i64),
    /// A decimal number: `1.5`
    Decimal(f64),
    /// `true` or `false`
    Bool(bool),
    /// `null`
    Null,
    /// `*`, matching any value
    Wildcard,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Ident(s) | Literal::KeyPath(s) => write!(f, "{s}"),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Decimal(x) => {
                if x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => write!(f, "null"),
            Literal::Wildcard => write!(f, "*"),
        }
    }
}
