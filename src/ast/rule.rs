//! Rule, selector, and trait AST nodes

use super::{Ident, SimpleValue, Value};
use crate::Span;
use smol_str::SmolStr;

/// Identifier of a rule within its file
///
/// Ids are assigned in parse (pre-)order. A nested rule carries its
/// enclosing rule's id as `parent`, which keeps the nesting relation free
/// of ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(u32);

impl RuleId {
    /// Create a rule id from its raw index
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw index of this id
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

/// A single rule: selectors, optional traits, and a body or bare terminator
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// This rule's id within the file
    pub id: RuleId,
    /// Match predicates, in source order (never empty)
    pub selectors: Vec<Selector>,
    /// Trait tags; `None` when no `#` list was written
    pub traits: Option<Vec<Trait>>,
    /// Rule body; `None` for a rule terminated by `;`
    pub body: Option<RuleBody>,
    /// Id of the enclosing rule, for nested rules
    pub parent: Option<RuleId>,
    /// Source location
    pub span: Span,
}

impl Rule {
    /// Find this rule or one of its nested rules by id
    #[must_use]
    pub fn find(&self, id: RuleId) -> Option<&Rule> {
        if self.id == id {
            return Some(self);
        }
        let body = self.body.as_ref()?;
        body.statements.iter().find_map(|statement| match statement {
            Statement::Nested(rule) => rule.find(id),
            _ => None,
        })
    }

    /// Whether any selector carries the `@` declaration marker
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        self.selectors.iter().any(|s| s.is_declaration)
    }
}

/// A selector: one key/value match predicate of a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// The selector key
    pub key: SelectorKey,
    /// The matched value; `None` iff the selector is null-marked
    pub value: Option<Value>,
    /// Whether the selector was written with the `@` declaration marker
    pub is_declaration: bool,
    /// Whether the selector was written with the `^` null marker
    pub has_null_marker: bool,
    /// Source location
    pub span: Span,
}

impl Selector {
    /// Whether this selector matches any value for its key
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(
            &self.value,
            Some(value) if matches!(value.kind, super::ValueKind::Simple(super::Literal::Wildcard))
        )
    }
}

/// A selector key with source location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorKey {
    /// The key name
    pub name: SmolStr,
    /// Source location
    pub span: Span,
}

impl SelectorKey {
    /// Create a new selector key
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl std::fmt::Display for SelectorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A trait tag attached to a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trait {
    /// The trait name
    pub name: SmolStr,
    /// Source location
    pub span: Span,
}

impl Trait {
    /// Create a new trait
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// The body of a rule: ordered statements between `{` and `}`
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBody {
    /// Statements in source order (an empty body is legal)
    pub statements: Vec<Statement>,
    /// Source location
    pub span: Span,
}

impl RuleBody {
    /// Create a new rule body
    #[must_use]
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }
}

/// One statement inside a rule body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A property assignment: `key: value;`
    Property {
        /// The property key
        key: Ident,
        /// The assigned value
        value: Value,
        /// Source location of the whole statement
        span: Span,
    },

    /// A nested rule
    Nested(Rule),

    /// A precedence-chain link: `from => to`
    ///
    /// Declares that the rule context named by `from` is ordered before the
    /// one identified by `to`. The relation is recorded for a downstream
    /// rule-matching engine; the parser does not interpret it.
    PrecedenceChain {
        /// The anchor key
        from: Ident,
        /// The successor the anchor precedes
        to: SimpleValue,
        /// Source location of the link
        span: Span,
    },
}

impl Statement {
    /// Source location of the statement
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Statement::Property { span, .. } | Statement::PrecedenceChain { span, .. } => *span,
            Statement::Nested(rule) => rule.span,
        }
    }
}
