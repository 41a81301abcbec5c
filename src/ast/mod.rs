//! Abstract syntax tree for OSS rule files
//!
//! The AST mirrors the source syntax: a file is an ordered list of rules,
//! each rule owns its selectors, traits, and body, and bodies nest further
//! rules. Nesting is one-directional: a nested rule refers back to its
//! enclosing rule through a [`RuleId`], never an owning link.

mod rule;
mod value;

pub use rule::{Rule, RuleBody, RuleId, Selector, SelectorKey, Statement, Trait};
pub use value::{Literal, SimpleValue, Value, ValueKind};

use crate::Span;
use smol_str::SmolStr;

/// An identifier with source location
///
/// Used for property keys, map keys, and precedence-chain anchors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The identifier name
    pub name: SmolStr,
    /// Source location
    pub span: Span,
}

impl Ident {
    /// Create a new identifier
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A complete parsed OSS file
#[derive(Debug, Clone, PartialEq)]
pub struct OssFile {
    /// Top-level rules, in source order (never empty)
    pub rules: Vec<Rule>,
    /// Span covering every rule in the file
    pub span: Span,
}

impl OssFile {
    /// Create a new file node
    #[must_use]
    pub fn new(rules: Vec<Rule>, span: Span) -> Self {
        Self { rules, span }
    }

    /// Look up any rule in the file, top-level or nested, by its id
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find_map(|rule| rule.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_display() {
        let ident = Ident::new("visible", Span::new(0, 7));
        assert_eq!(format!("{ident}"), "visible");
        assert_eq!(ident.as_str(), "visible");
    }
}
