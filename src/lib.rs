//! OSS: a selector-based rule language
//!
//! OSS files pair *selectors* (key/value match predicates) with *rules*: a
//! rule either carries a body of properties, nested rules, and precedence
//! chains, or is a bare declaration terminated by `;`. Traits tag a rule for
//! composition by a downstream evaluator.
//!
//! # Example
//!
//! ```oss
//! class=User {
//!     field=name #required {
//!         label: "Name";
//!         visible: true;
//!     }
//!     zLeft => name => email;
//! }
//!
//! @module=Catalog;
//! ```
//!
//! This crate covers the frontend only: tokenizing source text and parsing it
//! into an [`ast::OssFile`]. Matching rules against a context and applying
//! their properties is the job of a downstream engine consuming the AST.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;

/// A `[start, end)` byte range in the source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<logos::Span> for Span {
    fn from(span: logos::Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// A 1-indexed line/column position, derived from a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Locate a byte offset in the source text
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;

        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_covers_both() {
        let a = Span::new(4, 9);
        let b = Span::new(12, 20);
        assert_eq!(a.merge(b), Span::new(4, 20));
        assert_eq!(b.merge(a), Span::new(4, 20));
    }

    #[test]
    fn test_location_single_line() {
        let source = "field=name;";
        assert_eq!(
            SourceLocation::from_offset(source, 0),
            SourceLocation { line: 1, column: 1 }
        );
        assert_eq!(
            SourceLocation::from_offset(source, 6),
            SourceLocation { line: 1, column: 7 }
        );
    }

    #[test]
    fn test_location_crosses_lines() {
        let source = "class=User {\n    visible: true;\n}\n";
        // Offset of `visible`
        let offset = source.find("visible").unwrap();
        assert_eq!(
            SourceLocation::from_offset(source, offset),
            SourceLocation { line: 2, column: 5 }
        );
        // Offset of the closing brace
        let offset = source.rfind('}').unwrap();
        assert_eq!(
            SourceLocation::from_offset(source, offset),
            SourceLocation { line: 3, column: 1 }
        );
    }

    #[test]
    fn test_location_clamps_past_end() {
        let loc = SourceLocation::from_offset("ab", 100);
        assert_eq!(loc, SourceLocation { line: 1, column: 3 });
    }

    #[test]
    fn test_location_display() {
        let loc = SourceLocation { line: 7, column: 3 };
        assert_eq!(format!("{loc}"), "7:3");
    }
}
