//! Parser error types

use crate::{SourceLocation, Span};
use miette::Diagnostic;
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// A parse error with location and context
///
/// Every variant aborts the parse: there is no recovery, no partial AST,
/// and no multi-error aggregation. Callers treat a parse as all-or-nothing.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ParseError {
    /// The current token does not fit the grammar at this position
    #[error("expected {expected}, found `{found}` at {line}:{column}")]
    UnexpectedToken {
        /// What the grammar requires here
        expected: String,
        /// Literal text of the offending token
        found: String,
        /// 1-indexed line of the offending token
        line: usize,
        /// 1-indexed column of the offending token
        column: usize,
        /// Location of the error
        #[label("here")]
        span: Span,
    },

    /// End of input inside an unfinished construct
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// What the grammar requires here
        expected: String,
        /// Location of the error (end of input)
        #[label("input ends here")]
        span: Span,
    },

    /// A construct requiring at least one element produced none
    #[error("expected at least one {construct} at {line}:{column}")]
    EmptyInput {
        /// The construct that came up empty
        construct: String,
        /// 1-indexed line
        line: usize,
        /// 1-indexed column
        column: usize,
        /// Location of the error
        #[label("nothing here")]
        span: Span,
    },

    /// Tokens remained after the last rule was parsed
    ///
    /// The file driver guarantees it consumes its whole input; this variant
    /// reports a violation of that postcondition.
    #[error("trailing input after the last rule: `{found}` at {line}:{column}")]
    TrailingInput {
        /// Literal text of the first unconsumed token
        found: String,
        /// 1-indexed line
        line: usize,
        /// 1-indexed column
        column: usize,
        /// Location of the error
        #[label("unconsumed input")]
        span: Span,
    },

    /// Invalid token (lexer error)
    #[error("unrecognized character")]
    InvalidToken {
        /// Location of the error
        #[label("not a valid token")]
        span: Span,
    },
}

impl ParseError {
    /// Create an unexpected token error
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: SourceLocation,
        span: Span,
    ) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            line: location.line,
            column: location.column,
            span,
        }
    }

    /// Create an unexpected end-of-input error
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// Create an empty-construct error
    pub fn empty_input(construct: impl Into<String>, location: SourceLocation, span: Span) -> Self {
        ParseError::EmptyInput {
            construct: construct.into(),
            line: location.line,
            column: location.column,
            span,
        }
    }

    /// Create a trailing-input error
    pub fn trailing_input(found: impl Into<String>, location: SourceLocation, span: Span) -> Self {
        ParseError::TrailingInput {
            found: found.into(),
            line: location.line,
            column: location.column,
            span,
        }
    }

    /// Get the span of the error
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::EmptyInput { span, .. }
            | ParseError::TrailingInput { span, .. }
            | ParseError::InvalidToken { span } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message_names_location() {
        let err = ParseError::unexpected(
            "`;` or `{`",
            "]",
            SourceLocation { line: 3, column: 14 },
            Span::new(40, 41),
        );
        assert_eq!(err.to_string(), "expected `;` or `{`, found `]` at 3:14");
        assert_eq!(err.span(), Span::new(40, 41));
    }

    #[test]
    fn test_empty_input_message() {
        let err = ParseError::empty_input(
            "selector",
            SourceLocation { line: 1, column: 1 },
            Span::new(0, 1),
        );
        assert_eq!(err.to_string(), "expected at least one selector at 1:1");
    }
}
