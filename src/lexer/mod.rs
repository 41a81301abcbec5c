//! Lexical analysis for OSS rule files
//!
//! Tokenizes `.oss` source text with the logos crate. The parser consumes
//! the resulting token vector through its own cursor; this module only
//! attaches byte spans and surfaces unrecognized characters.

mod token;

use logos::Logos;
use smol_str::SmolStr;
pub use token::Token;

use crate::{SourceLocation, Span};

/// A token with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The token
    pub token: Token,
    /// Source location
    pub span: Span,
}

impl SpannedToken {
    /// Create a new spanned token
    #[must_use]
    pub const fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

/// Lexer for OSS source code
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Token>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Token::lexer(source),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<SpannedToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = Span::from(self.inner.span());

        Some(match result {
            Ok(token) => Ok(SpannedToken::new(token, span)),
            Err(()) => Err(LexError {
                text: SmolStr::new(self.inner.slice()),
                location: SourceLocation::from_offset(self.inner.source(), span.start),
                span,
            }),
        })
    }
}

/// Error during lexical analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The unrecognized source text
    pub text: SmolStr,
    /// Line and column of the error
    pub location: SourceLocation,
    /// Location of the error
    pub span: Span,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized character `{}` at {}",
            self.text, self.location
        )
    }
}

impl std::error::Error for LexError {}

/// Tokenize source code into a vector of tokens
///
/// # Errors
///
/// Returns an error if the source contains invalid tokens
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    Lexer::new(source).collect()
}
