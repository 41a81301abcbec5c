//! Token definitions for the OSS rule language

use logos::Logos;
use smol_str::SmolStr;

/// Tokens in the OSS language
///
/// The enumeration is closed: the parser dispatches on these variants and the
/// three token groups defined over them ([`Token::is_selector_key`],
/// [`Token::is_property_key`], [`Token::is_literal_value`]).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum Token {
    // ========== Delimiters ==========
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    // ========== Punctuation ==========
    /// `;` statement terminator
    #[token(";")]
    Semi,

    /// `:`
    #[token(":")]
    Colon,

    /// `,`
    #[token(",")]
    Comma,

    /// `#` trait list introducer
    #[token("#")]
    Hash,

    /// `@` declaration marker
    #[token("@")]
    At,

    /// `^` null marker
    #[token("^")]
    Caret,

    /// `=`
    #[token("=")]
    Eq,

    /// `*` wildcard
    #[token("*")]
    Star,

    /// `=>` precedence-chain marker
    #[token("=>")]
    FatArrow,

    // ========== Keywords ==========
    /// `true`
    #[token("true")]
    True,

    /// `false`
    #[token("false")]
    False,

    /// `null`
    #[token("null")]
    Null,

    // ========== Literals ==========
    /// Integer literal
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    /// Decimal literal
    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Decimal(f64),

    /// String literal, single- or double-quoted
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        SmolStr::new(&s[1..s.len()-1])
    })]
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        SmolStr::new(&s[1..s.len()-1])
    })]
    String(SmolStr),

    /// Dotted key path like `object.field`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)+", |lex| SmolStr::new(lex.slice()))]
    KeyPath(SmolStr),

    /// Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| SmolStr::new(lex.slice()))]
    Ident(SmolStr),
}

impl Token {
    /// Whether this token can be a selector key
    #[must_use]
    pub fn is_selector_key(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::KeyPath(_))
    }

    /// Whether this token can key a property or map entry
    #[must_use]
    pub fn is_property_key(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::String(_))
    }

    /// Whether this token is a literal value
    #[must_use]
    pub fn is_literal_value(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::KeyPath(_)
                | Token::String(_)
                | Token::Integer(_)
                | Token::Decimal(_)
                | Token::True
                | Token::False
                | Token::Null
                | Token::Star
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Semi => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Hash => write!(f, "#"),
            Token::At => write!(f, "@"),
            Token::Caret => write!(f, "^"),
            Token::Eq => write!(f, "="),
            Token::Star => write!(f, "*"),
            Token::FatArrow => write!(f, "=>"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Decimal(x) => write!(f, "{x}"),
            Token::String(s) => write!(f, "\"{s}\""),
            Token::KeyPath(s) => write!(f, "{s}"),
            Token::Ident(s) => write!(f, "{s}"),
        }
    }
}
