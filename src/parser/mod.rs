//! Parser for OSS rule files
//!
//! A single-pass recursive descent parser over the token stream. Lookahead
//! is bounded: every decision uses the current token plus at most one peeked
//! token, and there is no backtracking. Parsing is fail-fast: the first
//! error aborts and nothing of the partial AST escapes.

mod error;

pub use error::{ParseError, ParseResult};

use crate::ast::{
    Ident, Literal, OssFile, Rule, RuleBody, RuleId, Selector, SelectorKey, SimpleValue,
    Statement, Trait, Value, ValueKind,
};
use crate::lexer::{Lexer, SpannedToken, Token};
use crate::{SourceLocation, Span};
use indexmap::IndexMap;
use smol_str::SmolStr;

/// The statement shape introduced by a `(current, peek)` token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `key: value;`
    Property,
    /// `anchor => successor;`
    PrecedenceChain,
    /// A nested rule
    NestedRule,
}

/// Classify the next rule-body statement from two tokens of context
///
/// Pure dispatch, shared by the body loop: a property needs a property key
/// followed by `:`, a precedence chain is announced by `=>` after the
/// anchor, and everything else starts a nested rule.
#[must_use]
pub fn classify_statement(current: &Token, next: Option<&Token>) -> StatementKind {
    if current.is_property_key() && matches!(next, Some(Token::Colon)) {
        StatementKind::Property
    } else if matches!(next, Some(Token::FatArrow)) {
        StatementKind::PrecedenceChain
    } else {
        StatementKind::NestedRule
    }
}

/// Parser for OSS rule files
pub struct Parser<'src> {
    /// Token stream
    tokens: Vec<SpannedToken>,
    /// Current position in the token stream
    pos: usize,
    /// Source code (for error locations)
    source: &'src str,
    /// Next id to hand to a rule, in pre-order
    next_rule_id: u32,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source
    ///
    /// # Errors
    ///
    /// Returns an error if lexing fails
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in Lexer::new(source) {
            match result {
                Ok(token) => tokens.push(token),
                Err(lex_error) => {
                    return Err(ParseError::InvalidToken {
                        span: lex_error.span,
                    });
                }
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            source,
            next_rule_id: 0,
        })
    }

    /// Parse a complete OSS file
    ///
    /// # Errors
    ///
    /// Returns an error if the input holds no rules, if any rule is
    /// malformed, or if tokens remain after the last rule
    pub fn parse(&mut self) -> ParseResult<OssFile> {
        let mut rules = Vec::new();
        while !self.is_at_end() {
            rules.push(self.parse_rule(None)?);
        }

        if rules.is_empty() {
            return Err(self.empty_input("rule"));
        }
        if let Some(st) = self.tokens.get(self.pos) {
            return Err(ParseError::trailing_input(
                st.token.to_string(),
                self.location_of(st.span),
                st.span,
            ));
        }

        let span = rules
            .iter()
            .map(|rule| rule.span)
            .reduce(Span::merge)
            .unwrap_or_default();
        Ok(OssFile::new(rules, span))
    }

    // ========== Rules ==========

    fn parse_rule(&mut self, parent: Option<RuleId>) -> ParseResult<Rule> {
        let id = self.alloc_rule_id();
        let start = self.current_span();

        let selectors = self.parse_selector_list()?;
        let traits = self.parse_trait_list()?;

        let body = if self.check(&Token::LBrace) {
            self.advance()?;
            let body = self.parse_rule_body(id)?;
            self.expect(&Token::RBrace)?;
            Some(body)
        } else if self.check(&Token::Semi) {
            self.advance()?;
            None
        } else {
            return Err(self.unexpected("`;` or `{`"));
        };

        let span = Span::new(start.start, self.previous_span().end);
        Ok(Rule {
            id,
            selectors,
            traits,
            body,
            parent,
            span,
        })
    }

    fn parse_rule_body(&mut self, owner: RuleId) -> ParseResult<RuleBody> {
        let start = self.current_span();
        let mut statements = Vec::new();

        loop {
            let Some(current) = self.peek() else {
                return Err(ParseError::unexpected_eof("`}`", self.eof_span()));
            };
            if matches!(current, Token::RBrace) {
                break;
            }
            // Every arm consumes at least one token or fails, so the loop
            // always makes progress.
            match classify_statement(current, self.peek_ahead(1)) {
                StatementKind::Property => statements.push(self.parse_property()?),
                StatementKind::PrecedenceChain => self.parse_precedence_chain(&mut statements)?,
                StatementKind::NestedRule => {
                    statements.push(Statement::Nested(self.parse_rule(Some(owner))?));
                }
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::new(start.start, start.start),
        };
        Ok(RuleBody::new(statements, span))
    }

    fn parse_property(&mut self) -> ParseResult<Statement> {
        let key = self.parse_property_key()?;
        self.expect(&Token::Colon)?;
        let value = self.parse_value()?;
        let end = self.expect(&Token::Semi)?;

        let span = key.span.merge(end);
        Ok(Statement::Property { key, value, span })
    }

    /// Parse `anchor => successor [=> successor ...] ;`, appending one
    /// chain statement per adjacent pair
    fn parse_precedence_chain(&mut self, statements: &mut Vec<Statement>) -> ParseResult<()> {
        let mut from = self.parse_property_key()?;
        self.expect(&Token::FatArrow)?;

        loop {
            let to = self.parse_simple_value()?;
            let next_from = Ident::new(chain_anchor_name(&to.literal), to.span);
            let span = from.span.merge(to.span);
            statements.push(Statement::PrecedenceChain { from, to, span });

            if self.check(&Token::FatArrow) {
                self.advance()?;
                from = next_from;
            } else {
                break;
            }
        }

        self.expect(&Token::Semi)?;
        Ok(())
    }

    // ========== Selectors and traits ==========

    fn parse_selector_list(&mut self) -> ParseResult<Vec<Selector>> {
        let mut selectors = Vec::new();
        while let Some(selector) = self.parse_selector()? {
            selectors.push(selector);
        }
        if selectors.is_empty() {
            return Err(self.empty_input("selector"));
        }
        Ok(selectors)
    }

    /// Parse one selector, or return `None` at the list's natural end
    ///
    /// `None` is not an error: the caller stops collecting and whatever
    /// token stopped the list is handled by the rule parser.
    fn parse_selector(&mut self) -> ParseResult<Option<Selector>> {
        let start = self.current_span();

        if self.check(&Token::At) {
            self.advance()?;
            return Ok(Some(self.parse_keyed_selector(start, true)?));
        }

        if self.check(&Token::Caret) {
            self.advance()?;
            let key = self.parse_selector_key()?;
            let span = Span::new(start.start, self.previous_span().end);
            return Ok(Some(Selector {
                key,
                value: None,
                is_declaration: false,
                has_null_marker: true,
                span,
            }));
        }

        if self.peek().is_some_and(Token::is_selector_key) {
            return Ok(Some(self.parse_keyed_selector(start, false)?));
        }

        Ok(None)
    }

    fn parse_keyed_selector(&mut self, start: Span, is_declaration: bool) -> ParseResult<Selector> {
        let key = self.parse_selector_key()?;

        let value = if self.check(&Token::Eq) {
            self.advance()?;
            self.parse_selector_value()?
        } else {
            Value::new(ValueKind::Simple(Literal::Wildcard), key.span)
        };

        let span = Span::new(start.start, self.previous_span().end);
        Ok(Selector {
            key,
            value: Some(value),
            is_declaration,
            has_null_marker: false,
            span,
        })
    }

    fn parse_selector_key(&mut self) -> ParseResult<SelectorKey> {
        let name = match self.peek() {
            Some(Token::Ident(name) | Token::KeyPath(name)) => name.clone(),
            _ => return Err(self.unexpected("selector key")),
        };
        let (_, span) = self.advance()?;
        Ok(SelectorKey::new(name, span))
    }

    fn parse_selector_value(&mut self) -> ParseResult<Value> {
        if self.peek().is_some_and(Token::is_literal_value) {
            let value = self.parse_simple_value()?;
            return Ok(Value::new(ValueKind::Simple(value.literal), value.span));
        }

        if self.check(&Token::LParen) {
            let open = self.current_span();
            self.advance()?;

            let mut values = Vec::new();
            loop {
                if self.is_at_end() {
                    return Err(ParseError::unexpected_eof("`)`", self.eof_span()));
                }
                if self.check(&Token::RParen) {
                    break;
                }
                values.push(self.parse_simple_value()?);
                if self.check(&Token::Comma) {
                    self.advance()?;
                }
            }
            if values.is_empty() {
                return Err(self.empty_input("value in selector value list"));
            }
            let close = self.expect(&Token::RParen)?;
            return Ok(Value::new(ValueKind::List(values), open.merge(close)));
        }

        Err(self.unexpected("selector value"))
    }

    fn parse_trait_list(&mut self) -> ParseResult<Option<Vec<Trait>>> {
        if !self.check(&Token::Hash) {
            return Ok(None);
        }
        self.advance()?;

        let mut traits = Vec::new();
        loop {
            if self.check(&Token::Comma) {
                self.advance()?;
            } else if let Some(Token::Ident(name)) = self.peek() {
                let name = name.clone();
                let (_, span) = self.advance()?;
                traits.push(Trait::new(name, span));
            } else {
                break;
            }
        }

        if traits.is_empty() {
            return Err(self.empty_input("trait"));
        }
        Ok(Some(traits))
    }

    // ========== Values ==========

    fn parse_value(&mut self) -> ParseResult<Value> {
        if self.peek().is_some_and(Token::is_literal_value) {
            let value = self.parse_simple_value()?;
            return Ok(Value::new(ValueKind::Simple(value.literal), value.span));
        }
        if self.check(&Token::LBracket) {
            return self.parse_wrapped_list();
        }
        if self.check(&Token::LBrace) {
            return self.parse_map();
        }
        Err(self.unexpected("value"))
    }

    fn parse_simple_value(&mut self) -> ParseResult<SimpleValue> {
        let literal = match self.peek() {
            Some(Token::Ident(s)) => Literal::Ident(s.clone()),
            Some(Token::KeyPath(s)) => Literal::KeyPath(s.clone()),
            Some(Token::String(s)) => Literal::String(s.clone()),
            Some(&Token::Integer(n)) => Literal::Integer(n),
            Some(&Token::Decimal(x)) => Literal::Decimal(x),
            Some(Token::True) => Literal::Bool(true),
            Some(Token::False) => Literal::Bool(false),
            Some(Token::Null) => Literal::Null,
            Some(Token::Star) => Literal::Wildcard,
            _ => return Err(self.unexpected("literal value")),
        };
        let (_, span) = self.advance()?;
        Ok(SimpleValue::new(literal, span))
    }

    fn parse_wrapped_list(&mut self) -> ParseResult<Value> {
        let open = self.expect(&Token::LBracket)?;

        let mut values = Vec::new();
        loop {
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof("`]`", self.eof_span()));
            }
            if self.check(&Token::RBracket) {
                break;
            }
            values.push(self.parse_value()?);
            if self.check(&Token::Comma) {
                self.advance()?;
            }
        }

        let close = self.expect(&Token::RBracket)?;
        Ok(Value::new(ValueKind::Wrapped(values), open.merge(close)))
    }

    fn parse_map(&mut self) -> ParseResult<Value> {
        let open = self.expect(&Token::LBrace)?;

        let mut entries: IndexMap<SmolStr, Value> = IndexMap::new();
        loop {
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof("`}`", self.eof_span()));
            }
            if self.check(&Token::RBrace) {
                break;
            }
            let key = self.parse_property_key()?;
            self.expect(&Token::Colon)?;
            let value = self.parse_value()?;
            entries.insert(key.name, value);

            if self.check(&Token::Semi) || self.check(&Token::Comma) {
                self.advance()?;
            }
        }

        let close = self.expect(&Token::RBrace)?;
        Ok(Value::new(ValueKind::Map(entries), open.merge(close)))
    }

    fn parse_property_key(&mut self) -> ParseResult<Ident> {
        let name = match self.peek() {
            Some(Token::Ident(name) | Token::String(name)) => name.clone(),
            _ => return Err(self.unexpected("property key")),
        };
        let (_, span) = self.advance()?;
        Ok(Ident::new(name, span))
    }

    // ========== Helpers ==========

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|st| &st.token)
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|st| &st.token)
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    fn advance(&mut self) -> ParseResult<(Token, Span)> {
        if let Some(st) = self.tokens.get(self.pos) {
            self.pos += 1;
            Ok((st.token.clone(), st.span))
        } else {
            Err(ParseError::unexpected_eof("token", self.eof_span()))
        }
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<Span> {
        if self.check(expected) {
            let (_, span) = self.advance()?;
            Ok(span)
        } else {
            Err(self.unexpected(format!("`{expected}`")))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(st) => ParseError::unexpected(
                expected,
                st.token.to_string(),
                self.location_of(st.span),
                st.span,
            ),
            None => ParseError::unexpected_eof(expected, self.eof_span()),
        }
    }

    fn empty_input(&self, construct: &str) -> ParseError {
        let span = self.current_span();
        ParseError::empty_input(construct, self.location_of(span), span)
    }

    fn location_of(&self, span: Span) -> SourceLocation {
        SourceLocation::from_offset(self.source, span.start)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_span(), |st| st.span)
    }

    fn previous_span(&self) -> Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or_else(|| self.eof_span(), |st| st.span)
    }

    fn eof_span(&self) -> Span {
        Span::new(self.source.len(), self.source.len())
    }

    fn alloc_rule_id(&mut self) -> RuleId {
        let id = RuleId::new(self.next_rule_id);
        self.next_rule_id += 1;
        id
    }
}

/// The key a chain continues from when a successor is itself an anchor
fn chain_anchor_name(literal: &Literal) -> SmolStr {
    match literal {
        Literal::Ident(s) | Literal::KeyPath(s) | Literal::String(s) => s.clone(),
        other => SmolStr::new(other.to_string()),
    }
}

/// Parse an OSS file from source code
///
/// # Errors
///
/// Returns an error if lexing or parsing fails
pub fn parse(source: &str) -> ParseResult<OssFile> {
    Parser::new(source)?.parse()
}
