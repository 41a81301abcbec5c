//! OSS source regeneration
//!
//! Rebuilds source text from a parsed file. Printing an AST and re-parsing
//! the result yields a structurally identical AST (spans aside), which keeps
//! the printer and parser honest against each other.

use crate::ast::{Literal, OssFile, Rule, Selector, Statement, Value, ValueKind};
use std::fmt::Write;

/// Pretty-printer producing OSS source text from an AST
pub struct SourcePrinter {
    output: String,
    indent: usize,
}

impl Default for SourcePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourcePrinter {
    /// Create a new printer
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Render a complete file
    #[must_use]
    pub fn print(mut self, file: &OssFile) -> String {
        for rule in &file.rules {
            self.write_rule(rule);
        }
        self.output
    }

    fn write_rule(&mut self, rule: &Rule) {
        self.write_indent();

        for (i, selector) in rule.selectors.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.write_selector(selector);
        }

        if let Some(traits) = &rule.traits {
            self.output.push_str(" #");
            for (i, t) in traits.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.output.push_str(&t.name);
            }
        }

        match &rule.body {
            Some(body) => {
                self.output.push_str(" {\n");
                self.indent += 1;
                for statement in &body.statements {
                    self.write_statement(statement);
                }
                self.indent -= 1;
                self.write_indent();
                self.output.push_str("}\n");
            }
            None => self.output.push_str(";\n"),
        }
    }

    fn write_selector(&mut self, selector: &Selector) {
        if selector.is_declaration {
            self.output.push('@');
        }
        if selector.has_null_marker {
            self.output.push('^');
        }
        self.output.push_str(&selector.key.name);

        if let Some(value) = &selector.value {
            // An unwritten value and an explicit `*` parse identically, so
            // the wildcard is always elided on the way out.
            if !matches!(value.kind, ValueKind::Simple(Literal::Wildcard)) {
                self.output.push('=');
                self.write_value(value);
            }
        }
    }

    fn write_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Property { key, value, .. } => {
                self.write_indent();
                self.write_key(key.as_str());
                self.output.push_str(": ");
                self.write_value(value);
                self.output.push_str(";\n");
            }
            Statement::Nested(rule) => self.write_rule(rule),
            Statement::PrecedenceChain { from, to, .. } => {
                self.write_indent();
                self.write_key(from.as_str());
                write!(self.output, " => {};", to.literal).unwrap();
                self.output.push('\n');
            }
        }
    }

    fn write_value(&mut self, value: &Value) {
        match &value.kind {
            ValueKind::Simple(literal) => write!(self.output, "{literal}").unwrap(),
            ValueKind::List(values) => {
                self.output.push('(');
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    write!(self.output, "{}", v.literal).unwrap();
                }
                self.output.push(')');
            }
            ValueKind::Wrapped(values) => {
                self.output.push('[');
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_value(v);
                }
                self.output.push(']');
            }
            ValueKind::Map(entries) => {
                self.output.push('{');
                for (i, (key, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str("; ");
                    }
                    self.write_key(key);
                    self.output.push_str(": ");
                    self.write_value(v);
                }
                self.output.push('}');
            }
        }
    }

    /// Write a property or map key, quoting anything that would not lex
    /// back as a plain identifier
    fn write_key(&mut self, name: &str) {
        if is_identifier(name) {
            self.output.push_str(name);
        } else {
            write!(self.output, "\"{name}\"").unwrap();
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }
}

fn is_identifier(name: &str) -> bool {
    if matches!(name, "true" | "false" | "null") {
        return false;
    }
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render an OSS file back to source text
#[must_use]
pub fn print(file: &OssFile) -> String {
    SourcePrinter::new().print(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    /// Print, re-parse, print again: the second print must reproduce the
    /// first exactly, which pins structural identity without comparing spans.
    fn assert_round_trip(source: &str) {
        let file = parse(source).unwrap();
        let printed = print(&file);
        let reparsed = parse(&printed)
            .unwrap_or_else(|e| panic!("printed source failed to parse: {e}\n{printed}"));
        assert_eq!(print(&reparsed), printed, "for input: {source}");
        assert_eq!(reparsed.rules.len(), file.rules.len());
    }

    #[test]
    fn test_print_simple_rule() {
        let file = parse("field=name {visible: true;}").unwrap();
        assert_eq!(print(&file), "field=name {\n    visible: true;\n}\n");
    }

    #[test]
    fn test_print_declaration() {
        let file = parse("@module=Foo;").unwrap();
        assert_eq!(print(&file), "@module=Foo;\n");
    }

    #[test]
    fn test_wildcard_value_is_elided() {
        let file = parse("zone;").unwrap();
        assert_eq!(print(&file), "zone;\n");

        let explicit = parse("zone=*;").unwrap();
        assert_eq!(print(&explicit), "zone;\n");
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let file = parse(r#"zone { "first name": 1; }"#).unwrap();
        assert_eq!(print(&file), "zone {\n    \"first name\": 1;\n}\n");
    }

    #[test]
    fn test_reserved_word_keys_are_quoted() {
        let file = parse(r#"zone { "true": 1; }"#).unwrap();
        assert_eq!(print(&file), "zone {\n    \"true\": 1;\n}\n");
    }

    #[test]
    fn test_round_trips() {
        assert_round_trip("field=name {visible: true;}");
        assert_round_trip("@module=Foo;");
        assert_round_trip("zone { x: 1; y: 2; }");
        assert_round_trip("^validator field=(a, b);");
        assert_round_trip("object.field=name #required, bold;");
        assert_round_trip("zone { a => b => c; zNone => *; }");
        assert_round_trip(r#"zone { xs: [1, [2], {k: 'v'}]; layout: {width: 10; height: 2.0}; }"#);
        assert_round_trip(
            r#"class=User {
                field=name #required { label: "Name"; }
                zLeft => name => email;
                nested=deep { leaf { x: null; } }
            }"#,
        );
    }

    #[test]
    fn test_nested_rules_indent() {
        let file = parse("a { b { x: 1; } }").unwrap();
        assert_eq!(
            print(&file),
            "a {\n    b {\n        x: 1;\n    }\n}\n"
        );
    }
}
