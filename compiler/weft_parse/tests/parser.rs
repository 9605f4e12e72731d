#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use weft_ir::{ContextClass, Operator, TokenKind};
use weft_lexer::grammar::{self, COMMAND_LINE};
use weft_lexer::{DelimiterSpec, LexState, Lexer, RuleSetDef, RuleSetTable};
use weft_parse::{parse, parse_with, ParseOutput};

#[test]
fn command_line_grammar_has_no_operators() {
    let table = RuleSetTable::builtin();
    let out = parse_with(table, "copy a + b", table.require(COMMAND_LINE).unwrap());
    assert!(!out.has_errors());
    let texts: Vec<&str> = out
        .forest
        .top_level()
        .iter()
        .map(|t| out.forest.token_text(t))
        .collect();
    assert_eq!(texts, ["copy", "a", "+", "b"]);
    assert!(out
        .forest
        .top_level()
        .iter()
        .all(|t| t.kind == TokenKind::Text));
}

#[test]
fn custom_table_gets_operator_contexts() {
    let mut table = RuleSetTable::new();
    let star = table.add_delimiter(DelimiterSpec::operator(Operator::Multiply));
    let root = table
        .define(RuleSetDef::new("calc").delimiters([star]).whitespace([' ']))
        .unwrap();
    grammar::define_operator_contexts(&mut table).unwrap();

    let out = parse_with(&table, "x * y", root);
    assert!(!out.has_errors());
    let [token] = out.forest.top_level() else {
        panic!("expected a single product");
    };
    let node = out.forest.node(token.node().unwrap());
    assert_eq!(node.operator, Some(Operator::Multiply));
    assert_eq!(node.class, ContextClass::OPERATOR);
    assert_eq!(table.rule_set(node.rules).name(), "product");
}

#[test]
fn incremental_lexing_then_grouping_matches_one_shot() {
    let source = "[1 + 2, (3 * 4) - 5, a.b]";
    let table = RuleSetTable::builtin();
    let mut lexer = Lexer::new(table, source, table.default_rules());
    while lexer.run_steps(1) == LexState::Scanning {}
    let stepped = ParseOutput::from_lex(table, lexer.finish());
    let direct = parse(source);

    let rules = |id| table.rule_set(id).name();
    assert_eq!(stepped.forest.dump(rules), direct.forest.dump(rules));
    assert!(stepped.errors.is_empty());
}

#[test]
fn lex_errors_survive_grouping() {
    let out = parse("(1 + 2");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(
        out.errors.errors()[0].message,
        "missing closing token after '('"
    );
    let [token] = out.forest.top_level() else {
        panic!("expected the forced-closed group");
    };
    let group = token.node().unwrap();
    let sum = out.forest.children(group)[1].node().unwrap();
    assert_eq!(out.forest.node(sum).operator, Some(Operator::Add));
}
