#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use weft_diagnostic::ErrorCategory;
use weft_ir::{Forest, NodeId, Operator, Token, TokenKind};
use weft_lexer::RuleSetTable;

use crate::{parse, ParseOutput};

/// Operator nodes as `(op operands..)`, other nodes as `[children..]`.
fn sexpr(forest: &Forest, token: &Token) -> String {
    let TokenKind::Node(id) = token.kind else {
        return forest.token_text(token).to_owned();
    };
    let inner: Vec<String> = forest
        .children(id)
        .iter()
        .filter(|t| !forest.is_boundary(id, t))
        .map(|t| sexpr(forest, t))
        .collect();
    match forest.node(id).operator {
        Some(op) => format!("({} {})", op.symbol(), inner.join(" ")),
        None => format!("[{}]", inner.join(" ")),
    }
}

fn grouped(source: &str) -> String {
    let out = parse(source);
    assert!(out.errors.is_empty(), "{}", out.errors.render());
    render(&out)
}

fn render(out: &ParseOutput) -> String {
    out.forest
        .top_level()
        .iter()
        .map(|t| sexpr(&out.forest, t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn messages(out: &ParseOutput) -> Vec<&str> {
    out.errors.errors().iter().map(|e| e.message.as_str()).collect()
}

fn only_node(out: &ParseOutput) -> NodeId {
    let [token] = out.forest.top_level() else {
        panic!("expected one top-level token");
    };
    token.node().expect("node token")
}

#[test]
fn product_binds_before_sum() {
    assert_eq!(grouped("2 + 3 * 4"), "(+ 2 (* 3 4))");
    assert_eq!(grouped("2 * 3 + 4 * 5"), "(+ (* 2 3) (* 4 5))");
}

#[test]
fn parentheses_resolve_first() {
    assert_eq!(grouped("(2 + 3) * 4"), "(* [(+ 2 3)] 4)");
}

#[test]
fn equal_tiers_group_from_the_right() {
    assert_eq!(grouped("a.b.c"), "(. a (. b c))");
    assert_eq!(grouped("1 - 2 - 3"), "(- 1 (- 2 3))");
}

#[test]
fn power_binds_tightest_among_arithmetic() {
    assert_eq!(grouped("a * b ^^ c"), "(* a (^^ b c))");
}

#[test]
fn logical_operators_bind_after_comparisons() {
    assert_eq!(grouped("x == 1 && y < 2"), "(&& (== x 1) (< y 2))");
    assert_eq!(grouped("a || b && c"), "(|| a (&& b c))");
}

#[test]
fn conditional_with_else_takes_five_tokens() {
    let out = parse("if c a else b");
    assert!(out.errors.is_empty());
    assert_eq!(render(&out), "(if c a else b)");
    let node = only_node(&out);
    assert_eq!(out.forest.children(node).len(), 5);
    assert_eq!(out.forest.node(node).operator, Some(Operator::If));
}

#[test]
fn conditional_without_else() {
    assert_eq!(grouped("if c a"), "(if c a)");
    assert_eq!(grouped("if (x > 1) big"), "(if [(> x 1)] big)");
}

#[test]
fn conditional_binds_before_comparison() {
    assert_eq!(grouped("if a b == c"), "(== (if a b) c)");
}

#[test]
fn prefix_modifiers() {
    assert_eq!(grouped("not x"), "(not x)");
    assert_eq!(grouped("maybe a.b"), "(maybe (. a b))");
    assert_eq!(grouped("nothing + 1"), "(+ nothing 1)");
}

#[test]
fn deep_nesting_resolves_innermost_first() {
    assert_eq!(grouped("((((1 + 2))))"), "[[[[(+ 1 2)]]]]");
    assert_eq!(grouped("(1 + (2 * (3 - 4)))"), "[(+ 1 [(* 2 [(- 3 4)])])]");
}

#[test]
fn collapsed_node_is_named_after_its_operator() {
    let out = parse("2 + 3");
    let node = only_node(&out);
    let table = RuleSetTable::builtin();
    assert_eq!(table.rule_set(out.forest.node(node).rules).name(), "sum");
    assert_eq!(out.forest.node_text(node), "2 + 3");
}

#[test]
fn operands_are_reparented() {
    let out = parse("(a) * b");
    let product = only_node(&out);
    let children = out.forest.children(product);
    let parens = children[0].node().unwrap();
    assert_eq!(out.forest.node(parens).parent, Some(product));
    assert_eq!(out.forest.node(product).parent, Some(out.forest.root()));
    assert!(out.forest.is_boundary(product, &children[1]));
    assert_eq!(out.forest.token_text(&children[1]), "*");
}

#[test]
fn missing_right_operand_leaves_operator_raw() {
    let out = parse("(5 +)");
    assert_eq!(messages(&out), ["missing right operand for '+'"]);
    assert_eq!(out.errors.errors()[0].category, ErrorCategory::Structure);
    assert_eq!(out.errors.errors()[0].offset(), 3);
    assert_eq!(render(&out), "[5 +]");
    let parens = only_node(&out);
    assert!(out
        .forest
        .children(parens)
        .iter()
        .any(|t| matches!(t.kind, TokenKind::Delimiter(_))));
}

#[test]
fn missing_left_operand() {
    let out = parse("+ 5");
    assert_eq!(messages(&out), ["missing left operand for '+'"]);
    assert_eq!(render(&out), "+ 5");
}

#[test]
fn missing_left_operand_inside_enclosure() {
    let out = parse("(* 2)");
    assert_eq!(messages(&out), ["missing left operand for '*'"]);
}

#[test]
fn separator_is_not_an_operand() {
    let out = parse("[1 +, 2]");
    assert_eq!(
        messages(&out),
        ["unexpected separator ',' where right operand of '+' was expected"]
    );
    assert_eq!(render(&out), "[1 + , 2]");
}

#[test]
fn one_bad_operator_does_not_block_others() {
    let out = parse("(1 +) * 2 + 3");
    assert_eq!(messages(&out), ["missing right operand for '+'"]);
    assert_eq!(render(&out), "(+ (* [1 +] 2) 3)");
}

#[test]
fn operators_inside_strings_stay_text() {
    let out = parse("\"a + b\"");
    assert!(out.errors.is_empty());
    let string = only_node(&out);
    assert_eq!(out.forest.node(string).operator, None);
    assert_eq!(out.forest.string_content(string), "a + b");
}

#[test]
fn adjacent_operators_each_miss_an_operand() {
    let out = parse("1 + * 2");
    assert_eq!(
        messages(&out),
        ["missing left operand for '*'", "missing right operand for '+'"]
    );
    assert_eq!(render(&out), "1 + * 2");
}

#[test]
fn operator_paths_survive_deep_nesting() {
    let depth = 50_000;
    let source = format!("{}1 + 2{}", "(".repeat(depth), ")".repeat(depth));
    let out = parse(&source);
    assert!(out.errors.is_empty());
    let mut node = only_node(&out);
    for _ in 0..depth {
        let [_, inner, _] = out.forest.children(node) else {
            panic!("expected a bracketed node");
        };
        node = inner.node().unwrap();
    }
    assert_eq!(out.forest.node(node).operator, Some(Operator::Add));
}
