#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn find(rules: &str, text: &str, index: usize) -> Option<&'static DelimiterSpec> {
    let table = RuleSetTable::builtin();
    let rules = table.require(rules).unwrap();
    table
        .find_delimiter(rules, rules, text, index, false)
        .map(|id| table.delimiter(id))
}

#[test]
fn builtin_rule_sets_are_registered() {
    let table = RuleSetTable::builtin();
    for name in [
        DEFAULT,
        COMMAND_LINE,
        STRING,
        CHAR,
        NUMBER,
        HEX,
        BOOL,
        PARENS,
        BRACKETS,
        BRACES,
        BLOCK_COMMENT,
        LINE_COMMENT,
        DOC_COMMENT,
        "sum",
        "membership operator",
        "if statement",
    ] {
        assert!(table.id_of(name).is_some(), "{name}");
    }
    assert_eq!(table.default_rules(), table.require(DEFAULT).unwrap());
}

#[test]
fn minus_is_a_number_only_before_a_digit() {
    assert_eq!(find(DEFAULT, "-5", 0).unwrap().context_name(), Some(NUMBER));
    assert_eq!(
        find(DEFAULT, "- 5", 0).unwrap().operator_info().map(|(op, _)| op),
        Some(Operator::Subtract)
    );
    assert_eq!(find(DEFAULT, "-=", 0).unwrap().text, "-=");
    assert_eq!(find(DEFAULT, "->", 0).unwrap().text, "->");
}

#[test]
fn dot_is_a_number_only_before_a_digit() {
    assert_eq!(find(DEFAULT, ".5", 0).unwrap().context_name(), Some(NUMBER));
    assert_eq!(
        find(DEFAULT, "a.b", 1).unwrap().operator_info().map(|(op, _)| op),
        Some(Operator::Member)
    );
}

#[test]
fn hex_prefix_beats_digit() {
    assert_eq!(find(DEFAULT, "0x1F", 0).unwrap().context_name(), Some(HEX));
    assert_eq!(find(DEFAULT, "01", 0).unwrap().context_name(), Some(NUMBER));
}

#[test]
fn comment_openers_prefer_longest() {
    assert_eq!(find(DEFAULT, "/// doc", 0).unwrap().context_name(), Some(DOC_COMMENT));
    assert_eq!(find(DEFAULT, "// c", 0).unwrap().context_name(), Some(LINE_COMMENT));
    assert_eq!(find(DEFAULT, "/* c", 0).unwrap().context_name(), Some(BLOCK_COMMENT));
    assert_eq!(find(DEFAULT, "/= 2", 0).unwrap().text, "/=");
    assert_eq!(
        find(DEFAULT, "/ 2", 0).unwrap().operator_info().map(|(op, _)| op),
        Some(Operator::Divide)
    );
}

#[test]
fn command_line_has_no_operators_or_numbers() {
    assert!(find(COMMAND_LINE, "+", 0).is_none());
    assert!(find(COMMAND_LINE, "5", 0).is_none());
    assert!(find(COMMAND_LINE, "a.b", 1).is_none());
    assert_eq!(find(COMMAND_LINE, "(", 0).unwrap().context_name(), Some(PARENS));
    assert_eq!(find(COMMAND_LINE, ";", 0).unwrap().text, ";");
}

#[test]
fn string_body_sees_only_escapes_quote_and_line_breaks() {
    assert_eq!(find(STRING, r"\n", 0).unwrap().name, "escape sequence");
    assert!(find(STRING, "+", 0).is_none());
    assert!(find(STRING, "(", 0).is_none());
    assert!(find(STRING, "\"", 0).unwrap().closes());
    assert!(find(STRING, "\n", 0).unwrap().closes());
    let table = RuleSetTable::builtin();
    let string = table.require(STRING).unwrap();
    let default = table.default_rules();
    assert!(!table.is_whitespace(string, default, ' '));
}

#[test]
fn keyword_booleans_and_operators_are_non_breaking() {
    let truth = find(DEFAULT, "True", 0).unwrap();
    assert!(!truth.is_breaking());
    assert_eq!(truth.context_name(), Some(BOOL));
    assert!(find(DEFAULT, "Truely", 0).is_none());
    assert!(find(DEFAULT, "maybe x", 0).is_some());
    assert!(find(DEFAULT, "maybes", 0).is_none());
}

#[test]
fn operator_contexts_are_idempotent() {
    let mut table = RuleSetTable::with_builtins().unwrap();
    let before = table.len();
    define_operator_contexts(&mut table).unwrap();
    assert_eq!(table.len(), before);
}
