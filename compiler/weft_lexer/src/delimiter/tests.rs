use super::*;

fn next_is_digit(text: &str, index: usize) -> bool {
    text[index + 1..].starts_with(|c: char| c.is_ascii_digit())
}

#[test]
fn is_at_matches_literal_at_index() {
    let eq = DelimiterSpec::plain("==");
    assert!(eq.is_at("a == b", 2));
    assert!(!eq.is_at("a = b", 2));
    assert!(!eq.is_at("=", 0));
    assert!(!eq.is_at("==", 5));
}

#[test]
fn predicate_narrows_a_match() {
    let minus = DelimiterSpec::context("-", "number").when(next_is_digit);
    assert!(minus.is_at("-5", 0));
    assert!(!minus.is_at("- 5", 0));
}

#[test]
fn longer_literal_sorts_first() {
    let eq = DelimiterSpec::plain("=");
    let eqeq = DelimiterSpec::operator(Operator::Equal);
    assert_eq!(eqeq.table_order(&eq), Ordering::Less);
    assert_eq!(eq.table_order(&eqeq), Ordering::Greater);
}

#[test]
fn predicate_sorts_before_plain_of_same_text() {
    let number = DelimiterSpec::context("-", "number").when(next_is_digit);
    let minus = DelimiterSpec::operator(Operator::Subtract);
    assert_eq!(number.table_order(&minus), Ordering::Less);
}

#[test]
fn operator_sorts_before_plain_of_same_text() {
    let op = DelimiterSpec::operator(Operator::Subtract);
    let plain = DelimiterSpec::plain("-");
    assert_eq!(op.table_order(&plain), Ordering::Less);
}

#[test]
fn different_leading_characters_sort_by_character() {
    let a = DelimiterSpec::plain("(");
    let b = DelimiterSpec::plain(")");
    assert_eq!(a.table_order(&b), Ordering::Less);
}

#[test]
fn keyword_operators_are_non_breaking() {
    let iff = DelimiterSpec::operator(Operator::If);
    assert!(!iff.is_breaking());
    assert!(iff.is_printable());
    assert_eq!(iff.operator_info(), Some((Operator::If, Operator::If.precedence())));
    assert!(DelimiterSpec::operator(Operator::Add).is_breaking());
}

#[test]
fn context_flags() {
    let quote = DelimiterSpec::context("\"", "string").opening().closing();
    assert!(quote.opens() && quote.closes());
    assert_eq!(quote.context_name(), Some("string"));
    let lf = DelimiterSpec::context("\n", "//").closing().non_printable();
    assert!(!lf.opens() && lf.closes() && !lf.is_printable());
}

#[test]
fn precedence_override() {
    let op = DelimiterSpec::operator(Operator::Add).with_precedence(5);
    assert_eq!(op.operator_info(), Some((Operator::Add, 5)));
}

#[test]
fn separator_flag() {
    assert!(DelimiterSpec::plain(",").separator().is_separator());
    assert!(!DelimiterSpec::plain("?").is_separator());
}
