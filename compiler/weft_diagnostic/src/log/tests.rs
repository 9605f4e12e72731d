use super::*;
use pretty_assertions::assert_eq;

fn log_for(src: &str) -> ErrorLog {
    ErrorLog::new(Arc::from(src))
}

#[test]
fn push_computes_row_and_col() {
    let mut log = log_for("a\n  \"abc");
    log.push(ErrorCategory::Lex, Span::new(4, 8), "missing closing token after '\"'");
    let err = &log.errors()[0];
    assert_eq!((err.row, err.col), (2, 3));
    assert_eq!(err.offset(), 4);
    assert_eq!(err.to_string(), "@2,3(4): missing closing token after '\"'");
}

#[test]
fn rollback_drops_only_later_errors() {
    let mut log = log_for("x y z");
    log.push(ErrorCategory::Structure, Span::point(0), "first");
    let mark = log.mark();
    log.push(ErrorCategory::Resolution, Span::point(2), "second");
    log.push(ErrorCategory::Resolution, Span::point(4), "third");
    log.rollback(mark);
    let messages: Vec<_> = log.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["first"]);
}

#[test]
fn count_by_category() {
    let mut log = log_for("abc");
    log.push(ErrorCategory::Lex, Span::point(0), "a");
    log.push(ErrorCategory::Resolution, Span::point(1), "b");
    log.push(ErrorCategory::Resolution, Span::point(2), "c");
    assert_eq!(log.count(ErrorCategory::Lex), 1);
    assert_eq!(log.count(ErrorCategory::Resolution), 2);
    assert_eq!(log.count(ErrorCategory::Structure), 0);
    assert_eq!(log.len(), 3);
}

#[test]
fn absorb_appends_in_order() {
    let mut a = log_for("ab");
    let mut b = log_for("ab");
    a.push(ErrorCategory::Lex, Span::point(0), "one");
    b.push(ErrorCategory::Lex, Span::point(1), "two");
    a.absorb(b);
    let messages: Vec<_> = a.into_errors().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, ["one", "two"]);
}

#[test]
fn render_points_at_the_span() {
    let mut log = log_for("1 + \"a\" < 3");
    log.push(ErrorCategory::Resolution, Span::new(4, 11), "cannot compare str with int");
    let expected = "\
error[resolution]: cannot compare str with int
 --> 1:5
  |
1 | 1 + \"a\" < 3
  |     ^^^^^^^
";
    assert_eq!(log.render(), expected);
}
