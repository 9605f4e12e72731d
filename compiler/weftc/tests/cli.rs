#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::Command;

use pretty_assertions::assert_eq;

fn weft(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("weft binary runs")
}

#[test]
fn eval_inline_expression() {
    let out = weft(&["eval", "--set", "n=4", "-e", "n * (n + 1)"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "20\n");
}

#[test]
fn resolution_errors_exit_nonzero() {
    let out = weft(&["eval", "-e", "\"a\" < 1"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error[resolution]"), "{stderr}");
}

#[test]
fn bad_option_exits_with_usage_error() {
    let out = weft(&["eval", "--loud"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn version() {
    let out = weft(&["version"]);
    assert!(String::from_utf8(out.stdout).unwrap().starts_with("weft "));
}
