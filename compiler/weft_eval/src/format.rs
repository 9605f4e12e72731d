//! Positional string formatting for `%`.
//!
//! `{N}` inserts argument `N`; `{N:.P}` inserts it with `P` digits after the
//! decimal point (numbers) or cut to `P` characters (anything else). `{{`
//! and `}}` stand for literal braces.

use crate::convert::as_number;
use crate::errors::{
    bad_placeholder, format_index, unmatched_format_brace, unterminated_placeholder,
    ResolveResult,
};
use crate::Value;

pub fn format_positional(pattern: &str, args: &[Value]) -> ResolveResult<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(at) = rest.find(['{', '}']) {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            return Err(unmatched_format_brace());
        } else {
            let close = tail.find('}').ok_or_else(unterminated_placeholder)?;
            write_placeholder(&mut out, &tail[1..close], args)?;
            rest = &tail[close + 1..];
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn write_placeholder(out: &mut String, spec: &str, args: &[Value]) -> ResolveResult<()> {
    let (index, precision) = match spec.split_once(':') {
        Some((index, format)) => {
            let digits = format
                .strip_prefix('.')
                .ok_or_else(|| bad_placeholder(spec))?;
            // The formatter takes at most u16::MAX digits of precision.
            let precision: u16 = digits.parse().map_err(|_| bad_placeholder(spec))?;
            (index, Some(usize::from(precision)))
        }
        None => (spec, None),
    };
    let index: usize = index.trim().parse().map_err(|_| bad_placeholder(spec))?;
    let arg = args.get(index).ok_or_else(|| format_index(index, args.len()))?;
    match (precision, as_number(arg)) {
        (None, _) => out.push_str(&arg.to_string()),
        (Some(p), Some(n)) => out.push_str(&format!("{:.p$}", n.as_f64())),
        (Some(p), None) => out.extend(arg.to_string().chars().take(p)),
    }
    Ok(())
}
