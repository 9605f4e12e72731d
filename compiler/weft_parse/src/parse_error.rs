//! Structure error messages raised by the operator pass.

pub fn missing_operand(operand: &str, symbol: &str) -> String {
    format!("missing {operand} for '{symbol}'")
}

pub fn unexpected_separator(separator: &str, operand: &str, symbol: &str) -> String {
    format!("unexpected separator '{separator}' where {operand} of '{symbol}' was expected")
}
