//! Built-in grammars.
//!
//! `default` is the full expression grammar; `command line` keeps only
//! grouping, text literals, separators and comments. The remaining rule
//! sets are contexts reachable from those two, plus one named context per
//! operator for collapsed operator nodes.

use weft_ir::{ContextClass, DelimId, Operator};

use crate::delimiter::DelimiterSpec;
use crate::rules::{RuleSetDef, RuleSetError, RuleSetTable, Simplify};
use crate::scan;

pub const DEFAULT: &str = "default";
pub const COMMAND_LINE: &str = "command line";
pub const STRING: &str = "string";
pub const CHAR: &str = "char";
pub const NUMBER: &str = "number";
pub const HEX: &str = "0x";
pub const BOOL: &str = "bool";
pub const PARENS: &str = "()";
pub const BRACKETS: &str = "[]";
pub const BRACES: &str = "{}";
pub const BLOCK_COMMENT: &str = "/**/";
pub const LINE_COMMENT: &str = "//";
pub const DOC_COMMENT: &str = "///";

const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0b', '\x0c'];

const PLAIN: [&str; 24] = [
    "?", ":", "??", "=>", "!", "~", "++", "--", "&", "|", "<<", ">>", "^", "=", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

/// Delimiters shared by both top-level grammars.
struct Common {
    quote: DelimId,
    apostrophe: DelimId,
    groups: Vec<DelimId>,
    block_comment: Vec<DelimId>,
    line_comments: Vec<DelimId>,
    separators: Vec<DelimId>,
}

pub(crate) fn install(table: &mut RuleSetTable) -> Result<(), RuleSetError> {
    let common = common_delimiters(table);
    let plain = table.add_delimiters(PLAIN.map(DelimiterSpec::plain));
    let operators = table.add_delimiters(Operator::ALL.map(DelimiterSpec::operator));
    let literals = literal_delimiters(table);

    let mut standard = vec![common.quote, common.apostrophe];
    standard.extend(&common.groups);
    standard.extend(&common.block_comment);
    standard.extend(&common.line_comments);
    standard.extend(&common.separators);
    standard.extend(plain);
    standard.extend(operators);
    standard.extend(literals);

    table.define(
        RuleSetDef::new(DEFAULT)
            .delimiters(standard)
            .whitespace(WHITESPACE),
    )?;

    let mut command_line = vec![common.quote, common.apostrophe];
    command_line.extend(&common.groups);
    command_line.extend(&common.block_comment);
    command_line.extend(&common.line_comments);
    command_line.extend(&common.separators);
    table.define(
        RuleSetDef::new(COMMAND_LINE)
            .delimiters(command_line)
            .whitespace(WHITESPACE),
    )?;

    define_text_body(table, STRING, common.quote)?;
    define_text_body(table, CHAR, common.apostrophe)?;

    for name in [PARENS, BRACES] {
        table.define(
            RuleSetDef::new(name)
                .class(ContextClass::ENCLOSURE)
                .simplify(Simplify::SingleTerm),
        )?;
    }
    table.define(RuleSetDef::new(BRACKETS).class(ContextClass::ENCLOSURE))?;

    define_comments(table, common.block_comment)?;

    for name in [NUMBER, HEX, BOOL] {
        table.define(RuleSetDef::new(name).delimiters(Vec::new()))?;
    }
    define_operator_contexts(table)
}

/// One empty rule set per operator context name.
///
/// Custom tables call this so collapsed operator nodes get a named rule set.
pub fn define_operator_contexts(table: &mut RuleSetTable) -> Result<(), RuleSetError> {
    for op in Operator::ALL {
        let name = op.context_name();
        if table.id_of(name).is_none() {
            table.define(
                RuleSetDef::new(name)
                    .delimiters(Vec::new())
                    .class(ContextClass::OPERATOR),
            )?;
        }
    }
    Ok(())
}

fn common_delimiters(table: &mut RuleSetTable) -> Common {
    let quote = table.add_delimiter(
        DelimiterSpec::context("\"", STRING)
            .opening()
            .closing()
            .named("string literal"),
    );
    let apostrophe = table.add_delimiter(
        DelimiterSpec::context("'", CHAR)
            .opening()
            .closing()
            .named("character literal"),
    );
    let groups = table.add_delimiters([
        DelimiterSpec::context("(", PARENS).opening(),
        DelimiterSpec::context(")", PARENS).closing(),
        DelimiterSpec::context("[", BRACKETS).opening(),
        DelimiterSpec::context("]", BRACKETS).closing(),
        DelimiterSpec::context("{", BRACES).opening(),
        DelimiterSpec::context("}", BRACES).closing(),
    ]);
    let block_comment = table.add_delimiters([
        DelimiterSpec::context("/*", BLOCK_COMMENT)
            .opening()
            .named("block comment"),
        DelimiterSpec::context("*/", BLOCK_COMMENT)
            .closing()
            .named("block comment"),
    ]);
    let line_comments = table.add_delimiters([
        DelimiterSpec::context("//", LINE_COMMENT)
            .opening()
            .named("line comment"),
        DelimiterSpec::context("///", DOC_COMMENT)
            .opening()
            .named("documentation comment"),
    ]);
    let separators = table.add_delimiters([
        DelimiterSpec::plain(";")
            .separator()
            .described("instruction finished"),
        DelimiterSpec::plain(",")
            .separator()
            .described("list item separator"),
    ]);
    Common {
        quote,
        apostrophe,
        groups,
        block_comment,
        line_comments,
        separators,
    }
}

/// Numbers, hex, booleans.
fn literal_delimiters(table: &mut RuleSetTable) -> Vec<DelimId> {
    let mut specs = vec![
        DelimiterSpec::context("-", NUMBER)
            .when(scan::minus_starts_number)
            .scan_with(scan::number)
            .named("negative number"),
        DelimiterSpec::context(".", NUMBER)
            .when(scan::dot_starts_number)
            .scan_with(scan::number)
            .named("decimal number"),
        DelimiterSpec::context("0x", HEX)
            .scan_with(scan::hexadecimal)
            .named("hexadecimal number"),
        DelimiterSpec::context("True", BOOL)
            .scan_with(scan::boolean)
            .non_breaking()
            .named("boolean"),
        DelimiterSpec::context("False", BOOL)
            .scan_with(scan::boolean)
            .non_breaking()
            .named("boolean"),
    ];
    specs.extend(('0'..='9').map(|digit| {
        DelimiterSpec::context(digit.to_string(), NUMBER)
            .scan_with(scan::number)
            .named("number")
    }));
    table.add_delimiters(specs)
}

/// String and char bodies: only escapes, the closing quote and line breaks
/// are significant; there is no whitespace.
fn define_text_body(table: &mut RuleSetTable, name: &str, quote: DelimId) -> Result<(), RuleSetError> {
    let mut ids = vec![quote];
    ids.extend(table.add_delimiters([
        DelimiterSpec::plain("\\")
            .scan_with(scan::escape)
            .named("escape sequence"),
        DelimiterSpec::context("\n", name)
            .closing()
            .non_printable()
            .scan_with(scan::line_break_in_literal)
            .named("erroneous end of text literal"),
        DelimiterSpec::context("\r", name)
            .closing()
            .non_printable()
            .scan_with(scan::line_break_in_literal)
            .named("erroneous end of text literal"),
    ]));
    table.define(
        RuleSetDef::new(name)
            .delimiters(ids)
            .whitespace(Vec::new())
            .class(ContextClass::TEXT_LITERAL)
            .simplify(Simplify::Concatenate),
    )?;
    Ok(())
}

fn define_comments(table: &mut RuleSetTable, block: Vec<DelimId>) -> Result<(), RuleSetError> {
    table.define(
        RuleSetDef::new(BLOCK_COMMENT)
            .delimiters(block)
            .class(ContextClass::COMMENT)
            .simplify(Simplify::Discard),
    )?;

    for name in [LINE_COMMENT, DOC_COMMENT] {
        let ids = table.add_delimiters([
            DelimiterSpec::plain("\\")
                .when(scan::escapes_line_break)
                .scan_with(scan::line_continuation)
                .named("line continuation"),
            DelimiterSpec::context("\n", name).closing().non_printable(),
            DelimiterSpec::context("\r", name).closing().non_printable(),
        ]);
        table.define(
            RuleSetDef::new(name)
                .delimiters(ids)
                .whitespace(Vec::new())
                .class(ContextClass::COMMENT | ContextClass::LINE_COMMENT)
                .simplify(Simplify::Discard),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
