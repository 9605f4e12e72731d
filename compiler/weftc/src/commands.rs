//! Command implementations. Each returns a [`Report`] instead of printing so
//! `main` decides where text goes.

use std::io::Read;

use thiserror::Error;
use weft_eval::{MapScope, Progress, ResolutionMode, Scope, TermKind};
use weft_ir::Forest;
use weft_lexer::{RuleSetError, RuleSetTable};

use crate::options::{Input, Options};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Grammar(#[from] RuleSetError),
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot read standard input: {0}")]
    Stdin(std::io::Error),
}

/// What a command produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// For standard output.
    pub output: String,
    /// Rendered errors, for standard error.
    pub diagnostics: String,
    pub failed: bool,
}

impl Report {
    fn new(output: String, errors: &weft_diagnostic::ErrorLog) -> Self {
        Report {
            output,
            diagnostics: errors.render(),
            failed: !errors.is_empty(),
        }
    }
}

pub fn read_source(input: &Input) -> Result<String, CommandError> {
    match input {
        Input::Inline(text) => Ok(text.clone()),
        Input::File(path) => std::fs::read_to_string(path).map_err(|source| CommandError::Read {
            path: path.clone(),
            source,
        }),
        Input::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(CommandError::Stdin)?;
            Ok(text)
        }
    }
}

/// Lex only and dump the raw forest.
pub fn lex(options: &Options, source: &str) -> Result<Report, CommandError> {
    let table = RuleSetTable::builtin();
    let rules = table.require(&options.grammar)?;
    let out = weft_lexer::lex_with(table, source, rules);
    Ok(Report::new(dump(table, &out.forest), &out.errors))
}

/// Lex, group operators and dump the forest.
pub fn tree(options: &Options, source: &str) -> Result<Report, CommandError> {
    let table = RuleSetTable::builtin();
    let rules = table.require(&options.grammar)?;
    let out = weft_parse::parse_with(table, source, rules);
    Ok(Report::new(dump(table, &out.forest), &out.errors))
}

/// Evaluate against a scope built from the `--set` assignments.
///
/// Each assignment is itself evaluated, in order, so later ones can use
/// earlier names.
pub fn eval(options: &Options, source: &str) -> Result<Report, CommandError> {
    let table = RuleSetTable::builtin();
    let rules = table.require(&options.grammar)?;
    let scope = MapScope::new();
    let mut diagnostics = String::new();
    let mut failed = false;
    for (name, text) in &options.sets {
        let assigned = weft_eval::evaluate_with(
            table,
            text,
            table.default_rules(),
            &scope,
            ResolutionMode::Full,
        );
        if !assigned.errors.is_empty() {
            failed = true;
            diagnostics.push_str(&assigned.errors.render());
        }
        scope.try_set_member(name, assigned.value);
        tracing::debug!(name, "scope member set");
    }

    let unknown = |progress: &Progress<'_>| {
        progress.kind == TermKind::Name
            && progress.text != "null"
            && scope.try_get_member(progress.text).is_none()
    };
    let mode = if options.partial {
        ResolutionMode::Partial(&unknown)
    } else {
        ResolutionMode::Full
    };
    let result = weft_eval::evaluate_with(table, source, rules, &scope, mode);
    let mut report = Report::new(format!("{}\n", result.value), &result.errors);
    report.failed |= failed;
    diagnostics.push_str(&report.diagnostics);
    report.diagnostics = diagnostics;
    Ok(report)
}

fn dump(table: &RuleSetTable, forest: &Forest) -> String {
    forest.dump(|id| table.rule_set(id).name())
}
