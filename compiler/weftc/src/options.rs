//! Hand-rolled argument parsing shared by the commands.

use thiserror::Error;

/// Where the source text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    File(String),
    Inline(String),
    Stdin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Rule set to start lexing in.
    pub grammar: String,
    /// `--set name=value` pairs, in order.
    pub sets: Vec<(String, String)>,
    /// Leave names missing from the scope unresolved instead of using their
    /// text.
    pub partial: bool,
    pub input: Input,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            grammar: weft_lexer::grammar::DEFAULT.to_owned(),
            sets: Vec::new(),
            partial: false,
            input: Input::Stdin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("missing value after '{0}'")]
    MissingValue(&'static str),
    #[error("expected name=value after --set, found '{0}'")]
    BadAssignment(String),
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("unexpected argument '{0}'")]
    ExtraInput(String),
}

/// Parse the arguments that follow the command name.
pub fn parse_options(args: &[String]) -> Result<Options, OptionError> {
    let mut options = Options::default();
    let mut explicit_input = false;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;
        if let Some(name) = arg.strip_prefix("--grammar=") {
            options.grammar = name.to_owned();
        } else if arg == "--set" {
            let pair = args.get(i).ok_or(OptionError::MissingValue("--set"))?;
            i += 1;
            let (name, value) = pair
                .split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| OptionError::BadAssignment(pair.clone()))?;
            options.sets.push((name.to_owned(), value.to_owned()));
        } else if arg == "--partial" {
            options.partial = true;
        } else if arg == "-e" {
            let text = args.get(i).ok_or(OptionError::MissingValue("-e"))?;
            i += 1;
            set_input(&mut options, &mut explicit_input, Input::Inline(text.clone()), arg)?;
        } else if arg == "-" {
            set_input(&mut options, &mut explicit_input, Input::Stdin, arg)?;
        } else if arg.starts_with('-') {
            return Err(OptionError::UnknownFlag(arg.to_owned()));
        } else {
            set_input(&mut options, &mut explicit_input, Input::File(arg.to_owned()), arg)?;
        }
    }
    Ok(options)
}

fn set_input(
    options: &mut Options,
    explicit: &mut bool,
    input: Input,
    arg: &str,
) -> Result<(), OptionError> {
    if std::mem::replace(explicit, true) {
        return Err(OptionError::ExtraInput(arg.to_owned()));
    }
    options.input = input;
    Ok(())
}
