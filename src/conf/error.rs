//! Error types
//!
//!     Three layers, matching how each failure is handled:
//!
//!     - [Diagnostic]: findings of the tokenizer and parser. Lexical ones are recovered from;
//!       syntactic ones empty the parse result. Either way they are reported, not raised.
//!     - [EditError]: a structural edit addressed something that is not there. Always
//!       returned to the caller.
//!     - [ConfError]: everything that crosses the crate boundary (I/O, settings, the
//!       simulator process), plus the two above when a caller wants them as errors.

use crate::conf::ast::{CommandKind, Shape};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("illegal character '{character}' on line {line}")]
    IllegalCharacter { character: char, line: usize },

    #[error("syntax error at '{found}' on line {line}")]
    UnexpectedToken { found: String, line: usize },

    #[error("syntax error at end of input")]
    UnexpectedEnd,

    #[error("invalid command on line {line}: {message}")]
    InvalidCommand { line: usize, message: String },
}

impl Diagnostic {
    pub fn line(&self) -> Option<usize> {
        match self {
            Diagnostic::IllegalCharacter { line, .. }
            | Diagnostic::UnexpectedToken { line, .. }
            | Diagnostic::InvalidCommand { line, .. } => Some(*line),
            Diagnostic::UnexpectedEnd => None,
        }
    }

    /// Lexical diagnostics do not invalidate a parse.
    pub fn is_lexical(&self) -> bool {
        matches!(self, Diagnostic::IllegalCharacter { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("no '{kind}' command")]
    CommandNotFound { kind: CommandKind },

    #[error("no '{kind}' command named '{name}'")]
    NamedCommandNotFound { kind: CommandKind, name: String },

    #[error("'{kind}' has no option '{option}'")]
    OptionNotFound { kind: CommandKind, option: String },

    #[error("option '{option}' of '{kind}' is not a number")]
    NotNumeric { kind: CommandKind, option: String },

    #[error("derived value for '{option}' is not finite")]
    NonFinite { option: String },

    #[error("'{kind}' takes no positional argument")]
    NoArgument { kind: CommandKind },

    #[error("'{kind}' takes no option-set")]
    NoOptions { kind: CommandKind },

    #[error("'{kind}' expects {expected}")]
    ArgumentMismatch { kind: CommandKind, expected: Shape },

    #[error("'{kind}' has no dependent parameter command")]
    NoDependentKind { kind: CommandKind },

    #[error("position {position} is past the end of a {len}-command script")]
    PositionOutOfRange { position: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script did not parse: {}", join(.0))]
    Syntax(Vec<Diagnostic>),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("script has no '{0}' command")]
    MissingCommand(CommandKind),

    #[error("could not launch '{program}': {source}")]
    Simulator {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfError::Io {
            path: path.into(),
            source,
        }
    }
}

fn join(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
