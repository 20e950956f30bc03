//! Main module for samos-conf library functionality
//!
//! Pipeline
//!
//!     text --lexing--> tokens --parsing--> Config --editing--> Config --generation--> text
//!
//!     [runner] hands a generated script to the simulator. [settings] holds the knobs for that
//!     step and for the command line.

pub mod ast;
pub mod editing;
pub mod error;
pub mod generation;
pub mod lexing;
pub mod parsing;
pub mod runner;
pub mod settings;
pub mod token;

pub use ast::{
    Argument, Command, CommandKind, Config, Directive, Keyed, Number, OptionSet, Value,
};
pub use error::{ConfError, Diagnostic, EditError};
pub use generation::{generate, write_script};
pub use lexing::{tokenize, tokenize_file, Lexed};
pub use parsing::{parse, parse_file, Parsed, ScriptParser};
pub use token::{detokenize, Location, Token};
