//! Abstract syntax of SAMoS control scripts
//!
//!     The tree is flat: a [Config] is an ordered list of [Command]s, and a command carries at
//!     most one positional [Argument] and one [OptionSet]. See the individual modules for the
//!     pieces.

pub mod command;
pub mod config;
pub mod options;
pub mod value;

pub use command::{Arguments, Command, CommandKind, Directive, Shape};
pub use config::{Config, Keyed};
pub use options::OptionSet;
pub use value::{Argument, Number, Value};
