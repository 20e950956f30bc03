//! Commands
//!
//!     A command is one line of a script: a leading keyword, its positional argument and, for
//!     most keywords, an option-set. The keyword vocabulary is closed ([CommandKind]) and every
//!     keyword has a fixed [Shape]:
//!
//!         Text        messages, input, read_cell_boundary          `input cells.dat`
//!         Numeric     timestep, run                                `run 100000`
//!         Directive   box, config, constraint, disable, dump,      `pair_potential vp {k=1}`
//!                     external, integrator, log, pair_param,
//!                     pair_potential, population
//!         OptionsOnly nlist                                        `nlist {rcut=2.4;pad=0.5}`
//!
//!     [Command] is a tagged variant per keyword. Generic code goes through [Command::kind] and
//!     the shape-independent accessors instead of matching on positions.
//!
//!     Directive commands are keyed by their name: several `pair_potential` lines may coexist
//!     as long as they name different potentials.

use super::options::OptionSet;
use super::value::{Argument, Number};
use crate::conf::error::EditError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// The closed keyword vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Messages,
    Input,
    ReadCellBoundary,
    Timestep,
    Run,
    Box,
    Config,
    Constraint,
    Disable,
    Dump,
    External,
    Integrator,
    Log,
    PairParam,
    PairPotential,
    Population,
    Nlist,
}

/// Argument layout of a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A single string argument.
    Text,
    /// A single numeric argument.
    Numeric,
    /// A name followed by an option-set.
    Directive,
    /// An option-set and nothing else.
    OptionsOnly,
}

impl CommandKind {
    pub const ALL: [CommandKind; 17] = [
        CommandKind::Messages,
        CommandKind::Input,
        CommandKind::ReadCellBoundary,
        CommandKind::Timestep,
        CommandKind::Run,
        CommandKind::Box,
        CommandKind::Config,
        CommandKind::Constraint,
        CommandKind::Disable,
        CommandKind::Dump,
        CommandKind::External,
        CommandKind::Integrator,
        CommandKind::Log,
        CommandKind::PairParam,
        CommandKind::PairPotential,
        CommandKind::Population,
        CommandKind::Nlist,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            CommandKind::Messages => "messages",
            CommandKind::Input => "input",
            CommandKind::ReadCellBoundary => "read_cell_boundary",
            CommandKind::Timestep => "timestep",
            CommandKind::Run => "run",
            CommandKind::Box => "box",
            CommandKind::Config => "config",
            CommandKind::Constraint => "constraint",
            CommandKind::Disable => "disable",
            CommandKind::Dump => "dump",
            CommandKind::External => "external",
            CommandKind::Integrator => "integrator",
            CommandKind::Log => "log",
            CommandKind::PairParam => "pair_param",
            CommandKind::PairPotential => "pair_potential",
            CommandKind::Population => "population",
            CommandKind::Nlist => "nlist",
        }
    }

    /// Case-sensitive keyword lookup.
    pub fn from_keyword(text: &str) -> Option<CommandKind> {
        CommandKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.keyword() == text)
    }

    pub fn shape(&self) -> Shape {
        match self {
            CommandKind::Messages | CommandKind::Input | CommandKind::ReadCellBoundary => {
                Shape::Text
            }
            CommandKind::Timestep | CommandKind::Run => Shape::Numeric,
            CommandKind::Nlist => Shape::OptionsOnly,
            _ => Shape::Directive,
        }
    }

    /// The parameter kind that attaches to commands of this kind, if any.
    pub fn dependent_kind(&self) -> Option<CommandKind> {
        match self {
            CommandKind::PairPotential => Some(CommandKind::PairParam),
            _ => None,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Shape::Text => "a single name",
            Shape::Numeric => "a single number",
            Shape::Directive => "a name followed by an option-set",
            Shape::OptionsOnly => "an option-set only",
        };
        f.write_str(text)
    }
}

/// Payload of directive-shaped commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Directive {
    pub name: String,
    pub options: OptionSet,
}

impl Directive {
    pub fn new(name: impl Into<String>, options: OptionSet) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Shape-generic argument bundle, as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    Text(String),
    Number(Number),
    Directive(String, OptionSet),
    Options(OptionSet),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Messages(String),
    Input(String),
    ReadCellBoundary(String),
    Timestep(Number),
    Run(Number),
    Box(Directive),
    Config(Directive),
    Constraint(Directive),
    Disable(Directive),
    Dump(Directive),
    External(Directive),
    Integrator(Directive),
    Log(Directive),
    PairParam(Directive),
    PairPotential(Directive),
    Population(Directive),
    Nlist(OptionSet),
}

impl Command {
    /// Assemble a command, checking the arguments against the keyword's shape.
    pub fn from_parts(kind: CommandKind, arguments: Arguments) -> Result<Command, EditError> {
        let mismatch = || EditError::ArgumentMismatch {
            kind,
            expected: kind.shape(),
        };
        match arguments {
            Arguments::Text(text) => match kind {
                CommandKind::Messages => Ok(Command::Messages(text)),
                CommandKind::Input => Ok(Command::Input(text)),
                CommandKind::ReadCellBoundary => Ok(Command::ReadCellBoundary(text)),
                _ => Err(mismatch()),
            },
            Arguments::Number(number) => match kind {
                CommandKind::Timestep => Ok(Command::Timestep(number)),
                CommandKind::Run => Ok(Command::Run(number)),
                _ => Err(mismatch()),
            },
            Arguments::Directive(name, options) => {
                let directive = Directive::new(name, options);
                match kind {
                    CommandKind::Box => Ok(Command::Box(directive)),
                    CommandKind::Config => Ok(Command::Config(directive)),
                    CommandKind::Constraint => Ok(Command::Constraint(directive)),
                    CommandKind::Disable => Ok(Command::Disable(directive)),
                    CommandKind::Dump => Ok(Command::Dump(directive)),
                    CommandKind::External => Ok(Command::External(directive)),
                    CommandKind::Integrator => Ok(Command::Integrator(directive)),
                    CommandKind::Log => Ok(Command::Log(directive)),
                    CommandKind::PairParam => Ok(Command::PairParam(directive)),
                    CommandKind::PairPotential => Ok(Command::PairPotential(directive)),
                    CommandKind::Population => Ok(Command::Population(directive)),
                    _ => Err(mismatch()),
                }
            }
            Arguments::Options(options) => match kind {
                CommandKind::Nlist => Ok(Command::Nlist(options)),
                _ => Err(mismatch()),
            },
        }
    }

    /// Shorthand for a directive-shaped command.
    pub fn directive(
        kind: CommandKind,
        name: impl Into<String>,
        options: OptionSet,
    ) -> Result<Command, EditError> {
        Command::from_parts(kind, Arguments::Directive(name.into(), options))
    }

    /// Split back into keyword and arguments; the inverse of [Command::from_parts].
    pub fn into_parts(self) -> (CommandKind, Arguments) {
        let kind = self.kind();
        let arguments = match self {
            Command::Messages(text) | Command::Input(text) | Command::ReadCellBoundary(text) => {
                Arguments::Text(text)
            }
            Command::Timestep(number) | Command::Run(number) => Arguments::Number(number),
            Command::Nlist(options) => Arguments::Options(options),
            Command::Box(d)
            | Command::Config(d)
            | Command::Constraint(d)
            | Command::Disable(d)
            | Command::Dump(d)
            | Command::External(d)
            | Command::Integrator(d)
            | Command::Log(d)
            | Command::PairParam(d)
            | Command::PairPotential(d)
            | Command::Population(d) => Arguments::Directive(d.name, d.options),
        };
        (kind, arguments)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Messages(_) => CommandKind::Messages,
            Command::Input(_) => CommandKind::Input,
            Command::ReadCellBoundary(_) => CommandKind::ReadCellBoundary,
            Command::Timestep(_) => CommandKind::Timestep,
            Command::Run(_) => CommandKind::Run,
            Command::Box(_) => CommandKind::Box,
            Command::Config(_) => CommandKind::Config,
            Command::Constraint(_) => CommandKind::Constraint,
            Command::Disable(_) => CommandKind::Disable,
            Command::Dump(_) => CommandKind::Dump,
            Command::External(_) => CommandKind::External,
            Command::Integrator(_) => CommandKind::Integrator,
            Command::Log(_) => CommandKind::Log,
            Command::PairParam(_) => CommandKind::PairParam,
            Command::PairPotential(_) => CommandKind::PairPotential,
            Command::Population(_) => CommandKind::Population,
            Command::Nlist(_) => CommandKind::Nlist,
        }
    }

    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            Command::Box(d)
            | Command::Config(d)
            | Command::Constraint(d)
            | Command::Disable(d)
            | Command::Dump(d)
            | Command::External(d)
            | Command::Integrator(d)
            | Command::Log(d)
            | Command::PairParam(d)
            | Command::PairPotential(d)
            | Command::Population(d) => Some(d),
            _ => None,
        }
    }

    /// The key that tells apart commands of the same directive kind.
    pub fn name(&self) -> Option<&str> {
        self.as_directive().map(|d| d.name.as_str())
    }

    /// The string argument of a text-shaped command.
    pub fn text(&self) -> Option<&str> {
        match self {
            Command::Messages(text) | Command::Input(text) | Command::ReadCellBoundary(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// The positional argument, if the keyword takes one.
    pub fn argument(&self) -> Option<Argument> {
        match self {
            Command::Timestep(number) | Command::Run(number) => Some(Argument::Number(*number)),
            Command::Nlist(_) => None,
            _ => self
                .text()
                .or_else(|| self.name())
                .map(|text| Argument::Str(text.to_string())),
        }
    }

    pub fn options(&self) -> Option<&OptionSet> {
        match self {
            Command::Nlist(options) => Some(options),
            _ => self.as_directive().map(|d| &d.options),
        }
    }

    /// Copy of this command with its positional argument replaced; options are kept.
    pub fn with_argument(&self, argument: Argument) -> Result<Command, EditError> {
        let kind = self.kind();
        let arguments = match (kind.shape(), argument) {
            (Shape::OptionsOnly, _) => return Err(EditError::NoArgument { kind }),
            (Shape::Text, Argument::Str(text)) => Arguments::Text(text),
            (Shape::Numeric, Argument::Number(number)) => Arguments::Number(number),
            (Shape::Directive, Argument::Str(name)) => {
                let options = self.options().cloned().unwrap_or_default();
                Arguments::Directive(name, options)
            }
            (expected, _) => return Err(EditError::ArgumentMismatch { kind, expected }),
        };
        Command::from_parts(kind, arguments)
    }

    /// Copy of this command with `update` merged into its option-set.
    pub fn with_merged_options(&self, update: &OptionSet) -> Result<Command, EditError> {
        let kind = self.kind();
        let merged = self
            .options()
            .ok_or(EditError::NoOptions { kind })?
            .merged(update);
        let arguments = match self.name() {
            Some(name) => Arguments::Directive(name.to_string(), merged),
            None => Arguments::Options(merged),
        };
        Command::from_parts(kind, arguments)
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Command", 3)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("argument", &self.argument())?;
        state.serialize_field("options", &self.options())?;
        state.end()
    }
}
