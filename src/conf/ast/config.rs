//! Config
//!
//!     A [Config] is the whole script: the ordered sequence of its commands. It is a plain
//!     value. Nothing in this crate mutates a Config after construction; edits (see
//!     [editing](crate::conf::editing)) build and return a new one.
//!
//!     Besides positional access, this module holds the read-only projections callers use to
//!     look at a script by keyword: positions, (name, options) pairs, and the name-keyed view
//!     ([Keyed]) in which repeated names collapse to the last occurrence. Names in that view
//!     stay in the order they first appear.

use super::command::{Command, CommandKind};
use super::options::OptionSet;
use super::value::Number;
use serde::Serialize;
use std::ops::Index;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Config {
    commands: Vec<Command>,
}

impl Config {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Indices of all commands of `kind`, in document order.
    pub fn positions(&self, kind: CommandKind) -> Vec<usize> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, command)| command.kind() == kind)
            .map(|(index, _)| index)
            .collect()
    }

    /// All commands of `kind`, in document order.
    pub fn of_kind(&self, kind: CommandKind) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(move |command| command.kind() == kind)
    }

    /// Index of the first command of `kind`, optionally restricted to a directive name.
    pub fn find(&self, kind: CommandKind, name: Option<&str>) -> Option<usize> {
        self.commands.iter().position(|command| {
            command.kind() == kind && name.map_or(true, |name| command.name() == Some(name))
        })
    }

    /// `(name, options)` for every directive of `kind`, in document order.
    pub fn directives(&self, kind: CommandKind) -> Vec<(&str, &OptionSet)> {
        self.of_kind(kind)
            .filter_map(|command| command.as_directive())
            .map(|directive| (directive.name.as_str(), &directive.options))
            .collect()
    }

    /// Name-keyed view of the directives of `kind`; a repeated name keeps its last options.
    pub fn keyed(&self, kind: CommandKind) -> Keyed<'_> {
        self.directives(kind).into_iter().collect()
    }

    /// String arguments of every text-shaped command of `kind`.
    pub fn texts(&self, kind: CommandKind) -> Vec<&str> {
        self.of_kind(kind).filter_map(Command::text).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.texts(CommandKind::Messages)
    }

    pub fn inputs(&self) -> Vec<&str> {
        self.texts(CommandKind::Input)
    }

    /// Files named by `read_cell_boundary`.
    pub fn boundaries(&self) -> Vec<&str> {
        self.texts(CommandKind::ReadCellBoundary)
    }

    pub fn boxes(&self) -> Vec<(&str, &OptionSet)> {
        self.directives(CommandKind::Box)
    }

    /// Names of the `config` directives.
    pub fn configs(&self) -> Vec<&str> {
        self.names(CommandKind::Config)
    }

    /// Names of the `dump` directives.
    pub fn dumps(&self) -> Vec<&str> {
        self.names(CommandKind::Dump)
    }

    pub fn dump_options(&self) -> Vec<&OptionSet> {
        self.directives(CommandKind::Dump)
            .into_iter()
            .map(|(_, options)| options)
            .collect()
    }

    pub fn pair_potentials(&self) -> Keyed<'_> {
        self.keyed(CommandKind::PairPotential)
    }

    pub fn timestep(&self) -> Option<Number> {
        self.numbers(CommandKind::Timestep).last().copied()
    }

    /// Every `run` length, in order.
    pub fn runs(&self) -> Vec<Number> {
        self.numbers(CommandKind::Run)
    }

    fn names(&self, kind: CommandKind) -> Vec<&str> {
        self.of_kind(kind).filter_map(Command::name).collect()
    }

    fn numbers(&self, kind: CommandKind) -> Vec<Number> {
        self.of_kind(kind)
            .filter_map(|command| match command {
                Command::Timestep(number) | Command::Run(number) => Some(*number),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<Command>> for Config {
    fn from(commands: Vec<Command>) -> Self {
        Config::new(commands)
    }
}

impl FromIterator<Command> for Config {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Config::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Directive options by name, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyed<'a> {
    entries: Vec<(&'a str, &'a OptionSet)>,
}

impl<'a> Keyed<'a> {
    pub fn get(&self, name: &str) -> Option<&'a OptionSet> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, options)| *options)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a OptionSet)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A repeated name replaces the earlier options but keeps the earlier position.
impl<'a> FromIterator<(&'a str, &'a OptionSet)> for Keyed<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a OptionSet)>>(iter: I) -> Self {
        let mut entries: Vec<(&'a str, &'a OptionSet)> = Vec::new();
        for (name, options) in iter {
            match entries.iter_mut().find(|(entry, _)| *entry == name) {
                Some(entry) => entry.1 = options,
                None => entries.push((name, options)),
            }
        }
        Self { entries }
    }
}

impl Index<&str> for Keyed<'_> {
    type Output = OptionSet;

    fn index(&self, name: &str) -> &OptionSet {
        self.get(name)
            .unwrap_or_else(|| panic!("no directive named '{}'", name))
    }
}
