//! Structural edits
//!
//!     Every edit borrows the [Config] it is called on and returns a new one; the receiver is
//!     never touched, and a failed edit leaves nothing half-done. Edits that address a command
//!     by keyword (and optionally by directive name) act on the FIRST match in document order.
//!     The name-keyed query view ([Config::keyed]) resolves duplicates the other way, to the
//!     last one; the two only disagree on scripts that repeat a directive name.
//!
//!     On top of the primitives sit two domain helpers:
//!
//!     - dependent parameters: a `pair_param` line belongs to the `pair_potential` of the same
//!       name and is placed directly after it ([Config::add_dependent_parameter]).
//!     - derived options: read some options of a command, compute a value, write it back as
//!       another option ([Config::derive_option]). [Config::constrain_lambda] is the stock
//!       example, `lambda = -gamma * P0` on the `vp` potential.

use crate::conf::ast::{Argument, Command, CommandKind, Config, OptionSet, Value};
use crate::conf::error::EditError;

/// Name of the potential [Config::constrain_lambda] works on.
pub const VERTEX_POTENTIAL: &str = "vp";

impl Config {
    /// Splice `command` in before `position`; `position == len()` appends.
    pub fn insert(&self, command: Command, position: usize) -> Result<Config, EditError> {
        if position > self.len() {
            return Err(EditError::PositionOutOfRange {
                position,
                len: self.len(),
            });
        }
        let mut commands = self.commands().to_vec();
        commands.insert(position, command);
        Ok(Config::new(commands))
    }

    /// Replace the positional argument of the first command of `kind`.
    ///
    /// For directive kinds the argument is the directive name; the option-set is kept.
    pub fn set_argument(
        &self,
        kind: CommandKind,
        argument: impl Into<Argument>,
    ) -> Result<Config, EditError> {
        let index = self.locate(kind, None)?;
        let updated = self.commands()[index].with_argument(argument.into())?;
        Ok(self.replaced(index, updated))
    }

    /// Merge `options` into the option-set of the first command of `kind`, or of the first one
    /// named `name` when given.
    ///
    /// Keys already present are overwritten where they stand, new keys are appended in the
    /// order given, and every other key is left alone.
    pub fn set_options<K, V>(
        &self,
        kind: CommandKind,
        name: Option<&str>,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Config, EditError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let index = self.locate(kind, name)?;
        let update: OptionSet = options.into_iter().collect();
        let updated = self.commands()[index].with_merged_options(&update)?;
        Ok(self.replaced(index, updated))
    }

    /// Insert the dependent parameter command of the `kind` directive named `name` right after
    /// it, carrying the same name and `options`.
    pub fn add_dependent<K, V>(
        &self,
        kind: CommandKind,
        name: &str,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Config, EditError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let dependent = kind
            .dependent_kind()
            .ok_or(EditError::NoDependentKind { kind })?;
        let owner = self.locate(kind, Some(name))?;
        let command = Command::directive(dependent, name, options.into_iter().collect())?;
        self.insert(command, owner + 1)
    }

    /// `pair_param <potential> {options}` directly after `pair_potential <potential>`.
    ///
    /// An empty `options` produces `pair_param <potential> {}`, which generates fine but does
    /// not parse back; the grammar wants at least one option.
    pub fn add_dependent_parameter<K, V>(
        &self,
        potential: &str,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Config, EditError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_dependent(CommandKind::PairPotential, potential, options)
    }

    /// Numeric value of `option` on the addressed command.
    pub fn option_number(
        &self,
        kind: CommandKind,
        name: Option<&str>,
        option: &str,
    ) -> Result<f64, EditError> {
        let options = self.options_of(kind, name)?;
        number_option(options, kind, option)
    }

    /// Compute `target` from the addressed command's options and write it back.
    ///
    /// `formula` sees the option-set as it is before the edit. A numeric result must be finite.
    pub fn derive_option<F>(
        &self,
        kind: CommandKind,
        name: Option<&str>,
        target: &str,
        formula: F,
    ) -> Result<Config, EditError>
    where
        F: FnOnce(&OptionSet) -> Result<Value, EditError>,
    {
        let value = formula(self.options_of(kind, name)?)?;
        if let Value::Number(number) = &value {
            if !number.as_f64().is_finite() {
                return Err(EditError::NonFinite {
                    option: target.to_string(),
                });
            }
        }
        log::debug!("Derived {} {}={}", kind, target, value);
        self.set_options(kind, name, [(target, value)])
    }

    /// Tie the line tension of the vertex potential to its area modulus:
    /// `lambda = -gamma * reference_area`.
    pub fn constrain_lambda(&self, reference_area: f64) -> Result<Config, EditError> {
        let kind = CommandKind::PairPotential;
        self.derive_option(kind, Some(VERTEX_POTENTIAL), "lambda", |options| {
            let gamma = number_option(options, kind, "gamma")?;
            Ok(Value::from(-gamma * reference_area))
        })
    }

    fn locate(&self, kind: CommandKind, name: Option<&str>) -> Result<usize, EditError> {
        self.find(kind, name).ok_or_else(|| match name {
            Some(name) => EditError::NamedCommandNotFound {
                kind,
                name: name.to_string(),
            },
            None => EditError::CommandNotFound { kind },
        })
    }

    fn options_of(&self, kind: CommandKind, name: Option<&str>) -> Result<&OptionSet, EditError> {
        let index = self.locate(kind, name)?;
        self.commands()[index]
            .options()
            .ok_or(EditError::NoOptions { kind })
    }

    fn replaced(&self, index: usize, command: Command) -> Config {
        let mut commands = self.commands().to_vec();
        commands[index] = command;
        Config::new(commands)
    }
}

/// Read `option` from `options` as a number, for use inside derive formulas.
pub fn number_option(
    options: &OptionSet,
    kind: CommandKind,
    option: &str,
) -> Result<f64, EditError> {
    let value = options.get(option).ok_or_else(|| EditError::OptionNotFound {
        kind,
        option: option.to_string(),
    })?;
    value
        .as_number()
        .map(|number| number.as_f64())
        .ok_or_else(|| EditError::NotNumeric {
            kind,
            option: option.to_string(),
        })
}
