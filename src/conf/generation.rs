//! Script generation
//!
//!     The inverse of parsing: one line per command, in document order, each terminated by a
//!     newline. Nothing is reordered, and option-sets keep their insertion order.
//!
//!         timestep 0.01
//!         pair_potential vp {k=1;gamma=0.5;lambda=-1.57}
//!         nlist {rcut=2.4;pad=0.5}
//!
//!     Comments and blank lines do not survive a parse, so they are not reproduced. Numbers are
//!     written the way [Number](crate::conf::ast::Number) displays them, which parses back to
//!     the same value.

use crate::conf::ast::{Command, Config};
use crate::conf::error::ConfError;
use std::fmt;
use std::fs;
use std::path::Path;

/// Render a whole script.
pub fn generate(config: &Config) -> String {
    let text = config.to_string();
    log::debug!("Generated {} lines", config.len());
    text
}

/// Generate `config` and write it to `path`, replacing any existing file.
pub fn write_script(config: &Config, path: impl AsRef<Path>) -> Result<(), ConfError> {
    let path = path.as_ref();
    fs::write(path, generate(config)).map_err(|e| ConfError::io(path, e))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// One script line, without the trailing newline.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().keyword())?;
        if let Some(argument) = self.argument() {
            write!(f, " {}", argument)?;
        }
        if let Some(options) = self.options() {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in self {
            writeln!(f, "{}", command)?;
        }
        Ok(())
    }
}
