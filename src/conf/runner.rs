//! Simulation boundary
//!
//!     Everything between a finished [Config] and the SAMoS executable:
//!
//!     - file names the script implies: the script itself is named after its last `config`
//!       directive, the particle input and cell boundary files are the last `input` and
//!       `read_cell_boundary` arguments.
//!     - setup: write the script into the run directory.
//!     - run: launch the simulator on it and wait. Only the exit status comes back.
//!     - housekeeping on the run directory: clear old result files, find the last step's data.

use crate::conf::ast::{CommandKind, Config};
use crate::conf::error::ConfError;
use crate::conf::generation::write_script;
use crate::conf::settings::Settings;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{self, ExitStatus, Stdio};

/// Extensions of the files a simulation leaves behind.
pub const RESULT_EXTENSIONS: [&str; 3] = ["dat", "vtp", "fc"];

static STEP_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(\d+)\.dat$").unwrap());

#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    settings: Settings,
}

impl Simulation {
    pub fn new(config: Config, settings: Settings) -> Self {
        Self { config, settings }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn directory(&self) -> &Path {
        &self.settings.output.directory
    }

    /// `<last config name>.<script extension>`
    pub fn script_file(&self) -> Result<String, ConfError> {
        let name = self
            .config
            .configs()
            .last()
            .copied()
            .ok_or(ConfError::MissingCommand(CommandKind::Config))?;
        Ok(format!("{}.{}", name, self.settings.output.script_extension))
    }

    /// Particle input file, if the script reads one.
    pub fn input_file(&self) -> Option<&str> {
        self.config.inputs().last().copied()
    }

    /// Cell boundary file, if the script reads one.
    pub fn boundary_file(&self) -> Option<&str> {
        self.config.boundaries().last().copied()
    }

    /// Write the script into the run directory, creating the directory as needed.
    pub fn setup(&self) -> Result<PathBuf, ConfError> {
        let directory = self.directory();
        if !directory.exists() {
            log::info!("Creating {}", directory.display());
            fs::create_dir_all(directory).map_err(|e| ConfError::io(directory, e))?;
        }
        let path = directory.join(self.script_file()?);
        write_script(&self.config, &path)?;
        Ok(path)
    }

    /// Set up, then run the simulator on the script and wait for it to exit.
    pub fn run(&self) -> Result<ExitStatus, ConfError> {
        self.setup()?;
        let script = self.script_file()?;
        let simulator = &self.settings.simulator;
        let program = simulator.program();

        let mut command = process::Command::new(program);
        command.arg(&script).current_dir(self.directory());
        if simulator.silent {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        log::info!(
            "Running {} {} in {}",
            program,
            script,
            self.directory().display()
        );
        let status = command.status().map_err(|source| ConfError::Simulator {
            program: program.to_string(),
            source,
        })?;
        if !status.success() {
            log::warn!("{} exited with {}", program, status);
        }
        Ok(status)
    }

    /// [clear] on this simulation's run directory.
    pub fn clear(&self) -> Result<usize, ConfError> {
        clear(self.directory())
    }

    /// [latest_result] in this simulation's run directory.
    pub fn latest_result(&self) -> Result<Option<PathBuf>, ConfError> {
        latest_result(self.directory())
    }
}

/// Remove result files from `directory`. Returns how many were removed.
pub fn clear(directory: impl AsRef<Path>) -> Result<usize, ConfError> {
    let mut removed = 0;
    for path in files(directory.as_ref())? {
        let is_result = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| RESULT_EXTENSIONS.contains(&ext));
        if is_result {
            fs::remove_file(&path).map_err(|e| ConfError::io(&path, e))?;
            removed += 1;
        }
    }
    log::info!("Removed {} result files from {}", removed, directory.as_ref().display());
    Ok(removed)
}

/// The `*_<step>.dat` file with the largest step, if any.
pub fn latest_result(directory: impl AsRef<Path>) -> Result<Option<PathBuf>, ConfError> {
    let latest = files(directory.as_ref())?
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let step: u64 = STEP_FILE.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((step, path))
        })
        .max_by_key(|(step, _)| *step)
        .map(|(_, path)| path);
    Ok(latest)
}

fn files(directory: &Path) -> Result<Vec<PathBuf>, ConfError> {
    let entries = fs::read_dir(directory).map_err(|e| ConfError::io(directory, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConfError::io(directory, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
