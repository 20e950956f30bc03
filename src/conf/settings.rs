//! Layered settings for the simulation boundary and the command line.
//!
//! `defaults/samos.default.toml` is embedded into the binary so that the documented defaults
//! and the runtime behavior cannot drift apart. Callers layer their own files and single-key
//! overrides on top with [`Loader`] before deserializing into [`Settings`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/samos.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_SETTINGS_FILE: &str = "samos-conf.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub simulator: SimulatorSettings,
    pub output: OutputSettings,
}

/// How the simulator executable is launched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulatorSettings {
    pub executable: String,
    pub debug_executable: String,
    pub debug: bool,
    pub silent: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub script_extension: String,
}

impl SimulatorSettings {
    /// The executable `run` launches, honoring `debug`.
    pub fn program(&self) -> &str {
        if self.debug {
            &self.debug_executable
        } else {
            &self.executable
        }
    }
}

/// Builds [Settings] from the simulator defaults plus whatever the user layers on top.
///
/// Later layers win: defaults, then files in the order given, then overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// A `--settings` file. It must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// A file such as [LOCAL_SETTINGS_FILE] that is only read when present.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key, e.g. `output.directory` from `run --dir`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Missing required files and mistyped keys fail here.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.builder.build()?.try_deserialize()?;
        log::debug!(
            "Simulator '{}', run directory {}",
            settings.simulator.program(),
            settings.output.directory.display()
        );
        Ok(settings)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings from the embedded defaults alone.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_default_settings() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings.simulator.executable, "samos");
        assert_eq!(settings.simulator.program(), "samos");
        assert!(!settings.simulator.silent);
        assert_eq!(settings.output.directory, PathBuf::from("."));
        assert_eq!(settings.output.script_extension, "conf");
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("simulator.debug", true)
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert_eq!(settings.simulator.program(), "samos_debug");
    }

    #[test]
    fn layers_files_over_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("local.toml");
        fs::write(&path, "[output]\ndirectory = \"runs/a\"\n").expect("write settings");

        let settings = Loader::new().with_file(&path).build().expect("settings to build");
        assert_eq!(settings.output.directory, PathBuf::from("runs/a"));
        // Untouched keys keep their defaults
        assert_eq!(settings.output.script_extension, "conf");
    }

    #[test]
    fn overrides_win_over_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("local.toml");
        fs::write(&path, "[output]\ndirectory = \"runs/a\"\n").expect("write settings");

        let settings = Loader::new()
            .with_file(&path)
            .set_override("output.directory", "runs/b")
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert_eq!(settings.output.directory, PathBuf::from("runs/b"));
    }

    #[test]
    fn optional_file_may_be_missing() {
        let dir = tempdir().expect("tempdir");
        let settings = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("settings to build");
        assert_eq!(settings, load_defaults().expect("defaults"));
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
    }
}
