//! Simulator configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line flags are applied on top by the CLI.

use crate::{
    input,
    output::OutputFormat,
    scheduler::{Discipline, ScheduleError, Ticks, DEFAULT_TIME_QUANTUM},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

/// Path of the configuration file, when not given on the command line.
pub const CONFIG_ENV: &str = "SCHED_SIM_CONFIG";
/// Overrides the Round-Robin time quantum.
pub const QUANTUM_ENV: &str = "SCHED_SIM_QUANTUM";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ScheduleError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discipline to run; prompted for when unset.
    pub algorithm: Option<Discipline>,
    pub time_quantum: Ticks,
    pub output: OutputFormat,
    /// Show results in the interactive terminal viewer.
    pub tui: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: None,
            time_quantum: DEFAULT_TIME_QUANTUM,
            output: OutputFormat::Table,
            tui: false,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        debug!("loaded config from {:?}", path);
        Config::from_toml(&content)
    }

    /// Loads `path`, or the file named by `SCHED_SIM_CONFIG`, or the defaults, then
    /// applies environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.or(env_path.as_deref()) {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(quantum) = env::var(QUANTUM_ENV) {
            self.time_quantum = input::parse_time_quantum(&quantum)?;
            debug!("time quantum {} taken from {}", self.time_quantum, QUANTUM_ENV);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if self.time_quantum == 0 {
            return Err(ScheduleError::InvalidQuantum(self.time_quantum.to_string()));
        }
        Ok(())
    }
}
