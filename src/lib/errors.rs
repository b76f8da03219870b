use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised while handing a command line over to a debug backend.
///
/// Failing to resolve the target is not represented here: an unknown token
/// degrades to a module name and is left to the interpreter's import system.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program carrying the backend could not be started at all.
    #[error("Debug backend `{backend}` is unavailable: failed to execute {program}: {source}")]
    BackendUnavailable {
        backend: &'static str,
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The backend ran but was terminated without an exit code (for example by a signal).
    #[error("Debug backend `{backend}` terminated without an exit code")]
    Terminated { backend: &'static str },
    /// Writing the dry-run report failed.
    #[error("Failed to report launch plan: {source}")]
    Report {
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while probing the interpreter version for helper library lookup.
#[derive(Debug, Error)]
pub enum VersionProbeError {
    #[error("Failed to run `{program} -V`: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{program} -V` exited abnormally (exit={exit_code:?})")]
    Failed {
        program: PathBuf,
        exit_code: Option<i32>,
    },
    #[error("{program} is not a python interpreter: {output:?}")]
    NotPython { program: PathBuf, output: String },
    #[error("Unrecognised python version {version:?}")]
    Malformed { version: String },
}
