//! Launch options and interpreter/config resolution.
use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

pub const DEFAULT_PORT: &str = "5678";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_HELPERS_ROOT: &str = "/dbg";
const LAUNCHER_CONFIG_ENV: &str = "LAUNCHER_CONFIG_PATH";
const LAUNCHER_PYTHON_ENV: &str = "LAUNCHER_PYTHON";

/// Debug backend selection.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DebugMode {
    Debugpy,
    Ptvsd,
    Pydevd,
}

/// Parsed launch request. `command_line[0]` names the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub mode: DebugMode,
    pub port: String,
    pub wait: bool,
    pub command_line: Vec<OsString>,
}

impl LaunchOptions {
    /// First token of the command line.
    pub fn target_token(&self) -> &OsStr {
        self.command_line
            .first()
            .map(OsString::as_os_str)
            .unwrap_or_default()
    }

    /// The target's own arguments.
    pub fn target_args(&self) -> &[OsString] {
        self.command_line.get(1..).unwrap_or_default()
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub options: LaunchOptions,
    pub python_override: Option<PathBuf>,
    pub helpers_override: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub dry_run: bool,
}

/// Resolve config path in the order: CLI override → env var → none.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    resolve_config_path_from(override_path, env::var_os(LAUNCHER_CONFIG_ENV))
}

fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_value: Option<OsString>,
) -> Result<Option<PathBuf>> {
    let Some(path) = override_path.or_else(|| {
        env_value
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }) else {
        return Ok(None);
    };

    if path.is_absolute() {
        return Ok(Some(path));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(Some(cwd.join(path)))
}

/// Resolve the interpreter in the order: CLI override → env var → config → default.
pub fn resolve_python(cli: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    resolve_python_from(cli, env::var_os(LAUNCHER_PYTHON_ENV), configured)
}

fn resolve_python_from(
    cli: Option<&Path>,
    env_value: Option<OsString>,
    configured: Option<&Path>,
) -> PathBuf {
    cli.map(Path::to_path_buf)
        .or_else(|| {
            env_value
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| configured.map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON))
}
