//! CLI argument definitions and `LaunchProfile` construction.
use std::{ffi::OsString, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use super::{resolve_config_path, DebugMode, LaunchOptions, LaunchProfile, DEFAULT_PORT};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    Launch(LaunchProfile),
    /// No target command was supplied.
    MissingCommand,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "launcher",
    version,
    about = "Launch a Python application under a remote debug backend",
    long_about = None,
    after_help = "Example: launcher --mode debugpy --port 5678 --wait -- gunicorn -w 4 app:app"
)]
pub struct LaunchArgs {
    /// Debug backend to use.
    #[arg(long, value_enum)]
    pub mode: DebugMode,
    /// Port to await debug connections on.
    #[arg(long, default_value = DEFAULT_PORT)]
    pub port: String,
    /// Pause execution until a debugger has attached.
    #[arg(long, default_value_t = false)]
    pub wait: bool,
    /// Python interpreter (overrides LAUNCHER_PYTHON and config).
    #[arg(long = "python")]
    pub python_override: Option<PathBuf>,
    /// Root of the bundled debug support libraries.
    #[arg(long = "helpers")]
    pub helpers_override: Option<PathBuf>,
    /// Path to a launcher TOML config (overrides LAUNCHER_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Print the rewritten command as JSON instead of running it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Application script, launcher or module, followed by its arguments.
    #[arg(
        value_name = "CMDLINE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub cmdline: Vec<OsString>,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;

        Ok(LaunchProfile {
            options: LaunchOptions {
                mode: self.mode,
                port: self.port,
                wait: self.wait,
                command_line: self.cmdline,
            },
            python_override: self.python_override,
            helpers_override: self.helpers_override,
            config_path,
            dry_run: self.dry_run,
        })
    }

    /// Parse CLI args into a launch, or report that no command was given.
    pub fn into_command(self) -> Result<ParsedCommand> {
        if self.cmdline.is_empty() {
            return Ok(ParsedCommand::MissingCommand);
        }
        Ok(ParsedCommand::Launch(self.build()?))
    }
}
