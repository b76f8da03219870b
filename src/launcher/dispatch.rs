//! Hand a rewritten invocation over to the interpreter that carries the backend.
use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, ExitCode},
};

use serde::Serialize;
use tracing::debug;

use crate::{
    cli::LaunchOptions,
    lib::{
        errors::LaunchError,
        python::{self, PythonCommandConfig},
        telemetry::{emit_launch_mode, LaunchModeTelemetry},
    },
};

use super::{
    backend::{BackendInvocation, EntryPoint, PostLaunch},
    resolver::ResolvedTarget,
};

/// Capability to run a backend with an explicit argument vector.
pub trait BackendRuntime {
    fn run(&self, invocation: &BackendInvocation) -> Result<ExitCode, LaunchError>;
}

/// Interpreter and environment shared by every runtime.
#[derive(Debug, Clone)]
pub struct InterpreterSettings {
    pub interpreter: PathBuf,
    pub env_overrides: BTreeMap<String, OsString>,
}

impl InterpreterSettings {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            env_overrides: BTreeMap::new(),
        }
    }

    fn command(&self, invocation: &BackendInvocation) -> Command {
        python::build_backend_command(
            PythonCommandConfig {
                interpreter: &self.interpreter,
                env_overrides: &self.env_overrides,
            },
            invocation,
        )
    }
}

/// Runs the backend through the Python interpreter, replacing this process where supported.
pub struct PythonRuntime {
    settings: InterpreterSettings,
}

impl PythonRuntime {
    pub fn new(settings: InterpreterSettings) -> Self {
        Self { settings }
    }
}

impl BackendRuntime for PythonRuntime {
    fn run(&self, invocation: &BackendInvocation) -> Result<ExitCode, LaunchError> {
        let command = self.settings.command(invocation);
        debug!(
            target: "debug_launcher::dispatch",
            program = %Path::new(command.get_program()).display(),
            args = ?command.get_args().collect::<Vec<_>>(),
            "Executing backend command"
        );
        hand_off(command, invocation.backend())
    }
}

#[cfg(unix)]
fn hand_off(mut command: Command, backend: &'static str) -> Result<ExitCode, LaunchError> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    let source = command.exec();
    Err(LaunchError::BackendUnavailable {
        backend,
        program: PathBuf::from(command.get_program()),
        source,
    })
}

#[cfg(not(unix))]
fn hand_off(mut command: Command, backend: &'static str) -> Result<ExitCode, LaunchError> {
    let status = command
        .status()
        .map_err(|source| LaunchError::BackendUnavailable {
            backend,
            program: PathBuf::from(command.get_program()),
            source,
        })?;
    status
        .code()
        .map(|code| ExitCode::from((code & 0xff) as u8))
        .ok_or(LaunchError::Terminated { backend })
}

/// Prints the launch plan as JSON instead of running it.
pub struct DryRunRuntime {
    settings: InterpreterSettings,
}

/// Serialized dry-run report.
#[derive(Debug, Serialize)]
pub struct LaunchPlan<'a> {
    pub backend: &'static str,
    pub entry: EntryPoint,
    pub argv: Vec<String>,
    pub post_launch: Option<PostLaunch>,
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<&'a str, String>,
}

impl DryRunRuntime {
    pub fn new(settings: InterpreterSettings) -> Self {
        Self { settings }
    }

    /// Build the JSON report for `invocation`.
    pub fn report(&self, invocation: &BackendInvocation) -> Result<String, LaunchError> {
        let line = python::command_line(&self.settings.interpreter, invocation);
        let plan = LaunchPlan {
            backend: invocation.backend(),
            entry: invocation.entry(),
            argv: lossy(invocation.argv()),
            post_launch: invocation.post_launch(),
            program: line.program.to_string_lossy().into_owned(),
            args: lossy(&line.args),
            env: self
                .settings
                .env_overrides
                .iter()
                .map(|(key, value)| (key.as_str(), value.to_string_lossy().into_owned()))
                .collect(),
        };
        serde_json::to_string_pretty(&plan).map_err(|source| LaunchError::Report { source })
    }
}

fn lossy(values: &[OsString]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_string_lossy().into_owned())
        .collect()
}

impl BackendRuntime for DryRunRuntime {
    fn run(&self, invocation: &BackendInvocation) -> Result<ExitCode, LaunchError> {
        println!("{}", self.report(invocation)?);
        Ok(ExitCode::SUCCESS)
    }
}

/// Build the invocation for the selected backend and transfer control to it.
pub fn dispatch(
    options: &LaunchOptions,
    target: &ResolvedTarget,
    runtime: &dyn BackendRuntime,
) -> Result<ExitCode, LaunchError> {
    let invocation = build_invocation(options, target);
    emit_launch_mode(&LaunchModeTelemetry {
        backend: invocation.backend(),
        port: &options.port,
        wait: options.wait,
        argv: invocation.argv(),
    });
    runtime.run(&invocation)
}

/// Invocation `dispatch` would hand to the runtime.
pub fn build_invocation(options: &LaunchOptions, target: &ResolvedTarget) -> BackendInvocation {
    options.mode.backend().build_invocation(options, target)
}
