//! Resolve the target, rewrite the command line and hand over to a debug backend.
pub mod backend;
pub mod dispatch;
pub mod environment;
mod exit;
pub mod resolver;

use std::{env, ffi::OsString, path::PathBuf, process::ExitCode};

use tracing::info;

use crate::{
    cli::{resolve_python, LaunchProfile, DEFAULT_HELPERS_ROOT},
    config::LauncherConfig,
};

pub use backend::{Backend, BackendInvocation, Debugpy, EntryPoint, PostLaunch, Ptvsd, Pydevd};
pub use dispatch::{
    build_invocation, dispatch, BackendRuntime, DryRunRuntime, InterpreterSettings,
    PythonRuntime,
};
pub use exit::LaunchExit;
pub use resolver::{resolve, ResolveEnv, ResolvedTarget, Resolver};

/// Run a launch profile to completion (or process replacement).
pub fn run(profile: LaunchProfile) -> Result<ExitCode, LaunchExit> {
    let config =
        LauncherConfig::load(profile.config_path.clone()).map_err(LaunchExit::from_error)?;
    let interpreter = resolve_python(
        profile.python_override.as_deref(),
        config.python.interpreter.as_deref(),
    );
    let helpers_root = profile
        .helpers_override
        .clone()
        .or_else(|| config.helpers.root.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HELPERS_ROOT));
    let options = &profile.options;

    let mut settings = InterpreterSettings::new(interpreter);
    let passthrough = unmodified_reason(&options.command_line);
    if passthrough.is_none() {
        settings.env_overrides =
            environment::helper_env_overrides(&helpers_root, &settings.interpreter);
    }

    let runtime: Box<dyn BackendRuntime> = if profile.dry_run {
        Box::new(DryRunRuntime::new(settings))
    } else {
        Box::new(PythonRuntime::new(settings))
    };

    if let Some(reason) = passthrough {
        info!(
            target: "debug_launcher::launcher",
            reason,
            command_line = ?options.command_line,
            "Launching command line unmodified"
        );
        let invocation = BackendInvocation::unmodified(&options.command_line);
        return runtime.run(&invocation).map_err(LaunchExit::from_error);
    }

    let target = resolve(options.target_token());
    dispatch(options, &target, runtime.as_ref()).map_err(LaunchExit::from_error)
}

fn unmodified_reason(command_line: &[OsString]) -> Option<&'static str> {
    if !environment::wrapper_enabled(env::var_os(environment::ENABLED_ENV).as_deref()) {
        return Some("wrapper disabled");
    }
    environment::already_configured(command_line).map(|_| "already configured for debugging")
}
