//! Debug backends and the invocations they are launched with.
use std::{ffi::OsString, path::Path};

use serde::Serialize;

use crate::cli::{DebugMode, LaunchOptions};

use super::resolver::ResolvedTarget;

/// How the runtime enters a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryPoint {
    /// Run `module` as `__main__`; `argv[0]` is the program name.
    RunModule { module: &'static str },
    /// Import `module` and call its `main()`; `argv` is the complete argument vector.
    CallMain { module: &'static str },
    /// Execute `argv[0]` as-is.
    Direct,
}

/// Step applied once the backend's main routine has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostLaunch {
    /// Block until a debugger client attaches.
    WaitForClient,
}

/// Fully rewritten command handed to a backend entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInvocation {
    backend: &'static str,
    entry: EntryPoint,
    argv: Vec<OsString>,
    post_launch: Option<PostLaunch>,
}

impl BackendInvocation {
    pub fn new(backend: &'static str, entry: EntryPoint, argv: Vec<OsString>) -> Self {
        Self {
            backend,
            entry,
            argv,
            post_launch: None,
        }
    }

    /// Run the original command line untouched.
    pub fn unmodified(command_line: &[OsString]) -> Self {
        Self::new("none", EntryPoint::Direct, command_line.to_vec())
    }

    pub fn with_post_launch(mut self, post_launch: Option<PostLaunch>) -> Self {
        self.post_launch = post_launch;
        self
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn entry(&self) -> EntryPoint {
        self.entry
    }

    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    pub fn post_launch(&self) -> Option<PostLaunch> {
        self.post_launch
    }
}

/// A remote-debugging runtime that knows its own command-line convention.
pub trait Backend {
    fn name(&self) -> &'static str;
    fn build_invocation(&self, options: &LaunchOptions, target: &ResolvedTarget)
        -> BackendInvocation;
}

/// `python -m debugpy --listen <port> [--wait-for-client] ...`
pub struct Debugpy;

/// `python -m ptvsd --host localhost --port <port> [--wait] ...`
pub struct Ptvsd;

/// `pydevd.main()` with `--server --port <port> --file ...`; waiting happens after start.
pub struct Pydevd;

impl Backend for Debugpy {
    fn name(&self) -> &'static str {
        "debugpy"
    }

    fn build_invocation(
        &self,
        options: &LaunchOptions,
        target: &ResolvedTarget,
    ) -> BackendInvocation {
        let mut argv: Vec<OsString> = vec![
            self.name().into(),
            "--listen".into(),
            options.port.as_str().into(),
        ];
        if options.wait {
            argv.push("--wait-for-client".into());
        }
        push_positional_target(&mut argv, target);
        argv.extend(options.target_args().iter().cloned());

        BackendInvocation::new(
            self.name(),
            EntryPoint::RunModule {
                module: self.name(),
            },
            argv,
        )
    }
}

impl Backend for Ptvsd {
    fn name(&self) -> &'static str {
        "ptvsd"
    }

    fn build_invocation(
        &self,
        options: &LaunchOptions,
        target: &ResolvedTarget,
    ) -> BackendInvocation {
        let mut argv: Vec<OsString> = vec![
            self.name().into(),
            "--host".into(),
            "localhost".into(),
            "--port".into(),
            options.port.as_str().into(),
        ];
        if options.wait {
            argv.push("--wait".into());
        }
        push_positional_target(&mut argv, target);
        argv.extend(options.target_args().iter().cloned());

        BackendInvocation::new(
            self.name(),
            EntryPoint::RunModule {
                module: self.name(),
            },
            argv,
        )
    }
}

impl Backend for Pydevd {
    fn name(&self) -> &'static str {
        "pydevd"
    }

    fn build_invocation(
        &self,
        options: &LaunchOptions,
        target: &ResolvedTarget,
    ) -> BackendInvocation {
        let mut argv: Vec<OsString> = vec![
            "--server".into(),
            "--port".into(),
            options.port.as_str().into(),
        ];
        match target {
            ResolvedTarget::FilePath(path) => {
                argv.push("--file".into());
                argv.push(path_token(path));
            }
            ResolvedTarget::ModuleName(module) => {
                argv.push("--module".into());
                argv.push("--file".into());
                argv.push(module.clone());
            }
        }
        argv.extend(options.target_args().iter().cloned());

        // pydevd has no startup flag for this; it is requested once main() is running.
        let post_launch = options.wait.then_some(PostLaunch::WaitForClient);
        BackendInvocation::new(
            self.name(),
            EntryPoint::CallMain {
                module: self.name(),
            },
            argv,
        )
        .with_post_launch(post_launch)
    }
}

impl DebugMode {
    /// Backend implementing this mode.
    pub fn backend(&self) -> &'static dyn Backend {
        match self {
            DebugMode::Debugpy => &Debugpy,
            DebugMode::Ptvsd => &Ptvsd,
            DebugMode::Pydevd => &Pydevd,
        }
    }
}

/// `<path>` for files, `-m <module>` for modules.
fn push_positional_target(argv: &mut Vec<OsString>, target: &ResolvedTarget) {
    match target {
        ResolvedTarget::FilePath(path) => argv.push(path_token(path)),
        ResolvedTarget::ModuleName(module) => {
            argv.push("-m".into());
            argv.push(module.clone());
        }
    }
}

fn path_token(path: &Path) -> OsString {
    path.as_os_str().to_os_string()
}
