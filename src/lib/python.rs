//! Shared helpers for building interpreter commands and locating helper libraries.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    launcher::backend::{BackendInvocation, EntryPoint, PostLaunch},
    lib::errors::VersionProbeError,
};

pub struct PythonCommandConfig<'a> {
    pub interpreter: &'a Path,
    pub env_overrides: &'a BTreeMap<String, OsString>,
}

/// Program and arguments a command will execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

/// Translate an invocation into the program and arguments to execute.
///
/// `RunModule` becomes `python -m <module> argv[1..]`; `CallMain` becomes
/// `python -c <bootstrap> argv..` where the bootstrap installs `argv` as
/// `sys.argv`; `Direct` runs `argv[0]` itself.
pub fn command_line(interpreter: &Path, invocation: &BackendInvocation) -> CommandLine {
    let argv = invocation.argv();
    match invocation.entry() {
        EntryPoint::RunModule { module } => {
            let mut args: Vec<OsString> = vec!["-m".into(), module.into()];
            args.extend(argv.iter().skip(1).cloned());
            CommandLine {
                program: interpreter.to_path_buf(),
                args,
            }
        }
        EntryPoint::CallMain { module } => {
            let mut args: Vec<OsString> = vec![
                "-c".into(),
                call_main_bootstrap(module, invocation.post_launch()).into(),
            ];
            args.extend(argv.iter().cloned());
            CommandLine {
                program: interpreter.to_path_buf(),
                args,
            }
        }
        EntryPoint::Direct => CommandLine {
            program: PathBuf::from(argv.first().cloned().unwrap_or_default()),
            args: argv.iter().skip(1).cloned().collect(),
        },
    }
}

/// Build the process command for an invocation.
pub fn build_backend_command(
    config: PythonCommandConfig<'_>,
    invocation: &BackendInvocation,
) -> Command {
    let line = command_line(config.interpreter, invocation);
    let mut command = Command::new(&line.program);
    command.args(&line.args);
    for (key, value) in config.env_overrides {
        command.env(key, value);
    }
    command
}

/// Script that imports `module`, calls its `main()` with the forwarded argv,
/// then applies any post-launch step once `main()` has returned control.
fn call_main_bootstrap(module: &str, post_launch: Option<PostLaunch>) -> String {
    let mut script =
        format!("import sys\nsys.argv = sys.argv[1:]\nimport {module}\n{module}.main()\n");
    if let Some(PostLaunch::WaitForClient) = post_launch {
        script.push_str(&format!("{module}._wait_for_attach()\n"));
    }
    script
}

/// Location of the bundled debug support libraries for an interpreter version.
pub fn helper_library_path(root: &Path, major: u32, minor: u32) -> PathBuf {
    root.join("lib")
        .join(format!("python{major}.{minor}"))
        .join("site-packages")
}

/// Run `<interpreter> -V` and extract the major and minor version.
pub fn probe_python_version(interpreter: &Path) -> Result<(u32, u32), VersionProbeError> {
    let output = Command::new(interpreter)
        .arg("-V")
        .output()
        .map_err(|source| VersionProbeError::Spawn {
            program: interpreter.to_path_buf(),
            source,
        })?;
    if !output.status.success() {
        return Err(VersionProbeError::Failed {
            program: interpreter.to_path_buf(),
            exit_code: output.status.code(),
        });
    }

    // Python 2 reports its version on stderr.
    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let version = combined
        .trim()
        .strip_prefix("Python ")
        .ok_or_else(|| VersionProbeError::NotPython {
            program: interpreter.to_path_buf(),
            output: combined.trim().to_string(),
        })?;
    parse_python_version(version)
}

/// Parse `M.N[.P...]` into `(M, N)`.
pub fn parse_python_version(version: &str) -> Result<(u32, u32), VersionProbeError> {
    let malformed = || VersionProbeError::Malformed {
        version: version.to_string(),
    };
    let mut parts = version.trim().split('.');
    let major = parts
        .next()
        .and_then(|part| part.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    let minor = parts
        .next()
        .map(|part| {
            part.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|part| part.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    Ok((major, minor))
}
