//! Environment switches and the helper library search path.
use std::{
    collections::BTreeMap,
    env,
    ffi::{OsStr, OsString},
    path::Path,
};

use tracing::{debug, warn};

use crate::lib::{paths, python};

/// Set to a false-like value to run the command line unmodified.
pub const ENABLED_ENV: &str = "WRAPPER_ENABLED";
/// Non-empty value skips `PYTHONPATH` configuration.
pub const SKIP_ENV_ENV: &str = "WRAPPER_SKIP_ENV";
/// Interpreter version (`M.N`) to use instead of probing the interpreter.
pub const PYTHON_VERSION_ENV: &str = "WRAPPER_PYTHON_VERSION";
pub const PYTHONPATH_ENV: &str = "PYTHONPATH";

const BACKEND_MODULES: &[&str] = &["debugpy", "ptvsd", "pydevd"];

/// Whether rewriting is enabled for the given `WRAPPER_ENABLED` value.
pub fn wrapper_enabled(value: Option<&OsStr>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let value = value.to_string_lossy().trim().to_ascii_lowercase();
    !matches!(value.as_str(), "0" | "false" | "no" | "off")
}

/// Backend the command line already starts, if any.
///
/// Only simple forms are recognised: a `pydevd` program, or a `python*`
/// program followed by `-m <backend>` or `-m<backend>`.
pub fn already_configured(command_line: &[OsString]) -> Option<&'static str> {
    let program = Path::new(command_line.first()?).file_name()?.to_string_lossy();
    if program == "pydevd" {
        return Some("pydevd");
    }
    if !program.starts_with("python") {
        return None;
    }

    let module = match command_line.get(1)?.to_str()? {
        "-m" => command_line.get(2)?.to_str()?,
        flag => flag.strip_prefix("-m")?,
    };
    BACKEND_MODULES
        .iter()
        .copied()
        .find(|backend| *backend == module)
}

/// Environment overrides pointing the interpreter at the bundled debug libraries.
pub fn helper_env_overrides(helpers_root: &Path, interpreter: &Path) -> BTreeMap<String, OsString> {
    if env::var_os(SKIP_ENV_ENV).is_some_and(|value| !value.is_empty()) {
        debug!(
            target: "debug_launcher::environment",
            "Skipping environment configuration by request"
        );
        return BTreeMap::new();
    }

    helper_env_overrides_from(
        helpers_root,
        interpreter,
        env::var(PYTHON_VERSION_ENV).ok().as_deref(),
        env::var_os(PYTHONPATH_ENV).as_deref(),
    )
}

fn helper_env_overrides_from(
    helpers_root: &Path,
    interpreter: &Path,
    version_override: Option<&str>,
    existing_pythonpath: Option<&OsStr>,
) -> BTreeMap<String, OsString> {
    let mut overrides = BTreeMap::new();
    if !helpers_root.exists() {
        warn!(
            target: "debug_launcher::environment",
            helpers_root = %helpers_root.display(),
            "Debug helpers not found at {}; leaving PYTHONPATH untouched",
            helpers_root.display()
        );
        return overrides;
    }

    let version = match version_override.filter(|value| !value.trim().is_empty()) {
        Some(value) => python::parse_python_version(value),
        None => python::probe_python_version(interpreter),
    };
    let (major, minor) = match version {
        Ok(version) => version,
        Err(err) => {
            warn!(
                target: "debug_launcher::environment",
                interpreter = %interpreter.display(),
                reason = %err,
                "Unable to determine python version; helper libraries not added"
            );
            return overrides;
        }
    };

    let library_path = python::helper_library_path(helpers_root, major, minor);
    if !library_path.exists() {
        // The user may have installed the backend themselves.
        warn!(
            target: "debug_launcher::environment",
            path = %library_path.display(),
            "Debugging support for Python {major}.{minor} not found"
        );
    }
    overrides.insert(
        PYTHONPATH_ENV.to_string(),
        paths::append_path_list(existing_pythonpath, &library_path),
    );
    overrides
}
