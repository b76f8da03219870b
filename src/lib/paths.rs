//! Shared helpers for locating executables (search path and user bin directory).

use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// Environment variable naming the per-user package base directory.
pub const USER_BASE_ENV: &str = "PYTHONUSERBASE";
/// Environment variable name for user home directory.
pub const HOME_ENV: &str = "HOME";
/// Environment variable holding the executable search path.
pub const PATH_ENV: &str = "PATH";

/// Search path used when `PATH` is unset.
#[cfg(unix)]
const DEFAULT_SEARCH_PATH: &[&str] = &["/bin", "/usr/bin"];
#[cfg(not(unix))]
const DEFAULT_SEARCH_PATH: &[&str] = &[];

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Executable search path of the current process.
pub fn exec_search_path() -> Vec<PathBuf> {
    exec_search_path_from(env::var_os(PATH_ENV).as_deref())
}

/// Split a `PATH`-style value into directories, skipping empty entries.
///
/// `None` falls back to the platform default search path.
pub fn exec_search_path_from(value: Option<&OsStr>) -> Vec<PathBuf> {
    match value {
        Some(value) => env::split_paths(value)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect(),
        None => DEFAULT_SEARCH_PATH.iter().map(PathBuf::from).collect(),
    }
}

/// Resolve the user-local bin directory.
///
/// Resolution order:
/// 1. `$PYTHONUSERBASE/bin` when `PYTHONUSERBASE` is set.
/// 2. `$HOME/.local/bin` otherwise.
pub fn user_bin_dir_from(user_base: Option<&OsStr>, home: Option<&OsStr>) -> Option<PathBuf> {
    if let Some(user_base) = user_base.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(user_base).join("bin"));
    }

    home.filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(".local").join("bin"))
}

/// Separator between entries of `PATH`-style lists.
#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";

/// Append `entry` to a separator-delimited path list such as `PYTHONPATH`.
///
/// The existing value is kept byte for byte; empty entries in it are meaningful
/// to the interpreter (the working directory).
pub fn append_path_list(existing: Option<&OsStr>, entry: &Path) -> OsString {
    match existing.filter(|value| !value.is_empty()) {
        Some(value) => {
            let mut joined = value.to_os_string();
            joined.push(PATH_LIST_SEPARATOR);
            joined.push(entry);
            joined
        }
        None => entry.as_os_str().to_os_string(),
    }
}
