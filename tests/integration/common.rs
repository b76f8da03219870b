use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use serde_json::Value;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_debug-launcher");

const SCRUBBED_ENV: &[&str] = &[
    "RUST_LOG",
    "PYTHONUSERBASE",
    "PYTHONPATH",
    "LAUNCHER_CONFIG_PATH",
    "LAUNCHER_PYTHON",
    "WRAPPER_ENABLED",
    "WRAPPER_SKIP_ENV",
    "WRAPPER_PYTHON_VERSION",
    "WRAPPER_VERBOSE",
];

/// Launcher command isolated from the caller's environment.
///
/// `PATH` and `HOME` point into `root` so resolution only sees fixture files,
/// and `--helpers` is left to the caller.
pub fn launcher(root: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    for key in SCRUBBED_ENV {
        command.env_remove(key);
    }
    command
        .env("PATH", root.join("path-bin"))
        .env("HOME", root.join("home"))
        .current_dir(root);
    command
}

/// Dry-run `args` and parse the printed plan.
pub fn dry_run(root: &Path, args: &[&str]) -> (Value, Output) {
    let output = launcher(root)
        .arg("--dry-run")
        .arg("--python")
        .arg("/usr/bin/python3")
        .arg("--helpers")
        .arg(root.join("no-helpers"))
        .args(args)
        .output()
        .expect("launcher should run");
    assert!(
        output.status.success(),
        "dry run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let plan: Value = serde_json::from_slice(&output.stdout).expect("dry run prints JSON");
    (plan, output)
}

pub fn touch(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("can create parent directory");
    }
    fs::write(path, "#!/usr/bin/python3\n").expect("can write fixture script");
    path.to_path_buf()
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("value should be an array")
        .iter()
        .map(|item| item.as_str().expect("array of strings").to_string())
        .collect()
}
