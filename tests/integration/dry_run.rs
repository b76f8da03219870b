use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use crate::common::{dry_run, fixture, launcher, strings, touch};

#[test]
fn debugpy_file_target_with_wait() {
    let temp = tempdir().expect("can create temp directory");
    let script = touch(&temp.path().join("app/run.py"));
    let script = script.to_string_lossy().to_string();

    let (plan, _) = dry_run(
        temp.path(),
        &[
            "--mode", "debugpy", "--port", "9000", "--wait", "--", script.as_str(), "--flag",
        ],
    );

    assert_eq!(plan["backend"], "debugpy");
    assert_eq!(
        strings(&plan["argv"]),
        [
            "debugpy",
            "--listen",
            "9000",
            "--wait-for-client",
            script.as_str(),
            "--flag"
        ]
    );
    assert_eq!(plan["program"], "/usr/bin/python3");
    assert_eq!(
        strings(&plan["args"]),
        [
            "-m",
            "debugpy",
            "--listen",
            "9000",
            "--wait-for-client",
            script.as_str(),
            "--flag"
        ]
    );
}

#[test]
fn pydevd_module_target_without_wait() {
    let temp = tempdir().expect("can create temp directory");

    let (plan, _) = dry_run(
        temp.path(),
        &["--mode", "pydevd", "--", "gunicorn", "-w", "4"],
    );

    assert_eq!(
        strings(&plan["argv"]),
        ["--server", "--port", "5678", "--module", "--file", "gunicorn", "-w", "4"]
    );
    assert_eq!(plan["entry"]["kind"], "call_main");
    assert_eq!(plan["post_launch"], Value::Null);
}

#[test]
fn pydevd_wait_is_reported_as_post_launch() {
    let temp = tempdir().expect("can create temp directory");

    let (plan, _) = dry_run(temp.path(), &["--mode", "pydevd", "--wait", "--", "flask"]);

    assert_eq!(plan["post_launch"], "wait_for_client");
    assert!(
        !strings(&plan["argv"]).iter().any(|arg| arg.contains("wait")),
        "pydevd argv must not carry a wait flag: {plan}"
    );
}

#[test]
fn ptvsd_relative_file_in_working_directory() {
    let temp = tempdir().expect("can create temp directory");
    touch(&temp.path().join("main.py"));

    let (plan, _) = dry_run(
        temp.path(),
        &["--mode", "ptvsd", "--port", "3000", "--", "main.py", "serve"],
    );

    assert_eq!(
        strings(&plan["argv"]),
        ["ptvsd", "--host", "localhost", "--port", "3000", "main.py", "serve"]
    );
}

#[test]
fn helper_library_is_added_to_pythonpath() {
    let temp = tempdir().expect("can create temp directory");
    let helpers = temp.path().join("dbg");
    let library = helpers.join("lib/python3.11/site-packages");
    fs::create_dir_all(&library).expect("can create helper library");

    let output = launcher(temp.path())
        .env("WRAPPER_PYTHON_VERSION", "3.11")
        .args(["--dry-run", "--python", "/usr/bin/python3", "--helpers"])
        .arg(&helpers)
        .args(["--mode", "debugpy", "--", "app"])
        .output()
        .expect("launcher should run");
    assert!(output.status.success());
    let plan: Value = serde_json::from_slice(&output.stdout).expect("dry run prints JSON");

    assert_eq!(plan["env"]["PYTHONPATH"], &*library.to_string_lossy());
}

#[test]
fn missing_helpers_root_is_a_warning() {
    let temp = tempdir().expect("can create temp directory");

    let (plan, output) = dry_run(temp.path(), &["--mode", "debugpy", "--", "app"]);

    assert_eq!(plan["env"], serde_json::json!({}));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("WARN") && stderr.contains("Debug helpers not found at"),
        "stderr: {stderr}"
    );
}

#[test]
fn skip_env_leaves_pythonpath_alone() {
    let temp = tempdir().expect("can create temp directory");
    let helpers = temp.path().join("dbg");
    fs::create_dir_all(helpers.join("lib/python3.11/site-packages"))
        .expect("can create helper library");

    let output = launcher(temp.path())
        .env("WRAPPER_PYTHON_VERSION", "3.11")
        .env("WRAPPER_SKIP_ENV", "1")
        .args(["--dry-run", "--python", "/usr/bin/python3", "--helpers"])
        .arg(&helpers)
        .args(["--mode", "debugpy", "--", "app"])
        .output()
        .expect("launcher should run");
    assert!(output.status.success());
    let plan: Value = serde_json::from_slice(&output.stdout).expect("dry run prints JSON");

    assert_eq!(plan["env"], serde_json::json!({}));
}

#[test]
fn config_file_selects_interpreter() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .env("LAUNCHER_CONFIG_PATH", fixture("tests/fixtures/launcher_valid.toml"))
        .args(["--dry-run", "--mode", "debugpy", "--", "app"])
        .output()
        .expect("launcher should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let plan: Value = serde_json::from_slice(&output.stdout).expect("dry run prints JSON");

    assert_eq!(plan["program"], "/usr/local/bin/python3.11");
}

#[test]
fn python_flag_overrides_environment() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .env("LAUNCHER_PYTHON", "/env/python")
        .args(["--dry-run", "--python", "/cli/python", "--helpers"])
        .arg(temp.path().join("no-helpers"))
        .args(["--mode", "ptvsd", "--", "app"])
        .output()
        .expect("launcher should run");
    let plan: Value = serde_json::from_slice(&output.stdout).expect("dry run prints JSON");

    assert_eq!(plan["program"], "/cli/python");
}

#[test]
fn invalid_config_fails_before_launch() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .args(["--dry-run", "--config"])
        .arg(fixture("tests/fixtures/launcher_relative_helpers.toml"))
        .args(["--mode", "debugpy", "--", "app"])
        .output()
        .expect("launcher should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should be launched");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("helpers.root"), "stderr: {stderr}");
}
