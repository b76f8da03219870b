use tempfile::tempdir;

use crate::common::launcher;

#[test]
fn missing_command_prints_usage_and_exits_1() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .args(["--mode", "debugpy"])
        .output()
        .expect("launcher should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "usage expected, got:\n{stdout}");
    assert!(stdout.contains("--mode"), "usage expected, got:\n{stdout}");
}

#[test]
fn missing_mode_is_a_usage_error() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .args(["--", "app.py"])
        .output()
        .expect("launcher should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--mode"), "stderr: {stderr}");
}

#[test]
fn invalid_mode_lists_choices() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .args(["--mode", "lldb", "--", "app.py"])
        .output()
        .expect("launcher should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    for choice in ["debugpy", "ptvsd", "pydevd"] {
        assert!(stderr.contains(choice), "stderr should list {choice}: {stderr}");
    }
}

#[cfg(unix)]
#[test]
fn missing_interpreter_is_fatal() {
    let temp = tempdir().expect("can create temp directory");

    let output = launcher(temp.path())
        .args(["--python", "/nonexistent/debug-launcher/python3", "--helpers"])
        .arg(temp.path().join("no-helpers"))
        .args(["--mode", "debugpy", "--", "app.py"])
        .output()
        .expect("launcher should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unavailable"), "stderr: {stderr}");
}
