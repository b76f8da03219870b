use tempfile::tempdir;

use crate::common::{dry_run, launcher, strings, touch};

const TOKEN: &str = "debug-launcher-it-script";

#[test]
fn search_path_script_is_launched_as_file() {
    let temp = tempdir().expect("can create temp directory");
    let script = touch(&temp.path().join("path-bin").join(TOKEN));

    let (plan, _) = dry_run(temp.path(), &["--mode", "pydevd", "--", TOKEN, "--bind", ":80"]);

    assert_eq!(
        strings(&plan["argv"]),
        [
            "--server",
            "--port",
            "5678",
            "--file",
            &*script.to_string_lossy(),
            "--bind",
            ":80"
        ]
    );
}

#[test]
fn user_bin_script_is_found_and_reported() {
    let temp = tempdir().expect("can create temp directory");
    let script = touch(&temp.path().join("home/.local/bin").join(TOKEN));

    let (plan, output) = dry_run(temp.path(), &["--mode", "debugpy", "--", TOKEN]);

    assert_eq!(
        strings(&plan["argv"]),
        ["debugpy", "--listen", "5678", &*script.to_string_lossy()]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("found {TOKEN}")),
        "stderr should report where the script was found: {stderr}"
    );
}

#[test]
fn user_base_overrides_home() {
    let temp = tempdir().expect("can create temp directory");
    let script = touch(&temp.path().join("userbase/bin").join(TOKEN));
    touch(&temp.path().join("home/.local/bin").join(TOKEN));

    let output = launcher(temp.path())
        .env("PYTHONUSERBASE", temp.path().join("userbase"))
        .args(["--dry-run", "--python", "python3", "--helpers"])
        .arg(temp.path().join("no-helpers"))
        .args(["--mode", "debugpy", "--", TOKEN])
        .output()
        .expect("launcher should run");
    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("dry run prints JSON");

    assert_eq!(strings(&plan["argv"])[3], script.to_string_lossy());
}

#[test]
fn unknown_token_is_launched_as_module() {
    let temp = tempdir().expect("can create temp directory");

    let (plan, _) = dry_run(temp.path(), &["--mode", "ptvsd", "--", TOKEN, "x"]);

    assert_eq!(
        strings(&plan["argv"]),
        ["ptvsd", "--host", "localhost", "--port", "5678", "-m", TOKEN, "x"]
    );
}
