//! Drives the `gauge-rerun` binary against a throwaway project.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn gauge_rerun(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gauge-rerun"))
        .args(args)
        .env_remove("GAUGE_PROJECT_ROOT")
        .env_remove("RUST_LOG")
        .output()
        .expect("run gauge-rerun")
}

fn write_suite_result(root: &Path) -> std::path::PathBuf {
    let spec = root.join("specs").join("login.spec");
    let suite = serde_json::json!({
        "spec_results": [
            { "file_name": spec, "is_failed": true, "failed_scenario_indices": [3, 1] },
            { "file_name": root.join("specs").join("ok.spec"), "is_failed": false }
        ]
    });
    let path = root.join("suite.json");
    fs::write(&path, serde_json::to_vec_pretty(&suite).expect("encode")).expect("write suite");
    path
}

#[test]
fn record_then_rerun_lists_flags_and_failures() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    let suite = write_suite_result(root);
    let root_arg = root.to_str().expect("utf-8 temp path");
    let suite_arg = suite.to_str().expect("utf-8 suite path");

    let record = gauge_rerun(&[
        "record",
        "--project-root",
        root_arg,
        "--suite-result",
        suite_arg,
        "--flag",
        "tags=smoke",
        "--flag",
        "-env=ci",
    ]);
    assert!(
        record.status.success(),
        "record failed: {}",
        String::from_utf8_lossy(&record.stderr)
    );
    assert!(root.join(".gauge").join("failures.json").is_file());

    let rerun = gauge_rerun(&["rerun", "--project-root", root_arg, "--json"]);
    assert!(
        rerun.status.success(),
        "rerun failed: {}",
        String::from_utf8_lossy(&rerun.stderr)
    );
    let plan: serde_json::Value = serde_json::from_slice(&rerun.stdout).expect("plan JSON");
    let sep = std::path::MAIN_SEPARATOR;
    assert_eq!(plan["flags"]["-env"], "ci");
    assert_eq!(plan["flags"]["-tags"], "smoke");
    assert_eq!(
        plan["scenarios"],
        serde_json::json!([
            format!("specs{sep}login.spec:3"),
            format!("specs{sep}login.spec:1")
        ])
    );
}

#[test]
fn rerun_without_previous_run_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root_arg = temp.path().to_str().expect("utf-8 temp path");

    let rerun = gauge_rerun(&["rerun", "--project-root", root_arg]);

    assert!(!rerun.status.success());
    let stderr = String::from_utf8_lossy(&rerun.stderr);
    assert!(stderr.contains("read last run information"), "{stderr}");
}

#[test]
fn record_rejects_malformed_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    let suite = write_suite_result(root);

    let record = gauge_rerun(&[
        "record",
        "--project-root",
        root.to_str().expect("utf-8 temp path"),
        "--suite-result",
        suite.to_str().expect("utf-8 suite path"),
        "--flag",
        "no-equals-sign",
    ]);

    assert!(!record.status.success());
    assert!(!root.join(".gauge").exists());
}
