use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const BIN: &str = env!("CARGO_BIN_EXE_select_quiz_section");
const OHMS_LESSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ohms_law.md");

fn command() -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_remove("QUIZ_MAX_DOCUMENT_BYTES")
        .env_remove("QUIZ_QUALITY_THRESHOLD")
        .env("QUIZ_LOG_FORMAT", "structured")
        .env("RUST_LOG", "warn");
    cmd
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn selects_section_from_lesson_file() {
    let output = command()
        .args(["--lesson", OHMS_LESSON, "--current", "ohms-law", "--seed", "1"])
        .output()
        .expect("run binary");
    let json = stdout_json(&output);

    assert_eq!(json["selected"]["id"], "ohms-law");
    assert_eq!(json["scope"]["mode"], "up_to");
    assert_eq!(json["parsed"], 3);
    assert_eq!(json["scored"].as_array().map(Vec::len), Some(2));
}

#[test]
fn reads_lesson_from_stdin() {
    let mut child = command()
        .args(["--lesson", "-", "--seed", "3"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"## Only\nshort body\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait binary");
    let json = stdout_json(&output);

    assert_eq!(json["scope"]["mode"], "review");
    assert_eq!(json["strategy"], "best_effort");
    assert_eq!(json["selected"]["id"], "only");
}

#[test]
fn lesson_path_from_tempdir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.md");
    std::fs::write(&path, "# Title only\n\nNo sections here.\n").expect("write lesson");

    let output = command()
        .arg("--lesson")
        .arg(&path)
        .output()
        .expect("run binary");
    let json = stdout_json(&output);

    assert_eq!(json["parsed"], 0);
    assert!(json["selected"].is_null());
}

#[test]
fn unknown_argument_fails() {
    let output = command().arg("--bogus").output().expect("run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown argument"));
}

#[test]
fn oversized_lesson_fails() {
    let output = command()
        .env("QUIZ_MAX_DOCUMENT_BYTES", "16")
        .args(["--lesson", OHMS_LESSON])
        .output()
        .expect("run binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
