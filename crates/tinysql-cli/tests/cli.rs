//! End-to-end tests of the `tinysql` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn tinysql(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tinysql"));
    command.args(args).env_remove("TINYSQL_DIALECT");
    command
}

fn run_on(path: &Path, args: &[&str]) -> Output {
    tinysql(args).arg(path).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn clean_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ok.sql", "USE db;\nSELECT * FROM t;");
    let output = run_on(&path, &[]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("AST:"));
    assert!(text.contains("\"kind\": \"select\""));
}

#[test]
fn errors_exit_one() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.sql", "SELECT * WHERE id > 42");
    let output = run_on(&path, &["--format", "lint"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        format!(
            "{}:1:9: error: Unexpected input 'WHERE', expected FROM clause\n",
            path.display()
        )
    );
}

#[test]
fn missing_file_exits_two() {
    let dir = TempDir::new().unwrap();
    let output = run_on(&dir.path().join("missing.sql"), &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.sql"));
}

#[test]
fn json_format_one_document_per_file() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "a.sql", "USE db");
    let second = write_file(&dir, "b.sql", "select * from t");
    let output = tinysql(&["--format", "json"])
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let documents: Vec<Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["commands"][0]["database"], "db");
    assert!(documents[0]["commands"][0].get("location").is_none());
    assert_eq!(documents[1]["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn locations_flag_keeps_locations() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.sql", "USE db");
    let output = run_on(&path, &["--format", "json", "--locations"]);
    let document: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(document["commands"][0]["location"]["to"]["column"], 6);
    assert_eq!(document["tokens"][1]["location"]["from"]["column"], 4);
}

#[test]
fn dialect_from_flag_and_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "q.sql", "SELECT * FROM \"t\"");

    let output = run_on(&path, &["--format", "lint"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_on(&path, &["--format", "lint", "--dialect", "ansi-quotes"]);
    assert_eq!(output.status.code(), Some(0));

    let output = tinysql(&["--format", "lint"])
        .env("TINYSQL_DIALECT", "ansi-quotes")
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn reads_standard_input() {
    let mut child = tinysql(&["--format", "lint", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"delete from t")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "<stdin>:1:0: warning: Style: Keywords should be written in ALLCAPS\n\
         <stdin>:1:7: warning: Style: Keywords should be written in ALLCAPS\n"
    );
}
