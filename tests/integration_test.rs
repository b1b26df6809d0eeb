//! Integration tests for the port-search CLI

use std::process::Command;

fn cargo_run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--bin", "port-search", "--"])
        .args(args)
        .output()
        .expect("Failed to run command")
}

#[test]
fn test_cli_help() {
    let output = cargo_run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("schema"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = cargo_run(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port-search"));
}

#[test]
fn test_run_help() {
    let output = cargo_run(&["run", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--adapter"));
    assert!(stdout.contains("--keep-going"));
}

#[test]
fn test_schema_lists_operations() {
    let output = cargo_run(&["schema"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for op in [
        "createIndex",
        "deleteIndex",
        "indexDoc",
        "updateDoc",
        "getDoc",
        "removeDoc",
        "query",
    ] {
        assert!(stdout.contains(op), "missing {}", op);
    }
    assert!(stdout.contains("query({index: string, q: any}) -> promise<{ok: boolean, matches: array<any>}>"));
}

#[test]
fn test_schema_json() {
    let output = cargo_run(&["schema", "--json"]);
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["operations"].as_array().unwrap().len(), 7);
    assert_eq!(schema["operations"][4]["operation"], "getDoc");
}

fn write_script(name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("port-search-{}-{}.jsonl", name, std::process::id()));
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn test_run_script_against_memory_adapter() {
    let script = write_script(
        "ok",
        &[
            r#"{"op": "createIndex", "args": {"index": "books", "mappings": {}}}"#,
            r#"{"op": "indexDoc", "args": {"index": "books", "key": "42", "doc": {"title": "Dune"}}}"#,
            r#"{"op": "getDoc", "args": {"index": "books", "key": "42"}}"#,
            r#"{"op": "removeDoc", "args": {"index": "books", "key": "7"}}"#,
        ],
    );
    let output = cargo_run(&["run", "--adapter", "memory", script.to_str().unwrap()]);
    std::fs::remove_file(&script).unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"getDoc {"doc":{"title":"Dune"},"key":"42","ok":true}"#));
    // Business failures are reported, not fatal
    assert!(stdout.contains(r#"removeDoc {"msg":"document '7' not found in 'books'","ok":false}"#));
}

#[test]
fn test_run_script_aborts_on_invalid_arguments() {
    let script = write_script(
        "bad",
        &[
            r#"{"op": "getDoc", "args": {"index": 123, "key": "k"}}"#,
            r#"{"op": "deleteIndex", "args": "books"}"#,
        ],
    );
    let output = cargo_run(&["run", "--adapter", "memory", script.to_str().unwrap()]);
    std::fs::remove_file(&script).unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("deleteIndex"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid arguments for 'getDoc'"));
}
