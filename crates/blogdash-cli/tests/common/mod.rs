#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Run the CLI with an isolated HOME so settings never leak between tests.
///
/// `service` is passed through `BLOGDASH_SERVICE` when given.
pub fn run_cli_with_env(args: &[&str], home: &Path, service: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_blogdash"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("BLOGDASH_TIMEOUT_SECS");
    cmd.env_remove("RUST_LOG");
    match service {
        Some(url) => cmd.env("BLOGDASH_SERVICE", url),
        None => cmd.env_remove("BLOGDASH_SERVICE"),
    };
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, service: Option<&str>) -> String {
    let output = run_cli_with_env(args, home, service);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and parse its stdout as JSON.
pub fn run_cli_json(args: &[&str], home: &Path, service: Option<&str>) -> Value {
    let stdout = run_cli_with_env_success(args, home, service);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Bad JSON ({e}): {stdout}"))
}

/// Seven posts: alice wrote 1, 2 and 4; bob wrote 3, 5, 6 and 7.
pub fn seven_posts() -> Value {
    let authors = ["alice", "alice", "bob", "alice", "bob", "bob", "bob"];
    let posts: Vec<Value> = authors
        .iter()
        .enumerate()
        .map(|(i, author)| {
            json!({
                "id": i + 1,
                "title": format!("Post {}", i + 1),
                "author": author,
                "createdAt": format!("2024-03-0{}T10:00:00.000Z", i + 1),
                "views": (i + 1) * 10,
            })
        })
        .collect();
    json!({ "posts": posts })
}

/// Write a json-server style db.json into `dir`.
pub fn write_db(dir: &Path, db: &Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("db.json"), serde_json::to_string_pretty(db).unwrap()).unwrap();
}

pub fn read_db(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("db.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// Post ids on the JSON page, as strings.
pub fn page_ids(page: &Value) -> Vec<String> {
    page["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].to_string())
        .collect()
}
