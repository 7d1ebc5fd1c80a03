//! CLI integration tests against a file-backed db.json.

mod common;

use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;
use url::Url;

use common::{
    page_ids, read_db, run_cli_json, run_cli_with_env, run_cli_with_env_success, seven_posts,
    write_db,
};

struct Fixture {
    _temp: TempDir,
    home: PathBuf,
    db_dir: PathBuf,
    url: String,
}

fn file_service_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

fn fixture(db: serde_json::Value) -> Fixture {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let db_dir = temp.path().join("server");
    write_db(&db_dir, &db);
    let url = file_service_url(&db_dir);
    Fixture {
        _temp: temp,
        home,
        db_dir,
        url,
    }
}

#[test]
fn test_analytics_json() {
    let fx = fixture(seven_posts());

    let view = run_cli_json(&["analytics", "--json"], &fx.home, Some(&fx.url));

    assert_eq!(view["total"], 7);
    assert_eq!(
        view["buckets"],
        json!([
            { "name": "alice", "count": 3, "color": "#0088FE" },
            { "name": "bob", "count": 4, "color": "#00C49F" },
        ])
    );
    assert_eq!(page_ids(&view["page"]), ["1", "2", "3", "4", "5"]);
    assert_eq!(view["page"]["state"]["totalPages"], 2);
    assert_eq!(view["page"]["state"]["currentPage"], 1);
}

#[test]
fn test_analytics_text() {
    let fx = fixture(seven_posts());

    let stdout = run_cli_with_env_success(&["analytics"], &fx.home, Some(&fx.url));

    assert!(stdout.contains("Posts per author (7 posts)"));
    assert!(stdout.contains("alice"));
    assert!(stdout.contains("57.1%"));
    assert!(stdout.contains("2024-03-01"));
    assert!(stdout.contains("Page 1 of 2"));
}

#[test]
fn test_posts_second_page() {
    let fx = fixture(seven_posts());

    let page = run_cli_json(&["posts", "--page", "2", "--json"], &fx.home, Some(&fx.url));

    assert_eq!(page_ids(&page), ["6", "7"]);
    assert_eq!(page["state"]["currentPage"], 2);
    // Unknown fields survive the round trip.
    assert_eq!(page["posts"][0]["views"], 60);
}

#[test]
fn test_out_of_range_page_is_ignored() {
    let fx = fixture(seven_posts());

    let output = run_cli_with_env(&["posts", "--page", "9", "--json"], &fx.home, Some(&fx.url));

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"), "{stderr}");
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["state"]["currentPage"], 1);
}

#[test]
fn test_authors_group_unknown() {
    let fx = fixture(json!({
        "posts": [
            { "id": 1, "title": "a" },
            { "id": 2, "title": "b", "author": "carol" },
            { "id": "x3", "title": "c", "author": "" },
        ]
    }));

    let buckets = run_cli_json(&["authors", "--json"], &fx.home, Some(&fx.url));

    assert_eq!(buckets[0]["name"], "Unknown");
    assert_eq!(buckets[0]["count"], 2);
    assert_eq!(buckets[1]["name"], "carol");
}

#[test]
fn test_empty_collection() {
    let fx = fixture(json!({ "posts": [] }));

    let stdout = run_cli_with_env_success(&["posts"], &fx.home, Some(&fx.url));

    assert!(stdout.contains("No posts found"));
    assert!(!stdout.contains("Page 1 of"));
}

#[test]
fn test_delete_from_last_page() {
    let fx = fixture(seven_posts());

    let view = run_cli_json(
        &["delete", "6", "--page", "2", "--json"],
        &fx.home,
        Some(&fx.url),
    );

    assert_eq!(view["total"], 6);
    assert_eq!(view["buckets"][1], json!({ "name": "bob", "count": 3, "color": "#00C49F" }));
    assert_eq!(page_ids(&view["page"]), ["7"]);
    assert_eq!(view["page"]["state"]["currentPage"], 2);

    let db = read_db(&fx.db_dir);
    let ids: Vec<_> = db["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 7]);
    assert_eq!(db["posts"][5]["views"], 70);
}

#[test]
fn test_delete_clamps_cursor() {
    let mut db = seven_posts();
    db["posts"].as_array_mut().unwrap().pop();
    let fx = fixture(db);

    let view = run_cli_json(
        &["delete", "6", "--page", "2", "--json"],
        &fx.home,
        Some(&fx.url),
    );

    assert_eq!(view["page"]["state"]["totalPages"], 1);
    assert_eq!(view["page"]["state"]["currentPage"], 1);
    assert_eq!(page_ids(&view["page"]), ["1", "2", "3", "4", "5"]);
}

#[test]
fn test_delete_missing_post_fails() {
    let fx = fixture(seven_posts());

    let output = run_cli_with_env(&["delete", "42"], &fx.home, Some(&fx.url));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to delete post 42"), "{stderr}");
    assert_eq!(read_db(&fx.db_dir), seven_posts());
}

#[test]
fn test_edit_request() {
    let fx = fixture(seven_posts());

    let stdout = run_cli_with_env_success(&["edit", "3"], &fx.home, Some(&fx.url));

    assert!(stdout.contains("Edit requested for post 3"));
    assert!(stdout.contains("Post 3"));
    assert_eq!(read_db(&fx.db_dir), seven_posts());
}

#[test]
fn test_config_set_show_clear() {
    let fx = fixture(seven_posts());

    let stdout = run_cli_with_env_success(
        &["config", "set", "--service", &fx.url, "--timeout-secs", "3"],
        &fx.home,
        None,
    );
    assert!(stdout.contains("Settings saved"));

    // Saved settings are used when no flag or env var is given.
    let view = run_cli_json(&["analytics", "--json"], &fx.home, None);
    assert_eq!(view["total"], 7);

    let shown = run_cli_with_env_success(&["config", "show"], &fx.home, None);
    assert!(shown.contains("settings file"));
    assert!(shown.contains("3s"));

    let cleared = run_cli_with_env_success(&["config", "clear"], &fx.home, None);
    assert!(cleared.contains("Settings cleared"));

    let shown = run_cli_with_env_success(&["config", "show"], &fx.home, None);
    assert!(shown.contains("http://localhost:3000/ (default)"));
}

#[test]
fn test_env_overrides_settings() {
    let fx = fixture(seven_posts());
    let other = fixture(json!({ "posts": [{ "id": 1, "title": "only" }] }));

    run_cli_with_env_success(&["config", "set", "--service", &other.url], &fx.home, None);

    let view = run_cli_json(&["analytics", "--json"], &fx.home, Some(&fx.url));
    assert_eq!(view["total"], 7);
}

#[test]
fn test_invalid_service_url() {
    let temp = TempDir::new().unwrap();

    let output = run_cli_with_env(&["analytics"], temp.path(), Some("ftp://example.com"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid service URL"), "{stderr}");
}

#[test]
fn test_failed_load_renders_empty_view() {
    let fx = fixture(json!({ "posts": { "not": "a list" } }));

    let output = run_cli_with_env(&["analytics"], &fx.home, Some(&fx.url));

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Posts per author (0 posts)"), "{stdout}");
    assert!(stdout.contains("No posts found"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load posts"), "{stderr}");
    assert!(stderr.contains("malformed payload"), "{stderr}");
}

#[test]
fn test_failed_load_json_is_empty_page() {
    let fx = fixture(json!({ "posts": 42 }));

    let output = run_cli_with_env(&["posts", "--json"], &fx.home, Some(&fx.url));

    assert!(!output.status.success());
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["posts"], json!([]));
    assert_eq!(page["state"]["totalPages"], 0);
}

#[test]
fn test_delete_rejects_dot_segment_id() {
    let fx = fixture(seven_posts());

    let output = run_cli_with_env(&["delete", ".."], &fx.home, Some(&fx.url));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid post id"), "{stderr}");
    assert_eq!(read_db(&fx.db_dir), seven_posts());
}
