use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_protodoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Run on the fixture, tolerating the cyclic TreeService, and return stdout.
fn render(extra: &[&str]) -> String {
    let assert = cmd()
        .arg(fixture_path("api.html"))
        .args(["-o", "-", "--allow-errors"])
        .args(extra)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- end to end --

#[test]
fn full_document_matches_expected() {
    let output = render(&[]);
    let expected = std::fs::read_to_string(fixture_path("api.expected.md")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn get_user_section() {
    let output = render(&[]);

    assert!(output.starts_with("# OpenApi\n"));
    assert!(output.contains("## GetUser\n"));
    assert!(output.contains("Fetch a single user"));
    assert!(output.contains("- Path: `/v1/user`\n- Method: `GET`\n- Content-type: `application/json`"));
    assert!(output.contains("| id | int64 | - | Yes | user id |"));
    assert!(output.contains(concat!(
        "| data | Object | - | Yes | data |\n",
        "| data.name | string | - | No | user name |\n",
        "| code | int | - | Yes | 0: success, others see error-code reference |\n",
        "| message | string | - | Yes | response description |\n",
    )));
}

#[test]
fn nested_repeated_and_enum_fields() {
    let output = render(&[]);

    assert!(output.contains(concat!(
        "| data | Object | - | Yes | data |\n",
        "| data.total | int32 | - | No | total count |\n",
        "| data.users | Object Array | - | No | page of users |\n",
        "| data.users[].id | int64 | - | No | user id |\n",
        "| data.users[].role | Enum | - | No | access role |\n",
    )));
}

#[test]
fn methods_without_routes_are_dropped() {
    let output = render(&[]);
    assert!(!output.contains("## Internal"));
    let get_user = output.find("## GetUser").unwrap();
    let list_users = output.find("## ListUsers").unwrap();
    let get_tree = output.find("## GetTree").unwrap();
    assert!(get_user < list_users && list_users < get_tree);
}

#[test]
fn every_service_is_processed() {
    let output = render(&[]);
    assert!(output.contains("## GetTree"));
    assert!(output.contains("cyclic schema: api.tree.v1.TreeNode -> api.tree.v1.TreeNode"));
}

// -- failures --

#[test]
fn cyclic_schema_fails_run_but_writes_document() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api.md");

    cmd()
        .arg(fixture_path("api.html"))
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TreeService/GetTree (response): cyclic schema",
        ));

    let output = std::fs::read_to_string(out).unwrap();
    assert!(output.contains("## GetUser"));
}

#[test]
fn service_filter_skips_broken_service() {
    cmd()
        .arg(fixture_path("api.html"))
        .args(["-o", "-", "--service", "UserService"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## ListUsers"))
        .stdout(predicate::str::contains("## GetTree").not());
}

#[test]
fn missing_toc_is_fatal() {
    let mut input = NamedTempFile::with_suffix(".html").unwrap();
    input
        .write_all(b"<html><body><h3 id=\"a\">A</h3></body></html>")
        .unwrap();

    cmd()
        .arg(input.path())
        .args(["-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("table of contents"));
}

#[test]
fn missing_input_fails() {
    cmd()
        .arg("does-not-exist.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read does-not-exist.html"));
}

// -- options --

#[test]
fn zh_locale() {
    let output = render(&["--lang", "zh"]);
    assert!(output.contains("| 参数 | 类型 | 长度 | 是否必须 | 描述 |"));
    assert!(output.contains("| data | Object | - | 是 | 数据 |"));
    assert!(output.contains("### 4. 响应参数"));
}

#[test]
fn status_rows_first() {
    let output = render(&["--status-rows", "first", "--service", "UserService"]);
    assert!(output.contains(concat!(
        "| message | string | - | Yes | response description |\n",
        "| data | Object | - | Yes | data |\n",
    )));
}

#[test]
fn default_output_follows_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg(fixture_path("api.html"))
        .args(["-f", "html", "--allow-errors"])
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("output.html")).unwrap();
    assert!(output.contains("<!DOCTYPE html>"));
    assert!(output.contains("<td>data.name</td>"));
}

#[test]
fn json_format() {
    let output = render(&["-f", "json"]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let sections = value["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0]["method"]["http_path"], "/v1/user");
    assert!(sections[2]["response"]["error"]
        .as_str()
        .unwrap()
        .contains("cyclic schema"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .arg(fixture_path("api.html"))
        .args(["-f", "docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
