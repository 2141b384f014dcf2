//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("citeloc")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_content_file_input() {
    cmd()
        .args(["content", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Seven World Trade Center fully leased"))
        .stdout(predicate::str::contains("Search").not());
}

#[test]
fn test_cli_content_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd()
        .args(["content", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Paul Barretto"));
}

#[test]
fn test_cli_content_standardized() {
    cmd()
        .args(["content", "--standardize", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("seven world trade center fully leased"))
        .stdout(predicate::str::contains("renee dupre"));
}

#[test]
fn test_cli_content_without_headings() {
    cmd()
        .args(["content", "-"])
        .write_stdin("<html><body><p>Just one paragraph.</p></body></html>")
        .assert()
        .success()
        .stdout(predicate::str::contains("Just one paragraph."));
}

#[test]
fn test_cli_content_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("content.md");

    cmd()
        .args(["content", "-o", output.to_str().unwrap(), &get_fixture_path("article.html")])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Seven World Trade Center"));
}

#[test]
fn test_cli_locate_json() {
    let output = cmd()
        .args([
            "locate",
            &get_fixture_path("article.html"),
            "--title",
            "Seven World Trade Center fully leased",
            "--author",
            "Paul Barretto",
            "--author",
            "Renée Dupré",
            "--date",
            "September 19, 2011",
            "--publisher",
            "The Atlantic",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let locations = &json["locations"];

    assert_eq!(locations["title"][0], 0);
    assert_eq!(locations["authors"].as_array().unwrap().len(), 2);
    assert!(locations["date"][0].as_i64().unwrap() > 0);
    assert_eq!(locations["publisher"], serde_json::json!([-1, -1]));
    assert!(json["content_start"].as_u64().is_some());
}

#[test]
fn test_cli_locate_text() {
    cmd()
        .args(["locate", "-f", "text", "--date", "09/19/11", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"september 19 2011\""));
}

#[test]
fn test_cli_locate_invalid_format() {
    cmd()
        .args(["locate", "-f", "yaml", &get_fixture_path("article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_evaluate_with_pages() {
    cmd()
        .args([
            "evaluate",
            &get_fixture_path("records.json"),
            "--pages",
            &get_fixture_path("pages"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average accuracy: 1.000"))
        .stdout(predicate::str::contains("Accuracy: 1.000 (1 / 1 titles)"));
}

#[test]
fn test_cli_evaluate_json() {
    let output = cmd()
        .args([
            "evaluate",
            "-f",
            "json",
            &get_fixture_path("records.json"),
            "--pages",
            &get_fixture_path("pages"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data_preservation"]["fields"]["authors"]["found"], 2);
    assert_eq!(json["content_start"]["valid"], 1);
}

#[test]
fn test_cli_collect_records_bad_links() {
    let tmp = TempDir::new().unwrap();
    let records = tmp.path().join("records.json");
    let output = tmp.path().join("collected.json");
    std::fs::write(&records, r#"[{"url": "not a url", "title": "Nothing"}]"#).unwrap();

    cmd()
        .args(["collect", "-w", "2", "-o", output.to_str().unwrap(), records.to_str().unwrap()])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["bad_links"], serde_json::json!(["not a url"]));
    assert_eq!(json["documents"], serde_json::json!([]));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .args(["content", "nonexistent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_malformed_records() {
    let tmp = TempDir::new().unwrap();
    let records = tmp.path().join("records.json");
    std::fs::write(&records, "{not json").unwrap();

    cmd().args(["evaluate", records.to_str().unwrap()]).assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "content", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Citeloc"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("citeloc"));
}
