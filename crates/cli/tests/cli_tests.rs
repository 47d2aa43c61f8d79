//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("seoscope")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee Roasting Basics"))
        .stdout(predicate::str::contains("Analyzed File:"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd()
        .arg("-")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Section: Storage"));
}

#[test]
fn test_cli_direct_text() {
    cmd()
        .args(["--text", "Short test."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untitled"))
        .stdout(predicate::str::contains("Word Count: 2"))
        .stdout(predicate::str::contains("Analyzed Input: Direct Text"));
}

#[test]
fn test_cli_direct_text_from_stdin() {
    cmd()
        .args(["--text", "-"])
        .write_stdin("Plain words piped in from another program.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Word Count: 7"));
}

#[test]
fn test_cli_text_format_lists_recommendations() {
    cmd()
        .args(["-f", "text", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommendations"))
        .stdout(predicate::str::contains("Increase word count to at least 300"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd().args(["-f", "json", &get_fixture_path("tabs.html")]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Example");
    assert_eq!(value["source"]["kind"], "file");
    assert_eq!(value["sections"][0]["label"], "Pricing");
    assert_eq!(value["sections"][0]["word_count"], 25);
}

#[test]
fn test_cli_top_limits_keywords() {
    let output = cmd().args(["-f", "json", "--top", "3", &get_fixture_path("article.html")]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["top_keywords_freq"].as_array().unwrap().len() <= 3);
    assert!(value["top_keywords_tfidf"].as_array().unwrap().len() <= 3);
}

#[test]
fn test_cli_pdf_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("report.pdf");

    cmd()
        .args(["-f", "pdf", "-o", output_path.to_str().unwrap(), &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let bytes = std::fs::read(&output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_cli_pdf_default_path() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = std::fs::canonicalize(get_fixture_path("tabs.html")).unwrap();

    cmd()
        .current_dir(temp_dir.path())
        .args(["-f", "pdf", fixture.to_str().unwrap()])
        .assert()
        .success();

    assert!(temp_dir.path().join("seoscope_report.pdf").exists());
}

#[test]
fn test_cli_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.txt");

    cmd()
        .args(["-o", output_path.to_str().unwrap(), &get_fixture_path("article.html")])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("Readability Score"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "markdown", &get_fixture_path("article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .arg("does-not-exist.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_unreachable_url_degrades() {
    cmd()
        .args(["--timeout", "2", "http://127.0.0.1:9/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Website could not be found."));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("tabs.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("seoscope"))
        .stderr(predicate::str::contains("Analysis Details"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SEO and readability"));
}
