//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("quarry")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_default_mode_is_text() {
    cmd()
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Granite is a coarse-grained intrusive igneous rock."))
        .stdout(predicate::str::contains("trackPageView").not())
        .stdout(predicate::str::contains("<").not());
}

#[test]
fn test_cli_html_mode() {
    cmd()
        .args(["-m", "html", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("<script"));
}

#[test]
fn test_cli_headings_mode() {
    cmd()
        .args(["--mode", "headings", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout("Field Notes on Granite\nQuarrying\nSite Navigation\nComposition\n");
}

#[test]
fn test_cli_numeric_mode() {
    cmd()
        .args(["-m", "4", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout("/\n/archive\nhttps://en.wikipedia.org/wiki/Granite\n");
}

#[test]
fn test_cli_quotes_mode() {
    cmd()
        .args(["-m", "quotes", &get_fixture_path("quotes.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("by Albert Einstein"))
        .stdout(predicate::str::contains("tags: abilities, choices"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-m", "quotes", "-f", "json", &get_fixture_path("quotes.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[1]["author"], "J.K. Rowling");
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("quotes.html")).unwrap();
    cmd()
        .args(["-m", "headings", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout("Quotes to Scrape\nTop Ten tags\n");
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("links.txt");

    cmd()
        .args(["-m", "links", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("/archive"));
}

#[test]
fn test_cli_invalid_mode() {
    cmd()
        .args(["-m", "tables", &get_fixture_path("article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid extraction mode: tables"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_empty_content() {
    cmd()
        .args(["-m", "links", &get_fixture_path("empty_content.html")])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_cli_malformed_html() {
    cmd()
        .args(["-m", "quotes", &get_fixture_path("malformed_html.html")])
        .assert()
        .success();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Quarry"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_url_input() {
    let server = MockServer::start().await;
    let html = std::fs::read_to_string(get_fixture_path("quotes.html")).unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let url = server.uri();
    let output = tokio::task::spawn_blocking(move || cmd().args(["-m", "quotes", "-f", "json", &url]).output())
        .await
        .unwrap()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["result_data"][0]["author"], "Albert Einstein");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_url_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let output = tokio::task::spawn_blocking(move || cmd().args(["-f", "json", &url]).output())
        .await
        .unwrap()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["status_code"], 404);
    assert_eq!(json["error_message"], "HTTP 404: Unable to fetch the webpage");
    assert!(json["result_data"].is_null());
}

#[test]
fn test_cli_unsupported_scheme_is_rejected_as_url() {
    let output = cmd().args(["-f", "json", "ftp://example.com/file.html"]).output().unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["status_code"], 0);
    assert!(json["error_message"].as_str().unwrap().starts_with("Invalid URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_uppercase_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Upper</h1>"))
        .mount(&server)
        .await;

    let url = server.uri().replacen("http://", "HTTP://", 1);
    let output = tokio::task::spawn_blocking(move || cmd().args(["-m", "headings", &url]).output())
        .await
        .unwrap()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Upper\n");
}
