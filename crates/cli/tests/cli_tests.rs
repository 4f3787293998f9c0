//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("hamus").unwrap()
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_requires_url() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_offline_text_output() {
    cmd()
        .args(["--offline", "http://www.example.com/login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nb_www"))
        .stdout(predicate::str::contains("length_url"))
        .stdout(predicate::str::contains("tld_in_subdomain"));
}

#[test]
fn test_cli_offline_json_output() {
    let output = cmd()
        .args(["--offline", "-f", "json", "http://www.example.com/login?id=1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["url"], "http://www.example.com/login?id=1");
    assert_eq!(report["vector"].as_array().unwrap().len(), 20);
    assert_eq!(report["features"]["page_rank"], -1.0);
    assert_eq!(report["features"]["domain_age"], -1.0);
    assert!(report["prediction"].is_null());
}

#[test]
fn test_cli_offline_with_model() {
    let output = cmd()
        .args([
            "--offline",
            "-f",
            "json",
            "-m",
            &get_fixture_path("model_small.json"),
            "http://192.168.1.1/admin",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let prediction = report["prediction"].as_array().unwrap();
    assert_eq!(prediction.len(), 1);
    assert_eq!(report["features"]["ip_literal"], 1.0);
}

#[test]
fn test_cli_text_output_with_model() {
    cmd()
        .args([
            "--offline",
            "-m",
            &get_fixture_path("model_small.json"),
            "http://www.example.com/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("prediction"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.json");

    cmd()
        .args(["--offline", "-f", "json", "-o", output.to_str().unwrap()])
        .arg("http://www.example.com/")
        .assert()
        .success();

    assert!(output.exists());
    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["vector"].as_array().unwrap().len(), 20);
}

#[test]
fn test_cli_missing_model_fails() {
    cmd()
        .args(["--offline", "-m", "/nonexistent/model.json", "http://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load model"));
}

#[test]
fn test_cli_invalid_format_fails() {
    cmd()
        .args(["--offline", "-f", "yaml", "http://example.com/"])
        .assert()
        .failure();
}

#[test]
fn test_cli_verbose_logs_steps() {
    cmd()
        .args(["--offline", "-v", "http://www.example.com/"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracting features"));
}
