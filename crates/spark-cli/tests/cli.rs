//! Argument handling of the `spark` binary. None of these reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// A `spark` command isolated from the caller's environment and config.
fn spark(config: &tempfile::NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("spark").unwrap();
    cmd.env_remove("SPARK_API_URL")
        .env_remove("SPARK_API_TIMEOUT")
        .env_remove("SPARK_DEFAULT_ORG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config.path());
    cmd
}

fn empty_config() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().unwrap()
}

#[test]
fn test_help_lists_commands() {
    let config = empty_config();
    spark(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("receipt"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("reviewer"));
}

#[test]
fn test_invalid_donation_id_fails_before_network() {
    let config = empty_config();
    spark(&config)
        .args(["receipt", "email", "bad id!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid donation ID"));
}

#[test]
fn test_receipt_url_uses_api_url_flag() {
    let config = empty_config();
    spark(&config)
        .args(["receipt", "url", "TEST123", "--api-url", "http://example.test/"])
        .assert()
        .success()
        .stdout("http://example.test/api/v1/donations/TEST123/receipt.pdf\n");
}

#[test]
fn test_receipt_url_from_config_file() {
    let mut config = empty_config();
    writeln!(config, "[api]\nbase_url = \"https://donations.example.org\"").unwrap();

    spark(&config)
        .args(["--json", "receipt", "url", " DON-1 "])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://donations.example.org/api/v1/donations/DON-1/receipt.pdf",
        ))
        .stdout(predicate::str::contains(r#""donation_id": "DON-1""#));
}

#[test]
fn test_env_is_overridden_by_flag() {
    let config = empty_config();
    spark(&config)
        .env("SPARK_API_URL", "http://from-env.test")
        .args(["receipt", "url", "A1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("http://from-env.test/"));

    spark(&config)
        .env("SPARK_API_URL", "http://from-env.test")
        .args(["receipt", "url", "A1", "--api-url", "http://from-flag.test"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("http://from-flag.test/"));
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let config = empty_config();
    spark(&config)
        .args(["receipt", "url", "A1", "--api-url", "ftp://nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http:// or https://"));
}

#[test]
fn test_statement_year_is_validated() {
    let config = empty_config();
    spark(&config)
        .args(["statement", "download", "D1", "1800"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid year is required"));
}
