use assert_cmd::Command;
use predicates::prelude::*;

/// Top-level help lists every resource family.
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("site"))
        .stdout(predicate::str::contains("certreq"))
        .stdout(predicate::str::contains("credential"))
        .stdout(predicate::str::contains("backend"))
        .stdout(predicate::str::contains("vclconf"))
        .stdout(predicate::str::contains("ipranges"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgeflow"));
}

/// Site creation exposes the caller-configurable verification budget.
#[test]
fn test_site_create_help() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.args(["site", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("DOMAIN"));
}

/// Certificate request creation takes repeatable --domain flags.
#[test]
fn test_certreq_dns_create_help() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.args(["certreq", "dns", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--domain"))
        .stdout(predicate::str::contains("--credential"));
}

#[test]
fn test_certreq_http_create_help() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.args(["certreq", "http", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--domain"))
        .stdout(predicate::str::contains("--standalone"));
}

/// Authenticated commands refuse to run without credentials.
#[test]
fn test_missing_credentials_fail_fast() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.args(["site", "list"])
        .env_remove("EDGEFLOW_COMPANY_ID")
        .env_remove("EDGEFLOW_CLIENT_ID")
        .env_remove("EDGEFLOW_CLIENT_SECRET")
        .assert()
        .failure()
        .stderr(predicate::str::contains("company id"));
}

#[test]
fn test_backend_create_help() {
    let mut cmd = Command::cargo_bin("edgeflow").unwrap();
    cmd.args(["backend", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ORIGIN"))
        .stdout(predicate::str::contains("--staging"));
}
