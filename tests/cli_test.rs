//! Integration tests for the clustergate binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn serve_version(server: &MockServer, version: &str) {
    let body = format!(r#"{{"version":{{"number":"{}"}}}}"#, version);
    server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .query_param("filter_path", "version.number");
        then.status(200).body(body.as_str());
    });
}

fn clustergate() -> Command {
    let mut cmd = Command::new(cargo_bin("clustergate"));
    cmd.env_remove("CLUSTERGATE_HOST")
        .env_remove("CLUSTERGATE_MINIMUM_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    clustergate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("minimum version"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    clustergate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn check_supported_cluster_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_version(&server, "7.3.1");

    let host = server.base_url();

    clustergate()
        .args(["check", "--host", host.as_str(), "--minimum-version", "6.3.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("supports minimum version 6.3.0"));
    Ok(())
}

#[test]
fn check_old_cluster_exits_one_and_logs_error() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_version(&server, "5.9.9");
    let host = server.base_url();

    clustergate()
        .args([
            "check",
            "--host",
            host.as_str(),
            "--minimum-version",
            "6.3.0",
            "--name",
            "monitoring",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NOT supported for [monitoring]"));
    Ok(())
}

#[test]
fn check_unreachable_cluster_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let host = format!("http://127.0.0.1:{}", port);

    clustergate()
        .args([
            "check",
            "--host",
            host.as_str(),
            "--minimum-version",
            "6.3.0",
            "--timeout",
            "2",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to verify minimum version"));
    Ok(())
}

#[test]
fn check_without_minimum_version_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    clustergate()
        .args(["check", "--host", "http://localhost:9200"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("minimum version is required"));
    Ok(())
}

#[test]
fn missing_config_file_reports_context_and_cause() -> Result<(), Box<dyn std::error::Error>> {
    clustergate()
        .args(["check", "--config", "/nonexistent/clustergate.yml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unable to run the version check"))
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn check_reads_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_version(&server, "6.3.0");

    let temp = TempDir::new()?;
    let path = temp.path().join("clustergate.yml");
    fs::write(
        &path,
        format!(
            "name: monitoring\nhost: {}\nminimum_version: 6.3.0\n",
            server.base_url()
        ),
    )?;

    clustergate()
        .args(["check", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""supported":true"#));
    Ok(())
}

#[test]
fn check_reads_environment() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve_version(&server, "7.0.0");

    clustergate()
        .env("CLUSTERGATE_HOST", server.base_url())
        .env("CLUSTERGATE_MINIMUM_VERSION", "7.1.0")
        .arg("check")
        .assert()
        .code(1);
    Ok(())
}
