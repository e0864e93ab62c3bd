//! End-to-end tests for the toedi-e2e binary
//!
//! These run the built binary without a browser or a Toedi server, so they
//! cover configuration, scenario loading, reporting, and exit codes. The
//! browser path itself is exercised against an in-memory page in the unit
//! tests.

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Test context with an isolated HOME / XDG config directory
struct TestContext {
    temp_dir: tempfile::TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file into the temp dir and return its path
    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Run the binary with the given arguments
    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_toedi-e2e"))
            .args(args)
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run toedi-e2e")
    }
}

/// A localhost URL nothing is listening on
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout))
}

#[test]
fn test_config_path_points_at_toml() {
    let ctx = TestContext::new();
    let output = ctx.run(&["config", "--path"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().ends_with("config.toml"), "got: {}", stdout);
}

#[cfg(target_os = "linux")]
#[test]
fn test_log_file_written_under_data_dir() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--log-file", "--verbose", "config", "--path"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let log = ctx
        .path()
        .join("data")
        .join("toedi-e2e")
        .join("logs")
        .join("toedi-e2e.log");
    assert!(log.is_file(), "missing {}", log.display());

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Writing log file"), "got: {}", contents);
    // Logs stay off stdout
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Writing log file"));
}

#[test]
fn test_config_shows_effective_values() {
    let ctx = TestContext::new();
    let config = ctx.write(
        "custom.toml",
        "[target]\nbase_url = \"http://127.0.0.1:9999/\"\n",
    );

    let output = ctx.run(&["config", "--config", config.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("base_url = \"http://127.0.0.1:9999/\""));
    assert!(stdout.contains("url = \"http://localhost:4444\""));
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let ctx = TestContext::new();
    let config = ctx.write("bad.toml", "[runner]\nretries = -1\n");

    let output = ctx.run(&["check", "--config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration file"), "got: {}", stderr);
}

#[test]
fn test_missing_scenario_reported_as_config_error() {
    let ctx = TestContext::new();
    let missing = ctx.path().join("missing.yaml");

    let output = ctx.run(&["test", missing.to_str().unwrap(), "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report[0]["passed"], false);
    assert_eq!(report[0]["failures"][0]["kind"], "ConfigError");
}

#[test]
fn test_scenario_without_goto_rejected() {
    let ctx = TestContext::new();
    let scenario = ctx.write(
        "early.yaml",
        "name: early\nsteps:\n  - action: expect_title\n    equals: Welcome to Toedi\n",
    );

    let output = ctx.run(&["test", scenario.to_str().unwrap(), "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    let message = report[0]["failures"][0]["message"].as_str().unwrap();
    assert!(message.contains("must start with a goto step"));
}

#[test]
fn test_check_without_webdriver_fails_with_session_error() {
    let ctx = TestContext::new();
    let webdriver = closed_port_url();

    let output = ctx.run(&["check", "--webdriver", &webdriver, "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report[0]["name"], "homepage has title and links to intro page");
    assert_eq!(report[0]["steps_run"], 0);
    assert_eq!(report[0]["failures"][0]["kind"], "SessionError");
}

#[test]
fn test_retries_reopen_session() {
    let ctx = TestContext::new();
    let webdriver = closed_port_url();

    let output = ctx.run(&["check", "--webdriver", &webdriver, "--retries", "2", "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report[0]["attempts"], 3);
}
