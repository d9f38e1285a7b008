use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn letterbox(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("letterbox").unwrap();
    cmd.env("LETTERBOX_PATH", data_dir.path());
    cmd.env_remove("LETTERBOX_LOG");
    cmd
}

#[test]
fn test_help_mentions_environment() {
    let data = TempDir::new().unwrap();
    letterbox(&data)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LETTERBOX_PATH"))
        .stdout(predicate::str::contains("LETTERBOX_LOG"));
}

#[test]
fn test_version_prints_package_version() {
    let data = TempDir::new().unwrap();
    letterbox(&data)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_positional_arguments() {
    let data = TempDir::new().unwrap();
    letterbox(&data).arg("search").assert().failure();
}

#[test]
fn test_refuses_to_run_without_a_terminal() {
    let data = TempDir::new().unwrap();
    letterbox(&data)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("interactive terminal"));

    // No session started, so no log file either.
    assert!(!data.path().join("logs").exists());
}

#[test]
fn test_broken_config_is_reported() {
    let data = TempDir::new().unwrap();
    std::fs::write(data.path().join("config.toml"), "tick_rate_ms = \"fast\"").unwrap();

    letterbox(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}
