//! End-to-end tests driving the `expenses` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("EXPENSE_TRACKER_URL")
        .env_remove("EXPENSE_TRACKER_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn about_shows_name_and_version() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Tracker"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_show_on_fresh_directory() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("URL:          (not set)"))
        .stdout(predicate::str::contains("Biometric:    off"));
}

#[test]
fn config_changes_are_persisted() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .args([
            "config",
            "set-backend",
            "--url",
            "https://demo.example.co/",
            "--api-key",
            "anon-public-key",
        ])
        .assert()
        .success();
    expenses(&dir)
        .args(["config", "biometric", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Biometric sign-in enabled"));

    assert!(dir.path().join("config.json").exists());
    expenses(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("URL:          https://demo.example.co"))
        .stdout(predicate::str::contains("****-key"))
        .stdout(predicate::str::contains("Biometric:    on"));
}

#[test]
fn commands_need_a_session() {
    let dir = TempDir::new().unwrap();
    for args in [
        vec!["expense", "list"],
        vec!["expense", "add", "Coffee", "4.50"],
        vec!["summary", "--name", "taxi"],
        vec!["profile", "show"],
    ] {
        expenses(&dir)
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"));
    }
}

#[test]
fn auth_status_and_logout_without_session() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
    expenses(&dir)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}

#[test]
fn invalid_biometric_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .args(["config", "biometric", "maybe"])
        .assert()
        .failure();
}
