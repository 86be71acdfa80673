//! End-to-end tests for the `cuedeck` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cuedeck() -> Command {
    let mut cmd = Command::cargo_bin("cuedeck").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn name_from_cue() {
    cuedeck()
        .args([
            "name",
            "lesson1.mp4",
            "--ext",
            "jpg",
            "--at",
            "62",
            "--caption",
            "Hello/World:!",
        ])
        .assert()
        .success()
        .stdout("lesson1_01-02_Hello_World__.jpg\n");
}

#[test]
fn name_rejects_bad_time() {
    cuedeck()
        .args(["name", "clip", "--ext", "wav", "--at", "1:xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cue time"));
}

#[test]
fn time_parse_subtitle_timestamp() {
    cuedeck()
        .args(["time", "parse", "01:02,250"])
        .assert()
        .success()
        .stdout("62.25\n");
}

#[test]
fn time_display_and_token() {
    cuedeck()
        .args(["time", "display", "3661"])
        .assert()
        .success()
        .stdout("01:01:01\n");

    cuedeck()
        .args(["time", "token", "61.9"])
        .assert()
        .success()
        .stdout("01-01\n");
}

#[test]
fn time_display_rejects_negative() {
    cuedeck()
        .args(["time", "display", "--", "-5"])
        .assert()
        .failure();
}

#[test]
fn mock_decks() {
    cuedeck()
        .args(["--mock", "decks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Japanese::Mining"))
        .stdout(predicate::str::contains("Spanish::Vocab"));
}

#[test]
fn mock_status() {
    cuedeck()
        .args(["--mock", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONNECTED"))
        .stdout(predicate::str::contains("Decks:    3"));
}

#[test]
fn mock_status_json() {
    cuedeck()
        .args(["--mock", "status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_connected\": true"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    cuedeck()
        .arg("--config")
        .arg(&path)
        .args(["--mock", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn config_file_endpoint_is_used() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[flashcards]\nendpoint = \"http://127.0.0.1:9999\"\n\n[logging]\nfilter = \"error\""
    )
    .unwrap();

    cuedeck()
        .arg("--config")
        .arg(file.path())
        .args(["--mock", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9999"));
}

#[test]
fn endpoint_flag_overrides_config() {
    cuedeck()
        .args(["--mock", "--endpoint", "http://localhost:1234", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:1234"));
}

#[test]
fn watch_exits_when_polling_disabled() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[poll]\nenabled = false").unwrap();

    cuedeck()
        .arg("--config")
        .arg(file.path())
        .args(["--mock", "watch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Polling is disabled"));
}
