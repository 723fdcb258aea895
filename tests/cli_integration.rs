//! Integration tests for the Keyloom CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are avoided by setting `KEYLOOM_PASSWORD` and
//! piping entry values through stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: get a Command pointing at the keyloom binary.
fn keyloom() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("keyloom").expect("binary should exist")
}

/// Helper: a keyloom Command scoped to a temp dir with a fixed password.
fn keyloom_in(dir: &TempDir) -> Command {
    let mut cmd = keyloom();
    cmd.current_dir(dir.path())
        .env("KEYLOOM_PASSWORD", "correct horse battery");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    keyloom()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted credential keychain"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("entries"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("export-key"));
}

#[test]
fn version_flag_shows_version() {
    keyloom()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keyloom"));
}

#[test]
fn no_args_shows_help() {
    // Running with no subcommand should show an error or help.
    keyloom()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn get_on_missing_keychain_fails() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp)
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_keychain_name_rejected() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp)
        .args(["--keychain", "UPPER", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn init_creates_keychain_and_sidecar() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    assert!(tmp.path().join(".keyloom/default.keychain").exists());
    assert!(tmp.path().join(".keyloom/default.keychain.sha256").exists());
}

#[test]
fn init_refuses_to_clobber() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();
    keyloom_in(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn set_get_remove_roundtrip() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();

    // Set the value via stdin so nothing lands in argv.
    keyloom_in(&tmp)
        .args(["set", "email"])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));

    keyloom_in(&tmp)
        .args(["get", "email"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));

    keyloom_in(&tmp)
        .args(["remove", "email", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    keyloom_in(&tmp)
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no entry found"));
}

#[test]
fn wrong_password_fails_on_nonempty_keychain() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();
    keyloom_in(&tmp)
        .args(["set", "email"])
        .write_stdin("hunter2\n")
        .assert()
        .success();

    keyloom()
        .current_dir(tmp.path())
        .env("KEYLOOM_PASSWORD", "totally wrong password")
        .args(["get", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn entries_lists_without_password() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();
    keyloom_in(&tmp)
        .args(["set", "email"])
        .write_stdin("hunter2\n")
        .assert()
        .success();

    // No KEYLOOM_PASSWORD set: entries must not need one.
    keyloom()
        .current_dir(tmp.path())
        .arg("entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry ID"));
}

#[test]
fn verify_passes_then_catches_modification() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();

    keyloom_in(&tmp)
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("matches"));

    // Append a byte to the keychain file behind keyloom's back.
    let path = tmp.path().join(".keyloom/default.keychain");
    let mut contents = std::fs::read(&path).unwrap();
    contents.push(b' ');
    std::fs::write(&path, contents).unwrap();

    keyloom_in(&tmp)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("digest mismatch"));
}

#[test]
fn export_key_prints_base64_key() {
    let tmp = TempDir::new().unwrap();

    keyloom_in(&tmp).arg("init").assert().success();

    let assert = keyloom_in(&tmp)
        .args(["export-key", "--force"])
        .assert()
        .success();

    // 32 key bytes -> 44 base64 characters.
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let key_line = stdout.lines().last().unwrap().trim();
    assert_eq!(key_line.len(), 44);
}

#[test]
fn completions_bash_generates_script() {
    keyloom()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keyloom"));
}

#[test]
fn completions_unknown_shell_fails() {
    keyloom()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}
