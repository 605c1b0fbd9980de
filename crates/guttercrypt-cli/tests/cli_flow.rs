use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PASSPHRASE: &str = "correct horse battery staple";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_guttercrypt"))
}

/// Run the binary against `dir` with a clean, non-interactive environment.
fn run(dir: &Path, passphrase: Option<&str>, args: &[&str]) -> Output {
    let mut cmd = Command::new(bin());
    cmd.arg("--dir")
        .arg(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("GUTTERCRYPT_DIR")
        .env_remove("GUTTERCRYPT_PASSPHRASE")
        .env_remove("GEMINI_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .stdin(Stdio::null());
    if let Some(passphrase) = passphrase {
        cmd.env("GUTTERCRYPT_PASSPHRASE", passphrase);
    }
    cmd.output().expect("run guttercrypt")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_env(dir: &Path) {
    std::fs::write(dir.join(".env"), "API_KEY=abc123\nDB_URL=postgres://x\n").unwrap();
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    assert_ok(&run(dir.path(), None, &["init"]));
    dir
}

#[test]
fn test_init_twice_is_already_exists() {
    let dir = TempDir::new().unwrap();
    assert_ok(&run(dir.path(), None, &["init"]));
    assert!(dir.path().join(".guttercrypt").is_dir());

    let again = run(dir.path(), None, &["init"]);
    assert_eq!(again.status.code(), Some(6));
}

#[test]
fn test_store_without_init_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_env(dir.path());
    let output = run(dir.path(), Some(PASSPHRASE), &["store"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!dir.path().join(".guttercrypt/vault.enc").exists());
}

#[test]
fn test_store_missing_file_is_not_found() {
    let dir = initialized();
    let output = run(dir.path(), Some(PASSPHRASE), &["store", "nope.env"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_store_then_list_shows_names_only() {
    let dir = initialized();
    write_env(dir.path());
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["store"]));

    // Sidecar listing needs no passphrase.
    let listed = run(dir.path(), None, &["list"]);
    assert_ok(&listed);
    let out = stdout(&listed);
    assert!(out.contains("API_KEY"));
    assert!(out.contains("DB_URL"));
    assert!(!out.contains("abc123"));
}

#[test]
fn test_lock_then_unlock_restores_document() {
    let dir = initialized();
    write_env(dir.path());
    let original = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["store"]));

    assert_ok(&run(dir.path(), None, &["lock"]));
    assert!(!dir.path().join(".env").exists());

    let again = run(dir.path(), None, &["lock"]);
    assert_eq!(again.status.code(), Some(3));

    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["unlock"]));
    let restored = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_inject_wrong_passphrase_is_auth_failure() {
    let dir = initialized();
    write_env(dir.path());
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["store"]));

    let output = run(dir.path(), Some("not it"), &["inject", "copy.env"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(!dir.path().join("copy.env").exists());

    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["inject", "copy.env"]));
    let copy = std::fs::read_to_string(dir.path().join("copy.env")).unwrap();
    assert!(copy.contains("API_KEY=abc123"));
}

#[test]
fn test_unlock_without_passphrase_or_tty_is_auth_failure() {
    let dir = initialized();
    write_env(dir.path());
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["store"]));

    let output = run(dir.path(), None, &["unlock"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_notes_add_list_remove() {
    let dir = initialized();
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["note", "add", "rotate", "the", "keys"]));
    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["note", "add", "prod db is blue"]));

    let listed = run(dir.path(), Some(PASSPHRASE), &["note", "list"]);
    assert_ok(&listed);
    let out = stdout(&listed);
    assert!(out.contains("rotate the keys"));
    assert!(out.contains("prod db is blue"));

    let missing = run(dir.path(), Some(PASSPHRASE), &["note", "remove", "9"]);
    assert_eq!(missing.status.code(), Some(4));

    assert_ok(&run(dir.path(), Some(PASSPHRASE), &["note", "rm", "1"]));
    let out = stdout(&run(dir.path(), Some(PASSPHRASE), &["note", "list"]));
    assert!(!out.contains("rotate the keys"));
    assert!(out.contains("prod db is blue"));
}

#[test]
fn test_nuke_requires_confirmation() {
    let dir = initialized();
    let refused = run(dir.path(), None, &["nuke"]);
    assert_eq!(refused.status.code(), Some(4));
    assert!(dir.path().join(".guttercrypt").exists());

    assert_ok(&run(dir.path(), None, &["nuke", "--yes"]));
    assert!(!dir.path().join(".guttercrypt").exists());
}

#[test]
fn test_config_provider_validation() {
    let dir = initialized();
    let bad = run(dir.path(), None, &["config", "provider", "clippy"]);
    assert_eq!(bad.status.code(), Some(4));

    assert_ok(&run(dir.path(), None, &["config", "provider", "openai"]));
    let shown = stdout(&run(dir.path(), None, &["config", "show"]));
    assert!(shown.contains("openai"));
}

#[test]
fn test_config_api_key_is_masked() {
    let dir = initialized();
    assert_ok(&run(dir.path(), None, &["config", "api-key", "AIzaSyExample1234"]));
    let shown = stdout(&run(dir.path(), None, &["config", "show"]));
    assert!(shown.contains("AIza...1234"));
    assert!(!shown.contains("AIzaSyExample1234"));
}

#[test]
fn test_ask_without_api_key_is_not_found() {
    let dir = initialized();
    let output = run(dir.path(), None, &["ask", "--no-memory", "what", "is", "a", "vault"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_sync_pull_without_gist_is_not_found() {
    let dir = initialized();
    let output = run(dir.path(), None, &["sync", "pull"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_completions_generate() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), None, &["completions", "bash"]);
    assert_ok(&output);
    assert!(stdout(&output).contains("guttercrypt"));
}
