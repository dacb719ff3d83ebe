//! Integration test: run the `burpsluice` binary and check exit status, stdout and stderr.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const EXPORT: &str = "<?xml version=\"1.0\"?>\n<items>\n  <item>\n    \
    <url>https://x/a?q=1</url>\n    \
    <request>GET /a?q=1 HTTP/1.1\r\nCookie: sid=1; theme=dark\r\n\r\n</request>\n  \
    </item>\n</items>\n";

/// Runs the binary with config and log dirs confined to `home`.
fn burpsluice(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_burpsluice"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn burpsluice")
}

fn assert_single_error_line(out: &Output, needle: &str) {
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert!(lines[0].starts_with("burpsluice error: "), "stderr: {stderr}");
    assert!(lines[0].contains(needle), "stderr: {stderr}");
}

#[test]
fn success_exits_zero_with_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.xml");
    fs::write(&input, EXPORT).unwrap();
    let base = dir.path().join("site");

    let out = burpsluice(
        dir.path(),
        &["-o", base.to_str().unwrap(), input.to_str().unwrap()],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 unique cookies"), "{stdout}");
    assert!(stdout.contains("1 unique parameters"), "{stdout}");
    assert!(out.stderr.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("site_cookies.txt")).unwrap(),
        "sid\ntheme\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("site_params.txt")).unwrap(),
        "q\n"
    );
}

#[test]
fn missing_input_exits_one() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.xml");
    let out = burpsluice(dir.path(), &[missing.to_str().unwrap()]);
    assert_single_error_line(&out, "missing.xml");
}

#[test]
fn malformed_input_exits_one_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<items><item>").unwrap();
    let base = dir.path().join("site");

    let out = burpsluice(
        dir.path(),
        &["-o", base.to_str().unwrap(), input.to_str().unwrap()],
    );
    assert_single_error_line(&out, "malformed capture export");
    assert!(!dir.path().join("site_cookies.txt").exists());
    assert!(!dir.path().join("site_params.txt").exists());
}

#[test]
fn unwritable_destination_exits_one() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.xml");
    fs::write(&input, EXPORT).unwrap();
    let base = dir.path().join("no-such-dir").join("site");

    let out = burpsluice(
        dir.path(),
        &["-o", base.to_str().unwrap(), input.to_str().unwrap()],
    );
    assert_single_error_line(&out, "cannot write output");
}

#[test]
fn unusable_config_dir_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.xml");
    fs::write(&input, EXPORT).unwrap();
    let base = dir.path().join("site");
    let home_file = dir.path().join("homefile");
    fs::write(&home_file, "not a directory").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_burpsluice"))
        .args(["-o", base.to_str().unwrap(), input.to_str().unwrap()])
        .env("HOME", &home_file)
        .env("XDG_CONFIG_HOME", home_file.join("config"))
        .env("XDG_STATE_HOME", home_file.join("state"))
        .env("RUST_LOG", "off")
        .output()
        .expect("spawn burpsluice");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(dir.path().join("site_cookies.txt")).unwrap(),
        "sid\ntheme\n"
    );
}
