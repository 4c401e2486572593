//! `convert` / `units` 하위 명령을 실제 실행 파일로 확인하는 테스트.
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_length_unit_converter_cli"))
        .arg("--lang")
        .arg("en-us")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn convert_prints_rounded_result() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir.path().join("config.toml"), &["convert", "1", "mi", "m"]);
    assert!(out.status.success());
    assert_eq!(stdout_of(&out).trim(), "1 Mile = 1609.3400 Metre");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn convert_rejects_non_numeric_value() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir.path().join("config.toml"), &["convert", "abc", "m", "ft"]);
    assert!(!out.status.success());
    assert!(stdout_of(&out).is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.starts_with("Error: "), "{err}");
    assert_eq!(err.matches("abc").count(), 1, "{err}");
}

#[test]
fn decimals_flag_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(
        &dir.path().join("config.toml"),
        &["convert", "1", "m", "ft", "-d", "20"],
    );
    assert!(out.status.success());
    assert_eq!(stdout_of(&out).trim(), "1 Metre = 3.2808398950 Foot");
}

#[test]
fn units_lists_every_factor() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&dir.path().join("config.toml"), &["units"]);
    assert!(out.status.success());
    let text = stdout_of(&out);
    for line in ["1 m = 1 m", "1 mm = 0.001 m", "1 mi = 1609.34 m", "1 ft = 0.3048 m"] {
        assert!(text.contains(line), "{line:?} missing in {text}");
    }
}
