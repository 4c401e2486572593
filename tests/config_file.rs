//! config.toml 생성/저장/부분 로드 테스트.
use length_unit_converter::config::{load_or_default_at, Config};
use length_unit_converter::units::LengthUnit;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = load_or_default_at(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn saved_settings_are_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = Config {
        language: "ko".into(),
        default_from: LengthUnit::Mile,
        default_to: LengthUnit::Foot,
        decimals: 2,
        ..Config::default()
    };
    cfg.save_to(&path).unwrap();
    assert_eq!(load_or_default_at(&path).unwrap(), cfg);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_to = \"Millimetre\"\ndecimals = 99\n").unwrap();
    let cfg = load_or_default_at(&path).unwrap();
    assert_eq!(cfg.default_from, LengthUnit::Metre);
    assert_eq!(cfg.default_to, LengthUnit::Millimetre);
    assert_eq!(cfg.display_decimals(), 10);
    assert_eq!(cfg.language, "auto");
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_from = \"Furlong\"\n").unwrap();
    assert!(load_or_default_at(&path).is_err());
}
