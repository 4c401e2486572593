use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::units::LengthUnit;

/// 기본 설정 파일 경로(작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 결과 표시 기본 소수 자릿수.
pub const DEFAULT_DECIMALS: usize = 4;

/// 결과 표시 최대 소수 자릿수.
pub const MAX_DECIMALS: usize = 10;

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us/de-de 등)
    pub language: String,
    /// 언어팩 디렉터리. 없으면 locales/ 와 내장 언어팩을 사용한다.
    pub language_pack_dir: Option<String>,
    /// 변환 폼의 기본 입력 단위
    pub default_from: LengthUnit,
    /// 변환 폼의 기본 목표 단위
    pub default_to: LengthUnit,
    /// 결과 표시 소수 자릿수
    pub decimals: usize,
    /// GUI 창 불투명도
    pub window_alpha: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            default_from: LengthUnit::Metre,
            default_to: LengthUnit::Metre,
            decimals: DEFAULT_DECIMALS,
            window_alpha: 1.0,
        }
    }
}

impl Config {
    /// 표시용 소수 자릿수(0..=10로 제한).
    pub fn display_decimals(&self) -> usize {
        self.decimals.min(MAX_DECIMALS)
    }

    /// 0.3..=1.0 범위로 제한한 창 불투명도.
    pub fn clamped_alpha(&self) -> f32 {
        self.window_alpha.clamp(0.3, 1.0)
    }

    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::debug!("config saved to {}", path.display());
        Ok(())
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드하거나 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::info!("config loaded from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        log::info!("created default config at {}", path.display());
        Ok(cfg)
    }
}
