use std::io::{BufRead, Write};
use std::path::Path;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice, Terminal};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 입력 스트림 종료(EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

/// 설정에 저장된 언어로 번역기를 만든다.
pub fn translator_for(config: &Config) -> Translator {
    let lang = i18n::resolve_language("auto", Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 종료 시 설정을 `config_path`에 저장한다.
pub fn run<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    config: &mut Config,
    config_path: &Path,
    tr: &mut Translator,
) -> Result<(), AppError> {
    loop {
        let choice = match ui_cli::main_menu(term, tr) {
            Err(AppError::InputClosed) => MenuChoice::Exit,
            other => other?,
        };
        match choice {
            MenuChoice::Convert => match ui_cli::handle_conversion(term, tr, config) {
                Err(AppError::InputClosed) => {}
                other => other?,
            },
            MenuChoice::Settings => {
                let lang_before = config.language.clone();
                let pack_before = config.language_pack_dir.clone();
                match ui_cli::handle_settings(term, tr, config) {
                    Err(AppError::InputClosed) => {}
                    other => other?,
                }
                config.save_to(config_path)?;
                // 언어 설정이 바뀐 경우에만 다시 만든다. --lang 으로 고른 언어는 유지된다.
                if config.language != lang_before || config.language_pack_dir != pack_before {
                    *tr = translator_for(config);
                }
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                term.say(&tr.t(i18n::keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}
