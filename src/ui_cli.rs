use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::app::AppError;
use crate::config::{Config, MAX_DECIMALS};
use crate::conversion::ConversionError;
use crate::form::ConverterForm;
use crate::i18n::{fill_template, keys, Translator};
use crate::units::LengthUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Convert,
    Settings,
    Exit,
}

/// 대화형 입출력 채널. 표준 입출력 대신 테스트용 버퍼를 끼울 수 있다.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 한 줄을 출력한다.
    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `InputClosed`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_CONVERT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        term.say(&tr.t(key))?;
    }
    loop {
        let sel = term.read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Convert),
            "2" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => term.say(&tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 변환 메뉴를 처리한다. 값을 받고 두 단위를 고른 뒤 변환 결과를 출력한다.
pub fn handle_conversion<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    cfg: &Config,
) -> Result<(), AppError> {
    term.say(&tr.t(keys::CONVERT_HEADING))?;
    let mut form = ConverterForm::from_config(cfg);
    form.input = term.read_line(&tr.t(keys::CONVERT_PROMPT_VALUE))?;
    term.say(&unit_menu(tr))?;
    form.from = read_unit(term, tr, keys::CONVERT_PROMPT_FROM, cfg.default_from)?;
    form.to = read_unit(term, tr, keys::CONVERT_PROMPT_TO, cfg.default_to)?;
    let decimals = form.decimals;
    match form.submit() {
        Ok(outcome) => {
            let line = outcome.render(decimals, |u| tr.unit_name(u));
            term.say(&format!("{} {line}", tr.t(keys::CONVERT_RESULT)))?;
        }
        Err(ConversionError::InvalidMagnitude(_)) => show_invalid_input_alert(term, tr)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// 잘못된 입력 경고. 사용자가 엔터로 확인할 때까지 진행하지 않는다.
pub fn show_invalid_input_alert<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
) -> Result<(), AppError> {
    term.say(&format!("[{}]", tr.t(keys::ALERT_INVALID_TITLE)))?;
    term.say(&tr.t(keys::ALERT_INVALID_BODY))?;
    term.read_line(&tr.t(keys::ALERT_PRESS_ENTER))?;
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    cfg: &mut Config,
) -> Result<(), AppError> {
    term.say(&tr.t(keys::SETTINGS_HEADING))?;
    term.say(&tr.t(keys::SETTINGS_CURRENT))?;
    term.say(&format!(
        "  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}",
        tr.t(keys::SETTINGS_DEFAULT_FROM),
        tr.unit_name(cfg.default_from),
        tr.t(keys::SETTINGS_DEFAULT_TO),
        tr.unit_name(cfg.default_to),
        tr.t(keys::SETTINGS_DECIMALS),
        cfg.display_decimals(),
        tr.t(keys::SETTINGS_LANGUAGE),
        cfg.language
    ))?;
    term.say(&tr.t(keys::SETTINGS_OPTIONS))?;
    let sel = term.read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            term.say(&unit_menu(tr))?;
            cfg.default_from = read_unit(term, tr, keys::CONVERT_PROMPT_FROM, cfg.default_from)?;
        }
        "2" => {
            term.say(&unit_menu(tr))?;
            cfg.default_to = read_unit(term, tr, keys::CONVERT_PROMPT_TO, cfg.default_to)?;
        }
        "3" => {
            let s = term.read_line(&tr.t(keys::SETTINGS_PROMPT_DECIMALS))?;
            match s.trim().parse::<usize>() {
                Ok(n) if n <= MAX_DECIMALS => cfg.decimals = n,
                _ => {
                    term.say(&tr.t(keys::SETTINGS_INVALID))?;
                    return Ok(());
                }
            }
        }
        "4" => {
            let s = term.read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = s.trim();
            if code.is_empty() {
                term.say(&tr.t(keys::SETTINGS_INVALID))?;
                return Ok(());
            }
            cfg.language = code.to_string();
        }
        _ => {
            term.say(&tr.t(keys::SETTINGS_INVALID))?;
            return Ok(());
        }
    }
    term.say(&tr.t(keys::SETTINGS_SAVED))?;
    Ok(())
}

fn unit_menu(tr: &Translator) -> String {
    LengthUnit::ALL
        .iter()
        .enumerate()
        .map(|(i, u)| format!("{}) {}", i + 1, tr.unit_name(*u)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// 번호(1-4) 또는 단위명/기호로 단위를 읽는다. 빈 입력은 기본값을 사용한다.
fn read_unit<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    prompt_key: &str,
    default: LengthUnit,
) -> Result<LengthUnit, AppError> {
    let default_name = tr.unit_name(default);
    let prompt = fill_template(&tr.t(prompt_key), &[("unit", default_name.as_ref())]);
    loop {
        let sel = term.read_line(&prompt)?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(default);
        }
        if let Some(unit) = sel
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| LengthUnit::ALL.get(i).copied())
        {
            return Ok(unit);
        }
        if let Ok(unit) = sel.parse::<LengthUnit>() {
            return Ok(unit);
        }
        term.say(&tr.t(keys::INVALID_SELECTION_RETRY))?;
    }
}
