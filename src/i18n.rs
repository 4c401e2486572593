use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::units::LengthUnit;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CONVERT: &str = "main_menu.convert";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const CONVERT_HEADING: &str = "convert.heading";
    pub const CONVERT_PROMPT_VALUE: &str = "convert.prompt_value";
    pub const CONVERT_PROMPT_FROM: &str = "convert.prompt_from";
    pub const CONVERT_PROMPT_TO: &str = "convert.prompt_to";
    pub const CONVERT_RESULT: &str = "convert.result";
    pub const CONVERT_BUTTON: &str = "convert.button";
    pub const CONVERT_PLACEHOLDER: &str = "convert.placeholder";
    pub const LABEL_FROM: &str = "convert.label_from";
    pub const LABEL_TO: &str = "convert.label_to";

    pub const ALERT_INVALID_TITLE: &str = "alert.invalid_input.title";
    pub const ALERT_INVALID_BODY: &str = "alert.invalid_input.body";
    pub const ALERT_OK: &str = "alert.ok";
    pub const ALERT_PRESS_ENTER: &str = "alert.press_enter";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_PROMPT_DECIMALS: &str = "settings.prompt_decimals";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_DEFAULT_FROM: &str = "settings.default_from";
    pub const SETTINGS_DEFAULT_TO: &str = "settings.default_to";
    pub const SETTINGS_DECIMALS: &str = "settings.decimals";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_LANGUAGE_AUTO: &str = "settings.language_auto";
    pub const SETTINGS_PACK_DIR: &str = "settings.pack_dir";
    pub const SETTINGS_BROWSE: &str = "settings.browse";
    pub const SETTINGS_ALPHA: &str = "settings.alpha";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_TITLE: &str = "settings.title";

    pub const HELP_TITLE: &str = "help.title";
    pub const HELP_BODY: &str = "help.body";
    pub const HELP_INPUT_RULE: &str = "help.input_rule";

    pub const UNIT_METRE: &str = "unit.metre";
    pub const UNIT_MILLIMETRE: &str = "unit.millimetre";
    pub const UNIT_MILE: &str = "unit.mile";
    pub const UNIT_FOOT: &str = "unit.foot";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        log::debug!(
            "translator {lang_code}: {} override keys",
            overrides.as_ref().map_or(0, HashMap::len)
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 영어 번역이 없으면
    /// 한국어 문자열을, 그것도 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> Cow<'_, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Borrowed(v.as_str());
        }
        let builtin = match self.lang {
            Language::En => en(key).or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        match builtin {
            Some(s) => Cow::Borrowed(s),
            None => {
                log::warn!("missing translation key: {key}");
                Cow::Owned(key.to_string())
            }
        }
    }

    /// 단위 표시 이름.
    pub fn unit_name(&self, unit: LengthUnit) -> Cow<'_, str> {
        self.t(unit_key(unit))
    }
}

fn unit_key(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::Metre => keys::UNIT_METRE,
        LengthUnit::Millimetre => keys::UNIT_MILLIMETRE,
        LengthUnit::Mile => keys::UNIT_MILE,
        LengthUnit::Foot => keys::UNIT_FOOT,
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "de" | "de-de" => Some("de-de".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        "de" => Some("de-de".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    for var in ["LC_ALL", "LANG"] {
        if let Some(code) = std::env::var(var).ok().as_deref().and_then(normalize_locale_string) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵(테이블 중첩 허용).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            log::warn!("ignoring unreadable language pack {}", path.display());
        }
        map
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "de-de" | "de" => parse_toml_to_map(include_str!("../locales/de-de.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "길이 단위 변환기",
        MAIN_MENU_TITLE => "\n=== 길이 단위 변환기 ===",
        MAIN_MENU_CONVERT => "1) 변환",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        CONVERT_HEADING => "\n-- 길이 변환 --",
        CONVERT_PROMPT_VALUE => "값 입력: ",
        CONVERT_PROMPT_FROM => "입력 단위 (엔터 = {unit}): ",
        CONVERT_PROMPT_TO => "변환 단위 (엔터 = {unit}): ",
        CONVERT_RESULT => "변환 결과:",
        CONVERT_BUTTON => "변환",
        CONVERT_PLACEHOLDER => "값을 입력하세요",
        LABEL_FROM => "입력:",
        LABEL_TO => "변환:",
        ALERT_INVALID_TITLE => "잘못된 입력",
        ALERT_INVALID_BODY => "유효한 숫자를 입력하세요.",
        ALERT_OK => "확인",
        ALERT_PRESS_ENTER => "계속하려면 엔터를 누르세요...",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_OPTIONS => "1) 기본 입력 단위  2) 기본 변환 단위  3) 소수 자릿수  4) 언어",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_PROMPT_DECIMALS => "소수 자릿수 (0-10): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en-us/de-de): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        SETTINGS_DEFAULT_FROM => "기본 입력 단위",
        SETTINGS_DEFAULT_TO => "기본 변환 단위",
        SETTINGS_DECIMALS => "소수 자릿수",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_LANGUAGE_AUTO => "시스템",
        SETTINGS_PACK_DIR => "언어팩 폴더",
        SETTINGS_BROWSE => "찾아보기...",
        SETTINGS_ALPHA => "창 투명도",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_TITLE => "설정",
        HELP_TITLE => "도움말",
        HELP_BODY => "값을 입력하고 입력/변환 단위를 고른 뒤 변환을 누르세요. 기준 단위는 미터입니다.",
        HELP_INPUT_RULE => "입력 규칙: 앞뒤 공백은 무시하며, 문자열 전체가 숫자(부호/소수/지수 허용)여야 합니다.",
        UNIT_METRE => "미터",
        UNIT_MILLIMETRE => "밀리미터",
        UNIT_MILE => "마일",
        UNIT_FOOT => "피트",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "Length Unit Converter",
        MAIN_MENU_TITLE => "\n=== Length Unit Converter ===",
        MAIN_MENU_CONVERT => "1) Convert",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        CONVERT_HEADING => "\n-- Length Conversion --",
        CONVERT_PROMPT_VALUE => "Enter value: ",
        CONVERT_PROMPT_FROM => "From unit (enter = {unit}): ",
        CONVERT_PROMPT_TO => "To unit (enter = {unit}): ",
        CONVERT_RESULT => "Result:",
        CONVERT_BUTTON => "Convert",
        CONVERT_PLACEHOLDER => "Enter value",
        LABEL_FROM => "From:",
        LABEL_TO => "To:",
        ALERT_INVALID_TITLE => "Invalid Input",
        ALERT_INVALID_BODY => "Please enter a valid number.",
        ALERT_OK => "OK",
        ALERT_PRESS_ENTER => "Press Enter to continue...",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_OPTIONS => "1) Default from unit  2) Default to unit  3) Decimals  4) Language",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_PROMPT_DECIMALS => "Decimal places (0-10): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en-us/de-de): ",
        SETTINGS_INVALID => "Invalid input; setting unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_DEFAULT_FROM => "Default from unit",
        SETTINGS_DEFAULT_TO => "Default to unit",
        SETTINGS_DECIMALS => "Decimal places",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_LANGUAGE_AUTO => "System",
        SETTINGS_PACK_DIR => "Language pack folder",
        SETTINGS_BROWSE => "Browse...",
        SETTINGS_ALPHA => "Window transparency",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_TITLE => "Settings",
        HELP_TITLE => "Help",
        HELP_BODY => "Enter a value, pick the from/to units and press Convert. The base unit is the metre.",
        HELP_INPUT_RULE => "Input rule: surrounding spaces are ignored; the whole text must be a number (sign, decimals and exponent allowed).",
        UNIT_METRE => "Metre",
        UNIT_MILLIMETRE => "Millimetre",
        UNIT_MILE => "Mile",
        UNIT_FOOT => "Foot",
        _ => return None,
    })
}

/// `{name}` 형태의 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko");
        assert_eq!(resolve_language("auto", Some("en-gb")), "en-us");
        assert_eq!(resolve_language("", Some("de")), "de-de");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[alert.invalid_input]\ntitle = \"X\"\n").unwrap();
        assert_eq!(map.get("alert.invalid_input.title").map(String::as_str), Some("X"));
    }

    #[test]
    fn english_and_korean_cover_the_same_keys() {
        use keys::*;
        for key in [APP_TITLE, ALERT_INVALID_TITLE, ALERT_INVALID_BODY, UNIT_MILE, HELP_INPUT_RULE] {
            assert!(en(key).is_some(), "en missing {key}");
            assert!(ko(key).is_some(), "ko missing {key}");
        }
    }

    #[test]
    fn german_pack_overrides_and_falls_back_to_english() {
        let tr = Translator::new_with_pack("de-de", None);
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::UNIT_FOOT), "Fuß");
        assert_eq!(tr.t(keys::ALERT_PRESS_ENTER), "Press Enter to continue...");
    }

    #[test]
    fn template_placeholders_are_replaced() {
        assert_eq!(fill_template("a {unit} b", &[("unit", "m")]), "a m b");
    }
}
