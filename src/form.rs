//! 단일 화면 변환 폼의 상태. GUI와 CLI가 같은 규칙으로 입력을 검증하고
//! 결과를 표시하도록 공유한다.

use crate::config::{Config, DEFAULT_DECIMALS};
use crate::conversion::{ConversionError, ConversionRequest};
use crate::units::LengthUnit;

/// 변환 한 번의 결과. 표시를 위해 원래 입력 문자열을 함께 보관한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub request: ConversionRequest,
    pub input_text: String,
    pub value: f64,
}

impl ConversionOutcome {
    /// `"{입력} {단위} = {결과} {단위}"` 형식으로 표시한다. 결과만 반올림한다.
    pub fn render<F, S>(&self, decimals: usize, unit_name: F) -> String
    where
        F: Fn(LengthUnit) -> S,
        S: std::fmt::Display,
    {
        format!(
            "{} {} = {} {}",
            self.input_text,
            unit_name(self.request.from),
            format_fixed(self.value, decimals),
            unit_name(self.request.to)
        )
    }
}

/// `value`를 소수 `decimals` 자리 문자열로 만든다.
///
/// 정확히 중간에 놓인 값은 0에서 먼 쪽으로 올린다(`1.03125` → `1.0313`).
/// 음의 0은 부호 없이 표시한다.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // f64의 10진 전개는 소수점 아래 1074자리 안에서 끝나므로 이 정밀도면 정확하다.
    let exact = format!("{:.*}", decimals.max(1074) + 1, value.abs());
    let Some(dot) = exact.find('.') else {
        return exact;
    };
    let end = if decimals == 0 { dot } else { dot + 1 + decimals };
    let kept = &exact[..end];
    let next_digit = exact.as_bytes()[dot + 1 + decimals];
    let magnitude = if next_digit >= b'5' {
        round_up_last_digit(kept)
    } else {
        kept.to_string()
    };
    if value < 0.0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn round_up_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => {}
            '9' => *c = '0',
            d => {
                *c = char::from(d as u8 + 1);
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// 입력 문자열, 두 단위 선택, 마지막 결과를 담는 폼 상태.
#[derive(Debug, Clone)]
pub struct ConverterForm {
    pub input: String,
    pub from: LengthUnit,
    pub to: LengthUnit,
    pub decimals: usize,
    result: Option<ConversionOutcome>,
}

impl Default for ConverterForm {
    fn default() -> Self {
        Self::new(LengthUnit::Metre, LengthUnit::Metre)
    }
}

impl ConverterForm {
    pub fn new(from: LengthUnit, to: LengthUnit) -> Self {
        Self {
            input: String::new(),
            from,
            to,
            decimals: DEFAULT_DECIMALS,
            result: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            decimals: cfg.display_decimals(),
            ..Self::new(cfg.default_from, cfg.default_to)
        }
    }

    /// 입력을 검증하고 변환한다. 결과가 f64 범위를 넘는 입력도 잘못된 입력으로
    /// 본다. 실패하면 이전 결과를 그대로 둔다.
    pub fn submit(&mut self) -> Result<&ConversionOutcome, ConversionError> {
        let request = ConversionRequest::parse(&self.input, self.from, self.to).map_err(|e| {
            log::debug!("rejected input {:?}: {e}", self.input);
            e
        })?;
        let value = request.convert();
        if !value.is_finite() {
            log::debug!("result out of range for {:?}", self.input);
            return Err(ConversionError::InvalidMagnitude(self.input.clone()));
        }
        Ok(&*self.result.insert(ConversionOutcome {
            request,
            input_text: self.input.trim().to_string(),
            value,
        }))
    }

    pub fn result(&self) -> Option<&ConversionOutcome> {
        self.result.as_ref()
    }

    /// 현재 결과 문자열. 결과가 없으면 None.
    pub fn result_label<F, S>(&self, unit_name: F) -> Option<String>
    where
        F: Fn(LengthUnit) -> S,
        S: std::fmt::Display,
    {
        self.result
            .as_ref()
            .map(|r| r.render(self.decimals, unit_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_fixed_carries_through_nines() {
        assert_eq!(format_fixed(99.5, 0), "100");
        assert_eq!(format_fixed(0.5, 0), "1");
        assert_eq!(format_fixed(9.99999, 4), "10.0000");
        assert_eq!(format_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn format_fixed_keeps_nearest_for_non_ties() {
        // 1.005는 실제로 1.00499999...로 저장된다.
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(1609.34, 4), "1609.3400");
        assert_eq!(format_fixed(-0.00001, 4), "-0.0000");
    }
}
