use std::str::FromStr;

use thiserror::Error;

use crate::units::{convert_length, LengthUnit};

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 비어 있거나 숫자가 아닌 입력
    #[error("유효한 숫자가 아닙니다: {0:?}")]
    InvalidMagnitude(String),
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

impl FromStr for LengthUnit {
    type Err = ConversionError;

    /// 대소문자를 구분하지 않고 단위명/기호를 해석한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "metre" | "meter" | "metres" | "meters" => Ok(LengthUnit::Metre),
            "mm" | "millimetre" | "millimeter" | "millimetres" | "millimeters" => {
                Ok(LengthUnit::Millimetre)
            }
            "mi" | "mile" | "miles" => Ok(LengthUnit::Mile),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

/// 사용자가 입력한 문자열을 변환 가능한 값으로 해석한다.
///
/// 앞뒤 공백을 제거한 뒤 문자열 전체가 `f64` 문법(부호, 소수, 지수)에 맞아야 한다.
/// 뒤에 다른 문자가 붙은 경우(`12abc`), 16진수, 자릿수 구분 쉼표는 거부한다.
/// `inf`, `NaN`, 범위를 넘는 값(`1e400`)처럼 유한하지 않은 결과도 거부한다.
pub fn parse_magnitude(raw: &str) -> Result<f64, ConversionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::InvalidMagnitude(raw.to_string()));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConversionError::InvalidMagnitude(raw.to_string())),
    }
}

/// 한 번의 변환 요청. 사용자 동작마다 만들어지고 결과를 낸 뒤 버려진다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub magnitude: f64,
    pub from: LengthUnit,
    pub to: LengthUnit,
}

impl ConversionRequest {
    /// 원시 입력 문자열을 검증해 요청을 만든다. 검증을 통과하지 못한 입력은
    /// 변환 함수까지 도달하지 않는다.
    pub fn parse(raw: &str, from: LengthUnit, to: LengthUnit) -> Result<Self, ConversionError> {
        let magnitude = parse_magnitude(raw)?;
        Ok(Self {
            magnitude,
            from,
            to,
        })
    }

    pub fn convert(&self) -> f64 {
        let out = convert_length(self.magnitude, self.from, self.to);
        log::debug!(
            "convert {} {} -> {} {}",
            self.magnitude,
            self.from,
            out,
            self.to
        );
        out
    }
}

/// 문자열로 전달된 값과 단위명을 해석한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `m`, `mm`, `mile`, `ft` 등을 사용할 수 있다.
/// 결과가 f64 범위를 넘으면 입력값 오류로 본다.
pub fn convert(
    raw_value: &str,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = from_unit_str.parse::<LengthUnit>()?;
    let to = to_unit_str.parse::<LengthUnit>()?;
    let value = ConversionRequest::parse(raw_value, from, to)?.convert();
    if !value.is_finite() {
        return Err(ConversionError::InvalidMagnitude(raw_value.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_magnitude_accepts_signs_and_exponents() {
        assert_eq!(parse_magnitude("  42 ").unwrap(), 42.0);
        assert_eq!(parse_magnitude("-3.5").unwrap(), -3.5);
        assert_eq!(parse_magnitude("+7").unwrap(), 7.0);
        assert_eq!(parse_magnitude("1e3").unwrap(), 1000.0);
        assert_eq!(parse_magnitude(".5").unwrap(), 0.5);
    }

    #[test]
    fn parse_magnitude_rejects_partial_and_non_finite_text() {
        for raw in ["", "   ", "abc", "12abc", "0x10", "1,000", "inf", "NaN", "1e400", "--1"] {
            assert!(
                matches!(parse_magnitude(raw), Err(ConversionError::InvalidMagnitude(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn overflowing_result_is_rejected() {
        assert!(matches!(
            convert("1e306", "mi", "mm"),
            Err(ConversionError::InvalidMagnitude(_))
        ));
        assert!(convert("1e300", "mi", "mm").unwrap().is_finite());
    }

    #[test]
    fn unit_names_are_case_insensitive() {
        assert_eq!("METRE".parse::<LengthUnit>().unwrap(), LengthUnit::Metre);
        assert_eq!("Feet".parse::<LengthUnit>().unwrap(), LengthUnit::Foot);
        assert_eq!(" mi ".parse::<LengthUnit>().unwrap(), LengthUnit::Mile);
        assert_eq!(
            "yard".parse::<LengthUnit>(),
            Err(ConversionError::UnknownUnit("yard".into()))
        );
    }
}
