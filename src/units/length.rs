use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Metre,
    Millimetre,
    Mile,
    Foot,
}

impl LengthUnit {
    /// 선택 목록에 표시되는 순서.
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Metre,
        LengthUnit::Millimetre,
        LengthUnit::Mile,
        LengthUnit::Foot,
    ];

    /// 1 단위가 몇 미터인지 반환한다. 미터는 정확히 1이다.
    pub fn metres_per_unit(self) -> f64 {
        match self {
            LengthUnit::Metre => 1.0,
            LengthUnit::Millimetre => 0.001,
            LengthUnit::Mile => 1609.34,
            LengthUnit::Foot => 0.3048,
        }
    }

    /// 영문 표시 이름.
    pub fn name(self) -> &'static str {
        match self {
            LengthUnit::Metre => "Metre",
            LengthUnit::Millimetre => "Millimetre",
            LengthUnit::Mile => "Mile",
            LengthUnit::Foot => "Foot",
        }
    }

    /// 단위 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Metre => "m",
            LengthUnit::Millimetre => "mm",
            LengthUnit::Mile => "mi",
            LengthUnit::Foot => "ft",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// (단위, 미터 환산 계수) 쌍으로 본 변환표.
pub fn conversion_table() -> impl Iterator<Item = (LengthUnit, f64)> {
    LengthUnit::ALL
        .into_iter()
        .map(|unit| (unit, unit.metres_per_unit()))
}

/// 길이를 다른 단위로 변환한다.
///
/// `value`는 유한한 수여야 한다. 숫자 검증은 호출하는 쪽의 책임이며,
/// 유한하지 않은 값이 들어오면 계약 위반으로 보고 패닉한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    assert!(
        value.is_finite(),
        "convert_length called with non-finite magnitude {value}"
    );
    if from == to {
        return value;
    }
    value * from.metres_per_unit() / to.metres_per_unit()
}
