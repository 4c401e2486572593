//! 길이 변환 계수와 항등/왕복 성질 회귀 테스트.
use length_unit_converter::conversion::{convert, ConversionError};
use length_unit_converter::units::{conversion_table, convert_length, LengthUnit};
use proptest::prelude::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

#[test]
fn metre_to_millimetre() {
    let mm = convert_length(1.0, LengthUnit::Metre, LengthUnit::Millimetre);
    assert!(close(mm, 1000.0, 1e-12), "got {mm}");
}

#[test]
fn mile_to_metre() {
    let m = convert_length(1.0, LengthUnit::Mile, LengthUnit::Metre);
    assert!(close(m, 1609.34, 1e-12), "got {m}");
}

#[test]
fn foot_to_metre() {
    let m = convert_length(1.0, LengthUnit::Foot, LengthUnit::Metre);
    assert!(close(m, 0.3048, 1e-12), "got {m}");
}

#[test]
fn feet_per_mile_is_about_one_mile() {
    // 1 mile = 1609.34 m 계수를 쓰므로 5280 ft는 1.0000025 mile 정도가 된다.
    let mi = convert_length(5280.0, LengthUnit::Foot, LengthUnit::Mile);
    assert!((mi - 1.0).abs() < 1e-5, "got {mi}");
}

#[test]
fn table_covers_every_unit_with_positive_factor() {
    let table: Vec<_> = conversion_table().collect();
    assert_eq!(table.len(), LengthUnit::ALL.len());
    for unit in LengthUnit::ALL {
        let hits = table.iter().filter(|(u, _)| *u == unit).count();
        assert_eq!(hits, 1, "{unit:?} must appear exactly once");
    }
    assert!(table.iter().all(|(_, f)| *f > 0.0));
    assert_eq!(LengthUnit::Metre.metres_per_unit(), 1.0);
}

#[test]
#[should_panic(expected = "non-finite")]
fn non_finite_magnitude_is_a_contract_violation() {
    convert_length(f64::NAN, LengthUnit::Metre, LengthUnit::Foot);
}

#[test]
fn string_entry_point_parses_units_and_value() {
    let ft = convert(" 3 ", "m", "feet").unwrap();
    assert!(close(ft, 3.0 / 0.3048, 1e-12));
    assert_eq!(
        convert("abc", "m", "ft"),
        Err(ConversionError::InvalidMagnitude("abc".into()))
    );
    assert_eq!(
        convert("1", "m", "furlong"),
        Err(ConversionError::UnknownUnit("furlong".into()))
    );
}

fn any_unit() -> impl Strategy<Value = LengthUnit> {
    prop::sample::select(LengthUnit::ALL.to_vec())
}

proptest! {
    #[test]
    fn same_unit_is_identity(x in -1e12f64..1e12, unit in any_unit()) {
        prop_assert_eq!(convert_length(x, unit, unit), x);
    }

    #[test]
    fn round_trip_restores_value(x in 1e-6f64..1e9, a in any_unit(), b in any_unit()) {
        let there = convert_length(x, a, b);
        let back = convert_length(there, b, a);
        prop_assert!(close(back, x, 1e-12), "{} -> {} -> {}", x, there, back);
    }
}
