//! 변환 폼 입력 검증/결과 표시 테스트.
use length_unit_converter::config::Config;
use length_unit_converter::conversion::ConversionError;
use length_unit_converter::form::ConverterForm;
use length_unit_converter::units::LengthUnit;
use pretty_assertions::assert_eq;

fn names(u: LengthUnit) -> &'static str {
    u.name()
}

#[test]
fn defaults_match_configured_units() {
    let form = ConverterForm::from_config(&Config::default());
    assert_eq!(form.from, LengthUnit::Metre);
    assert_eq!(form.to, LengthUnit::Metre);
    assert_eq!(form.decimals, 4);
    assert!(form.result().is_none());
}

#[test]
fn result_is_rounded_to_four_decimals_with_unit_suffix() {
    let mut form = ConverterForm::new(LengthUnit::Foot, LengthUnit::Metre);
    form.input = " 10 ".into();
    let outcome = form.submit().unwrap();
    assert!((outcome.value - 3.048).abs() < 1e-12);
    assert_eq!(
        form.result_label(names).unwrap(),
        "10 Foot = 3.0480 Metre"
    );
}

#[test]
fn invalid_text_never_produces_a_result() {
    for raw in ["", "  ", "abc", "12abc", "NaN", "Infinity"] {
        let mut form = ConverterForm::new(LengthUnit::Metre, LengthUnit::Mile);
        form.input = raw.into();
        assert!(
            matches!(form.submit(), Err(ConversionError::InvalidMagnitude(_))),
            "{raw:?} should be rejected"
        );
        assert!(form.result().is_none());
    }
}

#[test]
fn failed_submit_keeps_previous_result() {
    let mut form = ConverterForm::new(LengthUnit::Mile, LengthUnit::Metre);
    form.input = "2".into();
    form.submit().unwrap();
    form.input = "two".into();
    assert!(form.submit().is_err());
    assert_eq!(
        form.result_label(names).unwrap(),
        "2 Mile = 3218.6800 Metre"
    );
}

#[test]
fn configured_decimals_change_display_only() {
    let cfg = Config {
        decimals: 1,
        ..Config::default()
    };
    let mut form = ConverterForm::from_config(&cfg);
    form.to = LengthUnit::Foot;
    form.input = "1".into();
    let value = form.submit().unwrap().value;
    assert!((value - 1.0 / 0.3048).abs() < 1e-12);
    assert_eq!(form.result_label(names).unwrap(), "1 Metre = 3.3 Foot");
}

#[test]
fn exact_halves_round_away_from_zero() {
    let mut form = ConverterForm::new(LengthUnit::Metre, LengthUnit::Metre);
    for (raw, shown) in [
        ("1.03125", "1.03125 Metre = 1.0313 Metre"),
        ("-1.03125", "-1.03125 Metre = -1.0313 Metre"),
        ("-0", "-0 Metre = 0.0000 Metre"),
    ] {
        form.input = raw.into();
        form.submit().unwrap();
        assert_eq!(form.result_label(names).unwrap(), shown);
    }
}

#[test]
fn result_beyond_f64_range_is_rejected_like_invalid_text() {
    let mut form = ConverterForm::new(LengthUnit::Mile, LengthUnit::Millimetre);
    form.input = "1".into();
    form.submit().unwrap();
    form.input = "1e306".into();
    assert!(matches!(
        form.submit(),
        Err(ConversionError::InvalidMagnitude(_))
    ));
    assert_eq!(
        form.result_label(names).unwrap(),
        "1 Mile = 1609340.0000 Millimetre"
    );
}
