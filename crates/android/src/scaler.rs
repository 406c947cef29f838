//! Magnitude scaling
//!
//! Scaled magnitudes are written with exactly one decimal digit. The product
//! is multiplied by ten and rounded half away from zero, so ties are judged on
//! the decimal form: `12.75` becomes `12.8`, `-0.25` becomes `-0.3` and `0.15`
//! becomes `0.2` even though its binary value lies just below the tie.

use crate::dimension::{DimensionEntry, DimensionSet, ScaleSpec};
use crate::error::{ParseError, Result, ScalerError};
use crate::unit::UnitSuffix;
use std::path::Path;

/// Scale a single raw value by `factor`
pub fn scale_value(value: &str, factor: f64, unit: &dyn UnitSuffix) -> std::result::Result<String, ParseError> {
    let (magnitude, suffix) = unit.split(value)?;

    let number = magnitude
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseError::InvalidMagnitude {
            value: value.to_string(),
            magnitude: magnitude.to_string(),
        })?;

    let scaled = number * factor;
    if !scaled.is_finite() {
        return Err(ParseError::OutOfRange {
            value: value.to_string(),
            factor,
        });
    }

    Ok(format!("{}{}", format_magnitude(scaled), suffix))
}

/// Scale one entry for one spec
pub fn scale_entry(
    entry: &DimensionEntry,
    spec: &ScaleSpec,
    unit: &dyn UnitSuffix,
) -> std::result::Result<DimensionEntry, ParseError> {
    let value = scale_value(&entry.value, spec.factor(), unit)?;
    Ok(DimensionEntry::new(entry.name.clone(), value))
}

/// Scale every entry of a source file for one spec
///
/// The first entry that fails aborts the whole set.
pub fn scale_set(
    source: &Path,
    set: &DimensionSet,
    spec: &ScaleSpec,
    unit: &dyn UnitSuffix,
) -> Result<DimensionSet> {
    set.iter()
        .map(|entry| {
            scale_entry(entry, spec, unit).map_err(|source_err| ScalerError::Entry {
                path: source.to_path_buf(),
                name: entry.name.clone(),
                source: source_err,
            })
        })
        .collect()
}

/// Magnitudes at or above this have no fractional part
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0;

/// One decimal digit, half away from zero, no negative zero
pub fn format_magnitude(value: f64) -> String {
    let mut rounded = if value.abs() < INTEGRAL_MAGNITUDE {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{:.1}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{AlphabeticSuffix, FixedSuffix};
    use proptest::prelude::*;

    fn fixed() -> FixedSuffix {
        FixedSuffix::default()
    }

    #[test]
    fn test_doubles_dp() {
        assert_eq!(scale_value("12.0dp", 2.0, &fixed()).unwrap(), "24.0dp");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(scale_value("8.5sp", 1.5, &fixed()).unwrap(), "12.8sp");
        assert_eq!(scale_value("-0.25dp", 1.0, &fixed()).unwrap(), "-0.3dp");
    }

    #[test]
    fn test_integer_magnitude_gets_one_decimal() {
        assert_eq!(scale_value("100px", 1.0, &fixed()).unwrap(), "100.0px");
        assert_eq!(scale_value("3dp", 0.5, &fixed()).unwrap(), "1.5dp");
    }

    #[test]
    fn test_whitespace_around_magnitude_ignored() {
        assert_eq!(scale_value(" 4dp", 2.0, &fixed()).unwrap(), "8.0dp");
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(format_magnitude(-0.01), "0.0");
        assert_eq!(format_magnitude(0.0), "0.0");
    }

    #[test]
    fn test_invalid_magnitude() {
        for value in ["abcdp", "dp", "1.2.3sp", "NaNdp", "infdp"] {
            assert!(
                matches!(
                    scale_value(value, 2.0, &fixed()),
                    Err(ParseError::InvalidMagnitude { .. })
                ),
                "{value:?} accepted"
            );
        }
    }

    #[test]
    fn test_too_short_value() {
        assert!(matches!(
            scale_value("5", 2.0, &fixed()),
            Err(ParseError::ValueTooShort { .. })
        ));
    }

    #[test]
    fn test_ties_judged_on_decimal_form() {
        assert_eq!(format_magnitude(0.15), "0.2");
        assert_eq!(format_magnitude(1.45), "1.5");
        assert_eq!(format_magnitude(-1.45), "-1.5");
        assert_eq!(format_magnitude(0.14), "0.1");
    }

    #[test]
    fn test_huge_finite_product_stays_numeric() {
        let scaled = scale_value("1e308dp", 1.0, &fixed()).unwrap();
        assert!(scaled.ends_with(".0dp"), "{scaled}");
        let magnitude: f64 = scaled.trim_end_matches("dp").parse().unwrap();
        assert_eq!(magnitude, 1e308);

        let max = format!("{}dp", f64::MAX);
        let scaled = scale_value(&max, 1.0, &fixed()).unwrap();
        assert!(!scaled.contains("inf"), "{scaled}");
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            scale_value("1e308dp", 10.0, &fixed()),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_alphabetic_strategy() {
        assert_eq!(
            scale_value("10dip", 1.5, &AlphabeticSuffix).unwrap(),
            "15.0dip"
        );
    }

    #[test]
    fn test_scale_set_aborts_on_bad_entry() {
        let set: DimensionSet = [
            DimensionEntry::new("ok", "4dp"),
            DimensionEntry::new("bad", "xxdp"),
        ]
        .into_iter()
        .collect();
        let spec = ScaleSpec::new("large", 2.0).unwrap();

        let err = scale_set(Path::new("dimens.xml"), &set, &spec, &fixed()).unwrap_err();
        match err {
            ScalerError::Entry { name, .. } => assert_eq!(name, "bad"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scale_set_keeps_names_and_order() {
        let set: DimensionSet = [
            DimensionEntry::new("b", "1dp"),
            DimensionEntry::new("a", "2sp"),
        ]
        .into_iter()
        .collect();
        let spec = ScaleSpec::new("xl", 3.0).unwrap();

        let scaled = scale_set(Path::new("dimens.xml"), &set, &spec, &fixed()).unwrap();
        let pairs: Vec<_> = scaled
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("b", "3.0dp"), ("a", "6.0sp")]);
    }

    proptest! {
        #[test]
        fn prop_unit_suffix_preserved(
            magnitude in -10_000.0f64..10_000.0,
            factor in 0.01f64..100.0,
            unit in "(dp|sp|px|pt|mm|in)",
        ) {
            let value = format!("{magnitude}{unit}");
            let scaled = scale_value(&value, factor, &fixed()).unwrap();
            prop_assert!(scaled.ends_with(&unit));
        }

        #[test]
        fn prop_rescaling_by_one_is_stable(
            tenths in -100_000i64..100_000,
            unit in "(dp|sp|px)",
        ) {
            let value = format!("{}{}", format_magnitude(tenths as f64 / 10.0), unit);
            let rescaled = scale_value(&value, 1.0, &fixed()).unwrap();
            prop_assert_eq!(rescaled, value);
        }
    }
}
