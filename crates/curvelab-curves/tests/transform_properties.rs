//! Properties of composite, shifted, rolled and translated curves.

use std::sync::Arc;

use approx::assert_relative_eq;
use curvelab_core::types::Date;
use curvelab_curves::prelude::*;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn shared(
    builder: CurveBuilder,
    interpolation: Interpolation,
    nodes: &[(Date, f64)],
) -> SharedCurve<f64> {
    Arc::new(
        builder
            .interpolation(interpolation)
            .nodes(nodes.iter().copied())
            .build::<f64>()
            .unwrap(),
    )
}

/// Pairs of curves sharing base date, day count and calendar.
fn curve_pairs() -> Vec<(SharedCurve<f64>, SharedCurve<f64>)> {
    let b = date(2024, 1, 1);
    vec![
        (
            shared(
                CurveBuilder::rate(),
                Interpolation::Linear,
                &[(b, 5.0), (date(2024, 6, 1), 4.6), (date(2025, 1, 1), 4.1)],
            ),
            shared(
                CurveBuilder::rate(),
                Interpolation::FlatForward,
                &[(b, 0.1), (date(2024, 3, 1), 0.15), (date(2025, 1, 1), 0.12)],
            ),
        ),
        (
            shared(
                CurveBuilder::discount(),
                Interpolation::LogLinear,
                &[(b, 1.0), (date(2024, 7, 1), 0.976), (date(2025, 1, 1), 0.951)],
            ),
            shared(
                CurveBuilder::discount(),
                Interpolation::Linear,
                &[(b, 1.0), (date(2024, 4, 1), 0.9985), (date(2025, 1, 1), 0.994)],
            ),
        ),
        (
            shared(
                CurveBuilder::discount(),
                Interpolation::FlatBackward,
                &[(b, 1.0), (date(2024, 2, 1), 0.9957), (date(2024, 12, 1), 0.953)],
            ),
            shared(
                CurveBuilder::discount(),
                Interpolation::Spline,
                &[
                    (b, 1.0),
                    (date(2024, 5, 1), 0.998),
                    (date(2024, 9, 1), 0.9962),
                    (date(2025, 1, 1), 0.9941),
                ],
            ),
        ),
        (
            shared(
                CurveBuilder::discount(),
                Interpolation::LinearZeroRate,
                &[(b, 1.0), (date(2024, 3, 1), 0.992), (date(2025, 1, 1), 0.952)],
            ),
            shared(
                CurveBuilder::discount(),
                Interpolation::LinearIndex,
                &[(b, 1.0), (date(2024, 10, 1), 0.996), (date(2025, 1, 1), 0.9948)],
            ),
        ),
    ]
}

#[test]
fn test_composite_rates_are_additive() {
    for (a, b) in curve_pairs() {
        for method in [CompoundingMethod::Exact, CompoundingMethod::Approximate] {
            let sum = CompositeCurve::new(vec![a.clone(), b.clone()], method).unwrap();
            let mut d = a.base_date();
            while d <= sum.final_date() {
                let expected = a.rate(d, None).unwrap() + b.rate(d, None).unwrap();
                assert_relative_eq!(sum.rate(d, None).unwrap(), expected, epsilon = 1e-12);
                d = d + 11;
            }
        }
    }
}

#[test]
fn test_composite_discount_factors_compound_both_curves() {
    let (a, b) = curve_pairs().swap_remove(1);
    let sum = CompositeCurve::new(vec![a.clone(), b.clone()], CompoundingMethod::Exact).unwrap();
    let d = date(2024, 10, 15);
    // product of DFs up to the cross terms of daily rates
    let product = a.df(d).unwrap() * b.df(d).unwrap();
    assert_relative_eq!(sum.df(d).unwrap(), product, max_relative = 1e-5);
    assert!(sum.df(d).unwrap() > product);
}

#[test]
fn test_composite_rejects_mixed_kinds() {
    let pairs = curve_pairs();
    let err = CompositeCurve::new(
        vec![pairs[0].0.clone(), pairs[1].0.clone()],
        CompoundingMethod::Exact,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Consistency);
}

#[test]
fn test_translate_round_trip() {
    let base = date(2024, 1, 1);
    let nodes = [
        (base, 1.0),
        (date(2024, 4, 1), 0.988),
        (date(2024, 9, 1), 0.969),
        (date(2025, 1, 1), 0.951),
    ];
    let mid = date(2024, 5, 20);

    for interpolation in Interpolation::ALL {
        let curve = shared(CurveBuilder::discount(), interpolation, &nodes);
        let moved = curve.translate(mid);
        if !interpolation.supports_translation() {
            let err = moved.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedOperation, "{interpolation}");
            continue;
        }

        let back = moved.unwrap().translate(base).unwrap();
        assert_eq!(back.base_date(), base);
        let mut d = base;
        while d <= curve.final_date() {
            assert_relative_eq!(
                back.df(d).unwrap(),
                curve.df(d).unwrap(),
                epsilon = 1e-10
            );
            d = d + 9;
        }
    }
}

#[test]
fn test_translate_rate_curve_is_unsupported() {
    let (line, _) = curve_pairs().swap_remove(0);
    let err = line.translate(date(2024, 2, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_roll_there_and_back_returns_the_curve() {
    let (curve, _) = curve_pairs().swap_remove(1);
    let rolled = curve.roll_days(45).unwrap();
    assert_eq!(rolled.final_date(), curve.final_date() + 45);
    let back = rolled.roll_days(-45).unwrap();
    assert!(Arc::ptr_eq(&back, &curve));
}

#[test]
fn test_roll_beyond_the_calendar_is_an_error() {
    let (curve, _) = curve_pairs().swap_remove(1);
    for days in [i64::MAX, i64::MIN, 100_000_000] {
        let err = curve.roll_days(days).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration, "{days}");
    }
    // accumulated rolls are checked too
    let rolled = curve.roll_days(30).unwrap();
    assert!(rolled.roll_days(i64::MAX).is_err());
}

#[test]
fn test_shift_of_composite_moves_the_sum() {
    for (a, b) in curve_pairs() {
        let sum: SharedCurve<f64> =
            Arc::new(CompositeCurve::new(vec![a, b], CompoundingMethod::Exact).unwrap());
        let shifted = sum.shift(0.05).unwrap();
        let d = date(2024, 8, 8);
        assert_relative_eq!(
            shifted.rate(d, None).unwrap(),
            sum.rate(d, None).unwrap() + 0.05,
            epsilon = 1e-10
        );
    }
}

#[test]
fn test_shift_sensitivity_through_dual_spread() {
    let curve: SharedCurve<Dual> = Arc::new(
        CurveBuilder::discount()
            .id("ois")
            .node(date(2024, 1, 1), 1.0)
            .node(date(2025, 1, 1), 0.95)
            .build::<Dual>()
            .unwrap(),
    );
    let spread = Dual::new(0.0, vec!["bump".to_string()]);
    let bumped = curve.shift(spread).unwrap();
    let rate = bumped.rate(date(2024, 6, 3), None).unwrap();
    let grad = rate.gradient(&["bump", "ois1"]);
    assert_relative_eq!(grad[0], 1.0, epsilon = 1e-12);
    assert!(grad[1] < 0.0);
}

proptest! {
    #[test]
    fn composite_of_lines_adds_values(
        a0 in -1.0f64..6.0,
        a1 in -1.0f64..6.0,
        b0 in -0.5f64..0.5,
        b1 in -0.5f64..0.5,
        offset in 0i64..=366,
    ) {
        let base = date(2024, 1, 1);
        let end = date(2025, 1, 1);
        let a = shared(CurveBuilder::rate(), Interpolation::Linear, &[(base, a0), (end, a1)]);
        let b = shared(CurveBuilder::rate(), Interpolation::Linear, &[(base, b0), (end, b1)]);
        let sum = CompositeCurve::new(vec![a.clone(), b.clone()], CompoundingMethod::Exact).unwrap();
        let d = base + offset;
        let expected = a.rate(d, None).unwrap() + b.rate(d, None).unwrap();
        prop_assert!((sum.rate(d, None).unwrap() - expected).abs() < 1e-12);
    }
}
