//! Collocation solves: interpolation round trips and underdetermined systems.

use approx::assert_abs_diff_eq;
use curvelab_math::prelude::*;
use proptest::prelude::*;

fn clamped_knots(interior: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let mut t = vec![lo; 4];
    t.extend_from_slice(interior);
    t.extend(std::iter::repeat(hi).take(4));
    t
}

fn greville(t: &[f64], k: usize) -> Vec<f64> {
    let n = t.len() - k - 1;
    (0..n)
        .map(|i| t[i + 1..=i + k].iter().sum::<f64>() / k as f64)
        .collect()
}

proptest! {
    #[test]
    fn csolve_reproduces_targets(
        gaps in prop::collection::vec(0.5f64..2.0, 1..6),
        ys in prop::collection::vec(-5.0f64..5.0, 10),
    ) {
        let mut interior = Vec::new();
        let mut acc = 0.0;
        for g in &gaps {
            acc += g;
            interior.push(acc);
        }
        let hi = acc + 1.0;
        let t = clamped_knots(&interior, 0.0, hi);
        let tau = greville(&t, 3);
        let y = &ys[..tau.len()];

        let mut s = PPSpline::<f64>::new(3, t, None).unwrap();
        s.csolve(&tau, y, 0, 0, false).unwrap();
        for (x, target) in tau.iter().zip(y) {
            prop_assert!((s.ppev_single(*x).unwrap() - target).abs() < 1e-10);
        }
    }
}

#[test]
fn underdetermined_cubic_through_three_points() {
    let mut s = PPSpline::<f64>::new(3, vec![0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0], None).unwrap();
    let tau = [1.0, 2.0, 3.0];
    let y = [1.0, 1.2, 1.5];
    assert!(matches!(
        s.csolve(&tau, &y, 0, 0, false),
        Err(MathError::Configuration { .. })
    ));
    s.csolve(&tau, &y, 0, 0, true).unwrap();
    assert_abs_diff_eq!(s.ppev_single(1.0).unwrap(), 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(s.ppev_single(2.0).unwrap(), 1.2, epsilon = 1e-10);
    assert_abs_diff_eq!(s.ppev_single(3.0).unwrap(), 1.5, epsilon = 1e-10);
}

#[test]
fn overdetermined_fit_is_least_squares() {
    // five noisy samples of a line fitted by a linear spline with two coefficients
    let mut s = PPSpline::<f64>::new(1, vec![0.0, 0.0, 4.0, 4.0], None).unwrap();
    let tau = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 1.6, 1.9, 2.6, 3.0];
    s.csolve(&tau, &y, 0, 0, true).unwrap();
    let residual_sum: f64 = tau
        .iter()
        .zip(y)
        .map(|(x, v)| s.ppev_single(*x).unwrap() - v)
        .sum();
    assert_abs_diff_eq!(residual_sum, 0.0, epsilon = 1e-10);
}

#[test]
fn natural_spline_sensitivities_sum_to_one() {
    // moving every target by the same amount shifts the whole spline
    let t = clamped_knots(&[1.0, 2.0, 3.0], 0.0, 4.0);
    let tau = [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 4.0];
    let vars = var_set(["y0", "y1", "y2", "y3", "y4"]).unwrap();
    let ys = Dual::seed(&[0.1, 0.4, 0.2, 0.5, 0.3], &vars).unwrap();
    let mut y = vec![Dual::constant(0.0)];
    y.extend(ys);
    y.push(Dual::constant(0.0));

    let mut s = PPSpline::<Dual>::new(3, t, None).unwrap();
    s.csolve(&tau, &y, 2, 2, false).unwrap();
    for x in [0.5, 1.7, 3.9] {
        let v = s.ppev_single(x).unwrap();
        let total: f64 = v.gradient(&["y0", "y1", "y2", "y3", "y4"]).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-10);
    }
}
