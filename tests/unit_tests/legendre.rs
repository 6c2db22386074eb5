use crate::unit_tests::monomial_integral_1d;
use jacobi_quadrature::univariate::{gauss_legendre, gauss_legendre_into, gauss_legendre_with_settings};
use jacobi_quadrature::{Error, NewtonSettings, Quadrature};
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;

#[test]
fn gauss_legendre_rules_satisfy_expected_accuracy() {
    for n in 1..=50 {
        let expected_polynomial_degree = 2 * n - 1;
        let rule = gauss_legendre::<f64>(n).unwrap();
        assert_eq!(rule.len(), n);

        // Also test that weights are positive
        assert!(rule.weights().iter().all(|&w| w > 0.0));

        // Integrate all monomials of degree <= expected polynomial degree that can be
        // exactly integrated
        for alpha in 0..=expected_polynomial_degree as i32 {
            let estimated_integral = rule.integrate(|x| x[0].powi(alpha));
            assert_scalar_eq!(estimated_integral, monomial_integral_1d(alpha), comp = abs, tol = 1e-10);
        }
    }
}

#[test]
fn gauss_legendre_weights_sum_to_interval_length() {
    for n in 1..=100 {
        let rule = gauss_legendre::<f64>(n).unwrap();
        let weight_sum: f64 = rule.weights().iter().sum();
        assert_scalar_eq!(weight_sum, 2.0, comp = abs, tol = 1e-12);
    }
}

#[test]
fn gauss_legendre_points_are_sorted_and_inside_interval() {
    for n in 1..=60 {
        let rule = gauss_legendre::<f64>(n).unwrap();
        let points: Vec<f64> = rule.points().iter().map(|p| p.x).collect();
        assert!(points.iter().all(|&x| x > -1.0 && x < 1.0));
        assert!(points.windows(2).all(|pair| pair[0] < pair[1]), "n = {n}");
    }
}

#[test]
fn gauss_legendre_two_points() {
    let rule = gauss_legendre::<f64>(2).unwrap();
    let expected_points = [-0.5773502691896257, 0.5773502691896257];
    for (p, expected) in rule.points().iter().zip(expected_points) {
        assert_scalar_eq!(p.x, expected, comp = abs, tol = 1e-10);
    }
    for &w in rule.weights() {
        assert_scalar_eq!(w, 1.0, comp = abs, tol = 1e-10);
    }
    assert!(rule.report().all_converged());
    assert_eq!(rule.report().roots().len(), 1);
}

#[test]
fn gauss_legendre_single_point_is_midpoint_rule() {
    let rule = gauss_legendre::<f64>(1).unwrap();
    assert_scalar_eq!(rule.points()[0].x, 0.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(rule.weights()[0], 2.0, comp = abs, tol = 1e-15);
}

#[test]
fn gauss_legendre_into_matches_allocating_variant() {
    let settings = NewtonSettings::default();
    for n in [1, 4, 7, 16] {
        let mut points = vec![0.0; n];
        let mut weights = vec![0.0; n];
        let report = gauss_legendre_into(&mut points, &mut weights, &settings).unwrap();
        let rule = gauss_legendre::<f64>(n).unwrap();

        assert_eq!(weights, rule.weights());
        assert!(points.iter().zip(rule.points()).all(|(x, p)| *x == p.x));
        assert_eq!(&report, rule.report());
        assert_eq!(report.roots().len(), (n + 1) / 2);
    }
}

#[test]
fn gauss_legendre_rejects_invalid_buffers() {
    assert_eq!(gauss_legendre::<f64>(0).unwrap_err(), Error::ZeroPoints);

    let settings = NewtonSettings::default();
    let mut points = vec![0.0; 3];
    let mut weights = vec![0.0; 4];
    assert_eq!(
        gauss_legendre_into(&mut points, &mut weights, &settings),
        Err(Error::BufferSizeMismatch { expected: 3, actual: 4 })
    );
}

#[test]
fn gauss_legendre_reports_iteration_cap() {
    // A negative tolerance can never be met, so every root hits the iteration cap
    let settings = NewtonSettings::default()
        .with_tolerance(-1.0)
        .with_max_iterations(5);
    let rule = gauss_legendre_with_settings::<f64>(6, &settings).unwrap();
    let report = rule.report();

    assert!(!report.all_converged());
    assert_eq!(report.unconverged().count(), 3);
    assert_eq!(report.max_iterations(), 5);

    // Newton converges quadratically, so the rule is accurate regardless
    let weight_sum: f64 = rule.weights().iter().sum();
    assert_scalar_eq!(weight_sum, 2.0, comp = abs, tol = 1e-12);
}

proptest! {
    #[test]
    fn gauss_legendre_rule_is_symmetric(n in 1usize..80) {
        let rule = gauss_legendre::<f64>(n).unwrap();
        let points = rule.points();
        let weights = rule.weights();
        for i in 0..n {
            prop_assert!((points[i].x + points[n - 1 - i].x).abs() <= 1e-14);
            prop_assert_eq!(weights[i], weights[n - 1 - i]);
        }
    }
}
