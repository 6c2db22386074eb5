use jacobi_quadrature::triangle::{triangle_collapsed, triangle_collapsed_into};
use jacobi_quadrature::univariate::gauss_jacobi;
use jacobi_quadrature::{Error, NewtonSettings, Quadrature, RecurrenceJacobi};
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;

fn factorial(k: i32) -> f64 {
    (1..=k).map(|i| i as f64).product()
}

/// Exact integral of $x^p y^q$ over the reference triangle.
fn triangle_monomial_integral(p: i32, q: i32) -> f64 {
    factorial(p) * factorial(q) / factorial(p + q + 2)
}

#[test]
fn triangle_rules_satisfy_expected_accuracy() {
    for n in 1..=10 {
        let expected_polynomial_degree = 2 * n - 1;
        let rule = triangle_collapsed::<f64>(n).unwrap();
        assert_eq!(rule.len(), n * n);

        // Also test that weights are positive
        assert!(rule.weights().iter().all(|&w| w > 0.0));

        // Integrate all monomials of total degree <= expected polynomial degree
        for alpha in 0..=expected_polynomial_degree as i32 {
            for beta in 0..=(expected_polynomial_degree as i32 - alpha) {
                let estimated_integral = rule.integrate(|&p| p.x.powi(alpha) * p.y.powi(beta));
                assert_scalar_eq!(
                    estimated_integral,
                    triangle_monomial_integral(alpha, beta),
                    comp = abs,
                    tol = 1e-12
                );
            }
        }
    }
}

#[test]
fn triangle_weights_sum_to_area() {
    for n in 1..=25 {
        let rule = triangle_collapsed::<f64>(n).unwrap();
        let weight_sum: f64 = rule.weights().iter().sum();
        assert_scalar_eq!(weight_sum, 0.5, comp = abs, tol = 1e-12);
    }
}

#[test]
fn triangle_two_points_per_dim_integrates_xy() {
    let rule = triangle_collapsed::<f64>(2).unwrap();
    let integral = rule.integrate(|&p| p.x * p.y);
    assert_scalar_eq!(integral, 1.0 / 24.0, comp = abs, tol = 1e-8);
}

#[test]
fn triangle_points_follow_collapsed_map() {
    let n = 4;
    let inner = gauss_jacobi::<f64>(n, 0, 0).unwrap();
    let outer = gauss_jacobi::<f64>(n, 1, 0).unwrap();

    let settings = NewtonSettings::default();
    let mut points = vec![[0.0; 2]; n * n];
    let mut weights = vec![0.0; n * n];
    let report = triangle_collapsed_into(&mut points, &mut weights, n, &RecurrenceJacobi, &settings).unwrap();
    assert_eq!(report.roots().len(), 2 * n);

    for i in 0..n {
        for j in 0..n {
            let xi = outer.points()[i].x;
            let eta = inner.points()[j].x;
            let idx = i * n + j;
            assert_eq!(points[idx][0], 0.5 * (1.0 + xi));
            assert_eq!(points[idx][1], 0.25 * (1.0 + eta) * (1.0 - xi));
            assert_eq!(weights[idx], outer.weights()[i] * inner.weights()[j] * 0.125);
        }
    }
}

#[test]
fn triangle_rejects_invalid_buffers() {
    assert_eq!(triangle_collapsed::<f64>(0).unwrap_err(), Error::ZeroPoints);

    let settings = NewtonSettings::default();
    let mut points = vec![[0.0; 2]; 3];
    let mut weights = vec![0.0; 4];
    assert_eq!(
        triangle_collapsed_into(&mut points, &mut weights, 2, &RecurrenceJacobi, &settings),
        Err(Error::BufferSizeMismatch { expected: 4, actual: 3 })
    );
}

proptest! {
    #[test]
    fn triangle_points_lie_inside_reference_triangle(n in 1usize..30) {
        let rule = triangle_collapsed::<f64>(n).unwrap();
        for p in rule.points() {
            prop_assert!(p.x >= 0.0);
            prop_assert!(p.y >= 0.0);
            prop_assert!(p.x + p.y <= 1.0);
        }
    }
}
