//! Collapsed-coordinate quadrature for the reference triangle.
//!
//! The reference triangle has vertices $(0, 0)$, $(1, 0)$ and $(0, 1)$. Rules are built from two
//! Gauss-Jacobi rules on $[-1, 1]$ through the (Duffy-type) map
//! <div>$$
//!   x = \frac{1}{2} (1 + \xi), \qquad y = \frac{1}{4} (1 + \eta)(1 - \xi),
//! $$</div>
//! whose Jacobian determinant $\frac{1}{8}(1 - \xi)$ degenerates at $\xi = 1$. The outer rule in
//! $\xi$ uses the Jacobi weight $(1 - \xi)$, which absorbs the Jacobian and keeps the exactness of
//! the one-dimensional rules: the $n^2$-point rule integrates polynomials of total degree up to
//! `2 n - 1` exactly.
use crate::newton::{ConvergenceReport, NewtonSettings};
use crate::univariate::gauss_jacobi_into;
use crate::{check_buffer_len, Error, JacobiPolynomials, QuadratureRule, Real, RecurrenceJacobi};
use itertools::izip;
use log::debug;
use nalgebra::{convert, Point2};
use numeric_literals::replace_float_literals;

/// Collapsed Gauss-Jacobi quadrature for the reference triangle.
///
/// Returns an $n^2$-point rule, with `n = num_points_per_dim`. Polynomials are evaluated with
/// [`RecurrenceJacobi`].
pub fn triangle_collapsed<T: Real>(num_points_per_dim: usize) -> Result<QuadratureRule<T, 2>, Error> {
    triangle_collapsed_with(num_points_per_dim, &RecurrenceJacobi, &NewtonSettings::default())
}

/// Same as [`triangle_collapsed`], but with explicit polynomial evaluation and Newton settings.
pub fn triangle_collapsed_with<T, P>(
    num_points_per_dim: usize,
    polynomials: &P,
    settings: &NewtonSettings<T>,
) -> Result<QuadratureRule<T, 2>, Error>
where
    T: Real,
    P: JacobiPolynomials,
{
    let n = num_points_per_dim;
    let mut points = vec![[T::zero(); 2]; n * n];
    let mut weights = vec![T::zero(); n * n];
    let report = triangle_collapsed_into(&mut points, &mut weights, n, polynomials, settings)?;
    let points = points.into_iter().map(Point2::from).collect();
    Ok(QuadratureRule::from_parts(weights, points, report))
}

/// Computes the collapsed $n^2$-point triangle rule into the given buffers.
///
/// The point with flat index `i * n + j` combines the `i`-th point of the outer $(1, 0)$
/// Gauss-Jacobi rule with the `j`-th point of the inner Gauss-Legendre rule. The returned report
/// lists the roots of the outer rule followed by those of the inner rule.
///
/// # Errors
///
/// Returns [`Error::ZeroPoints`] if `n == 0`, [`Error::BufferSizeMismatch`] if either buffer
/// does not have length $n^2$, and propagates any error from the underlying Gauss-Jacobi rules.
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn triangle_collapsed_into<T, P>(
    points: &mut [[T; 2]],
    weights: &mut [T],
    num_points_per_dim: usize,
    polynomials: &P,
    settings: &NewtonSettings<T>,
) -> Result<ConvergenceReport<T>, Error>
where
    T: Real,
    P: JacobiPolynomials,
{
    let n = num_points_per_dim;
    if n == 0 {
        return Err(Error::ZeroPoints);
    }
    check_buffer_len(n * n, points.len())?;
    check_buffer_len(n * n, weights.len())?;

    let mut inner_points = vec![T::zero(); n];
    let mut inner_weights = vec![T::zero(); n];
    let mut outer_points = vec![T::zero(); n];
    let mut outer_weights = vec![T::zero(); n];

    let inner_report = gauss_jacobi_into(&mut inner_points, &mut inner_weights, 0, 0, polynomials, settings)?;
    let mut report = gauss_jacobi_into(&mut outer_points, &mut outer_weights, 1, 0, polynomials, settings)?;
    report.extend(inner_report);

    for (i, (&xi, &w_outer)) in izip!(&outer_points, &outer_weights).enumerate() {
        for (j, (&eta, &w_inner)) in izip!(&inner_points, &inner_weights).enumerate() {
            let idx = i * n + j;
            points[idx] = [0.5 * (1.0 + xi), 0.25 * (1.0 + eta) * (1.0 - xi)];
            weights[idx] = w_outer * w_inner * 0.125;
        }
    }

    debug!("Computed {}-point collapsed triangle rule", n * n);
    Ok(report)
}
