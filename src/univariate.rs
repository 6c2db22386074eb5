//! Quadrature rules for the one-dimensional domain `[-1, 1]`.
//!
//! The rules can be mapped to an arbitrary interval $[a, b]$ with [`map_to_interval`], which uses
//! <div>$$
//!   \int_a^b f(y) \, \mathrm{d}y
//!     = \frac{b - a}{2} \sum_{i} w_i f\left(\frac{(b - a) x_i + a + b}{2}\right).
//! $$</div>
use crate::newton::{refine_root, ConvergenceReport, NewtonSettings};
use crate::{check_buffer_len, Error, JacobiPolynomials, QuadratureRule, Real, RecurrenceJacobi};
use itertools::Itertools;
use log::debug;
use nalgebra::{convert, Point1};
use numeric_literals::replace_float_literals;
use std::cmp::Ordering;

/// Recurrence relation for Legendre polynomials.
///
/// Note: we use a formula for which derivatives are *not* defined at |x| == 1, so it is only
/// suitable for evaluation in the open interval (-1, 1).
#[derive(Debug, Clone, Copy)]
struct LegendreRecurrence<T> {
    n: usize,
    x: T,
    // The current value, i.e. p_n(x)
    p1: T,
    // The previous value in the recurrence, i.e. p_{n - 1}(x)
    p2: T,
}

impl<T: Real> LegendreRecurrence<T> {
    #[replace_float_literals(convert::<f64, T>(literal))]
    pub fn evaluate(n: usize, x: T) -> Self {
        // Use recurrence relation
        //  m P_m(x) = (2m - 1) * x P_{m - 1}(x) - (m - 1) P_{m - 2}(x)
        let mut p1 = 1.0;
        let mut p2 = 0.0;
        let mut p3;
        for m in 1..=n {
            let m: T = convert(m as f64);
            p3 = p2;
            p2 = p1;
            p1 = ((2.0 * m - 1.0) * x * p2 - (m - 1.0) * p3) / m;
        }

        Self { n, x, p1, p2 }
    }

    fn value(&self) -> T {
        self.p1
    }

    #[replace_float_literals(convert::<f64, T>(literal))]
    fn derivative(&self) -> T {
        let Self { n, x, p1, p2 } = *self;
        let n: T = convert(n as f64);
        // dp_n/dx (x) = n * (x * p_n(x) - p_{n - 1}(x)) / (x^2 - 1)
        n * (x * p1 - p2) / (x * x - 1.0)
    }

    fn value_and_derivative(&self) -> (T, T) {
        (self.value(), self.derivative())
    }
}

/// Gauss-Legendre quadrature for the reference interval `[-1, 1]`.
///
/// Returns the [Gauss quadrature rule] with `num_points` points, which integrates polynomials
/// of degree up to `2 n - 1` exactly. Points are sorted in ascending order.
///
/// [Gauss quadrature rule]: https://en.wikipedia.org/wiki/Gaussian_quadrature
pub fn gauss_legendre<T: Real>(num_points: usize) -> Result<QuadratureRule<T, 1>, Error> {
    gauss_legendre_with_settings(num_points, &NewtonSettings::default())
}

/// Same as [`gauss_legendre`], but with explicit Newton settings.
pub fn gauss_legendre_with_settings<T: Real>(
    num_points: usize,
    settings: &NewtonSettings<T>,
) -> Result<QuadratureRule<T, 1>, Error> {
    let mut points = vec![T::zero(); num_points];
    let mut weights = vec![T::zero(); num_points];
    let report = gauss_legendre_into(&mut points, &mut weights, settings)?;
    Ok(into_rule(weights, points, report))
}

/// Computes the Gauss-Legendre rule with `points.len()` points into the given buffers.
///
/// Only the first half of the roots is refined, the remaining roots follow from the symmetry
/// $P_n(-x) = (-1)^n P_n(x)$. The returned report therefore contains $\lceil n / 2 \rceil$
/// entries.
///
/// # Errors
///
/// Returns [`Error::ZeroPoints`] for empty buffers and [`Error::BufferSizeMismatch`] if the
/// buffers differ in length.
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn gauss_legendre_into<T: Real>(
    points: &mut [T],
    weights: &mut [T],
    settings: &NewtonSettings<T>,
) -> Result<ConvergenceReport<T>, Error> {
    let n = points.len();
    check_buffer_len(n, weights.len())?;
    if n == 0 {
        return Err(Error::ZeroPoints);
    }

    let n_t: T = convert(n as f64);
    let m = (n + 1) / 2;
    let mut report = ConvergenceReport::with_capacity(m);

    // Only find the first m roots. The remaining roots can be found by symmetry
    for i in 1..=m {
        let i_t: T = convert(i as f64);
        // Asymptotic initial guess for the i-th largest root
        let x0 = (T::pi() * (4.0 * i_t - 1.0) / (4.0 * n_t + 2.0)).cos();
        let root = refine_root(x0, i - 1, settings, |x| {
            LegendreRecurrence::evaluate(n, x).value_and_derivative()
        })?;
        let x = root.x;
        let dp = root.derivative;

        // Once a root is known, its corresponding weight is given explicitly by a standard
        // formula
        let w = 2.0 / ((1.0 - x * x) * dp * dp);
        if !w.is_finite() {
            return Err(Error::NonFiniteValue { root_index: i - 1 });
        }

        points[i - 1] = -x;
        points[n - i] = x;
        weights[i - 1] = w;
        weights[n - i] = w;
        report.push(root.convergence);
    }

    debug!(
        "Computed {}-point Gauss-Legendre rule (max. {} Newton iterations per root)",
        n,
        report.max_iterations()
    );
    Ok(report)
}

/// Gauss-Jacobi quadrature for the weight function $(1 - x)^a (1 + x)^b$ on `[-1, 1]`.
///
/// Integrates $\int_{-1}^1 f(x) (1 - x)^a (1 + x)^b \, \mathrm{d}x$ exactly for polynomials $f$
/// of degree up to `2 n - 1`. Polynomials are evaluated with [`RecurrenceJacobi`].
///
/// Points are sorted in *descending* order.
pub fn gauss_jacobi<T: Real>(num_points: usize, a: u32, b: u32) -> Result<QuadratureRule<T, 1>, Error> {
    gauss_jacobi_with(num_points, a, b, &RecurrenceJacobi, &NewtonSettings::default())
}

/// Same as [`gauss_jacobi`], but with explicit polynomial evaluation and Newton settings.
pub fn gauss_jacobi_with<T, P>(
    num_points: usize,
    a: u32,
    b: u32,
    polynomials: &P,
    settings: &NewtonSettings<T>,
) -> Result<QuadratureRule<T, 1>, Error>
where
    T: Real,
    P: JacobiPolynomials,
{
    let mut points = vec![T::zero(); num_points];
    let mut weights = vec![T::zero(); num_points];
    let report = gauss_jacobi_into(&mut points, &mut weights, a, b, polynomials, settings)?;
    Ok(into_rule(weights, points, report))
}

/// Computes the Gauss-Jacobi rule with `points.len()` points into the given buffers.
///
/// The exponents `a` and `b` are unsigned, so the weight function is always integrable.
/// Each root is refined independently from its asymptotic initial guess, and the resulting
/// points are checked to be distinct.
///
/// # Errors
///
/// In addition to the buffer errors of [`gauss_legendre_into`], returns
/// [`Error::NonFiniteNormalization`] if the factorials of the weight normalization cannot be
/// represented by the given polynomial service, and [`Error::DuplicateRoot`] if two initial
/// guesses converged to the same root.
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn gauss_jacobi_into<T, P>(
    points: &mut [T],
    weights: &mut [T],
    a: u32,
    b: u32,
    polynomials: &P,
    settings: &NewtonSettings<T>,
) -> Result<ConvergenceReport<T>, Error>
where
    T: Real,
    P: JacobiPolynomials,
{
    let n = points.len();
    check_buffer_len(n, weights.len())?;
    if n == 0 {
        return Err(Error::ZeroPoints);
    }

    let weight_factor: T = jacobi_weight_factor(n, a, b, polynomials)?;
    let degree = n as u32;
    let n_t: T = convert(n as f64);
    let a_t: T = convert(a as f64);
    let b_t: T = convert(b as f64);
    let mut report = ConvergenceReport::with_capacity(n);

    for i in 1..=n {
        let i_t: T = convert(i as f64);
        let x0 = (T::pi() * (0.5 * a_t + i_t - 0.25) / (0.5 * (1.0 + a_t + b_t) + n_t)).cos();
        let root = refine_root(x0, i - 1, settings, |x| {
            (
                polynomials.jacobi_p(degree, a, b, x),
                polynomials.jacobi_p_derivative(degree, a, b, x),
            )
        })?;
        let x = root.x;

        let w = weight_factor / (polynomials.jacobi_p(degree + 1, a, b, x) * root.derivative);
        if !w.is_finite() {
            return Err(Error::NonFiniteValue { root_index: i - 1 });
        }

        points[i - 1] = x;
        weights[i - 1] = w;
        report.push(root.convergence);
    }

    check_distinct_roots(points)?;

    debug!(
        "Computed {}-point Gauss-Jacobi rule with exponents ({}, {}) (max. {} Newton iterations per root)",
        n,
        a,
        b,
        report.max_iterations()
    );
    Ok(report)
}

/// Normalization constant of the Gauss-Jacobi weights,
/// <div>$$
///   -\frac{(2n + a + b + 2) (n + a)! (n + b)! 2^{a + b}}{(n + a + b + 1) (n + a + b)! (n + 1)!},
/// $$</div>
/// evaluated as a ratio of logarithms.
#[replace_float_literals(convert::<f64, T>(literal))]
fn jacobi_weight_factor<T, P>(n: usize, a: u32, b: u32, polynomials: &P) -> Result<T, Error>
where
    T: Real,
    P: JacobiPolynomials,
{
    let k = n as u32;
    let n_t: T = convert(n as f64);
    let a_t: T = convert(a as f64);
    let b_t: T = convert(b as f64);

    let ln_factor = (2.0 * n_t + a_t + b_t + 2.0).ln()
        + polynomials.ln_factorial::<T>(k + a)
        + polynomials.ln_factorial::<T>(k + b)
        + (a_t + b_t) * T::ln_2()
        - (n_t + a_t + b_t + 1.0).ln()
        - polynomials.ln_factorial::<T>(k + a + b)
        - polynomials.ln_factorial::<T>(k + 1);

    let factor = -ln_factor.exp();
    if factor.is_finite() {
        Ok(factor)
    } else {
        Err(Error::NonFiniteNormalization { n, a, b })
    }
}

/// Checks that no two points coincide.
///
/// Distinct Gauss points are separated by far more than the square root of machine precision
/// for all practical orders, whereas Newton iterations that converged to the same root agree to
/// a few ulps.
fn check_distinct_roots<T: Real>(points: &[T]) -> Result<(), Error> {
    let tol = T::default_epsilon().sqrt();
    let sorted = (0..points.len())
        .sorted_by(|&i, &j| points[i].partial_cmp(&points[j]).unwrap_or(Ordering::Equal))
        .collect_vec();

    for (&i, &j) in sorted.iter().tuple_windows() {
        if (points[j] - points[i]).abs() <= tol {
            return Err(Error::DuplicateRoot {
                first: i.min(j),
                second: i.max(j),
            });
        }
    }
    Ok(())
}

/// Integral of the Gauss-Jacobi weight function over `[-1, 1]`,
/// <div>$$
///   \int_{-1}^1 (1 - x)^a (1 + x)^b \, \mathrm{d}x = 2^{a + b + 1} \frac{a! \, b!}{(a + b + 1)!}.
/// $$</div>
///
/// Equivalently $2^{a + b + 1} B(a + 1, b + 1)$ in terms of the Beta function. This is the
/// sum of weights of every Gauss-Jacobi rule with exponents `a` and `b`.
pub fn exact_jacobi_weight_integral<T: Real>(a: u32, b: u32) -> T {
    let polynomials = RecurrenceJacobi;
    let a_t: T = convert(a as f64);
    let b_t: T = convert(b as f64);
    let one = T::one();
    let ln_integral = (a_t + b_t + one) * T::ln_2() + polynomials.ln_factorial::<T>(a)
        + polynomials.ln_factorial::<T>(b)
        - polynomials.ln_factorial::<T>(a + b + 1);
    ln_integral.exp()
}

/// Maps a rule on `[-1, 1]` to the interval `[a, b]`.
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn map_to_interval<T: Real>(rule: &QuadratureRule<T, 1>, a: T, b: T) -> QuadratureRule<T, 1> {
    use crate::Quadrature;
    let half_length = 0.5 * (b - a);
    let midpoint = 0.5 * (a + b);
    let weights = rule.weights().iter().map(|&w| half_length * w).collect();
    let points = rule
        .points()
        .iter()
        .map(|p| Point1::new(half_length * p.x + midpoint))
        .collect();
    QuadratureRule::from_parts(weights, points, rule.report().clone())
}

fn into_rule<T: Real>(weights: Vec<T>, points: Vec<T>, report: ConvergenceReport<T>) -> QuadratureRule<T, 1> {
    let points = points.into_iter().map(Point1::new).collect();
    QuadratureRule::from_parts(weights, points, report)
}
