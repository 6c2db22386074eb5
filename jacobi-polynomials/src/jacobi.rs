//! Jacobi polynomials $P_n^{(a, b)}$ and related special functions.
//!
//! The polynomials are normalized in the standard way, i.e. such that
//! $P_n^{(a, b)}(1) = \binom{n + a}{n}$. For $a = b = 0$ they coincide with the Legendre
//! polynomials.
use crate::Real;
use nalgebra::convert;
use numeric_literals::replace_float_literals;

/// Stateless evaluation of factorials and Jacobi polynomials.
///
/// Implementations must be pure functions of their arguments.
pub trait JacobiPolynomials {
    /// Returns `k!`.
    fn factorial<T: Real>(&self, k: u32) -> T;

    /// Returns `ln(k!)`.
    ///
    /// The default implementation takes the logarithm of [`factorial`](Self::factorial), which
    /// overflows once `k > 170` in double precision.
    fn ln_factorial<T: Real>(&self, k: u32) -> T {
        self.factorial::<T>(k).ln()
    }

    /// Evaluates $P_n^{(a, b)}(x)$ with `n = degree`.
    fn jacobi_p<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T;

    /// Evaluates the first derivative of $P_n^{(a, b)}$ at `x`.
    fn jacobi_p_derivative<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T;
}

/// Evaluates Jacobi polynomials by their three-term recurrence and factorials by direct products.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceJacobi;

impl JacobiPolynomials for RecurrenceJacobi {
    fn factorial<T: Real>(&self, k: u32) -> T {
        (2..=k).fold(T::one(), |acc, i| acc * convert::<f64, T>(i as f64))
    }

    fn jacobi_p<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T {
        jacobi_p(degree, a, b, x)
    }

    fn jacobi_p_derivative<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T {
        jacobi_p_derivative(degree, a, b, x)
    }
}

/// Like [`RecurrenceJacobi`], but accumulates factorials as sums of logarithms.
///
/// Ratios of factorials formed through [`JacobiPolynomials::ln_factorial`] then stay finite
/// for large arguments.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LogDomainJacobi;

impl JacobiPolynomials for LogDomainJacobi {
    fn factorial<T: Real>(&self, k: u32) -> T {
        self.ln_factorial::<T>(k).exp()
    }

    fn ln_factorial<T: Real>(&self, k: u32) -> T {
        (2..=k).fold(T::zero(), |acc, i| acc + convert::<f64, T>(i as f64).ln())
    }

    fn jacobi_p<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T {
        jacobi_p(degree, a, b, x)
    }

    fn jacobi_p_derivative<T: Real>(&self, degree: u32, a: u32, b: u32, x: T) -> T {
        jacobi_p_derivative(degree, a, b, x)
    }
}

/// Evaluates $P_n^{(a, b)}(x)$ with the standard three-term recurrence.
///
/// Starting from $P_0 = 1$ and $P_1 = \frac{1}{2}((a - b) + (a + b + 2) x)$, we use
/// <div>$$
///   2k (k + a + b)(2k + a + b - 2) P_k
///     = (2k + a + b - 1) \left[ (2k + a + b)(2k + a + b - 2) x + a^2 - b^2 \right] P_{k - 1}
///     - 2 (k + a - 1)(k + b - 1)(2k + a + b) P_{k - 2}.
/// $$</div>
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn jacobi_p<T: Real>(degree: u32, a: u32, b: u32, x: T) -> T {
    let a_: T = convert(a as f64);
    let b_: T = convert(b as f64);

    if degree == 0 {
        return 1.0;
    }

    let mut p_prev = 1.0;
    let mut p = 0.5 * ((a_ - b_) + (a_ + b_ + 2.0) * x);

    for k in 2..=degree {
        let k: T = convert(k as f64);
        let c = 2.0 * k + a_ + b_;
        let denom = 2.0 * k * (k + a_ + b_) * (c - 2.0);
        let linear = (c - 1.0) * (c * (c - 2.0) * x + a_ * a_ - b_ * b_);
        let constant = 2.0 * (k + a_ - 1.0) * (k + b_ - 1.0) * c;
        let p_next = (linear * p - constant * p_prev) / denom;
        p_prev = p;
        p = p_next;
    }

    p
}

/// Evaluates the first derivative of $P_n^{(a, b)}$ at `x`.
///
/// Uses the identity
/// $\frac{d}{dx} P_n^{(a, b)}(x) = \frac{n + a + b + 1}{2} P_{n - 1}^{(a + 1, b + 1)}(x)$,
/// which, unlike the Legendre-specific formula, is valid on the closed interval.
#[replace_float_literals(convert::<f64, T>(literal))]
pub fn jacobi_p_derivative<T: Real>(degree: u32, a: u32, b: u32, x: T) -> T {
    if degree == 0 {
        return 0.0;
    }
    let scale: T = convert((degree + a + b + 1) as f64);
    0.5 * scale * jacobi_p(degree - 1, a + 1, b + 1, x)
}
