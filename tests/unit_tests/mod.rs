mod legendre;
mod triangle;

/// Exact integral of $x^k$ over $[-1, 1]$.
pub fn monomial_integral_1d(k: i32) -> f64 {
    (1.0 - (-1.0f64).powi(k + 1)) / (k as f64 + 1.0)
}
