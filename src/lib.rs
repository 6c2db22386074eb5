//! Gauss quadrature rules for the reference interval and the reference triangle.
//!
//! Three generators are provided:
//!
//! - [`univariate::gauss_legendre`]: the unweighted Gauss rule on $[-1, 1]$,
//! - [`univariate::gauss_jacobi`]: the Gauss rule on $[-1, 1]$ for the weight $(1 - x)^a (1 + x)^b$,
//! - [`triangle::triangle_collapsed`]: an $n^2$-point rule on the reference triangle with vertices
//!   $(0, 0)$, $(1, 0)$ and $(0, 1)$, obtained by collapsing a tensor product of two Gauss-Jacobi
//!   rules.
//!
//! Each generator comes in an allocating flavor returning a [`QuadratureRule`] and an `_into`
//! flavor that fills caller-provided buffers. Roots are refined with Newton's method, and the
//! outcome of every refinement is returned as a [`ConvergenceReport`] rather than being silently
//! discarded.
//!
//! Evaluation of Jacobi polynomials is delegated to an implementation of
//! [`JacobiPolynomials`], which is passed in explicitly.
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod newton;
pub mod rule;
pub mod triangle;
pub mod univariate;

pub use jacobi_polynomials::{JacobiPolynomials, LogDomainJacobi, Real, RecurrenceJacobi};
pub use newton::{ConvergenceReport, NewtonSettings, RootConvergence};
pub use rule::{Quadrature, QuadratureRule};

pub extern crate jacobi_polynomials;
pub extern crate nalgebra;

/// A one-dimensional quadrature rule.
pub type Rule1d<T> = QuadratureRule<T, 1>;

/// A two-dimensional quadrature rule.
pub type Rule2d<T> = QuadratureRule<T, 2>;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A rule with zero points was requested.
    ZeroPoints,
    /// An output buffer does not have the length required by the requested rule.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// Newton's method encountered a zero or non-finite derivative while refining a root.
    VanishingDerivative { root_index: usize, iteration: usize },
    /// A computed point or weight is not finite.
    NonFiniteValue { root_index: usize },
    /// Two roots converged to the same location.
    DuplicateRoot { first: usize, second: usize },
    /// The normalization constant of a Gauss-Jacobi rule is not representable.
    NonFiniteNormalization { n: usize, a: u32, b: u32 },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPoints => {
                write!(f, "A quadrature rule must have at least one point")
            }
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "Output buffer has length {actual}, but {expected} entries are required")
            }
            Self::VanishingDerivative { root_index, iteration } => {
                write!(
                    f,
                    "Derivative vanished or became non-finite while refining root {root_index} \
                     (Newton iteration {iteration})"
                )
            }
            Self::NonFiniteValue { root_index } => {
                write!(f, "Non-finite point or weight computed for root {root_index}")
            }
            Self::DuplicateRoot { first, second } => {
                write!(f, "Roots {first} and {second} converged to the same point")
            }
            Self::NonFiniteNormalization { n, a, b } => {
                write!(
                    f,
                    "Weight normalization of the {n}-point Gauss-Jacobi rule with exponents ({a}, {b}) \
                     is not finite"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

fn check_buffer_len(expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::BufferSizeMismatch { expected, actual })
    }
}
