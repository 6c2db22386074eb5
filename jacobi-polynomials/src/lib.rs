//! Jacobi polynomial evaluation used by `jacobi-quadrature`.
//!
//! The quadrature generators only depend on the [`JacobiPolynomials`] capability, so alternative
//! evaluation strategies can be plugged in without touching the generators themselves.
use nalgebra::RealField;

pub use nalgebra;

pub use jacobi::{jacobi_p, jacobi_p_derivative, JacobiPolynomials, LogDomainJacobi, RecurrenceJacobi};

pub mod jacobi;

pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
