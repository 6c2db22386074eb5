//! Scalar Newton iteration for refining polynomial roots.
use crate::{Error, Real};
use log::{debug, warn};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Parameters controlling the Newton refinement of each root.
///
/// A root is considered converged once the magnitude of the polynomial at the current iterate
/// drops to `tolerance` or below. At most `max_iterations` Newton steps are taken per root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewtonSettings<T> {
    pub max_iterations: usize,
    pub tolerance: T,
}

impl<T: Real> Default for NewtonSettings<T> {
    #[replace_float_literals(nalgebra::convert::<f64, T>(literal))]
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 10.0 * T::default_epsilon(),
        }
    }
}

impl<T> NewtonSettings<T> {
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self { max_iterations, ..self }
    }

    pub fn with_tolerance(self, tolerance: T) -> Self {
        Self { tolerance, ..self }
    }
}

/// Outcome of refining a single root.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConvergence<T> {
    /// Number of Newton steps taken.
    pub iterations: usize,
    /// Magnitude of the polynomial at the returned root.
    pub residual: T,
    /// Whether the residual reached the requested tolerance.
    pub converged: bool,
}

/// Convergence outcomes for all roots refined while generating a rule.
///
/// Rules are still returned when some roots did not converge. Callers that need guaranteed
/// accuracy should inspect [`all_converged`](Self::all_converged).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvergenceReport<T> {
    roots: Vec<RootConvergence<T>>,
}

impl<T: Real> ConvergenceReport<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            roots: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, root: RootConvergence<T>) {
        self.roots.push(root);
    }

    /// Appends the outcomes of another report.
    pub fn extend(&mut self, other: ConvergenceReport<T>) {
        self.roots.extend(other.roots);
    }

    pub fn roots(&self) -> &[RootConvergence<T>] {
        &self.roots
    }

    pub fn all_converged(&self) -> bool {
        self.roots.iter().all(|root| root.converged)
    }

    /// Indices (into [`roots`](Self::roots)) of the roots that did not converge.
    pub fn unconverged(&self) -> impl Iterator<Item = usize> + '_ {
        self.roots
            .iter()
            .enumerate()
            .filter(|(_, root)| !root.converged)
            .map(|(idx, _)| idx)
    }

    pub fn max_iterations(&self) -> usize {
        self.roots
            .iter()
            .map(|root| root.iterations)
            .max()
            .unwrap_or(0)
    }

    pub fn max_residual(&self) -> T {
        self.roots
            .iter()
            .map(|root| root.residual)
            .fold(T::zero(), |max, r| if r > max { r } else { max })
    }
}

/// A root refined by [`refine_root`], together with the polynomial value and derivative there.
#[derive(Debug, Copy, Clone)]
pub(crate) struct RefinedRoot<T> {
    pub x: T,
    pub derivative: T,
    pub convergence: RootConvergence<T>,
}

/// Refines the root of `f` starting from the initial guess `x0`.
///
/// `value_and_derivative` must return $(f(x), f'(x))$. The returned derivative is always finite
/// and non-zero, since callers use it to form quadrature weights.
pub(crate) fn refine_root<T, F>(
    x0: T,
    root_index: usize,
    settings: &NewtonSettings<T>,
    mut value_and_derivative: F,
) -> Result<RefinedRoot<T>, Error>
where
    T: Real,
    F: FnMut(T) -> (T, T),
{
    let mut x = x0;
    let (mut p, mut dp) = value_and_derivative(x);
    let mut iter = 0;

    while p.abs() > settings.tolerance && iter < settings.max_iterations {
        if !is_usable_derivative(dp) {
            return Err(Error::VanishingDerivative { root_index, iteration: iter });
        }
        let dx = -p / dp;
        x += dx;
        let (p_new, dp_new) = value_and_derivative(x);
        p = p_new;
        dp = dp_new;
        iter += 1;
        debug!("Newton step {} for root {}: x = {:?}, |p(x)| = {:?}", iter, root_index, x, p.abs());
    }

    if !x.is_finite() || !p.is_finite() {
        return Err(Error::NonFiniteValue { root_index });
    }
    if !is_usable_derivative(dp) {
        return Err(Error::VanishingDerivative { root_index, iteration: iter });
    }

    let converged = p.abs() <= settings.tolerance;
    if !converged {
        warn!(
            "Root {} did not converge within {} Newton iterations (|p(x)| = {:?}, tolerance {:?})",
            root_index,
            settings.max_iterations,
            p.abs(),
            settings.tolerance
        );
    }

    Ok(RefinedRoot {
        x,
        derivative: dp,
        convergence: RootConvergence {
            iterations: iter,
            residual: p.abs(),
            converged,
        },
    })
}

fn is_usable_derivative<T: Real>(dp: T) -> bool {
    dp.is_finite() && dp != T::zero()
}
