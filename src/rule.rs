use crate::newton::ConvergenceReport;
use nalgebra::{Point, Scalar};
use num::Zero;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::{AddAssign, Mul};
use std::slice;

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T, const D: usize>
where
    T: Scalar,
{
    fn weights(&self) -> &[T];
    fn points(&self) -> &[Point<T, D>];

    /// Approximates the integral of the given function using this quadrature rule.
    fn integrate<U, Function>(&self, f: Function) -> U
    where
        Function: Fn(&Point<T, D>) -> U,
        U: Zero + Mul<T, Output = U> + AddAssign<U>,
    {
        let mut integral = U::zero();
        for (w, p) in self.weights().iter().zip(self.points()) {
            integral += f(p) * w.clone();
        }
        integral
    }

    fn iter(&self) -> QuadratureIter<T, D> {
        QuadratureIter {
            weights_iter: self.weights().iter(),
            points_iter: self.points().iter(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuadratureIter<'a, T, const D: usize>
where
    T: Scalar,
{
    weights_iter: slice::Iter<'a, T>,
    points_iter: slice::Iter<'a, Point<T, D>>,
}

impl<'a, T, const D: usize> Iterator for QuadratureIter<'a, T, D>
where
    T: Scalar,
{
    type Item = (&'a T, &'a Point<T, D>);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.weights_iter.next()?, self.points_iter.next()?))
    }
}

impl<'a, T, const D: usize> DoubleEndedIterator for QuadratureIter<'a, T, D>
where
    T: Scalar,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.weights_iter.next_back()?, self.points_iter.next_back()?))
    }
}

impl<'a, T, const D: usize> FusedIterator for QuadratureIter<'a, T, D> where T: Scalar {}

/// A quadrature rule owning its weights and points.
///
/// Also carries the [`ConvergenceReport`] of the root refinement that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadratureRule<T: Scalar, const D: usize> {
    weights: Vec<T>,
    points: Vec<Point<T, D>>,
    report: ConvergenceReport<T>,
}

impl<T: Scalar, const D: usize> QuadratureRule<T, D> {
    /// Assembles a rule from its parts.
    ///
    /// # Panics
    ///
    /// Panics if the number of weights and points differ.
    pub fn from_parts(weights: Vec<T>, points: Vec<Point<T, D>>, report: ConvergenceReport<T>) -> Self {
        assert_eq!(weights.len(), points.len(), "Number of weights and points must agree");
        Self { weights, points, report }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn report(&self) -> &ConvergenceReport<T> {
        &self.report
    }

    /// Returns weights, points and report.
    pub fn into_parts(self) -> (Vec<T>, Vec<Point<T, D>>, ConvergenceReport<T>) {
        (self.weights, self.points, self.report)
    }
}

impl<T: Scalar, const D: usize> Quadrature<T, D> for QuadratureRule<T, D> {
    fn weights(&self) -> &[T] {
        &self.weights
    }

    fn points(&self) -> &[Point<T, D>] {
        &self.points
    }
}

impl<T, const D: usize, A, B> Quadrature<T, D> for (A, B)
where
    T: Scalar,
    A: AsRef<[T]>,
    B: AsRef<[Point<T, D>]>,
{
    fn weights(&self) -> &[T] {
        self.0.as_ref()
    }

    fn points(&self) -> &[Point<T, D>] {
        self.1.as_ref()
    }
}

impl<T, const D: usize, X> Quadrature<T, D> for &X
where
    T: Scalar,
    X: Quadrature<T, D>,
{
    fn weights(&self) -> &[T] {
        X::weights(self)
    }

    fn points(&self) -> &[Point<T, D>] {
        X::points(self)
    }
}
