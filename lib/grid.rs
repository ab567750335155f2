//! Uniform one-dimensional coordinate grids.

use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// Simple record describing a uniformly spaced coordinate grid.
///
/// Grid positions are `origin + step * i` for `i` in `0..len`. A `Grid` is
/// immutable once constructed and is cheap to copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    origin: f64,
    step: f64,
    n: usize,
}

impl Grid {
    /// Create a new `Grid` from "range-style" arguments: a starting position,
    /// a step size, and the length of the domain, which is exclusive of its
    /// end.
    ///
    /// The number of points is `ceil(extent / step)`, matching the number of
    /// elements in `origin..origin + extent` stepped by `step`.
    pub fn new(origin: f64, step: f64, extent: f64) -> GridResult<Self> {
        GridError::check_origin(origin)?;
        GridError::check_step(step)?;
        GridError::check_extent(extent)?;
        let count = (extent / step).ceil();
        GridError::check_count(count)?;
        let n = (count as usize).max(1);
        Ok(Self { origin, step, n })
    }

    /// Get the first grid position.
    pub fn origin(&self) -> f64 { self.origin }

    /// Get the grid spacing.
    pub fn step(&self) -> f64 { self.step }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Get the length of the domain covered by the grid, `len * step`.
    pub fn extent(&self) -> f64 { self.n as f64 * self.step }

    /// Get the `i`-th grid position.
    ///
    /// No bounds check is performed; indices past the end extrapolate.
    pub fn x(&self, i: usize) -> f64 { self.origin + self.step * i as f64 }

    /// Get the first grid position.
    pub fn first(&self) -> f64 { self.x(0) }

    /// Get the last grid position.
    pub fn last(&self) -> f64 { self.x(self.n - 1) }

    /// Return `true` if `x` lies within the closed range of grid positions.
    pub fn contains(&self, x: f64) -> bool {
        (self.first()..=self.last()).contains(&x)
    }

    /// Generate the coordinate array.
    pub fn positions(&self) -> nd::Array1<f64> {
        (0..self.n).map(|i| self.x(i)).collect()
    }
}
