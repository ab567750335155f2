//! Finite-difference second-derivative operator on a uniform grid.
//!
//! The operator is the standard three-point stencil
//! ```text
//!          f[i - 1] - 2 f[i] + f[i + 1]
//! (L f)[i] = ----------------------------
//!                       δx²
//! ```
//! with `f[-1]` and `f[n]` taken to be zero. It is stored as its three
//! diagonals, so applying it costs *O*(*n*) and never requires the dense
//! *n*×*n* matrix.

use std::ops::{ Add, Mul };
use ndarray as nd;
use crate::{ Arr1, error::LengthError, grid::Grid };

/// Tridiagonal discretization of ∂²/∂x² with implicit zero boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct Laplacian {
    // grid the stencil was built for
    grid: Grid,
    // sub-diagonal, length n - 1
    lower: nd::Array1<f64>,
    // main diagonal, length n
    diag: nd::Array1<f64>,
    // super-diagonal, length n - 1
    upper: nd::Array1<f64>,
}

impl Laplacian {
    /// Build the operator for a grid.
    pub fn new(grid: &Grid) -> Self {
        let n = grid.len();
        let ondx2 = grid.step().powi(2).recip();
        Self {
            grid: *grid,
            lower: nd::Array1::from_elem(n - 1, ondx2),
            diag: nd::Array1::from_elem(n, -2.0 * ondx2),
            upper: nd::Array1::from_elem(n - 1, ondx2),
        }
    }

    /// Get the size of the (square) operator.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.diag.len() }

    /// Get the grid the operator was built for.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get the grid spacing.
    pub fn step(&self) -> f64 { self.grid.step() }

    /// Get the sub-, main, and super-diagonals, in that order.
    pub fn diagonals(&self) -> (
        nd::ArrayView1<'_, f64>,
        nd::ArrayView1<'_, f64>,
        nd::ArrayView1<'_, f64>,
    ) {
        (self.lower.view(), self.diag.view(), self.upper.view())
    }

    /// Apply the operator to `f`, writing the result into `out`.
    pub fn apply_into<S, T, A>(&self, f: &Arr1<S>, out: &mut Arr1<T>)
        -> Result<(), LengthError>
    where
        S: nd::Data<Elem = A>,
        T: nd::DataMut<Elem = A>,
        A: Copy + Add<A, Output = A> + Mul<f64, Output = A>,
    {
        let n = self.len();
        LengthError::check_len(n, f.len())?;
        LengthError::check_len(n, out.len())?;
        nd::Zip::from(out.view_mut()).and(f).and(&self.diag)
            .for_each(|ok, &fk, &dk| { *ok = fk * dk; });
        nd::Zip::from(out.slice_mut(nd::s![1..]))
            .and(f.slice(nd::s![..n - 1]))
            .and(&self.lower)
            .for_each(|ok, &fkm1, &lk| { *ok = *ok + fkm1 * lk; });
        nd::Zip::from(out.slice_mut(nd::s![..n - 1]))
            .and(f.slice(nd::s![1..]))
            .and(&self.upper)
            .for_each(|ok, &fkp1, &uk| { *ok = *ok + fkp1 * uk; });
        Ok(())
    }

    /// Apply the operator to `f`, returning a new array.
    pub fn apply<S, A>(&self, f: &Arr1<S>) -> Result<nd::Array1<A>, LengthError>
    where
        S: nd::Data<Elem = A>,
        A: Copy + Add<A, Output = A> + Mul<f64, Output = A>,
    {
        let mut out: nd::Array1<A> = f.to_owned();
        self.apply_into(f, &mut out)?;
        Ok(out)
    }

    /// Materialize the operator as a dense matrix.
    ///
    /// Intended for inspection of small grids only.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let n = self.len();
        let mut A: nd::Array2<f64> = nd::Array2::from_diag(&self.diag);
        A.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().assign(&self.lower);
        A.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().assign(&self.upper);
        A
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64 as C64;
    use super::*;

    fn grid() -> Grid { Grid::new(0.0, 0.5, 4.0).unwrap() }

    #[test]
    fn dense_form_is_the_stencil() {
        let L = Laplacian::new(&grid());
        let A = L.to_dense();
        assert_eq!(A.dim(), (8, 8));
        assert_eq!(A, A.t());
        assert_eq!(A[[3, 3]], -8.0);
        assert_eq!(A[[3, 2]], 4.0);
        assert_eq!(A[[3, 4]], 4.0);
        assert_eq!(A[[3, 5]], 0.0);
    }

    #[test]
    fn diagonals_match_dense_form() {
        let L = Laplacian::new(&grid());
        let A = L.to_dense();
        let (lower, diag, upper) = L.diagonals();
        assert_eq!(diag, A.diag());
        assert_eq!(lower, A.slice(nd::s![1.., ..-1]).diag());
        assert_eq!(upper, A.slice(nd::s![..-1, 1..]).diag());
    }

    #[test]
    fn second_derivative_of_quadratic_is_constant() {
        let grid = grid();
        let f = grid.positions().mapv(|x| 3.0 * x * x - x + 1.0);
        let d2f = Laplacian::new(&grid).apply(&f).unwrap();
        d2f.iter().skip(1).take(grid.len() - 2)
            .for_each(|d| assert!((d - 6.0).abs() < 1e-10));
    }

    #[test]
    fn edges_see_zero_padding() {
        let grid = grid();
        let f: nd::Array1<f64> = nd::Array1::ones(grid.len());
        let d2f = Laplacian::new(&grid).apply(&f).unwrap();
        assert_eq!(d2f[0], -4.0);
        assert_eq!(d2f[grid.len() - 1], -4.0);
        assert!(d2f.iter().skip(1).take(grid.len() - 2).all(|d| *d == 0.0));
    }

    #[test]
    fn complex_apply_matches_dense_product() {
        let grid = grid();
        let L = Laplacian::new(&grid);
        let f: nd::Array1<C64>
            = grid.positions().mapv(|x| C64::new(x.sin(), x.cos()));
        let banded = L.apply(&f).unwrap();
        let dense = L.to_dense().mapv(C64::from).dot(&f);
        nd::Zip::from(&banded).and(&dense)
            .for_each(|b, d| assert!((b - d).norm() < 1e-12));
    }

    #[test]
    fn single_point_grid() {
        let grid = Grid::new(0.0, 1.0, 1.0).unwrap();
        let L = Laplacian::new(&grid);
        let d2f = L.apply(&nd::array![2.0]).unwrap();
        assert_eq!(d2f, nd::array![-4.0]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let L = Laplacian::new(&grid());
        assert!(L.apply(&nd::Array1::<f64>::zeros(3)).is_err());
    }
}
