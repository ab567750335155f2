//! Piecewise-constant ("step") potentials aligned to a [`Grid`].
//!
//! A step potential is described by an ordered list of wall positions and a
//! single plateau height. Walls are consumed pairwise: the potential equals
//! the height on each closed interval `[walls[0], walls[1]]`, `[walls[2],
//! walls[3]]`, ..., and zero elsewhere. An odd trailing wall raises everything
//! from that wall to the end of the grid. Hence one wall gives a step, two give
//! a single barrier (or well, for negative heights), and more give a train of
//! barriers.

use ndarray as nd;
use serde::Deserialize;
use crate::{ error::PotentialError, grid::Grid };

pub type PotentialResult<T> = Result<T, PotentialError>;

/// Build a step potential over `grid`.
///
/// `walls` must be strictly increasing and lie within the closed range of grid
/// positions; neither condition is repaired here.
pub fn build_step_potential(walls: &[f64], grid: &Grid, height: f64)
    -> PotentialResult<nd::Array1<f64>>
{
    PotentialError::check_height(height)?;
    let (lo, hi) = (grid.first(), grid.last());
    if let Some(&wall) = walls.iter().find(|w| !grid.contains(**w)) {
        return Err(PotentialError::OutOfBounds { wall, lo, hi });
    }
    let unordered
        = walls.iter().zip(walls.iter().skip(1)).enumerate()
        .find(|(_, (prev, next))| prev >= next);
    if let Some((index, (&prev, &next))) = unordered {
        return Err(PotentialError::Unordered { index: index + 1, prev, next });
    }

    // `cursor` always points at the lower wall of the current plateau
    let mut cursor: usize = 0;
    let V: nd::Array1<f64>
        = (0..grid.len())
        .map(|i| {
            let x = grid.x(i);
            while cursor + 1 < walls.len() && x > walls[cursor + 1] {
                cursor += 2;
            }
            match (walls.get(cursor), walls.get(cursor + 1)) {
                (Some(&l), Some(&r)) if l <= x && x <= r => height,
                (Some(&l), None) if l <= x => height,
                _ => 0.0,
            }
        })
        .collect();
    Ok(V)
}

/// Serializable description of a step potential.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StepPotential {
    /// Wall positions, strictly increasing.
    pub walls: Vec<f64>,
    /// Plateau height.
    pub height: f64,
}

impl StepPotential {
    /// Thin interface to [`build_step_potential`].
    pub fn build(&self, grid: &Grid) -> PotentialResult<nd::Array1<f64>> {
        build_step_potential(&self.walls, grid, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid { Grid::new(0.0, 0.1, 10.0).unwrap() }

    #[test]
    fn single_barrier() {
        let grid = grid();
        let V = build_step_potential(&[4.0, 6.0], &grid, 5.0).unwrap();
        nd::Zip::from(&V).and(&grid.positions())
            .for_each(|&v, &x| {
                if (4.0..=6.0).contains(&x) {
                    assert_eq!(v, 5.0);
                } else {
                    assert_eq!(v, 0.0);
                }
            });
    }

    #[test]
    fn single_wall_is_a_step() {
        let grid = grid();
        let V = build_step_potential(&[2.5], &grid, 1.5).unwrap();
        nd::Zip::from(&V).and(&grid.positions())
            .for_each(|&v, &x| assert_eq!(v, if x >= 2.5 { 1.5 } else { 0.0 }));
    }

    #[test]
    fn odd_wall_count_raises_the_tail() {
        let grid = grid();
        let V = build_step_potential(&[3.0, 4.0, 5.0], &grid, 2.0).unwrap();
        nd::Zip::from(&V).and(&grid.positions())
            .for_each(|&v, &x| {
                let raised = (3.0..=4.0).contains(&x) || x >= 5.0;
                assert_eq!(v, if raised { 2.0 } else { 0.0 });
            });
    }

    #[test]
    fn barrier_train() {
        let grid = grid();
        let walls = [1.0, 2.0, 4.0, 4.5, 7.0, 9.0];
        let V = build_step_potential(&walls, &grid, -1.0).unwrap();
        nd::Zip::from(&V).and(&grid.positions())
            .for_each(|&v, &x| {
                let raised
                    = walls.chunks(2).any(|w| (w[0]..=w[1]).contains(&x));
                assert_eq!(v, if raised { -1.0 } else { 0.0 });
            });
    }

    #[test]
    fn no_walls_is_flat() {
        let V = build_step_potential(&[], &grid(), 5.0).unwrap();
        assert!(V.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn does_not_touch_caller_walls() {
        let walls = vec![4.0, 6.0];
        let sp = StepPotential { walls: walls.clone(), height: 5.0 };
        let first = sp.build(&grid()).unwrap();
        let second = sp.build(&grid()).unwrap();
        assert_eq!(sp.walls, walls);
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_out_of_bounds_walls() {
        let grid = grid();
        assert!(matches!(
            build_step_potential(&[-1.0], &grid, 5.0),
            Err(PotentialError::OutOfBounds { wall, .. }) if wall == -1.0
        ));
        assert!(matches!(
            build_step_potential(&[1.0, 10.5], &grid, 5.0),
            Err(PotentialError::OutOfBounds { wall, .. }) if wall == 10.5
        ));
    }

    #[test]
    fn rejects_unordered_walls() {
        assert!(matches!(
            build_step_potential(&[6.0, 4.0], &grid(), 5.0),
            Err(PotentialError::Unordered { index: 1, .. })
        ));
        assert!(matches!(
            build_step_potential(&[4.0, 4.0], &grid(), 5.0),
            Err(PotentialError::Unordered { .. })
        ));
    }
}
