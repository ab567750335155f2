#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs to simulate the time
//! evolution of a wave packet under the one-dimensional, time-dependent
//! Schrödinger equation for piecewise-constant potentials, via the method of
//! lines: the spatial Laplacian is discretized with finite differences and the
//! resulting system of complex ODEs is integrated with an adaptive, embedded
//! Runge-Kutta scheme.
//!
//! Provides implementations for the following:
//! - Three-point finite-difference [Laplacian][laplacian::Laplacian] in banded
//!   storage
//! - [Step potentials][potential::build_step_potential] built from wall
//!   positions
//! - [Gaussian wave packets][packet::gaussian]
//! - Bogacki-Shampine 3(2) [time evolution][evolve::evolve] sampled at
//!   requested output times
//! - [Observables][observe] for analyzing snapshots
//! - Explicit, TOML-loadable [run configuration][config::SimConfig]
//!
//! ```
//! use ndarray as nd;
//! use packetsim::{ evolve, grid::Grid, laplacian::Laplacian, observe, packet,
//!     potential };
//!
//! let grid = Grid::new(0.0, 0.05, 10.0).unwrap();
//! let L = Laplacian::new(&grid);
//! let V = potential::build_step_potential(&[6.0, 7.0], &grid, 50.0).unwrap();
//! let psi0 = packet::gaussian(&grid, 3.0, 0.7, 2.0).unwrap();
//! let t: nd::Array1<f64> = nd::array![0.0, 0.25, 0.5];
//! let sol = evolve::evolve_default(&L, &V, &psi0, (0.0, 0.5), &t).unwrap();
//! assert_eq!(sol.len(), 3);
//! let x = grid.positions();
//! let (_, psi_end) = sol.get(2).unwrap();
//! assert!(observe::mean_position(&x, &psi_end).unwrap() > 3.0);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod laplacian;
pub mod potential;
pub mod packet;
pub mod evolve;
pub mod observe;
pub mod config;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
