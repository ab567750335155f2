//! Initial states.

use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ error::PacketError, grid::Grid };

pub type PacketResult<T> = Result<T, PacketError>;

/// Construct a Gaussian wave packet with a plane-wave phase,
/// ```text
/// ψ(x) = A exp(-(x - x₀)² / 2 σ²) exp(i k x)
/// A = (σ √π)^(-1/2)
/// ```
/// over `grid`.
///
/// The amplitude normalizes the packet on the infinite line; truncation by the
/// grid leaves a small deficit in the norm that is not corrected here.
pub fn gaussian(grid: &Grid, center: f64, width: f64, wavenumber: f64)
    -> PacketResult<nd::Array1<C64>>
{
    PacketError::check_width(width)?;
    PacketError::check_finite("center", center)?;
    PacketError::check_finite("wavenumber", wavenumber)?;
    if width < 2.0 * grid.step() {
        log::warn!(
            "packet::gaussian: packet width {width} is resolved by fewer than \
            two grid steps ({}); some accuracy may be lost",
            grid.step(),
        );
    }
    let A = (width * PI.sqrt()).recip().sqrt();
    let psi: nd::Array1<C64>
        = grid.positions()
        .mapv(|x| {
            let envelope = (-(x - center).powi(2) / (2.0 * width.powi(2))).exp();
            A * envelope * C64::cis(wavenumber * x)
        });
    Ok(psi)
}
