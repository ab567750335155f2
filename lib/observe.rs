//! Scalar and distribution-valued observables of a single wavefunction
//! snapshot.
//!
//! All integrals are plain Riemann sums over the grid, `Σ f[i] δx`, so that
//! they agree exactly with the discretization used by the time evolution.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::LengthError,
    evolve::Hamiltonian,
    utils::{ fft, fft_freq, fft_shift },
};

/// Compute the total probability `Σ |ψ|² δx`.
pub fn norm<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dx
}

/// Compute the probability contained in the closed interval `[lo, hi]`.
pub fn probability_between<S, T>(
    x: &Arr1<S>,
    q: &Arr1<T>,
    dx: f64,
    lo: f64,
    hi: f64,
) -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    LengthError::check(x, q)?;
    let p: f64
        = x.iter().zip(q)
        .filter(|(xk, _)| (lo..=hi).contains(*xk))
        .map(|(_, qk)| qk.norm_sqr())
        .sum();
    Ok(p * dx)
}

// compute Σ xⁿ |ψ|² / Σ |ψ|²
fn moment<S, T>(x: &Arr1<S>, q: &Arr1<T>, n: i32) -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    LengthError::check(x, q)?;
    let (num, den)
        = x.iter().zip(q)
        .fold((0.0, 0.0), |(num, den), (xk, qk)| {
            let pk = qk.norm_sqr();
            (num + xk.powi(n) * pk, den + pk)
        });
    Ok(num / den)
}

/// Compute the expected position `⟨x⟩`, normalized by the total probability.
pub fn mean_position<S, T>(x: &Arr1<S>, q: &Arr1<T>)
    -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    moment(x, q, 1)
}

/// Compute the position variance `⟨x²⟩ - ⟨x⟩²`, normalized by the total
/// probability.
pub fn variance<S, T>(x: &Arr1<S>, q: &Arr1<T>) -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let mean = moment(x, q, 1)?;
    let mean_sq = moment(x, q, 2)?;
    Ok(mean_sq - mean.powi(2))
}

/// Compute the energy expectation value `⟨ψ|H|ψ⟩ / ⟨ψ|ψ⟩`.
pub fn energy<S>(H: &Hamiltonian, q: &Arr1<S>) -> Result<f64, LengthError>
where S: nd::Data<Elem = C64>
{
    let Hq = H.apply(q)?;
    let (num, den)
        = q.iter().zip(&Hq)
        .fold((C64::from(0.0), 0.0), |(num, den), (qk, Hqk)| {
            (num + qk.conj() * Hqk, den + qk.norm_sqr())
        });
    Ok(num.re / den)
}

/// Compute the momentum-space probability density `|φ(k)|²`, returned along
/// with the accompanying wavenumbers, both sorted by increasing wavenumber.
///
/// The density is scaled so that `Σ |φ(k)|² δk` equals [`norm`] of `q`.
pub fn momentum_density<S>(q: &Arr1<S>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = C64>
{
    let scale = dx.powi(2) / TAU;
    let phi = fft(q);
    let k = fft_freq(q.len(), dx).mapv(|f| TAU * f);
    let density = phi.mapv(|phik| scale * phik.norm_sqr());
    (fft_shift(&k), fft_shift(&density))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ grid::Grid, packet::gaussian };

    fn setup() -> (Grid, nd::Array1<C64>) {
        let grid = Grid::new(0.0, 0.02, 10.0).unwrap();
        let psi = gaussian(&grid, 4.0, 0.5, 3.0).unwrap();
        (grid, psi)
    }

    #[test]
    fn gaussian_moments() {
        let (grid, psi) = setup();
        let x = grid.positions();
        assert!((mean_position(&x, &psi).unwrap() - 4.0).abs() < 1e-9);
        // |ψ|² has standard deviation σ / √2
        assert!((variance(&x, &psi).unwrap() - 0.125).abs() < 1e-9);
    }

    #[test]
    fn interval_probability() {
        let (grid, psi) = setup();
        let x = grid.positions();
        let total = norm(&psi, grid.step());
        let left = probability_between(&x, &psi, grid.step(), 0.0, 4.0).unwrap();
        let right
            = probability_between(&x, &psi, grid.step(), 4.0 + 1e-9, 10.0)
            .unwrap();
        assert!((left + right - total).abs() < 1e-12);
        assert!((left - 0.5).abs() < 0.02);
        assert!(probability_between(&x, &psi.slice(nd::s![1..]), 0.02, 0.0, 1.0)
            .is_err());
    }

    #[test]
    fn momentum_density_peaks_at_wavenumber() {
        let (grid, psi) = setup();
        let (k, density) = momentum_density(&psi, grid.step());
        let dk = k[1] - k[0];
        let (imax, _)
            = density.iter().enumerate()
            .max_by(|(_, l), (_, r)| l.total_cmp(r))
            .unwrap();
        assert!((k[imax] - 3.0).abs() <= dk / 2.0 + 1e-12);
        let total = density.sum() * dk;
        assert!((total - norm(&psi, grid.step())).abs() < 1e-9);
    }
}
