//! Time evolution of a wavefunction under the 1+1-dimensional (time-dependent)
//! Schrödinger equation (TDSE) for a static potential,
//! ```text
//!  ∂ψ        ħ               V
//!  -- = -i (- -- L ψ + --- ψ)
//!  ∂t       2 m          ħ
//! ```
//! where *L* is the finite-difference [`Laplacian`]. This is a system of
//! `n` coupled complex ODEs, integrated here with the embedded
//! Bogacki–Shampine 3(2) Runge-Kutta scheme with adaptive step size.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Deserialize;
use crate::{
    Arr1,
    error::{ EvolveError, LengthError },
    grid::Grid,
    laplacian::Laplacian,
    observe,
    utils::{ is_sorted, rms },
};

pub type EvolveResult<T> = Result<T, EvolveError>;

/// Physical constants entering the TDSE.
///
/// Both default to 1 (natural units).
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Constants {
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
}

impl Default for Constants {
    fn default() -> Self { Self { hbar: 1.0, mass: 1.0 } }
}

impl Constants {
    fn check(&self) -> EvolveResult<()> {
        EvolveError::check_constant("hbar", self.hbar)?;
        EvolveError::check_constant("mass", self.mass)?;
        Ok(())
    }
}

/// Error control parameters for the adaptive stepper.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Relative tolerance (default: `1e-3`).
    pub rtol: f64,
    /// Absolute tolerance (default: `1e-6`).
    pub atol: f64,
    /// Maximum number of consecutive rejected steps before giving up (default:
    /// `100`).
    pub max_rejects: usize,
}

impl Default for Tolerance {
    fn default() -> Self { Self { rtol: 1e-3, atol: 1e-6, max_rejects: 100 } }
}

impl Tolerance {
    fn check(&self) -> EvolveResult<()> {
        EvolveError::check_epsilon(self.rtol)?;
        EvolveError::check_epsilon(self.atol)?;
        Ok(())
    }

    // per-element error scale
    fn scale(&self, y: f64) -> f64 { self.atol + y * self.rtol }
}

/// The Hamiltonian `H = -ħ²/2m L + V` for a static potential, borrowing its
/// operator and potential.
#[derive(Clone, Debug)]
pub struct Hamiltonian<'a> {
    L: &'a Laplacian,
    V: nd::ArrayView1<'a, f64>,
    constants: Constants,
}

impl<'a> Hamiltonian<'a> {
    /// Pair a Laplacian with a potential.
    ///
    /// Fails if the potential does not match the operator size or a constant
    /// is non-positive.
    pub fn new<S>(L: &'a Laplacian, V: &'a Arr1<S>, constants: Constants)
        -> EvolveResult<Self>
    where S: nd::Data<Elem = f64>
    {
        constants.check()?;
        LengthError::check_len(L.len(), V.len())?;
        Ok(Self { L, V: V.view(), constants })
    }

    /// Get the size of the underlying grid.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.L.len() }

    /// Get the physical constants.
    pub fn constants(&self) -> Constants { self.constants }

    /// Compute `H ψ`.
    pub fn apply<S>(&self, q: &Arr1<S>) -> Result<nd::Array1<C64>, LengthError>
    where S: nd::Data<Elem = C64>
    {
        let Constants { hbar, mass } = self.constants;
        let kin = -0.5 * hbar.powi(2) / mass;
        let mut Hq = self.L.apply(q)?;
        nd::Zip::from(&mut Hq).and(&self.V).and(q)
            .for_each(|Hqk, &Vk, &qk| { *Hqk = kin * *Hqk + Vk * qk; });
        Ok(Hq)
    }

    // evaluate the right-hand side of the TDSE, i.e. the action of the
    // Hamiltonian on `q` with an overall factor of `-i / ħ`, writing into `out`
    fn rhs_into<S>(&self, q: &Arr1<S>, out: &mut nd::Array1<C64>)
        -> Result<(), LengthError>
    where S: nd::Data<Elem = C64>
    {
        let Constants { hbar, mass } = self.constants;
        let kin = -0.5 * hbar / mass;
        let pot = hbar.recip();
        self.L.apply_into(q, out)?;
        nd::Zip::from(out).and(&self.V).and(q)
            .for_each(|dqk, &Vk, &qk| {
                *dqk = -C64::i() * (kin * *dqk + pot * Vk * qk);
            });
        Ok(())
    }
}

/// Output of a time evolution: one snapshot per requested time, along with the
/// grid and potential they were computed for.
///
/// Snapshots are only ever handed out as read-only views.
#[derive(Clone, Debug)]
pub struct Solution {
    grid: Grid,
    V: nd::Array1<f64>,
    t: nd::Array1<f64>,
    q: nd::Array2<C64>,
}

impl Solution {
    /// Get the coordinate grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get the potential.
    pub fn potential(&self) -> nd::ArrayView1<'_, f64> { self.V.view() }

    /// Get the snapshot times.
    pub fn times(&self) -> nd::ArrayView1<'_, f64> { self.t.view() }

    /// Get all snapshots as a 2D array whose first axis indexes time.
    pub fn snapshots(&self) -> nd::ArrayView2<'_, C64> { self.q.view() }

    /// Get the number of snapshots.
    pub fn len(&self) -> usize { self.t.len() }

    /// Return `true` if there are no snapshots.
    pub fn is_empty(&self) -> bool { self.t.is_empty() }

    /// Get the `k`-th snapshot and its time.
    pub fn get(&self, k: usize) -> Option<(f64, nd::ArrayView1<'_, C64>)> {
        (k < self.len())
            .then(|| (self.t[k], self.q.index_axis(nd::Axis(0), k)))
    }

    /// Iterate over `(time, snapshot)` pairs in order.
    pub fn iter(&self)
        -> impl Iterator<Item = (f64, nd::ArrayView1<'_, C64>)> + '_
    {
        self.t.iter().copied().zip(self.q.axis_iter(nd::Axis(0)))
    }

    /// Compute the [norm][observe::norm] of every snapshot.
    pub fn norms(&self) -> nd::Array1<f64> {
        let dx = self.grid.step();
        self.q.axis_iter(nd::Axis(0))
            .map(|qk| observe::norm(&qk, dx))
            .collect()
    }

    /// Compute the [position variance][observe::variance] of every snapshot.
    pub fn variances(&self) -> nd::Array1<f64> {
        let x = self.grid.positions();
        self.q.axis_iter(nd::Axis(0))
            .map(|qk| observe::variance(&x, &qk).unwrap_or(f64::NAN))
            .collect()
    }

    /// Give up the snapshot times and the snapshots themselves.
    pub fn into_parts(self) -> (nd::Array1<f64>, nd::Array2<C64>) {
        (self.t, self.q)
    }
}

// Bogacki-Shampine tableau
const A21: f64 = 1.0 / 2.0;
const A32: f64 = 3.0 / 4.0;
const B: [f64; 3] = [2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0];
const E: [f64; 4] = [5.0 / 72.0, -1.0 / 12.0, -1.0 / 9.0, 1.0 / 8.0];

// step size control -- particular to rk23
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 3.0;

// perform the operation `out = a + v * b` succinctly
fn array_step_into<S, T>(a: &Arr1<S>, v: f64, b: &Arr1<T>, out: &mut nd::Array1<C64>)
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    nd::Zip::from(out).and(a).and(b)
        .for_each(|ok, &ak, &bk| { *ok = ak + v * bk; });
}

// smallest step size allowed at time `t`
fn min_step(t: f64) -> f64 { 10.0 * f64::EPSILON * t.abs().max(1.0) }

// adaptive rk23 integration state
//
// the stepper owns the current state and the right-hand side evaluated there,
// which is reused as the first stage of the next step (first same as last)
struct Rk23<'a, 'b> {
    H: &'b Hamiltonian<'a>,
    tol: Tolerance,
    t: f64,
    h: f64,
    q: nd::Array1<C64>,
    f: nd::Array1<C64>,
    k2: nd::Array1<C64>,
    k3: nd::Array1<C64>,
    k4: nd::Array1<C64>,
    q_new: nd::Array1<C64>,
    accepted: usize,
    rejected: usize,
}

impl<'a, 'b> Rk23<'a, 'b> {
    fn new<S>(
        H: &'b Hamiltonian<'a>,
        q0: &Arr1<S>,
        t_bounds: (f64, f64),
        tol: Tolerance,
    ) -> EvolveResult<Self>
    where S: nd::Data<Elem = C64>
    {
        let n = H.len();
        let q = q0.to_owned();
        let mut f: nd::Array1<C64> = nd::Array1::zeros(n);
        H.rhs_into(&q, &mut f)?;
        let mut new = Self {
            H,
            tol,
            t: t_bounds.0,
            h: 0.0,
            q,
            f,
            k2: nd::Array1::zeros(n),
            k3: nd::Array1::zeros(n),
            k4: nd::Array1::zeros(n),
            q_new: nd::Array1::zeros(n),
            accepted: 0,
            rejected: 0,
        };
        new.h = new.initial_step(t_bounds.1 - t_bounds.0)?;
        Ok(new)
    }

    // estimate a first step size from the magnitudes of the state and its first
    // two derivatives (Hairer, Nørsett & Wanner, sec. II.4)
    fn initial_step(&mut self, span: f64) -> EvolveResult<f64> {
        let tol = self.tol;
        let scale = self.q.mapv(|qk| tol.scale(qk.norm()));
        let d0 = rms(&nd::Zip::from(&self.q).and(&scale)
            .map_collect(|qk, sk| qk.norm() / sk));
        let d1 = rms(&nd::Zip::from(&self.f).and(&scale)
            .map_collect(|fk, sk| fk.norm() / sk));
        let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 };
        array_step_into(&self.q, h0, &self.f, &mut self.q_new);
        self.H.rhs_into(&self.q_new, &mut self.k2)?;
        let d2 = rms(&nd::Zip::from(&self.k2).and(&self.f).and(&scale)
            .map_collect(|f1k, f0k, sk| (f1k - f0k).norm() / sk)) / h0;
        let h1
            = if d1 <= 1e-15 && d2 <= 1e-15 {
                (h0 * 1e-3).max(1e-6)
            } else {
                (0.01 / d1.max(d2)).powf(-ERROR_EXPONENT)
            };
        Ok((100.0 * h0).min(h1).min(span))
    }

    // take a single step *in place*, landing exactly on `t_target` if it is
    // closer than the current proposed step size
    fn step_toward(&mut self, t_target: f64) -> EvolveResult<()> {
        let mut rejects: usize = 0;
        loop {
            let remaining = t_target - self.t;
            // a remainder below the resolvable spacing is taken in one step
            let clamped = self.h >= remaining || remaining <= min_step(self.t);
            if !clamped && (self.h.is_nan() || self.h < min_step(self.t)) {
                return Err(EvolveError::StepUnderflow { t: self.t, dt: self.h });
            }
            let h = if clamped { remaining } else { self.h };

            array_step_into(&self.q, h * A21, &self.f, &mut self.q_new);
            self.H.rhs_into(&self.q_new, &mut self.k2)?;
            array_step_into(&self.q, h * A32, &self.k2, &mut self.q_new);
            self.H.rhs_into(&self.q_new, &mut self.k3)?;
            nd::Zip::from(&mut self.q_new)
                .and(&self.q).and(&self.f).and(&self.k2).and(&self.k3)
                .for_each(|qk, &q0k, &k1k, &k2k, &k3k| {
                    *qk = q0k + h * (B[0] * k1k + B[1] * k2k + B[2] * k3k);
                });
            self.H.rhs_into(&self.q_new, &mut self.k4)?;

            // compute the scaled norm of the embedded error estimate
            let tol = self.tol;
            let mut acc: f64 = 0.0;
            nd::Zip::from(&self.q).and(&self.q_new)
                .and(&self.f).and(&self.k2).and(&self.k3).and(&self.k4)
                .for_each(|&q0k, &q1k, &k1k, &k2k, &k3k, &k4k| {
                    let err
                        = h * (E[0] * k1k + E[1] * k2k + E[2] * k3k + E[3] * k4k);
                    let sk = tol.scale(q0k.norm().max(q1k.norm()));
                    acc += (err.norm() / sk).powi(2);
                });
            let er = (acc / self.q.len() as f64).sqrt();

            if er < 1.0 {
                let mut factor
                    = if er == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * er.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
                    };
                if rejects > 0 { factor = factor.min(1.0); }
                // a shortened step says little about the natural step size
                self.h = if clamped { self.h.max(h * factor) } else { h * factor };
                self.t = if clamped { t_target } else { self.t + h };
                std::mem::swap(&mut self.q, &mut self.q_new);
                std::mem::swap(&mut self.f, &mut self.k4);
                self.accepted += 1;
                return Ok(());
            }

            let factor
                = if er.is_finite() {
                    (SAFETY * er.powf(ERROR_EXPONENT)).max(MIN_FACTOR)
                } else {
                    MIN_FACTOR
                };
            self.h = h * factor;
            self.rejected += 1;
            rejects += 1;
            if rejects > tol.max_rejects {
                return Err(EvolveError::ErrorBound { t: self.t });
            }
        }
    }

    fn advance_to(&mut self, t_target: f64) -> EvolveResult<()> {
        while self.t < t_target {
            self.step_toward(t_target)?;
        }
        Ok(())
    }
}

// find the first output time that is out of order or outside the span
fn check_output_times<S>(t: &Arr1<S>, t_bounds: (f64, f64)) -> EvolveResult<()>
where S: nd::Data<Elem = f64>
{
    let (t0, tf) = t_bounds;
    let bad
        = t.iter().enumerate()
        .find(|(k, tk)| {
            !(t0..=tf).contains(*tk) || (*k > 0 && t[*k - 1] > **tk)
        });
    match bad {
        Some((index, &time)) => {
            Err(EvolveError::BadOutputTimes { index, time, t0, tf })
        },
        None => Ok(()),
    }
}

/// Integrate the TDSE from `t_bounds.0` to `t_bounds.1` for a static potential
/// `V`, recording the wavefunction at each of the output times `t`.
///
/// Output times must be sorted and lie within the integration bounds; the
/// returned [`Solution`] contains exactly one snapshot per output time, in the
/// same order. A snapshot requested at the initial time is an exact copy of
/// `q0`. The integration always runs to the final bound, even past the last
/// output time.
///
/// Internal steps are taken with the Bogacki-Shampine 3(2) pair and are
/// clamped so that every output time is hit exactly. Any failure of the
/// stepper aborts the run; no partial solution is returned.
///
/// See also [`evolve_default`].
pub fn evolve<S, T, U>(
    L: &Laplacian,
    V: &Arr1<S>,
    q0: &Arr1<T>,
    t_bounds: (f64, f64),
    t: &Arr1<U>,
    constants: Constants,
    tol: Tolerance,
) -> EvolveResult<Solution>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
    U: nd::Data<Elem = f64>,
{
    EvolveError::check_span(t_bounds.0, t_bounds.1)?;
    tol.check()?;
    check_output_times(t, t_bounds)?;
    let H = Hamiltonian::new(L, V, constants)?;
    LengthError::check_len(L.len(), q0.len())?;

    let mut q: nd::Array2<C64> = nd::Array2::zeros((t.len(), L.len()));
    let mut stepper = Rk23::new(&H, q0, t_bounds, tol)?;
    for (&tk, mut qk) in t.iter().zip(q.axis_iter_mut(nd::Axis(0))) {
        stepper.advance_to(tk)?;
        qk.assign(&stepper.q);
    }
    stepper.advance_to(t_bounds.1)?;
    log::debug!(
        "evolve: reached t = {} in {} accepted and {} rejected steps",
        stepper.t, stepper.accepted, stepper.rejected,
    );

    let dx = L.step();
    let n0 = observe::norm(q0, dx);
    let nf = observe::norm(&stepper.q, dx);
    if ((nf - n0) / n0).abs() > 0.02 {
        log::warn!(
            "evolve: total probability changed from {n0:.6} to {nf:.6}; \
            probability may have reached the grid edges or the tolerances may \
            be too loose"
        );
    }

    Ok(Solution { grid: *L.grid(), V: V.to_owned(), t: t.to_owned(), q })
}

/// Like [`evolve`], but with default [`Constants`] and [`Tolerance`].
pub fn evolve_default<S, T, U>(
    L: &Laplacian,
    V: &Arr1<S>,
    q0: &Arr1<T>,
    t_bounds: (f64, f64),
    t: &Arr1<U>,
) -> EvolveResult<Solution>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
    U: nd::Data<Elem = f64>,
{
    evolve(L, V, q0, t_bounds, t, Constants::default(), Tolerance::default())
}

/// Generate uniformly spaced output times `t0 + k dt` strictly less than `tf`,
/// with `tf` itself appended when `include_end` is `true`.
///
/// Fails if `t0 <= tf` does not hold for finite values or `dt` is not finite
/// and positive.
pub fn output_times(t0: f64, tf: f64, dt: f64, include_end: bool)
    -> EvolveResult<nd::Array1<f64>>
{
    EvolveError::check_span(t0, tf)?;
    EvolveError::check_time_step(dt)?;
    let mut t: Vec<f64>
        = (0..)
        .map(|k| t0 + k as f64 * dt)
        .take_while(|tk| *tk < tf)
        .collect();
    if include_end && t.last().map_or(true, |tl| *tl < tf) { t.push(tf); }
    let t = nd::Array1::from_vec(t);
    debug_assert!(is_sorted(&t));
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ packet::gaussian, potential::build_step_potential };

    fn setup() -> (Grid, Laplacian, nd::Array1<C64>) {
        let grid = Grid::new(0.0, 0.05, 10.0).unwrap();
        let L = Laplacian::new(&grid);
        let psi0 = gaussian(&grid, 5.0, 0.7, 1.0).unwrap();
        (grid, L, psi0)
    }

    #[test]
    fn one_snapshot_per_output_time() {
        let (grid, L, psi0) = setup();
        let V = build_step_potential(&[7.0, 8.0], &grid, 10.0).unwrap();
        let t = nd::array![0.0, 0.05, 0.05, 0.2, 0.3];
        let sol = evolve_default(&L, &V, &psi0, (0.0, 0.4), &t).unwrap();
        assert_eq!(sol.len(), t.len());
        assert_eq!(sol.times(), t);
        assert_eq!(sol.snapshots().dim(), (5, grid.len()));
        assert_eq!(sol.potential(), V);
        assert_eq!(sol.grid(), &grid);
        assert_eq!(sol.get(1).unwrap().1, sol.get(2).unwrap().1);
        assert!(sol.get(5).is_none());
        assert!(sol.iter().map(|(tk, _)| tk).eq(t.iter().copied()));
    }

    #[test]
    fn initial_snapshot_is_exact() {
        let (_, L, psi0) = setup();
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let t = output_times(0.0, 0.2, 0.05, true).unwrap();
        let sol = evolve_default(&L, &V, &psi0, (0.0, 0.2), &t).unwrap();
        let (t0, q0) = sol.get(0).unwrap();
        assert_eq!(t0, 0.0);
        assert_eq!(q0, psi0);
    }

    #[test]
    fn empty_output_times() {
        let (_, L, psi0) = setup();
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let t: nd::Array1<f64> = nd::Array1::zeros(0);
        let sol = evolve_default(&L, &V, &psi0, (0.0, 0.1), &t).unwrap();
        assert!(sol.is_empty());
        assert_eq!(sol.snapshots().dim(), (0, L.len()));
    }

    #[test]
    fn zero_length_span() {
        let (_, L, psi0) = setup();
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let sol = evolve_default(&L, &V, &psi0, (1.0, 1.0), &nd::array![1.0])
            .unwrap();
        assert_eq!(sol.get(0).unwrap().1, psi0);
    }

    #[test]
    fn sine_mode_only_gains_a_phase() {
        // the lowest discrete sine mode is an exact eigenvector of L, so the
        // solution only picks up a phase
        let grid = Grid::new(0.0, 0.1, 5.0).unwrap();
        let n = grid.len();
        let L = Laplacian::new(&grid);
        let theta = std::f64::consts::PI / (n + 1) as f64;
        let q0: nd::Array1<C64>
            = (0..n).map(|j| C64::from((theta * (j + 1) as f64).sin())).collect();
        let lambda = -(2.0 - 2.0 * theta.cos()) / grid.step().powi(2);
        let omega = -0.5 * lambda;
        let V: nd::Array1<f64> = nd::Array1::zeros(n);
        let tol = Tolerance { rtol: 1e-8, atol: 1e-10, ..Tolerance::default() };
        let sol = evolve(
            &L, &V, &q0, (0.0, 1.0), &nd::array![1.0], Constants::default(), tol)
            .unwrap();
        let (_, q1) = sol.get(0).unwrap();
        let expected = q0.mapv(|qk| qk * C64::cis(-omega));
        nd::Zip::from(&q1).and(&expected)
            .for_each(|a, b| assert!((a - b).norm() < 1e-5));
    }

    #[test]
    fn hamiltonian_energy_of_eigenmode() {
        let grid = Grid::new(0.0, 0.1, 5.0).unwrap();
        let n = grid.len();
        let L = Laplacian::new(&grid);
        let theta = std::f64::consts::PI / (n + 1) as f64;
        let q: nd::Array1<C64>
            = (0..n).map(|j| C64::from((2.0 * theta * (j + 1) as f64).sin()))
            .collect();
        let V: nd::Array1<f64> = nd::Array1::from_elem(n, 0.25);
        let constants = Constants { hbar: 2.0, mass: 0.5 };
        let H = Hamiltonian::new(&L, &V, constants).unwrap();
        let lambda = -(2.0 - 2.0 * (2.0 * theta).cos()) / grid.step().powi(2);
        let expected = -0.5 * 4.0 / 0.5 * lambda + 0.25;
        assert!((observe::energy(&H, &q).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_arguments() {
        let (_, L, psi0) = setup();
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let t = nd::array![0.0, 0.1];
        let err = |r: EvolveResult<Solution>| r.unwrap_err();

        assert!(matches!(
            err(evolve_default(&L, &V, &psi0, (1.0, 0.0), &t)),
            EvolveError::BadSpan(..)
        ));
        assert!(matches!(
            err(evolve_default(&L, &V, &psi0, (0.0, 1.0), &nd::array![0.2, 0.1])),
            EvolveError::BadOutputTimes { index: 1, .. }
        ));
        assert!(matches!(
            err(evolve_default(&L, &V, &psi0, (0.0, 1.0), &nd::array![0.5, 1.5])),
            EvolveError::BadOutputTimes { index: 1, .. }
        ));
        assert!(matches!(
            err(evolve_default(&L, &V.slice(nd::s![1..]), &psi0, (0.0, 1.0), &t)),
            EvolveError::Length(..)
        ));
        assert!(matches!(
            err(evolve_default(&L, &V, &psi0.slice(nd::s![1..]), (0.0, 1.0), &t)),
            EvolveError::Length(..)
        ));
        let constants = Constants { hbar: 0.0, ..Constants::default() };
        assert!(matches!(
            err(evolve(&L, &V, &psi0, (0.0, 1.0), &t, constants, Tolerance::default())),
            EvolveError::BadConstant("hbar", _)
        ));
        let tol = Tolerance { rtol: -1.0, ..Tolerance::default() };
        assert!(matches!(
            err(evolve(&L, &V, &psi0, (0.0, 1.0), &t, Constants::default(), tol)),
            EvolveError::BadEpsilon(_)
        ));
    }

    #[test]
    fn non_finite_state_is_an_integration_failure() {
        let (_, L, mut psi0) = setup();
        psi0[10] = C64::new(f64::NAN, 0.0);
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let res = evolve_default(&L, &V, &psi0, (0.0, 1.0), &nd::array![0.0, 1.0]);
        assert!(res.unwrap_err().is_integration_failure());
    }

    #[test]
    fn uniform_output_times() {
        let t = output_times(0.0, 1.0, 0.25, false).unwrap();
        assert_eq!(t, nd::array![0.0, 0.25, 0.5, 0.75]);
        let t = output_times(0.0, 1.0, 0.25, true).unwrap();
        assert_eq!(t, nd::array![0.0, 0.25, 0.5, 0.75, 1.0]);
        let t = output_times(0.0, 1.1, 0.5, true).unwrap();
        assert_eq!(t, nd::array![0.0, 0.5, 1.0, 1.1]);
    }

    #[test]
    fn output_times_rejects_bad_spacing() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                output_times(0.0, 1.0, dt, false),
                Err(EvolveError::BadTimeStep(_))
            ));
        }
        assert!(matches!(
            output_times(0.0, f64::INFINITY, 0.1, false),
            Err(EvolveError::BadSpan(..))
        ));
        assert!(matches!(
            output_times(1.0, 0.0, 0.1, false),
            Err(EvolveError::BadSpan(..))
        ));
    }

    #[test]
    fn span_below_time_resolution() {
        let (_, L, psi0) = setup();
        let V: nd::Array1<f64> = nd::Array1::zeros(L.len());
        let t = nd::array![0.0, 1e-16];
        let sol = evolve_default(&L, &V, &psi0, (0.0, 1e-16), &t).unwrap();
        assert_eq!(sol.len(), 2);
        assert_eq!(sol.get(0).unwrap().1, psi0);
        let (_, q1) = sol.get(1).unwrap();
        nd::Zip::from(&q1).and(&psi0)
            .for_each(|a, b| assert!((a - b).norm() < 1e-12));
    }
}
