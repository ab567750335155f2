//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1, concatenate };
use num_complex::Complex64 as C64;
use num_traits::Float;
use rustfft as fft;

/// Return `true` if the elements of `a` never decrease.
pub fn is_sorted<S, A>(a: &nd::ArrayBase<S, Ix1>) -> bool
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    a.iter().zip(a.iter().skip(1)).all(|(ak, akp1)| ak <= akp1)
}

/// Compute the scaled root-mean-square of an array.
pub fn rms<S, A>(a: &nd::ArrayBase<S, Ix1>) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n = A::from(a.len().max(1)).unwrap_or_else(A::one);
    (a.iter().fold(A::zero(), |acc, ak| acc + *ak * *ak) / n).sqrt()
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling time `dt`.
pub fn fft_freq(n: usize, dt: f64) -> nd::Array1<f64> {
    if n % 2 == 0 {
        let fp: nd::Array1<f64>
            = (0..n / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..n / 2 + 1).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    } else {
        let fp: nd::Array1<f64>
            = (0..(n + 1) / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..(n + 1) / 2).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    }
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut buf: Vec<C64> = x.iter().copied().collect();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(buf.len());
    fft_plan.process(&mut buf);
    nd::Array1::from_vec(buf)
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m)
        = if n % 2 == 0 {
            x.view().split_at(nd::Axis(0), n / 2)
        } else {
            x.view().split_at(nd::Axis(0), n / 2 + 1)
        };
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}
