//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(na: usize, nb: usize) -> Result<(), Self> {
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from [`Grid::new`][crate::grid::Grid::new].
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a non-positive or non-finite grid step is encountered.
    #[error("grid step must be finite and greater than 0; got {0}")]
    BadStep(f64),

    /// Returned when a non-positive or non-finite domain extent is
    /// encountered.
    #[error("grid extent must be finite and greater than 0; got {0}")]
    BadExtent(f64),

    /// Returned when the grid origin is not a finite number.
    #[error("grid origin must be finite; got {0}")]
    BadOrigin(f64),

    /// Returned when `extent / step` does not give a representable number of
    /// grid points.
    #[error("grid extent and step give an unrepresentable number of points: {0}")]
    BadCount(f64),
}

impl GridError {
    pub(crate) fn check_step(step: f64) -> Result<(), Self> {
        (step.is_finite() && step > 0.0)
            .then_some(()).ok_or(Self::BadStep(step))
    }

    pub(crate) fn check_extent(extent: f64) -> Result<(), Self> {
        (extent.is_finite() && extent > 0.0)
            .then_some(()).ok_or(Self::BadExtent(extent))
    }

    pub(crate) fn check_origin(origin: f64) -> Result<(), Self> {
        origin.is_finite().then_some(()).ok_or(Self::BadOrigin(origin))
    }

    pub(crate) fn check_count(count: f64) -> Result<(), Self> {
        (count.is_finite() && count < isize::MAX as f64)
            .then_some(()).ok_or(Self::BadCount(count))
    }
}

/// Returned from [`build_step_potential`][crate::potential::build_step_potential].
#[derive(Debug, Error)]
pub enum PotentialError {
    /// Returned when a wall lies outside the closed range of grid positions.
    #[error("wall at {wall} lies outside the grid domain [{lo}, {hi}]")]
    OutOfBounds { wall: f64, lo: f64, hi: f64 },

    /// Returned when the wall list is not strictly increasing.
    #[error("walls must be strictly increasing; got {prev} followed by {next} at index {index}")]
    Unordered { index: usize, prev: f64, next: f64 },

    /// Returned when the plateau height is not a finite number.
    #[error("potential height must be finite; got {0}")]
    BadHeight(f64),
}

impl PotentialError {
    pub(crate) fn check_height(height: f64) -> Result<(), Self> {
        height.is_finite().then_some(()).ok_or(Self::BadHeight(height))
    }
}

/// Returned from [`gaussian`][crate::packet::gaussian].
#[derive(Debug, Error)]
pub enum PacketError {
    /// Returned when a non-positive or non-finite packet width is encountered.
    #[error("packet width must be finite and greater than 0; got {0}")]
    BadWidth(f64),

    /// Returned when the packet center or wavenumber is not a finite number.
    #[error("packet {0} must be finite; got {1}")]
    NonFinite(&'static str, f64),
}

impl PacketError {
    pub(crate) fn check_width(width: f64) -> Result<(), Self> {
        (width.is_finite() && width > 0.0)
            .then_some(()).ok_or(Self::BadWidth(width))
    }

    pub(crate) fn check_finite(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        val.is_finite().then_some(()).ok_or(Self::NonFinite(name, val))
    }
}

/// Returned from the time evolution functions in [`evolve`][crate::evolve].
#[derive(Debug, Error)]
pub enum EvolveError {
    /// Returned when a non-positive tolerance value is encountered.
    #[error("tolerance values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when `hbar` or `mass` is non-positive or non-finite.
    #[error("physical constant {0} must be finite and greater than 0; got {1}")]
    BadConstant(&'static str, f64),

    /// Returned when the integration span runs backward or is not finite.
    #[error("integration span must satisfy t0 <= tf; got ({0}, {1})")]
    BadSpan(f64, f64),

    /// Returned when the spacing of generated output times is non-positive or
    /// non-finite.
    #[error("output time step must be finite and greater than 0; got {0}")]
    BadTimeStep(f64),

    /// Returned when the requested output times are unsorted or fall outside
    /// the integration span.
    #[error("output time {time} at index {index} is out of order or outside [{t0}, {tf}]")]
    BadOutputTimes { index: usize, time: f64, t0: f64, tf: f64 },

    /// Returned when the adaptive step size falls below the resolvable
    /// spacing of the time coordinate.
    #[error("integration failed at t = {t}: step size {dt} fell below the minimum step")]
    StepUnderflow { t: f64, dt: f64 },

    /// Returned when the error bound cannot be satisfied within the allowed
    /// number of consecutive rejected steps.
    #[error("integration failed at t = {t}: rk23 error bound could not be satisfied")]
    ErrorBound { t: f64 },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl EvolveError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_constant(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val.is_finite() && val > 0.0)
            .then_some(()).ok_or(Self::BadConstant(name, val))
    }

    pub(crate) fn check_time_step(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0)
            .then_some(()).ok_or(Self::BadTimeStep(dt))
    }

    pub(crate) fn check_span(t0: f64, tf: f64) -> Result<(), Self> {
        (t0.is_finite() && tf.is_finite() && t0 <= tf)
            .then_some(()).ok_or(Self::BadSpan(t0, tf))
    }

    /// Return `true` if `self` reports a failure of the internal stepper
    /// rather than a bad argument.
    pub fn is_integration_failure(&self) -> bool {
        matches!(self, Self::StepUnderflow { .. } | Self::ErrorBound { .. })
    }
}

/// Returned when a simulation configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("unable to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },

    /// Returned when the configuration file is not valid TOML or does not
    /// match the expected layout.
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Returned when the output time step is non-positive.
    #[error("output time step must be finite and greater than 0; got {0}")]
    BadTimeStep(f64),
}

impl ConfigError {
    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0)
            .then_some(()).ok_or(Self::BadTimeStep(dt))
    }
}

/// Returned from [`SimConfig::run`][crate::config::SimConfig::run].
#[derive(Debug, Error)]
pub enum SimError {
    /// [`ConfigError`]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`PotentialError`]
    #[error("potential error: {0}")]
    Potential(#[from] PotentialError),

    /// [`PacketError`]
    #[error("packet error: {0}")]
    Packet(#[from] PacketError),

    /// [`EvolveError`]
    #[error("evolution error: {0}")]
    Evolve(#[from] EvolveError),
}
