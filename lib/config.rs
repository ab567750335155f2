//! Explicit simulation configuration.
//!
//! Every parameter of a run lives in a [`SimConfig`], which can be built in
//! code, deserialized from TOML, or left at its defaults (a narrow packet
//! launched at a pair of step barriers). Missing tables and keys take their
//! default values, so a config file only needs to list what it changes:
//! ```
//! use packetsim::config::SimConfig;
//!
//! let config = SimConfig::from_toml_str(r#"
//!     [grid]
//!     step = 0.05
//!
//!     [potential]
//!     walls = [6.0, 7.0]
//!     height = 50.0
//!
//!     [time]
//!     tf = 0.1
//!     dt = 0.05
//! "#).unwrap();
//! assert_eq!(config.grid.extent, 10.0);
//! let solution = config.run().unwrap();
//! assert_eq!(solution.len(), 2);
//! ```

use std::{ f64::consts::PI, path::Path };
use ndarray as nd;
use serde::Deserialize;
use crate::{
    error::{ ConfigError, SimError },
    evolve::{ self, Constants, Solution, Tolerance },
    grid::Grid,
    laplacian::Laplacian,
    packet,
    potential::StepPotential,
};

pub type SimResult<T> = Result<T, SimError>;

/// Spatial grid parameters; see [`Grid::new`].
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First grid position (default: `0`).
    pub origin: f64,
    /// Grid spacing (default: `0.02`).
    pub step: f64,
    /// Length of the domain (default: `10`).
    pub extent: f64,
}

impl Default for GridConfig {
    fn default() -> Self { Self { origin: 0.0, step: 0.02, extent: 10.0 } }
}

impl GridConfig {
    /// Thin interface to [`Grid::new`].
    pub fn build(&self) -> SimResult<Grid> {
        Ok(Grid::new(self.origin, self.step, self.extent)?)
    }
}

/// Initial Gaussian wave packet parameters; see [`packet::gaussian`].
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
    /// Packet center (default: `2`).
    pub center: f64,
    /// Packet width (default: `0.1`).
    pub width: f64,
    /// Carrier wavenumber (default: `0.1`).
    pub wavenumber: f64,
}

impl Default for PacketConfig {
    fn default() -> Self { Self { center: 2.0, width: 0.1, wavenumber: 0.1 } }
}

impl PacketConfig {
    /// Peak probability density of the packet, `1 / (σ √π)`.
    pub fn peak_density(&self) -> f64 { (self.width * PI.sqrt()).recip() }
}

/// Integration span and output sampling.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Initial time (default: `0`).
    pub t0: f64,
    /// Final time (default: `1.005`).
    pub tf: f64,
    /// Spacing of output times (default: `0.005`).
    pub dt: f64,
    /// Also record a snapshot at exactly `tf` (default: `false`).
    pub include_end: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self { t0: 0.0, tf: 1.005, dt: 0.005, include_end: false }
    }
}

impl TimeConfig {
    /// Generate the output times `t0 + k dt < tf`.
    pub fn output_times(&self) -> SimResult<nd::Array1<f64>> {
        ConfigError::check_dt(self.dt)?;
        let t = evolve::output_times(self.t0, self.tf, self.dt, self.include_end)?;
        Ok(t)
    }
}

/// Complete description of a single simulation run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub packet: PacketConfig,
    pub potential: StepPotential,
    pub time: TimeConfig,
    pub constants: Constants,
    pub tolerance: Tolerance,
}

impl Default for SimConfig {
    fn default() -> Self {
        let packet = PacketConfig::default();
        let potential = StepPotential {
            walls: vec![3.0, 4.0, 5.0],
            height: 0.5 * packet.peak_density(),
        };
        Self {
            grid: GridConfig::default(),
            packet,
            potential,
            time: TimeConfig::default(),
            constants: Constants::default(),
            tolerance: Tolerance::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents
            = std::fs::read_to_string(path)
            .map_err(|source| {
                ConfigError::Read { path: path.display().to_string(), source }
            })?;
        Self::from_toml_str(&contents)
    }

    /// Build every component and integrate.
    pub fn run(&self) -> SimResult<Solution> {
        let grid = self.grid.build()?;
        let L = Laplacian::new(&grid);
        let V = self.potential.build(&grid)?;
        let PacketConfig { center, width, wavenumber } = self.packet;
        let psi0 = packet::gaussian(&grid, center, width, wavenumber)?;
        let t = self.time.output_times()?;
        log::debug!(
            "config::run: {} grid points, {} output times over [{}, {}]",
            grid.len(), t.len(), self.time.t0, self.time.tf,
        );
        let sol = evolve::evolve(
            &L,
            &V,
            &psi0,
            (self.time.t0, self.time.tf),
            &t,
            self.constants,
            self.tolerance,
        )?;
        Ok(sol)
    }
}
