#![allow(non_snake_case)]

use std::{ path::PathBuf, str::FromStr };
use anyhow::bail;
use clap::Parser;
use log::LevelFilter;
use ndarray as nd;
use packetsim::{
    config::{ PacketConfig, SimConfig, TimeConfig },
    evolve::Hamiltonian,
    laplacian::Laplacian,
    observe,
    packet,
    potential::StepPotential,
};

mod output;
use output::write_npz;

/// Sweep the height of a step potential and record how much of an incident
/// wave packet is reflected and transmitted at the end of each run.
///
/// Heights are given in units of the packet's mean kinetic energy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// path to a TOML config; without one, a packet with k = 5 is sent at a
    /// barrier on [5, 5.5]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// largest barrier height, relative to the mean packet energy
    #[arg(long, default_value_t = 3.0)]
    max_height: f64,

    /// number of heights in the sweep
    #[arg(short, long, default_value_t = 16)]
    num: usize,

    /// path of the output archive
    #[arg(short, long, default_value = "output/barrier_scan.npz")]
    output: PathBuf,

    /// log level: off, error, warn, info, debug, or trace
    #[arg(short, long)]
    verbosity: Option<String>,
}

fn default_config() -> SimConfig {
    SimConfig {
        packet: PacketConfig { center: 2.5, width: 1.0, wavenumber: 5.0 },
        potential: StepPotential { walls: vec![5.0, 5.5], height: 0.0 },
        time: TimeConfig { t0: 0.0, tf: 0.8, dt: 0.8, include_end: true },
        ..SimConfig::default()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(LevelFilter::from_str(
            args.verbosity.as_deref().unwrap_or("warn"))?)
        .init();

    let mut config
        = match &args.config {
            Some(path) => SimConfig::load(path)?,
            None => default_config(),
        };
    let (Some(&first_wall), Some(&last_wall))
        = (config.potential.walls.first(), config.potential.walls.last())
    else {
        bail!("barrier scan needs at least one wall");
    };

    // mean energy of the free packet sets the height scale
    let grid = config.grid.build()?;
    let L = Laplacian::new(&grid);
    let V0: nd::Array1<f64> = nd::Array1::zeros(grid.len());
    let PacketConfig { center, width, wavenumber } = config.packet;
    let psi0 = packet::gaussian(&grid, center, width, wavenumber)?;
    let H = Hamiltonian::new(&L, &V0, config.constants)?;
    let energy = observe::energy(&H, &psi0)?;
    log::info!("mean packet energy: {energy:.6}");

    let x = grid.positions();
    let dx = grid.step();
    let heights: nd::Array1<f64>
        = nd::Array1::linspace(0.0, args.max_height * energy, args.num);
    let mut reflected: nd::Array1<f64> = nd::Array1::zeros(args.num);
    let mut transmitted: nd::Array1<f64> = nd::Array1::zeros(args.num);
    println!("{:>12} {:>12} {:>12}", "V0 / E", "reflected", "transmitted");
    for ((&height, R), T)
        in heights.iter().zip(reflected.iter_mut()).zip(transmitted.iter_mut())
    {
        config.potential.height = height;
        let sol = config.run()?;
        let Some((tf, qf)) = sol.get(sol.len().saturating_sub(1)) else {
            bail!("no snapshots requested; check the [time] table");
        };
        let norm = observe::norm(&qf, dx);
        *R = observe::probability_between(
            &x, &qf, dx, grid.first(), first_wall)? / norm;
        *T = observe::probability_between(
            &x, &qf, dx, last_wall, grid.last())? / norm;
        log::debug!("height {height:.4}: sampled at t = {tf}");
        println!("{:>12.4} {:>12.6} {:>12.6}", height / energy, R, T);
    }

    write_npz!(
        &args.output,
        arrays: {
            "height" => &heights,
            "energy" => &nd::array![energy],
            "reflected" => &reflected,
            "transmitted" => &transmitted,
        }
    )?;
    println!("wrote scan to {}", args.output.display());
    Ok(())
}
