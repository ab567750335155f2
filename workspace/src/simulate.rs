use std::{ path::PathBuf, str::FromStr };
use clap::Parser;
use log::LevelFilter;
use packetsim::{ config::SimConfig, observe };

mod output;
use output::write_npz;

/// Evolve a Gaussian wave packet through a step potential and save every
/// snapshot to an `.npz` archive (arrays `x`, `v`, `t`, `q`).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// path to a TOML config; anything it leaves out takes its default value
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// path of the output archive
    #[arg(short, long, default_value = "output/simulate.npz")]
    output: PathBuf,

    /// log level: off, error, warn, info, debug, or trace
    #[arg(short, long)]
    verbosity: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(LevelFilter::from_str(
            args.verbosity.as_deref().unwrap_or("warn"))?)
        .init();

    let config
        = match &args.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
    log::info!("{config:#?}");

    let sol = config.run()?;
    let x = sol.grid().positions();
    let dx = sol.grid().step();
    let norms = sol.norms();
    if let (Some(n0), Some(nf)) = (norms.first(), norms.last()) {
        log::info!("total probability: {n0:.6} -> {nf:.6}");
    }
    if let Some((tf, qf)) = sol.get(sol.len().saturating_sub(1)) {
        log::info!(
            "at t = {tf}: <x> = {:.4}, var(x) = {:.4}, P(x < {}) = {:.4}",
            observe::mean_position(&x, &qf)?,
            observe::variance(&x, &qf)?,
            config.grid.origin + 0.5 * config.grid.extent,
            observe::probability_between(
                &x, &qf, dx,
                sol.grid().first(),
                config.grid.origin + 0.5 * config.grid.extent,
            )?,
        );
    }

    write_npz!(
        &args.output,
        arrays: {
            "x" => &x,
            "v" => &sol.potential(),
            "t" => &sol.times(),
            "q" => &sol.snapshots(),
        }
    )?;
    println!("wrote {} snapshots to {}", sol.len(), args.output.display());
    Ok(())
}
