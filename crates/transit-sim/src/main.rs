//! Transit Light Curve Runner
//!
//! Builds a star system from a preset or a JSON description, synthesizes
//! its light curve and writes it to stdout. Logs go to stderr.
//!
//! Usage:
//!   transit-sim --preset two-planet --format csv > curve.csv
//!   transit-sim --config system.json --step 0.01 --events

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use light_curve::{LightCurve, SimulationConfig, TransitWindow};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use transit_geometry::presets;
use transit_geometry::rays::DEFAULT_RAY_COUNT;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Single planet, central transit, 1% depth
    Demo,
    /// Earth-like planet plus hot Jupiter over two weeks
    TwoPlanet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    name = "transit-sim",
    about = "Simulate exoplanet transits and print the resulting light curve"
)]
struct Args {
    /// Built-in star system
    #[arg(short, long, value_enum, default_value = "two-planet")]
    preset: Preset,

    /// JSON system description (overrides --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sampling interval
    #[arg(long)]
    step: Option<f64>,

    /// Last sample time
    #[arg(long)]
    horizon: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Include the transit timeline (JSON output only)
    #[arg(long)]
    events: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    curve: &'a LightCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    transits: Option<&'a [TransitWindow]>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<SimulationConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => match args.preset {
            Preset::Demo => presets::central_transit_demo().into(),
            Preset::TwoPlanet => presets::earth_and_hot_jupiter().into(),
        },
    };

    if let Some(step) = args.step {
        config = config.with_step(step);
    }
    if let Some(horizon) = args.horizon {
        config = config.with_horizon(horizon);
    }

    config.validate().context("invalid simulation configuration")?;
    Ok(config)
}

fn write_csv(out: &mut impl Write, curve: &LightCurve) -> io::Result<()> {
    writeln!(out, "time,relative_flux")?;
    for sample in curve {
        writeln!(out, "{},{}", sample.time, sample.relative_flux)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    info!(
        planets = config.planets.len(),
        step = config.step,
        horizon = config.horizon,
        "running transit simulation"
    );

    let curve = config.run()?;
    info!(
        samples = curve.len(),
        depth = curve.transit_depth(),
        "light curve ready"
    );

    let transits = config.transits()?;
    let rays = config.rays(DEFAULT_RAY_COUNT)?;
    for w in &transits {
        info!(
            planet = w.planet_index,
            ingress = w.ingress,
            egress = w.egress,
            depth = w.max_depth,
            rays_blocked = rays.blocked_count(&config.planets, w.midpoint),
            "transit"
        );
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        Format::Json => {
            let report = Report {
                curve: &curve,
                transits: args.events.then_some(transits.as_slice()),
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Format::Csv => write_csv(&mut out, &curve)?,
    }
    out.flush()?;

    Ok(())
}
