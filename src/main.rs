mod logger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gravsim::models::scenarios::{scenario_catalog, scenario_config, SCENARIO_THREE_BODY};
use gravsim::output::{self, OutputFormat};
use gravsim::{Engine, SimulationConfig};
use log::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Integrate point masses under Newtonian gravity and export their trajectories.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON run description (bodies, G, dt, steps, softening)
    #[arg(short, long, conflicts_with = "scenario")]
    config: Option<PathBuf>,

    /// Built-in initial conditions
    #[arg(short, long, default_value = SCENARIO_THREE_BODY)]
    scenario: String,

    /// Override the time step
    #[arg(long)]
    dt: Option<f64>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the gravitational constant
    #[arg(short = 'g', long)]
    gravity: Option<f64>,

    /// Override the softening length (0 = exact law, coincident bodies abort the run)
    #[arg(long)]
    softening: Option<f64>,

    /// Write trajectories to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; guessed from the file extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Print the built-in scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => scenario_config(&args.scenario)?,
    };
    if let Some(dt) = args.dt { cfg.dt = dt; }
    if let Some(steps) = args.steps { cfg.steps = steps; }
    if let Some(g) = args.gravity { cfg.g = g; }
    if let Some(eps) = args.softening { cfg.softening = eps; }
    Ok(cfg)
}

fn simulate(args: &Args) -> Result<()> {
    let cfg = load_config(args)?;
    let mut engine = Engine::from_config(cfg).context("invalid simulation setup")?;
    engine.run().context("simulation aborted")?;

    let momentum = engine.momentum();
    info!(
        "total momentum ({:.6e}, {:.6e}, {:.6e})",
        momentum.x, momentum.y, momentum.z
    );

    match &args.output {
        Some(path) => {
            let format = args.format.map(OutputFormat::from).unwrap_or_else(|| OutputFormat::from_path(path));
            output::save(engine.trajectories(), path, format)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            info!("{} snapshots per body written to '{}'", engine.trajectories().steps(), path.display());
        }
        None => {
            for snap in engine.state().body_snapshots() {
                info!(
                    "{} [{}]: x = ({:.6}, {:.6}, {:.6}) v = ({:.6}, {:.6}, {:.6})",
                    snap.name, snap.color,
                    snap.state[0], snap.state[1], snap.state[2],
                    snap.state[3], snap.state[4], snap.state[5]
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet)?;

    if args.list_scenarios {
        for s in scenario_catalog() {
            println!("{:<14} {:<20} {}", s.id, s.name, s.description);
        }
        return Ok(());
    }

    simulate(&args).inspect_err(|e| error!("{:#}", e))
}
