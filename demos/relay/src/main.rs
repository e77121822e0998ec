//! relay — command-line driver for the bucket-brigade line simulator.
//!
//! Loads a JSON scenario (or builds the two-robot reference line, or a
//! random one), runs it for a fixed time budget under the pebble-slowdown
//! controller, optionally records the trajectory as CSV, and prints the
//! final state.
//!
//! ```bash
//! cargo run -p relay -- --epsilon 1/2 --duration 5 --output output/relay
//! cargo run -p relay -- --random 6 --seed 7 --max-step 0.05 --json
//! RUST_LOG=debug cargo run -p relay -- --scenario line.json
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brigade_control::{PebbleSlowdownFactory, TracedFactory};
use brigade_core::{IntoExact, Rational, to_f64};
use brigade_output::{CsvWriter, TrajectoryObserver};
use brigade_sim::{
    ExactInput, LineSimulator, LineSimulatorBuilder, PebbleSpec, RobotSpec, ScenarioConfig,
    SimObserver,
};

const DEFAULT_DURATION: &str = "5";

/// Bucket-brigade line simulator
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Run robots and pebbles on the unit interval with exact event timing")]
struct Args {
    /// JSON scenario file (robots, pebbles, optional epsilon/duration/max_step)
    #[arg(long, conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Generate a random line with this many robots (and as many pebbles)
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Slowdown factor while carrying; overrides the scenario's
    #[arg(short, long)]
    epsilon: Option<String>,

    /// Simulated time to run; overrides the scenario's
    #[arg(short, long)]
    duration: Option<String>,

    /// Cap on a single step, for evenly spaced samples
    #[arg(long)]
    max_step: Option<String>,

    /// Directory for robots.csv, pebbles.csv, and steps.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Two robots heading at each other with a pebble a quarter of the way in.
fn reference_line() -> ScenarioConfig {
    ScenarioConfig {
        robots: vec![
            RobotSpec { position: "0".into(), speed: "1".into(), name: Some("left".to_owned()) },
            RobotSpec { position: "1".into(), speed: "-1".into(), name: Some("right".to_owned()) },
        ],
        pebbles: vec![PebbleSpec { position: "1/4".into(), name: None }],
        ..ScenarioConfig::default()
    }
}

/// `robots` robots at distinct grid points with speeds in ±{1/4 … 1}, and as
/// many pebbles on the same grid.
fn random_line(robots: usize, seed: u64) -> ScenarioConfig {
    let mut rng = SmallRng::seed_from_u64(seed);
    let denominator = 64.max(4 * robots as u64);

    let mut positions = BTreeSet::new();
    while positions.len() < robots {
        positions.insert(rng.gen_range(1..denominator));
    }

    let robots = positions
        .into_iter()
        .map(|k| {
            let magnitude = rng.gen_range(1..=4);
            let speed = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            RobotSpec {
                position: ExactInput::Text(format!("{k}/{denominator}")),
                speed:    ExactInput::Text(format!("{speed}/4")),
                name:     None,
            }
        })
        .collect::<Vec<_>>();

    let pebbles = (0..robots.len())
        .map(|_| PebbleSpec {
            position: ExactInput::Text(format!("{}/{denominator}", rng.gen_range(0..=denominator))),
            name:     None,
        })
        .collect();

    ScenarioConfig { robots, pebbles, ..ScenarioConfig::default() }
}

/// CLI value if given, else the scenario's.
fn pick(cli: Option<&str>, file: Option<Rational>) -> Result<Option<Rational>> {
    match cli {
        Some(text) => Ok(Some(text.into_exact().with_context(|| format!("bad number {text:?}"))?)),
        None => Ok(file),
    }
}

fn run<O: SimObserver>(
    sim:      &mut LineSimulator<O>,
    scenario: &ScenarioConfig,
    duration: &Rational,
    max_step: Option<&Rational>,
) -> Result<()> {
    scenario.populate(sim)?;
    if sim.robots().is_empty() {
        bail!("scenario has no robots");
    }

    let t0 = Instant::now();
    sim.simulate(duration, max_step)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run finished");
    Ok(())
}

fn report<O: SimObserver>(sim: &LineSimulator<O>, json: bool) -> Result<()> {
    println!("t = {} ({:.6})", sim.time(), to_f64(sim.time()));
    println!();
    println!("{:<12} {:<14} {:>10} {:>10} {:>9}", "Robot", "Position", "≈", "Speed", "Carrying");
    println!("{}", "-".repeat(59));
    for robot in sim.robots() {
        println!(
            "{:<12} {:<14} {:>10.6} {:>10} {:>9}",
            robot.name(),
            robot.position().to_string(),
            to_f64(robot.position()),
            robot.effective_speed().to_string(),
            robot.carried().len(),
        );
    }
    if !sim.pebbles().is_empty() {
        println!();
        println!("{:<12} {:<14} {:>10} {:>10}", "Pebble", "Position", "≈", "Holder");
        println!("{}", "-".repeat(49));
        for pebble in sim.pebbles() {
            let holder = pebble
                .holder()
                .and_then(|id| sim.robot(id))
                .map_or("-", |r| r.name());
            println!(
                "{:<12} {:<14} {:>10.6} {:>10}",
                pebble.name(),
                pebble.position().to_string(),
                to_f64(pebble.position()),
                holder,
            );
        }
    }

    if json {
        println!();
        println!("{}", sim.snapshot().to_json()?);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let scenario = match (&args.scenario, args.random) {
        (Some(path), _) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        (None, Some(n)) => random_line(n, args.seed),
        (None, None) => reference_line(),
    };

    let epsilon = pick(args.epsilon.as_deref(), scenario.epsilon()?)?.unwrap_or_else(|| Rational::from_integer(1.into()));
    let duration = match pick(args.duration.as_deref(), scenario.duration()?)? {
        Some(d) => d,
        None => DEFAULT_DURATION.into_exact()?,
    };
    let max_step = pick(args.max_step.as_deref(), scenario.max_step()?)?;
    info!(
        robots = scenario.robots.len(),
        pebbles = scenario.pebbles.len(),
        %epsilon,
        %duration,
        "starting relay"
    );

    let builder = LineSimulatorBuilder::new()
        .controller_factory(TracedFactory::new(PebbleSlowdownFactory::new(epsilon)?));

    match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("creating output in {}", dir.display()))?;
            let mut sim = builder.observer(TrajectoryObserver::new(writer)).build();
            run(&mut sim, &scenario, &duration, max_step.as_ref())?;
            report(&sim, args.json)?;

            let mut observer = sim.into_observer();
            let steps = observer.steps();
            observer.finish()?;
            println!();
            println!("wrote {steps} steps to {}", dir.display());
        }
        None => {
            let mut sim = builder.build();
            run(&mut sim, &scenario, &duration, max_step.as_ref())?;
            report(&sim, args.json)?;
        }
    }
    Ok(())
}
