//! Headless flock runner.
//!
//! Spawns a flock, steps it at a fixed time step and logs how the
//! population shrinks. Prints a JSON summary when done.

use boids::simulation::error::Result;
use boids::simulation::flock::{Flock, FlockStats};
use boids::simulation::params::Params;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// Run a predatory flocking simulation without a window
#[derive(Parser, Debug)]
#[command(name = "boids")]
#[command(about = "Run a predatory flocking simulation and report how the flock evolves")]
struct Args {
    /// JSON parameter file; defaults are used when omitted
    #[arg(long)]
    config: Option<String>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Time step per tick, in milliseconds
    #[arg(long, default_value_t = 16.0)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of boids spawned
    #[arg(long)]
    boids: Option<usize>,

    /// Log flock statistics every this many ticks
    #[arg(long, default_value_t = 500)]
    report_every: u64,
}

#[derive(Serialize)]
struct Summary {
    seed: Option<u64>,
    meals: usize,
    stats: FlockStats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("boids=info")),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(n) = args.boids {
        params.n_boids = n;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut flock = Flock::new(&params, &mut rng)?;
    tracing::info!(
        boids = flock.population.len(),
        width = params.box_width,
        height = params.box_height,
        "starting flock simulation"
    );

    let mut meals = 0;
    for _ in 0..args.ticks {
        let report = flock.step(&params, args.dt)?;
        meals += report.meals.len();

        if args.report_every > 0 && report.tick % args.report_every == 0 {
            let stats = flock.stats();
            tracing::info!(
                tick = stats.tick,
                population = stats.population,
                largest_mass = stats.largest_mass,
                mean_speed = stats.mean_speed,
                "flock stats"
            );
        }

        if report.population <= 1 {
            tracing::info!(tick = report.tick, "one boid left, stopping");
            break;
        }
    }

    let summary = Summary {
        seed: args.seed,
        meals,
        stats: flock.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
