use anyhow::{Context, Result};
use automaton_common::SimulationConfig;
use automaton_engine::Automaton;
use clap::Parser;
use log::{debug, info, trace};
use std::path::PathBuf;
use std::time::Instant;

/// Command-line arguments for the automaton runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation config file (.toml)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to run (overrides `run.ticks`)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Seed for the random source (overrides `run.seed`)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the recorded population snapshots as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting Automaton Engine...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    info!("Loaded '{}' config from {}.", config.simulation_type, args.config.display());
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if config.run.seed.is_none() {
        info!("No seed configured; this run is not reproducible.");
    }

    // --- Initialize Automaton ---
    let mut automaton = Automaton::new(&config)
        .with_context(|| format!("Failed to build simulation from '{}'", args.config.display()))?;
    debug!("Color table: {:?}", automaton.colors());

    // --- Tick Loop ---
    let total_ticks = config.run.ticks;
    let record_interval = config.run.record_interval;
    info!("Running {} ticks, recording every {} ticks.", total_ticks, record_interval);

    let start_time = Instant::now();
    let mut previous_print_time = start_time;
    automaton.record_snapshot();

    for tick in 0..total_ticks {
        let tick_start_time = Instant::now();
        automaton.step();
        let tick_duration = tick_start_time.elapsed();

        let current_time = Instant::now();
        let print_interval_secs = 5.0;
        let should_print_status = current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_tick = (tick + 1) % record_interval == 0;
        let is_last_tick = tick + 1 == total_ticks;

        if is_record_tick || is_last_tick {
            automaton.record_snapshot();
        }

        if should_print_status || is_last_tick {
            info!(
                "Tick [{}/{}] | Population: {:?} | Tick Time: {:6.3} ms | Elapsed: {:.2} s",
                tick + 1,
                total_ticks,
                automaton.population(),
                tick_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;
        } else {
            trace!(
                "Tick [{}/{}] completed in {:.3} ms",
                tick + 1,
                total_ticks,
                tick_duration.as_secs_f64() * 1000.0
            );
        }
    }

    info!(
        "Simulation finished in {:.3} seconds ({} snapshots recorded).",
        start_time.elapsed().as_secs_f64(),
        automaton.recorded_snapshots().len()
    );

    if args.json {
        let json = serde_json::to_string(automaton.recorded_snapshots())
            .context("Failed to serialize snapshots")?;
        println!("{}", json);
    }

    info!("Simulation Complete.");
    Ok(())
}
