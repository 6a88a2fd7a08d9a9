//! Rocket Evolve headless runner
//!
//! Stands in for the interactive shell: feeds control values into the
//! simulation every tick, optionally paces ticks in real time, and prints
//! progress (or full tick reports as JSON lines).

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rocket_evolve::Settings;
use rocket_evolve::sim::{ResetReport, Simulation, TickReport, recover, tick};

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "rocket-evolve")]
#[command(about = "Rockets learning to reach a target through a genetic algorithm")]
struct Args {
    /// JSON settings file (defaults are used when absent)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of ticks to simulate (0 runs until interrupted)
    #[arg(long, default_value_t = 5000)]
    ticks: u64,

    /// Random seed, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep for the configured frame time between ticks
    #[arg(long)]
    realtime: bool,

    /// Print every tick report as a JSON line on stdout
    #[arg(long)]
    json: bool,

    /// Interval between progress log lines (in ticks, 0 disables)
    #[arg(long, default_value_t = 250)]
    stats_every: u64,
}

/// One JSON line of runner output
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Tick(&'a TickReport),
    Reset(&'a ResetReport),
}

fn write_event(out: &mut impl Write, event: &Event) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    settings.validate().context("settings are invalid")?;

    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!("Rocket Evolve starting (seed {}, {} rockets)", seed, settings.population_size);

    let mut sim = Simulation::from_settings(&settings, seed);
    let input = settings.tick_input();
    let mut out = BufWriter::new(std::io::stdout().lock());

    while args.ticks == 0 || sim.time_ticks < args.ticks {
        match tick(&mut sim, &input) {
            Ok(report) => {
                if args.json {
                    write_event(&mut out, &Event::Tick(&report))?;
                }
            }
            Err(err) => {
                // The population cannot recover on its own; start over
                log::warn!("{err}, resetting population");
                let report = recover(&mut sim, err, settings.population_size);
                if args.json {
                    write_event(&mut out, &Event::Reset(&report))?;
                }
            }
        }

        if args.stats_every > 0 && sim.time_ticks % args.stats_every == 0 {
            let stats = sim.population.stats();
            log::info!(
                "tick {}: {} live, best fitness {:.4}, mean {:.4}, closest {:.1}",
                sim.time_ticks,
                stats.live,
                stats.best_fitness.unwrap_or(f64::NAN),
                stats.mean_fitness.unwrap_or(f64::NAN),
                stats.closest_distance.unwrap_or(f64::NAN),
            );
        }

        if args.realtime {
            out.flush()?;
            std::thread::sleep(settings.frame_duration());
        }
    }

    out.flush()?;
    log::info!("Finished after {} ticks", sim.time_ticks);
    Ok(())
}
