//! Crazy Car headless runner
//!
//! Drives the simulation without a window: an autopilot plays a number of
//! attempts back to back, events and audio cues are logged, and a summary
//! (or the final frame as JSON) is printed.
//!
//! Usage:
//!   RUST_LOG=info cargo run -- --attempts 5 --seed 42
//!   cargo run -- --tuning hard.json --json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crazy_car::audio::LogSink;
use crazy_car::autopilot::{AttemptReport, Autopilot, DEFAULT_HORIZON, drive_attempt};
use crazy_car::sim::{Session, Snapshot};
use crazy_car::tuning::Tuning;

#[derive(Parser)]
#[command(name = "crazy-car")]
#[command(about = "Run Crazy Car attempts headlessly with an autopilot driver")]
struct Args {
    /// Obstacle RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning file; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Attempts to play
    #[arg(long, default_value_t = 3)]
    attempts: u32,

    /// Tick limit per attempt
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    /// Autopilot look-ahead in ticks
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: u32,

    /// Print reports and the final frame as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective tuning as JSON and exit
    #[arg(long)]
    print_tuning: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    attempts: Vec<AttemptReport>,
    highscore: u32,
    final_frame: Snapshot,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    if args.print_tuning {
        println!("{}", tuning.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Crazy Car (headless) starting with seed {seed}");

    let mut session = Session::with_tuning(seed, tuning).context("invalid tuning")?;
    let mut pilot = Autopilot::new(args.horizon);
    let mut sink = LogSink::new();
    let mut reports = Vec::with_capacity(args.attempts as usize);

    for _ in 0..args.attempts {
        let report = drive_attempt(&mut session, &mut pilot, args.max_ticks, &mut sink)
            .with_context(|| format!("attempt {} could not start", session.attempt + 1))?;

        if !args.json {
            let outcome = match report.cause {
                Some(cause) => format!("crashed ({cause:?})"),
                None => "tick limit".to_string(),
            };
            println!(
                "Attempt {:>3}: {:>4} s  {:>6} ticks  {:>3} drifts  {}{}",
                report.attempt,
                report.score,
                report.ticks,
                report.drifts,
                outcome,
                if report.new_best { "  NEW BEST" } else { "" }
            );
        }
        let finished = report.cause.is_some();
        reports.push(report);
        if !finished {
            log::info!("Tick limit reached; stopping after attempt {}", session.attempt);
            break;
        }
    }

    let summary = RunSummary {
        seed: session.seed,
        attempts: reports,
        highscore: session.scoreboard.highscore,
        final_frame: session.snapshot(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        for line in summary.final_frame.hud.lines() {
            println!("{line}");
        }
    }

    Ok(())
}
