//! Firefly headless runner
//!
//! Plays a session with the autopilot at a fixed frame delta and prints the
//! outcome as JSON. Useful for balance checks against a tuning file.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use firefly::Tuning;
use firefly::autopilot;
use firefly::consts::FRAME_DT;
use firefly::sim::{GameEvent, Session, SessionPhase, tick};

#[derive(Parser)]
#[command(name = "firefly")]
#[command(about = "Run a headless Firefly session with the autopilot")]
struct Cli {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Tuning file (JSON); defaults are used if it cannot be read
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final snapshot along with the summary
    #[arg(long)]
    snapshot: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    phase: Option<SessionPhase>,
    ticks: u64,
    light: f32,
    pollen_collected: u32,
    flowers_lit: u32,
    enemy_hits: u32,
    rock_hits: u32,
}

impl Summary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PollenCollected { .. } => self.pollen_collected += 1,
            GameEvent::BeaconLit { .. } => self.flowers_lit += 1,
            GameEvent::EnemyHit { .. } => self.enemy_hits += 1,
            GameEvent::HazardHit { .. } => self.rock_hits += 1,
            GameEvent::SessionWon | GameEvent::SessionLost => {}
        }
    }
}

fn run(cli: &Cli) -> Result<(), serde_json::Error> {
    let tuning = cli
        .tuning
        .as_ref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let mut session = match cli.seed {
        Some(seed) => Session::new(seed, tuning),
        None => Session::random(tuning),
    };

    let mut summary = Summary {
        seed: session.seed,
        ..Default::default()
    };

    while session.time_ticks < cli.ticks && !session.phase.is_terminal() {
        let input = autopilot::steer(&session);
        tick(&mut session, &input, FRAME_DT);
        for event in session.drain_events() {
            log::debug!("tick {}: {:?}", session.time_ticks, event);
            summary.record(&event);
        }
    }

    if !session.phase.is_terminal() {
        log::warn!("Gave up after {} ticks with the session still running", cli.ticks);
    }

    summary.phase = Some(session.phase);
    summary.ticks = session.time_ticks;
    summary.light = session.player.light.value();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Firefly (headless) starting...");

    if let Err(e) = run(&cli) {
        log::error!("Failed to write summary: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives the simulation through the library
}
