//! Headless arena: a few autopilots on the default board until the game ends
//! or the time limit runs out.
//!
//! ```text
//! arena [ROSTER_CSV [PORTALS_CSV]]
//!
//! ARENA_SEED     master seed            (default 0)
//! ARENA_SECONDS  wall-clock time limit  (default 30)
//! RUST_LOG       log filter             (default info)
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use snake_agent::AgentSpec;
use snake_core::{AgentId, Direction, GameConfig, Position, RespawnPolicy, Tick};
use snake_sim::{
    GameBuilder, GameObserver, GameReport, StepOutcome, load_portals_csv, load_roster_csv,
};
use snake_spatial::Tile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Counts frames and logs the interesting steps.
#[derive(Default)]
struct Tally {
    frames: u64,
    cells: u64,
    collisions: u64,
}

impl GameObserver for Tally {
    fn on_cell_changed(&mut self, _pos: Position, _tile: Tile) {
        self.cells += 1;
    }

    fn on_refresh(&mut self, _timeline: Tick) {
        self.frames += 1;
    }

    fn on_step(&mut self, tick: Tick, outcome: &StepOutcome) {
        match *outcome {
            StepOutcome::Advanced { agent, to, ate: Some(kind), .. } => {
                debug!(%tick, %agent, %to, %kind, "ate");
            }
            StepOutcome::Collided { agent, at, with } => {
                self.collisions += 1;
                info!(%tick, %agent, %at, %with, "collision");
            }
            StepOutcome::Forfeited { agent } => {
                self.collisions += 1;
                info!(%tick, %agent, "forfeit");
            }
            StepOutcome::Advanced { .. } => {}
        }
    }

    fn on_respawn(&mut self, old: AgentId, new: AgentId, at: Position) {
        info!(%old, %new, %at, "respawned");
    }
}

fn default_roster() -> Vec<AgentSpec> {
    [10, 20, 30]
        .into_iter()
        .map(|y| AgentSpec::auto(Position::new(0, y), Direction::Right))
        .collect()
}

fn env_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(v) => v.parse().with_context(|| format!("{name} must be an integer, got '{v}'")),
        Err(_) => Ok(default),
    }
}

fn print_report(report: &GameReport, tally: &Tally) {
    println!("outcome:    {}", report.outcome);
    println!("final tick: {}", report.final_tick);
    println!("iterations: {}", report.iterations);
    println!(
        "frames:     {} ({} cell updates, {} collisions)",
        tally.frames, tally.cells, tally.collisions
    );
    println!();
    println!(
        "{:<12} {:<6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "agent", "kind", "alive", "steps", "eaten", "length", "speed"
    );
    for s in &report.agents {
        println!(
            "{:<12} {:<6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            s.id.to_string(),
            format!("{:?}", s.kind),
            s.alive,
            s.steps,
            s.foods_eaten,
            s.length,
            s.speed
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let roster = match args.first() {
        Some(path) => load_roster_csv(Path::new(path))
            .with_context(|| format!("loading roster {path}"))?,
        None => default_roster(),
    };
    let portals = match args.get(1) {
        Some(path) => load_portals_csv(Path::new(path))
            .with_context(|| format!("loading portals {path}"))?,
        None => Vec::new(),
    };

    let config = GameConfig {
        seed: env_u64("ARENA_SEED", 0)?,
        respawn: RespawnPolicy::Respawn,
        respawn_length: 3,
        ..GameConfig::default()
    };
    let limit = Duration::from_secs(env_u64("ARENA_SECONDS", 30)?);
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        agents = roster.len(),
        "arena starting"
    );

    let game = GameBuilder::new(config).roster(roster).portals(portals).build()?;
    let stop = game.stop_handle();
    let mut tally = Tally::default();

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(limit).await;
        stop.request_stop();
    });
    let report = game.run_until_game_over(&mut tally).await;
    stopper.abort();

    print_report(&report, &tally);
    Ok(())
}
