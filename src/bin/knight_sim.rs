//! Headless simulator.
//!
//! Runs a game from a TOML config, or the knights-versus-zombies preset,
//! for a number of turns and prints a summary. Human-swarm seats are
//! played by clicking the first tile the overlay offers.
//!
//! ```text
//! RUST_LOG=project_knight=debug knight-sim --turns 20 --seed 7
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rustc_hash::FxHashMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use project_knight::board::TileTemplates;
use project_knight::core::{GameConfig, GameEvent, PlayerId};
use project_knight::game::GameSession;
use project_knight::games::zombies::ZombieGameBuilder;
use project_knight::players::TurnPhase;

#[derive(Parser, Debug)]
#[command(name = "knight-sim", about = "Run a Project Knight game headlessly")]
struct Args {
    /// Game config in TOML. Defaults to the zombies preset.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the config seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many turns have ended.
    #[arg(short, long, default_value_t = 10)]
    turns: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 0.02)]
    dt: f32,

    /// Give up after this many ticks.
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Preset board rows.
    #[arg(long, default_value_t = 8)]
    rows: i32,

    /// Preset board columns.
    #[arg(long, default_value_t = 5)]
    cols: i32,
}

#[derive(Debug, Default)]
struct Tally {
    turns: u32,
    captures: u32,
    lost: u32,
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ZombieGameBuilder::new()
            .board_size(args.rows, args.cols)
            .build(args.seed.unwrap_or(0)),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Click for a seat waiting on the host.
fn play_host(session: &mut GameSession) -> Result<()> {
    let Some(active) = session.state().active_turn() else {
        return Ok(());
    };
    if session.state().player(active)?.phase() != TurnPhase::AwaitingSelection {
        return Ok(());
    }
    if let Some(&address) = session.state().board().selectable_addresses().first() {
        session.select_tile(address)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(seed = config.seed, rows = config.board.rows, cols = config.board.cols, "Starting simulation");

    let mut factory = TileTemplates::new().with_template("Tile");
    let mut session = GameSession::new(&config, &mut factory).context("failed to set up game")?;
    session.start()?;

    let mut tallies: FxHashMap<PlayerId, Tally> = FxHashMap::default();
    let mut turns = 0;
    while turns < args.turns && session.ticks() < args.max_ticks {
        for event in session.tick(args.dt)? {
            match event {
                GameEvent::TurnEnded { player } => {
                    tallies.entry(player).or_default().turns += 1;
                    turns += 1;
                }
                GameEvent::PieceCaptured { owner, by, .. } => {
                    tallies.entry(by).or_default().captures += 1;
                    tallies.entry(owner).or_default().lost += 1;
                }
                _ => {}
            }
        }
        play_host(&mut session)?;
    }
    if turns < args.turns {
        warn!(turns, ticks = session.ticks(), "Tick limit reached");
    }

    let state = session.state();
    println!(
        "{} turns in {} ticks ({:.1}s simulated)",
        turns,
        session.ticks(),
        state.elapsed()
    );
    for (id, player) in state.players().iter() {
        let tally = tallies.remove(&id).unwrap_or_default();
        println!(
            "  {} ({}): {} turns, {} in play, {} in pool, {} captures, {} lost",
            player.name(),
            id,
            tally.turns,
            player.in_play().len(),
            player.pool().len(),
            tally.captures,
            tally.lost,
        );
    }
    Ok(())
}
