use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chase_core::{
    Command, Game, GameSettings, MazeOptions, Outcome, TickStatus, format_snapshot_hash, load_maze,
};
use clap::{Parser, ValueEnum};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// The player never moves.
    Idle,
    /// A seeded random direction every tick.
    Random,
}

#[derive(Parser)]
#[command(author, version, about = "Headless maze chase simulation", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "mazes/maze01.txt")]
    maze_file: PathBuf,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,
    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    strategy: Strategy,
    #[arg(long, default_value_t = 200)]
    pill_duration_ms: u64,
    #[arg(long, default_value_t = 3)]
    lives: u32,
    /// Move worker pool size; 0 picks one automatically.
    #[arg(long, default_value_t = 0)]
    workers: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    ticks: u64,
    outcome: Option<Outcome>,
    score: u32,
    lives: u32,
    dots_remaining: usize,
    snapshot_hash: String,
}

const MOVES: [Command; 5] =
    [Command::Up, Command::Down, Command::Left, Command::Right, Command::Idle];

struct Pilot {
    strategy: Strategy,
    rng: ChaCha8Rng,
}

impl Pilot {
    fn new(strategy: Strategy, seed: u64) -> Self {
        // Decorrelate player input from the ghosts' streams.
        Self { strategy, rng: ChaCha8Rng::seed_from_u64(seed.rotate_left(32) ^ 0x5EED) }
    }

    fn next_command(&mut self) -> Command {
        match self.strategy {
            Strategy::Idle => Command::Idle,
            Strategy::Random => MOVES[(self.rng.next_u64() % MOVES.len() as u64) as usize],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let layout = load_maze(&args.maze_file, &MazeOptions::default())
        .with_context(|| format!("Failed to load maze file: {}", args.maze_file.display()))?;
    let settings = GameSettings {
        lives: args.lives,
        power_duration: Duration::from_millis(args.pill_duration_ms),
        workers: args.workers,
        seed: args.seed,
    };
    let mut game = Game::new(layout, &settings).context("Failed to start simulation")?;
    let mut pilot = Pilot::new(args.strategy, args.seed);

    let summary = simulate(&mut game, &mut pilot, args.ticks)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn simulate(game: &mut Game, pilot: &mut Pilot, max_ticks: u64) -> Result<Summary> {
    for _ in 0..max_ticks {
        let result = game.tick(pilot.next_command());
        check_invariants(game)?;
        if let TickStatus::GameOver(outcome) = result.status {
            tracing::info!(?outcome, tick = result.tick, "simulation finished");
            break;
        }
    }

    let snapshot = game.snapshot();
    Ok(Summary {
        ticks: snapshot.tick,
        outcome: snapshot.outcome,
        score: snapshot.score,
        lives: snapshot.lives,
        dots_remaining: snapshot.dots_remaining,
        snapshot_hash: format_snapshot_hash(game.snapshot_hash()),
    })
}

fn check_invariants(game: &Game) -> Result<()> {
    let snapshot = game.snapshot();
    for sprite in &snapshot.sprites {
        if !game.grid().is_walkable(sprite.pos) {
            bail!(
                "Invariant failed: {:?} inside a wall at ({}, {}) on tick {}",
                sprite.glyph,
                sprite.pos.row,
                sprite.pos.col,
                snapshot.tick
            );
        }
    }
    Ok(())
}
