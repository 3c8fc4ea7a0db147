use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chase_app::config::GameConfig;
use chase_app::input::InputThread;
use chase_app::screen::TerminalRenderer;
use chase_app::seed::resolve_seed;
use chase_app::terminal::TerminalSession;
use chase_app::{APP_NAME, outcome_message};
use chase_core::{Game, format_snapshot_hash, load_maze, run};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// How long the final frame stays on screen before the terminal is restored.
const FINAL_FRAME_HOLD: Duration = Duration::from_millis(1500);
const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = "Eat every dot in the maze without getting caught")]
struct Args {
    /// JSON game configuration. Defaults to `config.json` when present, else
    /// built-in ASCII glyphs.
    #[arg(long)]
    config_file: Option<PathBuf>,

    #[arg(long, default_value = "mazes/maze01.txt")]
    maze_file: PathBuf,

    /// Seed for the wandering ghosts; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here. Nothing is logged otherwise, since the game owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = load_config(args.config_file.as_deref())?;
    let seed = resolve_seed(args.seed);
    let layout = load_maze(&args.maze_file, &config.maze_options())
        .with_context(|| format!("failed to load maze {}", args.maze_file.display()))?;
    let mut game =
        Game::new(layout, &config.settings(seed.value())).context("failed to start game")?;
    tracing::info!(?seed, maze = %args.maze_file.display(), "starting game");

    let outcome = {
        let _session = TerminalSession::enter().context("failed to set up terminal")?;
        let (commands, mut inbox) = mpsc::channel();
        let _input = InputThread::spawn(commands).context("failed to start keyboard reader")?;
        let mut renderer = TerminalRenderer::new(io::stdout(), config.clone());
        let outcome = run(&mut game, &mut inbox, &mut renderer, config.frame_period())
            .context("failed to draw frame")?;
        thread::sleep(FINAL_FRAME_HOLD);
        outcome
    };

    let snapshot = game.snapshot();
    tracing::info!(
        ?outcome,
        score = snapshot.score,
        ticks = snapshot.tick,
        hash = %format_snapshot_hash(game.snapshot_hash()),
        "game finished"
    );
    println!("{} Score: {}", outcome_message(outcome), snapshot.score);
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<GameConfig> {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(GameConfig::default()),
    };
    GameConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
