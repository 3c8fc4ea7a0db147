use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Raw offset with no wrap-around or wall check; see `Grid::neighbor` for legal moves.
    pub fn offset(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self { row: self.row + dr, col: self.col + dc }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stay,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Stay => (0, 0),
        }
    }
}

/// One tick's worth of external player input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Idle,
    Exit,
}

impl Command {
    pub fn direction(self) -> Direction {
        match self {
            Command::Up => Direction::Up,
            Command::Down => Direction::Down,
            Command::Left => Direction::Left,
            Command::Right => Direction::Right,
            Command::Idle | Command::Exit => Direction::Stay,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
    Dot,
    PowerPill,
    /// A floor cell whose dot or power pill has been eaten.
    Empty,
}

impl CellKind {
    pub fn is_collectible(self) -> bool {
        matches!(self, CellKind::Dot | CellKind::PowerPill)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    Frightened,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Picks a random cardinal direction every tick.
    Wanderer,
    /// Follows an A* plan toward the player.
    Chaser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    Player,
    Ghost,
    Chaser,
    Frightened,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    GameOver(Outcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DotEaten { at: Point },
    PowerPillEaten { at: Point },
    PlayerCaught { enemy: EntityId, lives_left: u32 },
    EnemyEaten { enemy: EntityId },
    Forfeited,
    GameOver { outcome: Outcome },
}

#[derive(Clone, Debug)]
pub struct TickResult {
    pub tick: u64,
    pub status: TickStatus,
    pub events: Vec<GameEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub glyph: Glyph,
    pub pos: Point,
}

/// Everything a renderer needs after a tick, apart from the grid itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub lives: u32,
    pub dots_remaining: usize,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    WorkerPool(String),
    TimerThread(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WorkerPool(reason) => write!(f, "failed to start move workers: {reason}"),
            GameError::TimerThread(reason) => {
                write!(f, "failed to start power-up countdown: {reason}")
            }
        }
    }
}

impl Error for GameError {}
