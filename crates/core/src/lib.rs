pub mod entity;
pub mod frame;
pub mod game;
pub mod maze;
pub mod state;
pub mod types;

pub use frame::{FrameSink, InputSource, run};
pub use game::pathfinding::find_path;
pub use game::{Game, GameSettings, format_snapshot_hash};
pub use maze::{MazeError, MazeLayout, MazeOptions, load_maze, parse_maze};
pub use state::{GameState, Grid};
pub use types::*;
