//! Text maze parsing into a `Grid` plus spawn points.
//!
//! `#` wall, `.` dot, `X` power pill, `P` player spawn, configurable enemy
//! markers, anything else floor.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::state::Grid;
use crate::types::{CellKind, EnemyKind, Point};

const WALL: char = '#';
const DOT: char = '.';
const POWER_PILL: char = 'X';
const PLAYER: char = 'P';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeOptions {
    pub ghost_marker: char,
    pub chaser_marker: char,
    /// When off, chaser spawns become plain wandering ghosts.
    pub chaser_enabled: bool,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self { ghost_marker: 'G', chaser_marker: 'C', chaser_enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    pub grid: Grid,
    pub player_spawn: Point,
    /// Enemy spawns in row-major order.
    pub enemy_spawns: Vec<(EnemyKind, Point)>,
}

#[derive(Debug)]
pub enum MazeError {
    Empty,
    MissingPlayer,
    DuplicatePlayer { first: Point, second: Point },
    ConflictingMarker(char),
    Io(io::Error),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::Empty => write!(f, "maze has no rows"),
            MazeError::MissingPlayer => write!(f, "maze has no player spawn '{PLAYER}'"),
            MazeError::DuplicatePlayer { first, second } => write!(
                f,
                "maze has more than one player spawn: ({}, {}) and ({}, {})",
                first.row, first.col, second.row, second.col
            ),
            MazeError::ConflictingMarker(marker) => {
                write!(f, "enemy marker '{marker}' collides with another maze symbol")
            }
            MazeError::Io(err) => write!(f, "failed to read maze: {err}"),
        }
    }
}

impl Error for MazeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MazeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MazeError {
    fn from(err: io::Error) -> Self {
        MazeError::Io(err)
    }
}

pub fn load_maze(path: &Path, options: &MazeOptions) -> Result<MazeLayout, MazeError> {
    let text = fs::read_to_string(path)?;
    parse_maze(&text, options)
}

pub fn parse_maze(text: &str, options: &MazeOptions) -> Result<MazeLayout, MazeError> {
    check_markers(options)?;

    let lines: Vec<&str> = text.lines().collect();
    if lines.iter().all(|line| line.is_empty()) {
        return Err(MazeError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());
    let mut player_spawn = None;
    let mut enemy_spawns = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let mut cells = Vec::with_capacity(line.len());
        for (col, symbol) in line.chars().enumerate() {
            let here = Point::new(row as i32, col as i32);
            let cell = match symbol {
                WALL => CellKind::Wall,
                DOT => CellKind::Dot,
                POWER_PILL => CellKind::PowerPill,
                PLAYER => {
                    if let Some(first) = player_spawn {
                        return Err(MazeError::DuplicatePlayer { first, second: here });
                    }
                    player_spawn = Some(here);
                    CellKind::Floor
                }
                marker if marker == options.chaser_marker => {
                    let kind = if options.chaser_enabled {
                        EnemyKind::Chaser
                    } else {
                        EnemyKind::Wanderer
                    };
                    enemy_spawns.push((kind, here));
                    CellKind::Floor
                }
                marker if marker == options.ghost_marker => {
                    enemy_spawns.push((EnemyKind::Wanderer, here));
                    CellKind::Floor
                }
                _ => CellKind::Floor,
            };
            cells.push(cell);
        }
        rows.push(cells);
    }

    let player_spawn = player_spawn.ok_or(MazeError::MissingPlayer)?;
    Ok(MazeLayout { grid: Grid::from_rows(&rows), player_spawn, enemy_spawns })
}

fn check_markers(options: &MazeOptions) -> Result<(), MazeError> {
    let reserved = [WALL, DOT, POWER_PILL, PLAYER];
    for marker in [options.ghost_marker, options.chaser_marker] {
        if reserved.contains(&marker) {
            return Err(MazeError::ConflictingMarker(marker));
        }
    }
    if options.ghost_marker == options.chaser_marker {
        return Err(MazeError::ConflictingMarker(options.chaser_marker));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cells_spawns_and_dot_count() {
        let layout = parse_maze("#####\n#P.X#\n#G C#\n#####", &MazeOptions::default())
            .expect("valid maze");

        assert_eq!(layout.player_spawn, Point::new(1, 1));
        assert_eq!(
            layout.enemy_spawns,
            vec![(EnemyKind::Wanderer, Point::new(2, 1)), (EnemyKind::Chaser, Point::new(2, 3))]
        );
        assert_eq!(layout.grid.cell_at(Point::new(1, 2)), CellKind::Dot);
        assert_eq!(layout.grid.cell_at(Point::new(1, 3)), CellKind::PowerPill);
        assert_eq!(layout.grid.cell_at(Point::new(1, 1)), CellKind::Floor);
        assert_eq!(layout.grid.count(CellKind::Dot), 1);
    }

    #[test]
    fn disabled_chaser_spawns_a_wanderer() {
        let options = MazeOptions { chaser_enabled: false, ..MazeOptions::default() };
        let layout = parse_maze("PC", &options).expect("valid maze");
        assert_eq!(layout.enemy_spawns, vec![(EnemyKind::Wanderer, Point::new(0, 1))]);
    }

    #[test]
    fn custom_markers_are_honoured() {
        let options = MazeOptions { ghost_marker: 'g', chaser_marker: 'c', chaser_enabled: true };
        let layout = parse_maze("PgcG", &options).expect("valid maze");
        assert_eq!(
            layout.enemy_spawns,
            vec![(EnemyKind::Wanderer, Point::new(0, 1)), (EnemyKind::Chaser, Point::new(0, 2))]
        );
        assert_eq!(layout.grid.cell_at(Point::new(0, 3)), CellKind::Floor);
    }

    #[test]
    fn rejects_mazes_without_exactly_one_player() {
        let options = MazeOptions::default();
        assert!(matches!(parse_maze("", &options), Err(MazeError::Empty)));
        assert!(matches!(parse_maze("#..#", &options), Err(MazeError::MissingPlayer)));
        assert!(matches!(
            parse_maze("P\n.P", &options),
            Err(MazeError::DuplicatePlayer { first, second })
                if first == Point::new(0, 0) && second == Point::new(1, 1)
        ));
    }

    #[test]
    fn rejects_markers_that_shadow_maze_symbols() {
        let options = MazeOptions { ghost_marker: '.', ..MazeOptions::default() };
        assert!(matches!(parse_maze("P", &options), Err(MazeError::ConflictingMarker('.'))));
        let options = MazeOptions { ghost_marker: 'C', ..MazeOptions::default() };
        assert!(matches!(parse_maze("P", &options), Err(MazeError::ConflictingMarker('C'))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("maze.txt");
        fs::write(&path, "#####\n#P..#\n#####\n").expect("write maze");

        let layout = load_maze(&path, &MazeOptions::default()).expect("load maze");
        assert_eq!(layout.grid.width(), 5);
        assert_eq!(layout.grid.height(), 3);
        assert_eq!(layout.grid.count(CellKind::Dot), 2);

        let missing = load_maze(&dir.path().join("nope.txt"), &MazeOptions::default());
        assert!(matches!(missing, Err(MazeError::Io(_))));
    }
}
