//! Shared test fixtures for the `game` submodule test suites.
//! It does not own production gameplay logic.

use super::*;
use crate::maze::{MazeOptions, parse_maze};

/// A walled border around an open floor interior, so nothing wraps.
pub(super) fn open_room_fixture(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            let edge =
                row == 0 || col == 0 || row == height as i32 - 1 || col == width as i32 - 1;
            if edge {
                grid.set_cell(Point::new(row, col), CellKind::Wall);
            }
        }
    }
    grid
}

/// One wall on the straight line between origin and target.
pub(super) fn wall_between_fixture() -> (Grid, Point, Point) {
    let mut grid = open_room_fixture(7, 5);
    grid.set_cell(Point::new(2, 3), CellKind::Wall);
    (grid, Point::new(2, 1), Point::new(2, 5))
}

pub(super) fn quick_settings() -> GameSettings {
    GameSettings { lives: 3, power_duration: Duration::from_secs(30), workers: 2, seed: 7 }
}

pub(super) fn game_from_rows(rows: &[&str], settings: &GameSettings) -> Game {
    let layout = parse_maze(&rows.join("\n"), &MazeOptions::default()).expect("fixture maze");
    Game::new(layout, settings).expect("fixture game")
}

pub(super) fn enemy_ids(game: &Game) -> Vec<EntityId> {
    game.state.enemy_ids()
}

/// Teleports an entity, bypassing movement rules.
pub(super) fn place(game: &mut Game, id: EntityId, pos: Point) {
    match &mut game.state.entities[id] {
        Entity::Player(player) => player.pos = pos,
        Entity::Wanderer(wanderer) => wanderer.pos = pos,
        Entity::Chaser(chaser) => chaser.pos = pos,
    }
}
