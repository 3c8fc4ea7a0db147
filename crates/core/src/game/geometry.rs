//! Cardinal movement over the grid. Edges wrap; walls turn a move into a bump.

use crate::state::Grid;
use crate::types::{Direction, Point};

impl Grid {
    pub fn wrap(&self, pos: Point) -> Point {
        Point {
            row: pos.row.rem_euclid(self.height() as i32),
            col: pos.col.rem_euclid(self.width() as i32),
        }
    }

    /// The cell one step from `pos`, or `pos` itself when that cell is a wall.
    pub fn neighbor(&self, pos: Point, direction: Direction) -> Point {
        if direction == Direction::Stay {
            return pos;
        }
        let candidate = self.wrap(pos.offset(direction));
        if self.is_walkable(candidate) { candidate } else { pos }
    }

    /// Distinct cells reachable in one step, in Up, Down, Left, Right order.
    pub fn walkable_neighbors(&self, pos: Point) -> impl Iterator<Item = Point> + '_ {
        Direction::CARDINAL
            .into_iter()
            .map(move |direction| self.neighbor(pos, direction))
            .filter(move |next| *next != pos)
    }

    /// The cardinal direction that carries `from` onto `to`, wrap-around included.
    pub fn direction_between(&self, from: Point, to: Point) -> Option<Direction> {
        Direction::CARDINAL.into_iter().find(|&direction| self.wrap(from.offset(direction)) == to)
    }
}

/// Grid distance ignoring wrap-around.
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
