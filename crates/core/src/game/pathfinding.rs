//! A* search over the maze, used by the chaser to plan a route to the player.
//! Every move costs 1 and only the four cardinal moves are allowed.
//! A `PathFinder` is built per search and thrown away afterwards.

use std::collections::{BTreeMap, BTreeSet};

use super::geometry::manhattan;
use crate::state::Grid;
use crate::types::{Direction, Point};

/// Open-set ordering key: lowest f first, then the node seen first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    seq: u64,
    point: Point,
}

#[derive(Clone, Copy, Debug)]
struct NodeInfo {
    g: u32,
    h: u32,
    seq: u64,
    parent: Option<Point>,
}

impl NodeInfo {
    fn cost(&self) -> u32 {
        self.g + self.h
    }
}

pub struct PathFinder<'a> {
    grid: &'a Grid,
    open: BTreeSet<OpenNode>,
    closed: BTreeSet<Point>,
    table: BTreeMap<Point, NodeInfo>,
    next_seq: u64,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            open: BTreeSet::new(),
            closed: BTreeSet::new(),
            table: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Cells to step through from `origin` (excluded) to `target` (included).
    /// Empty when already at the target or when it cannot be reached.
    ///
    /// The heuristic ignores wrap-around, so on mazes with open tunnels the route
    /// is a good one rather than a guaranteed shortest one.
    pub fn walk(mut self, origin: Point, target: Point) -> Vec<Point> {
        if origin == target {
            return Vec::new();
        }
        let grid = self.grid;
        self.push_open(origin, 0, manhattan(origin, target), None);

        while let Some(node) = self.open.pop_first() {
            let current = node.point;
            let current_g = self.table.get(&current).map_or(0, |info| info.g);

            for next in grid.walkable_neighbors(current) {
                if next == target {
                    let mut path = self.trace_back(current);
                    path.push(target);
                    return path;
                }
                self.visit(next, current_g + 1, current, target);
            }

            self.closed.insert(current);
        }

        Vec::new()
    }

    /// Offers `next` at cost `g` via `from`. Closed nodes are never reopened and
    /// a frontier node only changes on a strictly cheaper route.
    fn visit(&mut self, next: Point, g: u32, from: Point, target: Point) {
        if self.closed.contains(&next) {
            return;
        }
        match self.table.get(&next).copied() {
            Some(info) if g < info.g => self.relax(next, info, g, from),
            Some(_) => {}
            None => self.push_open(next, g, manhattan(next, target), Some(from)),
        }
    }

    fn push_open(&mut self, point: Point, g: u32, h: u32, parent: Option<Point>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let info = NodeInfo { g, h, seq, parent };
        self.table.insert(point, info);
        self.open.insert(OpenNode { f: info.cost(), seq, point });
    }

    /// Cheaper route to a node already on the frontier; it keeps its original tie-break slot.
    fn relax(&mut self, point: Point, old: NodeInfo, g: u32, parent: Point) {
        self.open.remove(&OpenNode { f: old.cost(), seq: old.seq, point });
        let info = NodeInfo { g, parent: Some(parent), ..old };
        self.table.insert(point, info);
        self.open.insert(OpenNode { f: info.cost(), seq: info.seq, point });
    }

    fn trace_back(&self, from: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cursor = from;
        while let Some(parent) = self.table.get(&cursor).and_then(|info| info.parent) {
            path.push(cursor);
            cursor = parent;
        }
        path.reverse();
        path
    }
}

/// Plans a route from `origin` to `target` as a sequence of moves.
/// Empty when already there or when no route exists.
pub fn find_path(grid: &Grid, origin: Point, target: Point) -> Vec<Direction> {
    if origin == target || !grid.is_walkable(origin) || !grid.is_walkable(target) {
        return Vec::new();
    }
    let points = PathFinder::new(grid).walk(origin, target);
    to_directions(grid, origin, &points)
}

fn to_directions(grid: &Grid, origin: Point, points: &[Point]) -> Vec<Direction> {
    let mut directions = Vec::with_capacity(points.len());
    let mut current = origin;
    for &next in points {
        let Some(direction) = grid.direction_between(current, next) else {
            break;
        };
        directions.push(direction);
        current = next;
    }
    directions
}
