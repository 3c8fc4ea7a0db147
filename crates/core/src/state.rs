use slotmap::SlotMap;

use crate::entity::{Entity, Player};
use crate::types::*;

/// The maze as a mutable 2D array of cell kinds. Only collectibles ever change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// An all-floor grid. Zero dimensions are clamped to one so wrap-around stays defined.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self { width, height, cells: vec![CellKind::Floor; width * height] }
    }

    /// Builds a grid from ragged rows, padding short rows with floor.
    pub fn from_rows(rows: &[Vec<CellKind>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len());
        for (row, cells) in rows.iter().enumerate() {
            for (col, &kind) in cells.iter().enumerate() {
                grid.set_cell(Point::new(row as i32, col as i32), kind);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    pub fn cell_at(&self, pos: Point) -> CellKind {
        if !self.in_bounds(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Point, kind: CellKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    pub fn is_walkable(&self, pos: Point) -> bool {
        self.cell_at(pos) != CellKind::Wall
    }

    /// Clears a dot or power pill at `pos` and reports what was there.
    pub fn take_collectible(&mut self, pos: Point) -> Option<CellKind> {
        let kind = self.cell_at(pos);
        if !kind.is_collectible() {
            return None;
        }
        self.set_cell(pos, CellKind::Empty);
        Some(kind)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }

    fn index(&self, pos: Point) -> usize {
        (pos.row as usize) * self.width + (pos.col as usize)
    }
}

/// Aggregate simulation state owned by the `Game`.
pub struct GameState {
    pub grid: Grid,
    pub entities: SlotMap<EntityId, Entity>,
    pub dots_remaining: usize,
    pub outcome: Option<Outcome>,
    player_id: EntityId,
}

impl GameState {
    pub fn new(grid: Grid, player: Player) -> Self {
        let dots_remaining = grid.count(CellKind::Dot);
        let mut entities = SlotMap::with_key();
        let player_id = entities.insert(Entity::Player(player));
        Self { grid, entities, dots_remaining, outcome: None, player_id }
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player(&self) -> &Player {
        match &self.entities[self.player_id] {
            Entity::Player(player) => player,
            _ => unreachable!("player id always names the player entity"),
        }
    }

    pub fn player_mut(&mut self) -> &mut Player {
        match &mut self.entities[self.player_id] {
            Entity::Player(player) => player,
            _ => unreachable!("player id always names the player entity"),
        }
    }

    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.entities.keys().filter(|&id| id != self.player_id).collect()
    }
}
