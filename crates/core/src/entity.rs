//! The moving actors of the maze and their per-tick move policies.
//!
//! Each variant owns only its own state. Anything that reaches across entities
//! (a kill, a frighten, a relocation after a collision) is applied by the engine
//! once every move of the tick has finished.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::game::pathfinding::find_path;
use crate::state::Grid;
use crate::types::*;

/// Read-only view every mover gets for one tick.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    pub grid: &'a Grid,
    /// Where the player stood when the tick began.
    pub player_pos: Point,
    pub command: Command,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub spawn: Point,
    pub lives: u32,
    pub score: u32,
}

impl Player {
    pub const DOT_POINTS: u32 = 1;
    pub const PILL_POINTS: u32 = 10;

    pub fn new(spawn: Point, lives: u32) -> Self {
        Self { pos: spawn, spawn, lives, score: 0 }
    }

    fn step(&mut self, ctx: &MoveContext<'_>) -> Point {
        self.pos = ctx.grid.neighbor(self.pos, ctx.command.direction());
        self.pos
    }

    /// Scores whatever collectible was taken from the cell the player landed on.
    pub fn eat(&mut self, cell: CellKind) {
        match cell {
            CellKind::Dot => self.score += Self::DOT_POINTS,
            CellKind::PowerPill => self.score += Self::PILL_POINTS,
            _ => {}
        }
    }

    /// Returns the lives left; with lives remaining the player goes back to spawn.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.pos = self.spawn;
        }
        self.lives
    }
}

#[derive(Clone, Debug)]
pub struct Wanderer {
    pub pos: Point,
    pub spawn: Point,
    rng: ChaCha8Rng,
}

impl Wanderer {
    pub fn new(spawn: Point, seed: u64) -> Self {
        Self { pos: spawn, spawn, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    fn step(&mut self, ctx: &MoveContext<'_>) -> Point {
        let direction = Direction::CARDINAL[(self.rng.next_u64() % 4) as usize];
        self.pos = ctx.grid.neighbor(self.pos, direction);
        self.pos
    }
}

/// Follows a cached A* plan and only replans once the plan runs out, so it
/// chases where the player *was*, in a staircase pattern, rather than
/// re-targeting every tick.
#[derive(Clone, Debug)]
pub struct Chaser {
    pub pos: Point,
    pub spawn: Point,
    plan: VecDeque<Direction>,
}

impl Chaser {
    pub fn new(spawn: Point) -> Self {
        Self { pos: spawn, spawn, plan: VecDeque::new() }
    }

    pub fn plan(&self) -> &VecDeque<Direction> {
        &self.plan
    }

    pub fn clear_plan(&mut self) {
        self.plan.clear();
    }

    fn step(&mut self, ctx: &MoveContext<'_>) -> Point {
        if self.plan.is_empty() {
            self.plan = find_path(ctx.grid, self.pos, ctx.player_pos).into();
            if self.plan.is_empty() && self.pos != ctx.player_pos {
                tracing::warn!(
                    from = ?self.pos,
                    to = ?ctx.player_pos,
                    "chaser found no route to the player; maze may be disconnected"
                );
            }
        }
        let direction = self.plan.pop_front().unwrap_or(Direction::Stay);
        self.pos = ctx.grid.neighbor(self.pos, direction);
        self.pos
    }
}

#[derive(Clone, Debug)]
pub enum Entity {
    Player(Player),
    Wanderer(Wanderer),
    Chaser(Chaser),
}

impl Entity {
    pub fn pos(&self) -> Point {
        match self {
            Entity::Player(player) => player.pos,
            Entity::Wanderer(wanderer) => wanderer.pos,
            Entity::Chaser(chaser) => chaser.pos,
        }
    }

    /// Advances this entity by one tick and returns where it ended up.
    pub fn step(&mut self, ctx: &MoveContext<'_>) -> Point {
        match self {
            Entity::Player(player) => player.step(ctx),
            Entity::Wanderer(wanderer) => wanderer.step(ctx),
            Entity::Chaser(chaser) => chaser.step(ctx),
        }
    }

    /// Sends an enemy back to its spawn; a chaser also forgets its plan.
    pub fn respawn(&mut self) {
        match self {
            Entity::Player(player) => player.pos = player.spawn,
            Entity::Wanderer(wanderer) => wanderer.pos = wanderer.spawn,
            Entity::Chaser(chaser) => {
                chaser.pos = chaser.spawn;
                chaser.plan.clear();
            }
        }
    }

    pub fn glyph(&self, mode: Mode) -> Glyph {
        match (self, mode) {
            (Entity::Player(_), _) => Glyph::Player,
            (_, Mode::Frightened) => Glyph::Frightened,
            (Entity::Wanderer(_), Mode::Normal) => Glyph::Ghost,
            (Entity::Chaser(_), Mode::Normal) => Glyph::Chaser,
        }
    }
}
