use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::entity::{Chaser, Entity, Player, Wanderer};
use crate::maze::MazeLayout;
use crate::state::{GameState, Grid};
use crate::types::*;

mod engine;
pub mod geometry;
mod hash;
pub mod pathfinding;
pub mod status;

#[cfg(test)]
mod test_support;

pub use hash::format_snapshot_hash;
use status::ModeBoard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub lives: u32,
    pub power_duration: Duration,
    /// Size of the move worker pool; 0 picks one from the available parallelism.
    pub workers: usize,
    pub seed: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { lives: 3, power_duration: Duration::from_secs(10), workers: 0, seed: 0 }
    }
}

pub struct Game {
    seed: u64,
    tick: u64,
    state: GameState,
    modes: ModeBoard,
    power_duration: Duration,
    pool: ThreadPool,
    log: Vec<GameEvent>,
}

impl Game {
    pub fn new(layout: MazeLayout, settings: &GameSettings) -> Result<Self, GameError> {
        let MazeLayout { grid, player_spawn, enemy_spawns } = layout;
        let mut state = GameState::new(grid, Player::new(player_spawn, settings.lives));
        for (index, (kind, spawn)) in enemy_spawns.into_iter().enumerate() {
            let enemy = match kind {
                EnemyKind::Wanderer => {
                    Entity::Wanderer(Wanderer::new(spawn, enemy_seed(settings.seed, index)))
                }
                EnemyKind::Chaser => Entity::Chaser(Chaser::new(spawn)),
            };
            state.entities.insert(enemy);
        }

        let modes = ModeBoard::new(state.enemy_ids())
            .map_err(|err| GameError::TimerThread(err.to_string()))?;
        let workers = worker_count(settings.workers, state.entities.len());
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("mover-{index}"))
            .build()
            .map_err(|err| GameError::WorkerPool(err.to_string()))?;

        tracing::info!(
            workers,
            enemies = state.entities.len() - 1,
            dots = state.dots_remaining,
            "game ready"
        );

        Ok(Self {
            seed: settings.seed,
            tick: 0,
            state,
            modes,
            power_duration: settings.power_duration,
            pool,
            log: Vec::new(),
        })
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn mode(&self, enemy: EntityId) -> Mode {
        self.modes.mode(enemy)
    }

    pub fn is_power_active(&self) -> bool {
        self.modes.is_countdown_running()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }

    /// Sprites in entity order (player first), plus the scoreboard.
    pub fn snapshot(&self) -> Snapshot {
        let sprites = self
            .state
            .entities
            .iter()
            .map(|(id, entity)| Sprite {
                glyph: entity.glyph(self.modes.mode(id)),
                pos: entity.pos(),
            })
            .collect();
        let player = self.state.player();
        Snapshot {
            tick: self.tick,
            sprites,
            score: player.score,
            lives: player.lives,
            dots_remaining: self.state.dots_remaining,
            outcome: self.state.outcome,
        }
    }
}

fn enemy_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn worker_count(requested: usize, entities: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism().map_or(1, NonZeroUsize::get).min(entities).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_respects_explicit_request() {
        assert_eq!(worker_count(3, 10), 3);
    }

    #[test]
    fn automatic_worker_count_never_exceeds_entities() {
        let workers = worker_count(0, 2);
        assert!((1..=2).contains(&workers));
        assert_eq!(worker_count(0, 0), 1);
    }

    #[test]
    fn enemies_get_distinct_seeds() {
        assert_ne!(enemy_seed(42, 0), enemy_seed(42, 1));
        assert_eq!(enemy_seed(42, 3), enemy_seed(42, 3));
    }
}
