//! One simulation tick: fan out every move, then apply pickups, collisions and
//! termination on the calling thread.

use rayon::prelude::*;

use super::*;
use crate::entity::MoveContext;

impl Game {
    /// Runs one tick with this tick's player command. Once the game is over,
    /// further ticks change nothing and keep reporting the outcome.
    pub fn tick(&mut self, command: Command) -> TickResult {
        if let Some(outcome) = self.state.outcome {
            return TickResult {
                tick: self.tick,
                status: TickStatus::GameOver(outcome),
                events: Vec::new(),
            };
        }

        let mut events = Vec::new();
        if command == Command::Exit {
            self.state.player_mut().lives = 0;
            events.push(GameEvent::Forfeited);
            tracing::info!(tick = self.tick, "player forfeited");
        } else {
            self.move_entities(command);
            self.collect_pickup(&mut events);
            self.resolve_collisions(&mut events);
        }

        self.tick += 1;
        let status = self.check_termination(&mut events);
        self.log.extend(events.iter().cloned());
        TickResult { tick: self.tick, status, events }
    }

    /// Every entity moves in parallel against the same read-only grid; the
    /// pool join is the barrier before anything else looks at positions.
    fn move_entities(&mut self, command: Command) {
        let player_pos = self.state.player().pos;
        let ctx = MoveContext { grid: &self.state.grid, player_pos, command };
        let mut movers: Vec<&mut Entity> = self.state.entities.values_mut().collect();
        self.pool.install(|| {
            movers.par_iter_mut().for_each(|entity| {
                entity.step(&ctx);
            });
        });
    }

    /// Grid and dot-count mutations happen here, after the barrier, so
    /// concurrent moves never race on them.
    fn collect_pickup(&mut self, events: &mut Vec<GameEvent>) {
        let at = self.state.player().pos;
        let Some(cell) = self.state.grid.take_collectible(at) else {
            return;
        };
        self.state.player_mut().eat(cell);
        match cell {
            CellKind::Dot => {
                self.state.dots_remaining = self.state.dots_remaining.saturating_sub(1);
                events.push(GameEvent::DotEaten { at });
            }
            CellKind::PowerPill => {
                self.modes.frighten_all(self.power_duration);
                events.push(GameEvent::PowerPillEaten { at });
                tracing::info!(
                    tick = self.tick,
                    duration_ms = self.power_duration.as_millis() as u64,
                    "power pill eaten; enemies frightened"
                );
            }
            _ => {}
        }
    }

    fn check_termination(&mut self, events: &mut Vec<GameEvent>) -> TickStatus {
        let player = self.state.player();
        let outcome = if player.lives == 0 {
            Outcome::Loss
        } else if self.state.dots_remaining == 0 {
            Outcome::Win
        } else {
            return TickStatus::Running;
        };

        tracing::info!(tick = self.tick, score = player.score, ?outcome, "game over");
        self.state.outcome = Some(outcome);
        self.modes.cancel();
        events.push(GameEvent::GameOver { outcome });
        TickStatus::GameOver(outcome)
    }
}
