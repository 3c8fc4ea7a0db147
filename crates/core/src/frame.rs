//! Fixed-rate frame loop: poll one command, tick, present, sleep to the next
//! frame boundary.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use crate::game::Game;
use crate::state::Grid;
use crate::types::{Command, Outcome, Snapshot, TickStatus};

pub trait InputSource {
    /// The command for this frame, `Idle` when nothing is pending. Never blocks.
    fn poll(&mut self) -> Command;
}

/// Drains everything queued since the last frame. The newest command wins,
/// except that an `Exit` anywhere in the queue is never dropped.
impl InputSource for Receiver<Command> {
    fn poll(&mut self) -> Command {
        let mut latest = Command::Idle;
        for command in self.try_iter() {
            if command == Command::Exit {
                return Command::Exit;
            }
            latest = command;
        }
        latest
    }
}

/// Scripted input: one command per frame, `Idle` once the script runs out.
impl InputSource for VecDeque<Command> {
    fn poll(&mut self) -> Command {
        self.pop_front().unwrap_or_default()
    }
}

pub trait FrameSink {
    type Error;

    fn present(&mut self, grid: &Grid, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// Runs the game to completion. The initial state is presented once before the
/// first tick, then once after every tick.
pub fn run<I, S>(
    game: &mut Game,
    input: &mut I,
    sink: &mut S,
    frame_period: Duration,
) -> Result<Outcome, S::Error>
where
    I: InputSource + ?Sized,
    S: FrameSink + ?Sized,
{
    sink.present(game.grid(), &game.snapshot())?;
    let mut next_frame = Instant::now();
    loop {
        let command = input.poll();
        let result = game.tick(command);
        sink.present(game.grid(), &game.snapshot())?;
        if let TickStatus::GameOver(outcome) = result.status {
            return Ok(outcome);
        }

        next_frame += frame_period;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks.
            next_frame = now;
        }
    }
}
