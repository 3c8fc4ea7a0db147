//! Enemy modes and the power-pill countdown that reverts them.
//!
//! Modes live behind a reader/writer lock because a background countdown thread
//! can flip them back to `Normal` while the collision pass is reading them.
//! Lock order is always countdown, then modes.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::types::{EntityId, Mode};

/// Upper bound for a frightened countdown; longer requests are clamped to it.
const LONGEST_COUNTDOWN: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Default)]
struct Countdown {
    deadline: Option<Instant>,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct Shared {
    modes: RwLock<BTreeMap<EntityId, Mode>>,
    countdown: Mutex<Countdown>,
    wake: Condvar,
}

impl Shared {
    fn lock_countdown(&self) -> MutexGuard<'_, Countdown> {
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_all(&self, mode: Mode) {
        let mut modes = self.modes.write().unwrap_or_else(PoisonError::into_inner);
        modes.values_mut().for_each(|current| *current = mode);
    }

    fn run_countdown(&self) {
        let mut countdown = self.lock_countdown();
        loop {
            if countdown.shutdown {
                return;
            }
            let Some(deadline) = countdown.deadline else {
                countdown = self.wake.wait(countdown).unwrap_or_else(PoisonError::into_inner);
                continue;
            };
            let now = Instant::now();
            if now >= deadline {
                countdown.deadline = None;
                self.set_all(Mode::Normal);
                tracing::debug!("power pill wore off; enemies back to normal");
                continue;
            }
            countdown = self
                .wake
                .wait_timeout(countdown, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|poisoned| poisoned.into_inner().0);
        }
    }
}

fn countdown_deadline(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration.min(LONGEST_COUNTDOWN)).unwrap_or(now)
}

/// Per-enemy modes plus the single shared frightened countdown.
pub struct ModeBoard {
    shared: Arc<Shared>,
    timer: Option<JoinHandle<()>>,
}

impl ModeBoard {
    pub fn new(enemies: impl IntoIterator<Item = EntityId>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            modes: RwLock::new(enemies.into_iter().map(|id| (id, Mode::Normal)).collect()),
            ..Shared::default()
        });
        let worker = Arc::clone(&shared);
        let timer = thread::Builder::new()
            .name("power-countdown".to_string())
            .spawn(move || worker.run_countdown())?;
        Ok(Self { shared, timer: Some(timer) })
    }

    pub fn mode(&self, enemy: EntityId) -> Mode {
        let modes = self.shared.modes.read().unwrap_or_else(PoisonError::into_inner);
        modes.get(&enemy).copied().unwrap_or_default()
    }

    /// Frightens every enemy and (re)starts the countdown. A running countdown
    /// is replaced, never doubled up.
    pub fn frighten_all(&self, duration: Duration) {
        let mut countdown = self.shared.lock_countdown();
        self.shared.set_all(Mode::Frightened);
        countdown.deadline = Some(countdown_deadline(Instant::now(), duration));
        drop(countdown);
        self.shared.wake.notify_all();
    }

    /// Atomically reads an enemy's mode at the moment it touches the player.
    /// A frightened enemy is reverted to `Normal` in the same step.
    pub fn resolve_contact(&self, enemy: EntityId) -> Mode {
        let mut modes = self.shared.modes.write().unwrap_or_else(PoisonError::into_inner);
        let Some(mode) = modes.get_mut(&enemy) else {
            return Mode::Normal;
        };
        let before = *mode;
        *mode = Mode::Normal;
        before
    }

    pub fn is_countdown_running(&self) -> bool {
        self.shared.lock_countdown().deadline.is_some()
    }

    /// Stops any running countdown. Modes are left as they are.
    pub fn cancel(&self) {
        self.shared.lock_countdown().deadline = None;
        self.shared.wake.notify_all();
    }
}

impl Drop for ModeBoard {
    fn drop(&mut self) {
        self.shared.lock_countdown().shutdown = true;
        self.shared.wake.notify_all();
        if let Some(timer) = self.timer.take()
            && timer.join().is_err()
        {
            tracing::error!("power countdown thread panicked");
        }
    }
}
