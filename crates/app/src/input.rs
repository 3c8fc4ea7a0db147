//! Keyboard reader thread. Key presses become `Command`s on a channel that the
//! frame loop drains without blocking.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chase_core::Command;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Exit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Command::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Command::Right),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Exit),
        _ => None,
    }
}

/// Owns the reader thread; dropping it stops and joins the thread.
pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn(commands: Sender<Command>) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("keyboard".to_owned())
            .spawn(move || read_keys(&flag, &commands))?;
        Ok(Self { stop, handle: Some(handle) })
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!("keyboard thread panicked");
        }
    }
}

fn read_keys(stop: &AtomicBool, commands: &Sender<Command>) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                tracing::warn!(%err, "keyboard poll failed; input disabled");
                return;
            }
        }
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(%err, "keyboard read failed; input disabled");
                return;
            }
        };
        if let Some(command) = command_for_key(&key)
            && commands.send(command).is_err()
        {
            return;
        }
    }
}
