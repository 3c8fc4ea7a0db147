//! Game configuration file: glyphs, pacing and rules.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use chase_core::{CellKind, GameSettings, Glyph, MazeOptions};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FRAME_RATE: u32 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub player: String,
    pub ghost: String,
    pub ghost_blue: String,
    pub chaser: String,
    pub wall: String,
    pub dot: String,
    pub pill: String,
    pub death: String,
    pub space: String,
    /// Emoji glyphs are two terminal columns wide, so every cell is drawn two wide.
    pub use_emoji: bool,
    /// Frames per second; 0 falls back to the default.
    pub frame_rate: u32,
    pub pill_duration_secs: u64,
    pub lives: u32,
    pub chaser_enabled: bool,
    pub ghost_marker: char,
    pub chaser_marker: char,
    /// Move worker pool size; 0 sizes it from the available parallelism.
    pub workers: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: "P".to_owned(),
            ghost: "G".to_owned(),
            ghost_blue: "g".to_owned(),
            chaser: "C".to_owned(),
            wall: "#".to_owned(),
            dot: ".".to_owned(),
            pill: "X".to_owned(),
            death: "*".to_owned(),
            space: " ".to_owned(),
            use_emoji: false,
            frame_rate: DEFAULT_FRAME_RATE,
            pill_duration_secs: 10,
            lives: 3,
            chaser_enabled: true,
            ghost_marker: 'G',
            chaser_marker: 'C',
            workers: 0,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn frame_period(&self) -> Duration {
        let rate = if self.frame_rate == 0 { DEFAULT_FRAME_RATE } else { self.frame_rate };
        Duration::from_secs(1) / rate
    }

    pub fn cell_width(&self) -> usize {
        if self.use_emoji { 2 } else { 1 }
    }

    pub fn settings(&self, seed: u64) -> GameSettings {
        GameSettings {
            lives: self.lives,
            power_duration: Duration::from_secs(self.pill_duration_secs),
            workers: self.workers,
            seed,
        }
    }

    pub fn maze_options(&self) -> MazeOptions {
        MazeOptions {
            ghost_marker: self.ghost_marker,
            chaser_marker: self.chaser_marker,
            chaser_enabled: self.chaser_enabled,
        }
    }

    pub fn cell_text(&self, kind: CellKind) -> &str {
        match kind {
            CellKind::Wall => &self.wall,
            CellKind::Dot => &self.dot,
            CellKind::PowerPill => &self.pill,
            CellKind::Floor | CellKind::Empty => &self.space,
        }
    }

    pub fn sprite_text(&self, glyph: Glyph) -> &str {
        match glyph {
            Glyph::Player => &self.player,
            Glyph::Ghost => &self.ghost,
            Glyph::Chaser => &self.chaser,
            Glyph::Frightened => &self.ghost_blue,
        }
    }
}
