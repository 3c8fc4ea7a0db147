//! Crossterm renderer: maze cells, sprites on top, HUD line underneath.

use std::io::{self, Write};

use chase_core::{CellKind, FrameSink, Glyph, Grid, Outcome, Point, Snapshot};
use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::config::GameConfig;

const WALL_BACKGROUND: Color = Color::Blue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<'a> {
    pub text: &'a str,
    pub wall: bool,
}

/// Lays sprites over the maze in snapshot order, so enemies cover the player.
/// A lost game shows the death glyph where the player fell.
pub fn compose<'a>(config: &'a GameConfig, grid: &Grid, snapshot: &Snapshot) -> Vec<Vec<Cell<'a>>> {
    let mut rows: Vec<Vec<Cell<'a>>> = grid
        .rows()
        .map(|cells| {
            cells
                .iter()
                .map(|&kind| Cell { text: config.cell_text(kind), wall: kind == CellKind::Wall })
                .collect()
        })
        .collect();

    for sprite in &snapshot.sprites {
        if let Some(cell) = cell_mut(&mut rows, sprite.pos) {
            cell.text = config.sprite_text(sprite.glyph);
        }
    }
    if snapshot.outcome == Some(Outcome::Loss)
        && let Some(player) = snapshot.sprites.iter().find(|sprite| sprite.glyph == Glyph::Player)
        && let Some(cell) = cell_mut(&mut rows, player.pos)
    {
        cell.text = config.death.as_str();
    }
    rows
}

fn cell_mut<'r, 'a>(rows: &'r mut [Vec<Cell<'a>>], pos: Point) -> Option<&'r mut Cell<'a>> {
    let row = usize::try_from(pos.row).ok()?;
    let col = usize::try_from(pos.col).ok()?;
    rows.get_mut(row)?.get_mut(col)
}

/// Right-pads `text` with spaces up to `width` terminal columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut padded = text.to_owned();
    if used < width {
        padded.push_str(&" ".repeat(width - used));
    }
    padded
}

pub fn hud_line(config: &GameConfig, snapshot: &Snapshot) -> String {
    let lives = if config.use_emoji {
        config.player.repeat(snapshot.lives as usize)
    } else {
        snapshot.lives.to_string()
    };
    format!("Score: {}    Lives: {lives}", snapshot.score)
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    config: GameConfig,
    cleared: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: GameConfig) -> Self {
        Self { out, config, cleared: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    type Error = io::Error;

    fn present(&mut self, grid: &Grid, snapshot: &Snapshot) -> io::Result<()> {
        if !self.cleared {
            self.out.queue(Clear(ClearType::All))?;
            self.cleared = true;
        }

        let width = self.config.cell_width();
        for (row, cells) in compose(&self.config, grid, snapshot).iter().enumerate() {
            self.out.queue(MoveTo(0, row as u16))?;
            for cell in cells {
                if cell.wall {
                    self.out.queue(SetBackgroundColor(WALL_BACKGROUND))?;
                }
                self.out.queue(Print(pad_to_width(cell.text, width)))?;
                if cell.wall {
                    self.out.queue(ResetColor)?;
                }
            }
        }

        // One blank row between the maze and the HUD.
        self.out.queue(MoveTo(0, grid.height() as u16 + 1))?;
        self.out.queue(Print(hud_line(&self.config, snapshot)))?;
        self.out.queue(Clear(ClearType::UntilNewLine))?;
        self.out.flush()
    }
}
