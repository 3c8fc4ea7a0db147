//! Tick scheduling for the game engine.
//! This file wires the per-tick phases together.

use super::*;

mod advance;
mod collisions;
