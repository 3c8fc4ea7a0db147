pub mod config;
pub mod input;
pub mod screen;
pub mod seed;
pub mod terminal;

use chase_core::Outcome;

pub const APP_NAME: &str = "chase";

pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "You cleared the maze!",
        Outcome::Loss => "Game over.",
    }
}
