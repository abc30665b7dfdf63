//! Seams for the external collaborators that drive and describe the game.
//!
//! The language-model parser and narrator live outside this workspace and
//! plug in through these traits. Both only read the world; every change goes
//! through [`adventure_rules::World::perform`].

mod narrator;
mod parser;

pub use narrator::*;
pub use parser::*;

use adventure_rules::{Command, CommandError, GameState, StateChange, World};

/// Maps free text to an action and a resolved object.
pub trait CommandParser {
    /// Returns `None` when the input does not name a known action and object.
    fn parse(&mut self, world: &World, input: &str) -> Option<Command>;
}

/// Turns the outcome of a command into text for the player.
pub trait Narrator {
    /// Describe an accepted command and whatever state change it caused.
    fn narrate(&mut self, world: &World, command: Command, change: Option<StateChange>) -> String;

    /// Describe why a command was refused.
    fn refuse(&mut self, world: &World, command: Command, error: CommandError) -> String;

    /// Respond to input the parser could not make sense of.
    fn not_understood(&mut self, world: &World, input: &str) -> String;

    /// Announce the ending the game has reached.
    fn ending(&mut self, world: &World, state: GameState) -> String;
}
