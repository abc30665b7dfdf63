//! Narrator that repeats the world's own descriptions.

use adventure_rules::{Action, Command, CommandError, GameState, ObjectRef, StateChange, World};

use super::Narrator;

/// Uses each object's current description verbatim.
///
/// Stands in for the generated narration when no model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNarrator;

impl PlainNarrator {
    pub fn new() -> Self {
        Self
    }

    fn describe(world: &World, id: ObjectRef) -> String {
        world
            .object(id)
            .map(|object| object.description().to_string())
            .unwrap_or_default()
    }

    /// Description of the current location with its contents and exits.
    pub fn describe_here(world: &World) -> String {
        let here = world.here();
        let mut text = here.object.description().to_string();

        let items: Vec<_> = here
            .items()
            .iter()
            .map(|id| world.name_of((*id).into()))
            .collect();
        if !items.is_empty() {
            text.push_str(&format!("\nYou see: {}.", items.join(", ")));
        }

        let exits: Vec<_> = here
            .exits()
            .iter()
            .map(|id| world.name_of((*id).into()))
            .collect();
        if !exits.is_empty() {
            text.push_str(&format!("\nExits: {}.", exits.join(", ")));
        }
        text
    }
}

/// Capitalise and terminate a short message.
fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

impl Narrator for PlainNarrator {
    fn narrate(&mut self, world: &World, command: Command, change: Option<StateChange>) -> String {
        let name = world.name_of(command.target);
        let mut text = match command.action {
            Action::Move => Self::describe_here(world),
            Action::Take => format!("Taken: {name}."),
            Action::Drop => format!("Dropped: {name}."),
            Action::Examine if command.target == ObjectRef::Location(world.current_location()) => {
                Self::describe_here(world)
            }
            Action::Examine => Self::describe(world, command.target),
            Action::Use if change.is_none() => "Nothing happens.".to_string(),
            Action::Use => String::new(),
        };

        // Show the result of a rule unless it is already in the text above.
        if let Some(change) = change {
            let shown = matches!(command.action, Action::Move | Action::Examine)
                && change.target == command.target;
            if !shown {
                let description = Self::describe(world, change.target);
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&description);
            }
        }
        text
    }

    fn refuse(&mut self, _world: &World, _command: Command, error: CommandError) -> String {
        sentence(&error.to_string())
    }

    fn not_understood(&mut self, _world: &World, _input: &str) -> String {
        "I don't understand that.".to_string()
    }

    fn ending(&mut self, world: &World, state: GameState) -> String {
        let heading = match state {
            GameState::Victory => "*** You have won ***",
            GameState::Dead => "*** You have lost ***",
            GameState::Continue => return String::new(),
        };
        match world.end_game() {
            Some(reason) => format!("{reason}\n{heading}"),
            None => heading.to_string(),
        }
    }
}
