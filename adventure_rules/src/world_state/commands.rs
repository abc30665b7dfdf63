//! Built-in meaning of each player action.
//!
//! The parser hands over an action and a resolved object. Moving, taking
//! and dropping change the player's position or the inventory, but only
//! after the target's own transitions for that action have let it happen.

use serde::{Deserialize, Serialize};

use super::World;
use crate::entities::ObjectRef;
use crate::mechanics::{Action, StateChange, TransitionFailure};

/// A parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub action: Action,
    pub target: ObjectRef,
}

impl Command {
    pub fn new(action: Action, target: impl Into<ObjectRef>) -> Self {
        Self {
            action,
            target: target.into(),
        }
    }
}

/// Why a command was refused. Refusals never change any object state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("the game is over")]
    GameOver,
    #[error("you can't get there from here")]
    NotAnExit,
    #[error("that isn't here")]
    NotHere,
    #[error("that can't be picked up")]
    NotCollectible,
    #[error("you aren't carrying that")]
    NotHeld,
    #[error("you can't {0} that")]
    WrongKind(Action),
    #[error(transparent)]
    Blocked(#[from] TransitionFailure),
}

pub type CommandResult = Result<Option<StateChange>, CommandError>;

/// Which commands consume a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPolicy {
    /// Refused commands still cost a turn.
    #[default]
    EveryCommand,
    AcceptedOnly,
}

impl World {
    pub fn turn_policy(&self) -> TurnPolicy {
        self.turn_policy
    }

    pub fn set_turn_policy(&mut self, policy: TurnPolicy) {
        self.turn_policy = policy;
    }

    /// Carry out a command and advance the turn counter.
    ///
    /// Nothing is accepted once an ending has been reached.
    pub fn perform(&mut self, command: Command) -> CommandResult {
        if self.is_over() {
            return Err(CommandError::GameOver);
        }

        let result = self.dispatch(command);
        if result.is_ok() || self.turn_policy == TurnPolicy::EveryCommand {
            self.advance_turn();
        }

        tracing::debug!(
            action = %command.action,
            target = self.name_of(command.target),
            turn = self.turns,
            refused = result.is_err(),
            "command performed"
        );
        result
    }

    fn dispatch(&mut self, command: Command) -> CommandResult {
        let Command { action, target } = command;
        match (action, target) {
            (Action::Move, ObjectRef::Location(destination)) => {
                if !self.here().leads_to(destination) {
                    return Err(CommandError::NotAnExit);
                }
                let change = self.execute_transition(target, action)?;
                self.location = destination;
                Ok(change)
            }
            (Action::Take, ObjectRef::Item(item)) => {
                if !self.here().contains(item) {
                    return Err(CommandError::NotHere);
                }
                if !self.item(item).is_some_and(|item| item.collectible) {
                    return Err(CommandError::NotCollectible);
                }
                let change = self.execute_transition(target, action)?;
                let here = self.location.0;
                World::shift_item(&mut self.locations[here].items, &mut self.inventory, item);
                Ok(change)
            }
            (Action::Drop, ObjectRef::Item(item)) => {
                if !self.holds(item) {
                    return Err(CommandError::NotHeld);
                }
                let change = self.execute_transition(target, action)?;
                let here = self.location.0;
                World::shift_item(&mut self.inventory, &mut self.locations[here].items, item);
                Ok(change)
            }
            (Action::Use | Action::Examine, ObjectRef::Item(item)) => {
                if !self.can_reach(item) {
                    return Err(CommandError::NotHere);
                }
                Ok(self.execute_transition(target, action)?)
            }
            (Action::Use | Action::Examine, ObjectRef::Location(location)) => {
                if location != self.location && !self.here().leads_to(location) {
                    return Err(CommandError::NotHere);
                }
                Ok(self.execute_transition(target, action)?)
            }
            (Action::Move, ObjectRef::Item(_))
            | (Action::Take | Action::Drop, ObjectRef::Location(_)) => {
                Err(CommandError::WrongKind(action))
            }
        }
    }
}
