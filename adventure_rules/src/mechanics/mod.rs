//! Game mechanics: player actions, state transitions and the requirement language.

mod requirements;
mod transition;

pub use requirements::*;
pub use transition::*;

use serde::{Deserialize, Serialize};

use crate::entities::ObjectRef;

/// Every verb the parser can hand to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Move,
    Take,
    Drop,
    Use,
    Examine,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Move,
        Action::Take,
        Action::Drop,
        Action::Use,
        Action::Examine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Take => "take",
            Action::Drop => "drop",
            Action::Use => "use",
            Action::Examine => "examine",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a verb is not part of the action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl std::str::FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Expected state of an object: a specific value or a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StateMatch {
    #[default]
    Any,
    Exactly(u32),
}

impl StateMatch {
    /// Check whether `state` satisfies this expectation.
    pub fn matches(self, state: u32) -> bool {
        match self {
            StateMatch::Any => true,
            StateMatch::Exactly(expected) => expected == state,
        }
    }
}

/// A rule moving `target` from `from` to `to` when `action` is performed
/// on the object that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub action: Action,
    pub from: u32,
    pub to: u32,
    /// The object actually mutated. Often, but not always, the owner.
    pub target: ObjectRef,
    /// Precondition on the target, checked again right before the write.
    pub target_state: StateMatch,
    pub requirements: Requirements,
}
