//! Rule engine: picks the applicable transition and applies it to its target.

use serde::{Deserialize, Serialize};

use super::{Action, RequirementOutcome};
use crate::entities::ObjectRef;
use crate::world_state::World;

/// A state write performed by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// The object that was mutated, which may differ from the one acted on.
    pub target: ObjectRef,
    /// State immediately before the write.
    pub previous: u32,
    pub current: u32,
}

/// Why a transition did not fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum TransitionFailure {
    #[error("nothing happens")]
    NoTransition,
    #[error("something required is missing")]
    MissingItem,
    #[error("something required is not in the right state")]
    InvalidTarget,
}

impl TransitionFailure {
    /// Map a requirement outcome onto the failure it surfaces as.
    ///
    /// Returns `None` for outcomes that let the transition proceed.
    pub fn from_requirements(outcome: RequirementOutcome) -> Option<Self> {
        match outcome {
            RequirementOutcome::Ok | RequirementOutcome::NoRequirements => None,
            RequirementOutcome::MissingInventoryItem | RequirementOutcome::MissingWorldItem => {
                Some(TransitionFailure::MissingItem)
            }
            RequirementOutcome::InvalidInventoryItem
            | RequirementOutcome::InvalidWorldItem
            | RequirementOutcome::InvalidLocation => Some(TransitionFailure::InvalidTarget),
            RequirementOutcome::NotEnoughTurns
            | RequirementOutcome::CurrentLocationMismatch
            | RequirementOutcome::InvalidCurrentLocation => Some(TransitionFailure::NoTransition),
        }
    }
}

/// `Ok(None)` means no rule matched and nothing changed.
pub type TransitionResult = Result<Option<StateChange>, TransitionFailure>;

impl World {
    /// Run `action` against `trigger`.
    ///
    /// Scans the trigger's transitions in declaration order. The first one
    /// whose action matches and whose target currently sits in its `from`
    /// state is committed to: its requirements are evaluated and no later
    /// transition is tried, whatever the outcome. Before writing, the
    /// target's state is checked once more against the transition's target
    /// precondition.
    pub fn execute_transition(&mut self, trigger: ObjectRef, action: Action) -> TransitionResult {
        let Some(object) = self.object(trigger) else {
            tracing::error!(%trigger, "transition triggered on an unknown object");
            return Err(TransitionFailure::NoTransition);
        };

        let selected = object.transitions().iter().find(|transition| {
            transition.action == action
                && self
                    .object(transition.target)
                    .is_some_and(|target| target.state() == transition.from)
        });
        let Some(transition) = selected else {
            return Ok(None);
        };

        let outcome = transition.requirements.evaluate(self);
        if let Some(failure) = TransitionFailure::from_requirements(outcome) {
            tracing::debug!(%trigger, %action, ?outcome, "transition blocked");
            return Err(failure);
        }

        let (target, precondition, to) =
            (transition.target, transition.target_state, transition.to);
        let Some(target_object) = self.object_mut(target) else {
            return Err(TransitionFailure::NoTransition);
        };
        if !precondition.matches(target_object.state()) {
            tracing::debug!(%trigger, %target, "target precondition no longer holds");
            return Err(TransitionFailure::NoTransition);
        }

        let previous = target_object.set_state(to);
        tracing::debug!(
            %trigger,
            %action,
            target = target_object.name(),
            previous,
            current = to,
            "transition applied"
        );

        Ok(Some(StateChange {
            target,
            previous,
            current: to,
        }))
    }
}
