//! The requirement language shared by transitions and endings.

use serde::{Deserialize, Serialize};

use super::StateMatch;
use crate::entities::{ItemId, LocationId};
use crate::world_state::World;

/// An object that must exist in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateCheck<T> {
    pub target: T,
    pub state: StateMatch,
}

impl<T> StateCheck<T> {
    pub fn new(target: T, state: StateMatch) -> Self {
        Self { target, state }
    }

    /// Accept the target in any state.
    pub fn any(target: T) -> Self {
        Self::new(target, StateMatch::Any)
    }
}

/// Clause groups gating a transition or an ending.
///
/// An empty list, an absent current location and zero turns all mean
/// "not checked". When nothing at all is checked the set is empty, which
/// evaluates to [`RequirementOutcome::NoRequirements`] rather than `Ok`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    /// Items the player must carry.
    pub inventory: Vec<StateCheck<ItemId>>,
    /// Items checked wherever they are.
    pub items: Vec<StateCheck<ItemId>>,
    pub locations: Vec<StateCheck<LocationId>>,
    /// Where the player must be standing.
    pub current_location: Option<StateCheck<LocationId>>,
    /// Minimum elapsed turns.
    pub turns: u32,
}

/// Why a requirement set did or did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementOutcome {
    Ok,
    NoRequirements,
    MissingInventoryItem,
    InvalidInventoryItem,
    MissingWorldItem,
    InvalidWorldItem,
    InvalidLocation,
    NotEnoughTurns,
    CurrentLocationMismatch,
    InvalidCurrentLocation,
}

impl RequirementOutcome {
    /// Only a fully checked, passing set counts. Endings rely on this.
    pub fn is_satisfied(self) -> bool {
        matches!(self, RequirementOutcome::Ok)
    }

    /// Transitions also proceed when there was nothing to check.
    pub fn permits_transition(self) -> bool {
        matches!(
            self,
            RequirementOutcome::Ok | RequirementOutcome::NoRequirements
        )
    }
}

impl Requirements {
    /// Check whether no clause is set.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
            && self.items.is_empty()
            && self.locations.is_empty()
            && self.current_location.is_none()
            && self.turns == 0
    }

    /// Evaluate against the live world, stopping at the first failing clause.
    ///
    /// Clauses are checked in a fixed order: turns, inventory, world items,
    /// locations, current location.
    pub fn evaluate(&self, world: &World) -> RequirementOutcome {
        let outcome = self.check(world);
        if !outcome.permits_transition() {
            tracing::trace!(?outcome, turns = world.turns(), "requirements not met");
        }
        outcome
    }

    fn check(&self, world: &World) -> RequirementOutcome {
        if self.turns != 0 && world.turns() < self.turns {
            return RequirementOutcome::NotEnoughTurns;
        }

        for check in &self.inventory {
            if !world.holds(check.target) {
                return RequirementOutcome::MissingInventoryItem;
            }
            match world.item(check.target) {
                Some(item) if check.state.matches(item.object.state()) => {}
                Some(_) => return RequirementOutcome::InvalidInventoryItem,
                None => return RequirementOutcome::MissingInventoryItem,
            }
        }

        for check in &self.items {
            match world.item(check.target) {
                Some(item) if check.state.matches(item.object.state()) => {}
                Some(_) => return RequirementOutcome::InvalidWorldItem,
                None => return RequirementOutcome::MissingWorldItem,
            }
        }

        for check in &self.locations {
            match world.location(check.target) {
                Some(location) if check.state.matches(location.object.state()) => {}
                Some(_) => return RequirementOutcome::InvalidLocation,
                None => {
                    // The loader resolves every location reference, so this
                    // only happens with ids taken from a different world.
                    tracing::error!(
                        location = %check.target,
                        "requirement names an unknown location"
                    );
                    return RequirementOutcome::InvalidLocation;
                }
            }
        }

        if let Some(check) = &self.current_location {
            if world.current_location() != check.target {
                return RequirementOutcome::CurrentLocationMismatch;
            }
            let here = world.location(check.target).map(|l| l.object.state());
            if !here.is_some_and(|state| check.state.matches(state)) {
                return RequirementOutcome::InvalidCurrentLocation;
            }
        }

        if self.is_empty() {
            return RequirementOutcome::NoRequirements;
        }

        RequirementOutcome::Ok
    }
}
