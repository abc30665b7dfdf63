//! The shared object model for items and locations.

use serde::{Deserialize, Serialize};

use super::{ItemId, LocationId, ObjectKind};
use crate::mechanics::Transition;

/// Name, state and rules common to every item and location.
///
/// `state` always indexes into `descriptions`. It is only changed through
/// the transition engine, which never writes a value the loader has not
/// checked against the description count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    name: String,
    kind: ObjectKind,
    state: u32,
    descriptions: Vec<String>,
    transitions: Vec<Transition>,
}

impl GameObject {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: ObjectKind,
        descriptions: Vec<String>,
        transitions: Vec<Transition>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            state: 0,
            descriptions,
            transitions,
        }
    }

    /// Unique name, used as the lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Current state value.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Number of distinct states this object can be in.
    pub fn state_count(&self) -> usize {
        self.descriptions.len()
    }

    /// Description for the current state.
    pub fn description(&self) -> &str {
        self.descriptions
            .get(self.state as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Description for an arbitrary state, if it exists.
    pub fn description_for(&self, state: u32) -> Option<&str> {
        self.descriptions.get(state as usize).map(String::as_str)
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Rules in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Objects that own at least one rule count towards the puzzle score.
    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub(crate) fn transitions_mut(&mut self) -> &mut Vec<Transition> {
        &mut self.transitions
    }

    /// Write a new state. Returns the previous one.
    pub(crate) fn set_state(&mut self, state: u32) -> u32 {
        debug_assert!((state as usize) < self.descriptions.len());
        std::mem::replace(&mut self.state, state)
    }
}

/// Something the player can find, carry and use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub object: GameObject,
    /// May be moved into the inventory.
    pub collectible: bool,
    /// Current description is shown verbatim rather than summarised.
    pub readable: bool,
}

impl Item {
    pub fn name(&self) -> &str {
        self.object.name()
    }
}

/// A place the player can stand in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub object: GameObject,
    /// Items currently lying here.
    pub(crate) items: Vec<ItemId>,
    /// Fixed after loading.
    pub(crate) exits: Vec<LocationId>,
}

impl Location {
    pub fn name(&self) -> &str {
        self.object.name()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn exits(&self) -> &[LocationId] {
        &self.exits
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn leads_to(&self, location: LocationId) -> bool {
        self.exits.contains(&location)
    }
}
