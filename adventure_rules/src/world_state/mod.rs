//! World state management - the arena owning every object in the game.

mod commands;
mod digest;
mod score;

pub use commands::*;
pub use score::*;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::entities::{
    Ending, EndingId, GameObject, GameState, Item, ItemId, Location, LocationId, ObjectRef,
};

/// Title and author of a world description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// The complete state of a running game.
///
/// Items, locations and endings are stored by value and never added or
/// removed after loading. The inventory, each location's item list and
/// the current location are indices into those arenas.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) meta: WorldMeta,
    pub(crate) items: Vec<Item>,
    pub(crate) locations: Vec<Location>,
    pub(crate) endings: Vec<Ending>,
    /// Name -> handle, built once by the loader.
    pub(crate) names: HashMap<String, ObjectRef>,

    pub(crate) turns: u32,
    pub(crate) inventory: Vec<ItemId>,
    pub(crate) location: LocationId,
    pub(crate) end_game: Option<String>,
    /// Outcome latched together with `end_game`.
    pub(crate) outcome: GameState,

    pub(crate) discovered_items: HashSet<ItemId>,
    pub(crate) discovered_locations: HashSet<LocationId>,
    pub(crate) solved_puzzles: HashSet<ObjectRef>,
    /// Turn on which each ending's fuse was lit, indexed by ending.
    pub(crate) fuses: Vec<Option<u32>>,
    pub(crate) turn_policy: TurnPolicy,
}

impl World {
    /// Assemble a fresh world. The player starts in the first location.
    pub(crate) fn new(
        meta: WorldMeta,
        items: Vec<Item>,
        locations: Vec<Location>,
        endings: Vec<Ending>,
        names: HashMap<String, ObjectRef>,
    ) -> Self {
        let fuses = vec![None; endings.len()];
        Self {
            meta,
            discovered_items: HashSet::with_capacity(items.len()),
            discovered_locations: HashSet::with_capacity(locations.len()),
            solved_puzzles: HashSet::with_capacity(items.len() + locations.len()),
            items,
            locations,
            endings,
            names,
            turns: 0,
            inventory: Vec::new(),
            location: LocationId(0),
            end_game: None,
            outcome: GameState::Continue,
            fuses,
            turn_policy: TurnPolicy::default(),
        }
    }

    pub fn meta(&self) -> &WorldMeta {
        &self.meta
    }

    /// All items in declaration order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All locations in declaration order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All endings in priority order.
    pub fn endings(&self) -> &[Ending] {
        &self.endings
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    pub fn ending(&self, id: EndingId) -> Option<&Ending> {
        self.endings.get(id.0)
    }

    /// Find any object by its unique name.
    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        self.names.get(name).copied()
    }

    /// Find an item by name.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.lookup(name).and_then(ObjectRef::as_item)
    }

    /// Find a location by name.
    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.lookup(name).and_then(ObjectRef::as_location)
    }

    /// Get the shared object data behind a handle.
    pub fn object(&self, id: ObjectRef) -> Option<&GameObject> {
        match id {
            ObjectRef::Item(id) => self.item(id).map(|item| &item.object),
            ObjectRef::Location(id) => self.location(id).map(|location| &location.object),
        }
    }

    pub(crate) fn object_mut(&mut self, id: ObjectRef) -> Option<&mut GameObject> {
        match id {
            ObjectRef::Item(id) => self.items.get_mut(id.0).map(|item| &mut item.object),
            ObjectRef::Location(id) => self
                .locations
                .get_mut(id.0)
                .map(|location| &mut location.object),
        }
    }

    /// Handles to every item followed by every location.
    pub fn object_refs(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        let items = (0..self.items.len()).map(|i| ObjectRef::Item(ItemId(i)));
        let locations = (0..self.locations.len()).map(|i| ObjectRef::Location(LocationId(i)));
        items.chain(locations)
    }

    /// Every item and location object.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.items
            .iter()
            .map(|item| &item.object)
            .chain(self.locations.iter().map(|location| &location.object))
    }

    /// Name of the object behind a handle, or an empty string.
    pub fn name_of(&self, id: ObjectRef) -> &str {
        self.object(id).map(GameObject::name).unwrap_or_default()
    }

    /// Elapsed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turns = self.turns.saturating_add(1);
    }

    /// Items the player carries, in pick-up order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    pub fn holds(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }

    pub fn current_location(&self) -> LocationId {
        self.location
    }

    /// The location the player is standing in.
    pub fn here(&self) -> &Location {
        &self.locations[self.location.0]
    }

    /// Check if the player can reach an item, carried or lying here.
    pub fn can_reach(&self, item: ItemId) -> bool {
        self.holds(item) || self.here().contains(item)
    }

    /// Reason the game ended, once it has.
    pub fn end_game(&self) -> Option<&str> {
        self.end_game.as_deref()
    }

    pub fn is_over(&self) -> bool {
        self.end_game.is_some()
    }

    /// Outcome of the game so far. Stays `Continue` until an ending is reached.
    pub fn outcome(&self) -> GameState {
        self.outcome
    }

    pub fn discovered_items(&self) -> &HashSet<ItemId> {
        &self.discovered_items
    }

    pub fn discovered_locations(&self) -> &HashSet<LocationId> {
        &self.discovered_locations
    }

    /// Objects that have left their initial state.
    pub fn solved_puzzles(&self) -> &HashSet<ObjectRef> {
        &self.solved_puzzles
    }

    /// Turn on which an ending's fuse was lit, if it has been.
    pub fn fuse_lit_at(&self, ending: EndingId) -> Option<u32> {
        self.fuses.get(ending.0).copied().flatten()
    }

    /// Move an item between two id lists. Returns false if it was not in `from`.
    fn shift_item(from: &mut Vec<ItemId>, to: &mut Vec<ItemId>, item: ItemId) -> bool {
        match from.iter().position(|held| *held == item) {
            Some(index) => {
                to.push(from.remove(index));
                true
            }
            None => false,
        }
    }
}
