//! Entity definitions for the adventure world.
//!
//! Items, locations and endings live in arenas owned by [`crate::World`].
//! Everything that points at one of them stores a typed index instead of a
//! reference, so the location graph may contain cycles.

mod ending;
mod object;

pub use ending::*;
pub use object::*;

use serde::{Deserialize, Serialize};

/// Index of an item in the world's item arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    /// Position of the item in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Index of a location in the world's location arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub(crate) usize);

impl LocationId {
    /// Position of the location in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "location#{}", self.0)
    }
}

/// Index of an ending in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndingId(pub(crate) usize);

impl EndingId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kinds of objects in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Item,
    Location,
}

/// Handle to any object, item or location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectRef {
    Item(ItemId),
    Location(LocationId),
}

impl ObjectRef {
    /// Get the kind of object this handle points at.
    pub fn kind(self) -> ObjectKind {
        match self {
            ObjectRef::Item(_) => ObjectKind::Item,
            ObjectRef::Location(_) => ObjectKind::Location,
        }
    }

    pub fn as_item(self) -> Option<ItemId> {
        match self {
            ObjectRef::Item(id) => Some(id),
            ObjectRef::Location(_) => None,
        }
    }

    pub fn as_location(self) -> Option<LocationId> {
        match self {
            ObjectRef::Location(id) => Some(id),
            ObjectRef::Item(_) => None,
        }
    }
}

impl From<ItemId> for ObjectRef {
    fn from(id: ItemId) -> Self {
        ObjectRef::Item(id)
    }
}

impl From<LocationId> for ObjectRef {
    fn from(id: LocationId) -> Self {
        ObjectRef::Location(id)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectRef::Item(id) => id.fmt(f),
            ObjectRef::Location(id) => id.fmt(f),
        }
    }
}
