//! World loader - turns a serialized description into a resolved world.
//!
//! Loading is staged because of forward references:
//! 1. **Items**: built in declaration order and registered by name
//! 2. **Locations**: built next; the items lying in each are resolved now
//! 3. **Links**: exits and transition targets are resolved once every name
//!    is known, since locations may point forward or form cycles
//! 4. **Endings**: requirement references resolved like everything else
//!
//! Any failure aborts the whole load. No partially linked world escapes.

mod reference;
mod schema;

pub use schema::*;

use std::collections::HashMap;
use std::path::Path;

use reference::{parse_reference, Reference};

use crate::entities::{
    Ending, Fuse, GameObject, Item, ItemId, Location, LocationId, ObjectKind, ObjectRef,
};
use crate::error::LoadError;
use crate::mechanics::{Requirements, StateCheck, StateMatch, Transition};
use crate::world_state::World;

/// Load a world from its JSON description.
pub fn load_json(source: &str) -> Result<World, LoadError> {
    let def: WorldDef = serde_json::from_str(source)?;
    build_world(def)
}

/// Load a world from its TOML description.
pub fn load_toml(source: &str) -> Result<World, LoadError> {
    let def: WorldDef = toml::from_str(source)?;
    build_world(def)
}

/// Load a world file, choosing the format from its extension.
pub fn load_path(path: impl AsRef<Path>) -> Result<World, LoadError> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<World, LoadError> = match format.as_deref() {
        Some("json") => load_json,
        Some("toml") => load_toml,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loading world file");
    parse(&source)
}

/// Build and link a world from an already deserialized description.
pub fn build_world(def: WorldDef) -> Result<World, LoadError> {
    let WorldDef {
        meta,
        items: item_defs,
        locations: location_defs,
        endings: ending_defs,
    } = def;

    if location_defs.is_empty() {
        return Err(LoadError::NoLocations);
    }

    let mut resolver = Resolver::default();
    let mut pending: Vec<(ObjectRef, Vec<TransitionDef>)> = Vec::new();

    // Stage 1: items.
    let mut items = Vec::with_capacity(item_defs.len());
    for (index, def) in item_defs.into_iter().enumerate() {
        let id = ObjectRef::Item(ItemId(index));
        resolver.register(&def.name, id, def.descriptions.len())?;
        pending.push((id, def.transitions));
        items.push(Item {
            object: GameObject::new(def.name, ObjectKind::Item, def.descriptions, Vec::new()),
            collectible: def.collectible,
            readable: def.readable,
        });
    }

    // Stage 2: locations, with their contents.
    let mut placed: HashMap<ItemId, usize> = HashMap::new();
    let mut exit_names = Vec::with_capacity(location_defs.len());
    let mut locations: Vec<Location> = Vec::with_capacity(location_defs.len());
    for (index, def) in location_defs.into_iter().enumerate() {
        let id = ObjectRef::Location(LocationId(index));
        resolver.register(&def.name, id, def.descriptions.len())?;
        let referrer = format!("location '{}'", def.name);

        let mut contents = Vec::with_capacity(def.items.len());
        for name in &def.items {
            let item = resolver.item(name, &referrer)?;
            if let Some(first) = placed.insert(item, index) {
                let first = locations
                    .get(first)
                    .map(|location| location.name().to_string())
                    .unwrap_or_else(|| def.name.clone());
                return Err(LoadError::ItemPlacedTwice {
                    item: name.clone(),
                    first,
                    second: def.name,
                });
            }
            contents.push(item);
        }

        pending.push((id, def.transitions));
        exit_names.push(def.exits);
        locations.push(Location {
            object: GameObject::new(def.name, ObjectKind::Location, def.descriptions, Vec::new()),
            items: contents,
            exits: Vec::new(),
        });
    }

    // Stage 3: exits and transition targets, now that every name is known.
    for (location, names) in locations.iter_mut().zip(exit_names) {
        let referrer = format!("location '{}'", location.name());
        location.exits = names
            .iter()
            .map(|name| resolver.location(name, &referrer))
            .collect::<Result<_, _>>()?;
    }

    for (owner, defs) in pending {
        let object = match owner {
            ObjectRef::Item(id) => &mut items[id.0].object,
            ObjectRef::Location(id) => &mut locations[id.0].object,
        };
        let transitions = resolver.transitions(object.name(), &defs)?;
        *object.transitions_mut() = transitions;
    }

    // Stage 4: endings.
    let endings = ending_defs
        .into_iter()
        .enumerate()
        .map(|(index, def)| resolver.ending(index, def))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        title = %meta.title,
        items = items.len(),
        locations = locations.len(),
        endings = endings.len(),
        "world loaded"
    );
    Ok(World::new(meta, items, locations, endings, resolver.names))
}

/// Name table filled in as objects are registered.
#[derive(Debug, Default)]
struct Resolver {
    names: HashMap<String, ObjectRef>,
    state_counts: HashMap<ObjectRef, usize>,
}

impl Resolver {
    fn register(&mut self, name: &str, id: ObjectRef, state_count: usize) -> Result<(), LoadError> {
        if name.trim().is_empty() {
            return Err(LoadError::EmptyName);
        }
        // Every name must be reachable through the reference syntax unchanged.
        let plain = parse_reference(name)
            .is_some_and(|reference| reference.name == name && reference.state == StateMatch::Any);
        if !plain {
            return Err(LoadError::UnreferenceableName {
                name: name.to_string(),
            });
        }
        if state_count == 0 {
            return Err(LoadError::NoDescriptions {
                object: name.to_string(),
            });
        }
        if self.names.insert(name.to_string(), id).is_some() {
            return Err(LoadError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.state_counts.insert(id, state_count);
        Ok(())
    }

    fn state_count(&self, id: ObjectRef) -> usize {
        self.state_counts.get(&id).copied().unwrap_or(0)
    }

    fn object(&self, name: &str, referrer: &str) -> Result<ObjectRef, LoadError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::UnknownObject {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
    }

    fn item(&self, name: &str, referrer: &str) -> Result<ItemId, LoadError> {
        self.names
            .get(name)
            .and_then(|id| id.as_item())
            .ok_or_else(|| LoadError::UnknownItem {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
    }

    fn location(&self, name: &str, referrer: &str) -> Result<LocationId, LoadError> {
        self.names
            .get(name)
            .and_then(|id| id.as_location())
            .ok_or_else(|| LoadError::UnknownLocation {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
    }

    fn reference<'a>(&self, raw: &'a str, referrer: &str) -> Result<Reference<'a>, LoadError> {
        parse_reference(raw).ok_or_else(|| LoadError::invalid_reference(referrer, raw))
    }

    /// Requirement states beyond an object's range can never match.
    fn warn_unreachable(&self, id: ObjectRef, reference: &Reference<'_>, referrer: &str) {
        if let StateMatch::Exactly(state) = reference.state {
            if state as usize >= self.state_count(id) {
                tracing::warn!(
                    referrer,
                    object = reference.name,
                    state,
                    "requirement asks for a state the object never reaches"
                );
            }
        }
    }

    fn item_check(&self, raw: &str, referrer: &str) -> Result<StateCheck<ItemId>, LoadError> {
        let reference = self.reference(raw, referrer)?;
        let id = self.item(reference.name, referrer)?;
        self.warn_unreachable(id.into(), &reference, referrer);
        Ok(StateCheck::new(id, reference.state))
    }

    fn location_check(
        &self,
        raw: &str,
        referrer: &str,
    ) -> Result<StateCheck<LocationId>, LoadError> {
        let reference = self.reference(raw, referrer)?;
        let id = self.location(reference.name, referrer)?;
        self.warn_unreachable(id.into(), &reference, referrer);
        Ok(StateCheck::new(id, reference.state))
    }

    fn requirements(
        &self,
        def: &RequirementsDef,
        referrer: &str,
    ) -> Result<Requirements, LoadError> {
        Ok(Requirements {
            inventory: def
                .inventory
                .iter()
                .map(|raw| self.item_check(raw, referrer))
                .collect::<Result<_, _>>()?,
            items: def
                .items
                .iter()
                .map(|raw| self.item_check(raw, referrer))
                .collect::<Result<_, _>>()?,
            locations: def
                .locations
                .iter()
                .map(|raw| self.location_check(raw, referrer))
                .collect::<Result<_, _>>()?,
            current_location: def
                .current_location
                .as_deref()
                .map(|raw| self.location_check(raw, referrer))
                .transpose()?,
            turns: def.turns,
        })
    }

    /// Resolve an object's rules, one transition per listed action.
    fn transitions(
        &self,
        owner: &str,
        defs: &[TransitionDef],
    ) -> Result<Vec<Transition>, LoadError> {
        let referrer = format!("'{owner}'");
        let mut transitions = Vec::with_capacity(defs.len());

        for def in defs {
            if def.actions.is_empty() {
                return Err(LoadError::NoActions {
                    object: owner.to_string(),
                });
            }

            let reference = self.reference(&def.target, &referrer)?;
            let target = self.object(reference.name, &referrer)?;
            let count = self.state_count(target);
            for state in [def.from, def.to] {
                if state as usize >= count {
                    return Err(LoadError::StateOutOfRange {
                        object: owner.to_string(),
                        target: reference.name.to_string(),
                        state,
                        count,
                    });
                }
            }
            if let StateMatch::Exactly(expected) = reference.state {
                if expected != def.from {
                    // Kept as data; the engine checks both values independently.
                    tracing::warn!(
                        owner,
                        target = reference.name,
                        from = def.from,
                        precondition = expected,
                        "transition precondition disagrees with its from state"
                    );
                }
            }

            let requirements = self.requirements(&def.requirements, &referrer)?;
            transitions.extend(def.actions.iter().map(|&action| Transition {
                action,
                from: def.from,
                to: def.to,
                target,
                target_state: reference.state,
                requirements: requirements.clone(),
            }));
        }

        Ok(transitions)
    }

    fn ending(&self, index: usize, def: EndingDef) -> Result<Ending, LoadError> {
        let referrer = format!("ending #{index}");
        let requirements = self.requirements(&def.requirements, &referrer)?;
        let mut ending = Ending::new(def.state == EndingState::Win, def.reason, requirements);

        if let Some(fuse) = def.fuse {
            let lit_by = self.requirements(&fuse.lit_by, &referrer)?;
            if lit_by.is_empty() {
                tracing::warn!(ending = index, "fuse has no trigger and can never be lit");
            }
            ending = ending.with_fuse(Fuse {
                lit_by,
                turns: fuse.turns,
            });
        } else if ending.requirements.is_empty() {
            tracing::warn!(ending = index, "ending has no requirements and can never be reached");
        }

        Ok(ending)
    }
}
