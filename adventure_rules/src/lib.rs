//! # Adventure Rules
//!
//! The simulation core of a text adventure: a declarative model of items and
//! locations, a rule engine that changes object state in response to player
//! actions, and an ending evaluator driven by the same requirement language.
//! This crate does no language understanding and renders no text.
//!
//! ## Core Components
//!
//! - **entities**: items, locations and endings, stored in arenas and linked by typed ids
//! - **mechanics**: actions, transitions and requirement evaluation
//! - **world_state**: the world, player commands, the per-turn digest and scoring
//! - **loader**: builds a fully linked world from JSON or TOML

pub mod entities;
pub mod error;
pub mod loader;
pub mod mechanics;
pub mod world_state;

pub use entities::*;
pub use error::*;
pub use loader::{build_world, load_json, load_path, load_toml, WorldDef};
pub use mechanics::*;
pub use world_state::*;
