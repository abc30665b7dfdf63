//! Serialized world description.
//!
//! The same schema is read from JSON and TOML. References to other objects
//! are plain strings of the form `"name"` (any state) or `"name.N"`.

use serde::{Deserialize, Serialize};

use crate::mechanics::Action;
use crate::world_state::WorldMeta;

/// Top-level world description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldDef {
    #[serde(default)]
    pub meta: WorldMeta,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    pub locations: Vec<LocationDef>,
    /// Checked in this order every turn.
    #[serde(default)]
    pub endings: Vec<EndingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDef {
    pub name: String,
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
    #[serde(default)]
    pub collectible: bool,
    #[serde(default)]
    pub readable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationDef {
    pub name: String,
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
    /// Names of items lying here at the start.
    #[serde(default)]
    pub items: Vec<String>,
    /// Names of neighbouring locations. May point forward or form cycles.
    #[serde(default)]
    pub exits: Vec<String>,
}

/// One rule, expanded into a transition per listed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDef {
    pub actions: Vec<Action>,
    pub from: u32,
    pub to: u32,
    pub target: String,
    #[serde(default)]
    pub requirements: RequirementsDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsDef {
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub turns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndingState {
    Win,
    Lose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndingDef {
    pub state: EndingState,
    pub reason: String,
    #[serde(default)]
    pub requirements: RequirementsDef,
    #[serde(default)]
    pub fuse: Option<FuseDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuseDef {
    pub lit_by: RequirementsDef,
    pub turns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let def: WorldDef = serde_json::from_str(
            r#"{ "locations": [ { "name": "void", "descriptions": ["Nothing."] } ] }"#,
        )
        .unwrap();

        assert!(def.items.is_empty());
        assert!(def.endings.is_empty());
        assert_eq!(def.meta, WorldMeta::default());
        assert!(def.locations[0].exits.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<WorldDef, _> = serde_json::from_str(
            r#"{ "locations": [ { "name": "void", "descriptions": ["x"], "colour": "red" } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result: Result<TransitionDef, _> = serde_json::from_str(
            r#"{ "actions": ["juggle"], "from": 0, "to": 1, "target": "ball" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_shape() {
        let def: WorldDef = toml::from_str(
            r#"
            [meta]
            title = "Lighthouse"

            [[items]]
            name = "lamp"
            descriptions = ["Dark.", "Lit."]
            collectible = true

            [[items.transitions]]
            actions = ["use"]
            from = 0
            to = 1
            target = "lamp.0"

            [[locations]]
            name = "tower"
            descriptions = ["A tower."]
            items = ["lamp"]

            [[endings]]
            state = "win"
            reason = "The light shines."
            requirements = { items = ["lamp.1"] }
            "#,
        )
        .unwrap();

        assert_eq!(def.meta.title, "Lighthouse");
        assert_eq!(def.items[0].transitions[0].actions, vec![Action::Use]);
        assert_eq!(def.endings[0].state, EndingState::Win);
        assert_eq!(def.endings[0].requirements.items, vec!["lamp.1".to_string()]);
    }
}
