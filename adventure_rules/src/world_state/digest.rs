//! Per-turn bookkeeping and ending evaluation.

use super::World;
use crate::entities::{Ending, GameState, ObjectRef};

impl World {
    /// Run once after every player action.
    ///
    /// Records what the player can see, records every object that has left
    /// its initial state, lights any fuse whose trigger now holds, then walks
    /// the endings in order. The first ending whose requirements are fully
    /// satisfied decides the outcome and stores its reason.
    ///
    /// Once an ending has been reached the recorded outcome is returned as
    /// is and nothing is evaluated again.
    pub fn digest(&mut self) -> GameState {
        if self.end_game.is_some() {
            return self.outcome;
        }

        self.discovered_locations.insert(self.location);
        if let Some(here) = self.locations.get(self.location.0) {
            self.discovered_items.extend(here.items.iter().copied());
        }

        let changed: Vec<ObjectRef> = self
            .object_refs()
            .filter(|id| self.object(*id).is_some_and(|object| object.state() != 0))
            .collect();
        self.solved_puzzles.extend(changed);

        self.light_fuses();

        let reached = self
            .endings
            .iter()
            .enumerate()
            .find(|(index, ending)| self.ending_reached(*index, ending))
            .map(|(_, ending)| (ending.success, ending.reason.clone()));

        match reached {
            Some((success, reason)) => {
                tracing::info!(success, %reason, turns = self.turns, "ending reached");
                self.end_game = Some(reason);
                self.outcome = if success {
                    GameState::Victory
                } else {
                    GameState::Dead
                };
                self.outcome
            }
            None => GameState::Continue,
        }
    }

    /// Latch the current turn for every unlit fuse whose trigger holds.
    fn light_fuses(&mut self) {
        let lit: Vec<usize> = self
            .endings
            .iter()
            .enumerate()
            .filter(|(index, ending)| {
                self.fuses.get(*index).is_some_and(Option::is_none)
                    && ending
                        .fuse
                        .as_ref()
                        .is_some_and(|fuse| fuse.lit_by.evaluate(self).is_satisfied())
            })
            .map(|(index, _)| index)
            .collect();

        for index in lit {
            tracing::debug!(ending = index, turn = self.turns, "fuse lit");
            self.fuses[index] = Some(self.turns);
        }
    }

    fn ending_reached(&self, index: usize, ending: &Ending) -> bool {
        let outcome = ending.requirements.evaluate(self);
        match &ending.fuse {
            None => outcome.is_satisfied(),
            Some(fuse) => {
                let Some(lit_at) = self.fuses.get(index).copied().flatten() else {
                    return false;
                };
                self.turns >= lit_at.saturating_add(fuse.turns) && outcome.permits_transition()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EndingId;
    use crate::loader::load_json;
    use crate::mechanics::Action;
    use crate::world_state::Command;

    const KEY_AND_VAULT: &str = r#"{
        "items": [
            { "name": "key", "descriptions": ["A small key."], "collectible": true },
            { "name": "coin", "descriptions": ["A coin."], "collectible": true }
        ],
        "locations": [
            { "name": "hall", "descriptions": ["A hall."], "items": ["key", "coin"], "exits": ["vault"] },
            { "name": "vault", "descriptions": ["A vault."], "exits": ["hall"] }
        ],
        "endings": [
            { "state": "win", "reason": "You open the vault with the key.",
              "requirements": { "inventory": ["key"], "current_location": "vault" } }
        ]
    }"#;

    fn perform(world: &mut World, action: Action, name: &str) {
        let target = world.lookup(name).unwrap();
        world.perform(Command::new(action, target)).unwrap();
    }

    #[test]
    fn test_victory_with_key() {
        let mut world = load_json(KEY_AND_VAULT).unwrap();

        perform(&mut world, Action::Take, "key");
        assert_eq!(world.digest(), GameState::Continue);

        perform(&mut world, Action::Move, "vault");
        assert_eq!(world.digest(), GameState::Victory);
        assert_eq!(world.end_game(), Some("You open the vault with the key."));
    }

    #[test]
    fn test_continue_without_key() {
        let mut world = load_json(KEY_AND_VAULT).unwrap();

        perform(&mut world, Action::Move, "vault");

        assert_eq!(world.digest(), GameState::Continue);
        assert!(world.end_game().is_none());
    }

    #[test]
    fn test_discovery_is_idempotent() {
        let mut world = load_json(KEY_AND_VAULT).unwrap();

        world.digest();
        let items = world.discovered_items().len();
        let locations = world.discovered_locations().len();
        world.digest();

        assert_eq!(items, 2);
        assert_eq!(locations, 1);
        assert_eq!(world.discovered_items().len(), items);
        assert_eq!(world.discovered_locations().len(), locations);
    }

    #[test]
    fn test_empty_ending_is_never_reached() {
        let mut world = load_json(
            r#"{
                "items": [ { "name": "pebble", "descriptions": ["A pebble."], "collectible": true } ],
                "locations": [ { "name": "beach", "descriptions": ["A beach."], "items": ["pebble"] } ],
                "endings": [
                    { "state": "win", "reason": "Free win." },
                    { "state": "lose", "reason": "Free loss.", "requirements": {} }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(world.digest(), GameState::Continue);
        perform(&mut world, Action::Take, "pebble");
        for _ in 0..10 {
            world.advance_turn();
        }
        assert_eq!(world.digest(), GameState::Continue);
        assert!(world.end_game().is_none());
    }

    #[test]
    fn test_first_ending_wins_ties() {
        let mut world = load_json(
            r#"{
                "locations": [ { "name": "cliff", "descriptions": ["A cliff edge."] } ],
                "endings": [
                    { "state": "lose", "reason": "You fall.", "requirements": { "turns": 1 } },
                    { "state": "win", "reason": "You fly.", "requirements": { "current_location": "cliff" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(world.digest(), GameState::Victory);
        assert_eq!(world.end_game(), Some("You fly."));

        let mut world = load_json(
            r#"{
                "locations": [ { "name": "cliff", "descriptions": ["A cliff edge."] } ],
                "endings": [
                    { "state": "lose", "reason": "You fall.", "requirements": { "turns": 1 } },
                    { "state": "win", "reason": "You fly.", "requirements": { "current_location": "cliff" } }
                ]
            }"#,
        )
        .unwrap();
        world.advance_turn();

        assert_eq!(world.digest(), GameState::Dead);
        assert_eq!(world.end_game(), Some("You fall."));
    }

    #[test]
    fn test_reached_ending_is_final() {
        let mut world = load_json(
            r#"{
                "locations": [ { "name": "cliff", "descriptions": ["A cliff edge."] } ],
                "endings": [
                    { "state": "lose", "reason": "You fall.", "requirements": { "turns": 3 } },
                    { "state": "win", "reason": "You fly.", "requirements": { "current_location": "cliff" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(world.digest(), GameState::Victory);
        assert_eq!(world.outcome(), GameState::Victory);

        for _ in 0..3 {
            world.advance_turn();
        }
        assert_eq!(world.digest(), GameState::Victory);
        assert_eq!(world.outcome(), GameState::Victory);
        assert_eq!(world.end_game(), Some("You fly."));
    }

    #[test]
    fn test_turn_limit_ending() {
        let mut world = load_json(
            r#"{
                "locations": [ { "name": "cell", "descriptions": ["A cell."] } ],
                "endings": [ { "state": "lose", "reason": "You starve.", "requirements": { "turns": 5 } } ]
            }"#,
        )
        .unwrap();

        for _ in 0..4 {
            world.advance_turn();
        }
        assert_eq!(world.digest(), GameState::Continue);

        world.advance_turn();
        assert_eq!(world.digest(), GameState::Dead);
    }

    #[test]
    fn test_solved_puzzles_track_changed_objects() {
        let mut world = load_json(
            r#"{
                "items": [
                    { "name": "switch", "descriptions": ["Off.", "On."],
                      "transitions": [ { "actions": ["use"], "from": 0, "to": 1, "target": "switch" } ] }
                ],
                "locations": [ { "name": "lab", "descriptions": ["A lab."], "items": ["switch"] } ]
            }"#,
        )
        .unwrap();

        world.digest();
        assert!(world.solved_puzzles().is_empty());

        perform(&mut world, Action::Use, "switch");
        world.digest();
        let switch = world.lookup("switch").unwrap();
        assert!(world.solved_puzzles().contains(&switch));
    }

    #[test]
    fn test_fuse_without_trigger_never_lights() {
        let mut world = load_json(
            r#"{
                "locations": [ { "name": "bunker", "descriptions": ["A bunker."] } ],
                "endings": [
                    { "state": "lose", "reason": "Boom.", "fuse": { "lit_by": {}, "turns": 0 } }
                ]
            }"#,
        )
        .unwrap();

        for _ in 0..5 {
            assert_eq!(world.digest(), GameState::Continue);
            world.advance_turn();
        }
        assert_eq!(world.fuse_lit_at(EndingId(0)), None);
    }

    #[test]
    fn test_fuse_fires_after_countdown() {
        let mut world = load_json(
            r#"{
                "items": [
                    { "name": "bomb", "descriptions": ["A bomb.", "A hissing bomb."],
                      "transitions": [ { "actions": ["use"], "from": 0, "to": 1, "target": "bomb.0" } ] }
                ],
                "locations": [ { "name": "bunker", "descriptions": ["A bunker."], "items": ["bomb"] } ],
                "endings": [
                    { "state": "lose", "reason": "The bomb explodes.",
                      "fuse": { "lit_by": { "items": ["bomb.1"] }, "turns": 2 } }
                ]
            }"#,
        )
        .unwrap();
        let ending = EndingId(0);

        assert_eq!(world.digest(), GameState::Continue);
        assert_eq!(world.fuse_lit_at(ending), None);

        perform(&mut world, Action::Use, "bomb");
        assert_eq!(world.digest(), GameState::Continue);
        assert_eq!(world.fuse_lit_at(ending), Some(1));

        world.advance_turn();
        assert_eq!(world.digest(), GameState::Continue);
        assert_eq!(world.fuse_lit_at(ending), Some(1));

        world.advance_turn();
        assert_eq!(world.digest(), GameState::Dead);
        assert_eq!(world.end_game(), Some("The bomb explodes."));
    }
}
