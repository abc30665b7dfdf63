//! End-of-game scoring. Never consulted by the ending logic.

use serde::{Deserialize, Serialize};

use super::World;

/// Snapshot of how much of the world the player has seen and solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub items_discovered: usize,
    pub items_total: usize,
    pub locations_discovered: usize,
    pub locations_total: usize,
    pub puzzles_solved: usize,
    /// Objects owning at least one transition.
    pub puzzles_total: usize,
}

/// A category with nothing in it counts as complete.
fn ratio(found: usize, total: usize) -> f32 {
    if total == 0 {
        1.0
    } else {
        found as f32 / total as f32
    }
}

impl Score {
    pub fn item_ratio(&self) -> f32 {
        ratio(self.items_discovered, self.items_total)
    }

    pub fn location_ratio(&self) -> f32 {
        ratio(self.locations_discovered, self.locations_total)
    }

    pub fn puzzle_ratio(&self) -> f32 {
        ratio(self.puzzles_solved, self.puzzles_total)
    }

    /// Everything found or solved, over everything findable, as 0-100.
    pub fn percentage(&self) -> f32 {
        let found = self.items_discovered + self.locations_discovered + self.puzzles_solved;
        let total = self.items_total + self.locations_total + self.puzzles_total;
        ratio(found, total) * 100.0
    }
}

impl World {
    /// Compute the score from the tracking sets filled in by [`World::digest`].
    pub fn score(&self) -> Score {
        let puzzles: Vec<_> = self
            .object_refs()
            .filter(|id| self.object(*id).is_some_and(|object| object.has_transitions()))
            .collect();
        let puzzles_solved = puzzles
            .iter()
            .filter(|id| self.solved_puzzles.contains(*id))
            .count();

        Score {
            items_discovered: self.discovered_items.len(),
            items_total: self.items.len(),
            locations_discovered: self.discovered_locations.len(),
            locations_total: self.locations.len(),
            puzzles_solved,
            puzzles_total: puzzles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_json;
    use crate::mechanics::Action;
    use crate::world_state::Command;

    #[test]
    fn test_ratio_of_empty_category() {
        let score = Score {
            items_discovered: 0,
            items_total: 0,
            locations_discovered: 1,
            locations_total: 2,
            puzzles_solved: 0,
            puzzles_total: 0,
        };

        assert_eq!(score.item_ratio(), 1.0);
        assert!((score.location_ratio() - 0.5).abs() < 0.001);
        assert!((score.percentage() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_score_counts_only_puzzles_with_rules() {
        let mut world = load_json(
            r#"{
                "items": [
                    { "name": "crank", "descriptions": ["Still.", "Turned."],
                      "transitions": [ { "actions": ["use"], "from": 0, "to": 1, "target": "gate" } ] },
                    { "name": "flower", "descriptions": ["A flower."] }
                ],
                "locations": [
                    { "name": "yard", "descriptions": ["A yard."], "items": ["crank"], "exits": ["meadow"] },
                    { "name": "meadow", "descriptions": ["A meadow."], "items": ["flower"], "exits": ["yard"] },
                    { "name": "gate", "descriptions": ["A shut gate.", "An open gate."] }
                ]
            }"#,
        )
        .unwrap();

        world.digest();
        let crank = world.lookup("crank").unwrap();
        world.perform(Command::new(Action::Use, crank)).unwrap();
        world.digest();

        let score = world.score();
        assert_eq!(score.items_discovered, 1);
        assert_eq!(score.items_total, 2);
        assert_eq!(score.locations_discovered, 1);
        assert_eq!(score.locations_total, 3);
        // The gate changed state but owns no rule, so only the crank's rule counts.
        assert_eq!(score.puzzles_total, 1);
        assert_eq!(score.puzzles_solved, 0);
        assert_eq!(world.solved_puzzles().len(), 1);
    }
}
