//! Victory and defeat conditions.

use serde::{Deserialize, Serialize};

use crate::mechanics::Requirements;

/// A condition that ends the game when its requirements hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ending {
    /// Victory when true, defeat otherwise.
    pub success: bool,
    pub reason: String,
    pub requirements: Requirements,
    pub fuse: Option<Fuse>,
}

impl Ending {
    pub fn new(success: bool, reason: impl Into<String>, requirements: Requirements) -> Self {
        Self {
            success,
            reason: reason.into(),
            requirements,
            fuse: None,
        }
    }

    /// Attach a one-shot timer to this ending.
    pub fn with_fuse(mut self, fuse: Fuse) -> Self {
        self.fuse = Some(fuse);
        self
    }
}

/// A countdown that starts the first time `lit_by` is satisfied.
///
/// The turn it was lit on is latched on the world, so the ending can fire
/// `turns` turns later even if `lit_by` stops holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fuse {
    pub lit_by: Requirements,
    pub turns: u32,
}

/// Result of the per-turn digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    #[default]
    Continue,
    Victory,
    Dead,
}

impl GameState {
    pub fn is_over(self) -> bool {
        !matches!(self, GameState::Continue)
    }
}
