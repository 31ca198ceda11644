use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Adornment, Cell};
use crate::game::players::Player;

/// Adornments crossed in a single move, in traversal order.
pub type Traversal = SmallVec<[Adornment; 4]>;

/// Outcome of one call to `next_move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub player: Player,
    pub previous_position: Cell,
    /// Position after the roll, before any adornment is applied.
    pub position_after_roll: Cell,
    pub final_position: Cell,
    pub rolled_value: u32,
    pub adornments_traversed: Traversal,
}

impl MoveResult {
    /// True when the roll overshot the last cell and the token stayed put.
    pub fn was_wasted(&self) -> bool {
        self.previous_position == self.position_after_roll && self.rolled_value > 0
    }
}
