#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use snapshot::*;
pub use spawner::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod snapshot;
mod spawner;
mod tile;
mod types;

/// Board geometry, fixed for the lifetime of an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, columns: Coord) -> Self {
        Self { rows, columns }
    }

    pub fn new(rows: Coord, columns: Coord) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let columns = columns.clamp(1, Coord::MAX);
        Self::new_unchecked(rows, columns)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(4, 4)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Engine was not in play, nothing was evaluated.
    Ignored,
    /// No tile could slide or merge, board still has room.
    NoChange,
    /// At least one tile slid or merged and a new tile was spawned.
    Moved,
    /// Board was full after the move.
    Lost,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Ignored => false,
            NoChange => false,
            Moved => true,
            Lost => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_zero_axes() {
        assert_eq!(GameConfig::new(0, 3), GameConfig::new_unchecked(1, 3));
        assert_eq!(GameConfig::default().size(), (4, 4));
        assert_eq!(GameConfig::default().total_cells(), 16);
    }

    #[test]
    fn only_board_changes_count_as_updates() {
        assert!(!MoveOutcome::Ignored.has_update());
        assert!(!MoveOutcome::NoChange.has_update());
        assert!(MoveOutcome::Moved.has_update());
        assert!(MoveOutcome::Lost.has_update());
    }
}
