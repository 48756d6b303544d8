use serde::{Deserialize, Serialize};

use crate::*;

/// Content of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileValue {
    Empty,
    Tile(Value),
}

impl TileValue {
    /// Value used for every freshly spawned tile.
    pub const SPAWN: Self = Self::Tile(2);

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn value(self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::Tile(value) => Some(value),
        }
    }

    /// Validates that `value` is a positive power of two.
    pub fn new(value: Value) -> Result<Self> {
        if value.is_power_of_two() && value > 1 {
            Ok(Self::Tile(value))
        } else {
            Err(GameError::InvalidTileValue(value))
        }
    }
}

impl Default for TileValue {
    fn default() -> Self {
        Self::Empty
    }
}

impl TryFrom<Option<Value>> for TileValue {
    type Error = GameError;

    fn try_from(value: Option<Value>) -> Result<Self> {
        value.map_or(Ok(Self::Empty), Self::new)
    }
}

/// One position on the board, coordinates never change once the grid is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub column: Coord,
    pub value: TileValue,
    pub just_merged: bool,
}

impl Cell {
    pub const fn empty((row, column): Coord2) -> Self {
        Self {
            row,
            column,
            value: TileValue::Empty,
            just_merged: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.column)
    }

    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
