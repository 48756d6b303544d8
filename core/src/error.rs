use thiserror::Error;

use crate::Value;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Tile value {0} is not a power of two")]
    InvalidTileValue(Value),
    #[error("Cannot spawn a tile, no empty cell left on the board")]
    SpawnOnFullBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
