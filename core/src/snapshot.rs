use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned, read-only view of the engine handed to rendering collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub current_score: Score,
    pub highest_score: Score,
    pub phase: Phase,
}

impl Snapshot {
    pub fn from_engine<S: SpawnSource>(engine: &BoardEngine<S>) -> Self {
        Self {
            grid: engine.grid().clone(),
            current_score: engine.current_score(),
            highest_score: engine.highest_score(),
            phase: engine.phase(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "score: {}  best: {}  {:?}",
            self.current_score, self.highest_score, self.phase
        )?;
        write!(f, "{}", self.grid)
    }
}
