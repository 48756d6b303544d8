use alloc::collections::VecDeque;

use super::*;

/// Replays a fixed list of picks, wrapped to the candidate count. Falls back to
/// the first empty cell once the script runs out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedSpawner {
    picks: VecDeque<usize>,
}

impl ScriptedSpawner {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl SpawnSource for ScriptedSpawner {
    fn pick(&mut self, candidates: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % candidates
    }
}
