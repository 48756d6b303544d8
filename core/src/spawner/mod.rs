pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of the index used to choose which empty cell receives a new tile.
pub trait SpawnSource {
    /// Returns an index in `0..candidates`, `candidates` is never zero.
    fn pick(&mut self, candidates: usize) -> usize;
}

impl<S: SpawnSource + ?Sized> SpawnSource for &mut S {
    fn pick(&mut self, candidates: usize) -> usize {
        (**self).pick(candidates)
    }
}
