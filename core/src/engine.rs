use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing
/// - Playing -> Lost
/// - Lost -> Playing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Engine created, no game started yet
    NotStarted,
    /// Game in progress, moves are accepted
    Playing,
    /// Board filled up, moves are ignored until the next start
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Owns the board, the scores, and the game phase.
#[derive(Clone, Debug)]
pub struct BoardEngine<S = RandomSpawner> {
    grid: Grid,
    current_score: Score,
    highest_score: Score,
    phase: Phase,
    spawner: S,
}

impl<S: SpawnSource> BoardEngine<S> {
    pub fn new(config: GameConfig, spawner: S) -> Self {
        Self {
            grid: Grid::new(config),
            current_score: 0,
            highest_score: 0,
            phase: Default::default(),
            spawner,
        }
    }

    /// Resumes play from a prepared position without spawning.
    pub fn from_grid(grid: Grid, spawner: S) -> Self {
        Self {
            grid,
            current_score: 0,
            highest_score: 0,
            phase: Phase::Playing,
            spawner,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_score(&self) -> Score {
        self.current_score
    }

    pub fn highest_score(&self) -> Score {
        self.highest_score
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid.cell_at(coords)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Clears the board, resets the current score, and seeds the first tile.
    pub fn start(&mut self) -> Snapshot {
        self.grid = Grid::new(self.grid.config());
        self.current_score = 0;
        self.phase = Phase::Playing;
        self.spawn_tile();
        log::debug!("Game started on a {:?} board", self.size());
        self.snapshot()
    }

    pub fn apply_move(&mut self, direction: Direction) -> Snapshot {
        self.step(direction);
        self.snapshot()
    }

    /// Slides and merges every tile toward `direction`, then spawns or ends the
    /// game. Moves outside of play are ignored.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        if !self.phase.is_playing() {
            log::debug!("Ignoring {direction:?}, game is {:?}", self.phase);
            return MoveOutcome::Ignored;
        }

        // merge markers only survive until the next move that changes the board
        let mut next = self.grid.clone();
        next.clear_merged();
        let summary = settle(&mut next, direction);

        if summary.changed() {
            self.grid = next;
            self.current_score += summary.gained;
            self.highest_score = self.highest_score.max(self.current_score);
            log::debug!(
                "{direction:?}: {} slides, {} merges, +{}",
                summary.slides,
                summary.merges,
                summary.gained
            );
        }

        if !self.grid.can_spawn() {
            self.end_game();
            return MoveOutcome::Lost;
        }

        if summary.changed() {
            self.spawn_tile();
            MoveOutcome::Moved
        } else {
            MoveOutcome::NoChange
        }
    }

    fn spawn_tile(&mut self) {
        match self.grid.spawn(&mut self.spawner) {
            Ok(coords) => log::trace!("Spawned tile at {coords:?}"),
            Err(err) => panic!("{err}"),
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::Lost;
        self.highest_score = self.highest_score.max(self.current_score);
        log::info!(
            "Game lost with score {} (best {})",
            self.current_score,
            self.highest_score
        );
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct MoveSummary {
    slides: u32,
    merges: u32,
    gained: Score,
}

impl MoveSummary {
    const fn changed(&self) -> bool {
        self.slides > 0 || self.merges > 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transition {
    Slide { from: Coord2, to: Coord2 },
    Merge { from: Coord2, to: Coord2, merged: Value },
}

/// Applies single-step transitions until none is left. Every pass restarts the
/// scan from the top-left corner so a tile that just moved can keep going.
fn settle(grid: &mut Grid, direction: Direction) -> MoveSummary {
    let mut summary = MoveSummary::default();

    while let Some(transition) = next_transition(grid, direction) {
        match transition {
            Transition::Slide { from, to } => {
                let source = grid[from];
                grid[to].value = source.value;
                grid[to].just_merged = source.just_merged;
                grid[from].value = TileValue::Empty;
                grid[from].just_merged = false;
                summary.slides += 1;
                log::trace!("slide {from:?} -> {to:?}");
            }
            Transition::Merge { from, to, merged } => {
                grid[to].value = TileValue::Tile(merged);
                grid[to].just_merged = true;
                grid[from].value = TileValue::Empty;
                grid[from].just_merged = false;
                summary.merges += 1;
                summary.gained += Score::from(merged);
                log::trace!("merge {from:?} -> {to:?} = {merged}");
            }
        }
    }

    summary
}

/// First cell in scan order that can slide into or merge with its neighbor.
fn next_transition(grid: &Grid, direction: Direction) -> Option<Transition> {
    let size = grid.size();
    grid.iter().find_map(|cell| {
        let TileValue::Tile(value) = cell.value else {
            return None;
        };
        let from = cell.coords();
        let to = direction.neighbor(from, size)?;
        let neighbor = grid[to];

        match neighbor.value {
            TileValue::Empty => Some(Transition::Slide { from, to }),
            TileValue::Tile(other)
                if other == value && !cell.just_merged && !neighbor.just_merged =>
            {
                // a pair whose sum does not fit a tile is treated as unequal
                let merged = value.checked_add(other)?;
                Some(Transition::Merge { from, to, merged })
            }
            TileValue::Tile(_) => None,
        }
    })
}
