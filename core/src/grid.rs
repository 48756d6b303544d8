use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of cells, one per `(row, column)` pair.
///
/// Serializes as a list of rows, each a list of cells. Deserializing checks the
/// shape, the coordinates stored in every cell, and the tile values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridRows", try_from = "GridRows")]
pub struct Grid {
    cells: Array2<Cell>,
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct GridRows(Vec<Vec<Cell>>);

impl Grid {
    /// Builds an all-empty grid with the configured dimensions.
    pub fn new(config: GameConfig) -> Self {
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(row, column)| {
            Cell::empty((row as Coord, column as Coord))
        });
        Self { cells }
    }

    /// Builds a grid from rows of optional tile values.
    ///
    /// Every row must have the same non-zero length and every value must be a
    /// power of two of at least 2.
    pub fn from_values<R: AsRef<[Option<Value>]>>(rows: &[R]) -> Result<Self> {
        let (row_count, column_count) = checked_shape::<R, Option<Value>>(rows)?;

        let mut grid = Self::new(GameConfig::new_unchecked(row_count, column_count));
        for (row, values) in rows.iter().enumerate() {
            for (column, &value) in values.as_ref().iter().enumerate() {
                grid.cells[(row, column)].value = TileValue::try_from(value)?;
            }
        }

        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn config(&self) -> GameConfig {
        let (rows, columns) = self.size();
        GameConfig::new_unchecked(rows, columns)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Cell at `coords`, panics when out of range. See [`Grid::get`].
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        self.validate_coords(coords).map(|coords| self[coords])
    }

    /// Cells in scan order: top to bottom, then left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells of a single row, left to right.
    pub fn row(&self, row: Coord) -> impl Iterator<Item = &Cell> {
        self.cells.row(row.into()).into_iter()
    }

    pub fn row_values(&self, row: Coord) -> Vec<Option<Value>> {
        self.row(row).map(|cell| cell.value.value()).collect()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|cell| cell.is_empty())
            .map(Cell::coords)
    }

    pub fn empty_count(&self) -> CellCount {
        self.empty_cells().count().try_into().unwrap()
    }

    pub fn occupied_count(&self) -> CellCount {
        self.config().total_cells() - self.empty_count()
    }

    /// Whether at least one cell is free for a new tile.
    pub fn can_spawn(&self) -> bool {
        self.iter().any(Cell::is_empty)
    }

    /// All tile values on the board, in ascending order.
    pub fn tile_values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self.iter().filter_map(|cell| cell.value.value()).collect();
        values.sort_unstable();
        values
    }

    pub fn max_tile(&self) -> Option<Value> {
        self.iter().filter_map(|cell| cell.value.value()).max()
    }

    /// Places a `2` on an empty cell chosen by `source`.
    pub(crate) fn spawn<S: SpawnSource + ?Sized>(&mut self, source: &mut S) -> Result<Coord2> {
        let candidates = self.empty_cells().count();
        if candidates == 0 {
            return Err(GameError::SpawnOnFullBoard);
        }

        let pick = source.pick(candidates);
        debug_assert!(pick < candidates, "spawn source picked {pick} of {candidates}");
        let coords = self
            .empty_cells()
            .nth(pick % candidates)
            .ok_or(GameError::SpawnOnFullBoard)?;
        self[coords].value = TileValue::SPAWN;
        Ok(coords)
    }

    pub(crate) fn clear_merged(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.just_merged = false;
        }
    }
}

/// Row count and column count of `rows`, which must be non-empty, rectangular,
/// and fit in [`Coord`] on both axes.
fn checked_shape<R: AsRef<[T]>, T>(rows: &[R]) -> Result<Coord2> {
    let row_count = Coord::try_from(rows.len()).map_err(|_| GameError::InvalidBoardShape)?;
    let column_count = rows
        .first()
        .map(|row| row.as_ref().len())
        .ok_or(GameError::InvalidBoardShape)?;
    let column_count = Coord::try_from(column_count).map_err(|_| GameError::InvalidBoardShape)?;
    if column_count == 0
        || rows
            .iter()
            .any(|row| row.as_ref().len() != usize::from(column_count))
    {
        return Err(GameError::InvalidBoardShape);
    }
    Ok((row_count, column_count))
}

impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        Self(grid.cells.rows().into_iter().map(|row| row.to_vec()).collect())
    }
}

impl TryFrom<GridRows> for Grid {
    type Error = GameError;

    fn try_from(GridRows(rows): GridRows) -> Result<Self> {
        let (row_count, column_count) = checked_shape::<Vec<Cell>, Cell>(&rows)?;

        let mut grid = Self::new(GameConfig::new_unchecked(row_count, column_count));
        for (row, cells) in rows.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let coords = (row as Coord, column as Coord);
                if cell.coords() != coords {
                    return Err(GameError::InvalidCoords);
                }
                TileValue::try_from(cell.value.value())?;
                grid[coords] = *cell;
            }
        }

        Ok(grid)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, _) = self.size();
        for row in 0..rows {
            for (column, cell) in self.row(row).enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                match cell.value {
                    TileValue::Empty => write!(f, "{:>5}", ".")?,
                    TileValue::Tile(value) => write!(f, "{value:>5}")?,
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn new_grid_is_empty_with_fixed_coordinates() {
        let grid = Grid::new(GameConfig::new(2, 3));

        assert_eq!(grid.size(), (2, 3));
        assert_eq!(grid.empty_count(), 6);
        assert!(grid.can_spawn());
        assert_eq!(grid.cell_at((1, 2)), Cell::empty((1, 2)));
        for cell in grid.iter() {
            assert_eq!(grid[cell.coords()].coords(), cell.coords());
        }
    }

    #[test]
    fn from_values_validates_shape_and_values() {
        let ragged: &[&[Option<Value>]] = &[&[Some(2), None], &[None]];
        assert_eq!(Grid::from_values(ragged), Err(GameError::InvalidBoardShape));

        let no_rows: &[[Option<Value>; 2]] = &[];
        assert_eq!(Grid::from_values(no_rows), Err(GameError::InvalidBoardShape));

        assert_eq!(
            Grid::from_values(&[[Some(2), Some(3)]]),
            Err(GameError::InvalidTileValue(3))
        );

        let grid = Grid::from_values(&[[Some(2), None], [None, Some(8)]]).unwrap();
        assert_eq!(grid.row_values(1), vec![None, Some(8)]);
        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(grid.max_tile(), Some(8));
    }

    #[test]
    fn validate_coords_rejects_out_of_range() {
        let grid = Grid::new(GameConfig::default());

        assert_eq!(grid.validate_coords((3, 3)), Ok((3, 3)));
        assert_eq!(grid.validate_coords((4, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn get_checks_bounds() {
        let grid = Grid::from_values(&[[Some(2), None]]).unwrap();

        assert_eq!(grid.get((0, 0)).map(|cell| cell.value), Ok(TileValue::Tile(2)));
        assert_eq!(grid.get((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(grid.get((1, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn serializes_as_rows_of_cells() {
        let grid = Grid::from_values(&[[Some(2), None], [None, Some(8)]]).unwrap();

        let json = serde_json::to_value(&grid).unwrap();

        assert_eq!(json.as_array().map(|rows| rows.len()), Some(2));
        assert_eq!(json[0][0]["value"]["Tile"], 2);
        assert_eq!(json[1][0]["value"], "Empty");
        assert_eq!(json[1][1]["row"], 1);
        assert_eq!(json[1][1]["column"], 1);
        assert_eq!(serde_json::from_value::<Grid>(json).unwrap(), grid);
    }

    #[test]
    fn deserialize_rejects_inconsistent_grids() {
        use serde_json::{Value as Json, json};

        let empty = json!("Empty");
        let cell = |row: u32, column: u32, value: &Json| {
            json!({ "row": row, "column": column, "value": value, "just_merged": false })
        };

        let misplaced = json!([[cell(0, 0, &empty), cell(0, 0, &empty)]]);
        assert_eq!(
            serde_json::from_value::<Grid>(misplaced).unwrap_err().to_string(),
            GameError::InvalidCoords.to_string()
        );

        let ragged = json!([[cell(0, 0, &empty), cell(0, 1, &empty)], [cell(1, 0, &empty)]]);
        assert!(serde_json::from_value::<Grid>(ragged).is_err());

        let bad_tile = json!([[cell(0, 0, &json!({ "Tile": 6 }))]]);
        assert!(serde_json::from_value::<Grid>(bad_tile).is_err());

        assert!(serde_json::from_value::<Grid>(json!([])).is_err());

        let too_wide: Vec<Json> = (0..300).map(|column| cell(0, column, &empty)).collect();
        assert!(serde_json::from_value::<Grid>(json!([too_wide])).is_err());
    }

    #[test]
    fn spawn_uses_picked_empty_cell() {
        let mut grid = Grid::from_values(&[[Some(2), None], [None, Some(4)]]).unwrap();
        let mut source = ScriptedSpawner::new([1]);

        assert_eq!(grid.spawn(&mut source), Ok((1, 0)));
        assert_eq!(grid.cell_at((1, 0)).value, TileValue::Tile(2));
        assert_eq!(grid.cell_at((0, 1)).value, TileValue::Empty);
        assert_eq!(grid.tile_values(), vec![2, 2, 4]);
    }

    #[test]
    fn spawn_on_full_board_is_rejected() {
        let mut grid = Grid::from_values(&[[Some(2), Some(4)]]).unwrap();
        let before = grid.clone();

        assert_eq!(
            grid.spawn(&mut ScriptedSpawner::default()),
            Err(GameError::SpawnOnFullBoard)
        );
        assert!(!grid.can_spawn());
        assert_eq!(grid, before);
    }

    #[test]
    fn display_renders_rows() {
        let grid = Grid::from_values(&[[Some(2), None], [None, Some(1024)]]).unwrap();

        assert_eq!(grid.to_string(), "    2     .\n    .  1024\n");
    }
}
