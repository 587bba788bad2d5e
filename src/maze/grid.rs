use crate::error::{MazeError, Result};

use super::{CellState, Position};

/// Rectangular grid of cell states with optional start and finish cells.
///
/// Height and width are fixed at construction. At most one cell holds
/// [`CellState::Start`] and at most one holds [`CellState::Finish`]; [`Grid::set`]
/// keeps the recorded positions in sync with the cell data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[CellState]>,
    height: usize,
    width: usize,
    start: Option<Position>,
    finish: Option<Position>,
}

impl Grid {
    /// Creates a grid filled with walls.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidArgument(format!(
                "grid dimensions must be non-zero, got {}x{}",
                height, width
            )));
        }
        let Some(len) = height.checked_mul(width) else {
            return Err(MazeError::InvalidArgument(format!(
                "grid dimensions {}x{} are too large",
                height, width
            )));
        };
        Ok(Grid {
            data: vec![CellState::Wall; len].into_boxed_slice(),
            height,
            width,
            start: None,
            finish: None,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn finish(&self) -> Option<Position> {
        self.finish
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.row < self.height && position.col < self.width
    }

    /// Whether the position lies on the outermost ring of the grid.
    pub fn is_boundary(&self, position: Position) -> bool {
        position.row == 0
            || position.col == 0
            || position.row == self.height - 1
            || position.col == self.width - 1
    }

    fn ravel_index(&self, position: Position) -> usize {
        position.row * self.width + position.col
    }

    fn checked_index(&self, position: Position) -> Result<usize> {
        if self.in_bounds(position) {
            Ok(self.ravel_index(position))
        } else {
            Err(MazeError::OutOfBounds {
                position,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn get(&self, position: Position) -> Result<CellState> {
        Ok(self.data[self.checked_index(position)?])
    }

    /// Sets the state of a cell.
    ///
    /// Setting `Start` (or `Finish`) moves the designation: the previous start
    /// (finish) cell reverts to a passage. Overwriting the start (finish) cell with
    /// any other state clears the designation.
    pub fn set(&mut self, position: Position, state: CellState) -> Result<()> {
        let idx = self.checked_index(position)?;
        let old = self.data[idx];
        if old == state {
            return Ok(());
        }
        match old {
            CellState::Start => self.start = None,
            CellState::Finish => self.finish = None,
            _ => {}
        }
        let previous = match state {
            CellState::Start => self.start.replace(position),
            CellState::Finish => self.finish.replace(position),
            _ => None,
        };
        if let Some(previous) = previous {
            let prev_idx = self.ravel_index(previous);
            self.data[prev_idx] = CellState::Passage;
        }
        self.data[idx] = state;
        Ok(())
    }

    pub fn set_start(&mut self, position: Position) -> Result<()> {
        self.set(position, CellState::Start)
    }

    pub fn set_finish(&mut self, position: Position) -> Result<()> {
        self.set(position, CellState::Finish)
    }

    pub fn is_wall(&self, position: Position) -> Result<bool> {
        Ok(self.get(position)?.is_wall())
    }

    pub fn is_passage(&self, position: Position) -> Result<bool> {
        Ok(self.get(position)?.is_passage())
    }

    /// Get the in-bounds positions `d` cells away in the four cardinal directions,
    /// in the order down, up, right, left.
    ///
    /// Yields nothing for an out-of-bounds `position` or `d == 0`.
    pub fn neighbors_at_distance(
        &self,
        position: Position,
        d: usize,
    ) -> impl Iterator<Item = Position> + '_ {
        let candidates = if d > 0 && self.in_bounds(position) {
            let d = d as isize;
            vec![
                position.offset(d, 0),
                position.offset(-d, 0),
                position.offset(0, d),
                position.offset(0, -d),
            ]
        } else {
            Vec::new()
        };
        candidates
            .into_iter()
            .flatten()
            .filter(move |&p| self.in_bounds(p))
    }

    /// Neighbors at distance `d` that are still walls.
    pub fn walls_at_distance(&self, position: Position, d: usize) -> Vec<Position> {
        self.neighbors_at_distance(position, d)
            .filter(|&p| self[p].is_wall())
            .collect()
    }

    /// Neighbors at distance `d` that can be walked through.
    pub fn passages_at_distance(&self, position: Position, d: usize) -> Vec<Position> {
        self.neighbors_at_distance(position, d)
            .filter(|&p| self[p].is_passage())
            .collect()
    }

    /// The cell lying directly between two cells two units apart along one axis.
    pub fn midpoint(a: Position, b: Position) -> Result<Position> {
        let d_row = a.row.abs_diff(b.row);
        let d_col = a.col.abs_diff(b.col);
        match (d_row, d_col) {
            (2, 0) => Ok(Position::new(a.row.max(b.row) - 1, a.col)),
            (0, 2) => Ok(Position::new(a.row, a.col.max(b.col) - 1)),
            _ => Err(MazeError::InvalidArgument(format!(
                "{} and {} are not two cells apart along one axis",
                a, b
            ))),
        }
    }

    /// Reflects `cell` through `neighbor`, i.e. the position on the far side of
    /// `neighbor` at the same distance. `None` when that would be negative or
    /// beyond `usize`.
    pub fn opposite(cell: Position, neighbor: Position) -> Option<Position> {
        let row = neighbor.row.checked_mul(2)?.checked_sub(cell.row)?;
        let col = neighbor.col.checked_mul(2)?.checked_sub(cell.col)?;
        Some(Position::new(row, col))
    }

    /// Iterate over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Iterate over every cell with its position in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.positions().map(move |p| (p, self[p]))
    }

    /// Number of cells that are not walls.
    pub fn passage_count(&self) -> usize {
        self.data.iter().filter(|cell| cell.is_passage()).count()
    }
}

/// Panics if the position is out of bounds, like slice indexing does.
/// Use [`Grid::get`] for a checked lookup.
impl std::ops::Index<Position> for Grid {
    type Output = CellState;

    fn index(&self, index: Position) -> &Self::Output {
        assert!(
            self.in_bounds(index),
            "position {} is outside the {}x{} grid",
            index,
            self.height,
            self.width
        );
        &self.data[self.ravel_index(index)]
    }
}
