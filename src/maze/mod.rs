pub mod cell;
pub mod grid;
pub mod text;

use std::fmt;

pub use cell::CellState;
pub use grid::Grid;
pub use text::Charset;

/// A (row, column) coordinate in a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Whether both coordinates are odd, i.e. the cell sits on the carving lattice.
    pub fn is_odd(&self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }

    /// Offset the position by a signed delta.
    /// Returns `None` when either coordinate would go below zero.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_underflow() {
        let p = Position::new(0, 3);
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(2, -2), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_is_odd() {
        assert!(Position::new(1, 3).is_odd());
        assert!(!Position::new(1, 2).is_odd());
        assert!(!Position::new(0, 0).is_odd());
    }
}
