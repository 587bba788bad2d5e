use std::path::Path;

use crate::error::{MazeError, Result};

use super::{CellState, Grid, Position};

/// Characters used for each cell state in the flat text format.
///
/// One character per column, one line per row, every row terminated by a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    wall: char,
    passage: char,
    start: char,
    finish: char,
}

impl Default for Charset {
    fn default() -> Self {
        Charset {
            wall: '%',
            passage: ' ',
            start: 'S',
            finish: 'F',
        }
    }
}

impl Charset {
    /// Fails if two states share a character or a line break is used.
    pub fn new(wall: char, passage: char, start: char, finish: char) -> Result<Self> {
        let symbols = [wall, passage, start, finish];
        if symbols.iter().any(|&c| c == '\n' || c == '\r') {
            return Err(MazeError::InvalidArgument(
                "line breaks cannot be used as cell characters".to_string(),
            ));
        }
        for (i, a) in symbols.iter().enumerate() {
            if symbols[i + 1..].contains(a) {
                return Err(MazeError::InvalidArgument(format!(
                    "character {:?} is assigned to more than one cell state",
                    a
                )));
            }
        }
        Ok(Charset {
            wall,
            passage,
            start,
            finish,
        })
    }

    pub fn symbol(&self, state: CellState) -> char {
        match state {
            CellState::Wall => self.wall,
            CellState::Passage => self.passage,
            CellState::Start => self.start,
            CellState::Finish => self.finish,
        }
    }

    pub fn state_of(&self, symbol: char) -> Option<CellState> {
        match symbol {
            c if c == self.wall => Some(CellState::Wall),
            c if c == self.passage => Some(CellState::Passage),
            c if c == self.start => Some(CellState::Start),
            c if c == self.finish => Some(CellState::Finish),
            _ => None,
        }
    }
}

impl Grid {
    /// Parses a grid from the text format. Height and width are taken from the
    /// number of lines and the length of the first line.
    pub fn from_text(text: &str, charset: &Charset) -> Result<Grid> {
        let lines = text.lines().collect::<Vec<_>>();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width == 0 {
            return Err(MazeError::InvalidFormat {
                line: 1,
                column: 1,
                reason: "empty maze".to_string(),
            });
        }

        let mut grid = Grid::new(lines.len(), width)?;
        for (row, line) in lines.iter().enumerate() {
            let mut columns = 0;
            for (col, symbol) in line.chars().enumerate() {
                let format_error = |reason: String| MazeError::InvalidFormat {
                    line: row + 1,
                    column: col + 1,
                    reason,
                };
                if col >= width {
                    return Err(format_error(format!("row is longer than {} columns", width)));
                }
                let state = charset
                    .state_of(symbol)
                    .ok_or_else(|| format_error(format!("unrecognized character {:?}", symbol)))?;
                let position = Position::new(row, col);
                match state {
                    CellState::Start if grid.start().is_some() => {
                        return Err(format_error("more than one start cell".to_string()));
                    }
                    CellState::Finish if grid.finish().is_some() => {
                        return Err(format_error("more than one finish cell".to_string()));
                    }
                    _ => grid.set(position, state)?,
                }
                columns += 1;
            }
            if columns != width {
                return Err(MazeError::InvalidFormat {
                    line: row + 1,
                    column: columns + 1,
                    reason: format!("row has {} columns, expected {}", columns, width),
                });
            }
        }
        Ok(grid)
    }

    /// Renders the grid in the text format, one newline-terminated line per row.
    pub fn to_text(&self, charset: &Charset) -> String {
        let mut output = String::with_capacity(self.height() * (self.width() + 1));
        for row in 0..self.height() {
            for col in 0..self.width() {
                output.push(charset.symbol(self[Position::new(row, col)]));
            }
            output.push('\n');
        }
        output
    }

    pub fn load(path: impl AsRef<Path>, charset: &Charset) -> Result<Grid> {
        let text = std::fs::read_to_string(path)?;
        Grid::from_text(&text, charset)
    }

    pub fn save(&self, path: impl AsRef<Path>, charset: &Charset) -> Result<()> {
        std::fs::write(path, self.to_text(charset))?;
        Ok(())
    }
}
