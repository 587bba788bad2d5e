use std::{
    fmt,
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{CellState, Grid, Position};

/// How a cell is drawn on the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Wall,
    Passage,
    Start,
    Finish,
    /// A cell a solver has put on its frontier
    Visited,
    /// A cell on the solution path
    Route,
}

impl Glyph {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl From<CellState> for Glyph {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Wall => Glyph::Wall,
            CellState::Passage => Glyph::Passage,
            CellState::Start => Glyph::Start,
            CellState::Finish => Glyph::Finish,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Passage => "  ".with(Color::Reset),
            Glyph::Start => "🟩".with(Color::Green),
            Glyph::Finish => "🟥".with(Color::Red),
            Glyph::Visited => "* ".with(Color::Blue),
            Glyph::Route => "🟨".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Draws a grid and incremental cell updates to the terminal.
///
/// The renderer knows nothing about the algorithms; it only draws the positions
/// it is handed.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Current grid dimensions (height, width) in cells
    grid_dims: Option<(u16, u16)>,
    /// Time to wait after each drawn step
    render_refresh_time: Duration,
}

impl Renderer {
    pub fn new(render_refresh_time: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_dims: None,
            render_refresh_time,
        }
    }

    /// Check if the terminal is large enough for a grid, leaving one line for status.
    pub fn fits(height: usize, width: usize) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = width.saturating_mul(Glyph::CELL_WIDTH as usize);
        Ok(needed_width <= term_width as usize && height < term_height as usize)
    }

    /// Clear the screen and draw every cell of the grid.
    pub fn draw_grid(&mut self, grid: &Grid) -> std::io::Result<()> {
        let height = u16::try_from(grid.height()).unwrap_or(u16::MAX);
        let width = u16::try_from(grid.width()).unwrap_or(u16::MAX);
        self.grid_dims = Some((height, width));

        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let glyph = Glyph::from(grid[Position::new(row, col)]);
                self.stdout.queue(style::Print(glyph))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.stdout.flush()
    }

    /// Redraw only the given cells.
    pub fn draw_cells(
        &mut self,
        cells: impl IntoIterator<Item = (Position, Glyph)>,
    ) -> std::io::Result<()> {
        // Skip if the grid has not been drawn yet
        if self.grid_dims.is_none() {
            return Ok(());
        }
        for (position, glyph) in cells {
            let (Ok(row), Ok(col)) = (u16::try_from(position.row), u16::try_from(position.col))
            else {
                continue;
            };
            queue!(
                self.stdout,
                cursor::MoveTo(col.saturating_mul(Glyph::CELL_WIDTH), row),
                style::Print(glyph)
            )?;
        }
        self.stdout.flush()
    }

    /// Wait between steps so the animation is visible.
    pub fn pause(&self) {
        if !self.render_refresh_time.is_zero() {
            std::thread::sleep(self.render_refresh_time);
        }
    }

    /// Print a status line just below the grid.
    pub fn status(&mut self, message: &str) -> std::io::Result<()> {
        let row = self.grid_dims.map_or(0, |(height, _)| height);
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(
                message
                    .with(Color::Green)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()
    }
}
