use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod dfs;
mod prim;

pub use dfs::DfsCarver;
pub use prim::PrimCarver;

use crate::error::{MazeError, Result};
use crate::maze::{CellState, Grid, Position};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Randomized depth-first carving
    Rdfs,
    /// Randomized Prim carving
    Prim,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::Rdfs, Generator::Prim];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Rdfs => write!(f, "Randomized Depth-First Search (RDFS)"),
            Generator::Prim => write!(f, "Randomized Prim's Algorithm (RPA)"),
        }
    }
}

impl FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rdfs" | "dfs" => Ok(Generator::Rdfs),
            "rpa" | "prim" => Ok(Generator::Prim),
            _ => Err(MazeError::InvalidArgument(format!(
                "unknown generator: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Carver {
    Dfs(DfsCarver),
    Prim(PrimCarver),
}

/// A resumable maze generation run.
///
/// The generator owns the grid it carves until [`MazeGenerator::into_grid`] hands
/// it over. Each [`MazeGenerator::step`] does a bounded amount of work and reports
/// the cells it turned into passages.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R> {
    kind: Generator,
    grid: Grid,
    rng: R,
    origin: Position,
    carver: Carver,
    steps: usize,
}

impl<R: Rng> MazeGenerator<R> {
    /// Starts a run from a random odd-coordinate origin.
    ///
    /// Height and width must be odd and at least 3.
    pub fn new(kind: Generator, height: usize, width: usize, mut rng: R) -> Result<Self> {
        check_dimensions(height, width)?;
        let origin = Position::new(
            2 * rng.random_range(0..(height - 1) / 2) + 1,
            2 * rng.random_range(0..(width - 1) / 2) + 1,
        );
        Self::with_origin(kind, height, width, origin, rng)
    }

    pub fn rdfs(height: usize, width: usize, rng: R) -> Result<Self> {
        Self::new(Generator::Rdfs, height, width, rng)
    }

    pub fn prim(height: usize, width: usize, rng: R) -> Result<Self> {
        Self::new(Generator::Prim, height, width, rng)
    }

    /// Starts a run carving from the given odd-coordinate origin.
    pub fn with_origin(
        kind: Generator,
        height: usize,
        width: usize,
        origin: Position,
        rng: R,
    ) -> Result<Self> {
        check_dimensions(height, width)?;
        let mut grid = Grid::new(height, width)?;
        if !grid.in_bounds(origin) || grid.is_boundary(origin) || !origin.is_odd() {
            return Err(MazeError::InvalidArgument(format!(
                "carving origin {} must be an odd interior cell",
                origin
            )));
        }
        grid.set(origin, CellState::Passage)?;

        let carver = match kind {
            Generator::Rdfs => Carver::Dfs(DfsCarver::new(origin)),
            Generator::Prim => Carver::Prim(PrimCarver::new(&grid, origin)),
        };
        tracing::debug!(
            "[generator] {} started on {}x{} grid from {}",
            kind,
            height,
            width,
            origin
        );
        Ok(MazeGenerator {
            kind,
            grid,
            rng,
            origin,
            carver,
            steps: 0,
        })
    }

    pub fn kind(&self) -> Generator {
        self.kind
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Hand the carved grid over, typically to a solver.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The first cell carved in this run.
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Number of `step` calls that did work before the run finished.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Size of the carving stack (RDFS) or the frontier wall set (RPA).
    pub fn frontier_len(&self) -> usize {
        match &self.carver {
            Carver::Dfs(c) => c.frontier_len(),
            Carver::Prim(c) => c.frontier_len(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.carver {
            Carver::Dfs(c) => c.is_finished(),
            Carver::Prim(c) => c.is_finished(),
        }
    }

    /// Advance the run by one unit of work.
    ///
    /// Returns the cells touched by this step, or `None` if nothing was carved
    /// (a backtrack, a dropped wall, or a finished run).
    pub fn step(&mut self) -> Result<Option<Vec<Position>>> {
        if self.is_finished() {
            return Ok(None);
        }
        self.steps += 1;
        let changed = match &mut self.carver {
            Carver::Dfs(c) => c.step(&mut self.grid, &mut self.rng)?,
            Carver::Prim(c) => c.step(&mut self.grid, &mut self.rng)?,
        };
        if self.is_finished() {
            tracing::debug!(
                "[generator] {} finished after {} steps, {} passages",
                self.kind,
                self.steps,
                self.grid.passage_count()
            );
        }
        Ok(changed)
    }

    /// Step until the run is finished. Returns every carved cell in order.
    pub fn run(&mut self) -> Result<Vec<Position>> {
        let mut carved = Vec::new();
        while !self.is_finished() {
            if let Some(cells) = self.step()? {
                carved.extend(cells);
            }
        }
        Ok(carved)
    }

    fn ensure_finished(&self, operation: &str) -> Result<()> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(MazeError::InvalidState(format!(
                "cannot {} before the maze is fully carved",
                operation
            )))
        }
    }

    /// Pick two distinct odd-coordinate passages as start and finish.
    pub fn randomize_start_and_finish(&mut self) -> Result<(Position, Position)> {
        self.ensure_finished("place start and finish")?;
        let candidates = self
            .grid
            .cells()
            .filter(|(p, cell)| p.is_odd() && cell.is_passage())
            .map(|(p, _)| p)
            .collect::<Vec<_>>();
        if candidates.len() < 2 {
            return Err(MazeError::InvalidState(format!(
                "need at least two passages to place start and finish, found {}",
                candidates.len()
            )));
        }

        let first = self.rng.random_range(0..candidates.len());
        let mut second = self.rng.random_range(0..candidates.len() - 1);
        if second >= first {
            second += 1;
        }
        let (start, finish) = (candidates[first], candidates[second]);
        self.grid.set_start(start)?;
        self.grid.set_finish(finish)?;
        tracing::debug!("[generator] start {} finish {}", start, finish);
        Ok((start, finish))
    }

    /// Turn every interior wall into a passage with probability `chance`,
    /// reintroducing cycles. Returns the converted cells.
    pub fn loopify(&mut self, chance: f64) -> Result<Vec<Position>> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(MazeError::InvalidArgument(format!(
                "loop chance must be between 0 and 1, got {}",
                chance
            )));
        }
        self.ensure_finished("add loops")?;

        let mut converted = Vec::new();
        for row in 1..self.grid.height() - 1 {
            for col in 1..self.grid.width() - 1 {
                let position = Position::new(row, col);
                if self.grid[position].is_wall() && self.rng.random::<f64>() < chance {
                    self.grid.set(position, CellState::Passage)?;
                    converted.push(position);
                }
            }
        }
        tracing::debug!(
            "[generator] loopify({}) opened {} walls",
            chance,
            converted.len()
        );
        Ok(converted)
    }
}

fn check_dimensions(height: usize, width: usize) -> Result<()> {
    if height < 3 || width < 3 || height % 2 == 0 || width % 2 == 0 {
        return Err(MazeError::InvalidArgument(format!(
            "maze height and width must be odd and at least 3, got {}x{}",
            height, width
        )));
    }
    Ok(())
}
