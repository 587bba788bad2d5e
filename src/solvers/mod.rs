use std::collections::HashMap;
use std::str::FromStr;

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
pub mod frontier;
pub mod heuristic;

use bfs::BreadthFirst;
use dfs::DepthFirst;
use dijkstra::CostSearch;
pub use frontier::PriorityFrontier;
pub use heuristic::Heuristic;

use crate::error::{MazeError, Result};
use crate::maze::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    UniformCost,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 4] = [Solver::Dfs, Solver::Bfs, Solver::UniformCost, Solver::AStar];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::UniformCost => write!(f, "Uniform-Cost Search (UCS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth" => Ok(Solver::Dfs),
            "bfs" | "breadth" => Ok(Solver::Bfs),
            "ucs" | "uniform" | "dijkstra" => Ok(Solver::UniformCost),
            "astar" | "a*" => Ok(Solver::AStar),
            _ => Err(MazeError::InvalidArgument(format!("unknown solver: {}", s))),
        }
    }
}

/// Bookkeeping shared by every search: the read-only grid, the endpoints and
/// the parent links used to rebuild the path.
struct SearchContext<'a> {
    grid: &'a Grid,
    start: Position,
    finish: Position,
    parent: HashMap<Position, Position>,
    nodes_expanded: usize,
}

impl SearchContext<'_> {
    /// Record that `cell` was reached from `from`.
    fn discover(&mut self, cell: Position, from: Position) {
        self.parent.insert(cell, from);
        self.nodes_expanded += 1;
    }
}

/// Outcome of a single search step.
enum Progress {
    /// Cells added to the frontier this step
    Frontier(Vec<Position>),
    /// The finish was reached; carries the cells added on the way
    Found(Vec<Position>),
    /// Nothing left to explore
    Exhausted,
}

enum Strategy {
    Dfs(DepthFirst),
    Bfs(BreadthFirst),
    Cost(CostSearch),
}

/// Walk parent links back from `finish` to, but excluding, `start`.
/// The returned path runs from the first move to `finish`.
pub fn backtrack(
    parent: &HashMap<Position, Position>,
    start: Position,
    finish: Position,
) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = finish;
    while current != start {
        path.push(current);
        match parent.get(&current) {
            Some(&previous) => current = previous,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Summary of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub solver: Solver,
    pub solution: Vec<Position>,
    pub solution_cost: usize,
    pub nodes_expanded: usize,
    pub steps: usize,
}

/// A resumable search over a carved grid.
///
/// The solver only reads the grid; all frontier, explored and cost bookkeeping
/// is private to the run.
pub struct MazeSolver<'a> {
    kind: Solver,
    context: SearchContext<'a>,
    strategy: Strategy,
    solution: Vec<Position>,
    finished: bool,
    steps: usize,
}

impl<'a> MazeSolver<'a> {
    /// Search between the grid's start and finish cells.
    ///
    /// `heuristic` is only used by [`Solver::AStar`].
    pub fn new(grid: &'a Grid, kind: Solver, heuristic: Heuristic) -> Result<Self> {
        let start = grid
            .start()
            .ok_or_else(|| MazeError::InvalidState("maze has no start cell".to_string()))?;
        let finish = grid
            .finish()
            .ok_or_else(|| MazeError::InvalidState("maze has no finish cell".to_string()))?;
        Self::with_endpoints(grid, kind, heuristic, start, finish)
    }

    /// Search between explicit endpoints instead of the grid's own.
    ///
    /// Both endpoints must be in bounds and not walls.
    pub fn with_endpoints(
        grid: &'a Grid,
        kind: Solver,
        heuristic: Heuristic,
        start: Position,
        finish: Position,
    ) -> Result<Self> {
        for position in [start, finish] {
            if !grid.in_bounds(position) {
                return Err(MazeError::OutOfBounds {
                    position,
                    height: grid.height(),
                    width: grid.width(),
                });
            }
            if grid[position].is_wall() {
                return Err(MazeError::InvalidArgument(format!(
                    "search endpoint {} is a wall",
                    position
                )));
            }
        }

        let mut context = SearchContext {
            grid,
            start,
            finish,
            parent: HashMap::new(),
            nodes_expanded: 0,
        };
        let strategy = match kind {
            Solver::Dfs => Strategy::Dfs(DepthFirst::new(&mut context)),
            Solver::Bfs => Strategy::Bfs(BreadthFirst::new(&mut context)),
            Solver::UniformCost => Strategy::Cost(CostSearch::uniform_cost(&mut context)),
            Solver::AStar => Strategy::Cost(CostSearch::astar(&mut context, heuristic)),
        };
        let finished = start == finish;
        tracing::debug!(
            "[solver] {} from {} to {}{}",
            kind,
            start,
            finish,
            if finished { " (already there)" } else { "" }
        );
        Ok(MazeSolver {
            kind,
            context,
            strategy,
            solution: Vec::new(),
            finished,
            steps: 0,
        })
    }

    pub fn dfs(grid: &'a Grid) -> Result<Self> {
        Self::new(grid, Solver::Dfs, Heuristic::default())
    }

    pub fn bfs(grid: &'a Grid) -> Result<Self> {
        Self::new(grid, Solver::Bfs, Heuristic::default())
    }

    pub fn uniform_cost(grid: &'a Grid) -> Result<Self> {
        Self::new(grid, Solver::UniformCost, Heuristic::default())
    }

    pub fn astar(grid: &'a Grid, heuristic: Heuristic) -> Result<Self> {
        Self::new(grid, Solver::AStar, heuristic)
    }

    pub fn kind(&self) -> Solver {
        self.kind
    }

    pub fn start(&self) -> Position {
        self.context.start
    }

    pub fn finish(&self) -> Position {
        self.context.finish
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Path from the first move to the finish; empty until found or if unreachable.
    pub fn solution(&self) -> &[Position] {
        &self.solution
    }

    /// Every move costs 1, so this is the number of moves on the solution path.
    pub fn solution_cost(&self) -> usize {
        self.solution.len()
    }

    pub fn nodes_expanded(&self) -> usize {
        self.context.nodes_expanded
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Advance the search by one frontier expansion.
    ///
    /// Returns the cells added to the frontier, or `None` if there were none or
    /// the search is already finished.
    pub fn step(&mut self) -> Option<Vec<Position>> {
        if self.finished {
            return None;
        }
        self.steps += 1;
        let progress = match &mut self.strategy {
            Strategy::Dfs(s) => s.step(&mut self.context),
            Strategy::Bfs(s) => s.step(&mut self.context),
            Strategy::Cost(s) => s.step(&mut self.context),
        };
        let changed = match progress {
            Progress::Frontier(cells) => cells,
            Progress::Found(cells) => {
                self.solution = backtrack(
                    &self.context.parent,
                    self.context.start,
                    self.context.finish,
                );
                self.finished = true;
                tracing::debug!(
                    "[solver] {} reached the finish: cost {}, {} nodes expanded",
                    self.kind,
                    self.solution_cost(),
                    self.context.nodes_expanded
                );
                cells
            }
            Progress::Exhausted => {
                self.finished = true;
                tracing::debug!(
                    "[solver] {} exhausted the frontier, no path after {} nodes",
                    self.kind,
                    self.context.nodes_expanded
                );
                Vec::new()
            }
        };
        (!changed.is_empty()).then_some(changed)
    }

    /// Step until finished.
    pub fn run(&mut self) -> SearchReport {
        while !self.finished {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> SearchReport {
        SearchReport {
            solver: self.kind,
            solution: self.solution.clone(),
            solution_cost: self.solution_cost(),
            nodes_expanded: self.context.nodes_expanded,
            steps: self.steps,
        }
    }
}
