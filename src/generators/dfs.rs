use rand::Rng;

use crate::error::Result;
use crate::maze::{CellState, Grid, Position};

/// Randomized depth-first carving with an explicit backtracking stack.
///
/// The stack only ever holds passage cells.
#[derive(Debug, Clone)]
pub struct DfsCarver {
    stack: Vec<Position>,
}

impl DfsCarver {
    /// `origin` must already be carved into a passage.
    pub fn new(origin: Position) -> Self {
        DfsCarver {
            stack: vec![origin],
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Carve one cell out of the top of the stack, or backtrack if it is a dead end.
    /// Returns the midpoint and the newly carved cell, or `None` on backtrack.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Option<Vec<Position>>> {
        let Some(&cell) = self.stack.last() else {
            return Ok(None);
        };

        let neighbors = grid.walls_at_distance(cell, 2);
        if neighbors.is_empty() {
            // Dead end, look at the previous cell next time
            self.stack.pop();
            return Ok(None);
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        let middle = Grid::midpoint(cell, neighbor)?;
        grid.set(neighbor, CellState::Passage)?;
        grid.set(middle, CellState::Passage)?;
        // Keep carving in the neighbor's direction
        self.stack.push(neighbor);
        Ok(Some(vec![middle, neighbor]))
    }
}
