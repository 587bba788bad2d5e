use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::error::Result;
use crate::maze::{CellState, Grid, Position};

/// Randomized Prim carving over a frontier of walls bordering the carved region.
#[derive(Debug, Clone)]
pub struct PrimCarver {
    /// Frontier walls, indexed for uniform random removal
    frontier: Vec<Position>,
    /// Membership of `frontier`, so a wall is never queued twice
    members: HashSet<Position>,
}

impl PrimCarver {
    /// `origin` must already be carved into a passage.
    pub fn new(grid: &Grid, origin: Position) -> Self {
        let frontier = grid.walls_at_distance(origin, 2);
        let members = frontier.iter().copied().collect();
        PrimCarver { frontier, members }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Pull a random frontier wall and try to connect it to the carved region.
    ///
    /// A passage neighbor `n` only qualifies if the cell beyond `n`, seen from the
    /// wall, is out of bounds or still a wall. This thins out short loops but does
    /// not rule them out. A wall with no qualifying neighbor is dropped; it comes
    /// back if one of its other neighbors gets carved later.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Option<Vec<Position>>> {
        if self.frontier.is_empty() {
            return Ok(None);
        }
        let idx = rng.random_range(0..self.frontier.len());
        let wall = self.frontier.swap_remove(idx);
        self.members.remove(&wall);

        let mut neighbors = grid.passages_at_distance(wall, 2);
        neighbors.shuffle(rng);
        for neighbor in neighbors {
            let beyond_is_closed = match Grid::opposite(wall, neighbor) {
                Some(beyond) if grid.in_bounds(beyond) => grid[beyond].is_wall(),
                _ => true,
            };
            if !beyond_is_closed {
                continue;
            }

            let middle = Grid::midpoint(wall, neighbor)?;
            grid.set(wall, CellState::Passage)?;
            grid.set(middle, CellState::Passage)?;
            for exposed in grid.walls_at_distance(wall, 2) {
                if self.members.insert(exposed) {
                    self.frontier.push(exposed);
                }
            }
            return Ok(Some(vec![wall, middle, neighbor]));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_initial_frontier() {
        let origin = Position::new(3, 3);
        let mut grid = Grid::new(7, 7).unwrap();
        grid.set(origin, CellState::Passage).unwrap();
        let carver = PrimCarver::new(&grid, origin);
        assert_eq!(carver.frontier_len(), 4);
    }

    #[test]
    fn test_step_connects_to_origin() {
        let origin = Position::new(3, 3);
        let mut grid = Grid::new(7, 7).unwrap();
        grid.set(origin, CellState::Passage).unwrap();
        let mut carver = PrimCarver::new(&grid, origin);
        let mut rng = StdRng::seed_from_u64(9);

        let changed = carver.step(&mut grid, &mut rng).unwrap().unwrap();
        assert_eq!(changed.len(), 3);
        let (wall, middle, neighbor) = (changed[0], changed[1], changed[2]);
        assert_eq!(neighbor, origin);
        assert_eq!(Grid::midpoint(wall, origin).unwrap(), middle);
        assert_eq!(grid[wall], CellState::Passage);
        assert_eq!(grid[middle], CellState::Passage);
        // Three untouched walls around the origin plus the ones exposed by `wall`
        let exposed = grid.walls_at_distance(wall, 2).len();
        assert_eq!(carver.frontier_len(), 3 + exposed);
    }

    #[test]
    fn test_wall_with_open_far_side_is_dropped() {
        // (1,3) is carved and so is (1,5); the wall (1,1) would extend that line
        let mut grid = Grid::new(3, 7).unwrap();
        grid.set(Position::new(1, 3), CellState::Passage).unwrap();
        grid.set(Position::new(1, 5), CellState::Passage).unwrap();
        let mut carver = PrimCarver {
            frontier: vec![Position::new(1, 1)],
            members: HashSet::from([Position::new(1, 1)]),
        };
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(carver.step(&mut grid, &mut rng).unwrap(), None);
        assert_eq!(grid[Position::new(1, 1)], CellState::Wall);
        assert!(carver.is_finished());
    }

    #[test]
    fn test_no_duplicate_frontier_entries() {
        let origin = Position::new(1, 1);
        let mut grid = Grid::new(11, 11).unwrap();
        grid.set(origin, CellState::Passage).unwrap();
        let mut carver = PrimCarver::new(&grid, origin);
        let mut rng = StdRng::seed_from_u64(5);
        while !carver.is_finished() {
            carver.step(&mut grid, &mut rng).unwrap();
            assert_eq!(carver.frontier.len(), carver.members.len());
            assert!(carver.frontier.iter().all(|&p| grid[p].is_wall()));
        }
    }
}
