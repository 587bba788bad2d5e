use std::collections::HashSet;

use super::{Progress, SearchContext};
use crate::maze::Position;

/// Depth-first search with an explicit stack. Finds a path, not the shortest one.
pub(super) struct DepthFirst {
    stack: Vec<Position>,
    explored: HashSet<Position>,
}

impl DepthFirst {
    pub(super) fn new(context: &mut SearchContext) -> Self {
        context.nodes_expanded = 1;
        DepthFirst {
            stack: vec![context.start],
            explored: HashSet::from([context.start]),
        }
    }

    pub(super) fn step(&mut self, context: &mut SearchContext) -> Progress {
        let Some(cell) = self.stack.pop() else {
            return Progress::Exhausted;
        };
        if cell == context.finish {
            return Progress::Found(Vec::new());
        }

        let mut added = Vec::new();
        for neighbor in context.grid.passages_at_distance(cell, 1) {
            // Cells are marked explored when pushed, so each enters the stack once
            if self.explored.insert(neighbor) {
                context.discover(neighbor, cell);
                self.stack.push(neighbor);
                added.push(neighbor);
            }
        }
        Progress::Frontier(added)
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Position;
    use crate::solvers::{Heuristic, MazeSolver, Solver, tests::parse};

    #[test]
    fn test_dfs_step_reports_pushed_neighbors() {
        let grid = parse("%%%%%\n%S  %\n% %F%\n%%%%%\n");
        let mut search = MazeSolver::dfs(&grid).unwrap();
        assert_eq!(search.nodes_expanded(), 1);

        let added = search.step().unwrap();
        assert_eq!(added, vec![Position::new(2, 1), Position::new(1, 2)]);
        assert_eq!(search.nodes_expanded(), 3);

        // The last pushed cell is expanded next
        let added = search.step().unwrap();
        assert_eq!(added, vec![Position::new(1, 3)]);
    }

    #[test]
    fn test_dfs_follows_the_corridor() {
        let grid = parse("%%%%%%%\n%S    %\n%%%%% %\n%F    %\n%%%%%%%\n");
        let report = MazeSolver::new(&grid, Solver::Dfs, Heuristic::default())
            .unwrap()
            .run();
        assert_eq!(report.solution_cost, 10);
        assert_eq!(report.solution.last(), Some(&Position::new(3, 1)));
    }
}
