use std::collections::{HashSet, VecDeque};

use super::{Progress, SearchContext};
use crate::maze::Position;

/// Breadth-first search over a FIFO queue. Shortest path by number of moves.
pub(super) struct BreadthFirst {
    queue: VecDeque<Position>,
    explored: HashSet<Position>,
}

impl BreadthFirst {
    pub(super) fn new(context: &mut SearchContext) -> Self {
        BreadthFirst {
            queue: VecDeque::from([context.start]),
            explored: HashSet::new(),
        }
    }

    pub(super) fn step(&mut self, context: &mut SearchContext) -> Progress {
        let Some(cell) = self.queue.pop_front() else {
            return Progress::Exhausted;
        };
        self.explored.insert(cell);

        let mut added = Vec::new();
        for neighbor in context.grid.passages_at_distance(cell, 1) {
            if !self.explored.insert(neighbor) {
                continue;
            }
            added.push(neighbor);
            context.discover(neighbor, cell);
            // Stop as soon as the finish is seen, without waiting for it to be dequeued
            if neighbor == context.finish {
                return Progress::Found(added);
            }
            self.queue.push_back(neighbor);
        }
        Progress::Frontier(added)
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Position;
    use crate::solvers::{MazeSolver, tests::parse};

    #[test]
    fn test_bfs_finishes_on_discovery() {
        let grid = parse("%%%%%\n%SF %\n%%%%%\n");
        let mut search = MazeSolver::bfs(&grid).unwrap();
        assert_eq!(search.nodes_expanded(), 0);
        let added = search.step().unwrap();
        assert_eq!(added, vec![Position::new(1, 2)]);
        assert!(search.is_finished());
        assert_eq!(search.solution(), &[Position::new(1, 2)]);
        assert_eq!(search.solution_cost(), 1);
        assert_eq!(search.nodes_expanded(), 1);
    }

    #[test]
    fn test_bfs_prefers_the_short_way_round() {
        // Two routes around the central block; the upper one is shorter
        let grid = parse(
            "\
%%%%%%%
%S   F%
% %%% %
%     %
%%%%%%%
",
        );
        let report = MazeSolver::bfs(&grid).unwrap().run();
        assert_eq!(report.solution_cost, 4);
        assert_eq!(
            report.solution,
            vec![
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(1, 4),
                Position::new(1, 5)
            ]
        );
    }
}
