use std::collections::{HashMap, HashSet};

use super::{Heuristic, PriorityFrontier, Progress, SearchContext};
use crate::maze::Position;

/// Best-first search over a priority frontier, keyed by path cost plus an
/// optional heuristic estimate. Without a heuristic this is uniform-cost search.
pub(super) struct CostSearch {
    frontier: PriorityFrontier<Position>,
    /// Cheapest known cost from the start to each reached cell
    costs: HashMap<Position, usize>,
    /// Cells already popped and expanded; their cost is final
    pub(super) closed: HashSet<Position>,
    heuristic: Option<Heuristic>,
}

impl CostSearch {
    pub(super) fn uniform_cost(context: &mut SearchContext) -> Self {
        Self::seeded(context, None)
    }

    pub(super) fn seeded(context: &mut SearchContext, heuristic: Option<Heuristic>) -> Self {
        context.nodes_expanded = 1;
        let mut frontier = PriorityFrontier::new();
        frontier.push(context.start, 0.0);
        CostSearch {
            frontier,
            costs: HashMap::from([(context.start, 0)]),
            closed: HashSet::new(),
            heuristic,
        }
    }

    fn priority(&self, cost: usize, cell: Position, finish: Position) -> f64 {
        let estimate = self
            .heuristic
            .map_or(0.0, |heuristic| heuristic.estimate(cell, finish));
        cost as f64 + estimate
    }

    pub(super) fn step(&mut self, context: &mut SearchContext) -> Progress {
        let Some((_, cell)) = self.frontier.pop() else {
            return Progress::Exhausted;
        };
        // A cell re-queued at a lower cost leaves its older copy behind
        if !self.closed.insert(cell) {
            return Progress::Frontier(Vec::new());
        }
        if cell == context.finish {
            return Progress::Found(Vec::new());
        }

        // Uniform cost for each step
        let new_cost = self.costs[&cell] + 1;
        let mut added = Vec::new();
        for neighbor in context.grid.passages_at_distance(cell, 1) {
            // Only consider neighbors that we can reach with a lower cost
            let is_cheaper = self
                .costs
                .get(&neighbor)
                .is_none_or(|&existing| new_cost < existing);
            if is_cheaper {
                self.costs.insert(neighbor, new_cost);
                let priority = self.priority(new_cost, neighbor, context.finish);
                self.frontier.push(neighbor, priority);
                context.discover(neighbor, cell);
                added.push(neighbor);
            }
        }
        Progress::Frontier(added)
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Position;
    use crate::solvers::{MazeSolver, tests::parse};

    const TWO_ROUTES: &str = "\
%%%%%%%
%S   F%
% %%% %
%     %
%%%%%%%
";

    #[test]
    fn test_equal_costs_expand_in_insertion_order() {
        let grid = parse(TWO_ROUTES);
        let mut search = MazeSolver::uniform_cost(&grid).unwrap();
        assert_eq!(
            search.step().unwrap(),
            vec![Position::new(2, 1), Position::new(1, 2)]
        );
        // (2,1) was queued first at cost 1
        assert_eq!(search.step().unwrap(), vec![Position::new(3, 1)]);
        assert_eq!(search.step().unwrap(), vec![Position::new(1, 3)]);
    }

    #[test]
    fn test_uniform_cost_expansion_count() {
        let grid = parse(TWO_ROUTES);
        let report = MazeSolver::uniform_cost(&grid).unwrap().run();
        assert_eq!(report.solution_cost, 4);
        assert_eq!(report.nodes_expanded, 10);
    }
}
