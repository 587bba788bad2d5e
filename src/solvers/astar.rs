use super::dijkstra::CostSearch;
use super::{Heuristic, SearchContext};

impl CostSearch {
    /// A* search: frontier priority is path cost plus the heuristic estimate to the finish.
    pub(super) fn astar(context: &mut SearchContext, heuristic: Heuristic) -> Self {
        CostSearch::seeded(context, Some(heuristic))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet, VecDeque};

    use crate::generators::Generator;
    use crate::maze::{Grid, Position};
    use crate::solvers::{Heuristic, MazeSolver, Strategy, tests::generated_maze, tests::parse};

    /// True move counts from `from` to every reachable passage.
    fn distances_from(grid: &Grid, from: Position) -> HashMap<Position, usize> {
        let mut distances = HashMap::from([(from, 0)]);
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            let next = distances[&cell] + 1;
            for neighbor in grid.passages_at_distance(cell, 1) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, next);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }

    fn closed_cells<'s>(search: &'s MazeSolver) -> &'s HashSet<Position> {
        match &search.strategy {
            Strategy::Cost(cost) => &cost.closed,
            _ => panic!("A* runs a cost search"),
        }
    }

    const TWO_ROUTES: &str = "\
%%%%%%%
%S   F%
% %%% %
%     %
%%%%%%%
";

    const BRANCHED_CORRIDOR: &str = "\
%%%%%%%
%S   F%
% %%%%%
% %%%%%
%%%%%%%
";

    #[test]
    fn test_astar_heads_for_the_finish() {
        let grid = parse(TWO_ROUTES);
        for heuristic in [Heuristic::Euclidean, Heuristic::Manhattan] {
            let mut search = MazeSolver::astar(&grid, heuristic).unwrap();
            search.step();
            // (1,2) is closer to the finish than (2,1), even though it was queued second
            assert_eq!(search.step().unwrap(), vec![Position::new(1, 3)]);
        }
    }

    #[test]
    fn test_astar_expands_less_than_uniform_cost() {
        let grid = parse(TWO_ROUTES);
        let ucs = MazeSolver::uniform_cost(&grid).unwrap().run();
        for heuristic in [Heuristic::Euclidean, Heuristic::Manhattan] {
            let report = MazeSolver::astar(&grid, heuristic).unwrap().run();
            assert_eq!(report.solution, ucs.solution);
            assert_eq!(report.nodes_expanded, 6);
            assert!(report.nodes_expanded < ucs.nodes_expanded);
        }
    }

    #[test]
    fn test_manhattan_expands_no_more_than_euclidean() {
        for grid in [parse(TWO_ROUTES), parse(BRANCHED_CORRIDOR)] {
            let euclidean = MazeSolver::astar(&grid, Heuristic::Euclidean).unwrap().run();
            let manhattan = MazeSolver::astar(&grid, Heuristic::Manhattan).unwrap().run();
            assert!(manhattan.nodes_expanded <= euclidean.nodes_expanded);
            assert_eq!(manhattan.solution_cost, euclidean.solution_cost);
        }
    }

    #[test]
    fn test_settled_cells_track_the_optimal_cost_on_generated_mazes() {
        for generator in Generator::ALL {
            for loop_chance in [0.0, 0.05, 0.2, 0.5] {
                for seed in 0..10 {
                    let grid = generated_maze(generator, seed, loop_chance);
                    let (Some(start), Some(finish)) = (grid.start(), grid.finish()) else {
                        panic!("generated maze has no endpoints");
                    };
                    let distances = distances_from(&grid, start);
                    let optimal = distances[&finish] as f64;

                    let mut must_settle = Vec::new();
                    for heuristic in [Heuristic::Euclidean, Heuristic::Manhattan] {
                        let mut search = MazeSolver::astar(&grid, heuristic).unwrap();
                        let report = search.run();
                        assert_eq!(report.solution_cost as f64, optimal);

                        let f = |cell: Position| {
                            distances[&cell] as f64 + heuristic.estimate(cell, finish)
                        };
                        let below = distances
                            .keys()
                            .copied()
                            .filter(|&cell| f(cell) < optimal)
                            .collect::<HashSet<_>>();
                        let closed = closed_cells(&search);
                        // Every cell cheaper than the optimum is settled, none dearer ever is
                        assert!(
                            below.is_subset(closed),
                            "{heuristic} skipped a cheap cell: {generator} {loop_chance} {seed}"
                        );
                        assert!(closed.iter().all(|&cell| f(cell) <= optimal + 1e-9));
                        must_settle.push(below);
                    }
                    // Manhattan never estimates below Euclidean
                    assert!(must_settle[1].is_subset(&must_settle[0]));
                }
            }
        }
    }

    #[test]
    fn test_astar_matches_bfs_cost_on_generated_mazes() {
        for seed in 0..4 {
            let grid = generated_maze(Generator::Rdfs, seed, 0.2);
            let bfs = MazeSolver::bfs(&grid).unwrap().run();
            for heuristic in [Heuristic::Euclidean, Heuristic::Manhattan] {
                let report = MazeSolver::astar(&grid, heuristic).unwrap().run();
                assert_eq!(report.solution_cost, bfs.solution_cost);
            }
        }
    }
}
