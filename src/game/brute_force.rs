use log::{debug, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::game::{BaseEvaluator, EvaluationContext, Settings};
use crate::model::{CellId, ConstraintRegistry, EvaluationMode, Grid};

const MODE: EvaluationMode = EvaluationMode::BruteForce;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every branch was explored.
    Exhausted,
    /// Stopped after finding the requested number of solutions.
    SolutionLimit,
    /// Stopped after visiting the configured number of nodes.
    NodeLimit,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub solutions: usize,
    pub first: Option<Grid>,
    pub outcome: SearchOutcome,
    pub nodes: usize,
}

impl SearchResult {
    /// One-line report of how many solutions were found and whether the search was cut short.
    pub fn summary(&self) -> String {
        match self.outcome {
            SearchOutcome::Exhausted => format!("{} solution(s)", self.solutions),
            SearchOutcome::SolutionLimit => format!("at least {} solution(s)", self.solutions),
            SearchOutcome::NodeLimit => format!("{} solution(s) (search incomplete)", self.solutions),
        }
    }
}

struct SearchState {
    limit: usize,
    nodes: usize,
    solutions: usize,
    first: Option<Grid>,
    rng: Option<StdRng>,
    stopped: Option<SearchOutcome>,
}

/// Depth-first solver that asks the candidate evaluator in brute-force mode
/// which digits each cell can take, always branching on the cell with the
/// fewest candidates.
#[derive(Debug)]
pub struct BruteForceSolver<'a> {
    registry: &'a ConstraintRegistry,
    base: &'a dyn BaseEvaluator,
    max_nodes: usize,
}

impl<'a> BruteForceSolver<'a> {
    pub fn new(registry: &'a ConstraintRegistry, base: &'a dyn BaseEvaluator) -> Self {
        Self {
            registry,
            base,
            max_nodes: Settings::default().max_search_nodes,
        }
    }

    pub fn from_settings(registry: &'a ConstraintRegistry, base: &'a dyn BaseEvaluator, settings: &Settings) -> Self {
        Self::new(registry, base).with_max_nodes(settings.max_search_nodes)
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn candidates(&self, grid: &Grid, cell: CellId, mode: EvaluationMode) -> Vec<u8> {
        EvaluationContext::new(grid, self.registry, self.base).candidates(cell, mode)
    }

    /// Searches for up to `limit` solutions. With a `seed`, digits are tried in
    /// a shuffled order so different seeds reach different first solutions.
    pub fn search(&self, grid: &Grid, limit: usize, seed: Option<u64>) -> SearchResult {
        let mut state = SearchState {
            limit: limit.max(1),
            nodes: 0,
            solutions: 0,
            first: None,
            rng: seed.map(StdRng::seed_from_u64),
            stopped: None,
        };

        let mut work = grid.clone();
        if self.all_filled_consistent(&work) {
            self.descend(&mut work, &mut state);
        } else {
            debug!(target: "brute_force", "Givens already conflict: {:?}", grid);
        }

        let outcome = state.stopped.unwrap_or(SearchOutcome::Exhausted);
        debug!(
            target: "brute_force",
            "Search finished: {} solution(s), {} nodes, {:?}",
            state.solutions,
            state.nodes,
            outcome
        );
        SearchResult {
            solutions: state.solutions,
            first: state.first,
            outcome,
            nodes: state.nodes,
        }
    }

    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> SearchResult {
        self.search(grid, limit, None)
    }

    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        self.search(grid, 1, None).first
    }

    pub fn is_satisfiable(&self, grid: &Grid) -> bool {
        self.search(grid, 1, None).solutions > 0
    }

    pub fn random_solution(&self, grid: &Grid, seed: u64) -> Option<Grid> {
        self.search(grid, 1, Some(seed)).first
    }

    fn descend(&self, grid: &mut Grid, state: &mut SearchState) {
        state.nodes += 1;
        if state.nodes > self.max_nodes {
            warn!(target: "brute_force", "Gave up after {} nodes", self.max_nodes);
            state.stopped = Some(SearchOutcome::NodeLimit);
            return;
        }

        let next = {
            let ctx = EvaluationContext::new(grid, self.registry, self.base);
            grid.empty_cells()
                .map(|cell| (cell, ctx.candidate_mask(cell, MODE)))
                .min_by_key(|(_, mask)| mask.count_ones())
        };

        let Some((cell, mask)) = next else {
            if self.all_filled_consistent(grid) {
                state.solutions += 1;
                if state.first.is_none() {
                    state.first = Some(grid.clone());
                }
                if state.solutions >= state.limit {
                    state.stopped = Some(SearchOutcome::SolutionLimit);
                }
            }
            return;
        };

        let mut digits: Vec<u8> = (1..=grid.size() as u8)
            .filter(|&n| mask & 1 << (n - 1) != 0)
            .collect();
        if let Some(rng) = state.rng.as_mut() {
            digits.shuffle(rng);
        }
        trace!(target: "brute_force", "Branching on {:?}: {:?}", cell, digits);

        for n in digits {
            grid.put(cell, n);
            if self.line_neighbors_consistent(grid, cell) {
                self.descend(grid, state);
            }
            grid.clear_value(cell);
            if state.stopped.is_some() {
                return;
            }
        }
    }

    /// Re-checks the filled cells sharing a line with `cell`, since placing a
    /// digit can invalidate digits placed earlier (lockout ends, renban runs).
    fn line_neighbors_consistent(&self, grid: &Grid, cell: CellId) -> bool {
        let ctx = EvaluationContext::new(grid, self.registry, self.base);
        self.registry
            .iter()
            .flat_map(|constraint| constraint.lines())
            .filter(|line| line.contains(&cell))
            .flatten()
            .filter(|&&other| grid.is_filled(other))
            .all(|&other| ctx.is_candidate_possible(grid.value(other), other, MODE))
    }

    fn all_filled_consistent(&self, grid: &Grid) -> bool {
        let ctx = EvaluationContext::new(grid, self.registry, self.base);
        grid.cells()
            .filter(|&cell| grid.is_filled(cell))
            .all(|cell| ctx.is_candidate_possible(grid.value(cell), cell, MODE))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use test_context::test_context;

    use super::*;
    use crate::game::tests::{cell, lockout, registry_of, renban, whispers};
    use crate::game::ClassicSudoku;
    use crate::model::{Line, LineConstraint};
    use crate::tests::UsingLogger;

    fn line_values(grid: &Grid, line: &Line) -> Vec<i32> {
        line.iter().map(|&c| grid.value(c) as i32).collect()
    }

    /// Checks a finished grid against the line rules directly.
    fn satisfies_lines(grid: &Grid, registry: &ConstraintRegistry) -> bool {
        let size = grid.size() as i32;
        registry.iter().all(|constraint| {
            constraint.lines().iter().all(|line| {
                let values = line_values(grid, line);
                match constraint {
                    LineConstraint::Renban(_) => {
                        values.iter().all_unique()
                            && values.iter().max().unwrap() - values.iter().min().unwrap()
                                == values.len() as i32 - 1
                    }
                    LineConstraint::Whispers(_) => values
                        .iter()
                        .tuple_windows()
                        .all(|(a, b)| (a - b).abs() >= (size + 1) / 2),
                    LineConstraint::Lockout(_) => {
                        let (a, b) = (values[0], values[values.len() - 1]);
                        let (low, high) = (a.min(b), a.max(b));
                        (high - low) >= size / 2
                            && values[1..values.len() - 1]
                                .iter()
                                .all(|v| !(low..=high).contains(v))
                    }
                }
            })
        })
    }

    #[test]
    fn test_empty_four_by_four_has_288_solutions() {
        let grid = Grid::new(4).unwrap();
        let registry = ConstraintRegistry::new();
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1000);
        assert_eq!(result.solutions, 288);
        assert_eq!(result.outcome, SearchOutcome::Exhausted);
        assert_eq!(result.summary(), "288 solution(s)");
    }

    #[test]
    fn test_full_row_renban_removes_nothing() {
        let grid = Grid::new(4).unwrap();
        let registry = registry_of(vec![renban(&["R1C1", "R1C2", "R1C3", "R1C4"])]);
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1000);
        assert_eq!(result.solutions, 288);
    }

    #[test]
    fn test_line_counts_on_four_by_four() {
        // Every first row appears in 12 of the 288 grids.
        let grid = Grid::new(4).unwrap();

        let registry = registry_of(vec![renban(&["R1C1", "R1C2"])]);
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1000);
        assert_eq!(result.solutions, 6 * 2 * 12);

        let registry = registry_of(vec![whispers(&["R1C1", "R1C2"])]);
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1000);
        assert_eq!(result.solutions, 6 * 2 * 12);

        // Interior 1 with ends 2/4, or interior 4 with ends 1/3
        let registry = registry_of(vec![lockout(&["R1C1", "R1C2", "R1C3"])]);
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1000);
        assert_eq!(result.solutions, 4 * 12);
    }

    #[test]
    fn test_solution_limit_stops_early() {
        let grid = Grid::new(4).unwrap();
        let registry = ConstraintRegistry::new();
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 2);
        assert_eq!(result.solutions, 2);
        assert_eq!(result.outcome, SearchOutcome::SolutionLimit);
        assert_eq!(result.summary(), "at least 2 solution(s)");
        assert!(result.first.unwrap().is_complete());
    }

    #[test]
    fn test_node_limit() {
        let grid = Grid::new(9).unwrap();
        let registry = ConstraintRegistry::new();
        let result = BruteForceSolver::new(&registry, &ClassicSudoku)
            .with_max_nodes(10)
            .count_solutions(&grid, 1000);
        assert_eq!(result.outcome, SearchOutcome::NodeLimit);
        assert_eq!(result.solutions, 0);
    }

    #[test]
    fn test_whispers_next_to_five_is_unsatisfiable() {
        let mut grid = Grid::new(9).unwrap();
        grid.set_value(cell("R5C5"), 5).unwrap();
        let registry = registry_of(vec![whispers(&["R5C5", "R5C6"])]);
        assert!(!BruteForceSolver::new(&registry, &ClassicSudoku).is_satisfiable(&grid));
    }

    #[test]
    fn test_conflicting_givens_are_unsatisfiable() {
        let mut grid = Grid::new(9).unwrap();
        grid.set_value(cell("R1C1"), 2).unwrap();
        grid.set_value(cell("R1C3"), 4).unwrap();
        let registry = registry_of(vec![lockout(&["R1C1", "R1C2", "R1C3"])]);
        let result = BruteForceSolver::new(&registry, &ClassicSudoku).count_solutions(&grid, 1);
        assert_eq!(result.solutions, 0);
        assert_eq!(result.nodes, 0);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_random_solution_satisfies_every_line(_: &mut UsingLogger) {
        let grid = Grid::new(9).unwrap();
        let registry = registry_of(vec![
            renban(&["R1C1", "R2C2", "R3C3", "R4C4"]),
            whispers(&["R9C1", "R8C2", "R7C3", "R6C3"]),
            lockout(&["R1C9", "R2C8", "R3C7", "R4C7", "R5C7"]),
        ]);
        let solver = BruteForceSolver::new(&registry, &ClassicSudoku);

        for seed in [1, 7, 42] {
            let solution = solver.random_solution(&grid, seed).unwrap();
            assert!(solution.is_complete());
            assert!(satisfies_lines(&solution, &registry), "seed {}: {:?}", seed, solution);
        }
    }

    #[test]
    fn test_random_solution_is_reproducible() {
        let grid = Grid::new(6).unwrap();
        let registry = registry_of(vec![whispers(&["R1C1", "R1C2", "R1C3"])]);
        let solver = BruteForceSolver::new(&registry, &ClassicSudoku);
        assert_eq!(solver.random_solution(&grid, 99), solver.random_solution(&grid, 99));
    }

    #[test]
    fn test_solve_keeps_givens() {
        let mut grid = Grid::new(6).unwrap();
        grid.set_value(cell("R1C1"), 6).unwrap();
        let registry = registry_of(vec![renban(&["R1C1", "R1C2", "R1C3"])]);
        let solution = BruteForceSolver::new(&registry, &ClassicSudoku).solve(&grid).unwrap();

        assert_eq!(solution.value(cell("R1C1")), 6);
        let mut run = vec![solution.value(cell("R1C2")), solution.value(cell("R1C3"))];
        run.sort();
        assert_eq!(run, vec![4, 5]);
    }
}
