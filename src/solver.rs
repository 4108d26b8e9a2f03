//! Search algorithms over a generic [`Problem`].
//!
//! Seven strategies, uninformed and informed, all returning a
//! [`SearchOutcome`]: the reconstructed path (or `None` when the reachable
//! space holds no goal) together with the number of expanded nodes. A node
//! counts as expanded when it is taken off the frontier and processed for
//! goal test and child generation; the root counts once it is popped, not
//! when it is built.
//!
//! The informed strategies take the heuristic as a plain `Fn(&State) -> f64`
//! so any of the functions in [`crate::heuristics`] (or a closure) fits.
//!
//! The cost-ordered strategies (uniform-cost, A*, weighted A*) keep no
//! closed set: a best-known-cost map prunes re-pushes, but a state may still
//! be expanded more than once before its optimal cost is settled. That is
//! deliberate and harmless for correctness; it does show up in the expanded
//! counts callers display, so it must not be "fixed" without changing the
//! reported numbers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::containers::{PriorityQueue, Queue, Stack};
use crate::problem::{Path, Problem, SearchTree};

/// Default weight for [`weighted_a_star`].
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// Result of one search invocation.
pub struct SearchOutcome<P: Problem> {
    /// The action/state sequence from the initial state to a goal, starting
    /// with `(None, initial_state)`, or `None` when no goal was reachable.
    pub path: Option<Path<P>>,
    /// Number of nodes popped from the frontier and processed.
    pub expanded: usize,
}

impl<P: Problem> SearchOutcome<P> {
    /// Whether a goal was reached.
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of actions on the returned path, if any.
    pub fn step_count(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }

    /// The action sequence of the returned path, skipping the initial
    /// `None` sentinel. Empty when unsolved or already at a goal.
    pub fn actions(&self) -> Vec<P::Action> {
        self.path
            .as_ref()
            .map(|path| {
                path.iter()
                    .filter_map(|(action, _)| action.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Breadth-first search.
///
/// FIFO frontier, explored set checked on pop before expansion. Complete;
/// the returned path has the fewest steps when every step costs the same.
pub fn breadth_first<P: Problem>(problem: &P) -> SearchOutcome<P> {
    let mut tree = SearchTree::new();
    let mut frontier = Queue::new();
    frontier.enqueue(tree.root(problem));
    let mut explored: HashSet<P::State> = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.dequeue() {
        if problem.is_goal(&tree.node(id).state) {
            return SearchOutcome {
                path: Some(tree.path_to(id)),
                expanded,
            };
        }
        if !explored.insert(tree.node(id).state.clone()) {
            continue;
        }
        expanded += 1;
        for child in tree.expand(id, problem) {
            frontier.enqueue(child);
        }
    }

    SearchOutcome {
        path: None,
        expanded,
    }
}

/// Depth-first search with an optional depth bound.
///
/// LIFO frontier, explored set checked on pop. Nodes deeper than
/// `depth_limit` are dropped after the goal test, so a goal right beyond
/// the bound is still recognized. Without a bound the search is exhaustive
/// on finite spaces but the path it returns can be far from shortest; with
/// a bound it may miss solutions deeper than the limit.
pub fn depth_first<P: Problem>(problem: &P, depth_limit: Option<usize>) -> SearchOutcome<P> {
    let mut tree = SearchTree::new();
    let mut frontier = Stack::new();
    frontier.push(tree.root(problem));
    let mut explored: HashSet<P::State> = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        if problem.is_goal(&tree.node(id).state) {
            return SearchOutcome {
                path: Some(tree.path_to(id)),
                expanded,
            };
        }
        if explored.contains(&tree.node(id).state) {
            continue;
        }
        if let Some(limit) = depth_limit {
            if tree.node(id).depth > limit {
                continue;
            }
        }
        explored.insert(tree.node(id).state.clone());
        expanded += 1;
        for child in tree.expand(id, problem) {
            frontier.push(child);
        }
    }

    SearchOutcome {
        path: None,
        expanded,
    }
}

/// Shared driver for the cost-ordered strategies: a stable priority-queue
/// frontier keyed by `priority_of(g, state)` and a best-known-cost map that
/// admits a child only when its path cost strictly improves on the recorded
/// one. No closed set; see the module notes.
fn cost_ordered<P, F>(problem: &P, priority_of: F) -> SearchOutcome<P>
where
    P: Problem,
    F: Fn(f64, &P::State) -> f64,
{
    let mut tree = SearchTree::new();
    let mut frontier = PriorityQueue::new();
    let mut best: HashMap<P::State, f64> = HashMap::new();

    let root = tree.root(problem);
    best.insert(tree.node(root).state.clone(), 0.0);
    frontier.push(priority_of(0.0, &tree.node(root).state), root);
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        if problem.is_goal(&tree.node(id).state) {
            return SearchOutcome {
                path: Some(tree.path_to(id)),
                expanded,
            };
        }
        expanded += 1;
        for child in tree.expand(id, problem) {
            let g = tree.node(child).g;
            let improves = match best.get(&tree.node(child).state) {
                Some(&known) => g < known,
                None => true,
            };
            if improves {
                best.insert(tree.node(child).state.clone(), g);
                frontier.push(priority_of(g, &tree.node(child).state), child);
            }
        }
    }

    SearchOutcome {
        path: None,
        expanded,
    }
}

/// Uniform-cost search: frontier ordered by path cost `g`.
///
/// Complete and cost-optimal for non-negative step costs.
pub fn uniform_cost<P: Problem>(problem: &P) -> SearchOutcome<P> {
    cost_ordered(problem, |g, _| g)
}

/// Greedy best-first search: frontier ordered by the heuristic alone.
///
/// Fast, not optimal. A seen-set on pop keeps it from revisiting states, so
/// it terminates on finite spaces.
pub fn greedy<P, H>(problem: &P, heuristic: H) -> SearchOutcome<P>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    let mut tree = SearchTree::new();
    let mut frontier = PriorityQueue::new();
    let root = tree.root(problem);
    frontier.push(heuristic(&tree.node(root).state), root);
    let mut seen: HashSet<P::State> = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        if problem.is_goal(&tree.node(id).state) {
            return SearchOutcome {
                path: Some(tree.path_to(id)),
                expanded,
            };
        }
        if !seen.insert(tree.node(id).state.clone()) {
            continue;
        }
        expanded += 1;
        for child in tree.expand(id, problem) {
            frontier.push(heuristic(&tree.node(child).state), child);
        }
    }

    SearchOutcome {
        path: None,
        expanded,
    }
}

/// A* search: frontier ordered by `f = g + h`.
///
/// Returns a cheapest path whenever the heuristic never overestimates the
/// remaining cost.
pub fn a_star<P, H>(problem: &P, heuristic: H) -> SearchOutcome<P>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    cost_ordered(problem, |g, state| g + heuristic(state))
}

/// Weighted A*: frontier ordered by `f = g + weight · h`.
///
/// Inflating the heuristic trades path quality for speed; with `weight = 1`
/// this is exactly [`a_star`].
pub fn weighted_a_star<P, H>(problem: &P, heuristic: H, weight: f64) -> SearchOutcome<P>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    cost_ordered(problem, move |g, state| g + weight * heuristic(state))
}

enum Probe {
    Found,
    Excess(f64),
}

/// Iterative-deepening A*.
///
/// Repeated depth-first probes under a growing cost bound. The bound starts
/// at `h(initial)`; a probe prunes any node whose `f = g + h` exceeds it and
/// reports the smallest pruned `f`, which becomes the next bound. No
/// explored set is kept, so states are revisited across (and within)
/// iterations; in exchange, memory stays proportional to the search depth.
/// The goal test happens when a node is visited inside the bound. Reports
/// no solution only when a probe prunes nothing, which cannot happen while
/// any node within the bound has children.
pub fn iterative_deepening_a_star<P, H>(problem: &P, heuristic: H) -> SearchOutcome<P>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    let start = problem.initial_state();
    let mut bound = heuristic(&start);
    let mut expanded = 0usize;

    loop {
        let mut trail: Path<P> = vec![(None, start.clone())];
        match bounded_probe(
            problem,
            &heuristic,
            &start,
            0.0,
            bound,
            &mut trail,
            &mut expanded,
        ) {
            Probe::Found => {
                return SearchOutcome {
                    path: Some(trail),
                    expanded,
                }
            }
            Probe::Excess(next) => {
                if !next.is_finite() {
                    return SearchOutcome {
                        path: None,
                        expanded,
                    };
                }
                bound = next;
            }
        }
    }
}

/// One depth-first probe of [`iterative_deepening_a_star`].
///
/// `trail` holds the action/state steps from the root to `state`; on
/// success it is left holding the full solution path. The expansion counter
/// increments once per generated child and is owned by this single call
/// tree.
fn bounded_probe<P, H>(
    problem: &P,
    heuristic: &H,
    state: &P::State,
    g: f64,
    bound: f64,
    trail: &mut Path<P>,
    expanded: &mut usize,
) -> Probe
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    let f = g + heuristic(state);
    if f > bound {
        return Probe::Excess(f);
    }
    if problem.is_goal(state) {
        return Probe::Found;
    }

    let mut min_excess = f64::INFINITY;
    for action in problem.actions(state) {
        let next = problem.result(state, &action);
        let cost = problem.step_cost(state, &action, &next);
        *expanded += 1;
        trail.push((Some(action), next.clone()));
        match bounded_probe(problem, heuristic, &next, g + cost, bound, trail, expanded) {
            Probe::Found => return Probe::Found,
            Probe::Excess(excess) => {
                if excess < min_excess {
                    min_excess = excess;
                }
            }
        }
        trail.pop();
    }
    Probe::Excess(min_excess)
}

/// The seven search strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// [`breadth_first`]
    BreadthFirst,
    /// [`depth_first`]
    DepthFirst,
    /// [`uniform_cost`]
    UniformCost,
    /// [`greedy`]
    Greedy,
    /// [`a_star`]
    AStar,
    /// [`weighted_a_star`]
    WeightedAStar,
    /// [`iterative_deepening_a_star`]
    IdaStar,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::UniformCost,
        Algorithm::Greedy,
        Algorithm::AStar,
        Algorithm::WeightedAStar,
        Algorithm::IdaStar,
    ];

    /// The canonical name used for selection and display.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::DepthFirst => "dfs",
            Algorithm::UniformCost => "ucs",
            Algorithm::Greedy => "greedy",
            Algorithm::AStar => "astar",
            Algorithm::WeightedAStar => "wastar",
            Algorithm::IdaStar => "idastar",
        }
    }

    /// Whether the strategy consults a heuristic.
    pub fn is_informed(&self) -> bool {
        matches!(
            self,
            Algorithm::Greedy | Algorithm::AStar | Algorithm::WeightedAStar | Algorithm::IdaStar
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Algorithm::BreadthFirst),
            "dfs" => Ok(Algorithm::DepthFirst),
            "ucs" => Ok(Algorithm::UniformCost),
            "greedy" => Ok(Algorithm::Greedy),
            "astar" | "a*" => Ok(Algorithm::AStar),
            "wastar" | "weighted-astar" => Ok(Algorithm::WeightedAStar),
            "idastar" | "ida*" => Ok(Algorithm::IdaStar),
            other => Err(format!(
                "Unknown algorithm '{}'. Expected one of: bfs, dfs, ucs, greedy, astar, wastar, idastar",
                other
            )),
        }
    }
}

/// Knobs for the strategies that take one: the DFS depth bound and the
/// weighted A* weight. The defaults leave DFS unbounded and set the weight
/// to [`DEFAULT_WEIGHT`].
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Depth bound for [`depth_first`]; `None` leaves it unbounded.
    pub depth_limit: Option<usize>,
    /// Weight for [`weighted_a_star`].
    pub weight: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            depth_limit: None,
            weight: DEFAULT_WEIGHT,
        }
    }
}

/// Runs the selected algorithm. Uninformed strategies ignore the heuristic;
/// the options only reach the strategies that read them.
pub fn solve<P, H>(
    algorithm: Algorithm,
    problem: &P,
    heuristic: H,
    options: SolveOptions,
) -> SearchOutcome<P>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    match algorithm {
        Algorithm::BreadthFirst => breadth_first(problem),
        Algorithm::DepthFirst => depth_first(problem, options.depth_limit),
        Algorithm::UniformCost => uniform_cost(problem),
        Algorithm::Greedy => greedy(problem, heuristic),
        Algorithm::AStar => a_star(problem, heuristic),
        Algorithm::WeightedAStar => weighted_a_star(problem, heuristic, options.weight),
        Algorithm::IdaStar => iterative_deepening_a_star(problem, heuristic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, Puzzle, PuzzleState};
    use crate::heuristics::{linear_conflict, manhattan, misplaced};

    /// Blank one move from home: RIGHT solves it.
    fn one_step() -> Puzzle {
        Puzzle::from_tiles([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap()
    }

    /// An even-parity scramble whose cheapest solution takes 16 moves.
    fn demo() -> Puzzle {
        Puzzle::from_tiles([1, 4, 2, 7, 5, 3, 0, 6, 8]).unwrap()
    }

    /// One inversion: odd parity, no path to the goal exists.
    fn unsolvable() -> Puzzle {
        Puzzle::from_tiles([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap()
    }

    /// Replays the path's actions through the problem's transition function
    /// and checks each recorded state, ending at a goal.
    fn assert_replay_valid(problem: &Puzzle, path: &Path<Puzzle>) {
        let mut state = problem.initial_state();
        assert_eq!(path[0], (None, state));
        for (action, recorded) in &path[1..] {
            let action = action.expect("non-initial steps carry an action");
            state = problem.result(&state, &action);
            assert_eq!(&state, recorded);
        }
        assert!(problem.is_goal(&state));
    }

    #[test]
    fn test_every_algorithm_solves_the_one_step_puzzle() {
        let puzzle = one_step();
        let outcomes = vec![
            breadth_first(&puzzle),
            depth_first(&puzzle, Some(1)),
            uniform_cost(&puzzle),
            greedy(&puzzle, manhattan),
            a_star(&puzzle, manhattan),
            weighted_a_star(&puzzle, manhattan, DEFAULT_WEIGHT),
            iterative_deepening_a_star(&puzzle, manhattan),
        ];
        for outcome in outcomes {
            assert!(outcome.is_solved());
            assert_eq!(outcome.step_count(), Some(1));
            assert_eq!(outcome.actions(), vec![Move::Right]);
            assert!(outcome.expanded >= 1);
            assert_replay_valid(&puzzle, outcome.path.as_ref().unwrap());
        }
    }

    #[test]
    fn test_expansion_counts_on_the_one_step_puzzle() {
        let puzzle = one_step();
        // BFS pops the root and one sibling before reaching the goal node;
        // the informed strategies rank the goal child first.
        assert_eq!(breadth_first(&puzzle).expanded, 2);
        assert_eq!(uniform_cost(&puzzle).expanded, 2);
        assert_eq!(a_star(&puzzle, manhattan).expanded, 1);
        assert_eq!(greedy(&puzzle, manhattan).expanded, 1);
        assert_eq!(
            weighted_a_star(&puzzle, manhattan, DEFAULT_WEIGHT).expanded,
            1
        );
    }

    #[test]
    fn test_start_at_goal_expands_nothing() {
        let solved = Puzzle::new(PuzzleState::goal());
        for outcome in [
            breadth_first(&solved),
            depth_first(&solved, None),
            uniform_cost(&solved),
            a_star(&solved, manhattan),
            iterative_deepening_a_star(&solved, manhattan),
        ] {
            assert_eq!(outcome.step_count(), Some(0));
            assert_eq!(outcome.expanded, 0);
            assert!(outcome.actions().is_empty());
        }
    }

    #[test]
    fn test_dfs_goal_test_precedes_the_depth_check() {
        // With a zero bound the frontier never expands past the root, yet
        // the goal child must still be recognized when popped.
        let outcome = depth_first(&one_step(), Some(0));
        assert_eq!(outcome.step_count(), Some(1));
        assert_eq!(outcome.expanded, 1);
    }

    #[test]
    fn test_dfs_unbounded_reaches_the_goal_eventually() {
        let puzzle = Puzzle::from_tiles([1, 2, 3, 4, 0, 5, 7, 8, 6]).unwrap();
        let outcome = depth_first(&puzzle, None);
        let path = outcome.path.as_ref().expect("the space is finite and solvable");
        assert!(path.len() >= 3, "two moves at minimum");
        assert_replay_valid(&puzzle, path);
    }

    #[test]
    fn test_unsolvable_board_exhausts_to_no_solution() {
        let puzzle = unsolvable();

        let bfs = breadth_first(&puzzle);
        assert!(bfs.path.is_none());
        // BFS expands every state of the start's parity class exactly once.
        assert_eq!(bfs.expanded, 181_440);

        assert!(uniform_cost(&puzzle).path.is_none());
        assert!(a_star(&puzzle, manhattan).path.is_none());
    }

    #[test]
    fn test_optimal_strategies_agree_on_the_demo_board() {
        let puzzle = demo();
        assert_eq!(breadth_first(&puzzle).step_count(), Some(16));
        assert_eq!(uniform_cost(&puzzle).step_count(), Some(16));
        assert_eq!(a_star(&puzzle, manhattan).step_count(), Some(16));
        assert_eq!(a_star(&puzzle, misplaced).step_count(), Some(16));
        assert_eq!(a_star(&puzzle, linear_conflict).step_count(), Some(16));
        assert_eq!(
            iterative_deepening_a_star(&puzzle, manhattan).step_count(),
            Some(16)
        );
    }

    #[test]
    fn test_stronger_heuristics_expand_no_more_nodes() {
        let puzzle = demo();
        let with_misplaced = a_star(&puzzle, misplaced);
        let with_manhattan = a_star(&puzzle, manhattan);
        let with_conflict = a_star(&puzzle, linear_conflict);
        assert!(with_manhattan.expanded <= with_misplaced.expanded);
        assert!(with_conflict.expanded <= with_manhattan.expanded);
    }

    #[test]
    fn test_weighted_astar_finds_a_solution_no_shorter_than_optimal() {
        let puzzle = demo();
        let outcome = weighted_a_star(&puzzle, manhattan, DEFAULT_WEIGHT);
        let steps = outcome.step_count().expect("the demo board is solvable");
        assert!(steps >= 16);
        assert_replay_valid(&puzzle, outcome.path.as_ref().unwrap());
    }

    #[test]
    fn test_greedy_reaches_the_goal_on_the_demo_board() {
        let puzzle = demo();
        let outcome = greedy(&puzzle, manhattan);
        assert_replay_valid(
            &puzzle,
            outcome.path.as_ref().expect("greedy terminates with a path"),
        );
    }

    #[test]
    fn test_ucs_cost_matches_bfs_step_count() {
        for seed in [3u64, 11, 27] {
            let puzzle = Puzzle::new(PuzzleState::random_solvable(seed));
            let by_breadth = breadth_first(&puzzle).step_count();
            let by_cost = uniform_cost(&puzzle).step_count();
            assert_eq!(by_breadth, by_cost, "seed {}", seed);
        }
    }

    #[test]
    fn test_replaying_an_astar_path_reproduces_every_state() {
        let puzzle = demo();
        let outcome = a_star(&puzzle, linear_conflict);
        assert_replay_valid(&puzzle, outcome.path.as_ref().unwrap());
    }

    #[test]
    fn test_algorithm_selection_by_name() {
        assert_eq!("bfs".parse(), Ok(Algorithm::BreadthFirst));
        assert_eq!("a*".parse(), Ok(Algorithm::AStar));
        assert_eq!("idastar".parse(), Ok(Algorithm::IdaStar));
        assert!("dijkstra".parse::<Algorithm>().is_err());
        assert!(!Algorithm::UniformCost.is_informed());
        assert!(Algorithm::Greedy.is_informed());

        // Canonical names round-trip through the parser.
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse(), Ok(algorithm));
        }
    }

    #[test]
    fn test_solve_dispatches_with_options() {
        let puzzle = one_step();
        let outcome = solve(
            Algorithm::DepthFirst,
            &puzzle,
            manhattan,
            SolveOptions {
                depth_limit: Some(1),
                weight: DEFAULT_WEIGHT,
            },
        );
        assert_eq!(outcome.step_count(), Some(1));

        let outcome = solve(
            Algorithm::AStar,
            &puzzle,
            manhattan,
            SolveOptions::default(),
        );
        assert_eq!(outcome.step_count(), Some(1));
        assert_eq!(outcome.expanded, 1);
    }
}
