//! Uniform-cost search over burrow states.
//!
//! The search is a Dijkstra over the implicit graph whose edges are
//! [`transitions`]. The frontier is a binary min-heap that may hold several
//! entries for one state; entries whose cost exceeds the best known cost for
//! their state are skipped when popped instead of being removed on relaxation.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::state::{Pod, State};
use crate::topology::{CellId, Cost, Topology};
use crate::transitions::transitions;

/// Log progress every this many expansions unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Limits and diagnostics for a single search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Give up with [`SearchError::ExpansionLimit`] after expanding this many states.
    pub max_expansions: Option<usize>,
    /// Give up with [`SearchError::DeadlineExceeded`] once this much wall time has passed.
    pub deadline: Option<Duration>,
    /// Keep every expanded `(cost, state)` pair in pop order.
    pub record_trace: bool,
    /// Emit a `debug!` progress line every this many expansions. Zero disables it.
    pub progress_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_expansions: None,
            deadline: None,
            record_trace: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SearchConfig {
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// A single pod move of a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub pod: Pod,
    pub from: CellId,
    pub to: CellId,
    pub cost: Cost,
}

/// A cheapest way to the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Minimal total cost.
    pub cost: Cost,
    /// Number of states expanded before the goal was popped.
    pub expansions: usize,
    /// The moves, in order, from the initial state to the goal. Their costs add up to `cost`.
    pub moves: Vec<Move>,
}

/// Verdict of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// Every reachable state was expanded and none was a goal.
    Unsolvable { expansions: usize },
}

impl Outcome {
    /// The minimal cost, or `None` if the burrow cannot be solved.
    pub fn cost(&self) -> Option<Cost> {
        match self {
            Outcome::Solved(solution) => Some(solution.cost),
            Outcome::Unsolvable { .. } => None,
        }
    }

    pub fn expansions(&self) -> usize {
        match self {
            Outcome::Solved(solution) => solution.expansions,
            Outcome::Unsolvable { expansions } => *expansions,
        }
    }
}

/// Frontier entry. Field order gives the derived ordering: cost first, then state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending<const P: usize> {
    cost: Cost,
    state: State<P>,
}

/// Finds the minimal cost of solving `initial` with the default configuration.
///
/// # Examples
/// ```
/// use amphipod_solver::solver::solve;
/// use amphipod_solver::state::State;
/// use amphipod_solver::topology::Topology;
///
/// let burrow = Topology::folded();
/// let goal = State::<8>::goal(burrow).unwrap();
/// let outcome = solve(burrow, goal).unwrap();
/// assert_eq!(outcome.cost(), Some(0));
/// ```
pub fn solve<const P: usize>(topology: &Topology, initial: State<P>) -> Result<Outcome, SearchError> {
    Search::new(topology, SearchConfig::default()).run(initial)
}

/// A search driver that owns its cost table and frontier.
///
/// After [`Search::run`] returns, the cost table and the pop trace of that run
/// stay available for inspection.
pub struct Search<'t, const P: usize> {
    topology: &'t Topology,
    config: SearchConfig,
    best: HashMap<State<P>, Cost>,
    came_from: HashMap<State<P>, (State<P>, Move)>,
    frontier: BinaryHeap<Reverse<Pending<P>>>,
    trace: Vec<(Cost, State<P>)>,
    expansions: usize,
}

impl<'t, const P: usize> Search<'t, P> {
    pub fn new(topology: &'t Topology, config: SearchConfig) -> Self {
        Search {
            topology,
            config,
            best: HashMap::new(),
            came_from: HashMap::new(),
            frontier: BinaryHeap::new(),
            trace: Vec::new(),
            expansions: 0,
        }
    }

    /// Runs the search from `initial` until a goal is popped or the frontier empties.
    ///
    /// # Returns
    /// * `Ok(Outcome::Solved)` with the minimal cost and the move sequence.
    /// * `Ok(Outcome::Unsolvable)` if no goal state is reachable.
    /// * `Err(SearchError)` if the configured expansion limit or deadline ran out first.
    pub fn run(&mut self, initial: State<P>) -> Result<Outcome, SearchError> {
        let started = Instant::now();
        self.best.clear();
        self.came_from.clear();
        self.frontier.clear();
        self.trace.clear();
        self.expansions = 0;

        self.best.insert(initial, 0);
        self.frontier.push(Reverse(Pending {
            cost: 0,
            state: initial,
        }));

        while let Some(Reverse(Pending { cost, state })) = self.frontier.pop() {
            if self.best.get(&state).is_some_and(|&known| cost > known) {
                continue;
            }

            if let Some(limit) = self.config.max_expansions {
                if self.expansions >= limit {
                    warn!(limit, pending = self.frontier.len(), "expansion limit reached");
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            if let Some(limit) = self.config.deadline {
                if started.elapsed() >= limit {
                    warn!(?limit, expansions = self.expansions, "search deadline exceeded");
                    return Err(SearchError::DeadlineExceeded {
                        limit,
                        expansions: self.expansions,
                    });
                }
            }

            self.expansions += 1;
            if self.config.record_trace {
                self.trace.push((cost, state));
            }
            if self.config.progress_interval > 0 && self.expansions % self.config.progress_interval == 0 {
                debug!(
                    cost,
                    examined = self.expansions,
                    pending = self.frontier.len(),
                    "considering state\n{}",
                    self.topology.render(&state)
                );
            }

            if state.is_goal(self.topology) {
                info!(cost, expansions = self.expansions, "solution found");
                return Ok(Outcome::Solved(Solution {
                    cost,
                    expansions: self.expansions,
                    moves: self.path_to(state),
                }));
            }

            for transition in transitions(self.topology, &state) {
                let candidate = cost + transition.cost;
                let improves = self
                    .best
                    .get(&transition.next)
                    .map_or(true, |&known| candidate < known);
                if !improves {
                    continue;
                }
                self.best.insert(transition.next, candidate);
                self.came_from.insert(
                    transition.next,
                    (
                        state,
                        Move {
                            pod: transition.pod,
                            from: transition.from,
                            to: transition.to,
                            cost: transition.cost,
                        },
                    ),
                );
                self.frontier.push(Reverse(Pending {
                    cost: candidate,
                    state: transition.next,
                }));
            }
        }

        info!(expansions = self.expansions, "frontier exhausted without reaching a goal");
        Ok(Outcome::Unsolvable {
            expansions: self.expansions,
        })
    }

    /// Best cost recorded for `state` by the last run, if it was ever reached.
    pub fn best_cost(&self, state: &State<P>) -> Option<Cost> {
        self.best.get(state).copied()
    }

    /// Expanded `(cost, state)` pairs in pop order. Empty unless tracing was enabled.
    pub fn trace(&self) -> &[(Cost, State<P>)] {
        &self.trace
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn path_to(&self, goal: State<P>) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = goal;
        while let Some(&(previous, step)) = self.came_from.get(&current) {
            moves.push(step);
            current = previous;
        }
        moves.reverse();
        moves
    }
}
