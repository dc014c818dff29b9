//! Random burrows for evaluation runs and randomized checks.
//!
//! Everything here takes the generator from the caller; seeding a `SmallRng`
//! with a fixed value reproduces the same burrow on every run.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::LayoutError;
use crate::state::State;
use crate::topology::{CellId, Topology};
use crate::transitions::transitions;

/// Places every pod in a random room cell, leaving the hallway empty.
///
/// # Examples
/// ```
/// use amphipod_solver::scramble::shuffled_rooms;
/// use amphipod_solver::topology::Topology;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let burrow = Topology::folded();
/// let a = shuffled_rooms::<8, _>(burrow, &mut SmallRng::seed_from_u64(7)).unwrap();
/// let b = shuffled_rooms::<8, _>(burrow, &mut SmallRng::seed_from_u64(7)).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn shuffled_rooms<const P: usize, R: Rng + ?Sized>(
    topology: &Topology,
    rng: &mut R,
) -> Result<State<P>, LayoutError> {
    let mut cells: Vec<CellId> = topology
        .rooms()
        .iter()
        .flat_map(|room| room.cells().iter().copied())
        .collect();
    if cells.len() != P {
        return Err(LayoutError::PodCountMismatch {
            expected: cells.len(),
            actual: P,
        });
    }
    cells.shuffle(rng);

    let mut positions = [0; P];
    positions.copy_from_slice(&cells);
    State::from_positions(topology, positions)
}

/// Applies up to `steps` uniformly chosen legal moves to `start`.
///
/// Stops early if a state has no legal move.
pub fn random_walk<const P: usize, R: Rng + ?Sized>(
    topology: &Topology,
    start: State<P>,
    steps: usize,
    rng: &mut R,
) -> State<P> {
    let mut state = start;
    for _ in 0..steps {
        let moves: Vec<_> = transitions(topology, &state).collect();
        match moves.choose(rng) {
            Some(transition) => state = transition.next,
            None => break,
        }
    }
    state
}
