//! Legal single-pod moves out of a state.
//!
//! A move walks one pod from its cell along free cells of the burrow. Where it
//! may stop depends on the kind of cell it reaches and on where it started:
//! - hallway cells are valid stops, except for a pod that started in the hallway
//!   (its next move has to take it into a room);
//! - room exits are never valid stops;
//! - another kind's room is only walked through by a pod leaving it, never entered;
//! - a pod's own room is entered only when it holds no strangers, and only its
//!   deepest free cell is a valid stop.
use crate::state::{Occupancy, Pod, State};
use crate::topology::{CellId, CellKind, Cost, Topology};

/// One legal move: `pod` walks from `from` to `to` for `cost`, producing `next`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<const P: usize> {
    pub pod: Pod,
    pub from: CellId,
    pub to: CellId,
    pub cost: Cost,
    pub next: State<P>,
}

/// Enumerates every legal single-pod move out of `state`.
///
/// Pods are visited in id order and each pod's moves are produced when the
/// iterator reaches it. Pods that are done (in their own room with only their
/// own kind below) produce nothing.
///
/// # Examples
/// ```
/// use amphipod_solver::state::State;
/// use amphipod_solver::topology::Topology;
/// use amphipod_solver::transitions::transitions;
///
/// let burrow = Topology::folded();
/// let goal = State::<8>::goal(burrow).unwrap();
/// assert_eq!(transitions(burrow, &goal).count(), 0);
/// ```
pub fn transitions<'a, const P: usize>(
    topology: &'a Topology,
    state: &'a State<P>,
) -> impl Iterator<Item = Transition<P>> + 'a {
    let occupancy = state.occupancy(topology);
    topology
        .pods()
        .flat_map(move |pod| pod_transitions(topology, &occupancy, state, pod))
}

struct Step {
    cell: CellId,
    came_from: Option<CellId>,
    steps: Cost,
}

/// Walks `pod` outward from its cell with an explicit stack and collects every valid stop.
///
/// Only the previous cell of a walk is excluded from expansion; the burrow is a
/// tree, so a walk can never come back to a cell by any other route.
fn pod_transitions<const P: usize>(
    topology: &Topology,
    occupancy: &Occupancy,
    state: &State<P>,
    pod: Pod,
) -> Vec<Transition<P>> {
    let start = state.cell_of(pod.id);
    let start_cell = topology.cell(start);
    let started_in_hallway = matches!(start_cell.kind(), CellKind::Hallway);
    let start_room = match start_cell.kind() {
        CellKind::RoomInterior { room, .. } => Some(*room),
        _ => None,
    };

    let mut moves = Vec::new();
    let mut stack = vec![Step {
        cell: start,
        came_from: None,
        steps: 0,
    }];

    while let Some(step) = stack.pop() {
        // Settled in its own room: as the start cell this pod is done, further on
        // nothing below is free.
        if topology.is_home(step.cell, pod.kind) && topology.room_fully_settled(occupancy, step.cell)
        {
            continue;
        }

        for &next in topology.cell(step.cell).neighbours() {
            if Some(next) == step.came_from || occupancy.is_occupied(next) {
                continue;
            }

            let can_stop = match topology.cell(next).kind() {
                CellKind::Hallway => !started_in_hallway,
                CellKind::RoomExit { .. } => false,
                CellKind::RoomInterior { room, kind, .. } if *kind != pod.kind => {
                    if start_room != Some(*room) {
                        continue;
                    }
                    false
                }
                CellKind::RoomInterior { room, .. } => {
                    if start_room != Some(*room)
                        && topology.room_contains_wrong_kind(occupancy, next, pod.kind)
                    {
                        continue;
                    }
                    topology.room_fully_settled(occupancy, next)
                }
            };

            let steps = step.steps + 1;
            if can_stop {
                moves.push(Transition {
                    pod,
                    from: start,
                    to: next,
                    cost: steps * pod.step_cost(),
                    next: state.with_move(pod.id, next),
                });
            }
            stack.push(Step {
                cell: next,
                came_from: Some(step.cell),
                steps,
            });
        }
    }

    moves
}
