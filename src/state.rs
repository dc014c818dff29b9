//! Pods, states and the occupancy view used by the legality predicates.
use crate::error::LayoutError;
use crate::topology::{CellId, Cost, Kind, Topology};

/// Index of a pod in the roster of a [`Topology`].
pub type PodId = usize;

/// A pod of the roster. Pods are never created or destroyed by moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pod {
    pub id: PodId,
    pub kind: Kind,
}

impl Pod {
    pub fn step_cost(&self) -> Cost {
        self.kind.step_cost()
    }
}

/// A complete assignment of every pod to a cell.
///
/// `P` is the number of pods and must equal the `pod_count()` of the topology the
/// state is used with; constructors check this. States are plain values: they hash
/// and compare by their assignment, and order lexicographically by it, which keeps
/// frontier tie-breaking deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State<const P: usize> {
    positions: [u8; P],
}

impl<const P: usize> State<P> {
    /// Builds a state from a cell per pod, indexed by pod id.
    ///
    /// # Returns
    /// * `Ok(State)` if the burrow has exactly `P` pods and every cell exists and is used once.
    /// * `Err(LayoutError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// use amphipod_solver::state::State;
    /// use amphipod_solver::topology::Topology;
    ///
    /// let burrow = Topology::folded();
    /// let state = State::<8>::from_positions(burrow, [11, 12, 13, 14, 15, 16, 17, 18]).unwrap();
    /// assert!(state.is_goal(burrow));
    /// assert!(State::<8>::from_positions(burrow, [11, 11, 13, 14, 15, 16, 17, 18]).is_err());
    /// ```
    pub fn from_positions(topology: &Topology, positions: [CellId; P]) -> Result<Self, LayoutError> {
        check_pod_count::<P>(topology)?;

        let mut owner: Vec<Option<PodId>> = vec![None; topology.cell_count()];
        for (pod, &cell) in positions.iter().enumerate() {
            let slot = owner.get_mut(cell).ok_or(LayoutError::UnknownCell {
                cell,
                cells: topology.cell_count(),
            })?;
            if let Some(first) = *slot {
                return Err(LayoutError::DuplicateCell {
                    cell,
                    first,
                    second: pod,
                });
            }
            *slot = Some(pod);
        }

        // Topologies never exceed MAX_CELLS, so every checked id fits a u8.
        Ok(State {
            positions: positions.map(|cell| cell as u8),
        })
    }

    /// The solved state: every pod in its own room, lower ids nearer the entrance.
    pub fn goal(topology: &Topology) -> Result<Self, LayoutError> {
        check_pod_count::<P>(topology)?;
        let depth = topology.depth();
        let mut positions = [0; P];
        for (pod, cell) in positions.iter_mut().enumerate() {
            *cell = topology.rooms()[pod / depth].cells()[pod % depth];
        }
        State::from_positions(topology, positions)
    }

    /// The cell pod `pod` currently occupies.
    pub fn cell_of(&self, pod: PodId) -> CellId {
        self.positions[pod] as CellId
    }

    /// Cells indexed by pod id.
    pub fn positions(&self) -> impl Iterator<Item = CellId> + '_ {
        self.positions.iter().map(|&cell| cell as CellId)
    }

    /// Returns a copy of this state with `pod` moved to `cell`.
    ///
    /// # Panics
    /// Panics if another pod already occupies `cell`; transition generation never
    /// proposes such a move.
    pub fn with_move(&self, pod: PodId, cell: CellId) -> Self {
        let target = cell as u8;
        if let Some(other) = self.positions.iter().position(|&c| c == target) {
            assert!(
                other == pod,
                "pod {} moved into cell {} held by pod {}",
                pod,
                cell,
                other
            );
        }
        let mut next = *self;
        next.positions[pod] = target;
        next
    }

    /// Builds the cell → pod view of this state.
    pub fn occupancy(&self, topology: &Topology) -> Occupancy {
        let mut slots = vec![None; topology.cell_count()];
        for (id, &cell) in self.positions.iter().enumerate() {
            slots[cell as usize] = Some(topology.pod(id));
        }
        Occupancy { slots }
    }

    /// True when every pod sits in a room of its own kind.
    pub fn is_goal(&self, topology: &Topology) -> bool {
        topology
            .pods()
            .all(|pod| topology.is_home(self.cell_of(pod.id), pod.kind))
    }

    /// Indices of the pods whose cells differ between `self` and `other`.
    pub fn moved_pods(&self, other: &Self) -> Vec<PodId> {
        (0..P)
            .filter(|&pod| self.positions[pod] != other.positions[pod])
            .collect()
    }
}

fn check_pod_count<const P: usize>(topology: &Topology) -> Result<(), LayoutError> {
    if topology.pod_count() != P {
        return Err(LayoutError::PodCountMismatch {
            expected: topology.pod_count(),
            actual: P,
        });
    }
    Ok(())
}

/// Which pod, if any, stands on each cell of a state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    slots: Vec<Option<Pod>>,
}

impl Occupancy {
    pub fn pod_at(&self, cell: CellId) -> Option<Pod> {
        self.slots[cell]
    }

    pub fn is_occupied(&self, cell: CellId) -> bool {
        self.slots[cell].is_some()
    }
}
