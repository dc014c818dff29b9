//! Burrow topology and the legality predicates built on it.
//!
//! This module defines the fixed part of the puzzle:
//! - `Kind`: the four pod kinds and their per-step movement cost.
//! - `Cell` / `CellKind`: a node of the burrow graph (hallway, room exit or room interior).
//! - `Topology`: the immutable cell table, the room metadata and the pod roster.
//!
//! A `Topology` is built once (see [`Topology::unfolded`] for the shared standard
//! burrow) and is only ever read afterwards. Every search, predicate and
//! renderer takes it by shared reference.
use std::sync::OnceLock;

use crate::error::TopologyError;
use crate::state::{Occupancy, Pod, PodId, State};

/// Index of a cell in a [`Topology`].
pub type CellId = usize;

/// Total movement cost. The largest burrows solve well below `u32::MAX`.
pub type Cost = u32;

/// Number of hallway cells in the standard burrow.
pub const STANDARD_HALLWAY_LEN: usize = 11;

/// Largest number of cells a topology may have; states store cell ids as `u8`.
pub const MAX_CELLS: usize = u8::MAX as usize + 1;

/// The kind of a pod, which decides both its step cost and its home room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Drawn as `A`, costs 1 per step.
    Amber,
    /// Drawn as `B`, costs 10 per step.
    Bronze,
    /// Drawn as `C`, costs 100 per step.
    Copper,
    /// Drawn as `D`, costs 1000 per step.
    Desert,
}

impl Kind {
    /// All kinds, in increasing order of step cost.
    pub const ALL: [Kind; 4] = [Kind::Amber, Kind::Bronze, Kind::Copper, Kind::Desert];

    /// Returns the cost a pod of this kind pays for a single step.
    ///
    /// # Examples
    ///
    /// ```
    /// use amphipod_solver::topology::Kind;
    /// assert_eq!(Kind::Amber.step_cost(), 1);
    /// assert_eq!(Kind::Desert.step_cost(), 1000);
    /// ```
    pub fn step_cost(self) -> Cost {
        match self {
            Kind::Amber => 1,
            Kind::Bronze => 10,
            Kind::Copper => 100,
            Kind::Desert => 1000,
        }
    }

    /// Converts the kind to the letter used in layout drawings.
    pub fn to_char(self) -> char {
        match self {
            Kind::Amber => 'A',
            Kind::Bronze => 'B',
            Kind::Copper => 'C',
            Kind::Desert => 'D',
        }
    }

    /// Parses a layout letter. Returns `None` for anything but `A`..`D`.
    pub fn from_char(symbol: char) -> Option<Kind> {
        match symbol {
            'A' => Some(Kind::Amber),
            'B' => Some(Kind::Bronze),
            'C' => Some(Kind::Copper),
            'D' => Some(Kind::Desert),
            _ => None,
        }
    }
}

/// What role a cell plays in the burrow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// A plain hallway cell. Pods may rest here between moves.
    Hallway,
    /// The hallway cell directly above a room. Pods pass over it but never stop on it.
    RoomExit { room: usize },
    /// A cell inside a room.
    ///
    /// `continuation` lists the cells of the same room that lie deeper than this
    /// one, ordered inward. It is empty for the innermost cell.
    RoomInterior {
        room: usize,
        kind: Kind,
        continuation: Vec<CellId>,
    },
}

/// A node of the burrow graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    kind: CellKind,
    neighbours: Vec<CellId>,
    row: usize,
    col: usize,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn kind(&self) -> &CellKind {
        &self.kind
    }

    /// Adjacent cells. The graph is undirected and every cell has at most three neighbours.
    pub fn neighbours(&self) -> &[CellId] {
        &self.neighbours
    }

    /// The `(row, column)` of this cell in a layout drawing.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// The room this cell belongs to or sits above, if any.
    pub fn room(&self) -> Option<usize> {
        match self.kind {
            CellKind::Hallway => None,
            CellKind::RoomExit { room } | CellKind::RoomInterior { room, .. } => Some(room),
        }
    }

    /// The kind allowed to settle in this cell. Only room interiors have one.
    pub fn room_kind(&self) -> Option<Kind> {
        match self.kind {
            CellKind::RoomInterior { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The deeper cells of this cell's room. Empty outside rooms.
    pub fn continuation(&self) -> &[CellId] {
        match &self.kind {
            CellKind::RoomInterior { continuation, .. } => continuation,
            _ => &[],
        }
    }
}

/// A side room: the hallway column it hangs below, its kind, and its cells from top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    column: usize,
    kind: Kind,
    cells: Vec<CellId>,
}

impl Room {
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Cells from the entrance inward.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Collects burrow parameters and validates them into a [`Topology`].
///
/// Hallway cells get ids `0..hallway_len`; room cells follow, room by room in
/// the order the rooms were added, each room from its entrance inward.
#[derive(Clone, Debug)]
pub struct TopologyBuilder {
    hallway_len: usize,
    depth: usize,
    rooms: Vec<(usize, Kind)>,
}

impl TopologyBuilder {
    /// Starts a burrow with a hallway of `hallway_len` cells and rooms `depth` cells deep.
    pub fn new(hallway_len: usize, depth: usize) -> Self {
        TopologyBuilder {
            hallway_len,
            depth,
            rooms: Vec::new(),
        }
    }

    /// Adds a room for `kind` below hallway cell `column`.
    pub fn room(mut self, column: usize, kind: Kind) -> Self {
        self.rooms.push((column, kind));
        self
    }

    /// Validates the parameters and builds the cell table.
    ///
    /// # Returns
    /// * `Ok(Topology)` with every adjacency list filled in both directions.
    /// * `Err(TopologyError)` if the hallway is empty, the depth is zero, there are no
    ///   rooms, a room column lies outside the hallway, two rooms share a column or a
    ///   kind, or the burrow would need more than [`MAX_CELLS`] cells.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let TopologyBuilder {
            hallway_len,
            depth,
            rooms,
        } = self;

        if hallway_len == 0 {
            return Err(TopologyError::EmptyHallway);
        }
        if depth == 0 {
            return Err(TopologyError::ZeroDepth);
        }
        if rooms.is_empty() {
            return Err(TopologyError::NoRooms);
        }
        for (i, &(column, kind)) in rooms.iter().enumerate() {
            if column >= hallway_len {
                return Err(TopologyError::ColumnOutOfRange {
                    column,
                    hallway_len,
                });
            }
            for &(other_column, other_kind) in &rooms[..i] {
                if other_column == column {
                    return Err(TopologyError::DuplicateColumn(column));
                }
                if other_kind == kind {
                    return Err(TopologyError::DuplicateKind(kind));
                }
            }
        }
        let total = hallway_len + rooms.len() * depth;
        if total > MAX_CELLS {
            return Err(TopologyError::TooManyCells {
                cells: total,
                max: MAX_CELLS,
            });
        }

        let room_entrance = |room: usize| hallway_len + room * depth;
        let mut cells = Vec::with_capacity(total);

        for id in 0..hallway_len {
            let mut neighbours = Vec::with_capacity(3);
            if id > 0 {
                neighbours.push(id - 1);
            }
            if id + 1 < hallway_len {
                neighbours.push(id + 1);
            }
            let kind = match rooms.iter().position(|&(column, _)| column == id) {
                Some(room) => {
                    neighbours.push(room_entrance(room));
                    CellKind::RoomExit { room }
                }
                None => CellKind::Hallway,
            };
            cells.push(Cell {
                id,
                kind,
                neighbours,
                row: 1,
                col: id + 1,
            });
        }

        let mut room_table = Vec::with_capacity(rooms.len());
        for (room, &(column, kind)) in rooms.iter().enumerate() {
            let entrance = room_entrance(room);
            let end = entrance + depth;
            for (level, id) in (entrance..end).enumerate() {
                let mut neighbours = vec![if level == 0 { column } else { id - 1 }];
                if id + 1 < end {
                    neighbours.push(id + 1);
                }
                cells.push(Cell {
                    id,
                    kind: CellKind::RoomInterior {
                        room,
                        kind,
                        continuation: (id + 1..end).collect(),
                    },
                    neighbours,
                    row: 2 + level,
                    col: column + 1,
                });
            }
            room_table.push(Room {
                column,
                kind,
                cells: (entrance..end).collect(),
            });
        }

        Ok(Topology {
            hallway_len,
            depth,
            cells,
            rooms: room_table,
        })
    }
}

/// The immutable burrow graph together with its pod roster.
///
/// The roster is implied by the rooms: each room holds `depth` pods of its kind, and
/// pod ids are grouped by room order, so pod `id` has the kind of room `id / depth`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    hallway_len: usize,
    depth: usize,
    cells: Vec<Cell>,
    rooms: Vec<Room>,
}

impl Topology {
    pub fn builder(hallway_len: usize, depth: usize) -> TopologyBuilder {
        TopologyBuilder::new(hallway_len, depth)
    }

    /// Builds the standard burrow: an 11-cell hallway with rooms for
    /// Amber, Bronze, Copper and Desert below columns 2, 4, 6 and 8.
    ///
    /// # Examples
    /// ```
    /// use amphipod_solver::topology::{CellKind, Topology};
    /// let burrow = Topology::standard(2).unwrap();
    /// assert_eq!(burrow.cell_count(), 19);
    /// assert_eq!(burrow.pod_count(), 8);
    /// assert!(matches!(burrow.cell(2).kind(), CellKind::RoomExit { room: 0 }));
    /// ```
    pub fn standard(depth: usize) -> Result<Topology, TopologyError> {
        Kind::ALL
            .iter()
            .enumerate()
            .fold(
                TopologyBuilder::new(STANDARD_HALLWAY_LEN, depth),
                |builder, (i, &kind)| builder.room(2 + 2 * i, kind),
            )
            .build()
    }

    /// The shared standard burrow with rooms two cells deep.
    pub fn folded() -> &'static Topology {
        static FOLDED: OnceLock<Topology> = OnceLock::new();
        FOLDED.get_or_init(|| Topology::standard(2).expect("standard burrow parameters are valid"))
    }

    /// The shared standard burrow with rooms four cells deep.
    pub fn unfolded() -> &'static Topology {
        static UNFOLDED: OnceLock<Topology> = OnceLock::new();
        UNFOLDED
            .get_or_init(|| Topology::standard(4).expect("standard burrow parameters are valid"))
    }

    /// Looks up a cell.
    ///
    /// # Panics
    /// Panics if `id` is not a cell of this burrow. Callers only ever pass ids
    /// taken from this topology, so a miss is a logic error.
    pub fn cell(&self, id: CellId) -> &Cell {
        self.cells.get(id).unwrap_or_else(|| {
            panic!(
                "invalid topology reference: cell {} in a burrow of {} cells",
                id,
                self.cells.len()
            )
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn hallway_len(&self) -> usize {
        self.hallway_len
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of undirected links in the graph.
    pub fn link_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighbours.len()).sum::<usize>() / 2
    }

    /// Number of pods a state on this burrow must place.
    pub fn pod_count(&self) -> usize {
        self.rooms.len() * self.depth
    }

    /// Returns the roster entry for pod `id`.
    ///
    /// # Panics
    /// Panics if `id >= pod_count()`.
    pub fn pod(&self, id: PodId) -> Pod {
        let room = self.rooms.get(id / self.depth).unwrap_or_else(|| {
            panic!(
                "pod {} does not exist in a burrow of {} pods",
                id,
                self.pod_count()
            )
        });
        Pod {
            id,
            kind: room.kind,
        }
    }

    /// Iterates over the whole roster in id order.
    pub fn pods(&self) -> impl Iterator<Item = Pod> + '_ {
        (0..self.pod_count()).map(move |id| self.pod(id))
    }

    /// True if `cell` is inside the room that accepts `kind`.
    pub fn is_home(&self, cell: CellId, kind: Kind) -> bool {
        self.cell(cell).room_kind() == Some(kind)
    }

    /// True iff every cell deeper than `cell` in its room holds a pod of the room's kind.
    ///
    /// A pod standing on such a cell of its own room never needs to move again.
    /// Always false for cells outside rooms.
    pub fn room_fully_settled(&self, occupancy: &Occupancy, cell: CellId) -> bool {
        match self.cell(cell).kind() {
            CellKind::RoomInterior {
                kind, continuation, ..
            } => continuation
                .iter()
                .all(|&deeper| occupancy.pod_at(deeper).is_some_and(|pod| pod.kind == *kind)),
            _ => false,
        }
    }

    /// True iff some cell deeper than `cell` in its room holds a pod whose kind is not `kind`.
    pub fn room_contains_wrong_kind(&self, occupancy: &Occupancy, cell: CellId, kind: Kind) -> bool {
        self.cell(cell)
            .continuation()
            .iter()
            .any(|&deeper| occupancy.pod_at(deeper).is_some_and(|pod| pod.kind != kind))
    }

    /// Returns a copy of this burrow with the link between `a` and `b` removed.
    ///
    /// Cutting a room off from its exit yields a burrow in which some layouts can
    /// never be solved.
    pub fn without_link(&self, a: CellId, b: CellId) -> Topology {
        let mut topology = self.clone();
        topology.cells[self.cell(a).id].neighbours.retain(|&n| n != b);
        topology.cells[self.cell(b).id].neighbours.retain(|&n| n != a);
        topology
    }

    /// Draws `state` the way layouts are written: `#` walls, `.` for free cells and
    /// the kind letter for pods.
    pub fn render<const P: usize>(&self, state: &State<P>) -> String {
        let width = self.hallway_len + 2;
        let height = self.depth + 3;
        let mut grid = vec![vec!['#'; width]; height];

        let occupancy = state.occupancy(self);
        for cell in &self.cells {
            grid[cell.row][cell.col] = occupancy
                .pod_at(cell.id)
                .map_or('.', |pod| pod.kind.to_char());
        }
        for row in grid.iter_mut().skip(3) {
            for col in [0, 1, width - 2, width - 1] {
                if col < width {
                    row[col] = ' ';
                }
            }
        }

        let mut output = String::new();
        for row in grid {
            output.extend(row);
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miniature() -> Topology {
        Topology::builder(5, 2)
            .room(1, Kind::Amber)
            .room(3, Kind::Bronze)
            .build()
            .unwrap()
    }

    #[test]
    fn test_kind_costs_strictly_increase() {
        let costs: Vec<Cost> = Kind::ALL.iter().map(|k| k.step_cost()).collect();
        assert_eq!(costs, vec![1, 10, 100, 1000]);
    }

    #[test]
    fn test_kind_char_conversion() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_char(kind.to_char()), Some(kind));
        }
        assert_eq!(Kind::from_char('.'), None);
        assert_eq!(Kind::from_char('a'), None);
    }

    #[test]
    fn test_standard_layout_matches_numbering() {
        let burrow = Topology::unfolded();
        assert_eq!(burrow.cell_count(), 27);
        assert_eq!(burrow.pod_count(), 16);
        assert_eq!(burrow.cell(0).neighbours(), &[1]);
        assert_eq!(burrow.cell(2).neighbours(), &[1, 3, 11]);
        assert_eq!(burrow.cell(8).neighbours(), &[7, 9, 23]);
        assert_eq!(burrow.cell(10).neighbours(), &[9]);
        assert_eq!(burrow.cell(11).neighbours(), &[2, 12]);
        assert_eq!(burrow.cell(14).neighbours(), &[13]);
        assert_eq!(burrow.cell(15).continuation(), &[16, 17, 18]);
        assert_eq!(burrow.cell(26).continuation(), &[] as &[CellId]);
        assert_eq!(burrow.cell(19).room_kind(), Some(Kind::Copper));
        assert_eq!(burrow.cell(6).room_kind(), None);
        assert_eq!(burrow.cell(6).room(), Some(2));
        assert_eq!(burrow.cell(5).room(), None);
    }

    #[test]
    fn test_cell_kinds() {
        let burrow = Topology::unfolded();
        let exits: Vec<CellId> = burrow
            .cells()
            .iter()
            .filter(|c| matches!(c.kind(), CellKind::RoomExit { .. }))
            .map(|c| c.id())
            .collect();
        assert_eq!(exits, vec![2, 4, 6, 8]);
        assert_eq!(*burrow.cell(5).kind(), CellKind::Hallway);
        assert_eq!(
            *burrow.cell(24).kind(),
            CellKind::RoomInterior {
                room: 3,
                kind: Kind::Desert,
                continuation: vec![25, 26],
            }
        );
    }

    #[test]
    fn test_adjacency_is_symmetric_and_bounded() {
        for burrow in [Topology::folded(), Topology::unfolded()] {
            for cell in burrow.cells() {
                assert!(cell.neighbours().len() <= 3);
                for &n in cell.neighbours() {
                    assert!(
                        burrow.cell(n).neighbours().contains(&cell.id()),
                        "link {} -> {} is one-way",
                        cell.id(),
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_standard_burrows_are_trees() {
        // A connected graph with one link fewer than it has cells has no cycles,
        // which is what lets a walk only guard against its previous cell.
        for burrow in [Topology::folded(), Topology::unfolded(), &miniature()] {
            assert_eq!(burrow.link_count(), burrow.cell_count() - 1);

            let mut seen = vec![false; burrow.cell_count()];
            let mut stack = vec![0];
            seen[0] = true;
            while let Some(id) = stack.pop() {
                for &n in burrow.cell(id).neighbours() {
                    if !seen[n] {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_pod_roster_follows_room_order() {
        let burrow = Topology::unfolded();
        let kinds: Vec<Kind> = burrow.pods().map(|p| p.kind).collect();
        assert_eq!(&kinds[0..4], &[Kind::Amber; 4]);
        assert_eq!(&kinds[4..8], &[Kind::Bronze; 4]);
        assert_eq!(kinds[15], Kind::Desert);
        assert_eq!(burrow.pod(9), Pod { id: 9, kind: Kind::Copper });
    }

    #[test]
    #[should_panic(expected = "invalid topology reference")]
    fn test_cell_out_of_range_panics() {
        Topology::folded().cell(19);
    }

    #[test]
    fn test_builder_rejects_bad_parameters() {
        assert_eq!(
            Topology::builder(0, 2).room(0, Kind::Amber).build(),
            Err(TopologyError::EmptyHallway)
        );
        assert_eq!(
            Topology::builder(5, 0).room(1, Kind::Amber).build(),
            Err(TopologyError::ZeroDepth)
        );
        assert_eq!(Topology::builder(5, 2).build(), Err(TopologyError::NoRooms));
        assert_eq!(
            Topology::builder(5, 2).room(5, Kind::Amber).build(),
            Err(TopologyError::ColumnOutOfRange {
                column: 5,
                hallway_len: 5
            })
        );
        assert_eq!(
            Topology::builder(5, 2)
                .room(1, Kind::Amber)
                .room(1, Kind::Bronze)
                .build(),
            Err(TopologyError::DuplicateColumn(1))
        );
        assert_eq!(
            Topology::builder(5, 2)
                .room(1, Kind::Amber)
                .room(3, Kind::Amber)
                .build(),
            Err(TopologyError::DuplicateKind(Kind::Amber))
        );
    }

    #[test]
    fn test_builder_rejects_oversized_burrow() {
        assert_eq!(
            Topology::builder(200, 60).room(1, Kind::Amber).build(),
            Err(TopologyError::TooManyCells {
                cells: 260,
                max: MAX_CELLS
            })
        );
    }

    #[test]
    fn test_room_fully_settled() {
        let burrow = miniature();
        // Amber pods are 0 and 1, Bronze pods are 2 and 3.
        let state = State::<4>::from_positions(&burrow, [6, 7, 5, 8]).unwrap();
        let occupancy = state.occupancy(&burrow);

        // Bottom of each room: nothing deeper, so trivially settled.
        assert!(burrow.room_fully_settled(&occupancy, 6));
        assert!(burrow.room_fully_settled(&occupancy, 8));
        // Amber room top: Amber below.
        assert!(burrow.room_fully_settled(&occupancy, 5));
        // Bronze room top: Bronze below.
        assert!(burrow.room_fully_settled(&occupancy, 7));
        // Hallway and exits never count as settled.
        assert!(!burrow.room_fully_settled(&occupancy, 0));
        assert!(!burrow.room_fully_settled(&occupancy, 1));

        let mixed = State::<4>::from_positions(&burrow, [5, 7, 6, 8]).unwrap();
        let occupancy = mixed.occupancy(&burrow);
        assert!(!burrow.room_fully_settled(&occupancy, 5));

        let hollow = State::<4>::from_positions(&burrow, [5, 0, 2, 8]).unwrap();
        let occupancy = hollow.occupancy(&burrow);
        assert!(!burrow.room_fully_settled(&occupancy, 5));
    }

    #[test]
    fn test_room_contains_wrong_kind() {
        let burrow = miniature();
        let state = State::<4>::from_positions(&burrow, [0, 7, 6, 8]).unwrap();
        let occupancy = state.occupancy(&burrow);

        assert!(burrow.room_contains_wrong_kind(&occupancy, 5, Kind::Amber));
        assert!(!burrow.room_contains_wrong_kind(&occupancy, 5, Kind::Bronze));
        assert!(!burrow.room_contains_wrong_kind(&occupancy, 7, Kind::Bronze));
        assert!(burrow.room_contains_wrong_kind(&occupancy, 7, Kind::Amber));
        // Empty continuation never holds anyone.
        assert!(!burrow.room_contains_wrong_kind(&occupancy, 6, Kind::Amber));
    }

    #[test]
    fn test_without_link_removes_both_directions() {
        let burrow = miniature();
        let cut = burrow.without_link(3, 7);
        assert_eq!(cut.cell(3).neighbours(), &[2, 4]);
        assert_eq!(cut.cell(7).neighbours(), &[8]);
        assert_eq!(cut.link_count(), burrow.link_count() - 1);
        // The original is untouched.
        assert_eq!(burrow.cell(3).neighbours(), &[2, 4, 7]);
    }

    #[test]
    fn test_render_standard_goal() {
        let burrow = Topology::folded();
        let goal = State::<8>::goal(burrow).unwrap();
        let expected = concat!(
            "#############\n",
            "#...........#\n",
            "###A#B#C#D###\n",
            "  #A#B#C#D#  \n",
            "  #########  \n",
        );
        assert_eq!(burrow.render(&goal), expected);
    }
}
