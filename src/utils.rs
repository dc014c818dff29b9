use crate::error::LayoutError;
use crate::state::State;
use crate::topology::{Kind, Topology};

/// Room rows inserted by [`unfold_rows`] below the first room row of a folded drawing.
pub const UNFOLDED_ROWS: [&str; 2] = ["  #D#C#B#A#", "  #D#B#A#C#"];

/// Parses a layout drawing into a `State` on `topology`.
///
/// Every cell of the topology is looked up at its drawing position. A kind letter
/// (`A`..`D`) places the next unassigned pod of that kind there, in cell-id order;
/// `.` leaves the cell empty. Characters outside cell positions (walls, padding) are
/// never read.
///
/// # Arguments
/// * `topology`: The burrow the drawing describes.
/// * `rows`: The drawing, one string per row, starting with the top wall.
///
/// # Returns
/// * `Ok(State)` if every pod of the roster was placed exactly once.
/// * `Err(LayoutError)` if:
///     - `P` does not match the burrow's pod count.
///     - A cell position lies beyond the end of the drawing.
///     - A cell position holds something other than `.` or `A`..`D`.
///     - A kind appears more often than its room has cells.
///     - Some pods were never placed.
///
/// # Examples
/// ```
/// use amphipod_solver::state::State;
/// use amphipod_solver::topology::Topology;
/// use amphipod_solver::utils::state_from_str_array;
///
/// let rows = [
///     "#############",
///     "#...........#",
///     "###B#C#B#D###",
///     "  #A#D#C#A#",
///     "  #########",
/// ];
/// let state: State<8> = state_from_str_array(Topology::folded(), &rows).unwrap();
/// assert_eq!(state.cell_of(0), 12); // first Amber pod, bottom of the Amber room
///
/// let missing_pod = ["#############", "#...........#", "###B#C#B#D###", "  #A#D#C#.#"];
/// assert!(state_from_str_array::<8>(Topology::folded(), &missing_pod).is_err());
/// ```
pub fn state_from_str_array<const P: usize>(
    topology: &Topology,
    rows: &[&str],
) -> Result<State<P>, LayoutError> {
    if topology.pod_count() != P {
        return Err(LayoutError::PodCountMismatch {
            expected: topology.pod_count(),
            actual: P,
        });
    }

    let depth = topology.depth();
    let mut placed = vec![0usize; topology.rooms().len()];
    let mut positions = [0; P];

    for cell in topology.cells() {
        let (row, col) = cell.position();
        let symbol = rows
            .get(row)
            .and_then(|line| line.chars().nth(col))
            .ok_or(LayoutError::Truncated { row, col })?;
        if symbol == '.' {
            continue;
        }

        let kind = Kind::from_char(symbol).ok_or(LayoutError::UnexpectedSymbol { row, col, symbol })?;
        // Pods of a kind are the ids belonging to that kind's room.
        let room = topology
            .rooms()
            .iter()
            .position(|room| room.kind() == kind)
            .ok_or(LayoutError::TooManyPods { kind, expected: 0 })?;
        if placed[room] == depth {
            return Err(LayoutError::TooManyPods {
                kind,
                expected: depth,
            });
        }
        positions[room * depth + placed[room]] = cell.id();
        placed[room] += 1;
    }

    let missing: usize = placed.iter().map(|&n| depth - n).sum();
    if missing > 0 {
        return Err(LayoutError::UnassignedPods { count: missing });
    }
    State::from_positions(topology, positions)
}

/// Inserts [`UNFOLDED_ROWS`] after the first room row, turning a drawing of a
/// burrow with two-deep rooms into one with four-deep rooms.
///
/// Drawings with fewer than three rows are returned unchanged.
pub fn unfold_rows(rows: &[&str]) -> Vec<String> {
    if rows.len() < 3 {
        return rows.iter().map(|row| row.to_string()).collect();
    }
    rows[..3]
        .iter()
        .chain(UNFOLDED_ROWS.iter())
        .chain(rows[3..].iter())
        .map(|row| row.to_string())
        .collect()
}

/// Infers the room depth from a drawing: top wall, hallway, one row per room
/// level, bottom wall. Blank lines are ignored.
///
/// Returns `None` if the drawing is too short to contain any room level.
pub fn depth_of_rows(rows: &[&str]) -> Option<usize> {
    let lines = rows.iter().filter(|row| !row.trim().is_empty()).count();
    if lines < 4 {
        return None;
    }
    Some(lines - 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDED_EXAMPLE: [&str; 5] = [
        "#############",
        "#...........#",
        "###B#C#B#D###",
        "  #A#D#C#A#",
        "  #########",
    ];

    #[test]
    fn test_state_from_str_array_assigns_pods_in_cell_order() {
        let state: State<8> = state_from_str_array(Topology::folded(), &FOLDED_EXAMPLE).unwrap();
        let positions: Vec<usize> = state.positions().collect();
        assert_eq!(positions, vec![12, 18, 11, 15, 13, 16, 14, 17]);
    }

    #[test]
    fn test_state_from_str_array_reads_hallway() {
        let rows = [
            "#############",
            "#.A.......D.#",
            "###.#B#C#.###",
            "  #A#B#C#D#",
            "  #########",
        ];
        let state: State<8> = state_from_str_array(Topology::folded(), &rows).unwrap();
        assert_eq!(state.cell_of(0), 1);
        assert_eq!(state.cell_of(1), 12);
        assert_eq!(state.cell_of(6), 9);
        assert_eq!(state.cell_of(7), 18);
    }

    #[test]
    fn test_state_from_str_array_unassigned_pod() {
        let mut rows = FOLDED_EXAMPLE;
        rows[3] = "  #A#D#C#.#";
        assert_eq!(
            state_from_str_array::<8>(Topology::folded(), &rows),
            Err(LayoutError::UnassignedPods { count: 1 })
        );
    }

    #[test]
    fn test_state_from_str_array_too_many_pods() {
        let mut rows = FOLDED_EXAMPLE;
        rows[1] = "#A..........#";
        assert_eq!(
            state_from_str_array::<8>(Topology::folded(), &rows),
            Err(LayoutError::TooManyPods {
                kind: Kind::Amber,
                expected: 2
            })
        );
    }

    #[test]
    fn test_state_from_str_array_unrecognized_symbol() {
        let mut rows = FOLDED_EXAMPLE;
        rows[2] = "###B#X#B#D###";
        assert_eq!(
            state_from_str_array::<8>(Topology::folded(), &rows),
            Err(LayoutError::UnexpectedSymbol {
                row: 2,
                col: 5,
                symbol: 'X'
            })
        );
    }

    #[test]
    fn test_state_from_str_array_truncated() {
        let result = state_from_str_array::<8>(Topology::folded(), &FOLDED_EXAMPLE[..3]);
        assert_eq!(result, Err(LayoutError::Truncated { row: 3, col: 3 }));
    }

    #[test]
    fn test_state_from_str_array_wrong_pod_count() {
        assert_eq!(
            state_from_str_array::<16>(Topology::folded(), &FOLDED_EXAMPLE),
            Err(LayoutError::PodCountMismatch {
                expected: 8,
                actual: 16
            })
        );
    }

    #[test]
    fn test_rendered_state_parses_back() {
        let burrow = Topology::unfolded();
        let state = State::<16>::goal(burrow).unwrap().with_move(5, 0).with_move(10, 7);
        let drawing = burrow.render(&state);
        let rows: Vec<&str> = drawing.lines().collect();
        let parsed: State<16> = state_from_str_array(burrow, &rows).unwrap();
        assert_eq!(burrow.render(&parsed), drawing);
    }

    #[test]
    fn test_unfold_rows() {
        let unfolded = unfold_rows(&FOLDED_EXAMPLE);
        assert_eq!(
            unfolded,
            vec![
                "#############",
                "#...........#",
                "###B#C#B#D###",
                "  #D#C#B#A#",
                "  #D#B#A#C#",
                "  #A#D#C#A#",
                "  #########",
            ]
        );
        let rows: Vec<&str> = unfolded.iter().map(String::as_str).collect();
        assert_eq!(depth_of_rows(&rows), Some(4));
        assert!(state_from_str_array::<16>(Topology::unfolded(), &rows).is_ok());
    }

    #[test]
    fn test_depth_of_rows() {
        assert_eq!(depth_of_rows(&FOLDED_EXAMPLE), Some(2));
        assert_eq!(depth_of_rows(&["#####", "", "#...#", "#####"]), None);
        assert_eq!(depth_of_rows(&[]), None);
    }
}
