//! Error types for the burrow solver.
//!
//! Each enum covers one concern: building a topology, reading a layout,
//! and running a bounded search. Internal invariant violations (a bad cell
//! id, a move into an occupied cell) are not represented here; they panic.

use std::time::Duration;

use thiserror::Error;

use crate::topology::{CellId, Kind};

/// Invalid parameters passed to [`crate::topology::TopologyBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("hallway must have at least one cell")]
    EmptyHallway,

    #[error("rooms must be at least one cell deep")]
    ZeroDepth,

    #[error("burrow has no rooms")]
    NoRooms,

    /// A room was attached below a column the hallway does not have.
    #[error("room column {column} is outside a hallway of {hallway_len} cells")]
    ColumnOutOfRange { column: usize, hallway_len: usize },

    #[error("two rooms share hallway column {0}")]
    DuplicateColumn(usize),

    #[error("two rooms accept kind {0:?}")]
    DuplicateKind(Kind),

    /// Cell ids are stored as `u8` inside states.
    #[error("burrow needs {cells} cells, at most {max} are supported")]
    TooManyCells { cells: usize, max: usize },
}

/// A layout drawing or position list that does not describe a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unrecognized symbol '{symbol}' at row {row} col {col}")]
    UnexpectedSymbol { row: usize, col: usize, symbol: char },

    /// The drawing ends before a cell's drawing position.
    #[error("drawing has no character at row {row} col {col}")]
    Truncated { row: usize, col: usize },

    #[error("more than {expected} pods of kind {kind:?} in layout")]
    TooManyPods { kind: Kind, expected: usize },

    #[error("{count} pod(s) left without a cell")]
    UnassignedPods { count: usize },

    #[error("burrow holds {expected} pods, state type holds {actual}")]
    PodCountMismatch { expected: usize, actual: usize },

    #[error("cell {cell} is assigned to pods {first} and {second}")]
    DuplicateCell {
        cell: CellId,
        first: usize,
        second: usize,
    },

    #[error("cell {cell} does not exist in a burrow of {cells} cells")]
    UnknownCell { cell: CellId, cells: usize },
}

/// A search abandoned before it could reach a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("gave up after {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("deadline of {limit:?} exceeded after {expansions} expansions")]
    DeadlineExceeded { limit: Duration, expansions: usize },
}
