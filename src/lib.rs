//! # Amphipod Burrow Solver Library
//!
//! This library finds the cheapest way to sort pods of four kinds into their
//! side rooms. Pods move through a hallway; each kind pays its own cost per step
//! (1, 10, 100 or 1000), and rooms, exits and the hallway constrain where a pod
//! may stop.
//!
//! It is used by two binaries:
//! - `amphipod_solver`: Reads a burrow drawing, optionally unfolds it, and prints
//!   the minimal cost together with the winning move sequence.
//! - `scramble_evaluator`: Solves a batch of seeded random burrows and reports
//!   cost and search-effort statistics.
//!
//! ## Modules
//! - `topology`: The fixed burrow graph (`Topology`, `Cell`, `Kind`) and the legality
//!   predicates `room_fully_settled` and `room_contains_wrong_kind`.
//! - `state`: Pods, the per-pod cell assignment (`State`) and its occupancy view.
//! - `transitions`: Enumerates every legal single-pod move from a state.
//! - `solver`: Uniform-cost search (`solve`, `Search`) with optional limits.
//! - `scramble`: Seeded random burrows.
//! - `utils`: Parsing layout drawings into states.
//! - `error`: Error types shared by the modules above.

pub mod error;
pub mod scramble;
pub mod solver;
pub mod state;
pub mod topology;
pub mod transitions;
pub mod utils;

pub use crate::error::{LayoutError, SearchError, TopologyError};
pub use crate::solver::{solve, Outcome, SearchConfig, Solution};
pub use crate::state::State;
pub use crate::topology::{Kind, Topology};
