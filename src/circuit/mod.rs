//! Circuit graph representation.
//!
//! This module provides the terminal grid and the [`Circuit`] container that
//! owns every terminal and component. Topology edits happen here; solving
//! lives in [`crate::solver`].

mod graph;
mod terminal;
mod types;
mod validate;

pub use graph::Circuit;
pub use terminal::{Terminal, UNASSIGNED_POTENTIAL};
pub use types::*;
pub use validate::{validate_component, validate_placement};
