//! # CircuitVision
//!
//! Kirchhoff solver for resistive DC circuits built on a grid of terminals.
//!
//! This library provides:
//! - A terminal grid where wires, resistors and batteries are placed
//!   between pairs of terminals
//! - Topology reduction: dead-end pruning, branch contraction, node and
//!   independent loop discovery
//! - Branch-current analysis with Kirchhoff's current and voltage laws
//! - Per-component current and direction, and per-terminal potential
//!
//! ## Architecture
//!
//! - [`circuit`] - Terminal grid and the circuit container
//! - [`components`] - Wire, resistor and battery models
//! - [`solver`] - Topology reduction, equation assembly and solving
//! - [`layout`] - Text format describing a circuit on the grid
//!
//! ## Usage
//!
//! ```
//! use circuit_vision::{Circuit, Component, TerminalId};
//!
//! let mut circuit = Circuit::new(2, 2);
//! let t = TerminalId::new;
//! circuit.add_battery(Component::battery(6.0), t(0, 0), t(1, 0), t(0, 0)).unwrap();
//! circuit.add_component(Component::wire(), t(0, 0), t(0, 1)).unwrap();
//! let r = circuit.add_component(Component::resistor(10.0), t(0, 1), t(1, 1)).unwrap();
//! circuit.add_component(Component::wire(), t(1, 1), t(1, 0)).unwrap();
//!
//! circuit.solve().unwrap();
//! let amps = circuit.component(r).unwrap().current();
//! assert!((amps - 0.6).abs() < 1e-9);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! circuitvision demos/parallel.layout --verbose
//! ```

pub mod circuit;
pub mod components;
pub mod error;
pub mod layout;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{BranchId, Circuit, ComponentId, Terminal, TerminalId, UNASSIGNED_POTENTIAL};
pub use components::{Battery, Component, ComponentKind};
pub use error::{CircuitError, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;

/// Default number of terminal rows
pub const DEFAULT_ROWS: usize = 4;

/// Default number of terminal columns
pub const DEFAULT_COLS: usize = 4;
