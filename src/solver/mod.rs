//! Kirchhoff solver.
//!
//! This module turns a [`Circuit`] into branch currents and terminal
//! potentials.
//!
//! ## Method
//!
//! 1. Reduce the topology ([`Topology`]): prune dead ends, find junction
//!    nodes, contract series chains into branches, pick independent loops.
//! 2. Assemble one equation per branch current: KCL at all nodes but one,
//!    KVL around every independent loop.
//! 3. Solve the square system by Gaussian elimination.
//! 4. Push the branch currents back onto components and walk the graph from
//!    a battery's negative end to assign potentials.
//!
//! Any failure along the way is reported as the single
//! [`CircuitError::ShortOrIncompleteCircuit`](crate::error::CircuitError)
//! category; the specific cause is logged at debug level.

mod backsub;
mod kirchhoff;
mod linear;
mod topology;

pub use kirchhoff::assemble;
pub use linear::LinearSystem;
pub use topology::{find_nodes, prune_dead_ends, Branch, Loop, Topology};

use crate::circuit::{Circuit, TerminalId};
use crate::error::Result;

/// Currents and potentials smaller than this are reported as zero.
pub const CURRENT_EPSILON: f64 = 1e-8;

/// Relative pivot size below which the system counts as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Flush elimination round-off to zero.
pub fn clean(value: f64) -> f64 {
    if value.abs() < CURRENT_EPSILON {
        0.0
    } else {
        value
    }
}

/// Solve the circuit in place.
///
/// On success every surviving component carries its current, direction and
/// branch, every reachable terminal its potential, and the signed branch
/// currents are returned. On failure all solved state is cleared.
pub fn solve(circuit: &mut Circuit) -> Result<Vec<f64>> {
    circuit.reset_solution();

    let topology = Topology::analyze(circuit)?;
    let mut system = assemble(&topology);
    log::debug!("system:\n{system}");

    system.factor()?;
    system.solve()?;

    let currents: Vec<f64> = system.x.iter().copied().map(clean).collect();
    log::debug!("branch currents: {currents:?}");

    backsub::distribute_currents(circuit, &topology, &currents);
    backsub::assign_potentials(circuit, &topology);
    circuit.set_num_branches(topology.branches().len());

    Ok(currents)
}

impl Circuit {
    /// Solve for every component's current and every terminal's potential.
    ///
    /// See [`solve`](crate::solver::solve).
    pub fn solve(&mut self) -> Result<Vec<f64>> {
        solve(self)
    }

    /// Reduced topology of the circuit as it stands.
    pub fn topology(&self) -> Result<Topology> {
        Topology::analyze(self)
    }

    /// Junction terminals after dead-end pruning.
    pub fn find_nodes(&self) -> Vec<TerminalId> {
        find_nodes(self)
    }
}
