//! Back-substitution of branch currents into the circuit.

use std::collections::VecDeque;

use super::clean;
use super::topology::Topology;
use crate::circuit::{BranchId, Circuit};

/// Give every component of each branch the branch current.
///
/// A component's direction is the terminal the current actually flows into,
/// so stored currents are never negative.
pub fn distribute_currents(circuit: &mut Circuit, topology: &Topology, currents: &[f64]) {
    for (b, branch) in topology.branches().iter().enumerate() {
        let i = currents[b];
        for &(id, exit) in &branch.components {
            let Some(component) = circuit.component_mut(id) else {
                continue;
            };
            let direction = if i < 0.0 {
                component.other_end(exit).unwrap_or(exit)
            } else {
                exit
            };
            component.set_solution(i.abs(), direction, BranchId(b));
        }
    }
}

/// Assign terminal potentials by walking outward from the reference terminal.
///
/// Crossing a component toward terminal `to` changes the potential by its
/// source rise minus the IR drop of the current flowing toward `to`.
/// Terminals the walk never reaches keep the unassigned sentinel.
pub fn assign_potentials(circuit: &mut Circuit, topology: &Topology) {
    let reference = topology.reference();
    circuit.terminal_mut(reference).set_potential(0.0);

    let mut queue = VecDeque::from([reference]);
    while let Some(at) = queue.pop_front() {
        let here = circuit.terminal(at).potential();
        let mut reached = Vec::new();

        for &id in circuit.terminal(at).connections() {
            if !topology.is_live(id) {
                continue;
            }
            let Some(component) = circuit.component(id) else {
                continue;
            };
            let Some(next) = component.other_end(at) else {
                continue;
            };
            if circuit.terminal(next).assigned_potential().is_some()
                || reached.iter().any(|(t, _)| *t == next)
            {
                continue;
            }
            let drop = component.current_toward(next) * component.resistance();
            reached.push((next, here + component.emf_toward(next) - drop));
        }

        for (next, potential) in reached {
            circuit.terminal_mut(next).set_potential(clean(potential));
            queue.push_back(next);
        }
    }
}
