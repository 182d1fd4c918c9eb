//! Assembly of the Kirchhoff equations.

use super::linear::LinearSystem;
use super::topology::Topology;

/// Build the square system over branch currents.
///
/// Rows, in order:
/// - KCL at every node but the last: currents arriving minus currents
///   leaving sum to zero. The dropped equation is implied by the others.
/// - KVL around every independent loop: the signed IR drops equal the
///   signed source rises met along the traversal.
pub fn assemble(topology: &Topology) -> LinearSystem {
    let branches = topology.branches();
    let nodes = topology.nodes();
    let mut system = LinearSystem::new(branches.len());
    let mut row = 0;

    for &node in &nodes[..nodes.len().saturating_sub(1)] {
        for (col, branch) in branches.iter().enumerate() {
            if branch.to == node {
                system.add(row, col, 1.0);
            }
            if branch.from == node {
                system.add(row, col, -1.0);
            }
        }
        row += 1;
    }

    for l in topology.loops() {
        for &(b, sign) in &l.steps {
            let branch = &branches[b.0];
            system.add(row, b.0, sign * branch.resistance);
            system.add_source(row, sign * branch.emf);
        }
        row += 1;
    }

    debug_assert_eq!(row, branches.len(), "Kirchhoff system must be square");
    system
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, TerminalId};
    use crate::components::Component;

    fn t(row: usize, col: usize) -> TerminalId {
        TerminalId::new(row, col)
    }

    #[test]
    fn test_single_loop_equation() {
        let mut c = Circuit::new(2, 2);
        c.add_battery(Component::battery(6.0), t(0, 0), t(1, 0), t(0, 0)).unwrap();
        c.add_component(Component::wire(), t(0, 0), t(0, 1)).unwrap();
        c.add_component(Component::resistor(10.0), t(0, 1), t(1, 1)).unwrap();
        c.add_component(Component::wire(), t(1, 1), t(1, 0)).unwrap();

        let topo = Topology::analyze(&c).unwrap();
        let sys = assemble(&topo);

        // One loop, no KCL rows: 10 I = 6 with the walk starting through the battery
        assert_eq!(sys.size, 1);
        assert_eq!(sys.get(0, 0), 10.0);
        assert_eq!(sys.z[0], 6.0);
    }

    #[test]
    fn test_kcl_rows_sum_to_zero_per_column_pair() {
        let mut c = Circuit::new(3, 3);
        c.add_battery(Component::battery(6.0), t(1, 0), t(2, 0), t(1, 0)).unwrap();
        c.add_component(Component::wire(), t(1, 0), t(1, 1)).unwrap();
        c.add_component(Component::wire(), t(2, 0), t(2, 1)).unwrap();
        c.add_component(Component::resistor(10.0), t(1, 1), t(2, 1)).unwrap();
        c.add_component(Component::wire(), t(1, 1), t(1, 2)).unwrap();
        c.add_component(Component::wire(), t(2, 1), t(2, 2)).unwrap();
        c.add_component(Component::resistor(10.0), t(1, 2), t(2, 2)).unwrap();

        let topo = Topology::analyze(&c).unwrap();
        let sys = assemble(&topo);
        assert_eq!(sys.size, 3);

        // The single KCL row touches every branch exactly once with a unit coefficient
        for col in 0..3 {
            assert_eq!(sys.get(0, col).abs(), 1.0);
        }
        assert_eq!(sys.z[0], 0.0);
    }
}
