//! End-to-end checks: layouts in, currents and potentials out.

use approx::assert_abs_diff_eq;
use circuit_vision::{layout, Circuit, CircuitError, Component, TerminalId, UNASSIGNED_POTENTIAL};

fn t(row: usize, col: usize) -> TerminalId {
    TerminalId::new(row, col)
}

fn load(text: &str) -> Circuit {
    let layout = layout::parse(text).unwrap();
    Circuit::from_layout(&layout).unwrap()
}

fn current_between(circuit: &Circuit, a: TerminalId, b: TerminalId) -> f64 {
    let id = circuit.get_component(a, b).unwrap();
    circuit.component(id).unwrap().current()
}

fn assert_current_conserved(circuit: &Circuit) {
    for terminal in circuit.terminals() {
        let net: f64 = terminal
            .connections()
            .iter()
            .filter_map(|&id| circuit.component(id))
            .map(|c| c.current_toward(terminal.id()))
            .sum();
        assert_abs_diff_eq!(net, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn parallel_demo() {
    let mut circuit = load(include_str!("../demos/parallel.layout"));
    circuit.solve().unwrap();

    assert_eq!(circuit.num_branches(), 4);
    assert_abs_diff_eq!(current_between(&circuit, t(1, 0), t(2, 0)), 1.8, epsilon = 1e-9);
    for col in 1..=3 {
        assert_abs_diff_eq!(current_between(&circuit, t(1, col), t(2, col)), 0.6, epsilon = 1e-9);
    }

    let battery = circuit.get_component(t(1, 0), t(2, 0)).unwrap();
    assert_eq!(
        circuit.component(battery).unwrap().current_direction(),
        Some(t(1, 0))
    );
    assert_abs_diff_eq!(circuit.terminal(t(2, 0)).potential(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(circuit.terminal(t(1, 0)).potential(), 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(circuit.terminal(t(1, 3)).potential(), 6.0, epsilon = 1e-9);
    assert_current_conserved(&circuit);
}

#[test]
fn danglers_demo() {
    let mut circuit = load(include_str!("../demos/danglers.layout"));
    circuit.solve().unwrap();

    assert_eq!(circuit.num_branches(), 3);
    assert_abs_diff_eq!(current_between(&circuit, t(1, 0), t(2, 0)), 1.2, epsilon = 1e-9);
    assert_abs_diff_eq!(current_between(&circuit, t(1, 1), t(2, 1)), 0.6, epsilon = 1e-9);
    assert_abs_diff_eq!(current_between(&circuit, t(1, 2), t(2, 2)), 0.6, epsilon = 1e-9);

    for (a, b) in [(t(0, 3), t(1, 3)), (t(0, 2), t(0, 3)), (t(2, 2), t(2, 3))] {
        let id = circuit.get_component(a, b).unwrap();
        let dangler = circuit.component(id).unwrap();
        assert_eq!(dangler.current(), 0.0);
        assert_eq!(dangler.branch(), None);
        assert_eq!(dangler.current_direction(), None);
    }
    assert_eq!(circuit.terminal(t(1, 3)).potential(), UNASSIGNED_POTENTIAL);
    assert_eq!(circuit.terminal(t(2, 3)).potential(), UNASSIGNED_POTENTIAL);
    assert_current_conserved(&circuit);
}

#[test]
fn short_demo_is_rejected() {
    let mut circuit = load(include_str!("../demos/short.layout"));
    assert!(matches!(
        circuit.solve(),
        Err(CircuitError::ShortOrIncompleteCircuit)
    ));
    assert_eq!(circuit.num_branches(), 0);
    assert!(circuit.components().all(|(_, c)| c.current() == 0.0));
}

#[test]
fn open_circuit_is_incomplete() {
    let mut circuit = load(
        "\
.grid 2 3
B 0,0 1,0 6
W 0,0 0,1
R 0,1 1,1 10
",
    );
    assert!(matches!(
        circuit.solve(),
        Err(CircuitError::ShortOrIncompleteCircuit)
    ));
}

#[test]
fn removing_the_short_restores_the_solution() {
    let mut circuit = load(include_str!("../demos/short.layout"));
    assert!(circuit.solve().is_err());

    let shorted = circuit.get_component(t(2, 1), t(3, 1)).unwrap();
    assert!(circuit.component(shorted).unwrap().is_battery());
    let removed = circuit.remove_component_at(t(3, 1), t(2, 1)).unwrap();
    assert_eq!(removed.voltage(), Some(5.0));
    assert!(circuit.get_component(t(2, 1), t(3, 1)).is_none());

    circuit.solve().unwrap();
    assert_eq!(circuit.num_branches(), 1);
    assert_abs_diff_eq!(current_between(&circuit, t(1, 1), t(2, 1)), 0.6, epsilon = 1e-9);
}

#[test]
fn sources_in_parallel_paths() {
    let mut circuit = load(
        "\
.grid 2 3
B 0,0 1,0 9 +0,0
W 0,0 0,1
R 0,1 1,1 3
W 1,1 1,0
B 0,1 0,2 3 +0,2
R 0,2 1,2 3
W 1,2 1,1
",
    );
    circuit.solve().unwrap();
    assert_current_conserved(&circuit);

    // The 9 V battery alone holds 9 V across both parallel paths.
    let middle = circuit.get_component(t(0, 1), t(1, 1)).unwrap();
    assert_abs_diff_eq!(circuit.potential_drop(middle).unwrap(), 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(current_between(&circuit, t(0, 1), t(1, 1)), 3.0, epsilon = 1e-9);

    // The 3 V battery pushes the same way, so its path carries (9 + 3) / 3 A.
    assert_abs_diff_eq!(current_between(&circuit, t(0, 2), t(1, 2)), 4.0, epsilon = 1e-9);
    let small = circuit.get_component(t(0, 1), t(0, 2)).unwrap();
    assert_eq!(
        circuit.component(small).unwrap().current_direction(),
        Some(t(0, 2))
    );
    assert_abs_diff_eq!(current_between(&circuit, t(0, 0), t(1, 0)), 7.0, epsilon = 1e-9);
}

#[test]
fn one_component_per_location() {
    let mut circuit = Circuit::new(2, 2);
    let r = circuit
        .add_component(Component::resistor(10.0), t(0, 0), t(0, 1))
        .unwrap();

    let duplicate = circuit.add_component(Component::resistor(10.0), t(0, 1), t(0, 0));
    assert!(matches!(duplicate, Err(CircuitError::DuplicateComponent { .. })));

    let different = circuit.add_component(Component::resistor(20.0), t(0, 0), t(0, 1));
    assert!(matches!(different, Err(CircuitError::LocationOccupied { .. })));

    assert_eq!(circuit.num_components(), 1);
    assert_eq!(circuit.terminal(t(0, 0)).num_connections(), 1);
    assert_eq!(circuit.get_component(t(0, 1), t(0, 0)), Some(r));
    assert_eq!(circuit.remove_component_at(t(0, 1), t(0, 0)).unwrap().resistance(), 10.0);
}

#[test]
fn layout_lines_on_a_taken_location_are_skipped() {
    let mut circuit = load(
        "\
.grid 2 2
B 0,0 1,0 6
W 0,0 0,1
R 0,1 1,1 10
R 1,1 0,1 20    ; same spot, ignored
W 1,1 1,0
W 1,0 1,1       ; same wire again, ignored
",
    );
    assert_eq!(circuit.num_components(), 4);
    circuit.solve().unwrap();
    assert_abs_diff_eq!(current_between(&circuit, t(0, 1), t(1, 1)), 0.6, epsilon = 1e-9);
}

#[test]
fn layout_terminals_outside_grid_are_reported() {
    let layout = layout::parse(".grid 2 2\nW 0,0 0,1\nW 0,1 2,1\n").unwrap();
    match Circuit::from_layout(&layout) {
        Err(CircuitError::ParseError { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
