//! Circuit graph container.

use super::terminal::{Terminal, UNASSIGNED_POTENTIAL};
use super::types::{ComponentId, TerminalId};
use super::validate::{validate_component, validate_placement};
use crate::components::{Component, ComponentKind};
use crate::error::{CircuitError, Result};
use crate::layout::{ComponentType, Layout};

/// A grid of terminals and the components placed between them.
///
/// The circuit is the sole owner of both arenas. Components refer to
/// terminals by [`TerminalId`] and terminals refer to components by
/// [`ComponentId`], so there are no ownership cycles.
#[derive(Debug, Clone)]
pub struct Circuit {
    rows: usize,
    cols: usize,

    /// Terminals in row-major order
    terminals: Vec<Terminal>,

    /// Component arena; removed components leave an empty slot
    slots: Vec<Option<Component>>,

    /// Live components in insertion order
    order: Vec<ComponentId>,

    /// Branch count from the last successful solve
    num_branches: usize,
}

impl Circuit {
    /// Create an empty circuit with a `rows` x `cols` grid of terminals.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut terminals = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                terminals.push(Terminal::new(TerminalId::new(row, col)));
            }
        }

        Self {
            rows,
            cols,
            terminals,
            slots: Vec::new(),
            order: Vec::new(),
            num_branches: 0,
        }
    }

    /// Build a circuit from a parsed layout.
    pub fn from_layout(layout: &Layout) -> Result<Self> {
        let mut circuit = Circuit::new(layout.rows, layout.cols);

        for def in &layout.components {
            for end in def.ends.iter().chain(def.positive_end.iter()) {
                if !circuit.contains(*end) {
                    return Err(CircuitError::parse(
                        def.line,
                        format!(
                            "terminal {end} is outside the {}x{} grid",
                            layout.rows, layout.cols
                        ),
                    ));
                }
            }

            let [t1, t2] = def.ends;
            let added = match def.component_type {
                ComponentType::Wire => circuit.add_component(Component::wire(), t1, t2),
                ComponentType::Resistor => {
                    let ohms = def
                        .value
                        .ok_or_else(|| CircuitError::parse(def.line, "resistor requires a value"))?;
                    circuit.add_component(Component::resistor(ohms), t1, t2)
                }
                ComponentType::Battery => {
                    let volts = def
                        .value
                        .ok_or_else(|| CircuitError::parse(def.line, "battery requires a voltage"))?;
                    let positive_end = def.positive_end.unwrap_or(t1);
                    circuit.add_battery(Component::battery(volts), t1, t2, positive_end)
                }
            };
            match added {
                Ok(_) => {}
                Err(e) if e.is_occupied() => {
                    log::warn!("layout line {}: {e}; skipped", def.line);
                }
                Err(e) => return Err(CircuitError::parse(def.line, e.to_string())),
            }
        }

        Ok(circuit)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the terminal lies inside the grid.
    pub fn contains(&self, terminal: TerminalId) -> bool {
        terminal.row < self.rows && terminal.col < self.cols
    }

    fn index(&self, terminal: TerminalId) -> usize {
        assert!(
            self.contains(terminal),
            "terminal {terminal} outside the {}x{} grid",
            self.rows,
            self.cols
        );
        terminal.row * self.cols + terminal.col
    }

    /// The terminal at a grid position.
    ///
    /// # Panics
    /// If the position lies outside the grid.
    pub fn terminal(&self, terminal: TerminalId) -> &Terminal {
        &self.terminals[self.index(terminal)]
    }

    pub(crate) fn terminal_mut(&mut self, terminal: TerminalId) -> &mut Terminal {
        let idx = self.index(terminal);
        &mut self.terminals[idx]
    }

    /// All terminals in row-major order.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// One row of the terminal grid.
    pub fn terminal_row(&self, row: usize) -> &[Terminal] {
        &self.terminals[row * self.cols..(row + 1) * self.cols]
    }

    /// Look up a component by handle.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.component(id).map(|c| (id, c)))
    }

    /// Handles of live components in insertion order.
    pub fn component_ids(&self) -> &[ComponentId] {
        &self.order
    }

    pub fn num_components(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of independent branches found by the last successful solve,
    /// excluding pruned dead ends.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    pub(crate) fn set_num_branches(&mut self, n: usize) {
        self.num_branches = n;
    }

    /// Add a component between two terminals.
    ///
    /// A battery added this way gets `t1` as its positive end. Each pair of
    /// terminals holds at most one component: the add fails without touching
    /// the circuit with [`CircuitError::DuplicateComponent`] if an equal
    /// component is already there, or [`CircuitError::LocationOccupied`] if a
    /// different one is.
    pub fn add_component(
        &mut self,
        component: Component,
        t1: TerminalId,
        t2: TerminalId,
    ) -> Result<ComponentId> {
        self.insert(component, t1, t2, t1)
    }

    /// Add a battery with an explicit positive end.
    pub fn add_battery(
        &mut self,
        battery: Component,
        t1: TerminalId,
        t2: TerminalId,
        positive_end: TerminalId,
    ) -> Result<ComponentId> {
        if !battery.is_battery() {
            return Err(CircuitError::invalid_component(format!(
                "add_battery called with a {}",
                battery.kind().label()
            )));
        }
        self.insert(battery, t1, t2, positive_end)
    }

    fn insert(
        &mut self,
        mut component: Component,
        t1: TerminalId,
        t2: TerminalId,
        positive_end: TerminalId,
    ) -> Result<ComponentId> {
        // Out-of-grid coordinates are a caller bug, not a recoverable error
        let ends = [self.index(t1), self.index(t2)];
        validate_component(&component)?;
        validate_placement(&component, t1, t2, positive_end)?;

        component.set_endpoints(Some([t1, t2]));
        component.clear_solution();
        if let ComponentKind::Battery(b) = component.kind_mut() {
            b.set_positive_end(Some(positive_end));
        }

        if let Some(existing) = self.get_component(t1, t2) {
            let equal = self
                .component(existing)
                .is_some_and(|c| c.is_equivalent(&component));
            return Err(if equal {
                CircuitError::DuplicateComponent {
                    first: t1,
                    second: t2,
                }
            } else {
                CircuitError::LocationOccupied {
                    first: t1,
                    second: t2,
                }
            });
        }

        let id = ComponentId(self.slots.len());
        log::trace!("adding {} {id} between {t1} and {t2}", component.kind().label());
        self.slots.push(Some(component));
        self.order.push(id);
        for idx in ends {
            self.terminals[idx].connect(id);
        }
        Ok(id)
    }

    /// Remove a component, returning it detached from the grid.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<Component> {
        let mut component = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or_else(|| CircuitError::not_found(format!("{id} is not in the circuit")))?;

        self.order.retain(|&c| c != id);
        if let Some([t1, t2]) = component.endpoints() {
            self.terminal_mut(t1).disconnect(id);
            self.terminal_mut(t2).disconnect(id);
        }
        component.set_endpoints(None);
        component.clear_solution();
        if let ComponentKind::Battery(b) = component.kind_mut() {
            b.set_positive_end(None);
        }
        log::trace!("removed {} {id}", component.kind().label());
        Ok(component)
    }

    /// Remove the component between two terminals.
    pub fn remove_component_at(&mut self, t1: TerminalId, t2: TerminalId) -> Result<Component> {
        let id = self
            .get_component(t1, t2)
            .ok_or_else(|| CircuitError::not_found(format!("nothing between {t1} and {t2}")))?;
        self.remove_component(id)
    }

    /// The component between two terminals, in either order.
    pub fn get_component(&self, t1: TerminalId, t2: TerminalId) -> Option<ComponentId> {
        self.terminal(t1)
            .connections()
            .iter()
            .copied()
            .find(|&id| self.component(id).is_some_and(|c| c.connects(t1, t2)))
    }

    /// Find the component in this circuit sitting at the same terminal
    /// positions as component `id` of `other`.
    pub fn find_corresponding_component(
        &self,
        other: &Circuit,
        id: ComponentId,
    ) -> Option<ComponentId> {
        let [t1, t2] = other.component(id)?.endpoints()?;
        if !self.contains(t1) || !self.contains(t2) {
            return None;
        }
        self.get_component(t1, t2)
    }

    /// Change a battery's voltage. Solved values stay stale until the next solve.
    pub fn set_battery_voltage(&mut self, id: ComponentId, volts: f64) -> Result<()> {
        if !(volts.is_finite() && volts > 0.0) {
            return Err(CircuitError::invalid_component(format!(
                "battery voltage must be positive, got {volts}"
            )));
        }
        match self.component_mut(id).map(Component::kind_mut) {
            Some(ComponentKind::Battery(b)) => {
                b.set_voltage(volts);
                Ok(())
            }
            Some(_) => Err(CircuitError::invalid_component(format!("{id} is not a battery"))),
            None => Err(CircuitError::not_found(format!("{id} is not in the circuit"))),
        }
    }

    /// Move a battery's positive end to its other terminal (or keep it).
    pub fn set_positive_end(&mut self, id: ComponentId, terminal: TerminalId) -> Result<()> {
        let component = self
            .component_mut(id)
            .ok_or_else(|| CircuitError::not_found(format!("{id} is not in the circuit")))?;
        let Some([t1, t2]) = component.endpoints() else {
            return Err(CircuitError::not_found(format!("{id} is detached")));
        };
        validate_placement(component, t1, t2, terminal)?;
        match component.kind_mut() {
            ComponentKind::Battery(b) => {
                b.set_positive_end(Some(terminal));
                Ok(())
            }
            _ => Err(CircuitError::invalid_component(format!("{id} is not a battery"))),
        }
    }

    /// Change a resistor's resistance. Solved values stay stale until the next solve.
    pub fn set_resistance(&mut self, id: ComponentId, ohms: f64) -> Result<()> {
        validate_component(&Component::resistor(ohms))?;
        match self.component_mut(id).map(Component::kind_mut) {
            Some(ComponentKind::Resistor(r)) => {
                *r = ohms;
                Ok(())
            }
            Some(_) => Err(CircuitError::invalid_component(format!("{id} is not a resistor"))),
            None => Err(CircuitError::not_found(format!("{id} is not in the circuit"))),
        }
    }

    /// Potential drop across a component in the direction of its current,
    /// once both of its terminals have a solved potential.
    pub fn potential_drop(&self, id: ComponentId) -> Option<f64> {
        let component = self.component(id)?;
        let exit = component.current_direction()?;
        let entry = component.other_end(exit)?;
        let v_in = self.terminal(entry).assigned_potential()?;
        let v_out = self.terminal(exit).assigned_potential()?;
        Some(v_in - v_out)
    }

    /// Forget every solved value.
    pub(crate) fn reset_solution(&mut self) {
        for terminal in &mut self.terminals {
            terminal.set_potential(UNASSIGNED_POTENTIAL);
        }
        for component in self.slots.iter_mut().flatten() {
            component.clear_solution();
        }
        self.num_branches = 0;
    }
}
