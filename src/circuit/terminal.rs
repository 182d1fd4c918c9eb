//! Grid terminals.

use super::types::{ComponentId, TerminalId};

/// Potential of a terminal that no solve has reached.
pub const UNASSIGNED_POTENTIAL: f64 = f64::MAX;

/// A node of the terminal grid.
///
/// Each terminal knows its position, its potential after the last solve,
/// and the components connected to it in connection order.
#[derive(Debug, Clone)]
pub struct Terminal {
    id: TerminalId,
    potential: f64,
    connections: Vec<ComponentId>,
}

impl Terminal {
    pub(crate) fn new(id: TerminalId) -> Self {
        Self {
            id,
            potential: UNASSIGNED_POTENTIAL,
            connections: Vec::new(),
        }
    }

    pub fn id(&self) -> TerminalId {
        self.id
    }

    pub fn row(&self) -> usize {
        self.id.row
    }

    pub fn col(&self) -> usize {
        self.id.col
    }

    /// Potential from the last successful solve, or [`UNASSIGNED_POTENTIAL`].
    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// Potential as an option, `None` while unassigned.
    pub fn assigned_potential(&self) -> Option<f64> {
        (self.potential != UNASSIGNED_POTENTIAL).then_some(self.potential)
    }

    pub(crate) fn set_potential(&mut self, potential: f64) {
        self.potential = potential;
    }

    /// Components touching this terminal, in connection order.
    pub fn connections(&self) -> &[ComponentId] {
        &self.connections
    }

    /// The `i`th connected component.
    pub fn connection(&self, i: usize) -> Option<ComponentId> {
        self.connections.get(i).copied()
    }

    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    pub fn connected_to(&self, component: ComponentId) -> bool {
        self.connections.contains(&component)
    }

    pub(crate) fn connect(&mut self, component: ComponentId) {
        debug_assert!(!self.connected_to(component));
        self.connections.push(component);
    }

    pub(crate) fn disconnect(&mut self, component: ComponentId) {
        if let Some(index) = self.connections.iter().position(|&c| c == component) {
            self.connections.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_terminal_is_unassigned() {
        let t = Terminal::new(TerminalId::new(2, 3));
        assert_eq!(t.row(), 2);
        assert_eq!(t.col(), 3);
        assert_eq!(t.potential(), UNASSIGNED_POTENTIAL);
        assert_eq!(t.assigned_potential(), None);
        assert_eq!(t.num_connections(), 0);
    }

    #[test]
    fn test_connect_preserves_order() {
        let mut t = Terminal::new(TerminalId::new(0, 0));
        t.connect(ComponentId(4));
        t.connect(ComponentId(1));
        t.connect(ComponentId(7));
        assert_eq!(t.connections(), &[ComponentId(4), ComponentId(1), ComponentId(7)]);

        t.disconnect(ComponentId(1));
        assert_eq!(t.connections(), &[ComponentId(4), ComponentId(7)]);
        assert!(!t.connected_to(ComponentId(1)));
        assert_eq!(t.connection(1), Some(ComponentId(7)));
        assert_eq!(t.connection(2), None);
    }
}
