//! Component models for the terminal grid.
//!
//! Every component is a two-terminal element. The set of variants is closed:
//! - Wire: zero resistance, no source
//! - Resistor: fixed positive resistance
//! - Battery: ideal voltage source with zero internal resistance
//!
//! Shared state (endpoints and the solved current, direction and branch)
//! lives on [`Component`]; per-variant data lives on [`ComponentKind`].

mod sources;

pub use sources::Battery;

use crate::circuit::{BranchId, TerminalId};

/// Variant payload of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Wire,
    /// Resistance in ohms
    Resistor(f64),
    Battery(Battery),
}

impl ComponentKind {
    /// Short label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Wire => "wire",
            ComponentKind::Resistor(_) => "resistor",
            ComponentKind::Battery(_) => "battery",
        }
    }
}

/// A circuit component.
#[derive(Debug, Clone)]
pub struct Component {
    kind: ComponentKind,
    /// Terminals at either end, set while the component is in a circuit
    ends: Option<[TerminalId; 2]>,
    current: f64,
    /// Terminal the current flows into after leaving the component
    current_direction: Option<TerminalId>,
    branch: Option<BranchId>,
}

impl Component {
    fn with_kind(kind: ComponentKind) -> Self {
        Self {
            kind,
            ends: None,
            current: 0.0,
            current_direction: None,
            branch: None,
        }
    }

    /// Create a wire.
    pub fn wire() -> Self {
        Self::with_kind(ComponentKind::Wire)
    }

    /// Create a resistor with the given resistance in ohms.
    pub fn resistor(ohms: f64) -> Self {
        Self::with_kind(ComponentKind::Resistor(ohms))
    }

    /// Create a battery with the given voltage.
    pub fn battery(volts: f64) -> Self {
        Self::with_kind(ComponentKind::Battery(Battery::new(volts)))
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ComponentKind {
        &mut self.kind
    }

    /// Both endpoints, `None` while detached from a circuit.
    pub fn endpoints(&self) -> Option<[TerminalId; 2]> {
        self.ends
    }

    pub fn end_pt1(&self) -> Option<TerminalId> {
        self.ends.map(|[a, _]| a)
    }

    pub fn end_pt2(&self) -> Option<TerminalId> {
        self.ends.map(|[_, b]| b)
    }

    pub(crate) fn set_endpoints(&mut self, ends: Option<[TerminalId; 2]>) {
        self.ends = ends;
    }

    /// The endpoint opposite `terminal`.
    pub fn other_end(&self, terminal: TerminalId) -> Option<TerminalId> {
        match self.ends? {
            [a, b] if a == terminal => Some(b),
            [a, b] if b == terminal => Some(a),
            _ => None,
        }
    }

    /// True when the component sits between `a` and `b` in either order.
    pub fn connects(&self, a: TerminalId, b: TerminalId) -> bool {
        match self.ends {
            Some([x, y]) => (x == a && y == b) || (x == b && y == a),
            None => false,
        }
    }

    /// Resistance in ohms; zero for wires and batteries.
    pub fn resistance(&self) -> f64 {
        match &self.kind {
            ComponentKind::Resistor(ohms) => *ohms,
            ComponentKind::Wire | ComponentKind::Battery(_) => 0.0,
        }
    }

    pub fn as_battery(&self) -> Option<&Battery> {
        match &self.kind {
            ComponentKind::Battery(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_battery(&self) -> bool {
        matches!(self.kind, ComponentKind::Battery(_))
    }

    /// Battery voltage, `None` for other variants.
    pub fn voltage(&self) -> Option<f64> {
        self.as_battery().map(Battery::voltage)
    }

    /// Battery positive end, `None` for other variants or unplaced batteries.
    pub fn positive_end(&self) -> Option<TerminalId> {
        self.as_battery().and_then(Battery::positive_end)
    }

    /// Potential rise across the component's source when crossing toward
    /// `to`. Zero for anything but a battery.
    pub fn emf_toward(&self, to: TerminalId) -> f64 {
        self.as_battery().map_or(0.0, |b| b.rise_toward(to))
    }

    /// Current magnitude from the last solve, relative to
    /// [`current_direction`](Self::current_direction).
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn current_direction(&self) -> Option<TerminalId> {
        self.current_direction
    }

    /// Signed current flowing through the component toward `to`.
    pub fn current_toward(&self, to: TerminalId) -> f64 {
        match self.current_direction {
            Some(d) if d == to => self.current,
            Some(_) => -self.current,
            None => 0.0,
        }
    }

    pub fn branch(&self) -> Option<BranchId> {
        self.branch
    }

    pub(crate) fn set_solution(&mut self, current: f64, direction: TerminalId, branch: BranchId) {
        self.current = current;
        self.current_direction = Some(direction);
        self.branch = Some(branch);
    }

    pub(crate) fn clear_solution(&mut self) {
        self.current = 0.0;
        self.current_direction = None;
        self.branch = None;
    }

    /// True if both components connect the same pair of terminals, are the
    /// same variant, and carry the same value.
    pub fn is_equivalent(&self, other: &Component) -> bool {
        let Some([a, b]) = self.ends else {
            return false;
        };
        other.connects(a, b) && self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(mut c: Component, a: (usize, usize), b: (usize, usize)) -> Component {
        c.set_endpoints(Some([a.into(), b.into()]));
        c
    }

    #[test]
    fn test_resistance_by_variant() {
        assert_eq!(Component::wire().resistance(), 0.0);
        assert_eq!(Component::battery(9.0).resistance(), 0.0);
        assert_eq!(Component::resistor(47.0).resistance(), 47.0);
    }

    #[test]
    fn test_equivalence_ignores_endpoint_order() {
        let r1 = placed(Component::resistor(10.0), (0, 0), (0, 1));
        let r2 = placed(Component::resistor(10.0), (0, 1), (0, 0));
        let r3 = placed(Component::resistor(5.0), (0, 0), (0, 1));
        let w = placed(Component::wire(), (0, 0), (0, 1));

        assert!(r1.is_equivalent(&r2));
        assert!(!r1.is_equivalent(&r3));
        assert!(!r1.is_equivalent(&w));
    }

    #[test]
    fn test_battery_equivalence_includes_polarity() {
        let mut b1 = placed(Component::battery(6.0), (1, 0), (2, 0));
        let mut b2 = placed(Component::battery(6.0), (2, 0), (1, 0));
        if let ComponentKind::Battery(b) = b1.kind_mut() {
            b.set_positive_end(Some(TerminalId::new(1, 0)));
        }
        if let ComponentKind::Battery(b) = b2.kind_mut() {
            b.set_positive_end(Some(TerminalId::new(2, 0)));
        }
        assert!(!b1.is_equivalent(&b2));

        if let ComponentKind::Battery(b) = b2.kind_mut() {
            b.set_positive_end(Some(TerminalId::new(1, 0)));
        }
        assert!(b1.is_equivalent(&b2));
    }

    #[test]
    fn test_detached_component_is_never_equivalent() {
        let a = Component::wire();
        let b = placed(Component::wire(), (0, 0), (1, 0));
        assert!(!a.is_equivalent(&b));
        assert!(!b.is_equivalent(&a));
    }

    #[test]
    fn test_current_toward() {
        let mut r = placed(Component::resistor(10.0), (0, 0), (0, 1));
        r.set_solution(0.5, TerminalId::new(0, 1), BranchId(0));
        assert_eq!(r.current_toward(TerminalId::new(0, 1)), 0.5);
        assert_eq!(r.current_toward(TerminalId::new(0, 0)), -0.5);
        assert_eq!(r.other_end(TerminalId::new(0, 1)), Some(TerminalId::new(0, 0)));
    }
}
