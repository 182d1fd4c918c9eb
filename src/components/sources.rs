//! Battery (ideal DC voltage source).

use crate::circuit::TerminalId;

/// Payload of a battery component.
///
/// Batteries have no internal resistance. The voltage is always stored as a
/// positive number; polarity comes from which endpoint is the positive end.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    voltage: f64,
    positive_end: Option<TerminalId>,
}

impl Battery {
    /// Create a battery with the given voltage. The positive end is chosen
    /// when the battery is added to a circuit.
    pub fn new(voltage: f64) -> Self {
        Self {
            voltage,
            positive_end: None,
        }
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub(crate) fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    /// Terminal on the positive side, `None` until placed in a circuit.
    pub fn positive_end(&self) -> Option<TerminalId> {
        self.positive_end
    }

    pub(crate) fn set_positive_end(&mut self, terminal: Option<TerminalId>) {
        self.positive_end = terminal;
    }

    /// Potential rise seen when crossing the battery toward `to`.
    ///
    /// Crossing from the negative end into the positive end gains the
    /// battery voltage; the opposite direction loses it.
    pub fn rise_toward(&self, to: TerminalId) -> f64 {
        if self.positive_end == Some(to) {
            self.voltage
        } else {
            -self.voltage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_rise_follows_polarity() {
        let mut b = Battery::new(6.0);
        let pos = TerminalId::new(1, 0);
        let neg = TerminalId::new(2, 0);
        b.set_positive_end(Some(pos));

        assert_eq!(b.rise_toward(pos), 6.0);
        assert_eq!(b.rise_toward(neg), -6.0);
    }
}
