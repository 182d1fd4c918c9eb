//! Validation of edits before they reach the circuit.

use crate::components::{Component, ComponentKind};
use crate::error::{CircuitError, Result};

use super::TerminalId;

/// Validate a component's value.
///
/// Checks:
/// - Resistors have a finite, positive resistance
/// - Batteries have a finite, positive voltage
pub fn validate_component(component: &Component) -> Result<()> {
    match component.kind() {
        ComponentKind::Wire => Ok(()),
        ComponentKind::Resistor(ohms) => {
            if ohms.is_finite() && *ohms > 0.0 {
                Ok(())
            } else {
                Err(CircuitError::invalid_component(format!(
                    "resistance must be positive, got {ohms}"
                )))
            }
        }
        ComponentKind::Battery(b) => {
            let v = b.voltage();
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CircuitError::invalid_component(format!(
                    "battery voltage must be positive, got {v}"
                )))
            }
        }
    }
}

/// Validate where a component is about to be placed.
///
/// Checks:
/// - The two endpoints differ
/// - A battery's positive end is one of its endpoints
pub fn validate_placement(
    component: &Component,
    t1: TerminalId,
    t2: TerminalId,
    positive_end: TerminalId,
) -> Result<()> {
    if t1 == t2 {
        return Err(CircuitError::SelfLoop { terminal: t1 });
    }
    if component.is_battery() && positive_end != t1 && positive_end != t2 {
        return Err(CircuitError::invalid_component(format!(
            "positive end {positive_end} is not an endpoint of the battery between {t1} and {t2}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nonphysical_values() {
        assert!(validate_component(&Component::resistor(0.0)).is_err());
        assert!(validate_component(&Component::resistor(-3.0)).is_err());
        assert!(validate_component(&Component::resistor(f64::NAN)).is_err());
        assert!(validate_component(&Component::battery(-6.0)).is_err());
        assert!(validate_component(&Component::battery(f64::INFINITY)).is_err());
        assert!(validate_component(&Component::resistor(10.0)).is_ok());
        assert!(validate_component(&Component::battery(1.5)).is_ok());
        assert!(validate_component(&Component::wire()).is_ok());
    }

    #[test]
    fn test_rejects_bad_placement() {
        let t = TerminalId::new(0, 0);
        let u = TerminalId::new(0, 1);
        let elsewhere = TerminalId::new(3, 3);

        assert!(matches!(
            validate_placement(&Component::wire(), t, t, t),
            Err(CircuitError::SelfLoop { .. })
        ));
        assert!(validate_placement(&Component::battery(6.0), t, u, elsewhere).is_err());
        assert!(validate_placement(&Component::battery(6.0), t, u, u).is_ok());
        // Non-batteries ignore the positive end entirely
        assert!(validate_placement(&Component::wire(), t, u, elsewhere).is_ok());
    }
}
