//! WASM bindings for CircuitVision.
//!
//! This module exposes the circuit editor operations to a browser front end
//! that draws the schematic and the animated 3-D model.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'circuit_vision';
//!
//! await init();
//!
//! const circuit = new WasmCircuit(4, 4);
//! circuit.add_battery(1, 0, 2, 0, 1, 0, 6);
//! circuit.add_resistor(1, 1, 2, 1, 10);
//! // ... wires ...
//!
//! if (!circuit.solve()) {
//!   showWarning("Short Circuit or Incomplete Circuit!");
//! }
//! const amps = circuit.current(1, 1, 2, 1);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, TerminalId};
use crate::components::Component;
use crate::error::CircuitError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: CircuitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Map an add result onto the editor's convention: `false` when the
/// location already holds a component.
fn added(result: crate::Result<crate::ComponentId>) -> Result<bool, JsValue> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_occupied() => Ok(false),
        Err(e) => Err(to_js(e)),
    }
}

/// WASM-compatible circuit on a terminal grid.
#[wasm_bindgen]
pub struct WasmCircuit {
    circuit: Circuit,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty grid of terminals.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize) -> WasmCircuit {
        WasmCircuit {
            circuit: Circuit::new(rows, cols),
        }
    }

    /// Build a circuit from a layout description.
    #[wasm_bindgen]
    pub fn from_layout(text: &str) -> Result<WasmCircuit, JsValue> {
        let layout = crate::layout::parse(text).map_err(to_js)?;
        let circuit = Circuit::from_layout(&layout).map_err(to_js)?;
        Ok(WasmCircuit { circuit })
    }

    fn checked(&self, row: usize, col: usize) -> Result<TerminalId, JsValue> {
        let t = TerminalId::new(row, col);
        if self.circuit.contains(t) {
            Ok(t)
        } else {
            Err(to_js(CircuitError::WasmError {
                message: format!("terminal {t} is outside the grid"),
            }))
        }
    }

    /// Add a wire. Returns `false` if the location is already taken.
    #[wasm_bindgen]
    pub fn add_wire(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<bool, JsValue> {
        let (a, b) = (self.checked(r1, c1)?, self.checked(r2, c2)?);
        added(self.circuit.add_component(Component::wire(), a, b))
    }

    /// Add a resistor. Returns `false` if the location is already taken.
    #[wasm_bindgen]
    pub fn add_resistor(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
        ohms: f64,
    ) -> Result<bool, JsValue> {
        let (a, b) = (self.checked(r1, c1)?, self.checked(r2, c2)?);
        added(self.circuit.add_component(Component::resistor(ohms), a, b))
    }

    /// Add a battery with its positive end at (`pos_row`, `pos_col`).
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_battery(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
        pos_row: usize,
        pos_col: usize,
        volts: f64,
    ) -> Result<bool, JsValue> {
        let (a, b) = (self.checked(r1, c1)?, self.checked(r2, c2)?);
        let pos = self.checked(pos_row, pos_col)?;
        added(self.circuit.add_battery(Component::battery(volts), a, b, pos))
    }

    /// Remove whatever sits between two terminals. Returns `false` if nothing does.
    #[wasm_bindgen]
    pub fn remove_at(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<bool, JsValue> {
        let (a, b) = (self.checked(r1, c1)?, self.checked(r2, c2)?);
        Ok(self.circuit.remove_component_at(a, b).is_ok())
    }

    /// Solve the circuit. Returns `false` for a short or incomplete circuit.
    #[wasm_bindgen]
    pub fn solve(&mut self) -> bool {
        self.circuit.solve().is_ok()
    }

    /// Current through the component between two terminals, in amps.
    #[wasm_bindgen]
    pub fn current(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> Option<f64> {
        let a = self.checked(r1, c1).ok()?;
        let b = self.checked(r2, c2).ok()?;
        let id = self.circuit.get_component(a, b)?;
        self.circuit.component(id).map(|c| c.current())
    }

    /// Terminal the current flows into, as `[row, col]`, or `undefined` for
    /// components carrying no current.
    #[wasm_bindgen]
    pub fn current_direction(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> Option<Vec<u32>> {
        let a = self.checked(r1, c1).ok()?;
        let b = self.checked(r2, c2).ok()?;
        let id = self.circuit.get_component(a, b)?;
        let d = self.circuit.component(id)?.current_direction()?;
        Some(vec![d.row as u32, d.col as u32])
    }

    /// Potential at a terminal, or `undefined` if the last solve did not reach it.
    #[wasm_bindgen]
    pub fn potential(&self, row: usize, col: usize) -> Option<f64> {
        let t = self.checked(row, col).ok()?;
        self.circuit.terminal(t).assigned_potential()
    }

    /// Number of branches found by the last successful solve.
    #[wasm_bindgen(getter)]
    pub fn num_branches(&self) -> usize {
        self.circuit.num_branches()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
