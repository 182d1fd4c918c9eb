//! Parsed form of a layout description.

use crate::circuit::TerminalId;

/// Grid size used when a layout has no `.grid` directive.
pub const DEFAULT_GRID: (usize, usize) = (crate::DEFAULT_ROWS, crate::DEFAULT_COLS);

/// A complete parsed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// Components in file order
    pub components: Vec<ComponentDef>,
}

impl Layout {
    /// Create an empty layout with the default grid.
    pub fn new() -> Self {
        Self {
            rows: DEFAULT_GRID.0,
            cols: DEFAULT_GRID.1,
            components: Vec::new(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

/// One component line.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    pub component_type: ComponentType,
    pub ends: [TerminalId; 2],
    /// Resistance or voltage
    pub value: Option<f64>,
    /// Explicit battery positive end (`+r,c`)
    pub positive_end: Option<TerminalId>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the layout format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// `W`
    Wire,
    /// `R`
    Resistor,
    /// `B`
    Battery,
}

impl ComponentType {
    /// Parse a component type letter (case-insensitive).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "W" | "WIRE" => Some(ComponentType::Wire),
            "R" | "RESISTOR" => Some(ComponentType::Resistor),
            "B" | "BATTERY" => Some(ComponentType::Battery),
            _ => None,
        }
    }
}
