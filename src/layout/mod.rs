//! Layout files: a text description of a circuit on the terminal grid.
//!
//! The format is line-oriented and human-editable. It stands in for the
//! click-to-place editor when driving the solver from the command line or
//! from tests.
//!
//! # Grammar Overview
//!
//! ```text
//! layout    = { line }
//! line      = comment | directive | component | empty
//! comment   = ('#' | ';') { any_char }
//! directive = ".grid" rows cols
//! component = type terminal terminal [value] [positive]
//!
//! type      = "W" | "R" | "B"
//! terminal  = row ',' col
//! positive  = '+' terminal
//! value     = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Component Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | W | Wire | `W <r,c> <r,c>` |
//! | R | Resistor | `R <r,c> <r,c> <ohms>` |
//! | B | Battery | `B <r,c> <r,c> <volts> [+<r,c>]` |
//!
//! A battery's positive end defaults to its first terminal. Without a
//! `.grid` directive the grid is 4x4.
//!
//! A pair of terminals holds one component. When
//! [`Circuit::from_layout`](crate::Circuit::from_layout) meets a line whose
//! terminals are already joined, it logs a warning and skips the line. Every
//! other problem (bad syntax, terminals off the grid, self loops, values
//! that are not positive) fails the whole layout with the line number.
//!
//! # Example
//!
//! ```text
//! # 6 V battery driving a 10 ohm resistor
//! .grid 2 2
//! B 0,0 1,0 6
//! W 0,0 0,1
//! R 0,1 1,1 10
//! W 1,1 1,0
//! ```

mod ast;
mod parser;

pub use ast::*;
pub use parser::{parse_value, Parser};

use crate::error::Result;

/// Parse a layout string.
pub fn parse(input: &str) -> Result<Layout> {
    Parser::new(input).parse()
}

/// Parse a layout file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Layout> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CircuitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
