//! Error types for the CircuitVision solver.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! rejected edits, unsolvable topologies, and layout file problems.

use thiserror::Error;

use crate::circuit::TerminalId;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all CircuitVision operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Edit Errors ============
    /// An equal component already sits between the two terminals
    #[error("An identical component already exists between {first} and {second}")]
    DuplicateComponent { first: TerminalId, second: TerminalId },

    /// A different component already sits between the two terminals
    #[error("Terminals {first} and {second} are already joined by another component")]
    LocationOccupied { first: TerminalId, second: TerminalId },

    /// Both endpoints of a component are the same terminal
    #[error("Component cannot connect terminal {terminal} to itself")]
    SelfLoop { terminal: TerminalId },

    /// Component value or placement is not physical
    #[error("Invalid component: {message}")]
    InvalidComponent { message: String },

    /// No component matches the handle or location
    #[error("No component found: {message}")]
    ComponentNotFound { message: String },

    // ============ Solve Errors ============
    /// The circuit cannot be solved. Covers both a singular system (a source
    /// shorted by zero-resistance wiring) and a topology without a closed,
    /// connected, driven loop.
    #[error("Short circuit or incomplete circuit")]
    ShortOrIncompleteCircuit,

    // ============ Layout Errors ============
    /// Error while parsing a layout description
    #[error("Layout error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a layout file
    #[error("Failed to read layout file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl CircuitError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            message: message.into(),
        }
    }

    /// Create a component-not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ComponentNotFound {
            message: message.into(),
        }
    }

    /// True for the rejected-edit family of errors.
    pub fn is_rejected_edit(&self) -> bool {
        matches!(
            self,
            Self::DuplicateComponent { .. }
                | Self::LocationOccupied { .. }
                | Self::SelfLoop { .. }
                | Self::InvalidComponent { .. }
        )
    }

    /// True if the edit was refused because the location is already taken.
    pub fn is_occupied(&self) -> bool {
        matches!(
            self,
            Self::DuplicateComponent { .. } | Self::LocationOccupied { .. }
        )
    }
}
