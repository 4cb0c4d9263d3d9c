//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur when building or validating program operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Gate requires different number of argument values.
    #[error("Gate '{gate_name}' takes {expected} arguments, got {got}")]
    ArgumentCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of arguments.
        expected: usize,
        /// Actual number of arguments provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A required argument was not supplied.
    #[error("Missing argument '{argument}' (gate: {gate_name})")]
    MissingArgument {
        /// Name of the gate.
        gate_name: String,
        /// The missing argument.
        argument: String,
    },

    /// An argument the family does not define was supplied.
    #[error("Unexpected argument '{argument}' (gate: {gate_name})")]
    UnexpectedArgument {
        /// Name of the gate.
        gate_name: String,
        /// The unknown argument.
        argument: String,
    },

    /// A non-differentiable argument was bound to a symbol.
    #[error("Argument '{argument}' must be a literal, found symbol '{symbol}' (gate: {gate_name})")]
    SymbolicArgument {
        /// Name of the gate.
        gate_name: String,
        /// The offending argument.
        argument: String,
        /// The symbol it was bound to.
        symbol: String,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
