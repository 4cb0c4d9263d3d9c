//! Error types for the compile crate.

use qadj_ir::{IrError, QubitId};
use thiserror::Error;

/// Errors raised while resolving and compiling a program.
///
/// Compilation is all-or-nothing: the first error aborts and no partial
/// output is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A symbol is absent from the parameter map.
    #[error("Symbol '{symbol}' not found in parameter map (operation {position}, gate: {gate_name})")]
    UnresolvedSymbol {
        /// The missing symbol.
        symbol: String,
        /// Position of the operation in the program.
        position: usize,
        /// Name of the gate.
        gate_name: String,
    },

    /// A symbol's index lies outside the supplied value vector.
    #[error("Symbol '{symbol}' maps to index {index} but only {available} values were supplied")]
    ValueIndexOutOfRange {
        /// The symbol.
        symbol: String,
        /// Index it maps to.
        index: usize,
        /// Length of the value vector.
        available: usize,
    },

    /// A gate references a qubit outside the target qubit count.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit (operation {position}, gate: {gate_name})")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Target qubit count.
        num_qubits: u32,
        /// Position of the operation in the program.
        position: usize,
        /// Name of the gate.
        gate_name: String,
    },

    /// Runs or gradient records are out of step with the symbolic gates.
    #[error("Adjoint circuit misaligned: {0}")]
    Misaligned(String),

    /// The operation is structurally malformed.
    #[error("Malformed operation: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
