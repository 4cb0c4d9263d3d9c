//! Error types for the observable crate.

use qadj_compile::CompileError;
use qadj_ir::QubitId;
use thiserror::Error;

/// Errors produced while converting Pauli terms to circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ObservableError {
    /// A Pauli term references a qubit outside the declared register.
    #[error("Pauli term references {qubit} but circuit only has {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the target circuit.
        num_qubits: u32,
    },

    /// A Pauli term lists the same qubit more than once.
    #[error("Pauli term lists {0} more than once")]
    DuplicateQubit(QubitId),

    /// Compilation of the generated gates failed.
    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),
}

/// Result type for observable operations.
pub type ObservableResult<T> = Result<T, ObservableError>;
