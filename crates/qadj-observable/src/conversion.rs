//! Pauli term → circuit conversion.
//!
//! Both conversions build a literal-only [`Program`] and compile it in
//! forward mode, so the result is already fused for batched application.
//!
//! | Factor | [`pauli_term_circuit`] | [`z_basis_circuit`] |
//! |--------|------------------------|---------------------|
//! | X      | `x_pow(1)`             | `y_pow(-0.5)`       |
//! | Y      | `y_pow(1)`             | `x_pow(0.5)`        |
//! | Z      | `z_pow(1)`             | none                |
//! | I      | none                   | none                |

use qadj_compile::{CircuitCompiler, CompileError, CompiledCircuit, GateFuser};
use qadj_ir::{ParameterMap, Program, QubitId};
use tracing::{debug, instrument};

use crate::error::ObservableResult;
use crate::pauli::{PauliOp, PauliSum, PauliTerm};

/// Circuit applying each Pauli factor of `term` in order.
#[instrument(skip(term, fuser), fields(term = %term))]
pub fn pauli_term_circuit(
    term: &PauliTerm,
    num_qubits: u32,
    fuser: impl GateFuser + 'static,
) -> ObservableResult<CompiledCircuit> {
    term.validate(num_qubits)?;
    let mut program = Program::new("pauli_term");
    for (qubit, op) in term.non_identity() {
        push_pauli(&mut program, qubit, op)?;
    }
    compile(&program, num_qubits, fuser)
}

/// Circuit rotating each factor's eigenbasis onto Z, for measuring `term`.
#[instrument(skip(term, fuser), fields(term = %term))]
pub fn z_basis_circuit(
    term: &PauliTerm,
    num_qubits: u32,
    fuser: impl GateFuser + 'static,
) -> ObservableResult<CompiledCircuit> {
    term.validate(num_qubits)?;
    let mut program = Program::new("z_basis");
    for (qubit, op) in term.non_identity() {
        push_basis_change(&mut program, qubit, op)?;
    }
    compile(&program, num_qubits, fuser)
}

/// Both circuits for every term of `sum`, in term order.
///
/// Fails on the first malformed term.
pub fn sum_circuits<F>(
    sum: &PauliSum,
    num_qubits: u32,
    fuser: F,
) -> ObservableResult<Vec<(CompiledCircuit, CompiledCircuit)>>
where
    F: GateFuser + Clone + 'static,
{
    sum.terms()
        .iter()
        .map(|term| {
            Ok((
                pauli_term_circuit(term, num_qubits, fuser.clone())?,
                z_basis_circuit(term, num_qubits, fuser.clone())?,
            ))
        })
        .collect()
}

fn push_pauli(program: &mut Program, qubit: QubitId, op: PauliOp) -> ObservableResult<()> {
    match op {
        PauliOp::X => program.x_pow(qubit, 1.0),
        PauliOp::Y => program.y_pow(qubit, 1.0),
        PauliOp::Z => program.z_pow(qubit, 1.0),
        PauliOp::I => return Ok(()),
    }
    .map_err(CompileError::from)?;
    Ok(())
}

fn push_basis_change(program: &mut Program, qubit: QubitId, op: PauliOp) -> ObservableResult<()> {
    match op {
        PauliOp::X => program.y_pow(qubit, -0.5),
        PauliOp::Y => program.x_pow(qubit, 0.5),
        PauliOp::Z | PauliOp::I => return Ok(()),
    }
    .map_err(CompileError::from)?;
    Ok(())
}

fn compile(
    program: &Program,
    num_qubits: u32,
    fuser: impl GateFuser + 'static,
) -> ObservableResult<CompiledCircuit> {
    let compiled = CircuitCompiler::new(num_qubits)
        .with_fuser(fuser)
        .compile(program, &ParameterMap::new(), &[])?;
    debug!(
        gates = compiled.gates.len(),
        groups = compiled.fused.len(),
        "converted Pauli term"
    );
    Ok(compiled)
}
