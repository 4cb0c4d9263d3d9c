//! Finite-difference gradient gates.
//!
//! For a gate `G(θ)` and a symbol-bound angle `θ = raw * scale`, the
//! gradient gate is the central difference
//!
//! ```text
//! dG/d(raw) ≈ (G((raw + ε) · scale) − G((raw − ε) · scale)) / 2ε
//! ```
//!
//! with every other angle held at its resolved value. Each synthesizer
//! appends one `(symbol, gradient gate)` pair to the [`GradientOfGate`]
//! record for the gate's position in the compiled sequence.
//!
//! These routines trust their inputs: positions and arities are produced by
//! the compiler, which has already validated the program.

use qadj_ir::{Gate, GateFamily, QubitId, ResolvedArg, SingleQubitEigenFn, TwoQubitEigenFn};
use serde::{Deserialize, Serialize};

use crate::diff::matrix_diff;

/// Finite-difference step.
pub const GRAD_EPS: f32 = 5e-3;

/// Gradient gates for one symbolic gate of the compiled sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientOfGate {
    /// Position of the originating gate in the resolved sequence.
    pub index: usize,
    /// Symbols, one per gradient gate.
    pub params: Vec<String>,
    /// Gradient gates, aligned with `params`.
    pub grad_gates: Vec<Gate>,
}

impl GradientOfGate {
    /// Empty record for the gate at `index`.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            params: vec![],
            grad_gates: vec![],
        }
    }

    /// Append one `(symbol, gradient gate)` pair.
    pub fn push(&mut self, symbol: &str, grad_gate: Gate) {
        self.params.push(symbol.to_string());
        self.grad_gates.push(grad_gate);
    }

    /// Number of `(symbol, gradient gate)` pairs.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the record holds no gradients yet.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Ordered list of gradient records, at most one per position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientRecords {
    records: Vec<GradientOfGate>,
}

impl GradientRecords {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `index`, created if the list does not end with it.
    ///
    /// Positions are visited in increasing order, so only the last record
    /// can match.
    pub fn entry(&mut self, index: usize) -> &mut GradientOfGate {
        let start_new = self.records.last().is_none_or(|last| last.index != index);
        if start_new {
            debug_assert!(
                self.records.last().is_none_or(|last| last.index < index),
                "gradient records must be created in increasing position order"
            );
            self.records.push(GradientOfGate::new(index));
        }
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in position order.
    pub fn as_slice(&self) -> &[GradientOfGate] {
        &self.records
    }

    /// Iterate over records in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, GradientOfGate> {
        self.records.iter()
    }

    /// Total number of gradient gates across all records.
    pub fn num_gradients(&self) -> usize {
        self.records.iter().map(GradientOfGate::len).sum()
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<GradientOfGate> {
        self.records
    }
}

impl<'a> IntoIterator for &'a GradientRecords {
    type Item = &'a GradientOfGate;
    type IntoIter = std::slice::Iter<'a, GradientOfGate>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// `(plus − minus) / 2ε`, carrying the midpoint parameters.
fn central_difference(mut plus: Gate, minus: Gate) -> Gate {
    let mut grad = minus.matrix;
    matrix_diff(&plus.matrix, &mut grad);
    grad.scale(0.5 / GRAD_EPS);
    for (p, m) in plus.params.iter_mut().zip(&minus.params) {
        *p = 0.5 * (*p + m);
    }
    plus.matrix = grad;
    plus
}

fn record(records: &mut GradientRecords, location: usize, symbol: &str, grad: Gate) {
    records.entry(location).push(symbol, grad);
}

// =============================================================================
// Eigen families
// =============================================================================

/// Gradient of a one-qubit eigen gate with respect to its exponent.
pub fn single_eigen_gradient(
    create: SingleQubitEigenFn,
    symbol: &str,
    location: usize,
    qubit: QubitId,
    exponent: &ResolvedArg,
    global_shift: f32,
    records: &mut GradientRecords,
) {
    let plus = create(qubit, exponent.shifted(GRAD_EPS), global_shift);
    let minus = create(qubit, exponent.shifted(-GRAD_EPS), global_shift);
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of a two-qubit eigen gate with respect to its exponent.
#[allow(clippy::too_many_arguments)]
pub fn two_eigen_gradient(
    create: TwoQubitEigenFn,
    symbol: &str,
    location: usize,
    q0: QubitId,
    q1: QubitId,
    exponent: &ResolvedArg,
    global_shift: f32,
    records: &mut GradientRecords,
) {
    let plus = create(q0, q1, exponent.shifted(GRAD_EPS), global_shift);
    let minus = create(q0, q1, exponent.shifted(-GRAD_EPS), global_shift);
    record(records, location, symbol, central_difference(plus, minus));
}

// =============================================================================
// Dual-angle families
// =============================================================================

/// Gradient of a phased X gate with respect to its phase exponent.
pub fn phased_x_phase_gradient(
    symbol: &str,
    location: usize,
    qubit: QubitId,
    phase_exponent: &ResolvedArg,
    exponent: f32,
    global_shift: f32,
    records: &mut GradientRecords,
) {
    let plus = Gate::phased_x_pow(qubit, phase_exponent.shifted(GRAD_EPS), exponent, global_shift);
    let minus =
        Gate::phased_x_pow(qubit, phase_exponent.shifted(-GRAD_EPS), exponent, global_shift);
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of a phased X gate with respect to its exponent.
pub fn phased_x_exponent_gradient(
    symbol: &str,
    location: usize,
    qubit: QubitId,
    phase_exponent: f32,
    exponent: &ResolvedArg,
    global_shift: f32,
    records: &mut GradientRecords,
) {
    let plus = Gate::phased_x_pow(qubit, phase_exponent, exponent.shifted(GRAD_EPS), global_shift);
    let minus =
        Gate::phased_x_pow(qubit, phase_exponent, exponent.shifted(-GRAD_EPS), global_shift);
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of an FSim gate with respect to `theta`.
pub fn fsim_theta_gradient(
    symbol: &str,
    location: usize,
    q0: QubitId,
    q1: QubitId,
    theta: &ResolvedArg,
    phi: f32,
    records: &mut GradientRecords,
) {
    let plus = Gate::fsim(q0, q1, theta.shifted(GRAD_EPS), phi);
    let minus = Gate::fsim(q0, q1, theta.shifted(-GRAD_EPS), phi);
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of an FSim gate with respect to `phi`.
pub fn fsim_phi_gradient(
    symbol: &str,
    location: usize,
    q0: QubitId,
    q1: QubitId,
    theta: f32,
    phi: &ResolvedArg,
    records: &mut GradientRecords,
) {
    let plus = Gate::fsim(q0, q1, theta, phi.shifted(GRAD_EPS));
    let minus = Gate::fsim(q0, q1, theta, phi.shifted(-GRAD_EPS));
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of a phased iSWAP gate with respect to its phase exponent.
pub fn phased_i_swap_phase_gradient(
    symbol: &str,
    location: usize,
    q0: QubitId,
    q1: QubitId,
    phase_exponent: &ResolvedArg,
    exponent: f32,
    records: &mut GradientRecords,
) {
    let plus = Gate::phased_i_swap_pow(q0, q1, phase_exponent.shifted(GRAD_EPS), exponent);
    let minus = Gate::phased_i_swap_pow(q0, q1, phase_exponent.shifted(-GRAD_EPS), exponent);
    record(records, location, symbol, central_difference(plus, minus));
}

/// Gradient of a phased iSWAP gate with respect to its exponent.
pub fn phased_i_swap_exponent_gradient(
    symbol: &str,
    location: usize,
    q0: QubitId,
    q1: QubitId,
    phase_exponent: f32,
    exponent: &ResolvedArg,
    records: &mut GradientRecords,
) {
    let plus = Gate::phased_i_swap_pow(q0, q1, phase_exponent, exponent.shifted(GRAD_EPS));
    let minus = Gate::phased_i_swap_pow(q0, q1, phase_exponent, exponent.shifted(-GRAD_EPS));
    record(records, location, symbol, central_difference(plus, minus));
}

// =============================================================================
// Dispatch
// =============================================================================

/// Constructor for a one-qubit eigen family.
pub fn single_eigen_constructor(family: GateFamily) -> Option<SingleQubitEigenFn> {
    let create: SingleQubitEigenFn = match family {
        GateFamily::XPow => Gate::x_pow,
        GateFamily::YPow => Gate::y_pow,
        GateFamily::ZPow => Gate::z_pow,
        GateFamily::HPow => Gate::h_pow,
        _ => return None,
    };
    Some(create)
}

/// Constructor for a two-qubit eigen family.
pub fn two_eigen_constructor(family: GateFamily) -> Option<TwoQubitEigenFn> {
    let create: TwoQubitEigenFn = match family {
        GateFamily::XxPow => Gate::xx_pow,
        GateFamily::YyPow => Gate::yy_pow,
        GateFamily::ZzPow => Gate::zz_pow,
        GateFamily::CzPow => Gate::cz_pow,
        GateFamily::CxPow => Gate::cx_pow,
        GateFamily::SwapPow => Gate::swap_pow,
        GateFamily::ISwapPow => Gate::i_swap_pow,
        _ => return None,
    };
    Some(create)
}

/// Differentiate every symbol-bound angle of one gate.
///
/// `args` holds the resolved arguments in the family's canonical order.
/// Angles are visited in that order, so a phase exponent comes before an
/// exponent and `theta` before `phi`. A gate with no symbolic angle leaves
/// `records` untouched.
///
/// # Panics
///
/// Panics if `qubits` or `args` do not match the family's arity.
pub fn populate_gradients(
    location: usize,
    family: GateFamily,
    qubits: &[QubitId],
    args: &[ResolvedArg],
    records: &mut GradientRecords,
) {
    match (family, qubits, args) {
        (GateFamily::PhasedXPow, &[q], [p, t, s]) => {
            if let Some(symbol) = p.symbol.as_deref() {
                phased_x_phase_gradient(symbol, location, q, p, t.value(), s.value(), records);
            }
            if let Some(symbol) = t.symbol.as_deref() {
                phased_x_exponent_gradient(symbol, location, q, p.value(), t, s.value(), records);
            }
        }
        (GateFamily::FSim, &[a, b], [theta, phi]) => {
            if let Some(symbol) = theta.symbol.as_deref() {
                fsim_theta_gradient(symbol, location, a, b, theta, phi.value(), records);
            }
            if let Some(symbol) = phi.symbol.as_deref() {
                fsim_phi_gradient(symbol, location, a, b, theta.value(), phi, records);
            }
        }
        (GateFamily::PhasedISwapPow, &[a, b], [p, t]) => {
            if let Some(symbol) = p.symbol.as_deref() {
                phased_i_swap_phase_gradient(symbol, location, a, b, p, t.value(), records);
            }
            if let Some(symbol) = t.symbol.as_deref() {
                phased_i_swap_exponent_gradient(symbol, location, a, b, p.value(), t, records);
            }
        }
        (_, &[q], [t, s]) => {
            let Some(create) = single_eigen_constructor(family) else {
                panic!("{} is not a one-qubit eigen family", family.name());
            };
            if let Some(symbol) = t.symbol.as_deref() {
                single_eigen_gradient(create, symbol, location, q, t, s.value(), records);
            }
        }
        (_, &[a, b], [t, s]) => {
            let Some(create) = two_eigen_constructor(family) else {
                panic!("{} is not a two-qubit eigen family", family.name());
            };
            if let Some(symbol) = t.symbol.as_deref() {
                two_eigen_gradient(create, symbol, location, a, b, t, s.value(), records);
            }
        }
        _ => panic!(
            "{} called with {} qubits and {} arguments",
            family.name(),
            qubits.len(),
            args.len()
        ),
    }
}
