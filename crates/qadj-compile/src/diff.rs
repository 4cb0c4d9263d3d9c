//! In-place matrix difference.
//!
//! Every gradient gate is a scaled difference of two evaluations of the
//! same gate family, so this is the one numeric primitive the synthesizers
//! share.

use qadj_ir::{GateMatrix, Matrix2, Matrix4};

/// Overwrite `second` with `first - second`, entrywise.
#[inline]
pub fn matrix2_diff(first: &Matrix2, second: &mut Matrix2) {
    for (b, a) in second.iter_mut().zip(first) {
        *b = a - *b;
    }
}

/// Overwrite `second` with `first - second`, entrywise.
#[inline]
pub fn matrix4_diff(first: &Matrix4, second: &mut Matrix4) {
    for (b, a) in second.iter_mut().zip(first) {
        *b = a - *b;
    }
}

/// Overwrite `second` with `first - second` for gate matrices of equal shape.
///
/// # Panics
///
/// Panics if the two matrices act on different numbers of qubits. Both
/// operands always come from the same gate family, so a mismatch is a bug
/// in the caller.
pub fn matrix_diff(first: &GateMatrix, second: &mut GateMatrix) {
    match (first, second) {
        (GateMatrix::One(a), GateMatrix::One(b)) => matrix2_diff(a, b),
        (GateMatrix::Two(a), GateMatrix::Two(b)) => matrix4_diff(a, b),
        (a, b) => panic!(
            "matrix_diff on mismatched shapes: {} vs {} qubits",
            a.num_qubits(),
            b.num_qubits()
        ),
    }
}
