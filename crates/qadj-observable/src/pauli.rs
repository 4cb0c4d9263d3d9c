//! Pauli operators, weighted Pauli terms and sums of terms.
//!
//! An observable is a sum of weighted Pauli terms:
//!
//!   O = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) on distinct qubits.
//!
//! # Example
//!
//! ```rust
//! use qadj_ir::QubitId;
//! use qadj_observable::pauli::{PauliOp, PauliSum, PauliTerm};
//!
//! // O = -1.0·Z₀Z₁  +  0.5·X₀
//! let sum = PauliSum::from_terms(vec![
//!     PauliTerm::new(-1.0, [(QubitId(0), PauliOp::Z), (QubitId(1), PauliOp::Z)]),
//!     PauliTerm::new(0.5, [(QubitId(0), PauliOp::X)]),
//! ]);
//! assert_eq!(sum.len(), 2);
//! assert_eq!(sum.min_qubits(), 2);
//! ```

use qadj_ir::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ObservableError, ObservableResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; produces no gate.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Check if this is the identity.
    pub fn is_identity(self) -> bool {
        self == PauliOp::I
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

/// A weighted tensor product of single-qubit Pauli operators.
///
/// Factors are kept in the order given; conversion emits gates in that
/// order. Identity factors are kept but produce no gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    #[serde(default = "unit_coefficient")]
    pub coefficient: f32,
    /// `(qubit, operator)` factors.
    pub paulis: Vec<(QubitId, PauliOp)>,
}

fn unit_coefficient() -> f32 {
    1.0
}

impl PauliTerm {
    /// Create a term from its factors.
    pub fn new(coefficient: f32, paulis: impl IntoIterator<Item = (QubitId, PauliOp)>) -> Self {
        Self {
            coefficient,
            paulis: paulis.into_iter().collect(),
        }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: QubitId, coefficient: f32) -> Self {
        Self::new(coefficient, [(qubit, PauliOp::Z)])
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: QubitId, q1: QubitId, coefficient: f32) -> Self {
        Self::new(coefficient, [(q0, PauliOp::Z), (q1, PauliOp::Z)])
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: QubitId, coefficient: f32) -> Self {
        Self::new(coefficient, [(qubit, PauliOp::X)])
    }

    /// Factors other than the identity, in order.
    pub fn non_identity(&self) -> impl Iterator<Item = (QubitId, PauliOp)> + '_ {
        self.paulis
            .iter()
            .copied()
            .filter(|(_, op)| !op.is_identity())
    }

    /// True if every factor is the identity.
    pub fn is_identity(&self) -> bool {
        self.non_identity().next().is_none()
    }

    /// The highest qubit referenced, or `None` for an empty term.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.paulis.iter().map(|(q, _)| *q).max()
    }

    /// Check that every qubit is below `num_qubits` and listed once.
    pub fn validate(&self, num_qubits: u32) -> ObservableResult<()> {
        let mut seen = Vec::with_capacity(self.paulis.len());
        for &(qubit, _) in &self.paulis {
            if qubit.0 >= num_qubits {
                return Err(ObservableError::QubitOutOfRange { qubit, num_qubits });
            }
            if seen.contains(&qubit) {
                return Err(ObservableError::DuplicateQubit(qubit));
            }
            seen.push(qubit);
        }
        Ok(())
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficient)?;
        if self.is_identity() {
            return write!(f, "*I");
        }
        for (qubit, op) in self.non_identity() {
            write!(f, "*{op}({qubit})")?;
        }
        Ok(())
    }
}

/// A sum of weighted Pauli terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PauliSum {
    terms: Vec<PauliTerm>,
}

impl PauliSum {
    /// Create an empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<PauliTerm>) -> Self {
        Self { terms }
    }

    /// Append a term.
    pub fn push(&mut self, term: PauliTerm) -> &mut Self {
        self.terms.push(term);
        self
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the sum has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn one_norm(&self) -> f32 {
        self.terms.iter().map(|t| t.coefficient.abs()).sum()
    }

    /// The minimum number of qubits needed to hold every term.
    ///
    /// Returns 0 for an empty sum.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(PauliTerm::max_qubit)
            .max()
            .map_or(0, |q| q.0 + 1)
    }
}

impl FromIterator<PauliTerm> for PauliSum {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PauliSum {
    type Item = &'a PauliTerm;
    type IntoIter = std::slice::Iter<'a, PauliTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
