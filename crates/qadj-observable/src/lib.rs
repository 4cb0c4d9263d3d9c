//! Pauli observables and their measurement circuits.
//!
//! A [`PauliTerm`] is converted into two literal-only circuits, both
//! compiled in forward mode by `qadj-compile`:
//!
//! - [`pauli_term_circuit`] applies the term's Pauli factors in order.
//! - [`z_basis_circuit`] rotates each factor's eigenbasis onto Z so the
//!   term can be estimated from computational-basis samples.
//!
//! # Quick start
//!
//! ```rust
//! use qadj_compile::BasicFuser;
//! use qadj_ir::QubitId;
//! use qadj_observable::{PauliOp, PauliTerm, pauli_term_circuit, z_basis_circuit};
//!
//! let term = PauliTerm::new(0.5, [(QubitId(0), PauliOp::X), (QubitId(1), PauliOp::Z)]);
//!
//! let apply = pauli_term_circuit(&term, 2, BasicFuser).unwrap();
//! assert_eq!(apply.gates.len(), 2);
//!
//! let rotate = z_basis_circuit(&term, 2, BasicFuser).unwrap();
//! assert_eq!(rotate.gates.len(), 1);
//! ```

pub mod conversion;
pub mod error;
pub mod pauli;

pub use conversion::{pauli_term_circuit, sum_circuits, z_basis_circuit};
pub use error::{ObservableError, ObservableResult};
pub use pauli::{PauliOp, PauliSum, PauliTerm};
