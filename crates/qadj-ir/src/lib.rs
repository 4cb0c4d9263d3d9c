//! Gate and program representation for adjoint-gradient compilation.
//!
//! This crate holds the data model shared by the compiler and the
//! observable crates:
//!
//! - **Qubits**: [`QubitId`] addresses a qubit slot
//! - **Matrices**: [`GateMatrix`] stores 2×2 and 4×4 complex matrices as
//!   interleaved `f32` pairs
//! - **Gates**: [`GateFamily`] is the closed set of parameterized families;
//!   [`Gate`] is a resolved application carrying its matrix
//! - **Parameters**: [`ParameterBinding`] for literal or symbolic arguments and
//!   [`ParameterMap`] for resolving symbols to `(index, scale)`
//! - **Programs**: [`Program`] is an ordered list of [`Operation`]s
//!
//! # Example
//!
//! ```rust
//! use qadj_ir::{Program, QubitId};
//!
//! let mut program = Program::new("ansatz");
//! program
//!     .h_pow(QubitId(0), 1.0).unwrap()
//!     .cx_pow(QubitId(0), QubitId(1), 1.0).unwrap()
//!     .zz_pow(QubitId(0), QubitId(1), "gamma").unwrap()
//!     .phased_x_pow(QubitId(1), 0.25, "beta").unwrap();
//!
//! assert_eq!(program.num_qubits(), 2);
//! assert_eq!(program.num_symbolic(), 2);
//! ```
//!
//! # Supported Families
//!
//! | Family | Qubits | Angles |
//! |--------|--------|--------|
//! | `x_pow`, `y_pow`, `z_pow`, `h_pow` | 1 | exponent |
//! | `xx_pow`, `yy_pow`, `zz_pow`, `cz_pow`, `cx_pow`, `swap_pow`, `i_swap_pow` | 2 | exponent |
//! | `phased_x_pow` | 1 | phase exponent, exponent |
//! | `fsim` | 2 | theta, phi |
//! | `phased_i_swap_pow` | 2 | phase exponent, exponent |

pub mod error;
pub mod gate;
pub mod matrix;
pub mod parameter;
pub mod program;
pub mod qubit;

pub use error::{IrError, IrResult};
pub use gate::{Gate, GateFamily, SingleQubitEigenFn, TwoQubitEigenFn, args};
pub use matrix::{GateMatrix, Matrix2, Matrix4};
pub use parameter::{ParameterBinding, ParameterMap, ResolvedArg, SymbolBinding};
pub use program::{Operation, Program};
pub use qubit::QubitId;
