//! Gradient-aware circuit compilation.
//!
//! This crate turns a declarative [`Program`](qadj_ir::Program) into the
//! inputs of a state-vector simulator and, for adjoint differentiation, the
//! finite-difference gradient gate of every symbol-bound angle.
//!
//! # Overview
//!
//! ```text
//! Program + ParameterMap + values
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ CircuitCompiler │ ◄── GateFuser (BasicFuser / IdentityFuser)
//! └─────────────────┘
//!       │
//!       ├── compile          → CompiledCircuit (gates, one fused run)
//!       └── compile_adjoint  → AdjointCircuit  (gates, runs split at
//!                                               symbolic gates, gradient
//!                                               records)
//! ```
//!
//! # Example
//!
//! ```rust
//! use qadj_compile::CircuitCompiler;
//! use qadj_ir::{ParameterMap, Program, QubitId};
//!
//! let mut program = Program::new("ansatz");
//! program
//!     .h_pow(QubitId(0), 1.0).unwrap()
//!     .cx_pow(QubitId(0), QubitId(1), 1.0).unwrap()
//!     .zz_pow(QubitId(0), QubitId(1), "gamma").unwrap()
//!     .x_pow(QubitId(1), 0.5).unwrap();
//!
//! let params = ParameterMap::from_symbols(["gamma"]);
//! let adjoint = CircuitCompiler::new(2)
//!     .compile_adjoint(&program, &params, &[0.3])
//!     .unwrap();
//!
//! assert_eq!(adjoint.runs.len(), 2);
//! assert_eq!(adjoint.symbolic_positions(), &[2]);
//! assert_eq!(adjoint.gradients.as_slice()[0].params, vec!["gamma"]);
//! adjoint.check_alignment().unwrap();
//! ```

pub mod compiler;
pub mod diff;
pub mod error;
pub mod fusion;
pub mod gradient;

pub use compiler::{AdjointCircuit, CircuitCompiler, CompiledCircuit, FusionRun};
pub use diff::{matrix_diff, matrix2_diff, matrix4_diff};
pub use error::{CompileError, CompileResult};
pub use fusion::{BasicFuser, FusedGate, GateFuser, IdentityFuser};
pub use gradient::{GRAD_EPS, GradientOfGate, GradientRecords, populate_gradients};
