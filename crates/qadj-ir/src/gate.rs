//! Gate families and their matrix constructors.
//!
//! Every family is an eigen-gate style parameterisation: for an exponent `t`
//! and global shift `s`, a gate with eigenprojectors `P_k` and eigenphases
//! `λ_k` has the unitary
//!
//! ```text
//! U(t, s) = Σ_k exp(iπ t (λ_k + s)) P_k
//! ```
//!
//! The multi-angle families (`PhasedXPow`, `FSim`, `PhasedISwapPow`) expose
//! two independent continuous angles.
//!
//! All matrices are computed in single precision, matching the precision of
//! the state-vector simulator that consumes them.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex32;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::matrix::GateMatrix;
use crate::qubit::QubitId;

/// Canonical argument names.
pub mod args {
    /// Exponent of an eigen gate (rotation amount in half turns).
    pub const EXPONENT: &str = "exponent";
    /// Global phase shift of an eigen gate.
    pub const GLOBAL_SHIFT: &str = "global_shift";
    /// Phase exponent of the phased families.
    pub const PHASE_EXPONENT: &str = "phase_exponent";
    /// Swap angle of the fermionic simulation gate.
    pub const THETA: &str = "theta";
    /// Conditional phase angle of the fermionic simulation gate.
    pub const PHI: &str = "phi";
}

const EIGEN_ARGS: &[&str] = &[args::EXPONENT, args::GLOBAL_SHIFT];
const PHASED_X_ARGS: &[&str] = &[args::PHASE_EXPONENT, args::EXPONENT, args::GLOBAL_SHIFT];
const FSIM_ARGS: &[&str] = &[args::THETA, args::PHI];
const PHASED_ISWAP_ARGS: &[&str] = &[args::PHASE_EXPONENT, args::EXPONENT];

/// The closed set of supported gate families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateFamily {
    /// `X**t`.
    XPow,
    /// `Y**t`.
    YPow,
    /// `Z**t`.
    ZPow,
    /// `H**t`.
    HPow,
    /// `XX**t`.
    XxPow,
    /// `YY**t`.
    YyPow,
    /// `ZZ**t`.
    ZzPow,
    /// `CZ**t`.
    CzPow,
    /// `CNOT**t`, first qubit is the control.
    CxPow,
    /// `SWAP**t`.
    SwapPow,
    /// `ISWAP**t`.
    ISwapPow,
    /// `Z**p · X**t · Z**-p`.
    PhasedXPow,
    /// Fermionic simulation gate `FSim(θ, φ)`.
    #[serde(rename = "fsim")]
    FSim,
    /// Phased iSWAP `(Z**p ⊗ Z**-p)† · ISWAP**t · (Z**p ⊗ Z**-p)`.
    PhasedISwapPow,
}

impl GateFamily {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            GateFamily::XPow => "x_pow",
            GateFamily::YPow => "y_pow",
            GateFamily::ZPow => "z_pow",
            GateFamily::HPow => "h_pow",
            GateFamily::XxPow => "xx_pow",
            GateFamily::YyPow => "yy_pow",
            GateFamily::ZzPow => "zz_pow",
            GateFamily::CzPow => "cz_pow",
            GateFamily::CxPow => "cx_pow",
            GateFamily::SwapPow => "swap_pow",
            GateFamily::ISwapPow => "i_swap_pow",
            GateFamily::PhasedXPow => "phased_x_pow",
            GateFamily::FSim => "fsim",
            GateFamily::PhasedISwapPow => "phased_i_swap_pow",
        }
    }

    /// Number of qubits a gate of this family acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateFamily::XPow
            | GateFamily::YPow
            | GateFamily::ZPow
            | GateFamily::HPow
            | GateFamily::PhasedXPow => 1,

            GateFamily::XxPow
            | GateFamily::YyPow
            | GateFamily::ZzPow
            | GateFamily::CzPow
            | GateFamily::CxPow
            | GateFamily::SwapPow
            | GateFamily::ISwapPow
            | GateFamily::FSim
            | GateFamily::PhasedISwapPow => 2,
        }
    }

    /// Argument names in canonical order.
    pub fn arguments(&self) -> &'static [&'static str] {
        match self {
            GateFamily::PhasedXPow => PHASED_X_ARGS,
            GateFamily::FSim => FSIM_ARGS,
            GateFamily::PhasedISwapPow => PHASED_ISWAP_ARGS,
            _ => EIGEN_ARGS,
        }
    }

    /// Whether `name` may be omitted, and its default if so.
    pub fn default_for(&self, name: &str) -> Option<f32> {
        (name == args::GLOBAL_SHIFT && self.arguments().contains(&args::GLOBAL_SHIFT))
            .then_some(0.0)
    }

    /// Whether `name` is a continuous angle that gradients are taken against.
    pub fn is_differentiable(&self, name: &str) -> bool {
        name != args::GLOBAL_SHIFT && self.arguments().contains(&name)
    }

    /// True for the families with two independent angles.
    pub fn is_dual_angle(&self) -> bool {
        matches!(
            self,
            GateFamily::PhasedXPow | GateFamily::FSim | GateFamily::PhasedISwapPow
        )
    }
}

/// Constructor shared by the one-qubit eigen families.
pub type SingleQubitEigenFn = fn(QubitId, f32, f32) -> Gate;

/// Constructor shared by the two-qubit eigen families.
pub type TwoQubitEigenFn = fn(QubitId, QubitId, f32, f32) -> Gate;

/// A resolved gate: family, operands, concrete parameters and matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Family the gate belongs to.
    pub family: GateFamily,
    /// Qubit slots, in the order the matrix is written for.
    pub qubits: Vec<QubitId>,
    /// Bound parameter values, in the family's canonical argument order.
    pub params: Vec<f32>,
    /// The gate unitary.
    pub matrix: GateMatrix,
}

#[inline]
fn cz(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

#[inline]
fn phase(angle: f32) -> Complex32 {
    Complex32::from_polar(1.0, angle)
}

/// `(cos(πt/2), sin(πt/2))` for exponent `t`.
#[inline]
fn half_turn(exponent: f32) -> (f32, f32) {
    let (s, c) = (PI * exponent * 0.5).sin_cos();
    (c, s)
}

impl Gate {
    fn one(family: GateFamily, q: QubitId, params: Vec<f32>, rows: [[Complex32; 2]; 2]) -> Self {
        Self {
            family,
            qubits: vec![q],
            params,
            matrix: GateMatrix::from_rows2(rows),
        }
    }

    fn two(
        family: GateFamily,
        q0: QubitId,
        q1: QubitId,
        params: Vec<f32>,
        rows: [[Complex32; 4]; 4],
    ) -> Self {
        Self {
            family,
            qubits: vec![q0, q1],
            params,
            matrix: GateMatrix::from_rows4(rows),
        }
    }

    // =========================================================================
    // One-qubit eigen families
    // =========================================================================

    /// `X**exponent` with a global shift.
    pub fn x_pow(q: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let off = g * cz(0.0, -s);
        Self::one(
            GateFamily::XPow,
            q,
            vec![exponent, global_shift],
            [[g * c, off], [off, g * c]],
        )
    }

    /// `Y**exponent` with a global shift.
    pub fn y_pow(q: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        Self::one(
            GateFamily::YPow,
            q,
            vec![exponent, global_shift],
            [[g * c, -g * s], [g * s, g * c]],
        )
    }

    /// `Z**exponent` with a global shift.
    pub fn z_pow(q: QubitId, exponent: f32, global_shift: f32) -> Self {
        let g0 = phase(PI * exponent * global_shift);
        let g1 = phase(PI * exponent * (1.0 + global_shift));
        let zero = Complex32::default();
        Self::one(
            GateFamily::ZPow,
            q,
            vec![exponent, global_shift],
            [[g0, zero], [zero, g1]],
        )
    }

    /// `H**exponent` with a global shift.
    pub fn h_pow(q: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let r = s * FRAC_1_SQRT_2;
        let off = g * cz(0.0, -r);
        Self::one(
            GateFamily::HPow,
            q,
            vec![exponent, global_shift],
            [[g * cz(c, -r), off], [off, g * cz(c, r)]],
        )
    }

    // =========================================================================
    // Two-qubit eigen families
    // =========================================================================

    /// `XX**exponent` with a global shift.
    pub fn xx_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let d = g * c;
        let a = g * cz(0.0, -s);
        let o = Complex32::default();
        Self::two(
            GateFamily::XxPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[d, o, o, a], [o, d, a, o], [o, a, d, o], [a, o, o, d]],
        )
    }

    /// `YY**exponent` with a global shift.
    pub fn yy_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let d = g * c;
        let a = g * cz(0.0, -s);
        let o = Complex32::default();
        Self::two(
            GateFamily::YyPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[d, o, o, -a], [o, d, a, o], [o, a, d, o], [-a, o, o, d]],
        )
    }

    /// `ZZ**exponent` with a global shift.
    pub fn zz_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let g0 = phase(PI * exponent * global_shift);
        let g1 = phase(PI * exponent * (1.0 + global_shift));
        let o = Complex32::default();
        Self::two(
            GateFamily::ZzPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[g0, o, o, o], [o, g1, o, o], [o, o, g1, o], [o, o, o, g0]],
        )
    }

    /// `CZ**exponent` with a global shift.
    pub fn cz_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let g0 = phase(PI * exponent * global_shift);
        let g1 = phase(PI * exponent * (1.0 + global_shift));
        let o = Complex32::default();
        Self::two(
            GateFamily::CzPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[g0, o, o, o], [o, g0, o, o], [o, o, g0, o], [o, o, o, g1]],
        )
    }

    /// `CNOT**exponent` with a global shift; `q0` controls `q1`.
    pub fn cx_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g0 = phase(PI * exponent * global_shift);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let d = g * c;
        let a = g * cz(0.0, -s);
        let o = Complex32::default();
        Self::two(
            GateFamily::CxPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[g0, o, o, o], [o, g0, o, o], [o, o, d, a], [o, o, a, d]],
        )
    }

    /// `SWAP**exponent` with a global shift.
    pub fn swap_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g0 = phase(PI * exponent * global_shift);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let d = g * c;
        let a = g * cz(0.0, -s);
        let o = Complex32::default();
        Self::two(
            GateFamily::SwapPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[g0, o, o, o], [o, d, a, o], [o, a, d, o], [o, o, o, g0]],
        )
    }

    /// `ISWAP**exponent` with a global shift.
    pub fn i_swap_pow(q0: QubitId, q1: QubitId, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g0 = phase(PI * exponent * global_shift);
        let d = g0 * c;
        let a = g0 * cz(0.0, s);
        let o = Complex32::default();
        Self::two(
            GateFamily::ISwapPow,
            q0,
            q1,
            vec![exponent, global_shift],
            [[g0, o, o, o], [o, d, a, o], [o, a, d, o], [o, o, o, g0]],
        )
    }

    // =========================================================================
    // Dual-angle families
    // =========================================================================

    /// `Z**p · X**t · Z**-p`, where `X**t` carries the global shift.
    pub fn phased_x_pow(q: QubitId, phase_exponent: f32, exponent: f32, global_shift: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let g = phase(PI * exponent * (0.5 + global_shift));
        let off = g * cz(0.0, -s);
        let p = phase(PI * phase_exponent);
        Self::one(
            GateFamily::PhasedXPow,
            q,
            vec![phase_exponent, exponent, global_shift],
            [[g * c, off * p.conj()], [off * p, g * c]],
        )
    }

    /// Fermionic simulation gate with swap angle `theta` and phase `phi`.
    pub fn fsim(q0: QubitId, q1: QubitId, theta: f32, phi: f32) -> Self {
        let (s, c) = theta.sin_cos();
        let one = cz(1.0, 0.0);
        let a = cz(0.0, -s);
        let d = cz(c, 0.0);
        let o = Complex32::default();
        Self::two(
            GateFamily::FSim,
            q0,
            q1,
            vec![theta, phi],
            [[one, o, o, o], [o, d, a, o], [o, a, d, o], [o, o, o, phase(-phi)]],
        )
    }

    /// Phased `ISWAP**exponent`.
    pub fn phased_i_swap_pow(q0: QubitId, q1: QubitId, phase_exponent: f32, exponent: f32) -> Self {
        let (c, s) = half_turn(exponent);
        let f = phase(2.0 * PI * phase_exponent);
        let one = cz(1.0, 0.0);
        let d = cz(c, 0.0);
        let a = cz(0.0, s);
        let o = Complex32::default();
        Self::two(
            GateFamily::PhasedISwapPow,
            q0,
            q1,
            vec![phase_exponent, exponent],
            [[one, o, o, o], [o, d, a * f, o], [o, a * f.conj(), d, o], [o, o, o, one]],
        )
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Build a gate of `family` from its qubits and its argument values in
    /// canonical order (see [`GateFamily::arguments`]).
    pub fn from_family(family: GateFamily, qubits: &[QubitId], values: &[f32]) -> IrResult<Self> {
        let expected_qubits = family.num_qubits();
        if qubits.len() != expected_qubits as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: family.name().to_string(),
                expected: expected_qubits,
                got: qubits.len() as u32,
            });
        }
        let expected_args = family.arguments().len();
        if values.len() != expected_args {
            return Err(IrError::ArgumentCountMismatch {
                gate_name: family.name().to_string(),
                expected: expected_args,
                got: values.len(),
            });
        }

        let gate = match (family, qubits, values) {
            (GateFamily::XPow, &[q], &[t, s]) => Self::x_pow(q, t, s),
            (GateFamily::YPow, &[q], &[t, s]) => Self::y_pow(q, t, s),
            (GateFamily::ZPow, &[q], &[t, s]) => Self::z_pow(q, t, s),
            (GateFamily::HPow, &[q], &[t, s]) => Self::h_pow(q, t, s),
            (GateFamily::XxPow, &[a, b], &[t, s]) => Self::xx_pow(a, b, t, s),
            (GateFamily::YyPow, &[a, b], &[t, s]) => Self::yy_pow(a, b, t, s),
            (GateFamily::ZzPow, &[a, b], &[t, s]) => Self::zz_pow(a, b, t, s),
            (GateFamily::CzPow, &[a, b], &[t, s]) => Self::cz_pow(a, b, t, s),
            (GateFamily::CxPow, &[a, b], &[t, s]) => Self::cx_pow(a, b, t, s),
            (GateFamily::SwapPow, &[a, b], &[t, s]) => Self::swap_pow(a, b, t, s),
            (GateFamily::ISwapPow, &[a, b], &[t, s]) => Self::i_swap_pow(a, b, t, s),
            (GateFamily::PhasedXPow, &[q], &[p, t, s]) => Self::phased_x_pow(q, p, t, s),
            (GateFamily::FSim, &[a, b], &[theta, phi]) => Self::fsim(a, b, theta, phi),
            (GateFamily::PhasedISwapPow, &[a, b], &[p, t]) => Self::phased_i_swap_pow(a, b, p, t),
            // Lengths were checked against the family above.
            _ => unreachable!("arity checked for {}", family.name()),
        };
        Ok(gate)
    }

    /// Family name.
    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.family.num_qubits()
    }
}
