//! Dense gate matrices in interleaved single-precision layout.
//!
//! A gate on `n` qubits carries a `2^n × 2^n` complex matrix stored in
//! row-major order as interleaved `(re, im)` pairs:
//!
//! ```text
//! [re(0,0), im(0,0), re(0,1), im(0,1), ..., re(d-1,d-1), im(d-1,d-1)]
//! ```
//!
//! One-qubit matrices therefore hold 8 floats and two-qubit matrices 32.
//! For two-qubit matrices the first qubit slot of the gate is the most
//! significant bit of the basis index (`|q0 q1⟩`).

use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// Interleaved 2×2 complex matrix.
pub type Matrix2 = [f32; 8];

/// Interleaved 4×4 complex matrix.
pub type Matrix4 = [f32; 32];

/// The matrix of a one- or two-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMatrix {
    /// 2×2 matrix of a one-qubit gate.
    One(Matrix2),
    /// 4×4 matrix of a two-qubit gate.
    Two(Matrix4),
}

impl GateMatrix {
    /// Build a one-qubit matrix from complex rows.
    pub fn from_rows2(rows: [[Complex32; 2]; 2]) -> Self {
        let mut m = [0.0; 8];
        fill_interleaved(rows.as_flattened(), &mut m);
        GateMatrix::One(m)
    }

    /// Build a two-qubit matrix from complex rows.
    pub fn from_rows4(rows: [[Complex32; 4]; 4]) -> Self {
        let mut m = [0.0; 32];
        fill_interleaved(rows.as_flattened(), &mut m);
        GateMatrix::Two(m)
    }

    /// Number of qubits the matrix acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateMatrix::One(_) => 1,
            GateMatrix::Two(_) => 2,
        }
    }

    /// Matrix dimension (2 or 4).
    #[inline]
    pub fn dim(&self) -> usize {
        1 << self.num_qubits()
    }

    /// The raw interleaved floats.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        match self {
            GateMatrix::One(m) => m,
            GateMatrix::Two(m) => m,
        }
    }

    /// Mutable access to the raw interleaved floats.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        match self {
            GateMatrix::One(m) => m,
            GateMatrix::Two(m) => m,
        }
    }

    /// Complex entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`dim`](Self::dim).
    pub fn entry(&self, row: usize, col: usize) -> Complex32 {
        let dim = self.dim();
        assert!(row < dim && col < dim, "entry ({row}, {col}) out of range for {dim}x{dim}");
        let k = 2 * (row * dim + col);
        let m = self.as_slice();
        Complex32::new(m[k], m[k + 1])
    }

    /// Multiply every entry by a real scalar, in place.
    pub fn scale(&mut self, factor: f32) {
        for v in self.as_mut_slice() {
            *v *= factor;
        }
    }

    /// Largest absolute difference between corresponding floats.
    ///
    /// Returns `f32::INFINITY` when the shapes differ.
    pub fn max_abs_diff(&self, other: &GateMatrix) -> f32 {
        if self.num_qubits() != other.num_qubits() {
            return f32::INFINITY;
        }
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

fn fill_interleaved(entries: &[Complex32], out: &mut [f32]) {
    for (chunk, z) in out.chunks_exact_mut(2).zip(entries) {
        chunk[0] = z.re;
        chunk[1] = z.im;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    #[test]
    fn test_from_rows2_layout() {
        let m = GateMatrix::from_rows2([[c(1.0, 2.0), c(3.0, 4.0)], [c(5.0, 6.0), c(7.0, 8.0)]]);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(m.num_qubits(), 1);
        assert_eq!(m.entry(1, 0), c(5.0, 6.0));
    }

    #[test]
    fn test_from_rows4_entry() {
        let mut rows = [[Complex32::new(0.0, 0.0); 4]; 4];
        rows[2][3] = c(0.5, -0.25);
        let m = GateMatrix::from_rows4(rows);
        assert_eq!(m.dim(), 4);
        assert_eq!(m.entry(2, 3), c(0.5, -0.25));
        assert_eq!(m.as_slice()[2 * (2 * 4 + 3)], 0.5);
        assert_eq!(m.as_slice()[2 * (2 * 4 + 3) + 1], -0.25);
    }

    #[test]
    fn test_scale() {
        let mut m = GateMatrix::One([1.0, -2.0, 0.0, 4.0, 1.0, 1.0, 1.0, 1.0]);
        m.scale(0.5);
        assert_eq!(m.as_slice(), &[0.5, -1.0, 0.0, 2.0, 0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_max_abs_diff_shape_mismatch() {
        let a = GateMatrix::One([0.0; 8]);
        let b = GateMatrix::Two([0.0; 32]);
        assert!(a.max_abs_diff(&b).is_infinite());
        assert_eq!(a.max_abs_diff(&a), 0.0);
    }
}
