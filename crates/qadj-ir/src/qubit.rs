//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit slot within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a `usize`, for indexing state or bookkeeping arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(17)), "q17");
    }

    #[test]
    fn test_qubit_ordering() {
        let mut qubits = vec![QubitId(3), QubitId(0), QubitId(2)];
        qubits.sort();
        assert_eq!(qubits, vec![QubitId(0), QubitId(2), QubitId(3)]);
        assert_eq!(QubitId(2).index(), 2);
    }

    #[test]
    fn test_qubit_serde_transparent() {
        let json = serde_json::to_string(&QubitId(4)).unwrap();
        assert_eq!(json, "4");
        let back: QubitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QubitId(4));
    }
}
