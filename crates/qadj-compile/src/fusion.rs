//! Gate fusion: grouping a run of resolved gates for batched application.
//!
//! The compiler only decides where runs begin and end; how a run is grouped
//! is up to the [`GateFuser`]. Fused groups refer to gates by their absolute
//! position in the resolved sequence, so a group never owns or reorders
//! matrices.

use std::collections::BTreeMap;

use qadj_ir::{Gate, QubitId};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A group of gates to be applied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusedGate {
    /// Qubits the group acts on, ascending.
    pub qubits: Vec<QubitId>,
    /// Absolute positions of the grouped gates, in application order.
    pub positions: Vec<usize>,
}

impl FusedGate {
    /// Number of gates in the group.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the group holds no gates.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check if the group contains the gate at `position`.
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }
}

/// Groups a contiguous run of gates into simulation-ready units.
///
/// Implementations must preserve the result of applying the run: applying
/// the groups in order, and each group's gates in order, is equivalent to
/// applying `gates` in order. Every gate of the run appears in exactly one
/// group.
pub trait GateFuser: Send + Sync {
    /// Get the name of this fuser.
    fn name(&self) -> &str;

    /// Group `gates`; `gates[i]` sits at absolute position `offset + i`.
    fn fuse(&self, num_qubits: u32, gates: &[Gate], offset: usize) -> Vec<FusedGate>;
}

/// Fuses pending one-qubit gates into the next two-qubit gate on their qubit.
///
/// One-qubit gates with no later two-qubit gate on their qubit are grouped
/// per qubit, ascending, after the last two-qubit group.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFuser;

impl GateFuser for BasicFuser {
    fn name(&self) -> &str {
        "basic"
    }

    fn fuse(&self, num_qubits: u32, gates: &[Gate], offset: usize) -> Vec<FusedGate> {
        let mut pending: BTreeMap<QubitId, Vec<usize>> = BTreeMap::new();
        let mut fused = Vec::new();

        for (i, gate) in gates.iter().enumerate() {
            let position = offset + i;
            match gate.qubits.as_slice() {
                &[q] => pending.entry(q).or_default().push(position),
                &[a, b] => {
                    let mut positions = pending.remove(&a).unwrap_or_default();
                    positions.extend(pending.remove(&b).unwrap_or_default());
                    positions.push(position);
                    fused.push(FusedGate {
                        qubits: vec![a.min(b), a.max(b)],
                        positions,
                    });
                }
                other => unreachable!("gate with {} qubits", other.len()),
            }
        }

        fused.extend(pending.into_iter().map(|(q, positions)| FusedGate {
            qubits: vec![q],
            positions,
        }));

        trace!(
            num_qubits,
            gates = gates.len(),
            groups = fused.len(),
            "basic fusion"
        );
        fused
    }
}

/// Places every gate in its own group.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFuser;

impl GateFuser for IdentityFuser {
    fn name(&self) -> &str {
        "identity"
    }

    fn fuse(&self, _num_qubits: u32, gates: &[Gate], offset: usize) -> Vec<FusedGate> {
        gates
            .iter()
            .enumerate()
            .map(|(i, gate)| {
                let mut qubits = gate.qubits.clone();
                qubits.sort_unstable();
                FusedGate {
                    qubits,
                    positions: vec![offset + i],
                }
            })
            .collect()
    }
}
