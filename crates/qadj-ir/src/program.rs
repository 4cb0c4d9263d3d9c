//! Declarative programs: ordered gate applications with literal or
//! symbolic arguments.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateFamily, args};
use crate::parameter::ParameterBinding;
use crate::qubit::QubitId;

/// One gate application in a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate family.
    pub family: GateFamily,
    /// Qubit operands.
    pub qubits: Vec<QubitId>,
    /// Arguments by name.
    #[serde(default)]
    pub args: BTreeMap<String, ParameterBinding>,
}

impl Operation {
    /// Create an operation with no arguments yet.
    pub fn new(family: GateFamily, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            family,
            qubits: qubits.into_iter().collect(),
            args: BTreeMap::new(),
        }
    }

    /// Set an argument.
    #[must_use]
    pub fn with_arg(mut self, name: &str, binding: impl Into<ParameterBinding>) -> Self {
        self.args.insert(name.to_string(), binding.into());
        self
    }

    /// Get an argument binding by name.
    pub fn arg(&self, name: &str) -> Option<&ParameterBinding> {
        self.args.get(name)
    }

    /// Check if any argument is bound to a symbol.
    pub fn is_symbolic(&self) -> bool {
        self.args.values().any(ParameterBinding::is_symbolic)
    }

    /// Symbols referenced by this operation, in canonical argument order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.family
            .arguments()
            .iter()
            .filter_map(|name| self.args.get(*name).and_then(ParameterBinding::as_symbol))
    }

    /// Check the operation's shape against its family.
    ///
    /// Qubit indices are not range-checked here; that needs the target
    /// qubit count and happens at compile time.
    pub fn validate(&self) -> IrResult<()> {
        let name = self.family.name();
        let expected = self.family.num_qubits();
        if self.qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected,
                got: self.qubits.len() as u32,
            });
        }
        for (i, q) in self.qubits.iter().enumerate() {
            if self.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        let known = self.family.arguments();
        if let Some(extra) = self.args.keys().find(|k| !known.contains(&k.as_str())) {
            return Err(IrError::UnexpectedArgument {
                gate_name: name.to_string(),
                argument: extra.clone(),
            });
        }
        for arg in known {
            match self.args.get(*arg) {
                None if self.family.default_for(arg).is_none() => {
                    return Err(IrError::MissingArgument {
                        gate_name: name.to_string(),
                        argument: (*arg).to_string(),
                    });
                }
                Some(ParameterBinding::Symbol(symbol)) if !self.family.is_differentiable(arg) => {
                    return Err(IrError::SymbolicArgument {
                        gate_name: name.to_string(),
                        argument: (*arg).to_string(),
                        symbol: symbol.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// An ordered list of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Name of the program.
    #[serde(default)]
    pub name: String,
    /// Operations in application order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Program {
    /// Create an empty program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: vec![],
        }
    }

    /// Append a validated operation.
    pub fn push(&mut self, op: Operation) -> IrResult<&mut Self> {
        op.validate()?;
        self.operations.push(op);
        Ok(self)
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the program has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Smallest qubit count that covers every operand.
    pub fn num_qubits(&self) -> u32 {
        self.operations
            .iter()
            .flat_map(|op| op.qubits.iter())
            .map(|q| q.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// All symbols referenced by the program.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.operations
            .iter()
            .flat_map(Operation::symbols)
            .map(str::to_string)
            .collect()
    }

    /// Number of operations carrying at least one symbol.
    pub fn num_symbolic(&self) -> usize {
        self.operations.iter().filter(|op| op.is_symbolic()).count()
    }

    // =========================================================================
    // Eigen-gate builders
    // =========================================================================

    fn eigen1(
        &mut self,
        family: GateFamily,
        q: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.push(Operation::new(family, [q]).with_arg(args::EXPONENT, exponent))
    }

    fn eigen2(
        &mut self,
        family: GateFamily,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.push(Operation::new(family, [q0, q1]).with_arg(args::EXPONENT, exponent))
    }

    /// Apply `X**exponent`.
    pub fn x_pow(&mut self, q: QubitId, exponent: impl Into<ParameterBinding>) -> IrResult<&mut Self> {
        self.eigen1(GateFamily::XPow, q, exponent)
    }

    /// Apply `Y**exponent`.
    pub fn y_pow(&mut self, q: QubitId, exponent: impl Into<ParameterBinding>) -> IrResult<&mut Self> {
        self.eigen1(GateFamily::YPow, q, exponent)
    }

    /// Apply `Z**exponent`.
    pub fn z_pow(&mut self, q: QubitId, exponent: impl Into<ParameterBinding>) -> IrResult<&mut Self> {
        self.eigen1(GateFamily::ZPow, q, exponent)
    }

    /// Apply `H**exponent`.
    pub fn h_pow(&mut self, q: QubitId, exponent: impl Into<ParameterBinding>) -> IrResult<&mut Self> {
        self.eigen1(GateFamily::HPow, q, exponent)
    }

    /// Apply `XX**exponent`.
    pub fn xx_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::XxPow, q0, q1, exponent)
    }

    /// Apply `YY**exponent`.
    pub fn yy_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::YyPow, q0, q1, exponent)
    }

    /// Apply `ZZ**exponent`.
    pub fn zz_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::ZzPow, q0, q1, exponent)
    }

    /// Apply `CZ**exponent`.
    pub fn cz_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::CzPow, q0, q1, exponent)
    }

    /// Apply `CNOT**exponent` with `control` and `target`.
    pub fn cx_pow(
        &mut self,
        control: QubitId,
        target: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::CxPow, control, target, exponent)
    }

    /// Apply `SWAP**exponent`.
    pub fn swap_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::SwapPow, q0, q1, exponent)
    }

    /// Apply `ISWAP**exponent`.
    pub fn i_swap_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.eigen2(GateFamily::ISwapPow, q0, q1, exponent)
    }

    // =========================================================================
    // Dual-angle builders
    // =========================================================================

    /// Apply a phased X rotation.
    pub fn phased_x_pow(
        &mut self,
        q: QubitId,
        phase_exponent: impl Into<ParameterBinding>,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.push(
            Operation::new(GateFamily::PhasedXPow, [q])
                .with_arg(args::PHASE_EXPONENT, phase_exponent)
                .with_arg(args::EXPONENT, exponent),
        )
    }

    /// Apply a fermionic simulation gate.
    pub fn fsim(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        theta: impl Into<ParameterBinding>,
        phi: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.push(
            Operation::new(GateFamily::FSim, [q0, q1])
                .with_arg(args::THETA, theta)
                .with_arg(args::PHI, phi),
        )
    }

    /// Apply a phased iSWAP power.
    pub fn phased_i_swap_pow(
        &mut self,
        q0: QubitId,
        q1: QubitId,
        phase_exponent: impl Into<ParameterBinding>,
        exponent: impl Into<ParameterBinding>,
    ) -> IrResult<&mut Self> {
        self.push(
            Operation::new(GateFamily::PhasedISwapPow, [q0, q1])
                .with_arg(args::PHASE_EXPONENT, phase_exponent)
                .with_arg(args::EXPONENT, exponent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let mut program = Program::new("ansatz");
        program
            .h_pow(QubitId(0), 1.0)
            .unwrap()
            .cx_pow(QubitId(0), QubitId(1), 1.0)
            .unwrap()
            .fsim(QubitId(1), QubitId(2), "theta", 0.2)
            .unwrap()
            .phased_x_pow(QubitId(0), "p", "t")
            .unwrap();

        assert_eq!(program.len(), 4);
        assert_eq!(program.num_qubits(), 3);
        assert_eq!(program.num_symbolic(), 2);
        let symbols: Vec<_> = program.symbols().into_iter().collect();
        assert_eq!(symbols, vec!["p", "t", "theta"]);
    }

    #[test]
    fn test_operation_symbols_in_argument_order() {
        let op = Operation::new(GateFamily::PhasedISwapPow, [QubitId(0), QubitId(1)])
            .with_arg(args::EXPONENT, "b")
            .with_arg(args::PHASE_EXPONENT, "a");
        let symbols: Vec<_> = op.symbols().collect();
        assert_eq!(symbols, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_qubit_count() {
        let op = Operation::new(GateFamily::CzPow, [QubitId(0)]).with_arg(args::EXPONENT, 1.0);
        assert!(matches!(
            op.validate(),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_qubit() {
        let mut program = Program::new("dup");
        let err = program.swap_pow(QubitId(1), QubitId(1), 0.5).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));
        assert!(program.is_empty());
    }

    #[test]
    fn test_validate_arguments() {
        let missing = Operation::new(GateFamily::FSim, [QubitId(0), QubitId(1)])
            .with_arg(args::THETA, 0.1);
        assert!(matches!(
            missing.validate(),
            Err(IrError::MissingArgument { ref argument, .. }) if argument == "phi"
        ));

        let unexpected = Operation::new(GateFamily::XPow, [QubitId(0)])
            .with_arg(args::EXPONENT, 0.1)
            .with_arg(args::THETA, 0.2);
        assert!(matches!(
            unexpected.validate(),
            Err(IrError::UnexpectedArgument { ref argument, .. }) if argument == "theta"
        ));

        let symbolic_shift = Operation::new(GateFamily::ZPow, [QubitId(0)])
            .with_arg(args::EXPONENT, 0.1)
            .with_arg(args::GLOBAL_SHIFT, "s");
        assert!(matches!(
            symbolic_shift.validate(),
            Err(IrError::SymbolicArgument { ref symbol, .. }) if symbol == "s"
        ));

        let shift_literal = Operation::new(GateFamily::ZPow, [QubitId(0)])
            .with_arg(args::EXPONENT, "t")
            .with_arg(args::GLOBAL_SHIFT, -0.5);
        assert!(shift_literal.validate().is_ok());
    }

    #[test]
    fn test_program_json() {
        let json = r#"{
            "name": "demo",
            "operations": [
                {"family": "x_pow", "qubits": [0], "args": {"exponent": "alpha"}},
                {"family": "cz_pow", "qubits": [0, 1], "args": {"exponent": 1.0, "global_shift": 0.0}}
            ]
        }"#;
        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.operations[0].arg("exponent"), Some(&ParameterBinding::symbol("alpha")));
        assert_eq!(program.operations[1].family, GateFamily::CzPow);
        assert!(program.operations.iter().all(|op| op.validate().is_ok()));
    }
}
