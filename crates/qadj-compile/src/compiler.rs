//! Program → resolved gate sequence, fused runs and gradient records.
//!
//! Compilation walks the program once: every operation is resolved against
//! the parameter map and emitted at the next position. In adjoint mode a
//! symbolic operation additionally closes the open fusion run, has its
//! gradients synthesized, and opens a fresh run after itself. The last run
//! is always closed, even when empty, so an adjoint circuit with `k`
//! symbolic gates carries exactly `k + 1` runs.

use qadj_ir::{Gate, Operation, ParameterBinding, ParameterMap, Program, ResolvedArg};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::error::{CompileError, CompileResult};
use crate::fusion::{BasicFuser, FusedGate, GateFuser};
use crate::gradient::{GradientRecords, populate_gradients};

/// Forward-mode output: every gate fused as one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    /// Target qubit count.
    pub num_qubits: u32,
    /// Resolved gates in application order.
    pub gates: Vec<Gate>,
    /// Fused groups over the whole sequence.
    pub fused: Vec<FusedGate>,
}

impl CompiledCircuit {
    /// Number of resolved gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }
}

/// A maximal span of non-symbolic gates between symbolic ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionRun {
    /// First position covered by the run.
    pub start: usize,
    /// One past the last position covered by the run.
    pub end: usize,
    /// Fused groups over `start..end`.
    pub fused: Vec<FusedGate>,
}

impl FusionRun {
    /// Number of gates the run covers.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the run covers no gates.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Adjoint-mode output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjointCircuit {
    /// Target qubit count.
    pub num_qubits: u32,
    /// Resolved gates in application order, symbolic gates included.
    pub gates: Vec<Gate>,
    /// Runs in order; symbolic gates sit between consecutive runs.
    pub runs: Vec<FusionRun>,
    /// One record per symbolic gate, in position order.
    pub gradients: GradientRecords,
    symbolic: Vec<usize>,
}

impl AdjointCircuit {
    /// Positions of the symbolic gates, ascending.
    pub fn symbolic_positions(&self) -> &[usize] {
        &self.symbolic
    }

    /// Number of resolved gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Verify that runs, symbolic gates and gradient records line up.
    ///
    /// Checks that there is one more run than symbolic gates, that run `k`
    /// covers exactly the positions between symbolic gates `k - 1` and `k`
    /// (each once, none symbolic), and that the gradient records are
    /// indexed by the symbolic positions in order with matching
    /// `params`/`grad_gates` lengths.
    pub fn check_alignment(&self) -> CompileResult<()> {
        let misaligned = |msg: String| Err(CompileError::Misaligned(msg));

        if self.runs.len() != self.symbolic.len() + 1 {
            return misaligned(format!(
                "{} runs for {} symbolic gates",
                self.runs.len(),
                self.symbolic.len()
            ));
        }

        let mut start = 0;
        for (k, run) in self.runs.iter().enumerate() {
            let end = self.symbolic.get(k).copied().unwrap_or(self.gates.len());
            if run.start != start || run.end != end {
                return misaligned(format!(
                    "run {k} spans {}..{}, expected {start}..{end}",
                    run.start, run.end
                ));
            }
            let mut covered: Vec<usize> = run
                .fused
                .iter()
                .flat_map(|f| f.positions.iter().copied())
                .collect();
            covered.sort_unstable();
            if !covered.iter().copied().eq(start..end) {
                return misaligned(format!("run {k} does not cover {start}..{end} exactly once"));
            }
            start = end + 1;
        }

        if self.gradients.len() != self.symbolic.len() {
            return misaligned(format!(
                "{} gradient records for {} symbolic gates",
                self.gradients.len(),
                self.symbolic.len()
            ));
        }
        for (record, &position) in self.gradients.iter().zip(&self.symbolic) {
            if record.index != position {
                return misaligned(format!(
                    "gradient record at {} but symbolic gate at {position}",
                    record.index
                ));
            }
            if record.params.is_empty() || record.params.len() != record.grad_gates.len() {
                return misaligned(format!(
                    "gradient record at {position} has {} params and {} gates",
                    record.params.len(),
                    record.grad_gates.len()
                ));
            }
        }
        Ok(())
    }
}

/// Accumulator for the adjoint walk.
struct AdjointState {
    gates: Vec<Gate>,
    runs: Vec<FusionRun>,
    gradients: GradientRecords,
    symbolic: Vec<usize>,
    run_start: usize,
}

impl AdjointState {
    fn with_capacity(n: usize) -> Self {
        Self {
            gates: Vec::with_capacity(n),
            runs: Vec::new(),
            gradients: GradientRecords::new(),
            symbolic: Vec::new(),
            run_start: 0,
        }
    }

    /// Close the open run at the current end of the sequence.
    fn close_run(&mut self, fuser: &dyn GateFuser, num_qubits: u32) {
        let (start, end) = (self.run_start, self.gates.len());
        let fused = fuser.fuse(num_qubits, &self.gates[start..end], start);
        trace!(start, end, groups = fused.len(), "closed run");
        self.runs.push(FusionRun { start, end, fused });
    }
}

/// Compiles programs for a fixed qubit count.
pub struct CircuitCompiler {
    num_qubits: u32,
    fuser: Box<dyn GateFuser>,
}

impl CircuitCompiler {
    /// Compiler for `num_qubits` qubits using [`BasicFuser`].
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            fuser: Box::new(BasicFuser),
        }
    }

    /// Use a different fusion service.
    #[must_use]
    pub fn with_fuser(mut self, fuser: impl GateFuser + 'static) -> Self {
        self.fuser = Box::new(fuser);
        self
    }

    /// Target qubit count.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Name of the configured fuser.
    pub fn fuser_name(&self) -> &str {
        self.fuser.name()
    }

    /// Resolve every operation and fuse the whole sequence as one run.
    #[instrument(skip(self, program, params, values), fields(program = %program.name))]
    pub fn compile(
        &self,
        program: &Program,
        params: &ParameterMap,
        values: &[f32],
    ) -> CompileResult<CompiledCircuit> {
        let mut gates = Vec::with_capacity(program.len());
        for (position, op) in program.operations.iter().enumerate() {
            let args = self.resolve(position, op, params, values)?;
            gates.push(build_gate(op, &args)?);
        }
        let fused = self.fuser.fuse(self.num_qubits, &gates, 0);

        info!(
            "Compiled {} gates into {} fused groups ({} qubits, fuser: {})",
            gates.len(),
            fused.len(),
            self.num_qubits,
            self.fuser.name()
        );

        Ok(CompiledCircuit {
            num_qubits: self.num_qubits,
            gates,
            fused,
        })
    }

    /// Resolve every operation, break fusion at symbolic gates and
    /// synthesize their gradient gates.
    #[instrument(skip(self, program, params, values), fields(program = %program.name))]
    pub fn compile_adjoint(
        &self,
        program: &Program,
        params: &ParameterMap,
        values: &[f32],
    ) -> CompileResult<AdjointCircuit> {
        let mut state = AdjointState::with_capacity(program.len());

        for (position, op) in program.operations.iter().enumerate() {
            let args = self.resolve(position, op, params, values)?;
            let gate = build_gate(op, &args)?;

            if args.iter().any(ResolvedArg::is_symbolic) {
                state.close_run(&*self.fuser, self.num_qubits);
                populate_gradients(position, op.family, &op.qubits, &args, &mut state.gradients);
                state.symbolic.push(position);
                state.gates.push(gate);
                state.run_start = position + 1;
                debug!(position, gate = op.family.name(), "symbolic gate");
            } else {
                state.gates.push(gate);
            }
        }
        state.close_run(&*self.fuser, self.num_qubits);

        info!(
            "Compiled {} gates into {} runs with {} gradient records ({} gradient gates)",
            state.gates.len(),
            state.runs.len(),
            state.gradients.len(),
            state.gradients.num_gradients()
        );

        Ok(AdjointCircuit {
            num_qubits: self.num_qubits,
            gates: state.gates,
            runs: state.runs,
            gradients: state.gradients,
            symbolic: state.symbolic,
        })
    }

    /// Validate one operation and resolve its arguments in canonical order.
    fn resolve(
        &self,
        position: usize,
        op: &Operation,
        params: &ParameterMap,
        values: &[f32],
    ) -> CompileResult<Vec<ResolvedArg>> {
        op.validate()?;
        if let Some(&qubit) = op.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(CompileError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                position,
                gate_name: op.family.name().to_string(),
            });
        }

        op.family
            .arguments()
            .iter()
            .map(|name| match op.arg(name) {
                Some(ParameterBinding::Value(v)) => Ok(ResolvedArg::literal(*v)),
                Some(ParameterBinding::Symbol(symbol)) => {
                    let binding = params.get(symbol).ok_or_else(|| CompileError::UnresolvedSymbol {
                        symbol: symbol.clone(),
                        position,
                        gate_name: op.family.name().to_string(),
                    })?;
                    let raw = values.get(binding.index).copied().ok_or_else(|| {
                        CompileError::ValueIndexOutOfRange {
                            symbol: symbol.clone(),
                            index: binding.index,
                            available: values.len(),
                        }
                    })?;
                    Ok(ResolvedArg::symbolic(symbol.as_str(), raw, binding.scale))
                }
                None => Ok(ResolvedArg::literal(
                    op.family.default_for(name).unwrap_or_default(),
                )),
            })
            .collect()
    }
}

impl Default for CircuitCompiler {
    fn default() -> Self {
        Self::new(0)
    }
}

fn build_gate(op: &Operation, args: &[ResolvedArg]) -> CompileResult<Gate> {
    let values: Vec<f32> = args.iter().map(ResolvedArg::value).collect();
    Ok(Gate::from_family(op.family, &op.qubits, &values)?)
}
