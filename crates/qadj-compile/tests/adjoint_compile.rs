//! End-to-end tests for forward and adjoint compilation.

use qadj_compile::{CircuitCompiler, CompileError, GRAD_EPS, IdentityFuser, matrix_diff};
use qadj_ir::{Gate, ParameterMap, Program, QubitId, SymbolBinding};

fn q(i: u32) -> QubitId {
    QubitId(i)
}

/// A small hardware-efficient style ansatz with one symbol per layer.
fn ansatz() -> (Program, ParameterMap) {
    let mut program = Program::new("ansatz");
    program
        .h_pow(q(0), 1.0)
        .unwrap()
        .h_pow(q(1), 1.0)
        .unwrap()
        .h_pow(q(2), 1.0)
        .unwrap()
        .zz_pow(q(0), q(1), "gamma")
        .unwrap()
        .zz_pow(q(1), q(2), "gamma")
        .unwrap()
        .x_pow(q(0), "beta")
        .unwrap()
        .x_pow(q(1), "beta")
        .unwrap()
        .x_pow(q(2), "beta")
        .unwrap()
        .cz_pow(q(0), q(2), 1.0)
        .unwrap()
        .phased_i_swap_pow(q(1), q(2), 0.25, "delta")
        .unwrap();
    (program, ParameterMap::from_symbols(["gamma", "beta", "delta"]))
}

// ---------------------------------------------------------------------------
// Empty and error scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_empty_circuit_compiles() {
    let program = Program::new("empty");
    let compiler = CircuitCompiler::new(3);

    let forward = compiler.compile(&program, &ParameterMap::new(), &[]).unwrap();
    assert!(forward.gates.is_empty());
    assert!(forward.fused.is_empty());

    let adjoint = compiler
        .compile_adjoint(&program, &ParameterMap::new(), &[])
        .unwrap();
    assert!(adjoint.gates.is_empty());
    assert!(adjoint.gradients.is_empty());
    assert_eq!(adjoint.runs.len(), 1);
    assert!(adjoint.runs[0].is_empty());
    adjoint.check_alignment().unwrap();
}

#[test]
fn test_unresolved_symbol_fails_without_output() {
    let (program, _) = ansatz();
    let params = ParameterMap::from_symbols(["gamma", "beta"]);
    let compiler = CircuitCompiler::new(3);

    let err = compiler
        .compile_adjoint(&program, &params, &[0.1, 0.2])
        .unwrap_err();
    match err {
        CompileError::UnresolvedSymbol {
            symbol, position, ..
        } => {
            assert_eq!(symbol, "delta");
            assert_eq!(position, 9);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        compiler.compile(&program, &params, &[0.1, 0.2]),
        Err(CompileError::UnresolvedSymbol { .. })
    ));
}

// ---------------------------------------------------------------------------
// Adjoint structure
// ---------------------------------------------------------------------------

#[test]
fn test_ansatz_runs_and_records() {
    let (program, params) = ansatz();
    let adjoint = CircuitCompiler::new(3)
        .compile_adjoint(&program, &params, &[0.3, 0.4, 0.5])
        .unwrap();

    assert_eq!(adjoint.num_gates(), 10);
    assert_eq!(adjoint.symbolic_positions(), &[3, 4, 5, 6, 7, 9]);
    assert_eq!(adjoint.runs.len(), 7);

    let spans: Vec<(usize, usize)> = adjoint.runs.iter().map(|r| (r.start, r.end)).collect();
    assert_eq!(
        spans,
        vec![(0, 3), (4, 4), (5, 5), (6, 6), (7, 7), (8, 9), (10, 10)]
    );

    let params: Vec<Vec<String>> = adjoint.gradients.iter().map(|r| r.params.clone()).collect();
    assert_eq!(
        params,
        vec![
            vec!["gamma"],
            vec!["gamma"],
            vec!["beta"],
            vec!["beta"],
            vec!["beta"],
            vec!["delta"],
        ]
    );
    adjoint.check_alignment().unwrap();
}

#[test]
fn test_fuser_choice_does_not_change_boundaries() {
    let (program, params) = ansatz();
    let values = [0.3, 0.4, 0.5];
    let basic = CircuitCompiler::new(3)
        .compile_adjoint(&program, &params, &values)
        .unwrap();
    let identity = CircuitCompiler::new(3)
        .with_fuser(IdentityFuser)
        .compile_adjoint(&program, &params, &values)
        .unwrap();

    assert_eq!(basic.gates, identity.gates);
    assert_eq!(basic.gradients, identity.gradients);
    for (a, b) in basic.runs.iter().zip(&identity.runs) {
        assert_eq!((a.start, a.end), (b.start, b.end));
    }
    assert_eq!(identity.runs[0].fused.len(), 3);
    assert_eq!(basic.runs[0].fused.len(), 3);
    identity.check_alignment().unwrap();
}

// ---------------------------------------------------------------------------
// Gradient values
// ---------------------------------------------------------------------------

#[test]
fn test_gradient_matches_recompiled_difference() {
    // The gradient gate equals the difference of two forward compilations
    // with the raw value shifted by ±ε.
    let mut program = Program::new("one");
    program.fsim(q(0), q(1), "theta", 0.7).unwrap();
    let mut params = ParameterMap::new();
    params.insert("theta", SymbolBinding::new(0).with_scale(1.5));

    let compiler = CircuitCompiler::new(2);
    let raw = 0.4;
    let adjoint = compiler.compile_adjoint(&program, &params, &[raw]).unwrap();
    let plus = compiler
        .compile(&program, &params, &[raw + GRAD_EPS])
        .unwrap();
    let minus = compiler
        .compile(&program, &params, &[raw - GRAD_EPS])
        .unwrap();

    let mut expected = minus.gates[0].matrix;
    matrix_diff(&plus.gates[0].matrix, &mut expected);
    expected.scale(0.5 / GRAD_EPS);

    let grad = &adjoint.gradients.as_slice()[0].grad_gates[0];
    assert!(grad.matrix.max_abs_diff(&expected) < 1e-5);
}

#[test]
fn test_gradient_of_z_pow_is_analytic() {
    // d/dt diag(1, e^{iπt}) = diag(0, iπ e^{iπt}).
    let mut program = Program::new("z");
    program.z_pow(q(0), "t").unwrap();
    let params = ParameterMap::from_symbols(["t"]);
    let t = 0.3_f32;
    let adjoint = CircuitCompiler::new(1)
        .compile_adjoint(&program, &params, &[t])
        .unwrap();

    let grad = &adjoint.gradients.as_slice()[0].grad_gates[0];
    let pi = std::f32::consts::PI;
    let (s, c) = (pi * t).sin_cos();
    let d11 = grad.matrix.entry(1, 1);
    assert!(grad.matrix.entry(0, 0).norm() < 1e-3);
    assert!((d11.re - (-pi * s)).abs() < 1e-3);
    assert!((d11.im - pi * c).abs() < 1e-3);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_shared_map_across_threads() {
    let (program, params) = ansatz();
    let compiler = CircuitCompiler::new(3);
    let samples: Vec<[f32; 3]> = (0..8).map(|i| [0.1 * i as f32, 0.2, -0.3]).collect();

    let results: Vec<Vec<Gate>> = std::thread::scope(|scope| {
        let handles: Vec<_> = samples
            .iter()
            .map(|values| {
                let (compiler, program, params) = (&compiler, &program, &params);
                scope.spawn(move || {
                    compiler
                        .compile_adjoint(program, params, values)
                        .unwrap()
                        .gates
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (values, gates) in samples.iter().zip(&results) {
        let expected = compiler.compile(&program, &params, values).unwrap().gates;
        assert_eq!(gates, &expected);
    }
}
