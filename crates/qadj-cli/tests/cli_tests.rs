//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), loading
//! programs and Pauli terms from JSON, and the error paths the commands
//! report.

// The CLI is a binary crate, so we exercise the underlying crates with the
// same calls the commands make and validate clap parsing on mirrored structs.

// ============================================================================
// Program loading and compilation
// ============================================================================

mod program_loading {
    use qadj_compile::{BasicFuser, CircuitCompiler, CompileError, IdentityFuser};
    use qadj_ir::{ParameterMap, Program};

    const PROGRAM: &str = r#"{
        "name": "cli",
        "operations": [
            {"family": "h_pow", "qubits": [0], "args": {"exponent": 1.0}},
            {"family": "cx_pow", "qubits": [0, 1], "args": {"exponent": 1.0}},
            {"family": "zz_pow", "qubits": [0, 1], "args": {"exponent": "gamma"}},
            {"family": "x_pow", "qubits": [1], "args": {"exponent": "beta", "global_shift": -0.5}}
        ]
    }"#;

    /// Equivalent to commands::common::compiler_for
    fn compiler_for(fuser: &str, num_qubits: u32) -> anyhow::Result<CircuitCompiler> {
        let compiler = CircuitCompiler::new(num_qubits);
        match fuser.to_lowercase().as_str() {
            "basic" => Ok(compiler.with_fuser(BasicFuser)),
            "identity" | "none" => Ok(compiler.with_fuser(IdentityFuser)),
            other => anyhow::bail!("Unknown fuser: '{other}'"),
        }
    }

    fn load(path: &std::path::Path) -> Program {
        let source = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&source).unwrap()
    }

    #[test]
    fn test_load_program_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.json");
        std::fs::write(&path, PROGRAM).unwrap();

        let program = load(&path);
        assert_eq!(program.name, "cli");
        assert_eq!(program.len(), 4);
        assert_eq!(program.num_qubits(), 2);
        assert_eq!(program.num_symbolic(), 2);
    }

    #[test]
    fn test_default_params_follow_sorted_symbols() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params = ParameterMap::from_symbols(program.symbols());
        assert_eq!(params.get("beta").unwrap().index, 0);
        assert_eq!(params.get("gamma").unwrap().index, 1);
        assert_eq!(params.required_values(), 2);
    }

    #[test]
    fn test_adjoint_compile_of_loaded_program() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params = ParameterMap::from_symbols(program.symbols());
        let circuit = compiler_for("basic", program.num_qubits())
            .unwrap()
            .compile_adjoint(&program, &params, &[0.1, 0.2])
            .unwrap();
        assert_eq!(circuit.runs.len(), 3);
        assert_eq!(circuit.symbolic_positions(), &[2, 3]);
        circuit.check_alignment().unwrap();

        let json = serde_json::to_string_pretty(&circuit).unwrap();
        assert!(json.contains("\"gradients\""));
    }

    #[test]
    fn test_params_file_with_scale() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params: ParameterMap = serde_json::from_str(
            r#"{"gamma": {"index": 1, "scale": 2.0}, "beta": {"index": 0}}"#,
        )
        .unwrap();
        let circuit = compiler_for("identity", 2)
            .unwrap()
            .compile(&program, &params, &[0.1, 0.2])
            .unwrap();
        assert!((circuit.gates[2].params[0] - 0.4).abs() < 1e-6);
        assert_eq!(circuit.fused.len(), 4);
    }

    #[test]
    fn test_missing_symbol_in_params_file() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params: ParameterMap = serde_json::from_str(r#"{"gamma": {"index": 0}}"#).unwrap();
        let err = compiler_for("basic", 2)
            .unwrap()
            .compile(&program, &params, &[0.1])
            .unwrap_err();
        assert!(matches!(err, CompileError::UnresolvedSymbol { .. }));
    }

    #[test]
    fn test_too_few_qubits() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params = ParameterMap::from_symbols(program.symbols());
        let err = compiler_for("basic", 1)
            .unwrap()
            .compile(&program, &params, &[0.1, 0.2])
            .unwrap_err();
        assert!(matches!(err, CompileError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_shared_params_with_unreferenced_symbols() {
        // A map shared across programs may bind symbols this one never uses.
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params: ParameterMap = serde_json::from_str(
            r#"{"beta": {"index": 0}, "gamma": {"index": 1}, "other": {"index": 7}}"#,
        )
        .unwrap();
        assert_eq!(params.required_values(), 8);

        let circuit = compiler_for("basic", 2)
            .unwrap()
            .compile_adjoint(&program, &params, &[0.1, 0.2])
            .unwrap();
        assert_eq!(circuit.gradients.len(), 2);
    }

    #[test]
    fn test_referenced_value_out_of_range() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params: ParameterMap =
            serde_json::from_str(r#"{"beta": {"index": 5}, "gamma": {"index": 1}}"#).unwrap();
        let err = compiler_for("basic", 2)
            .unwrap()
            .compile_adjoint(&program, &params, &[0.1, 0.2])
            .unwrap_err();
        assert!(matches!(err, CompileError::ValueIndexOutOfRange { index: 5, .. }));
    }

    /// Equivalent to the alignment step of commands::compile::execute
    fn ensure_aligned(circuit: &qadj_compile::AdjointCircuit, name: &str) -> anyhow::Result<()> {
        use anyhow::Context;
        circuit
            .check_alignment()
            .with_context(|| format!("Adjoint compilation of '{name}' is inconsistent"))
    }

    #[test]
    fn test_misalignment_is_an_error() {
        let program: Program = serde_json::from_str(PROGRAM).unwrap();
        let params = ParameterMap::from_symbols(program.symbols());
        let mut circuit = compiler_for("basic", 2)
            .unwrap()
            .compile_adjoint(&program, &params, &[0.1, 0.2])
            .unwrap();
        ensure_aligned(&circuit, "cli").unwrap();

        circuit.runs.pop();
        let err = ensure_aligned(&circuit, "cli").unwrap_err();
        assert!(err.to_string().contains("'cli' is inconsistent"));
        assert!(format!("{err:#}").contains("misaligned"));
    }

    #[test]
    fn test_unknown_fuser() {
        let result = compiler_for("greedy", 2);
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("greedy"));
    }

    #[test]
    fn test_malformed_program_json() {
        let result: Result<Program, _> =
            serde_json::from_str(r#"{"operations": [{"family": "toffoli", "qubits": [0]}]}"#);
        assert!(result.is_err());
    }
}

// ============================================================================
// Pauli term input
// ============================================================================

mod pauli_input {
    use qadj_compile::BasicFuser;
    use qadj_ir::QubitId;
    use qadj_observable::{PauliOp, PauliTerm, z_basis_circuit};

    #[test]
    fn test_inline_term() {
        let term: PauliTerm =
            serde_json::from_str(r#"{"coefficient": 0.5, "paulis": [[0, "X"], [1, "Z"]]}"#)
                .unwrap();
        assert_eq!(term.paulis, vec![(QubitId(0), PauliOp::X), (QubitId(1), PauliOp::Z)]);
        assert_eq!(term.max_qubit(), Some(QubitId(1)));

        let circuit = z_basis_circuit(&term, 2, BasicFuser).unwrap();
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_term_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("term.json");
        std::fs::write(&path, r#"{"paulis": [[2, "Y"]]}"#).unwrap();

        let source = std::fs::read_to_string(&path).unwrap();
        let term: PauliTerm = serde_json::from_str(&source).unwrap();
        assert_eq!(term.coefficient, 1.0);
        assert_eq!(term.to_string(), "1*Y(q2)");
    }

    #[test]
    fn test_unknown_pauli_rejected() {
        let result: Result<PauliTerm, _> = serde_json::from_str(r#"{"paulis": [[0, "W"]]}"#);
        assert!(result.is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qadj")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Compile {
            #[arg(short, long)]
            program: String,
            #[arg(long)]
            params: Option<String>,
            #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
            values: Vec<f32>,
            #[arg(short, long)]
            qubits: Option<u32>,
            #[arg(long)]
            adjoint: bool,
            #[arg(long, default_value = "basic")]
            fuser: String,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(short, long)]
            output: Option<String>,
        },
        Pauli {
            #[arg(short, long)]
            term: String,
            #[arg(short, long)]
            qubits: Option<u32>,
            #[arg(long)]
            z_basis: bool,
            #[arg(long, default_value = "basic")]
            fuser: String,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
        Version,
    }

    #[test]
    fn test_parse_compile_minimal() {
        let cli = TestCli::try_parse_from(["qadj", "compile", "-p", "a.json"]).unwrap();
        match cli.command {
            TestCommands::Compile {
                program,
                params,
                values,
                qubits,
                adjoint,
                fuser,
                format,
                output,
            } => {
                assert_eq!(program, "a.json");
                assert!(params.is_none());
                assert!(values.is_empty());
                assert!(qubits.is_none());
                assert!(!adjoint);
                assert_eq!(fuser, "basic");
                assert_eq!(format, "table");
                assert!(output.is_none());
            }
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn test_parse_compile_adjoint_with_negative_values() {
        let cli = TestCli::try_parse_from([
            "qadj",
            "-vv",
            "compile",
            "--program",
            "a.json",
            "--values",
            "-0.5,0.25,1",
            "--adjoint",
            "-q",
            "4",
            "--fuser",
            "identity",
            "-f",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            TestCommands::Compile {
                values,
                qubits,
                adjoint,
                fuser,
                format,
                ..
            } => {
                assert_eq!(values, vec![-0.5, 0.25, 1.0]);
                assert_eq!(qubits, Some(4));
                assert!(adjoint);
                assert_eq!(fuser, "identity");
                assert_eq!(format, "json");
            }
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn test_parse_compile_missing_program() {
        assert!(TestCli::try_parse_from(["qadj", "compile"]).is_err());
    }

    #[test]
    fn test_parse_compile_bad_value() {
        assert!(
            TestCli::try_parse_from(["qadj", "compile", "-p", "a.json", "--values", "0.1,x"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_pauli() {
        let cli =
            TestCli::try_parse_from(["qadj", "pauli", "-t", "term.json", "--z-basis", "-q", "3"])
                .unwrap();
        match cli.command {
            TestCommands::Pauli {
                term,
                qubits,
                z_basis,
                ..
            } => {
                assert_eq!(term, "term.json");
                assert_eq!(qubits, Some(3));
                assert!(z_basis);
            }
            _ => panic!("expected pauli"),
        }
    }

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["qadj", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = TestCli::try_parse_from(["qadj", "version", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }
}
