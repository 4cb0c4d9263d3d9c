//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use tracing::debug;

use qadj_compile::{AdjointCircuit, CompiledCircuit};

use super::common::{check_format, compiler_for, load_params, load_program};

/// Execute the compile command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    program_path: &str,
    params_path: Option<&str>,
    values: &[f32],
    qubits: Option<u32>,
    adjoint: bool,
    fuser: &str,
    format: &str,
    output: Option<&str>,
) -> Result<()> {
    check_format(format)?;
    let program = load_program(program_path)?;
    let params = load_params(params_path, &program)?;
    let num_qubits = qubits.unwrap_or_else(|| program.num_qubits());
    let compiler = compiler_for(fuser, num_qubits)?;

    if format == "table" {
        println!(
            "{} Compiling {} ({} ops, {} qubits, {} mode, fuser {})",
            style("→").cyan().bold(),
            style(&program.name).green(),
            program.len(),
            num_qubits,
            style(if adjoint { "adjoint" } else { "forward" }).yellow(),
            compiler.fuser_name()
        );
    }

    let json = if adjoint {
        let circuit = compiler
            .compile_adjoint(&program, &params, values)
            .with_context(|| format!("Failed to compile '{}'", program.name))?;
        circuit
            .check_alignment()
            .with_context(|| format!("Adjoint compilation of '{}' is inconsistent", program.name))?;
        debug!(runs = circuit.runs.len(), "adjoint circuit aligned");
        if format == "table" {
            print_adjoint(&circuit);
        }
        serde_json::to_string_pretty(&circuit)?
    } else {
        let circuit = compiler
            .compile(&program, &params, values)
            .with_context(|| format!("Failed to compile '{}'", program.name))?;
        if format == "table" {
            print_forward(&circuit);
        }
        serde_json::to_string_pretty(&circuit)?
    };

    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write file: {path}"))?;
            if format == "table" {
                println!("  Output: {}", style(path).green());
            }
        }
        None if format == "json" => println!("{json}"),
        None => {}
    }

    Ok(())
}

fn print_forward(circuit: &CompiledCircuit) {
    println!("{} Compilation complete", style("✓").green().bold());
    println!(
        "  Result: {} gates in {} fused groups",
        circuit.num_gates(),
        circuit.fused.len()
    );
    for (i, group) in circuit.fused.iter().enumerate() {
        println!("  [{i:>3}] qubits {:?} positions {:?}", group.qubits, group.positions);
    }
}

fn print_adjoint(circuit: &AdjointCircuit) {
    println!("{} Compilation complete", style("✓").green().bold());
    println!(
        "  Result: {} gates, {} runs, {} symbolic gates, {} gradient gates",
        circuit.num_gates(),
        circuit.runs.len(),
        circuit.symbolic_positions().len(),
        circuit.gradients.num_gradients()
    );

    println!();
    println!("  {:<6} {:<12} {:<8}", "Run", "Span", "Groups");
    println!("  {}", "-".repeat(28));
    for (k, run) in circuit.runs.iter().enumerate() {
        println!(
            "  {:<6} {:<12} {:<8}",
            k,
            format!("{}..{}", run.start, run.end),
            run.fused.len()
        );
    }

    if circuit.gradients.is_empty() {
        return;
    }
    println!();
    println!("  {:<6} {:<20} {}", "Gate", "Family", "Symbols");
    println!("  {}", "-".repeat(40));
    for record in &circuit.gradients {
        let family = circuit.gates[record.index].name();
        println!(
            "  {:<6} {:<20} {}",
            record.index,
            style(family).cyan(),
            record.params.join(", ")
        );
    }
}
