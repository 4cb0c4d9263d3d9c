//! Pauli command implementation.

use anyhow::{Context, Result};
use console::style;

use qadj_compile::{BasicFuser, CompiledCircuit, IdentityFuser};
use qadj_observable::{PauliTerm, pauli_term_circuit, z_basis_circuit};

use super::common::{FUSERS, check_format, load_json_arg};

/// Execute the pauli command.
pub fn execute(term: &str, qubits: Option<u32>, z_basis: bool, fuser: &str, format: &str) -> Result<()> {
    check_format(format)?;
    let term: PauliTerm = load_json_arg(term)?;
    let num_qubits = qubits.unwrap_or_else(|| term.max_qubit().map_or(0, |q| q.0 + 1));

    let circuit = convert(&term, num_qubits, z_basis, fuser)
        .with_context(|| format!("Failed to convert Pauli term {term}"))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&circuit)?),
        _ => {
            println!(
                "{} {} circuit for {} on {} qubits",
                style("✓").green().bold(),
                if z_basis { "Z-basis" } else { "Pauli" },
                style(&term).green(),
                num_qubits
            );
            println!(
                "  Result: {} gates in {} fused groups",
                circuit.num_gates(),
                circuit.fused.len()
            );
            for (i, gate) in circuit.gates.iter().enumerate() {
                println!(
                    "  [{i:>3}] {:<10} {} params {:?}",
                    gate.name(),
                    gate.qubits[0],
                    gate.params
                );
            }
        }
    }

    Ok(())
}

/// Convert with the named fuser.
pub fn convert(term: &PauliTerm, num_qubits: u32, z_basis: bool, fuser: &str) -> Result<CompiledCircuit> {
    let circuit = match (fuser.to_lowercase().as_str(), z_basis) {
        ("basic", false) => pauli_term_circuit(term, num_qubits, BasicFuser)?,
        ("basic", true) => z_basis_circuit(term, num_qubits, BasicFuser)?,
        ("identity" | "none", false) => pauli_term_circuit(term, num_qubits, IdentityFuser)?,
        ("identity" | "none", true) => z_basis_circuit(term, num_qubits, IdentityFuser)?,
        (other, _) => anyhow::bail!("Unknown fuser: '{other}'. Available: {}", FUSERS.join(", ")),
    };
    Ok(circuit)
}
