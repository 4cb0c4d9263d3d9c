//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - gradient-aware quantum circuit compilation",
        style("qadj").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qadj-ir          Gate families, parameters and programs");
    println!("  qadj-compile     Forward and adjoint compilation, gate gradients");
    println!("  qadj-observable  Pauli terms and measurement circuits");
    println!("  qadj-cli         Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
