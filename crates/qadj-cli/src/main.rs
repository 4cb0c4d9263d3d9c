//! qadj command-line interface
//!
//! Compiles JSON programs into fused gate runs, in forward mode or in
//! adjoint mode with finite-difference gradient gates, and converts Pauli
//! terms into their measurement circuits.
//!
//! ```text
//! qadj compile --program ansatz.json --values 0.1,0.2 --adjoint
//! qadj pauli --term '{"coefficient": 0.5, "paulis": [[0, "X"], [1, "Z"]]}' --z-basis
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compile, pauli, version};

/// qadj - gradient-aware quantum circuit compilation
#[derive(Parser)]
#[command(name = "qadj")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON program in forward or adjoint mode
    Compile {
        /// Program file (JSON)
        #[arg(short, long)]
        program: String,

        /// Parameter map file (JSON); defaults to the program's symbols in sorted order
        #[arg(long)]
        params: Option<String>,

        /// Raw parameter values, comma-separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Vec<f32>,

        /// Number of qubits (defaults to the highest qubit used plus one)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Split fusion at symbolic gates and synthesize gradient gates
        #[arg(long)]
        adjoint: bool,

        /// Fusion service (basic, identity)
        #[arg(long, env = "QADJ_FUSER", default_value = "basic")]
        fuser: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the compiled circuit as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert a Pauli term into its circuit or its Z-basis rotation
    Pauli {
        /// Pauli term as inline JSON or a JSON file
        #[arg(short, long)]
        term: String,

        /// Number of qubits (defaults to the highest qubit used plus one)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Emit the basis change onto Z instead of the Pauli gates
        #[arg(long)]
        z_basis: bool,

        /// Fusion service (basic, identity)
        #[arg(long, env = "QADJ_FUSER", default_value = "basic")]
        fuser: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compile {
            program,
            params,
            values,
            qubits,
            adjoint,
            fuser,
            format,
            output,
        } => compile::execute(
            &program,
            params.as_deref(),
            &values,
            qubits,
            adjoint,
            &fuser,
            &format,
            output.as_deref(),
        ),

        Commands::Pauli {
            term,
            qubits,
            z_basis,
            fuser,
            format,
        } => pauli::execute(&term, qubits, z_basis, &fuser, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
