//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use qadj_compile::{BasicFuser, CircuitCompiler, IdentityFuser};
use qadj_ir::{ParameterMap, Program};
use serde::de::DeserializeOwned;

/// Available fusion services, by CLI name.
pub const FUSERS: &[&str] = &["basic", "identity"];

/// Load and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&source).with_context(|| format!("Failed to parse JSON in {path}"))
}

/// Parse `arg` as inline JSON if it looks like an object or array, else load it as a file.
pub fn load_json_arg<T: DeserializeOwned>(arg: &str) -> Result<T> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(trimmed).context("Failed to parse inline JSON")
    } else {
        load_json(arg)
    }
}

/// Load a program file.
pub fn load_program(path: &str) -> Result<Program> {
    let program: Program = load_json(path)?;
    if program.operations.is_empty() {
        tracing::warn!("program '{}' has no operations", program.name);
    }
    Ok(program)
}

/// Load a parameter map, or bind the program's symbols in sorted order.
pub fn load_params(path: Option<&str>, program: &Program) -> Result<ParameterMap> {
    match path {
        Some(path) => load_json(path),
        None => Ok(ParameterMap::from_symbols(program.symbols())),
    }
}

/// Build a compiler with the named fuser.
pub fn compiler_for(fuser: &str, num_qubits: u32) -> Result<CircuitCompiler> {
    let compiler = CircuitCompiler::new(num_qubits);
    match fuser.to_lowercase().as_str() {
        "basic" => Ok(compiler.with_fuser(BasicFuser)),
        "identity" | "none" => Ok(compiler.with_fuser(IdentityFuser)),
        other => anyhow::bail!("Unknown fuser: '{other}'. Available: {}", FUSERS.join(", ")),
    }
}

/// Fail early on an output format the commands cannot print.
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "table" | "json" => Ok(()),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
}
