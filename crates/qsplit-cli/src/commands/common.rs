//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use qsplit_emit::Dialect;
use qsplit_ir::{CircuitDocument, json};

/// Load and validate a circuit document from a JSON file.
pub fn load_document(path: &str) -> Result<CircuitDocument> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let doc = json::from_json(&source).with_context(|| format!("Invalid document: {path}"))?;
    doc.validate()
        .with_context(|| format!("Invalid document: {path}"))?;
    debug!(
        "Loaded {path}: {} wires, {} gates",
        doc.num_wires(),
        doc.num_gates()
    );
    Ok(doc)
}

/// Parse a dialect name, listing the supported ones on failure.
pub fn parse_dialect(name: &str) -> Result<Dialect> {
    name.parse::<Dialect>().with_context(|| {
        let names: Vec<&str> = Dialect::ALL.iter().map(|d| d.name()).collect();
        format!("Available dialects: {}", names.join(", "))
    })
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
