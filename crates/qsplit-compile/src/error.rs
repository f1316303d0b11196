//! Error types for the compilation stages.

use qsplit_ir::IrError;
use thiserror::Error;

/// Errors that can occur during lowering or distribution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A payload cell has no way to be exported.
    #[error("Unsupported gate '{gate}' at column {column}, wire {wire}")]
    UnsupportedGate {
        /// Title (or id) of the gate.
        gate: String,
        /// Input column of the cell.
        column: usize,
        /// Wire of the cell, offset into the top-level document.
        wire: usize,
    },

    /// The column's structure has no lowering in the fixed vocabulary.
    #[error("Unimplemented circuit at column {column}: {reason}")]
    UnimplementedCircuit {
        /// Input column.
        column: usize,
        /// What is not supported.
        reason: String,
    },

    /// Document model error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// The rewrite pass ran without a partition map.
    #[error("Missing partition map in property set")]
    MissingPartitionMap,

    /// A verification pass rejected the document.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Name of the pass.
        name: String,
        /// Failure description.
        reason: String,
    },

    /// Invalid pass manager configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
