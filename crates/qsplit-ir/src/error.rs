//! Error types for the document model.

use thiserror::Error;

/// Errors that can occur while building or reading circuit documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate or wire reference lies outside the document.
    #[error("Wire {wire} out of range for a document with {num_wires} wires")]
    WireOutOfRange {
        /// The offending wire index.
        wire: usize,
        /// Number of wires in the document.
        num_wires: usize,
    },

    /// A column does not have one slot per wire.
    #[error("Column {column} has {got} slots, expected {expected}")]
    ColumnLengthMismatch {
        /// Index of the column.
        column: usize,
        /// Expected slot count (the document's wire count).
        expected: usize,
        /// Actual slot count.
        got: usize,
    },

    /// Two gates in the same column claim the same row.
    #[error("Gate '{gate}' overlaps another gate at column {column}, row {row}")]
    OverlappingGate {
        /// Identifier of the gate being placed.
        gate: String,
        /// Column of the conflict.
        column: usize,
        /// Row of the conflict.
        row: usize,
    },

    /// A cell names a gate id that is neither built in nor defined.
    #[error("Unknown gate id '{0}'")]
    UnknownGate(String),

    /// A custom matrix has the wrong shape or is not unitary.
    #[error("Invalid matrix for gate '{gate}': {reason}")]
    InvalidMatrix {
        /// Identifier of the gate.
        gate: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A structurally invalid gate or document definition.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type IrResult<T> = Result<T, IrError>;
