//! qsplit Circuit Document Model
//!
//! This crate provides the data structures shared by every qsplit stage: the
//! column-based circuit document, the gate catalog, unitary matrices and the
//! flat instruction stream produced by lowering.
//!
//! # Overview
//!
//! A [`CircuitDocument`] is a grid. Each [`Column`] holds one slot per wire and
//! each slot is either empty or the top cell of a [`Gate`]. A gate of height
//! `h` placed at row `r` occupies rows `r..r + h`. Controls, anti-controls and
//! swap halves are ordinary cells whose [`GateRole`] gives them meaning for the
//! rest of their column.
//!
//! Documents are value snapshots. Later stages never mutate a document they
//! were handed; they build a new one.
//!
//! # Example: a controlled NOT across three wires
//!
//! ```rust
//! use qsplit_ir::{catalog, CircuitDocument};
//!
//! let mut doc = CircuitDocument::new(3);
//! doc.place(0, 0, catalog::control()).unwrap();
//! doc.place(0, 2, catalog::x()).unwrap();
//!
//! assert_eq!(doc.num_columns(), 1);
//! assert_eq!(doc.placements().count(), 2);
//! ```
//!
//! # Document format
//!
//! [`json`] reads and writes the editor's JSON layout:
//!
//! ```rust
//! use qsplit_ir::json;
//!
//! let doc = json::from_json(r#"{"cols":[["•",1,"X"]]}"#).unwrap();
//! assert_eq!(doc.num_wires(), 3);
//! ```

pub mod catalog;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod json;
pub mod matrix;
pub mod wire;

pub use circuit::{CircuitDocument, Column, Placement};
pub use error::{IrError, IrResult};
pub use gate::{ExportOptions, Gate, GateRole, NonLocalGate, OpCode, PauliAxis, TwoQubitKind};
pub use instruction::{Instruction, LoweredProgram};
pub use wire::WireId;
