//! qsplit Dialect Emitters
//!
//! Renders a [`LoweredProgram`] as text in one of a fixed set of
//! [`Dialect`]s. Every emitter is a pure function of the program; a dialect
//! that cannot express an operation (see [`Dialect::supports`]) fails with
//! [`EmitError::UnsupportedOperation`].
//!
//! Instruction labels (such as the titles of non-local placeholders) are
//! carried as comments where the dialect has them.
//!
//! # Example
//!
//! ```rust
//! use qsplit_emit::{emit, Dialect};
//! use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};
//!
//! let mut program = LoweredProgram::new(2);
//! program.push(Instruction::new(OpCode::H, 0, [WireId(0)]));
//! program.push(Instruction::new(OpCode::Cx, 1, [WireId(0), WireId(1)]));
//!
//! let qasm = emit(&program, Dialect::Qasm2).unwrap();
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```

mod angle;
pub mod braket;
pub mod dialect;
pub mod error;
pub mod python;
pub mod qasm;
pub mod qobj;
pub mod qsharp;
pub mod quest;
pub mod quil;

use tracing::{debug, instrument};

use qsplit_ir::LoweredProgram;

pub use dialect::Dialect;
pub use error::{EmitError, EmitResult};

/// Render `program` in `dialect`.
#[instrument(skip(program), fields(instructions = program.len()))]
pub fn emit(program: &LoweredProgram, dialect: Dialect) -> EmitResult<String> {
    let text = match dialect {
        Dialect::Qasm2 => qasm::emit_qasm2(program)?,
        Dialect::Qasm3 => qasm::emit_qasm3(program)?,
        Dialect::Qiskit => python::emit_qiskit(program)?,
        Dialect::Quil => quil::emit_quil(program)?,
        Dialect::PyQuil => quil::emit_pyquil(program)?,
        Dialect::Cirq => python::emit_cirq(program)?,
        Dialect::Tfq => python::emit_tfq(program)?,
        Dialect::Quest => quest::emit_quest(program)?,
        Dialect::QSharp => qsharp::emit_qsharp(program)?,
        Dialect::Braket => braket::emit_braket(program)?,
        Dialect::Qobj => qobj::emit_qobj(program)?,
    };
    debug!("Emitted {} bytes of {dialect}", text.len());
    Ok(text)
}
