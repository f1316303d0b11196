//! Supported output dialects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use qsplit_ir::OpCode;

use crate::error::EmitError;

/// A target text or JSON format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// OpenQASM 2.0 with `qelib1.inc`.
    Qasm2,
    /// OpenQASM 3 with `stdgates.inc`.
    Qasm3,
    /// A Python script building a Qiskit `QuantumCircuit`.
    Qiskit,
    /// Quil.
    Quil,
    /// A Python script building a pyQuil `Program`.
    PyQuil,
    /// A Python script building a Cirq `Circuit`.
    Cirq,
    /// A Cirq circuit converted to a TensorFlow Quantum tensor.
    Tfq,
    /// A QuEST C program.
    Quest,
    /// A Q# operation.
    QSharp,
    /// A Python script building an Amazon Braket `Circuit`.
    Braket,
    /// A Qobj experiment as JSON.
    Qobj,
}

impl Dialect {
    /// Every dialect.
    pub const ALL: [Dialect; 11] = [
        Dialect::Qasm2,
        Dialect::Qasm3,
        Dialect::Qiskit,
        Dialect::Quil,
        Dialect::PyQuil,
        Dialect::Cirq,
        Dialect::Tfq,
        Dialect::Quest,
        Dialect::QSharp,
        Dialect::Braket,
        Dialect::Qobj,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Qasm2 => "qasm2",
            Dialect::Qasm3 => "qasm3",
            Dialect::Qiskit => "qiskit",
            Dialect::Quil => "quil",
            Dialect::PyQuil => "pyquil",
            Dialect::Cirq => "cirq",
            Dialect::Tfq => "tfq",
            Dialect::Quest => "quest",
            Dialect::QSharp => "qsharp",
            Dialect::Braket => "braket",
            Dialect::Qobj => "qobj",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Qasm2 | Dialect::Qasm3 => "qasm",
            Dialect::Qiskit
            | Dialect::PyQuil
            | Dialect::Cirq
            | Dialect::Tfq
            | Dialect::Braket => "py",
            Dialect::Quil => "quil",
            Dialect::Quest => "c",
            Dialect::QSharp => "qs",
            Dialect::Qobj => "json",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Dialect::Qasm2 => "OpenQASM 2.0 (qelib1.inc)",
            Dialect::Qasm3 => "OpenQASM 3 (stdgates.inc)",
            Dialect::Qiskit => "Qiskit Python script",
            Dialect::Quil => "Quil program",
            Dialect::PyQuil => "pyQuil Python script",
            Dialect::Cirq => "Cirq Python script",
            Dialect::Tfq => "TensorFlow Quantum Python script",
            Dialect::Quest => "QuEST C program",
            Dialect::QSharp => "Q# operation",
            Dialect::Braket => "Amazon Braket Python script",
            Dialect::Qobj => "Qobj experiment (JSON)",
        }
    }

    /// Whether the dialect can express `op`. Emitting a program containing
    /// an operation this rejects fails with
    /// [`EmitError::UnsupportedOperation`].
    pub fn supports(self, op: OpCode) -> bool {
        match self {
            Dialect::Quil | Dialect::PyQuil | Dialect::QSharp => {
                !matches!(op, OpCode::Sx | OpCode::Sxdg | OpCode::Csx)
            }
            Dialect::Quest => !matches!(
                op,
                OpCode::Sx | OpCode::Sxdg | OpCode::Csx | OpCode::Ch | OpCode::Cswap
            ),
            Dialect::Braket => !matches!(
                op,
                OpCode::Ch | OpCode::Csx | OpCode::Crx | OpCode::Cry | OpCode::Crz
            ),
            Dialect::Qasm2
            | Dialect::Qasm3
            | Dialect::Qiskit
            | Dialect::Cirq
            | Dialect::Tfq
            | Dialect::Qobj => true,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qasm2" | "qasm" | "qasm2.0" | "openqasm2" => Ok(Dialect::Qasm2),
            "qasm3" | "openqasm3" => Ok(Dialect::Qasm3),
            "qiskit" => Ok(Dialect::Qiskit),
            "quil" => Ok(Dialect::Quil),
            "pyquil" => Ok(Dialect::PyQuil),
            "cirq" => Ok(Dialect::Cirq),
            "tfq" | "tensorflow-quantum" => Ok(Dialect::Tfq),
            "quest" => Ok(Dialect::Quest),
            "qsharp" | "q#" => Ok(Dialect::QSharp),
            "braket" => Ok(Dialect::Braket),
            "qobj" => Ok(Dialect::Qobj),
            _ => Err(EmitError::UnknownDialect(s.to_string())),
        }
    }
}
