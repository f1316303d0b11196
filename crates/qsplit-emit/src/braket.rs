//! Amazon Braket emitter.

use std::f64::consts::PI;

use qsplit_ir::{Instruction, LoweredProgram, OpCode};

use crate::angle::format_angle;
use crate::dialect::Dialect;
use crate::error::{EmitError, EmitResult};

/// Emit a program as a Python script building a Braket `Circuit` named
/// `circuit`.
///
/// Controlled S and T turns are written as `cphaseshift`. Braket has no
/// controlled Hadamard, controlled square root of X or controlled
/// rotations, so `ch`, `csx`, `crx`, `cry` and `crz` are rejected.
pub fn emit_braket(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = BraketEmitter::new();
    emitter.emit_program(program)
}

/// Braket emitter.
struct BraketEmitter {
    output: String,
}

impl BraketEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("from braket.circuits import Circuit");
        self.writeln("import numpy as np");
        self.writeln("");
        self.writeln("circuit = Circuit()");

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let (method, angle) = match instruction.op {
            OpCode::X => ("x", None),
            OpCode::Y => ("y", None),
            OpCode::Z => ("z", None),
            OpCode::H => ("h", None),
            OpCode::S => ("s", None),
            OpCode::Sdg => ("si", None),
            OpCode::T => ("t", None),
            OpCode::Tdg => ("ti", None),
            OpCode::Sx => ("v", None),
            OpCode::Sxdg => ("vi", None),
            OpCode::Rx => ("rx", instruction.params.first().copied()),
            OpCode::Ry => ("ry", instruction.params.first().copied()),
            OpCode::Rz => ("rz", instruction.params.first().copied()),
            OpCode::Phase => ("phaseshift", instruction.params.first().copied()),
            OpCode::Cx => ("cnot", None),
            OpCode::Cy => ("cy", None),
            OpCode::Cz => ("cz", None),
            OpCode::Cs => ("cphaseshift", Some(PI / 2.0)),
            OpCode::Csdg => ("cphaseshift", Some(-PI / 2.0)),
            OpCode::Ct => ("cphaseshift", Some(PI / 4.0)),
            OpCode::Ctdg => ("cphaseshift", Some(-PI / 4.0)),
            OpCode::Cphase => ("cphaseshift", instruction.params.first().copied()),
            OpCode::Ccx => ("ccnot", None),
            OpCode::Swap => ("swap", None),
            OpCode::Cswap => ("cswap", None),
            op @ (OpCode::Ch | OpCode::Csx | OpCode::Crx | OpCode::Cry | OpCode::Crz) => {
                return Err(EmitError::UnsupportedOperation {
                    dialect: Dialect::Braket,
                    op: op.name().to_string(),
                });
            }
        };

        if let Some(label) = &instruction.label {
            self.writeln(&format!("# {label}"));
        }

        // Braket takes the qubits first and the angle last.
        let mut args: Vec<String> = instruction.wires.iter().map(|w| w.0.to_string()).collect();
        args.extend(angle.map(|a| format_angle(a, "np.pi")));
        self.writeln(&format!("circuit.{method}({})", args.join(", ")));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
