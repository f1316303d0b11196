//! Quil and pyQuil emitters.
//!
//! Both share one decomposition of each operation into a Quil gate name
//! plus `DAGGER` and `CONTROLLED` modifiers. Quil's standard gate set has
//! no square root of X, so `sx`, `sxdg` and `csx` are rejected by both.

use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};

use crate::angle::{format_angle, format_angles};
use crate::dialect::Dialect;
use crate::error::{EmitError, EmitResult};

/// Emit a program as Quil.
pub fn emit_quil(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = QuilEmitter::new();
    emitter.emit_program(program)
}

/// Emit a program as a Python script building a pyQuil `Program` named
/// `p`.
pub fn emit_pyquil(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = PyQuilEmitter::new();
    emitter.emit_program(program)
}

/// A standard Quil gate with its modifiers.
#[derive(Debug, Clone, Copy)]
struct QuilGate {
    name: &'static str,
    dagger: bool,
    /// The first wire is a control added by `CONTROLLED`.
    controlled: bool,
}

impl QuilGate {
    const fn plain(name: &'static str) -> Self {
        Self {
            name,
            dagger: false,
            controlled: false,
        }
    }

    const fn dagger(self) -> Self {
        Self {
            dagger: true,
            ..self
        }
    }

    const fn controlled(self) -> Self {
        Self {
            controlled: true,
            ..self
        }
    }
}

fn quil_gate(dialect: Dialect, op: OpCode) -> EmitResult<QuilGate> {
    let gate = match op {
        OpCode::X => QuilGate::plain("X"),
        OpCode::Y => QuilGate::plain("Y"),
        OpCode::Z => QuilGate::plain("Z"),
        OpCode::H => QuilGate::plain("H"),
        OpCode::S => QuilGate::plain("S"),
        OpCode::Sdg => QuilGate::plain("S").dagger(),
        OpCode::T => QuilGate::plain("T"),
        OpCode::Tdg => QuilGate::plain("T").dagger(),
        OpCode::Rx => QuilGate::plain("RX"),
        OpCode::Ry => QuilGate::plain("RY"),
        OpCode::Rz => QuilGate::plain("RZ"),
        OpCode::Phase => QuilGate::plain("PHASE"),
        OpCode::Cx => QuilGate::plain("CNOT"),
        OpCode::Cy => QuilGate::plain("Y").controlled(),
        OpCode::Cz => QuilGate::plain("CZ"),
        OpCode::Ch => QuilGate::plain("H").controlled(),
        OpCode::Cs => QuilGate::plain("S").controlled(),
        OpCode::Csdg => QuilGate::plain("S").dagger().controlled(),
        OpCode::Ct => QuilGate::plain("T").controlled(),
        OpCode::Ctdg => QuilGate::plain("T").dagger().controlled(),
        OpCode::Crx => QuilGate::plain("RX").controlled(),
        OpCode::Cry => QuilGate::plain("RY").controlled(),
        OpCode::Crz => QuilGate::plain("RZ").controlled(),
        OpCode::Cphase => QuilGate::plain("CPHASE"),
        OpCode::Ccx => QuilGate::plain("CCNOT"),
        OpCode::Swap => QuilGate::plain("SWAP"),
        OpCode::Cswap => QuilGate::plain("CSWAP"),
        OpCode::Sx | OpCode::Sxdg | OpCode::Csx => {
            return Err(EmitError::UnsupportedOperation {
                dialect,
                op: op.name().to_string(),
            });
        }
    };
    Ok(gate)
}

/// Quil emitter.
struct QuilEmitter {
    output: String,
}

impl QuilEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        for instruction in program {
            self.emit_instruction(instruction)?;
        }
        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let gate = quil_gate(Dialect::Quil, instruction.op)?;

        if let Some(label) = &instruction.label {
            self.writeln(&format!("# {label}"));
        }

        let mut line = String::new();
        if gate.controlled {
            line.push_str("CONTROLLED ");
        }
        if gate.dagger {
            line.push_str("DAGGER ");
        }
        line.push_str(gate.name);
        if !instruction.params.is_empty() {
            line.push_str(&format!("({})", format_angles(&instruction.params, "pi")));
        }
        for wire in &instruction.wires {
            line.push_str(&format!(" {}", wire.0));
        }
        self.writeln(&line);
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// pyQuil emitter.
struct PyQuilEmitter {
    output: String,
}

impl PyQuilEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("from pyquil import Program");
        self.writeln("from pyquil.gates import *");
        self.writeln("import numpy as np");
        self.writeln("");
        self.writeln("p = Program()");

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let gate = quil_gate(Dialect::PyQuil, instruction.op)?;

        if let Some(label) = &instruction.label {
            self.writeln(&format!("# {label}"));
        }

        let (control, targets): (Option<WireId>, &[WireId]) = match instruction.wires.split_first()
        {
            Some((&first, rest)) if gate.controlled => (Some(first), rest),
            _ => (None, instruction.wires.as_slice()),
        };

        let mut args: Vec<String> = instruction
            .params
            .iter()
            .map(|&p| format_angle(p, "np.pi"))
            .collect();
        args.extend(targets.iter().map(|w| w.0.to_string()));

        let mut call = format!("{}({})", gate.name, args.join(", "));
        if gate.dagger {
            call.push_str(".dagger()");
        }
        if let Some(control) = control {
            call.push_str(&format!(".controlled({})", control.0));
        }
        self.writeln(&format!("p += {call}"));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_quil() {
        let mut p = LoweredProgram::new(3);
        p.push(Instruction::new(OpCode::Tdg, 0, [WireId(0)]));
        p.push(Instruction::new(OpCode::Cphase, 1, [WireId(0), WireId(2)]).with_params(vec![PI]));
        p.push(Instruction::new(OpCode::Cx, 2, [WireId(0), WireId(2)]).with_label("NL-CNOT(0→2)"));

        let out = emit_quil(&p).unwrap();
        assert_eq!(
            out,
            "DAGGER T 0\nCPHASE(pi) 0 2\n# NL-CNOT(0→2)\nCNOT 0 2\n"
        );
    }

    #[test]
    fn test_quil_modifiers() {
        let mut p = LoweredProgram::new(2);
        p.push(Instruction::new(OpCode::Csdg, 0, [WireId(1), WireId(0)]));
        p.push(Instruction::new(OpCode::Crx, 1, [WireId(0), WireId(1)]).with_params(vec![PI / 2.0]));

        let out = emit_quil(&p).unwrap();
        assert_eq!(out, "CONTROLLED DAGGER S 1 0\nCONTROLLED RX(pi/2) 0 1\n");
    }

    #[test]
    fn test_sqrt_x_unsupported() {
        let mut p = LoweredProgram::new(1);
        p.push(Instruction::new(OpCode::Sx, 0, [WireId(0)]));
        let err = emit_quil(&p).unwrap_err();
        assert!(matches!(
            err,
            EmitError::UnsupportedOperation { dialect: Dialect::Quil, ref op } if op == "sx"
        ));
    }

    #[test]
    fn test_pyquil() {
        let mut p = LoweredProgram::new(3);
        p.push(Instruction::new(OpCode::Sdg, 0, [WireId(0)]));
        p.push(Instruction::new(OpCode::Ctdg, 1, [WireId(2), WireId(1)]));
        p.push(Instruction::new(OpCode::Cry, 2, [WireId(0), WireId(1)]).with_params(vec![-PI / 4.0]));
        p.push(
            Instruction::new(OpCode::Cz, 3, [WireId(0), WireId(2)]).with_label("NL-CZ(0,2)"),
        );
        p.push(Instruction::new(OpCode::Cswap, 4, [WireId(0), WireId(1), WireId(2)]));

        let out = emit_pyquil(&p).unwrap();
        assert!(out.starts_with("from pyquil import Program\n"));
        assert!(out.contains("p = Program()\n"));
        assert!(out.contains("p += S(0).dagger()\n"));
        assert!(out.contains("p += T(1).dagger().controlled(2)\n"));
        assert!(out.contains("p += RY(-np.pi/4, 1).controlled(0)\n"));
        assert!(out.contains("# NL-CZ(0,2)\np += CZ(0, 2)\n"));
        assert!(out.contains("p += CSWAP(0, 1, 2)\n"));
    }

    #[test]
    fn test_pyquil_rejects_sqrt_x() {
        let mut p = LoweredProgram::new(2);
        p.push(Instruction::new(OpCode::Csx, 0, [WireId(0), WireId(1)]));
        assert!(matches!(
            emit_pyquil(&p),
            Err(EmitError::UnsupportedOperation { dialect: Dialect::PyQuil, ref op }) if op == "csx"
        ));
    }
}
