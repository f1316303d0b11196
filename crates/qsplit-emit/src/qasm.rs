//! OpenQASM 2.0 and 3 emitters.

use std::f64::consts::PI;

use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};

use crate::angle::format_angles;
use crate::error::EmitResult;

/// Emit a program as OpenQASM 2.0.
///
/// Controlled S and T turns have no `qelib1.inc` name and are written as
/// `cu1` with the matching angle. The phase gate is written as `u1`.
pub fn emit_qasm2(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = Qasm2Emitter::new();
    emitter.emit_program(program)
}

/// Emit a program as OpenQASM 3.
///
/// Operations missing from `stdgates.inc` use `ctrl @` and `inv @`
/// modifiers.
pub fn emit_qasm3(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = Qasm3Emitter::new();
    emitter.emit_program(program)
}

fn emit_wires(wires: &[WireId]) -> String {
    wires
        .iter()
        .map(|w| format!("q[{}]", w.0))
        .collect::<Vec<_>>()
        .join(", ")
}

fn statement(name: &str, params: &[f64], wires: &[WireId]) -> String {
    let wires = emit_wires(wires);
    if params.is_empty() {
        format!("{name} {wires};")
    } else {
        format!("{name}({}) {wires};", format_angles(params, "pi"))
    }
}

/// QASM 2.0 emitter.
struct Qasm2Emitter {
    output: String,
}

#[allow(clippy::unused_self, clippy::unnecessary_wraps)]
impl Qasm2Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln("");

        if program.num_wires() > 0 {
            self.writeln(&format!("qreg q[{}];", program.num_wires()));
            self.writeln("");
        }

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        if let Some(label) = &instruction.label {
            self.writeln(&format!("// {label}"));
        }

        let (name, params): (&str, Vec<f64>) = match instruction.op {
            OpCode::Phase => ("u1", instruction.params.clone()),
            OpCode::Cphase => ("cu1", instruction.params.clone()),
            OpCode::Cs => ("cu1", vec![PI / 2.0]),
            OpCode::Csdg => ("cu1", vec![-PI / 2.0]),
            OpCode::Ct => ("cu1", vec![PI / 4.0]),
            OpCode::Ctdg => ("cu1", vec![-PI / 4.0]),
            op => (op.name(), instruction.params.clone()),
        };

        self.writeln(&statement(name, &params, &instruction.wires));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// QASM 3 emitter.
struct Qasm3Emitter {
    output: String,
}

#[allow(clippy::unused_self, clippy::unnecessary_wraps)]
impl Qasm3Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        if program.num_wires() > 0 {
            self.writeln(&format!("qubit[{}] q;", program.num_wires()));
            self.writeln("");
        }

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        if let Some(label) = &instruction.label {
            self.writeln(&format!("// {label}"));
        }

        let name = match instruction.op {
            OpCode::Sxdg => "inv @ sx",
            OpCode::Phase => "p",
            OpCode::Cphase => "cp",
            OpCode::Cs => "ctrl @ s",
            OpCode::Csdg => "ctrl @ sdg",
            OpCode::Ct => "ctrl @ t",
            OpCode::Ctdg => "ctrl @ tdg",
            OpCode::Csx => "ctrl @ sx",
            op => op.name(),
        };

        self.writeln(&statement(name, &instruction.params, &instruction.wires));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
