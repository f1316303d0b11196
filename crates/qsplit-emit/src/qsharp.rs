//! Q# emitter.

use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};

use crate::angle::format_angle;
use crate::dialect::Dialect;
use crate::error::{EmitError, EmitResult};

const INDENT: &str = "        ";

/// Emit a program as a Q# operation `Circuit` in namespace `QSplit`.
///
/// Controlled forms without an intrinsic use the `Controlled` functor,
/// inverse turns use `Adjoint`. Q# has no square root of X intrinsic, so
/// `sx`, `sxdg` and `csx` are rejected.
pub fn emit_qsharp(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = QSharpEmitter::new();
    emitter.emit_program(program)
}

/// Q# emitter.
struct QSharpEmitter {
    output: String,
}

impl QSharpEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("namespace QSplit {");
        self.writeln("    open Microsoft.Quantum.Intrinsic;");
        self.writeln("    open Microsoft.Quantum.Math;");
        self.writeln("");
        self.writeln("    operation Circuit() : Unit {");
        self.writeln(&format!("{INDENT}use q = Qubit[{}];", program.num_wires()));

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        self.writeln(&format!("{INDENT}ResetAll(q);"));
        self.writeln("    }");
        self.writeln("}");

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let (name, controls) = qsharp_operation(instruction.op)?;
        if let Some(label) = &instruction.label {
            self.writeln(&format!("{INDENT}// {label}"));
        }

        let (control_wires, targets) = instruction.wires.split_at(controls);
        let mut args: Vec<String> = instruction
            .params
            .iter()
            .map(|&p| format_angle(p, "PI()"))
            .collect();
        args.extend(targets.iter().map(|&w| qubit(w)));

        let statement = if control_wires.is_empty() {
            format!("{name}({});", args.join(", "))
        } else {
            let controls: Vec<String> = control_wires.iter().map(|&w| qubit(w)).collect();
            let args = match args.as_slice() {
                [single] => single.clone(),
                _ => format!("({})", args.join(", ")),
            };
            format!("Controlled {name}([{}], {args});", controls.join(", "))
        };
        self.writeln(&format!("{INDENT}{statement}"));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// The Q# operation applied to the targets, and the number of leading
/// control wires passed to `Controlled`.
fn qsharp_operation(op: OpCode) -> EmitResult<(&'static str, usize)> {
    let operation = match op {
        OpCode::X => ("X", 0),
        OpCode::Y => ("Y", 0),
        OpCode::Z => ("Z", 0),
        OpCode::H => ("H", 0),
        OpCode::S => ("S", 0),
        OpCode::Sdg => ("Adjoint S", 0),
        OpCode::T => ("T", 0),
        OpCode::Tdg => ("Adjoint T", 0),
        OpCode::Rx => ("Rx", 0),
        OpCode::Ry => ("Ry", 0),
        OpCode::Rz => ("Rz", 0),
        OpCode::Phase => ("R1", 0),
        OpCode::Cx => ("CNOT", 0),
        OpCode::Cy => ("Y", 1),
        OpCode::Cz => ("Z", 1),
        OpCode::Ch => ("H", 1),
        OpCode::Cs => ("S", 1),
        OpCode::Csdg => ("Adjoint S", 1),
        OpCode::Ct => ("T", 1),
        OpCode::Ctdg => ("Adjoint T", 1),
        OpCode::Crx => ("Rx", 1),
        OpCode::Cry => ("Ry", 1),
        OpCode::Crz => ("Rz", 1),
        OpCode::Cphase => ("R1", 1),
        OpCode::Ccx => ("CCNOT", 0),
        OpCode::Swap => ("SWAP", 0),
        OpCode::Cswap => ("SWAP", 1),
        OpCode::Sx | OpCode::Sxdg | OpCode::Csx => {
            return Err(EmitError::UnsupportedOperation {
                dialect: Dialect::QSharp,
                op: op.name().to_string(),
            });
        }
    };
    Ok(operation)
}

fn qubit(wire: WireId) -> String {
    format!("q[{}]", wire.0)
}
