//! QuEST emitter.
//!
//! Writes a C program against the QuEST 3 API that prepares the program's
//! state in a `Qureg` named `qubits`.

use std::f64::consts::PI;

use qsplit_ir::{Instruction, LoweredProgram, OpCode};

use crate::angle::format_angle;
use crate::dialect::Dialect;
use crate::error::{EmitError, EmitResult};

const INDENT: &str = "    ";

/// Emit a program as a QuEST C program.
///
/// QuEST has no named square root of X, controlled Hadamard or Fredkin
/// gate, so `sx`, `sxdg`, `csx`, `ch` and `cswap` are rejected.
pub fn emit_quest(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = QuestEmitter::new();
    emitter.emit_program(program)
}

/// QuEST emitter.
struct QuestEmitter {
    output: String,
}

impl QuestEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("#include <math.h>");
        self.writeln("#include \"QuEST.h\"");
        self.writeln("");
        self.writeln("int main(void) {");
        self.writeln(&format!("{INDENT}QuESTEnv env = createQuESTEnv();"));
        self.writeln(&format!(
            "{INDENT}Qureg qubits = createQureg({}, env);",
            program.num_wires()
        ));
        self.writeln(&format!("{INDENT}initZeroState(qubits);"));
        self.writeln("");

        for instruction in program {
            self.emit_instruction(instruction)?;
        }

        self.writeln("");
        self.writeln(&format!("{INDENT}destroyQureg(qubits, env);"));
        self.writeln(&format!("{INDENT}destroyQuESTEnv(env);"));
        self.writeln(&format!("{INDENT}return 0;"));
        self.writeln("}");

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let call = quest_call(instruction)?;
        if let Some(label) = &instruction.label {
            self.writeln(&format!("{INDENT}// {label}"));
        }
        self.writeln(&format!("{INDENT}{call};"));
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn quest_call(instruction: &Instruction) -> EmitResult<String> {
    let (function, angle) = match instruction.op {
        OpCode::X => ("pauliX", None),
        OpCode::Y => ("pauliY", None),
        OpCode::Z => ("pauliZ", None),
        OpCode::H => ("hadamard", None),
        OpCode::S => ("sGate", None),
        OpCode::T => ("tGate", None),
        OpCode::Sdg => ("phaseShift", Some(-PI / 2.0)),
        OpCode::Tdg => ("phaseShift", Some(-PI / 4.0)),
        OpCode::Rx => ("rotateX", instruction.params.first().copied()),
        OpCode::Ry => ("rotateY", instruction.params.first().copied()),
        OpCode::Rz => ("rotateZ", instruction.params.first().copied()),
        OpCode::Phase => ("phaseShift", instruction.params.first().copied()),
        OpCode::Cx => ("controlledNot", None),
        OpCode::Cy => ("controlledPauliY", None),
        OpCode::Cz => ("controlledPhaseFlip", None),
        OpCode::Cs => ("controlledPhaseShift", Some(PI / 2.0)),
        OpCode::Csdg => ("controlledPhaseShift", Some(-PI / 2.0)),
        OpCode::Ct => ("controlledPhaseShift", Some(PI / 4.0)),
        OpCode::Ctdg => ("controlledPhaseShift", Some(-PI / 4.0)),
        OpCode::Crx => ("controlledRotateX", instruction.params.first().copied()),
        OpCode::Cry => ("controlledRotateY", instruction.params.first().copied()),
        OpCode::Crz => ("controlledRotateZ", instruction.params.first().copied()),
        OpCode::Cphase => ("controlledPhaseShift", instruction.params.first().copied()),
        OpCode::Swap => ("swapGate", None),
        OpCode::Ccx => {
            let [a, b, target] = instruction.wires.as_slice() else {
                return unsupported(instruction.op);
            };
            return Ok(format!(
                "multiControlledMultiQubitNot(qubits, (int[]){{{}, {}}}, 2, (int[]){{{}}}, 1)",
                a.0, b.0, target.0
            ));
        }
        op @ (OpCode::Sx | OpCode::Sxdg | OpCode::Csx | OpCode::Ch | OpCode::Cswap) => {
            return unsupported(op);
        }
    };

    let mut args = vec!["qubits".to_string()];
    args.extend(instruction.wires.iter().map(|w| w.0.to_string()));
    args.extend(angle.map(|a| format_angle(a, "M_PI")));
    Ok(format!("{function}({})", args.join(", ")))
}

fn unsupported<T>(op: OpCode) -> EmitResult<T> {
    Err(EmitError::UnsupportedOperation {
        dialect: Dialect::Quest,
        op: op.name().to_string(),
    })
}
