//! Python script emitters for Qiskit, Cirq and TensorFlow Quantum.

use std::f64::consts::PI;

use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};

use crate::angle::{format_angle, format_angles};
use crate::error::EmitResult;

/// Emit a program as a Python script building a Qiskit `QuantumCircuit`
/// named `qc`.
pub fn emit_qiskit(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = QiskitEmitter::new();
    emitter.emit_program(program)
}

/// Emit a program as a Python script building a Cirq `Circuit` named
/// `circuit`, one `Moment` per output column.
pub fn emit_cirq(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = CirqEmitter::new(CirqFlavor::Cirq);
    emitter.emit_program(program)
}

/// Emit a program as a Cirq circuit over `GridQubit`s converted to a
/// TensorFlow Quantum tensor.
///
/// TFQ only serializes its own gate set plus `controlled_by`, so every
/// controlled operation is written as its target gate controlled by the
/// leading wires.
pub fn emit_tfq(program: &LoweredProgram) -> EmitResult<String> {
    let mut emitter = CirqEmitter::new(CirqFlavor::Tfq);
    emitter.emit_program(program)
}

/// Qiskit emitter.
struct QiskitEmitter {
    output: String,
}

#[allow(clippy::unnecessary_wraps)]
impl QiskitEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("from qiskit import QuantumCircuit");
        self.writeln("from math import pi");
        self.writeln("");
        self.writeln(&format!("qc = QuantumCircuit({})", program.num_wires()));

        for instruction in program {
            self.emit_instruction(instruction);
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        if let Some(label) = &instruction.label {
            self.writeln(&format!("# {label}"));
        }

        let (method, params): (&str, Vec<f64>) = match instruction.op {
            OpCode::Phase => ("p", instruction.params.clone()),
            OpCode::Cphase => ("cp", instruction.params.clone()),
            OpCode::Ct => ("cp", vec![PI / 4.0]),
            OpCode::Ctdg => ("cp", vec![-PI / 4.0]),
            op => (op.name(), instruction.params.clone()),
        };
        let mut args: Vec<String> = params.iter().map(|&p| format_angle(p, "pi")).collect();
        args.extend(instruction.wires.iter().map(|w| w.0.to_string()));
        self.writeln(&format!("qc.{method}({})", args.join(", ")));
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CirqFlavor {
    Cirq,
    Tfq,
}

/// Cirq and TFQ emitter.
struct CirqEmitter {
    flavor: CirqFlavor,
    output: String,
}

#[allow(clippy::unnecessary_wraps)]
impl CirqEmitter {
    fn new(flavor: CirqFlavor) -> Self {
        Self {
            flavor,
            output: String::new(),
        }
    }

    fn emit_program(&mut self, program: &LoweredProgram) -> EmitResult<String> {
        self.writeln("import cirq");
        self.writeln("import numpy as np");
        if self.flavor == CirqFlavor::Tfq {
            self.writeln("import tensorflow_quantum as tfq");
        }
        self.writeln("");

        match self.flavor {
            CirqFlavor::Cirq => {
                self.writeln(&format!("q = cirq.LineQubit.range({})", program.num_wires()));
            }
            CirqFlavor::Tfq => {
                self.writeln(&format!("q = cirq.GridQubit.rect(1, {})", program.num_wires()));
            }
        }
        self.writeln("circuit = cirq.Circuit()");

        for (column, instructions) in program.by_column() {
            self.writeln(&format!("# column {column}"));
            for label in instructions.iter().filter_map(|i| i.label.as_deref()) {
                self.writeln(&format!("# {label}"));
            }
            let ops: Vec<String> = instructions.iter().map(|i| self.operation(i)).collect();
            self.writeln(&format!("circuit.append(cirq.Moment([{}]))", ops.join(", ")));
        }

        if self.flavor == CirqFlavor::Tfq {
            self.writeln("");
            self.writeln("circuit_tensor = tfq.convert_to_tensor([circuit])");
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn operation(&self, instruction: &Instruction) -> String {
        let (gate, controls) = cirq_gate(instruction);
        let (control_wires, targets) = instruction.wires.split_at(controls);

        match self.flavor {
            CirqFlavor::Tfq if !control_wires.is_empty() => format!(
                "{gate}({}).controlled_by({})",
                qubits(targets),
                qubits(control_wires)
            ),
            CirqFlavor::Tfq => format!("{gate}({})", qubits(targets)),
            CirqFlavor::Cirq => {
                let native = match instruction.op {
                    OpCode::Cx => Some("cirq.CNOT".to_string()),
                    OpCode::Cz => Some("cirq.CZ".to_string()),
                    OpCode::Ccx => Some("cirq.CCX".to_string()),
                    OpCode::Cswap => Some("cirq.CSWAP".to_string()),
                    OpCode::Cphase => Some(format!(
                        "cirq.CZPowGate(exponent={} / np.pi)",
                        format_angles(&instruction.params, "np.pi")
                    )),
                    _ => None,
                };
                let gate = match native {
                    Some(native) => native,
                    None if controls > 0 => format!("cirq.ControlledGate({gate})"),
                    None => gate,
                };
                format!("{gate}({})", qubits(&instruction.wires))
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// The Cirq gate acting on the targets, and the number of leading control
/// wires.
fn cirq_gate(instruction: &Instruction) -> (String, usize) {
    let angle = || format_angles(&instruction.params, "np.pi");
    let fixed = |gate: &str, controls: usize| (gate.to_string(), controls);
    match instruction.op {
        OpCode::X => fixed("cirq.X", 0),
        OpCode::Y => fixed("cirq.Y", 0),
        OpCode::Z => fixed("cirq.Z", 0),
        OpCode::H => fixed("cirq.H", 0),
        OpCode::S => fixed("cirq.S", 0),
        OpCode::Sdg => fixed("cirq.S**-1", 0),
        OpCode::T => fixed("cirq.T", 0),
        OpCode::Tdg => fixed("cirq.T**-1", 0),
        OpCode::Sx => fixed("cirq.X**0.5", 0),
        OpCode::Sxdg => fixed("cirq.X**-0.5", 0),
        OpCode::Rx => (format!("cirq.rx({})", angle()), 0),
        OpCode::Ry => (format!("cirq.ry({})", angle()), 0),
        OpCode::Rz => (format!("cirq.rz({})", angle()), 0),
        OpCode::Phase => (format!("cirq.ZPowGate(exponent={} / np.pi)", angle()), 0),
        OpCode::Cx => fixed("cirq.X", 1),
        OpCode::Cy => fixed("cirq.Y", 1),
        OpCode::Cz => fixed("cirq.Z", 1),
        OpCode::Ch => fixed("cirq.H", 1),
        OpCode::Cs => fixed("cirq.S", 1),
        OpCode::Csdg => fixed("cirq.S**-1", 1),
        OpCode::Ct => fixed("cirq.T", 1),
        OpCode::Ctdg => fixed("cirq.T**-1", 1),
        OpCode::Csx => fixed("cirq.X**0.5", 1),
        OpCode::Crx => (format!("cirq.rx({})", angle()), 1),
        OpCode::Cry => (format!("cirq.ry({})", angle()), 1),
        OpCode::Crz => (format!("cirq.rz({})", angle()), 1),
        OpCode::Cphase => (format!("cirq.ZPowGate(exponent={} / np.pi)", angle()), 1),
        OpCode::Ccx => fixed("cirq.X", 2),
        OpCode::Swap => fixed("cirq.SWAP", 0),
        OpCode::Cswap => fixed("cirq.SWAP", 1),
    }
}

fn qubits(wires: &[WireId]) -> String {
    wires
        .iter()
        .map(|w| format!("q[{}]", w.0))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qiskit() {
        let mut p = LoweredProgram::new(3);
        p.push(Instruction::new(OpCode::Crz, 0, [WireId(0), WireId(1)]).with_params(vec![PI]));
        p.push(Instruction::new(OpCode::Ctdg, 1, [WireId(1), WireId(2)]));
        p.push(Instruction::new(OpCode::Ccx, 2, [WireId(0), WireId(1), WireId(2)]));

        let out = emit_qiskit(&p).unwrap();
        assert!(out.contains("qc = QuantumCircuit(3)"));
        assert!(out.contains("qc.crz(pi, 0, 1)"));
        assert!(out.contains("qc.cp(-pi/4, 1, 2)"));
        assert!(out.contains("qc.ccx(0, 1, 2)"));
    }

    #[test]
    fn test_cirq_moments_follow_columns() {
        let mut p = LoweredProgram::new(2);
        p.push(Instruction::new(OpCode::X, 0, [WireId(0)]));
        p.push(Instruction::new(OpCode::X, 0, [WireId(1)]));
        p.push(Instruction::new(OpCode::Cz, 1, [WireId(0), WireId(1)]).with_label("NL-CZ(0,1)"));

        let out = emit_cirq(&p).unwrap();
        assert_eq!(out.matches("cirq.Moment").count(), 2);
        assert!(out.contains("cirq.Moment([cirq.X(q[0]), cirq.X(q[1])])"));
        assert!(out.contains("# NL-CZ(0,1)"));
        assert!(out.contains("cirq.CZ(q[0], q[1])"));
    }

    #[test]
    fn test_cirq_controlled_gates() {
        let mut p = LoweredProgram::new(3);
        p.push(Instruction::new(OpCode::Ch, 0, [WireId(0), WireId(1)]));
        p.push(Instruction::new(OpCode::Cswap, 1, [WireId(0), WireId(1), WireId(2)]));

        let out = emit_cirq(&p).unwrap();
        assert!(out.contains("cirq.ControlledGate(cirq.H)(q[0], q[1])"));
        assert!(out.contains("cirq.CSWAP(q[0], q[1], q[2])"));
    }

    #[test]
    fn test_cirq_angles() {
        let mut p = LoweredProgram::new(1);
        p.push(Instruction::new(OpCode::Ry, 0, [WireId(0)]).with_params(vec![-PI / 2.0]));
        assert!(emit_cirq(&p).unwrap().contains("cirq.ry(-np.pi/2)(q[0])"));
    }

    #[test]
    fn test_tfq_uses_grid_qubits_and_controlled_by() {
        let mut p = LoweredProgram::new(3);
        p.push(Instruction::new(OpCode::Ccx, 0, [WireId(0), WireId(1), WireId(2)]));
        p.push(Instruction::new(OpCode::Crx, 1, [WireId(2), WireId(0)]).with_params(vec![PI]));
        p.push(Instruction::new(OpCode::Swap, 2, [WireId(1), WireId(2)]));

        let out = emit_tfq(&p).unwrap();
        assert!(out.contains("import tensorflow_quantum as tfq"));
        assert!(out.contains("q = cirq.GridQubit.rect(1, 3)"));
        assert!(out.contains("cirq.X(q[2]).controlled_by(q[0], q[1])"));
        assert!(out.contains("cirq.rx(np.pi)(q[0]).controlled_by(q[2])"));
        assert!(out.contains("cirq.SWAP(q[1], q[2])"));
        assert!(out.ends_with("circuit_tensor = tfq.convert_to_tensor([circuit])\n"));
    }
}
