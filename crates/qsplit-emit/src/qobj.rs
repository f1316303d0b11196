//! Qobj experiment emitter.

use serde::Serialize;
use std::f64::consts::PI;

use qsplit_ir::{LoweredProgram, OpCode};

use crate::error::EmitResult;

#[derive(Serialize)]
struct Qobj<'a> {
    qobj_id: &'a str,
    schema_version: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    config: Config,
    experiments: Vec<Experiment<'a>>,
}

#[derive(Serialize)]
struct Config {
    n_qubits: usize,
    memory_slots: usize,
}

#[derive(Serialize)]
struct Experiment<'a> {
    header: Header<'a>,
    config: Config,
    instructions: Vec<QobjInstruction<'a>>,
}

#[derive(Serialize)]
struct Header<'a> {
    name: &'a str,
    n_qubits: usize,
    qubit_labels: Vec<(&'a str, usize)>,
}

#[derive(Serialize)]
struct QobjInstruction<'a> {
    name: &'a str,
    qubits: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

/// Emit a program as a pretty-printed Qobj with a single experiment.
pub fn emit_qobj(program: &LoweredProgram) -> EmitResult<String> {
    let n = program.num_wires();
    let instructions = program
        .instructions()
        .iter()
        .map(|inst| {
            let (name, params) = match inst.op {
                OpCode::Phase => ("p", inst.params.clone()),
                OpCode::Cphase => ("cp", inst.params.clone()),
                OpCode::Ct => ("cp", vec![PI / 4.0]),
                OpCode::Ctdg => ("cp", vec![-PI / 4.0]),
                op => (op.name(), inst.params.clone()),
            };
            QobjInstruction {
                name,
                qubits: inst.wires.iter().map(|w| w.0).collect(),
                params,
                label: inst.label.as_deref(),
            }
        })
        .collect();

    let qobj = Qobj {
        qobj_id: "qsplit",
        schema_version: "1.3.0",
        kind: "QASM",
        config: Config {
            n_qubits: n,
            memory_slots: 0,
        },
        experiments: vec![Experiment {
            header: Header {
                name: "circuit",
                n_qubits: n,
                qubit_labels: (0..n).map(|i| ("q", i)).collect(),
            },
            config: Config {
                n_qubits: n,
                memory_slots: 0,
            },
            instructions,
        }],
    };

    Ok(serde_json::to_string_pretty(&qobj)?)
}
