//! Lowered, dialect-neutral instructions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::gate::OpCode;
use crate::wire::WireId;

/// One operation in the flat instruction stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub op: OpCode,
    /// Output column. Instructions sharing a column act in parallel.
    pub column: usize,
    /// Operand wires, controls first.
    pub wires: Vec<WireId>,
    /// Angle parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Optional annotation carried to dialects that support comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Instruction {
    /// Create an instruction without parameters.
    pub fn new(op: OpCode, column: usize, wires: impl IntoIterator<Item = WireId>) -> Self {
        Self {
            op,
            column,
            wires: wires.into_iter().collect(),
            params: vec![],
            label: None,
        }
    }

    /// Set the angle parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the instruction acts on `wire`.
    pub fn touches(&self, wire: WireId) -> bool {
        self.wires.contains(&wire)
    }

    /// Whether the instruction acts on more than one wire.
    pub fn is_multi_wire(&self) -> bool {
        self.wires.len() > 1
    }
}

/// The result of lowering a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoweredProgram {
    num_wires: usize,
    instructions: Vec<Instruction>,
}

impl LoweredProgram {
    /// An empty program over `num_wires` wires.
    pub fn new(num_wires: usize) -> Self {
        Self {
            num_wires,
            instructions: vec![],
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// The instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of output columns used.
    pub fn num_columns(&self) -> usize {
        self.instructions
            .iter()
            .map(|i| i.column + 1)
            .max()
            .unwrap_or(0)
    }

    /// How often each op appears.
    pub fn op_counts(&self) -> FxHashMap<OpCode, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.op).or_insert(0) += 1;
        }
        counts
    }

    /// Instructions grouped by output column, in column order.
    pub fn by_column(&self) -> Vec<(usize, Vec<&Instruction>)> {
        let mut groups: Vec<(usize, Vec<&Instruction>)> = vec![];
        for inst in &self.instructions {
            match groups.last_mut() {
                Some((col, group)) if *col == inst.column => group.push(inst),
                _ => groups.push((inst.column, vec![inst])),
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a LoweredProgram {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
