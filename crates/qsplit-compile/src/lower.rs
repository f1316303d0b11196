//! Lowering of circuit documents to a flat instruction stream.
//!
//! Each input column is resolved against its controls:
//!
//! | Controls | Payload becomes |
//! |----------|-----------------|
//! | 0 | the gate's uncontrolled token; nested circuits are inlined |
//! | 1 | the gate's controlled token on `(control, target)` |
//! | 2 | `ccx` on `(c1, c2, target)`, only for the NOT gate |
//! | 3+ | [`CompileError::UnimplementedCircuit`] |
//!
//! Anti-controls count as controls. Their wires are flipped with `X` in one
//! shared output column before the payload and flipped back in one shared
//! column after it. A pair of swap halves becomes one `swap` (or `cswap`
//! under a single control) ahead of the rest of the column.
//!
//! Every emitted instruction takes its own output column, except the
//! anti-control flips which share one. The column counter is shared across
//! nested circuits and lives only as long as one call to [`lower`].

use tracing::{debug, info, instrument};

use qsplit_ir::{CircuitDocument, Column, Gate, Instruction, LoweredProgram, OpCode, WireId};

use crate::error::{CompileError, CompileResult};

/// Lower `doc` into an ordered, dialect-neutral instruction list.
///
/// Fails on the first construct with no lowering; no partial program is
/// returned.
#[instrument(skip(doc), fields(wires = doc.num_wires(), columns = doc.num_columns()))]
pub fn lower(doc: &CircuitDocument) -> CompileResult<LoweredProgram> {
    let mut ctx = LoweringContext::new(doc.num_wires());
    ctx.lower_document(doc, 0, None)?;

    info!(
        "Lowered {} input columns into {} instructions over {} output columns",
        doc.num_columns(),
        ctx.program.len(),
        ctx.next_column
    );
    Ok(ctx.program)
}

/// A control cell found in a column.
#[derive(Debug, Clone, Copy)]
struct ColumnControl {
    wire: WireId,
    anti: bool,
}

/// State for a single top-level lowering call.
struct LoweringContext {
    next_column: usize,
    program: LoweredProgram,
}

impl LoweringContext {
    fn new(num_wires: usize) -> Self {
        Self {
            next_column: 0,
            program: LoweredProgram::new(num_wires),
        }
    }

    /// Emit one instruction in its own output column.
    fn emit(&mut self, inst: Instruction) {
        self.program.push(inst);
        self.next_column += 1;
    }

    /// Lower a (possibly nested) document whose wire 0 sits at `offset`.
    ///
    /// `source` is the top-level column that contains a nested document and
    /// is used for error reporting.
    fn lower_document(
        &mut self,
        doc: &CircuitDocument,
        offset: usize,
        source: Option<usize>,
    ) -> CompileResult<()> {
        for (index, column) in doc.columns().iter().enumerate() {
            self.lower_column(column, source.unwrap_or(index), offset)?;
        }
        Ok(())
    }

    fn lower_column(&mut self, column: &Column, source: usize, offset: usize) -> CompileResult<()> {
        let controls = find_controls(column, source, offset)?;
        let swaps: Vec<WireId> = column
            .gates()
            .filter(|(_, g)| g.is_swap_half())
            .map(|(row, _)| WireId::from(row + offset))
            .collect();

        debug!(
            "Column {source} (offset {offset}): {} controls, {} swap halves",
            controls.len(),
            swaps.len()
        );

        if controls.len() > 2 {
            return Err(CompileError::UnimplementedCircuit {
                column: source,
                reason: format!(
                    "{} controls in one column; at most 2 are supported",
                    controls.len()
                ),
            });
        }
        if !swaps.is_empty() && swaps.len() != 2 {
            return Err(CompileError::UnimplementedCircuit {
                column: source,
                reason: format!(
                    "a column may only contain 0 or 2 swap halves, found {}",
                    swaps.len()
                ),
            });
        }

        let flipped: Vec<WireId> = controls.iter().filter(|c| c.anti).map(|c| c.wire).collect();
        self.flip(&flipped);

        match controls.as_slice() {
            [] => {
                if let &[a, b] = swaps.as_slice() {
                    let col = self.next_column;
                    self.emit(Instruction::new(OpCode::Swap, col, [a, b]));
                }
                self.lower_uncontrolled(column, source, offset)?;
            }
            [control] => {
                if let &[a, b] = swaps.as_slice() {
                    let col = self.next_column;
                    self.emit(Instruction::new(
                        OpCode::Cswap,
                        col,
                        [control.wire, a, b],
                    ));
                }
                self.lower_controlled(column, source, offset, control.wire)?;
            }
            [first, second] => {
                if !swaps.is_empty() {
                    return Err(CompileError::UnimplementedCircuit {
                        column: source,
                        reason: "swap under two controls".into(),
                    });
                }
                self.lower_doubly_controlled(column, source, offset, [first.wire, second.wire])?;
            }
            _ => unreachable!("control count checked above"),
        }

        self.flip(&flipped);
        Ok(())
    }

    /// Flip every anti-controlled wire in one shared output column.
    fn flip(&mut self, wires: &[WireId]) {
        if wires.is_empty() {
            return;
        }
        let col = self.next_column;
        for &wire in wires {
            self.program.push(Instruction::new(OpCode::X, col, [wire]));
        }
        self.next_column += 1;
    }

    fn lower_uncontrolled(
        &mut self,
        column: &Column,
        source: usize,
        offset: usize,
    ) -> CompileResult<()> {
        for (row, gate) in column.gates().filter(|(_, g)| is_payload(g)) {
            let wire = row + offset;

            if let Some(nl) = gate.non_local_payload() {
                let col = self.next_column;
                self.emit(
                    Instruction::new(
                        nl.kind.op(),
                        col,
                        [nl.source.offset_by(offset), nl.target.offset_by(offset)],
                    )
                    .with_label(gate.title.clone()),
                );
            } else if let Some(export) = &gate.export {
                if export.uncontrolled.num_wires() != gate.height {
                    return Err(unsupported(gate, source, wire));
                }
                let col = self.next_column;
                let wires = (wire..wire + gate.height).map(WireId::from);
                self.emit(
                    Instruction::new(export.uncontrolled, col, wires)
                        .with_params(export.params.clone()),
                );
            } else if let Some(nested) = gate.nested_circuit() {
                debug!("Inlining nested circuit '{}' at wire {wire}", gate.id);
                self.lower_document(nested, wire, Some(source))?;
            } else {
                return Err(unsupported(gate, source, wire));
            }
        }
        Ok(())
    }

    fn lower_controlled(
        &mut self,
        column: &Column,
        source: usize,
        offset: usize,
        control: WireId,
    ) -> CompileResult<()> {
        for (row, gate) in column.gates().filter(|(_, g)| is_payload(g)) {
            let target = row + offset;
            let Some(export) = gate.export.as_ref().filter(|_| gate.nested_circuit().is_none())
            else {
                return Err(unsupported(gate, source, target));
            };
            let op = match export.controlled {
                Some(op) if op.num_wires() == gate.height + 1 => op,
                _ => return Err(unsupported(gate, source, target)),
            };

            let col = self.next_column;
            let wires = std::iter::once(control)
                .chain((target..target + gate.height).map(WireId::from));
            self.emit(Instruction::new(op, col, wires).with_params(export.controlled_params.clone()));
        }
        Ok(())
    }

    fn lower_doubly_controlled(
        &mut self,
        column: &Column,
        source: usize,
        offset: usize,
        controls: [WireId; 2],
    ) -> CompileResult<()> {
        for (row, gate) in column.gates().filter(|(_, g)| is_payload(g)) {
            if !gate.is_plain_not() {
                return Err(CompileError::UnimplementedCircuit {
                    column: source,
                    reason: format!(
                        "only X may be doubly controlled, found '{}' on wire {}",
                        gate.title,
                        row + offset
                    ),
                });
            }
            let col = self.next_column;
            self.emit(Instruction::new(
                OpCode::Ccx,
                col,
                [controls[0], controls[1], WireId::from(row + offset)],
            ));
        }
        Ok(())
    }
}

/// Collect controls top to bottom. Parity controls have no lowering.
fn find_controls(
    column: &Column,
    source: usize,
    offset: usize,
) -> CompileResult<Vec<ColumnControl>> {
    let mut controls = vec![];
    for (row, gate) in column.gates().filter(|(_, g)| g.is_control()) {
        let wire = WireId::from(row + offset);
        match gate.control_bit() {
            Some(bit) => controls.push(ColumnControl { wire, anti: !bit }),
            None => {
                return Err(CompileError::UnimplementedCircuit {
                    column: source,
                    reason: format!("parity control '{}' on wire {wire} has no lowering", gate.id),
                });
            }
        }
    }
    Ok(controls)
}

fn is_payload(gate: &Gate) -> bool {
    !gate.is_swap_half() && !gate.has_no_effect()
}

fn unsupported(gate: &Gate, column: usize, wire: usize) -> CompileError {
    CompileError::UnsupportedGate {
        gate: if gate.title.is_empty() {
            gate.id.clone()
        } else {
            gate.title.clone()
        },
        column,
        wire,
    }
}
