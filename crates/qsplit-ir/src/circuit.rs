//! Column-based circuit documents.

use std::ops::Range;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::matrix;

/// One time slice of a document: a slot per wire.
///
/// Only the top cell of a tall gate is stored. The rows it covers below are
/// left empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    cells: Vec<Option<Gate>>,
}

impl Column {
    /// An empty column for `num_wires` wires.
    pub fn new(num_wires: usize) -> Self {
        Self {
            cells: vec![None; num_wires],
        }
    }

    /// A column from explicit cells.
    pub fn from_cells(cells: Vec<Option<Gate>>) -> Self {
        Self { cells }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no slots.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The gate whose top cell sits at `row`.
    pub fn get(&self, row: usize) -> Option<&Gate> {
        self.cells.get(row).and_then(Option::as_ref)
    }

    /// All slots.
    pub fn cells(&self) -> &[Option<Gate>] {
        &self.cells
    }

    /// Occupied slots as `(row, gate)`, top to bottom.
    pub fn gates(&self) -> impl Iterator<Item = (usize, &Gate)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| cell.as_ref().map(|g| (row, g)))
    }

    /// Whether no slot holds a gate.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// The row whose gate occupies `row`, if any.
    fn owner_of(&self, row: usize) -> Option<usize> {
        self.gates()
            .find(|(top, g)| g.occupied_rows(*top).contains(&row))
            .map(|(top, _)| top)
    }
}

/// A gate together with its position.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// Column index.
    pub column: usize,
    /// Row of the gate's top cell.
    pub row: usize,
    /// The gate.
    pub gate: &'a Gate,
}

/// A circuit document: a wire count and an ordered list of columns.
///
/// Every column has exactly `num_wires` slots and no two gates in one
/// column occupy the same row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircuitDocument {
    num_wires: usize,
    columns: Vec<Column>,
}

impl CircuitDocument {
    /// An empty document with `num_wires` wires and no columns.
    pub fn new(num_wires: usize) -> Self {
        Self {
            num_wires,
            columns: vec![],
        }
    }

    /// Build a document from columns, validating the result.
    pub fn from_columns(num_wires: usize, columns: Vec<Column>) -> IrResult<Self> {
        let doc = Self { num_wires, columns };
        doc.validate()?;
        Ok(doc)
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// A single column.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Append an empty column and return its index.
    pub fn push_column(&mut self) -> usize {
        self.columns.push(Column::new(self.num_wires));
        self.columns.len() - 1
    }

    /// Place `gate` with its top cell at (`column`, `row`).
    ///
    /// Columns are created as needed. Fails if the gate leaves the document
    /// or overlaps a gate already in the column.
    pub fn place(&mut self, column: usize, row: usize, gate: Gate) -> IrResult<&mut Self> {
        let rows = gate.occupied_rows(row);
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.num_wires) {
            return Err(IrError::WireOutOfRange {
                wire: bad,
                num_wires: self.num_wires,
            });
        }
        if !rows.contains(&row) {
            return Err(IrError::InvalidDocument(format!(
                "gate '{}' must be placed at row {}, not {row}",
                gate.id, rows[0]
            )));
        }

        if let Some(col) = self.columns.get(column) {
            if let Some(&taken) = rows.iter().find(|&&r| col.owner_of(r).is_some()) {
                return Err(IrError::OverlappingGate {
                    gate: gate.id,
                    column,
                    row: taken,
                });
            }
        }

        while self.columns.len() <= column {
            self.push_column();
        }
        self.columns[column].cells[row] = Some(gate);
        Ok(self)
    }

    /// Remove and return the gate whose top cell is at (`column`, `row`).
    pub fn clear(&mut self, column: usize, row: usize) -> Option<Gate> {
        self.columns
            .get_mut(column)
            .and_then(|col| col.cells.get_mut(row))
            .and_then(Option::take)
    }

    /// Append `count` empty wires to every column and return their indices.
    pub fn append_wires(&mut self, count: usize) -> Range<usize> {
        let start = self.num_wires;
        self.num_wires += count;
        for col in &mut self.columns {
            col.cells.resize(self.num_wires, None);
        }
        start..self.num_wires
    }

    /// Every gate in column order, top to bottom within a column.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> + '_ {
        self.columns.iter().enumerate().flat_map(|(column, col)| {
            col.gates().map(move |(row, gate)| Placement { column, row, gate })
        })
    }

    /// Number of gates, controls included.
    pub fn num_gates(&self) -> usize {
        self.placements().count()
    }

    /// Check column lengths, gate bounds, overlaps and custom matrices.
    ///
    /// Nested sub-circuits are validated recursively.
    pub fn validate(&self) -> IrResult<()> {
        for (index, col) in self.columns.iter().enumerate() {
            if col.len() != self.num_wires {
                return Err(IrError::ColumnLengthMismatch {
                    column: index,
                    expected: self.num_wires,
                    got: col.len(),
                });
            }

            let mut owner = vec![false; self.num_wires];
            for (row, gate) in col.gates() {
                let rows = gate.occupied_rows(row);
                if !rows.contains(&row) {
                    return Err(IrError::InvalidDocument(format!(
                        "gate '{}' at column {index} is stored at row {row} outside its span",
                        gate.id
                    )));
                }
                for r in rows {
                    if r >= self.num_wires {
                        return Err(IrError::WireOutOfRange {
                            wire: r,
                            num_wires: self.num_wires,
                        });
                    }
                    if owner[r] {
                        return Err(IrError::OverlappingGate {
                            gate: gate.id.clone(),
                            column: index,
                            row: r,
                        });
                    }
                    owner[r] = true;
                }

                validate_gate(gate)?;
            }
        }
        Ok(())
    }
}

fn validate_gate(gate: &Gate) -> IrResult<()> {
    if let Some(m) = &gate.matrix {
        let dim = 1usize << gate.height;
        if m.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                gate: gate.id.clone(),
                reason: format!(
                    "expected {dim}x{dim} entries for height {}, got {}",
                    gate.height,
                    m.len()
                ),
            });
        }
        if !matrix::is_unitary(m, dim) {
            return Err(IrError::InvalidMatrix {
                gate: gate.id.clone(),
                reason: "matrix is not unitary".into(),
            });
        }
    }

    if let Some(nested) = gate.nested_circuit() {
        if nested.num_wires() > gate.height {
            return Err(IrError::InvalidDocument(format!(
                "nested gate '{}' has height {} but its circuit uses {} wires",
                gate.id,
                gate.height,
                nested.num_wires()
            )));
        }
        nested.validate()?;
    }

    Ok(())
}
