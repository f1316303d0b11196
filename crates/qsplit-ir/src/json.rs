//! JSON circuit document format.
//!
//! The layout follows the circuit editor's URL format:
//!
//! ```json
//! {
//!   "cols": [["•", 1, "X"], ["~sub"]],
//!   "gates": [{"id": "~sub", "name": "Sub", "circuit": {"cols": [["H"]]}}],
//!   "wires": 3
//! }
//! ```
//!
//! `1` is an empty cell and strings are gate ids. Ids are resolved against
//! the document's `gates` list first and the built-in [`catalog`] second.
//! Custom gates are one of:
//!
//! - `circuit`: a nested sub-circuit,
//! - `matrix`: a row-major list of `[re, im]` pairs (height inferred),
//! - `export`: lowering metadata only,
//! - `nonlocal`: a cross-partition placeholder.
//!
//! `wires` is optional on input; without it the wire count is the tallest
//! column. It is always written on output so trailing empty wires survive.

use num_complex::Complex64;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::circuit::{CircuitDocument, Column};
use crate::error::{IrError, IrResult};
use crate::gate::{ExportOptions, Gate, GateRole, NonLocalGate};
use crate::matrix;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentJson {
    cols: Vec<Vec<CellJson>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    gates: Vec<GateJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wires: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CellJson {
    Empty(u8),
    Gate(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GateJson {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    circuit: Option<Box<DocumentJson>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matrix: Option<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    export: Option<ExportOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nonlocal: Option<NonLocalGate>,
}

/// Parse a document from JSON text.
pub fn from_json(text: &str) -> IrResult<CircuitDocument> {
    let raw: DocumentJson = serde_json::from_str(text)?;
    decode_document(&raw, &FxHashMap::default())
}

/// Serialize a document to compact JSON.
pub fn to_json(doc: &CircuitDocument) -> IrResult<String> {
    Ok(serde_json::to_string(&encode_document(doc)?)?)
}

/// Serialize a document to indented JSON.
pub fn to_json_pretty(doc: &CircuitDocument) -> IrResult<String> {
    Ok(serde_json::to_string_pretty(&encode_document(doc)?)?)
}

fn decode_document(
    raw: &DocumentJson,
    outer: &FxHashMap<String, Gate>,
) -> IrResult<CircuitDocument> {
    let mut defs = outer.clone();
    for def in &raw.gates {
        let gate = decode_gate(def, &defs)?;
        defs.insert(def.id.clone(), gate);
    }

    let mut columns = Vec::with_capacity(raw.cols.len());
    let mut tallest = 0;
    for cells in &raw.cols {
        let mut col = Vec::with_capacity(cells.len());
        for (row, cell) in cells.iter().enumerate() {
            let gate = match cell {
                CellJson::Empty(_) => None,
                CellJson::Gate(id) => {
                    let gate = resolve(id, &defs)?;
                    let bottom = gate.occupied_rows(row).into_iter().max().unwrap_or(row);
                    tallest = tallest.max(bottom + 1);
                    Some(gate)
                }
            };
            col.push(gate);
        }
        tallest = tallest.max(col.len());
        columns.push(col);
    }

    let num_wires = match raw.wires {
        Some(wires) if tallest > wires => {
            return Err(IrError::WireOutOfRange {
                wire: tallest - 1,
                num_wires: wires,
            });
        }
        Some(wires) => wires,
        None => tallest,
    };

    let columns = columns
        .into_iter()
        .map(|mut cells| {
            cells.resize(num_wires, None);
            Column::from_cells(cells)
        })
        .collect();
    CircuitDocument::from_columns(num_wires, columns)
}

fn resolve(id: &str, defs: &FxHashMap<String, Gate>) -> IrResult<Gate> {
    defs.get(id)
        .cloned()
        .or_else(|| catalog::lookup(id))
        .ok_or_else(|| IrError::UnknownGate(id.to_string()))
}

fn decode_gate(def: &GateJson, defs: &FxHashMap<String, Gate>) -> IrResult<Gate> {
    let title = def.name.clone().unwrap_or_else(|| def.id.clone());

    let mut gate = if let Some(nl) = &def.nonlocal {
        let mut gate = Gate::non_local(def.id.clone(), nl.clone());
        if def.name.is_some() {
            gate.title = title;
        }
        gate
    } else if let Some(circuit) = &def.circuit {
        let nested = decode_document(circuit, defs)?;
        let gate = Gate::nested(def.id.clone(), title, nested);
        match def.height {
            Some(h) if h >= gate.height => gate.with_height(h),
            _ => gate,
        }
    } else if let Some(entries) = &def.matrix {
        let dim = matrix::dimension_of(entries.len()).ok_or_else(|| IrError::InvalidMatrix {
            gate: def.id.clone(),
            reason: format!("{} entries is not a square power-of-two matrix", entries.len()),
        })?;
        let m: Vec<Complex64> = entries
            .iter()
            .map(|&[re, im]| Complex64::new(re, im))
            .collect();
        Gate::new(def.id.clone(), title)
            .with_height(dim.trailing_zeros() as usize)
            .with_matrix(m)
    } else if def.export.is_some() {
        Gate::new(def.id.clone(), title).with_height(def.height.unwrap_or(1))
    } else {
        return Err(IrError::InvalidDocument(format!(
            "custom gate '{}' defines none of circuit, matrix, export or nonlocal",
            def.id
        )));
    };

    if let Some(export) = &def.export {
        gate.export = Some(export.clone());
    }
    Ok(gate)
}

fn encode_document(doc: &CircuitDocument) -> IrResult<DocumentJson> {
    let mut gates = vec![];
    let mut defined = FxHashSet::default();
    let mut cols = Vec::with_capacity(doc.num_columns());

    for col in doc.columns() {
        let mut cells = Vec::with_capacity(col.len());
        for cell in col.cells() {
            let Some(gate) = cell else {
                cells.push(CellJson::Empty(1));
                continue;
            };
            let builtin = catalog::lookup(&gate.id).is_some_and(|b| &b == gate);
            if !builtin && defined.insert(gate.id.clone()) {
                gates.push(encode_gate(gate)?);
            }
            cells.push(CellJson::Gate(gate.id.clone()));
        }

        while matches!(cells.last(), Some(CellJson::Empty(_))) {
            cells.pop();
        }
        cols.push(cells);
    }

    Ok(DocumentJson {
        cols,
        gates,
        wires: Some(doc.num_wires()),
    })
}

fn encode_gate(gate: &Gate) -> IrResult<GateJson> {
    let mut def = GateJson {
        id: gate.id.clone(),
        name: Some(gate.title.clone()),
        symbol: None,
        height: None,
        circuit: None,
        matrix: None,
        export: gate.export.clone(),
        nonlocal: None,
    };

    match &gate.role {
        GateRole::NonLocal(nl) => {
            def.symbol = Some(nl.kind.placeholder_symbol().to_string());
            def.nonlocal = Some(nl.clone());
        }
        GateRole::Nested(circuit) => {
            def.circuit = Some(Box::new(encode_document(circuit)?));
            def.height = Some(gate.height);
        }
        GateRole::Unitary => {
            if let Some(m) = &gate.matrix {
                def.matrix = Some(m.iter().map(|c| [c.re, c.im]).collect());
            } else if gate.export.is_some() {
                def.height = Some(gate.height);
            } else {
                return Err(IrError::InvalidDocument(format!(
                    "custom gate '{}' has no matrix, export or circuit to serialize",
                    gate.id
                )));
            }
        }
        other => {
            return Err(IrError::InvalidDocument(format!(
                "custom gate '{}' with role {other:?} cannot be serialized",
                gate.id
            )));
        }
    }

    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{OpCode, TwoQubitKind};
    use crate::wire::WireId;

    #[test]
    fn test_parse_simple() {
        let doc = from_json(r#"{"cols":[["•",1,"X"],["H"]]}"#).unwrap();
        assert_eq!(doc.num_wires(), 3);
        assert_eq!(doc.num_columns(), 2);
        assert!(doc.columns()[0].get(0).unwrap().is_control());
        assert!(doc.columns()[0].get(1).is_none());
        assert_eq!(doc.columns()[1].get(0).unwrap().id, "H");
    }

    #[test]
    fn test_wires_field_pads_columns() {
        let doc = from_json(r#"{"cols":[["X"]],"wires":4}"#).unwrap();
        assert_eq!(doc.num_wires(), 4);
        assert_eq!(doc.columns()[0].len(), 4);
    }

    #[test]
    fn test_tall_gate_sets_wire_count() {
        let doc = from_json(r#"{"cols":[[1,"CNOT"]]}"#).unwrap();
        assert_eq!(doc.num_wires(), 3);
    }

    #[test]
    fn test_too_few_wires() {
        let err = from_json(r#"{"cols":[[1,1,"X"]],"wires":2}"#).unwrap_err();
        assert!(matches!(err, IrError::WireOutOfRange { wire: 2, num_wires: 2 }));
    }

    #[test]
    fn test_unknown_gate() {
        let err = from_json(r#"{"cols":[["Frobnicate"]]}"#).unwrap_err();
        assert!(matches!(err, IrError::UnknownGate(id) if id == "Frobnicate"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json("{"), Err(IrError::Json(_))));
    }

    #[test]
    fn test_nested_circuit() {
        let text = r#"{
            "cols": [[1, "~bell"]],
            "gates": [{"id": "~bell", "name": "Bell", "circuit": {"cols": [["H"], ["•", "X"]]}}]
        }"#;
        let doc = from_json(text).unwrap();
        assert_eq!(doc.num_wires(), 3);
        let gate = doc.columns()[0].get(1).unwrap();
        assert_eq!(gate.title, "Bell");
        assert_eq!(gate.height, 2);
        assert_eq!(gate.nested_circuit().unwrap().num_columns(), 2);
    }

    #[test]
    fn test_matrix_gate() {
        let text = r#"{
            "cols": [["~flip"]],
            "gates": [{"id": "~flip", "matrix": [[0,0],[1,0],[1,0],[0,0]]}]
        }"#;
        let doc = from_json(text).unwrap();
        let gate = doc.columns()[0].get(0).unwrap();
        assert_eq!(gate.height, 1);
        assert!(matrix::approx_eq(gate.matrix.as_ref().unwrap(), &matrix::pauli_x()));
    }

    #[test]
    fn test_bad_matrix_size() {
        let text = r#"{"cols":[["~m"]],"gates":[{"id":"~m","matrix":[[1,0],[0,0],[0,0]]}]}"#;
        assert!(matches!(
            from_json(text).unwrap_err(),
            IrError::InvalidMatrix { .. }
        ));
    }

    #[test]
    fn test_export_gate() {
        let text = r#"{
            "cols": [["~rz"]],
            "gates": [{"id": "~rz", "name": "Rz", "export": {"uncontrolled": "rz", "controlled": "crz", "params": [0.5], "controlled_params": [0.5]}}]
        }"#;
        let doc = from_json(text).unwrap();
        let export = doc.columns()[0].get(0).unwrap().export.as_ref().unwrap();
        assert_eq!(export.uncontrolled, OpCode::Rz);
        assert_eq!(export.controlled, Some(OpCode::Crz));
        assert_eq!(export.params, vec![0.5]);
    }

    #[test]
    fn test_empty_custom_gate_rejected() {
        let text = r#"{"cols":[["~e"]],"gates":[{"id":"~e"}]}"#;
        assert!(matches!(
            from_json(text).unwrap_err(),
            IrError::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_round_trip_with_placeholder() {
        let mut doc = CircuitDocument::new(6);
        doc.place(0, 0, catalog::h()).unwrap();
        doc.place(
            1,
            0,
            Gate::non_local(
                "~nlcx_1_0",
                NonLocalGate {
                    kind: TwoQubitKind::ControlledX,
                    source: WireId(0),
                    target: WireId(2),
                    link: [WireId(4), WireId(5)],
                },
            ),
        )
        .unwrap();
        doc.place(2, 1, catalog::cz()).unwrap();

        let text = to_json(&doc).unwrap();
        assert!(text.contains("\"wires\":6"));
        assert!(text.contains("NL-CNOT(0→2)"));
        let back = from_json(&text).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_round_trip_nested_and_pretty() {
        let mut inner = CircuitDocument::new(2);
        inner.place(0, 0, catalog::control()).unwrap();
        inner.place(0, 1, catalog::x()).unwrap();

        let mut doc = CircuitDocument::new(3);
        doc.place(0, 1, Gate::nested("~sub", "Sub", inner)).unwrap();

        let text = to_json_pretty(&doc).unwrap();
        assert_eq!(from_json(&text).unwrap(), doc);
    }
}
