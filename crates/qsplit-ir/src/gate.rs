//! Gate cells and their export metadata.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::circuit::CircuitDocument;
use crate::matrix;
use crate::wire::WireId;

/// Dialect-neutral operation tokens.
///
/// These are the only operations lowering can produce. Each emitter maps
/// them to its own syntax or rejects the ones it cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpCode {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S gate (quarter turn about Z).
    S,
    /// S-dagger.
    Sdg,
    /// T gate (eighth turn about Z).
    T,
    /// T-dagger.
    Tdg,
    /// Square root of X.
    Sx,
    /// Inverse square root of X.
    Sxdg,
    /// X rotation, one angle.
    Rx,
    /// Y rotation, one angle.
    Ry,
    /// Z rotation, one angle.
    Rz,
    /// Phase gate, one angle.
    Phase,
    /// Controlled X.
    Cx,
    /// Controlled Y.
    Cy,
    /// Controlled Z.
    Cz,
    /// Controlled Hadamard.
    Ch,
    /// Controlled S.
    Cs,
    /// Controlled S-dagger.
    Csdg,
    /// Controlled T.
    Ct,
    /// Controlled T-dagger.
    Ctdg,
    /// Controlled square root of X.
    Csx,
    /// Controlled X rotation.
    Crx,
    /// Controlled Y rotation.
    Cry,
    /// Controlled Z rotation.
    Crz,
    /// Controlled phase.
    Cphase,
    /// Toffoli.
    Ccx,
    /// Swap.
    Swap,
    /// Fredkin (controlled swap).
    Cswap,
}

impl OpCode {
    /// Every op code, in declaration order.
    pub const ALL: [OpCode; 30] = [
        OpCode::X,
        OpCode::Y,
        OpCode::Z,
        OpCode::H,
        OpCode::S,
        OpCode::Sdg,
        OpCode::T,
        OpCode::Tdg,
        OpCode::Sx,
        OpCode::Sxdg,
        OpCode::Rx,
        OpCode::Ry,
        OpCode::Rz,
        OpCode::Phase,
        OpCode::Cx,
        OpCode::Cy,
        OpCode::Cz,
        OpCode::Ch,
        OpCode::Cs,
        OpCode::Csdg,
        OpCode::Ct,
        OpCode::Ctdg,
        OpCode::Csx,
        OpCode::Crx,
        OpCode::Cry,
        OpCode::Crz,
        OpCode::Cphase,
        OpCode::Ccx,
        OpCode::Swap,
        OpCode::Cswap,
    ];

    /// Lowercase token name.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::X => "x",
            OpCode::Y => "y",
            OpCode::Z => "z",
            OpCode::H => "h",
            OpCode::S => "s",
            OpCode::Sdg => "sdg",
            OpCode::T => "t",
            OpCode::Tdg => "tdg",
            OpCode::Sx => "sx",
            OpCode::Sxdg => "sxdg",
            OpCode::Rx => "rx",
            OpCode::Ry => "ry",
            OpCode::Rz => "rz",
            OpCode::Phase => "phase",
            OpCode::Cx => "cx",
            OpCode::Cy => "cy",
            OpCode::Cz => "cz",
            OpCode::Ch => "ch",
            OpCode::Cs => "cs",
            OpCode::Csdg => "csdg",
            OpCode::Ct => "ct",
            OpCode::Ctdg => "ctdg",
            OpCode::Csx => "csx",
            OpCode::Crx => "crx",
            OpCode::Cry => "cry",
            OpCode::Crz => "crz",
            OpCode::Cphase => "cphase",
            OpCode::Ccx => "ccx",
            OpCode::Swap => "swap",
            OpCode::Cswap => "cswap",
        }
    }

    /// Look up an op code by its token name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Number of wires the operation acts on.
    pub fn num_wires(self) -> usize {
        match self {
            OpCode::Ccx | OpCode::Cswap => 3,
            OpCode::Cx
            | OpCode::Cy
            | OpCode::Cz
            | OpCode::Ch
            | OpCode::Cs
            | OpCode::Csdg
            | OpCode::Ct
            | OpCode::Ctdg
            | OpCode::Csx
            | OpCode::Crx
            | OpCode::Cry
            | OpCode::Crz
            | OpCode::Cphase
            | OpCode::Swap => 2,
            _ => 1,
        }
    }

    /// Number of angle parameters the operation takes.
    pub fn num_params(self) -> usize {
        match self {
            OpCode::Rx
            | OpCode::Ry
            | OpCode::Rz
            | OpCode::Phase
            | OpCode::Crx
            | OpCode::Cry
            | OpCode::Crz
            | OpCode::Cphase => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis of a parity control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliAxis {
    /// X parity.
    X,
    /// Y parity.
    Y,
    /// Z parity.
    Z,
}

/// Recognized two-qubit entangling primitives.
///
/// Attached to gate metadata so that shape detection never depends on a
/// gate's title or symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TwoQubitKind {
    /// CNOT: X on the second wire conditioned on the first.
    #[serde(rename = "cx")]
    ControlledX,
    /// CZ: symmetric controlled phase flip.
    #[serde(rename = "cz")]
    ControlledZ,
}

impl TwoQubitKind {
    /// The 4x4 unitary of this primitive.
    pub fn matrix(self) -> Vec<Complex64> {
        match self {
            TwoQubitKind::ControlledX => matrix::cnot(),
            TwoQubitKind::ControlledZ => matrix::cz(),
        }
    }

    /// The op code this primitive lowers to.
    pub fn op(self) -> OpCode {
        match self {
            TwoQubitKind::ControlledX => OpCode::Cx,
            TwoQubitKind::ControlledZ => OpCode::Cz,
        }
    }

    /// Prefix of generated placeholder ids.
    pub fn placeholder_prefix(self) -> &'static str {
        match self {
            TwoQubitKind::ControlledX => "~nlcx_",
            TwoQubitKind::ControlledZ => "~nlcz_",
        }
    }

    /// Display symbol of a placeholder for this primitive.
    pub fn placeholder_symbol(self) -> &'static str {
        match self {
            TwoQubitKind::ControlledX => "NL•X",
            TwoQubitKind::ControlledZ => "NL•Z",
        }
    }

    /// Title of a placeholder between `source` and `target`.
    pub fn placeholder_title(self, source: WireId, target: WireId) -> String {
        match self {
            TwoQubitKind::ControlledX => format!("NL-CNOT({}→{})", source.0, target.0),
            TwoQubitKind::ControlledZ => format!("NL-CZ({},{})", source.0, target.0),
        }
    }
}

/// Payload of a non-local placeholder gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonLocalGate {
    /// Which primitive the placeholder stands for.
    pub kind: TwoQubitKind,
    /// Control wire (for CZ, the upper wire).
    pub source: WireId,
    /// Target wire.
    pub target: WireId,
    /// The ancilla pair reserved for the two partitions involved.
    pub link: [WireId; 2],
}

impl NonLocalGate {
    /// Lowest and highest wire touched.
    pub fn span(&self) -> (WireId, WireId) {
        (self.source.min(self.target), self.source.max(self.target))
    }
}

/// What a cell means to its column.
#[derive(Debug, Clone, PartialEq)]
pub enum GateRole {
    /// A plain unitary payload.
    Unitary,
    /// Conditions the column on this wire being ON.
    Control,
    /// Conditions the column on this wire being OFF.
    AntiControl,
    /// Conditions the column on the parity of this wire along an axis.
    ParityControl(PauliAxis),
    /// One end of a swap. Exactly two per column pair up.
    SwapHalf,
    /// A reference to a sub-circuit spanning `height` wires.
    Nested(Arc<CircuitDocument>),
    /// A cross-partition placeholder produced by distribution.
    NonLocal(NonLocalGate),
}

/// How a gate is exported by lowering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Token emitted when the column has no controls.
    pub uncontrolled: OpCode,
    /// Token emitted under a single control, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlled: Option<OpCode>,
    /// Angles for the uncontrolled token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Angles for the controlled token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controlled_params: Vec<f64>,
}

impl ExportOptions {
    /// Export options with an uncontrolled and an optional controlled token.
    pub fn new(uncontrolled: OpCode, controlled: Option<OpCode>) -> Self {
        Self {
            uncontrolled,
            controlled,
            params: vec![],
            controlled_params: vec![],
        }
    }

    /// Use the same angles for both tokens.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.controlled_params.clone_from(&params);
        self.params = params;
        self
    }

    /// Override the angles used by the controlled token.
    #[must_use]
    pub fn with_controlled_params(mut self, params: Vec<f64>) -> Self {
        self.controlled_params = params;
        self
    }
}

/// A gate cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    /// Stable serialized identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Meaning of the cell within its column.
    pub role: GateRole,
    /// Number of consecutive rows occupied.
    pub height: usize,
    /// Lowering metadata.
    pub export: Option<ExportOptions>,
    /// Unitary of the gate, row-major.
    pub matrix: Option<Vec<Complex64>>,
    /// Structural tag for recognized two-qubit primitives.
    pub two_qubit_kind: Option<TwoQubitKind>,
    no_effect: bool,
}

impl Gate {
    /// Create a one-row unitary gate with no metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            role: GateRole::Unitary,
            height: 1,
            export: None,
            matrix: None,
            two_qubit_kind: None,
            no_effect: false,
        }
    }

    /// A nested sub-circuit gate spanning the sub-circuit's wires.
    pub fn nested(id: impl Into<String>, title: impl Into<String>, circuit: CircuitDocument) -> Self {
        let height = circuit.num_wires().max(1);
        Self::new(id, title)
            .with_role(GateRole::Nested(Arc::new(circuit)))
            .with_height(height)
    }

    /// A non-local placeholder carrying the primitive's matrix.
    pub fn non_local(id: impl Into<String>, payload: NonLocalGate) -> Self {
        let title = payload.kind.placeholder_title(payload.source, payload.target);
        let matrix = payload.kind.matrix();
        Self::new(id, title)
            .with_role(GateRole::NonLocal(payload))
            .with_height(2)
            .with_matrix(matrix)
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: GateRole) -> Self {
        self.role = role;
        self
    }

    /// Set the height.
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height.max(1);
        self
    }

    /// Attach export metadata.
    #[must_use]
    pub fn with_export(mut self, export: ExportOptions) -> Self {
        self.export = Some(export);
        self
    }

    /// Attach a unitary.
    #[must_use]
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Tag as a recognized two-qubit primitive.
    #[must_use]
    pub fn with_two_qubit_kind(mut self, kind: TwoQubitKind) -> Self {
        self.two_qubit_kind = Some(kind);
        self
    }

    /// Promise that the cell never changes the state on its own.
    #[must_use]
    pub fn with_no_effect(mut self) -> Self {
        self.no_effect = true;
        self
    }

    /// Controls, anti-controls and parity controls.
    pub fn is_control(&self) -> bool {
        matches!(
            self.role,
            GateRole::Control | GateRole::AntiControl | GateRole::ParityControl(_)
        )
    }

    /// The bit value a control cell conditions on, `None` for non-controls
    /// and parity controls.
    pub fn control_bit(&self) -> Option<bool> {
        match self.role {
            GateRole::Control => Some(true),
            GateRole::AntiControl => Some(false),
            _ => None,
        }
    }

    /// Whether this is one end of a swap.
    pub fn is_swap_half(&self) -> bool {
        matches!(self.role, GateRole::SwapHalf)
    }

    /// The sub-circuit of a nested gate.
    pub fn nested_circuit(&self) -> Option<&CircuitDocument> {
        match &self.role {
            GateRole::Nested(doc) => Some(doc.as_ref()),
            _ => None,
        }
    }

    /// The payload of a non-local placeholder.
    pub fn non_local_payload(&self) -> Option<&NonLocalGate> {
        match &self.role {
            GateRole::NonLocal(nl) => Some(nl),
            _ => None,
        }
    }

    /// Cells that definitely leave the state alone: controls and spacers.
    pub fn has_no_effect(&self) -> bool {
        self.no_effect || self.is_control()
    }

    /// A plain one-row gate exporting to the given parameterless token.
    fn is_plain(&self, op: OpCode) -> bool {
        matches!(self.role, GateRole::Unitary)
            && self.height == 1
            && self
                .export
                .as_ref()
                .is_some_and(|e| e.uncontrolled == op && e.params.is_empty())
    }

    /// The NOT gate.
    pub fn is_plain_not(&self) -> bool {
        self.is_plain(OpCode::X)
    }

    /// The Pauli-Z gate.
    pub fn is_plain_z(&self) -> bool {
        self.is_plain(OpCode::Z)
    }

    /// Rows occupied when the gate's top cell sits at `row`.
    ///
    /// Placeholders occupy exactly their two endpoints, which need not be
    /// adjacent. Every other gate occupies `row..row + height`.
    pub fn occupied_rows(&self, row: usize) -> Vec<usize> {
        match &self.role {
            GateRole::NonLocal(nl) => {
                let (lo, hi) = nl.span();
                vec![lo.index(), hi.index()]
            }
            _ => (row..row + self.height).collect(),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            f.write_str(&self.id)
        } else {
            write!(f, "{} ({})", self.title, self.id)
        }
    }
}
