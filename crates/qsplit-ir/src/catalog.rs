//! Built-in gates, keyed by serialized id.
//!
//! | Id | Role | Uncontrolled | Controlled |
//! |----|------|--------------|------------|
//! | `•`, `◦` | control, anti-control | | |
//! | `xpar`, `ypar`, `zpar` | parity control | | |
//! | `Swap` | swap half | `swap` | `cswap` |
//! | `…` | spacer | | |
//! | `X`, `Y`, `Z`, `H` | unitary | `x`, `y`, `z`, `h` | `cx`, `cy`, `cz`, `ch` |
//! | `Z^½`, `Z^-½`, `Z^¼`, `Z^-¼` | unitary | `s`, `sdg`, `t`, `tdg` | `cs`, `csdg`, `ct`, `ctdg` |
//! | `X^½`, `X^-½` | unitary | `sx`, `sxdg` | `csx`, `crx(-π/2)` |
//! | `X^±¼`, `Y^±½`, `Y^±¼` | unitary | `rx`/`ry` | `crx`/`cry` |
//! | `CNOT`, `CZ` | two-wire unitary | `cx`, `cz` | |

use rustc_hash::FxHashMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::LazyLock;

use crate::gate::{ExportOptions, Gate, GateRole, OpCode, PauliAxis, TwoQubitKind};
use crate::matrix;

static CATALOG: LazyLock<FxHashMap<&'static str, Gate>> = LazyLock::new(build_catalog);

/// Look up a built-in gate by serialized id.
pub fn lookup(id: &str) -> Option<Gate> {
    CATALOG.get(id).cloned()
}

/// Whether `id` names a built-in gate.
pub fn contains(id: &str) -> bool {
    CATALOG.contains_key(id)
}

/// All built-in ids, sorted.
pub fn ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = CATALOG.keys().copied().collect();
    ids.sort_unstable();
    ids
}

fn builtin(id: &str) -> Gate {
    lookup(id).unwrap_or_else(|| panic!("built-in gate '{id}' missing from catalog"))
}

/// `•`
pub fn control() -> Gate {
    builtin("•")
}

/// `◦`
pub fn anti_control() -> Gate {
    builtin("◦")
}

/// `Swap`
pub fn swap_half() -> Gate {
    builtin("Swap")
}

/// `…`
pub fn spacer() -> Gate {
    builtin("…")
}

/// `X`
pub fn x() -> Gate {
    builtin("X")
}

/// `Y`
pub fn y() -> Gate {
    builtin("Y")
}

/// `Z`
pub fn z() -> Gate {
    builtin("Z")
}

/// `H`
pub fn h() -> Gate {
    builtin("H")
}

/// Two-wire `CNOT`, control on top.
pub fn cnot() -> Gate {
    builtin("CNOT")
}

/// Two-wire `CZ`.
pub fn cz() -> Gate {
    builtin("CZ")
}

fn unitary(
    id: &str,
    title: &str,
    uncontrolled: OpCode,
    controlled: OpCode,
    m: Vec<num_complex::Complex64>,
) -> Gate {
    Gate::new(id, title)
        .with_export(ExportOptions::new(uncontrolled, Some(controlled)))
        .with_matrix(m)
}

fn rotation(id: &str, title: &str, axis: PauliAxis, theta: f64) -> Gate {
    let (op, cop, m) = match axis {
        PauliAxis::X => (OpCode::Rx, OpCode::Crx, matrix::rx(theta)),
        PauliAxis::Y => (OpCode::Ry, OpCode::Cry, matrix::ry(theta)),
        PauliAxis::Z => (OpCode::Rz, OpCode::Crz, matrix::phase(theta)),
    };
    Gate::new(id, title)
        .with_export(ExportOptions::new(op, Some(cop)).with_params(vec![theta]))
        .with_matrix(m)
}

fn build_catalog() -> FxHashMap<&'static str, Gate> {
    let gates = [
        // Controls
        (
            "•",
            Gate::new("•", "Control").with_role(GateRole::Control),
        ),
        (
            "◦",
            Gate::new("◦", "Anti-Control").with_role(GateRole::AntiControl),
        ),
        (
            "xpar",
            Gate::new("xpar", "Parity Control (X)")
                .with_role(GateRole::ParityControl(PauliAxis::X)),
        ),
        (
            "ypar",
            Gate::new("ypar", "Parity Control (Y)")
                .with_role(GateRole::ParityControl(PauliAxis::Y)),
        ),
        (
            "zpar",
            Gate::new("zpar", "Parity Control (Z)")
                .with_role(GateRole::ParityControl(PauliAxis::Z)),
        ),
        // Structure
        (
            "Swap",
            Gate::new("Swap", "Swap Gate [Half]")
                .with_role(GateRole::SwapHalf)
                .with_export(ExportOptions::new(OpCode::Swap, Some(OpCode::Cswap))),
        ),
        ("…", Gate::new("…", "Spacer").with_no_effect()),
        // Half turns
        ("X", unitary("X", "Pauli X Gate", OpCode::X, OpCode::Cx, matrix::pauli_x())),
        ("Y", unitary("Y", "Pauli Y Gate", OpCode::Y, OpCode::Cy, matrix::pauli_y())),
        ("Z", unitary("Z", "Pauli Z Gate", OpCode::Z, OpCode::Cz, matrix::pauli_z())),
        ("H", unitary("H", "Hadamard Gate", OpCode::H, OpCode::Ch, matrix::hadamard())),
        // Z quarter and eighth turns
        (
            "Z^½",
            unitary("Z^½", "√Z Gate", OpCode::S, OpCode::Cs, matrix::phase(FRAC_PI_2)),
        ),
        (
            "Z^-½",
            unitary("Z^-½", "Z^-½ Gate", OpCode::Sdg, OpCode::Csdg, matrix::phase(-FRAC_PI_2)),
        ),
        (
            "Z^¼",
            unitary("Z^¼", "Z^¼ Gate", OpCode::T, OpCode::Ct, matrix::phase(FRAC_PI_4)),
        ),
        (
            "Z^-¼",
            unitary("Z^-¼", "Z^-¼ Gate", OpCode::Tdg, OpCode::Ctdg, matrix::phase(-FRAC_PI_4)),
        ),
        // X quarter turns
        (
            "X^½",
            unitary("X^½", "√X Gate", OpCode::Sx, OpCode::Csx, matrix::sqrt_x(false)),
        ),
        (
            "X^-½",
            Gate::new("X^-½", "X^-½ Gate")
                .with_export(
                    ExportOptions::new(OpCode::Sxdg, Some(OpCode::Crx))
                        .with_controlled_params(vec![-FRAC_PI_2]),
                )
                .with_matrix(matrix::sqrt_x(true)),
        ),
        // Rotations
        ("X^¼", rotation("X^¼", "X^¼ Gate", PauliAxis::X, FRAC_PI_4)),
        ("X^-¼", rotation("X^-¼", "X^-¼ Gate", PauliAxis::X, -FRAC_PI_4)),
        ("Y^½", rotation("Y^½", "√Y Gate", PauliAxis::Y, FRAC_PI_2)),
        ("Y^-½", rotation("Y^-½", "Y^-½ Gate", PauliAxis::Y, -FRAC_PI_2)),
        ("Y^¼", rotation("Y^¼", "Y^¼ Gate", PauliAxis::Y, FRAC_PI_4)),
        ("Y^-¼", rotation("Y^-¼", "Y^-¼ Gate", PauliAxis::Y, -FRAC_PI_4)),
        // Two-wire primitives
        (
            "CNOT",
            Gate::new("CNOT", "Controlled-NOT")
                .with_height(2)
                .with_export(ExportOptions::new(OpCode::Cx, None))
                .with_matrix(matrix::cnot())
                .with_two_qubit_kind(TwoQubitKind::ControlledX),
        ),
        (
            "CZ",
            Gate::new("CZ", "Controlled-Z")
                .with_height(2)
                .with_export(ExportOptions::new(OpCode::Cz, None))
                .with_matrix(matrix::cz())
                .with_two_qubit_kind(TwoQubitKind::ControlledZ),
        ),
    ];

    gates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let x = lookup("X").unwrap();
        assert_eq!(x.export.as_ref().unwrap().uncontrolled, OpCode::X);
        assert_eq!(x.export.as_ref().unwrap().controlled, Some(OpCode::Cx));
        assert!(lookup("not-a-gate").is_none());
    }

    #[test]
    fn test_ids_sorted_and_complete() {
        let ids = ids();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for id in ["•", "◦", "Swap", "…", "X", "CNOT", "CZ", "Y^-¼"] {
            assert!(contains(id), "missing {id}");
        }
    }

    #[test]
    fn test_catalog_matrices_are_unitary() {
        for id in ids() {
            let gate = lookup(id).unwrap();
            if let Some(m) = &gate.matrix {
                let dim = 1 << gate.height;
                assert!(matrix::is_unitary(m, dim), "{id} is not unitary");
            }
        }
    }

    #[test]
    fn test_two_qubit_tags() {
        assert_eq!(cnot().two_qubit_kind, Some(TwoQubitKind::ControlledX));
        assert_eq!(cz().two_qubit_kind, Some(TwoQubitKind::ControlledZ));
        assert_eq!(cnot().height, 2);
        assert!(x().two_qubit_kind.is_none());
    }

    #[test]
    fn test_inverse_sqrt_x_controlled_params() {
        let e = lookup("X^-½").unwrap().export.unwrap();
        assert_eq!(e.uncontrolled, OpCode::Sxdg);
        assert!(e.params.is_empty());
        assert_eq!(e.controlled_params, vec![-FRAC_PI_2]);
    }
}
