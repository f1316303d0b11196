//! Unitary matrices attached to gates.
//!
//! Matrices are square, row-major `Vec<Complex64>`. For multi-wire gates the
//! top wire of the gate is the most significant bit of the basis index, so the
//! CNOT matrix below has its control on the first wire.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// The `dim × dim` identity matrix.
pub fn identity(dim: usize) -> Vec<Complex64> {
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        m[i * dim + i] = ONE;
    }
    m
}

/// Pauli-X.
pub fn pauli_x() -> Vec<Complex64> {
    vec![ZERO, ONE, ONE, ZERO]
}

/// Pauli-Y.
pub fn pauli_y() -> Vec<Complex64> {
    vec![ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO]
}

/// Pauli-Z.
pub fn pauli_z() -> Vec<Complex64> {
    vec![ONE, ZERO, ZERO, Complex64::new(-1.0, 0.0)]
}

/// Hadamard.
pub fn hadamard() -> Vec<Complex64> {
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    vec![s, s, s, -s]
}

/// Phase gate `diag(1, e^{iθ})`.
pub fn phase(theta: f64) -> Vec<Complex64> {
    vec![ONE, ZERO, ZERO, Complex64::from_polar(1.0, theta)]
}

/// Rotation about X by `theta`.
pub fn rx(theta: f64) -> Vec<Complex64> {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    vec![c, s, s, c]
}

/// Rotation about Y by `theta`.
pub fn ry(theta: f64) -> Vec<Complex64> {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    vec![c, -s, s, c]
}

/// Square root of X, or its inverse when `inverse` is set.
pub fn sqrt_x(inverse: bool) -> Vec<Complex64> {
    let (p, m) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
    if inverse {
        vec![m, p, p, m]
    } else {
        vec![p, m, m, p]
    }
}

/// Lift a 2x2 matrix to the 4x4 matrix controlled by the first wire.
pub fn controlled(u: &[Complex64]) -> Vec<Complex64> {
    debug_assert_eq!(u.len(), 4, "controlled() expects a 2x2 matrix");
    let mut m = identity(4);
    m[2 * 4 + 2] = u[0];
    m[2 * 4 + 3] = u[1];
    m[3 * 4 + 2] = u[2];
    m[3 * 4 + 3] = u[3];
    m
}

/// Controlled-NOT with the control on the first wire.
pub fn cnot() -> Vec<Complex64> {
    controlled(&pauli_x())
}

/// Controlled-Z.
pub fn cz() -> Vec<Complex64> {
    controlled(&pauli_z())
}

/// The two-wire swap.
pub fn swap() -> Vec<Complex64> {
    let mut m = vec![ZERO; 16];
    m[0] = ONE;
    m[4 + 2] = ONE;
    m[2 * 4 + 1] = ONE;
    m[3 * 4 + 3] = ONE;
    m
}

/// Side length of a square matrix with `len` entries, if it is a power of two.
pub fn dimension_of(len: usize) -> Option<usize> {
    let dim = (len as f64).sqrt().round() as usize;
    (dim * dim == len && dim.is_power_of_two()).then_some(dim)
}

/// Entry-wise comparison within [`EPSILON`].
pub fn approx_eq(a: &[Complex64], b: &[Complex64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).norm() < EPSILON)
}

/// Check `U · U† = I` for a `dim × dim` matrix.
pub fn is_unitary(m: &[Complex64], dim: usize) -> bool {
    if m.len() != dim * dim {
        return false;
    }
    for i in 0..dim {
        for j in 0..dim {
            let mut acc = ZERO;
            for k in 0..dim {
                acc += m[i * dim + k] * m[j * dim + k].conj();
            }
            let expected = if i == j { ONE } else { ZERO };
            if (acc - expected).norm() > 1e-8 {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_cnot_layout() {
        let m = cnot();
        // |10> -> |11>
        assert_eq!(m[2 * 4 + 3], ONE);
        assert_eq!(m[3 * 4 + 2], ONE);
        assert_eq!(m[2 * 4 + 2], ZERO);
        assert_eq!(m[0], ONE);
        assert_eq!(m[4 + 1], ONE);
    }

    #[test]
    fn test_cz_is_diagonal() {
        let m = cz();
        assert_eq!(m[15], Complex64::new(-1.0, 0.0));
        assert!(approx_eq(&m[..15], &identity(4)[..15]));
    }

    #[test]
    fn test_standard_matrices_are_unitary() {
        for (m, dim) in [
            (pauli_x(), 2),
            (pauli_y(), 2),
            (pauli_z(), 2),
            (hadamard(), 2),
            (phase(PI / 4.0), 2),
            (rx(0.3), 2),
            (ry(-1.1), 2),
            (sqrt_x(false), 2),
            (sqrt_x(true), 2),
            (cnot(), 4),
            (cz(), 4),
            (swap(), 4),
        ] {
            assert!(is_unitary(&m, dim));
        }
    }

    #[test]
    fn test_not_unitary() {
        let m = vec![ONE, ONE, ZERO, ONE];
        assert!(!is_unitary(&m, 2));
        assert!(!is_unitary(&m, 4));
    }

    #[test]
    fn test_dimension_of() {
        assert_eq!(dimension_of(4), Some(2));
        assert_eq!(dimension_of(16), Some(4));
        assert_eq!(dimension_of(9), None);
        assert_eq!(dimension_of(5), None);
    }
}
