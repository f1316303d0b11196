//! Angle formatting shared by the text emitters.

use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-10;

/// Format `v`, printing common fractions of π symbolically with `pi` as the
/// constant's spelling (`"pi"`, `"np.pi"`).
pub(crate) fn format_angle(v: f64, pi: &str) -> String {
    let fractions = [
        (1.0, ""),
        (0.5, "/2"),
        (0.25, "/4"),
        (-0.5, "/2"),
        (-0.25, "/4"),
        (-1.0, ""),
    ];
    for (factor, suffix) in fractions {
        if (v - factor * PI).abs() < TOLERANCE {
            let sign = if factor < 0.0 { "-" } else { "" };
            return format!("{sign}{pi}{suffix}");
        }
    }
    format!("{v:.6}")
}

/// Comma-separated angles.
pub(crate) fn format_angles(params: &[f64], pi: &str) -> String {
    params
        .iter()
        .map(|&p| format_angle(p, pi))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_of_pi() {
        assert_eq!(format_angle(PI, "pi"), "pi");
        assert_eq!(format_angle(PI / 2.0, "pi"), "pi/2");
        assert_eq!(format_angle(-PI / 4.0, "np.pi"), "-np.pi/4");
        assert_eq!(format_angle(-PI, "pi"), "-pi");
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(format_angle(0.1, "pi"), "0.100000");
        assert_eq!(format_angles(&[PI, 0.0], "pi"), "pi, 0.000000");
    }
}
