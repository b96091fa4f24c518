//! # Right-Triangle Solver
//!
//! Solves a right triangle from exactly two known values. The five
//! quantities are the legs `a` and `b`, the hypotenuse `c`, and the acute
//! angles `angle_a` (opposite `a`) and `angle_b` (opposite `b`), in degrees.
//!
//! ```text
//!            B
//!            |\
//!            | \
//!          a |  \ c
//!            |   \
//!            |____\
//!           C   b   A
//! ```
//!
//! In roofing terms `a` is the rise, `b` the run (half-span), `c` the common
//! rafter and `angle_a` the pitch.
//!
//! ## Input Rules
//!
//! - No values at all is not an error: the form is still empty, so `Ok(None)`
//! - Anything other than exactly two values is rejected
//! - Two angles alone are rejected since they carry no length
//! - A hypotenuse no longer than the given leg is rejected
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::trig::{solve, TriangleInput};
//!
//! let input = TriangleInput { a: Some(300.0), b: Some(400.0), ..Default::default() };
//! let tri = solve(&input).unwrap().unwrap();
//!
//! assert_eq!(tri.c, 500.0);
//! assert_eq!(tri.angle_a.round(), 37.0);
//! assert_eq!(tri.angle_b.round(), 53.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{round2, to_deg, to_rad};

/// Partially known right triangle. Absent or non-finite fields are unknown.
///
/// ## JSON Example
///
/// ```json
/// { "a": 300.0, "b": 400.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleInput {
    /// Leg opposite `angle_a`
    pub a: Option<f64>,
    /// Leg opposite `angle_b`
    pub b: Option<f64>,
    /// Hypotenuse
    pub c: Option<f64>,
    /// Angle opposite `a`, degrees
    pub angle_a: Option<f64>,
    /// Angle opposite `b`, degrees
    pub angle_b: Option<f64>,
}

/// Fully solved right triangle, every field rounded to 2 dp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleSolution {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub angle_a: f64,
    pub angle_b: f64,
}

/// One of the five solvable quantities.
///
/// Ordering matters: known pairs are sorted by it before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriangleField {
    A,
    B,
    C,
    AngleA,
    AngleB,
}

impl TriangleField {
    fn name(self) -> &'static str {
        match self {
            TriangleField::A => "a",
            TriangleField::B => "b",
            TriangleField::C => "c",
            TriangleField::AngleA => "angle_a",
            TriangleField::AngleB => "angle_b",
        }
    }

    fn is_angle(self) -> bool {
        matches!(self, TriangleField::AngleA | TriangleField::AngleB)
    }
}

impl TriangleInput {
    /// Known fields in canonical order, with non-finite values dropped.
    pub fn known(&self) -> Vec<(TriangleField, f64)> {
        [
            (TriangleField::A, self.a),
            (TriangleField::B, self.b),
            (TriangleField::C, self.c),
            (TriangleField::AngleA, self.angle_a),
            (TriangleField::AngleB, self.angle_b),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.filter(|v| v.is_finite()).map(|v| (field, v)))
        .collect()
    }

    /// Build an input holding exactly one known pair.
    pub fn from_pair(first: (TriangleField, f64), second: (TriangleField, f64)) -> Self {
        let mut input = TriangleInput::default();
        for (field, value) in [first, second] {
            let slot = match field {
                TriangleField::A => &mut input.a,
                TriangleField::B => &mut input.b,
                TriangleField::C => &mut input.c,
                TriangleField::AngleA => &mut input.angle_a,
                TriangleField::AngleB => &mut input.angle_b,
            };
            *slot = Some(value);
        }
        input
    }
}

impl TriangleSolution {
    /// Area of the triangle (½ab)
    pub fn area(&self) -> f64 {
        0.5 * self.a * self.b
    }
}

fn check_value(field: TriangleField, value: f64) -> CalcResult<()> {
    if field.is_angle() {
        if value <= 0.0 || value >= 90.0 {
            return Err(CalcError::invalid_input(
                field.name(),
                value.to_string(),
                "Angle must be between 0° and 90°",
            ));
        }
    } else if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field.name(),
            value.to_string(),
            "Side length must be positive",
        ));
    }
    Ok(())
}

fn hypotenuse_longest(c: f64, leg: f64) -> CalcResult<()> {
    if c <= leg {
        return Err(CalcError::invalid_input(
            "c",
            c.to_string(),
            "Hypotenuse must be longest side.",
        ));
    }
    Ok(())
}

/// Solve a right triangle from exactly two known values.
///
/// # Returns
///
/// * `Ok(None)` - Nothing entered yet
/// * `Ok(Some(TriangleSolution))` - All five values, rounded to 2 dp
/// * `Err(CalcError::InvalidInput)` - Wrong number of values, two angles,
///   a hypotenuse that is not the longest side, or an out-of-range value
/// * `Err(CalcError::CalculationFailed)` - A side overflows `f64`
pub fn solve(input: &TriangleInput) -> CalcResult<Option<TriangleSolution>> {
    let known = input.known();
    if known.is_empty() {
        return Ok(None);
    }
    if known.len() != 2 {
        return Err(CalcError::invalid_input(
            "inputs",
            known.len().to_string(),
            "Enter exactly two values.",
        ));
    }

    let (first, x) = known[0];
    let (second, y) = known[1];
    if first.is_angle() && second.is_angle() {
        return Err(CalcError::invalid_input(
            "inputs",
            format!("{x}, {y}"),
            "At least one input must be a side.",
        ));
    }
    check_value(first, x)?;
    check_value(second, y)?;

    use TriangleField::*;
    let (a, b, c, angle_a) = match (first, second) {
        (A, B) => (x, y, x.hypot(y), to_deg((x / y).atan())),
        (A, C) => {
            hypotenuse_longest(y, x)?;
            (x, (y * y - x * x).sqrt(), y, to_deg((x / y).asin()))
        }
        (B, C) => {
            hypotenuse_longest(y, x)?;
            let angle_b = to_deg((x / y).acos());
            ((y * y - x * x).sqrt(), x, y, 90.0 - angle_b)
        }
        (A, AngleA) => (x, x / to_rad(y).tan(), x / to_rad(y).sin(), y),
        (A, AngleB) => (x, x * to_rad(y).tan(), x / to_rad(y).cos(), 90.0 - y),
        (B, AngleA) => (x * to_rad(y).tan(), x, x / to_rad(y).cos(), y),
        (B, AngleB) => (x / to_rad(y).tan(), x, x / to_rad(y).sin(), 90.0 - y),
        (C, AngleA) => (x * to_rad(y).sin(), x * to_rad(y).cos(), x, y),
        (C, AngleB) => (x * to_rad(y).cos(), x * to_rad(y).sin(), x, 90.0 - y),
        (p, q) => {
            return Err(CalcError::Internal {
                message: format!("unhandled triangle pair {p:?}/{q:?}"),
            })
        }
    };

    if ![a, b, c].iter().all(|v| v.is_finite()) {
        tracing::warn!(?first, ?second, x, y, "triangle side overflowed");
        return Err(CalcError::calculation_failed(
            "Right triangle",
            "A side is too large to represent.",
        ));
    }

    tracing::debug!(?first, ?second, a, b, c, angle_a, "solved right triangle");

    Ok(Some(TriangleSolution {
        a: round2(a),
        b: round2(b),
        c: round2(c),
        angle_a: round2(angle_a),
        angle_b: round2(90.0 - angle_a),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved(input: TriangleInput) -> TriangleSolution {
        solve(&input).unwrap().unwrap()
    }

    fn assert_closed(t: &TriangleSolution) {
        let lhs = t.a * t.a + t.b * t.b;
        let rhs = t.c * t.c;
        assert!((lhs.sqrt() - rhs.sqrt()).abs() < 0.02, "{t:?} not closed");
        assert!((t.angle_a + t.angle_b - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_legs() {
        let t = solved(TriangleInput { a: Some(300.0), b: Some(400.0), ..Default::default() });
        assert_eq!(t.c, 500.0);
        assert_eq!(t.angle_a, 36.87);
        assert_eq!(t.angle_b, 53.13);
        assert_closed(&t);
    }

    #[test]
    fn test_every_pair_closes() {
        // 3-4-5 triangle scaled by 100, angle_a = 36.8699
        let angle_a = to_deg((3.0f64 / 4.0).atan());
        let angle_b = 90.0 - angle_a;
        let pairs = [
            ((TriangleField::A, 300.0), (TriangleField::B, 400.0)),
            ((TriangleField::A, 300.0), (TriangleField::C, 500.0)),
            ((TriangleField::B, 400.0), (TriangleField::C, 500.0)),
            ((TriangleField::A, 300.0), (TriangleField::AngleA, angle_a)),
            ((TriangleField::A, 300.0), (TriangleField::AngleB, angle_b)),
            ((TriangleField::B, 400.0), (TriangleField::AngleA, angle_a)),
            ((TriangleField::B, 400.0), (TriangleField::AngleB, angle_b)),
            ((TriangleField::C, 500.0), (TriangleField::AngleA, angle_a)),
            ((TriangleField::C, 500.0), (TriangleField::AngleB, angle_b)),
        ];
        for (p, q) in pairs {
            let t = solved(TriangleInput::from_pair(p, q));
            assert_closed(&t);
            assert!((t.a - 300.0).abs() < 0.01, "{p:?} {q:?} -> {t:?}");
            assert!((t.b - 400.0).abs() < 0.01, "{p:?} {q:?} -> {t:?}");
            assert!((t.c - 500.0).abs() < 0.01, "{p:?} {q:?} -> {t:?}");
        }
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        assert_eq!(solve(&TriangleInput::default()).unwrap(), None);
    }

    #[test]
    fn test_wrong_count() {
        let one = TriangleInput { a: Some(3.0), ..Default::default() };
        let err = solve(&one).unwrap_err();
        assert_eq!(err.user_message(), "Enter exactly two values.");

        let three = TriangleInput { a: Some(3.0), b: Some(4.0), c: Some(5.0), ..Default::default() };
        assert!(solve(&three).is_err());
    }

    #[test]
    fn test_overflowing_side_fails() {
        let input = TriangleInput { a: Some(1e308), angle_b: Some(89.99), ..Default::default() };
        let err = solve(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");

        let steep = TriangleInput { b: Some(1e308), angle_a: Some(89.99), ..Default::default() };
        assert_eq!(solve(&steep).unwrap_err().error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_two_angles_rejected() {
        let input = TriangleInput { angle_a: Some(30.0), angle_b: Some(60.0), ..Default::default() };
        let err = solve(&input).unwrap_err();
        assert_eq!(err.user_message(), "At least one input must be a side.");
    }

    #[test]
    fn test_hypotenuse_must_be_longest() {
        let input = TriangleInput { a: Some(500.0), c: Some(400.0), ..Default::default() };
        let err = solve(&input).unwrap_err();
        assert_eq!(err.user_message(), "Hypotenuse must be longest side.");

        let equal = TriangleInput { b: Some(400.0), c: Some(400.0), ..Default::default() };
        assert!(solve(&equal).is_err());
    }

    #[test]
    fn test_non_finite_counts_as_absent() {
        let input = TriangleInput {
            a: Some(300.0),
            b: Some(400.0),
            c: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(solved(input).c, 500.0);
    }

    #[test]
    fn test_out_of_range_values() {
        let flat = TriangleInput { a: Some(300.0), angle_a: Some(0.0), ..Default::default() };
        assert!(solve(&flat).is_err());

        let negative = TriangleInput { a: Some(-3.0), b: Some(4.0), ..Default::default() };
        assert!(solve(&negative).is_err());
    }

    #[test]
    fn test_idempotent() {
        let input = TriangleInput { c: Some(1234.5), angle_b: Some(27.3), ..Default::default() };
        assert_eq!(solve(&input).unwrap(), solve(&input).unwrap());
    }

    #[test]
    fn test_serialization() {
        let input: TriangleInput = serde_json::from_str(r#"{ "a": 300.0, "b": 400.0 }"#).unwrap();
        assert_eq!(input.c, None);
        assert_eq!(input.known().len(), 2);
    }
}
