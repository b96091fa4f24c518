//! # Stairs
//!
//! Riser/tread layout for a straight private stair, checked against the
//! NZBC D1/AS1 private stair envelope:
//!
//! | Check | Limit |
//! |-------|-------|
//! | Riser height | 115 – 190 mm |
//! | Going | ≥ 250 mm |
//! | 2R + G | 550 – 700 mm |
//! | Pitch | ≤ 41° |
//!
//! [`calculate`] proposes a layout from total rise alone (180 mm ideal riser,
//! going from the 625 rule). [`solve`] is the form-driven variant: whichever
//! field the user edited last is honoured and the rest re-derived.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::stairs::calculate;
//!
//! let stair = calculate(2700.0);
//! assert_eq!(stair.risers, 15);
//! assert_eq!(stair.riser_height, 180.0);
//! assert!(stair.compliant);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{finite_or_zero, round2, round_dp, to_deg, to_rad};

/// Below this total rise no stair is needed
pub const MIN_TOTAL_RISE: f64 = 200.0;

/// Ergonomic target riser height
pub const IDEAL_RISER: f64 = 180.0;

pub const MIN_RISER: f64 = 115.0;
pub const MAX_RISER: f64 = 190.0;
pub const MIN_GOING: f64 = 250.0;

/// Target stride, 2R + G
pub const STRIDE_TARGET: f64 = 625.0;
pub const MIN_STRIDE: f64 = 550.0;
pub const MAX_STRIDE: f64 = 700.0;

pub const MAX_ANGLE: f64 = 41.0;

const NOTES_PREFIX: &str = "NZBC D1/AS1 (Private Stairs): ";

/// A stair layout. Lengths in mm, angle in degrees, rounded to 2 dp.
///
/// `notes` is empty for a compliant stair, otherwise it lists every
/// failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairsSolution {
    pub total_rise: f64,
    pub risers: u32,
    pub treads: u32,
    pub riser_height: f64,
    pub going: f64,
    pub total_run: f64,
    pub angle: f64,
    pub compliant: bool,
    pub notes: String,
}

impl StairsSolution {
    /// No stair needed
    fn trivial(total_rise: f64) -> Self {
        StairsSolution {
            total_rise: round2(total_rise),
            risers: 0,
            treads: 0,
            riser_height: 0.0,
            going: 0.0,
            total_run: 0.0,
            angle: 0.0,
            compliant: true,
            notes: String::new(),
        }
    }

    /// Lay out `risers` equal risers over `total_rise` with the given going
    fn build(total_rise: f64, risers: u32, going: f64) -> Self {
        let risers = risers.max(1);
        let riser_height = total_rise / f64::from(risers);
        let treads = risers - 1;
        let total_run = f64::from(treads) * going;
        let angle = if total_run > 0.0 {
            to_deg((total_rise / total_run).atan())
        } else {
            90.0
        };

        let (compliant, notes) = check_compliance(riser_height, going, angle);

        StairsSolution {
            total_rise: round2(total_rise),
            risers,
            treads,
            riser_height: round2(riser_height),
            going: round2(going),
            total_run: round2(total_run),
            angle: round2(angle),
            compliant,
            notes,
        }
    }
}

/// Check a layout against the private stair envelope.
///
/// Returns `(compliant, notes)`; notes concatenate every failed check.
pub fn check_compliance(riser_height: f64, going: f64, angle: f64) -> (bool, String) {
    let mut reasons = Vec::new();

    if !(MIN_RISER..=MAX_RISER).contains(&riser_height) {
        reasons.push("Riser height outside 115-190mm.".to_string());
    }
    if going < MIN_GOING {
        reasons.push("Tread going less than 250mm.".to_string());
    }
    let stride = 2.0 * riser_height + going;
    if !(MIN_STRIDE..=MAX_STRIDE).contains(&stride) {
        reasons.push(format!("2R+G ({}) outside 550-700mm.", round_dp(stride, 0)));
    }
    if angle > MAX_ANGLE {
        reasons.push("Angle exceeds 41°.".to_string());
    }

    if reasons.is_empty() {
        (true, String::new())
    } else {
        (false, format!("{NOTES_PREFIX}{}", reasons.join(" ")))
    }
}

/// Going from the 625 rule, floored at the minimum going
fn rule_going(riser_height: f64) -> f64 {
    (STRIDE_TARGET - 2.0 * riser_height).max(MIN_GOING)
}

/// Recommended layout for a total rise (mm). Never fails.
pub fn calculate(total_rise: f64) -> StairsSolution {
    let rise = finite_or_zero(total_rise);
    if rise < MIN_TOTAL_RISE {
        return StairsSolution::trivial(rise);
    }

    let risers = ((rise / IDEAL_RISER).round() as u32).max(1);
    let going = rule_going(rise / f64::from(risers));
    let solution = StairsSolution::build(rise, risers, going);

    tracing::debug!(
        total_rise = rise,
        risers = solution.risers,
        going = solution.going,
        compliant = solution.compliant,
        "stairs"
    );
    solution
}

/// Which value the user changed last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairsField {
    #[default]
    TotalRise,
    RiserCount,
    TreadCount,
    RiserHeight,
    Going,
    TotalRun,
    Angle,
}

/// Current form state for the interactive solver.
///
/// Only `total_rise` and the field named by `last_edited` are required;
/// other values are used when the driving field leaves them free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairsInput {
    pub total_rise: Option<f64>,
    pub risers: Option<u32>,
    pub treads: Option<u32>,
    pub riser_height: Option<f64>,
    pub going: Option<f64>,
    pub total_run: Option<f64>,
    pub angle: Option<f64>,
    pub last_edited: StairsField,
}

impl StairsInput {
    /// Form driven by total rise only
    pub fn from_rise(total_rise: f64) -> Self {
        StairsInput {
            total_rise: Some(total_rise),
            ..Default::default()
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Riser count nearest the ideal, kept inside the compliant riser band
/// when the band admits any whole count.
fn clamped_riser_count(rise: f64) -> u32 {
    let ideal = (rise / IDEAL_RISER).round();
    let lo = (rise / MAX_RISER).ceil();
    let hi = (rise / MIN_RISER).floor();
    let count = if lo <= hi { ideal.clamp(lo, hi) } else { ideal };
    (count as u32).max(1)
}

/// Re-derive a stair around the last edited field. Never fails.
pub fn solve(input: &StairsInput) -> StairsSolution {
    let Some(rise) = positive(input.total_rise).filter(|r| *r >= MIN_TOTAL_RISE) else {
        return StairsSolution::trivial(input.total_rise.map(finite_or_zero).unwrap_or(0.0).max(0.0));
    };

    let explicit_risers = input.risers.filter(|r| *r > 0);
    let explicit_treads = input.treads.map(|t| t.saturating_add(1));

    let risers = match input.last_edited {
        StairsField::TotalRise => clamped_riser_count(rise),
        StairsField::RiserCount => explicit_risers.unwrap_or_else(|| clamped_riser_count(rise)),
        StairsField::TreadCount => explicit_treads
            .or(explicit_risers)
            .unwrap_or_else(|| clamped_riser_count(rise)),
        StairsField::RiserHeight => match positive(input.riser_height) {
            Some(height) => ((rise / height).round() as u32).max(1),
            None => clamped_riser_count(rise),
        },
        StairsField::Going | StairsField::TotalRun | StairsField::Angle => {
            explicit_risers.unwrap_or_else(|| clamped_riser_count(rise))
        }
    }
    .max(1);

    let treads = risers - 1;
    let default_going = rule_going(rise / f64::from(risers));
    let going = match input.last_edited {
        StairsField::Going => positive(input.going),
        StairsField::TotalRun if treads > 0 => positive(input.total_run).map(|run| run / f64::from(treads)),
        StairsField::Angle if treads > 0 => input
            .angle
            .filter(|a| a.is_finite() && *a > 0.0 && *a < 90.0)
            .map(|a| rise / to_rad(a).tan() / f64::from(treads)),
        _ => None,
    }
    .unwrap_or(default_going);

    let solution = StairsSolution::build(rise, risers, going);
    tracing::debug!(
        last_edited = ?input.last_edited,
        risers = solution.risers,
        going = solution.going,
        compliant = solution.compliant,
        "solved stairs"
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rise() {
        let stair = calculate(2700.0);
        assert_eq!(stair.risers, 15);
        assert_eq!(stair.treads, 14);
        assert_eq!(stair.riser_height, 180.0);
        assert_eq!(stair.going, 265.0);
        assert_eq!(stair.total_run, 3710.0);
        // atan(2700 / 3710)
        assert!((stair.angle - 36.05).abs() < 0.01);
        assert!(stair.compliant);
        assert_eq!(stair.notes, "");
    }

    #[test]
    fn test_no_stair_needed() {
        let stair = calculate(100.0);
        assert_eq!(stair.risers, 0);
        assert_eq!(stair.treads, 0);
        assert_eq!(stair.going, 0.0);
        assert!(stair.compliant);

        assert_eq!(calculate(f64::NAN).risers, 0);
        assert_eq!(calculate(-500.0).risers, 0);
    }

    #[test]
    fn test_riser_height_invariant() {
        for rise in [450.0, 1200.0, 2600.0, 3333.0] {
            let stair = calculate(rise);
            let expected = round2(rise / f64::from(stair.risers));
            assert_eq!(stair.riser_height, expected);
            assert_eq!(stair.treads, stair.risers - 1);
        }
    }

    #[test]
    fn test_single_riser_is_not_compliant() {
        // one 250 mm step: riser too tall, 2R+G = 750, vertical
        let stair = calculate(250.0);
        assert_eq!(stair.risers, 1);
        assert!(!stair.compliant);
        assert!(stair.notes.starts_with("NZBC D1/AS1 (Private Stairs): "));
        assert!(stair.notes.contains("Riser height outside 115-190mm."));
        assert!(stair.notes.contains("2R+G (750) outside 550-700mm."));
        assert!(stair.notes.contains("Angle exceeds 41°."));
        assert!(!stair.notes.contains("Tread going"));
    }

    #[test]
    fn test_compliance_check() {
        assert_eq!(check_compliance(180.0, 265.0, 36.0), (true, String::new()));

        let (ok, notes) = check_compliance(180.0, 240.0, 36.0);
        assert!(!ok);
        assert_eq!(notes, "NZBC D1/AS1 (Private Stairs): Tread going less than 250mm.");

        let (ok, _) = check_compliance(190.0, 250.0, 41.0);
        assert!(ok);
    }

    #[test]
    fn test_solve_from_rise_matches_calculate() {
        let solved = solve(&StairsInput::from_rise(2700.0));
        assert_eq!(solved, calculate(2700.0));
    }

    #[test]
    fn test_solve_clamps_risers_into_band() {
        // 260 / 180 rounds to 1 riser (260 mm); the band forces 2 × 130 mm
        assert_eq!(calculate(260.0).risers, 1);
        let solved = solve(&StairsInput::from_rise(260.0));
        assert_eq!(solved.risers, 2);
        assert_eq!(solved.riser_height, 130.0);
    }

    #[test]
    fn test_solve_explicit_counts() {
        let by_risers = solve(&StairsInput {
            total_rise: Some(2700.0),
            risers: Some(16),
            last_edited: StairsField::RiserCount,
            ..Default::default()
        });
        assert_eq!(by_risers.risers, 16);
        assert_eq!(by_risers.riser_height, 168.75);
        assert_eq!(by_risers.going, 287.5);

        let by_treads = solve(&StairsInput {
            total_rise: Some(2700.0),
            treads: Some(14),
            last_edited: StairsField::TreadCount,
            ..Default::default()
        });
        assert_eq!(by_treads.risers, 15);
    }

    #[test]
    fn test_solve_huge_tread_count() {
        let solved = solve(&StairsInput {
            total_rise: Some(2700.0),
            treads: Some(u32::MAX),
            last_edited: StairsField::TreadCount,
            ..Default::default()
        });
        assert_eq!(solved.risers, u32::MAX);
        assert_eq!(solved.treads, u32::MAX - 1);
        assert!(!solved.compliant);
    }

    #[test]
    fn test_solve_riser_height_is_not_clamped() {
        let solved = solve(&StairsInput {
            total_rise: Some(2700.0),
            riser_height: Some(210.0),
            last_edited: StairsField::RiserHeight,
            ..Default::default()
        });
        assert_eq!(solved.risers, 13);
        assert_eq!(solved.riser_height, 207.69);
        assert!(!solved.compliant);
        assert!(solved.notes.contains("Riser height"));
    }

    #[test]
    fn test_solve_user_going_has_no_floor() {
        let solved = solve(&StairsInput {
            total_rise: Some(2700.0),
            going: Some(230.0),
            last_edited: StairsField::Going,
            ..Default::default()
        });
        assert_eq!(solved.going, 230.0);
        assert_eq!(solved.total_run, 14.0 * 230.0);
        assert!(solved.notes.contains("Tread going less than 250mm."));
    }

    #[test]
    fn test_solve_total_run_and_angle() {
        let by_run = solve(&StairsInput {
            total_rise: Some(2700.0),
            total_run: Some(4200.0),
            last_edited: StairsField::TotalRun,
            ..Default::default()
        });
        assert_eq!(by_run.going, 300.0);
        assert_eq!(by_run.total_run, 4200.0);

        let by_angle = solve(&StairsInput {
            total_rise: Some(2700.0),
            angle: Some(35.0),
            last_edited: StairsField::Angle,
            ..Default::default()
        });
        assert!((by_angle.angle - 35.0).abs() < 0.01);
        // 2700 / tan 35° / 14
        assert!((by_angle.going - 275.43).abs() < 0.01);
    }

    #[test]
    fn test_solve_missing_driver_falls_back() {
        let solved = solve(&StairsInput {
            total_rise: Some(2700.0),
            last_edited: StairsField::Going,
            ..Default::default()
        });
        assert_eq!(solved.going, 265.0);
    }

    #[test]
    fn test_serialization() {
        let input: StairsInput =
            serde_json::from_str(r#"{ "total_rise": 2700.0, "going": 280.0, "last_edited": "going" }"#).unwrap();
        assert_eq!(input.last_edited, StairsField::Going);
        assert_eq!(solve(&input).going, 280.0);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(calculate(3125.0), calculate(3125.0));
    }
}
