//! # Roof & Rafter Geometry
//!
//! Derives the full common-rafter geometry of a gable or skillion roof from
//! any two of rise, half-span (run), common rafter length and pitch, plus
//! optional overhang, ridge, seat and layout inputs.
//!
//! ```text
//!                      ridge
//!                        /|
//!            common    /  |
//!                    /    | rise
//!                  /pitch |
//!   overhang  ___/________|
//!                 half-span
//! ```
//!
//! ## Resolution
//!
//! Zero, negative and non-finite inputs count as "not entered". With fewer
//! than two of the four core values the result is `Ok(None)`: the user has
//! simply not typed enough yet. With more than two, the first available pair
//! in this order is authoritative:
//!
//! 1. half-span + pitch
//! 2. rise + half-span
//! 3. rise + pitch
//! 4. half-span + common
//! 5. pitch + common
//!
//! The pair is solved as a right triangle (rise = leg `a`, half-span = leg
//! `b`, common = hypotenuse, pitch = `angle_a`).
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::roof_rafter::{calculate, RoofRafterInput};
//!
//! let input = RoofRafterInput {
//!     half_span: Some(1000.0),
//!     pitch: Some(20.0),
//!     ..Default::default()
//! };
//! let roof = calculate(&input).unwrap().unwrap();
//! assert_eq!(roof.rise, 363.97);
//! assert_eq!(roof.common, 1064.18);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::trig::{self, TriangleField, TriangleInput};
use crate::errors::CalcResult;
use crate::units::{round2, to_rad};

/// Roof geometry inputs, all lengths in millimetres and angles in degrees.
///
/// ## JSON Example
///
/// ```json
/// {
///   "span": 4800.0,
///   "pitch": 25.0,
///   "overhang": 450.0,
///   "ridge_thickness": 45.0,
///   "building_length": 6000.0,
///   "rafter_spacing": 600.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofRafterInput {
    /// Full building span (wall to wall)
    pub span: Option<f64>,
    /// Horizontal run of one rafter; wins over `span` when both are given
    pub half_span: Option<f64>,
    /// Roof pitch in degrees
    pub pitch: Option<f64>,
    /// Vertical rise from wall plate to ridge line
    pub rise: Option<f64>,
    /// Common rafter length along the slope, plate to ridge line
    pub common: Option<f64>,
    /// Horizontal eave overhang
    pub overhang: Option<f64>,
    /// Ridge board thickness, trimmed half from each rafter
    pub ridge_thickness: Option<f64>,
    /// Birdsmouth seat cut depth (plumb)
    pub seat_depth: Option<f64>,
    /// Building length along the ridge, for area and rafter count
    pub building_length: Option<f64>,
    /// Rafter centres
    pub rafter_spacing: Option<f64>,
    /// Measure roof area to the eave tip rather than the wall line (default true)
    pub include_overhang_in_area: Option<bool>,
}

impl RoofRafterInput {
    /// Simple gable: full span and pitch.
    pub fn from_span_pitch(span: f64, pitch: f64) -> Self {
        RoofRafterInput {
            span: Some(span),
            pitch: Some(pitch),
            ..Default::default()
        }
    }
}

/// Solved roof geometry, lengths in mm, areas in mm², angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofRafterResult {
    pub span: f64,
    pub half_span: f64,
    pub pitch: f64,
    pub rise: f64,
    /// Plate to ridge line
    pub common: f64,
    /// Common shortened to the ridge board face
    pub common_at_ridge: f64,
    pub overhang: f64,
    /// Overhang measured along the slope
    pub overhang_slope: f64,
    /// Common plus sloped overhang (to eave tip)
    pub total: f64,
    /// Plumb cut angle
    pub plumb: f64,
    /// Birdsmouth (seat) cut angle
    pub birdsmouth: f64,
    /// Horizontal seat length for the given seat depth
    pub seat_length: f64,
    pub area_per_side: f64,
    pub area_total: f64,
    pub rafter_count_per_side: u32,
}

/// Sheet roofing quantities for a solved roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofSheetEstimate {
    pub area_per_side_m2: f64,
    pub area_total_m2: f64,
    pub sheets_per_side: u32,
    pub sheets_total: u32,
}

impl RoofRafterResult {
    /// Roof area of one side in m²
    pub fn area_per_side_m2(&self) -> f64 {
        self.area_per_side / 1_000_000.0
    }

    /// Roof area of both sides in m²
    pub fn area_total_m2(&self) -> f64 {
        self.area_total / 1_000_000.0
    }

    /// Sheets needed to cover the roof with `sheet_w_m` × `sheet_h_m` sheets.
    ///
    /// No waste allowance; a zero sheet size gives zero sheets.
    pub fn sheet_estimate(&self, sheet_w_m: f64, sheet_h_m: f64) -> RoofSheetEstimate {
        let sheet_area = sheet_w_m.max(0.0) * sheet_h_m.max(0.0);
        let sheets = |area: f64| {
            if sheet_area > 0.0 {
                (area / sheet_area).ceil() as u32
            } else {
                0
            }
        };
        RoofSheetEstimate {
            area_per_side_m2: round2(self.area_per_side_m2()),
            area_total_m2: round2(self.area_total_m2()),
            sheets_per_side: sheets(self.area_per_side_m2()),
            sheets_total: sheets(self.area_total_m2()),
        }
    }
}

/// Preferred pairs when more than two core values are known.
const PREFERRED_PAIRS: [(TriangleField, TriangleField); 5] = [
    (TriangleField::B, TriangleField::AngleA),
    (TriangleField::A, TriangleField::B),
    (TriangleField::A, TriangleField::AngleA),
    (TriangleField::B, TriangleField::C),
    (TriangleField::C, TriangleField::AngleA),
];

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Solve the roof.
///
/// # Returns
///
/// * `Ok(None)` - Fewer than two of rise, half-span, common and pitch
/// * `Ok(Some(RoofRafterResult))` - Full geometry rounded to 2 dp
/// * `Err(CalcError)` - The chosen pair is not a real triangle
///   (e.g. common rafter shorter than the run, pitch of 90° or more)
pub fn calculate(input: &RoofRafterInput) -> CalcResult<Option<RoofRafterResult>> {
    let half_span = positive(input.half_span).or_else(|| positive(input.span).map(|s| s / 2.0));

    let known: Vec<(TriangleField, f64)> = [
        (TriangleField::A, positive(input.rise)),
        (TriangleField::B, half_span),
        (TriangleField::C, positive(input.common)),
        (TriangleField::AngleA, positive(input.pitch)),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    if known.len() < 2 {
        return Ok(None);
    }

    let value_of = |field: TriangleField| known.iter().find(|(f, _)| *f == field).map(|(_, v)| *v);
    let (first, second) = PREFERRED_PAIRS
        .iter()
        .find_map(|&(p, q)| Some(((p, value_of(p)?), (q, value_of(q)?))))
        .unwrap_or((known[0], known[1]));

    let Some(tri) = trig::solve(&TriangleInput::from_pair(first, second))? else {
        return Ok(None);
    };

    let rise = tri.a;
    let half_span = tri.b;
    let common = tri.c;
    let pitch = tri.angle_a;
    let pitch_rad = to_rad(pitch);

    let overhang = positive(input.overhang).unwrap_or(0.0);
    let overhang_slope = if overhang > 0.0 {
        overhang / pitch_rad.cos()
    } else {
        0.0
    };

    let ridge_thickness = positive(input.ridge_thickness).unwrap_or(0.0);
    let common_at_ridge = common - ridge_thickness / (2.0 * pitch_rad.sin());

    let total = common + overhang_slope;
    let seat_length = match positive(input.seat_depth) {
        Some(depth) => depth / pitch_rad.tan(),
        None => 0.0,
    };

    let building_length = positive(input.building_length).unwrap_or(0.0);
    let effective_width = if input.include_overhang_in_area.unwrap_or(true) {
        total
    } else {
        common
    };
    let area_per_side = round2(building_length * effective_width);

    let rafter_count_per_side = match positive(input.rafter_spacing) {
        Some(spacing) if building_length > 0.0 => ((building_length / spacing).floor() as u32).saturating_add(1),
        _ => 0,
    };

    tracing::debug!(
        ?first,
        ?second,
        rise,
        half_span,
        common,
        pitch,
        "solved roof geometry"
    );

    Ok(Some(RoofRafterResult {
        span: round2(half_span * 2.0),
        half_span: round2(half_span),
        pitch: round2(pitch),
        rise: round2(rise),
        common: round2(common),
        common_at_ridge: round2(common_at_ridge),
        overhang: round2(overhang),
        overhang_slope: round2(overhang_slope),
        total: round2(total),
        plumb: round2(pitch),
        birdsmouth: round2(90.0 - pitch),
        seat_length: round2(seat_length),
        area_per_side,
        area_total: round2(area_per_side * 2.0),
        rafter_count_per_side,
    }))
}
