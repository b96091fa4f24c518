//! # Wall & Floor Framing
//!
//! Quick framing estimate for a set of walls or a single floor: member
//! count, linear timber, sheet lining and (for floors) piles, with a cost
//! breakdown.
//!
//! ## Walls
//!
//! Each wall gets `ceil(length / spacing) + 1` full-height studs. Every
//! opening adds `2(w + h)` of trimming timber and is priced as a window
//! (per m²) or a door (per unit). Sheet area is the wall area less openings.
//! At least one wall is required.
//!
//! ## Floors
//!
//! Members run both ways at `spacing`. Bearers sit at 1800 mm rows and piles
//! at 1500 mm along each row.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::framing::{calculate, FramingApplication, FramingInput};
//!
//! let input = FramingInput {
//!     application: FramingApplication::Floor,
//!     length: 3000.0,
//!     width: 2400.0,
//!     spacing: 400.0,
//!     ..Default::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.total_members, 16);
//! assert_eq!(result.pile_count, 9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cabin::SheetSize;
use crate::errors::{CalcError, CalcResult};
use crate::settings::PricingSettings;
use crate::units::{finite_or_zero, round2};

/// Bearer row spacing under a floor (mm)
pub const FLOOR_BEARER_SPACING: f64 = 1800.0;

/// Pile spacing along each bearer row (mm)
pub const FLOOR_PILE_SPACING: f64 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FramingApplication {
    #[default]
    Wall,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Window,
    Door,
}

/// A single window or door in a wall (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingOpening {
    pub kind: OpeningKind,
    pub width: f64,
    pub height: f64,
}

impl FramingOpening {
    fn area_m2(&self) -> f64 {
        finite_or_zero(self.width).max(0.0) * finite_or_zero(self.height).max(0.0) / 1_000_000.0
    }

    /// Head, sill and both trimmers (m)
    fn trim_m(&self) -> f64 {
        2.0 * (finite_or_zero(self.width).max(0.0) + finite_or_zero(self.height).max(0.0)) / 1000.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wall {
    /// Wall length (mm)
    pub length: f64,
    pub openings: Vec<FramingOpening>,
}

/// Rates used by the framing estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingCosts {
    pub timber_per_m: f64,
    pub pile_per_each: f64,
    pub sheet_per_each: f64,
    pub paint_per_m2: f64,
    pub window_per_m2: f64,
    pub door_per_unit: f64,
    pub sheet_size: SheetSize,
}

impl FramingCosts {
    /// Rates from a pricing table; sheets are priced as treated ply
    pub fn from_settings(settings: &PricingSettings) -> Self {
        FramingCosts {
            timber_per_m: settings.timber_per_m,
            pile_per_each: settings.pile_per_each,
            sheet_per_each: settings.sheet_costs.treated_ply,
            paint_per_m2: settings.paint_per_m2,
            window_per_m2: settings.window_per_m2,
            door_per_unit: settings.door_per_unit,
            sheet_size: SheetSize::default(),
        }
    }
}

impl Default for FramingCosts {
    fn default() -> Self {
        FramingCosts::from_settings(&PricingSettings::default())
    }
}

/// Framing job description. Lengths in mm.
///
/// ## JSON Example
///
/// ```json
/// {
///   "application": "wall",
///   "height": 2400.0,
///   "spacing": 600.0,
///   "walls": [
///     { "length": 3600.0, "openings": [{ "kind": "window", "width": 1200.0, "height": 1000.0 }] },
///     { "length": 2400.0 }
///   ],
///   "include_paint": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingInput {
    pub application: FramingApplication,
    /// Floor length
    pub length: f64,
    /// Floor width
    pub width: f64,
    /// Wall height
    pub height: f64,
    /// Member centres
    pub spacing: f64,
    /// Walls (wall mode only)
    pub walls: Vec<Wall>,
    /// Paint the sheeted wall area (wall mode only)
    pub include_paint: bool,
    pub costs: FramingCosts,
}

impl Default for FramingInput {
    fn default() -> Self {
        FramingInput {
            application: FramingApplication::Wall,
            length: 0.0,
            width: 0.0,
            height: 2400.0,
            spacing: 600.0,
            walls: Vec::new(),
            include_paint: false,
            costs: FramingCosts::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FramingCostBreakdown {
    /// Framing timber excluding opening trim
    pub timber: f64,
    pub opening_framing: f64,
    pub sheets: f64,
    pub paint: f64,
    pub piles: f64,
    pub windows: f64,
    pub doors: f64,
    pub grand_total: f64,
}

/// Framing quantities, areas in m², timber in m, costs in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingResult {
    pub total_area_m2: f64,
    pub openings_area_m2: f64,
    pub net_sheeting_area_m2: f64,
    pub sheets: u32,
    pub total_members: u32,
    /// Includes opening trim
    pub timber_m: f64,
    pub pile_count: u32,
    pub costs: FramingCostBreakdown,
}

fn members(length: f64, spacing: f64) -> u32 {
    ((finite_or_zero(length).max(0.0) / spacing).ceil() as u32).saturating_add(1)
}

/// Estimate framing.
///
/// # Errors
///
/// * `InvalidInput` - spacing or sheet size is not positive
/// * `MissingField` - wall mode with no walls
pub fn calculate(input: &FramingInput) -> CalcResult<FramingResult> {
    let spacing = input.spacing;
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(CalcError::invalid_input(
            "spacing",
            spacing.to_string(),
            "Spacing must be greater than zero",
        ));
    }
    let sheet_area = input.costs.sheet_size.area();
    if sheet_area <= 0.0 {
        return Err(CalcError::invalid_input(
            "sheet_size",
            format!("{} x {}", input.costs.sheet_size.w, input.costs.sheet_size.h),
            "Sheet size must be greater than zero",
        ));
    }

    if input.application == FramingApplication::Wall && input.walls.is_empty() {
        return Err(CalcError::missing_field("walls"));
    }

    let costs = &input.costs;
    let mut total_area = 0.0;
    let mut openings_area = 0.0;
    let mut total_members = 0;
    let mut timber_m = 0.0;
    let mut opening_framing_m = 0.0;
    let mut window_cost = 0.0;
    let mut door_cost = 0.0;
    let mut pile_count = 0;

    match input.application {
        FramingApplication::Wall => {
            let height = finite_or_zero(input.height).max(0.0);
            for wall in &input.walls {
                let studs = members(wall.length, spacing);
                total_area += finite_or_zero(wall.length).max(0.0) * height / 1_000_000.0;
                total_members = studs.saturating_add(total_members);
                timber_m += f64::from(studs) * height / 1000.0;

                for opening in &wall.openings {
                    let area = opening.area_m2();
                    openings_area += area;
                    opening_framing_m += opening.trim_m();
                    match opening.kind {
                        OpeningKind::Window => window_cost += area * costs.window_per_m2,
                        OpeningKind::Door => door_cost += costs.door_per_unit,
                    }
                }
            }
            timber_m += opening_framing_m;
        }
        FramingApplication::Floor => {
            let length = finite_or_zero(input.length).max(0.0);
            let width = finite_or_zero(input.width).max(0.0);
            total_area = length * width / 1_000_000.0;
            let members_x = members(length, spacing);
            let members_y = members(width, spacing);
            total_members = members_x.saturating_add(members_y);
            timber_m = (f64::from(members_x) * width + f64::from(members_y) * length) / 1000.0;

            let bearer_rows = members(width, FLOOR_BEARER_SPACING);
            let piles_per_row = members(length, FLOOR_PILE_SPACING);
            pile_count = bearer_rows.saturating_mul(piles_per_row);
        }
    }

    let net_area = (total_area - openings_area).max(0.0);
    let sheets = (net_area / sheet_area).ceil() as u32;

    let opening_framing_cost = opening_framing_m * costs.timber_per_m;
    let timber_cost = (timber_m * costs.timber_per_m - opening_framing_cost).max(0.0);
    let sheet_cost = f64::from(sheets) * costs.sheet_per_each;
    let paint_cost = match input.application {
        FramingApplication::Wall if input.include_paint => net_area * costs.paint_per_m2,
        _ => 0.0,
    };
    let pile_cost = f64::from(pile_count) * costs.pile_per_each;
    let grand_total =
        timber_cost + sheet_cost + paint_cost + pile_cost + window_cost + door_cost + opening_framing_cost;

    tracing::debug!(
        application = ?input.application,
        total_members,
        sheets,
        grand_total,
        "framing estimate"
    );

    Ok(FramingResult {
        total_area_m2: round2(total_area),
        openings_area_m2: round2(openings_area),
        net_sheeting_area_m2: round2(net_area),
        sheets,
        total_members,
        timber_m: round2(timber_m),
        pile_count,
        costs: FramingCostBreakdown {
            timber: round2(timber_cost),
            opening_framing: round2(opening_framing_cost),
            sheets: round2(sheet_cost),
            paint: round2(paint_cost),
            piles: round2(pile_cost),
            windows: round2(window_cost),
            doors: round2(door_cost),
            grand_total: round2(grand_total),
        },
    })
}
