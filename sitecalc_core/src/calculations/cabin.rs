//! # Cabin Bill of Materials
//!
//! Parametric estimator for a small rectangular cabin: walls, floor, roof,
//! openings, cladding, lining and allowances, priced against a
//! [`PricingSettings`] table into an itemized BOM with GST totals.
//!
//! The engine never fails. Degenerate input (zero or negative dimensions,
//! NaN, zero spacings) is clamped and reported through `warnings`; a result
//! is always produced.
//!
//! ## Quantities
//!
//! | Quantity | Rule |
//! |----------|------|
//! | Perimeter | P = 2(L + W) |
//! | Roof run | W/2 (dual), W (mono, flat) |
//! | Studs | both wall pairs at stud centres, less opening widths, + 8 corners + 4 per opening |
//! | Nogs | ceil(H / nog) − 1 rows along P less opening widths |
//! | Plates | 3 × P (bottom + double top) |
//! | Joists | floor(L / joist) + 1, each W long |
//! | Bearers | floor(W / bearer) + 1, each L long |
//! | Piles | bearers × (ceil(L / pile) + 1) |
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::cabin::{compute, CabinConfig};
//! use sitecalc_core::settings::PricingSettings;
//!
//! let result = compute(&CabinConfig::default(), &PricingSettings::default());
//! assert!(!result.items.is_empty());
//! assert!(result.totals.incl_gst > result.totals.ex_gst);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::pitch::{pitch_warnings, RoofCladding};
use crate::calculations::roof_rafter::{self, RoofRafterInput};
use crate::settings::{CladdingRate, PricingSettings};
use crate::units::{finite_or_zero, round2, Metres, Millimetres, SqMetres};

/// Waste allowance applied to sheet wall cladding
pub const SHEET_WASTE_FACTOR: f64 = 1.1;

/// Typical rafter centres (mm)
pub const RAFTER_SPACING_RANGE: (f64, f64) = (300.0, 900.0);

/// Typical stud centres (mm)
pub const STUD_SPACING_RANGE: (f64, f64) = (300.0, 600.0);

/// Corner studs added beyond the counted wall ends
const CORNER_STUDS: u32 = 8;

/// King and jack studs per opening
const STUDS_PER_OPENING: u32 = 4;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
    Flat,
    Mono,
    #[default]
    Dual,
}

impl RoofType {
    /// Number of sloped planes
    pub fn planes(&self) -> u32 {
        match self {
            RoofType::Dual => 2,
            RoofType::Mono | RoofType::Flat => 1,
        }
    }
}

/// A group of identical openings (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub count: u32,
    pub width: f64,
    pub height: f64,
}

impl Opening {
    pub fn new(count: u32, width: f64, height: f64) -> Self {
        Opening { count, width, height }
    }

    fn width_mm(&self) -> f64 {
        finite_or_zero(self.width).max(0.0)
    }

    fn height_mm(&self) -> f64 {
        finite_or_zero(self.height).max(0.0)
    }

    /// Combined width of every opening in the group (mm)
    pub fn total_width(&self) -> f64 {
        self.width_mm() * f64::from(self.count)
    }

    /// Combined area of every opening in the group (m²)
    pub fn total_area(&self) -> SqMetres {
        SqMetres::from_mm(Millimetres(self.width_mm()), Millimetres(self.height_mm())) * f64::from(self.count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Openings {
    pub windows: Vec<Opening>,
    pub doors: Vec<Opening>,
}

impl Openings {
    fn area(groups: &[Opening]) -> f64 {
        groups.iter().map(|o| o.total_area().value()).sum()
    }

    fn width(groups: &[Opening]) -> f64 {
        groups.iter().map(Opening::total_width).sum()
    }

    fn count(groups: &[Opening]) -> u32 {
        groups.iter().fold(0, |n, o| n.saturating_add(o.count))
    }

    pub fn window_area(&self) -> f64 {
        Self::area(&self.windows)
    }

    pub fn door_area(&self) -> f64 {
        Self::area(&self.doors)
    }

    pub fn window_width(&self) -> f64 {
        Self::width(&self.windows)
    }

    pub fn door_width(&self) -> f64 {
        Self::width(&self.doors)
    }

    pub fn window_count(&self) -> u32 {
        Self::count(&self.windows)
    }

    pub fn door_count(&self) -> u32 {
        Self::count(&self.doors)
    }
}

/// Exterior wall cladding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExteriorCladding {
    Ply,
    #[default]
    Corrugate,
    Tray,
    Longrun,
    #[serde(alias = "five rib", alias = "5 rib")]
    FiveRib,
    #[serde(alias = "PIR")]
    Pir,
    #[serde(alias = "cedar weatherboard")]
    CedarWeatherboard,
    #[serde(alias = "standard weatherboard")]
    StandardWeatherboard,
    Membrane,
}

impl ExteriorCladding {
    pub const ALL: [ExteriorCladding; 9] = [
        ExteriorCladding::Ply,
        ExteriorCladding::Corrugate,
        ExteriorCladding::Tray,
        ExteriorCladding::Longrun,
        ExteriorCladding::FiveRib,
        ExteriorCladding::Pir,
        ExteriorCladding::CedarWeatherboard,
        ExteriorCladding::StandardWeatherboard,
        ExteriorCladding::Membrane,
    ];

    /// Name used on BOM lines
    pub fn label(&self) -> &'static str {
        match self {
            ExteriorCladding::Ply => "ply",
            ExteriorCladding::Corrugate => "corrugate",
            ExteriorCladding::Tray => "tray",
            ExteriorCladding::Longrun => "longrun",
            ExteriorCladding::FiveRib => "fiveRib",
            ExteriorCladding::Pir => "PIR",
            ExteriorCladding::CedarWeatherboard => "cedar weatherboard",
            ExteriorCladding::StandardWeatherboard => "standard weatherboard",
            ExteriorCladding::Membrane => "membrane",
        }
    }

    /// Parse a label or key, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase().replace(['-', '_'], " ");
        ExteriorCladding::ALL.into_iter().find(|c| {
            let l = c.label().to_lowercase();
            l == wanted || l.replace(' ', "") == wanted.replace(' ', "")
        })
    }

    /// Sold and priced as sheets rather than per m²
    pub fn is_sheet(&self) -> bool {
        matches!(self, ExteriorCladding::Ply | ExteriorCladding::Pir)
    }

    /// Roofing family for pitch advisories; wall-only materials have none
    pub fn roof_cladding(&self) -> Option<RoofCladding> {
        match self {
            ExteriorCladding::Corrugate => Some(RoofCladding::Corrugate),
            ExteriorCladding::Tray | ExteriorCladding::Longrun => Some(RoofCladding::Longrun),
            ExteriorCladding::FiveRib => Some(RoofCladding::FiveRib),
            ExteriorCladding::Membrane => Some(RoofCladding::Membrane),
            ExteriorCladding::Ply
            | ExteriorCladding::Pir
            | ExteriorCladding::CedarWeatherboard
            | ExteriorCladding::StandardWeatherboard => None,
        }
    }

    /// Per-m² rate family; sheet materials fall back to longrun
    pub fn rate_key(&self) -> CladdingRate {
        match self {
            ExteriorCladding::Corrugate => CladdingRate::Corrugate,
            ExteriorCladding::FiveRib => CladdingRate::FiveRib,
            ExteriorCladding::Membrane => CladdingRate::Membrane,
            ExteriorCladding::CedarWeatherboard => CladdingRate::CedarWeatherboard,
            ExteriorCladding::StandardWeatherboard => CladdingRate::StandardWeatherboard,
            ExteriorCladding::Tray
            | ExteriorCladding::Longrun
            | ExteriorCladding::Ply
            | ExteriorCladding::Pir => CladdingRate::Longrun,
        }
    }
}

impl fmt::Display for ExteriorCladding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lining {
    #[default]
    None,
    Ply,
    Gib,
}

impl Lining {
    fn label(&self) -> &'static str {
        match self {
            Lining::None => "none",
            Lining::Ply => "ply",
            Lining::Gib => "gib",
        }
    }
}

/// Sheet dimensions in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub w: f64,
    pub h: f64,
}

impl Default for SheetSize {
    fn default() -> Self {
        SheetSize { w: 1.2, h: 2.4 }
    }
}

impl SheetSize {
    pub fn area(&self) -> f64 {
        finite_or_zero(self.w).max(0.0) * finite_or_zero(self.h).max(0.0)
    }
}

/// Cabin description. Lengths in mm, pitch in degrees.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 4000.0,
///   "width": 2000.0,
///   "height": 2400.0,
///   "roof_type": "dual",
///   "pitch_deg": 20.0,
///   "overhang": 300.0,
///   "openings": {
///     "windows": [{ "count": 1, "width": 1000.0, "height": 2000.0 }],
///     "doors": [{ "count": 1, "width": 860.0, "height": 1980.0 }]
///   },
///   "exterior_cladding": "cedarWeatherboard",
///   "lining": "gib",
///   "insulated": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinConfig {
    pub length: f64,
    pub width: f64,
    /// Floor to top plate / eave
    pub height: f64,
    pub roof_type: RoofType,
    /// Ignored for flat roofs
    pub pitch_deg: f64,
    /// Horizontal eave overhang
    pub overhang: f64,
    pub include_overhang_in_area: bool,
    pub rafter_spacing: f64,
    pub stud_spacing: f64,
    pub nog_spacing: f64,
    pub joist_spacing: f64,
    pub bearer_spacing: f64,
    pub pile_spacing: f64,
    pub openings: Openings,
    pub exterior_cladding: ExteriorCladding,
    pub lining: Lining,
    pub insulated: bool,
    pub electrical: bool,
    /// Sheet goods size (m)
    pub sheet_size: SheetSize,
}

impl Default for CabinConfig {
    fn default() -> Self {
        CabinConfig {
            length: 4000.0,
            width: 2000.0,
            height: 2400.0,
            roof_type: RoofType::Dual,
            pitch_deg: 20.0,
            overhang: 300.0,
            include_overhang_in_area: true,
            rafter_spacing: 600.0,
            stud_spacing: 600.0,
            nog_spacing: 800.0,
            joist_spacing: 600.0,
            bearer_spacing: 1800.0,
            pile_spacing: 1500.0,
            openings: Openings {
                windows: vec![Opening::new(1, 1000.0, 2000.0)],
                doors: vec![Opening::new(1, 860.0, 1980.0)],
            },
            exterior_cladding: ExteriorCladding::Corrugate,
            lining: Lining::None,
            insulated: false,
            electrical: false,
            sheet_size: SheetSize::default(),
        }
    }
}

// ============================================================================
// Result
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BomUnit {
    M,
    M2,
    Each,
    Sheet,
}

impl fmt::Display for BomUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BomUnit::M => "m",
            BomUnit::M2 => "m²",
            BomUnit::Each => "each",
            BomUnit::Sheet => "sheet",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BomCategory {
    Timber,
    Foundation,
    Openings,
    Cladding,
    Roof,
    Misc,
    Interior,
    Labour,
}

impl fmt::Display for BomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BomCategory::Timber => "timber",
            BomCategory::Foundation => "foundation",
            BomCategory::Openings => "openings",
            BomCategory::Cladding => "cladding",
            BomCategory::Roof => "roof",
            BomCategory::Misc => "misc",
            BomCategory::Interior => "interior",
            BomCategory::Labour => "labour",
        };
        f.write_str(s)
    }
}

/// One priced BOM line. `qty` and `rate` are stored rounded to 2 dp and
/// `subtotal` is computed from the stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    pub category: BomCategory,
    pub name: String,
    pub unit: BomUnit,
    pub qty: f64,
    pub rate: f64,
    pub subtotal: f64,
}

impl BomItem {
    pub fn new(category: BomCategory, name: impl Into<String>, unit: BomUnit, qty: f64, rate: f64) -> Self {
        let qty = round2(qty);
        let rate = round2(rate);
        BomItem {
            category,
            name: name.into(),
            unit,
            qty,
            rate,
            subtotal: round2(qty * rate),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BomTotals {
    pub ex_gst: f64,
    pub gst: f64,
    pub incl_gst: f64,
}

impl BomTotals {
    /// Sum line subtotals and apply GST at `gst_rate`
    pub fn from_items(items: &[BomItem], gst_rate: f64) -> Self {
        let ex_gst = round2(items.iter().map(|i| i.subtotal).sum());
        let gst = round2(ex_gst * gst_rate);
        BomTotals {
            ex_gst,
            gst,
            incl_gst: round2(ex_gst + gst),
        }
    }
}

/// Intermediate quantities behind the BOM (m, m², counts; unrounded).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CabinDebug {
    pub studs: u32,
    pub nog_rows: u32,
    pub nogs_lm: f64,
    pub plates_lm: f64,
    pub lintel_lm: f64,
    pub sill_lm: f64,
    pub rafters_per_side: u32,
    pub rafter_length_mm: f64,
    pub rafter_lm: f64,
    pub joists: u32,
    pub joist_lm: f64,
    pub rim_joist_lm: f64,
    pub bearers: u32,
    pub bearer_lm: f64,
    pub piles: u32,
    pub timber_lm: f64,
    pub wall_area_gross_m2: f64,
    pub wall_area_net_m2: f64,
    pub gable_extra_m2: f64,
    pub exterior_wall_area_m2: f64,
    pub roof_slope_area_m2: f64,
    pub ceiling_area_m2: f64,
    pub lining_area_m2: f64,
    pub window_area_m2: f64,
    pub door_area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinResult {
    pub items: Vec<BomItem>,
    pub totals: BomTotals,
    pub warnings: Vec<String>,
    pub debug: CabinDebug,
}

impl CabinResult {
    /// Subtotal of every line in `category`
    pub fn category_total(&self, category: BomCategory) -> f64 {
        round2(
            self.items
                .iter()
                .filter(|i| i.category == category)
                .map(|i| i.subtotal)
                .sum(),
        )
    }

    pub fn item(&self, name: &str) -> Option<&BomItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Clamp a dimension to a finite, non-negative value.
fn dimension(name: &str, value: f64, warnings: &mut Vec<String>) -> f64 {
    let clamped = finite_or_zero(value).max(0.0);
    if clamped != value {
        tracing::warn!(field = name, value, "cabin dimension clamped to 0");
        warnings.push(format!("{name} must be a positive number; treated as 0 mm."));
    }
    clamped
}

/// Spacing, or `None` (with a warning) when it cannot lay out members.
fn spacing(name: &str, members: &str, value: f64, warnings: &mut Vec<String>) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        tracing::warn!(field = name, value, "non-positive spacing");
        warnings.push(format!(
            "{name} must be greater than zero; {members} omitted from the estimate."
        ));
        None
    }
}

/// Members at `spacing` centres along `length`, counting both ends
fn members_along(length: f64, spacing: Option<f64>) -> u32 {
    spacing.map_or(0, |s| ((length / s).floor() as u32).saturating_add(1))
}

fn mm_to_m(mm: f64) -> f64 {
    Metres::from(Millimetres(mm)).value()
}

fn area_m2(a_mm: f64, b_mm: f64) -> f64 {
    SqMetres::from_mm(Millimetres(a_mm), Millimetres(b_mm)).value()
}

/// Price a cabin.
pub fn compute(config: &CabinConfig, settings: &PricingSettings) -> CabinResult {
    let mut warnings = Vec::new();

    let l = dimension("Length", config.length, &mut warnings);
    let w = dimension("Width", config.width, &mut warnings);
    let h = dimension("Height", config.height, &mut warnings);
    let perimeter = 2.0 * (l + w);

    let pitch = match config.roof_type {
        RoofType::Flat => 0.0,
        RoofType::Mono | RoofType::Dual => finite_or_zero(config.pitch_deg),
    };
    let overhang = finite_or_zero(config.overhang).max(0.0);

    // Advisories
    for warning in pitch_warnings(pitch, config.exterior_cladding.roof_cladding()) {
        warnings.push(warning.message);
    }
    let rafter_spacing = spacing("Rafter spacing", "rafters", config.rafter_spacing, &mut warnings);
    let stud_spacing = spacing("Stud spacing", "studs", config.stud_spacing, &mut warnings);
    let (rafter_min, rafter_max) = RAFTER_SPACING_RANGE;
    if rafter_spacing.is_some_and(|s| !(rafter_min..=rafter_max).contains(&s)) {
        warnings.push("Rafter spacing is outside typical range (300–900 mm).".to_string());
    }
    let (stud_min, stud_max) = STUD_SPACING_RANGE;
    if stud_spacing.is_some_and(|s| !(stud_min..=stud_max).contains(&s)) {
        warnings.push("Stud spacing is outside typical range (300–600 mm).".to_string());
    }
    let nog_spacing = spacing("Nog spacing", "nogs", config.nog_spacing, &mut warnings);
    let joist_spacing = spacing("Joist spacing", "joists", config.joist_spacing, &mut warnings);
    let bearer_spacing = spacing("Bearer spacing", "bearers and piles", config.bearer_spacing, &mut warnings);
    let pile_spacing = spacing("Pile spacing", "piles", config.pile_spacing, &mut warnings);

    // Openings
    let openings = &config.openings;
    let window_area = openings.window_area();
    let door_area = openings.door_area();
    let opening_widths = openings.window_width() + openings.door_width();
    let opening_count = openings.window_count().saturating_add(openings.door_count());

    // Walls
    let wall_area_gross = area_m2(perimeter, h);
    let wall_area_net = (wall_area_gross - window_area - door_area).max(0.0);

    // Roof
    let run = match config.roof_type {
        RoofType::Dual => w / 2.0,
        RoofType::Mono | RoofType::Flat => w,
    };
    let planes = f64::from(config.roof_type.planes());
    let roof_input = RoofRafterInput {
        half_span: Some(run),
        pitch: Some(pitch),
        overhang: Some(overhang),
        building_length: Some(l),
        rafter_spacing,
        include_overhang_in_area: Some(config.include_overhang_in_area),
        ..Default::default()
    };
    let roof = match roof_rafter::calculate(&roof_input) {
        Ok(roof) => roof,
        Err(e) => {
            tracing::warn!(error = %e, "roof geometry unsolvable, using flat fallback");
            warnings.push(format!("Roof geometry could not be solved ({}); priced as flat.", e.user_message()));
            None
        }
    };

    let rafter_length = roof.as_ref().map_or(run, |r| r.common);
    let roof_slope_area = match &roof {
        Some(r) => r.area_per_side_m2() * planes,
        None => {
            let depth = if config.include_overhang_in_area { run + overhang } else { run };
            area_m2(l, depth) * planes
        }
    };
    let gable_extra = match (&roof, config.roof_type) {
        (Some(r), RoofType::Dual) => area_m2(w, r.rise),
        (Some(r), RoofType::Mono) => area_m2(w, r.rise) * 0.5,
        _ => 0.0,
    };

    // Lining
    let ceiling_area = area_m2(l, w);
    let lining_wall_area = wall_area_net + gable_extra;
    let lining_area = match config.lining {
        Lining::None => 0.0,
        Lining::Ply | Lining::Gib => lining_wall_area + ceiling_area,
    };

    // Wall framing
    let studs = match stud_spacing {
        Some(s) => {
            let perimeter_studs = members_along(l, Some(s))
                .saturating_add(members_along(w, Some(s)))
                .saturating_mul(2);
            let displaced = (opening_widths / s).floor() as u32;
            perimeter_studs
                .saturating_sub(displaced)
                .saturating_add(CORNER_STUDS)
                .saturating_add(STUDS_PER_OPENING.saturating_mul(opening_count))
        }
        None => 0,
    };
    let nog_rows = nog_spacing.map_or(0, |s| ((h / s).ceil() as u32).saturating_sub(1));
    let nogs_lm = (mm_to_m(perimeter - opening_widths) * f64::from(nog_rows)).max(0.0);
    let plates_lm = mm_to_m(perimeter) * 3.0;
    let lintel_lm = mm_to_m(opening_widths);
    let sill_lm = mm_to_m(openings.window_width());

    // Floor
    let joists = members_along(l, joist_spacing);
    let joist_lm = f64::from(joists) * mm_to_m(w);
    let rim_joist_lm = mm_to_m(perimeter);
    let bearers = members_along(w, bearer_spacing);
    let bearer_lm = f64::from(bearers) * mm_to_m(l);
    let piles = pile_spacing.map_or(0, |s| bearers.saturating_mul(((l / s).ceil() as u32).saturating_add(1)));

    // Rafters
    let rafters_per_side = match &roof {
        Some(r) if r.rafter_count_per_side > 0 => r.rafter_count_per_side,
        _ => members_along(l, rafter_spacing),
    };
    let rafter_count = rafters_per_side.saturating_mul(config.roof_type.planes());
    let rafter_lm = f64::from(rafter_count) * mm_to_m(rafter_length);

    let exterior_wall_area = wall_area_net + gable_extra;

    let timber_lm = plates_lm
        + nogs_lm
        + lintel_lm
        + sill_lm
        + joist_lm
        + rim_joist_lm
        + bearer_lm
        + rafter_lm
        + f64::from(studs) * mm_to_m(h);

    // Priced lines
    let mut items = Vec::new();
    let mut push = |category, name: String, unit, qty: f64, rate: f64| {
        items.push(BomItem::new(category, name, unit, qty, rate));
    };

    push(BomCategory::Timber, "Timber (linear)".into(), BomUnit::M, timber_lm, settings.timber_per_m);

    if piles > 0 {
        push(BomCategory::Foundation, "Piles".into(), BomUnit::Each, f64::from(piles), settings.pile_per_each);
    }

    if window_area > 0.0 {
        push(BomCategory::Openings, "Windows".into(), BomUnit::M2, window_area, settings.window_per_m2);
    }
    let door_units = openings.door_count();
    if door_units > 0 {
        let doors = f64::from(door_units);
        push(BomCategory::Openings, "Doors".into(), BomUnit::Each, doors, settings.door_per_unit);
        push(BomCategory::Openings, "Door hardware".into(), BomUnit::Each, doors, settings.door_hardware_per_unit);
    }

    let cladding = config.exterior_cladding;
    if cladding.is_sheet() {
        let sheet_area = config.sheet_size.area();
        if sheet_area > 0.0 {
            let sheets = (exterior_wall_area / sheet_area * SHEET_WASTE_FACTOR).ceil();
            let rate = match cladding {
                ExteriorCladding::Pir => settings.sheet_costs.pir,
                _ => settings.sheet_costs.treated_ply,
            };
            if sheets > 0.0 {
                push(BomCategory::Cladding, format!("{cladding} (sheets)"), BomUnit::Sheet, sheets, rate);
            }
        } else {
            tracing::warn!(
                sheet_w = config.sheet_size.w,
                sheet_h = config.sheet_size.h,
                "sheet size has no area"
            );
            warnings.push("Sheet size must be greater than zero; wall sheets omitted from the estimate.".to_string());
        }
    } else if exterior_wall_area > 0.0 {
        let rate = settings.cladding_per_m2.rate(cladding.rate_key());
        push(BomCategory::Cladding, format!("{cladding} (walls)"), BomUnit::M2, exterior_wall_area, rate);
    }

    if exterior_wall_area > 0.0 {
        push(BomCategory::Cladding, "Building wrap".into(), BomUnit::M2, exterior_wall_area, settings.building_wrap_per_m2);
    }

    if roof_slope_area > 0.0 {
        let rate = settings.cladding_per_m2.rate(cladding.rate_key());
        push(BomCategory::Roof, "Roof cladding".into(), BomUnit::M2, roof_slope_area, rate);
        push(BomCategory::Roof, "Roof underlay".into(), BomUnit::M2, roof_slope_area, settings.underlay_per_m2);
    }

    let ridge_m = match config.roof_type {
        RoofType::Dual => mm_to_m(l),
        RoofType::Mono | RoofType::Flat => 0.0,
    };
    let gutter_m = match config.roof_type {
        RoofType::Dual => mm_to_m(2.0 * l),
        RoofType::Mono | RoofType::Flat => mm_to_m(l),
    };
    let barge_m = 2.0 * mm_to_m(rafter_length);
    let fascia_m = gutter_m;

    if ridge_m > 0.0 {
        push(BomCategory::Roof, "Ridge cap".into(), BomUnit::M, ridge_m, settings.ridge_cap_per_m);
    }
    if barge_m > 0.0 {
        push(BomCategory::Roof, "Barge cap".into(), BomUnit::M, barge_m, settings.barge_cap_per_m);
    }
    if gutter_m > 0.0 {
        push(BomCategory::Roof, "Gutter".into(), BomUnit::M, gutter_m, settings.gutter_per_m);
    }
    if fascia_m > 0.0 {
        push(BomCategory::Roof, "Fascia".into(), BomUnit::M, fascia_m, settings.fascia_per_m);
    }

    let envelope_area = exterior_wall_area + roof_slope_area;
    if envelope_area > 0.0 {
        push(BomCategory::Misc, "Fixings allowance".into(), BomUnit::M2, envelope_area, settings.fixings_allowance_per_m2);
    }

    if config.lining != Lining::None {
        let rate = match config.lining {
            Lining::Ply => settings.lining_per_m2.ply,
            _ => settings.lining_per_m2.gib,
        };
        push(
            BomCategory::Interior,
            format!("Internal lining ({})", config.lining.label()),
            BomUnit::M2,
            lining_area,
            rate,
        );
        if config.insulated {
            push(BomCategory::Interior, "Insulation".into(), BomUnit::M2, lining_wall_area + ceiling_area, settings.insulation_per_m2);
        }
    }

    if config.electrical {
        if settings.electrical_fixed > 0.0 {
            push(BomCategory::Interior, "Electrical (est.)".into(), BomUnit::Each, 1.0, settings.electrical_fixed);
        } else {
            push(BomCategory::Interior, "Electrical (est.)".into(), BomUnit::M2, lining_wall_area + ceiling_area, settings.electrical_per_m2);
        }
    }

    if envelope_area > 0.0 {
        push(BomCategory::Labour, "Labour (est.)".into(), BomUnit::M2, envelope_area, settings.labour_per_m2);
    }

    let totals = BomTotals::from_items(&items, settings.effective_gst_rate());

    tracing::debug!(
        items = items.len(),
        ex_gst = totals.ex_gst,
        incl_gst = totals.incl_gst,
        warnings = warnings.len(),
        "priced cabin"
    );

    CabinResult {
        items,
        totals,
        warnings,
        debug: CabinDebug {
            studs,
            nog_rows,
            nogs_lm,
            plates_lm,
            lintel_lm,
            sill_lm,
            rafters_per_side,
            rafter_length_mm: rafter_length,
            rafter_lm,
            joists,
            joist_lm,
            rim_joist_lm,
            bearers,
            bearer_lm,
            piles,
            timber_lm,
            wall_area_gross_m2: wall_area_gross,
            wall_area_net_m2: wall_area_net,
            gable_extra_m2: gable_extra,
            exterior_wall_area_m2: exterior_wall_area,
            roof_slope_area_m2: roof_slope_area,
            ceiling_area_m2: ceiling_area,
            lining_area_m2: lining_area,
            window_area_m2: window_area,
            door_area_m2: door_area,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4 × 2 × 2.4 m dual-pitch cabin with no openings
    fn basic() -> CabinConfig {
        CabinConfig {
            openings: Openings::default(),
            ..Default::default()
        }
    }

    fn priced(config: &CabinConfig) -> CabinResult {
        compute(config, &PricingSettings::default())
    }

    #[test]
    fn test_basic_dual_cabin() {
        let result = priced(&basic());
        assert!(!result.items.is_empty());
        assert!(result.totals.incl_gst > result.totals.ex_gst);
        assert!(result.totals.ex_gst > 0.0);
        assert!(result.warnings.len() < 5);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_basic_dual_cabin_quantities() {
        let result = priced(&basic());
        let d = &result.debug;

        // 2×7 + 2×4 perimeter studs + 8 corners
        assert_eq!(d.studs, 30);
        assert_eq!(d.nog_rows, 2);
        assert!((d.nogs_lm - 24.0).abs() < 1e-9);
        assert!((d.plates_lm - 36.0).abs() < 1e-9);
        assert_eq!(d.joists, 7);
        assert_eq!(d.bearers, 2);
        assert_eq!(d.piles, 8);
        assert_eq!(d.rafters_per_side, 7);
        assert_eq!(d.rafter_length_mm, 1064.18);
        // gable ends: 2.0 m × 0.36397 m rise
        assert!((d.gable_extra_m2 - 0.72794).abs() < 1e-4);
        assert!((d.wall_area_gross_m2 - 28.8).abs() < 1e-9);

        let timber = result.item("Timber (linear)").unwrap();
        assert_eq!(timber.qty, 180.9);
        assert_eq!(timber.category, BomCategory::Timber);

        let piles = result.item("Piles").unwrap();
        assert_eq!(piles.subtotal, 200.0);

        let walls = result.item("corrugate (walls)").unwrap();
        assert_eq!(walls.qty, 29.53);
        assert_eq!(walls.rate, 55.0);

        assert_eq!(result.item("Ridge cap").unwrap().qty, 4.0);
        assert_eq!(result.item("Gutter").unwrap().qty, 8.0);
        assert_eq!(result.item("Barge cap").unwrap().qty, 2.13);
        assert!(result.item("Windows").is_none());
        assert!(result.item("Electrical (est.)").is_none());
    }

    #[test]
    fn test_totals_are_additive() {
        let mut config = CabinConfig::default();
        config.lining = Lining::Gib;
        config.insulated = true;
        config.electrical = true;
        let result = priced(&config);

        let sum = round2(result.items.iter().map(|i| i.subtotal).sum());
        assert_eq!(result.totals.ex_gst, sum);
        assert_eq!(result.totals.gst, round2(result.totals.ex_gst * 0.15));
        assert_eq!(result.totals.incl_gst, round2(result.totals.ex_gst + result.totals.gst));
        for item in &result.items {
            assert_eq!(item.subtotal, round2(item.qty * item.rate), "{}", item.name);
        }
    }

    #[test]
    fn test_monotonic_in_length_and_width() {
        let base = priced(&basic()).totals.ex_gst;

        let longer = CabinConfig { length: 6000.0, ..basic() };
        assert!(priced(&longer).totals.ex_gst > base);

        let wider = CabinConfig { width: 3000.0, ..basic() };
        assert!(priced(&wider).totals.ex_gst > base);
    }

    #[test]
    fn test_openings() {
        let result = priced(&CabinConfig::default());
        let d = &result.debug;
        // 1.0 × 2.0 window, 0.86 × 1.98 door
        assert!((d.window_area_m2 - 2.0).abs() < 1e-9);
        assert!((d.door_area_m2 - 1.7028).abs() < 1e-9);
        assert!((d.wall_area_net_m2 - (28.8 - 2.0 - 1.7028)).abs() < 1e-9);
        // 30 base studs, minus floor(1860 / 600) = 3 displaced, plus 2 × 4 for openings
        assert_eq!(d.studs, 35);
        assert!((d.lintel_lm - 1.86).abs() < 1e-9);
        assert!((d.sill_lm - 1.0).abs() < 1e-9);

        assert_eq!(result.item("Windows").unwrap().subtotal, 700.0);
        assert_eq!(result.item("Doors").unwrap().subtotal, 250.0);
        assert_eq!(result.item("Door hardware").unwrap().subtotal, 85.0);
    }

    #[test]
    fn test_sheet_cladding_with_waste() {
        let config = CabinConfig {
            exterior_cladding: ExteriorCladding::Ply,
            ..basic()
        };
        let result = priced(&config);
        // 29.53 m² / 2.88 m² × 1.1 = 11.28 → 12 sheets
        let sheets = result.item("ply (sheets)").unwrap();
        assert_eq!(sheets.qty, 12.0);
        assert_eq!(sheets.rate, 65.0);
        assert_eq!(sheets.unit, BomUnit::Sheet);
        // roof falls back to the longrun rate
        assert_eq!(result.item("Roof cladding").unwrap().rate, 65.0);

        let pir = priced(&CabinConfig {
            exterior_cladding: ExteriorCladding::Pir,
            ..basic()
        });
        assert_eq!(pir.item("PIR (sheets)").unwrap().rate, 90.0);
    }

    #[test]
    fn test_zero_sheet_size_warns() {
        let config = CabinConfig {
            exterior_cladding: ExteriorCladding::Ply,
            sheet_size: SheetSize { w: 0.0, h: 2.4 },
            ..basic()
        };
        let result = priced(&config);
        assert!(result.items.iter().all(|i| i.unit != BomUnit::Sheet));
        assert!(result.warnings.iter().any(|w| w.contains("Sheet size")));
    }

    #[test]
    fn test_mono_roof_not_double_counted() {
        let mono = priced(&CabinConfig {
            roof_type: RoofType::Mono,
            ..basic()
        });
        let d = &mono.debug;
        // run is the full width: 2000 × tan 20° = 727.94 rise
        assert!((d.gable_extra_m2 - 2.0 * 0.72794 * 0.5).abs() < 1e-4);
        assert_eq!(d.rafters_per_side, 7);
        assert!(mono.item("Ridge cap").is_none());
        assert_eq!(mono.item("Gutter").unwrap().qty, 4.0);
        // one plane: 4 m × (2128.36 + 319.25) mm
        assert!((d.roof_slope_area_m2 - 4.0 * 2.44761).abs() < 1e-3);
    }

    #[test]
    fn test_flat_roof_fallback() {
        let flat = priced(&CabinConfig {
            roof_type: RoofType::Flat,
            exterior_cladding: ExteriorCladding::Membrane,
            ..basic()
        });
        let d = &flat.debug;
        assert_eq!(d.rafter_length_mm, 2000.0);
        assert_eq!(d.gable_extra_m2, 0.0);
        // 4 m × (2.0 + 0.3) m
        assert!((d.roof_slope_area_m2 - 9.2).abs() < 1e-9);
        // flat membrane advisory plus the 1.5° minimum
        assert!(flat.warnings.iter().any(|w| w.starts_with("Flat 0°")));
        assert!(flat.warnings.iter().any(|w| w.contains("below 1.5°")));
    }

    #[test]
    fn test_zero_dimensions_do_not_panic() {
        let config = CabinConfig {
            length: 0.0,
            width: -50.0,
            height: f64::NAN,
            ..basic()
        };
        let result = priced(&config);
        assert!(result.totals.ex_gst.is_finite());
        assert_eq!(result.debug.wall_area_gross_m2, 0.0);
        assert!(result.warnings.iter().any(|w| w.starts_with("Width")));
        assert!(result.warnings.iter().any(|w| w.starts_with("Height")));
        assert!(!result.warnings.iter().any(|w| w.starts_with("Length")));
    }

    #[test]
    fn test_spacing_warnings() {
        let config = CabinConfig {
            rafter_spacing: 1200.0,
            stud_spacing: 200.0,
            ..basic()
        };
        let result = priced(&config);
        assert!(result.warnings.contains(&"Rafter spacing is outside typical range (300–900 mm).".to_string()));
        assert!(result.warnings.contains(&"Stud spacing is outside typical range (300–600 mm).".to_string()));
    }

    #[test]
    fn test_zero_spacing_omits_members() {
        let config = CabinConfig {
            joist_spacing: 0.0,
            pile_spacing: -1.0,
            ..basic()
        };
        let result = priced(&config);
        assert_eq!(result.debug.joists, 0);
        assert_eq!(result.debug.piles, 0);
        assert!(result.item("Piles").is_none());
        assert!(result.warnings.iter().any(|w| w.starts_with("Joist spacing")));
        assert!(result.warnings.iter().any(|w| w.starts_with("Pile spacing")));
    }

    #[test]
    fn test_unusable_spacing_warns_once() {
        let config = CabinConfig {
            stud_spacing: f64::NAN,
            rafter_spacing: -600.0,
            ..basic()
        };
        let result = priced(&config);
        let stud = result.warnings.iter().filter(|w| w.starts_with("Stud spacing")).count();
        let rafter = result.warnings.iter().filter(|w| w.starts_with("Rafter spacing")).count();
        assert_eq!(stud, 1, "{:?}", result.warnings);
        assert_eq!(rafter, 1, "{:?}", result.warnings);
        assert!(!result.warnings.iter().any(|w| w.contains("typical range")));
        assert_eq!(result.debug.studs, 0);
    }

    #[test]
    fn test_tiny_spacings_saturate_counts() {
        let config = CabinConfig {
            stud_spacing: 1e-6,
            pile_spacing: 1e-6,
            joist_spacing: 1e-6,
            ..basic()
        };
        let result = priced(&config);
        assert_eq!(result.debug.studs, u32::MAX);
        assert_eq!(result.debug.piles, u32::MAX);
        assert!(result.totals.incl_gst.is_finite());
        assert!(result.item("Piles").is_some());
    }

    #[test]
    fn test_weatherboard_has_no_pitch_advisory() {
        let config = CabinConfig {
            exterior_cladding: ExteriorCladding::CedarWeatherboard,
            pitch_deg: 2.0,
            ..basic()
        };
        let result = priced(&config);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.item("cedar weatherboard (walls)").unwrap().rate, 145.0);
    }

    #[test]
    fn test_electrical_per_m2_when_no_fixed_price() {
        let mut settings = PricingSettings::default();
        settings.electrical_fixed = 0.0;
        settings.electrical_per_m2 = 10.0;
        let config = CabinConfig {
            electrical: true,
            ..basic()
        };
        let result = compute(&config, &settings);
        let electrical = result.item("Electrical (est.)").unwrap();
        assert_eq!(electrical.unit, BomUnit::M2);
        assert_eq!(electrical.rate, 10.0);
    }

    #[test]
    fn test_config_json() {
        let json = r#"{
            "length": 3000.0,
            "exterior_cladding": "cedar weatherboard",
            "lining": "ply",
            "roof_type": "mono"
        }"#;
        let config: CabinConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.length, 3000.0);
        assert_eq!(config.width, 2000.0);
        assert_eq!(config.exterior_cladding, ExteriorCladding::CedarWeatherboard);
        assert_eq!(config.roof_type, RoofType::Mono);

        let item = serde_json::to_value(BomItem::new(BomCategory::Roof, "Gutter", BomUnit::M2, 1.0, 2.0)).unwrap();
        assert_eq!(item["category"], "roof");
        assert_eq!(item["unit"], "m2");
    }

    #[test]
    fn test_cladding_labels() {
        assert_eq!(ExteriorCladding::from_label("PIR"), Some(ExteriorCladding::Pir));
        assert_eq!(ExteriorCladding::from_label("standard-weatherboard"), Some(ExteriorCladding::StandardWeatherboard));
        assert_eq!(ExteriorCladding::from_label("fiverib"), Some(ExteriorCladding::FiveRib));
        assert_eq!(ExteriorCladding::from_label("brick"), None);
        assert_eq!(ExteriorCladding::Tray.roof_cladding(), Some(RoofCladding::Longrun));
    }

    #[test]
    fn test_idempotent() {
        let config = CabinConfig::default();
        assert_eq!(priced(&config), priced(&config));
    }
}
