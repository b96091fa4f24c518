//! Calculator commands.

use std::path::PathBuf;

use anyhow::Context as _;
use sitecalc_core::calculations::cabin::{self, CabinConfig, CabinResult, ExteriorCladding, Lining, RoofType};
use sitecalc_core::calculations::framing::{self, FramingCosts, FramingInput, FramingResult};
use sitecalc_core::calculations::gst::{self, GstInput, GstResult, GstSource};
use sitecalc_core::calculations::pitch::{pitch_warnings, PitchWarning, RoofCladding};
use sitecalc_core::calculations::roof_rafter::{self, RoofRafterInput, RoofRafterResult};
use sitecalc_core::calculations::stairs::{self, StairsField, StairsInput, StairsSolution};
use sitecalc_core::calculations::trig::{self, TriangleInput, TriangleSolution};
use tracing::instrument;

use super::Context;

fn parse_roof_cladding(s: &str) -> Result<RoofCladding, String> {
    RoofCladding::from_key(s).ok_or_else(|| {
        let known: Vec<_> = RoofCladding::ALL.iter().map(|c| c.key()).collect();
        format!("unknown roof cladding '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_exterior_cladding(s: &str) -> Result<ExteriorCladding, String> {
    ExteriorCladding::from_label(s).ok_or_else(|| {
        let known: Vec<_> = ExteriorCladding::ALL.iter().map(|c| c.label()).collect();
        format!("unknown cladding '{s}' (expected one of: {})", known.join(", "))
    })
}

// ============================================================================
// trig
// ============================================================================

#[derive(Debug, clap::Parser)]
pub struct Trig {
    /// Leg opposite angle A
    #[arg(long)]
    a: Option<f64>,

    /// Leg opposite angle B
    #[arg(long)]
    b: Option<f64>,

    /// Hypotenuse
    #[arg(long)]
    c: Option<f64>,

    /// Angle A in degrees
    #[arg(long = "angle-a")]
    angle_a: Option<f64>,

    /// Angle B in degrees
    #[arg(long = "angle-b")]
    angle_b: Option<f64>,
}

impl Trig {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let input = TriangleInput {
            a: self.a,
            b: self.b,
            c: self.c,
            angle_a: self.angle_a,
            angle_b: self.angle_b,
        };
        let Some(solution) = trig::solve(&input)? else {
            anyhow::bail!("Enter exactly two values (--a, --b, --c, --angle-a, --angle-b)");
        };
        context.emit(&solution, render_triangle)
    }
}

fn render_triangle(s: &TriangleSolution) -> String {
    [
        format!("a  = {:.2}", s.a),
        format!("b  = {:.2}", s.b),
        format!("c  = {:.2}", s.c),
        format!("A  = {:.2}°", s.angle_a),
        format!("B  = {:.2}°", s.angle_b),
        format!("area = {:.2}", s.area()),
    ]
    .join("\n")
        + "\n"
}

// ============================================================================
// roof
// ============================================================================

#[derive(Debug, clap::Parser)]
pub struct Roof {
    /// Full span (mm)
    #[arg(long)]
    span: Option<f64>,

    /// Half span / run (mm); wins over --span
    #[arg(long)]
    half_span: Option<f64>,

    /// Pitch (degrees)
    #[arg(long)]
    pitch: Option<f64>,

    /// Rise (mm)
    #[arg(long)]
    rise: Option<f64>,

    /// Common rafter length to the ridge line (mm)
    #[arg(long)]
    common: Option<f64>,

    /// Horizontal eave overhang (mm)
    #[arg(long)]
    overhang: Option<f64>,

    /// Ridge board thickness (mm)
    #[arg(long)]
    ridge_thickness: Option<f64>,

    /// Birdsmouth seat depth (mm)
    #[arg(long)]
    seat_depth: Option<f64>,

    /// Building length along the ridge (mm)
    #[arg(long)]
    building_length: Option<f64>,

    /// Rafter centres (mm)
    #[arg(long)]
    rafter_spacing: Option<f64>,

    /// Leave the overhang out of the roof area
    #[arg(long)]
    exclude_overhang: bool,
}

impl Roof {
    fn input(&self) -> RoofRafterInput {
        RoofRafterInput {
            span: self.span,
            half_span: self.half_span,
            pitch: self.pitch,
            rise: self.rise,
            common: self.common,
            overhang: self.overhang,
            ridge_thickness: self.ridge_thickness,
            seat_depth: self.seat_depth,
            building_length: self.building_length,
            rafter_spacing: self.rafter_spacing,
            include_overhang_in_area: Some(!self.exclude_overhang),
        }
    }

    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let Some(result) = roof_rafter::calculate(&self.input())? else {
            anyhow::bail!("Enter at least two of --rise, --half-span (or --span), --common, --pitch");
        };
        context.emit(&result, render_roof)
    }
}

fn render_roof(r: &RoofRafterResult) -> String {
    let mut lines = vec![
        format!("Span            {:>10.2} mm", r.span),
        format!("Half span       {:>10.2} mm", r.half_span),
        format!("Pitch           {:>10.2}°", r.pitch),
        format!("Rise            {:>10.2} mm", r.rise),
        format!("Common rafter   {:>10.2} mm", r.common),
        format!("  at ridge face {:>10.2} mm", r.common_at_ridge),
        format!("Overhang (slope){:>10.2} mm", r.overhang_slope),
        format!("Total rafter    {:>10.2} mm", r.total),
        format!("Plumb cut       {:>10.2}°", r.plumb),
        format!("Birdsmouth      {:>10.2}°", r.birdsmouth),
        format!("Seat length     {:>10.2} mm", r.seat_length),
    ];
    if r.area_total > 0.0 {
        lines.push(format!("Roof area       {:>10.2} m² ({:.2} m² per side)", r.area_total_m2(), r.area_per_side_m2()));
    }
    if r.rafter_count_per_side > 0 {
        lines.push(format!("Rafters         {:>10} per side", r.rafter_count_per_side));
    }
    lines.join("\n") + "\n"
}

// ============================================================================
// pitch
// ============================================================================

#[derive(Debug, clap::Parser)]
pub struct Pitch {
    /// Roof pitch (degrees)
    #[arg(allow_negative_numbers = true)]
    pitch_deg: f64,

    /// Roof cladding (corrugate, longrun, fiveRib, membrane, metalTile, ...)
    #[arg(long, value_parser = parse_roof_cladding)]
    cladding: Option<RoofCladding>,
}

impl Pitch {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let warnings = pitch_warnings(self.pitch_deg, self.cladding);
        context.emit(&warnings, |w| render_warnings(w))
    }
}

fn render_warnings(warnings: &[PitchWarning]) -> String {
    if warnings.is_empty() {
        return "No pitch advisories.\n".to_string();
    }
    warnings
        .iter()
        .map(|w| format!("[{:?}] {}\n", w.code, w.message))
        .collect()
}

// ============================================================================
// stairs
// ============================================================================

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StairsDriver {
    TotalRise,
    Risers,
    Treads,
    RiserHeight,
    Going,
    TotalRun,
    Angle,
}

impl From<StairsDriver> for StairsField {
    fn from(driver: StairsDriver) -> Self {
        match driver {
            StairsDriver::TotalRise => StairsField::TotalRise,
            StairsDriver::Risers => StairsField::RiserCount,
            StairsDriver::Treads => StairsField::TreadCount,
            StairsDriver::RiserHeight => StairsField::RiserHeight,
            StairsDriver::Going => StairsField::Going,
            StairsDriver::TotalRun => StairsField::TotalRun,
            StairsDriver::Angle => StairsField::Angle,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Stairs {
    /// Floor-to-floor rise (mm)
    total_rise: f64,

    /// Number of risers
    #[arg(long)]
    risers: Option<u32>,

    /// Number of treads
    #[arg(long)]
    treads: Option<u32>,

    /// Riser height (mm)
    #[arg(long)]
    riser_height: Option<f64>,

    /// Going (mm)
    #[arg(long)]
    going: Option<f64>,

    /// Total horizontal run (mm)
    #[arg(long)]
    total_run: Option<f64>,

    /// Pitch line angle (degrees)
    #[arg(long)]
    angle: Option<f64>,

    /// Value that drives the layout; defaults to the one given, else total rise
    #[arg(long, value_enum)]
    drive: Option<StairsDriver>,
}

impl Stairs {
    fn input(&self) -> StairsInput {
        let inferred = [
            (self.risers.is_some(), StairsField::RiserCount),
            (self.treads.is_some(), StairsField::TreadCount),
            (self.riser_height.is_some(), StairsField::RiserHeight),
            (self.going.is_some(), StairsField::Going),
            (self.total_run.is_some(), StairsField::TotalRun),
            (self.angle.is_some(), StairsField::Angle),
        ]
        .into_iter()
        .find_map(|(given, field)| given.then_some(field))
        .unwrap_or(StairsField::TotalRise);

        StairsInput {
            total_rise: Some(self.total_rise),
            risers: self.risers,
            treads: self.treads,
            riser_height: self.riser_height,
            going: self.going,
            total_run: self.total_run,
            angle: self.angle,
            last_edited: self.drive.map_or(inferred, StairsField::from),
        }
    }

    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let solution = stairs::solve(&self.input());
        context.emit(&solution, render_stairs)
    }
}

fn render_stairs(s: &StairsSolution) -> String {
    let mut lines = vec![
        format!("Total rise    {:>8.0} mm", s.total_rise),
        format!("Risers        {:>8}", s.risers),
        format!("Treads        {:>8}", s.treads),
        format!("Riser height  {:>8.1} mm", s.riser_height),
        format!("Going         {:>8.1} mm", s.going),
        format!("Total run     {:>8.0} mm", s.total_run),
        format!("Angle         {:>8.1}°", s.angle),
        format!("Compliant     {:>8}", if s.compliant { "yes" } else { "NO" }),
    ];
    if !s.notes.is_empty() {
        lines.push(s.notes.clone());
    }
    lines.join("\n") + "\n"
}

// ============================================================================
// cabin
// ============================================================================

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RoofArg {
    Flat,
    Mono,
    Dual,
}

impl From<RoofArg> for RoofType {
    fn from(arg: RoofArg) -> Self {
        match arg {
            RoofArg::Flat => RoofType::Flat,
            RoofArg::Mono => RoofType::Mono,
            RoofArg::Dual => RoofType::Dual,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LiningArg {
    None,
    Ply,
    Gib,
}

impl From<LiningArg> for Lining {
    fn from(arg: LiningArg) -> Self {
        match arg {
            LiningArg::None => Lining::None,
            LiningArg::Ply => Lining::Ply,
            LiningArg::Gib => Lining::Gib,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Cabin {
    /// Cabin description (JSON); flags below override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Length (mm)
    #[arg(long)]
    length: Option<f64>,

    /// Width (mm)
    #[arg(long)]
    width: Option<f64>,

    /// Wall height (mm)
    #[arg(long)]
    height: Option<f64>,

    #[arg(long, value_enum)]
    roof: Option<RoofArg>,

    /// Roof pitch (degrees)
    #[arg(long)]
    pitch: Option<f64>,

    /// Eave overhang (mm)
    #[arg(long)]
    overhang: Option<f64>,

    /// Exterior cladding (ply, corrugate, longrun, PIR, "cedar weatherboard", ...)
    #[arg(long, value_parser = parse_exterior_cladding)]
    cladding: Option<ExteriorCladding>,

    #[arg(long, value_enum)]
    lining: Option<LiningArg>,

    /// Add insulation behind the lining
    #[arg(long)]
    insulated: bool,

    /// Add the electrical package
    #[arg(long)]
    electrical: bool,
}

impl Cabin {
    fn config(&self) -> anyhow::Result<CabinConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("Invalid cabin JSON in {}", path.display()))?
            }
            None => CabinConfig::default(),
        };

        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(roof) = self.roof {
            config.roof_type = roof.into();
        }
        if let Some(pitch) = self.pitch {
            config.pitch_deg = pitch;
        }
        if let Some(overhang) = self.overhang {
            config.overhang = overhang;
        }
        if let Some(cladding) = self.cladding {
            config.exterior_cladding = cladding;
        }
        if let Some(lining) = self.lining {
            config.lining = lining.into();
        }
        config.insulated |= self.insulated;
        config.electrical |= self.electrical;
        Ok(config)
    }

    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let config = self.config()?;
        let pricing = context.pricing()?;
        let result = cabin::compute(&config, &pricing);
        context.emit(&result, render_cabin)
    }
}

fn render_cabin(r: &CabinResult) -> String {
    let mut lines = vec![format!(
        "{:<11} {:<36} {:>9} {:<5} {:>9} {:>10}",
        "Category", "Item", "Qty", "Unit", "Rate", "Subtotal"
    )];
    lines.extend(r.items.iter().map(|item| {
        format!(
            "{:<11} {:<36} {:>9.2} {:<5} {:>9.2} {:>10.2}",
            item.category.to_string(),
            item.name,
            item.qty,
            item.unit.to_string(),
            item.rate,
            item.subtotal
        )
    }));
    lines.push(String::new());
    lines.push(format!("{:>74} {:>10.2}", "Total excl. GST", r.totals.ex_gst));
    lines.push(format!("{:>74} {:>10.2}", "GST", r.totals.gst));
    lines.push(format!("{:>74} {:>10.2}", "Total incl. GST", r.totals.incl_gst));
    if !r.warnings.is_empty() {
        lines.push(String::new());
        lines.extend(r.warnings.iter().map(|w| format!("warning: {w}")));
    }
    lines.join("\n") + "\n"
}

// ============================================================================
// framing
// ============================================================================

#[derive(Debug, clap::Parser)]
pub struct Framing {
    /// Framing description (JSON)
    input: PathBuf,

    /// Price from the pricing file instead of the rates in the input
    #[arg(long)]
    use_pricing: bool,
}

impl Framing {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let mut input: FramingInput = serde_json::from_str(&text)
            .with_context(|| format!("Invalid framing JSON in {}", self.input.display()))?;
        if self.use_pricing {
            input.costs = FramingCosts::from_settings(&context.pricing()?);
        }
        let result = framing::calculate(&input)?;
        context.emit(&result, render_framing)
    }
}

fn render_framing(r: &FramingResult) -> String {
    let c = &r.costs;
    [
        format!("Gross area      {:>9.2} m²", r.total_area_m2),
        format!("Openings        {:>9.2} m²", r.openings_area_m2),
        format!("Net sheeting    {:>9.2} m²", r.net_sheeting_area_m2),
        format!("Members         {:>9}", r.total_members),
        format!("Timber          {:>9.2} m", r.timber_m),
        format!("Sheets          {:>9}", r.sheets),
        format!("Piles           {:>9}", r.pile_count),
        String::new(),
        format!("Timber          {:>9.2}", c.timber),
        format!("Opening framing {:>9.2}", c.opening_framing),
        format!("Sheets          {:>9.2}", c.sheets),
        format!("Paint           {:>9.2}", c.paint),
        format!("Piles           {:>9.2}", c.piles),
        format!("Windows         {:>9.2}", c.windows),
        format!("Doors           {:>9.2}", c.doors),
        format!("Total           {:>9.2}", c.grand_total),
    ]
    .join("\n")
        + "\n"
}

// ============================================================================
// gst
// ============================================================================

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GstFrom {
    Excl,
    Incl,
    Gst,
}

impl From<GstFrom> for GstSource {
    fn from(arg: GstFrom) -> Self {
        match arg {
            GstFrom::Excl => GstSource::Excl,
            GstFrom::Incl => GstSource::Incl,
            GstFrom::Gst => GstSource::Gst,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Gst {
    /// Known amount ($)
    amount: f64,

    /// What the amount is
    #[arg(long, value_enum, default_value = "excl")]
    from: GstFrom,

    /// GST rate as a fraction; defaults to the pricing file's rate
    #[arg(long)]
    rate: Option<f64>,
}

impl Gst {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let rate = match self.rate {
            Some(rate) => rate,
            None => context.pricing()?.effective_gst_rate(),
        };
        let result = gst::solve(&GstInput::new(self.from.into(), self.amount, rate));
        context.emit(&result, render_gst)
    }
}

fn render_gst(r: &GstResult) -> String {
    format!("Excl. GST {:>10.2}\nGST       {:>10.2}\nIncl. GST {:>10.2}\n", r.excl, r.gst, r.incl)
}
