//! `sitecalc convert ...`

use serde::Serialize;
use sitecalc_core::conversions::{
    self, convert_length, convert_slope, decimal_to_fraction_inches, DrillSize, LengthConversion, LengthUnit,
    PilotHoles, Scale, SlopeConversion, SlopeUnit, ThreadSuggestion,
};
use sitecalc_core::materials::{NzTimberSize, UsLumberSize};
use tracing::instrument;

use super::Context;

fn parse_length_unit(s: &str) -> Result<LengthUnit, String> {
    LengthUnit::from_symbol(s).ok_or_else(|| format!("unknown length unit '{s}' (expected mm, m, in or ft)"))
}

/// Parse `1:100` (or a bare `100`, read as 1:100)
fn parse_scale(s: &str) -> Result<Scale, String> {
    let number = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid scale '{s}' (expected e.g. 1:100)"))
    };
    match s.split_once(':') {
        Some((n, d)) => Ok(Scale::new(number(n)?, number(d)?)),
        None => Ok(Scale::new(1.0, number(s)?)),
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SlopeArg {
    Degrees,
    Percent,
    MmPerM,
}

impl From<SlopeArg> for SlopeUnit {
    fn from(arg: SlopeArg) -> Self {
        match arg {
            SlopeArg::Degrees => SlopeUnit::Degrees,
            SlopeArg::Percent => SlopeUnit::Percent,
            SlopeArg::MmPerM => SlopeUnit::MmPerM,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum AreaUnit {
    M2,
    Ft2,
    Squares,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum VolumeUnit {
    M3,
    Yd3,
}

#[derive(Debug, clap::Subcommand)]
pub enum Convert {
    /// Length between mm, m, inches and feet
    Length {
        value: f64,
        /// mm, m, in or ft
        #[arg(value_parser = parse_length_unit)]
        unit: LengthUnit,
    },

    /// Slope between degrees, percent grade and mm fall per metre
    Slope {
        value: f64,
        #[arg(value_enum)]
        unit: SlopeArg,
    },

    /// Area between m², ft² and roofing squares
    Area {
        value: f64,
        #[arg(value_enum)]
        unit: AreaUnit,
    },

    /// Volume between m³ and yd³, with premix bag count
    Volume {
        value: f64,
        #[arg(value_enum)]
        unit: VolumeUnit,
        /// Yield of one bag of premix (m³)
        #[arg(long)]
        bag_yield: Option<f64>,
    },

    /// Drawing scale, plan to real or back
    Scale {
        /// Scale ratio, e.g. 1:100
        #[arg(value_parser = parse_scale)]
        scale: Scale,
        /// Measured distance on the plan
        #[arg(long, conflicts_with = "real", required_unless_present = "real")]
        plan: Option<f64>,
        /// Distance on site
        #[arg(long)]
        real: Option<f64>,
    },

    /// Screw gauge, diameter and pilot holes
    Gauge {
        /// Screw gauge (4, 6, 8, 10, 12, 14)
        #[arg(long, conflicts_with = "mm", required_unless_present = "mm")]
        gauge: Option<u32>,
        /// Measured major diameter (mm)
        #[arg(long)]
        mm: Option<f64>,
    },

    /// Thread pitch and TPI, with nearest UNC/UNF match
    Thread {
        /// Thread pitch (mm)
        #[arg(long, conflicts_with = "tpi", required_unless_present = "tpi")]
        pitch: Option<f64>,
        /// Threads per inch
        #[arg(long)]
        tpi: Option<f64>,
        /// Measured bolt diameter (mm), to suggest a UN thread
        #[arg(long)]
        diameter: Option<f64>,
    },

    /// Nearest fractional, letter and metric drills
    Drill {
        /// Hole size (mm)
        mm: f64,
    },

    /// Actual dressed size of NZ metric or US nominal timber
    Timber {
        /// Nominal size, e.g. 100x50 or 2x4
        size: String,
    },
}

#[derive(Debug, Serialize)]
struct LengthReport {
    #[serde(flatten)]
    conversion: LengthConversion,
    fraction_inches: String,
}

#[derive(Debug, Serialize)]
struct AreaReport {
    m2: f64,
    ft2: f64,
    squares: f64,
}

#[derive(Debug, Serialize)]
struct VolumeReport {
    m3: f64,
    yd3: f64,
    bags: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ScaleReport {
    plan: f64,
    real: f64,
}

#[derive(Debug, Serialize)]
struct GaugeReport {
    gauge: u32,
    major_mm: f64,
    pilot: PilotHoles,
}

#[derive(Debug, Serialize)]
struct ThreadReport {
    pitch_mm: f64,
    tpi: f64,
    suggestion: Option<ThreadSuggestion>,
}

#[derive(Debug, Serialize)]
struct TimberReport {
    system: &'static str,
    nominal: String,
    actual_mm: (f64, f64),
    actual_in: Option<(f64, f64)>,
}

impl Convert {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Length { value, unit } => {
                let conversion = convert_length(value, unit);
                let report = LengthReport {
                    fraction_inches: decimal_to_fraction_inches(conversion.inches),
                    conversion,
                };
                context.emit(&report, |r| {
                    format!(
                        "{:.2} mm\n{:.4} m\n{:.4} in ({})\n{:.4} ft\n",
                        r.conversion.mm, r.conversion.m, r.conversion.inches, r.fraction_inches, r.conversion.feet
                    )
                })
            }
            Self::Slope { value, unit } => context.emit(&convert_slope(value, unit.into()), render_slope),
            Self::Area { value, unit } => {
                let m2 = match unit {
                    AreaUnit::M2 => conversions::ft2_to_m2(conversions::m2_to_ft2(value)),
                    AreaUnit::Ft2 => conversions::ft2_to_m2(value),
                    AreaUnit::Squares => conversions::squares_to_m2(value),
                };
                let report = AreaReport {
                    m2,
                    ft2: conversions::m2_to_ft2(m2),
                    squares: conversions::m2_to_squares(m2),
                };
                context.emit(&report, |r| format!("{:.3} m²\n{:.3} ft²\n{:.3} squares\n", r.m2, r.ft2, r.squares))
            }
            Self::Volume { value, unit, bag_yield } => {
                let m3 = match unit {
                    VolumeUnit::M3 => conversions::yd3_to_m3(conversions::m3_to_yd3(value)),
                    VolumeUnit::Yd3 => conversions::yd3_to_m3(value),
                };
                let report = VolumeReport {
                    m3,
                    yd3: conversions::m3_to_yd3(m3),
                    bags: bag_yield.map(|y| conversions::bags_needed(m3, y)),
                };
                context.emit(&report, |r| {
                    let mut text = format!("{:.3} m³\n{:.3} yd³\n", r.m3, r.yd3);
                    if let Some(bags) = r.bags {
                        text += &format!("{bags} bags\n");
                    }
                    text
                })
            }
            Self::Scale { scale, plan, real } => {
                let report = match (plan, real) {
                    (Some(plan), _) => ScaleReport {
                        plan,
                        real: scale.plan_to_real(plan),
                    },
                    (None, Some(real)) => ScaleReport {
                        plan: scale.real_to_plan(real),
                        real,
                    },
                    (None, None) => anyhow::bail!("Give --plan or --real"),
                };
                context.emit(&report, |r| format!("plan {:.3}\nreal {:.3}\n", r.plan, r.real))
            }
            Self::Gauge { gauge, mm } => {
                let (gauge, major_mm) = match (gauge, mm) {
                    (Some(gauge), _) => {
                        let major_mm = conversions::gauge_to_mm(gauge);
                        if major_mm == 0.0 {
                            anyhow::bail!("Unlisted screw gauge #{gauge} (expected 4, 6, 8, 10, 12 or 14)");
                        }
                        (gauge, major_mm)
                    }
                    (None, Some(mm)) => conversions::nearest_gauge(mm),
                    (None, None) => anyhow::bail!("Give --gauge or --mm"),
                };
                let report = GaugeReport {
                    gauge,
                    major_mm,
                    pilot: conversions::pilot_holes(major_mm),
                };
                context.emit(&report, |r| {
                    format!(
                        "#{} = {:.1} mm\npilot softwood {:.1} mm\npilot hardwood {:.1} mm\n",
                        r.gauge, r.major_mm, r.pilot.softwood_mm, r.pilot.hardwood_mm
                    )
                })
            }
            Self::Thread { pitch, tpi, diameter } => {
                let (pitch_mm, tpi) = match (pitch, tpi) {
                    (Some(pitch), _) => (pitch, conversions::tpi_from_pitch(pitch)),
                    (None, Some(tpi)) => (conversions::pitch_from_tpi(tpi), tpi),
                    (None, None) => anyhow::bail!("Give --pitch or --tpi"),
                };
                let report = ThreadReport {
                    pitch_mm,
                    tpi,
                    suggestion: diameter.map(|d| conversions::nearest_un_series(d, tpi)),
                };
                context.emit(&report, render_thread)
            }
            Self::Drill { mm } => context.emit(&conversions::nearest_drills(mm), |drills| render_drills(drills)),
            Self::Timber { size } => context.emit(&timber_report(&size)?, |r| {
                let mut text = format!(
                    "{} {} dresses to {:.0} × {:.0} mm\n",
                    r.system, r.nominal, r.actual_mm.0, r.actual_mm.1
                );
                if let Some((w, d)) = r.actual_in {
                    text += &format!("({w}\" × {d}\")\n");
                }
                text
            }),
        }
    }
}

fn render_slope(s: &SlopeConversion) -> String {
    format!("{:.2}°\n{:.2} %\n{:.1} mm/m\n", s.degrees, s.percent, s.mm_per_m)
}

fn render_thread(r: &ThreadReport) -> String {
    let mut text = format!("pitch {:.3} mm\n{:.2} TPI\n", r.pitch_mm, r.tpi);
    if let Some(s) = &r.suggestion {
        text += &format!(
            "nearest: {} {}-{:?}\n",
            decimal_to_fraction_inches(s.nearest_diameter_in),
            s.suggested_tpi,
            s.series
        );
    }
    text
}

fn render_drills(drills: &[DrillSize]) -> String {
    drills
        .iter()
        .map(|d| format!("{:<9} {:<8} {:.3} mm ({:.4}\")\n", format!("{:?}", d.kind), d.label, d.mm, d.inches))
        .collect()
}

/// NZ metric sizes are tried first; `4x4` only exists in the US table.
fn timber_report(size: &str) -> anyhow::Result<TimberReport> {
    if let Ok(nz) = size.parse::<NzTimberSize>() {
        let (d, t) = nz.actual_mm();
        return Ok(TimberReport {
            system: "NZ",
            nominal: nz.to_string(),
            actual_mm: (f64::from(d), f64::from(t)),
            actual_in: None,
        });
    }
    let us: UsLumberSize = size
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown timber size '{size}' (e.g. 100x50 or 2x4)"))?;
    Ok(TimberReport {
        system: "US",
        nominal: us.to_string(),
        actual_mm: us.actual_mm(),
        actual_in: Some(us.actual_in()),
    })
}
