//! # Calculations
//!
//! Every calculator in SiteCalc. Each one follows the same pattern:
//!
//! - `*Input` / `*Config` - Input parameters (JSON-serializable)
//! - `*Result` / `*Solution` - Results (JSON-serializable)
//! - a pure entry point (`solve`, `calculate` or `compute`)
//!
//! Solvers that can be asked before enough is known (triangle, roof)
//! return `Ok(None)` rather than an error.
//!
//! ## Available Calculations
//!
//! - [`trig`] - Right-triangle solver
//! - [`roof_rafter`] - Roof and common rafter geometry
//! - [`pitch`] - Minimum pitch advisories by roof cladding
//! - [`cabin`] - Cabin bill of materials and pricing
//! - [`stairs`] - Stair layout and compliance
//! - [`framing`] - Wall and floor framing estimate
//! - [`gst`] - GST from any one amount

pub mod cabin;
pub mod framing;
pub mod gst;
pub mod pitch;
pub mod roof_rafter;
pub mod stairs;
pub mod trig;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::PricingSettings;

// Re-export commonly used types
pub use cabin::{CabinConfig, CabinResult};
pub use framing::{FramingInput, FramingResult};
pub use gst::{GstInput, GstResult};
pub use pitch::{PitchWarning, RoofCladding};
pub use roof_rafter::{RoofRafterInput, RoofRafterResult};
pub use stairs::{StairsInput, StairsSolution};
pub use trig::{TriangleInput, TriangleSolution};

/// A saved calculation: a label plus the inputs for one calculator.
///
/// This allows storing heterogeneous calculations in a single estimate
/// while keeping each one typed.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Stairs", "label": "Deck stair", "input": { "total_rise": 1350.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Triangle {
        label: String,
        input: TriangleInput,
    },
    RoofRafter {
        label: String,
        input: RoofRafterInput,
    },
    Pitch {
        label: String,
        pitch_deg: f64,
        #[serde(default)]
        cladding: Option<RoofCladding>,
    },
    Stairs {
        label: String,
        input: StairsInput,
    },
    Cabin {
        label: String,
        config: CabinConfig,
    },
    Framing {
        label: String,
        input: FramingInput,
    },
    Gst {
        label: String,
        input: GstInput,
    },
}

/// Result of evaluating a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result")]
pub enum CalculationOutput {
    Triangle(Option<TriangleSolution>),
    RoofRafter(Option<RoofRafterResult>),
    Pitch(Vec<PitchWarning>),
    Stairs(StairsSolution),
    Cabin(CabinResult),
    Framing(FramingResult),
    Gst(GstResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Triangle { label, .. }
            | CalculationItem::RoofRafter { label, .. }
            | CalculationItem::Pitch { label, .. }
            | CalculationItem::Stairs { label, .. }
            | CalculationItem::Cabin { label, .. }
            | CalculationItem::Framing { label, .. }
            | CalculationItem::Gst { label, .. } => label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Triangle { .. } => "Triangle",
            CalculationItem::RoofRafter { .. } => "RoofRafter",
            CalculationItem::Pitch { .. } => "Pitch",
            CalculationItem::Stairs { .. } => "Stairs",
            CalculationItem::Cabin { .. } => "Cabin",
            CalculationItem::Framing { .. } => "Framing",
            CalculationItem::Gst { .. } => "Gst",
        }
    }

    /// Run the calculator. Only the cabin estimate reads `settings`; framing
    /// and GST carry their own rates.
    pub fn evaluate(&self, settings: &PricingSettings) -> CalcResult<CalculationOutput> {
        tracing::debug!(calc_type = self.calc_type(), label = self.label(), "evaluating");
        let output = match self {
            CalculationItem::Triangle { input, .. } => CalculationOutput::Triangle(trig::solve(input)?),
            CalculationItem::RoofRafter { input, .. } => {
                CalculationOutput::RoofRafter(roof_rafter::calculate(input)?)
            }
            CalculationItem::Pitch { pitch_deg, cladding, .. } => {
                CalculationOutput::Pitch(pitch::pitch_warnings(*pitch_deg, *cladding))
            }
            CalculationItem::Stairs { input, .. } => CalculationOutput::Stairs(stairs::solve(input)),
            CalculationItem::Cabin { config, .. } => CalculationOutput::Cabin(cabin::compute(config, settings)),
            CalculationItem::Framing { input, .. } => CalculationOutput::Framing(framing::calculate(input)?),
            CalculationItem::Gst { input, .. } => CalculationOutput::Gst(gst::solve(input)),
        };
        Ok(output)
    }
}
