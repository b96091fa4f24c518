//! # Roof Pitch Advisory
//!
//! Minimum roof pitch by cladding, per NZ E2/AS1 guidance, and the advisory
//! warnings raised when a design falls short. These never block a
//! calculation; they are attached to otherwise successful results.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::pitch::{pitch_warnings, PitchWarningCode, RoofCladding};
//!
//! let warnings = pitch_warnings(5.0, Some(RoofCladding::Corrugate));
//! assert_eq!(warnings.len(), 1);
//! assert_eq!(warnings[0].code, PitchWarningCode::MinPitch);
//! ```

use serde::{Deserialize, Serialize};

/// Steepest pitch considered buildable without specialist detailing
pub const MAX_BUILDABLE_PITCH_DEG: f64 = 60.0;

/// Roofing materials with a published minimum pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoofCladding {
    Corrugate,
    /// Trapezoidal / tray / standing seam longrun
    Longrun,
    FiveRib,
    Membrane,
    MetalTile,
    ConcreteTile,
    ClayTile,
    AsphaltShingle,
    Slate,
}

impl RoofCladding {
    /// All claddings, in the order they are offered for selection
    pub const ALL: [RoofCladding; 9] = [
        RoofCladding::Corrugate,
        RoofCladding::Longrun,
        RoofCladding::FiveRib,
        RoofCladding::Membrane,
        RoofCladding::MetalTile,
        RoofCladding::ConcreteTile,
        RoofCladding::ClayTile,
        RoofCladding::AsphaltShingle,
        RoofCladding::Slate,
    ];

    /// Minimum pitch in degrees
    pub fn min_pitch_deg(&self) -> f64 {
        match self {
            RoofCladding::Corrugate => 8.0,
            RoofCladding::Longrun => 3.0,
            RoofCladding::FiveRib => 3.0,
            RoofCladding::Membrane => 1.5,
            RoofCladding::MetalTile => 12.0,
            RoofCladding::ConcreteTile => 20.0,
            RoofCladding::ClayTile => 25.0,
            RoofCladding::AsphaltShingle => 18.0,
            RoofCladding::Slate => 22.0,
        }
    }

    /// Stable key, as used in pricing files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            RoofCladding::Corrugate => "corrugate",
            RoofCladding::Longrun => "longrun",
            RoofCladding::FiveRib => "fiveRib",
            RoofCladding::Membrane => "membrane",
            RoofCladding::MetalTile => "metalTile",
            RoofCladding::ConcreteTile => "concreteTile",
            RoofCladding::ClayTile => "clayTile",
            RoofCladding::AsphaltShingle => "asphaltShingle",
            RoofCladding::Slate => "slate",
        }
    }

    /// Look up a cladding by key. Tray and 5-rib spellings are accepted.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        if key.contains("tray") {
            return Some(RoofCladding::Longrun);
        }
        if key.contains("five") || key.contains("5 rib") || key.contains("5rib") {
            return Some(RoofCladding::FiveRib);
        }
        RoofCladding::ALL
            .into_iter()
            .find(|c| c.key().to_lowercase() == key)
    }
}

/// Kind of pitch advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitchWarningCode {
    /// Dead-flat membrane roof
    FlatMembrane,
    /// Below the cladding's minimum pitch
    MinPitch,
    /// Outside 0–60°
    Range,
}

/// A single pitch advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchWarning {
    pub code: PitchWarningCode,
    pub message: String,
}

/// Advisories for `pitch_deg` with the given roofing material.
///
/// A cladding of `None` (a wall-only material, say) skips the minimum-pitch
/// checks and only tests the buildable range.
pub fn pitch_warnings(pitch_deg: f64, cladding: Option<RoofCladding>) -> Vec<PitchWarning> {
    let mut warnings = Vec::new();

    if cladding == Some(RoofCladding::Membrane) && pitch_deg == 0.0 {
        warnings.push(PitchWarning {
            code: PitchWarningCode::FlatMembrane,
            message: "Flat 0° selected. Typical NZ E2/AS1 minimum for membrane roofs is ≥1.5°. \
                      Review manufacturer requirements."
                .to_string(),
        });
    }

    if let Some(min_pitch) = cladding.map(|c| c.min_pitch_deg()) {
        if pitch_deg < min_pitch {
            warnings.push(PitchWarning {
                code: PitchWarningCode::MinPitch,
                message: format!(
                    "Pitch {pitch_deg:.1}° is below {min_pitch}° for selected cladding \
                     (NZ E2/AS1 guidance; verify manufacturer requirements)."
                ),
            });
        }
    }

    if pitch_deg < 0.0 || pitch_deg > MAX_BUILDABLE_PITCH_DEG {
        warnings.push(PitchWarning {
            code: PitchWarningCode::Range,
            message: "Pitch is outside typical buildable range (0–60°).".to_string(),
        });
    }

    warnings
}
