//! # Pricing Settings
//!
//! The rate table every estimate is priced against. Values are NZD excluding
//! GST unless noted. Missing keys in a stored file are filled from
//! [`PricingSettings::default`] so that older files keep loading as new rates
//! are added; `schema_version` records which layout a file was written with.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::settings::PricingSettings;
//!
//! // A partial file only overrides what it names
//! let settings: PricingSettings = serde_json::from_str(r#"{ "timber_per_m": 5.25 }"#).unwrap();
//! assert_eq!(settings.timber_per_m, 5.25);
//! assert_eq!(settings.gst_rate, 0.15);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Current schema version for pricing files
pub const SETTINGS_VERSION: &str = "0.1.0";

/// Per-unit rates used by the cabin and framing estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Layout version of the stored file
    pub schema_version: String,

    /// Framing timber, $/m
    pub timber_per_m: f64,
    /// Foundation piles, $/each
    pub pile_per_each: f64,
    /// Sheet goods, $/sheet
    pub sheet_costs: SheetCosts,
    pub paint_per_m2: f64,
    pub window_per_m2: f64,
    pub door_per_unit: f64,
    /// Wall and roof cladding, $/m²
    pub cladding_per_m2: CladdingRates,
    /// Internal lining, $/m²
    pub lining_per_m2: LiningRates,
    /// Electrical priced per m² of lined area (used when no fixed price)
    pub electrical_per_m2: f64,
    /// Electrical fixed price; takes precedence when positive
    pub electrical_fixed: f64,
    pub insulation_per_m2: f64,
    pub building_wrap_per_m2: f64,
    pub fixings_allowance_per_m2: f64,
    pub flashings_allowance_per_m: f64,
    pub door_hardware_per_unit: f64,
    pub gutter_per_m: f64,
    pub fascia_per_m: f64,
    pub ridge_cap_per_m: f64,
    pub barge_cap_per_m: f64,
    pub underlay_per_m2: f64,
    pub labour_per_m2: f64,
    /// GST as a decimal fraction (0.15 = 15%)
    pub gst_rate: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            schema_version: SETTINGS_VERSION.to_string(),
            timber_per_m: 4.5,
            pile_per_each: 25.0,
            sheet_costs: SheetCosts::default(),
            paint_per_m2: 15.0,
            window_per_m2: 350.0,
            door_per_unit: 250.0,
            cladding_per_m2: CladdingRates::default(),
            lining_per_m2: LiningRates::default(),
            electrical_per_m2: 0.0,
            electrical_fixed: 2995.0,
            insulation_per_m2: 20.0,
            building_wrap_per_m2: 4.5,
            fixings_allowance_per_m2: 6.0,
            flashings_allowance_per_m: 9.5,
            door_hardware_per_unit: 85.0,
            gutter_per_m: 18.0,
            fascia_per_m: 22.0,
            ridge_cap_per_m: 15.0,
            barge_cap_per_m: 14.0,
            underlay_per_m2: 6.0,
            labour_per_m2: 25.0,
            gst_rate: 0.15,
        }
    }
}

/// Sheet goods, $/sheet (2.4 × 1.2 m unless noted).
///
/// The roofing entries are legacy per-sheet prices; estimates prefer
/// [`CladdingRates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetCosts {
    pub treated_ply: f64,
    pub internal_ply: f64,
    pub corrugate: f64,
    pub longrun: f64,
    pub membrane: f64,
    pub metal_tile: f64,
    pub concrete_tile: f64,
    pub clay_tile: f64,
    pub asphalt_shingle: f64,
    pub slate: f64,
    pub gib: f64,
    pub pir: f64,
    pub vinyl: f64,
}

impl Default for SheetCosts {
    fn default() -> Self {
        SheetCosts {
            treated_ply: 65.0,
            internal_ply: 50.0,
            corrugate: 25.0,
            longrun: 40.0,
            membrane: 35.0,
            metal_tile: 30.0,
            concrete_tile: 28.0,
            clay_tile: 45.0,
            asphalt_shingle: 32.0,
            slate: 60.0,
            gib: 22.0,
            pir: 90.0,
            vinyl: 120.0,
        }
    }
}

/// Cladding rates, $/m² installed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CladdingRates {
    pub corrugate: f64,
    /// Tray / standing seam
    pub longrun: f64,
    pub five_rib: f64,
    pub membrane: f64,
    pub cedar_weatherboard: f64,
    pub standard_weatherboard: f64,
}

impl Default for CladdingRates {
    fn default() -> Self {
        CladdingRates {
            corrugate: 55.0,
            longrun: 65.0,
            five_rib: 60.0,
            membrane: 40.0,
            cedar_weatherboard: 145.0,
            standard_weatherboard: 95.0,
        }
    }
}

/// Which per-m² cladding rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CladdingRate {
    Corrugate,
    Longrun,
    FiveRib,
    Membrane,
    CedarWeatherboard,
    StandardWeatherboard,
}

impl CladdingRates {
    /// Rate for the given cladding family
    pub fn rate(&self, kind: CladdingRate) -> f64 {
        match kind {
            CladdingRate::Corrugate => self.corrugate,
            CladdingRate::Longrun => self.longrun,
            CladdingRate::FiveRib => self.five_rib,
            CladdingRate::Membrane => self.membrane,
            CladdingRate::CedarWeatherboard => self.cedar_weatherboard,
            CladdingRate::StandardWeatherboard => self.standard_weatherboard,
        }
    }
}

/// Internal lining rates, $/m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiningRates {
    pub ply: f64,
    pub gib: f64,
}

impl Default for LiningRates {
    fn default() -> Self {
        LiningRates { ply: 35.0, gib: 25.0 }
    }
}

impl PricingSettings {
    /// Check that every rate is a non-negative number and GST is a fraction.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in self.named_rates() {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Rate must be a non-negative number",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.gst_rate) {
            return Err(CalcError::invalid_input(
                "gst_rate",
                self.gst_rate.to_string(),
                "GST rate is a decimal fraction between 0 and 1 (e.g. 0.15)",
            ));
        }
        Ok(())
    }

    /// GST rate with invalid values treated as zero
    pub fn effective_gst_rate(&self) -> f64 {
        if self.gst_rate.is_finite() {
            self.gst_rate.max(0.0)
        } else {
            0.0
        }
    }

    fn named_rates(&self) -> Vec<(&'static str, f64)> {
        let s = &self.sheet_costs;
        let c = &self.cladding_per_m2;
        vec![
            ("timber_per_m", self.timber_per_m),
            ("pile_per_each", self.pile_per_each),
            ("paint_per_m2", self.paint_per_m2),
            ("window_per_m2", self.window_per_m2),
            ("door_per_unit", self.door_per_unit),
            ("electrical_per_m2", self.electrical_per_m2),
            ("electrical_fixed", self.electrical_fixed),
            ("insulation_per_m2", self.insulation_per_m2),
            ("building_wrap_per_m2", self.building_wrap_per_m2),
            ("fixings_allowance_per_m2", self.fixings_allowance_per_m2),
            ("flashings_allowance_per_m", self.flashings_allowance_per_m),
            ("door_hardware_per_unit", self.door_hardware_per_unit),
            ("gutter_per_m", self.gutter_per_m),
            ("fascia_per_m", self.fascia_per_m),
            ("ridge_cap_per_m", self.ridge_cap_per_m),
            ("barge_cap_per_m", self.barge_cap_per_m),
            ("underlay_per_m2", self.underlay_per_m2),
            ("labour_per_m2", self.labour_per_m2),
            ("sheet_costs.treated_ply", s.treated_ply),
            ("sheet_costs.internal_ply", s.internal_ply),
            ("sheet_costs.corrugate", s.corrugate),
            ("sheet_costs.longrun", s.longrun),
            ("sheet_costs.membrane", s.membrane),
            ("sheet_costs.metal_tile", s.metal_tile),
            ("sheet_costs.concrete_tile", s.concrete_tile),
            ("sheet_costs.clay_tile", s.clay_tile),
            ("sheet_costs.asphalt_shingle", s.asphalt_shingle),
            ("sheet_costs.slate", s.slate),
            ("sheet_costs.gib", s.gib),
            ("sheet_costs.pir", s.pir),
            ("sheet_costs.vinyl", s.vinyl),
            ("cladding_per_m2.corrugate", c.corrugate),
            ("cladding_per_m2.longrun", c.longrun),
            ("cladding_per_m2.five_rib", c.five_rib),
            ("cladding_per_m2.membrane", c.membrane),
            ("cladding_per_m2.cedar_weatherboard", c.cedar_weatherboard),
            ("cladding_per_m2.standard_weatherboard", c.standard_weatherboard),
            ("lining_per_m2.ply", self.lining_per_m2.ply),
            ("lining_per_m2.gib", self.lining_per_m2.gib),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PricingSettings::default();
        assert_eq!(settings.timber_per_m, 4.5);
        assert_eq!(settings.sheet_costs.treated_ply, 65.0);
        assert_eq!(settings.cladding_per_m2.cedar_weatherboard, 145.0);
        assert_eq!(settings.lining_per_m2.gib, 25.0);
        assert_eq!(settings.schema_version, SETTINGS_VERSION);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_nested_file_fills_defaults() {
        let json = r#"{ "cladding_per_m2": { "corrugate": 60.0 }, "gst_rate": 0.1 }"#;
        let settings: PricingSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.cladding_per_m2.corrugate, 60.0);
        assert_eq!(settings.cladding_per_m2.longrun, 65.0);
        assert_eq!(settings.gst_rate, 0.1);
        assert_eq!(settings.pile_per_each, 25.0);
    }

    #[test]
    fn test_validation() {
        let mut settings = PricingSettings::default();
        settings.sheet_costs.pir = -1.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "sheet_costs.pir"));

        let mut settings = PricingSettings::default();
        settings.gst_rate = 15.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cladding_rate_lookup() {
        let rates = CladdingRates::default();
        assert_eq!(rates.rate(CladdingRate::FiveRib), 60.0);
        assert_eq!(rates.rate(CladdingRate::StandardWeatherboard), 95.0);
    }

    #[test]
    fn test_effective_gst_rate() {
        let mut settings = PricingSettings::default();
        settings.gst_rate = f64::NAN;
        assert_eq!(settings.effective_gst_rate(), 0.0);
        settings.gst_rate = -0.2;
        assert_eq!(settings.effective_gst_rate(), 0.0);
    }
}
