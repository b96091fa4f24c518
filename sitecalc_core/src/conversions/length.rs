//! Length and slope conversions.

use serde::{Deserialize, Serialize};

use crate::units::{finite_or_zero, Feet, Inches, Metres, Millimetres};

/// Finest fraction used when rendering inches
pub const INCH_FRACTION_DENOMINATOR: u32 = 64;

/// A length expressed in every supported unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthConversion {
    pub mm: f64,
    pub m: f64,
    pub inches: f64,
    pub feet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Mm,
    M,
    In,
    Ft,
}

impl LengthUnit {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "mm" => Some(LengthUnit::Mm),
            "m" => Some(LengthUnit::M),
            "in" | "\"" | "inch" | "inches" => Some(LengthUnit::In),
            "ft" | "'" | "foot" | "feet" => Some(LengthUnit::Ft),
            _ => None,
        }
    }
}

/// Convert `value` in `unit` to every other unit. Non-finite input is 0.
pub fn convert_length(value: f64, unit: LengthUnit) -> LengthConversion {
    let value = finite_or_zero(value);
    let mm = match unit {
        LengthUnit::Mm => Millimetres(value),
        LengthUnit::M => Metres(value).into(),
        LengthUnit::In => Inches(value).into(),
        LengthUnit::Ft => Feet(value).into(),
    };
    LengthConversion {
        mm: mm.value(),
        m: Metres::from(mm).value(),
        inches: Inches::from(mm).value(),
        feet: Feet::from(mm).value(),
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Render decimal inches as a whole-and-fraction string to the nearest 1/64".
///
/// ```rust
/// use sitecalc_core::conversions::decimal_to_fraction_inches;
///
/// assert_eq!(decimal_to_fraction_inches(1.5), "1 1/2\"");
/// assert_eq!(decimal_to_fraction_inches(0.171875), "11/64\"");
/// ```
pub fn decimal_to_fraction_inches(decimal_inches: f64) -> String {
    let decimal = finite_or_zero(decimal_inches).max(0.0);
    if decimal == 0.0 {
        return "0\"".to_string();
    }

    let mut whole = decimal.floor() as u64;
    let mut numerator = ((decimal - whole as f64) * f64::from(INCH_FRACTION_DENOMINATOR)).round() as u32;
    if numerator == INCH_FRACTION_DENOMINATOR {
        whole += 1;
        numerator = 0;
    }
    if numerator == 0 {
        return format!("{whole}\"");
    }

    let divisor = gcd(numerator, INCH_FRACTION_DENOMINATOR);
    let num = numerator / divisor;
    let den = INCH_FRACTION_DENOMINATOR / divisor;
    if whole > 0 {
        format!("{whole} {num}/{den}\"")
    } else {
        format!("{num}/{den}\"")
    }
}

// ============================================================================
// Slope / fall
// ============================================================================

/// A slope expressed as an angle, a percentage grade and a fall per metre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeConversion {
    pub degrees: f64,
    pub percent: f64,
    pub mm_per_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeUnit {
    Degrees,
    Percent,
    MmPerM,
}

pub fn deg_to_percent(deg: f64) -> f64 {
    finite_or_zero(finite_or_zero(deg).to_radians().tan() * 100.0)
}

pub fn percent_to_deg(percent: f64) -> f64 {
    (finite_or_zero(percent) / 100.0).atan().to_degrees()
}

pub fn mm_per_m_to_percent(mm_per_m: f64) -> f64 {
    finite_or_zero(mm_per_m) / 10.0
}

pub fn percent_to_mm_per_m(percent: f64) -> f64 {
    finite_or_zero(percent) * 10.0
}

pub fn mm_per_m_to_deg(mm_per_m: f64) -> f64 {
    (finite_or_zero(mm_per_m) / 1000.0).atan().to_degrees()
}

pub fn deg_to_mm_per_m(deg: f64) -> f64 {
    finite_or_zero(finite_or_zero(deg).to_radians().tan() * 1000.0)
}

/// Convert a slope in `unit` to all three forms
pub fn convert_slope(value: f64, unit: SlopeUnit) -> SlopeConversion {
    let percent = match unit {
        SlopeUnit::Degrees => deg_to_percent(value),
        SlopeUnit::Percent => finite_or_zero(value),
        SlopeUnit::MmPerM => mm_per_m_to_percent(value),
    };
    let degrees = match unit {
        SlopeUnit::Degrees => finite_or_zero(value),
        _ => percent_to_deg(percent),
    };
    SlopeConversion {
        degrees,
        percent,
        mm_per_m: percent_to_mm_per_m(percent),
    }
}
