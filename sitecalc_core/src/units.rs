//! # Unit Types
//!
//! Type-safe wrappers for the units used on a building site. These are plain
//! f64 newtypes: they serialize as bare numbers and cost nothing at runtime,
//! but keep millimetres from being mixed up with metres or inches.
//!
//! ## Metric Units (Primary)
//!
//! SiteCalc works in NZ metric internally:
//! - Length: millimetres (mm) for geometry, metres (m) for linear timber
//! - Area: square metres (m²)
//! - Volume: cubic metres (m³)
//!
//! Imperial units exist for the converters and US lumber tables.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::units::{Feet, Millimetres, Inches};
//!
//! let run = Millimetres(304.8);
//! let feet: Feet = run.into();
//! assert!((feet.0 - 1.0).abs() < 1e-9);
//!
//! let inches: Inches = Millimetres(25.4).into();
//! assert!((inches.0 - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimetres per inch
pub const MM_PER_IN: f64 = 25.4;

/// Millimetres per foot
pub const MM_PER_FT: f64 = 304.8;

/// Square feet per square metre
pub const SQFT_PER_SQM: f64 = 10.7639104167;

/// Square feet in one roofing "square"
pub const SQFT_PER_SQUARE: f64 = 100.0;

/// Cubic yards per cubic metre
pub const YD3_PER_M3: f64 = 1.30795062;

// ============================================================================
// Numeric helpers
// ============================================================================

/// Replace NaN and infinities with zero.
///
/// Every converter and estimator funnels raw input through this so that a
/// half-typed form field never poisons a whole result with NaN.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round to `dp` decimal places; non-finite values round to 0.
pub fn round_dp(value: f64, dp: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(dp);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

/// Round to 2 decimal places (cents, or hundredths of a millimetre)
pub fn round2(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Degrees to radians
pub fn to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Radians to degrees
pub fn to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

impl From<Metres> for Millimetres {
    fn from(m: Metres) -> Self {
        Millimetres(m.0 * 1000.0)
    }
}

impl From<Millimetres> for Inches {
    fn from(mm: Millimetres) -> Self {
        Inches(mm.0 / MM_PER_IN)
    }
}

impl From<Inches> for Millimetres {
    fn from(inches: Inches) -> Self {
        Millimetres(inches.0 * MM_PER_IN)
    }
}

impl From<Millimetres> for Feet {
    fn from(mm: Millimetres) -> Self {
        Feet(mm.0 / MM_PER_FT)
    }
}

impl From<Feet> for Millimetres {
    fn from(ft: Feet) -> Self {
        Millimetres(ft.0 * MM_PER_FT)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMetres(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFeet(pub f64);

/// Roofing squares (1 square = 100 ft²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Squares(pub f64);

impl SqMetres {
    /// Area of a rectangle given both sides in millimetres
    pub fn from_mm(length: Millimetres, width: Millimetres) -> Self {
        SqMetres(length.0 * width.0 / 1_000_000.0)
    }
}

impl From<SqMetres> for SqFeet {
    fn from(m2: SqMetres) -> Self {
        SqFeet(m2.0 * SQFT_PER_SQM)
    }
}

impl From<SqFeet> for SqMetres {
    fn from(ft2: SqFeet) -> Self {
        SqMetres(ft2.0 / SQFT_PER_SQM)
    }
}

impl From<SqFeet> for Squares {
    fn from(ft2: SqFeet) -> Self {
        Squares(ft2.0 / SQFT_PER_SQUARE)
    }
}

impl From<Squares> for SqFeet {
    fn from(sq: Squares) -> Self {
        SqFeet(sq.0 * SQFT_PER_SQUARE)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetres(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

impl From<CubicMetres> for CubicYards {
    fn from(m3: CubicMetres) -> Self {
        CubicYards(m3.0 * YD3_PER_M3)
    }
}

impl From<CubicYards> for CubicMetres {
    fn from(yd3: CubicYards) -> Self {
        CubicMetres(yd3.0 / YD3_PER_M3)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimetres);
impl_arithmetic!(Metres);
impl_arithmetic!(Inches);
impl_arithmetic!(Feet);
impl_arithmetic!(SqMetres);
impl_arithmetic!(SqFeet);
impl_arithmetic!(Squares);
impl_arithmetic!(CubicMetres);
impl_arithmetic!(CubicYards);
