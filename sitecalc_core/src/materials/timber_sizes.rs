//! Standard Timber Sizes
//!
//! Nominal (sawn) versus actual (dressed) section sizes for NZ radiata
//! framing timber and US dimension lumber.
//!
//! ## Nominal vs Actual Dimensions
//!
//! NZ sizes are named by the sawn section in mm and dressed to a 45 mm
//! thickness (100×50 is 90×45 actual). US lumber is named in inches and
//! dressed down by ½" to ¾" (a 2x4 is 1.5" × 3.5").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::units::MM_PER_IN;

/// NZ framing timber, by nominal section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NzTimberSize {
    /// 75×50 (70×45)
    T75x50,
    /// 100×50 (90×45)
    #[default]
    T100x50,
    /// 140×50 (135×45)
    T140x50,
    /// 150×50 (140×45)
    T150x50,
    /// 190×50 (185×45)
    T190x50,
    /// 200×50 (190×45)
    T200x50,
    /// 240×50 (235×45)
    T240x50,
    /// 250×50 (240×45)
    T250x50,
    /// 300×50 (290×45)
    T300x50,
}

impl NzTimberSize {
    pub const ALL: [NzTimberSize; 9] = [
        NzTimberSize::T75x50,
        NzTimberSize::T100x50,
        NzTimberSize::T140x50,
        NzTimberSize::T150x50,
        NzTimberSize::T190x50,
        NzTimberSize::T200x50,
        NzTimberSize::T240x50,
        NzTimberSize::T250x50,
        NzTimberSize::T300x50,
    ];

    /// Sawn (depth, thickness) in mm
    pub fn nominal_mm(&self) -> (u32, u32) {
        match self {
            NzTimberSize::T75x50 => (75, 50),
            NzTimberSize::T100x50 => (100, 50),
            NzTimberSize::T140x50 => (140, 50),
            NzTimberSize::T150x50 => (150, 50),
            NzTimberSize::T190x50 => (190, 50),
            NzTimberSize::T200x50 => (200, 50),
            NzTimberSize::T240x50 => (240, 50),
            NzTimberSize::T250x50 => (250, 50),
            NzTimberSize::T300x50 => (300, 50),
        }
    }

    /// Dressed (depth, thickness) in mm
    pub fn actual_mm(&self) -> (u32, u32) {
        match self {
            NzTimberSize::T75x50 => (70, 45),
            NzTimberSize::T100x50 => (90, 45),
            NzTimberSize::T140x50 => (135, 45),
            NzTimberSize::T150x50 => (140, 45),
            NzTimberSize::T190x50 => (185, 45),
            NzTimberSize::T200x50 => (190, 45),
            NzTimberSize::T240x50 => (235, 45),
            NzTimberSize::T250x50 => (240, 45),
            NzTimberSize::T300x50 => (290, 45),
        }
    }

    /// Look up by nominal size; either order is accepted (50×100 = 100×50)
    pub fn from_nominal(a: u32, b: u32) -> Option<Self> {
        let key = (a.max(b), a.min(b));
        NzTimberSize::ALL.into_iter().find(|s| s.nominal_mm() == key)
    }
}

impl fmt::Display for NzTimberSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, t) = self.nominal_mm();
        write!(f, "{d}×{t}")
    }
}

/// US dimension lumber, by nominal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UsLumberSize {
    /// 2x4 (1.5" x 3.5")
    #[default]
    L2x4,
    /// 2x6 (1.5" x 5.5")
    L2x6,
    /// 2x8 (1.5" x 7.25")
    L2x8,
    /// 2x10 (1.5" x 9.25")
    L2x10,
    /// 2x12 (1.5" x 11.25")
    L2x12,
    /// 4x4 (3.5" x 3.5")
    L4x4,
}

impl UsLumberSize {
    pub const ALL: [UsLumberSize; 6] = [
        UsLumberSize::L2x4,
        UsLumberSize::L2x6,
        UsLumberSize::L2x8,
        UsLumberSize::L2x10,
        UsLumberSize::L2x12,
        UsLumberSize::L4x4,
    ];

    /// Nominal (thickness, width) in inches
    pub fn nominal_in(&self) -> (u32, u32) {
        match self {
            UsLumberSize::L2x4 => (2, 4),
            UsLumberSize::L2x6 => (2, 6),
            UsLumberSize::L2x8 => (2, 8),
            UsLumberSize::L2x10 => (2, 10),
            UsLumberSize::L2x12 => (2, 12),
            UsLumberSize::L4x4 => (4, 4),
        }
    }

    /// Actual (thickness, width) in inches
    pub fn actual_in(&self) -> (f64, f64) {
        match self {
            UsLumberSize::L2x4 => (1.5, 3.5),
            UsLumberSize::L2x6 => (1.5, 5.5),
            UsLumberSize::L2x8 => (1.5, 7.25),
            UsLumberSize::L2x10 => (1.5, 9.25),
            UsLumberSize::L2x12 => (1.5, 11.25),
            UsLumberSize::L4x4 => (3.5, 3.5),
        }
    }

    /// Actual (thickness, width) in mm
    pub fn actual_mm(&self) -> (f64, f64) {
        let (t, w) = self.actual_in();
        (t * MM_PER_IN, w * MM_PER_IN)
    }

    /// Look up by nominal size; either order is accepted (4x2 = 2x4)
    pub fn from_nominal(a: u32, b: u32) -> Option<Self> {
        let key = (a.min(b), a.max(b));
        UsLumberSize::ALL.into_iter().find(|s| s.nominal_in() == key)
    }
}

impl fmt::Display for UsLumberSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (t, w) = self.nominal_in();
        write!(f, "{t}x{w}")
    }
}

/// Split "100x50", "100×50" or "2 x 4" into two whole numbers
fn parse_pair(s: &str) -> Option<(u32, u32)> {
    let cleaned = s.trim().to_lowercase().replace('×', "x");
    let (a, b) = cleaned.split_once('x')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl FromStr for NzTimberSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pair(s)
            .and_then(|(a, b)| NzTimberSize::from_nominal(a, b))
            .ok_or_else(|| CalcError::invalid_input("size", s, "Unknown NZ timber size (e.g. 100x50)"))
    }
}

impl FromStr for UsLumberSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pair(s)
            .and_then(|(a, b)| UsLumberSize::from_nominal(a, b))
            .ok_or_else(|| CalcError::invalid_input("size", s, "Unknown US lumber size (e.g. 2x4)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nz_actual_sizes() {
        assert_eq!(NzTimberSize::T100x50.actual_mm(), (90, 45));
        assert_eq!(NzTimberSize::T75x50.actual_mm(), (70, 45));
        assert_eq!(NzTimberSize::T300x50.actual_mm(), (290, 45));
        for size in NzTimberSize::ALL {
            let (nd, nt) = size.nominal_mm();
            let (ad, at) = size.actual_mm();
            assert!(ad < nd && at < nt, "{size}");
        }
    }

    #[test]
    fn test_us_actual_sizes() {
        assert_eq!(UsLumberSize::L2x4.actual_in(), (1.5, 3.5));
        assert_eq!(UsLumberSize::L2x8.actual_in(), (1.5, 7.25));
        let (t, w) = UsLumberSize::L4x4.actual_mm();
        assert!((t - 88.9).abs() < 1e-9);
        assert!((w - 88.9).abs() < 1e-9);
    }

    #[test]
    fn test_parse() {
        assert_eq!("100x50".parse::<NzTimberSize>().unwrap(), NzTimberSize::T100x50);
        assert_eq!("50 × 190".parse::<NzTimberSize>().unwrap(), NzTimberSize::T190x50);
        assert_eq!("2x10".parse::<UsLumberSize>().unwrap(), UsLumberSize::L2x10);
        assert_eq!("4X4".parse::<UsLumberSize>().unwrap(), UsLumberSize::L4x4);
        assert!("125x50".parse::<NzTimberSize>().is_err());
        assert!("2x14".parse::<UsLumberSize>().is_err());
        assert!("lumber".parse::<UsLumberSize>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(NzTimberSize::T140x50.to_string(), "140×50");
        assert_eq!(UsLumberSize::L2x12.to_string(), "2x12");
    }
}
