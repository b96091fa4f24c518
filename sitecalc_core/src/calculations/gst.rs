//! # GST
//!
//! Goods and Services Tax from any one known amount. With rate `r`:
//!
//! - from exclusive: gst = excl × r, incl = excl + gst
//! - from inclusive: excl = incl / (1 + r), gst = incl − excl
//! - from GST amount: excl = gst / r, incl = excl + gst
//!
//! Negative and non-finite amounts are treated as 0. Results are rounded
//! to cents.
//!
//! ## Zero rate from a GST amount
//!
//! Exclusive cannot be derived from a GST amount at 0%. The amount is then
//! reported as the inclusive total with excl = gst = 0. This is a
//! best-effort fallback, not a tax rule; callers should not rely on it.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::gst::{solve, GstInput, GstSource};
//!
//! let result = solve(&GstInput::new(GstSource::Incl, 115.0, 0.15));
//! assert_eq!(result.excl, 100.0);
//! assert_eq!(result.gst, 15.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{finite_or_zero, round2};

/// NZ standard rate
pub const NZ_GST_RATE: f64 = 0.15;

/// Which amount is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GstSource {
    #[default]
    Excl,
    Incl,
    Gst,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GstInput {
    pub source: GstSource,
    /// The known amount, in dollars
    pub amount: f64,
    /// Decimal fraction (0.15 = 15%)
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    NZ_GST_RATE
}

impl GstInput {
    pub fn new(source: GstSource, amount: f64, rate: f64) -> Self {
        GstInput { source, amount, rate }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GstResult {
    pub excl: f64,
    pub incl: f64,
    pub gst: f64,
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

pub fn solve(input: &GstInput) -> GstResult {
    let rate = non_negative(input.rate);
    let amount = non_negative(input.amount);

    let (excl, incl, gst) = match input.source {
        GstSource::Excl => {
            let gst = amount * rate;
            (amount, amount + gst, gst)
        }
        GstSource::Incl => {
            let excl = amount / (1.0 + rate);
            (excl, amount, amount - excl)
        }
        GstSource::Gst if rate == 0.0 => {
            tracing::warn!(amount, "GST amount given at 0% rate; reporting it as the inclusive total");
            (0.0, amount, 0.0)
        }
        GstSource::Gst => {
            let excl = amount / rate;
            (excl, excl + amount, amount)
        }
    };

    GstResult {
        excl: round2(excl),
        incl: round2(incl),
        gst: round2(gst),
    }
}
