//! # Conversions
//!
//! Stateless unit and engineering conversions for site work. Every function
//! is total: NaN, infinities and (where meaningless) negatives are treated
//! as 0 instead of failing.
//!
//! - [`length`] - mm / m / in / ft, fractional inches, slope and fall
//! - [`area_volume`] - m² / ft² / squares, m³ / yd³, premix bags, drawing scale
//! - [`fasteners`] - screw gauges, pilot holes, thread pitch, drill sizes
//!
//! Timber nominal/actual tables live in [`crate::materials`].
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::conversions::{convert_length, nearest_fraction_drill, LengthUnit};
//!
//! let c = convert_length(1.0, LengthUnit::Ft);
//! assert!((c.mm - 304.8).abs() < 1e-9);
//!
//! assert_eq!(nearest_fraction_drill(4.2).label, "11/64\"");
//! ```

pub mod area_volume;
pub mod fasteners;
pub mod length;

pub use area_volume::{
    bags_needed, ft2_to_m2, m2_to_ft2, m2_to_squares, m3_to_yd3, squares_to_m2, yd3_to_m3, Scale,
};
pub use fasteners::{
    gauge_to_mm, nearest_drills, nearest_fraction_drill, nearest_gauge, nearest_letter_drill,
    nearest_metric_drill, nearest_un_series, pilot_holes, pitch_from_tpi, tpi_from_pitch, DrillKind,
    DrillSize, PilotHoles, ThreadSeries, ThreadSuggestion,
};
pub use length::{
    convert_length, convert_slope, decimal_to_fraction_inches, deg_to_mm_per_m, deg_to_percent,
    mm_per_m_to_deg, mm_per_m_to_percent, percent_to_deg, percent_to_mm_per_m, LengthConversion,
    LengthUnit, SlopeConversion, SlopeUnit,
};
