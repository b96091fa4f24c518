//! # sitecalc_core - Construction Estimating Engine
//!
//! `sitecalc_core` is the computational heart of SiteCalc: trade calculators
//! for builders (triangles, roof framing, stairs, unit conversions) and a
//! cabin bill-of-materials engine that prices a small building from a
//! handful of dimensions. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Advisories are not errors**: Code-compliance checks come back as
//!   warnings alongside the numbers
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use sitecalc_core::calculations::cabin::{compute, CabinConfig};
//! use sitecalc_core::settings::PricingSettings;
//!
//! let result = compute(&CabinConfig::default(), &PricingSettings::default());
//! assert!(result.totals.incl_gst > result.totals.ex_gst);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators (trig, roof, pitch, cabin, stairs, framing, GST)
//! - [`conversions`] - Unit and engineering conversions
//! - [`materials`] - Timber size tables
//! - [`settings`] - Pricing rates
//! - [`estimate`] - Estimate container, metadata and saved calculations
//! - [`units`] - Type-safe unit wrappers and rounding helpers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic saves and versioned loads

pub mod calculations;
pub mod conversions;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use estimate::{Estimate, EstimateMeta};
pub use file_io::{load_estimate, load_settings, save_estimate, save_settings};
pub use settings::PricingSettings;
