//! # Materials Database
//!
//! Material tables used by the converters and estimators.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::materials::{NzTimberSize, UsLumberSize};
//!
//! let stud: NzTimberSize = "100x50".parse().unwrap();
//! assert_eq!(stud.actual_mm(), (90, 45));
//!
//! assert_eq!(UsLumberSize::L2x6.actual_in(), (1.5, 5.5));
//! ```

pub mod timber_sizes;

pub use timber_sizes::{NzTimberSize, UsLumberSize};
