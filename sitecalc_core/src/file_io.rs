//! # File I/O Module
//!
//! Estimate and pricing file operations:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//! - **Settings validation**: Pricing files are checked with
//!   [`PricingSettings::validate`] on load
//!
//! ## File Format
//!
//! Estimates are saved as `.scx` files containing JSON. Pricing files are
//! plain JSON; any key left out takes its default rate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitecalc_core::estimate::Estimate;
//! use sitecalc_core::file_io::{load_estimate, save_estimate};
//! use std::path::Path;
//!
//! let estimate = Estimate::new("Garden studio", "Client", "");
//! let path = Path::new("studio.scx");
//!
//! save_estimate(&estimate, path)?;
//! let loaded = load_estimate(path)?;
//! assert_eq!(loaded.meta.name, "Garden studio");
//! # Ok::<(), sitecalc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::estimate::{Estimate, SCHEMA_VERSION};
use crate::settings::{PricingSettings, SETTINGS_VERSION};

/// Extension used for estimate files
pub const ESTIMATE_EXTENSION: &str = "scx";

/// Serialize `value` as pretty JSON and write it atomically.
///
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// `estimate.scx` -> `estimate.scx.tmp`
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Save an estimate with atomic write semantics.
///
/// ```rust,no_run
/// use sitecalc_core::estimate::Estimate;
/// use sitecalc_core::file_io::save_estimate;
/// use std::path::Path;
///
/// save_estimate(&Estimate::default(), Path::new("job.scx"))?;
/// # Ok::<(), sitecalc_core::errors::CalcError>(())
/// ```
pub fn save_estimate(estimate: &Estimate, path: &Path) -> CalcResult<()> {
    write_json_atomic(estimate, path)
}

/// Load an estimate.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::InvalidInput)` - Embedded pricing has a bad rate
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_estimate(path: &Path) -> CalcResult<Estimate> {
    let estimate: Estimate = read_json(path)?;
    validate_version(&estimate.meta.version, SCHEMA_VERSION)?;
    validate_version(&estimate.settings.schema_version, SETTINGS_VERSION)?;
    estimate.settings.validate()?;
    Ok(estimate)
}

/// Save a pricing file with atomic write semantics.
pub fn save_settings(settings: &PricingSettings, path: &Path) -> CalcResult<()> {
    settings.validate()?;
    write_json_atomic(settings, path)
}

/// Load and validate a pricing file. Missing keys take their defaults.
///
/// ```rust,no_run
/// use sitecalc_core::file_io::load_settings;
/// use std::path::Path;
///
/// let pricing = load_settings(Path::new("pricing.json"))?;
/// println!("timber at ${}/m", pricing.timber_per_m);
/// # Ok::<(), sitecalc_core::errors::CalcError>(())
/// ```
pub fn load_settings(path: &Path) -> CalcResult<PricingSettings> {
    let settings: PricingSettings = read_json(path)?;
    validate_version(&settings.schema_version, SETTINGS_VERSION)?;
    settings.validate()?;
    tracing::debug!(path = %path.display(), "loaded pricing settings");
    Ok(settings)
}

/// Check that a file version is readable by schema `current`.
///
/// Major versions must match; on 0.x a newer minor is rejected.
pub fn validate_version(file_version: &str, current: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: current.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = current.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CalculationItem, StairsInput};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        temp_dir().join(format!("sitecalc_test_{}.{}", name, extension))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/jobs/studio.scx")), Path::new("/jobs/studio.scx.tmp"));
        assert_eq!(tmp_path_for(Path::new("/jobs/pricing")), Path::new("/jobs/pricing.tmp"));
    }

    #[test]
    fn test_estimate_roundtrip() {
        let path = temp_path("roundtrip", ESTIMATE_EXTENSION);

        let mut estimate = Estimate::new("Deck", "Client", "Site");
        let id = estimate.add_item(CalculationItem::Stairs {
            label: "Front steps".to_string(),
            input: StairsInput::from_rise(900.0),
        });
        save_estimate(&estimate, &path).unwrap();

        let loaded = load_estimate(&path).unwrap();
        assert_eq!(loaded.meta.name, "Deck");
        assert_eq!(loaded.get_item(&id).map(|i| i.label()), Some("Front steps"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic", ESTIMATE_EXTENSION);
        save_estimate(&Estimate::default(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("pricing_roundtrip", "json");
        let mut settings = PricingSettings::default();
        settings.timber_per_m = 5.25;
        save_settings(&settings, &path).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_settings_file() {
        let path = temp_path("pricing_partial", "json");
        fs::write(&path, r#"{ "pile_per_each": 30.0 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.pile_per_each, 30.0);
        assert_eq!(settings.timber_per_m, PricingSettings::default().timber_per_m);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let path = temp_path("pricing_invalid", "json");
        fs::write(&path, r#"{ "gst_rate": 1.5 }"#).unwrap();
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut bad = PricingSettings::default();
        bad.timber_per_m = -1.0;
        assert!(save_settings(&bad, &path).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("does_not_exist", ESTIMATE_EXTENSION);
        assert_eq!(load_estimate(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let path = temp_path("garbage", ESTIMATE_EXTENSION);
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_estimate(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_estimate_rejected() {
        let path = temp_path("newer", ESTIMATE_EXTENSION);
        let mut estimate = Estimate::default();
        estimate.meta.version = "0.9.0".to_string();
        save_estimate(&estimate, &path).unwrap();

        assert_eq!(load_estimate(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION, SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5", "0.1.0").is_ok());
        assert!(validate_version("0.0.9", "0.1.0").is_ok());

        assert!(validate_version("1.0.0", "0.1.0").is_err());
        assert!(validate_version("0.2.0", "0.1.0").is_err());
        assert!(validate_version("garbage", "0.1.0").is_err());
    }
}
