//! Screws, threads and drills.
//!
//! Nearest-size lookups all use the same rule: the first table entry with
//! the strictly smallest absolute difference wins, so ties go to the
//! smaller size.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::units::{finite_or_zero, round_dp, MM_PER_IN};

/// Screw gauge to approximate major diameter (mm)
pub const SCREW_GAUGES: [(u32, f64); 6] = [(4, 2.9), (6, 3.5), (8, 4.2), (10, 4.8), (12, 5.5), (14, 6.3)];

/// Pilot hole as a fraction of major diameter, softwood
pub const PILOT_FACTOR_SOFTWOOD: f64 = 0.65;

/// Pilot hole as a fraction of major diameter, hardwood
pub const PILOT_FACTOR_HARDWOOD: f64 = 0.75;

/// First entry strictly closest to `target`
fn nearest_by<T>(entries: &[T], target: f64, value: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<&T> = None;
    for entry in entries {
        let closer = match best {
            Some(b) => (value(entry) - target).abs() < (value(b) - target).abs(),
            None => true,
        };
        if closer {
            best = Some(entry);
        }
    }
    best
}

// ============================================================================
// Screw gauges
// ============================================================================

/// Major diameter for a gauge, or 0 for an unlisted gauge
pub fn gauge_to_mm(gauge: u32) -> f64 {
    SCREW_GAUGES
        .iter()
        .find(|(g, _)| *g == gauge)
        .map_or(0.0, |(_, mm)| *mm)
}

/// Closest listed gauge to a major diameter: `(gauge, mm)`
pub fn nearest_gauge(mm: f64) -> (u32, f64) {
    let target = finite_or_zero(mm);
    nearest_by(&SCREW_GAUGES, target, |(_, d)| *d)
        .copied()
        .unwrap_or(SCREW_GAUGES[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PilotHoles {
    pub softwood_mm: f64,
    pub hardwood_mm: f64,
}

/// Pilot hole sizes for a screw of `major_mm`, to 0.1 mm
pub fn pilot_holes(major_mm: f64) -> PilotHoles {
    let major = finite_or_zero(major_mm);
    PilotHoles {
        softwood_mm: round_dp(major * PILOT_FACTOR_SOFTWOOD, 1).max(0.0),
        hardwood_mm: round_dp(major * PILOT_FACTOR_HARDWOOD, 1).max(0.0),
    }
}

// ============================================================================
// Threads
// ============================================================================

/// Threads per inch from pitch (mm); 0 stays 0
pub fn tpi_from_pitch(pitch_mm: f64) -> f64 {
    let pitch = finite_or_zero(pitch_mm);
    if pitch == 0.0 {
        0.0
    } else {
        MM_PER_IN / pitch
    }
}

/// Pitch (mm) from threads per inch; 0 stays 0
pub fn pitch_from_tpi(tpi: f64) -> f64 {
    tpi_from_pitch(tpi)
}

/// A row of the unified inch thread table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnThread {
    pub diameter_in: f64,
    pub unc_tpi: u32,
    pub unf_tpi: u32,
}

const fn un(diameter_in: f64, unc_tpi: u32, unf_tpi: u32) -> UnThread {
    UnThread {
        diameter_in,
        unc_tpi,
        unf_tpi,
    }
}

pub const UN_THREADS: [UnThread; 9] = [
    un(0.25, 20, 28),
    un(5.0 / 16.0, 18, 24),
    un(3.0 / 8.0, 16, 24),
    un(7.0 / 16.0, 14, 20),
    un(0.5, 13, 20),
    un(9.0 / 16.0, 12, 18),
    un(5.0 / 8.0, 11, 18),
    un(0.75, 10, 16),
    un(1.0, 8, 12),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreadSeries {
    Unc,
    Unf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreadSuggestion {
    pub series: ThreadSeries,
    pub suggested_tpi: u32,
    pub nearest_diameter_in: f64,
}

/// Nearest UNC/UNF thread for a measured diameter (mm) and TPI.
///
/// Coarse wins a tie.
pub fn nearest_un_series(diameter_mm: f64, tpi: f64) -> ThreadSuggestion {
    let diameter_in = finite_or_zero(diameter_mm) / MM_PER_IN;
    let tpi = finite_or_zero(tpi);
    let row = nearest_by(&UN_THREADS, diameter_in, |r| r.diameter_in)
        .copied()
        .unwrap_or(UN_THREADS[0]);

    let unc_delta = (f64::from(row.unc_tpi) - tpi).abs();
    let unf_delta = (f64::from(row.unf_tpi) - tpi).abs();
    let (series, suggested_tpi) = if unc_delta <= unf_delta {
        (ThreadSeries::Unc, row.unc_tpi)
    } else {
        (ThreadSeries::Unf, row.unf_tpi)
    };

    ThreadSuggestion {
        series,
        suggested_tpi,
        nearest_diameter_in: row.diameter_in,
    }
}

// ============================================================================
// Drills
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillKind {
    Fraction,
    Letter,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSize {
    pub label: String,
    pub inches: f64,
    pub mm: f64,
    pub kind: DrillKind,
}

impl DrillSize {
    fn imperial(label: String, inches: f64, kind: DrillKind) -> Self {
        DrillSize {
            label,
            inches,
            mm: inches * MM_PER_IN,
            kind,
        }
    }
}

/// 1/64" through 63/64"
static FRACTION_DRILLS: Lazy<Vec<DrillSize>> = Lazy::new(|| {
    (1..64)
        .map(|i| DrillSize::imperial(format!("{i}/64\""), f64::from(i) / 64.0, DrillKind::Fraction))
        .collect()
});

/// Letter drills A–Z (inches)
const LETTER_DRILLS: [(char, f64); 26] = [
    ('A', 0.234),
    ('B', 0.238),
    ('C', 0.242),
    ('D', 0.246),
    ('E', 0.250),
    ('F', 0.257),
    ('G', 0.261),
    ('H', 0.266),
    ('I', 0.272),
    ('J', 0.277),
    ('K', 0.281),
    ('L', 0.290),
    ('M', 0.295),
    ('N', 0.302),
    ('O', 0.316),
    ('P', 0.323),
    ('Q', 0.332),
    ('R', 0.339),
    ('S', 0.348),
    ('T', 0.358),
    ('U', 0.368),
    ('V', 0.377),
    ('W', 0.386),
    ('X', 0.397),
    ('Y', 0.404),
    ('Z', 0.413),
];

/// Nearest 1/64" fractional drill to `mm`.
///
/// Labels are in 64ths as listed on a drill index (8/64", not 1/8").
pub fn nearest_fraction_drill(mm: f64) -> DrillSize {
    let target_in = finite_or_zero(mm) / MM_PER_IN;
    nearest_by(FRACTION_DRILLS.as_slice(), target_in, |d| d.inches)
        .cloned()
        .unwrap_or_else(|| DrillSize::imperial("1/64\"".to_string(), 1.0 / 64.0, DrillKind::Fraction))
}

/// Nearest letter drill to `mm`
pub fn nearest_letter_drill(mm: f64) -> DrillSize {
    let target_in = finite_or_zero(mm) / MM_PER_IN;
    let (letter, inches) = nearest_by(&LETTER_DRILLS, target_in, |(_, i)| *i)
        .copied()
        .unwrap_or(LETTER_DRILLS[0]);
    DrillSize::imperial(letter.to_string(), inches, DrillKind::Letter)
}

/// Nearest 0.1 mm metric drill to `mm`
pub fn nearest_metric_drill(mm: f64) -> DrillSize {
    let rounded = round_dp(finite_or_zero(mm), 1);
    DrillSize {
        label: format!("{rounded:.1} mm"),
        inches: rounded / MM_PER_IN,
        mm: rounded,
        kind: DrillKind::Metric,
    }
}

/// Nearest drill of every kind: fraction, letter, metric
pub fn nearest_drills(mm: f64) -> [DrillSize; 3] {
    [
        nearest_fraction_drill(mm),
        nearest_letter_drill(mm),
        nearest_metric_drill(mm),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauges() {
        assert_eq!(gauge_to_mm(8), 4.2);
        assert_eq!(gauge_to_mm(9), 0.0);
        assert_eq!(nearest_gauge(4.0), (8, 4.2));
        assert_eq!(nearest_gauge(6.0), (14, 6.3));
        assert_eq!(nearest_gauge(0.0), (4, 2.9));
    }

    #[test]
    fn test_pilot_holes() {
        // #10: 4.8 × 0.65 = 3.12, 4.8 × 0.75 = 3.6
        let pilot = pilot_holes(4.8);
        assert_eq!(pilot.softwood_mm, 3.1);
        assert_eq!(pilot.hardwood_mm, 3.6);
        assert_eq!(pilot_holes(-3.0).softwood_mm, 0.0);
    }

    #[test]
    fn test_thread_pitch() {
        assert!((tpi_from_pitch(1.25) - 20.32).abs() < 1e-9);
        assert!((pitch_from_tpi(20.0) - 1.27).abs() < 1e-9);
        assert_eq!(tpi_from_pitch(0.0), 0.0);
        assert_eq!(pitch_from_tpi(f64::NAN), 0.0);
    }

    #[test]
    fn test_nearest_un_series() {
        // 1/2" bolt counted at 13 TPI
        let s = nearest_un_series(12.7, 13.0);
        assert_eq!(s.series, ThreadSeries::Unc);
        assert_eq!(s.suggested_tpi, 13);
        assert_eq!(s.nearest_diameter_in, 0.5);

        // 3/8" at 24 TPI is fine thread
        let s = nearest_un_series(9.5, 24.0);
        assert_eq!(s.series, ThreadSeries::Unf);
        assert_eq!(s.suggested_tpi, 24);
    }

    #[test]
    fn test_fraction_drill() {
        // 4.2 mm = 0.1654": 11/64" (0.1719) is closer than 5/32" = 10/64" (0.1563)
        let drill = nearest_fraction_drill(4.2);
        assert_eq!(drill.label, "11/64\"");
        assert_eq!(drill.kind, DrillKind::Fraction);
        assert!((drill.mm - 4.365625).abs() < 1e-9);

        assert_eq!(FRACTION_DRILLS.len(), 63);
        assert_eq!(nearest_fraction_drill(0.0).label, "1/64\"");
        assert_eq!(nearest_fraction_drill(50.0).label, "63/64\"");
    }

    #[test]
    fn test_letter_drill() {
        // 6.5 mm = 0.2559"
        assert_eq!(nearest_letter_drill(6.5).label, "F");
        assert_eq!(nearest_letter_drill(6.35).label, "E");
        assert_eq!(nearest_letter_drill(1.0).label, "A");
    }

    #[test]
    fn test_metric_drill() {
        let drill = nearest_metric_drill(4.24);
        assert_eq!(drill.label, "4.2 mm");
        assert_eq!(drill.mm, 4.2);
        assert_eq!(nearest_metric_drill(6.0).label, "6.0 mm");
    }

    #[test]
    fn test_nearest_drills() {
        let [fraction, letter, metric] = nearest_drills(4.2);
        assert_eq!(fraction.kind, DrillKind::Fraction);
        assert_eq!(letter.kind, DrillKind::Letter);
        assert_eq!(metric.kind, DrillKind::Metric);
    }
}
