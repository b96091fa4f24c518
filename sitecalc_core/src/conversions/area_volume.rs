//! Area, volume, concrete and drawing-scale conversions.

use crate::units::{finite_or_zero, CubicMetres, CubicYards, SqFeet, SqMetres, Squares};

/// Smallest scale numerator or denominator accepted
const MIN_SCALE_TERM: f64 = 0.000001;

pub fn m2_to_ft2(m2: f64) -> f64 {
    SqFeet::from(SqMetres(finite_or_zero(m2))).value()
}

pub fn ft2_to_m2(ft2: f64) -> f64 {
    SqMetres::from(SqFeet(finite_or_zero(ft2))).value()
}

/// Square metres to roofing squares (100 ft²)
pub fn m2_to_squares(m2: f64) -> f64 {
    Squares::from(SqFeet::from(SqMetres(finite_or_zero(m2)))).value()
}

pub fn squares_to_m2(squares: f64) -> f64 {
    SqMetres::from(SqFeet::from(Squares(finite_or_zero(squares)))).value()
}

pub fn m3_to_yd3(m3: f64) -> f64 {
    CubicYards::from(CubicMetres(finite_or_zero(m3))).value()
}

pub fn yd3_to_m3(yd3: f64) -> f64 {
    CubicMetres::from(CubicYards(finite_or_zero(yd3))).value()
}

/// Whole bags of premix for `volume_m3` at `yield_per_bag_m3` each.
///
/// A zero or negative yield gives 0 bags.
pub fn bags_needed(volume_m3: f64, yield_per_bag_m3: f64) -> u32 {
    let volume = finite_or_zero(volume_m3).max(0.0);
    let yield_per_bag = finite_or_zero(yield_per_bag_m3).max(0.0);
    if yield_per_bag == 0.0 {
        return 0;
    }
    (volume / yield_per_bag).ceil() as u32
}

/// Drawing scale `numerator:denominator`, e.g. 1:100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub numerator: f64,
    pub denominator: f64,
}

impl Scale {
    pub fn new(numerator: f64, denominator: f64) -> Self {
        Scale {
            numerator,
            denominator,
        }
    }

    fn terms(&self) -> (f64, f64) {
        (
            finite_or_zero(self.numerator).max(MIN_SCALE_TERM),
            finite_or_zero(self.denominator).max(MIN_SCALE_TERM),
        )
    }

    /// Measured plan distance to real distance (same units)
    pub fn plan_to_real(&self, plan: f64) -> f64 {
        let (n, d) = self.terms();
        finite_or_zero(plan) * (d / n)
    }

    /// Real distance to plan distance (same units)
    pub fn real_to_plan(&self, real: f64) -> f64 {
        let (n, d) = self.terms();
        finite_or_zero(real) * (n / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area() {
        assert!((m2_to_ft2(1.0) - 10.7639104167).abs() < 1e-9);
        assert!((ft2_to_m2(10.7639104167) - 1.0).abs() < 1e-9);
        assert!((m2_to_squares(100.0) - 10.76391).abs() < 1e-5);
        assert!((squares_to_m2(m2_to_squares(42.0)) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume() {
        assert!((m3_to_yd3(1.0) - 1.30795062).abs() < 1e-12);
        assert!((yd3_to_m3(1.30795062) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bags() {
        // 0.5 m³ at 0.01 m³ per 20 kg bag
        assert_eq!(bags_needed(0.5, 0.01), 50);
        assert_eq!(bags_needed(0.505, 0.01), 51);
        assert_eq!(bags_needed(0.5, 0.0), 0);
        assert_eq!(bags_needed(-1.0, 0.01), 0);
    }

    #[test]
    fn test_scale() {
        let scale = Scale::new(1.0, 100.0);
        assert_eq!(scale.plan_to_real(45.0), 4500.0);
        assert!((scale.real_to_plan(4500.0) - 45.0).abs() < 1e-9);

        // a zero numerator is floored rather than dividing by zero
        let degenerate = Scale::new(0.0, 100.0);
        assert!(degenerate.plan_to_real(1.0).is_finite());
    }
}
