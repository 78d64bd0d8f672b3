//! # Inflow Performance Curve
//!
//! Lazy Vogel curve below the bubble point. An [`IprCurve`] borrows the
//! caller's pressure samples and yields one [`IprPoint`] per sample; clone
//! it (or ask the calculator again) to walk the curve a second time.
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::calculations::ipr::pressure_samples;
//! use wellcalc_core::calculations::reservoir::{ReservoirCalculator, WellParameters};
//!
//! let params = WellParameters::new(50.0, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
//!     .with_test_data(500.0, 2000.0);
//! let calc = ReservoirCalculator::new(params);
//!
//! let pressures = pressure_samples(2000.0, 5);
//! let curve = calc.ipr_curve(3000.0, 2500.0, &pressures).unwrap();
//! assert_eq!(curve.len(), 5);
//! for point in curve {
//!     println!("{:>8.1} psi -> {:>8.1} bbl/day", point.pressure, point.rate);
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::productivity::vogel_rate;

/// One sample of the inflow-performance curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IprPoint {
    /// Flowing bottomhole pressure, exactly as supplied (psi)
    pub pressure: f64,
    /// Vogel rate at that pressure (bbl/day)
    pub rate: f64,
}

/// Lazy, finite, restartable sequence of `(pressure, rate)` samples.
#[derive(Debug, Clone)]
pub struct IprCurve<'a> {
    qc: f64,
    pe: f64,
    psat: f64,
    pressures: std::slice::Iter<'a, f64>,
}

impl<'a> IprCurve<'a> {
    /// `psat` must be nonzero; [`super::ReservoirCalculator::ipr_curve`] checks it.
    pub(crate) fn new(qc: f64, pe: f64, psat: f64, pressures: &'a [f64]) -> Self {
        IprCurve {
            qc,
            pe,
            psat,
            pressures: pressures.iter(),
        }
    }

    /// Vogel correction rate the curve is scaled by
    pub fn qc(&self) -> f64 {
        self.qc
    }

    pub fn pe(&self) -> f64 {
        self.pe
    }

    pub fn psat(&self) -> f64 {
        self.psat
    }
}

impl Iterator for IprCurve<'_> {
    type Item = IprPoint;

    fn next(&mut self) -> Option<IprPoint> {
        let &pressure = self.pressures.next()?;
        Some(IprPoint {
            pressure,
            rate: vogel_rate(self.qc, self.pe, self.psat, pressure),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pressures.size_hint()
    }
}

impl ExactSizeIterator for IprCurve<'_> {}

/// `count` evenly spaced pressures from `upper` down to zero, inclusive.
///
/// `count == 0` gives no samples and `count == 1` gives just `upper`.
pub fn pressure_samples(upper: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![upper],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| upper * (1.0 - i as f64 / last)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_echoes_pressures() {
        let pressures = [1800.0, 1234.5, 0.0, 2000.0];
        let curve = IprCurve::new(1111.0, 3000.0, 2000.0, &pressures);
        let points: Vec<_> = curve.collect();
        assert_eq!(points.len(), pressures.len());
        for (point, &p) in points.iter().zip(pressures.iter()) {
            assert_eq!(point.pressure, p);
        }
    }

    #[test]
    fn test_curve_is_restartable() {
        let pressures = [1500.0, 500.0];
        let curve = IprCurve::new(1000.0, 3000.0, 2000.0, &pressures);
        let first: Vec<_> = curve.clone().collect();
        let second: Vec<_> = curve.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_curve_rate_decreases_with_pressure() {
        let pressures = pressure_samples(2000.0, 11);
        let rates: Vec<f64> = IprCurve::new(1000.0, 3000.0, 2000.0, &pressures)
            .map(|p| p.rate)
            .collect();
        assert!(rates.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_empty_curve() {
        let mut curve = IprCurve::new(1000.0, 3000.0, 2000.0, &[]);
        assert_eq!(curve.len(), 0);
        assert!(curve.next().is_none());
    }

    #[test]
    fn test_pressure_samples() {
        assert!(pressure_samples(2000.0, 0).is_empty());
        assert_eq!(pressure_samples(2000.0, 1), vec![2000.0]);
        assert_eq!(pressure_samples(2000.0, 5), vec![2000.0, 1500.0, 1000.0, 500.0, 0.0]);
    }
}
