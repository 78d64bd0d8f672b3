//! # Well Calculations
//!
//! Calculation entry points built on the formulas in [`crate::equations`].
//! Each calculation follows the pattern:
//!
//! - `*Parameters` - Inputs (JSON-serializable, already parsed to `f64`)
//! - `*Result` - Results, with every intermediate a front end may display
//! - pure functions or methods returning `CalcResult<_>`
//!
//! Every divisor is checked before dividing. A zero divisor is reported as
//! [`CalcError::DivisionByZero`] naming the quantity and the operation, and
//! aborts the whole chain; nothing is clamped or defaulted.
//!
//! ## Available Calculations
//!
//! - [`reservoir`] - Inflow, skin, pressure drop, flow efficiency, productivity
//! - [`ipr`] - Lazy Vogel inflow-performance curve
//! - [`perforation`] - Phasing-dependent perforation skin

pub mod ipr;
pub mod perforation;
pub mod reservoir;

use serde::{Deserialize, Serialize};

use crate::equations::Equation;
use crate::errors::{CalcError, CalcResult};

pub use ipr::{IprCurve, IprPoint};
pub use perforation::{PerforationParameters, PerforationSkinResult};
pub use reservoir::{InflowResult, ProductivityResult, ReservoirCalculator, WellParameters};

/// The three families of calculation a submission can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// Inflow, skin, pressure drop and flow efficiency
    Inflow,
    /// Productivity/injectivity indices and the Vogel chain
    Productivity,
    /// Perforation skin design
    Perforation,
}

impl CalculationKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationKind::Inflow => "Inflow",
            CalculationKind::Productivity => "Productivity",
            CalculationKind::Perforation => "Perforation",
        }
    }

    /// Equations evaluated by a bundled calculation of this kind
    pub fn equations(&self) -> Vec<Equation> {
        match self {
            CalculationKind::Inflow => vec![
                Equation::RadialInflowRate,
                Equation::HawkinsSkinFactor,
                Equation::RadialInflowRateWithSkin,
                Equation::LinearPressureDrop,
                Equation::FlowEfficiency,
            ],
            CalculationKind::Productivity => vec![
                Equation::ProductivityIndex,
                Equation::InjectivityIndex,
                Equation::BubblePointRate,
                Equation::VogelCorrection,
                Equation::MaximumRate,
            ],
            CalculationKind::Perforation => vec![
                Equation::PerforationPressureCoefficient,
                Equation::DimensionlessHeight,
                Equation::DimensionlessPerforationRadius,
                Equation::DimensionlessWellboreRadius,
                Equation::HoleSkin,
                Equation::WellboreSkin,
                Equation::VerticalSkin,
                Equation::TotalPerforationSkin,
                Equation::CrushedZoneCorrection,
                Equation::DesignSkin,
            ],
        }
    }
}

/// Return `value` unchanged unless it is exactly zero.
pub(crate) fn nonzero(value: f64, quantity: &str, operation: &str) -> CalcResult<f64> {
    if value == 0.0 {
        Err(CalcError::division_by_zero(quantity, operation))
    } else {
        Ok(value)
    }
}

/// Return `value` unchanged if it is strictly positive (and not NaN).
pub(crate) fn positive(value: f64, field: &str, reason: &str) -> CalcResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_domain(field, value.to_string(), reason))
    }
}

/// Return `value` unchanged if it is a finite number.
///
/// Used on chained results where an overflow (`inf`) or an `inf * 0`
/// (`NaN`) would otherwise come back as a plausible-looking answer.
pub(crate) fn finite(value: f64, field: &str, reason: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_domain(field, value.to_string(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonzero() {
        assert_eq!(nonzero(2.0, "A", "pressure_drop").unwrap(), 2.0);
        assert_eq!(nonzero(-2.0, "A", "pressure_drop").unwrap(), -2.0);
        assert_eq!(
            nonzero(0.0, "A", "pressure_drop").unwrap_err(),
            CalcError::division_by_zero("A", "pressure_drop")
        );
        assert!(nonzero(-0.0, "A", "pressure_drop").is_err());
    }

    #[test]
    fn test_positive_rejects_nan() {
        assert!(positive(f64::NAN, "rpd", "must be positive").is_err());
        assert!(positive(0.0, "rpd", "must be positive").is_err());
        assert!(positive(1e-9, "rpd", "must be positive").is_ok());
    }

    #[test]
    fn test_finite() {
        assert_eq!(finite(-3.5, "sv", "not finite").unwrap(), -3.5);
        assert!(finite(f64::INFINITY, "sv", "not finite").unwrap_err().is_domain_error());
        assert!(finite(f64::NAN, "sv", "not finite").is_err());
    }

    #[test]
    fn test_kind_equations() {
        assert_eq!(CalculationKind::Inflow.equations().len(), 5);
        assert!(CalculationKind::Perforation
            .equations()
            .contains(&Equation::DesignSkin));
        assert_eq!(
            serde_json::to_string(&CalculationKind::Perforation).unwrap(),
            "\"perforation\""
        );
    }
}
