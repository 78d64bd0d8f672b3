//! # Perforation Skin Correlation
//!
//! Composite perforation skin after Karakas & Tariq: a geometric hole term
//! `Sh`, a wellbore term `Swb`, a vertical-convergence term `Sv`, and a
//! crushed-zone step correction `Sx`.
//!
//! Coefficients depend on the perforation phasing, which is restricted to
//! the two supported cases of [`Phasing`].
//!
//! ## Notation
//!
//! - `k` = Formation permeability (md)
//! - `rw` = Wellbore radius (ft)
//! - `lp` = Perforation tunnel length (ft)
//! - `rp` = Perforation radius (ft)
//! - `h` = Perforated interval height (ft)
//! - `rd` = Crushed-zone radius (ft)
//! - `kh`, `kv` = Horizontal and vertical permeability (default 1 each)
//!
//! ## References
//!
//! - Karakas, M. & Tariq, S.M. (1991) Semianalytical Productivity Models
//!   for Perforated Completions, SPE Production Engineering

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Numerator of the perforation pressure-drop coefficient `3000 / k^n`
pub const PERFORATION_PRESSURE_CONSTANT: f64 = 3000.0;

/// Correlation coefficients for one phasing case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasingCoefficients {
    pub c1: f64,
    pub c2: f64,
    pub a1: f64,
    pub a2: f64,
    pub b1: f64,
    pub b2: f64,
    /// Exponent `n` of the pressure-drop coefficient `3000 / k^n`
    pub pressure_exponent: f64,
}

/// 0° phasing (oil)
pub const ZERO_DEGREE_COEFFICIENTS: PhasingCoefficients = PhasingCoefficients {
    c1: 0.16,
    c2: 2.675,
    a1: -2.091,
    a2: 0.0453,
    b1: 5.1313,
    b2: 1.867,
    pressure_exponent: 0.37,
};

/// 180° phasing (gas)
pub const ONE_EIGHTY_DEGREE_COEFFICIENTS: PhasingCoefficients = PhasingCoefficients {
    c1: 0.026,
    c2: 532.0,
    a1: -2.0251,
    a2: 0.0943,
    b1: 3.073,
    b2: 1.8115,
    pressure_exponent: 0.40,
};

/// Supported perforation phasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phasing {
    /// All shots aligned (0°)
    #[serde(rename = "0")]
    Deg0,
    /// Opposed shots (180°)
    #[serde(rename = "180")]
    Deg180,
}

impl Phasing {
    /// Resolve a phasing angle in degrees.
    ///
    /// Only exactly 0 and 180 are accepted; anything else is an
    /// [`CalcError::InvalidDomainValue`].
    pub fn from_degrees(degrees: f64) -> CalcResult<Self> {
        if degrees == 0.0 {
            Ok(Phasing::Deg0)
        } else if degrees == 180.0 {
            Ok(Phasing::Deg180)
        } else {
            Err(CalcError::invalid_domain(
                "phasing",
                degrees.to_string(),
                "phasing must be 0 or 180 degrees",
            ))
        }
    }

    pub fn degrees(&self) -> f64 {
        match self {
            Phasing::Deg0 => 0.0,
            Phasing::Deg180 => 180.0,
        }
    }

    /// Coefficient set for this phasing
    pub fn coefficients(&self) -> &'static PhasingCoefficients {
        match self {
            Phasing::Deg0 => &ZERO_DEGREE_COEFFICIENTS,
            Phasing::Deg180 => &ONE_EIGHTY_DEGREE_COEFFICIENTS,
        }
    }
}

/// Perforation pressure-drop coefficient `3000 / k^n`
#[inline]
pub fn pressure_drop_coefficient(k: f64, exponent: f64) -> f64 {
    PERFORATION_PRESSURE_CONSTANT / k.powf(exponent)
}

/// Dimensionless height `hD = (h/lp) sqrt(kh/kv)`
#[inline]
pub fn dimensionless_height(h: f64, lp: f64, kh: f64, kv: f64) -> f64 {
    (h / lp) * (kh / kv).sqrt()
}

/// Dimensionless perforation radius `rpD = (rp/(2h)) (1 + sqrt(kv/kh))`
#[inline]
pub fn dimensionless_perforation_radius(rp: f64, h: f64, kh: f64, kv: f64) -> f64 {
    (rp / (2.0 * h)) * (1.0 + (kv / kh).sqrt())
}

/// Dimensionless wellbore radius `rwD = rw / (lp + rw)`
#[inline]
pub fn dimensionless_wellbore_radius(rw: f64, lp: f64) -> f64 {
    rw / (lp + rw)
}

/// Geometric hole skin `Sh = ln(4 rw / lp)`
#[inline]
pub fn hole_skin(rw: f64, lp: f64) -> f64 {
    (4.0 * rw / lp).ln()
}

/// Wellbore skin `Swb = C1 exp(C2 rwD)`
#[inline]
pub fn wellbore_skin(coefficients: &PhasingCoefficients, rwd: f64) -> f64 {
    coefficients.c1 * (coefficients.c2 * rwd).exp()
}

/// Vertical-convergence exponents `(a, b)`
///
/// - a = a1 ln(rpD) + a2
/// - b = b1 rpD + b2
#[inline]
pub fn vertical_exponents(coefficients: &PhasingCoefficients, rpd: f64) -> (f64, f64) {
    let a = coefficients.a1 * rpd.ln() + coefficients.a2;
    let b = coefficients.b1 * rpd + coefficients.b2;
    (a, b)
}

/// Vertical-convergence skin `Sv = 10^a hD^(b-1) rpD^b`
#[inline]
pub fn vertical_skin(a: f64, b: f64, hd: f64, rpd: f64) -> f64 {
    10f64.powf(a) * hd.powf(b - 1.0) * rpd.powf(b)
}

/// Crushed-zone correction `Sx` as a step function of `rd / (rw + lp)`.
///
/// | ratio | Sx |
/// |---|---|
/// | ≥ 18 | 0 |
/// | [2, 18) | -0.001 |
/// | [1.5, 2) | -0.002 |
/// | < 1.5 | -0.0024 |
///
/// Ties fall into the higher band.
pub fn crushed_zone_correction(ratio: f64) -> f64 {
    if ratio >= 18.0 {
        0.0
    } else if ratio >= 2.0 {
        -0.001
    } else if ratio >= 1.5 {
        -0.002
    } else {
        -0.0024
    }
}
