//! # Productivity and Vogel IPR Formulas
//!
//! Deliverability from a single test point `(Pe, pwf)` with measured rate
//! `q1`, and the Vogel below-bubble-point inflow performance relation.
//!
//! ## Sign Conventions
//!
//! - IP = q1 / (Pe - pwf): positive for a producer (`pwf < Pe`)
//! - II = q1 / (pwf - Pe): positive for an injector (`pwf > Pe`)
//!
//! Both share the same magnitude for a given test point.
//!
//! ## References
//!
//! - Vogel, J.V. (1968) Inflow Performance Relationships for Solution-Gas
//!   Drive Wells, JPT
//! - Ahmed, T. Reservoir Engineering Handbook, Ch. 7

/// Vogel coefficient in the `1.8 (Pe - psat)` term
pub const VOGEL_FACTOR: f64 = 1.8;

/// Productivity index IP = q1 / (Pe - pwf)
#[inline]
pub fn productivity_index(q1: f64, pe: f64, pwf: f64) -> f64 {
    q1 / (pe - pwf)
}

/// Injectivity index II = q1 / (pwf - Pe)
#[inline]
pub fn injectivity_index(q1: f64, pe: f64, pwf: f64) -> f64 {
    q1 / (pwf - pe)
}

/// Rate at the bubble point under linear (Darcy) behaviour: qsat = IP (Pe - psat)
#[inline]
pub fn bubble_point_rate(ip: f64, pe: f64, psat: f64) -> f64 {
    ip * (pe - psat)
}

/// Vogel correction term: qc = qsat psat / (1.8 (Pe - psat))
#[inline]
pub fn vogel_correction(qsat: f64, pe: f64, psat: f64) -> f64 {
    (qsat * psat) / (VOGEL_FACTOR * (pe - psat))
}

/// Vogel inflow rate at flowing pressure `pwf` below the bubble point
///
/// # Formula
/// ```text
/// q(pwf) = qc (1.8 Pe/psat - 0.8 - 0.2 (pwf/psat) - 0.8 (pwf/psat)²)
/// ```
///
/// At `pwf = psat` this returns qsat; at `pwf = 0` it returns qsat + qc.
#[inline]
pub fn vogel_rate(qc: f64, pe: f64, psat: f64, pwf: f64) -> f64 {
    let x = pwf / psat;
    qc * (VOGEL_FACTOR * (pe / psat) - 0.8 - 0.2 * x - 0.8 * x * x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_share_magnitude() {
        let ip = productivity_index(500.0, 3000.0, 2000.0);
        let ii = injectivity_index(500.0, 3000.0, 2000.0);
        assert!((ip - 0.5).abs() < 1e-12);
        assert!((ii + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_vogel_end_points() {
        let pe = 3000.0;
        let psat = 2000.0;
        let ip = productivity_index(500.0, pe, 2500.0);
        let qsat = bubble_point_rate(ip, pe, psat);
        let qc = vogel_correction(qsat, pe, psat);

        assert!((vogel_rate(qc, pe, psat, psat) - qsat).abs() < 1e-9);
        assert!((vogel_rate(qc, pe, psat, 0.0) - (qsat + qc)).abs() < 1e-9);
    }

    #[test]
    fn test_vogel_correction_value() {
        // 1000 * 2000 / (1.8 * 1000)
        let qc = vogel_correction(1000.0, 3000.0, 2000.0);
        assert!((qc - 1111.111_111).abs() < 1e-4);
    }
}
