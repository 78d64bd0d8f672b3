//! # Radial Inflow Formulas
//!
//! Steady-state radial Darcy flow into a vertical well, the Hawkins skin
//! factor of a damaged annulus, linear Darcy pressure drop across a
//! completion section, and flow efficiency.
//!
//! These are raw formula evaluations. They do not check their divisors;
//! [`crate::calculations::reservoir::ReservoirCalculator`] does that before
//! calling them.
//!
//! ## Notation (oilfield units)
//!
//! - `ko` = Formation permeability (md)
//! - `h` = Net pay thickness (ft)
//! - `pr`, `pw` = Average reservoir and flowing bottomhole pressure (psi)
//! - `uo` = Oil viscosity (cp)
//! - `Bo` = Oil formation-volume factor (bbl/STB)
//! - `re`, `rw` = Drainage and wellbore radius (ft)
//! - `rd`, `kd` = Radius (ft) and permeability (md) of the damaged zone
//! - `L`, `A` = Section length (ft) and cross-sectional area (ft²)
//! - `S` = Skin factor (dimensionless)
//!
//! ## References
//!
//! - Ahmed, T. Reservoir Engineering Handbook, Ch. 6 (radial flow, skin)
//! - Hawkins, M.F. (1956) A Note on the Skin Effect, JPT

/// Unit constant of the radial Darcy equation (bbl/day, md, ft, cp, psi)
pub const RADIAL_FLOW_CONSTANT: f64 = 0.00708;

/// Pseudo-steady-state drainage radius factor in `ln(0.472 re / rw)`
pub const DRAINAGE_RADIUS_FACTOR: f64 = 0.472;

/// Unit constant of the linear Darcy equation (bbl/day, md, ft², cp, psi)
pub const LINEAR_FLOW_CONSTANT: f64 = 0.00127;

/// Drainage logarithm `ln(0.472 re / rw)`
#[inline]
pub fn drainage_log(re: f64, rw: f64) -> f64 {
    (DRAINAGE_RADIUS_FACTOR * re / rw).ln()
}

/// Numerator of the radial inflow equation: `0.00708 ko h (pr - pw)`
#[inline]
pub fn radial_flow_numerator(ko: f64, h: f64, pr: f64, pw: f64) -> f64 {
    RADIAL_FLOW_CONSTANT * ko * h * (pr - pw)
}

/// Denominator of the radial inflow equation: `uo Bo (ln(0.472 re/rw) + S)`
///
/// Pass `skin = 0.0` for the undamaged form.
#[inline]
pub fn radial_flow_denominator(uo: f64, bo: f64, drainage_log: f64, skin: f64) -> f64 {
    uo * bo * (drainage_log + skin)
}

/// Hawkins skin factor
///
/// # Formula
/// - S = (ko/kd - 1) ln(rd/rw)
///
/// Positive when the annulus is damaged (`kd < ko`), negative when it is
/// stimulated (`kd > ko`).
#[inline]
pub fn hawkins_skin(ko: f64, kd: f64, rd: f64, rw: f64) -> f64 {
    (ko / kd - 1.0) * (rd / rw).ln()
}

/// Linear Darcy pressure drop across a section of length L and area A
///
/// # Formula
/// - ΔP = qo Bo uo L / (0.00127 A ko)
///
/// # Arguments
/// * `qo` - Flow rate through the section (bbl/day)
/// * `bo` - Formation-volume factor
/// * `uo` - Viscosity (cp)
/// * `l` - Section length (ft)
/// * `a` - Cross-sectional area (ft²)
/// * `ko` - Permeability (md)
#[inline]
pub fn linear_pressure_drop(qo: f64, bo: f64, uo: f64, l: f64, a: f64, ko: f64) -> f64 {
    (qo * bo * uo * l) / linear_pressure_drop_denominator(a, ko)
}

/// Denominator of the linear pressure-drop equation: `0.00127 A ko`
#[inline]
pub fn linear_pressure_drop_denominator(a: f64, ko: f64) -> f64 {
    LINEAR_FLOW_CONSTANT * a * ko
}

/// Flow efficiency: ratio of actual to undamaged productivity
///
/// # Formula
/// - FE = ln(0.472 re/rw) / (ln(0.472 re/rw) + S)
#[inline]
pub fn flow_efficiency(drainage_log: f64, skin: f64) -> f64 {
    drainage_log / (drainage_log + skin)
}
