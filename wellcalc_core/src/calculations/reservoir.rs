//! # Reservoir Calculator
//!
//! Single-well deliverability from static rock, fluid and well properties:
//! radial inflow, Hawkins skin, pressure drop across a completion section,
//! flow efficiency, and the productivity/Vogel chain built on one test
//! point `(Pe, pwf)`.
//!
//! Operations are independent and recompute their dependencies on every
//! call (`pressure_drop` calls `inflow_rate`, `qmax` calls `qc` which calls
//! `qsat`, ...). Parameters never change during a calculator's lifetime, so
//! nothing is cached.
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::calculations::reservoir::{ReservoirCalculator, WellParameters};
//!
//! let params = WellParameters::new(50.0, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
//!     .with_damaged_zone(3.0, 10.0);
//! let calc = ReservoirCalculator::new(params);
//!
//! let qo = calc.inflow_rate().unwrap();
//! assert!((qo - 322.987).abs() < 1e-3);
//!
//! let skin = calc.skin_factor().unwrap();
//! assert!(skin > 0.0); // kd < ko: damaged
//! assert!(calc.flow_efficiency().unwrap() < 1.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ipr::IprCurve;
use super::{finite, nonzero, positive};
use crate::equations::inflow::{
    drainage_log, flow_efficiency, hawkins_skin, linear_pressure_drop, linear_pressure_drop_denominator,
    radial_flow_denominator, radial_flow_numerator,
};
use crate::equations::productivity::{
    bubble_point_rate, injectivity_index, productivity_index, vogel_correction, VOGEL_FACTOR,
};
use crate::errors::{CalcError, CalcResult};
use crate::input::RawFields;

/// Static properties of one well, in oilfield units.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ko": 50.0, "h": 30.0, "pr": 3000.0, "pw": 2500.0,
///   "uo": 2.0, "bo": 1.2, "re": 1000.0, "rw": 0.5,
///   "length": 10.0, "area": 5.0, "rd": 3.0, "kd": 10.0,
///   "q1": 500.0, "psat": 2000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellParameters {
    /// Formation permeability (md)
    pub ko: f64,
    /// Net pay thickness (ft)
    pub h: f64,
    /// Average reservoir pressure (psi)
    pub pr: f64,
    /// Flowing bottomhole pressure (psi)
    pub pw: f64,
    /// Oil viscosity (cp)
    pub uo: f64,
    /// Oil formation-volume factor (bbl/STB)
    pub bo: f64,
    /// Drainage radius (ft)
    pub re: f64,
    /// Wellbore radius (ft)
    pub rw: f64,

    /// Section length L for the pressure drop (ft)
    #[serde(default)]
    pub length: f64,
    /// Section cross-sectional area A for the pressure drop (ft²)
    #[serde(default)]
    pub area: f64,

    /// Damaged-zone radius (ft), must exceed `rw`
    #[serde(default)]
    pub rd: f64,
    /// Damaged-zone permeability (md)
    #[serde(default)]
    pub kd: f64,

    /// Measured test rate (bbl/day)
    #[serde(default)]
    pub q1: f64,
    /// Bubble-point pressure (psi)
    #[serde(default)]
    pub psat: f64,
}

impl WellParameters {
    /// Create parameters for the radial inflow equation.
    ///
    /// Section geometry, damaged zone and test data start at zero; set them
    /// with the `with_*` builders when the corresponding operations are needed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(ko: f64, h: f64, pr: f64, pw: f64, uo: f64, bo: f64, re: f64, rw: f64) -> Self {
        WellParameters {
            ko,
            h,
            pr,
            pw,
            uo,
            bo,
            re,
            rw,
            length: 0.0,
            area: 0.0,
            rd: 0.0,
            kd: 0.0,
            q1: 0.0,
            psat: 0.0,
        }
    }

    /// Set the completion section used by `pressure_drop`
    pub fn with_section(mut self, length: f64, area: f64) -> Self {
        self.length = length;
        self.area = area;
        self
    }

    /// Set the damaged zone used by the skin operations
    pub fn with_damaged_zone(mut self, rd: f64, kd: f64) -> Self {
        self.rd = rd;
        self.kd = kd;
        self
    }

    /// Set the test rate and bubble-point pressure used by the productivity chain
    pub fn with_test_data(mut self, q1: f64, psat: f64) -> Self {
        self.q1 = q1;
        self.psat = psat;
        self
    }

    /// Build from raw text fields.
    ///
    /// `ko, h, pr, pw, uo, bo, re, rw` are required. `length, area, rd, kd,`
    /// `q1, psat` default to zero when absent. Keys match the JSON field names.
    pub fn from_raw(fields: &RawFields) -> CalcResult<Self> {
        Ok(WellParameters {
            ko: fields.require("ko")?,
            h: fields.require("h")?,
            pr: fields.require("pr")?,
            pw: fields.require("pw")?,
            uo: fields.require("uo")?,
            bo: fields.require("bo")?,
            re: fields.require("re")?,
            rw: fields.require("rw")?,
            length: fields.optional("length", 0.0)?,
            area: fields.optional("area", 0.0)?,
            rd: fields.optional("rd", 0.0)?,
            kd: fields.optional("kd", 0.0)?,
            q1: fields.optional("q1", 0.0)?,
            psat: fields.optional("psat", 0.0)?,
        })
    }

    /// Build the parameters of a productivity test point from raw text.
    ///
    /// Only `q1` and `psat` are required; the productivity chain reads
    /// nothing else, so every other field defaults to zero.
    pub fn from_raw_test_point(fields: &RawFields) -> CalcResult<Self> {
        let mut params = WellParameters::new(
            fields.optional("ko", 0.0)?,
            fields.optional("h", 0.0)?,
            fields.optional("pr", 0.0)?,
            fields.optional("pw", 0.0)?,
            fields.optional("uo", 0.0)?,
            fields.optional("bo", 0.0)?,
            fields.optional("re", 0.0)?,
            fields.optional("rw", 0.0)?,
        )
        .with_section(fields.optional("length", 0.0)?, fields.optional("area", 0.0)?)
        .with_damaged_zone(fields.optional("rd", 0.0)?, fields.optional("kd", 0.0)?);
        params.q1 = fields.require("q1")?;
        params.psat = fields.require("psat")?;
        Ok(params)
    }
}

/// Bundled inflow results, all computed from the same parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflowResult {
    /// Undamaged radial rate qo (bbl/day)
    pub inflow_rate: f64,
    /// Hawkins skin factor S
    pub skin_factor: f64,
    /// Radial rate including skin (bbl/day)
    pub inflow_rate_with_skin: f64,
    /// Pressure drop across the section (psi)
    pub pressure_drop: f64,
    /// Flow efficiency FE
    pub flow_efficiency: f64,
}

/// Bundled productivity results for one test point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityResult {
    /// Productivity index IP (bbl/day/psi)
    pub productivity_index: f64,
    /// Injectivity index II (bbl/day/psi)
    pub injectivity_index: f64,
    /// Rate at the bubble point (bbl/day)
    pub qsat: f64,
    /// Vogel correction rate (bbl/day)
    pub qc: f64,
    /// Absolute open flow (bbl/day)
    pub qmax: f64,
}

/// Stateless evaluator over one set of [`WellParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirCalculator {
    params: WellParameters,
}

impl ReservoirCalculator {
    pub fn new(params: WellParameters) -> Self {
        ReservoirCalculator { params }
    }

    pub fn params(&self) -> &WellParameters {
        &self.params
    }

    // ------------------------------------------------------------------
    // Inflow / skin / pressure drop / efficiency
    // ------------------------------------------------------------------

    /// Undamaged radial inflow rate
    ///
    /// `qo = 0.00708 ko h (pr - pw) / (uo Bo ln(0.472 re/rw))`
    pub fn inflow_rate(&self) -> CalcResult<f64> {
        const OP: &str = "inflow_rate";
        let p = &self.params;
        let log = self.checked_drainage_log(OP)?;
        let den = nonzero(
            radial_flow_denominator(p.uo, p.bo, log, 0.0),
            "uo * Bo * ln(0.472 re/rw)",
            OP,
        )?;
        finite(
            radial_flow_numerator(p.ko, p.h, p.pr, p.pw) / den,
            "inflow_rate",
            "inflow rate is not finite",
        )
    }

    /// Hawkins skin factor `S = (ko/kd - 1) ln(rd/rw)`
    pub fn skin_factor(&self) -> CalcResult<f64> {
        const OP: &str = "skin_factor";
        let p = &self.params;
        nonzero(p.kd, "kd", OP)?;
        self.checked_rw(OP)?;
        if p.rd.is_nan() || p.rd <= p.rw {
            return Err(CalcError::invalid_domain(
                "rd",
                p.rd.to_string(),
                format!("damaged-zone radius must exceed rw ({})", p.rw),
            ));
        }
        Ok(hawkins_skin(p.ko, p.kd, p.rd, p.rw))
    }

    /// Radial inflow rate with the skin factor in the denominator
    pub fn inflow_rate_with_skin(&self) -> CalcResult<f64> {
        const OP: &str = "inflow_rate_with_skin";
        let p = &self.params;
        let log = self.checked_drainage_log(OP)?;
        let skin = self.skin_factor()?;
        let den = nonzero(
            radial_flow_denominator(p.uo, p.bo, log, skin),
            "uo * Bo * (ln(0.472 re/rw) + S)",
            OP,
        )?;
        finite(
            radial_flow_numerator(p.ko, p.h, p.pr, p.pw) / den,
            "inflow_rate_with_skin",
            "inflow rate with skin is not finite",
        )
    }

    /// Pressure drop across the completion section carrying `inflow_rate()`
    ///
    /// `dP = qo Bo uo L / (0.00127 A ko)`
    pub fn pressure_drop(&self) -> CalcResult<f64> {
        const OP: &str = "pressure_drop";
        let p = &self.params;
        let qo = self.inflow_rate()?;
        nonzero(p.area, "A", OP)?;
        nonzero(p.ko, "ko", OP)?;
        nonzero(linear_pressure_drop_denominator(p.area, p.ko), "0.00127 * A * ko", OP)?;
        finite(
            linear_pressure_drop(qo, p.bo, p.uo, p.length, p.area, p.ko),
            "pressure_drop",
            "pressure drop is not finite",
        )
    }

    /// Flow efficiency `FE = ln(0.472 re/rw) / (ln(0.472 re/rw) + S)`
    pub fn flow_efficiency(&self) -> CalcResult<f64> {
        const OP: &str = "flow_efficiency";
        let log = self.checked_drainage_log(OP)?;
        let skin = self.skin_factor()?;
        nonzero(log + skin, "ln(0.472 re/rw) + S", OP)?;
        Ok(flow_efficiency(log, skin))
    }

    /// Evaluate every inflow operation; the first failure aborts the bundle.
    pub fn inflow_summary(&self) -> CalcResult<InflowResult> {
        let result = InflowResult {
            inflow_rate: self.inflow_rate()?,
            skin_factor: self.skin_factor()?,
            inflow_rate_with_skin: self.inflow_rate_with_skin()?,
            pressure_drop: self.pressure_drop()?,
            flow_efficiency: self.flow_efficiency()?,
        };
        debug!(
            qo = result.inflow_rate,
            skin = result.skin_factor,
            fe = result.flow_efficiency,
            "inflow summary computed"
        );
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Productivity / injectivity / Vogel
    // ------------------------------------------------------------------

    /// Productivity index `IP = q1 / (Pe - pwf)`
    pub fn productivity_index(&self, pe: f64, pwf: f64) -> CalcResult<f64> {
        nonzero(pe - pwf, "Pe - pwf", "productivity_index")?;
        Ok(productivity_index(self.params.q1, pe, pwf))
    }

    /// Injectivity index `II = q1 / (pwf - Pe)`.
    ///
    /// Same magnitude as [`Self::productivity_index`], opposite sign, and it
    /// fails under exactly the same condition (`Pe == pwf`).
    pub fn injectivity_index(&self, pe: f64, pwf: f64) -> CalcResult<f64> {
        nonzero(pwf - pe, "pwf - Pe", "injectivity_index")?;
        Ok(injectivity_index(self.params.q1, pe, pwf))
    }

    /// Rate at the bubble point `qsat = IP (Pe - psat)`
    pub fn qsat(&self, pe: f64, pwf: f64) -> CalcResult<f64> {
        let ip = self.productivity_index(pe, pwf)?;
        Ok(bubble_point_rate(ip, pe, self.params.psat))
    }

    /// Vogel correction `qc = qsat psat / (1.8 (Pe - psat))`
    pub fn qc(&self, pe: f64, pwf: f64) -> CalcResult<f64> {
        let psat = self.params.psat;
        let qsat = self.qsat(pe, pwf)?;
        nonzero(VOGEL_FACTOR * (pe - psat), "1.8 * (Pe - psat)", "qc")?;
        Ok(vogel_correction(qsat, pe, psat))
    }

    /// Absolute open flow `qmax = qc + qsat`
    pub fn qmax(&self, pe: f64, pwf: f64) -> CalcResult<f64> {
        let qc = self.qc(pe, pwf)?;
        let qsat = self.qsat(pe, pwf)?;
        Ok(qc + qsat)
    }

    /// Vogel inflow-performance curve over the given flowing pressures.
    ///
    /// The test point `(pe, pwf)` fixes `qc`; the curve yields one
    /// `(pressure, rate)` pair per entry of `pressures`, lazily and in order.
    pub fn ipr_curve<'a>(&self, pe: f64, pwf: f64, pressures: &'a [f64]) -> CalcResult<IprCurve<'a>> {
        let psat = nonzero(self.params.psat, "psat", "ipr_curve")?;
        let qc = self.qc(pe, pwf)?;
        Ok(IprCurve::new(qc, pe, psat, pressures))
    }

    /// Evaluate the whole productivity chain for one test point.
    pub fn productivity_summary(&self, pe: f64, pwf: f64) -> CalcResult<ProductivityResult> {
        let result = ProductivityResult {
            productivity_index: self.productivity_index(pe, pwf)?,
            injectivity_index: self.injectivity_index(pe, pwf)?,
            qsat: self.qsat(pe, pwf)?,
            qc: self.qc(pe, pwf)?,
            qmax: self.qmax(pe, pwf)?,
        };
        debug!(
            ip = result.productivity_index,
            qmax = result.qmax,
            "productivity summary computed"
        );
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Preconditions
    // ------------------------------------------------------------------

    fn checked_rw(&self, operation: &str) -> CalcResult<f64> {
        let rw = nonzero(self.params.rw, "rw", operation)?;
        positive(rw, "rw", "wellbore radius must be positive")
    }

    /// `ln(0.472 re/rw)` once `rw > 0` and the ratio is positive
    fn checked_drainage_log(&self, operation: &str) -> CalcResult<f64> {
        let rw = self.checked_rw(operation)?;
        positive(
            self.params.re / rw,
            "re/rw",
            "drainage radius ratio must be positive for the logarithm",
        )?;
        Ok(drainage_log(self.params.re, rw))
    }
}
