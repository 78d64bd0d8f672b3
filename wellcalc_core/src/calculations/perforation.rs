//! # Perforation Skin Design
//!
//! Evaluates the Karakas-Tariq composite perforation skin for one
//! perforation geometry. Every intermediate is kept in the result so a
//! front end can display (and a test can check) each stage.
//!
//! ## Assumptions
//!
//! - Phasing is 0° or 180°; any other angle is rejected
//! - Isotropic formation (`kh = kv = 1`) unless anisotropy is supplied
//! - Designs are ranked by descending `Sdp`
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::calculations::perforation::{calculate, PerforationParameters};
//!
//! let params = PerforationParameters::new(100.0, 0.25, 12.0, 0.2, 0.0, 20.0, 2.0);
//! let result = calculate(&params).unwrap();
//!
//! assert_eq!(result.sx, -0.0024); // rd/(rw + lp) = 0.163 < 1.5
//! assert!((result.sdp - (result.sp + result.sx)).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{finite, nonzero, positive};
use crate::equations::perforation::{
    crushed_zone_correction, dimensionless_height, dimensionless_perforation_radius,
    dimensionless_wellbore_radius, hole_skin, pressure_drop_coefficient, vertical_exponents,
    vertical_skin, wellbore_skin,
};
use crate::errors::{CalcError, CalcResult};
use crate::input::RawFields;

pub use crate::equations::perforation::Phasing;

fn one() -> f64 {
    1.0
}

/// Perforation geometry and formation data.
///
/// `phasing` is kept as the raw angle in degrees; it is resolved to a
/// [`Phasing`] (and rejected if unsupported) when a calculation runs.
///
/// ## JSON Example
///
/// ```json
/// {
///   "k": 100.0, "rw": 0.25, "lp": 12.0, "rp": 0.2,
///   "phasing": 0.0, "h": 20.0, "rd": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerforationParameters {
    /// Formation permeability (md)
    pub k: f64,
    /// Wellbore radius (ft)
    pub rw: f64,
    /// Perforation tunnel length (ft)
    pub lp: f64,
    /// Perforation radius (ft)
    pub rp: f64,
    /// Phasing angle (degrees): 0 or 180
    pub phasing: f64,
    /// Perforated interval height (ft)
    pub h: f64,
    /// Crushed-zone radius (ft)
    pub rd: f64,
    /// Horizontal permeability
    #[serde(default = "one")]
    pub kh: f64,
    /// Vertical permeability
    #[serde(default = "one")]
    pub kv: f64,
}

impl PerforationParameters {
    /// Create isotropic perforation parameters (`kh = kv = 1`).
    pub fn new(k: f64, rw: f64, lp: f64, rp: f64, phasing: f64, h: f64, rd: f64) -> Self {
        PerforationParameters {
            k,
            rw,
            lp,
            rp,
            phasing,
            h,
            rd,
            kh: 1.0,
            kv: 1.0,
        }
    }

    /// Set horizontal and vertical permeability
    pub fn with_anisotropy(mut self, kh: f64, kv: f64) -> Self {
        self.kh = kh;
        self.kv = kv;
        self
    }

    /// Build from raw text fields; `kh` and `kv` default to 1.
    pub fn from_raw(fields: &RawFields) -> CalcResult<Self> {
        Ok(PerforationParameters {
            k: fields.require("k")?,
            rw: fields.require("rw")?,
            lp: fields.require("lp")?,
            rp: fields.require("rp")?,
            phasing: fields.require("phasing")?,
            h: fields.require("h")?,
            rd: fields.require("rd")?,
            kh: fields.optional("kh", 1.0)?,
            kv: fields.optional("kv", 1.0)?,
        })
    }

    /// Resolve the phasing angle
    pub fn phasing(&self) -> CalcResult<Phasing> {
        Phasing::from_degrees(self.phasing)
    }
}

/// Every stage of the perforation skin chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerforationSkinResult {
    pub phasing: Phasing,
    /// Perforation pressure-drop coefficient 3000 / k^n
    pub delta_p_perf: f64,
    /// Dimensionless height hD
    pub hd: f64,
    /// Dimensionless perforation radius rpD
    pub rpd: f64,
    /// Dimensionless wellbore radius rwD
    pub rwd: f64,
    /// Hole skin Sh
    pub sh: f64,
    /// Wellbore skin Swb
    pub swb: f64,
    /// Vertical convergence skin Sv
    pub sv: f64,
    /// Vertical exponent a
    pub a: f64,
    /// Vertical exponent b
    pub b: f64,
    /// Sh + Swb + Sv
    pub sp: f64,
    /// Crushed-zone correction
    pub sx: f64,
    /// Design skin Sp + Sx
    pub sdp: f64,
}

/// Perforation pressure-drop coefficient `3000 / k^n`, `n` chosen by phasing.
pub fn perforation_pressure_drop(params: &PerforationParameters) -> CalcResult<f64> {
    const OP: &str = "perforation_pressure_drop";
    let coefficients = params.phasing()?.coefficients();
    nonzero(params.k, "k", OP)?;
    positive(params.k, "k", "permeability must be positive")?;
    Ok(pressure_drop_coefficient(params.k, coefficients.pressure_exponent))
}

/// Run the whole perforation skin chain.
///
/// Fails on unsupported phasing, on any zero divisor (`lp`, `h`, `kh`, `kv`,
/// `lp + rw`), when `rpD` or a logarithm argument is not positive, and when
/// a skin term overflows (a tiny `rpD` drives `10^a` to infinity).
pub fn calculate(params: &PerforationParameters) -> CalcResult<PerforationSkinResult> {
    const OP: &str = "perforation_skin";
    let phasing = params.phasing()?;
    let coefficients = phasing.coefficients();

    let delta_p_perf = perforation_pressure_drop(params)?;

    nonzero(params.lp, "lp", OP)?;
    nonzero(params.kv, "kv", OP)?;
    nonzero(params.h, "h", OP)?;
    nonzero(params.kh, "kh", OP)?;
    if params.kh < 0.0 || params.kv < 0.0 {
        return Err(CalcError::invalid_domain(
            "kh/kv",
            format!("{}/{}", params.kh, params.kv),
            "permeabilities must be positive",
        ));
    }

    let hd = positive(
        dimensionless_height(params.h, params.lp, params.kh, params.kv),
        "hd",
        "dimensionless height must be positive",
    )?;
    let rpd = positive(
        dimensionless_perforation_radius(params.rp, params.h, params.kh, params.kv),
        "rpd",
        "dimensionless perforation radius must be positive",
    )?;

    let tunnel = nonzero(params.lp + params.rw, "lp + rw", OP)?;
    let rwd = dimensionless_wellbore_radius(params.rw, params.lp);

    positive(4.0 * params.rw / params.lp, "4 rw / lp", "hole skin logarithm needs a positive argument")?;
    let sh = hole_skin(params.rw, params.lp);
    let swb = finite(wellbore_skin(coefficients, rwd), "swb", "wellbore skin is not finite")?;
    let (a, b) = vertical_exponents(coefficients, rpd);
    let sv = vertical_skin(a, b, hd, rpd);
    trace!(hd, rpd, rwd, sh, swb, sv, a, b, "perforation skin components");
    let sv = finite(sv, "sv", "vertical skin is not finite")?;

    let sp = finite(sh + swb + sv, "sp", "perforation skin is not finite")?;
    let sx = crushed_zone_correction(params.rd / tunnel);
    let sdp = sp + sx;

    debug!(phasing = phasing.degrees(), sp, sx, sdp, "perforation skin computed");

    Ok(PerforationSkinResult {
        phasing,
        delta_p_perf,
        hd,
        rpd,
        rwd,
        sh,
        swb,
        sv,
        a,
        b,
        sp,
        sx,
        sdp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_design() -> PerforationParameters {
        PerforationParameters::new(100.0, 0.25, 12.0, 0.2, 0.0, 20.0, 2.0)
    }

    fn rel_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_zero_degree_reference_design() {
        let r = calculate(&reference_design()).unwrap();
        assert_eq!(r.phasing, Phasing::Deg0);
        assert!(rel_eq(r.delta_p_perf, 3000.0 / 100f64.powf(0.37)));
        assert!(rel_eq(r.hd, 20.0 / 12.0));
        assert!(rel_eq(r.rpd, 0.01));
        assert!(rel_eq(r.rwd, 0.25 / 12.25));
        assert!(rel_eq(r.sh, (1.0f64 / 12.0).ln()));
        assert!(rel_eq(r.swb, 0.16 * (2.675 * 0.25 / 12.25f64).exp()));
        assert!(rel_eq(r.a, -2.091 * 0.01f64.ln() + 0.0453));
        assert!(rel_eq(r.b, 5.1313 * 0.01 + 1.867));
        assert!(rel_eq(r.sv, 1_101_061.176_642));
        assert_eq!(r.sx, -0.0024);
        assert!(rel_eq(r.sp, r.sh + r.swb + r.sv));
        assert!(rel_eq(r.sdp, 1_101_058.858_313));
    }

    #[test]
    fn test_one_eighty_degree_coefficients() {
        let mut params = reference_design();
        params.phasing = 180.0;
        let r = calculate(&params).unwrap();
        assert_eq!(r.phasing, Phasing::Deg180);
        assert!(rel_eq(r.delta_p_perf, 3000.0 / 100f64.powf(0.40)));
        assert!(rel_eq(r.swb, 0.026 * (532.0 * 0.25 / 12.25f64).exp()));
        assert!(rel_eq(r.sdp, 838_139.576_783));
    }

    #[test]
    fn test_invalid_phasing_on_both_paths() {
        let mut params = reference_design();
        params.phasing = 90.0;
        let err = perforation_pressure_drop(&params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN_VALUE");
        assert_eq!(calculate(&params).unwrap_err(), err);
    }

    #[test]
    fn test_crushed_zone_band_edges() {
        // rw + lp == 1.0 exactly, so rd is the ratio
        let base = PerforationParameters::new(100.0, 0.25, 0.75, 0.2, 0.0, 20.0, 0.0);
        let sx_for = |rd: f64| calculate(&PerforationParameters { rd, ..base }).unwrap().sx;
        assert_eq!(sx_for(18.0), 0.0);
        assert_eq!(sx_for(2.0), -0.001);
        assert_eq!(sx_for(1.5), -0.002);
        assert_eq!(sx_for(1.0), -0.0024);
    }

    #[test]
    fn test_non_positive_rpd() {
        let mut params = reference_design();
        params.rp = 0.0;
        let err = calculate(&params).unwrap_err();
        match err {
            CalcError::InvalidDomainValue { field, .. } => assert_eq!(field, "rpd"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_tiny_perforation_radius_is_not_a_result() {
        let mut params = reference_design();
        params.rp = 1e-200;
        match calculate(&params).unwrap_err() {
            CalcError::InvalidDomainValue { field, value, .. } => {
                assert_eq!(field, "sv");
                assert_eq!(value, "NaN");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_zero_divisors() {
        let mut params = reference_design();
        params.lp = 0.0;
        assert_eq!(
            calculate(&params).unwrap_err(),
            CalcError::division_by_zero("lp", "perforation_skin")
        );

        let mut params = reference_design();
        params.k = 0.0;
        assert_eq!(
            calculate(&params).unwrap_err(),
            CalcError::division_by_zero("k", "perforation_pressure_drop")
        );

        let mut params = reference_design();
        params.h = 0.0;
        assert!(calculate(&params).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_anisotropy_changes_geometry() {
        let params = reference_design().with_anisotropy(10.0, 1.0);
        let r = calculate(&params).unwrap();
        assert!(rel_eq(r.hd, (20.0 / 12.0) * 10f64.sqrt()));
        assert!(rel_eq(r.rpd, (0.2 / 40.0) * (1.0 + 0.1f64.sqrt())));
    }

    #[test]
    fn test_from_raw_defaults_anisotropy() {
        let fields = RawFields::from_pairs([
            ("k", "100"), ("rw", "0.25"), ("lp", "12"), ("rp", "0.2"),
            ("phasing", "180"), ("h", "20"), ("rd", "2"),
        ]);
        let params = PerforationParameters::from_raw(&fields).unwrap();
        assert_eq!(params.kh, 1.0);
        assert_eq!(params.kv, 1.0);
        assert_eq!(params.phasing().unwrap(), Phasing::Deg180);
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{"k":100,"rw":0.25,"lp":12,"rp":0.2,"phasing":0,"h":20,"rd":2}"#;
        let params: PerforationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params, reference_design());
    }
}
