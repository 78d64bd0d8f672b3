//! Property-based tests for the calculation engine using proptest.
//!
//! Covers: inflow sign, skin sign, unit flow efficiency for an undamaged
//! zone, pressure-drop preconditions, productivity-index failure condition,
//! IPR curve shape, and the crushed-zone step function.

use proptest::prelude::*;
use wellcalc_core::calculations::ipr::pressure_samples;
use wellcalc_core::calculations::perforation::{self, PerforationParameters};
use wellcalc_core::calculations::reservoir::{ReservoirCalculator, WellParameters};
use wellcalc_core::CalcError;

/// Wells whose drainage logarithm is always positive (0.472 re/rw > 1).
fn well() -> impl Strategy<Value = WellParameters> {
    (
        1.0f64..500.0,
        1.0f64..200.0,
        0.0f64..6000.0,
        0.0f64..6000.0,
        0.1f64..20.0,
        1.0f64..2.0,
        10.0f64..5000.0,
        0.1f64..1.0,
    )
        .prop_map(|(ko, h, pr, pw, uo, bo, re, rw)| {
            WellParameters::new(ko, h, pr, pw, uo, bo, re, rw)
        })
}

// ── Inflow ───────────────────────────────────────────────────────────

proptest! {
    /// Inflow rate is finite and follows the sign of the drawdown.
    #[test]
    fn inflow_sign_follows_drawdown(params in well()) {
        let qo = ReservoirCalculator::new(params).inflow_rate().unwrap();
        prop_assert!(qo.is_finite());
        if params.pr > params.pw {
            prop_assert!(qo > 0.0);
        } else if params.pr < params.pw {
            prop_assert!(qo < 0.0);
        } else {
            prop_assert_eq!(qo, 0.0);
        }
    }

    /// Skin is positive for a damaged zone, negative for a stimulated one.
    #[test]
    fn skin_sign_follows_permeability_contrast(
        params in well(),
        kd in 1.0f64..500.0,
        extra in 0.01f64..10.0,
    ) {
        let params = params.with_damaged_zone(params.rw + extra, kd);
        let skin = ReservoirCalculator::new(params).skin_factor().unwrap();
        if kd < params.ko {
            prop_assert!(skin > 0.0);
        } else if kd > params.ko {
            prop_assert!(skin < 0.0);
        } else {
            prop_assert_eq!(skin, 0.0);
        }
    }

    /// An undamaged zone (kd == ko) has zero skin and unit efficiency.
    #[test]
    fn undamaged_zone_has_unit_efficiency(params in well(), extra in 0.01f64..10.0) {
        let params = params.with_damaged_zone(params.rw + extra, params.ko);
        let calc = ReservoirCalculator::new(params);
        prop_assert_eq!(calc.skin_factor().unwrap(), 0.0);
        prop_assert_eq!(calc.flow_efficiency().unwrap(), 1.0);
    }

    /// Zero flow area or zero permeability always fails the pressure drop.
    #[test]
    fn pressure_drop_rejects_zero_area_or_permeability(
        params in well(),
        length in 0.0f64..100.0,
        area in 0.1f64..100.0,
    ) {
        let no_area = ReservoirCalculator::new(params.with_section(length, 0.0));
        prop_assert_eq!(
            no_area.pressure_drop().unwrap_err(),
            CalcError::division_by_zero("A", "pressure_drop")
        );

        let mut no_perm = params.with_section(length, area);
        no_perm.ko = 0.0;
        let err = ReservoirCalculator::new(no_perm).pressure_drop().unwrap_err();
        prop_assert!(err.is_domain_error());
    }
}

// ── Productivity / IPR ───────────────────────────────────────────────

proptest! {
    /// The productivity index fails exactly when Pe == pwf.
    #[test]
    fn productivity_index_fails_iff_no_drawdown(
        pe in -1.0e6f64..1.0e6,
        pwf in -1.0e6f64..1.0e6,
        q1 in -1.0e4f64..1.0e4,
        equal in any::<bool>(),
    ) {
        let pwf = if equal { pe } else { pwf };
        let params = WellParameters::new(50.0, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
            .with_test_data(q1, 2000.0);
        let calc = ReservoirCalculator::new(params);

        let ip = calc.productivity_index(pe, pwf);
        let ii = calc.injectivity_index(pe, pwf);
        prop_assert_eq!(ip.is_err(), pe == pwf);
        prop_assert_eq!(ii.is_err(), pe == pwf);
        if let (Ok(ip), Ok(ii)) = (ip, ii) {
            prop_assert_eq!(ii, -ip);
        }
    }

    /// The curve has one point per input pressure, echoed unchanged.
    #[test]
    fn ipr_curve_echoes_pressures(
        pressures in prop::collection::vec(0.0f64..5000.0, 0..64),
        q1 in 1.0f64..2000.0,
        psat in 500.0f64..2500.0,
    ) {
        let params = WellParameters::new(50.0, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
            .with_test_data(q1, psat);
        let curve = ReservoirCalculator::new(params)
            .ipr_curve(3000.0, 2500.0, &pressures)
            .unwrap();

        prop_assert_eq!(curve.len(), pressures.len());
        let points: Vec<_> = curve.collect();
        prop_assert_eq!(points.len(), pressures.len());
        for (point, &p) in points.iter().zip(pressures.iter()) {
            prop_assert_eq!(point.pressure, p);
            prop_assert!(point.rate.is_finite());
        }
    }

    /// Sampled pressures run from the upper bound down to zero.
    #[test]
    fn pressure_samples_span_range(upper in 1.0f64..10000.0, count in 2usize..200) {
        let samples = pressure_samples(upper, count);
        prop_assert_eq!(samples.len(), count);
        prop_assert_eq!(samples[0], upper);
        prop_assert_eq!(samples[count - 1], 0.0);
        prop_assert!(samples.windows(2).all(|w| w[0] > w[1]));
    }
}

// ── Perforation ──────────────────────────────────────────────────────

proptest! {
    /// Design skin is always Sp plus a crushed-zone term from the table.
    #[test]
    fn design_skin_adds_tabulated_correction(
        k in 1.0f64..1000.0,
        rw in 0.1f64..0.5,
        lp in 0.5f64..20.0,
        rp in 0.01f64..0.5,
        h in 5.0f64..100.0,
        rd in 0.0f64..500.0,
        opposed in any::<bool>(),
    ) {
        let phasing = if opposed { 180.0 } else { 0.0 };
        let params = PerforationParameters::new(k, rw, lp, rp, phasing, h, rd);
        let result = perforation::calculate(&params).unwrap();

        prop_assert!([0.0, -0.001, -0.002, -0.0024].contains(&result.sx));
        prop_assert_eq!(result.sdp, result.sp + result.sx);
        prop_assert_eq!(result.sp, result.sh + result.swb + result.sv);
    }

    /// Any phasing other than 0 or 180 degrees is rejected.
    #[test]
    fn unsupported_phasing_is_rejected(phasing in 1.0f64..179.0) {
        let params = PerforationParameters::new(100.0, 0.25, 12.0, 0.2, phasing, 20.0, 2.0);
        let err = perforation::calculate(&params).unwrap_err();
        prop_assert_eq!(err.error_code(), "INVALID_DOMAIN_VALUE");
        prop_assert!(perforation::perforation_pressure_drop(&params).is_err());
    }
}
