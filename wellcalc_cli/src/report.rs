//! Plain-text rendering of results, curves and rankings.

use std::fmt::Write;

use wellcalc_core::equations::EquationTracker;
use wellcalc_core::{IprPoint, RankedRecord, RankingMetric, RecordPayload};

const RULE: &str = "═══════════════════════════════════════";

fn row(out: &mut String, label: &str, value: f64, precision: usize) {
    let _ = writeln!(out, "  {:<28}{:>18.*}", label, precision, value);
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", RULE);
}

/// Results of one calculation, every stage on its own row.
pub fn payload(name: &str, payload: &RecordPayload, precision: usize) -> String {
    let mut out = String::new();
    header(
        &mut out,
        &format!("{} - {}", payload.kind().display_name().to_uppercase(), name),
    );
    match payload {
        RecordPayload::Inflow { results, .. } => {
            row(&mut out, "Inflow rate qo (bbl/day)", results.inflow_rate, precision);
            row(&mut out, "Skin factor S", results.skin_factor, precision);
            row(&mut out, "Rate with skin (bbl/day)", results.inflow_rate_with_skin, precision);
            row(&mut out, "Pressure drop (psi)", results.pressure_drop, precision);
            row(&mut out, "Flow efficiency", results.flow_efficiency, precision);
        }
        RecordPayload::Productivity { pe, pwf, results, .. } => {
            row(&mut out, "Pe (psi)", *pe, precision);
            row(&mut out, "pwf (psi)", *pwf, precision);
            row(&mut out, "Productivity index IP", results.productivity_index, precision);
            row(&mut out, "Injectivity index II", results.injectivity_index, precision);
            row(&mut out, "qsat (bbl/day)", results.qsat, precision);
            row(&mut out, "qc (bbl/day)", results.qc, precision);
            row(&mut out, "qmax (bbl/day)", results.qmax, precision);
        }
        RecordPayload::Perforation { results, .. } => {
            let _ = writeln!(out, "  {:<28}{:>18}", "Phasing (deg)", results.phasing.degrees());
            row(&mut out, "dP perf", results.delta_p_perf, precision);
            row(&mut out, "hD", results.hd, precision);
            row(&mut out, "rpD", results.rpd, precision);
            row(&mut out, "rwD", results.rwd, precision);
            row(&mut out, "Sh", results.sh, precision);
            row(&mut out, "Swb", results.swb, precision);
            row(&mut out, "a", results.a, precision);
            row(&mut out, "b", results.b, precision);
            row(&mut out, "Sv", results.sv, precision);
            row(&mut out, "Sp", results.sp, precision);
            row(&mut out, "Sx", results.sx, precision);
            row(&mut out, "Sdp (design skin)", results.sdp, precision);
        }
    }
    out
}

/// Two-column IPR table
pub fn ipr_curve(points: &[IprPoint], precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:>18}{:>18}", "pwf (psi)", "q (bbl/day)");
    for point in points {
        let _ = writeln!(
            out,
            "  {:>18.*}{:>18.*}",
            precision, point.pressure, precision, point.rate
        );
    }
    out
}

/// Ranking table, highest value first
pub fn ranking(metric: RankingMetric, rows: &[RankedRecord], precision: usize) -> String {
    let mut out = String::new();
    header(&mut out, &format!("RANKING by {}", metric));
    if rows.is_empty() {
        let _ = writeln!(out, "  (no records expose {})", metric);
    }
    for row in rows {
        let _ = writeln!(
            out,
            "  {:>3}. {:<24}{:>18.*}",
            row.position, row.name, precision, row.value
        );
    }
    out
}

/// Literature behind the equations a run used, one line per source
pub fn references(tracker: &EquationTracker) -> String {
    let mut citations: Vec<String> = Vec::new();
    for equation in tracker.unique_equations() {
        let citation = equation.metadata().reference.citation();
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    let mut out = String::from("References:\n");
    for citation in citations {
        let _ = writeln!(out, "  - {}", citation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellcalc_core::calculations::perforation::calculate;
    use wellcalc_core::equations::Equation;
    use wellcalc_core::PerforationParameters;

    #[test]
    fn test_perforation_rows() {
        let inputs = PerforationParameters::new(100.0, 0.25, 12.0, 0.2, 0.0, 20.0, 2.0);
        let results = calculate(&inputs).unwrap();
        let text = payload("P-1", &RecordPayload::Perforation { inputs, results }, 4);
        assert!(text.contains("PERFORATION - P-1"));
        assert!(text.contains("-0.0024"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), 14);
    }

    #[test]
    fn test_ipr_precision() {
        let points = [IprPoint { pressure: 2000.0, rate: 1234.56789 }];
        let text = ipr_curve(&points, 2);
        assert!(text.contains("2000.00"));
        assert!(text.contains("1234.57"));
    }

    #[test]
    fn test_empty_ranking() {
        let text = ranking(RankingMetric::Qmax, &[], 2);
        assert!(text.contains("no records expose qmax"));
    }

    #[test]
    fn test_references_deduplicated() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::HoleSkin, "Sh");
        tracker.record(Equation::WellboreSkin, "Swb");
        let text = references(&tracker);
        assert_eq!(text.matches("Karakas & Tariq").count(), 1);
    }
}
