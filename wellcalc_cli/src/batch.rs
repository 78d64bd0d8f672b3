//! Batch evaluation of named well submissions.
//!
//! A batch file is a JSON array:
//!
//! ```json
//! [
//!   { "name": "W-1", "kind": "inflow",
//!     "fields": { "ko": "50", "h": "30", "pr": "3000", "pw": "2500",
//!                 "uo": "2", "bo": "1.2", "re": "1000", "rw": "0.5",
//!                 "length": "10", "area": "5", "rd": "3", "kd": "10" } },
//!   { "name": "P-1", "kind": "perforation",
//!     "fields": { "k": "100", "rw": "0.25", "lp": "12", "rp": "0.2",
//!                 "phasing": "0", "h": "20", "rd": "2" } }
//! ]
//! ```
//!
//! Productivity submissions also carry `pe` and `pwf` in `fields`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wellcalc_core::calculations::perforation;
use wellcalc_core::equations::EquationTracker;
use wellcalc_core::{
    CalcError, CalcResult, CalculationKind, PerforationParameters, RawFields, RecordPayload,
    ReservoirCalculator, WellParameters, WellRegistry,
};

/// One named request as read from a batch file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub kind: CalculationKind,
    #[serde(default)]
    pub fields: RawFields,
}

/// A submission that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub name: String,
    pub error: CalcError,
}

/// Everything produced by one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub registry: WellRegistry,
    pub tracker: EquationTracker,
    pub failures: Vec<Failure>,
}

/// Parse a batch file body
pub fn parse_submissions(text: &str) -> CalcResult<Vec<Submission>> {
    Ok(serde_json::from_str(text)?)
}

/// Run the calculation a submission asks for.
pub fn evaluate(submission: &Submission) -> CalcResult<RecordPayload> {
    let fields = &submission.fields;
    match submission.kind {
        CalculationKind::Inflow => {
            let inputs = WellParameters::from_raw(fields)?;
            let results = ReservoirCalculator::new(inputs).inflow_summary()?;
            Ok(RecordPayload::Inflow { inputs, results })
        }
        CalculationKind::Productivity => {
            let inputs = WellParameters::from_raw_test_point(fields)?;
            let pe = fields.require("pe")?;
            let pwf = fields.require("pwf")?;
            let results = ReservoirCalculator::new(inputs).productivity_summary(pe, pwf)?;
            Ok(RecordPayload::Productivity {
                inputs,
                pe,
                pwf,
                results,
            })
        }
        CalculationKind::Perforation => {
            let inputs = PerforationParameters::from_raw(fields)?;
            let results = perforation::calculate(&inputs)?;
            Ok(RecordPayload::Perforation { inputs, results })
        }
    }
}

/// Evaluate every submission into a fresh registry.
///
/// Failed submissions are collected and skipped; the rest are appended in
/// file order.
pub fn run(submissions: &[Submission]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for submission in submissions {
        match evaluate(submission) {
            Ok(payload) => {
                for equation in submission.kind.equations() {
                    outcome.tracker.record_for_well(
                        equation,
                        submission.kind.display_name(),
                        submission.name.as_str(),
                    );
                }
                outcome.registry.append(submission.name.as_str(), payload);
            }
            Err(error) => {
                debug!(name = %submission.name, code = error.error_code(), "submission skipped");
                outcome.failures.push(Failure {
                    name: submission.name.clone(),
                    error,
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellcalc_core::RankingMetric;

    const BATCH: &str = r#"[
        { "name": "W-1", "kind": "inflow",
          "fields": { "ko": "50", "h": "30", "pr": "3000", "pw": "2500", "uo": "2",
                      "bo": "1.2", "re": "1000", "rw": "0.5", "length": "10", "area": "5",
                      "rd": "3", "kd": "10" } },
        { "name": "W-2", "kind": "inflow",
          "fields": { "ko": "80", "h": "30", "pr": "3000", "pw": "2500", "uo": "2",
                      "bo": "1.2", "re": "1000", "rw": "0.5", "length": "10", "area": "0",
                      "rd": "3", "kd": "10" } },
        { "name": "T-1", "kind": "productivity",
          "fields": { "q1": "500", "psat": "2000", "pe": "3000", "pwf": "2500" } },
        { "name": "P-0", "kind": "perforation",
          "fields": { "k": "100", "rw": "0.25", "lp": "12", "rp": "0.2",
                      "phasing": "0", "h": "20", "rd": "2" } },
        { "name": "P-90", "kind": "perforation",
          "fields": { "k": "100", "rw": "0.25", "lp": "12", "rp": "0.2",
                      "phasing": "90", "h": "20", "rd": "2" } }
    ]"#;

    #[test]
    fn test_parse_submissions() {
        let subs = parse_submissions(BATCH).unwrap();
        assert_eq!(subs.len(), 5);
        assert_eq!(subs[2].kind, CalculationKind::Productivity);
        assert!(subs[0].fields.contains("kd"));

        let err = parse_submissions("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_run_skips_failures() {
        let outcome = run(&parse_submissions(BATCH).unwrap());
        assert_eq!(outcome.registry.len(), 3);

        let failed: Vec<_> = outcome.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, ["W-2", "P-90"]);
        assert_eq!(
            outcome.failures[0].error,
            CalcError::division_by_zero("A", "pressure_drop")
        );
        assert!(outcome.failures[1].error.is_domain_error());

        let ranking = outcome.registry.ranking(RankingMetric::Qmax);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].name, "T-1");
    }

    #[test]
    fn test_tracker_records_successful_wells_only() {
        let outcome = run(&parse_submissions(BATCH).unwrap());
        assert!(outcome
            .tracker
            .usages()
            .iter()
            .all(|u| u.well_name.as_deref() != Some("P-90")));
        assert_eq!(outcome.tracker.unique_equations().len(), 20);
    }

    #[test]
    fn test_missing_field_reported() {
        let sub = Submission {
            name: "T-2".to_string(),
            kind: CalculationKind::Productivity,
            fields: RawFields::from_pairs([("q1", "500"), ("psat", "2000"), ("pe", "3000")]),
        };
        assert_eq!(evaluate(&sub).unwrap_err(), CalcError::missing_field("pwf"));
    }
}
