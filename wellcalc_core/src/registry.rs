//! # Well Registry
//!
//! Named calculation records kept for display and ranking. The registry is
//! bookkeeping only: it stores what the engine produced and sorts it, and
//! the engine never looks at it.
//!
//! ## Structure
//!
//! ```text
//! WellRegistry
//! ├── meta: RegistryMetadata (schema version, timestamps)
//! └── records: Vec<CalculationRecord> (insertion order)
//!     └── payload: Inflow | Productivity | Perforation (inputs + results)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::calculations::reservoir::{ReservoirCalculator, WellParameters};
//! use wellcalc_core::registry::{RecordPayload, RankingMetric, WellRegistry};
//!
//! let mut registry = WellRegistry::new();
//! for (name, ko) in [("W-1", 50.0), ("W-2", 80.0)] {
//!     let inputs = WellParameters::new(ko, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
//!         .with_section(10.0, 5.0)
//!         .with_damaged_zone(3.0, 10.0);
//!     let results = ReservoirCalculator::new(inputs).inflow_summary().unwrap();
//!     registry.append(name, RecordPayload::Inflow { inputs, results });
//! }
//!
//! let ranking = registry.ranking(RankingMetric::InflowRate);
//! assert_eq!(ranking[0].name, "W-2");
//! assert_eq!(ranking[0].position, 1);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{
    CalculationKind, InflowResult, PerforationParameters, PerforationSkinResult,
    ProductivityResult, WellParameters,
};
use crate::errors::CalcError;

/// Current schema version of the registry JSON echo
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Inputs and results of one calculation.
///
/// Every record carries a full echo of its inputs so any displayed column
/// can be re-derived without calling the engine again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordPayload {
    Inflow {
        inputs: WellParameters,
        results: InflowResult,
    },
    Productivity {
        inputs: WellParameters,
        pe: f64,
        pwf: f64,
        results: ProductivityResult,
    },
    Perforation {
        inputs: PerforationParameters,
        results: PerforationSkinResult,
    },
}

impl RecordPayload {
    pub fn kind(&self) -> CalculationKind {
        match self {
            RecordPayload::Inflow { .. } => CalculationKind::Inflow,
            RecordPayload::Productivity { .. } => CalculationKind::Productivity,
            RecordPayload::Perforation { .. } => CalculationKind::Perforation,
        }
    }

    /// Value of `metric` if this payload exposes it
    pub fn metric(&self, metric: RankingMetric) -> Option<f64> {
        match (self, metric) {
            (RecordPayload::Inflow { results, .. }, RankingMetric::InflowRate) => {
                Some(results.inflow_rate)
            }
            (RecordPayload::Inflow { results, .. }, RankingMetric::InflowRateWithSkin) => {
                Some(results.inflow_rate_with_skin)
            }
            (RecordPayload::Inflow { results, .. }, RankingMetric::SkinFactor) => {
                Some(results.skin_factor)
            }
            (RecordPayload::Inflow { results, .. }, RankingMetric::PressureDrop) => {
                Some(results.pressure_drop)
            }
            (RecordPayload::Inflow { results, .. }, RankingMetric::FlowEfficiency) => {
                Some(results.flow_efficiency)
            }
            (RecordPayload::Productivity { results, .. }, RankingMetric::ProductivityIndex) => {
                Some(results.productivity_index)
            }
            (RecordPayload::Productivity { results, .. }, RankingMetric::Qmax) => {
                Some(results.qmax)
            }
            (RecordPayload::Perforation { results, .. }, RankingMetric::DesignSkin) => {
                Some(results.sdp)
            }
            _ => None,
        }
    }
}

/// A named snapshot of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: Uuid,
    /// Display key; several records may share a name
    pub name: String,
    pub created: DateTime<Utc>,
    pub payload: RecordPayload,
}

/// Quantity a ranking sorts by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    InflowRate,
    InflowRateWithSkin,
    SkinFactor,
    PressureDrop,
    FlowEfficiency,
    ProductivityIndex,
    Qmax,
    DesignSkin,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 8] = [
        RankingMetric::InflowRate,
        RankingMetric::InflowRateWithSkin,
        RankingMetric::SkinFactor,
        RankingMetric::PressureDrop,
        RankingMetric::FlowEfficiency,
        RankingMetric::ProductivityIndex,
        RankingMetric::Qmax,
        RankingMetric::DesignSkin,
    ];

    /// snake_case name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::InflowRate => "inflow_rate",
            RankingMetric::InflowRateWithSkin => "inflow_rate_with_skin",
            RankingMetric::SkinFactor => "skin_factor",
            RankingMetric::PressureDrop => "pressure_drop",
            RankingMetric::FlowEfficiency => "flow_efficiency",
            RankingMetric::ProductivityIndex => "productivity_index",
            RankingMetric::Qmax => "qmax",
            RankingMetric::DesignSkin => "design_skin",
        }
    }

    /// Calculation kind whose records carry this metric
    pub fn kind(&self) -> CalculationKind {
        match self {
            RankingMetric::InflowRate
            | RankingMetric::InflowRateWithSkin
            | RankingMetric::SkinFactor
            | RankingMetric::PressureDrop
            | RankingMetric::FlowEfficiency => CalculationKind::Inflow,
            RankingMetric::ProductivityIndex | RankingMetric::Qmax => {
                CalculationKind::Productivity
            }
            RankingMetric::DesignSkin => CalculationKind::Perforation,
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMetric {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        RankingMetric::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str() == name)
            .ok_or_else(|| {
                CalcError::invalid_domain("metric", s, "unknown ranking metric")
            })
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    /// 1-based rank
    pub position: usize,
    pub name: String,
    pub value: f64,
    pub id: Uuid,
}

/// Registry metadata for the JSON echo of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Ordered log of named calculation records.
///
/// Mutation takes `&mut self`; share across threads behind a `Mutex`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellRegistry {
    pub meta: RegistryMetadata,
    records: Vec<CalculationRecord>,
}

impl WellRegistry {
    pub fn new() -> Self {
        let now = Utc::now();
        WellRegistry {
            meta: RegistryMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            records: Vec::new(),
        }
    }

    /// Append a record and return its id.
    pub fn append(&mut self, name: impl Into<String>, payload: RecordPayload) -> Uuid {
        let record = CalculationRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            created: Utc::now(),
            payload,
        };
        let id = record.id;
        debug!(%id, name = %record.name, kind = record.payload.kind().display_name(), "record appended");
        self.records.push(record);
        self.touch();
        id
    }

    /// Remove every record named `name`; returns how many were removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.name != name);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(name, removed, "records removed");
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.touch();
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn get(&self, id: &Uuid) -> Option<&CalculationRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// Rank every record that exposes `metric`, highest value first.
    ///
    /// Ties keep insertion order. Records of other kinds are left out.
    pub fn ranking(&self, metric: RankingMetric) -> Vec<RankedRecord> {
        let mut rows: Vec<(&CalculationRecord, f64)> = self
            .records
            .iter()
            .filter_map(|record| record.payload.metric(metric).map(|value| (record, value)))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));

        rows.into_iter()
            .enumerate()
            .map(|(i, (record, value))| RankedRecord {
                position: i + 1,
                name: record.name.clone(),
                value,
                id: record.id,
            })
            .collect()
    }

    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for WellRegistry {
    fn default() -> Self {
        WellRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::perforation;
    use crate::calculations::ReservoirCalculator;

    fn inflow_payload(ko: f64) -> RecordPayload {
        let inputs = WellParameters::new(ko, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
            .with_section(10.0, 5.0)
            .with_damaged_zone(3.0, 10.0);
        let results = ReservoirCalculator::new(inputs).inflow_summary().unwrap();
        RecordPayload::Inflow { inputs, results }
    }

    fn perforation_payload(phasing: f64) -> RecordPayload {
        let inputs = PerforationParameters::new(100.0, 0.25, 12.0, 0.2, phasing, 20.0, 2.0);
        let results = perforation::calculate(&inputs).unwrap();
        RecordPayload::Perforation { inputs, results }
    }

    #[test]
    fn test_registry_creation() {
        let registry = WellRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.meta.version, SCHEMA_VERSION);
        assert_eq!(registry.meta.created, registry.meta.modified);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut registry = WellRegistry::new();
        let a = registry.append("A", inflow_payload(50.0));
        let b = registry.append("B", inflow_payload(20.0));
        let names: Vec<_> = registry.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_ne!(a, b);
        assert_eq!(registry.get(&b).unwrap().name, "B");
        assert!(registry.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_ranking_descending_and_stable() {
        let mut registry = WellRegistry::new();
        registry.append("low", inflow_payload(20.0));
        registry.append("high", inflow_payload(80.0));
        registry.append("tie", inflow_payload(20.0));
        registry.append("perf", perforation_payload(0.0));

        let ranking = registry.ranking(RankingMetric::InflowRate);
        let names: Vec<_> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["high", "low", "tie"]);
        let positions: Vec<_> = ranking.iter().map(|r| r.position).collect();
        assert_eq!(positions, [1, 2, 3]);
        assert!(ranking[0].value > ranking[1].value);
    }

    #[test]
    fn test_design_skin_ranking() {
        let mut registry = WellRegistry::new();
        registry.append("zero", perforation_payload(0.0));
        registry.append("opposed", perforation_payload(180.0));
        registry.append("well", inflow_payload(50.0));

        let ranking = registry.ranking(RankingMetric::DesignSkin);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].name, "zero");
        assert!(registry.ranking(RankingMetric::Qmax).is_empty());
    }

    #[test]
    fn test_remove_by_name_and_clear() {
        let mut registry = WellRegistry::new();
        registry.append("dup", inflow_payload(50.0));
        registry.append("keep", inflow_payload(40.0));
        registry.append("dup", inflow_payload(30.0));

        assert_eq!(registry.remove_by_name("dup"), 2);
        assert_eq!(registry.remove_by_name("missing"), 0);
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.ranking(RankingMetric::InflowRate).is_empty());
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("design_skin".parse::<RankingMetric>().unwrap(), RankingMetric::DesignSkin);
        assert_eq!(" qmax ".parse::<RankingMetric>().unwrap(), RankingMetric::Qmax);
        let err = "sdp".parse::<RankingMetric>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN_VALUE");
        for metric in RankingMetric::ALL {
            assert_eq!(metric.to_string().parse::<RankingMetric>().unwrap(), metric);
            assert_eq!(
                serde_json::to_string(&metric).unwrap(),
                format!("\"{}\"", metric.as_str())
            );
        }
    }

    #[test]
    fn test_default_metric() {
        assert_eq!(RankingMetric::default(), RankingMetric::InflowRate);
    }

    #[test]
    fn test_metric_kind_matches_payload() {
        let inflow = inflow_payload(50.0);
        for metric in RankingMetric::ALL {
            assert_eq!(
                inflow.metric(metric).is_some(),
                metric.kind() == CalculationKind::Inflow
            );
        }
    }

    #[test]
    fn test_registry_serialization() {
        let mut registry = WellRegistry::new();
        registry.append("W-1", inflow_payload(50.0));
        registry.append("P-1", perforation_payload(180.0));

        let json = serde_json::to_string_pretty(&registry).unwrap();
        assert!(json.contains("\"kind\": \"perforation\""));
        assert!(json.contains("\"phasing\": \"180\""));

        let roundtrip: WellRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.len(), 2);
        assert_eq!(roundtrip.meta.version, SCHEMA_VERSION);
        assert_eq!(roundtrip.records()[1].id, registry.records()[1].id);
        assert_eq!(roundtrip.records()[1].payload.kind(), CalculationKind::Perforation);
    }
}
