//! CLI settings and the CLI error type.
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! precision = 2
//! ipr_samples = 21
//! ranking_metric = "design_skin"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use wellcalc_core::{CalcError, RankingMetric};

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum CliError {
    /// A calculation or input error from the engine
    #[error(transparent)]
    Calc(CalcError),

    /// A file could not be read
    #[error("Cannot read {path}: {reason}")]
    Io { path: String, reason: String },

    /// The settings file is not valid
    #[error("Invalid config {path}: {reason}")]
    Config { path: String, reason: String },
}

impl CliError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        CliError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// JSON rendering; engine errors serialize as the bare `CalcError`
    pub fn to_json(&self) -> String {
        let rendered = match self {
            CliError::Calc(err) => serde_json::to_string_pretty(err),
            other => serde_json::to_string_pretty(other),
        };
        rendered.unwrap_or_else(|_| format!("{{\"type\":\"Unknown\",\"details\":{:?}}}", self.to_string()))
    }
}

impl From<CalcError> for CliError {
    fn from(err: CalcError) -> Self {
        CliError::Calc(err)
    }
}

/// Largest accepted `ipr_samples`
pub const MAX_IPR_SAMPLES: usize = 10_000;

/// Largest accepted `precision`
pub const MAX_PRECISION: usize = 17;

/// Output and ranking preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliSettings {
    /// Decimal places in text output
    pub precision: usize,
    /// Number of points on the printed IPR curve
    pub ipr_samples: usize,
    /// Metric used by `batch` when `--metric` is not given
    pub ranking_metric: RankingMetric,
}

impl Default for CliSettings {
    fn default() -> Self {
        CliSettings {
            precision: 4,
            ipr_samples: 10,
            ranking_metric: RankingMetric::InflowRate,
        }
    }
}

impl CliSettings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(CliSettings::default());
        };
        let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let settings = Self::parse(&text).map_err(|reason| CliError::Config {
            path: path.display().to_string(),
            reason,
        })?;
        debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn parse(text: &str) -> Result<Self, String> {
        let settings: CliSettings = toml::from_str(text).map_err(|e: toml::de::Error| e.to_string())?;
        if settings.ipr_samples > MAX_IPR_SAMPLES {
            return Err(format!(
                "ipr_samples = {} exceeds the maximum of {}",
                settings.ipr_samples, MAX_IPR_SAMPLES
            ));
        }
        if settings.precision > MAX_PRECISION {
            return Err(format!(
                "precision = {} exceeds the maximum of {}",
                settings.precision, MAX_PRECISION
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CliSettings::load(None).unwrap();
        assert_eq!(settings.precision, 4);
        assert_eq!(settings.ipr_samples, 10);
        assert_eq!(settings.ranking_metric, RankingMetric::InflowRate);
        assert_eq!(CliSettings::parse("").unwrap(), settings);
    }

    #[test]
    fn test_partial_file() {
        let settings = CliSettings::parse("ranking_metric = \"design_skin\"\n").unwrap();
        assert_eq!(settings.ranking_metric, RankingMetric::DesignSkin);
        assert_eq!(settings.precision, 4);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(CliSettings::parse("precison = 2\n").is_err());
        assert!(CliSettings::parse("ranking_metric = \"sdp\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("wellcalc-settings-{}.toml", std::process::id()));
        fs::write(&path, "precision = 2\nipr_samples = 21\n").unwrap();
        let settings = CliSettings::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(settings.precision, 2);
        assert_eq!(settings.ipr_samples, 21);
    }

    #[test]
    fn test_sample_count_bounded() {
        let at_limit = format!("ipr_samples = {}\n", MAX_IPR_SAMPLES);
        assert_eq!(CliSettings::parse(&at_limit).unwrap().ipr_samples, MAX_IPR_SAMPLES);
        assert!(CliSettings::parse("ipr_samples = 1000000000000\n").is_err());
        assert!(CliSettings::parse("precision = 100000\n").is_err());

        let path = std::env::temp_dir().join(format!("wellcalc-huge-{}.toml", std::process::id()));
        fs::write(&path, "ipr_samples = 1000000000000\n").unwrap();
        let result = CliSettings::load(Some(&path));
        fs::remove_file(&path).unwrap();
        match result.unwrap_err() {
            CliError::Config { reason, .. } => assert!(reason.contains("ipr_samples")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("wellcalc-does-not-exist.toml");
        match CliSettings::load(Some(&path)).unwrap_err() {
            CliError::Io { path: p, .. } => assert!(p.ends_with("wellcalc-does-not-exist.toml")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_error_json() {
        let err = CliError::from(CalcError::missing_field("ko"));
        let json = err.to_json();
        assert!(json.contains("\"MissingField\""));
        assert!(json.contains("\"ko\""));
    }
}
