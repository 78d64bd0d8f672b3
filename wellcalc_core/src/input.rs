//! # Raw Input Parsing
//!
//! Front ends collect numbers as text. This module turns that text into
//! `f64` values and reports failures as [`CalcError::InputParse`] or
//! [`CalcError::MissingField`], which are distinct from the domain errors
//! raised by the calculations themselves.
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::input::{parse_field, RawFields};
//!
//! assert_eq!(parse_field("ko", " 50 ").unwrap(), 50.0);
//! assert!(parse_field("ko", "fifty").unwrap_err().is_input_error());
//!
//! let fields = RawFields::from_pairs([("ko", "50"), ("h", "30")]);
//! assert_eq!(fields.require("h").unwrap(), 30.0);
//! assert_eq!(fields.optional("q1", 0.0).unwrap(), 0.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Parse one raw text field into a finite real number.
///
/// Surrounding whitespace is ignored. Empty text, text that is not a
/// number, and `NaN`/`inf` are all rejected.
pub fn parse_field(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::input_parse(field, raw, "value is empty"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|e: std::num::ParseFloatError| CalcError::input_parse(field, raw, e.to_string()))?;
    if !value.is_finite() {
        return Err(CalcError::input_parse(field, raw, "value must be finite"));
    }
    Ok(value)
}

/// A set of named raw text inputs, as submitted by a form or a batch file.
///
/// Serializes as a plain JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, text)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RawFields(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Insert or replace a raw value
    pub fn insert(&mut self, field: impl Into<String>, raw: impl Into<String>) {
        self.0.insert(field.into(), raw.into());
    }

    /// Parse a field that must be present
    pub fn require(&self, field: &str) -> CalcResult<f64> {
        match self.0.get(field) {
            Some(raw) => parse_field(field, raw),
            None => Err(CalcError::missing_field(field)),
        }
    }

    /// Parse a field that falls back to `default` when absent.
    ///
    /// A present but malformed value is still an error.
    pub fn optional(&self, field: &str, default: f64) -> CalcResult<f64> {
        match self.0.get(field) {
            Some(raw) => parse_field(field, raw),
            None => Ok(default),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert_eq!(parse_field("h", "30").unwrap(), 30.0);
        assert_eq!(parse_field("h", "  2.5e1\n").unwrap(), 25.0);
        assert_eq!(parse_field("pw", "-14.7").unwrap(), -14.7);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_field("ko", "12,5").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_PARSE");
        match err {
            CalcError::InputParse { field, value, .. } => {
                assert_eq!(field, "ko");
                assert_eq!(value, "12,5");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_empty_and_non_finite() {
        assert!(parse_field("uo", "   ").is_err());
        assert!(parse_field("uo", "NaN").is_err());
        assert!(parse_field("uo", "inf").is_err());
    }

    #[test]
    fn test_require_missing_field() {
        let fields = RawFields::from_pairs([("ko", "50")]);
        assert_eq!(
            fields.require("kd").unwrap_err(),
            CalcError::missing_field("kd")
        );
    }

    #[test]
    fn test_optional_still_parses_present_value() {
        let mut fields = RawFields::new();
        fields.insert("psat", "oops");
        assert!(fields.optional("psat", 0.0).is_err());
        assert_eq!(fields.optional("q1", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_raw_fields_json_is_plain_object() {
        let fields = RawFields::from_pairs([("ko", "50"), ("h", "30")]);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"h":"30","ko":"50"}"#);
        let roundtrip: RawFields = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, fields);
    }
}
