use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A single indicator parameter. Periods are integers, multipliers and
/// limits are floats, and selectors such as a pivot type are strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Parameter name to value. Ordered so that merged sets log and compare
/// deterministically.
pub type ParameterSet = BTreeMap<String, ParamValue>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid parameter JSON: {0}")]
pub struct ParameterFormatError(pub String);

/// Converts a JSON object such as `{"period": 21}` into a [`ParameterSet`].
/// `null` is treated as "no overrides".
pub fn parameters_from_json(value: &serde_json::Value) -> Result<ParameterSet, ParameterFormatError> {
    match value {
        serde_json::Value::Null => Ok(ParameterSet::new()),
        serde_json::Value::Object(_) => serde_json::from_value(value.clone())
            .map_err(|e| ParameterFormatError(e.to_string())),
        other => Err(ParameterFormatError(format!(
            "expected an object of parameters, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_values_keep_their_kind() {
        let params = parameters_from_json(&json!({
            "period": 21,
            "multiplier": 2.5,
            "type": "woodie"
        }))
        .unwrap();
        assert_eq!(params["period"], ParamValue::Int(21));
        assert_eq!(params["multiplier"], ParamValue::Float(2.5));
        assert_eq!(params["type"], ParamValue::Text("woodie".to_string()));
    }

    #[test]
    fn test_null_means_no_overrides() {
        assert!(parameters_from_json(&serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = parameters_from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(parameters_from_json(&json!({ "period": [14] })).is_err());
    }

    #[test]
    fn test_candle_serializes_timestamp_as_rfc3339() {
        let candle = Candle {
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 100.0,
        };
        let text = serde_json::to_string(&candle).unwrap();
        assert!(text.contains("1970-01-01T00:00:00Z"));
    }
}
