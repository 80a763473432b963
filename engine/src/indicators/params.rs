// Typed access to a resolved parameter set
use shared::{IndicatorId, ParamValue, ParameterSet};

use crate::error::{IndicatorError, IndicatorResult};

/// A merged (defaults + overrides) parameter set for one indicator, with the
/// configured window ceiling used to validate periods.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    indicator: IndicatorId,
    values: &'a ParameterSet,
    max_window: usize,
}

impl<'a> Params<'a> {
    pub fn new(indicator: IndicatorId, values: &'a ParameterSet, max_window: usize) -> Self {
        Params {
            indicator,
            values,
            max_window,
        }
    }

    pub fn indicator(&self) -> IndicatorId {
        self.indicator
    }

    fn get(&self, key: &str) -> IndicatorResult<&'a ParamValue> {
        self.values
            .get(key)
            .ok_or_else(|| self.invalid(key, "missing value".to_string()))
    }

    pub fn invalid(&self, key: &str, reason: String) -> IndicatorError {
        IndicatorError::InvalidParameter {
            indicator: self.indicator,
            parameter: key.to_string(),
            reason,
        }
    }

    /// A window length in `1..=max_window`. Integral floats such as `14.0`
    /// are accepted.
    pub fn period(&self, key: &str) -> IndicatorResult<usize> {
        let window = match self.get(key)? {
            ParamValue::Int(v) => *v,
            ParamValue::Float(v) if v.fract() == 0.0 && v.is_finite() => *v as i64,
            other => {
                return Err(self.invalid(key, format!("expected an integer, got {} {}", other.kind(), other)))
            }
        };
        if window < 1 || window as u64 > self.max_window as u64 {
            return Err(IndicatorError::InvalidWindow {
                window,
                max: self.max_window,
            });
        }
        Ok(window as usize)
    }

    pub fn float(&self, key: &str) -> IndicatorResult<f64> {
        let value = match self.get(key)? {
            ParamValue::Int(v) => *v as f64,
            ParamValue::Float(v) => *v,
            other => {
                return Err(self.invalid(key, format!("expected a number, got {} {}", other.kind(), other)))
            }
        };
        if !value.is_finite() {
            return Err(self.invalid(key, "must be finite".to_string()));
        }
        Ok(value)
    }

    pub fn non_negative(&self, key: &str) -> IndicatorResult<f64> {
        let value = self.float(key)?;
        if value < 0.0 {
            return Err(self.invalid(key, format!("must not be negative, got {}", value)));
        }
        Ok(value)
    }

    /// A smoothing factor or acceleration in (0, 1].
    pub fn fraction(&self, key: &str) -> IndicatorResult<f64> {
        let value = self.float(key)?;
        if value <= 0.0 || value > 1.0 {
            return Err(self.invalid(key, format!("must be in (0, 1], got {}", value)));
        }
        Ok(value)
    }

    /// Lowercased enumerated string.
    pub fn text(&self, key: &str) -> IndicatorResult<String> {
        match self.get(key)? {
            ParamValue::Text(v) => Ok(v.trim().to_ascii_lowercase()),
            other => Err(self.invalid(key, format!("expected a string, got {} {}", other.kind(), other))),
        }
    }
}
