// True Range and Average True Range (ATR)
use super::window::rolling_mean;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

/// max(high − low, |high − prev close|, |low − prev close|); bar 0 is high − low.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    (0..high.len())
        .map(|i| {
            let range = high[i] - low[i];
            if i == 0 {
                return range;
            }
            let up = (high[i] - close[i - 1]).abs();
            let down = (low[i] - close[i - 1]).abs();
            if range.is_nan() || up.is_nan() || down.is_nan() {
                f64::NAN
            } else {
                range.max(up).max(down)
            }
        })
        .collect()
}

pub fn series_true_range(series: &OhlcvSeries) -> IndicatorResult<Vec<f64>> {
    Ok(true_range(series.high()?, series.low()?, series.close()?))
}

pub struct TrueRange;

impl TrueRange {
    pub fn from_params(_params: &Params) -> IndicatorResult<Self> {
        Ok(TrueRange)
    }
}

impl IndicatorCalculator for TrueRange {
    fn name(&self) -> &str {
        "TRANGE"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        Ok(IndicatorOutput::single("trange", series_true_range(series)?))
    }
}

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let tr = series_true_range(series)?;
        Ok(IndicatorOutput::single("atr", rolling_mean(&tr, self.period)?))
    }
}
