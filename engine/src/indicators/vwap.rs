// Volume Weighted Average Price (VWAP), cumulative over the whole series
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Vwap;

impl Vwap {
    pub fn from_params(_params: &Params) -> IndicatorResult<Self> {
        Ok(Vwap)
    }
}

pub fn typical_price(high: f64, low: f64, close: f64) -> f64 {
    (high + low + close) / 3.0
}

impl IndicatorCalculator for Vwap {
    fn name(&self) -> &str {
        "VWAP"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let (high, low, close) = (series.high()?, series.low()?, series.close()?);
        let volume = series.volume()?;

        let mut cumulative_pv = 0.0;
        let mut cumulative_volume = 0.0;
        let mut values = Vec::with_capacity(series.len());
        for i in 0..series.len() {
            let tp = typical_price(high[i], low[i], close[i]);
            if tp.is_nan() || volume[i].is_nan() {
                values.push(f64::NAN);
                continue;
            }
            cumulative_pv += tp * volume[i];
            cumulative_volume += volume[i];
            values.push(if cumulative_volume == 0.0 {
                f64::NAN
            } else {
                cumulative_pv / cumulative_volume
            });
        }
        Ok(IndicatorOutput::single("vwap", values))
    }
}
