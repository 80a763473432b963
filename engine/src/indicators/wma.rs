// Weighted Moving Average (WMA)
use super::window::rolling_weighted_mean;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Wma {
    name: String,
    period: usize,
}

impl Wma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("WMA({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Wma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        Ok(IndicatorOutput::single(
            "wma",
            rolling_weighted_mean(series.close()?, self.period)?,
        ))
    }
}
