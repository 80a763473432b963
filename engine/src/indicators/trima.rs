// Triangular Moving Average (TRIMA): a rolling mean of a rolling mean
use super::window::rolling_mean;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Trima {
    name: String,
    period: usize,
}

impl Trima {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("TRIMA({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }

    /// Inner and outer window lengths. Their combined warm-up is period - 1.
    fn windows(&self) -> (usize, usize) {
        if self.period % 2 == 1 {
            let half = (self.period + 1) / 2;
            (half, half)
        } else {
            (self.period / 2, self.period / 2 + 1)
        }
    }
}

impl IndicatorCalculator for Trima {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let (inner, outer) = self.windows();
        let first = rolling_mean(series.close()?, inner)?;
        Ok(IndicatorOutput::single("trima", rolling_mean(&first, outer)?))
    }
}
