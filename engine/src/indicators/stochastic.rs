// Stochastic oscillator (slow %K and %D)
use super::window::{rolling_max, rolling_mean, rolling_min};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Stochastic {
    name: String,
    fastk_period: usize,
    slowk_period: usize,
    slowd_period: usize,
}

impl Stochastic {
    pub fn new(fastk_period: usize, slowk_period: usize, slowd_period: usize) -> Self {
        Self {
            name: format!("STOCH({},{},{})", fastk_period, slowk_period, slowd_period),
            fastk_period,
            slowk_period,
            slowd_period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(
            params.period("fastk_period")?,
            params.period("slowk_period")?,
            params.period("slowd_period")?,
        ))
    }
}

impl IndicatorCalculator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "fastk_period": self.fastk_period,
            "slowk_period": self.slowk_period,
            "slowd_period": self.slowd_period,
        })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let close = series.close()?;
        let highest = rolling_max(series.high()?, self.fastk_period)?;
        let lowest = rolling_min(series.low()?, self.fastk_period)?;

        let fast_k: Vec<f64> = (0..close.len())
            .map(|i| {
                let range = highest[i] - lowest[i];
                if range == 0.0 {
                    f64::NAN
                } else {
                    100.0 * (close[i] - lowest[i]) / range
                }
            })
            .collect();
        let slow_k = rolling_mean(&fast_k, self.slowk_period)?;
        let slow_d = rolling_mean(&slow_k, self.slowd_period)?;
        Ok(IndicatorOutput::multi(vec![("slowk", slow_k), ("slowd", slow_d)]))
    }
}
