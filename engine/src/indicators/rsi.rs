// Relative Strength Index (RSI) indicator implementation
use super::window::{diff, rolling_mean};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let changes = diff(series.close()?);
        // f64::max would swallow NaN, so the missing first change is kept explicitly
        let gains: Vec<f64> = changes
            .iter()
            .map(|&c| if c.is_nan() { f64::NAN } else { c.max(0.0) })
            .collect();
        let losses: Vec<f64> = changes
            .iter()
            .map(|&c| if c.is_nan() { f64::NAN } else { (-c).max(0.0) })
            .collect();

        let avg_gain = rolling_mean(&gains, self.period)?;
        let avg_loss = rolling_mean(&losses, self.period)?;

        let values = avg_gain
            .iter()
            .zip(avg_loss.iter())
            .map(|(&gain, &loss)| {
                if gain.is_nan() || loss.is_nan() {
                    f64::NAN
                } else if loss == 0.0 {
                    // No losses in the window
                    100.0
                } else {
                    100.0 - 100.0 / (1.0 + gain / loss)
                }
            })
            .collect();
        Ok(IndicatorOutput::single("rsi", values))
    }
}
