// SuperTrend: ATR bands around the median price that ratchet with the trend
use super::atr::series_true_range;
use super::window::rolling_mean;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct SuperTrend {
    name: String,
    atr_period: usize,
    multiplier: f64,
}

struct BandState {
    upper: f64,
    lower: f64,
    direction: f64,
}

impl SuperTrend {
    pub fn new(atr_period: usize, multiplier: f64) -> Self {
        Self {
            name: format!("SUPERTREND({},{})", atr_period, multiplier),
            atr_period,
            multiplier,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(
            params.period("atr_period")?,
            params.non_negative("multiplier")?,
        ))
    }
}

impl IndicatorCalculator for SuperTrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "atr_period": self.atr_period, "multiplier": self.multiplier })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let (high, low, close) = (series.high()?, series.low()?, series.close()?);
        let atr = rolling_mean(&series_true_range(series)?, self.atr_period)?;

        let mut supertrend = vec![f64::NAN; close.len()];
        let mut direction = vec![f64::NAN; close.len()];
        let mut state: Option<BandState> = None;

        for i in 0..close.len() {
            let median = (high[i] + low[i]) / 2.0;
            let basic_upper = median + self.multiplier * atr[i];
            let basic_lower = median - self.multiplier * atr[i];
            if basic_upper.is_nan() || basic_lower.is_nan() || close[i].is_nan() {
                continue;
            }

            let next = match &state {
                // First bar with a defined ATR starts in an uptrend
                None => BandState {
                    upper: basic_upper,
                    lower: basic_lower,
                    direction: 1.0,
                },
                Some(prev) => {
                    let prev_close = close[i - 1];
                    let upper = if basic_upper < prev.upper || prev_close > prev.upper {
                        basic_upper
                    } else {
                        prev.upper
                    };
                    let lower = if basic_lower > prev.lower || prev_close < prev.lower {
                        basic_lower
                    } else {
                        prev.lower
                    };
                    let direction = if prev.direction < 0.0 && close[i] > prev.upper {
                        1.0
                    } else if prev.direction > 0.0 && close[i] < prev.lower {
                        -1.0
                    } else {
                        prev.direction
                    };
                    BandState {
                        upper,
                        lower,
                        direction,
                    }
                }
            };

            supertrend[i] = if next.direction > 0.0 { next.lower } else { next.upper };
            direction[i] = next.direction;
            state = Some(next);
        }
        Ok(IndicatorOutput::multi(vec![
            ("supertrend", supertrend),
            ("direction", direction),
        ]))
    }
}
