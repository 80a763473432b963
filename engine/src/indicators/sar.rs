// Parabolic SAR, computed by a forward scan over the acceleration factor and extreme point
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct ParabolicSar {
    name: String,
    acceleration: f64,
    maximum: f64,
}

impl ParabolicSar {
    pub fn new(acceleration: f64, maximum: f64) -> Self {
        Self {
            name: format!("SAR({},{})", acceleration, maximum),
            acceleration,
            maximum,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        let acceleration = params.fraction("acceleration")?;
        let maximum = params.fraction("maximum")?;
        if maximum < acceleration {
            return Err(params.invalid(
                "maximum",
                format!("must be at least the acceleration {}", acceleration),
            ));
        }
        Ok(Self::new(acceleration, maximum))
    }
}

/// SAR values; bar 0 is NaN. The acceleration factor starts at `acceleration`,
/// grows by the same step on each new extreme and is capped at `maximum`.
pub fn parabolic_sar(high: &[f64], low: &[f64], acceleration: f64, maximum: f64) -> Vec<f64> {
    let n = high.len();
    let mut output = vec![f64::NAN; n];
    if n < 2 {
        return output;
    }

    let mut is_uptrend = high[1] > high[0];
    let mut af = acceleration;
    let (mut sar, mut ep) = if is_uptrend {
        (low[0], high[1])
    } else {
        (high[0], low[1])
    };
    output[1] = sar;

    for i in 2..n {
        let mut next = sar + af * (ep - sar);
        if is_uptrend {
            // SAR may not rise into the prior two bars' range
            next = next.min(low[i - 1]).min(low[i - 2]);
            if low[i] < next {
                is_uptrend = false;
                next = ep;
                ep = low[i];
                af = acceleration;
            } else if high[i] > ep {
                ep = high[i];
                af = (af + acceleration).min(maximum);
            }
        } else {
            next = next.max(high[i - 1]).max(high[i - 2]);
            if high[i] > next {
                is_uptrend = true;
                next = ep;
                ep = high[i];
                af = acceleration;
            } else if low[i] < ep {
                ep = low[i];
                af = (af + acceleration).min(maximum);
            }
        }
        sar = next;
        output[i] = sar;
    }
    output
}

impl IndicatorCalculator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "acceleration": self.acceleration, "maximum": self.maximum })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        Ok(IndicatorOutput::single(
            "sar",
            parabolic_sar(series.high()?, series.low()?, self.acceleration, self.maximum),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sar_first_value_nan() {
        let high = [10.0, 11.0, 12.0, 11.5, 11.0];
        let low = [9.0, 10.0, 11.0, 10.5, 10.0];
        let result = parabolic_sar(&high, &low, 0.02, 0.2);
        assert!(result[0].is_nan());
        assert!(result[1..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_sar_single_bar() {
        let result = parabolic_sar(&[10.0], &[9.0], 0.02, 0.2);
        assert_eq!(result.len(), 1);
        assert!(result[0].is_nan());
    }

    #[test]
    fn test_sar_uptrend_stays_below_lows() {
        let high: Vec<f64> = (0..8).map(|i| 10.0 + i as f64).collect();
        let low: Vec<f64> = (0..8).map(|i| 9.0 + i as f64).collect();
        let result = parabolic_sar(&high, &low, 0.02, 0.2);
        for i in 1..result.len() {
            assert!(result[i] <= low[i], "SAR[{}]={} above low {}", i, result[i], low[i]);
        }
        // bar 2: 9.04 is pulled back to the low of bar 0
        assert_eq!(result[2], 9.0);
    }

    #[test]
    fn test_sar_reverses_to_extreme_point() {
        let high = [10.0, 11.0, 12.0, 13.0, 8.0];
        let low = [9.0, 10.0, 11.0, 12.0, 7.0];
        let result = parabolic_sar(&high, &low, 0.02, 0.2);
        // the collapse on bar 4 flips the trend and SAR jumps to the prior high
        assert_eq!(result[4], 13.0);
    }

    #[test]
    fn test_acceleration_capped() {
        let high: Vec<f64> = (0..200).map(|i| 10.0 + i as f64).collect();
        let low: Vec<f64> = (0..200).map(|i| 9.5 + i as f64).collect();
        let fast = parabolic_sar(&high, &low, 0.1, 0.2);
        let last = high.len() - 1;
        // With af pinned at 0.2 the gap g to the extreme point settles at g = 0.8 * (g + 1)
        let gap = high[last - 1] - fast[last];
        assert!((gap - 4.0).abs() < 1e-6);
    }
}
