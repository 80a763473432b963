// Kaufman Adaptive Moving Average (KAMA)
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Kama {
    name: String,
    period: usize,
    fast: usize,
    slow: usize,
}

impl Kama {
    pub fn new(period: usize, fast: usize, slow: usize) -> Self {
        Self {
            name: format!("KAMA({},{},{})", period, fast, slow),
            period,
            fast,
            slow,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(
            params.period("period")?,
            params.period("fast")?,
            params.period("slow")?,
        ))
    }
}

impl IndicatorCalculator for Kama {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "fast": self.fast, "slow": self.slow })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let close = series.close()?;
        let n = self.period;
        let fast_sc = 2.0 / (self.fast as f64 + 1.0);
        let slow_sc = 2.0 / (self.slow as f64 + 1.0);

        let mut results = vec![f64::NAN; close.len()];
        if close.len() <= n {
            return Ok(IndicatorOutput::single("kama", results));
        }

        let mut kama = close[n - 1];
        for i in n..close.len() {
            let change = (close[i] - close[i - n]).abs();
            let volatility: f64 = (i + 1 - n..=i)
                .map(|j| (close[j] - close[j - 1]).abs())
                .sum();
            // Zero or undefined movement leaves the average where it was
            if volatility == 0.0 || !volatility.is_finite() || change.is_nan() {
                continue;
            }
            if kama.is_nan() {
                kama = close[i - 1];
            }
            let efficiency = change / volatility;
            let sc = (efficiency * (fast_sc - slow_sc) + slow_sc).powi(2);
            kama += sc * (close[i] - kama);
            results[i] = kama;
        }
        Ok(IndicatorOutput::single("kama", results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{count_leading_nan, frame_from_closes};

    fn run(closes: &[f64], period: usize) -> Vec<f64> {
        let frame = frame_from_closes(closes);
        let series = OhlcvSeries::new(&frame).unwrap();
        Kama::new(period, 2, 30).calculate(&series).unwrap().into_primary()
    }

    #[test]
    fn test_kama_efficient_trend_uses_fast_constant() {
        let closes: Vec<f64> = (0..15).map(|i| 10.0 + i as f64).collect();
        let results = run(&closes, 10);
        assert_eq!(count_leading_nan(&results), 10);
        // Straight line: efficiency ratio 1, smoothing constant (2/3)^2
        let sc = (2.0_f64 / 3.0).powi(2);
        let expected = 19.0 + sc * (20.0 - 19.0);
        assert!((results[10] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_kama_flat_window_is_nan() {
        let mut closes = vec![5.0; 12];
        closes.push(6.0);
        let results = run(&closes, 3);
        // windows of zero movement
        assert!(results[3..12].iter().all(|v| v.is_nan()));
        assert!(results[12].is_finite());
    }

    #[test]
    fn test_kama_stays_within_price_range() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + 5.0 * (i as f64 / 3.0).sin()).collect();
        let results = run(&closes, 10);
        for value in results.iter().filter(|v| !v.is_nan()) {
            assert!(*value > 94.0 && *value < 106.0);
        }
    }
}
