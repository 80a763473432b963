// Moving Average Convergence Divergence (MACD) with signal line and histogram
use super::window::{ema, mask_warmup};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Macd {
    name: String,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast_period, slow_period, signal_period),
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(
            params.period("fastperiod")?,
            params.period("slowperiod")?,
            params.period("signalperiod")?,
        ))
    }

    pub fn lookback(&self) -> usize {
        self.fast_period.max(self.slow_period) - 1
    }

    pub fn signal_lookback(&self) -> usize {
        self.lookback() + self.signal_period - 1
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "fastperiod": self.fast_period,
            "slowperiod": self.slow_period,
            "signalperiod": self.signal_period,
        })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let close = series.close()?;
        let fast = ema(close, self.fast_period)?;
        let slow = ema(close, self.slow_period)?;
        let mut macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let mut signal = ema(&macd, self.signal_period)?;
        let mut hist: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        mask_warmup(&mut macd, self.lookback());
        mask_warmup(&mut signal, self.signal_lookback());
        mask_warmup(&mut hist, self.signal_lookback());
        Ok(IndicatorOutput::multi(vec![
            ("macd", macd),
            ("signal", signal),
            ("hist", hist),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{count_leading_nan, frame_from_closes};

    #[test]
    fn test_macd_lines_and_warmup() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + (i as f64 / 4.0).sin() * 5.0).collect();
        let frame = frame_from_closes(&closes);
        let series = OhlcvSeries::new(&frame).unwrap();
        let output = Macd::new(12, 26, 9).calculate(&series).unwrap();

        let macd = output.primary();
        let signal = output.line("signal").unwrap();
        let hist = output.line("hist").unwrap();
        assert_eq!(count_leading_nan(macd), 25);
        assert_eq!(count_leading_nan(signal), 33);
        assert_eq!(count_leading_nan(hist), 33);
        for i in 33..closes.len() {
            assert!((hist[i] - (macd[i] - signal[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let frame = frame_from_closes(&[10.0; 40]);
        let series = OhlcvSeries::new(&frame).unwrap();
        let output = Macd::new(12, 26, 9).calculate(&series).unwrap();
        assert!(output.primary()[25..].iter().all(|v| *v == 0.0));
    }
}
