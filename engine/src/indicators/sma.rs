// Simple Moving Average (SMA) indicator implementation
use super::window::rolling_mean;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let close = series.close()?;
        Ok(IndicatorOutput::single("sma", rolling_mean(close, self.period)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;
    use crate::test_util::{assert_f64_vec_eq, frame_from_closes};

    fn run(closes: &[f64], period: usize) -> IndicatorResult<Vec<f64>> {
        let frame = frame_from_closes(closes);
        let series = OhlcvSeries::new(&frame)?;
        Ok(Sma::new(period).calculate(&series)?.into_primary())
    }

    #[test]
    fn test_sma_calculation() {
        let results = run(&[10.0, 11.0, 12.0, 13.0, 14.0], 3).unwrap();
        assert_f64_vec_eq(&results, &[f64::NAN, f64::NAN, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let results = run(&[1.0, 2.0], 3).unwrap();
        assert_f64_vec_eq(&results, &[f64::NAN, f64::NAN]);
    }

    #[test]
    fn test_sma_period_one() {
        // SMA(1) is just the close price
        let results = run(&[1.0, 2.0, 3.0], 1).unwrap();
        assert_f64_vec_eq(&results, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sma_of_constant() {
        let results = run(&[7.25; 30], 20).unwrap();
        assert!(results[..19].iter().all(|v| v.is_nan()));
        assert!(results[19..].iter().all(|v| (v - 7.25).abs() < 1e-12));
    }

    #[test]
    fn test_sma_period_zero_is_invalid_window() {
        let err = run(&[1.0, 2.0, 3.0], 0).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidWindow { window: 0, .. }));
    }

    #[test]
    fn test_sma_name_and_parameters() {
        let sma = Sma::new(20);
        assert_eq!(sma.name(), "SMA(20)");
        assert_eq!(sma.parameters(), serde_json::json!({ "period": 20 }));
    }
}
