// Bollinger Bands: SMA ± k·sample standard deviation
use super::window::{rolling_mean, rolling_std};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct BollingerBands {
    name: String,
    period: usize,
    nbdev_up: f64,
    nbdev_dn: f64,
}

impl BollingerBands {
    pub fn new(period: usize, nbdev_up: f64, nbdev_dn: f64) -> Self {
        Self {
            name: format!("BBANDS({},{},{})", period, nbdev_up, nbdev_dn),
            period,
            nbdev_up,
            nbdev_dn,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(
            params.period("period")?,
            params.non_negative("nbdevup")?,
            params.non_negative("nbdevdn")?,
        ))
    }
}

impl IndicatorCalculator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "period": self.period,
            "nbdevup": self.nbdev_up,
            "nbdevdn": self.nbdev_dn,
        })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let close = series.close()?;
        let middle = rolling_mean(close, self.period)?;
        let deviation = rolling_std(close, self.period)?;

        let upper = middle
            .iter()
            .zip(&deviation)
            .map(|(m, d)| m + self.nbdev_up * d)
            .collect();
        let lower = middle
            .iter()
            .zip(&deviation)
            .map(|(m, d)| m - self.nbdev_dn * d)
            .collect();
        Ok(IndicatorOutput::multi(vec![
            ("upper", upper),
            ("middle", middle),
            ("lower", lower),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{count_leading_nan, frame_from_closes};

    #[test]
    fn test_bands_enclose_middle() {
        let closes: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64 / 5.0).cos() * 3.0).collect();
        let frame = frame_from_closes(&closes);
        let series = OhlcvSeries::new(&frame).unwrap();
        let output = BollingerBands::new(20, 2.0, 2.0).calculate(&series).unwrap();

        let upper = output.primary();
        let middle = output.line("middle").unwrap();
        let lower = output.line("lower").unwrap();
        assert_eq!(count_leading_nan(upper), 19);
        for i in 19..closes.len() {
            assert!(upper[i] >= middle[i] && middle[i] >= lower[i]);
        }
    }

    #[test]
    fn test_band_width_matches_sample_deviation() {
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let frame = frame_from_closes(&closes);
        let series = OhlcvSeries::new(&frame).unwrap();
        let output = BollingerBands::new(8, 1.0, 0.0).calculate(&series).unwrap();
        let sd = (32.0_f64 / 7.0).sqrt();
        assert!((output.primary()[7] - (5.0 + sd)).abs() < 1e-12);
        // nbdevdn 0 collapses the lower band onto the middle
        assert_eq!(output.line("lower").unwrap()[7], output.line("middle").unwrap()[7]);
    }
}
