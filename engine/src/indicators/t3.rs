// Tillson T3: six chained EMAs blended with coefficients derived from the volume factor
use super::window::{ema, mask_warmup};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct T3 {
    name: String,
    period: usize,
    vfactor: f64,
}

impl T3 {
    pub fn new(period: usize, vfactor: f64) -> Self {
        Self {
            name: format!("T3({},{})", period, vfactor),
            period,
            vfactor,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?, params.non_negative("vfactor")?))
    }

    pub fn lookback(&self) -> usize {
        6 * (self.period - 1)
    }

    fn coefficients(&self) -> [f64; 4] {
        let v = self.vfactor;
        let v2 = v * v;
        let v3 = v2 * v;
        [
            -v3,
            3.0 * v2 + 3.0 * v3,
            -6.0 * v2 - 3.0 * v - 3.0 * v3,
            1.0 + 3.0 * v + v3 + 3.0 * v2,
        ]
    }
}

impl IndicatorCalculator for T3 {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "vfactor": self.vfactor })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let mut chain = Vec::with_capacity(6);
        let mut current = ema(series.close()?, self.period)?;
        for _ in 1..6 {
            let next = ema(&current, self.period)?;
            chain.push(current);
            current = next;
        }
        chain.push(current);

        let [c1, c2, c3, c4] = self.coefficients();
        let (e3, e4, e5, e6) = (&chain[2], &chain[3], &chain[4], &chain[5]);
        let mut values: Vec<f64> = (0..e6.len())
            .map(|i| c1 * e6[i] + c2 * e5[i] + c3 * e4[i] + c4 * e3[i])
            .collect();
        mask_warmup(&mut values, self.lookback());
        Ok(IndicatorOutput::single("t3", values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_f64_vec_eq, count_leading_nan, frame_from_closes};

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum: f64 = T3::new(5, 0.7).coefficients().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_t3_period_one_reproduces_close() {
        let closes = [3.0, 5.0, 4.0, 6.0];
        let frame = frame_from_closes(&closes);
        let series = OhlcvSeries::new(&frame).unwrap();
        let results = T3::new(1, 0.7).calculate(&series).unwrap().into_primary();
        assert_f64_vec_eq(&results, &closes);
    }

    #[test]
    fn test_t3_warmup_and_constant() {
        let frame = frame_from_closes(&[9.0; 40]);
        let series = OhlcvSeries::new(&frame).unwrap();
        let results = T3::new(5, 0.7).calculate(&series).unwrap().into_primary();
        assert_eq!(count_leading_nan(&results), 24);
        assert!(results[24..].iter().all(|v| (v - 9.0).abs() < 1e-9));
    }
}
