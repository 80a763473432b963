// Double and triple exponential moving averages, composed from the EMA primitive
use super::window::{ema, mask_warmup};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

/// DEMA = 2·EMA₁ − EMA(EMA₁)
pub struct Dema {
    name: String,
    period: usize,
}

impl Dema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("DEMA({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Dema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let ema1 = ema(series.close()?, self.period)?;
        let ema2 = ema(&ema1, self.period)?;
        let mut values: Vec<f64> = ema1.iter().zip(&ema2).map(|(a, b)| 2.0 * a - b).collect();
        mask_warmup(&mut values, self.period - 1);
        Ok(IndicatorOutput::single("dema", values))
    }
}

/// TEMA = 3·EMA₁ − 3·EMA(EMA₁) + EMA(EMA(EMA₁))
pub struct Tema {
    name: String,
    period: usize,
}

impl Tema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("TEMA({})", period),
            period,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?))
    }
}

impl IndicatorCalculator for Tema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let ema1 = ema(series.close()?, self.period)?;
        let ema2 = ema(&ema1, self.period)?;
        let ema3 = ema(&ema2, self.period)?;
        let mut values: Vec<f64> = ema1
            .iter()
            .zip(&ema2)
            .zip(&ema3)
            .map(|((a, b), c)| 3.0 * a - 3.0 * b + c)
            .collect();
        mask_warmup(&mut values, self.period - 1);
        Ok(IndicatorOutput::single("tema", values))
    }
}
