// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod dema;
pub mod directional;
pub mod ema;
pub mod kama;
pub mod macd;
pub mod mama;
pub mod params;
pub mod pivot;
pub mod price;
pub mod regression;
pub mod registry;
pub mod rsi;
pub mod sar;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod t3;
pub mod trima;
pub mod vwap;
pub mod window;
pub mod wma;

use serde_json::Value;

use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;

pub use params::Params;
pub use registry::{registry, IndicatorRegistry, IndicatorSpec, Resolved};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput>;
}

/// One or more named lines, each aligned with the input series. The first
/// line is the primary result.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorOutput {
    lines: Vec<(&'static str, Vec<f64>)>,
}

impl IndicatorOutput {
    pub fn single(name: &'static str, values: Vec<f64>) -> Self {
        IndicatorOutput {
            lines: vec![(name, values)],
        }
    }

    pub fn multi(lines: Vec<(&'static str, Vec<f64>)>) -> Self {
        IndicatorOutput { lines }
    }

    pub fn primary(&self) -> &[f64] {
        self.lines.first().map(|(_, v)| v.as_slice()).unwrap_or(&[])
    }

    pub fn into_primary(self) -> Vec<f64> {
        self.lines.into_iter().next().map(|(_, v)| v).unwrap_or_default()
    }

    pub fn line(&self, name: &str) -> Option<&[f64]> {
        self.lines
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn lines(&self) -> &[(&'static str, Vec<f64>)] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<(&'static str, Vec<f64>)> {
        self.lines
    }
}

pub(crate) fn boxed<T: IndicatorCalculator + 'static>(calculator: T) -> Box<dyn IndicatorCalculator> {
    Box::new(calculator)
}
