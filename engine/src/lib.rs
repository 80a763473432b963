// Engine library root: indicator calculators, the registry that resolves them,
// the input frame and the batch service built on top.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;

pub use data::{Frame, OhlcvSeries, PriceField};
pub use error::{EngineError, IndicatorError, IndicatorResult};
pub use indicators::{registry, IndicatorCalculator, IndicatorOutput};
pub use services::{BatchReport, IndicatorService, OverridesByIndicator};

#[cfg(test)]
mod test_util;
