// Rolling linear regression: fitted endpoint or intercept
use super::window::{rolling_linear_regression, RegressionOutput};
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct LinearRegression {
    name: String,
    period: usize,
    output: RegressionOutput,
}

impl LinearRegression {
    pub fn new(period: usize, output: RegressionOutput) -> Self {
        let label = match output {
            RegressionOutput::Intercept => "LINEARREG_INTERCEPT",
            RegressionOutput::Slope => "LINEARREG_SLOPE",
            RegressionOutput::Endpoint => "LINEARREG",
        };
        Self {
            name: format!("{}({})", label, period),
            period,
            output,
        }
    }

    pub fn from_params(output: RegressionOutput, params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.period("period")?, output))
    }
}

impl IndicatorCalculator for LinearRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let values = rolling_linear_regression(series.close()?, self.period, self.output)?;
        Ok(IndicatorOutput::single("linearreg", values))
    }
}
