// Pass-through series: a raw price component, or a constant
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::{OhlcvSeries, PriceField};
use crate::error::IndicatorResult;
use serde_json::Value;

pub struct CandleComponent {
    name: String,
    field: PriceField,
}

impl CandleComponent {
    pub fn new(field: PriceField) -> Self {
        Self {
            name: format!("CANDLE({})", field.column_name()),
            field,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        let component = params.text("component")?;
        let field = PriceField::parse(&component).ok_or_else(|| {
            params.invalid(
                "component",
                format!("'{}' is not one of open, high, low, close, volume", component),
            )
        })?;
        Ok(Self::new(field))
    }
}

impl IndicatorCalculator for CandleComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "component": self.field.column_name() })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        Ok(IndicatorOutput::single(
            "candle",
            series.field(self.field)?.to_vec(),
        ))
    }
}

pub struct Number {
    name: String,
    value: f64,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Self {
            name: format!("NUMBER({})", value),
            value,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(params.float("value")?))
    }
}

impl IndicatorCalculator for Number {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "value": self.value })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        Ok(IndicatorOutput::single("number", vec![self.value; series.len()]))
    }
}
