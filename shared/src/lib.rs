//! Data models shared between the indicator engine and any frontend that
//! lists or requests indicators.

pub mod catalog;
pub mod models;

pub use catalog::{catalog, Category, IndicatorId, IndicatorInfo, UnknownIndicatorId};
pub use models::{parameters_from_json, Candle, ParamValue, ParameterFormatError, ParameterSet};
