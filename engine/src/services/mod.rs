// Engine services
pub mod indicator_service;

pub use indicator_service::{BatchReport, IndicatorService, OverridesByIndicator};
