// Handler for a single indicator: resolve, then compute over the frame
use shared::ParameterSet;

use crate::config::EngineSettings;
use crate::data::{Frame, OhlcvSeries};
use crate::error::IndicatorResult;
use crate::indicators::{registry, IndicatorOutput};

pub fn handle_compute_indicator(
    settings: &EngineSettings,
    frame: &Frame,
    identifier: &str,
    overrides: &ParameterSet,
) -> IndicatorResult<IndicatorOutput> {
    let resolved = registry().resolve(identifier, overrides, settings.max_window)?;
    tracing::debug!(
        indicator = %resolved.id(),
        calculator = resolved.calculator.name(),
        parameters = %resolved.calculator.parameters(),
        rows = frame.len(),
        "Dispatching indicator"
    );

    let series = OhlcvSeries::new(frame)?;
    resolved.calculator.calculate(&series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Frame;
    use crate::error::IndicatorError;
    use crate::test_util::{frame_from_closes, timestamp};

    #[test]
    fn test_unknown_indicator() {
        let frame = frame_from_closes(&[1.0, 2.0]);
        let err = handle_compute_indicator(&EngineSettings::default(), &frame, "UNKNOWN", &ParameterSet::new())
            .unwrap_err();
        assert_eq!(err, IndicatorError::UnknownIndicator("UNKNOWN".to_string()));
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new(Vec::new()).unwrap();
        let err = handle_compute_indicator(&EngineSettings::default(), &frame, "SMA", &ParameterSet::new())
            .unwrap_err();
        assert_eq!(err, IndicatorError::EmptyInput);
    }

    #[test]
    fn test_missing_column_propagates() {
        let frame = Frame::new(vec![timestamp(0), timestamp(1)])
            .unwrap()
            .with_column("close", vec![1.0, 2.0])
            .unwrap();
        let err = handle_compute_indicator(&EngineSettings::default(), &frame, "ATR", &ParameterSet::new())
            .unwrap_err();
        assert_eq!(err, IndicatorError::ColumnMissing("high".to_string()));
    }
}
