use shared::IndicatorId;
use thiserror::Error;

/// Failures of the indicator core: series access, window primitives,
/// parameter resolution and dispatch. NaN results are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Input series is empty")]
    EmptyInput,

    #[error("Required column '{0}' is missing")]
    ColumnMissing(String),

    #[error("Invalid window {window}: must be between 1 and {max}")]
    InvalidWindow { window: i64, max: usize },

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Unknown parameter '{parameter}' for indicator {indicator}")]
    UnknownParameter {
        indicator: IndicatorId,
        parameter: String,
    },

    #[error("Invalid value for parameter '{parameter}' of {indicator}: {reason}")]
    InvalidParameter {
        indicator: IndicatorId,
        parameter: String,
        reason: String,
    },

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Timestamps must be strictly increasing (violated at row {0})")]
    UnorderedIndex(usize),
}

pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Errors surfaced by the engine binary and its input adapters.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Indicator calculation error: {0}")]
    Indicator(#[from] IndicatorError),

    // Catch-all for anyhow errors coming from the input adapters
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_window_message() {
        let err = IndicatorError::InvalidWindow { window: 0, max: 5000 };
        assert_eq!(err.to_string(), "Invalid window 0: must be between 1 and 5000");
    }

    #[test]
    fn test_unknown_parameter_message_names_indicator() {
        let err = IndicatorError::UnknownParameter {
            indicator: IndicatorId::Rsi,
            parameter: "perod".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown parameter 'perod' for indicator RSI");
    }

    #[test]
    fn test_csv_row_errors_surface_through_anyhow() {
        let err: EngineError = anyhow::anyhow!("Error parsing 'open' at line 2").into();
        assert!(matches!(err, EngineError::AnyhowError(_)));
        assert_eq!(err.to_string(), "Error parsing 'open' at line 2");
    }

    #[test]
    fn test_indicator_error_wraps_into_engine_error() {
        let err: EngineError = IndicatorError::EmptyInput.into();
        assert!(matches!(err, EngineError::Indicator(IndicatorError::EmptyInput)));
        assert_eq!(err.to_string(), "Indicator calculation error: Input series is empty");
    }
}
