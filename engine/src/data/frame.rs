// Time-indexed table of named f64 columns. Used both as the indicator input
// and as the augmented output table of a batch run.
use chrono::{DateTime, Utc};
use shared::Candle;

use crate::error::{IndicatorError, IndicatorResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<(String, Vec<f64>)>,
}

impl Frame {
    /// Creates a frame without columns. Timestamps must be strictly increasing.
    pub fn new(index: Vec<DateTime<Utc>>) -> IndicatorResult<Self> {
        if let Some(pos) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(IndicatorError::UnorderedIndex(pos + 1));
        }
        Ok(Frame {
            index,
            columns: Vec::new(),
        })
    }

    pub fn from_candles(candles: &[Candle]) -> IndicatorResult<Self> {
        let frame = Frame::new(candles.iter().map(|c| c.timestamp).collect())?;
        frame
            .with_column("open", candles.iter().map(|c| c.open).collect())?
            .with_column("high", candles.iter().map(|c| c.high).collect())?
            .with_column("low", candles.iter().map(|c| c.low).collect())?
            .with_column("close", candles.iter().map(|c| c.close).collect())?
            .with_column("volume", candles.iter().map(|c| c.volume).collect())
    }

    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> IndicatorResult<Self> {
        self.set_column(name, values)?;
        Ok(self)
    }

    /// Inserts or replaces a column. Returns `true` when an existing column
    /// of the same name was overwritten.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> IndicatorResult<bool> {
        if values.len() != self.index.len() {
            return Err(IndicatorError::LengthMismatch {
                column: name.to_string(),
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                *existing = values;
                Ok(true)
            }
            None => {
                self.columns.push((name.to_string(), values));
                Ok(false)
            }
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn columns(&self) -> &[(String, Vec<f64>)] {
        &self.columns
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
