// Read-only OHLCV view over a Frame
use crate::data::frame::Frame;
use crate::error::{IndicatorError, IndicatorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl PriceField {
    pub fn column_name(self) -> &'static str {
        match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
            PriceField::Volume => "volume",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "open" => Some(PriceField::Open),
            "high" => Some(PriceField::High),
            "low" => Some(PriceField::Low),
            "close" => Some(PriceField::Close),
            "volume" => Some(PriceField::Volume),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OhlcvSeries<'a> {
    frame: &'a Frame,
}

impl<'a> OhlcvSeries<'a> {
    pub fn new(frame: &'a Frame) -> IndicatorResult<Self> {
        if frame.is_empty() {
            return Err(IndicatorError::EmptyInput);
        }
        Ok(OhlcvSeries { frame })
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn frame(&self) -> &'a Frame {
        self.frame
    }

    pub fn field(&self, field: PriceField) -> IndicatorResult<&'a [f64]> {
        self.frame
            .column(field.column_name())
            .ok_or_else(|| IndicatorError::ColumnMissing(field.column_name().to_string()))
    }

    pub fn open(&self) -> IndicatorResult<&'a [f64]> {
        self.field(PriceField::Open)
    }

    pub fn high(&self) -> IndicatorResult<&'a [f64]> {
        self.field(PriceField::High)
    }

    pub fn low(&self) -> IndicatorResult<&'a [f64]> {
        self.field(PriceField::Low)
    }

    pub fn close(&self) -> IndicatorResult<&'a [f64]> {
        self.field(PriceField::Close)
    }

    pub fn volume(&self) -> IndicatorResult<&'a [f64]> {
        self.field(PriceField::Volume)
    }

    /// The last `k` values ending at position `i`, or `None` while fewer
    /// than `k` values are available.
    pub fn window(values: &[f64], k: usize, i: usize) -> Option<&[f64]> {
        if k == 0 || i >= values.len() || i + 1 < k {
            return None;
        }
        Some(&values[i + 1 - k..=i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{frame_from_closes, timestamp};

    #[test]
    fn test_empty_frame_is_empty_input() {
        let frame = Frame::new(Vec::new()).unwrap();
        assert_eq!(OhlcvSeries::new(&frame).unwrap_err(), IndicatorError::EmptyInput);
    }

    #[test]
    fn test_missing_column() {
        let frame = Frame::new(vec![timestamp(0)])
            .unwrap()
            .with_column("close", vec![1.0])
            .unwrap();
        let series = OhlcvSeries::new(&frame).unwrap();
        assert_eq!(series.close().unwrap(), &[1.0]);
        assert_eq!(
            series.volume().unwrap_err(),
            IndicatorError::ColumnMissing("volume".to_string())
        );
    }

    #[test]
    fn test_window_view() {
        let frame = frame_from_closes(&[10.0, 11.0, 12.0, 13.0]);
        let series = OhlcvSeries::new(&frame).unwrap();
        let close = series.close().unwrap();
        assert_eq!(OhlcvSeries::window(close, 3, 1), None);
        assert_eq!(OhlcvSeries::window(close, 3, 2), Some(&[10.0, 11.0, 12.0][..]));
        assert_eq!(OhlcvSeries::window(close, 3, 3), Some(&[11.0, 12.0, 13.0][..]));
        assert_eq!(OhlcvSeries::window(close, 3, 4), None);
        assert_eq!(OhlcvSeries::window(close, 0, 3), None);
    }

    #[test]
    fn test_price_field_parse() {
        assert_eq!(PriceField::parse("High"), Some(PriceField::High));
        assert_eq!(PriceField::parse("hl2"), None);
    }
}
