// Helpers shared by the unit tests
use chrono::{DateTime, Utc};
use shared::Candle;

use crate::data::Frame;

pub fn timestamp(i: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + i * 60, 0).unwrap()
}

pub fn create_candle(i: i64, close: f64) -> Candle {
    Candle {
        timestamp: timestamp(i),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1.0,
    }
}

pub fn create_ohlcv(i: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    Candle {
        timestamp: timestamp(i),
        open,
        high,
        low,
        close,
        volume,
    }
}

pub fn frame_from_closes(closes: &[f64]) -> Frame {
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| create_candle(i as i64, c))
        .collect();
    Frame::from_candles(&candles).unwrap()
}

/// Bars as (high, low, close); open is the close and volume is 1.
pub fn frame_from_hlc(bars: &[(f64, f64, f64)]) -> Frame {
    let candles: Vec<Candle> = bars
        .iter()
        .enumerate()
        .map(|(i, &(h, l, c))| create_ohlcv(i as i64, c, h, l, c, 1.0))
        .collect();
    Frame::from_candles(&candles).unwrap()
}

/// A deterministic, non-trivial price path with a rally, a sell-off and chop.
pub fn sample_hlc(len: usize) -> Vec<(f64, f64, f64)> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            let close = 100.0 + 10.0 * (x / 7.0).sin() + 0.15 * x;
            let spread = 1.0 + 0.5 * (x / 3.0).cos().abs();
            (close + spread, close - spread, close)
        })
        .collect()
}

pub fn assert_f64_vec_eq(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len(), "Vectors differ in length");
    for (i, (val_a, val_b)) in a.iter().zip(b.iter()).enumerate() {
        if val_a.is_nan() && val_b.is_nan() {
            // Both are NaN, consider them equal for this test
        } else {
            assert!((val_a - val_b).abs() < 1e-9, "Mismatch at index {}: {} != {}", i, val_a, val_b);
        }
    }
}

pub fn count_leading_nan(values: &[f64]) -> usize {
    values.iter().take_while(|v| v.is_nan()).count()
}
