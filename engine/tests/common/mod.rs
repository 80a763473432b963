// Frame builders shared by the integration tests
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use ta_engine::Frame;

pub fn timestamp(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap()
}

/// Builds a frame from (high, low, close, volume) bars; open is the close.
pub fn frame_from_bars(bars: &[(f64, f64, f64, f64)]) -> Frame {
    let index = (0..bars.len()).map(timestamp).collect();
    Frame::new(index)
        .unwrap()
        .with_column("open", bars.iter().map(|b| b.2).collect())
        .unwrap()
        .with_column("high", bars.iter().map(|b| b.0).collect())
        .unwrap()
        .with_column("low", bars.iter().map(|b| b.1).collect())
        .unwrap()
        .with_column("close", bars.iter().map(|b| b.2).collect())
        .unwrap()
        .with_column("volume", bars.iter().map(|b| b.3).collect())
        .unwrap()
}

pub fn frame_from_closes(closes: &[f64]) -> Frame {
    let bars: Vec<_> = closes.iter().map(|&c| (c, c, c, 1.0)).collect();
    frame_from_bars(&bars)
}

/// Random bars with high >= close >= low and positive volume.
pub fn arb_bars(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec(
        (1.0..1000.0_f64, 0.0..0.1_f64, 0.0..0.1_f64, 1.0..10_000.0_f64),
        min_len..=max_len,
    )
    .prop_map(|data| {
        data.into_iter()
            .map(|(base, high_pct, low_pct, volume)| (base * (1.0 + high_pct), base * (1.0 - low_pct), base, volume))
            .collect()
    })
}

pub fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}
