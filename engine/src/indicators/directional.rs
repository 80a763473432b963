//! Directional movement system: +DI, −DI and ADX.
//!
//! Directional movement and true range are smoothed with Wilder's average
//! seeded by a plain mean, so ±DI is defined from bar `period` and ADX, which
//! smooths DX once more, from bar `2·period − 1`.

use super::atr::series_true_range;
use super::window::wilder;
use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLines {
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub adx: Vec<f64>,
}

/// +DM / −DM from consecutive high/low deltas; the smaller (or a
/// non-positive) move is zeroed. Bar 0 has no predecessor and is NaN.
pub fn directional_movement(high: &[f64], low: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = vec![f64::NAN; high.len()];
    let mut minus_dm = vec![f64::NAN; high.len()];
    for i in 1..high.len() {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        if up.is_nan() || down.is_nan() {
            continue;
        }
        plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
    }
    (plus_dm, minus_dm)
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if numerator.is_nan() || denominator.is_nan() {
        f64::NAN
    } else if denominator == 0.0 {
        // No range at all: no directional bias
        0.0
    } else {
        100.0 * numerator / denominator
    }
}

pub fn directional_lines(series: &OhlcvSeries, period: usize) -> IndicatorResult<DirectionalLines> {
    let (plus_dm, minus_dm) = directional_movement(series.high()?, series.low()?);
    let mut tr = series_true_range(series)?;
    // Align with the movement series, which starts at bar 1
    if let Some(first) = tr.first_mut() {
        *first = f64::NAN;
    }

    let smoothed_plus = wilder(&plus_dm, period)?;
    let smoothed_minus = wilder(&minus_dm, period)?;
    let smoothed_tr = wilder(&tr, period)?;

    let plus_di: Vec<f64> = smoothed_plus
        .iter()
        .zip(&smoothed_tr)
        .map(|(dm, tr)| ratio_percent(*dm, *tr))
        .collect();
    let minus_di: Vec<f64> = smoothed_minus
        .iter()
        .zip(&smoothed_tr)
        .map(|(dm, tr)| ratio_percent(*dm, *tr))
        .collect();
    let dx: Vec<f64> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| ratio_percent((p - m).abs(), p + m))
        .collect();
    let adx = wilder(&dx, period)?;

    Ok(DirectionalLines {
        plus_di,
        minus_di,
        adx,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionalLine {
    PlusDi,
    MinusDi,
    Adx,
}

impl DirectionalLine {
    fn label(self) -> &'static str {
        match self {
            DirectionalLine::PlusDi => "PLUS_DI",
            DirectionalLine::MinusDi => "MINUS_DI",
            DirectionalLine::Adx => "ADX",
        }
    }

    fn line_name(self) -> &'static str {
        match self {
            DirectionalLine::PlusDi => "plus_di",
            DirectionalLine::MinusDi => "minus_di",
            DirectionalLine::Adx => "adx",
        }
    }
}

/// One line of the directional system as a standalone indicator.
pub struct Directional {
    name: String,
    line: DirectionalLine,
    period: usize,
}

impl Directional {
    pub fn new(line: DirectionalLine, period: usize) -> Self {
        Self {
            name: format!("{}({})", line.label(), period),
            line,
            period,
        }
    }

    pub fn from_params(line: DirectionalLine, params: &Params) -> IndicatorResult<Self> {
        Ok(Self::new(line, params.period("period")?))
    }
}

impl IndicatorCalculator for Directional {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let lines = directional_lines(series, self.period)?;
        let values = match self.line {
            DirectionalLine::PlusDi => lines.plus_di,
            DirectionalLine::MinusDi => lines.minus_di,
            DirectionalLine::Adx => lines.adx,
        };
        Ok(IndicatorOutput::single(self.line.line_name(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{count_leading_nan, frame_from_hlc, sample_hlc};

    #[test]
    fn test_directional_movement_zeroes_smaller_move() {
        let high = [10.0, 12.0, 11.0, 11.5];
        let low = [9.0, 10.0, 8.0, 7.5];
        let (plus, minus) = directional_movement(&high, &low);
        assert!(plus[0].is_nan() && minus[0].is_nan());
        assert_eq!(&plus[1..], &[2.0, 0.0, 0.0]);
        // bar 3: up 0.5, down 0.5 -> neither dominates
        assert_eq!(&minus[1..], &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_warmup_lengths() {
        let frame = frame_from_hlc(&sample_hlc(100));
        let series = OhlcvSeries::new(&frame).unwrap();
        let lines = directional_lines(&series, 14).unwrap();
        assert_eq!(count_leading_nan(&lines.plus_di), 14);
        assert_eq!(count_leading_nan(&lines.minus_di), 14);
        assert_eq!(count_leading_nan(&lines.adx), 27);
        for value in lines.adx.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_steady_uptrend() {
        let bars: Vec<(f64, f64, f64)> = (0..40)
            .map(|i| {
                let base = 100.0 + i as f64;
                (base + 1.0, base - 1.0, base)
            })
            .collect();
        let frame = frame_from_hlc(&bars);
        let series = OhlcvSeries::new(&frame).unwrap();
        let lines = directional_lines(&series, 5).unwrap();
        let last = bars.len() - 1;
        assert!(lines.plus_di[last] > 0.0);
        assert_eq!(lines.minus_di[last], 0.0);
        assert!((lines.adx[last] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_market_is_zero_not_nan() {
        let frame = frame_from_hlc(&[(5.0, 5.0, 5.0); 20]);
        let series = OhlcvSeries::new(&frame).unwrap();
        let output = Directional::new(DirectionalLine::Adx, 3).calculate(&series).unwrap();
        assert_eq!(count_leading_nan(output.primary()), 5);
        assert!(output.primary()[5..].iter().all(|v| *v == 0.0));
    }
}
