//! Stateless window primitives shared by every indicator.
//!
//! All functions return a vector aligned 1:1 with the input. Positions before
//! the window is full are NaN, as are windows that contain a NaN, so warm-up
//! periods of composed indicators add up naturally.

use crate::data::OhlcvSeries;
use crate::error::{IndicatorError, IndicatorResult};

/// Hard ceiling for any window length, independent of configuration.
pub const MAX_WINDOW: usize = 100_000;

pub fn check_window(n: usize) -> IndicatorResult<()> {
    if n == 0 || n > MAX_WINDOW {
        return Err(IndicatorError::InvalidWindow {
            window: n as i64,
            max: MAX_WINDOW,
        });
    }
    Ok(())
}

fn rolling_apply(values: &[f64], n: usize, f: impl Fn(&[f64]) -> f64) -> IndicatorResult<Vec<f64>> {
    check_window(n)?;
    Ok((0..values.len())
        .map(|i| match OhlcvSeries::window(values, n, i) {
            Some(w) if !w.iter().any(|v| v.is_nan()) => f(w),
            _ => f64::NAN,
        })
        .collect())
}

/// Running sum with Neumaier compensation, so a large value leaving the
/// window does not take the small ones with it.
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn from_slice(values: &[f64]) -> Self {
        let mut acc = Self::default();
        values.iter().for_each(|v| acc.add(*v));
        acc
    }

    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Simple rolling mean over the last `n` values.
///
/// Non-finite values are kept out of the running sum: a window holding NaN is
/// NaN, a window holding an infinity is averaged directly, and the sum is
/// rebuilt from the window once the last non-finite value has left it.
pub fn rolling_mean(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    check_window(n)?;
    let mut results = Vec::with_capacity(values.len());
    let mut sum = CompensatedSum::default();
    let mut nan_in_window = 0usize;
    let mut non_finite_in_window = 0usize;

    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            nan_in_window += 1;
        } else if value.is_infinite() {
            non_finite_in_window += 1;
        } else {
            sum.add(value);
        }
        if i >= n {
            let leaving = values[i - n];
            if leaving.is_nan() {
                nan_in_window -= 1;
            } else if leaving.is_infinite() {
                non_finite_in_window -= 1;
            } else {
                sum.add(-leaving);
            }
        }
        if i + 1 < n || nan_in_window > 0 {
            results.push(f64::NAN);
            continue;
        }
        let window = &values[i + 1 - n..=i];
        if non_finite_in_window > 0 {
            results.push(window.iter().sum::<f64>() / n as f64);
            continue;
        }
        if i >= n && !values[i - n].is_finite() {
            // Window just became finite again
            sum = CompensatedSum::from_slice(window);
        }
        results.push(sum.total() / n as f64);
    }
    Ok(results)
}

/// Sample standard deviation (n - 1 denominator) over the last `n` values.
/// A window of one value has no sample deviation and yields NaN.
pub fn rolling_std(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    rolling_apply(values, n, |w| {
        if w.len() < 2 {
            return f64::NAN;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let squares: f64 = w.iter().map(|v| (v - mean) * (v - mean)).sum();
        (squares / (w.len() - 1) as f64).sqrt()
    })
}

pub fn rolling_min(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    rolling_apply(values, n, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn rolling_max(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    rolling_apply(values, n, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn rolling_sum(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    rolling_apply(values, n, |w| w.iter().sum())
}

/// Linearly weighted mean with weights 1..=n, the newest value weighted n.
pub fn rolling_weighted_mean(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    let weight_sum = (n * (n + 1)) as f64 / 2.0;
    rolling_apply(values, n, |w| {
        w.iter()
            .enumerate()
            .map(|(j, v)| v * (j + 1) as f64)
            .sum::<f64>()
            / weight_sum
    })
}

/// Exponential smoothing with α = 2 / (n + 1).
pub fn ema(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    check_window(n)?;
    Ok(smooth_exponential(values, 2.0 / (n as f64 + 1.0)))
}

/// Exponential smoothing with a caller-supplied α in (0, 1].
///
/// The recursion is seeded with the first non-NaN observation, so no value
/// depends on data after its own position. Leading NaNs stay NaN; a NaN after
/// the seed yields NaN at that position and leaves the state untouched.
pub fn smooth_exponential(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut results = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        if value.is_nan() {
            results.push(f64::NAN);
            continue;
        }
        let next = match previous {
            None => value,
            Some(prev) => prev + alpha * (value - prev),
        };
        previous = Some(next);
        results.push(next);
    }
    results
}

/// Wilder's smoothing (α = 1/n), seeded with the plain mean of the first `n`
/// values after any leading NaNs.
pub fn wilder(values: &[f64], n: usize) -> IndicatorResult<Vec<f64>> {
    check_window(n)?;
    let mut results = vec![f64::NAN; values.len()];
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return Ok(results);
    };
    if values.len() < start + n {
        return Ok(results);
    }
    let seed_window = &values[start..start + n];
    if seed_window.iter().any(|v| v.is_nan()) {
        return Ok(results);
    }
    let mut previous = seed_window.iter().sum::<f64>() / n as f64;
    results[start + n - 1] = previous;
    for i in (start + n)..values.len() {
        if values[i].is_nan() {
            continue;
        }
        previous += (values[i] - previous) / n as f64;
        results[i] = previous;
    }
    Ok(results)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares fit of `window` against x = 0..len-1.
pub fn linear_fit(window: &[f64]) -> LinearFit {
    let n = window.len() as f64;
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_x2 = (n - 1.0) * n * (2.0 * n - 1.0) / 6.0;
    let sum_y: f64 = window.iter().sum();
    let sum_xy: f64 = window.iter().enumerate().map(|(x, y)| x as f64 * y).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    LinearFit {
        slope,
        intercept: (sum_y - slope * sum_x) / n,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegressionOutput {
    /// Fitted value at the newest point of the window (x = n - 1).
    Endpoint,
    /// Fitted value at the oldest point of the window (x = 0).
    Intercept,
    Slope,
}

pub fn rolling_linear_regression(
    values: &[f64],
    n: usize,
    output: RegressionOutput,
) -> IndicatorResult<Vec<f64>> {
    rolling_apply(values, n, |w| {
        let fit = linear_fit(w);
        match output {
            RegressionOutput::Endpoint => fit.at((w.len() - 1) as f64),
            RegressionOutput::Intercept => fit.intercept,
            RegressionOutput::Slope => fit.slope,
        }
    })
}

/// Bar-to-bar change; the first position has no predecessor and is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut results = Vec::with_capacity(values.len());
    if values.is_empty() {
        return results;
    }
    results.push(f64::NAN);
    results.extend(values.windows(2).map(|w| w[1] - w[0]));
    results
}

/// Reports the first `lookback` positions as warm-up.
pub fn mask_warmup(values: &mut [f64], lookback: usize) {
    let end = lookback.min(values.len());
    values[..end].iter_mut().for_each(|v| *v = f64::NAN);
}
