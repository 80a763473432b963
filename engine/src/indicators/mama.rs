//! MESA Adaptive Moving Average (MAMA) and its following average (FAMA).
//!
//! A Hilbert transform discriminator measures the dominant cycle's phase; the
//! rate of phase change drives the smoothing factor between `slowlimit` and
//! `fastlimit`. The transform needs 32 bars to stabilise, so those positions
//! are reported as NaN.

use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

pub const MAMA_LOOKBACK: usize = 32;

const A: f64 = 0.0962;
const B: f64 = 0.5769;

pub struct Mama {
    name: String,
    fast_limit: f64,
    slow_limit: f64,
}

impl Mama {
    pub fn new(fast_limit: f64, slow_limit: f64) -> Self {
        Self {
            name: format!("MAMA({},{})", fast_limit, slow_limit),
            fast_limit,
            slow_limit,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        let fast_limit = params.fraction("fastlimit")?;
        let slow_limit = params.fraction("slowlimit")?;
        if slow_limit > fast_limit {
            return Err(params.invalid(
                "slowlimit",
                format!("must not exceed fastlimit {}", fast_limit),
            ));
        }
        Ok(Self::new(fast_limit, slow_limit))
    }
}

fn hilbert(values: &[f64], i: usize) -> f64 {
    A * values[i] + B * values[i - 2] - B * values[i - 4] - A * values[i - 6]
}

/// Returns (mama, fama), both unmasked.
pub fn mesa_adaptive(price: &[f64], fast_limit: f64, slow_limit: f64) -> (Vec<f64>, Vec<f64>) {
    let n = price.len();
    let mut mama_out = vec![f64::NAN; n];
    let mut fama_out = vec![f64::NAN; n];

    let mut smooth = vec![0.0; n];
    let mut detrender = vec![0.0; n];
    let mut i1 = vec![0.0; n];
    let mut q1 = vec![0.0; n];
    let mut i2 = vec![0.0; n];
    let mut q2 = vec![0.0; n];
    let mut re = vec![0.0; n];
    let mut im = vec![0.0; n];
    let mut period = vec![6.0; n];
    let mut phase = vec![0.0; n];

    let mut mama = price.first().copied().unwrap_or(f64::NAN);
    let mut fama = mama;

    for i in 0..n {
        if i >= 3 {
            smooth[i] = (4.0 * price[i] + 3.0 * price[i - 1] + 2.0 * price[i - 2] + price[i - 3]) / 10.0;
        }
        if i < 6 {
            mama = price[i];
            fama = price[i];
            mama_out[i] = mama;
            fama_out[i] = fama;
            continue;
        }

        let adjust = 0.075 * period[i - 1] + 0.54;
        detrender[i] = hilbert(&smooth, i) * adjust;
        q1[i] = hilbert(&detrender, i) * adjust;
        i1[i] = detrender[i - 3];

        // Advance the phase of I1 and Q1 by 90 degrees
        let ji = hilbert(&i1, i) * adjust;
        let jq = hilbert(&q1, i) * adjust;

        i2[i] = 0.2 * (i1[i] - jq) + 0.8 * i2[i - 1];
        q2[i] = 0.2 * (q1[i] + ji) + 0.8 * q2[i - 1];

        re[i] = 0.2 * (i2[i] * i2[i - 1] + q2[i] * q2[i - 1]) + 0.8 * re[i - 1];
        im[i] = 0.2 * (i2[i] * q2[i - 1] - q2[i] * i2[i - 1]) + 0.8 * im[i - 1];

        let mut p = period[i - 1];
        if im[i] != 0.0 && re[i] != 0.0 {
            p = 360.0 / (im[i] / re[i]).atan().to_degrees();
        }
        p = p.min(1.5 * period[i - 1]).max(0.67 * period[i - 1]);
        p = p.clamp(6.0, 50.0);
        period[i] = 0.2 * p + 0.8 * period[i - 1];

        phase[i] = if i1[i] != 0.0 {
            (q1[i] / i1[i]).atan().to_degrees()
        } else {
            phase[i - 1]
        };
        let delta_phase = (phase[i - 1] - phase[i]).max(1.0);
        let alpha = (fast_limit / delta_phase).clamp(slow_limit, fast_limit);

        mama = alpha * price[i] + (1.0 - alpha) * mama;
        fama = 0.5 * alpha * mama + (1.0 - 0.5 * alpha) * fama;
        mama_out[i] = mama;
        fama_out[i] = fama;
    }
    (mama_out, fama_out)
}

impl IndicatorCalculator for Mama {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fastlimit": self.fast_limit, "slowlimit": self.slow_limit })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let (mut mama, mut fama) = mesa_adaptive(series.close()?, self.fast_limit, self.slow_limit);
        super::window::mask_warmup(&mut mama, MAMA_LOOKBACK);
        super::window::mask_warmup(&mut fama, MAMA_LOOKBACK);
        Ok(IndicatorOutput::multi(vec![("mama", mama), ("fama", fama)]))
    }
}
