//! Floor pivots (classic, Woodie, Fibonacci) and Camarilla levels.
//!
//! Every level at bar `i` is derived from bar `i − 1`'s high, low and close,
//! so bar 0 is NaN. Only the requested level is returned.

use super::{IndicatorCalculator, IndicatorOutput, Params};
use crate::data::OhlcvSeries;
use crate::error::IndicatorResult;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotKind {
    Classic,
    Woodie,
    Fibonacci,
}

impl PivotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PivotKind::Classic => "classic",
            PivotKind::Woodie => "woodie",
            PivotKind::Fibonacci => "fibonacci",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "classic" | "standard" => Some(PivotKind::Classic),
            "woodie" => Some(PivotKind::Woodie),
            "fibonacci" => Some(PivotKind::Fibonacci),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotLevel {
    Pp,
    R1,
    R2,
    R3,
    S1,
    S2,
    S3,
}

impl PivotLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PivotLevel::Pp => "pp",
            PivotLevel::R1 => "r1",
            PivotLevel::R2 => "r2",
            PivotLevel::R3 => "r3",
            PivotLevel::S1 => "s1",
            PivotLevel::S2 => "s2",
            PivotLevel::S3 => "s3",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "pp" => Some(PivotLevel::Pp),
            "r1" => Some(PivotLevel::R1),
            "r2" => Some(PivotLevel::R2),
            "r3" => Some(PivotLevel::R3),
            "s1" => Some(PivotLevel::S1),
            "s2" => Some(PivotLevel::S2),
            "s3" => Some(PivotLevel::S3),
            _ => None,
        }
    }
}

pub fn floor_pivot(kind: PivotKind, level: PivotLevel, high: f64, low: f64, close: f64) -> f64 {
    let range = high - low;
    let pp = match kind {
        PivotKind::Woodie => (high + low + 2.0 * close) / 4.0,
        PivotKind::Classic | PivotKind::Fibonacci => (high + low + close) / 3.0,
    };
    match kind {
        PivotKind::Fibonacci => match level {
            PivotLevel::Pp => pp,
            PivotLevel::R1 => pp + 0.382 * range,
            PivotLevel::R2 => pp + 0.618 * range,
            PivotLevel::R3 => pp + range,
            PivotLevel::S1 => pp - 0.382 * range,
            PivotLevel::S2 => pp - 0.618 * range,
            PivotLevel::S3 => pp - range,
        },
        PivotKind::Classic | PivotKind::Woodie => match level {
            PivotLevel::Pp => pp,
            PivotLevel::R1 => 2.0 * pp - low,
            PivotLevel::R2 => pp + range,
            PivotLevel::R3 => high + 2.0 * (pp - low),
            PivotLevel::S1 => 2.0 * pp - high,
            PivotLevel::S2 => pp - range,
            PivotLevel::S3 => low - 2.0 * (high - pp),
        },
    }
}

fn from_previous_bar(series: &OhlcvSeries, level: impl Fn(f64, f64, f64) -> f64) -> IndicatorResult<Vec<f64>> {
    let (high, low, close) = (series.high()?, series.low()?, series.close()?);
    let mut values = vec![f64::NAN; close.len()];
    for i in 1..close.len() {
        values[i] = level(high[i - 1], low[i - 1], close[i - 1]);
    }
    Ok(values)
}

pub struct PivotPoint {
    name: String,
    kind: PivotKind,
    level: PivotLevel,
}

impl PivotPoint {
    pub fn new(kind: PivotKind, level: PivotLevel) -> Self {
        Self {
            name: format!("PIVOT({},{})", kind.as_str(), level.as_str()),
            kind,
            level,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        let kind_name = params.text("type")?;
        let kind = PivotKind::parse(&kind_name).ok_or_else(|| {
            params.invalid(
                "type",
                format!("'{}' is not one of classic, woodie, fibonacci", kind_name),
            )
        })?;
        let level_name = params.text("level")?;
        let level = PivotLevel::parse(&level_name).ok_or_else(|| {
            params.invalid("level", format!("'{}' is not one of pp, r1-r3, s1-s3", level_name))
        })?;
        Ok(Self::new(kind, level))
    }
}

impl IndicatorCalculator for PivotPoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "type": self.kind.as_str(), "level": self.level.as_str() })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let values = from_previous_bar(series, |h, l, c| floor_pivot(self.kind, self.level, h, l, c))?;
        Ok(IndicatorOutput::single("pivot", values))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamarillaLevel {
    H5,
    H4,
    H3,
    H2,
    H1,
    Pp,
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl CamarillaLevel {
    const ALL: [CamarillaLevel; 11] = [
        CamarillaLevel::H5,
        CamarillaLevel::H4,
        CamarillaLevel::H3,
        CamarillaLevel::H2,
        CamarillaLevel::H1,
        CamarillaLevel::Pp,
        CamarillaLevel::L1,
        CamarillaLevel::L2,
        CamarillaLevel::L3,
        CamarillaLevel::L4,
        CamarillaLevel::L5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CamarillaLevel::H5 => "h5",
            CamarillaLevel::H4 => "h4",
            CamarillaLevel::H3 => "h3",
            CamarillaLevel::H2 => "h2",
            CamarillaLevel::H1 => "h1",
            CamarillaLevel::Pp => "pp",
            CamarillaLevel::L1 => "l1",
            CamarillaLevel::L2 => "l2",
            CamarillaLevel::L3 => "l3",
            CamarillaLevel::L4 => "l4",
            CamarillaLevel::L5 => "l5",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.as_str() == s)
    }
}

pub fn camarilla(level: CamarillaLevel, high: f64, low: f64, close: f64) -> f64 {
    let range = high - low;
    let h5 = if low == 0.0 { f64::NAN } else { high / low * close };
    match level {
        CamarillaLevel::H5 => h5,
        CamarillaLevel::H4 => close + range * 1.1 / 2.0,
        CamarillaLevel::H3 => close + range * 1.1 / 4.0,
        CamarillaLevel::H2 => close + range * 1.1 / 6.0,
        CamarillaLevel::H1 => close + range * 1.1 / 12.0,
        CamarillaLevel::Pp => (high + low + close) / 3.0,
        CamarillaLevel::L1 => close - range * 1.1 / 12.0,
        CamarillaLevel::L2 => close - range * 1.1 / 6.0,
        CamarillaLevel::L3 => close - range * 1.1 / 4.0,
        CamarillaLevel::L4 => close - range * 1.1 / 2.0,
        CamarillaLevel::L5 => close - (h5 - close),
    }
}

pub struct CamarillaPivot {
    name: String,
    level: CamarillaLevel,
}

impl CamarillaPivot {
    pub fn new(level: CamarillaLevel) -> Self {
        Self {
            name: format!("CAMARILLA({})", level.as_str()),
            level,
        }
    }

    pub fn from_params(params: &Params) -> IndicatorResult<Self> {
        let level_name = params.text("level")?;
        let level = CamarillaLevel::parse(&level_name).ok_or_else(|| {
            params.invalid("level", format!("'{}' is not one of h1-h5, pp, l1-l5", level_name))
        })?;
        Ok(Self::new(level))
    }
}

impl IndicatorCalculator for CamarillaPivot {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "level": self.level.as_str() })
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorOutput> {
        let values = from_previous_bar(series, |h, l, c| camarilla(self.level, h, l, c))?;
        Ok(IndicatorOutput::single("camarilla", values))
    }
}
