//! Identifier → (default parameters, output lines, constructor).
//!
//! Built once on first use and read-only afterwards. Every [`IndicatorId`]
//! has exactly one entry; the exhaustive match in [`spec_for`] keeps it that way.

use once_cell::sync::Lazy;
use shared::{IndicatorId, ParamValue, ParameterSet};

use super::atr::{Atr, TrueRange};
use super::bollinger::BollingerBands;
use super::dema::{Dema, Tema};
use super::directional::{Directional, DirectionalLine};
use super::ema::Ema;
use super::kama::Kama;
use super::macd::Macd;
use super::mama::Mama;
use super::pivot::{CamarillaPivot, PivotPoint};
use super::price::{CandleComponent, Number};
use super::regression::LinearRegression;
use super::rsi::Rsi;
use super::sar::ParabolicSar;
use super::sma::Sma;
use super::stochastic::Stochastic;
use super::supertrend::SuperTrend;
use super::t3::T3;
use super::trima::Trima;
use super::vwap::Vwap;
use super::window::RegressionOutput;
use super::wma::Wma;
use super::{boxed, IndicatorCalculator, Params};
use crate::error::{IndicatorError, IndicatorResult};

pub type Builder = fn(&Params<'_>) -> IndicatorResult<Box<dyn IndicatorCalculator>>;

pub struct IndicatorSpec {
    pub id: IndicatorId,
    pub defaults: ParameterSet,
    /// Output line names, primary first.
    pub outputs: &'static [&'static str],
    build: Builder,
}

impl IndicatorSpec {
    /// Column name for output line `index`: the identifier for the primary
    /// line, `ID_LINE` for the others.
    pub fn column_name(&self, index: usize) -> String {
        match (index, self.outputs.get(index)) {
            (0, _) | (_, None) => self.id.as_str().to_string(),
            (_, Some(line)) => format!("{}_{}", self.id.as_str(), line.to_ascii_uppercase()),
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        (0..self.outputs.len()).map(|i| self.column_name(i)).collect()
    }

    /// Defaults with `overrides` applied. Keys the indicator does not know are rejected.
    pub fn merge(&self, overrides: &ParameterSet) -> IndicatorResult<ParameterSet> {
        let mut merged = self.defaults.clone();
        for (key, value) in overrides {
            match merged.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => {
                    return Err(IndicatorError::UnknownParameter {
                        indicator: self.id,
                        parameter: key.clone(),
                    })
                }
            }
        }
        Ok(merged)
    }

    pub fn build(&self, parameters: &ParameterSet, max_window: usize) -> IndicatorResult<Box<dyn IndicatorCalculator>> {
        (self.build)(&Params::new(self.id, parameters, max_window))
    }
}

/// A resolved computation together with the complete parameter set it was built from.
pub struct Resolved<'r> {
    pub spec: &'r IndicatorSpec,
    pub parameters: ParameterSet,
    pub calculator: Box<dyn IndicatorCalculator>,
}

impl Resolved<'_> {
    pub fn id(&self) -> IndicatorId {
        self.spec.id
    }
}

pub struct IndicatorRegistry {
    specs: Vec<IndicatorSpec>,
}

static REGISTRY: Lazy<IndicatorRegistry> = Lazy::new(|| IndicatorRegistry {
    specs: IndicatorId::ALL.iter().map(|id| spec_for(*id)).collect(),
});

pub fn registry() -> &'static IndicatorRegistry {
    &REGISTRY
}

impl IndicatorRegistry {
    pub fn get(&self, id: IndicatorId) -> Option<&IndicatorSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Entries in catalog order.
    pub fn specs(&self) -> impl Iterator<Item = &IndicatorSpec> {
        self.specs.iter()
    }

    pub fn lookup(&self, identifier: &str) -> IndicatorResult<&IndicatorSpec> {
        identifier
            .parse::<IndicatorId>()
            .ok()
            .and_then(|id| self.get(id))
            .ok_or_else(|| IndicatorError::UnknownIndicator(identifier.to_string()))
    }

    pub fn resolve(
        &self,
        identifier: &str,
        overrides: &ParameterSet,
        max_window: usize,
    ) -> IndicatorResult<Resolved<'_>> {
        let spec = self.lookup(identifier)?;
        let parameters = spec.merge(overrides)?;
        let calculator = spec.build(&parameters, max_window)?;
        Ok(Resolved {
            spec,
            parameters,
            calculator,
        })
    }
}

fn defaults(entries: &[(&str, ParamValue)]) -> ParameterSet {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn period(n: i64) -> ParameterSet {
    defaults(&[("period", ParamValue::Int(n))])
}

fn spec_for(id: IndicatorId) -> IndicatorSpec {
    use ParamValue::{Float, Int};

    let (defaults, outputs, build): (ParameterSet, &'static [&'static str], Builder) = match id {
        IndicatorId::Sma => (period(20), &["sma"], |p| Sma::from_params(p).map(boxed)),
        IndicatorId::Ema => (period(20), &["ema"], |p| Ema::from_params(p).map(boxed)),
        IndicatorId::Wma => (period(20), &["wma"], |p| Wma::from_params(p).map(boxed)),
        IndicatorId::Dema => (period(20), &["dema"], |p| Dema::from_params(p).map(boxed)),
        IndicatorId::Tema => (period(20), &["tema"], |p| Tema::from_params(p).map(boxed)),
        IndicatorId::Trima => (period(20), &["trima"], |p| Trima::from_params(p).map(boxed)),
        IndicatorId::Kama => (
            defaults(&[("period", Int(10)), ("fast", Int(2)), ("slow", Int(30))]),
            &["kama"],
            |p| Kama::from_params(p).map(boxed),
        ),
        IndicatorId::Mama => (
            defaults(&[("fastlimit", Float(0.5)), ("slowlimit", Float(0.05))]),
            &["mama", "fama"],
            |p| Mama::from_params(p).map(boxed),
        ),
        IndicatorId::T3 => (
            defaults(&[("period", Int(20)), ("vfactor", Float(0.7))]),
            &["t3"],
            |p| T3::from_params(p).map(boxed),
        ),
        IndicatorId::Vwap => (ParameterSet::new(), &["vwap"], |p| Vwap::from_params(p).map(boxed)),
        IndicatorId::Candle => (
            defaults(&[("component", ParamValue::from("close"))]),
            &["candle"],
            |p| CandleComponent::from_params(p).map(boxed),
        ),
        IndicatorId::Number => (
            defaults(&[("value", Int(0))]),
            &["number"],
            |p| Number::from_params(p).map(boxed),
        ),
        IndicatorId::Macd => (
            defaults(&[
                ("fastperiod", Int(12)),
                ("slowperiod", Int(26)),
                ("signalperiod", Int(9)),
            ]),
            &["macd", "signal", "hist"],
            |p| Macd::from_params(p).map(boxed),
        ),
        IndicatorId::Rsi => (period(14), &["rsi"], |p| Rsi::from_params(p).map(boxed)),
        IndicatorId::Stochastic => (
            defaults(&[
                ("fastk_period", Int(14)),
                ("slowk_period", Int(3)),
                ("slowd_period", Int(3)),
            ]),
            &["slowk", "slowd"],
            |p| Stochastic::from_params(p).map(boxed),
        ),
        IndicatorId::Supertrend => (
            defaults(&[("atr_period", Int(10)), ("multiplier", Float(3.0))]),
            &["supertrend", "direction"],
            |p| SuperTrend::from_params(p).map(boxed),
        ),
        IndicatorId::Adx => (period(14), &["adx"], |p| {
            Directional::from_params(DirectionalLine::Adx, p).map(boxed)
        }),
        IndicatorId::PlusDi => (period(14), &["plus_di"], |p| {
            Directional::from_params(DirectionalLine::PlusDi, p).map(boxed)
        }),
        IndicatorId::MinusDi => (period(14), &["minus_di"], |p| {
            Directional::from_params(DirectionalLine::MinusDi, p).map(boxed)
        }),
        IndicatorId::ParabolicSar => (
            defaults(&[("acceleration", Float(0.02)), ("maximum", Float(0.2))]),
            &["sar"],
            |p| ParabolicSar::from_params(p).map(boxed),
        ),
        IndicatorId::Bbands => (
            defaults(&[("period", Int(20)), ("nbdevup", Float(2.0)), ("nbdevdn", Float(2.0))]),
            &["upper", "middle", "lower"],
            |p| BollingerBands::from_params(p).map(boxed),
        ),
        IndicatorId::Atr => (period(14), &["atr"], |p| Atr::from_params(p).map(boxed)),
        IndicatorId::Trange => (ParameterSet::new(), &["trange"], |p| {
            TrueRange::from_params(p).map(boxed)
        }),
        IndicatorId::PivotPoint => (
            defaults(&[("type", ParamValue::from("classic")), ("level", ParamValue::from("pp"))]),
            &["pivot"],
            |p| PivotPoint::from_params(p).map(boxed),
        ),
        IndicatorId::CamarillaPivot => (
            defaults(&[("level", ParamValue::from("h1"))]),
            &["camarilla"],
            |p| CamarillaPivot::from_params(p).map(boxed),
        ),
        IndicatorId::LinearRegression => (period(14), &["linearreg"], |p| {
            LinearRegression::from_params(RegressionOutput::Endpoint, p).map(boxed)
        }),
        IndicatorId::LinearRegressionIntercept => (period(14), &["linearreg"], |p| {
            LinearRegression::from_params(RegressionOutput::Intercept, p).map(boxed)
        }),
    };

    IndicatorSpec {
        id,
        defaults,
        outputs,
        build,
    }
}
