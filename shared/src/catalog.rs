// Static indicator catalog consumed read-only by frontends to populate
// indicator pickers. It carries no computation logic.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorId {
    Sma,
    Ema,
    Wma,
    Dema,
    Tema,
    Trima,
    Kama,
    Mama,
    T3,
    Vwap,
    Candle,
    Number,
    Macd,
    Rsi,
    Stochastic,
    Supertrend,
    Adx,
    PlusDi,
    MinusDi,
    ParabolicSar,
    Bbands,
    Atr,
    Trange,
    PivotPoint,
    CamarillaPivot,
    LinearRegression,
    LinearRegressionIntercept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Moving Averages")]
    MovingAverages,
    #[serde(rename = "Volume & Price")]
    VolumeAndPrice,
    Momentum,
    Trend,
    Volatility,
    #[serde(rename = "Pivot Points")]
    PivotPoints,
    Regression,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::MovingAverages => "Moving Averages",
            Category::VolumeAndPrice => "Volume & Price",
            Category::Momentum => "Momentum",
            Category::Trend => "Trend",
            Category::Volatility => "Volatility",
            Category::PivotPoints => "Pivot Points",
            Category::Regression => "Regression",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorInfo {
    pub value: IndicatorId,
    pub label: &'static str,
    pub category: Category,
}

const fn info(value: IndicatorId, label: &'static str, category: Category) -> IndicatorInfo {
    IndicatorInfo { value, label, category }
}

static INDICATOR_LIST: [IndicatorInfo; 27] = [
    info(IndicatorId::Sma, "Simple Moving Average (SMA)", Category::MovingAverages),
    info(IndicatorId::Ema, "Exponential Moving Average (EMA)", Category::MovingAverages),
    info(IndicatorId::Wma, "Weighted Moving Average (WMA)", Category::MovingAverages),
    info(IndicatorId::Dema, "Double Exponential MA (DEMA)", Category::MovingAverages),
    info(IndicatorId::Tema, "Triple Exponential MA (TEMA)", Category::MovingAverages),
    info(IndicatorId::Trima, "Triangular Moving Average (TRIMA)", Category::MovingAverages),
    info(IndicatorId::Kama, "Kaufman Adaptive MA (KAMA)", Category::MovingAverages),
    info(IndicatorId::Mama, "MESA Adaptive MA (MAMA)", Category::MovingAverages),
    info(IndicatorId::T3, "T3 Moving Average", Category::MovingAverages),
    info(IndicatorId::Vwap, "Volume Weighted Average Price (VWAP)", Category::VolumeAndPrice),
    info(IndicatorId::Candle, "Candle (OHLC)", Category::VolumeAndPrice),
    info(IndicatorId::Number, "User-defined Number", Category::VolumeAndPrice),
    info(IndicatorId::Macd, "MACD Line", Category::Momentum),
    info(IndicatorId::Rsi, "Relative Strength Index (RSI)", Category::Momentum),
    info(IndicatorId::Stochastic, "Stochastic Oscillator", Category::Momentum),
    info(IndicatorId::Supertrend, "SuperTrend", Category::Trend),
    info(IndicatorId::Adx, "Average Directional Index (ADX)", Category::Trend),
    info(IndicatorId::PlusDi, "Plus Directional Indicator (+DI)", Category::Trend),
    info(IndicatorId::MinusDi, "Minus Directional Indicator (-DI)", Category::Trend),
    info(IndicatorId::ParabolicSar, "Parabolic SAR", Category::Trend),
    info(IndicatorId::Bbands, "Bollinger Bands", Category::Volatility),
    info(IndicatorId::Atr, "Average True Range (ATR)", Category::Volatility),
    info(IndicatorId::Trange, "True Range", Category::Volatility),
    info(IndicatorId::PivotPoint, "Pivot Point", Category::PivotPoints),
    info(IndicatorId::CamarillaPivot, "Camarilla Pivot", Category::PivotPoints),
    info(IndicatorId::LinearRegression, "Linear Regression", Category::Regression),
    info(IndicatorId::LinearRegressionIntercept, "Linear Regression Intercept", Category::Regression),
];

/// The full catalog in display order.
pub fn catalog() -> &'static [IndicatorInfo] {
    &INDICATOR_LIST
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown indicator: {0}")]
pub struct UnknownIndicatorId(pub String);

impl IndicatorId {
    /// Every identifier, in catalog order.
    pub const ALL: [IndicatorId; 27] = [
        IndicatorId::Sma,
        IndicatorId::Ema,
        IndicatorId::Wma,
        IndicatorId::Dema,
        IndicatorId::Tema,
        IndicatorId::Trima,
        IndicatorId::Kama,
        IndicatorId::Mama,
        IndicatorId::T3,
        IndicatorId::Vwap,
        IndicatorId::Candle,
        IndicatorId::Number,
        IndicatorId::Macd,
        IndicatorId::Rsi,
        IndicatorId::Stochastic,
        IndicatorId::Supertrend,
        IndicatorId::Adx,
        IndicatorId::PlusDi,
        IndicatorId::MinusDi,
        IndicatorId::ParabolicSar,
        IndicatorId::Bbands,
        IndicatorId::Atr,
        IndicatorId::Trange,
        IndicatorId::PivotPoint,
        IndicatorId::CamarillaPivot,
        IndicatorId::LinearRegression,
        IndicatorId::LinearRegressionIntercept,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorId::Sma => "SMA",
            IndicatorId::Ema => "EMA",
            IndicatorId::Wma => "WMA",
            IndicatorId::Dema => "DEMA",
            IndicatorId::Tema => "TEMA",
            IndicatorId::Trima => "TRIMA",
            IndicatorId::Kama => "KAMA",
            IndicatorId::Mama => "MAMA",
            IndicatorId::T3 => "T3",
            IndicatorId::Vwap => "VWAP",
            IndicatorId::Candle => "CANDLE",
            IndicatorId::Number => "NUMBER",
            IndicatorId::Macd => "MACD",
            IndicatorId::Rsi => "RSI",
            IndicatorId::Stochastic => "STOCHASTIC",
            IndicatorId::Supertrend => "SUPERTREND",
            IndicatorId::Adx => "ADX",
            IndicatorId::PlusDi => "PLUS_DI",
            IndicatorId::MinusDi => "MINUS_DI",
            IndicatorId::ParabolicSar => "PARABOLIC_SAR",
            IndicatorId::Bbands => "BBANDS",
            IndicatorId::Atr => "ATR",
            IndicatorId::Trange => "TRANGE",
            IndicatorId::PivotPoint => "PIVOT_POINT",
            IndicatorId::CamarillaPivot => "CAMARILLA_PIVOT",
            IndicatorId::LinearRegression => "LINEAR_REGRESSION",
            IndicatorId::LinearRegressionIntercept => "LINEAR_REGRESSION_INTERCEPT",
        }
    }

    pub fn info(self) -> &'static IndicatorInfo {
        // INDICATOR_LIST and ALL share the declaration order of the enum.
        &INDICATOR_LIST[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn category(self) -> Category {
        self.info().category
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorId {
    type Err = UnknownIndicatorId;

    /// Case-insensitive; also accepts the long-form names some clients send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if let Some(id) = IndicatorId::ALL.iter().find(|id| id.as_str() == upper) {
            return Ok(*id);
        }
        match upper.as_str() {
            "CANDLE_COMPONENT" => Ok(IndicatorId::Candle),
            "BOLLINGER_BANDS" => Ok(IndicatorId::Bbands),
            "TRUE_RANGE" => Ok(IndicatorId::Trange),
            "PIVOT_POINTS" => Ok(IndicatorId::PivotPoint),
            _ => Err(UnknownIndicatorId(s.to_string())),
        }
    }
}
