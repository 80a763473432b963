// Input data: the columnar table, the OHLCV accessor over it, and the CSV adapter
pub mod csv_parser;
pub mod frame;
pub mod series;

pub use frame::Frame;
pub use series::{OhlcvSeries, PriceField};
