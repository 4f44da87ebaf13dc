// Domain types and value objects
mod kline;
mod lookback;
mod range;
mod timeframe;

// Re-export commonly used types to the world
pub use kline::{Kline, KlineField, KlineShapeError, RawKline, normalize_klines};
pub use lookback::{Lookback, LookbackUnit};
pub use range::ResolvedRange;
pub use timeframe::Timeframe;
