//! Configuration module for the kline fetcher.

// Can all be private because we have a public re-export.
mod binance;
mod cli;
mod fetcher;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig};
pub use cli::CLI_DEFAULTS;
pub use fetcher::{FETCHER, InputFormat};
