// Core modules
pub mod config;
pub mod data;
pub mod domain;
mod error;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use data::{BinanceKlineSource, KlineFetcher, KlineRequest, KlineSource};
pub use domain::{Kline, KlineField, RawKline, Timeframe};
pub use error::FetchError;
pub use report::Percentiles;

// CLI argument parsing
use clap::Parser;

use crate::config::CLI_DEFAULTS;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Cryptocurrency Investment Analyzer", long_about = None)]
pub struct Cli {
    /// Cryptocurrency code (e.g., ETH, BTC)
    #[arg(long, default_value = CLI_DEFAULTS.currency)]
    pub currency: String,

    /// Timeframe: 1m, 5m, 15m, 30m, 1h, 4h or 1d
    #[arg(long)]
    pub timeframe: String,

    /// Start date (DD.MM.YYYY HH:MM:SS or DD.MM.YYYY, Warsaw time)
    #[arg(long, default_value = CLI_DEFAULTS.start_date)]
    pub start_date: String,

    /// End date (DD.MM.YYYY HH:MM:SS or DD.MM.YYYY, Warsaw time)
    #[arg(long, default_value = CLI_DEFAULTS.end_date)]
    pub end_date: Option<String>,

    /// Lookback period subtracted from the start (e.g., 30d, 12h, 60m)
    #[arg(long)]
    pub lookback: Option<String>,

    /// Comma-separated close-price percentiles for the summary (e.g., 25,50,75)
    #[arg(long, default_value = CLI_DEFAULTS.percentiles)]
    pub percentiles: Percentiles,

    /// Number of rows shown in the preview table
    #[arg(long, default_value_t = CLI_DEFAULTS.preview_rows)]
    pub rows: usize,

    /// Print every row as JSON instead of the preview
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// The traded pair, e.g. `ETH` -> `ETHUSDT`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.currency.trim().to_uppercase(), CLI_DEFAULTS.quote_asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_cli() {
        let cli = Cli::try_parse_from(["kline-fetch", "--timeframe", "1h"]).unwrap();
        assert_eq!(cli.currency, "ETH");
        assert_eq!(cli.symbol(), "ETHUSDT");
        assert_eq!(cli.start_date, "20.07.2025 00:00:00");
        assert_eq!(cli.end_date.as_deref(), Some("25.07.2025 23:59:59"));
        assert_eq!(cli.lookback, None);
        assert_eq!(cli.percentiles, Percentiles(vec![25.0, 50.0, 75.0]));
        assert_eq!(cli.rows, 5);
        assert!(!cli.json);
    }

    #[test]
    fn timeframe_is_required() {
        assert!(Cli::try_parse_from(["kline-fetch"]).is_err());
    }

    #[test]
    fn malformed_percentiles_fail_parsing() {
        let res = Cli::try_parse_from(["kline-fetch", "--timeframe", "1d", "--percentiles", "25,x"]);
        assert!(res.is_err());
    }

    #[test]
    fn symbol_is_uppercased() {
        let cli = Cli::try_parse_from(["kline-fetch", "--timeframe", "1d", "--currency", "btc", "--lookback", "30d"])
            .unwrap();
        assert_eq!(cli.symbol(), "BTCUSDT");
        assert_eq!(cli.lookback.as_deref(), Some("30d"));
    }
}
