//! Console summary for a fetched kline table.

use std::str::FromStr;

use statrs::statistics::{Data, OrderStatistics};
use tabled::{Table, Tabled};

use crate::domain::Kline;

/// Comma-separated percentiles from the command line, e.g. `25,50,75`.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles(pub Vec<f64>);

impl FromStr for Percentiles {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split(',')
            .map(|part| {
                let value = part.trim().parse::<f64>().map_err(|e| {
                    format!(
                        "Invalid percentiles format. Use comma-separated numbers (e.g., 25,50,75). Error: {} ({:?})",
                        e, part
                    )
                })?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(format!("Percentile {} is outside 0..=100", value));
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Percentiles)
    }
}

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "open_time (Warsaw)")]
    open_time: String,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: String,
}

impl From<&Kline> for PreviewRow {
    fn from(k: &Kline) -> Self {
        PreviewRow {
            open_time: k.open_time.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            open: format!("{:.2}", k.open),
            high: format!("{:.2}", k.high),
            low: format!("{:.2}", k.low),
            close: format!("{:.2}", k.close),
            volume: format!("{:.4}", k.volume),
        }
    }
}

/// The first `rows` klines as a text table.
pub fn preview_table(klines: &[Kline], rows: usize) -> String {
    let preview: Vec<PreviewRow> = klines.iter().take(rows).map(PreviewRow::from).collect();
    Table::new(preview).to_string()
}

/// Close-price percentiles as `(percentile, value)` pairs. Empty input gives nothing.
pub fn close_percentiles(klines: &[Kline], percentiles: &Percentiles) -> Vec<(f64, f64)> {
    if klines.is_empty() {
        return Vec::new();
    }
    let mut closes = Data::new(klines.iter().map(|k| k.close).collect::<Vec<f64>>());
    percentiles
        .0
        .iter()
        .map(|&p| (p, closes.quantile(p / 100.0)))
        .collect()
}

pub fn percentile_lines(values: &[(f64, f64)]) -> Vec<String> {
    values
        .iter()
        .map(|(p, v)| format!("  close p{}: {:.4}", p, v))
        .collect()
}
