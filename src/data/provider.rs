use anyhow::Result;
use async_trait::async_trait;

use crate::config::BinanceApiConfig;
use crate::data::load_klines;
use crate::domain::{RawKline, Timeframe};

/// What the fetcher asks a kline source for.
///
/// `start` and `end` are bare UTC date-times (`%Y-%m-%d %H:%M:%S`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRequest {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub start: String,
    pub end: String,
}

/// Abstract interface for fetching raw klines.
#[async_trait]
pub trait KlineSource: Send + Sync {
    /// Return the klines opening inside the request window, oldest first.
    async fn fetch_raw_klines(&self, request: &KlineRequest) -> Result<Vec<RawKline>>;
}

#[derive(Default)]
pub struct BinanceKlineSource {
    config: BinanceApiConfig,
}

impl BinanceKlineSource {
    pub fn new(config: BinanceApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl KlineSource for BinanceKlineSource {
    async fn fetch_raw_klines(&self, request: &KlineRequest) -> Result<Vec<RawKline>> {
        load_klines(request, &self.config).await
    }
}
