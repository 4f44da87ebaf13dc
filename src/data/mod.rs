mod bn_kline;
mod fetcher;
mod provider;

pub use {
    fetcher::{KlineFetcher, build_request},
    provider::{BinanceKlineSource, KlineRequest, KlineSource},
};

pub(crate) use bn_kline::load_klines;
