use chrono::DateTime;
use chrono_tz::Tz;

use crate::{
    config::FETCHER,
    data::{KlineRequest, KlineSource},
    domain::{Kline, Lookback, ResolvedRange, Timeframe, normalize_klines},
    error::FetchError,
    utils::now_in,
};

/// Turns human-entered date bounds into a normalized kline table.
pub struct KlineFetcher<S: KlineSource> {
    source: S,
}

impl<S: KlineSource> KlineFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch klines for `symbol` between two Warsaw-time bounds.
    ///
    /// `start_date`/`end_date` take `DD.MM.YYYY HH:MM:SS` or `DD.MM.YYYY`. A
    /// date-only start means midnight, a date-only end means 23:59:59, and a
    /// missing end means now. `lookback` (`30d`, `12h`, `60m`) moves the start
    /// further back. Input problems come back as `InvalidArgument` before the
    /// source is touched; anything from the source onwards is `FetchFailed`.
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: &str,
        start_date: &str,
        end_date: Option<&str>,
        lookback: Option<&str>,
    ) -> Result<Vec<Kline>, FetchError> {
        self.fetch_klines_at(symbol, timeframe, start_date, end_date, lookback, now_in(FETCHER.timezone))
            .await
    }

    /// Same as [`fetch_klines`](Self::fetch_klines) with an explicit "now".
    pub async fn fetch_klines_at(
        &self,
        symbol: &str,
        timeframe: &str,
        start_date: &str,
        end_date: Option<&str>,
        lookback: Option<&str>,
        now: DateTime<Tz>,
    ) -> Result<Vec<Kline>, FetchError> {
        let request = build_request(symbol, timeframe, start_date, end_date, lookback, now)?;

        log::info!(
            "Fetching {} {} klines from {} to {} (UTC)",
            request.symbol,
            request.timeframe,
            request.start,
            request.end
        );

        let raw = self
            .source
            .fetch_raw_klines(&request)
            .await
            .map_err(FetchError::FetchFailed)?;
        let klines = normalize_klines(raw).map_err(FetchError::FetchFailed)?;

        log::info!("Received {} klines for {}", klines.len(), request.symbol);
        Ok(klines)
    }
}

/// Validate and resolve everything the source call needs.
pub fn build_request(
    symbol: &str,
    timeframe: &str,
    start_date: &str,
    end_date: Option<&str>,
    lookback: Option<&str>,
    now: DateTime<Tz>,
) -> Result<KlineRequest, FetchError> {
    let timeframe: Timeframe = timeframe.parse()?;

    // Empty strings mean "not given"; anything else, whitespace included, is parsed as is
    let lookback = lookback
        .filter(|text| !text.is_empty())
        .map(str::parse::<Lookback>)
        .transpose()?;
    let end_date = end_date.filter(|text| !text.is_empty());

    let range = ResolvedRange::resolve(start_date, end_date, lookback.as_ref(), now)?;
    log::debug!(
        "Resolved {} .. {} to {} .. {}",
        start_date,
        end_date.unwrap_or("now"),
        range.start_civil(),
        range.end_civil()
    );

    Ok(KlineRequest {
        symbol: symbol.to_string(),
        timeframe,
        start: range.api_start(),
        end: range.api_end(),
    })
}
