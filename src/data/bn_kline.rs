use {
    anyhow::{Context, Result},
    binance_sdk::{
        config::ConfigurationRestApi,
        errors::{self, ConnectorError as connection_error},
        spot::{
            SpotRestApi,
            rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
        },
    },
};

use crate::{
    config::{BINANCE, BinanceApiConfig, FETCHER},
    data::KlineRequest,
    domain::{KlineField, RawKline, Timeframe},
    utils::utc_string_to_epoch_ms,
};

pub fn interval_enum(timeframe: Timeframe) -> KlinesIntervalEnum {
    match timeframe {
        Timeframe::M1 => KlinesIntervalEnum::Interval1m,
        Timeframe::M5 => KlinesIntervalEnum::Interval5m,
        Timeframe::M15 => KlinesIntervalEnum::Interval15m,
        Timeframe::M30 => KlinesIntervalEnum::Interval30m,
        Timeframe::H1 => KlinesIntervalEnum::Interval1h,
        Timeframe::H4 => KlinesIntervalEnum::Interval4h,
        Timeframe::D1 => KlinesIntervalEnum::Interval1d,
    }
}

impl From<KlinesItemInner> for KlineField {
    fn from(item: KlinesItemInner) -> Self {
        match item {
            KlinesItemInner::Integer(v) => KlineField::Integer(v),
            KlinesItemInner::String(s) => KlineField::Text(s),
            #[allow(unreachable_patterns)]
            other => KlineField::Text(format!("{:?}", other)),
        }
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Vec<RawKline> {
    data.into_iter()
        .map(|row| RawKline(row.into_iter().map(KlineField::from).collect()))
        .collect()
}

fn configure_binance_client(config: &BinanceApiConfig) -> Result<RestApi> {
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    // Create the Spot REST API client
    Ok(SpotRestApi::production(rest_conf))
}

async fn fetch_binance_klines(
    rest_client: &RestApi,
    params: KlinesParams,
    symbol: &str,
) -> Result<Vec<Vec<KlinesItemInner>>> {
    let response = match rest_client.klines(params).await {
        Ok(r) => r,
        Err(e) => {
            if let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() {
                match conn_err {
                    connection_error::TooManyRequestsError(_)
                    | connection_error::BadRequestError(_) => {
                        log::warn!("{} rejected by Binance: {}", symbol, conn_err);
                    }
                    errors::ConnectorError::NetworkError(msg) => {
                        log::error!("{} Network error: Check your internet connection. {}", symbol, msg);
                    }
                    other => log::error!("{} Binance API error: {}", symbol, other),
                }
            } else {
                log::error!("An unexpected error occurred for {}: {:#}", symbol, e);
            }
            return Err(e.context(format!("Binance klines call failed for {}", symbol)));
        }
    };
    let data = response.data().await?;
    Ok(data)
}

/// Read klines for `request` from Binance spot, paging forward 1000 at a time
/// until the end bound is covered.
pub async fn load_klines(request: &KlineRequest, config: &BinanceApiConfig) -> Result<Vec<RawKline>> {
    let start_ms = utc_string_to_epoch_ms(&request.start, FETCHER.api_datetime_format)
        .with_context(|| format!("unreadable start '{}'", request.start))?;
    let end_ms = utc_string_to_epoch_ms(&request.end, FETCHER.api_datetime_format)
        .with_context(|| format!("unreadable end '{}'", request.end))?;

    let rest_client = configure_binance_client(config)?;
    let limit = BINANCE.limits.klines_limit;
    let mut cursor = start_ms;
    let mut all_klines: Vec<RawKline> = Vec::new();

    while cursor <= end_ms {
        let params = KlinesParams::builder(request.symbol.clone(), interval_enum(request.timeframe))
            .limit(limit)
            .start_time(Some(cursor))
            .end_time(Some(end_ms))
            .build()?;

        let batch = convert_klines(fetch_binance_klines(&rest_client, params, &request.symbol).await?);
        let batch_len = batch.len();
        let last_open_ms = batch.last().and_then(|row| match row.0.first() {
            Some(KlineField::Integer(ms)) => Some(*ms),
            _ => None,
        });
        all_klines.extend(batch);

        log::debug!("{}: batch of {} klines from {}ms", request.symbol, batch_len, cursor);

        match last_open_ms {
            Some(ms) if batch_len >= limit as usize => cursor = ms + request.timeframe.interval_ms(),
            _ => break,
        }
    }

    Ok(all_klines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_timeframe_has_a_binance_interval() {
        for timeframe in Timeframe::iter() {
            let expected = format!("Interval{}", timeframe.as_str());
            assert_eq!(format!("{:?}", interval_enum(timeframe)), expected);
        }
    }

    #[test]
    fn binance_items_map_onto_fields() {
        let rows = convert_klines(vec![vec![
            KlinesItemInner::Integer(1_752_969_600_000),
            KlinesItemInner::String("3592.00".to_string()),
        ]]);
        assert_eq!(
            rows,
            vec![RawKline(vec![
                KlineField::Integer(1_752_969_600_000),
                KlineField::Text("3592.00".to_string()),
            ])]
        );
    }
}
