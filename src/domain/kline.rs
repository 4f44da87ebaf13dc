use std::{error::Error, fmt};

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::{config::FETCHER, utils::epoch_ms_to_civil};

// open_time, open, high, low, close, volume
const KLINE_FIELDS_USED: usize = 6;

/// One cell of a kline row as the source delivers it.
#[derive(Debug, Clone, PartialEq)]
pub enum KlineField {
    Integer(i64),
    Text(String),
}

impl From<i64> for KlineField {
    fn from(value: i64) -> Self {
        KlineField::Integer(value)
    }
}

impl From<&str> for KlineField {
    fn from(value: &str) -> Self {
        KlineField::Text(value.to_string())
    }
}

/// A kline row straight from the source: open time (epoch ms), open, high,
/// low, close, volume, then whatever else the exchange appends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawKline(pub Vec<KlineField>);

impl From<Vec<KlineField>> for RawKline {
    fn from(fields: Vec<KlineField>) -> Self {
        RawKline(fields)
    }
}

/// A normalized candle in the fetcher's civil timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kline {
    #[serde(serialize_with = "serialize_rfc3339")]
    pub open_time: DateTime<Tz>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

fn serialize_rfc3339<S: Serializer>(dt: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339())
}

#[derive(Debug, PartialEq)]
pub enum KlineShapeError {
    InvalidLength(usize),
    InvalidType(&'static str),
    InvalidTimestamp(i64),
}

impl fmt::Display for KlineShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            KlineShapeError::InvalidLength(len) => {
                write!(f, "Invalid length: expected at least {} fields, got {}", KLINE_FIELDS_USED, len)
            }
            KlineShapeError::InvalidType(field) => write!(f, "Invalid type: {}", field),
            KlineShapeError::InvalidTimestamp(ms) => write!(f, "Invalid open_time: {}ms", ms),
        }
    }
}

impl Error for KlineShapeError {}

fn field_to_epoch_ms(field: KlineField) -> Option<i64> {
    match field {
        KlineField::Integer(ms) => Some(ms),
        KlineField::Text(s) => s.trim().parse::<i64>().ok(),
    }
}

fn field_to_float(field: KlineField) -> Option<f64> {
    match field {
        KlineField::Text(s) => s.trim().parse::<f64>().ok(),
        KlineField::Integer(v) => Some(v as f64),
    }
}

impl TryFrom<RawKline> for Kline {
    type Error = KlineShapeError;

    fn try_from(raw: RawKline) -> Result<Self, Self::Error> {
        if raw.0.len() < KLINE_FIELDS_USED {
            return Err(KlineShapeError::InvalidLength(raw.0.len()));
        }

        let mut items = raw.0.into_iter();
        let open_time_ms = items
            .next()
            .and_then(field_to_epoch_ms)
            .ok_or(KlineShapeError::InvalidType("open_time"))?;
        let open_time = epoch_ms_to_civil(open_time_ms, FETCHER.timezone)
            .ok_or(KlineShapeError::InvalidTimestamp(open_time_ms))?;

        let mut next_float = |name: &'static str| {
            items
                .next()
                .and_then(field_to_float)
                .ok_or(KlineShapeError::InvalidType(name))
        };
        let open = next_float("open")?;
        let high = next_float("high")?;
        let low = next_float("low")?;
        let close = next_float("close")?;
        let volume = next_float("volume")?;
        // close_time, quote volume, trade count etc. are not needed

        Ok(Kline {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Normalize a whole response, keeping the source's row order.
///
/// One bad row fails the lot; there are no partial results.
pub fn normalize_klines(rows: Vec<RawKline>) -> Result<Vec<Kline>, anyhow::Error> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Kline::try_from(row).map_err(|e| anyhow::Error::new(e).context(format!("kline row {}", idx)))
        })
        .collect()
}
