use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::InputFormat;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
}

/// Try each format in order and return the first successful parse.
///
/// Date-only formats get `default_time` attached.
pub fn parse_with_fallback(
    input: &str,
    formats: &[InputFormat],
    default_time: NaiveTime,
) -> Option<NaiveDateTime> {
    formats.iter().find_map(|format| match format {
        InputFormat::DateTime(pattern) => NaiveDateTime::parse_from_str(input, pattern).ok(),
        InputFormat::Date(pattern) => NaiveDate::parse_from_str(input, pattern)
            .ok()
            .map(|date| date.and_time(default_time)),
    })
}

/// Attach `tz` to a wall-clock time.
///
/// A time repeated by the autumn fold resolves to the earlier instant. A time
/// skipped by the spring gap is read with the offset in force before the jump,
/// so `02:30` on a +01:00 -> +02:00 night lands on 01:30 UTC.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            // A day earlier is safely before the transition
            let before = naive.checked_sub_signed(TimeDelta::days(1)).unwrap_or(naive);
            let offset_secs = tz.offset_from_utc_datetime(&before).fix().local_minus_utc();
            let utc = naive - TimeDelta::seconds(i64::from(offset_secs));
            Utc.from_utc_datetime(&utc).with_timezone(&tz)
        }
    }
}

/// Epoch milliseconds (UTC) to civil time in `tz`.
pub fn epoch_ms_to_civil(epoch_ms: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(epoch_ms).map(|dt| dt.with_timezone(&tz))
}

/// Parse a bare `format` string as a UTC instant and return epoch ms.
pub fn utc_string_to_epoch_ms(input: &str, format: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(input, format)
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}
