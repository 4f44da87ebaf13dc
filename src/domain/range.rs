use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::{
    config::FETCHER,
    domain::Lookback,
    error::FetchError,
    utils::{localize, parse_with_fallback},
};

/// Which end of the range a date string describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    Start,
    End,
}

impl Boundary {
    fn field(&self) -> &'static str {
        match self {
            Boundary::Start => "start_date",
            Boundary::End => "end_date",
        }
    }

    // Time of day a date-only string gets
    fn default_time(&self) -> NaiveTime {
        match self {
            Boundary::Start => FETCHER.start_of_day,
            Boundary::End => FETCHER.end_of_day,
        }
    }
}

/// A concrete query window, stored as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ResolvedRange {
    /// Resolve user-entered bounds in the fetcher's civil timezone.
    ///
    /// The lookback is subtracted on the wall clock (30d back from midnight is
    /// midnight again, whatever DST did in between). A wall-clock time skipped
    /// by the spring jump keeps the pre-jump offset. `now` stands in for a
    /// missing end bound.
    pub fn resolve(
        start_date: &str,
        end_date: Option<&str>,
        lookback: Option<&Lookback>,
        now: DateTime<Tz>,
    ) -> Result<Self, FetchError> {
        let tz = FETCHER.timezone;

        let mut start_naive = parse_boundary(start_date, Boundary::Start)?;
        if let Some(lookback) = lookback {
            start_naive = start_naive
                .checked_sub_signed(lookback.as_delta())
                .ok_or_else(|| {
                    FetchError::invalid(format!(
                        "lookback '{}' reaches before the supported calendar",
                        lookback
                    ))
                })?;
        }
        let start = localize(start_naive, tz);

        let end = match end_date {
            Some(text) => localize(parse_boundary(text, Boundary::End)?, tz),
            None => now,
        };

        if start > end {
            log::warn!("Start {} is after end {}; the source will return nothing", start, end);
        }

        Ok(ResolvedRange {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        })
    }

    pub fn start_civil(&self) -> DateTime<Tz> {
        self.start.with_timezone(&FETCHER.timezone)
    }

    pub fn end_civil(&self) -> DateTime<Tz> {
        self.end.with_timezone(&FETCHER.timezone)
    }

    /// Start as the bare UTC string the kline source expects, seconds precision.
    pub fn api_start(&self) -> String {
        self.start.format(FETCHER.api_datetime_format).to_string()
    }

    pub fn api_end(&self) -> String {
        self.end.format(FETCHER.api_datetime_format).to_string()
    }
}

fn parse_boundary(text: &str, boundary: Boundary) -> Result<NaiveDateTime, FetchError> {
    parse_with_fallback(text, FETCHER.input_formats, boundary.default_time()).ok_or_else(|| {
        let tried: Vec<&str> = FETCHER.input_formats.iter().map(|f| f.pattern()).collect();
        FetchError::invalid(format!(
            "{} '{}' does not match any accepted format ({})",
            boundary.field(),
            text,
            tried.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LookbackUnit;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Warsaw;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    fn fixed_now() -> DateTime<Tz> {
        Warsaw.with_ymd_and_hms(2025, 7, 25, 12, 0, 0).unwrap()
    }

    #[test]
    fn date_only_bounds_cover_whole_days() {
        let range = ResolvedRange::resolve("20.07.2025", Some("22.07.2025"), None, fixed_now()).unwrap();
        assert_eq!(range.start_civil().naive_local(), civil(2025, 7, 20, 0, 0, 0));
        assert_eq!(range.end_civil().naive_local(), civil(2025, 7, 22, 23, 59, 59));
    }

    #[test]
    fn api_strings_are_bare_utc() {
        let range = ResolvedRange::resolve("20.07.2025", Some("22.07.2025"), None, fixed_now()).unwrap();
        // CEST is UTC+2 in July
        assert_eq!(range.api_start(), "2025-07-19 22:00:00");
        assert_eq!(range.api_end(), "2025-07-22 21:59:59");
    }

    #[test]
    fn winter_dates_use_the_standard_offset() {
        let range = ResolvedRange::resolve("15.01.2025 08:30:00", Some("15.01.2025"), None, fixed_now()).unwrap();
        assert_eq!(range.api_start(), "2025-01-15 07:30:00");
        assert_eq!(range.api_end(), "2025-01-15 22:59:59");
    }

    #[test]
    fn lookback_widens_the_start() {
        let lookback: Lookback = "30d".parse().unwrap();
        let range = ResolvedRange::resolve("20.07.2025", None, Some(&lookback), fixed_now()).unwrap();
        assert_eq!(range.start_civil().naive_local(), civil(2025, 6, 20, 0, 0, 0));

        let lookback: Lookback = "12h".parse().unwrap();
        let range = ResolvedRange::resolve("20.07.2025", None, Some(&lookback), fixed_now()).unwrap();
        assert_eq!(range.start_civil().naive_local(), civil(2025, 7, 19, 12, 0, 0));
    }

    #[test]
    fn day_lookback_across_dst_keeps_the_wall_clock() {
        // 01.11.2025 is CET, 25.10.2025 is still CEST
        let lookback: Lookback = "7d".parse().unwrap();
        let range = ResolvedRange::resolve("01.11.2025", None, Some(&lookback), fixed_now()).unwrap();
        assert_eq!(range.start_civil().naive_local(), civil(2025, 10, 25, 0, 0, 0));
        assert_eq!(range.api_start(), "2025-10-24 22:00:00");
    }

    #[test]
    fn missing_end_uses_now() {
        let range = ResolvedRange::resolve("20.07.2025", None, None, fixed_now()).unwrap();
        assert_eq!(range.end_civil(), fixed_now());
        assert_eq!(range.api_end(), "2025-07-25 10:00:00");
    }

    #[test]
    fn parse_failures_name_the_stage() {
        let err = ResolvedRange::resolve("invalid-date", Some("25.07.2025"), None, fixed_now()).unwrap_err();
        assert!(err.is_invalid_argument());
        let msg = err.to_string();
        assert!(msg.contains("start_date 'invalid-date'"));
        assert!(msg.contains("%d.%m.%Y %H:%M:%S, %d.%m.%Y"));

        let err = ResolvedRange::resolve("20.07.2025", Some("32.07.2025"), None, fixed_now()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("end_date '32.07.2025'"));
    }

    #[test]
    fn times_inside_the_spring_gap_keep_the_winter_offset() {
        // Warsaw skips 02:00-03:00 on 30.03.2025
        let range = ResolvedRange::resolve("30.03.2025 02:30:00", None, None, fixed_now()).unwrap();
        assert_eq!(range.api_start(), "2025-03-30 01:30:00");

        let lookback: Lookback = "1d".parse().unwrap();
        let range = ResolvedRange::resolve("31.03.2025 02:30:00", None, Some(&lookback), fixed_now()).unwrap();
        assert_eq!(range.api_start(), "2025-03-30 01:30:00");

        let range = ResolvedRange::resolve("29.03.2025", Some("30.03.2025 02:30:00"), None, fixed_now()).unwrap();
        assert_eq!(range.api_end(), "2025-03-30 01:30:00");
    }

    #[test]
    fn oversized_lookback_echoes_the_lookback() {
        let lookback = Lookback { amount: u32::MAX, unit: LookbackUnit::Days };
        let err = ResolvedRange::resolve("20.07.2025", None, Some(&lookback), fixed_now()).unwrap_err();
        assert!(err.is_invalid_argument());
        let msg = err.to_string();
        assert!(msg.contains("lookback '4294967295d'"), "{}", msg);
        assert!(!msg.contains("Days"));
    }
}
