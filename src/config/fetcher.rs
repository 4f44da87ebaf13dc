//! Date resolution and timezone settings for the kline fetcher.
use chrono::NaiveTime;
use chrono_tz::Tz;

/// One accepted shape for a human-entered date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Full date and time, e.g. `20.07.2025 14:30:00`
    DateTime(&'static str),
    /// Date only; the time of day comes from the boundary being parsed
    Date(&'static str),
}

impl InputFormat {
    pub fn pattern(&self) -> &'static str {
        match *self {
            Self::DateTime(p) | Self::Date(p) => p,
        }
    }
}

pub struct FetcherConfig {
    /// Civil timezone every user-facing date and output timestamp lives in
    pub timezone: Tz,
    /// Tried in order, first successful parse wins
    pub input_formats: &'static [InputFormat],
    /// Time of day attached to a date-only start bound
    pub start_of_day: NaiveTime,
    /// Time of day attached to a date-only end bound
    pub end_of_day: NaiveTime,
    /// Bare UTC date-time handed to the kline source
    pub api_datetime_format: &'static str,
}

// Evaluated at compile time, so a bad literal fails the build
const fn time_of_day(hour: u32, min: u32, sec: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, sec) {
        Some(time) => time,
        None => panic!("time of day out of range"),
    }
}

pub const FETCHER: FetcherConfig = FetcherConfig {
    timezone: chrono_tz::Europe::Warsaw,
    input_formats: &[
        InputFormat::DateTime("%d.%m.%Y %H:%M:%S"),
        InputFormat::Date("%d.%m.%Y"),
    ],
    start_of_day: time_of_day(0, 0, 0),
    end_of_day: time_of_day(23, 59, 59),
    api_datetime_format: "%Y-%m-%d %H:%M:%S",
};
