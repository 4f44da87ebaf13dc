use std::{fmt, str::FromStr};

use strum_macros::EnumIter;

use crate::{error::FetchError, utils::TimeUtils};

/// The candle widths the fetcher accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// The token a user types for this timeframe (matched exactly, case-sensitive).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        }
    }

    pub fn interval_ms(&self) -> i64 {
        use TimeUtils as T;
        match self {
            Self::M1 => T::MS_IN_MIN,
            Self::M5 => T::MS_IN_5_MIN,
            Self::M15 => T::MS_IN_15_MIN,
            Self::M30 => T::MS_IN_30_MIN,
            Self::H1 => T::MS_IN_H,
            Self::H4 => T::MS_IN_4_H,
            Self::D1 => T::MS_IN_D,
        }
    }
}

impl FromStr for Timeframe {
    type Err = FetchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "1m" => Ok(Self::M1),
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            "30m" => Ok(Self::M30),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1d" => Ok(Self::D1),
            _ => Err(FetchError::invalid(format!("Unsupported timeframe: {}", token))),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_token_resolves_to_itself() {
        for timeframe in Timeframe::iter() {
            assert_eq!(timeframe.as_str().parse::<Timeframe>().unwrap(), timeframe);
        }
        assert_eq!(Timeframe::iter().count(), 7);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        for token in ["invalid", "1H", "1D", "2h", "1w", "", " 1h", "1h "] {
            let err = token.parse::<Timeframe>().unwrap_err();
            assert!(err.is_invalid_argument(), "{token:?} should be rejected");
            assert!(err.to_string().contains(&format!("Unsupported timeframe: {}", token)));
        }
    }

    #[test]
    fn interval_widths() {
        assert_eq!(Timeframe::M15.interval_ms(), 900_000);
        assert_eq!(Timeframe::H4.interval_ms(), 14_400_000);
        assert_eq!(Timeframe::D1.interval_ms(), 86_400_000);
    }
}
