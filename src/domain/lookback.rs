use std::{fmt, str::FromStr};

use chrono::TimeDelta;

use crate::error::FetchError;

const UNIT_MSG: &str = "Lookback must end with 'd', 'h', or 'm'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackUnit {
    Days,
    Hours,
    Minutes,
}

/// How far to widen the start bound backwards, e.g. `30d`, `12h`, `60m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    pub amount: u32,
    pub unit: LookbackUnit,
}

impl Lookback {
    // u32 days always fit in a TimeDelta
    pub fn as_delta(&self) -> TimeDelta {
        let amount = i64::from(self.amount);
        match self.unit {
            LookbackUnit::Days => TimeDelta::days(amount),
            LookbackUnit::Hours => TimeDelta::hours(amount),
            LookbackUnit::Minutes => TimeDelta::minutes(amount),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            LookbackUnit::Days => 'd',
            LookbackUnit::Hours => 'h',
            LookbackUnit::Minutes => 'm',
        };
        write!(f, "{}{}", self.amount, unit)
    }
}

impl FromStr for Lookback {
    type Err = FetchError;

    /// `<digits><unit>`, unit case-insensitive. Signs and surrounding whitespace
    /// are not accepted, zero is a no-op.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let Some(unit_char) = text.chars().last() else {
            return Err(FetchError::invalid(UNIT_MSG));
        };

        let unit = match unit_char.to_ascii_lowercase() {
            'd' => LookbackUnit::Days,
            'h' => LookbackUnit::Hours,
            'm' => LookbackUnit::Minutes,
            _ => return Err(FetchError::invalid(UNIT_MSG)),
        };

        let digits = &text[..text.len() - unit_char.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::invalid(format!(
                "lookback '{}' must be a whole number followed by 'd', 'h', or 'm'",
                text
            )));
        }
        let amount = digits
            .parse::<u32>()
            .map_err(|_| FetchError::invalid(format!("lookback '{}' is too large", text)))?;

        Ok(Lookback { amount, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit_case_insensitively() {
        assert_eq!(
            "30d".parse::<Lookback>().unwrap(),
            Lookback { amount: 30, unit: LookbackUnit::Days }
        );
        assert_eq!("12H".parse::<Lookback>().unwrap().unit, LookbackUnit::Hours);
        assert_eq!("60m".parse::<Lookback>().unwrap().as_delta(), TimeDelta::minutes(60));
        assert_eq!("0d".parse::<Lookback>().unwrap().as_delta(), TimeDelta::zero());
    }

    #[test]
    fn bad_unit_names_the_allowed_set() {
        for text in ["30x", "30", "30dd5", "", "30é", "30d ", "   "] {
            let err = text.parse::<Lookback>().unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(
                err.to_string().contains("Lookback must end with 'd', 'h', or 'm'"),
                "{text:?} gave {err}"
            );
        }
    }

    #[test]
    fn bad_amount_is_rejected() {
        for text in ["d", "-5d", "+5d", "1.5h", "abch", " 30d"] {
            let err = text.parse::<Lookback>().unwrap_err();
            assert!(err.is_invalid_argument(), "{text:?} should be rejected");
            assert!(err.to_string().contains("lookback"));
        }
        assert!("99999999999d".parse::<Lookback>().unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn displays_in_canonical_form() {
        assert_eq!("30D".parse::<Lookback>().unwrap().to_string(), "30d");
        assert_eq!(Lookback { amount: 12, unit: LookbackUnit::Hours }.to_string(), "12h");
        assert_eq!(Lookback { amount: 60, unit: LookbackUnit::Minutes }.to_string(), "60m");
    }
}
