//! Teaching weekdays as they appear in schedule exports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A teaching day. Schedules never place sessions on weekends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Day name used by the scheduling export.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Lundi",
            Self::Tuesday => "Mardi",
            Self::Wednesday => "Mercredi",
            Self::Thursday => "Jeudi",
            Self::Friday => "Vendredi",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.label() == s)
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

/// Error type for day names outside the export's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekday(String);

impl fmt::Display for UnknownWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weekday: {}", self.0)
    }
}

impl std::error::Error for UnknownWeekday {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_days() {
        for day in Weekday::ALL {
            let parsed: Weekday = day.to_string().parse().expect("should parse");
            assert_eq!(parsed, day);
        }
    }

    #[test]
    fn days_order_monday_first() {
        assert!(Weekday::Monday < Weekday::Tuesday);
        assert!(Weekday::Thursday < Weekday::Friday);
    }

    #[test]
    fn unknown_day_errors() {
        let err = "Samedi".parse::<Weekday>().unwrap_err();
        assert_eq!(err.to_string(), "unknown weekday: Samedi");
    }

    #[test]
    fn day_names_are_case_sensitive() {
        assert!("lundi".parse::<Weekday>().is_err());
    }
}
