use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Calendar and clock units, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

// Row: from, column: to, both in `TimeUnit::ALL` order.
// A year is 365.242 days and a month 30.4368 days.
const UNITS_TO: [[f64; 6]; 6] = [
    [1.0, 12.0, 365.242, 8765.81, 525949.0, 31556940.0],
    [1.0 / 12.0, 1.0, 30.4368, 730.484, 43828.992, 2629739.52],
    [1.0 / 365.242, 1.0 / 30.4368, 1.0, 24.0, 1440.0, 86400.0],
    [1.0 / 8765.81, 1.0 / 730.484, 1.0 / 24.0, 1.0, 60.0, 3600.0],
    [1.0 / 525949.0, 1.0 / 43828.992, 1.0 / 1440.0, 1.0 / 60.0, 1.0, 60.0],
    [1.0 / 31556940.0, 1.0 / 2629739.52, 1.0 / 86400.0, 1.0 / 3600.0, 1.0 / 60.0, 1.0],
];

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [Self::Year, Self::Month, Self::Day, Self::Hour, Self::Minute, Self::Second];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Compact suffix used in explicit strings (`y`, `m`, `d`, `hr`, `mn`, `sec`).
    pub fn short(&self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Month => "m",
            Self::Day => "d",
            Self::Hour => "hr",
            Self::Minute => "mn",
            Self::Second => "sec",
        }
    }

    pub fn long(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "y" | "yr" | "yrs" | "year" | "years" => Ok(Self::Year),
            "m" | "mo" | "month" | "months" => Ok(Self::Month),
            "d" | "day" | "days" => Ok(Self::Day),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Self::Hour),
            "mn" | "min" | "mins" | "minute" | "minutes" => Ok(Self::Minute),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(Self::Second),
            other => Err(Error::invalid(format!("Timing unit '{other}' not implemented"))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

/// Convert `value` expressed in `from` units into `to` units.
pub fn units_to(from: TimeUnit, to: TimeUnit, value: f64) -> f64 {
    UNITS_TO[from.index()][to.index()] * value
}

/// Sum composed quantities such as `[(Hour, 1.0), (Second, 420.0)]` into a single unit.
pub fn convert_time_units(to: TimeUnit, parts: &[(TimeUnit, f64)]) -> f64 {
    parts.iter().map(|&(unit, value)| units_to(unit, to, value)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_table() {
        assert!((units_to(TimeUnit::Second, TimeUnit::Day, 86400.0) - 1.0).abs() < 1e-12);
        assert_eq!(units_to(TimeUnit::Hour, TimeUnit::Second, 5.0), 18000.0);
        assert_eq!(units_to(TimeUnit::Year, TimeUnit::Day, 1.0), 365.242);
        assert_eq!(units_to(TimeUnit::Month, TimeUnit::Day, 2.0), 60.8736);
        for unit in TimeUnit::ALL {
            assert_eq!(units_to(unit, unit, 3.5), 3.5);
        }
    }

    #[test]
    fn composed_units() {
        let mn = convert_time_units(TimeUnit::Minute, &[(TimeUnit::Hour, 1.0), (TimeUnit::Second, 420.0)]);
        assert!((mn - 67.0).abs() < 1e-12);
        assert_eq!(convert_time_units(TimeUnit::Day, &[]), 0.0);
    }

    #[test]
    fn unit_names() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.short().parse::<TimeUnit>().unwrap(), unit);
            assert_eq!(unit.long().parse::<TimeUnit>().unwrap(), unit);
        }
        assert!("fortnight".parse::<TimeUnit>().is_err());
    }
}
