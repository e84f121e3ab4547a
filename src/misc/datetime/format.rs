use std::{fmt::Write, str::FromStr};

use chrono::{
    format::{Item, StrftimeItems},
    NaiveDateTime, Utc,
};

use crate::error::{Error, Result};

use super::parse::to_timestamp;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const JOINER: &str = "T";

/// Output representation for [`format_datetime`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `2014-08-18T14:56:17`
    #[default]
    Iso,
    /// `2014-08-18T14:56:17.970000`
    IsoMicros,
    /// `Mon Aug 18 14:56:17 2014`
    Ctime,
    /// Unix seconds, naive values read as UTC.
    Timestamp,
    /// ISO week date, `2014-W34-1`.
    Calendar,
    /// Any strftime pattern containing at least one of `%Y %m %d %H %M %S`.
    Pattern(String),
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "iso" | "default" => Self::Iso,
            "iso-micros" | "micros" => Self::IsoMicros,
            "ctime" => Self::Ctime,
            "timestamp" | "unix" => Self::Timestamp,
            "calendar" => Self::Calendar,
            p if p.contains('%') => Self::Pattern(p.to_string()),
            other => return Err(Error::invalid(format!("Wrong timing format: '{other}'"))),
        })
    }
}

fn render(dt: &NaiveDateTime, pattern: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        return Err(Error::invalid(format!("Format not implemented: '{pattern}'")));
    }
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.into_iter()))
        .map_err(|_| Error::invalid(format!("Format not implemented: '{pattern}'")))?;
    Ok(out)
}

/// Render `dt` in the requested representation.
pub fn format_datetime(dt: &NaiveDateTime, format: &DateFormat) -> Result<String> {
    match format {
        DateFormat::Iso => render(dt, "%Y-%m-%dT%H:%M:%S"),
        DateFormat::IsoMicros => render(dt, "%Y-%m-%dT%H:%M:%S%.6f"),
        DateFormat::Ctime => render(dt, "%a %b %e %H:%M:%S %Y"),
        DateFormat::Timestamp => Ok(to_timestamp(dt).to_string()),
        DateFormat::Calendar => render(dt, "%G-W%V-%u"),
        DateFormat::Pattern(p) => {
            if !["%Y", "%m", "%d", "%H", "%M", "%S"].iter().any(|t| p.contains(t)) {
                return Err(Error::invalid(format!("String format is not a standard datetime format: '{p}'")));
            }
            render(dt, p)
        }
    }
}

/// Date-time pattern built from a date part, a time part and the joiner between
/// them. Defaults give ISO 8601, `%Y-%m-%dT%H:%M:%S`.
pub fn dtformat(date: Option<&str>, time: Option<&str>, joiner: Option<&str>) -> String {
    format!(
        "{}{}{}",
        date.unwrap_or(DATE_FORMAT),
        joiner.unwrap_or(JOINER),
        time.unwrap_or(TIME_FORMAT),
    )
}

/// Current UTC time rendered with `pattern` (default [`dtformat`]).
pub fn time_stamp(pattern: Option<&str>) -> Result<String> {
    let pattern = pattern.map(str::to_string).unwrap_or_else(|| dtformat(None, None, None));
    format_datetime(&Utc::now().naive_utc(), &DateFormat::Pattern(pattern))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 8, 18).unwrap().and_hms_micro_opt(14, 56, 17, 970_000).unwrap()
    }

    #[test]
    fn named_formats() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, &DateFormat::Iso).unwrap(), "2014-08-18T14:56:17");
        assert_eq!(format_datetime(&dt, &DateFormat::IsoMicros).unwrap(), "2014-08-18T14:56:17.970000");
        assert_eq!(format_datetime(&dt, &DateFormat::Ctime).unwrap(), "Mon Aug 18 14:56:17 2014");
        assert_eq!(format_datetime(&dt, &DateFormat::Timestamp).unwrap(), "1408373777");
        assert_eq!(format_datetime(&dt, &DateFormat::Calendar).unwrap(), "2014-W34-1");
    }

    #[test]
    fn patterns_are_checked() {
        let dt = sample();
        let ok = DateFormat::Pattern("%d/%m/%Y".into());
        assert_eq!(format_datetime(&dt, &ok).unwrap(), "18/08/2014");
        assert!(format_datetime(&dt, &DateFormat::Pattern("%a %b".into())).is_err());
        assert!(format_datetime(&dt, &DateFormat::Pattern("%Y %Q".into())).is_err());
        assert!("weekly".parse::<DateFormat>().is_err());
        assert_eq!("%Y".parse::<DateFormat>().unwrap(), DateFormat::Pattern("%Y".into()));
    }

    #[test]
    fn dtformat_defaults() {
        assert_eq!(dtformat(None, None, None), "%Y-%m-%dT%H:%M:%S");
        assert_eq!(dtformat(Some("%d.%m.%Y"), Some("%H%M"), Some(" ")), "%d.%m.%Y %H%M");
        assert_eq!(time_stamp(None).unwrap().len(), 19);
    }
}
