use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::span::parse_explicit;
use super::units::TimeUnit;

/// Naive formats tried in order; naive values are read as UTC.
const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%a %b %e %H:%M:%S %Y",
    "%Y%m%dT%H%M%S",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Structured `year..second` view of a date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
}

impl DateParts {
    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| Error::invalid(format!("Invalid date: {:?}", self)))?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
            .ok_or_else(|| Error::invalid(format!("Invalid time: {:?}", self)))?;
        Ok(date.and_time(time))
    }
}

impl From<NaiveDateTime> for DateParts {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

impl TryFrom<DateParts> for NaiveDateTime {
    type Error = Error;

    fn try_from(parts: DateParts) -> Result<Self> {
        parts.to_datetime()
    }
}

/// Values that can be read as a UTC date-time.
pub trait ToDateTime {
    fn to_datetime(&self) -> Result<NaiveDateTime>;
}

impl ToDateTime for str {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        parse_datetime(self)
    }
}

impl ToDateTime for String {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        parse_datetime(self)
    }
}

impl ToDateTime for NaiveDateTime {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        Ok(*self)
    }
}

impl ToDateTime for NaiveDate {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        Ok(self.and_time(NaiveTime::MIN))
    }
}

impl ToDateTime for DateTime<Utc> {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        Ok(self.naive_utc())
    }
}

impl ToDateTime for DateParts {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        DateParts::to_datetime(self)
    }
}

/// Unix timestamp in seconds.
impl ToDateTime for i64 {
    fn to_datetime(&self) -> Result<NaiveDateTime> {
        from_timestamp(*self)
    }
}

fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a date-time string.
///
/// Accepts ISO 8601 (`T` or space separated, optional fraction), RFC 3339 and
/// RFC 2822 with an offset (converted to UTC), ctime (`Thu Jun 19 17:58:05 2014`),
/// date-only strings, the keywords `now`, `utcnow`, `today`, `tomorrow`,
/// `in24hours`, and explicit-unit strings (`2014y 6m 19d 17hr`).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "now" | "utcnow" => return Ok(now()),
        "today" => return Ok(today().and_time(NaiveTime::MIN)),
        "tomorrow" => {
            return today().checked_add_days(Days::new(1))
                .map(|d| d.and_time(NaiveTime::MIN))
                .ok_or_else(|| Error::invalid("Date out of range"));
        }
        "in24hours" => {
            return now().checked_add_signed(chrono::Duration::hours(24))
                .ok_or_else(|| Error::invalid("Date out of range"));
        }
        _ => {}
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.and_time(NaiveTime::MIN));
        }
    }
    parse_explicit_datetime(s)
        .map_err(|_| Error::parse("[misc::datetime::parse]", format!("Unrecognised date/time: '{s}'")))
}

fn parse_explicit_datetime(s: &str) -> Result<NaiveDateTime> {
    let values = parse_explicit(s)?;
    let get = |unit: TimeUnit, required: bool| -> Result<u32> {
        match values[unit.index()] {
            Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
            Some(v) => Err(Error::invalid(format!("Invalid {}: {v}", unit.long()))),
            None if required => Err(Error::invalid(format!("Missing {}", unit.long()))),
            None => Ok(0),
        }
    };
    let year = get(TimeUnit::Year, true)?;
    DateParts {
        year: i32::try_from(year).map_err(|_| Error::invalid(format!("Invalid year: {year}")))?,
        month: get(TimeUnit::Month, true)?,
        day: get(TimeUnit::Day, true)?,
        hour: get(TimeUnit::Hour, false)?,
        minute: get(TimeUnit::Minute, false)?,
        second: get(TimeUnit::Second, false)?,
    }
    .to_datetime()
}

/// UTC date-time of a Unix timestamp.
pub fn from_timestamp(secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| Error::invalid(format!("Timestamp {secs} not recognised")))
}

/// Unix timestamp of a naive date-time read as UTC.
pub fn to_timestamp(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}
