//! Date, time and duration helpers. Naive date-times are always read as UTC.

mod format;
mod parse;
mod span;
mod units;

use chrono::{Duration, NaiveDateTime};

use crate::error::{Error, Result};

pub use self::format::{dtformat, format_datetime, time_stamp, DateFormat};
pub use self::parse::{from_timestamp, parse_datetime, to_timestamp, DateParts, ToDateTime};
pub use self::span::Span;
pub use self::units::{convert_time_units, units_to, TimeUnit};

/// Duration from `since` to `until` (negative when `until` comes first).
pub fn span<A, B>(since: &A, until: &B) -> Result<Duration>
where
    A: ToDateTime + ?Sized,
    B: ToDateTime + ?Sized,
{
    Ok(until.to_datetime()? - since.to_datetime()?)
}

/// The date-time `span` before `until`.
pub fn since<A: ToDateTime + ?Sized>(until: &A, span: &Span) -> Result<NaiveDateTime> {
    let until = until.to_datetime()?;
    until.checked_sub_signed(span.to_duration()?)
        .ok_or_else(|| Error::invalid(format!("{until} minus {span} is out of range")))
}

/// The date-time `span` after `since`.
pub fn until<A: ToDateTime + ?Sized>(since: &A, span: &Span) -> Result<NaiveDateTime> {
    let since = since.to_datetime()?;
    since.checked_add_signed(span.to_duration()?)
        .ok_or_else(|| Error::invalid(format!("{since} plus {span} is out of range")))
}

/// `a` is strictly later than `b`.
pub fn gt<A: ToDateTime + ?Sized, B: ToDateTime + ?Sized>(a: &A, b: &B) -> Result<bool> {
    Ok(a.to_datetime()? > b.to_datetime()?)
}

/// `a` is strictly earlier than `b`.
pub fn lt<A: ToDateTime + ?Sized, B: ToDateTime + ?Sized>(a: &A, b: &B) -> Result<bool> {
    Ok(a.to_datetime()? < b.to_datetime()?)
}

pub fn gte<A: ToDateTime + ?Sized, B: ToDateTime + ?Sized>(a: &A, b: &B) -> Result<bool> {
    Ok(a.to_datetime()? >= b.to_datetime()?)
}

pub fn lte<A: ToDateTime + ?Sized, B: ToDateTime + ?Sized>(a: &A, b: &B) -> Result<bool> {
    Ok(a.to_datetime()? <= b.to_datetime()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_between_dates() {
        let d = span("2014-08-18T19:30:40", "2014-08-28T19:30:40").unwrap();
        assert_eq!(d, Duration::days(10));
        assert_eq!(span(&1408373777i64, "2014-08-18T14:56:17Z").unwrap(), Duration::zero());
    }

    #[test]
    fn since_and_until_invert() {
        let s: Span = "10d 2hr".parse().unwrap();
        let start = parse_datetime("2014-08-18T19:30:40").unwrap();
        let end = until(&start, &s).unwrap();
        assert_eq!(end, parse_datetime("2014-08-28T21:30:40").unwrap());
        assert_eq!(since(&end, &s).unwrap(), start);
    }

    #[test]
    fn comparisons() {
        assert!(gt("2020-01-02", "2020-01-01").unwrap());
        assert!(lt("Fri Jan 10 00:00:00 2020", "2020-01-10T00:00:01").unwrap());
        assert!(gte("2020-01-01", "2020-01-01T00:00:00").unwrap());
        assert!(lte("2019-12-31", "today").unwrap());
        assert!(gt("not a date", "2020-01-01").is_err());
    }
}
