use std::{fmt, str::FromStr, sync::OnceLock};

use chrono::Duration;
use regex::Regex;

use crate::error::{Error, Result};

use super::units::{convert_time_units, TimeUnit};

static EXPLICIT_FULL: OnceLock<Regex> = OnceLock::new();
static EXPLICIT_TOKEN: OnceLock<Regex> = OnceLock::new();

fn explicit_full() -> &'static Regex {
    EXPLICIT_FULL.get_or_init(|| {
        Regex::new(r"^\s*(?:[-+]?\d+(?:\.\d+)?\s*[A-Za-z]+[\s,]*)+$").expect("Invalid explicit time regex")
    })
}

fn explicit_token() -> &'static Regex {
    EXPLICIT_TOKEN.get_or_init(|| {
        Regex::new(r"([-+]?\d+(?:\.\d+)?)\s*([A-Za-z]+)").expect("Invalid explicit token regex")
    })
}

/// Parse an explicit-unit string such as `45d 34hr 2900mn` into per-unit sums,
/// indexed in `TimeUnit::ALL` order. Repeated units add up.
pub(crate) fn parse_explicit(s: &str) -> Result<[Option<f64>; 6]> {
    if !explicit_full().is_match(s) {
        return Err(Error::parse("[misc::datetime]", format!("Not an explicit time string: '{s}'")));
    }
    let mut values = [None; 6];
    for cap in explicit_token().captures_iter(s) {
        let value: f64 = cap[1].parse()
            .map_err(|e| Error::parse("[misc::datetime]", format!("Bad quantity '{}': {e}", &cap[1])))?;
        let unit: TimeUnit = cap[2].parse()?;
        let slot = &mut values[unit.index()];
        *slot = Some(slot.unwrap_or(0.0) + value);
    }
    Ok(values)
}

/// A duration expressed as per-unit quantities, e.g. `2y 45d 34hr`.
///
/// Months and years are converted with their mean lengths when a single
/// quantity is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    values: [f64; 6],
}

impl Span {
    pub const ZERO: Span = Span { values: [0.0; 6] };

    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` of `unit` to this span.
    pub fn with(mut self, unit: TimeUnit, value: f64) -> Self {
        self.values[unit.index()] += value;
        self
    }

    pub fn get(&self, unit: TimeUnit) -> f64 {
        self.values[unit.index()]
    }

    /// Non-zero quantities, largest unit first.
    pub fn parts(&self) -> Vec<(TimeUnit, f64)> {
        TimeUnit::ALL.into_iter()
            .map(|u| (u, self.get(u)))
            .filter(|&(_, v)| v != 0.0)
            .collect()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// The whole span as a single quantity of `unit`.
    pub fn in_units(&self, unit: TimeUnit) -> f64 {
        convert_time_units(unit, &self.parts())
    }

    /// Exact-to-the-millisecond `chrono::Duration`.
    pub fn to_duration(&self) -> Result<Duration> {
        let millis = (self.in_units(TimeUnit::Second) * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(Error::invalid(format!("Span out of range: {self}")));
        }
        Duration::try_milliseconds(millis as i64)
            .ok_or_else(|| Error::invalid(format!("Span out of range: {self}")))
    }

    /// Span of whole seconds (plus milliseconds) from a `chrono::Duration`.
    pub fn from_duration(d: Duration) -> Self {
        Self::new().with(TimeUnit::Second, d.num_milliseconds() as f64 / 1000.0)
    }
}

impl FromStr for Span {
    type Err = Error;

    /// Accepts `zero`, `hour`, or explicit quantities in any order (`45d 34hr 2900mn 4m 500sec 2y`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => return Ok(Self::ZERO),
            "hour" => return Ok(Self::new().with(TimeUnit::Hour, 1.0)),
            _ => {}
        }
        let values = parse_explicit(s)?;
        Ok(Self { values: values.map(|v| v.unwrap_or(0.0)) })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        if parts.is_empty() {
            return f.write_str("0sec");
        }
        for (i, (unit, value)) in parts.into_iter().enumerate() {
            if i > 0 { f.write_str(" ")? }
            write!(f, "{value}{unit}")?;
        }
        Ok(())
    }
}
