//! Observation timestamps at minute precision.
//!
//! Accepted input is ISO 8601 in the shapes the sky service emits:
//!
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM:SS.fff`
//! - any of the above with `Z` or a `±HH:MM` / `±HHMM` / `±HH` offset
//! - extended years `±YYYYYY-MM-DD...` for dates outside 0000–9999
//!
//! A space may replace the `T`. Offsets are folded into UTC; seconds are
//! validated and then dropped.

use chrono::{Datelike, NaiveDate, TimeDelta, Timelike};

use crate::error::{Error, Result};

pub const MIN_YEAR: i32 = -2000;
pub const MAX_YEAR: i32 = 2095;

const MAX_ISO8601_LENGTH: usize = 40;

/// A UTC calendar timestamp truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectionTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl ProjectionTime {
    /// Build from UTC components, validating the calendar date and the
    /// supported year span.
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {} outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if hour > 23 {
            return Err(Error::InvalidDate(format!("hour out of range: {}", hour)));
        }
        if minute > 59 {
            return Err(Error::InvalidDate(format!("minute out of range: {}", minute)));
        }
        if NaiveDate::from_ymd_opt(year, month as u32, day as u32).is_none() {
            return Err(Error::InvalidDate(format!(
                "no such day: {}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Minute-precision text form shared with the on-chain renderer.
    ///
    /// `YYYY-MM-DD HH:MM` for years from 0. Negative years use the ISO
    /// extended form `-YYYYYY` behind a `-00` marker, e.g.
    /// `-00-001000-03-21 04:05` for 1001 BC.
    pub fn format_date(&self) -> String {
        if self.year < 0 {
            format!(
                "-00-{:06}-{:02}-{:02} {:02}:{:02}",
                -self.year, self.month, self.day, self.hour, self.minute
            )
        } else {
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute
            )
        }
    }
}

/// Parse an ISO 8601 timestamp and convert it to UTC.
pub fn parse_iso8601(s: &str) -> Result<ProjectionTime> {
    let s = s.trim();
    if s.len() > MAX_ISO8601_LENGTH {
        return Err(Error::InvalidDate("input too long".to_string()));
    }
    if !s.is_ascii() {
        return Err(Error::InvalidDate(format!("non-ASCII timestamp: '{}'", s)));
    }

    let (date_part, time_part) = match s.find('T').or_else(|| s.find(' ')) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (year, month, day) = parse_date(date_part)?;
    let (hour, minute, offset_minutes) = match time_part {
        Some(t) => parse_time(t)?,
        None => (0, 0, 0),
    };

    let local = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .and_then(|d| d.and_hms_opt(hour as u32, minute as u32, 0))
        .ok_or_else(|| {
            Error::InvalidDate(format!("no such day: {}-{:02}-{:02}", year, month, day))
        })?;
    let utc = local
        .checked_sub_signed(TimeDelta::minutes(offset_minutes))
        .ok_or_else(|| Error::InvalidDate(format!("offset overflows date: '{}'", s)))?;

    ProjectionTime::new(
        utc.year(),
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
    )
}

fn parse_date(date_part: &str) -> Result<(i32, u8, u8)> {
    let (sign, body) = match date_part.as_bytes().first() {
        Some(b'-') => (-1, &date_part[1..]),
        Some(b'+') => (1, &date_part[1..]),
        _ => (0, date_part),
    };

    let components: Vec<&str> = body.split('-').collect();
    if components.len() != 3 {
        return Err(Error::InvalidDate(format!(
            "invalid date format: '{}'. Expected YYYY-MM-DD",
            date_part
        )));
    }

    let year_digits = if sign == 0 { 4 } else { 6 };
    if components[0].len() != year_digits {
        return Err(Error::InvalidDate(format!(
            "invalid year format: '{}'",
            components[0]
        )));
    }
    let magnitude = parse_digits(components[0], "year")? as i32;
    let year = match sign {
        -1 if magnitude == 0 => {
            return Err(Error::InvalidDate("negative year zero".to_string()));
        }
        -1 => -magnitude,
        _ => magnitude,
    };

    let month = parse_component(components[1], "month")?;
    let day = parse_component(components[2], "day")?;

    if !(1..=12).contains(&month) {
        return Err(Error::InvalidDate(format!("month out of range: {}", month)));
    }
    if !(1..=31).contains(&day) {
        return Err(Error::InvalidDate(format!("day out of range: {}", day)));
    }

    Ok((year, month, day))
}

/// Returns `(hour, minute, offset east of UTC in minutes)`.
fn parse_time(time_part: &str) -> Result<(u8, u8, i64)> {
    let (clock, offset_minutes) = split_offset(time_part)?;

    let components: Vec<&str> = clock.split(':').collect();
    if components.len() != 2 && components.len() != 3 {
        return Err(Error::InvalidDate(format!(
            "invalid time format: '{}'. Expected HH:MM[:SS]",
            clock
        )));
    }

    let hour = parse_component(components[0], "hour")?;
    let minute = parse_component(components[1], "minute")?;
    if let Some(sec) = components.get(2) {
        let second = sec
            .parse::<f64>()
            .map_err(|_| Error::InvalidDate(format!("invalid second: '{}'", sec)))?;
        if !(0.0..60.0).contains(&second) {
            return Err(Error::InvalidDate(format!("second out of range: {}", second)));
        }
    }

    if hour > 23 {
        return Err(Error::InvalidDate(format!("hour out of range: {}", hour)));
    }
    if minute > 59 {
        return Err(Error::InvalidDate(format!("minute out of range: {}", minute)));
    }

    Ok((hour, minute, offset_minutes))
}

fn split_offset(time_part: &str) -> Result<(&str, i64)> {
    if let Some(clock) = time_part.strip_suffix('Z') {
        return Ok((clock, 0));
    }
    let Some(pos) = time_part.rfind(['+', '-']) else {
        return Ok((time_part, 0));
    };

    let sign = if time_part.as_bytes()[pos] == b'-' { -1 } else { 1 };
    let zone = &time_part[pos + 1..];
    let (hh, mm) = match (zone.len(), zone.split_once(':')) {
        (_, Some((h, m))) => (h, m),
        (4, None) => zone.split_at(2),
        (2, None) => (zone, "00"),
        _ => {
            return Err(Error::InvalidDate(format!(
                "invalid UTC offset: '{}'",
                zone
            )))
        }
    };
    if hh.len() != 2 || mm.len() != 2 {
        return Err(Error::InvalidDate(format!("invalid UTC offset: '{}'", zone)));
    }
    let hours = parse_digits(hh, "offset hour")? as i64;
    let minutes = parse_digits(mm, "offset minute")? as i64;
    if hours > 23 || minutes > 59 {
        return Err(Error::InvalidDate(format!("UTC offset out of range: '{}'", zone)));
    }

    Ok((&time_part[..pos], sign * (hours * 60 + minutes)))
}

/// One- or two-digit calendar/clock component.
fn parse_component(s: &str, field: &str) -> Result<u8> {
    if s.is_empty() || s.len() > 2 {
        return Err(Error::InvalidDate(format!("invalid {} format: '{}'", field, s)));
    }
    Ok(parse_digits(s, field)? as u8)
}

fn parse_digits(s: &str, field: &str) -> Result<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidDate(format!("invalid {}: '{}'", field, s)));
    }
    Ok(s.bytes().fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32))
}
