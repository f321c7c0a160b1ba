//! Calendar arithmetic over simple dates and durations.
//!
//! Dates here have variable precision, so every operation first "zips"
//! its operands: any field present on one side but missing on the other
//! is defaulted on both (month and day to 1, time fields to 0) until the
//! two sides are comparable. The arithmetic itself then runs from
//! seconds up to years with ordinary borrow/carry logic, consulting real
//! month lengths whenever a day boundary is crossed.

use super::duration::Duration;
use super::error::DateError;
use super::simple::{days_in_month, SimpleDate};

/// Mutable scratchpad for the zip/borrow/carry steps. Confined to this
/// module; the public types stay immutable.
#[derive(Clone, Copy, Debug)]
struct Fields {
    year: i64,
    month: Option<i64>,
    day: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
}

impl Fields {
    fn of(date: &SimpleDate) -> Self {
        Self {
            year: i64::from(date.year),
            month: date.month.map(i64::from),
            day: date.day.map(i64::from),
            hour: date.hour.map(i64::from),
            minute: date.minute.map(i64::from),
            second: date.second.map(i64::from),
        }
    }

    // The ensure_* methods materialize a field with its default value,
    // together with the fields its presence implies (day needs month,
    // seconds need minutes need hours). Hour does not imply day: the
    // grammar permits a time directly after the year.

    fn ensure_month(&mut self) {
        self.month.get_or_insert(1);
    }

    fn ensure_day(&mut self) {
        self.ensure_month();
        self.day.get_or_insert(1);
    }

    fn ensure_hour(&mut self) {
        self.hour.get_or_insert(0);
    }

    fn ensure_minute(&mut self) {
        self.ensure_hour();
        self.minute.get_or_insert(0);
    }

    fn ensure_second(&mut self) {
        self.ensure_minute();
        self.second.get_or_insert(0);
    }
}

/// Computes the duration between two simple dates as `end - start`.
///
/// The difference is taken field by field from seconds up to years;
/// a negative field borrows from the next one up, with days borrowing
/// the length of the month preceding the end date's current month
/// reference. Fails when the end does not advance past the start.
#[tracing::instrument(level = "trace")]
pub fn duration_between(start: &SimpleDate, end: &SimpleDate) -> Result<Duration, DateError> {
    let s = zip(start, end);
    let e = zip(end, start);

    let mut borrow = 0i64;

    let seconds = match (e.second, s.second) {
        (Some(es), Some(ss)) => {
            let mut diff = es - ss;
            if diff < 0 {
                diff += 60;
                borrow = 1;
            }
            Some(diff)
        }
        _ => None,
    };

    let minutes = if e.minute.is_some() || borrow > 0 {
        let mut diff = e.minute.unwrap_or(0) - s.minute.unwrap_or(0) - borrow;
        borrow = 0;
        if diff < 0 {
            diff += 60;
            borrow = 1;
        }
        Some(diff)
    } else {
        None
    };

    let hours = if e.hour.is_some() || borrow > 0 {
        let mut diff = e.hour.unwrap_or(0) - s.hour.unwrap_or(0) - borrow;
        borrow = 0;
        if diff < 0 {
            diff += 24;
            borrow = 1;
        }
        Some(diff)
    } else {
        None
    };

    let days = if e.day.is_some() || borrow > 0 {
        let mut diff = e.day.unwrap_or(1) - s.day.unwrap_or(1) - borrow;
        borrow = 0;
        if diff < 0 {
            // walk back through the months preceding the end date until
            // the day difference becomes representable
            let mut year = e.year;
            let mut month = e.month.unwrap_or(1);
            while diff < 0 {
                month -= 1;
                if month < 1 {
                    month = 12;
                    year -= 1;
                }
                diff += i64::from(days_in_month(year as i32, month as u8));
                borrow += 1;
            }
        }
        Some(diff)
    } else {
        None
    };

    let months = if e.month.is_some() || borrow > 0 {
        let mut diff = e.month.unwrap_or(1) - s.month.unwrap_or(1) - borrow;
        borrow = 0;
        while diff < 0 {
            diff += 12;
            borrow += 1;
        }
        Some(diff)
    } else {
        None
    };

    let years = e.year - s.year - borrow;
    if years < 0 {
        return Err(DateError::EndBeforeStart);
    }

    let duration = Duration {
        years: nonzero(Some(years)),
        months: nonzero(months),
        days: nonzero(days),
        hours: nonzero(hours),
        minutes: nonzero(minutes),
        seconds: nonzero(seconds),
    };

    if duration == Duration::default() {
        return Err(DateError::NoDifference);
    }

    Ok(duration)
}

fn nonzero(value: Option<i64>) -> Option<u32> {
    match value {
        Some(v) if v > 0 => Some(v as u32),
        _ => None,
    }
}

/// Zips `date` against `other`: any field `other` carries that `date`
/// lacks is materialized with its default so both sides end up at the
/// same precision.
fn zip(date: &SimpleDate, other: &SimpleDate) -> Fields {
    let mut fields = Fields::of(date);
    if other.second.is_some() {
        fields.ensure_second();
    }
    if other.minute.is_some() {
        fields.ensure_minute();
    }
    if other.hour.is_some() {
        fields.ensure_hour();
    }
    if other.day.is_some() {
        fields.ensure_day();
    }
    if other.month.is_some() {
        fields.ensure_month();
    }
    fields
}

/// Adds a duration to a simple date, carrying overflow from seconds up
/// through years and re-deriving month lengths as months roll over.
///
/// The result's time zone is copied verbatim from `start`; the
/// arithmetic is naive rather than UTC-normalized. Fails when the
/// resulting year has more than four digits.
#[tracing::instrument(level = "trace")]
pub fn add_duration(start: &SimpleDate, duration: &Duration) -> Result<SimpleDate, DateError> {
    let mut end = Fields::of(start);

    // zip the start against the duration so every unit the duration
    // carries has a field to land in
    if duration.seconds.is_some() {
        end.ensure_second();
    }
    if duration.minutes.is_some() {
        end.ensure_minute();
    }
    if duration.hours.is_some() {
        end.ensure_hour();
    }
    if duration.days.is_some() {
        end.ensure_day();
    }
    if duration.months.is_some() {
        end.ensure_month();
    }

    if let Some(seconds) = duration.seconds {
        *end.second.get_or_insert(0) += i64::from(seconds);
    }
    if let Some(minutes) = duration.minutes {
        *end.minute.get_or_insert(0) += i64::from(minutes);
    }
    if let Some(hours) = duration.hours {
        *end.hour.get_or_insert(0) += i64::from(hours);
    }
    if let Some(days) = duration.days {
        *end.day.get_or_insert(1) += i64::from(days);
    }
    if let Some(months) = duration.months {
        *end.month.get_or_insert(1) += i64::from(months);
    }
    end.year += i64::from(duration.years.unwrap_or(0));

    // carry upward, smallest unit first
    if let Some(seconds) = end.second {
        if seconds >= 60 {
            end.ensure_minute();
            *end.minute.get_or_insert(0) += seconds / 60;
            end.second = Some(seconds % 60);
        }
    }
    if let Some(minutes) = end.minute {
        if minutes >= 60 {
            end.ensure_hour();
            *end.hour.get_or_insert(0) += minutes / 60;
            end.minute = Some(minutes % 60);
        }
    }
    if let Some(hours) = end.hour {
        if hours >= 24 {
            end.ensure_day();
            *end.day.get_or_insert(1) += hours / 24;
            end.hour = Some(hours % 24);
        }
    }

    // normalize months before walking days so month lengths are real
    if let Some(months) = end.month {
        if months > 12 {
            end.year += (months - 1) / 12;
            end.month = Some((months - 1) % 12 + 1);
        }
    }
    if let Some(mut day) = end.day {
        let mut month = end.month.unwrap_or(1);
        loop {
            let in_month = i64::from(days_in_month(clamp_year(end.year)?, month as u8));
            if day <= in_month {
                break;
            }
            day -= in_month;
            month += 1;
            if month > 12 {
                month = 1;
                end.year += 1;
            }
        }
        end.day = Some(day);
        end.month = Some(month);
    }

    let year = clamp_year(end.year)?;

    Ok(SimpleDate {
        year,
        month: end.month.map(|v| v as u8),
        day: end.day.map(|v| v as u8),
        hour: end.hour.map(|v| v as u8),
        minute: end.minute.map(|v| v as u8),
        second: end.second.map(|v| v as u8),
        tz: start.tz,
    })
}

fn clamp_year(year: i64) -> Result<i32, DateError> {
    if !(-9999..=9999).contains(&year) {
        return Err(DateError::YearOverflow { year });
    }
    Ok(year as i32)
}

/// Multiplies each present component of a duration independently.
/// No carrying happens here; normalization is deferred until the
/// multiplied duration is added to a date.
#[tracing::instrument(level = "trace")]
pub fn multiply_duration(duration: &Duration, multiplier: u32) -> Result<Duration, DateError> {
    if multiplier == 0 {
        return Err(DateError::NonPositiveMultiplier);
    }

    let scale = |component: Option<u32>| -> Result<Option<u32>, DateError> {
        component
            .map(|value| {
                value
                    .checked_mul(multiplier)
                    .ok_or(DateError::DurationOverflow)
            })
            .transpose()
    };

    Ok(Duration {
        years: scale(duration.years)?,
        months: scale(duration.months)?,
        days: scale(duration.days)?,
        hours: scale(duration.hours)?,
        minutes: scale(duration.minutes)?,
        seconds: scale(duration.seconds)?,
    })
}
