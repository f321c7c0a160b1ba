use std::fmt;
use std::str::FromStr;

use super::error::DateError;
use super::options::ParseOptions;
use super::scan::Scanner;

/// A single point in time with variable precision.
///
/// Only the year is required. Each further field narrows the precision,
/// and a field is never present without the fields above it, with the
/// one grammar-sanctioned exception that the time may follow the year
/// directly (`+YYYYThh`). Once any time field is present the date may
/// also carry a [`TimeZoneOffset`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimpleDate {
    pub(crate) year: i32,
    pub(crate) month: Option<u8>,
    pub(crate) day: Option<u8>,
    pub(crate) hour: Option<u8>,
    pub(crate) minute: Option<u8>,
    pub(crate) second: Option<u8>,
    pub(crate) tz: Option<TimeZoneOffset>,
}

/// An offset from UTC, stored as whole minutes east of Greenwich.
///
/// Formats as `Z` when the offset is zero and as `±hh:mm` otherwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeZoneOffset {
    minutes_east: i16,
}

impl TimeZoneOffset {
    pub const UTC: TimeZoneOffset = TimeZoneOffset { minutes_east: 0 };

    pub fn from_minutes_east(minutes_east: i16) -> Self {
        Self { minutes_east }
    }

    pub fn minutes_east(&self) -> i16 {
        self.minutes_east
    }

    /// The hour part of the offset, signed.
    pub fn hours(&self) -> i8 {
        (self.minutes_east / 60) as i8
    }

    /// The minute part of the offset, always non-negative.
    pub fn minutes(&self) -> u8 {
        (self.minutes_east.unsigned_abs() % 60) as u8
    }
}

impl fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes_east == 0 {
            return f.write_str("Z");
        }
        let sign = if self.minutes_east < 0 { '-' } else { '+' };
        let magnitude = self.minutes_east.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
    }
}

impl SimpleDate {
    /// Parses a simple date of the form `±YYYY[-MM[-DD]][Thh[:mm[:ss]][tz]]`.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        Self::parse_with_options(input, &ParseOptions::default())
    }

    pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Self, DateError> {
        let mut scanner = Scanner::new(input, 0);
        Self::parse_part(&mut scanner, options)
    }

    /// Parses a simple date from a scanner, consuming it entirely.
    pub(crate) fn parse_part(
        s: &mut Scanner<'_>,
        options: &ParseOptions,
    ) -> Result<Self, DateError> {
        let sign: i32 = match s.peek() {
            None => return Err(DateError::Empty),
            Some(b'+') => 1,
            Some(b'-') => -1,
            Some(_) => return Err(DateError::MissingSign { span: s.here() }),
        };
        s.bump();

        let year_start = s.pos();
        let Some(year) = s.fixed_digits(4) else {
            return Err(DateError::MalformedYear {
                span: s.field_span(year_start, 4),
            });
        };

        let mut date = SimpleDate {
            year: sign * year as i32,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            tz: None,
        };

        if s.is_done() {
            return Ok(date);
        }

        if s.eat(b'-') {
            let month_start = s.pos();
            let Some(month) = s.fixed_digits(2) else {
                return Err(DateError::MalformedMonth {
                    span: s.field_span(month_start, 2),
                });
            };
            if !(1..=12).contains(&month) {
                return Err(DateError::MonthOutOfRange {
                    value: month,
                    span: s.span_since(month_start),
                });
            }
            date.month = Some(month as u8);

            if s.is_done() {
                return Ok(date);
            }

            if s.eat(b'-') {
                let day_start = s.pos();
                let Some(day) = s.fixed_digits(2) else {
                    return Err(DateError::MalformedDay {
                        span: s.field_span(day_start, 2),
                    });
                };
                let max = days_in_month(date.year, month as u8);
                if day < 1 || day > u32::from(max) {
                    return Err(DateError::DayOutOfRange {
                        value: day,
                        max,
                        span: s.span_since(day_start),
                    });
                }
                date.day = Some(day as u8);

                if s.is_done() {
                    return Ok(date);
                }
            }
        }

        if !s.eat(b'T') {
            return Err(DateError::Trailing { span: s.rest() });
        }

        Self::parse_time(s, &mut date)?;

        // A time-bearing date without an explicit zone takes the injected
        // default, when one was configured. Nothing is read from the host.
        if date.tz.is_none() {
            date.tz = options.default_timezone;
        }

        Ok(date)
    }

    fn parse_time(s: &mut Scanner<'_>, date: &mut SimpleDate) -> Result<(), DateError> {
        let hour_start = s.pos();
        let Some(hour) = s.fixed_digits(2) else {
            return Err(DateError::MalformedHour {
                span: s.field_span(hour_start, 2),
            });
        };
        if hour > 24 {
            return Err(DateError::HourOutOfRange {
                value: hour,
                span: s.span_since(hour_start),
            });
        }
        date.hour = Some(hour as u8);

        if s.eat(b':') {
            let minute_start = s.pos();
            let Some(minute) = s.fixed_digits(2) else {
                return Err(DateError::MalformedMinute {
                    span: s.field_span(minute_start, 2),
                });
            };
            if minute > 59 {
                return Err(DateError::MinuteOutOfRange {
                    value: minute,
                    span: s.span_since(minute_start),
                });
            }
            if hour == 24 && minute != 0 {
                return Err(DateError::Hour24 {
                    span: s.span_since(minute_start),
                });
            }
            date.minute = Some(minute as u8);

            if s.eat(b':') {
                let second_start = s.pos();
                let Some(second) = s.fixed_digits(2) else {
                    return Err(DateError::MalformedSecond {
                        span: s.field_span(second_start, 2),
                    });
                };
                if second > 59 {
                    return Err(DateError::SecondOutOfRange {
                        value: second,
                        span: s.span_since(second_start),
                    });
                }
                if hour == 24 && second != 0 {
                    return Err(DateError::Hour24 {
                        span: s.span_since(second_start),
                    });
                }
                date.second = Some(second as u8);
            }
        }

        match s.peek() {
            None => {}
            Some(b'Z') => {
                s.bump();
                if !s.is_done() {
                    return Err(DateError::Trailing { span: s.rest() });
                }
                date.tz = Some(TimeZoneOffset::UTC);
            }
            Some(b'+') | Some(b'-') => {
                date.tz = Some(Self::parse_timezone(s)?);
            }
            Some(_) => return Err(DateError::Trailing { span: s.rest() }),
        }

        Ok(())
    }

    fn parse_timezone(s: &mut Scanner<'_>) -> Result<TimeZoneOffset, DateError> {
        let sign: i16 = if s.eat(b'+') {
            1
        } else {
            s.bump(); // the '-', already peeked by the caller
            -1
        };

        let hours_start = s.pos();
        let Some(hours) = s.fixed_digits(2) else {
            return Err(DateError::MalformedTimezone {
                span: s.field_span(hours_start, 2),
            });
        };

        let minutes = if s.eat(b':') {
            let minutes_start = s.pos();
            let Some(minutes) = s.fixed_digits(2) else {
                return Err(DateError::MalformedTimezone {
                    span: s.field_span(minutes_start, 2),
                });
            };
            if minutes > 59 {
                return Err(DateError::MalformedTimezone {
                    span: s.span_since(minutes_start),
                });
            }
            minutes
        } else {
            0
        };

        if !s.is_done() {
            return Err(DateError::Trailing { span: s.rest() });
        }

        Ok(TimeZoneOffset::from_minutes_east(
            sign * (hours * 60 + minutes) as i16,
        ))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    pub fn day(&self) -> Option<u8> {
        self.day
    }

    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    pub fn minute(&self) -> Option<u8> {
        self.minute
    }

    pub fn second(&self) -> Option<u8> {
        self.second
    }

    pub fn timezone(&self) -> Option<TimeZoneOffset> {
        self.tz
    }
}

/// Formats the canonical formal string: sign and zero-padded four-digit
/// year, then each present field with its grammar separator.
impl fmt::Display for SimpleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year < 0 { '-' } else { '+' };
        write!(f, "{}{:04}", sign, self.year.unsigned_abs())?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        if let Some(hour) = self.hour {
            write!(f, "T{hour:02}")?;
            if let Some(minute) = self.minute {
                write!(f, ":{minute:02}")?;
            }
            if let Some(second) = self.second {
                write!(f, ":{second:02}")?;
            }
            if let Some(tz) = self.tz {
                write!(f, "{tz}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for SimpleDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month is validated to 1..=12"),
    }
}
