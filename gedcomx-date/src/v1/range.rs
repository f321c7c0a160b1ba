use std::fmt;
use std::str::FromStr;

use super::arithmetic::{add_duration, duration_between};
use super::duration::Duration;
use super::error::{DateError, Section};
use super::options::ParseOptions;
use super::scan::Scanner;
use super::simple::SimpleDate;

/// An interval between two simple dates: `[A][start]/[end|duration]`.
///
/// At least one side must be given. When both a start and an end are
/// known the missing third piece is derived: a duration suffix yields
/// the end date, an end date yields the duration. Whichever form the
/// input used stays the canonical one when formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    approximate: bool,
    start: Option<SimpleDate>,
    end: Option<SimpleDate>,
    duration: Option<Duration>,
    duration_given: bool,
}

impl Range {
    pub fn parse(input: &str) -> Result<Self, DateError> {
        Self::parse_with_options(input, &ParseOptions::default())
    }

    pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Self, DateError> {
        Self::parse_at(input, 0, options)
    }

    /// Parses a range whose text begins at `base` within the string the
    /// caller originally supplied, so error spans stay absolute.
    pub(crate) fn parse_at(
        input: &str,
        base: usize,
        options: &ParseOptions,
    ) -> Result<Self, DateError> {
        let mut offset = 0;
        let mut approximate = false;
        if input.starts_with('A') {
            approximate = true;
            offset = 1;
        }
        let body = &input[offset..];

        let Some(slash) = body.find('/') else {
            return Err(DateError::MissingSlash {
                span: (base, input.len()).into(),
            });
        };
        if let Some(second) = body[slash + 1..].find('/') {
            return Err(DateError::TooManyRangeParts {
                span: (base + offset + slash + 1 + second, 1).into(),
            });
        }

        let start_part = &body[..slash];
        let end_part = &body[slash + 1..];
        let start_base = base + offset;
        let end_base = base + offset + slash + 1;

        if start_part.is_empty() && end_part.is_empty() {
            return Err(DateError::EmptyRange {
                span: (base, input.len()).into(),
            });
        }

        let start = if start_part.is_empty() {
            None
        } else {
            let mut scanner = Scanner::new(start_part, start_base);
            Some(
                SimpleDate::parse_part(&mut scanner, options)
                    .map_err(|e| e.in_section(Section::RangeStart))?,
            )
        };

        let mut end = None;
        let mut duration = None;
        let mut duration_given = false;

        if !end_part.is_empty() {
            if end_part.starts_with('P') {
                let Some(ref start) = start else {
                    return Err(DateError::DurationWithoutStart {
                        span: (end_base, end_part.len()).into(),
                    });
                };
                let mut scanner = Scanner::new(end_part, end_base);
                let parsed = Duration::parse_part(&mut scanner)
                    .map_err(|e| e.in_section(Section::RangeEndDuration))?;
                end = Some(
                    add_duration(start, &parsed)
                        .map_err(|e| e.in_section(Section::RangeEnd))?,
                );
                duration = Some(parsed);
                duration_given = true;
            } else {
                let mut scanner = Scanner::new(end_part, end_base);
                let parsed = SimpleDate::parse_part(&mut scanner, options)
                    .map_err(|e| e.in_section(Section::RangeEnd))?;
                if let Some(ref start) = start {
                    duration = Some(duration_between(start, &parsed)?);
                }
                end = Some(parsed);
            }
        }

        Ok(Range {
            approximate,
            start,
            end,
            duration,
            duration_given,
        })
    }

    pub fn is_approximate(&self) -> bool {
        self.approximate
    }

    pub fn start(&self) -> Option<&SimpleDate> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&SimpleDate> {
        self.end.as_ref()
    }

    pub fn duration(&self) -> Option<&Duration> {
        self.duration.as_ref()
    }
}

/// Formats `[A]start/end`, with the duration form of the end preferred
/// when the range was given as start-plus-duration.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approximate {
            f.write_str("A")?;
        }
        if let Some(ref start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str("/")?;
        if self.duration_given {
            if let Some(ref duration) = self.duration {
                write!(f, "{duration}")?;
            }
        } else if let Some(ref end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

impl FromStr for Range {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
