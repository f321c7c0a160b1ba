use std::fmt;
use std::str::FromStr;

use super::error::DateError;
use super::scan::Scanner;

/// A span of calendar time: `P[nY][nM][nD][T[nH][nM][nS]]`.
///
/// Components are independently optional but at least one must be
/// present, and they must appear in strict grammar order with no
/// duplicates. Values are not normalized against each other; `PT90M`
/// stays ninety minutes until it is added to a date.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Duration {
    pub(crate) years: Option<u32>,
    pub(crate) months: Option<u32>,
    pub(crate) days: Option<u32>,
    pub(crate) hours: Option<u32>,
    pub(crate) minutes: Option<u32>,
    pub(crate) seconds: Option<u32>,
}

/// Grammar position of each component, used to police ordering.
/// The `T` marker sits between days and hours.
const RANK_YEARS: u8 = 0;
const RANK_MONTHS: u8 = 1;
const RANK_DAYS: u8 = 2;
const RANK_TIME_MARKER: u8 = 3;
const RANK_HOURS: u8 = 4;
const RANK_MINUTES: u8 = 5;
const RANK_SECONDS: u8 = 6;

impl Duration {
    /// Parses a duration of the form `P[nY][nM][nD][T[nH][nM][nS]]`.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let mut scanner = Scanner::new(input, 0);
        Self::parse_part(&mut scanner)
    }

    /// Parses a duration from a scanner, consuming it entirely.
    ///
    /// `M` is ambiguous in this grammar: it means months before the `T`
    /// marker has been seen and minutes after. That is resolved by the
    /// `in_time` flag as the string is walked, never by lookahead.
    pub(crate) fn parse_part(s: &mut Scanner<'_>) -> Result<Self, DateError> {
        if !s.eat(b'P') {
            return Err(DateError::MissingPrefix {
                expected: 'P',
                span: s.here(),
            });
        }

        let mut duration = Duration::default();
        let mut in_time = false;
        let mut last_rank = RANK_YEARS;
        let mut value: Option<u32> = None;
        let mut value_start = s.pos();

        while let Some(b) = s.peek() {
            if b.is_ascii_digit() {
                if value.is_none() {
                    value_start = s.pos();
                }
                s.bump();
                value = Some(
                    value
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(b - b'0')))
                        .ok_or(DateError::DurationValueTooLarge {
                            span: s.span_since(value_start),
                        })?,
                );
                continue;
            }

            if b == b' ' {
                return Err(DateError::NonNormalizedDuration { span: s.here() });
            }

            let letter_span = s.here();
            if b == b'T' {
                if value.is_some() {
                    return Err(DateError::DurationUnitMissing {
                        span: s.span_since(value_start),
                    });
                }
                s.bump();
                if in_time {
                    return Err(DateError::DuplicateDurationComponent {
                        name: "time markers",
                        span: letter_span,
                    });
                }
                in_time = true;
                last_rank = RANK_TIME_MARKER;
                continue;
            }

            s.bump();
            let (rank, name, slot) = match b {
                b'Y' => (RANK_YEARS, "years", &mut duration.years),
                b'M' if in_time => (RANK_MINUTES, "minutes", &mut duration.minutes),
                b'M' => (RANK_MONTHS, "months", &mut duration.months),
                b'D' => (RANK_DAYS, "days", &mut duration.days),
                b'H' if in_time => (RANK_HOURS, "hours", &mut duration.hours),
                b'S' if in_time => (RANK_SECONDS, "seconds", &mut duration.seconds),
                b'H' => {
                    return Err(DateError::TimeComponentWithoutMarker {
                        name: "hours",
                        span: letter_span,
                    })
                }
                b'S' => {
                    return Err(DateError::TimeComponentWithoutMarker {
                        name: "seconds",
                        span: letter_span,
                    })
                }
                _ => return Err(DateError::UnknownDurationComponent { span: letter_span }),
            };

            let Some(parsed) = value.take() else {
                return Err(DateError::DurationValueMissing { span: letter_span });
            };

            if slot.is_some() {
                return Err(DateError::DuplicateDurationComponent {
                    name,
                    span: letter_span,
                });
            }
            if rank < last_rank {
                return Err(DateError::OutOfOrderDurationComponent {
                    name,
                    span: letter_span,
                });
            }

            *slot = Some(parsed);
            last_rank = rank;
        }

        if value.is_some() {
            return Err(DateError::DurationUnitMissing {
                span: s.span_since(value_start),
            });
        }

        if duration.is_empty() {
            return Err(DateError::EmptyDuration {
                span: s.span_since(0),
            });
        }

        Ok(duration)
    }

    fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
    }

    pub fn years(&self) -> Option<u32> {
        self.years
    }

    pub fn months(&self) -> Option<u32> {
        self.months
    }

    pub fn days(&self) -> Option<u32> {
        self.days
    }

    pub fn hours(&self) -> Option<u32> {
        self.hours
    }

    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    pub fn seconds(&self) -> Option<u32> {
        self.seconds
    }
}

/// Formats the canonical formal string, inserting the `T` marker only
/// when a time component is present.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        if let Some(years) = self.years {
            write!(f, "{years}Y")?;
        }
        if let Some(months) = self.months {
            write!(f, "{months}M")?;
        }
        if let Some(days) = self.days {
            write!(f, "{days}D")?;
        }
        if self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some() {
            f.write_str("T")?;
            if let Some(hours) = self.hours {
                write!(f, "{hours}H")?;
            }
            if let Some(minutes) = self.minutes {
                write!(f, "{minutes}M")?;
            }
            if let Some(seconds) = self.seconds {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn m_is_months_before_t_and_minutes_after() -> Result<(), DateError> {
        let duration = Duration::parse("P1Y2M3D")?;
        assert_eq!(duration.months(), Some(2));
        assert_eq!(duration.minutes(), None);

        let duration = Duration::parse("PT1H2M3S")?;
        assert_eq!(duration.minutes(), Some(2));
        assert_eq!(duration.months(), None);

        let duration = Duration::parse("P1Y2M3DT4H5M6S")?;
        assert_eq!(duration.months(), Some(2));
        assert_eq!(duration.minutes(), Some(5));
        Ok(())
    }

    #[test]
    fn round_trips() -> Result<(), DateError> {
        for input in ["P1Y", "P17D", "PT90M", "P1Y2M3DT4H5M6S", "P100Y", "PT1S"] {
            assert_eq!(Duration::parse(input)?.to_string(), input);
        }
        Ok(())
    }

    #[test]
    fn duplicates_and_ordering() {
        assert!(matches!(
            Duration::parse("P1Y2Y"),
            Err(DateError::DuplicateDurationComponent { name: "years", .. })
        ));
        assert!(matches!(
            Duration::parse("P1M2Y"),
            Err(DateError::OutOfOrderDurationComponent { name: "years", .. })
        ));
        assert!(matches!(
            Duration::parse("PT1M2H"),
            Err(DateError::OutOfOrderDurationComponent { name: "hours", .. })
        ));
        assert!(matches!(
            Duration::parse("PT1S1M"),
            Err(DateError::OutOfOrderDurationComponent { name: "minutes", .. })
        ));
    }

    #[test]
    fn time_units_need_the_marker() {
        assert!(matches!(
            Duration::parse("P1H"),
            Err(DateError::TimeComponentWithoutMarker { name: "hours", .. })
        ));
        assert!(matches!(
            Duration::parse("P1S"),
            Err(DateError::TimeComponentWithoutMarker { name: "seconds", .. })
        ));
    }

    #[test]
    fn malformed_durations() {
        assert!(matches!(
            Duration::parse("1Y"),
            Err(DateError::MissingPrefix { expected: 'P', .. })
        ));
        assert!(matches!(
            Duration::parse("P"),
            Err(DateError::EmptyDuration { .. })
        ));
        assert!(matches!(
            Duration::parse("PT"),
            Err(DateError::EmptyDuration { .. })
        ));
        assert!(matches!(
            Duration::parse("P1"),
            Err(DateError::DurationUnitMissing { .. })
        ));
        assert!(matches!(
            Duration::parse("P1Y2"),
            Err(DateError::DurationUnitMissing { .. })
        ));
        assert!(matches!(
            Duration::parse("PY"),
            Err(DateError::DurationValueMissing { .. })
        ));
        assert!(matches!(
            Duration::parse("P1W"),
            Err(DateError::UnknownDurationComponent { .. })
        ));
        assert!(matches!(
            Duration::parse("P1Y 2M"),
            Err(DateError::NonNormalizedDuration { .. })
        ));
        assert!(matches!(
            Duration::parse("P1T2H"),
            Err(DateError::DurationUnitMissing { .. })
        ));
    }
}
