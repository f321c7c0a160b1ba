use std::fmt;
use std::str::FromStr;

use super::arithmetic::{add_duration, multiply_duration};
use super::error::{DateError, Section};
use super::options::ParseOptions;
use super::range::Range;
use super::simple::SimpleDate;

/// A range repeated at fixed intervals: `R[count]/start/(end|duration)`.
///
/// An absent count means the interval recurs indefinitely. The inner
/// range must resolve both a start and a duration, which the three-part
/// shape guarantees for parsed values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recurring {
    count: Option<u32>,
    range: Range,
    end: Option<SimpleDate>,
}

impl Recurring {
    pub fn parse(input: &str) -> Result<Self, DateError> {
        Self::parse_with_options(input, &ParseOptions::default())
    }

    pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Self, DateError> {
        let Some(rest) = input.strip_prefix('R') else {
            return Err(DateError::MissingPrefix {
                expected: 'R',
                span: (0, usize::from(!input.is_empty())).into(),
            });
        };

        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() != 3 {
            return Err(DateError::RecurringPartCount {
                span: (0, input.len()).into(),
            });
        }

        let count_part = &rest[..parts[0].len() - 1];
        if count_part.contains(|c: char| !c.is_ascii_digit()) {
            return Err(DateError::MalformedCount {
                span: (1, count_part.len()).into(),
            });
        }
        let count = if count_part.is_empty() {
            None
        } else {
            Some(count_part.parse::<u32>().map_err(|_| {
                DateError::MalformedCount {
                    span: (1, count_part.len()).into(),
                }
            })?)
        };

        let start_offset = parts[0].len() + 1;
        if parts[1].is_empty() {
            return Err(DateError::RecurringPartEmpty {
                span: (start_offset, 0).into(),
            });
        }
        if parts[2].is_empty() {
            return Err(DateError::RecurringPartEmpty {
                span: (start_offset + parts[1].len() + 1, 0).into(),
            });
        }

        // parts two and three are contiguous in the input, so the range
        // is parsed straight out of the original string
        let range = Range::parse_at(&input[start_offset..], start_offset, options)
            .map_err(|e| e.in_section(Section::RecurringRange))?;

        if range.start().is_none() || range.duration().is_none() {
            return Err(DateError::RecurringRangeIncomplete);
        }

        let end = match count {
            Some(count) => Some(nth_occurrence(&range, count)?),
            None => None,
        };

        Ok(Recurring { count, range, end })
    }

    /// The recurrence count, or `None` when the interval recurs
    /// indefinitely.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    /// The date the final occurrence ends on, when the count is bounded.
    pub fn end(&self) -> Option<&SimpleDate> {
        self.end.as_ref()
    }

    /// Computes the date reached after `n` whole durations from the
    /// start: the duration is multiplied once and added once, rather
    /// than iterated.
    pub fn nth(&self, n: u32) -> Result<SimpleDate, DateError> {
        nth_occurrence(&self.range, n)
    }
}

fn nth_occurrence(range: &Range, n: u32) -> Result<SimpleDate, DateError> {
    let (Some(start), Some(duration)) = (range.start(), range.duration()) else {
        return Err(DateError::RecurringRangeIncomplete);
    };
    let total = multiply_duration(duration, n)?;
    add_duration(start, &total)
}

impl fmt::Display for Recurring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("R")?;
        if let Some(count) = self.count {
            write!(f, "{count}")?;
        }
        write!(f, "/{}", self.range)
    }
}

impl FromStr for Recurring {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounded_recurrence_computes_its_end() -> Result<(), DateError> {
        let recurring = Recurring::parse("R2/+2000/P1Y")?;
        assert_eq!(recurring.count(), Some(2));
        assert_eq!(recurring.end().unwrap().to_string(), "+2002");
        assert_eq!(recurring.to_string(), "R2/+2000/P1Y");
        Ok(())
    }

    #[test]
    fn unbounded_recurrence_has_no_end() -> Result<(), DateError> {
        let recurring = Recurring::parse("R/+1000/+1001")?;
        assert_eq!(recurring.count(), None);
        assert_eq!(recurring.end(), None);
        assert_eq!(recurring.to_string(), "R/+1000/+1001");
        Ok(())
    }

    #[test]
    fn nth_multiplies_then_adds() -> Result<(), DateError> {
        let recurring = Recurring::parse("R/+2000-01-31/P1M")?;
        // a month past Jan 31 rolls over the short February rather than
        // clamping to its end
        assert_eq!(recurring.nth(1)?.to_string(), "+2000-03-02");
        assert_eq!(recurring.nth(3)?.to_string(), "+2000-05-01");
        Ok(())
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(matches!(
            Recurring::parse("R1/+2000"),
            Err(DateError::RecurringPartCount { .. })
        ));
        assert!(matches!(
            Recurring::parse("R1/+2000/P1Y/extra"),
            Err(DateError::RecurringPartCount { .. })
        ));
        assert!(matches!(
            Recurring::parse("Rx/+2000/P1Y"),
            Err(DateError::MalformedCount { .. })
        ));
        assert!(matches!(
            Recurring::parse("R-1/+2000/P1Y"),
            Err(DateError::MalformedCount { .. })
        ));
        assert!(matches!(
            Recurring::parse("R//P1Y"),
            Err(DateError::RecurringPartEmpty { .. })
        ));
        assert!(matches!(
            Recurring::parse("R/+2000/"),
            Err(DateError::RecurringPartEmpty { .. })
        ));
    }

    #[test]
    fn inner_range_errors_carry_both_sections() {
        let err = Recurring::parse("R/ /P1Y").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing year sign in Range Start Date in Recurring Range"
        );
    }
}
