use std::fmt;

use miette::SourceSpan;

/// The types of errors that can occur when parsing a formal date string
/// or performing calendar arithmetic on parsed values.
///
/// Every parse failure points at the offending bytes of the input via a
/// [`SourceSpan`], so errors can be rendered by [`miette`] against the
/// original string. Arithmetic failures have no source location.
#[derive(thiserror::Error, Debug, miette::Diagnostic, PartialEq, Eq)]
pub enum DateError {
    #[error("Date string is empty")]
    #[diagnostic(code(gedcomx::date::empty))]
    Empty,

    #[error("Expected leading '{expected}'")]
    #[diagnostic(code(gedcomx::date::missing_prefix))]
    MissingPrefix {
        expected: char,
        #[label("this should be '{expected}'")]
        span: SourceSpan,
    },

    #[error("Missing year sign")]
    #[diagnostic(
        code(gedcomx::date::missing_sign),
        help("a simple date always begins with '+' or '-'")
    )]
    MissingSign {
        #[label("expected '+' or '-' here")]
        span: SourceSpan,
    },

    #[error("Malformed year")]
    #[diagnostic(code(gedcomx::date::malformed_year))]
    MalformedYear {
        #[label("expected four digits")]
        span: SourceSpan,
    },

    #[error("Malformed month")]
    #[diagnostic(code(gedcomx::date::malformed_month))]
    MalformedMonth {
        #[label("expected two digits")]
        span: SourceSpan,
    },

    #[error("Month {value} out of range")]
    #[diagnostic(code(gedcomx::date::month_out_of_range))]
    MonthOutOfRange {
        value: u32,
        #[label("months run from 01 to 12")]
        span: SourceSpan,
    },

    #[error("Malformed day")]
    #[diagnostic(code(gedcomx::date::malformed_day))]
    MalformedDay {
        #[label("expected two digits")]
        span: SourceSpan,
    },

    #[error("Day {value} out of range")]
    #[diagnostic(code(gedcomx::date::day_out_of_range))]
    DayOutOfRange {
        value: u32,
        max: u8,
        #[label("this month has {max} days")]
        span: SourceSpan,
    },

    #[error("Malformed hour")]
    #[diagnostic(code(gedcomx::date::malformed_hour))]
    MalformedHour {
        #[label("expected two digits")]
        span: SourceSpan,
    },

    #[error("Hour {value} out of range")]
    #[diagnostic(code(gedcomx::date::hour_out_of_range))]
    HourOutOfRange {
        value: u32,
        #[label("hours run from 00 to 24")]
        span: SourceSpan,
    },

    #[error("Malformed minute")]
    #[diagnostic(code(gedcomx::date::malformed_minute))]
    MalformedMinute {
        #[label("expected two digits")]
        span: SourceSpan,
    },

    #[error("Minute {value} out of range")]
    #[diagnostic(code(gedcomx::date::minute_out_of_range))]
    MinuteOutOfRange {
        value: u32,
        #[label("minutes run from 00 to 59")]
        span: SourceSpan,
    },

    #[error("Malformed second")]
    #[diagnostic(code(gedcomx::date::malformed_second))]
    MalformedSecond {
        #[label("expected two digits")]
        span: SourceSpan,
    },

    #[error("Second {value} out of range")]
    #[diagnostic(code(gedcomx::date::second_out_of_range))]
    SecondOutOfRange {
        value: u32,
        #[label("seconds run from 00 to 59")]
        span: SourceSpan,
    },

    #[error("Nonzero minutes or seconds after hour 24")]
    #[diagnostic(
        code(gedcomx::date::hour_24),
        help("hour 24 marks the end of the day, so minutes and seconds must be zero")
    )]
    Hour24 {
        #[label("must be zero")]
        span: SourceSpan,
    },

    #[error("Malformed time zone")]
    #[diagnostic(code(gedcomx::date::malformed_timezone))]
    MalformedTimezone {
        #[label("expected 'Z' or a '+hh:mm'/'-hh:mm' offset")]
        span: SourceSpan,
    },

    #[error("Unexpected trailing characters")]
    #[diagnostic(code(gedcomx::date::trailing_characters))]
    Trailing {
        #[label("this is not part of the date")]
        span: SourceSpan,
    },

    #[error("Duration has no components")]
    #[diagnostic(code(gedcomx::date::empty_duration))]
    EmptyDuration {
        #[label("at least one component is required after 'P'")]
        span: SourceSpan,
    },

    #[error("Non-normalized durations are not supported")]
    #[diagnostic(code(gedcomx::date::non_normalized_duration))]
    NonNormalizedDuration {
        #[label("spaces are not permitted in a duration")]
        span: SourceSpan,
    },

    #[error("Duplicate {name}")]
    #[diagnostic(code(gedcomx::date::duplicate_duration_component))]
    DuplicateDurationComponent {
        name: &'static str,
        #[label("{name} were already specified")]
        span: SourceSpan,
    },

    #[error("Duration {name} out of order")]
    #[diagnostic(
        code(gedcomx::date::out_of_order_duration_component),
        help("components must appear in the order Y, M, D, T, H, M, S")
    )]
    OutOfOrderDurationComponent {
        name: &'static str,
        #[label("{name} cannot appear here")]
        span: SourceSpan,
    },

    #[error("Duration {name} without a preceding 'T'")]
    #[diagnostic(code(gedcomx::date::time_component_without_marker))]
    TimeComponentWithoutMarker {
        name: &'static str,
        #[label("{name} belong after the 'T' marker")]
        span: SourceSpan,
    },

    #[error("Unknown duration component")]
    #[diagnostic(code(gedcomx::date::unknown_duration_component))]
    UnknownDurationComponent {
        #[label("this is not a duration unit")]
        span: SourceSpan,
    },

    #[error("Duration component has no value")]
    #[diagnostic(code(gedcomx::date::duration_value_missing))]
    DurationValueMissing {
        #[label("this unit needs digits before it")]
        span: SourceSpan,
    },

    #[error("Duration value has no unit")]
    #[diagnostic(code(gedcomx::date::duration_unit_missing))]
    DurationUnitMissing {
        #[label("these digits need a following unit letter")]
        span: SourceSpan,
    },

    #[error("Duration value too large")]
    #[diagnostic(code(gedcomx::date::duration_value_too_large))]
    DurationValueTooLarge {
        #[label("this does not fit in 32 bits")]
        span: SourceSpan,
    },

    #[error("Range must contain '/'")]
    #[diagnostic(code(gedcomx::date::missing_slash))]
    MissingSlash {
        #[label("no '/' in this range")]
        span: SourceSpan,
    },

    #[error("Range has too many parts")]
    #[diagnostic(code(gedcomx::date::too_many_range_parts))]
    TooManyRangeParts {
        #[label("a second '/' is not permitted")]
        span: SourceSpan,
    },

    #[error("Range has neither a start nor an end")]
    #[diagnostic(code(gedcomx::date::empty_range))]
    EmptyRange {
        #[label("nothing on either side of the '/'")]
        span: SourceSpan,
    },

    #[error("Range cannot end with a duration without a start")]
    #[diagnostic(code(gedcomx::date::duration_without_start))]
    DurationWithoutStart {
        #[label("this duration has no start date to apply to")]
        span: SourceSpan,
    },

    #[error("Recurring date must have three '/'-separated parts")]
    #[diagnostic(code(gedcomx::date::recurring_part_count))]
    RecurringPartCount {
        #[label("expected 'R[count]/start/end'")]
        span: SourceSpan,
    },

    #[error("Malformed recurrence count")]
    #[diagnostic(code(gedcomx::date::malformed_count))]
    MalformedCount {
        #[label("expected only digits after 'R'")]
        span: SourceSpan,
    },

    #[error("Recurring date requires both a start and an end")]
    #[diagnostic(code(gedcomx::date::recurring_part_empty))]
    RecurringPartEmpty {
        #[label("this part is empty")]
        span: SourceSpan,
    },

    #[error("Recurring range must resolve a start and a duration")]
    #[diagnostic(code(gedcomx::date::recurring_range_incomplete))]
    RecurringRangeIncomplete,

    #[error("End date precedes start date")]
    #[diagnostic(code(gedcomx::date::end_before_start))]
    EndBeforeStart,

    #[error("Start and end dates are identical")]
    #[diagnostic(code(gedcomx::date::no_difference))]
    NoDifference,

    #[error("Duration multiplier must be at least 1")]
    #[diagnostic(code(gedcomx::date::non_positive_multiplier))]
    NonPositiveMultiplier,

    #[error("Duration component overflow")]
    #[diagnostic(code(gedcomx::date::duration_overflow))]
    DurationOverflow,

    #[error("Resulting year {year} is not representable")]
    #[diagnostic(
        code(gedcomx::date::year_overflow),
        help("formal date years have at most four digits")
    )]
    YearOverflow { year: i64 },

    /// Wraps an error from a nested production so the failure trace
    /// indicates which part of the composite date was at fault.
    #[error("{source} in {section}")]
    #[diagnostic(code(gedcomx::date::nested))]
    Context {
        section: Section,
        #[source]
        source: Box<DateError>,
    },
}

impl DateError {
    /// Attaches the section of a composite date in which this error occurred.
    pub(crate) fn in_section(self, section: Section) -> DateError {
        DateError::Context {
            section,
            source: Box::new(self),
        }
    }
}

/// The nested grammar production in which an inner error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    RangeStart,
    RangeEnd,
    RangeEndDuration,
    RecurringRange,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::RangeStart => "Range Start Date",
            Section::RangeEnd => "Range End Date",
            Section::RangeEndDuration => "Range End Duration",
            Section::RecurringRange => "Recurring Range",
        })
    }
}
