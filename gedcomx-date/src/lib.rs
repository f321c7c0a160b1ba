//! Parsing, validation, and calendar arithmetic for GEDCOM X formal
//! dates.
//!
//! The formal date grammar is a compact textual representation of
//! genealogical dates: simple dates with variable precision (a bare
//! year down to seconds with a time zone offset), approximations,
//! ranges, durations, and recurring intervals. This crate accepts
//! exactly that grammar, validating every string character by
//! character, and rejects everything else with a diagnostic pointing
//! at the offending input.
//!
//! ```
//! use gedcomx_date::parse;
//!
//! let date = parse("+1987-03-29T14:30")?;
//! let simple = date.as_simple().unwrap();
//! assert_eq!(simple.year(), 1987);
//! assert_eq!(simple.day(), Some(29));
//! assert_eq!(date.to_string(), "+1987-03-29T14:30");
//!
//! let range = parse("+2000/P10Y")?;
//! assert_eq!(range.as_range().unwrap().end().unwrap().year(), 2010);
//! # Ok::<(), gedcomx_date::DateError>(())
//! ```
//!
//! All values are immutable once constructed: parsing either fully
//! succeeds or produces no value. The calendar arithmetic in
//! [`v1::arithmetic`] is pure, and nothing is ever read from the host
//! environment. A default time zone for unannotated times, if one is
//! wanted, is supplied explicitly via [`ParseOptions`].

pub mod v1;

pub use v1::{
    add_duration, duration_between, multiply_duration, parse, parse_with_options, Approximate,
    DateError, Duration, GedcomxDate, ParseOptions, Range, Recurring, SimpleDate, TimeZoneOffset,
};
