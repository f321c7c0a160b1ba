//! Version 1.0 of the GEDCOM X formal date grammar.
//!
//! A formal date string is one of four productions, told apart by its
//! lexical shape alone:
//!
//! ```text
//! date      := simple | "A" simple | range | recurring
//! simple    := sign YYYY ["-" MM ["-" DD]] ["T" time]
//! time      := hh [":" mm [":" ss]] [tz]
//! tz        := "Z" | sign hh [":" mm]
//! duration  := "P" [nY] [nM] [nD] ["T" [nH] [nM] [nS]]
//! range     := ["A"] [simple] "/" [ simple | duration ]
//! recurring := "R" [n] "/" simple "/" (simple | duration)
//! ```

use std::fmt;
use std::str::FromStr;

pub mod approximate;
pub mod arithmetic;
pub mod duration;
pub mod error;
pub mod options;
pub mod range;
pub mod recurring;
pub(crate) mod scan;
pub mod simple;

pub use approximate::Approximate;
pub use arithmetic::{add_duration, duration_between, multiply_duration};
pub use duration::Duration;
pub use error::DateError;
pub use options::ParseOptions;
pub use range::Range;
pub use recurring::Recurring;
pub use simple::{SimpleDate, TimeZoneOffset};

/// Any formal date value, produced by [`parse`].
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum GedcomxDate {
    Simple(SimpleDate),
    Approximate(Approximate),
    Range(Range),
    Recurring(Recurring),
}

/// Parses any formal date string, selecting the production from its
/// lexical shape: a leading `R` means recurring, a `/` anywhere means a
/// range, a leading `A` an approximate date, anything else a simple
/// date.
pub fn parse(input: &str) -> Result<GedcomxDate, DateError> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<GedcomxDate, DateError> {
    tracing::trace!(input, "parsing formal date string");
    if input.is_empty() {
        return Err(DateError::Empty);
    }
    if input.starts_with('R') {
        Recurring::parse_with_options(input, options).map(Into::into)
    } else if input.contains('/') {
        Range::parse_with_options(input, options).map(Into::into)
    } else if input.starts_with('A') {
        Approximate::parse_with_options(input, options).map(Into::into)
    } else {
        SimpleDate::parse_with_options(input, options).map(Into::into)
    }
}

impl GedcomxDate {
    /// Parses any formal date string. See [`parse`].
    pub fn parse(input: &str) -> Result<Self, DateError> {
        parse(input)
    }

    /// Whether this date is marked as an approximation, either as an
    /// `A`-prefixed simple date or as an approximate range.
    pub fn is_approximate(&self) -> bool {
        match self {
            GedcomxDate::Approximate(_) => true,
            GedcomxDate::Range(range) => range.is_approximate(),
            GedcomxDate::Simple(_) | GedcomxDate::Recurring(_) => false,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleDate> {
        match self {
            GedcomxDate::Simple(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_approximate(&self) -> Option<&Approximate> {
        match self {
            GedcomxDate::Approximate(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&Range> {
        match self {
            GedcomxDate::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn as_recurring(&self) -> Option<&Recurring> {
        match self {
            GedcomxDate::Recurring(recurring) => Some(recurring),
            _ => None,
        }
    }
}

impl fmt::Display for GedcomxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GedcomxDate::Simple(date) => date.fmt(f),
            GedcomxDate::Approximate(date) => date.fmt(f),
            GedcomxDate::Range(range) => range.fmt(f),
            GedcomxDate::Recurring(recurring) => recurring.fmt(f),
        }
    }
}

impl FromStr for GedcomxDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl serde::Serialize for GedcomxDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for GedcomxDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl serde::de::Visitor<'_> for V {
            type Value = GedcomxDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a GEDCOM X formal date (simple, approximate, range, or recurring) as a string",
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(V)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dispatch_selects_the_right_production() -> Result<(), DateError> {
        assert!(matches!(parse("+2000")?, GedcomxDate::Simple(_)));
        assert!(matches!(parse("A+2000")?, GedcomxDate::Approximate(_)));
        assert!(matches!(parse("+2000/+2001")?, GedcomxDate::Range(_)));
        assert!(matches!(parse("A+2000/+2001")?, GedcomxDate::Range(_)));
        assert!(matches!(parse("R2/+2000/P1Y")?, GedcomxDate::Recurring(_)));
        Ok(())
    }

    #[test]
    fn empty_input_is_rejected_before_dispatch() {
        assert!(matches!(parse(""), Err(DateError::Empty)));
    }

    #[test]
    fn approximation_flag() -> Result<(), DateError> {
        assert!(parse("A+2000")?.is_approximate());
        assert!(parse("A+2000/+2001")?.is_approximate());
        assert!(!parse("+2000")?.is_approximate());
        assert!(!parse("+2000/+2001")?.is_approximate());
        Ok(())
    }
}
