use std::fmt;
use std::str::FromStr;

use super::error::DateError;
use super::options::ParseOptions;
use super::scan::Scanner;
use super::simple::{SimpleDate, TimeZoneOffset};

/// A simple date flagged as an approximation: `A` followed by a simple
/// date. Accessors forward to the wrapped date.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Approximate {
    date: SimpleDate,
}

impl Approximate {
    pub fn parse(input: &str) -> Result<Self, DateError> {
        Self::parse_with_options(input, &ParseOptions::default())
    }

    pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Self, DateError> {
        let mut scanner = Scanner::new(input, 0);
        if !scanner.eat(b'A') {
            return Err(DateError::MissingPrefix {
                expected: 'A',
                span: scanner.here(),
            });
        }
        let date = SimpleDate::parse_part(&mut scanner, options)?;
        Ok(Self { date })
    }

    pub fn date(&self) -> &SimpleDate {
        &self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> Option<u8> {
        self.date.month()
    }

    pub fn day(&self) -> Option<u8> {
        self.date.day()
    }

    pub fn hour(&self) -> Option<u8> {
        self.date.hour()
    }

    pub fn minute(&self) -> Option<u8> {
        self.date.minute()
    }

    pub fn second(&self) -> Option<u8> {
        self.date.second()
    }

    pub fn timezone(&self) -> Option<TimeZoneOffset> {
        self.date.timezone()
    }
}

impl fmt::Display for Approximate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.date)
    }
}

impl FromStr for Approximate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
