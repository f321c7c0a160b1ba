use super::simple::TimeZoneOffset;

/// Options controlling how formal date strings are parsed.
///
/// Nothing is ever read from the host environment. With no
/// `default_timezone` configured (the default), a time-bearing date
/// that omits its zone simply has no zone, which keeps parsing
/// deterministic and round-trips byte-exact.
#[derive(Default, Clone)]
#[non_exhaustive]
pub struct ParseOptions {
    pub(crate) default_timezone: Option<TimeZoneOffset>,
}

impl ParseOptions {
    /// Sets the offset to assume for time-bearing dates that do not
    /// specify one.
    pub fn default_timezone(self, default_timezone: impl Into<Option<TimeZoneOffset>>) -> Self {
        Self {
            default_timezone: default_timezone.into(),
        }
    }
}
