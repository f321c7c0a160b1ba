//! Acceptance, rejection, and round-trip coverage for the full formal
//! date grammar, exercised through the public `parse` entry point.

use gedcomx_date::{parse, DateError, GedcomxDate};
use rstest::rstest;

#[rstest]
#[case::year_only("+1000")]
#[case::negative_year("-0010")]
#[case::year_month("+1752-09")]
#[case::full_date("+2020-02-29")]
#[case::date_time_utc("+1987-03-29T14:30:05Z")]
#[case::date_time_offset("+1987-03-29T14:30:05+10:00")]
#[case::negative_offset("+2000-01-01T10-00:30")]
#[case::time_after_year("+2000T10")]
#[case::end_of_day("+2000-01-01T24:00:00Z")]
#[case::approximate("A+1650-02")]
#[case::range_start_end("+2000/+2010")]
#[case::range_start_duration("+2000-01-31/P29D")]
#[case::approximate_range("A+1650/+1660")]
#[case::open_ended_range("+1800/")]
#[case::open_started_range("/+1800")]
#[case::recurring_bounded("R2/+2000/P1Y")]
#[case::recurring_unbounded("R/+1000/+1001")]
#[case::recurring_duration("R13/+1800-06-15/P10M20D")]
fn valid_strings_round_trip(#[case] input: &str) {
    let parsed = parse(input).unwrap();
    assert_eq!(parsed.to_string(), input);
}

#[rstest]
#[case::empty("")]
#[case::no_sign("2000")]
#[case::short_year("+200")]
#[case::bare_duration("P")]
#[case::month_13("+2000-13-01")]
#[case::day_0("+2000-01-00")]
#[case::nonleap_feb_29("+2021-02-29")]
#[case::april_31("+2021-04-31")]
#[case::hour_25("+2000-01-01T25")]
#[case::hour_24_with_minutes("+2000-01-01T24:30")]
#[case::second_60("+2000-01-01T10:00:60")]
#[case::trailing_garbage("+2000-01-01x")]
#[case::bad_timezone("+2000-01-01T10+5")]
#[case::range_three_parts("+2000/+2001/+2002")]
#[case::range_empty("/")]
#[case::range_duration_only("/P1Y")]
#[case::range_backwards("+2010/+2000")]
#[case::recurring_two_parts("R1/+2000")]
#[case::recurring_blank_start("R/ /P1Y")]
#[case::recurring_bad_count("Rx/+2000/P1Y")]
#[case::approximate_only("A")]
fn malformed_strings_are_rejected(#[case] input: &str) {
    assert!(parse(input).is_err(), "{input:?} should not parse");
}

#[test]
fn precision_is_monotonic() {
    for input in [
        "+2000",
        "+2000-06",
        "+2000-06-15",
        "+2000-06-15T10",
        "+2000-06-15T10:30",
        "+2000-06-15T10:30:59Z",
        "+2000T10:30",
    ] {
        let GedcomxDate::Simple(date) = parse(input).unwrap() else {
            panic!("{input:?} should be a simple date");
        };
        if date.day().is_some() {
            assert!(date.month().is_some());
        }
        if date.minute().is_some() {
            assert!(date.hour().is_some());
        }
        if date.second().is_some() {
            assert!(date.minute().is_some());
        }
    }
}

#[test]
fn nested_errors_describe_their_context() {
    let message = parse("+2000-13-01").unwrap_err().to_string();
    insta::assert_snapshot!(message, @"Month 13 out of range");

    let message = parse("+2000-13/+2010").unwrap_err().to_string();
    insta::assert_snapshot!(message, @"Month 13 out of range in Range Start Date");

    let message = parse("+2000/P1Q").unwrap_err().to_string();
    insta::assert_snapshot!(message, @"Unknown duration component in Range End Duration");

    let message = parse("R/ /P1Y").unwrap_err().to_string();
    insta::assert_snapshot!(message, @"Missing year sign in Range Start Date in Recurring Range");
}

#[test]
fn errors_never_leave_partial_values() {
    // a failing nested production fails the whole parse
    for input in ["+2000/+1999", "R2/+2000/PT", "A+2000-02-30"] {
        assert!(parse(input).is_err());
    }
}

#[test]
fn serde_round_trips_as_a_string() {
    let date = parse("+2000-01-31/P29D").unwrap();
    let json = serde_json::to_string(&date).unwrap();
    assert_eq!(json, r#""+2000-01-31/P29D""#);

    let back: GedcomxDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, date);
}

#[test]
fn serde_rejects_malformed_strings() {
    let result = serde_json::from_str::<GedcomxDate>(r#""not a date""#);
    assert!(result.is_err());
}

#[test]
fn dispatch_errors_match_direct_parses() {
    // the dispatcher adds nothing of its own: the production's error
    // comes through unchanged
    assert!(matches!(parse(""), Err(DateError::Empty)));
    assert!(matches!(parse("2000"), Err(DateError::MissingSign { .. })));
    assert!(matches!(
        parse("R1/+2000"),
        Err(DateError::RecurringPartCount { .. })
    ));
}
