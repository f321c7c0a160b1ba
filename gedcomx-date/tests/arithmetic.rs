//! Property-level coverage for the calendar arithmetic: differencing
//! and addition invert each other, multiplication is component-wise,
//! and ranges and recurrences derive their missing pieces through the
//! same functions.

use gedcomx_date::{
    add_duration, duration_between, multiply_duration, parse, Duration, SimpleDate,
};

fn date(s: &str) -> SimpleDate {
    SimpleDate::parse(s).unwrap()
}

fn duration(s: &str) -> Duration {
    Duration::parse(s).unwrap()
}

#[test]
fn add_duration_inverts_duration_between() {
    // chronologically ordered pairs at matching precision
    let pairs = [
        ("+1000", "+1001"),
        ("+2000", "+2010"),
        ("+1999-12", "+2000-01"),
        ("+2001-01-31", "+2001-03-01"),
        ("+2000-02-28", "+2000-03-01"),
        ("+1999-12-31T23:59", "+2000-01-01T00:01"),
        ("+2000-06-15T10:30:45", "+2003-02-01T09:29:50"),
    ];
    for (a, b) in pairs {
        let diff = duration_between(&date(a), &date(b)).unwrap();
        let reconstructed = add_duration(&date(a), &diff).unwrap();
        assert_eq!(reconstructed, date(b), "{a} + ({b} - {a}) should be {b}");
    }
}

#[test]
fn multiply_by_one_is_identity_under_addition() {
    let start = date("+1950-07-04");
    for d in ["P1Y", "P3M", "P45D", "PT36H", "P1Y2M3DT4H5M6S"] {
        let d = duration(d);
        let once = multiply_duration(&d, 1).unwrap();
        assert_eq!(
            add_duration(&start, &once).unwrap(),
            add_duration(&start, &d).unwrap()
        );
    }
}

#[test]
fn multiply_is_component_wise() {
    let d = duration("P1Y2M3DT4H5M6S");
    let tripled = multiply_duration(&d, 3).unwrap();
    assert_eq!(tripled.years(), d.years().map(|v| v * 3));
    assert_eq!(tripled.months(), d.months().map(|v| v * 3));
    assert_eq!(tripled.days(), d.days().map(|v| v * 3));
    assert_eq!(tripled.hours(), d.hours().map(|v| v * 3));
    assert_eq!(tripled.minutes(), d.minutes().map(|v| v * 3));
    assert_eq!(tripled.seconds(), d.seconds().map(|v| v * 3));

    // absent components stay absent
    let scaled = multiply_duration(&duration("P7D"), 5).unwrap();
    assert_eq!(scaled.years(), None);
    assert_eq!(scaled.days(), Some(35));
}

#[test]
fn range_derives_a_whole_year_duration() {
    let range = parse("+2000/+2010").unwrap();
    let range = range.as_range().unwrap();
    assert_eq!(range.duration().unwrap().to_string(), "P10Y");
}

#[test]
fn range_derives_its_end_from_a_duration() {
    let range = parse("+1970-01-01T00:00:00Z/PT1000000S").unwrap();
    let end = range.as_range().unwrap().end().unwrap();
    // a million seconds is 11 days, 13:46:40
    assert_eq!(end.to_string(), "+1970-01-12T13:46:40Z");
}

#[test]
fn recurring_end_is_count_durations_past_start() {
    let recurring = parse("R2/+2000/P1Y").unwrap();
    let recurring = recurring.as_recurring().unwrap();
    assert_eq!(recurring.nth(2).unwrap(), date("+2002"));
    assert_eq!(recurring.end().unwrap(), &date("+2002"));
}

#[test]
fn recurring_nth_crosses_leap_boundaries() {
    let recurring = parse("R/+2000-02-29/P1Y").unwrap();
    let recurring = recurring.as_recurring().unwrap();
    // +2000-02-29 plus P4Y stays on Feb 29; plus P1Y rolls into March
    assert_eq!(recurring.nth(4).unwrap(), date("+2004-02-29"));
    assert_eq!(recurring.nth(1).unwrap(), date("+2001-03-01"));
}

#[test]
fn differences_ignore_fields_absent_from_both_sides() {
    // neither side has a day, so none appears in the duration
    let diff = duration_between(&date("+2000-01"), &date("+2000-06")).unwrap();
    assert_eq!(diff.to_string(), "P5M");
    assert_eq!(diff.days(), None);
}

#[test]
fn addition_widens_precision_to_the_duration() {
    let result = add_duration(&date("+2000"), &duration("P2M")).unwrap();
    assert_eq!(result.to_string(), "+2000-03");

    let result = add_duration(&date("+2000-05"), &duration("PT1H")).unwrap();
    assert_eq!(result.to_string(), "+2000-05T01");
}
