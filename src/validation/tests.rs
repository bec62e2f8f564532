//! Unit tests for validation module.

use super::*;
use chrono::TimeZone;

#[test]
fn test_when_missing() {
    assert!(when_missing(Some(&1), "value").is_none());

    let err = when_missing::<i32>(None, "value").unwrap();
    assert_eq!(err.field(), "value");
    assert_eq!(err.kind(), ValidationErrorKind::Missing);
}

#[test]
fn test_when_blank() {
    assert!(when_blank(Some("text"), "name").is_none());
    assert_eq!(
        when_blank(None, "name").unwrap().kind(),
        ValidationErrorKind::Missing
    );
    assert_eq!(
        when_blank(Some(""), "name").unwrap().kind(),
        ValidationErrorKind::Blank
    );
    assert_eq!(
        when_blank(Some(" \t "), "name").unwrap().kind(),
        ValidationErrorKind::Blank
    );
}

#[test]
fn test_when_supplied_blank_skips_absent() {
    assert!(when_supplied_blank(None, "phone").is_none());
    assert!(when_supplied_blank(Some("   "), "phone").is_some());
}

#[test]
fn test_when_length_out_of_range() {
    assert!(when_length_out_of_range(None, 1, 3, "code").is_none());
    assert!(when_length_out_of_range(Some("abc"), 1, 3, "code").is_none());

    let err = when_length_out_of_range(Some("abcd"), 1, 3, "code").unwrap();
    assert_eq!(err.kind(), ValidationErrorKind::Length);
    assert!(err.message().contains("between 1 and 3"));

    let err = when_length_out_of_range(Some("abcd"), 0, 3, "code").unwrap();
    assert!(err.message().contains("less than 3"));
}

#[test]
fn test_when_length_counts_characters() {
    // four characters, eight bytes
    assert!(when_length_out_of_range(Some("ñáéí"), 0, 4, "name").is_none());
}

#[test]
fn test_when_pattern_mismatch() {
    let digits = Regex::new(r"^\d+$").unwrap();

    assert!(when_pattern_mismatch(Some("123"), &digits, "pin").is_none());
    assert!(when_pattern_mismatch(None, &digits, "pin").is_none());
    assert_eq!(
        when_pattern_mismatch(Some("12a"), &digits, "pin")
            .unwrap()
            .kind(),
        ValidationErrorKind::Pattern
    );
}

#[test]
fn test_when_before() {
    let earliest = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    assert!(when_before(later, earliest, "latest_time").is_none());
    assert!(when_before(earliest, earliest, "latest_time").is_none());
    assert_eq!(
        when_before(earliest, later, "latest_time").unwrap().kind(),
        ValidationErrorKind::OutOfRange
    );
}

#[test]
fn test_when_invalid_url() {
    assert!(when_invalid_url(Some("https://example.com/hook"), "url").is_none());
    assert_eq!(
        when_invalid_url(Some("not a url"), "url").unwrap().kind(),
        ValidationErrorKind::InvalidUrl
    );
    assert_eq!(
        when_invalid_url(None, "url").unwrap().kind(),
        ValidationErrorKind::Missing
    );
}

#[test]
fn test_first_of_returns_first_failure() {
    let err = first_of([
        None,
        when_blank(Some(""), "a"),
        when_missing::<i32>(None, "b"),
    ])
    .unwrap();

    assert_eq!(err.field(), "a");
}

#[test]
fn test_validation_error_display() {
    let err = ValidationError::new("address", ValidationErrorKind::Missing, "Value cannot be null.");

    assert_eq!(format!("{}", err), "address: Value cannot be null.");
}
